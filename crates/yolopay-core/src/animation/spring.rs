use std::time::Duration;

use crate::constants::{
    SPRING_DEFAULT_DAMPING, SPRING_DEFAULT_STIFFNESS, SPRING_REST_DISPLACEMENT,
    SPRING_REST_SPEED, SPRING_SUBSTEP,
};

/// Physical constants of a damped spring (unit mass unless overridden).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringConfig {
    pub damping: f32,
    pub stiffness: f32,
    pub mass: f32,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            damping: SPRING_DEFAULT_DAMPING,
            stiffness: SPRING_DEFAULT_STIFFNESS,
            mass: 1.0,
        }
    }
}

impl SpringConfig {
    pub fn new(damping: f32, stiffness: f32) -> Self {
        Self {
            damping,
            stiffness,
            ..Default::default()
        }
    }

    /// Damping ratio ζ. Below 1 the spring overshoots.
    pub fn damping_ratio(&self) -> f32 {
        self.damping / (2.0 * (self.stiffness * self.mass).sqrt())
    }
}

/// A spring in flight toward `target`.
#[derive(Debug, Clone, Copy)]
pub struct SpringMotion {
    pub target: f32,
    pub velocity: f32,
    pub config: SpringConfig,
}

impl SpringMotion {
    pub fn new(target: f32, config: SpringConfig) -> Self {
        Self {
            target,
            velocity: 0.0,
            config,
        }
    }

    /// Integrate for `dt`, writing the new position into `value`.
    ///
    /// Returns the unused part of `dt` once the spring has settled (the value
    /// is then exactly `target`), or `None` while it is still moving.
    pub fn advance(&mut self, value: &mut f32, dt: Duration) -> Option<Duration> {
        let mut remaining = dt;
        loop {
            if self.is_settled(*value) {
                *value = self.target;
                self.velocity = 0.0;
                return Some(remaining);
            }
            if remaining.is_zero() {
                return None;
            }

            let step = remaining.min(SPRING_SUBSTEP);
            remaining -= step;

            // Semi-implicit Euler; stable at 1ms steps for the stiffnesses in use.
            let h = step.as_secs_f32();
            let displacement = *value - self.target;
            let force = -self.config.stiffness * displacement - self.config.damping * self.velocity;
            self.velocity += force / self.config.mass * h;
            *value += self.velocity * h;
        }
    }

    fn is_settled(&self, value: f32) -> bool {
        (value - self.target).abs() < SPRING_REST_DISPLACEMENT
            && self.velocity.abs() < SPRING_REST_SPEED
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_until_settled(motion: &mut SpringMotion, value: &mut f32, limit: Duration) -> Duration {
        let frame = Duration::from_millis(16);
        let mut elapsed = Duration::ZERO;
        while elapsed < limit {
            elapsed += frame;
            if motion.advance(value, frame).is_some() {
                return elapsed;
            }
        }
        panic!("Expected spring to settle within {limit:?}, value = {value}");
    }

    #[test]
    fn test_settles_exactly_on_target() {
        let mut value = 0.92;
        let mut motion = SpringMotion::new(1.0, SpringConfig::new(15.0, 200.0));
        run_until_settled(&mut motion, &mut value, Duration::from_secs(3));
        assert_eq!(value, 1.0);
        assert_eq!(motion.velocity, 0.0);
    }

    #[test]
    fn test_underdamped_spring_overshoots() {
        let config = SpringConfig::new(10.0, 100.0);
        assert!(config.damping_ratio() < 1.0);

        let mut value = 0.0;
        let mut motion = SpringMotion::new(1.0, config);
        let mut peak: f32 = 0.0;
        for _ in 0..60 {
            motion.advance(&mut value, Duration::from_millis(16));
            peak = peak.max(value);
        }
        assert!(peak > 1.0, "peak = {peak}");
    }

    #[test]
    fn test_overdamped_spring_does_not_overshoot() {
        let config = SpringConfig::new(20.0, 90.0);
        assert!(config.damping_ratio() > 1.0);

        let mut value = 0.9;
        let mut motion = SpringMotion::new(1.0, config);
        for _ in 0..200 {
            motion.advance(&mut value, Duration::from_millis(16));
            assert!(value <= 1.0, "value = {value}");
        }
        assert_eq!(value, 1.0);
    }

    #[test]
    fn test_zero_dt_does_not_move() {
        let mut value = 0.5;
        let mut motion = SpringMotion::new(1.0, SpringConfig::default());
        assert!(motion.advance(&mut value, Duration::ZERO).is_none());
        assert_eq!(value, 0.5);
    }

    #[test]
    fn test_already_at_rest_returns_full_step() {
        let mut value = 0.0;
        let mut motion = SpringMotion::new(0.0, SpringConfig::default());
        let dt = Duration::from_millis(16);
        assert_eq!(motion.advance(&mut value, dt), Some(dt));
    }
}
