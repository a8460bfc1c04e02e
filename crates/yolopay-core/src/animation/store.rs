//! Registry of the screen's animated parameters.
//!
//! The interaction side assigns drivers; [`AnimatedStore::tick`] is the frame
//! clock and the only place current values move. Each assignment bumps the
//! parameter's generation so completions from replaced drivers can be told
//! apart from the live one.

use std::time::Duration;

use serde::Serialize;

use super::driver::{Driver, Running};
use crate::recipes::Recipe;

/// Every animated parameter on the card screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Param {
    Fade,
    /// Shared by the entrance spring, the mode dip and the freeze pulses.
    Scale,
    CardEntrance,
    BackgroundShift,
    Shimmer,
    ParticleRise,
    GlowPulse,
    HologramShift,
    CardTilt,
    Freeze,
    Blur,
    Toast,
}

impl Param {
    pub const COUNT: usize = 12;

    pub const ALL: [Param; Self::COUNT] = [
        Self::Fade,
        Self::Scale,
        Self::CardEntrance,
        Self::BackgroundShift,
        Self::Shimmer,
        Self::ParticleRise,
        Self::GlowPulse,
        Self::HologramShift,
        Self::CardTilt,
        Self::Freeze,
        Self::Blur,
        Self::Toast,
    ];

    #[inline]
    fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Fade => "fade",
            Self::Scale => "scale",
            Self::CardEntrance => "card_entrance",
            Self::BackgroundShift => "background_shift",
            Self::Shimmer => "shimmer",
            Self::ParticleRise => "particle_rise",
            Self::GlowPulse => "glow_pulse",
            Self::HologramShift => "hologram_shift",
            Self::CardTilt => "card_tilt",
            Self::Freeze => "freeze",
            Self::Blur => "blur",
            Self::Toast => "toast",
        }
    }
}

impl std::fmt::Display for Param {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A notifying driver ran to completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Completion {
    pub param: Param,
    pub generation: u64,
}

#[derive(Debug)]
struct Slot {
    value: f32,
    driver: Option<Running>,
    generation: u64,
    notify: bool,
}

/// Owns the current value and active driver of every registered parameter.
#[derive(Debug)]
pub struct AnimatedStore {
    slots: [Option<Slot>; Param::COUNT],
    completions: Vec<Completion>,
}

impl Default for AnimatedStore {
    fn default() -> Self {
        Self::new()
    }
}

impl AnimatedStore {
    pub fn new() -> Self {
        Self {
            slots: std::array::from_fn(|_| None),
            completions: Vec::new(),
        }
    }

    /// Register `param` at rest with `initial` value. Re-registering resets it.
    pub fn register(&mut self, param: Param, initial: f32) {
        let generation = self.slots[param.index()]
            .as_ref()
            .map_or(0, |slot| slot.generation + 1);
        self.slots[param.index()] = Some(Slot {
            value: initial,
            driver: None,
            generation,
            notify: false,
        });
    }

    pub fn is_registered(&self, param: Param) -> bool {
        self.slots[param.index()].is_some()
    }

    /// Current value of a registered parameter.
    ///
    /// # Panics
    /// If `param` was never registered.
    pub fn value(&self, param: Param) -> f32 {
        self.slot(param).value
    }

    pub fn get(&self, param: Param) -> Option<f32> {
        self.slots[param.index()].as_ref().map(|slot| slot.value)
    }

    pub fn generation(&self, param: Param) -> u64 {
        self.slot(param).generation
    }

    pub fn is_animating(&self, param: Param) -> bool {
        self.slot(param).driver.is_some()
    }

    /// Number of parameters with an active driver.
    pub fn active_drivers(&self) -> usize {
        self.slots
            .iter()
            .flatten()
            .filter(|slot| slot.driver.is_some())
            .count()
    }

    /// True when nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Replace `param`'s driver. The new driver starts from the current
    /// value, whatever the previous driver left it at. Returns the new
    /// generation.
    ///
    /// # Panics
    /// If `param` was never registered.
    pub fn animate(&mut self, param: Param, driver: Driver) -> u64 {
        let slot = self.slot_mut(param);
        slot.generation += 1;
        slot.notify = driver.notifies();
        slot.driver = Some(Running::start(driver, slot.value));
        tracing::trace!(%param, generation = slot.generation, value = slot.value, "driver assigned");
        slot.generation
    }

    /// Jump to `value`, cancelling any driver.
    pub fn set(&mut self, param: Param, value: f32) {
        let slot = self.slot_mut(param);
        slot.generation += 1;
        slot.driver = None;
        slot.notify = false;
        slot.value = value;
    }

    /// Cancel `param`'s driver, leaving the value where it is.
    pub fn stop(&mut self, param: Param) {
        let slot = self.slot_mut(param);
        if slot.driver.take().is_some() {
            slot.generation += 1;
            slot.notify = false;
        }
    }

    /// Assign every driver of `recipe`. All assignments land before the next
    /// tick.
    pub fn apply(&mut self, recipe: Recipe) {
        tracing::debug!(recipe = recipe.name(), steps = recipe.len(), "applying recipe");
        for (param, driver) in recipe {
            self.animate(param, driver);
        }
    }

    /// Advance every active driver by `dt`.
    pub fn tick(&mut self, dt: Duration) {
        for (index, entry) in self.slots.iter_mut().enumerate() {
            let Some(slot) = entry.as_mut() else {
                continue;
            };
            let Some(running) = slot.driver.as_mut() else {
                continue;
            };
            if running.advance(&mut slot.value, dt).is_some() {
                slot.driver = None;
                if slot.notify {
                    slot.notify = false;
                    self.completions.push(Completion {
                        param: Param::ALL[index],
                        generation: slot.generation,
                    });
                }
            }
        }
    }

    /// Drain completions collected by previous ticks.
    pub fn take_completions(&mut self) -> Vec<Completion> {
        std::mem::take(&mut self.completions)
    }

    /// Whether `completion` came from the driver currently assigned to its
    /// parameter, rather than one since replaced.
    pub fn is_current(&self, completion: &Completion) -> bool {
        self.slots[completion.param.index()]
            .as_ref()
            .is_some_and(|slot| slot.generation == completion.generation)
    }

    #[cfg(test)]
    pub(crate) fn push_completion(&mut self, completion: Completion) {
        self.completions.push(completion);
    }

    /// Drop every parameter and pending completion.
    pub fn clear(&mut self) {
        for entry in &mut self.slots {
            *entry = None;
        }
        self.completions.clear();
    }

    fn slot(&self, param: Param) -> &Slot {
        match self.slots[param.index()].as_ref() {
            Some(slot) => slot,
            None => panic!("animated parameter `{param}` was never registered"),
        }
    }

    fn slot_mut(&mut self, param: Param) -> &mut Slot {
        match self.slots[param.index()].as_mut() {
            Some(slot) => slot,
            None => panic!("animated parameter `{param}` was never registered"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::Easing;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn store_with(params: &[(Param, f32)]) -> AnimatedStore {
        let mut store = AnimatedStore::new();
        for (param, value) in params {
            store.register(*param, *value);
        }
        store
    }

    #[test]
    fn test_param_indices_match_all() {
        for (i, param) in Param::ALL.iter().enumerate() {
            assert_eq!(param.index(), i);
        }
    }

    #[test]
    fn test_driver_runs_and_releases() {
        let mut store = store_with(&[(Param::Freeze, 0.0)]);
        store.animate(Param::Freeze, Driver::timing(1.0, ms(1200)));
        assert!(store.is_animating(Param::Freeze));
        assert_eq!(store.active_drivers(), 1);

        store.tick(ms(1200));
        assert_eq!(store.value(Param::Freeze), 1.0);
        assert!(!store.is_animating(Param::Freeze));
        assert_eq!(store.active_drivers(), 0);
    }

    #[test]
    fn test_replacement_starts_from_current_value() {
        let mut store = store_with(&[(Param::Freeze, 0.0)]);
        store.animate(
            Param::Freeze,
            Driver::timing_with(1.0, ms(1000), Easing::Linear),
        );
        store.tick(ms(400));
        let interrupted = store.value(Param::Freeze);
        assert!((interrupted - 0.4).abs() < 1e-4);

        store.animate(
            Param::Freeze,
            Driver::timing_with(0.0, ms(1000), Easing::Linear),
        );
        assert_eq!(store.value(Param::Freeze), interrupted);

        store.tick(ms(500));
        assert!((store.value(Param::Freeze) - interrupted * 0.5).abs() < 1e-4);
        store.tick(ms(500));
        assert_eq!(store.value(Param::Freeze), 0.0);
    }

    #[test]
    fn test_generation_bumps_on_every_assignment() {
        let mut store = store_with(&[(Param::Toast, 0.0)]);
        let g0 = store.generation(Param::Toast);
        let g1 = store.animate(Param::Toast, Driver::timing(1.0, ms(10)));
        let g2 = store.animate(Param::Toast, Driver::timing(1.0, ms(10)));
        assert!(g0 < g1 && g1 < g2);
        store.set(Param::Toast, 0.0);
        assert!(store.generation(Param::Toast) > g2);
    }

    #[test]
    fn test_completion_is_emitted_once() {
        let mut store = store_with(&[(Param::Toast, 0.0)]);
        let generation = store.animate(
            Param::Toast,
            Driver::sequence(vec![Driver::timing(1.0, ms(300)), Driver::timing(0.0, ms(800))])
                .notify_on_complete(),
        );

        store.tick(ms(1099));
        assert!(store.take_completions().is_empty());

        store.tick(ms(1));
        let completions = store.take_completions();
        assert_eq!(
            completions,
            vec![Completion {
                param: Param::Toast,
                generation
            }]
        );
        assert!(store.is_current(&completions[0]));

        store.tick(ms(100));
        assert!(store.take_completions().is_empty());
    }

    #[test]
    fn test_stale_completion_is_not_current() {
        let mut store = store_with(&[(Param::Toast, 0.0)]);
        store.animate(Param::Toast, Driver::timing(1.0, ms(100)).notify_on_complete());
        store.tick(ms(100));

        // A new driver lands before the queued completion is drained.
        store.animate(Param::Toast, Driver::timing(0.0, ms(100)).notify_on_complete());
        let completions = store.take_completions();
        assert_eq!(completions.len(), 1);
        assert!(!store.is_current(&completions[0]));
    }

    #[test]
    fn test_replaced_driver_never_completes() {
        let mut store = store_with(&[(Param::Toast, 0.0)]);
        store.animate(Param::Toast, Driver::timing(1.0, ms(100)).notify_on_complete());
        store.tick(ms(50));
        store.animate(Param::Toast, Driver::timing(0.5, ms(100)));
        store.tick(ms(200));
        assert!(store.take_completions().is_empty());
        assert_eq!(store.value(Param::Toast), 0.5);
    }

    #[test]
    fn test_stop_keeps_value() {
        let mut store = store_with(&[(Param::Blur, 0.0)]);
        store.animate(Param::Blur, Driver::timing_with(1.0, ms(100), Easing::Linear));
        store.tick(ms(50));
        store.stop(Param::Blur);
        store.tick(ms(100));
        assert!((store.value(Param::Blur) - 0.5).abs() < 1e-4);
    }

    #[test]
    fn test_clear_releases_everything() {
        let mut store = store_with(&[(Param::Shimmer, 0.0), (Param::GlowPulse, 0.0)]);
        store.animate(Param::Shimmer, Driver::repeat(Driver::timing(1.0, ms(2000)), false));
        store.animate(Param::GlowPulse, Driver::repeat(Driver::timing(1.0, ms(3000)), true));
        assert_eq!(store.active_drivers(), 2);

        store.clear();
        assert!(store.is_empty());
        assert_eq!(store.active_drivers(), 0);
        assert_eq!(store.get(Param::Shimmer), None);
    }

    #[test]
    #[should_panic(expected = "never registered")]
    fn test_animating_unregistered_param_panics() {
        let mut store = AnimatedStore::new();
        store.animate(Param::Freeze, Driver::timing(1.0, ms(100)));
    }
}
