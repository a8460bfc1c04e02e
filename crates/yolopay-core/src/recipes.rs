//! Transition recipes: the fixed bundle of drivers each event applies.

use crate::animation::{Driver, Param, SpringConfig};
use crate::config::ToastConfig;
use crate::constants::*;
use crate::state::PaymentMode;

/// Named list of (parameter, driver) pairs applied together.
#[derive(Debug, Clone, PartialEq)]
pub struct Recipe {
    name: &'static str,
    steps: Vec<(Param, Driver)>,
}

impl Recipe {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            steps: Vec::new(),
        }
    }

    pub fn with(mut self, param: Param, driver: Driver) -> Self {
        self.steps.push((param, driver));
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Driver this recipe assigns to `param`, if any.
    pub fn driver_for(&self, param: Param) -> Option<&Driver> {
        self.steps
            .iter()
            .find(|(p, _)| *p == param)
            .map(|(_, driver)| driver)
    }
}

impl IntoIterator for Recipe {
    type Item = (Param, Driver);
    type IntoIter = std::vec::IntoIter<(Param, Driver)>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.into_iter()
    }
}

/// Resting value of every parameter when the screen mounts.
pub fn initial_values() -> [(Param, f32); Param::COUNT] {
    Param::ALL.map(|param| {
        let value = match param {
            Param::Scale => ENTRANCE_SCALE_START,
            _ => 0.0,
        };
        (param, value)
    })
}

/// One-shot entrance: fade in, spring the scale up, slide the card in.
pub fn entrance() -> Recipe {
    Recipe::new("entrance")
        .with(Param::Fade, Driver::timing(1.0, ENTRANCE_FADE))
        .with(
            Param::Scale,
            Driver::spring(
                1.0,
                SpringConfig::new(ENTRANCE_SCALE_DAMPING, ENTRANCE_SCALE_STIFFNESS),
            ),
        )
        .with(Param::CardEntrance, Driver::timing(1.0, ENTRANCE_CARD))
}

/// Loops that run for the lifetime of the screen.
pub fn ambient() -> Recipe {
    Recipe::new("ambient")
        .with(
            Param::BackgroundShift,
            Driver::repeat(Driver::timing(1.0, BACKGROUND_SHIFT_PERIOD), true),
        )
        .with(
            Param::Shimmer,
            Driver::repeat(
                Driver::sequence(vec![
                    Driver::timing(1.0, SHIMMER_SWEEP),
                    Driver::timing(0.0, SHIMMER_SWEEP),
                ]),
                false,
            ),
        )
        .with(
            Param::ParticleRise,
            Driver::repeat(Driver::timing(1.0, PARTICLE_RISE), false),
        )
        .with(
            Param::GlowPulse,
            Driver::repeat(
                Driver::sequence(vec![
                    Driver::timing(1.0, GLOW_PHASE),
                    Driver::timing(GLOW_FLOOR, GLOW_PHASE),
                ]),
                false,
            ),
        )
        .with(
            Param::HologramShift,
            Driver::repeat(Driver::timing(1.0, HOLOGRAM_PERIOD), true),
        )
}

/// Scale dip plus a tilt toward the chosen tab.
pub fn mode_select(mode: PaymentMode) -> Recipe {
    let tilt = match mode {
        PaymentMode::Card => -TILT_ANGLE,
        PaymentMode::Pay => TILT_ANGLE,
    };
    Recipe::new("mode_select")
        .with(
            Param::Scale,
            Driver::sequence(vec![
                Driver::timing(MODE_DIP_SCALE, MODE_DIP),
                Driver::spring(
                    1.0,
                    SpringConfig::new(MODE_SPRING_DAMPING, MODE_SPRING_STIFFNESS),
                ),
            ]),
        )
        .with(
            Param::CardTilt,
            Driver::sequence(vec![
                Driver::timing(tilt, TILT_IN),
                Driver::spring(
                    0.0,
                    SpringConfig::new(TILT_SPRING_DAMPING, SPRING_DEFAULT_STIFFNESS),
                ),
            ]),
        )
}

pub fn freeze() -> Recipe {
    Recipe::new("freeze")
        .with(Param::Freeze, Driver::timing(1.0, FREEZE_IN))
        .with(Param::Blur, Driver::timing(1.0, BLUR_IN))
        .with(
            Param::Scale,
            Driver::sequence(vec![
                Driver::timing(FREEZE_DIP_SCALE, FREEZE_DIP),
                Driver::spring(
                    1.0,
                    SpringConfig::new(FREEZE_SPRING_DAMPING, FREEZE_SPRING_STIFFNESS),
                ),
            ]),
        )
}

pub fn unfreeze() -> Recipe {
    Recipe::new("unfreeze")
        .with(Param::Freeze, Driver::timing(0.0, FREEZE_OUT))
        .with(Param::Blur, Driver::timing(0.0, BLUR_OUT))
        .with(
            Param::Scale,
            Driver::sequence(vec![
                Driver::timing(THAW_OVERSHOOT_SCALE, THAW_OVERSHOOT),
                Driver::spring(
                    1.0,
                    SpringConfig::new(THAW_SPRING_DAMPING, THAW_SPRING_STIFFNESS),
                ),
            ]),
        )
}

/// Fade in, hold, fade out, then notify.
pub fn toast(timing: &ToastConfig) -> Recipe {
    let mut steps = vec![Driver::timing(1.0, timing.fade_in())];
    if !timing.hold().is_zero() {
        steps.push(Driver::delay(timing.hold()));
    }
    steps.push(Driver::timing(0.0, timing.fade_out()));
    Recipe::new("toast").with(Param::Toast, Driver::sequence(steps).notify_on_complete())
}
