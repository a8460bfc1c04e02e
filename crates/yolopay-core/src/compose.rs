//! Per-frame visual attributes derived from the parameter store.
//!
//! Everything here is a pure function of current parameter values and the
//! viewport size. Nothing allocates, so the renderer can call [`compose`]
//! every frame.

use serde::Serialize;

use crate::animation::{AnimatedStore, Param};
use crate::config::DisplayConfig;
use crate::constants::*;
use crate::interpolate::{interpolate, lerp, map_range, Extrapolation, Rgba};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ContainerVisuals {
    pub opacity: f32,
    pub scale: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BackgroundVisuals {
    pub translate_x: f32,
    pub translate_y: f32,
}

/// Card section transform. Rotations are in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CardVisuals {
    pub opacity: f32,
    pub translate_y: f32,
    pub rotate_y: f32,
    pub rotate_x: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ShimmerVisuals {
    pub translate_x: f32,
    pub opacity: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FreezeOverlayVisuals {
    pub opacity: f32,
    pub scale: f32,
    pub rotate_z: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CardContentVisuals {
    pub opacity: f32,
    pub blur_intensity: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GlowVisuals {
    pub opacity: f32,
    pub shadow_opacity: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ParticleVisuals {
    pub translate_y: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ToastVisuals {
    pub opacity: f32,
    pub scale: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HologramVisuals {
    pub opacity: f32,
    pub translate_x: f32,
}

/// Everything the renderer paints for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Visuals {
    pub container: ContainerVisuals,
    pub background: BackgroundVisuals,
    pub card: CardVisuals,
    pub shimmer: ShimmerVisuals,
    pub freeze_overlay: FreezeOverlayVisuals,
    pub card_content: CardContentVisuals,
    pub glow: GlowVisuals,
    pub particles: ParticleVisuals,
    pub toast: ToastVisuals,
    pub hologram: HologramVisuals,
    /// Accent color of the freeze control, red when active, ice blue frozen.
    pub freeze_tint: Rgba,
}

/// A single attribute value in the flat view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Attribute {
    Number(f32),
    Color(Rgba),
}

impl Attribute {
    pub fn as_number(self) -> Option<f32> {
        match self {
            Self::Number(v) => Some(v),
            Self::Color(_) => None,
        }
    }
}

pub const ATTRIBUTE_COUNT: usize = 23;

impl Visuals {
    /// Flat `(name, value)` view, in paint order.
    pub fn attributes(&self) -> [(&'static str, Attribute); ATTRIBUTE_COUNT] {
        use Attribute::{Color, Number};
        [
            ("container.opacity", Number(self.container.opacity)),
            ("container.scale", Number(self.container.scale)),
            ("background.translate_x", Number(self.background.translate_x)),
            ("background.translate_y", Number(self.background.translate_y)),
            ("particles.translate_y", Number(self.particles.translate_y)),
            ("glow.opacity", Number(self.glow.opacity)),
            ("glow.shadow_opacity", Number(self.glow.shadow_opacity)),
            ("card.opacity", Number(self.card.opacity)),
            ("card.translate_y", Number(self.card.translate_y)),
            ("card.rotate_y", Number(self.card.rotate_y)),
            ("card.rotate_x", Number(self.card.rotate_x)),
            ("card_content.opacity", Number(self.card_content.opacity)),
            ("card_content.blur_intensity", Number(self.card_content.blur_intensity)),
            ("hologram.opacity", Number(self.hologram.opacity)),
            ("hologram.translate_x", Number(self.hologram.translate_x)),
            ("shimmer.translate_x", Number(self.shimmer.translate_x)),
            ("shimmer.opacity", Number(self.shimmer.opacity)),
            ("freeze_overlay.opacity", Number(self.freeze_overlay.opacity)),
            ("freeze_overlay.scale", Number(self.freeze_overlay.scale)),
            ("freeze_overlay.rotate_z", Number(self.freeze_overlay.rotate_z)),
            ("freeze_tint", Color(self.freeze_tint)),
            ("toast.opacity", Number(self.toast.opacity)),
            ("toast.scale", Number(self.toast.scale)),
        ]
    }

    pub fn attribute(&self, name: &str) -> Option<Attribute> {
        self.attributes()
            .into_iter()
            .find(|(n, _)| *n == name)
            .map(|(_, value)| value)
    }
}

/// Compose the frame for the store's current values.
///
/// # Panics
/// If any [`Param`] is unregistered.
pub fn compose(store: &AnimatedStore, display: &DisplayConfig) -> Visuals {
    let v = |param| store.value(param);

    let background = v(Param::BackgroundShift);
    let entrance = v(Param::CardEntrance);
    let tilt = v(Param::CardTilt);
    let shimmer = v(Param::Shimmer);
    let freeze = v(Param::Freeze);
    let blur = v(Param::Blur);
    let glow = v(Param::GlowPulse);
    let toast = v(Param::Toast);
    let hologram = v(Param::HologramShift);

    Visuals {
        container: ContainerVisuals {
            opacity: v(Param::Fade),
            scale: v(Param::Scale),
        },
        background: BackgroundVisuals {
            translate_x: map_range(background, (0.0, 1.0), (-BACKGROUND_DRIFT_X, BACKGROUND_DRIFT_X)),
            translate_y: map_range(background, (0.0, 1.0), (-BACKGROUND_DRIFT_Y, BACKGROUND_DRIFT_Y)),
        },
        card: CardVisuals {
            opacity: map_range(entrance, (0.0, 1.0), (0.0, 1.0)),
            translate_y: map_range(entrance, (0.0, 1.0), (CARD_RISE, 0.0)),
            rotate_y: map_range(
                tilt,
                (-TILT_INPUT_RANGE, TILT_INPUT_RANGE),
                (-TILT_INPUT_RANGE, TILT_INPUT_RANGE),
            ),
            rotate_x: map_range(
                tilt,
                (-TILT_INPUT_RANGE, TILT_INPUT_RANGE),
                (TILT_PITCH, -TILT_PITCH),
            ),
        },
        shimmer: ShimmerVisuals {
            translate_x: map_range(shimmer, (0.0, 1.0), (-display.width, display.width * 2.0)),
            opacity: interpolate(
                shimmer,
                [0.0, 0.5, 1.0],
                [0.0, SHIMMER_PEAK_OPACITY, 0.0],
                Extrapolation::Extend,
            ),
        },
        freeze_overlay: FreezeOverlayVisuals {
            opacity: map_range(freeze, (0.0, 1.0), (0.0, FREEZE_OVERLAY_MAX_OPACITY)),
            scale: map_range(freeze, (0.0, 1.0), (FREEZE_OVERLAY_MIN_SCALE, 1.0)),
            rotate_z: map_range(freeze, (0.0, 1.0), (0.0, 360.0)),
        },
        card_content: CardContentVisuals {
            opacity: map_range(blur, (0.0, 1.0), (1.0, FROZEN_CONTENT_OPACITY)),
            blur_intensity: interpolate(
                blur,
                [0.0, 1.0],
                [0.0, FROZEN_BLUR_INTENSITY],
                Extrapolation::Clamp,
            ),
        },
        glow: GlowVisuals {
            opacity: map_range(glow, (0.0, 1.0), (GLOW_MIN_OPACITY, 1.0)),
            shadow_opacity: map_range(glow, (0.0, 1.0), GLOW_SHADOW_RANGE),
        },
        particles: ParticleVisuals {
            translate_y: map_range(v(Param::ParticleRise), (0.0, 1.0), (0.0, -display.height)),
        },
        toast: ToastVisuals {
            opacity: toast,
            scale: map_range(toast, (0.0, 1.0), (TOAST_MIN_SCALE, 1.0)),
        },
        hologram: HologramVisuals {
            opacity: map_range(hologram, (0.0, 1.0), HOLOGRAM_OPACITY_RANGE),
            translate_x: lerp(-HOLOGRAM_DRIFT_X, HOLOGRAM_DRIFT_X, hologram),
        },
        freeze_tint: ACCENT_RED.mix(ICE_BLUE, freeze),
    }
}
