//! Timing, spring and layout constants for the card screen.

use std::time::Duration;

use crate::interpolate::Rgba;

// ── Spring physics ───────────────────────────────────────────────

pub const SPRING_DEFAULT_DAMPING: f32 = 10.0;
pub const SPRING_DEFAULT_STIFFNESS: f32 = 100.0;
pub const SPRING_REST_DISPLACEMENT: f32 = 0.001;
pub const SPRING_REST_SPEED: f32 = 0.01;
pub const SPRING_SUBSTEP: Duration = Duration::from_millis(1);

// ── Entrance ─────────────────────────────────────────────────────

pub const ENTRANCE_FADE: Duration = Duration::from_millis(1200);
pub const ENTRANCE_CARD: Duration = Duration::from_millis(1500);
pub const ENTRANCE_SCALE_START: f32 = 0.9;
pub const ENTRANCE_SCALE_DAMPING: f32 = 20.0;
pub const ENTRANCE_SCALE_STIFFNESS: f32 = 90.0;

// ── Ambient loops ────────────────────────────────────────────────

pub const BACKGROUND_SHIFT_PERIOD: Duration = Duration::from_secs(8);
pub const SHIMMER_SWEEP: Duration = Duration::from_secs(2);
pub const PARTICLE_RISE: Duration = Duration::from_secs(15);
pub const GLOW_PHASE: Duration = Duration::from_secs(3);
pub const GLOW_FLOOR: f32 = 0.3;
pub const HOLOGRAM_PERIOD: Duration = Duration::from_secs(4);

// ── Mode toggle ──────────────────────────────────────────────────

pub const MODE_DIP_SCALE: f32 = 0.92;
pub const MODE_DIP: Duration = Duration::from_millis(150);
pub const MODE_SPRING_DAMPING: f32 = 15.0;
pub const MODE_SPRING_STIFFNESS: f32 = 200.0;
/// Tilt in degrees; negative leans toward the card tab.
pub const TILT_ANGLE: f32 = 2.0;
pub const TILT_IN: Duration = Duration::from_millis(200);
pub const TILT_SPRING_DAMPING: f32 = 12.0;

// ── Freeze ───────────────────────────────────────────────────────

pub const FREEZE_IN: Duration = Duration::from_millis(1200);
pub const FREEZE_OUT: Duration = Duration::from_millis(1000);
pub const BLUR_IN: Duration = Duration::from_millis(800);
pub const BLUR_OUT: Duration = Duration::from_millis(600);

pub const FREEZE_DIP_SCALE: f32 = 0.95;
pub const FREEZE_DIP: Duration = Duration::from_millis(300);
pub const FREEZE_SPRING_DAMPING: f32 = 10.0;
pub const FREEZE_SPRING_STIFFNESS: f32 = 100.0;

pub const THAW_OVERSHOOT_SCALE: f32 = 1.05;
pub const THAW_OVERSHOOT: Duration = Duration::from_millis(200);
pub const THAW_SPRING_DAMPING: f32 = 15.0;
pub const THAW_SPRING_STIFFNESS: f32 = 150.0;

// ── Toast ────────────────────────────────────────────────────────

pub const TOAST_MESSAGE: &str = "Details Copied!";

// ── Composition ranges ───────────────────────────────────────────

pub const BACKGROUND_DRIFT_X: f32 = 50.0;
pub const BACKGROUND_DRIFT_Y: f32 = 30.0;
pub const CARD_RISE: f32 = 100.0;
pub const TILT_INPUT_RANGE: f32 = 5.0;
pub const TILT_PITCH: f32 = 2.0;
pub const FREEZE_OVERLAY_MAX_OPACITY: f32 = 0.95;
pub const FREEZE_OVERLAY_MIN_SCALE: f32 = 0.7;
pub const FROZEN_CONTENT_OPACITY: f32 = 0.3;
pub const FROZEN_BLUR_INTENSITY: f32 = 30.0;
pub const SHIMMER_PEAK_OPACITY: f32 = 0.8;
pub const GLOW_MIN_OPACITY: f32 = 0.3;
pub const GLOW_SHADOW_RANGE: (f32, f32) = (0.2, 0.6);
pub const TOAST_MIN_SCALE: f32 = 0.5;
pub const HOLOGRAM_OPACITY_RANGE: (f32, f32) = (0.1, 0.4);
pub const HOLOGRAM_DRIFT_X: f32 = 20.0;

// ── Palette ──────────────────────────────────────────────────────

pub const ACCENT_RED: Rgba = Rgba::rgb(0xff, 0x44, 0x44);
pub const ICE_BLUE: Rgba = Rgba::rgb(0x00, 0x77, 0xbe);
