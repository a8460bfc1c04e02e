//! Seams to the platform clipboard and haptic engine.

use serde::Serialize;

use crate::error::{ClipboardError, HapticError};

/// Haptic pattern requested by the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum HapticKind {
    /// Freeze toggle.
    ImpactHeavy,
    /// Successful copy.
    NotificationSuccess,
}

pub trait Clipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// Fire-and-forget haptic dispatch. Errors are reported but the screen
/// carries on regardless.
pub trait Haptics {
    fn trigger(&mut self, kind: HapticKind) -> Result<(), HapticError>;
}
