pub mod clipboard;
pub mod haptics;

pub use clipboard::{ArboardClipboard, MemoryClipboard, NoClipboard};
pub use haptics::{HapticsHandle, NoHaptics};
