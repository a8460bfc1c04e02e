//! Clipboard backends for the copy action.

use std::sync::{Arc, Mutex};

use yolopay_core::error::ClipboardError;
use yolopay_core::feedback::Clipboard;

/// System clipboard via `arboard`.
///
/// The handle is opened on first write and kept open afterwards; on Wayland
/// the copied text lives only as long as the handle does. A failed write
/// drops the handle so the next copy reopens it.
#[derive(Default)]
pub struct ArboardClipboard {
    inner: Option<arboard::Clipboard>,
}

impl ArboardClipboard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Clipboard for ArboardClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        if self.inner.is_none() {
            let clipboard = arboard::Clipboard::new()
                .map_err(|e| ClipboardError::Unavailable(e.to_string()))?;
            self.inner = Some(clipboard);
        }
        let Some(clipboard) = self.inner.as_mut() else {
            return Err(ClipboardError::Unavailable("clipboard not open".into()));
        };

        if let Err(e) = clipboard.set_text(text.to_owned()) {
            tracing::debug!(error = %e, "clipboard write failed, reopening next time");
            self.inner = None;
            return Err(ClipboardError::Unavailable(e.to_string()));
        }
        Ok(())
    }
}

/// In-process clipboard. Clones share the same contents.
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    contents: Arc<Mutex<Option<String>>>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last text written, if any.
    pub fn contents(&self) -> Option<String> {
        self.contents.lock().ok().and_then(|guard| guard.clone())
    }
}

impl Clipboard for MemoryClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        let mut guard = self
            .contents
            .lock()
            .map_err(|_| ClipboardError::Unavailable("clipboard lock poisoned".into()))?;
        *guard = Some(text.to_owned());
        Ok(())
    }
}

/// A clipboard that is never available.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoClipboard;

impl Clipboard for NoClipboard {
    fn write_text(&mut self, _text: &str) -> Result<(), ClipboardError> {
        Err(ClipboardError::Unavailable("clipboard disabled".into()))
    }
}
