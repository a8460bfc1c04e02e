use crate::animation::{AnimatedStore, Completion, Param};
use crate::config::ToastConfig;
use crate::constants::TOAST_MESSAGE;
use crate::recipes;

/// The transient "copied" confirmation.
///
/// Visibility flips on when shown and off only when the completion of the
/// most recent toast sequence arrives. A restart replaces the running
/// sequence, so completions from the earlier one are stale.
#[derive(Debug, Clone)]
pub struct Toast {
    timing: ToastConfig,
    visible: bool,
    generation: Option<u64>,
}

impl Toast {
    pub fn new(timing: ToastConfig) -> Self {
        Self {
            timing,
            visible: false,
            generation: None,
        }
    }

    pub fn message(&self) -> &'static str {
        TOAST_MESSAGE
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Generation of the toast sequence currently on screen.
    pub fn generation(&self) -> Option<u64> {
        self.generation
    }

    /// Start (or restart) the fade-in, hold, fade-out sequence from the
    /// toast's current progress.
    pub fn show(&mut self, store: &mut AnimatedStore) {
        let restarted = self.visible;
        store.apply(recipes::toast(&self.timing));
        let generation = store.generation(Param::Toast);
        self.generation = Some(generation);
        self.visible = true;
        tracing::debug!(generation, restarted, "toast shown");
    }

    /// Handle a completion drained from the store. Returns true if it hid
    /// the toast.
    pub fn on_completion(&mut self, store: &AnimatedStore, completion: &Completion) -> bool {
        if completion.param != Param::Toast {
            return false;
        }
        if !store.is_current(completion) || self.generation != Some(completion.generation) {
            tracing::debug!(generation = completion.generation, "stale toast completion ignored");
            return false;
        }
        self.visible = false;
        self.generation = None;
        tracing::debug!(generation = completion.generation, "toast dismissed");
        true
    }
}
