//! The card screen: discrete UI state, animated parameters and side effects.
//!
//! Event handlers mutate [`UiState`], apply transition recipes to the store
//! and fire platform side effects. None of them block. [`CardScreen::tick`]
//! is the frame clock; it advances every driver and then delivers finished
//! sequences back to the interaction side.

use std::time::Duration;

use serde::Serialize;

use crate::animation::{AnimatedStore, Param};
use crate::card::{CardRecord, CardSource};
use crate::compose::{compose, Visuals};
use crate::config::{AppConfig, DisplayConfig};
use crate::error::ScreenError;
use crate::feedback::{Clipboard, HapticKind, Haptics};
use crate::recipes;
use crate::state::{PaymentMode, UiState};
use crate::toast::Toast;

/// Result of a copy press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CopyOutcome {
    Copied,
    /// Clipboard write failed; no toast and no haptic.
    ClipboardUnavailable,
}

pub struct CardScreen {
    card: CardRecord,
    mode: PaymentMode,
    frozen: bool,
    toast: Toast,
    store: AnimatedStore,
    display: DisplayConfig,
    clipboard: Box<dyn Clipboard>,
    haptics: Box<dyn Haptics>,
    elapsed: Duration,
}

impl std::fmt::Debug for CardScreen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CardScreen")
            .field("card", &self.card)
            .field("state", &self.state())
            .field("elapsed", &self.elapsed)
            .finish_non_exhaustive()
    }
}

impl CardScreen {
    /// Generate the card record, register every parameter and start the
    /// entrance and ambient animations.
    pub fn mount(
        source: &mut dyn CardSource,
        clipboard: Box<dyn Clipboard>,
        haptics: Box<dyn Haptics>,
        config: &AppConfig,
    ) -> Result<Self, ScreenError> {
        let card = source.generate()?;

        let mut store = AnimatedStore::new();
        for (param, value) in recipes::initial_values() {
            store.register(param, value);
        }
        store.apply(recipes::entrance());
        store.apply(recipes::ambient());

        tracing::info!(holder = %card.holder_name, "card screen mounted");

        Ok(Self {
            card,
            mode: PaymentMode::default(),
            frozen: false,
            toast: Toast::new(config.toast),
            store,
            display: config.display,
            clipboard,
            haptics,
            elapsed: Duration::ZERO,
        })
    }

    pub fn card(&self) -> &CardRecord {
        &self.card
    }

    pub fn state(&self) -> UiState {
        UiState {
            mode: self.mode,
            frozen: self.frozen,
            toast_visible: self.toast.is_visible(),
        }
    }

    pub fn toast_message(&self) -> &'static str {
        self.toast.message()
    }

    pub fn store(&self) -> &AnimatedStore {
        &self.store
    }

    /// Time advanced since mount.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Switch payment mode. Returns false (and does nothing) if `mode` is
    /// already selected.
    pub fn select_mode(&mut self, mode: PaymentMode) -> bool {
        if self.mode == mode {
            return false;
        }
        self.mode = mode;
        self.store.apply(recipes::mode_select(mode));
        tracing::info!(%mode, "payment mode selected");
        true
    }

    /// Flip the frozen flag and run the matching transition. Returns the new
    /// frozen state.
    pub fn toggle_freeze(&mut self) -> bool {
        self.pulse(HapticKind::ImpactHeavy);
        self.frozen = !self.frozen;
        if self.frozen {
            self.store.apply(recipes::freeze());
        } else {
            self.store.apply(recipes::unfreeze());
        }
        tracing::info!(frozen = self.frozen, "freeze toggled");
        self.frozen
    }

    /// Copy the card details to the clipboard and show the toast.
    pub fn copy_details(&mut self) -> CopyOutcome {
        let text = self.card.details_text();
        if let Err(e) = self.clipboard.write_text(&text) {
            tracing::warn!(error = %e, "copy failed");
            return CopyOutcome::ClipboardUnavailable;
        }
        self.pulse(HapticKind::NotificationSuccess);
        self.toast.show(&mut self.store);
        tracing::info!("card details copied");
        CopyOutcome::Copied
    }

    /// Advance the frame clock by `dt` and deliver finished sequences.
    pub fn tick(&mut self, dt: Duration) {
        self.elapsed += dt;
        self.store.tick(dt);
        for completion in self.store.take_completions() {
            if self.toast.on_completion(&self.store, &completion) {
                tracing::info!("toast hidden");
            }
        }
    }

    pub fn visuals(&self) -> Visuals {
        compose(&self.store, &self.display)
    }

    /// Tear the screen down, releasing every driver. Returns how many were
    /// still running.
    pub fn unmount(mut self) -> usize {
        let released = self.release();
        tracing::info!(
            released,
            elapsed_ms = self.elapsed.as_millis() as u64,
            "card screen unmounted"
        );
        released
    }

    fn release(&mut self) -> usize {
        let active = self.store.active_drivers();
        self.store.clear();
        active
    }

    fn pulse(&mut self, kind: HapticKind) {
        if let Err(e) = self.haptics.trigger(kind) {
            tracing::debug!(?kind, error = %e, "haptic pulse dropped");
        }
    }
}

impl Drop for CardScreen {
    fn drop(&mut self) {
        let released = self.release();
        if released > 0 {
            tracing::debug!(released, "animated parameters released");
        }
    }
}

/// Whether both toggle parameters of the freeze transition sit at rest on
/// exactly 0 or 1.
pub fn freeze_at_rest(store: &AnimatedStore) -> bool {
    [Param::Freeze, Param::Blur].into_iter().all(|param| {
        let value = store.value(param);
        !store.is_animating(param) && (value == 0.0 || value == 1.0)
    })
}
