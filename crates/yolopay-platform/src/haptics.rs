//! Haptic dispatch.
//!
//! Pulses go to a dedicated OS thread through an MPSC channel so the
//! interaction side never waits on the platform. Desktop machines have no
//! actuator, so the default sink just logs each pulse.

use std::sync::mpsc;

use yolopay_core::error::HapticError;
use yolopay_core::feedback::{HapticKind, Haptics};

enum HapticCommand {
    Pulse(HapticKind),
    Shutdown,
}

/// Cloneable handle to the haptics actor thread.
#[derive(Clone)]
pub struct HapticsHandle {
    tx: mpsc::Sender<HapticCommand>,
}

impl std::fmt::Debug for HapticsHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HapticsHandle").finish_non_exhaustive()
    }
}

impl HapticsHandle {
    /// Spawn the actor with the logging sink.
    pub fn start() -> Result<Self, HapticError> {
        Self::spawn_with(|kind| tracing::info!(?kind, "haptic pulse"))
    }

    /// Spawn the actor, handing every pulse to `sink` on the actor thread.
    pub fn spawn_with<F>(mut sink: F) -> Result<Self, HapticError>
    where
        F: FnMut(HapticKind) + Send + 'static,
    {
        let (tx, rx) = mpsc::channel();

        std::thread::Builder::new()
            .name("haptics".into())
            .spawn(move || actor_loop(rx, &mut sink))
            .map_err(|e| HapticError::Unavailable(e.to_string()))?;

        Ok(Self { tx })
    }

    /// Stop the actor thread. Later pulses fail with `Unavailable`.
    pub fn shutdown(&self) {
        let _ = self.tx.send(HapticCommand::Shutdown);
    }
}

impl Haptics for HapticsHandle {
    fn trigger(&mut self, kind: HapticKind) -> Result<(), HapticError> {
        self.tx
            .send(HapticCommand::Pulse(kind))
            .map_err(|_| HapticError::Unavailable("haptics thread stopped".into()))
    }
}

fn actor_loop(rx: mpsc::Receiver<HapticCommand>, sink: &mut dyn FnMut(HapticKind)) {
    let mut delivered = 0u64;
    for cmd in rx {
        match cmd {
            HapticCommand::Pulse(kind) => {
                sink(kind);
                delivered += 1;
            }
            HapticCommand::Shutdown => break,
        }
    }
    tracing::debug!(delivered, "haptics thread exiting");
}

/// Haptics switched off.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHaptics;

impl Haptics for NoHaptics {
    fn trigger(&mut self, kind: HapticKind) -> Result<(), HapticError> {
        tracing::trace!(?kind, "haptics disabled");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn test_pulses_reach_sink_in_order() {
        let (seen_tx, seen_rx) = mpsc::channel();
        let mut handle = HapticsHandle::spawn_with(move |kind| {
            let _ = seen_tx.send(kind);
        })
        .unwrap();

        handle.trigger(HapticKind::ImpactHeavy).unwrap();
        handle.trigger(HapticKind::NotificationSuccess).unwrap();

        let timeout = Duration::from_secs(2);
        assert_eq!(seen_rx.recv_timeout(timeout).unwrap(), HapticKind::ImpactHeavy);
        assert_eq!(
            seen_rx.recv_timeout(timeout).unwrap(),
            HapticKind::NotificationSuccess
        );
    }

    #[test]
    fn test_trigger_after_shutdown_fails() {
        let (done_tx, done_rx) = mpsc::channel::<()>();
        let mut handle = HapticsHandle::spawn_with(move |_| {
            let _ = done_tx.send(());
        })
        .unwrap();

        handle.shutdown();
        // The sink (and its sender) is dropped once the actor exits.
        assert!(done_rx.recv_timeout(Duration::from_secs(2)).is_err());

        match handle.trigger(HapticKind::ImpactHeavy) {
            Err(HapticError::Unavailable(_)) => {}
            other => panic!("Expected Unavailable, got {other:?}"),
        }
    }

    #[test]
    fn test_no_haptics_is_silent() {
        assert!(NoHaptics.trigger(HapticKind::ImpactHeavy).is_ok());
    }
}
