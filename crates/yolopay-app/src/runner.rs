//! Drives a scripted session against the tab shell.
//!
//! The frame clock is either simulated (frames advance back to back with a
//! fixed `dt`) or real time (a `tokio` interval, with `dt` measured between
//! ticks). Discrete state transitions are logged; with `--json` the runner
//! also writes one frame sample per line.

use std::io::Write;
use std::time::Duration;

use serde::Serialize;
use tokio::time::{Instant, Interval, MissedTickBehavior};
use yolopay_core::compose::Visuals;
use yolopay_core::{CopyOutcome, UiState};

use crate::error::AppError;
use crate::script::Command;
use crate::tabs::{Placeholder, Tab, TabShell};

pub enum FrameClock {
    Simulated { frame: Duration },
    Realtime { interval: Interval, last: Instant },
}

impl FrameClock {
    pub fn simulated(frame: Duration) -> Self {
        Self::Simulated { frame }
    }

    pub fn realtime(frame: Duration) -> Self {
        let mut interval = tokio::time::interval(frame);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Self::Realtime {
            interval,
            last: Instant::now(),
        }
    }

    /// Wait for the next frame and return the time it covers.
    async fn next_frame(&mut self) -> Duration {
        match self {
            Self::Simulated { frame } => *frame,
            Self::Realtime { interval, last } => {
                let now = interval.tick().await;
                let dt = now.saturating_duration_since(*last);
                *last = now;
                dt
            }
        }
    }
}

/// One line of `--json` output.
#[derive(Debug, Serialize)]
pub struct FrameSample<'a> {
    pub t_ms: u64,
    pub tab: Tab,
    pub icon: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<Placeholder>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<UiState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub toast: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visuals: Option<Visuals>,
}

/// Totals reported when the session ends.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub frames: u64,
    pub elapsed_ms: u64,
    pub copies: u32,
    pub copy_failures: u32,
    pub ignored: u32,
    pub mounts: u32,
}

pub struct Runner<W> {
    shell: TabShell,
    clock: FrameClock,
    out: Option<W>,
    sample_every: Duration,
    since_sample: Duration,
    elapsed: Duration,
    last_state: Option<UiState>,
    summary: Summary,
}

impl<W: Write> Runner<W> {
    /// `out` receives JSON frame samples every `sample_every`; pass `None`
    /// to only log.
    pub fn new(shell: TabShell, clock: FrameClock, out: Option<W>, sample_every: Duration) -> Self {
        let last_state = shell.screen().map(|screen| screen.state());
        Self {
            shell,
            clock,
            out,
            sample_every,
            since_sample: Duration::ZERO,
            elapsed: Duration::ZERO,
            last_state,
            summary: Summary::default(),
        }
    }

    pub fn shell(&self) -> &TabShell {
        &self.shell
    }

    /// Run every command, then keep the clock going for `tail`.
    pub async fn run(&mut self, commands: &[Command], tail: Duration) -> Result<Summary, AppError> {
        self.sample()?;
        for command in commands {
            self.apply(*command).await?;
        }
        self.wait(tail).await?;
        self.sample()?;

        self.summary.elapsed_ms = self.elapsed.as_millis() as u64;
        self.summary.mounts = self.shell.mounts();
        Ok(self.summary)
    }

    pub fn into_output(self) -> Option<W> {
        self.out
    }

    async fn apply(&mut self, command: Command) -> Result<(), AppError> {
        tracing::debug!(?command, t_ms = self.elapsed.as_millis() as u64, "script step");
        match command {
            Command::Wait(duration) => return self.wait(duration).await,
            Command::Tab(tab) => {
                self.shell.select(tab)?;
            }
            Command::SelectMode(mode) => match self.shell.screen_mut() {
                Some(screen) => {
                    screen.select_mode(mode);
                }
                None => self.ignore("mode"),
            },
            Command::SetFrozen(frozen) => match self.shell.screen_mut() {
                Some(screen) if screen.state().frozen == frozen => {
                    tracing::debug!(frozen, "card already in requested freeze state");
                }
                Some(screen) => {
                    screen.toggle_freeze();
                }
                None => self.ignore("freeze"),
            },
            Command::ToggleFreeze => match self.shell.screen_mut() {
                Some(screen) => {
                    screen.toggle_freeze();
                }
                None => self.ignore("freeze"),
            },
            Command::Copy => match self.shell.screen_mut() {
                Some(screen) => match screen.copy_details() {
                    CopyOutcome::Copied => self.summary.copies += 1,
                    CopyOutcome::ClipboardUnavailable => self.summary.copy_failures += 1,
                },
                None => self.ignore("copy"),
            },
        }
        self.observe();
        self.sample()
    }

    fn ignore(&mut self, what: &'static str) {
        tracing::warn!(what, tab = %self.shell.active(), "no card screen mounted, input ignored");
        self.summary.ignored += 1;
    }

    async fn wait(&mut self, duration: Duration) -> Result<(), AppError> {
        let mut left = duration;
        while left > Duration::ZERO {
            let dt = self.clock.next_frame().await;
            // Simulated frames are trimmed to land exactly on the deadline.
            let dt = match self.clock {
                FrameClock::Simulated { .. } => dt.min(left),
                FrameClock::Realtime { .. } => dt,
            };
            self.frame(dt)?;
            left = left.saturating_sub(dt);
        }
        Ok(())
    }

    fn frame(&mut self, dt: Duration) -> Result<(), AppError> {
        self.elapsed += dt;
        self.summary.frames += 1;
        if let Some(screen) = self.shell.screen_mut() {
            screen.tick(dt);
        }
        self.observe();

        self.since_sample += dt;
        if self.since_sample >= self.sample_every {
            self.since_sample = Duration::ZERO;
            self.sample()?;
        }
        Ok(())
    }

    /// Log discrete state transitions.
    fn observe(&mut self) {
        let state = self.shell.screen().map(|screen| screen.state());
        if state != self.last_state {
            tracing::info!(
                t_ms = self.elapsed.as_millis() as u64,
                tab = %self.shell.active(),
                ?state,
                "state changed"
            );
            self.last_state = state;
        }
    }

    fn sample(&mut self) -> Result<(), AppError> {
        let Some(out) = self.out.as_mut() else {
            return Ok(());
        };
        let screen = self.shell.screen();
        let state = screen.map(|screen| screen.state());
        let sample = FrameSample {
            t_ms: self.elapsed.as_millis() as u64,
            tab: self.shell.active(),
            icon: self.shell.active().icon(),
            placeholder: self.shell.active().placeholder(),
            state,
            toast: screen
                .filter(|screen| screen.state().toast_visible)
                .map(|screen| screen.toast_message()),
            visuals: screen.map(|screen| screen.visuals()),
        };
        serde_json::to_writer(&mut *out, &sample)?;
        out.write_all(b"\n")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use yolopay_core::card::{CardRecord, FixedCard};
    use yolopay_core::config::AppConfig;
    use yolopay_core::PaymentMode;
    use yolopay_platform::{MemoryClipboard, NoClipboard, NoHaptics};

    use super::*;
    use crate::script;
    use crate::tabs::ScreenFactory;

    const FRAME: Duration = Duration::from_millis(16);

    fn jane() -> CardRecord {
        CardRecord {
            number: "4242 4242 4242 4242".into(),
            expiry: "12/29".into(),
            cvv: "123".into(),
            holder_name: "JANE DOE".into(),
        }
    }

    fn shell_with(clipboard: MemoryClipboard) -> TabShell {
        let factory: ScreenFactory = Box::new(move || {
            yolopay_core::CardScreen::mount(
                &mut FixedCard(jane()),
                Box::new(clipboard.clone()),
                Box::new(NoHaptics),
                &AppConfig::default(),
            )
        });
        TabShell::new(factory).unwrap()
    }

    fn samples(out: Vec<u8>) -> Vec<serde_json::Value> {
        String::from_utf8(out)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[tokio::test]
    async fn test_copy_session_hides_toast() {
        let clipboard = MemoryClipboard::new();
        let mut runner: Runner<Vec<u8>> =
            Runner::new(shell_with(clipboard.clone()), FrameClock::simulated(FRAME), None, FRAME);

        let commands = script::parse("copy,wait:1099").unwrap();
        runner.run(&commands, Duration::ZERO).await.unwrap();
        assert!(runner.shell().screen().unwrap().state().toast_visible);
        assert_eq!(
            clipboard.contents().as_deref(),
            Some("Card: 4242 4242 4242 4242\nExpiry: 12/29\nCVV: 123\nHolder: JANE DOE")
        );

        let commands = script::parse("wait:1").unwrap();
        runner.run(&commands, Duration::ZERO).await.unwrap();
        assert!(!runner.shell().screen().unwrap().state().toast_visible);
    }

    #[tokio::test]
    async fn test_summary_counts() {
        let mut runner: Runner<Vec<u8>> = Runner::new(
            shell_with(MemoryClipboard::new()),
            FrameClock::simulated(FRAME),
            None,
            FRAME,
        );
        let commands = script::parse("card,freeze,copy,wait:100,tab:home,copy,tab:pay").unwrap();
        let summary = runner.run(&commands, Duration::from_millis(200)).await.unwrap();

        assert_eq!(summary.copies, 1);
        assert_eq!(summary.ignored, 1);
        assert_eq!(summary.mounts, 2);
        assert_eq!(summary.elapsed_ms, 300);
        // wait:100 -> 7 frames (6 x 16 + 4), tail 200 -> 13 frames (12 x 16 + 8)
        assert_eq!(summary.frames, 20);

        let state = runner.shell().screen().unwrap().state();
        assert_eq!(state.mode, PaymentMode::Pay);
        assert!(!state.frozen);
    }

    #[tokio::test]
    async fn test_freeze_and_unfreeze_are_idempotent() {
        let mut runner: Runner<Vec<u8>> = Runner::new(
            shell_with(MemoryClipboard::new()),
            FrameClock::simulated(FRAME),
            None,
            FRAME,
        );
        let frozen = |runner: &Runner<Vec<u8>>| runner.shell().screen().unwrap().state().frozen;

        runner.run(&script::parse("unfreeze").unwrap(), Duration::ZERO).await.unwrap();
        assert!(!frozen(&runner));

        runner.run(&script::parse("freeze,freeze").unwrap(), Duration::ZERO).await.unwrap();
        assert!(frozen(&runner));

        runner.run(&script::parse("unfreeze,unfreeze").unwrap(), Duration::ZERO).await.unwrap();
        assert!(!frozen(&runner));

        runner.run(&script::parse("toggle,toggle,toggle").unwrap(), Duration::ZERO).await.unwrap();
        assert!(frozen(&runner));
    }

    #[tokio::test]
    async fn test_clipboard_failure_counted() {
        let factory: ScreenFactory = Box::new(|| {
            yolopay_core::CardScreen::mount(
                &mut FixedCard(jane()),
                Box::new(NoClipboard),
                Box::new(NoHaptics),
                &AppConfig::default(),
            )
        });
        let shell = TabShell::new(factory).unwrap();
        let mut runner: Runner<Vec<u8>> =
            Runner::new(shell, FrameClock::simulated(FRAME), None, FRAME);
        let summary = runner
            .run(&script::parse("copy").unwrap(), Duration::ZERO)
            .await
            .unwrap();
        assert_eq!(summary.copies, 0);
        assert_eq!(summary.copy_failures, 1);
        assert!(!runner.shell().screen().unwrap().state().toast_visible);
    }

    #[tokio::test]
    async fn test_json_samples() {
        let mut runner = Runner::new(
            shell_with(MemoryClipboard::new()),
            FrameClock::simulated(FRAME),
            Some(Vec::new()),
            Duration::from_millis(160),
        );
        let commands = script::parse("copy,tab:home").unwrap();
        runner.run(&commands, Duration::from_millis(320)).await.unwrap();
        let lines = samples(runner.into_output().unwrap());

        // initial, copy, tab, two periodic, final
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[0]["tab"], "yolo_pay");
        assert_eq!(lines[0]["visuals"]["container"]["opacity"], 0.0);
        assert_eq!(lines[1]["state"]["toast_visible"], true);
        assert_eq!(lines[1]["toast"], "Details Copied!");
        assert_eq!(lines[0]["icon"], "payment");
        assert_eq!(lines[2]["tab"], "home");
        assert_eq!(lines[2]["placeholder"]["title"], "Home");
        assert!(lines[2].get("visuals").is_none());
        assert_eq!(lines[5]["t_ms"], 320);
    }

    #[tokio::test]
    async fn test_realtime_clock_advances() {
        let mut runner: Runner<Vec<u8>> = Runner::new(
            shell_with(MemoryClipboard::new()),
            FrameClock::realtime(Duration::from_millis(5)),
            None,
            Duration::from_secs(1),
        );
        let summary = runner.run(&[], Duration::from_millis(30)).await.unwrap();
        assert!(summary.elapsed_ms >= 30);
        assert!(summary.frames >= 1);
    }
}
