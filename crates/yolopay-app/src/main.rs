mod error;
mod runner;
mod script;
mod tabs;

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;
use yolopay_core::card::SyntheticCards;
use yolopay_core::config::AppConfig;
use yolopay_core::feedback::{Clipboard, Haptics};
use yolopay_core::CardScreen;
use yolopay_platform::{ArboardClipboard, HapticsHandle, MemoryClipboard, NoClipboard, NoHaptics};

use crate::error::AppError;
use crate::runner::{FrameClock, Runner};
use crate::tabs::{ScreenFactory, TabShell};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ClipboardBackend {
    /// System clipboard.
    System,
    /// In-process clipboard, contents logged at the end.
    Memory,
    /// Always unavailable.
    #[value(name = "none")]
    Disabled,
}

/// Run the YOLO Pay card screen headlessly.
#[derive(Debug, Parser)]
#[command(name = "yolopay", version, about)]
struct Cli {
    /// Config file (defaults to the user config dir, then built-in defaults).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Frame rate of the frame clock (1-1000).
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=1000))]
    fps: Option<u32>,

    /// Comma-separated steps: pay, card, freeze, unfreeze, toggle, copy, wait:<ms>, tab:<home|pay|ginie>.
    #[arg(long, default_value = "")]
    script: String,

    /// Keep the clock running this long after the last step.
    #[arg(long, default_value_t = 2000)]
    duration_ms: u64,

    /// Write JSON frame samples to stdout.
    #[arg(long)]
    json: bool,

    /// Interval between JSON samples.
    #[arg(long, default_value_t = 100)]
    sample_ms: u64,

    /// Pace frames against the wall clock instead of simulating them.
    #[arg(long)]
    realtime: bool,

    /// Disable haptic pulses.
    #[arg(long)]
    no_haptics: bool,

    #[arg(long, value_enum, default_value_t = ClipboardBackend::Memory)]
    clipboard: ClipboardBackend,

    /// Seed the synthetic card generator for reproducible cards.
    #[arg(long)]
    seed: Option<u64>,

    /// Log filter, overridden by RUST_LOG.
    #[arg(long, default_value = "yolopay=info")]
    log_level: String,

    /// Also write logs to `yolopay.log` in this directory.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let _guard = init_tracing(&cli);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "yolopay failed");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(cli: &Cli) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));

    match &cli.log_file {
        Some(dir) => {
            let appender = tracing_appender::rolling::never(dir, "yolopay.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(writer)
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
            None
        }
    }
}

async fn run(cli: Cli) -> Result<(), AppError> {
    let mut config = match &cli.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load()?,
    };
    if let Some(fps) = cli.fps {
        config.frame.fps = fps;
    }
    if cli.no_haptics {
        config.feedback.haptics = false;
    }
    tracing::debug!(?config, "configuration loaded");

    let commands = script::parse(&cli.script)?;

    let haptics = if config.feedback.haptics {
        Some(HapticsHandle::start()?)
    } else {
        None
    };
    let haptics_actor = haptics.clone();
    let memory = MemoryClipboard::new();

    let mut cards = match cli.seed {
        Some(seed) => SyntheticCards::seeded(seed),
        None => SyntheticCards::from_entropy().map_err(yolopay_core::error::ScreenError::from)?,
    };

    let backend = cli.clipboard;
    let factory_memory = memory.clone();
    let factory_config = config.clone();
    let factory: ScreenFactory = Box::new(move || {
        let clipboard: Box<dyn Clipboard> = match backend {
            ClipboardBackend::System => Box::new(ArboardClipboard::new()),
            ClipboardBackend::Memory => Box::new(factory_memory.clone()),
            ClipboardBackend::Disabled => Box::new(NoClipboard),
        };
        let haptics: Box<dyn Haptics> = match &haptics {
            Some(handle) => Box::new(handle.clone()),
            None => Box::new(NoHaptics),
        };
        CardScreen::mount(&mut cards, clipboard, haptics, &factory_config)
    });

    let shell = TabShell::new(factory)?;
    let frame = config.frame.period();
    let clock = if cli.realtime {
        FrameClock::realtime(frame)
    } else {
        FrameClock::simulated(frame)
    };
    let out = cli.json.then(std::io::stdout);
    let mut runner = Runner::new(shell, clock, out, Duration::from_millis(cli.sample_ms));

    let result = runner
        .run(&commands, Duration::from_millis(cli.duration_ms))
        .await;
    if let Some(handle) = &haptics_actor {
        handle.shutdown();
    }
    let summary = result?;

    if backend == ClipboardBackend::Memory {
        if let Some(text) = memory.contents() {
            tracing::info!(clipboard = %text.replace('\n', " | "), "clipboard contents");
        }
    }
    tracing::info!(
        tab = %runner.shell().active(),
        frames = summary.frames,
        elapsed_ms = summary.elapsed_ms,
        copies = summary.copies,
        copy_failures = summary.copy_failures,
        ignored = summary.ignored,
        mounts = summary.mounts,
        "session finished"
    );
    match runner.into_output() {
        Some(mut out) => out.flush()?,
        None => println!("{}", serde_json::to_string_pretty(&summary)?),
    }
    Ok(())
}
