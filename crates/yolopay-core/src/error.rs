use thiserror::Error;

/// Failure to produce the synthetic card record at mount.
#[derive(Debug, Error)]
pub enum CardError {
    #[error("entropy source unavailable: {0}")]
    EntropyUnavailable(String),
}

/// Failure to write the copied details to the platform clipboard.
#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),
}

/// Failure to deliver a haptic pulse. Callers ignore these.
#[derive(Debug, Error)]
pub enum HapticError {
    #[error("haptic dispatch unavailable: {0}")]
    Unavailable(String),
}

/// Errors surfaced while mounting the card screen.
#[derive(Debug, Error)]
pub enum ScreenError {
    #[error("card generation failed: {0}")]
    CardGeneration(#[from] CardError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config error: {0}")]
    Parse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
