use thiserror::Error;
use yolopay_core::error::{ConfigError, HapticError, ScreenError};

use crate::script::ScriptError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Screen(#[from] ScreenError),

    #[error("haptics: {0}")]
    Haptics(#[from] HapticError),

    #[error("script: {0}")]
    Script(#[from] ScriptError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
