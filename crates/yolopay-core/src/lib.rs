pub mod animation;
pub mod card;
pub mod compose;
pub mod config;
pub mod constants;
pub mod controller;
pub mod error;
pub mod feedback;
pub mod interpolate;
pub mod recipes;
pub mod state;
pub mod toast;

pub use controller::{CardScreen, CopyOutcome};
pub use state::{PaymentMode, UiState};
