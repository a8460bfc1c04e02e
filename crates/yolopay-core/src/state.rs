use serde::{Deserialize, Serialize};

/// Payment mode selected in the segmented toggle above the card.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMode {
    #[default]
    Pay,
    Card,
}

impl PaymentMode {
    pub fn label(self) -> &'static str {
        match self {
            Self::Pay => "pay",
            Self::Card => "card",
        }
    }
}

impl std::fmt::Display for PaymentMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Discrete state of the card screen. Only the controller mutates it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct UiState {
    pub mode: PaymentMode,
    pub frozen: bool,
    pub toast_visible: bool,
}

impl UiState {
    /// Caption under the freeze button.
    pub fn freeze_label(&self) -> &'static str {
        if self.frozen {
            "unfreeze"
        } else {
            "freeze"
        }
    }

    pub fn accessibility_label(&self) -> &'static str {
        if self.frozen {
            "Unfreeze card"
        } else {
            "Freeze card"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state() {
        let state = UiState::default();
        assert_eq!(state.mode, PaymentMode::Pay);
        assert!(!state.frozen);
        assert!(!state.toast_visible);
    }

    #[test]
    fn test_freeze_labels_follow_state() {
        let mut state = UiState::default();
        assert_eq!(state.freeze_label(), "freeze");
        assert_eq!(state.accessibility_label(), "Freeze card");
        state.frozen = true;
        assert_eq!(state.freeze_label(), "unfreeze");
        assert_eq!(state.accessibility_label(), "Unfreeze card");
    }

    #[test]
    fn test_mode_serializes_snake_case() {
        let json = serde_json::to_string(&PaymentMode::Pay).unwrap();
        assert_eq!(json, "\"pay\"");
    }
}
