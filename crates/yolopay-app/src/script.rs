//! Scripted user input: `card,freeze,copy,wait:500,tab:home`.
//!
//! `freeze` and `unfreeze` press the freeze button only when the card is not
//! already in that state; `toggle` always presses it.

use std::time::Duration;

use thiserror::Error;
use yolopay_core::PaymentMode;

use crate::tabs::Tab;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    SelectMode(PaymentMode),
    SetFrozen(bool),
    ToggleFreeze,
    Copy,
    Wait(Duration),
    Tab(Tab),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScriptError {
    #[error("step {index}: unknown command `{token}`")]
    UnknownCommand { index: usize, token: String },

    #[error("step {index}: invalid argument `{arg}` for `{command}`: {reason}")]
    InvalidArgument {
        index: usize,
        command: &'static str,
        arg: String,
        reason: String,
    },
}

/// Parse a comma-separated script. Blank steps are skipped.
pub fn parse(script: &str) -> Result<Vec<Command>, ScriptError> {
    script
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .enumerate()
        .map(|(index, token)| parse_step(index, token))
        .collect()
}

fn parse_step(index: usize, token: &str) -> Result<Command, ScriptError> {
    let (name, arg) = match token.split_once(':') {
        Some((name, arg)) => (name.trim(), Some(arg.trim())),
        None => (token, None),
    };

    let command = match (name.to_ascii_lowercase().as_str(), arg) {
        ("pay", None) => Command::SelectMode(PaymentMode::Pay),
        ("card", None) => Command::SelectMode(PaymentMode::Card),
        ("freeze", None) => Command::SetFrozen(true),
        ("unfreeze", None) => Command::SetFrozen(false),
        ("toggle", None) => Command::ToggleFreeze,
        ("copy", None) => Command::Copy,
        ("wait", Some(ms)) => {
            let ms = ms
                .trim_end_matches("ms")
                .parse::<u64>()
                .map_err(|e| ScriptError::InvalidArgument {
                    index,
                    command: "wait",
                    arg: ms.to_string(),
                    reason: e.to_string(),
                })?;
            Command::Wait(Duration::from_millis(ms))
        }
        ("tab", Some(tab)) => {
            let tab = tab.parse().map_err(|reason| ScriptError::InvalidArgument {
                index,
                command: "tab",
                arg: tab.to_string(),
                reason,
            })?;
            Command::Tab(tab)
        }
        _ => {
            return Err(ScriptError::UnknownCommand {
                index,
                token: token.to_string(),
            })
        }
    };
    Ok(command)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_script() {
        let commands = parse("card, freeze,copy,wait:500,tab:home").unwrap();
        assert_eq!(
            commands,
            vec![
                Command::SelectMode(PaymentMode::Card),
                Command::SetFrozen(true),
                Command::Copy,
                Command::Wait(Duration::from_millis(500)),
                Command::Tab(Tab::Home),
            ]
        );
    }

    #[test]
    fn test_blank_steps_skipped() {
        assert_eq!(parse("").unwrap(), vec![]);
        assert_eq!(parse(" , pay ,, ").unwrap(), vec![Command::SelectMode(PaymentMode::Pay)]);
    }

    #[test]
    fn test_freeze_commands_are_distinct() {
        assert_eq!(
            parse("freeze,unfreeze,toggle").unwrap(),
            vec![
                Command::SetFrozen(true),
                Command::SetFrozen(false),
                Command::ToggleFreeze,
            ]
        );
    }

    #[test]
    fn test_wait_accepts_ms_suffix() {
        assert_eq!(
            parse("wait:1100ms").unwrap(),
            vec![Command::Wait(Duration::from_millis(1100))]
        );
    }

    #[test]
    fn test_unknown_command() {
        match parse("copy,shake") {
            Err(ScriptError::UnknownCommand { index, token }) => {
                assert_eq!(index, 1);
                assert_eq!(token, "shake");
            }
            other => panic!("Expected UnknownCommand, got {other:?}"),
        }
        assert!(matches!(
            parse("copy:now"),
            Err(ScriptError::UnknownCommand { .. })
        ));
    }

    #[test]
    fn test_invalid_arguments() {
        match parse("wait:soon") {
            Err(ScriptError::InvalidArgument { command, arg, .. }) => {
                assert_eq!(command, "wait");
                assert_eq!(arg, "soon");
            }
            other => panic!("Expected InvalidArgument, got {other:?}"),
        }
        match parse("tab:settings") {
            Err(ScriptError::InvalidArgument { command, reason, .. }) => {
                assert_eq!(command, "tab");
                assert!(reason.contains("settings"));
            }
            other => panic!("Expected InvalidArgument, got {other:?}"),
        }
    }
}
