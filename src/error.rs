//! Error types
//!
//! The frame step itself never fails; these cover the two places a caller
//! can hand the game something it must refuse.

use std::fmt;

use crate::sim::state::{Command, MissionPhase};

/// A mission command that is not valid from the current phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionError {
    pub from: MissionPhase,
    pub command: Command,
}

impl fmt::Display for TransitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cannot {} while {}",
            self.command.as_str(),
            self.from.as_str()
        )
    }
}

impl std::error::Error for TransitionError {}

/// Settings could not be loaded or failed validation
#[derive(Debug)]
pub enum SettingsError {
    Parse(serde_json::Error),
    Invalid(&'static str),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "settings parse error: {err}"),
            Self::Invalid(reason) => write!(f, "invalid settings: {reason}"),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            Self::Invalid(_) => None,
        }
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err)
    }
}
