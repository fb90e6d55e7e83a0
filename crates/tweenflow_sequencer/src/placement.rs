// SPDX-License-Identifier: MIT OR Apache-2.0
//! Step placement and playback direction.

use crate::error::SettingsError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Where a step lands relative to the steps before it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Placement {
    /// After the end of everything placed so far
    #[default]
    Append,
    /// Together with the most recent `Append` step
    Join,
}

impl Placement {
    /// Get the display name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Append => "Append",
            Self::Join => "Join",
        }
    }
}

impl FromStr for Placement {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "append" => Ok(Self::Append),
            "join" => Ok(Self::Join),
            _ => Err(SettingsError::UnknownPlacement(s.to_string())),
        }
    }
}

impl TryFrom<i64> for Placement {
    type Error = SettingsError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Append),
            1 => Ok(Self::Join),
            _ => Err(SettingsError::UnknownPlacement(value.to_string())),
        }
    }
}

/// Direction of the last play request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PlayDirection {
    /// Toward the end
    #[default]
    Forward,
    /// Toward the start
    Backward,
}
