// SPDX-License-Identifier: MIT OR Apache-2.0
//! Frame timing, update channels and loop modes.

use crate::error::UnknownVariant;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Time that passed during one frame of an update loop
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameTime {
    /// Delta after the global time scale was applied
    pub delta: f32,
    /// Raw wall-clock delta
    pub unscaled_delta: f32,
}

impl FrameTime {
    /// Frame where scaled and unscaled time are equal
    pub fn new(delta: f32) -> Self {
        Self {
            delta,
            unscaled_delta: delta,
        }
    }

    /// Frame with a global time scale applied on top of the raw delta
    pub fn scaled(unscaled_delta: f32, global_time_scale: f32) -> Self {
        Self {
            delta: unscaled_delta * global_time_scale,
            unscaled_delta,
        }
    }

    /// Pick the delta a timeline should consume
    pub fn delta_for(&self, ignore_time_scale: bool) -> f32 {
        if ignore_time_scale {
            self.unscaled_delta
        } else {
            self.delta
        }
    }
}

/// Which update pass drives a timeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum UpdateChannel {
    /// Regular per-frame update
    #[default]
    Normal,
    /// Late update, after regular updates
    Late,
    /// Fixed-step update
    Fixed,
    /// Only advanced through explicit manual updates
    Manual,
}

impl UpdateChannel {
    /// Get all channels
    pub fn all() -> &'static [UpdateChannel] {
        &[
            UpdateChannel::Normal,
            UpdateChannel::Late,
            UpdateChannel::Fixed,
            UpdateChannel::Manual,
        ]
    }
}

impl FromStr for UpdateChannel {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "normal" => Ok(Self::Normal),
            "late" => Ok(Self::Late),
            "fixed" => Ok(Self::Fixed),
            "manual" => Ok(Self::Manual),
            _ => Err(UnknownVariant::new("update channel", s)),
        }
    }
}

impl TryFrom<i64> for UpdateChannel {
    type Error = UnknownVariant;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        usize::try_from(value)
            .ok()
            .and_then(|index| Self::all().get(index).copied())
            .ok_or_else(|| UnknownVariant::new("update channel", value))
    }
}

/// How a looping timeline starts its next cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum LoopType {
    /// Jump back to the start and play again
    #[default]
    Restart,
    /// Alternate forward and backward cycles
    Yoyo,
}

impl FromStr for LoopType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "restart" => Ok(Self::Restart),
            "yoyo" => Ok(Self::Yoyo),
            _ => Err(UnknownVariant::new("loop type", s)),
        }
    }
}

impl TryFrom<i64> for LoopType {
    type Error = UnknownVariant;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Restart),
            1 => Ok(Self::Yoyo),
            _ => Err(UnknownVariant::new("loop type", value)),
        }
    }
}
