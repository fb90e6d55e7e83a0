// SPDX-License-Identifier: MIT OR Apache-2.0
//! Sequencer configuration, loaded from RON.

use crate::error::SettingsError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tweenflow_engine::{LoopType, UpdateChannel};

/// Values read when a sequence is built or enabled
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SequencerSettings {
    /// Play when the owner is enabled
    pub play_on_enable: bool,
    /// Restart instead of resuming when the owner is enabled
    pub restart_on_enable: bool,
    /// Kill the sequence as soon as it completes
    pub auto_kill: bool,
    /// Let a pooling engine reuse the sequence
    pub recyclable: bool,
    /// `0` plays once, `-1` loops forever, `N > 0` repeats `N` times
    pub loops: i32,
    /// How each loop cycle starts
    pub loop_type: LoopType,
    /// Update pass that drives the sequence
    pub update_channel: UpdateChannel,
    /// Ignore the global time scale
    pub ignore_time_scale: bool,
    /// Initial duration multiplier. `2.0` doubles the wall-clock length.
    pub duration_multiplier: f32,
}

impl Default for SequencerSettings {
    fn default() -> Self {
        Self {
            play_on_enable: false,
            restart_on_enable: false,
            auto_kill: false,
            recyclable: true,
            loops: 0,
            loop_type: LoopType::Restart,
            update_channel: UpdateChannel::Normal,
            ignore_time_scale: false,
            duration_multiplier: 1.0,
        }
    }
}

impl SequencerSettings {
    /// Parse and validate settings from a RON string
    pub fn from_ron(source: &str) -> Result<Self, SettingsError> {
        let settings: Self = ron::from_str(source)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read, parse and validate a settings file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)?;
        let settings = Self::from_ron(&source)?;
        tracing::debug!("Loaded sequencer settings from {}", path.display());
        Ok(settings)
    }

    /// Serialize to pretty RON
    pub fn to_ron(&self) -> Result<String, ron::Error> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
    }

    /// Reject values the controller cannot honor
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.loops < -1 {
            return Err(SettingsError::InvalidLoops(self.loops));
        }
        if !self.duration_multiplier.is_finite() {
            return Err(SettingsError::InvalidMultiplier(self.duration_multiplier));
        }
        Ok(())
    }

    /// Set the loop count and type
    pub fn with_loops(mut self, loops: i32, loop_type: LoopType) -> Self {
        self.loops = loops;
        self.loop_type = loop_type;
        self
    }

    /// Set the update channel
    pub fn with_update_channel(mut self, channel: UpdateChannel) -> Self {
        self.update_channel = channel;
        self
    }

    /// Set the initial duration multiplier
    pub fn with_duration_multiplier(mut self, multiplier: f32) -> Self {
        self.duration_multiplier = multiplier;
        self
    }

    /// Set auto-kill
    pub fn with_auto_kill(mut self, auto_kill: bool) -> Self {
        self.auto_kill = auto_kill;
        self
    }

    /// Set the enable behavior
    pub fn with_enable_behavior(mut self, play_on_enable: bool, restart_on_enable: bool) -> Self {
        self.play_on_enable = play_on_enable;
        self.restart_on_enable = restart_on_enable;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = SequencerSettings::default();
        assert!(!settings.auto_kill);
        assert!(settings.recyclable);
        assert_eq!(settings.loops, 0);
        assert_eq!(settings.duration_multiplier, 1.0);
    }

    #[test]
    fn test_partial_ron_uses_defaults() {
        let settings = SequencerSettings::from_ron("(loops: 3, loop_type: Yoyo, update_channel: Late)")
            .expect("valid settings");
        assert_eq!(settings.loops, 3);
        assert_eq!(settings.loop_type, LoopType::Yoyo);
        assert_eq!(settings.update_channel, UpdateChannel::Late);
        assert!(settings.recyclable);
        assert_eq!(settings.duration_multiplier, 1.0);
    }

    #[test]
    fn test_ron_roundtrip() {
        let settings = SequencerSettings::default()
            .with_loops(-1, LoopType::Yoyo)
            .with_duration_multiplier(0.5);
        let text = settings.to_ron().expect("serializes");
        assert_eq!(SequencerSettings::from_ron(&text).expect("parses"), settings);
    }

    #[test]
    fn test_unknown_variant_is_rejected() {
        let result = SequencerSettings::from_ron("(loop_type: Bounce)");
        assert!(matches!(result, Err(SettingsError::Parse(_))));
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(matches!(
            SequencerSettings::from_ron("(loops: -2)"),
            Err(SettingsError::InvalidLoops(-2))
        ));
        let settings = SequencerSettings::default().with_duration_multiplier(f32::NAN);
        assert!(matches!(settings.validate(), Err(SettingsError::InvalidMultiplier(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = SequencerSettings::load("/nonexistent/tweenflow/settings.ron");
        assert!(matches!(result, Err(SettingsError::Io(_))));
    }
}
