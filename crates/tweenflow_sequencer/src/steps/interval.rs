// SPDX-License-Identifier: MIT OR Apache-2.0
//! Pure wait.

use crate::error::StepError;
use crate::step::{Step, StepSettings};
use tweenflow_engine::Tween;

/// Step that only takes time
#[derive(Debug, Clone, PartialEq)]
pub struct IntervalStep {
    settings: StepSettings,
    duration: f32,
}

impl IntervalStep {
    /// Wait for `duration` seconds
    pub fn new(duration: f32) -> Self {
        Self {
            settings: StepSettings::default(),
            duration,
        }
    }
}

impl Default for IntervalStep {
    fn default() -> Self {
        Self::new(0.25)
    }
}

impl Step for IntervalStep {
    fn settings(&self) -> &StepSettings {
        &self.settings
    }

    fn settings_mut(&mut self) -> &mut StepSettings {
        &mut self.settings
    }

    fn path(&self) -> &'static str {
        "Misc/Interval"
    }

    fn duration(&self) -> f32 {
        self.duration
    }

    fn create_tween(&self) -> Result<Option<Tween>, StepError> {
        Ok(Some(Tween::interval(self.duration)))
    }
}
