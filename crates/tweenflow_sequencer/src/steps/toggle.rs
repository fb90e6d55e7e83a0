// SPDX-License-Identifier: MIT OR Apache-2.0
//! Switch a shared flag.

use super::reversible_instant;
use crate::error::StepError;
use crate::step::{Step, StepSettings};
use crate::value::Property;
use tweenflow_engine::Tween;

/// Step that sets a flag when played forward and restores the opposite
/// value when rewound
#[derive(Debug, Clone)]
pub struct ToggleStep {
    settings: StepSettings,
    target: Option<Property<bool>>,
    value: bool,
}

impl ToggleStep {
    /// Set `target` to `value`
    pub fn new(target: Property<bool>, value: bool) -> Self {
        Self {
            settings: StepSettings::default(),
            target: Some(target),
            value,
        }
    }

    /// Step with no target yet
    pub fn untargeted(value: bool) -> Self {
        Self {
            settings: StepSettings::default(),
            target: None,
            value,
        }
    }

    /// Point the step at a flag
    pub fn set_target(&mut self, target: Property<bool>) {
        self.target = Some(target);
    }
}

impl Step for ToggleStep {
    fn settings(&self) -> &StepSettings {
        &self.settings
    }

    fn settings_mut(&mut self) -> &mut StepSettings {
        &mut self.settings
    }

    fn path(&self) -> &'static str {
        "Misc/Toggle"
    }

    fn create_tween(&self) -> Result<Option<Tween>, StepError> {
        let Some(target) = self.target.clone() else {
            return Err(StepError::MissingTarget {
                step: self.path(),
                target: "Property<bool>",
            });
        };
        let value = self.value;
        let restore = target.clone();
        Ok(Some(reversible_instant(
            move || target.set(value),
            move || restore.set(!value),
        )))
    }
}
