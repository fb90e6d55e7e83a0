// SPDX-License-Identifier: MIT OR Apache-2.0
//! Tween a shared float.

use crate::error::StepError;
use crate::step::{Step, StepSettings, TweenOptions};
use crate::value::{Property, TweenValue};
use std::cell::Cell;
use std::rc::Rc;
use tweenflow_engine::Tween;

/// Step that drives a [`Property<f32>`] toward a value
#[derive(Debug, Clone)]
pub struct FloatStep {
    settings: StepSettings,
    options: TweenOptions,
    target: Option<Property<f32>>,
    duration: f32,
    values: TweenValue<f32>,
}

impl FloatStep {
    /// Tween `target` with `values` over the default half second
    pub fn new(target: Property<f32>, values: TweenValue<f32>) -> Self {
        Self {
            target: Some(target),
            values,
            ..Self::untargeted()
        }
    }

    /// Step with no target yet
    pub fn untargeted() -> Self {
        Self {
            settings: StepSettings::default(),
            options: TweenOptions::default(),
            target: None,
            duration: 0.5,
            values: TweenValue::to(0.0),
        }
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: f32) -> Self {
        self.duration = duration;
        self
    }

    /// Set ease and relative options
    pub fn with_options(mut self, options: TweenOptions) -> Self {
        self.options = options;
        self
    }

    /// Point the step at a value
    pub fn set_target(&mut self, target: Property<f32>) {
        self.target = Some(target);
    }

    /// Start and end values
    pub fn values(&self) -> TweenValue<f32> {
        self.values
    }
}

impl Step for FloatStep {
    fn settings(&self) -> &StepSettings {
        &self.settings
    }

    fn settings_mut(&mut self) -> &mut StepSettings {
        &mut self.settings
    }

    fn path(&self) -> &'static str {
        "Property/Float"
    }

    fn duration(&self) -> f32 {
        self.duration
    }

    fn create_tween(&self) -> Result<Option<Tween>, StepError> {
        let Some(target) = self.target.clone() else {
            return Err(StepError::MissingTarget {
                step: self.path(),
                target: "Property<f32>",
            });
        };

        let values = self.values;
        // Captured the first time the tween renders, then reused on replays
        let start = Rc::new(Cell::new(None::<f32>));
        let tween = Tween::new(self.duration, move |sample| {
            let from = match start.get() {
                Some(from) => from,
                None => {
                    let from = if values.use_from { values.from } else { target.get() };
                    start.set(Some(from));
                    from
                }
            };
            let to = if sample.relative { from + values.to } else { values.to };
            target.set(from + (to - from) * sample.progress);
        });
        Ok(Some(tween))
    }

    fn configure(&self, tween: Tween) -> Tween {
        self.options.configure(tween)
    }
}
