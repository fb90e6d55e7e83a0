// SPDX-License-Identifier: MIT OR Apache-2.0
//! Reversible callbacks.

use super::reversible_instant;
use crate::error::StepError;
use crate::step::{Step, StepSettings};
use std::fmt;
use std::rc::Rc;
use tweenflow_engine::Tween;

type Action = Rc<dyn Fn()>;

/// Step that calls one function when played forward past it and another
/// when rewound back before it
#[derive(Clone, Default)]
pub struct CallbackStep {
    settings: StepSettings,
    on_forward: Option<Action>,
    on_backward: Option<Action>,
}

impl CallbackStep {
    /// Create a step with no callbacks
    pub fn new() -> Self {
        Self::default()
    }

    /// Call `action` when played forward
    pub fn on_forward(mut self, action: impl Fn() + 'static) -> Self {
        self.on_forward = Some(Rc::new(action));
        self
    }

    /// Call `action` when rewound
    pub fn on_backward(mut self, action: impl Fn() + 'static) -> Self {
        self.on_backward = Some(Rc::new(action));
        self
    }
}

impl Step for CallbackStep {
    fn settings(&self) -> &StepSettings {
        &self.settings
    }

    fn settings_mut(&mut self) -> &mut StepSettings {
        &mut self.settings
    }

    fn path(&self) -> &'static str {
        "Misc/Callback"
    }

    fn create_tween(&self) -> Result<Option<Tween>, StepError> {
        let forward = self.on_forward.clone();
        let backward = self.on_backward.clone();
        Ok(Some(reversible_instant(
            move || {
                if let Some(action) = &forward {
                    action();
                }
            },
            move || {
                if let Some(action) = &backward {
                    action();
                }
            },
        )))
    }
}

impl fmt::Debug for CallbackStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallbackStep")
            .field("settings", &self.settings)
            .field("on_forward", &self.on_forward.is_some())
            .field("on_backward", &self.on_backward.is_some())
            .finish()
    }
}
