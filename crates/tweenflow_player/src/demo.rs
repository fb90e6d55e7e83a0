// SPDX-License-Identifier: MIT OR Apache-2.0
//! Demo scene: a panel that fades in, grows, shows its label and settles.

use tweenflow_engine::Ease;
use tweenflow_sequencer::{
    CallbackStep, FloatStep, IntervalStep, Property, Step, StepList, ToggleStep, TweenOptions,
    TweenValue,
};

/// Values the demo steps animate
#[derive(Debug, Clone)]
pub struct DemoScene {
    /// Panel opacity, `0..=1`
    pub opacity: Property<f32>,
    /// Panel scale
    pub scale: Property<f32>,
    /// Whether the label is shown
    pub label_visible: Property<bool>,
}

impl DemoScene {
    /// Scene in its initial state
    pub fn new() -> Self {
        Self {
            opacity: Property::new(0.0),
            scale: Property::new(0.8),
            label_visible: Property::new(false),
        }
    }

    /// Build the step list for this scene
    pub fn steps(&self) -> StepList {
        let mut steps = StepList::new();

        steps.push(
            FloatStep::new(self.opacity.clone(), TweenValue::new(0.0, 1.0))
                .with_duration(0.4)
                .with_options(TweenOptions {
                    ease: Ease::OutCubic,
                    relative: false,
                })
                .with_title("Fade in"),
        );
        steps.push(
            FloatStep::new(self.scale.clone(), TweenValue::to(0.2))
                .with_duration(0.6)
                .with_options(TweenOptions {
                    ease: Ease::OutBack,
                    relative: true,
                })
                .joined()
                .with_delay(0.1)
                .with_title("Grow"),
        );
        steps.push(ToggleStep::new(self.label_visible.clone(), true).with_title("Show label"));
        steps.push(
            CallbackStep::new()
                .on_forward(|| tracing::info!("Panel ready"))
                .on_backward(|| tracing::info!("Panel hidden again")),
        );
        steps.push(IntervalStep::new(0.5).with_title("Hold"));
        steps.push(
            FloatStep::new(self.opacity.clone(), TweenValue::to(0.85))
                .with_duration(0.3)
                .with_title("Settle"),
        );

        steps
    }

    /// Log the current values
    pub fn log_state(&self, label: &str) {
        tracing::info!(
            "{}: opacity {:.2}, scale {:.2}, label {}",
            label,
            self.opacity.get(),
            self.scale.get(),
            if self.label_visible.get() { "shown" } else { "hidden" }
        );
    }
}

impl Default for DemoScene {
    fn default() -> Self {
        Self::new()
    }
}
