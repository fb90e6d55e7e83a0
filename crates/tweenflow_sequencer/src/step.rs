// SPDX-License-Identifier: MIT OR Apache-2.0
//! Step contract: the unit a sequence is built from.
//!
//! A step carries shared [`StepSettings`] (enabled flag, title, placement,
//! delay), reports its own duration, and knows how to produce one engine
//! [`Tween`]. The provided [`Step::materialize`] applies the shared settings
//! and places that tween on a timeline.

use crate::error::StepError;
use crate::layout::StepShape;
use crate::placement::Placement;
use std::fmt;
use tweenflow_engine::{Ease, Timeline, Tween};

/// Settings shared by every step
#[derive(Debug, Clone, PartialEq)]
pub struct StepSettings {
    /// Disabled steps are skipped when building and take no time
    pub enabled: bool,
    /// Optional display title
    pub title: String,
    /// Append or join
    pub placement: Placement,
    /// Delay before the step starts, in seconds
    pub delay: f32,
}

impl Default for StepSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            title: String::new(),
            placement: Placement::Append,
            delay: 0.0,
        }
    }
}

/// Ease and relative options for steps that drive a value
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TweenOptions {
    /// Easing curve
    pub ease: Ease,
    /// Treat the end value as an offset from the start value
    pub relative: bool,
}

impl Default for TweenOptions {
    fn default() -> Self {
        Self {
            ease: Ease::OutQuad,
            relative: false,
        }
    }
}

impl TweenOptions {
    /// Apply the options to a tween
    pub fn configure(&self, tween: Tween) -> Tween {
        tween.with_ease(self.ease).with_relative(self.relative)
    }
}

/// Clone support for boxed steps
pub trait StepClone {
    /// Deep-copy the step into a new box
    fn clone_box(&self) -> Box<dyn Step>;
}

impl<T> StepClone for T
where
    T: Step + Clone + 'static,
{
    fn clone_box(&self) -> Box<dyn Step> {
        Box::new(self.clone())
    }
}

impl Clone for Box<dyn Step> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// One entry of a sequence
pub trait Step: StepClone + fmt::Debug {
    /// Shared settings
    fn settings(&self) -> &StepSettings;

    /// Mutable shared settings
    fn settings_mut(&mut self) -> &mut StepSettings;

    /// Catalog path, e.g. `"Misc/Interval"`
    fn path(&self) -> &'static str;

    /// Duration in seconds, excluding the delay
    fn duration(&self) -> f32 {
        0.0
    }

    /// Produce the tween for this step.
    ///
    /// `Ok(None)` means the step has nothing to animate.
    fn create_tween(&self) -> Result<Option<Tween>, StepError>;

    /// Adjust the tween after the delay was applied
    fn configure(&self, tween: Tween) -> Tween {
        tween
    }

    /// Whether the step takes part in builds
    fn is_enabled(&self) -> bool {
        self.settings().enabled
    }

    /// Delay in seconds, never negative
    fn delay(&self) -> f32 {
        self.settings().delay.max(0.0)
    }

    /// Placement rule
    fn placement(&self) -> Placement {
        self.settings().placement
    }

    /// Title, else the last segment of the catalog path
    fn display_name(&self) -> &str {
        let title = self.settings().title.as_str();
        if title.is_empty() {
            self.path().rsplit('/').next().unwrap_or("Step")
        } else {
            title
        }
    }

    /// Timing data used by the layout engine
    fn shape(&self) -> StepShape {
        StepShape {
            enabled: self.is_enabled(),
            delay: self.delay(),
            duration: self.duration().max(0.0),
            placement: self.placement(),
        }
    }

    /// Place this step's tween on `timeline`.
    ///
    /// Returns whether anything was placed. Disabled steps and steps with
    /// nothing to animate place nothing.
    fn materialize(&self, timeline: &mut Timeline) -> Result<bool, StepError> {
        if !self.is_enabled() {
            return Ok(false);
        }
        let Some(tween) = self.create_tween()? else {
            return Ok(false);
        };
        let tween = self.configure(tween.with_delay(self.delay()));
        match self.placement() {
            Placement::Append => {
                timeline.append(tween);
            }
            Placement::Join => {
                timeline.join(tween);
            }
        }
        Ok(true)
    }

    /// Set the delay
    fn with_delay(mut self, delay: f32) -> Self
    where
        Self: Sized,
    {
        self.settings_mut().delay = delay;
        self
    }

    /// Set the placement
    fn with_placement(mut self, placement: Placement) -> Self
    where
        Self: Sized,
    {
        self.settings_mut().placement = placement;
        self
    }

    /// Place the step together with the previous `Append` step
    fn joined(self) -> Self
    where
        Self: Sized,
    {
        self.with_placement(Placement::Join)
    }

    /// Set the title
    fn with_title(mut self, title: impl Into<String>) -> Self
    where
        Self: Sized,
    {
        self.settings_mut().title = title.into();
        self
    }

    /// Enable or disable the step
    fn with_enabled(mut self, enabled: bool) -> Self
    where
        Self: Sized,
    {
        self.settings_mut().enabled = enabled;
        self
    }
}
