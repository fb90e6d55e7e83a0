// SPDX-License-Identifier: MIT OR Apache-2.0
//! Tween primitive placed on a timeline.

use crate::ease::Ease;
use std::fmt;

type Callback = Box<dyn FnMut()>;
type ApplyFn = Box<dyn FnMut(TweenSample)>;

/// Value handed to a tween's apply function each time its progress changes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TweenSample {
    /// Eased progress, `0.0` at the start and `1.0` at the end
    pub progress: f32,
    /// Whether the end value should be read as an offset from the start value
    pub relative: bool,
}

/// A single animation primitive: an optional delay followed by a duration
/// during which `apply` is fed eased progress.
pub struct Tween {
    delay: f32,
    duration: f32,
    ease: Ease,
    relative: bool,
    apply: Option<ApplyFn>,
    on_start: Option<Callback>,
    on_complete: Option<Callback>,
    on_rewind: Option<Callback>,
}

impl Tween {
    /// Create a tween that drives `apply` over `duration` seconds
    pub fn new(duration: f32, apply: impl FnMut(TweenSample) + 'static) -> Self {
        Self {
            apply: Some(Box::new(apply)),
            ..Self::interval(duration)
        }
    }

    /// Create a tween that only occupies time
    pub fn interval(duration: f32) -> Self {
        Self {
            delay: 0.0,
            duration: duration.max(0.0),
            ease: Ease::default(),
            relative: false,
            apply: None,
            on_start: None,
            on_complete: None,
            on_rewind: None,
        }
    }

    /// Create a zero-length tween, used for callbacks and markers
    pub fn instant() -> Self {
        Self::interval(0.0)
    }

    /// Set the delay before the tween starts
    pub fn with_delay(mut self, delay: f32) -> Self {
        self.delay = delay.max(0.0);
        self
    }

    /// Set the easing curve
    pub fn with_ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    /// Mark the end value as relative to the start value
    pub fn with_relative(mut self, relative: bool) -> Self {
        self.relative = relative;
        self
    }

    /// Called when the timeline first passes the end of the delay
    pub fn on_start(mut self, callback: impl FnMut() + 'static) -> Self {
        self.on_start = Some(Box::new(callback));
        self
    }

    /// Called when the timeline passes the end of the tween
    pub fn on_complete(mut self, callback: impl FnMut() + 'static) -> Self {
        self.on_complete = Some(Box::new(callback));
        self
    }

    /// Called when the timeline moves back before the tween started
    pub fn on_rewind(mut self, callback: impl FnMut() + 'static) -> Self {
        self.on_rewind = Some(Box::new(callback));
        self
    }

    /// Delay in seconds
    pub fn delay(&self) -> f32 {
        self.delay
    }

    /// Duration in seconds, excluding the delay
    pub fn duration(&self) -> f32 {
        self.duration
    }

    /// Time the tween occupies on a timeline
    pub fn length(&self) -> f32 {
        self.delay + self.duration
    }

    /// Easing curve
    pub fn ease(&self) -> Ease {
        self.ease
    }

    /// Whether the tween is relative
    pub fn is_relative(&self) -> bool {
        self.relative
    }

    pub(crate) fn sample(&mut self, linear_progress: f32) {
        let sample = TweenSample {
            progress: self.ease.evaluate(linear_progress),
            relative: self.relative,
        };
        if let Some(apply) = self.apply.as_mut() {
            apply(sample);
        }
    }

    pub(crate) fn fire_start(&mut self) {
        fire(&mut self.on_start);
    }

    pub(crate) fn fire_complete(&mut self) {
        fire(&mut self.on_complete);
    }

    pub(crate) fn fire_rewind(&mut self) {
        fire(&mut self.on_rewind);
    }
}

impl fmt::Debug for Tween {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tween")
            .field("delay", &self.delay)
            .field("duration", &self.duration)
            .field("ease", &self.ease)
            .field("relative", &self.relative)
            .finish_non_exhaustive()
    }
}

pub(crate) fn fire(callback: &mut Option<Callback>) {
    if let Some(callback) = callback.as_mut() {
        callback();
    }
}
