// SPDX-License-Identifier: MIT OR Apache-2.0
//! Timeline layout: absolute offsets of every step and the total length.
//!
//! The layout walks the step list once with two cursors:
//! - `cursor`, the end of everything placed so far
//! - `last_append_start`, where the most recent `Append` step started
//!
//! `Append` steps start at `cursor`, `Join` steps start at
//! `last_append_start`. Several joins in a row all anchor to the same
//! `Append` step; they run in parallel rather than chaining.
//!
//! Everything here is pure. Recompute after any change to the step list.

use crate::placement::Placement;

/// Timing-relevant view of one step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepShape {
    /// Disabled steps take no time
    pub enabled: bool,
    /// Delay in seconds
    pub delay: f32,
    /// Duration in seconds
    pub duration: f32,
    /// Placement rule
    pub placement: Placement,
}

impl StepShape {
    /// Create an enabled shape
    pub fn new(delay: f32, duration: f32, placement: Placement) -> Self {
        Self {
            enabled: true,
            delay,
            duration,
            placement,
        }
    }

    /// Occupied time, `max(0, delay) + max(0, duration)`
    pub fn length(&self) -> f32 {
        self.delay.max(0.0) + self.duration.max(0.0)
    }
}

/// Absolute timing of one step
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StepTiming {
    /// Where the delay starts counting
    pub scheduled_start: f32,
    /// Where the delay ends and the duration starts
    pub delay_end: f32,
    /// Where the step ends
    pub end: f32,
}

/// Progress of one step at a point in time, each part in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StepProgress {
    /// How much of the delay has passed
    pub delay: f32,
    /// How much of the duration has passed
    pub duration: f32,
}

impl StepTiming {
    /// Total span of the step
    pub fn length(&self) -> f32 {
        (self.end - self.scheduled_start).max(0.0)
    }

    /// Whether the step takes no time at all
    pub fn is_instant(&self) -> bool {
        self.length() <= 0.0
    }

    /// Progress at `time` seconds into the sequence.
    ///
    /// Instant steps are fully complete as soon as their start is reached.
    pub fn progress(&self, time: f32) -> StepProgress {
        let reached = |at: f32| if time >= at { 1.0 } else { 0.0 };

        if self.is_instant() {
            let fill = reached(self.scheduled_start);
            return StepProgress {
                delay: fill,
                duration: fill,
            };
        }

        let delay_length = (self.delay_end - self.scheduled_start).max(0.0);
        let duration_length = (self.end - self.delay_end).max(0.0);

        let delay = if delay_length > 0.0 {
            ((time - self.scheduled_start) / delay_length).clamp(0.0, 1.0)
        } else {
            reached(self.scheduled_start)
        };
        let duration = if duration_length > 0.0 {
            ((time - self.delay_end) / duration_length).clamp(0.0, 1.0)
        } else {
            reached(self.delay_end)
        };

        StepProgress { delay, duration }
    }
}

/// Offsets of every step plus the total length
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TimelineLayout {
    /// One entry per list slot, in list order
    pub timings: Vec<StepTiming>,
    /// Length of the whole sequence, never negative
    pub total_length: f32,
}

/// Lay out a list of step slots. `None` is an empty slot.
///
/// Disabled and empty slots still get a zero-span timing at the position
/// they would have started, but never move either cursor.
pub fn compute_layout<I>(shapes: I) -> TimelineLayout
where
    I: IntoIterator<Item = Option<StepShape>>,
{
    let mut cursor = 0.0_f32;
    let mut last_append_start = 0.0_f32;
    let mut timings = Vec::new();

    for shape in shapes {
        let Some(shape) = shape.filter(|shape| shape.enabled) else {
            let scheduled_start = match shape.map(|shape| shape.placement) {
                Some(Placement::Join) => last_append_start,
                _ => cursor,
            };
            timings.push(StepTiming {
                scheduled_start,
                delay_end: scheduled_start,
                end: scheduled_start,
            });
            continue;
        };

        let delay = shape.delay.max(0.0);
        let duration = shape.duration.max(0.0);
        let length = delay + duration;

        let scheduled_start = match shape.placement {
            Placement::Join => {
                let start = last_append_start;
                cursor = cursor.max(start + length);
                start
            }
            Placement::Append => {
                let start = cursor;
                last_append_start = start;
                cursor = start + length;
                start
            }
        };

        let delay_end = scheduled_start + delay;
        timings.push(StepTiming {
            scheduled_start,
            delay_end,
            end: delay_end + duration,
        });
    }

    TimelineLayout {
        timings,
        total_length: cursor.max(0.0),
    }
}

/// Total length of a list of step slots
pub fn estimate_total_length<I>(shapes: I) -> f32
where
    I: IntoIterator<Item = Option<StepShape>>,
{
    compute_layout(shapes).total_length
}

/// Whether `multiplier` resolves playback instantly: `<= 0`, NaN or infinite
pub fn is_instant_multiplier(multiplier: f32) -> bool {
    !(multiplier > 0.0 && multiplier.is_finite())
}

/// Displayed duration once the multiplier is applied. Instant multipliers
/// (see [`is_instant_multiplier`]) give zero.
pub fn effective_duration(base: f32, multiplier: f32) -> f32 {
    if is_instant_multiplier(multiplier) {
        0.0
    } else {
        base * multiplier
    }
}

/// Summary of a sequence's estimated duration
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DurationEstimate {
    /// Length at multiplier 1
    pub base: f32,
    /// Configured multiplier, zero when instant
    pub multiplier: f32,
    /// Length after the multiplier
    pub effective: f32,
}

impl DurationEstimate {
    /// Build an estimate from a base length and a configured multiplier
    pub fn new(base: f32, multiplier: f32) -> Self {
        Self {
            base,
            multiplier: if is_instant_multiplier(multiplier) { 0.0 } else { multiplier },
            effective: effective_duration(base, multiplier),
        }
    }
}
