// SPDX-License-Identifier: MIT OR Apache-2.0
//! Native timeline: tweens placed by append/join rules and played as one unit.
//!
//! Placement mirrors the classic sequence model:
//! - `append` starts a tween where the timeline currently ends
//! - `join` starts a tween together with the most recently appended one
//!
//! Position is tracked as a cycle index plus the elapsed time inside that
//! cycle. Every movement re-renders the placed tweens, which fire their own
//! start/complete/rewind callbacks when the playhead crosses them.

use crate::frame::{FrameTime, LoopType, UpdateChannel};
use crate::tween::{fire, Tween};
use std::fmt;

type Callback = Box<dyn FnMut()>;

#[derive(Default)]
struct TimelineCallbacks {
    on_play: Option<Callback>,
    on_pause: Option<Callback>,
    on_complete: Option<Callback>,
    on_step_complete: Option<Callback>,
    on_rewind: Option<Callback>,
    on_kill: Option<Callback>,
}

/// A tween with its absolute start on the timeline and render state
struct PlacedTween {
    start: f32,
    tween: Tween,
    reached: bool,
    done: bool,
    last_progress: Option<f32>,
}

impl PlacedTween {
    fn new(start: f32, tween: Tween) -> Self {
        Self {
            start,
            tween,
            reached: false,
            done: false,
            last_progress: None,
        }
    }

    fn trigger(&self) -> f32 {
        self.start + self.tween.delay()
    }

    fn end(&self) -> f32 {
        self.trigger() + self.tween.duration()
    }

    /// Bring the tween in line with the playhead.
    ///
    /// A tween sitting exactly at time zero is only considered reached once
    /// the timeline has moved past zero, or when the whole timeline is
    /// parked on its completed end.
    fn render(&mut self, position: f32, at_end: bool) {
        let trigger = self.trigger();
        let duration = self.tween.duration();
        let reached = position > trigger || (position == trigger && (position > 0.0 || at_end));

        if reached && !self.reached {
            self.reached = true;
            self.tween.fire_start();
        }

        let progress = if !reached {
            0.0
        } else if duration <= 0.0 {
            1.0
        } else {
            ((position - trigger) / duration).clamp(0.0, 1.0)
        };

        if (reached || self.last_progress.is_some()) && self.last_progress != Some(progress) {
            self.last_progress = Some(progress);
            self.tween.sample(progress);
        }

        let done = reached && progress >= 1.0;
        if done && !self.done {
            self.tween.fire_complete();
        }
        self.done = done;

        if !reached && self.reached {
            self.reached = false;
            self.tween.fire_rewind();
        }
    }
}

/// A sequence of tweens played as one unit
pub struct Timeline {
    items: Vec<PlacedTween>,
    last_append_start: f32,
    duration: f32,
    elapsed: f32,
    cycle: u32,
    loops: i32,
    loop_type: LoopType,
    time_scale: f32,
    playing: bool,
    backwards: bool,
    complete: bool,
    active: bool,
    auto_kill: bool,
    recyclable: bool,
    update_channel: UpdateChannel,
    ignore_time_scale: bool,
    callbacks: TimelineCallbacks,
}

impl Timeline {
    /// Create an empty, paused timeline
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            last_append_start: 0.0,
            duration: 0.0,
            elapsed: 0.0,
            cycle: 0,
            loops: 0,
            loop_type: LoopType::Restart,
            time_scale: 1.0,
            playing: false,
            backwards: false,
            complete: false,
            active: true,
            auto_kill: false,
            recyclable: false,
            update_channel: UpdateChannel::Normal,
            ignore_time_scale: false,
            callbacks: TimelineCallbacks::default(),
        }
    }

    // --- Construction ---

    /// Place a tween at the current end of the timeline
    pub fn append(&mut self, tween: Tween) -> &mut Self {
        let start = self.duration;
        self.last_append_start = start;
        self.duration = start + tween.length();
        self.items.push(PlacedTween::new(start, tween));
        self
    }

    /// Place a tween at the start of the most recently appended tween
    pub fn join(&mut self, tween: Tween) -> &mut Self {
        let start = self.last_append_start;
        self.duration = self.duration.max(start + tween.length());
        self.items.push(PlacedTween::new(start, tween));
        self
    }

    /// Set the loop count (`0`/`1` play once, `-1` loops forever)
    pub fn set_loops(&mut self, loops: i32, loop_type: LoopType) -> &mut Self {
        self.loops = if loops < 0 { -1 } else { loops };
        self.loop_type = loop_type;
        self
    }

    /// Set the playback speed factor
    pub fn set_time_scale(&mut self, time_scale: f32) -> &mut Self {
        self.time_scale = time_scale;
        self
    }

    /// Kill the timeline as soon as it completes
    pub fn set_auto_kill(&mut self, auto_kill: bool) -> &mut Self {
        self.auto_kill = auto_kill;
        self
    }

    /// Mark the timeline as reusable by a pooling owner
    pub fn set_recyclable(&mut self, recyclable: bool) -> &mut Self {
        self.recyclable = recyclable;
        self
    }

    /// Choose the update channel and whether the global time scale applies
    pub fn set_update(&mut self, channel: UpdateChannel, ignore_time_scale: bool) -> &mut Self {
        self.update_channel = channel;
        self.ignore_time_scale = ignore_time_scale;
        self
    }

    // --- Lifecycle callbacks ---

    /// Called when the timeline goes from paused to playing
    pub fn on_play(&mut self, callback: impl FnMut() + 'static) -> &mut Self {
        self.callbacks.on_play = Some(Box::new(callback));
        self
    }

    /// Called when the timeline goes from playing to paused
    pub fn on_pause(&mut self, callback: impl FnMut() + 'static) -> &mut Self {
        self.callbacks.on_pause = Some(Box::new(callback));
        self
    }

    /// Called when the timeline reaches its end after all loops
    pub fn on_complete(&mut self, callback: impl FnMut() + 'static) -> &mut Self {
        self.callbacks.on_complete = Some(Box::new(callback));
        self
    }

    /// Called each time a loop cycle completes, including the last one
    pub fn on_step_complete(&mut self, callback: impl FnMut() + 'static) -> &mut Self {
        self.callbacks.on_step_complete = Some(Box::new(callback));
        self
    }

    /// Called when the timeline is rewound to its start
    pub fn on_rewind(&mut self, callback: impl FnMut() + 'static) -> &mut Self {
        self.callbacks.on_rewind = Some(Box::new(callback));
        self
    }

    /// Called once when the timeline is killed
    pub fn on_kill(&mut self, callback: impl FnMut() + 'static) -> &mut Self {
        self.callbacks.on_kill = Some(Box::new(callback));
        self
    }

    // --- Driving ---

    /// Advance by one frame if `channel` is the timeline's update channel.
    /// Manual timelines ignore this and only move through [`Self::manual_update`].
    pub fn update(&mut self, channel: UpdateChannel, frame: FrameTime) {
        if channel == UpdateChannel::Manual || channel != self.update_channel {
            return;
        }
        self.advance(frame);
    }

    /// Advance a manual timeline by one frame
    pub fn manual_update(&mut self, frame: FrameTime) {
        if self.update_channel == UpdateChannel::Manual {
            self.advance(frame);
        }
    }

    fn advance(&mut self, frame: FrameTime) {
        if !self.active || !self.playing {
            return;
        }
        let step = (frame.delta_for(self.ignore_time_scale) * self.time_scale).max(0.0);
        if self.backwards {
            self.step_backward(step);
        } else {
            self.step_forward(step);
        }
    }

    fn step_forward(&mut self, mut remaining: f32) {
        loop {
            let room = self.duration - self.elapsed;
            if remaining < room {
                self.elapsed += remaining;
                self.render();
                return;
            }

            remaining -= room;
            self.elapsed = self.duration;
            if self.is_last_cycle() {
                self.finish(true);
                return;
            }

            self.render();
            fire(&mut self.callbacks.on_step_complete);
            self.cycle += 1;
            self.elapsed = 0.0;
            self.render();

            // Empty cycles would spin forever on infinite loops
            if self.duration <= 0.0 {
                return;
            }
        }
    }

    fn step_backward(&mut self, mut remaining: f32) {
        if remaining > 0.0 {
            self.complete = false;
        }
        loop {
            if remaining < self.elapsed {
                self.elapsed -= remaining;
                self.render();
                return;
            }

            remaining -= self.elapsed;
            self.elapsed = 0.0;
            self.render();
            if self.cycle == 0 {
                self.stop_playing();
                fire(&mut self.callbacks.on_rewind);
                return;
            }

            self.cycle -= 1;
            self.elapsed = self.duration;
            self.render();

            if self.duration <= 0.0 {
                return;
            }
        }
    }

    // --- Playback control ---

    /// Stop advancing without moving
    pub fn pause(&mut self) {
        if self.active {
            self.stop_playing();
        }
    }

    /// Play toward the end. Does nothing once complete.
    pub fn play_forward(&mut self) {
        if !self.active {
            return;
        }
        self.backwards = false;
        if !self.complete {
            self.start_playing();
        }
    }

    /// Play toward the start. Does nothing when already at the start.
    pub fn play_backwards(&mut self) {
        if !self.active {
            return;
        }
        self.backwards = true;
        if !self.is_at_start() {
            self.start_playing();
        }
    }

    /// Jump to `to` seconds (loops included) and render immediately.
    /// Landing on the final end completes the timeline.
    pub fn goto(&mut self, to: f32, and_play: bool) {
        if !self.active {
            return;
        }
        let was_complete = self.complete;
        self.seek(to);

        if self.complete && !was_complete {
            self.finish(true);
            if !self.active {
                return;
            }
        }

        let can_play = if self.backwards {
            !self.is_at_start()
        } else {
            !self.complete
        };
        if and_play && can_play {
            self.start_playing();
        } else {
            self.stop_playing();
        }
    }

    /// Jump back to the start and play forward
    pub fn restart(&mut self) {
        if !self.active {
            return;
        }
        let moved = self.complete || !self.is_at_start();
        self.backwards = false;
        self.reset_position();
        if moved {
            fire(&mut self.callbacks.on_rewind);
        }
        self.start_playing();
    }

    /// Jump back to the start and pause
    pub fn rewind(&mut self) {
        if !self.active {
            return;
        }
        let moved = self.complete || !self.is_at_start();
        self.reset_position();
        self.stop_playing();
        if moved {
            fire(&mut self.callbacks.on_rewind);
        }
    }

    /// Jump to the final end. Infinite timelines cannot complete.
    pub fn complete(&mut self, with_callbacks: bool) {
        let Some(cycles) = self.cycles() else {
            return;
        };
        if !self.active || self.complete {
            return;
        }
        self.cycle = cycles - 1;
        self.elapsed = self.duration;
        self.finish(with_callbacks);
    }

    /// Destroy the timeline, optionally completing it first
    pub fn kill(&mut self, complete: bool) {
        if !self.active {
            return;
        }
        if complete {
            self.complete(true);
            // Auto-kill may already have run
            if !self.active {
                return;
            }
        }
        self.active = false;
        self.playing = false;
        fire(&mut self.callbacks.on_kill);
        self.callbacks = TimelineCallbacks::default();
        self.items.clear();
        tracing::trace!("Timeline killed");
    }

    // --- Queries ---

    /// Whether the timeline has not been killed
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Whether the timeline is advancing on updates
    pub fn is_playing(&self) -> bool {
        self.active && self.playing
    }

    /// Whether the timeline sits on its final end
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Whether the timeline was last told to play backwards
    pub fn is_backwards(&self) -> bool {
        self.backwards
    }

    /// Elapsed time, within the current cycle or across all cycles
    pub fn elapsed(&self, include_loops: bool) -> f32 {
        if include_loops {
            self.cycle as f32 * self.duration + self.elapsed
        } else {
            self.elapsed
        }
    }

    /// Duration of one cycle, or of all cycles (infinite for endless loops)
    pub fn duration(&self, include_loops: bool) -> f32 {
        if include_loops {
            self.full_duration().unwrap_or(f32::INFINITY)
        } else {
            self.duration
        }
    }

    /// Configured loop count
    pub fn loops(&self) -> i32 {
        self.loops
    }

    /// Configured loop type
    pub fn loop_type(&self) -> LoopType {
        self.loop_type
    }

    /// Number of cycles already finished
    pub fn completed_loops(&self) -> u32 {
        if self.complete {
            self.cycle + 1
        } else {
            self.cycle
        }
    }

    /// Current playback speed factor
    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    /// Update channel driving the timeline
    pub fn update_channel(&self) -> UpdateChannel {
        self.update_channel
    }

    /// Whether the global time scale is ignored
    pub fn ignores_time_scale(&self) -> bool {
        self.ignore_time_scale
    }

    /// Whether the timeline is killed automatically on completion
    pub fn is_auto_kill(&self) -> bool {
        self.auto_kill
    }

    /// Whether a pooling owner may reuse the timeline
    pub fn is_recyclable(&self) -> bool {
        self.recyclable
    }

    /// Number of placed tweens
    pub fn tween_count(&self) -> usize {
        self.items.len()
    }

    /// Absolute `(start, end)` of every placed tween, delay included in the span
    pub fn spans(&self) -> Vec<(f32, f32)> {
        self.items.iter().map(|item| (item.start, item.end())).collect()
    }

    // --- Internals ---

    fn cycles(&self) -> Option<u32> {
        if self.loops < 0 {
            None
        } else {
            Some(self.loops.max(1) as u32)
        }
    }

    fn full_duration(&self) -> Option<f32> {
        self.cycles().map(|cycles| cycles as f32 * self.duration)
    }

    fn is_last_cycle(&self) -> bool {
        self.cycles().is_some_and(|cycles| self.cycle + 1 >= cycles)
    }

    fn is_at_start(&self) -> bool {
        self.cycle == 0 && self.elapsed <= 0.0
    }

    fn start_playing(&mut self) {
        if !self.playing {
            self.playing = true;
            fire(&mut self.callbacks.on_play);
        }
    }

    fn stop_playing(&mut self) {
        if self.playing {
            self.playing = false;
            fire(&mut self.callbacks.on_pause);
        }
    }

    fn reset_position(&mut self) {
        self.complete = false;
        self.cycle = 0;
        self.elapsed = 0.0;
        self.render();
    }

    fn seek(&mut self, to: f32) {
        let full = self.full_duration();
        let to = match full {
            Some(full) => to.clamp(0.0, full),
            None => to.max(0.0),
        };

        if self.duration <= 0.0 {
            self.cycle = 0;
            self.elapsed = 0.0;
            self.complete = false;
        } else {
            let mut cycle = (to / self.duration).floor() as u32;
            let mut elapsed = to - cycle as f32 * self.duration;
            // A cycle boundary belongs to the end of the earlier cycle
            if cycle > 0 && elapsed <= 0.0 {
                cycle -= 1;
                elapsed = self.duration;
            }
            if let Some(cycles) = self.cycles() {
                if cycle >= cycles {
                    cycle = cycles - 1;
                    elapsed = self.duration;
                }
            }
            self.cycle = cycle;
            self.elapsed = elapsed;
            self.complete = full.is_some_and(|full| to >= full);
        }
        self.render();
    }

    fn finish(&mut self, with_callbacks: bool) {
        self.complete = true;
        self.render();
        let was_playing = std::mem::replace(&mut self.playing, false);

        if with_callbacks {
            fire(&mut self.callbacks.on_step_complete);
            fire(&mut self.callbacks.on_complete);
            if was_playing && !self.auto_kill {
                fire(&mut self.callbacks.on_pause);
            }
        }

        if self.auto_kill {
            self.kill(false);
        }
    }

    fn render(&mut self) {
        let position = if self.loop_type == LoopType::Yoyo && self.cycle % 2 == 1 {
            self.duration - self.elapsed
        } else {
            self.elapsed
        };
        let at_end = self.complete && position >= self.duration;
        for item in &mut self.items {
            item.render(position, at_end);
        }
    }
}

impl Default for Timeline {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Timeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Timeline")
            .field("tweens", &self.items.len())
            .field("duration", &self.duration)
            .field("elapsed", &self.elapsed)
            .field("cycle", &self.cycle)
            .field("loops", &self.loops)
            .field("playing", &self.playing)
            .field("backwards", &self.backwards)
            .field("complete", &self.complete)
            .field("active", &self.active)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ease::Ease;
    use std::cell::Cell;
    use std::rc::Rc;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    fn frame(delta: f32) -> FrameTime {
        FrameTime::new(delta)
    }

    fn counter() -> (Rc<Cell<u32>>, impl FnMut() + 'static) {
        let count = Rc::new(Cell::new(0));
        let sink = count.clone();
        (count, move || sink.set(sink.get() + 1))
    }

    fn linear_tween(duration: f32, value: &Rc<Cell<f32>>) -> Tween {
        let sink = value.clone();
        Tween::new(duration, move |s| sink.set(s.progress)).with_ease(Ease::Linear)
    }

    #[test]
    fn test_append_and_join_placement() {
        let mut timeline = Timeline::new();
        timeline
            .append(Tween::interval(1.0))
            .join(Tween::interval(2.0))
            .append(Tween::interval(1.0).with_delay(1.0));

        assert_eq!(timeline.spans(), vec![(0.0, 1.0), (0.0, 2.0), (2.0, 4.0)]);
        assert!(approx(timeline.duration(false), 4.0));
    }

    #[test]
    fn test_join_anchors_to_last_append() {
        let mut timeline = Timeline::new();
        timeline
            .append(Tween::interval(1.0))
            .append(Tween::interval(1.0))
            .join(Tween::interval(3.0))
            .join(Tween::interval(0.5));

        let spans = timeline.spans();
        assert_eq!(spans[2].0, 1.0);
        assert_eq!(spans[3].0, 1.0);
        assert!(approx(timeline.duration(false), 4.0));
    }

    #[test]
    fn test_play_to_completion() {
        let value = Rc::new(Cell::new(0.0));
        let (plays, on_play) = counter();
        let (pauses, on_pause) = counter();
        let (completes, on_complete) = counter();
        let (steps, on_step) = counter();

        let mut timeline = Timeline::new();
        timeline
            .append(linear_tween(1.0, &value))
            .on_play(on_play)
            .on_pause(on_pause)
            .on_complete(on_complete)
            .on_step_complete(on_step);

        timeline.play_forward();
        assert!(timeline.is_playing());
        timeline.update(UpdateChannel::Normal, frame(0.25));
        assert!(approx(value.get(), 0.25));
        assert!(!timeline.is_complete());

        timeline.update(UpdateChannel::Normal, frame(1.0));
        assert!(timeline.is_complete());
        assert!(!timeline.is_playing());
        assert!(approx(value.get(), 1.0));
        assert_eq!(plays.get(), 1);
        assert_eq!(pauses.get(), 1);
        assert_eq!(completes.get(), 1);
        assert_eq!(steps.get(), 1);

        // Nothing left to play
        timeline.play_forward();
        assert!(!timeline.is_playing());
    }

    #[test]
    fn test_complete_fires_once() {
        let (completes, on_complete) = counter();
        let mut timeline = Timeline::new();
        timeline.append(Tween::interval(2.0)).on_complete(on_complete);

        timeline.complete(true);
        timeline.complete(true);
        assert!(timeline.is_complete());
        assert_eq!(completes.get(), 1);
        assert!(approx(timeline.elapsed(true), 2.0));
    }

    #[test]
    fn test_complete_without_callbacks() {
        let (completes, on_complete) = counter();
        let value = Rc::new(Cell::new(0.0));
        let mut timeline = Timeline::new();
        timeline.append(linear_tween(1.0, &value)).on_complete(on_complete);

        timeline.complete(false);
        assert!(timeline.is_complete());
        assert_eq!(completes.get(), 0);
        // Tween side effects still land on the end state
        assert!(approx(value.get(), 1.0));
    }

    #[test]
    fn test_update_channels() {
        let mut timeline = Timeline::new();
        timeline.append(Tween::interval(1.0)).set_update(UpdateChannel::Late, false);
        timeline.play_forward();

        timeline.update(UpdateChannel::Normal, frame(0.5));
        assert_eq!(timeline.elapsed(false), 0.0);
        timeline.update(UpdateChannel::Late, frame(0.5));
        assert!(approx(timeline.elapsed(false), 0.5));

        timeline.set_update(UpdateChannel::Manual, false);
        timeline.update(UpdateChannel::Manual, frame(0.25));
        assert!(approx(timeline.elapsed(false), 0.5));
        timeline.manual_update(frame(0.25));
        assert!(approx(timeline.elapsed(false), 0.75));
    }

    #[test]
    fn test_time_scale_and_global_scale() {
        let mut timeline = Timeline::new();
        timeline.append(Tween::interval(4.0)).set_time_scale(0.5);
        timeline.play_forward();

        timeline.update(UpdateChannel::Normal, FrameTime::scaled(1.0, 0.5));
        assert!(approx(timeline.elapsed(false), 0.25));

        timeline.set_update(UpdateChannel::Normal, true);
        timeline.update(UpdateChannel::Normal, FrameTime::scaled(1.0, 0.5));
        assert!(approx(timeline.elapsed(false), 0.75));
    }

    #[test]
    fn test_play_backwards_to_start() {
        let value = Rc::new(Cell::new(0.0));
        let (rewinds, on_rewind) = counter();
        let mut timeline = Timeline::new();
        timeline.append(linear_tween(1.0, &value)).on_rewind(on_rewind);

        timeline.goto(1.0, false);
        assert!(timeline.is_complete());
        assert!(approx(value.get(), 1.0));

        timeline.play_backwards();
        assert!(timeline.is_playing());
        timeline.update(UpdateChannel::Normal, frame(0.4));
        assert!(!timeline.is_complete());
        assert!(approx(value.get(), 0.6));

        timeline.update(UpdateChannel::Normal, frame(1.0));
        assert!(!timeline.is_playing());
        assert_eq!(timeline.elapsed(true), 0.0);
        assert!(approx(value.get(), 0.0));
        assert_eq!(rewinds.get(), 1);

        // Already at the start
        timeline.play_backwards();
        assert!(!timeline.is_playing());
    }

    #[test]
    fn test_restart_loops() {
        let (steps, on_step) = counter();
        let (completes, on_complete) = counter();
        let mut timeline = Timeline::new();
        timeline
            .append(Tween::interval(1.0))
            .set_loops(2, LoopType::Restart)
            .on_step_complete(on_step)
            .on_complete(on_complete);

        assert!(approx(timeline.duration(true), 2.0));
        timeline.play_forward();
        timeline.update(UpdateChannel::Normal, frame(1.5));
        assert_eq!(timeline.completed_loops(), 1);
        assert!(approx(timeline.elapsed(false), 0.5));
        assert!(approx(timeline.elapsed(true), 1.5));
        assert_eq!(steps.get(), 1);
        assert!(!timeline.is_complete());

        timeline.update(UpdateChannel::Normal, frame(1.0));
        assert!(timeline.is_complete());
        assert_eq!(steps.get(), 2);
        assert_eq!(completes.get(), 1);
    }

    #[test]
    fn test_yoyo_plays_second_cycle_in_reverse() {
        let value = Rc::new(Cell::new(0.0));
        let mut timeline = Timeline::new();
        timeline
            .append(linear_tween(1.0, &value))
            .set_loops(2, LoopType::Yoyo);

        timeline.play_forward();
        timeline.update(UpdateChannel::Normal, frame(1.25));
        assert!(approx(value.get(), 0.75));
        timeline.update(UpdateChannel::Normal, frame(1.0));
        assert!(timeline.is_complete());
        assert!(approx(value.get(), 0.0));
    }

    #[test]
    fn test_instant_tween_fires_forward_and_back() {
        let (starts, on_start) = counter();
        let (rewinds, on_rewind) = counter();
        let mut timeline = Timeline::new();
        timeline
            .append(Tween::interval(1.0))
            .append(Tween::instant().on_start(on_start).on_rewind(on_rewind))
            .append(Tween::interval(1.0));

        timeline.play_forward();
        timeline.update(UpdateChannel::Normal, frame(0.5));
        assert_eq!(starts.get(), 0);
        timeline.update(UpdateChannel::Normal, frame(1.0));
        assert_eq!(starts.get(), 1);

        timeline.play_backwards();
        timeline.update(UpdateChannel::Normal, frame(1.0));
        assert_eq!(rewinds.get(), 1);
        assert_eq!(starts.get(), 1);
    }

    #[test]
    fn test_instant_at_time_zero_waits_for_movement() {
        let (starts, on_start) = counter();
        let mut timeline = Timeline::new();
        timeline
            .append(Tween::instant().on_start(on_start))
            .append(Tween::interval(1.0));

        timeline.goto(0.0, false);
        assert_eq!(starts.get(), 0);
        timeline.play_forward();
        timeline.update(UpdateChannel::Normal, frame(0.1));
        assert_eq!(starts.get(), 1);
    }

    #[test]
    fn test_zero_length_timeline_completes_on_first_update() {
        let (starts, on_start) = counter();
        let (completes, on_complete) = counter();
        let mut timeline = Timeline::new();
        timeline
            .append(Tween::instant().on_start(on_start))
            .on_complete(on_complete);

        timeline.play_forward();
        timeline.update(UpdateChannel::Normal, frame(0.016));
        assert!(timeline.is_complete());
        assert_eq!(starts.get(), 1);
        assert_eq!(completes.get(), 1);
    }

    #[test]
    fn test_goto_and_rewind() {
        let (completes, on_complete) = counter();
        let (rewinds, on_rewind) = counter();
        let mut timeline = Timeline::new();
        timeline
            .append(Tween::interval(2.0))
            .on_complete(on_complete)
            .on_rewind(on_rewind);

        timeline.goto(1.0, true);
        assert!(timeline.is_playing());
        assert!(approx(timeline.elapsed(false), 1.0));

        timeline.goto(5.0, false);
        assert!(timeline.is_complete());
        assert!(!timeline.is_playing());
        assert_eq!(completes.get(), 1);

        timeline.rewind();
        assert!(!timeline.is_complete());
        assert_eq!(timeline.elapsed(true), 0.0);
        assert_eq!(rewinds.get(), 1);

        // Nothing to rewind
        timeline.rewind();
        assert_eq!(rewinds.get(), 1);
    }

    #[test]
    fn test_goto_cycle_boundary_shows_end_of_cycle() {
        let value = Rc::new(Cell::new(0.0));
        let mut timeline = Timeline::new();
        timeline
            .append(linear_tween(1.0, &value))
            .set_loops(3, LoopType::Restart);

        timeline.goto(1.0, false);
        assert!(!timeline.is_complete());
        assert!(approx(value.get(), 1.0));
        assert_eq!(timeline.completed_loops(), 0);
    }

    #[test]
    fn test_restart_replays_from_zero() {
        let value = Rc::new(Cell::new(0.0));
        let mut timeline = Timeline::new();
        timeline.append(linear_tween(1.0, &value));

        let (rewinds, on_rewind) = counter();
        timeline.on_rewind(on_rewind);

        timeline.restart();
        assert_eq!(rewinds.get(), 0);
        timeline.complete(true);
        timeline.restart();
        assert_eq!(rewinds.get(), 1);
        assert!(timeline.is_playing());
        assert!(!timeline.is_complete());
        assert!(approx(value.get(), 0.0));
        timeline.update(UpdateChannel::Normal, frame(0.5));
        assert!(approx(value.get(), 0.5));
    }

    #[test]
    fn test_kill_and_auto_kill() {
        let (kills, on_kill) = counter();
        let (completes, on_complete) = counter();
        let mut timeline = Timeline::new();
        timeline
            .append(Tween::interval(1.0))
            .on_kill(on_kill)
            .on_complete(on_complete);

        timeline.play_forward();
        timeline.kill(false);
        assert!(!timeline.is_active());
        assert!(!timeline.is_playing());
        assert_eq!(kills.get(), 1);
        assert_eq!(completes.get(), 0);
        assert_eq!(timeline.tween_count(), 0);

        timeline.kill(true);
        timeline.play_forward();
        assert_eq!(kills.get(), 1);
        assert!(!timeline.is_playing());

        let (auto_kills, on_auto_kill) = counter();
        let mut timeline = Timeline::new();
        timeline
            .append(Tween::interval(0.5))
            .set_auto_kill(true)
            .on_kill(on_auto_kill);
        timeline.play_forward();
        timeline.update(UpdateChannel::Normal, frame(1.0));
        assert!(!timeline.is_active());
        assert_eq!(auto_kills.get(), 1);
    }

    #[test]
    fn test_kill_with_complete() {
        let value = Rc::new(Cell::new(0.0));
        let (completes, on_complete) = counter();
        let mut timeline = Timeline::new();
        timeline.append(linear_tween(1.0, &value)).on_complete(on_complete);

        timeline.kill(true);
        assert!(approx(value.get(), 1.0));
        assert_eq!(completes.get(), 1);
        assert!(!timeline.is_active());
    }

    #[test]
    fn test_infinite_loops_never_complete() {
        let mut timeline = Timeline::new();
        timeline
            .append(Tween::interval(1.0))
            .set_loops(-1, LoopType::Restart);

        assert!(timeline.duration(true).is_infinite());
        timeline.complete(true);
        assert!(!timeline.is_complete());

        timeline.play_forward();
        timeline.update(UpdateChannel::Normal, frame(10.5));
        assert!(timeline.is_playing());
        assert_eq!(timeline.completed_loops(), 10);
    }
}
