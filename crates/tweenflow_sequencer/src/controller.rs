// SPDX-License-Identifier: MIT OR Apache-2.0
//! Sequence controller: builds a native timeline from the step list and
//! drives it.
//!
//! The controller owns at most one [`Timeline`]. It is built lazily by the
//! operations that need it and thrown away when killed. Position, play state
//! and completion are read straight from the timeline; the controller only
//! adds the last requested direction and the duration multiplier.
//!
//! A multiplier of `2.0` doubles the wall-clock length (time scale `0.5`).
//! Multipliers `<= 0`, NaN or infinite never reach the time scale:
//! [`Sequencer::play_with`] completes at once and
//! [`Sequencer::play_backwards_with`] rewinds at once.

use crate::events::{EventChannels, SequencerEvent};
use crate::layout::{is_instant_multiplier, DurationEstimate, TimelineLayout};
use crate::placement::PlayDirection;
use crate::settings::SequencerSettings;
use crate::step_list::StepList;
use std::rc::Rc;
use tweenflow_engine::{FrameTime, Timeline, UpdateChannel};

/// Builds and controls one step sequence
#[derive(Debug)]
pub struct Sequencer {
    settings: SequencerSettings,
    steps: StepList,
    sequence: Option<Timeline>,
    duration_multiplier: f32,
    last_direction: PlayDirection,
    events: Rc<EventChannels>,
}

impl Sequencer {
    /// Create a sequencer with no steps
    pub fn new(settings: SequencerSettings) -> Self {
        Self::with_steps(settings, StepList::new())
    }

    /// Create a sequencer over `steps`
    pub fn with_steps(settings: SequencerSettings, steps: StepList) -> Self {
        Self {
            duration_multiplier: settings.duration_multiplier,
            settings,
            steps,
            sequence: None,
            last_direction: PlayDirection::Forward,
            events: Rc::new(EventChannels::new()),
        }
    }

    // --- Building ---

    /// Throw away any existing sequence and build a fresh, paused one from
    /// the current steps and settings.
    ///
    /// The old sequence is completed before it is killed.
    pub fn build(&mut self) {
        self.kill(true);
        let timeline = assemble(&self.steps, &self.settings, &self.events, self.duration_multiplier);
        self.sequence = Some(timeline);
    }

    /// Run the enable behavior: build if needed, then restart or play
    /// depending on the settings. Does nothing unless `play_on_enable` is set.
    pub fn enable(&mut self) {
        if !self.settings.play_on_enable {
            return;
        }
        if !self.has_sequence() {
            self.build();
        }
        if self.settings.restart_on_enable {
            self.restart();
        } else {
            self.play();
        }
    }

    // --- Playback ---

    /// Play forward with the configured multiplier, firing callbacks and
    /// restarting a completed sequence
    pub fn play(&mut self) {
        self.play_with(self.settings.duration_multiplier, true, true);
    }

    /// Play forward.
    ///
    /// With an instant multiplier (`<= 0`, NaN or infinite) the sequence
    /// jumps straight to its end;
    /// `with_callbacks` decides whether completion callbacks fire for that
    /// jump. A completed sequence restarts when `restart_if_complete` is set.
    pub fn play_with(&mut self, multiplier: f32, with_callbacks: bool, restart_if_complete: bool) {
        self.ensure_built();
        self.last_direction = PlayDirection::Forward;
        self.set_duration_multiplier(multiplier);
        let Some(timeline) = self.live() else {
            return;
        };

        if is_instant_multiplier(multiplier) {
            tracing::debug!("Completing sequence instantly");
            timeline.complete(with_callbacks);
            return;
        }

        if restart_if_complete && timeline.is_complete() {
            tracing::debug!("Restarting completed sequence");
            timeline.restart();
            return;
        }

        timeline.play_forward();
    }

    /// Play backward with the configured multiplier, jumping to the end
    /// first when sitting at the start
    pub fn play_backwards(&mut self) {
        self.play_backwards_with(self.settings.duration_multiplier, true);
    }

    /// Play backward.
    ///
    /// With an instant multiplier the sequence jumps straight to its start
    /// and stays paused.
    pub fn play_backwards_with(&mut self, multiplier: f32, go_to_end_if_at_start: bool) {
        self.ensure_built();
        self.last_direction = PlayDirection::Backward;
        self.set_duration_multiplier(multiplier);
        let Some(timeline) = self.live() else {
            return;
        };

        if is_instant_multiplier(multiplier) {
            tracing::debug!("Rewinding sequence instantly");
            timeline.rewind();
            return;
        }

        if go_to_end_if_at_start && approximately(timeline.elapsed(true), 0.0) {
            let end = timeline.duration(false);
            timeline.goto(end, false);
        }

        timeline.play_backwards();
    }

    /// Halt at the current position
    pub fn pause(&mut self) {
        if let Some(timeline) = self.live() {
            timeline.pause();
        }
    }

    /// Continue in the last requested direction.
    ///
    /// Does nothing when already at the end going forward or at the start
    /// going backward.
    pub fn resume(&mut self) {
        let direction = self.last_direction;
        let Some(timeline) = self.live() else {
            return;
        };
        match direction {
            PlayDirection::Forward if timeline.is_complete() => {}
            PlayDirection::Backward if approximately(timeline.elapsed(true), 0.0) => {}
            PlayDirection::Forward => timeline.play_forward(),
            PlayDirection::Backward => timeline.play_backwards(),
        }
    }

    /// Jump to the start and play forward
    pub fn restart(&mut self) {
        self.ensure_built();
        let multiplier = self.duration_multiplier;
        if let Some(timeline) = self.live() {
            apply_time_scale(timeline, multiplier);
            timeline.restart();
        }
    }

    /// Jump to time zero, rendering start values, and optionally play
    pub fn goto_start(&mut self, and_play: bool) {
        self.ensure_built().goto(0.0, and_play);
    }

    /// Jump to the end of one loop, rendering end values, and optionally play.
    ///
    /// A zero-length sequence has no position separating its start from its
    /// end, so it is completed instead.
    pub fn goto_end(&mut self, and_play: bool) {
        let timeline = self.ensure_built();
        let end = timeline.duration(false);
        if end <= 0.0 {
            timeline.complete(true);
            return;
        }
        timeline.goto(end, and_play);
    }

    /// Destroy the sequence, optionally completing it first
    pub fn kill(&mut self, complete: bool) {
        if let Some(mut timeline) = self.sequence.take() {
            if timeline.is_active() {
                timeline.kill(complete);
                tracing::debug!("Killed sequence (complete: {})", complete);
            }
        }
    }

    /// Store a new multiplier and apply it to the built sequence
    pub fn set_duration_multiplier(&mut self, multiplier: f32) {
        self.duration_multiplier = multiplier;
        if let Some(timeline) = self.live() {
            apply_time_scale(timeline, multiplier);
        }
    }

    // --- Driving ---

    /// Forward a frame to the sequence
    pub fn update(&mut self, channel: UpdateChannel, frame: FrameTime) {
        if let Some(timeline) = self.live() {
            timeline.update(channel, frame);
        }
    }

    /// Forward a frame to a manually updated sequence
    pub fn manual_update(&mut self, frame: FrameTime) {
        if let Some(timeline) = self.live() {
            timeline.manual_update(frame);
        }
    }

    // --- Queries ---

    /// Whether a live sequence exists
    pub fn has_sequence(&self) -> bool {
        self.sequence.as_ref().is_some_and(Timeline::is_active)
    }

    /// Whether the sequence is advancing. False when nothing is built.
    pub fn is_playing(&self) -> bool {
        self.active().is_some_and(Timeline::is_playing)
    }

    /// Whether the sequence sits on its final end
    pub fn is_complete(&self) -> bool {
        self.active().is_some_and(Timeline::is_complete)
    }

    /// Whether the sequence sits at time zero, loops included
    pub fn is_at_start(&self) -> bool {
        approximately(self.total_elapsed(), 0.0)
    }

    /// Elapsed time within the current loop, `0` when nothing is built
    pub fn elapsed(&self) -> f32 {
        self.active().map_or(0.0, |timeline| timeline.elapsed(false))
    }

    /// Elapsed time across all loops, `0` when nothing is built
    pub fn total_elapsed(&self) -> f32 {
        self.active().map_or(0.0, |timeline| timeline.elapsed(true))
    }

    /// Length of one loop at time scale 1, `0` when nothing is built
    pub fn duration(&self) -> f32 {
        self.active().map_or(0.0, |timeline| timeline.duration(false))
    }

    /// Direction of the last play request
    pub fn last_direction(&self) -> PlayDirection {
        self.last_direction
    }

    /// Multiplier currently applied
    pub fn duration_multiplier(&self) -> f32 {
        self.duration_multiplier
    }

    /// Layout of the current step list
    pub fn layout(&self) -> TimelineLayout {
        self.steps.layout()
    }

    /// Estimated length of the current step list with the current multiplier
    pub fn estimated_duration(&self) -> DurationEstimate {
        DurationEstimate::new(self.steps.layout().total_length, self.duration_multiplier)
    }

    // --- Accessors ---

    /// Notification channels
    pub fn events(&self) -> &EventChannels {
        &self.events
    }

    /// Settings
    pub fn settings(&self) -> &SequencerSettings {
        &self.settings
    }

    /// Mutable settings. Changes apply on the next build.
    pub fn settings_mut(&mut self) -> &mut SequencerSettings {
        &mut self.settings
    }

    /// Step list
    pub fn steps(&self) -> &StepList {
        &self.steps
    }

    /// Mutable step list. Changes apply on the next build.
    pub fn steps_mut(&mut self) -> &mut StepList {
        &mut self.steps
    }

    /// The native sequence, if one is live
    pub fn timeline(&self) -> Option<&Timeline> {
        self.active()
    }

    // --- Internals ---

    fn active(&self) -> Option<&Timeline> {
        self.sequence.as_ref().filter(|timeline| timeline.is_active())
    }

    /// The live sequence. A sequence killed from inside (auto-kill) is dropped here.
    fn live(&mut self) -> Option<&mut Timeline> {
        if self.sequence.as_ref().is_some_and(|timeline| !timeline.is_active()) {
            self.sequence = None;
        }
        self.sequence.as_mut()
    }

    fn ensure_built(&mut self) -> &mut Timeline {
        if self.sequence.as_ref().is_some_and(|timeline| !timeline.is_active()) {
            self.sequence = None;
        }
        let Self {
            sequence,
            settings,
            steps,
            events,
            duration_multiplier,
            ..
        } = self;
        sequence.get_or_insert_with(|| assemble(steps, settings, events, *duration_multiplier))
    }
}

impl Drop for Sequencer {
    fn drop(&mut self) {
        self.kill(true);
    }
}

/// Build a paused timeline from the step list
fn assemble(
    steps: &StepList,
    settings: &SequencerSettings,
    events: &Rc<EventChannels>,
    multiplier: f32,
) -> Timeline {
    let mut timeline = Timeline::new();
    timeline
        .set_auto_kill(settings.auto_kill)
        .set_recyclable(settings.recyclable)
        .set_update(settings.update_channel, settings.ignore_time_scale);

    forward_event(&mut timeline, events, SequencerEvent::Started);
    forward_event(&mut timeline, events, SequencerEvent::Paused);
    forward_event(&mut timeline, events, SequencerEvent::Completed);
    forward_event(&mut timeline, events, SequencerEvent::StepCompleted);
    forward_event(&mut timeline, events, SequencerEvent::Rewound);

    if settings.loops != 0 {
        timeline.set_loops(settings.loops, settings.loop_type);
    }

    let mut placed = 0;
    for (index, (_, step)) in steps.iter().enumerate() {
        let Some(step) = step else {
            continue;
        };
        match step.materialize(&mut timeline) {
            Ok(true) => placed += 1,
            Ok(false) => {}
            Err(err) => tracing::warn!("Skipping step {} ({}): {}", index, step.display_name(), err),
        }
    }

    apply_time_scale(&mut timeline, multiplier);
    timeline.pause();

    tracing::debug!(
        "Built sequence: {} of {} steps placed, {:.3}s per loop",
        placed,
        steps.len(),
        timeline.duration(false)
    );
    timeline
}

fn forward_event(timeline: &mut Timeline, events: &Rc<EventChannels>, event: SequencerEvent) {
    let events = Rc::clone(events);
    let emit = move || events.emit(event);
    match event {
        SequencerEvent::Started => timeline.on_play(emit),
        SequencerEvent::Paused => timeline.on_pause(emit),
        SequencerEvent::Completed => timeline.on_complete(emit),
        SequencerEvent::StepCompleted => timeline.on_step_complete(emit),
        SequencerEvent::Rewound => timeline.on_rewind(emit),
    };
}

fn apply_time_scale(timeline: &mut Timeline, multiplier: f32) {
    let time_scale = if is_instant_multiplier(multiplier) { 1.0 } else { 1.0 / multiplier };
    timeline.set_time_scale(time_scale);
}

/// Float comparison with a tolerance relative to the magnitude of the inputs
pub fn approximately(a: f32, b: f32) -> bool {
    (b - a).abs() < (1e-6 * a.abs().max(b.abs())).max(f32::EPSILON * 8.0)
}
