// SPDX-License-Identifier: MIT OR Apache-2.0
//! Suspension helpers: wait until a sequence completes or is rewound.
//!
//! Both helpers poll the sequencer once per frame tick and never hold a
//! borrow across a suspension point, so other code may play, pause or kill
//! the sequence while they wait. They return as soon as the sequence stops
//! being live.
//!
//! Completion is latched from the Completed channel, so a sequence that
//! auto-kills as it finishes still counts as reached.
//!
//! Waiting for completion on an infinitely looping sequence only ends when
//! the sequence is killed or the clock stops.

use crate::controller::Sequencer;
use crate::events::{ListenerId, SequencerEvent};
use crate::layout::is_instant_multiplier;
use crate::schedule::FrameSignal;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Sequencer shared between an update loop and waiting tasks
pub type SharedSequencer = Rc<RefCell<Sequencer>>;

/// Options for the wait helpers
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaitOptions {
    /// Build the sequence if it does not exist
    pub auto_build: bool,
    /// Start playback before waiting
    pub auto_play: bool,
    /// Multiplier for the playback; `None` uses the configured one
    pub multiplier: Option<f32>,
    /// Fire callbacks when completing instantly
    pub with_callbacks: bool,
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            auto_build: true,
            auto_play: true,
            multiplier: None,
            with_callbacks: true,
        }
    }
}

impl WaitOptions {
    /// Override the multiplier
    pub fn with_multiplier(mut self, multiplier: f32) -> Self {
        self.multiplier = Some(multiplier);
        self
    }

    /// Wait without starting playback
    pub fn without_play(mut self) -> Self {
        self.auto_play = false;
        self
    }

    /// Do not build a missing sequence
    pub fn without_build(mut self) -> Self {
        self.auto_build = false;
        self
    }
}

/// Why a wait ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WaitOutcome {
    /// The awaited state was reached
    Reached,
    /// The multiplier was instant (`<= 0` or not finite), so the state was
    /// reached without waiting
    Instant,
    /// No sequence existed and building was not allowed
    NotBuilt,
    /// The sequence was killed while waiting
    Inactive,
    /// The frame clock went away while waiting
    ClockStopped,
}

/// Optionally build and play `sequencer` forward, then wait until it completes
pub async fn wait_for_complete(
    sequencer: SharedSequencer,
    mut signal: FrameSignal,
    options: WaitOptions,
) -> WaitOutcome {
    let (multiplier, latch) = {
        let mut seq = sequencer.borrow_mut();
        if !prepare(&mut seq, &options) {
            return WaitOutcome::NotBuilt;
        }
        let latch = CompletionLatch::subscribe(&sequencer, &seq);
        let multiplier = options
            .multiplier
            .unwrap_or(seq.settings().duration_multiplier);
        if options.auto_play {
            seq.play_with(multiplier, options.with_callbacks, true);
        }
        (multiplier, latch)
    };

    if is_instant_multiplier(multiplier) {
        return WaitOutcome::Instant;
    }

    wait_until(&sequencer, &mut signal, |seq| latch.is_set() || seq.is_complete()).await
}

/// Optionally build and play `sequencer` backward, then wait until it is
/// stopped at the start
pub async fn wait_for_rewind(
    sequencer: SharedSequencer,
    mut signal: FrameSignal,
    options: WaitOptions,
) -> WaitOutcome {
    let multiplier = {
        let mut seq = sequencer.borrow_mut();
        if !prepare(&mut seq, &options) {
            return WaitOutcome::NotBuilt;
        }
        let multiplier = options
            .multiplier
            .unwrap_or(seq.settings().duration_multiplier);
        if options.auto_play {
            seq.play_backwards_with(multiplier, true);
        }
        multiplier
    };

    if is_instant_multiplier(multiplier) {
        return WaitOutcome::Instant;
    }

    wait_until(&sequencer, &mut signal, |seq| {
        seq.has_sequence() && !seq.is_playing() && seq.is_at_start()
    })
    .await
}

fn prepare(seq: &mut Sequencer, options: &WaitOptions) -> bool {
    if seq.has_sequence() {
        return true;
    }
    if !options.auto_build {
        return false;
    }
    seq.build();
    true
}

/// Listens for Completed while a wait is pending
struct CompletionLatch {
    sequencer: SharedSequencer,
    listener: ListenerId,
    completed: Rc<Cell<bool>>,
}

impl CompletionLatch {
    fn subscribe(sequencer: &SharedSequencer, seq: &Sequencer) -> Self {
        let completed = Rc::new(Cell::new(false));
        let sink = Rc::clone(&completed);
        let listener = seq
            .events()
            .subscribe(SequencerEvent::Completed, move || sink.set(true));
        Self {
            sequencer: Rc::clone(sequencer),
            listener,
            completed,
        }
    }

    fn is_set(&self) -> bool {
        self.completed.get()
    }
}

impl Drop for CompletionLatch {
    fn drop(&mut self) {
        match self.sequencer.try_borrow() {
            Ok(seq) => {
                seq.events().unsubscribe(self.listener);
            }
            Err(_) => tracing::warn!("Sequencer busy, completion listener left registered"),
        }
    }
}

/// Poll `reached` once per frame. The condition is checked before liveness
/// so a sequence that reached it and was then killed still counts.
async fn wait_until(
    sequencer: &SharedSequencer,
    signal: &mut FrameSignal,
    reached: impl Fn(&Sequencer) -> bool,
) -> WaitOutcome {
    loop {
        {
            let seq = sequencer.borrow();
            if reached(&seq) {
                return WaitOutcome::Reached;
            }
            if !seq.has_sequence() {
                tracing::debug!("Stopped waiting: sequence is no longer live");
                return WaitOutcome::Inactive;
            }
        }
        if signal.next_frame().await.is_none() {
            return WaitOutcome::ClockStopped;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::{FrameClock, FrameScheduler};
    use crate::settings::SequencerSettings;
    use crate::step_list::StepList;
    use crate::steps::IntervalStep;
    use futures::FutureExt;
    use std::cell::Cell;
    use tweenflow_engine::{FrameTime, UpdateChannel};

    fn shared(durations: &[f32]) -> SharedSequencer {
        let mut steps = StepList::new();
        for duration in durations {
            steps.push(IntervalStep::new(*duration));
        }
        Rc::new(RefCell::new(Sequencer::with_steps(
            SequencerSettings::default(),
            steps,
        )))
    }

    type Slot = Rc<Cell<Option<WaitOutcome>>>;

    fn spawn_wait<F>(scheduler: &mut FrameScheduler, wait: F) -> Slot
    where
        F: std::future::Future<Output = WaitOutcome> + 'static,
    {
        let slot: Slot = Rc::new(Cell::new(None));
        let sink = slot.clone();
        scheduler
            .spawn(async move { sink.set(Some(wait.await)) })
            .expect("spawn");
        scheduler.run_until_stalled();
        slot
    }

    /// Advance the sequencer and the scheduler together until the wait ends
    fn run_frames(scheduler: &mut FrameScheduler, seq: &SharedSequencer, slot: &Slot, limit: u32) -> u32 {
        let mut frames = 0;
        while slot.get().is_none() && frames < limit {
            seq.borrow_mut()
                .update(UpdateChannel::Normal, FrameTime::new(0.1));
            scheduler.tick();
            frames += 1;
        }
        frames
    }

    #[test]
    fn test_wait_for_complete() {
        let seq = shared(&[0.5, 0.5]);
        let mut scheduler = FrameScheduler::new();
        let signal = scheduler.signal();
        let slot = spawn_wait(&mut scheduler, wait_for_complete(seq.clone(), signal, WaitOptions::default()));

        assert!(seq.borrow().is_playing());
        assert_eq!(slot.get(), None);

        let frames = run_frames(&mut scheduler, &seq, &slot, 100);
        assert_eq!(slot.get(), Some(WaitOutcome::Reached));
        assert!((9..=11).contains(&frames));
        assert!(seq.borrow().is_complete());
    }

    #[test]
    fn test_instant_multiplier_returns_immediately() {
        let seq = shared(&[1.0]);
        let clock = FrameClock::new();
        let outcome = wait_for_complete(
            seq.clone(),
            clock.signal(),
            WaitOptions::default().with_multiplier(0.0),
        )
        .now_or_never();

        assert_eq!(outcome, Some(WaitOutcome::Instant));
        assert!(seq.borrow().is_complete());
    }

    #[test]
    fn test_not_built_without_auto_build() {
        let seq = shared(&[1.0]);
        let clock = FrameClock::new();
        let outcome = wait_for_complete(seq.clone(), clock.signal(), WaitOptions::default().without_build())
            .now_or_never();
        assert_eq!(outcome, Some(WaitOutcome::NotBuilt));
        assert!(!seq.borrow().has_sequence());
    }

    #[test]
    fn test_kill_ends_pending_wait() {
        let seq = shared(&[10.0]);
        let mut scheduler = FrameScheduler::new();
        let signal = scheduler.signal();
        let slot = spawn_wait(&mut scheduler, wait_for_complete(seq.clone(), signal, WaitOptions::default()));

        run_frames(&mut scheduler, &seq, &slot, 3);
        assert_eq!(slot.get(), None);

        seq.borrow_mut().kill(false);
        assert!(!seq.borrow().is_playing());
        scheduler.tick();
        assert_eq!(slot.get(), Some(WaitOutcome::Inactive));
    }

    #[test]
    fn test_auto_killed_completion_is_reached() {
        let mut steps = StepList::new();
        steps.push(IntervalStep::new(0.3));
        let settings = SequencerSettings::default().with_auto_kill(true);
        let seq = Rc::new(RefCell::new(Sequencer::with_steps(settings, steps)));
        let completed = Rc::new(Cell::new(0));
        let sink = completed.clone();
        seq.borrow()
            .events()
            .subscribe(SequencerEvent::Completed, move || sink.set(sink.get() + 1));

        let mut scheduler = FrameScheduler::new();
        let signal = scheduler.signal();
        let slot = spawn_wait(&mut scheduler, wait_for_complete(seq.clone(), signal, WaitOptions::default()));

        run_frames(&mut scheduler, &seq, &slot, 100);
        assert_eq!(completed.get(), 1);
        assert_eq!(slot.get(), Some(WaitOutcome::Reached));
        assert!(!seq.borrow().has_sequence());
        // The wait's own listener is gone
        assert_eq!(seq.borrow().events().listener_count(SequencerEvent::Completed), 1);
    }

    #[test]
    fn test_non_finite_multiplier_is_instant() {
        let seq = shared(&[1.0]);
        let clock = FrameClock::new();
        let outcome = wait_for_complete(
            seq.clone(),
            clock.signal(),
            WaitOptions::default().with_multiplier(f32::NAN),
        )
        .now_or_never();
        assert_eq!(outcome, Some(WaitOutcome::Instant));
        assert!(seq.borrow().is_complete());
    }

    #[test]
    fn test_clock_stopped() {
        let seq = shared(&[1.0]);
        let clock = FrameClock::new();
        let signal = clock.signal();
        drop(clock);
        let outcome = wait_for_complete(seq, signal, WaitOptions::default()).now_or_never();
        assert_eq!(outcome, Some(WaitOutcome::ClockStopped));
    }

    #[test]
    fn test_wait_without_play_sees_external_play() {
        let seq = shared(&[0.2]);
        let mut scheduler = FrameScheduler::new();
        let signal = scheduler.signal();
        let slot = spawn_wait(&mut scheduler, wait_for_complete(seq.clone(), signal, WaitOptions::default().without_play()));

        assert!(seq.borrow().has_sequence());
        assert!(!seq.borrow().is_playing());
        run_frames(&mut scheduler, &seq, &slot, 5);
        assert_eq!(slot.get(), None);

        seq.borrow_mut().play();
        run_frames(&mut scheduler, &seq, &slot, 100);
        assert_eq!(slot.get(), Some(WaitOutcome::Reached));
    }

    #[test]
    fn test_wait_for_rewind() {
        let seq = shared(&[0.5]);
        seq.borrow_mut().goto_end(false);

        let mut scheduler = FrameScheduler::new();
        let signal = scheduler.signal();
        let slot = spawn_wait(&mut scheduler, wait_for_rewind(seq.clone(), signal, WaitOptions::default()));
        assert!(seq.borrow().is_playing());

        run_frames(&mut scheduler, &seq, &slot, 100);
        assert_eq!(slot.get(), Some(WaitOutcome::Reached));
        let seq = seq.borrow();
        assert!(!seq.is_playing());
        assert!(seq.is_at_start());
    }

    #[test]
    fn test_instant_rewind() {
        let seq = shared(&[0.5]);
        seq.borrow_mut().goto_end(false);
        let clock = FrameClock::new();
        let outcome = wait_for_rewind(seq.clone(), clock.signal(), WaitOptions::default().with_multiplier(-1.0))
            .now_or_never();
        assert_eq!(outcome, Some(WaitOutcome::Instant));
        assert!(seq.borrow().is_at_start());
    }
}
