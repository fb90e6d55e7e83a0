// SPDX-License-Identifier: MIT OR Apache-2.0
//! Tweenflow Player - runs a step sequence headless on a fixed frame loop.
//!
//! Usage: `tweenflow_player [settings.ron]`
//!
//! The player lays out the demo steps, then plays them forward and back
//! while a script task waits on the sequence, resumed once per frame.

mod demo;

use demo::DemoScene;
use futures::task::SpawnError;
use futures::FutureExt;
use std::cell::RefCell;
use std::rc::Rc;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tweenflow_engine::{FrameTime, UpdateChannel};
use tweenflow_sequencer::{
    wait_for_complete, wait_for_rewind, FrameScheduler, Sequencer, SequencerEvent,
    SequencerSettings, SettingsError, SharedSequencer, WaitOptions, WaitOutcome,
};

/// Fixed frame length, in seconds
const FRAME_DELTA: f32 = 1.0 / 60.0;

/// Frames to run before giving up on the script
const MAX_FRAMES: u32 = 60 * 60;

/// Player failure
#[derive(Debug, thiserror::Error)]
enum PlayerError {
    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error("Failed to start script: {0}")]
    Spawn(#[from] SpawnError),

    #[error("Script did not finish within {0} frames")]
    FrameLimit(u32),
}

fn main() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("tweenflow_player=info,tweenflow_sequencer=debug"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Tweenflow Player v{}", env!("CARGO_PKG_VERSION"));

    let settings_path = std::env::args().nth(1);
    if let Err(e) = run(settings_path.as_deref()) {
        tracing::error!("Player failed: {e}");
        std::process::exit(1);
    }
}

fn run(settings_path: Option<&str>) -> Result<(), PlayerError> {
    let settings = match settings_path {
        Some(path) => SequencerSettings::load(path)?,
        None => SequencerSettings::default(),
    };
    let channel = settings.update_channel;

    let scene = DemoScene::new();
    let mut sequencer = Sequencer::with_steps(settings, scene.steps());
    log_layout(&sequencer);
    subscribe_events(&sequencer);
    sequencer.enable();

    let sequencer: SharedSequencer = Rc::new(RefCell::new(sequencer));
    let mut scheduler = FrameScheduler::new();

    let script = {
        let sequencer = sequencer.clone();
        let signal = scheduler.signal();
        let scene = scene.clone();
        async move {
            let forward = wait_for_complete(sequencer.clone(), signal.clone(), WaitOptions::default()).await;
            scene.log_state("After playing forward");
            let backward = wait_for_rewind(sequencer, signal, WaitOptions::default()).await;
            scene.log_state("After playing backward");
            (forward, backward)
        }
    };
    let mut handle = scheduler.spawn_with_handle(script)?;
    scheduler.run_until_stalled();

    for _ in 0..MAX_FRAMES {
        if let Some((forward, backward)) = (&mut handle).now_or_never() {
            report(forward, backward, scheduler.frame());
            return Ok(());
        }

        let frame = FrameTime::new(FRAME_DELTA);
        {
            let mut sequencer = sequencer.borrow_mut();
            if channel == UpdateChannel::Manual {
                sequencer.manual_update(frame);
            } else {
                for pass in UpdateChannel::all() {
                    sequencer.update(*pass, frame);
                }
            }
        }
        scheduler.tick();
    }

    Err(PlayerError::FrameLimit(MAX_FRAMES))
}

fn log_layout(sequencer: &Sequencer) {
    let layout = sequencer.layout();
    for ((_, step), timing) in sequencer.steps().iter().zip(&layout.timings) {
        let name = step.map_or("<empty>", |step| step.display_name());
        tracing::info!(
            "{:<12} {:>6.2}s -> {:>6.2}s (delay ends {:.2}s)",
            name,
            timing.scheduled_start,
            timing.end,
            timing.delay_end
        );
    }

    let estimate = sequencer.estimated_duration();
    tracing::info!(
        "Estimated duration: {:.2}s x {:.2} = {:.2}s",
        estimate.base,
        estimate.multiplier,
        estimate.effective
    );
}

fn subscribe_events(sequencer: &Sequencer) {
    for event in SequencerEvent::all() {
        let event = *event;
        sequencer
            .events()
            .subscribe(event, move || tracing::info!("Sequence event: {:?}", event));
    }
}

fn report(forward: WaitOutcome, backward: WaitOutcome, frames: u64) {
    tracing::info!(
        "Script finished after {} frames (forward: {:?}, backward: {:?})",
        frames,
        forward,
        backward
    );
}
