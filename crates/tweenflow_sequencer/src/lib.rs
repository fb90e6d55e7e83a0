// SPDX-License-Identifier: MIT OR Apache-2.0
//! Step sequencer for Tweenflow.
//!
//! This crate turns an ordered list of steps into one playable timeline:
//! - Step contract and a small catalog of built-in steps
//! - Timeline layout (absolute step offsets and total length)
//! - Sequence controller (play, play backwards, pause, resume, restart, kill)
//! - Notification channels for lifecycle events
//! - Suspension helpers that wait for completion or rewind
//! - Step list authoring and clipboard
//!
//! ## Architecture
//!
//! The sequencer is built on:
//! - The engine crate's [`Timeline`](tweenflow_engine::Timeline), which it
//!   owns and drives through explicit frame updates
//! - Pure layout functions over step shapes, kept in lockstep with the
//!   engine's append/join placement
//! - A frame clock and local executor for cooperative waiting
//!
//! Everything is single-threaded. Share a sequencer between an update loop
//! and waiting tasks through [`SharedSequencer`].

pub mod clipboard;
pub mod controller;
pub mod error;
pub mod events;
pub mod layout;
pub mod placement;
pub mod schedule;
pub mod settings;
pub mod step;
pub mod step_list;
pub mod steps;
pub mod value;
pub mod wait;

pub use clipboard::StepClipboard;
pub use controller::{approximately, Sequencer};
pub use error::{SettingsError, StepError};
pub use events::{EventChannels, ListenerId, SequencerEvent};
pub use layout::{
    compute_layout, effective_duration, estimate_total_length, is_instant_multiplier,
    DurationEstimate, StepProgress, StepShape, StepTiming, TimelineLayout,
};
pub use placement::{Placement, PlayDirection};
pub use schedule::{FrameClock, FrameScheduler, FrameSignal};
pub use settings::SequencerSettings;
pub use step::{Step, StepSettings, TweenOptions};
pub use step_list::{StepId, StepList};
pub use steps::{reversible_instant, CallbackStep, FloatStep, IntervalStep, ToggleStep};
pub use value::{Property, TweenValue};
pub use wait::{wait_for_complete, wait_for_rewind, SharedSequencer, WaitOptions, WaitOutcome};
