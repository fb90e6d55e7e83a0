// SPDX-License-Identifier: MIT OR Apache-2.0
//! Tween engine for Tweenflow.
//!
//! This crate provides the native animation primitives the sequencer
//! composes:
//! - Tweens with delay, duration, easing and lifecycle callbacks
//! - Easing curves
//! - Timelines that place tweens by append/join rules
//! - Loops, time scaling and update channels
//!
//! ## Architecture
//!
//! Nothing here runs on its own. A timeline only moves when its owner calls
//! [`Timeline::update`] (or [`Timeline::manual_update`]) with a
//! [`FrameTime`], which keeps playback deterministic and single-threaded.

pub mod ease;
pub mod error;
pub mod frame;
pub mod timeline;
pub mod tween;

pub use ease::Ease;
pub use error::UnknownVariant;
pub use frame::{FrameTime, LoopType, UpdateChannel};
pub use timeline::Timeline;
pub use tween::{Tween, TweenSample};
