// SPDX-License-Identifier: MIT OR Apache-2.0
//! Built-in steps and helpers for writing new ones.

mod callback;
mod float;
mod interval;
mod toggle;

pub use callback::CallbackStep;
pub use float::FloatStep;
pub use interval::IntervalStep;
pub use toggle::ToggleStep;

use tweenflow_engine::Tween;

/// Zero-length tween that calls `on_forward` when the playhead passes it
/// and `on_backward` when the playhead moves back before it.
///
/// The two callbacks alternate: each fires at most once per crossing.
pub fn reversible_instant(
    mut on_forward: impl FnMut() + 'static,
    mut on_backward: impl FnMut() + 'static,
) -> Tween {
    Tween::instant()
        .on_start(move || on_forward())
        .on_rewind(move || on_backward())
}
