// SPDX-License-Identifier: MIT OR Apache-2.0
//! Easing curves applied to tween progress.

use serde::{Deserialize, Serialize};
use std::f32::consts::{FRAC_PI_2, PI};

/// Easing curve mapping linear progress to eased progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Ease {
    /// No easing
    Linear,
    /// Quadratic, accelerating
    InQuad,
    /// Quadratic, decelerating
    #[default]
    OutQuad,
    /// Quadratic, accelerate then decelerate
    InOutQuad,
    /// Cubic, accelerating
    InCubic,
    /// Cubic, decelerating
    OutCubic,
    /// Cubic, accelerate then decelerate
    InOutCubic,
    /// Sine, accelerating
    InSine,
    /// Sine, decelerating
    OutSine,
    /// Sine, accelerate then decelerate
    InOutSine,
    /// Overshoots the end value slightly before settling
    OutBack,
}

impl Ease {
    /// Evaluate the curve at `t`, clamped to `[0, 1]`
    pub fn evaluate(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::InQuad => t * t,
            Self::OutQuad => t * (2.0 - t),
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }
            Self::InCubic => t * t * t,
            Self::OutCubic => {
                let u = t - 1.0;
                u * u * u + 1.0
            }
            Self::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let u = 2.0 * t - 2.0;
                    0.5 * u * u * u + 1.0
                }
            }
            Self::InSine => 1.0 - (t * FRAC_PI_2).cos(),
            Self::OutSine => (t * FRAC_PI_2).sin(),
            Self::InOutSine => -0.5 * ((PI * t).cos() - 1.0),
            Self::OutBack => {
                const C1: f32 = 1.70158;
                const C3: f32 = C1 + 1.0;
                let u = t - 1.0;
                1.0 + C3 * u * u * u + C1 * u * u
            }
        }
    }
}
