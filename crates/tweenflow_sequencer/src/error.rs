// SPDX-License-Identifier: MIT OR Apache-2.0
//! Error types for steps and sequencer settings.

use tweenflow_engine::UnknownVariant;

/// Error raised while a step turns itself into a tween.
///
/// These are diagnostics: the step contributes nothing to the build and
/// the rest of the sequence is still assembled.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StepError {
    /// The step's target reference is unset
    #[error("[{step}] Missing target of type {target}.")]
    MissingTarget {
        /// Catalog path of the step
        step: &'static str,
        /// Name of the expected target type
        target: &'static str,
    },
}

/// Error in sequencer configuration. Construction aborts on these.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// Placement value that names no placement
    #[error("Unknown placement: {0}")]
    UnknownPlacement(String),

    /// Loop type or update channel that names no variant
    #[error(transparent)]
    UnknownVariant(#[from] UnknownVariant),

    /// Loop count below -1
    #[error("Loop count must be -1 (infinite) or greater, got {0}")]
    InvalidLoops(i32),

    /// Multiplier that is NaN or infinite
    #[error("Duration multiplier must be finite, got {0}")]
    InvalidMultiplier(f32),

    /// Malformed RON
    #[error("Failed to parse settings: {0}")]
    Parse(#[from] ron::error::SpannedError),

    /// Settings file could not be read
    #[error("Failed to read settings: {0}")]
    Io(#[from] std::io::Error),
}
