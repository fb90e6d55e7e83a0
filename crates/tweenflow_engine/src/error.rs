// SPDX-License-Identifier: MIT OR Apache-2.0
//! Engine error types.

/// A textual or numeric enum value that does not name any variant
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown {kind}: {value}")]
pub struct UnknownVariant {
    /// Enum being parsed
    pub kind: &'static str,
    /// Rejected input
    pub value: String,
}

impl UnknownVariant {
    /// Create an error for `kind` rejecting `value`
    pub fn new(kind: &'static str, value: impl ToString) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}
