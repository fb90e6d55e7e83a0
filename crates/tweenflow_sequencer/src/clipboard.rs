// SPDX-License-Identifier: MIT OR Apache-2.0
//! Copy and paste of single steps.
//!
//! The clipboard is plain state owned by whoever does the authoring. Copies
//! are deep: editing a pasted step never touches the copied one. Shared
//! targets ([`Property`](crate::value::Property) handles) still point at the
//! same value.

use crate::step::Step;
use crate::step_list::{StepId, StepList};

/// Holds at most one copied step
#[derive(Debug, Clone, Default)]
pub struct StepClipboard {
    copied: Option<Box<dyn Step>>,
}

impl StepClipboard {
    /// Create an empty clipboard
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy a step, replacing anything copied before
    pub fn copy(&mut self, step: &dyn Step) {
        self.copied = Some(step.clone_box());
        tracing::debug!("Copied step: {}", step.display_name());
    }

    /// Whether nothing is copied
    pub fn is_empty(&self) -> bool {
        self.copied.is_none()
    }

    /// The copied step
    pub fn peek(&self) -> Option<&dyn Step> {
        self.copied.as_deref()
    }

    /// Append a fresh copy to `list`
    pub fn paste_add(&self, list: &mut StepList) -> Option<StepId> {
        let step = self.copied.as_ref()?.clone();
        Some(list.push_boxed(step))
    }

    /// Put a fresh copy into the slot at `index`. Returns `false` when
    /// nothing is copied or the index is out of range.
    pub fn paste_replace(&self, list: &mut StepList, index: usize) -> bool {
        let (Some(copied), Some(id)) = (self.copied.as_ref(), list.id_at(index)) else {
            return false;
        };
        list.replace(id, copied.clone());
        true
    }

    /// Forget the copied step
    pub fn clear(&mut self) {
        self.copied = None;
    }
}
