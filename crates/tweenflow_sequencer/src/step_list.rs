// SPDX-License-Identifier: MIT OR Apache-2.0
//! Ordered list of steps, as authored.
//!
//! List order is playback order. Slots may be empty, which authoring tools
//! use for a step whose type has not been picked yet; empty slots take no
//! time and build nothing.

use crate::layout::{compute_layout, StepShape, TimelineLayout};
use crate::step::Step;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a slot in a step list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StepId(pub Uuid);

impl StepId {
    /// Create a new random step ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for StepId {
    fn default() -> Self {
        Self::new()
    }
}

/// Ordered, keyed step slots
#[derive(Debug, Clone, Default)]
pub struct StepList {
    slots: IndexMap<StepId, Option<Box<dyn Step>>>,
}

impl StepList {
    /// Create an empty list
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a step at the end
    pub fn push(&mut self, step: impl Step + 'static) -> StepId {
        self.push_boxed(Box::new(step))
    }

    /// Add a boxed step at the end
    pub fn push_boxed(&mut self, step: Box<dyn Step>) -> StepId {
        let id = StepId::new();
        self.slots.insert(id, Some(step));
        id
    }

    /// Add an empty slot at the end
    pub fn push_empty(&mut self) -> StepId {
        let id = StepId::new();
        self.slots.insert(id, None);
        id
    }

    /// Insert a step at `index`, clamped to the list length
    pub fn insert(&mut self, index: usize, step: Box<dyn Step>) -> StepId {
        let id = StepId::new();
        let index = index.min(self.slots.len());
        self.slots.shift_insert(index, id, Some(step));
        id
    }

    /// Remove a slot, keeping the order of the others
    pub fn remove(&mut self, id: StepId) -> Option<Box<dyn Step>> {
        self.slots.shift_remove(&id).flatten()
    }

    /// Remove the slot at `index`
    pub fn remove_at(&mut self, index: usize) -> Option<Box<dyn Step>> {
        self.slots
            .shift_remove_index(index)
            .and_then(|(_, step)| step)
    }

    /// Put a step into an existing slot. Returns the previous step.
    pub fn replace(&mut self, id: StepId, step: Box<dyn Step>) -> Option<Box<dyn Step>> {
        let slot = self.slots.get_mut(&id)?;
        slot.replace(step)
    }

    /// Move a slot to `to`. Returns `false` when either index is out of range.
    pub fn move_step(&mut self, from: usize, to: usize) -> bool {
        let len = self.slots.len();
        if from >= len || to >= len {
            return false;
        }
        self.slots.move_index(from, to);
        true
    }

    /// Deep-copy the step at `index` and insert the copy right after it
    pub fn duplicate(&mut self, index: usize) -> Option<StepId> {
        let copy = self.slots.get_index(index)?.1.as_ref()?.clone();
        let id = self.insert(index + 1, copy);
        tracing::debug!("Duplicated step at index {}", index);
        Some(id)
    }

    /// Get a step by ID
    pub fn get(&self, id: StepId) -> Option<&dyn Step> {
        self.slots.get(&id)?.as_deref()
    }

    /// Get a mutable step by ID
    pub fn get_mut(&mut self, id: StepId) -> Option<&mut Box<dyn Step>> {
        self.slots.get_mut(&id)?.as_mut()
    }

    /// Get a step by index
    pub fn get_index(&self, index: usize) -> Option<&dyn Step> {
        self.slots.get_index(index)?.1.as_deref()
    }

    /// ID of the slot at `index`
    pub fn id_at(&self, index: usize) -> Option<StepId> {
        self.slots.get_index(index).map(|(id, _)| *id)
    }

    /// Index of a slot
    pub fn index_of(&self, id: StepId) -> Option<usize> {
        self.slots.get_index_of(&id)
    }

    /// Number of slots, empty ones included
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the list has no slots
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Iterate over all slots in order
    pub fn iter(&self) -> impl Iterator<Item = (StepId, Option<&dyn Step>)> {
        self.slots.iter().map(|(id, step)| (*id, step.as_deref()))
    }

    /// Iterate over the filled slots in order
    pub fn steps(&self) -> impl Iterator<Item = &dyn Step> {
        self.slots.values().filter_map(|step| step.as_deref())
    }

    /// Timing shape of every slot
    pub fn shapes(&self) -> impl Iterator<Item = Option<StepShape>> + '_ {
        self.slots
            .values()
            .map(|step| step.as_ref().map(|step| step.shape()))
    }

    /// Lay out the list
    pub fn layout(&self) -> TimelineLayout {
        compute_layout(self.shapes())
    }
}
