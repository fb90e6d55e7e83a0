// SPDX-License-Identifier: MIT OR Apache-2.0
//! Shared values that steps animate.

use std::cell::Cell;
use std::rc::Rc;

/// A shared, mutable value a step can target.
///
/// Clones point at the same value, so copying a step keeps its target.
#[derive(Debug, Clone, Default)]
pub struct Property<T: Copy>(Rc<Cell<T>>);

impl<T: Copy> Property<T> {
    /// Create a property holding `value`
    pub fn new(value: T) -> Self {
        Self(Rc::new(Cell::new(value)))
    }

    /// Read the current value
    pub fn get(&self) -> T {
        self.0.get()
    }

    /// Overwrite the value
    pub fn set(&self, value: T) {
        self.0.set(value);
    }

    /// Whether two handles point at the same value
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

/// Start and end values of a tween
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TweenValue<T> {
    /// Start from `from` instead of the current value
    pub use_from: bool,
    /// Start value, used when `use_from` is set
    pub from: T,
    /// End value
    pub to: T,
}

impl<T: Copy + Default> TweenValue<T> {
    /// Tween from `from` to `to`
    pub fn new(from: T, to: T) -> Self {
        Self {
            use_from: true,
            from,
            to,
        }
    }

    /// Tween from the current value to `to`
    pub fn to(to: T) -> Self {
        Self {
            use_from: false,
            from: T::default(),
            to,
        }
    }
}
