//! Parallel Arrays
//!
//! All view state lives in these parallel arrays.
//! Each array index corresponds to one view.
//!
//! # Array Categories
//!
//! - **core**: View type, hierarchy, visibility, id
//! - **layout**: Sizing, spacing, alignment, container-specific properties
//! - **text**: Text content and font size
//! - **dirty**: Which indices changed since the last layout pass

pub mod core;
pub mod dirty;
pub mod layout;
pub mod text;

use spark_signals::TrackedSlotArray;

/// `clear_all` for `TrackedSlotArray`, which only clears by index.
pub trait ClearAll {
    fn clear_all(&self);
}

impl<T: Clone + PartialEq + 'static> ClearAll for TrackedSlotArray<T> {
    fn clear_all(&self) {
        for i in 0..self.len() {
            self.clear(i);
        }
    }
}

/// Ensure all arrays have capacity for the given index.
pub fn ensure_all_capacity(index: usize) {
    core::ensure_capacity(index);
    layout::ensure_capacity(index);
    text::ensure_capacity(index);
}

/// Clear all array values at an index.
pub fn clear_all_at_index(index: usize) {
    core::clear_at_index(index);
    layout::clear_at_index(index);
    text::clear_at_index(index);
}

/// Reset all parallel arrays and the dirty set.
pub fn reset_all_arrays() {
    core::reset();
    layout::reset();
    text::reset();
    dirty::clear_dirty();
}
