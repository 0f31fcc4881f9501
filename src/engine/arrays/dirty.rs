//! Layout Dirty Set
//!
//! Every array write lands the written index in this set. The layout pass
//! drains it; a view whose subtree still has dirty indices reports an
//! invalid layout.

use std::cell::RefCell;

use spark_signals::{DirtySet, Signal, dirty_set, signal};

thread_local! {
    /// Indices whose core, layout, or text properties changed since the last layout pass.
    pub static LAYOUT_DIRTY_SET: DirtySet = dirty_set();

    /// Bumped whenever a view is allocated, released, or re-parented.
    static STRUCTURE_VERSION: RefCell<Signal<u64>> = RefCell::new(signal(0));
}

/// Read the structure version (creates a reactive dependency on tree shape).
pub fn track_structure() -> u64 {
    STRUCTURE_VERSION.with(|v| v.borrow().get())
}

/// Record a change in tree shape.
pub fn bump_structure() {
    STRUCTURE_VERSION.with(|v| {
        let v = v.borrow();
        let next = v.get().wrapping_add(1);
        v.set(next);
    });
}

/// Get the layout dirty set.
pub fn get_layout_dirty_set() -> DirtySet {
    LAYOUT_DIRTY_SET.with(|s| s.clone())
}

/// Check whether `index` changed since the last layout pass.
pub fn is_dirty(index: usize) -> bool {
    LAYOUT_DIRTY_SET.with(|s| s.borrow().contains(&index))
}

/// Snapshot of all dirty indices.
pub fn dirty_indices() -> Vec<usize> {
    LAYOUT_DIRTY_SET.with(|s| s.borrow().iter().copied().collect())
}

/// Force `index` dirty without writing a property.
pub fn mark_dirty(index: usize) {
    LAYOUT_DIRTY_SET.with(|s| {
        s.borrow_mut().insert(index);
    });
}

/// Clear the dirty set (called after a layout pass).
pub fn clear_dirty() {
    LAYOUT_DIRTY_SET.with(|s| s.borrow_mut().clear());
}
