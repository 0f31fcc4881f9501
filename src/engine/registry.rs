//! View Registry - Index allocation for parallel arrays.
//!
//! Manages the lifecycle of view indices:
//! - Free index pool for O(1) reuse
//! - Allocated index set in ascending order (the layout pass walks it)
//! - Parent context stack for nested view creation
//! - Scoped `id` lookup (`get_view_by_id`)
//!
//! Unlike component ids in a UI framework, the `id` attribute is not unique:
//! two pages may both contain an `id="root"`. Lookups are therefore always
//! scoped to a subtree.

use std::cell::RefCell;
use std::collections::BTreeSet;

use tracing::trace;

use super::arrays;
use super::arrays::core;
use super::arrays::dirty::bump_structure;

// =============================================================================
// Registry State
// =============================================================================

thread_local! {
    /// Currently allocated indices, ascending.
    static ALLOCATED_INDICES: RefCell<BTreeSet<usize>> = const { RefCell::new(BTreeSet::new()) };

    /// Pool of freed indices for reuse.
    static FREE_INDICES: RefCell<Vec<usize>> = const { RefCell::new(Vec::new()) };

    /// Next index to allocate if pool is empty.
    static NEXT_INDEX: RefCell<usize> = const { RefCell::new(0) };

    /// Stack of parent indices for nested view creation.
    static PARENT_STACK: RefCell<Vec<usize>> = const { RefCell::new(Vec::new()) };
}

// =============================================================================
// Parent Context Stack
// =============================================================================

/// Get current parent index (None if at root).
pub fn get_current_parent_index() -> Option<usize> {
    PARENT_STACK.with(|stack| stack.borrow().last().copied())
}

/// Push a parent index onto the stack.
pub fn push_parent_context(index: usize) {
    PARENT_STACK.with(|stack| stack.borrow_mut().push(index));
}

/// Pop a parent index from the stack.
pub fn pop_parent_context() {
    PARENT_STACK.with(|stack| {
        stack.borrow_mut().pop();
    });
}

// =============================================================================
// Index Allocation
// =============================================================================

/// Allocate an index for a new view.
///
/// The view is attached to the current parent context, if any, and its `id`
/// attribute is recorded when given.
pub fn allocate_index(id: Option<&str>) -> usize {
    let index = FREE_INDICES.with(|free| {
        free.borrow_mut().pop().unwrap_or_else(|| {
            NEXT_INDEX.with(|next| {
                let mut next = next.borrow_mut();
                let index = *next;
                *next += 1;
                index
            })
        })
    });

    ALLOCATED_INDICES.with(|set| {
        set.borrow_mut().insert(index);
    });

    arrays::ensure_all_capacity(index);

    if let Some(id) = id {
        core::set_view_id(index, id.to_string());
    }
    if let Some(parent) = get_current_parent_index() {
        core::set_parent_index(index, Some(parent));
    }
    bump_structure();

    trace!(index, ?id, "allocated view");
    index
}

/// Release an index back to the pool.
///
/// Also recursively releases all children!
pub fn release_index(index: usize) {
    if !is_allocated(index) {
        return;
    }

    for child in core::get_children(index) {
        release_index(child);
    }

    ALLOCATED_INDICES.with(|set| {
        set.borrow_mut().remove(&index);
    });

    arrays::clear_all_at_index(index);

    FREE_INDICES.with(|free| free.borrow_mut().push(index));
    bump_structure();
    trace!(index, "released view");

    // When all views are gone, reset all arrays to free memory
    let is_empty = ALLOCATED_INDICES.with(|set| set.borrow().is_empty());
    if is_empty {
        arrays::reset_all_arrays();
        FREE_INDICES.with(|free| free.borrow_mut().clear());
        NEXT_INDEX.with(|next| *next.borrow_mut() = 0);
    }
}

// =============================================================================
// Lookups
// =============================================================================

/// Get all currently allocated indices, ascending.
pub fn get_allocated_indices() -> Vec<usize> {
    ALLOCATED_INDICES.with(|set| set.borrow().iter().copied().collect())
}

/// Check if an index is currently allocated.
pub fn is_allocated(index: usize) -> bool {
    ALLOCATED_INDICES.with(|set| set.borrow().contains(&index))
}

/// Get the count of currently allocated views.
pub fn get_allocated_count() -> usize {
    ALLOCATED_INDICES.with(|set| set.borrow().len())
}

/// Walk up the parent chain to the topmost ancestor.
pub fn root_of(index: usize) -> usize {
    let mut current = index;
    while let Some(parent) = core::get_parent_index(current) {
        current = parent;
    }
    current
}

/// Check whether `index` is `ancestor` or lies below it.
pub fn is_in_subtree(ancestor: usize, index: usize) -> bool {
    let mut current = Some(index);
    while let Some(i) = current {
        if i == ancestor {
            return true;
        }
        current = core::get_parent_index(i);
    }
    false
}

/// All indices of the subtree rooted at `index`, depth-first pre-order.
pub fn subtree(index: usize) -> Vec<usize> {
    let mut out = Vec::new();
    let mut stack = vec![index];
    while let Some(i) = stack.pop() {
        out.push(i);
        stack.extend(core::get_children(i).into_iter().rev());
    }
    out
}

/// Find the first view with the given `id` attribute in the subtree rooted
/// at `scope`, depth-first pre-order.
pub fn get_view_by_id(scope: usize, id: &str) -> Option<usize> {
    subtree(scope)
        .into_iter()
        .find(|&i| is_allocated(i) && core::get_view_id(i) == id)
}

// =============================================================================
// Reset (for testing)
// =============================================================================

/// Reset all registry state (for testing).
pub fn reset_registry() {
    ALLOCATED_INDICES.with(|set| set.borrow_mut().clear());
    FREE_INDICES.with(|free| free.borrow_mut().clear());
    NEXT_INDEX.with(|next| *next.borrow_mut() = 0);
    PARENT_STACK.with(|stack| stack.borrow_mut().clear());
    arrays::reset_all_arrays();
}
