//! Core Arrays
//!
//! The most fundamental view arrays:
//! - viewType: What kind of view (layout container, label, button)
//! - parentIndex / children: Hierarchy, children kept in insertion order
//! - visibility: Visible, hidden, or collapsed
//! - viewId: The `id` attribute used by `get_view_by_id`
//!
//! `viewType` and `children` store values directly (not reactive); hierarchy
//! changes are reported through the parent index and the dirty set.

use std::cell::RefCell;
use std::collections::HashMap;

use spark_signals::{TrackedSlotArray, tracked_slot_array};

use crate::types::{ViewType, Visibility};
use super::dirty::{LAYOUT_DIRTY_SET, bump_structure, mark_dirty};
use super::ClearAll;

// =============================================================================
// Arrays
// =============================================================================

thread_local! {
    /// View type - stores values directly (not reactive).
    static VIEW_TYPE: RefCell<Vec<ViewType>> = const { RefCell::new(Vec::new()) };

    /// Children per parent index, in insertion order.
    static CHILDREN: RefCell<HashMap<usize, Vec<usize>>> = RefCell::new(HashMap::new());

    /// Parent view index (None for root).
    static PARENT_INDEX: TrackedSlotArray<Option<usize>> = tracked_slot_array(
        Some(None),
        LAYOUT_DIRTY_SET.with(|s| s.clone())
    );

    /// Visibility.
    static VISIBILITY: TrackedSlotArray<Visibility> = tracked_slot_array(
        Some(Visibility::Visible),
        LAYOUT_DIRTY_SET.with(|s| s.clone())
    );

    /// The `id` attribute (empty when unset).
    static VIEW_ID: TrackedSlotArray<String> = tracked_slot_array(
        Some(String::new()),
        LAYOUT_DIRTY_SET.with(|s| s.clone())
    );
}

// =============================================================================
// Capacity Management
// =============================================================================

/// Ensure arrays have capacity for the given index.
pub fn ensure_capacity(index: usize) {
    VIEW_TYPE.with(|arr| {
        let mut arr = arr.borrow_mut();
        while arr.len() <= index {
            arr.push(ViewType::None);
        }
    });

    PARENT_INDEX.with(|arr| {
        let _ = arr.peek(index);
    });
    VISIBILITY.with(|arr| {
        let _ = arr.peek(index);
    });
    VIEW_ID.with(|arr| {
        let _ = arr.peek(index);
    });
}

/// Clear values at index (called when releasing).
pub fn clear_at_index(index: usize) {
    if let Some(parent) = get_parent_index(index) {
        CHILDREN.with(|map| {
            if let Some(children) = map.borrow_mut().get_mut(&parent) {
                children.retain(|&c| c != index);
            }
        });
        mark_dirty(parent);
    }
    CHILDREN.with(|map| {
        map.borrow_mut().remove(&index);
    });

    VIEW_TYPE.with(|arr| {
        let mut arr = arr.borrow_mut();
        if index < arr.len() {
            arr[index] = ViewType::None;
        }
    });

    PARENT_INDEX.with(|arr| arr.clear(index));
    VISIBILITY.with(|arr| arr.clear(index));
    VIEW_ID.with(|arr| arr.clear(index));
}

/// Reset all arrays.
pub fn reset() {
    VIEW_TYPE.with(|arr| arr.borrow_mut().clear());
    CHILDREN.with(|map| map.borrow_mut().clear());
    PARENT_INDEX.with(|arr| arr.clear_all());
    VISIBILITY.with(|arr| arr.clear_all());
    VIEW_ID.with(|arr| arr.clear_all());
}

// =============================================================================
// View Type
// =============================================================================

/// Get view type at index.
pub fn get_view_type(index: usize) -> ViewType {
    VIEW_TYPE.with(|arr| arr.borrow().get(index).copied().unwrap_or(ViewType::None))
}

/// Set view type at index.
pub fn set_view_type(index: usize, value: ViewType) {
    VIEW_TYPE.with(|arr| {
        let mut arr = arr.borrow_mut();
        while arr.len() <= index {
            arr.push(ViewType::None);
        }
        arr[index] = value;
    });
    mark_dirty(index);
    bump_structure();
}

// =============================================================================
// Hierarchy
// =============================================================================

/// Get parent index at index (reactive - tracks this index).
pub fn get_parent_index(index: usize) -> Option<usize> {
    PARENT_INDEX.with(|arr| arr.get(index)).flatten()
}

/// Set parent index at index, appending to the new parent's children.
pub fn set_parent_index(index: usize, parent: Option<usize>) {
    let previous = get_parent_index(index);
    if previous == parent {
        return;
    }

    CHILDREN.with(|map| {
        let mut map = map.borrow_mut();
        if let Some(old) = previous {
            if let Some(children) = map.get_mut(&old) {
                children.retain(|&c| c != index);
            }
        }
        if let Some(new) = parent {
            map.entry(new).or_default().push(index);
        }
    });

    PARENT_INDEX.with(|arr| arr.set_value(index, parent));
    if let Some(old) = previous {
        mark_dirty(old);
    }
    if let Some(new) = parent {
        mark_dirty(new);
    }
    bump_structure();
}

/// Children of `index` in insertion order.
pub fn get_children(index: usize) -> Vec<usize> {
    CHILDREN.with(|map| map.borrow().get(&index).cloned().unwrap_or_default())
}

// =============================================================================
// Visibility
// =============================================================================

/// Get visibility at index (reactive).
pub fn get_visibility(index: usize) -> Visibility {
    VISIBILITY.with(|arr| arr.get(index)).unwrap_or(Visibility::Visible)
}

/// Set visibility at index.
pub fn set_visibility(index: usize, value: Visibility) {
    VISIBILITY.with(|arr| arr.set_value(index, value));
}

/// Collapsed views take no part in layout.
pub fn is_collapsed(index: usize) -> bool {
    get_visibility(index) == Visibility::Collapse
}

// =============================================================================
// View ID
// =============================================================================

/// Get the `id` attribute at index (empty when unset).
pub fn get_view_id(index: usize) -> String {
    VIEW_ID.with(|arr| arr.get(index)).unwrap_or_default()
}

/// Set the `id` attribute at index.
pub fn set_view_id(index: usize, id: String) {
    VIEW_ID.with(|arr| arr.set_value(index, id));
}
