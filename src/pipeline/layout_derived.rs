//! Layout Derived - Reactive layout computation.
//!
//! Creates a Derived that computes layout whenever:
//! - The device changes
//! - Any layout, core, or text array cell it read changes
//! - Views are added, removed, or re-parented
//!
//! # Global Layout Accessor
//!
//! The last layout committed by a layout pass is kept in a thread-local so
//! views can answer `frame()` and `get_safe_area_insets()` without holding
//! the derived.

use std::cell::RefCell;
use std::rc::Rc;

use spark_signals::{Derived, derived};

use crate::engine::arrays::dirty::track_structure;
use crate::layout::{ComputedLayout, compute_layout};
use super::device::device_signal;

// =============================================================================
// GLOBAL LAYOUT ACCESSOR
// =============================================================================

thread_local! {
    /// Layout committed by the last layout pass.
    static CURRENT_LAYOUT: RefCell<Option<Rc<ComputedLayout>>> = const { RefCell::new(None) };
}

/// Commit a computed layout, returning the shared handle.
pub fn set_layout(layout: ComputedLayout) -> Rc<ComputedLayout> {
    let layout = Rc::new(layout);
    CURRENT_LAYOUT.with(|l| *l.borrow_mut() = Some(layout.clone()));
    layout
}

/// Get the committed layout.
///
/// Returns `None` before the first layout pass or after `clear_layout()`.
pub fn try_get_layout() -> Option<Rc<ComputedLayout>> {
    CURRENT_LAYOUT.with(|l| l.borrow().clone())
}

/// Clear the committed layout (for unmount/testing).
pub fn clear_layout() {
    CURRENT_LAYOUT.with(|l| *l.borrow_mut() = None);
}

/// Create the layout derived.
///
/// Returns a Derived that computes layout and re-runs when any dependency
/// changes (device, view arrays, tree shape).
pub fn create_layout_derived() -> Derived<ComputedLayout> {
    let device_signal = device_signal();

    derived(move || {
        // Read device (creates reactive dependency)
        let viewport = device_signal.get().viewport();

        // Views added or removed do not touch cells we already read
        track_structure();

        // compute_layout reads the view arrays, which tracks those cells
        compute_layout(&viewport)
    })
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::arrays::{core, layout as layout_props};
    use crate::engine::{allocate_index, reset_registry};
    use crate::pipeline::device::{Device, set_device};
    use crate::types::{Dimension, Frame, ViewType};

    fn setup() {
        reset_registry();
        clear_layout();
        set_device(Device::iphone_8_ios10());
    }

    #[test]
    fn test_layout_derived_empty() {
        setup();

        let layout_derived = create_layout_derived();
        let layout = layout_derived.get();

        assert!(layout.roots.is_empty());
        assert!(layout.error.is_none());
    }

    #[test]
    fn test_layout_derived_with_root() {
        setup();

        let idx = allocate_index(None);
        core::set_view_type(idx, ViewType::StackLayout);

        let layout_derived = create_layout_derived();
        let layout = layout_derived.get();

        assert_eq!(layout.frame(idx), Some(Frame::new(0.0, 20.0, 375.0, 647.0)));
    }

    #[test]
    fn test_layout_derived_follows_device() {
        setup();

        let idx = allocate_index(None);
        core::set_view_type(idx, ViewType::GridLayout);

        let layout_derived = create_layout_derived();
        assert_eq!(layout_derived.get().frame(idx).map(|f| f.height), Some(647.0));

        set_device(Device::iphone_x());
        assert_eq!(layout_derived.get().frame(idx), Some(Frame::new(0.0, 0.0, 375.0, 812.0)));
        set_device(Device::default());
    }

    #[test]
    fn test_layout_derived_follows_new_children() {
        setup();

        let root = allocate_index(None);
        core::set_view_type(root, ViewType::AbsoluteLayout);

        let layout_derived = create_layout_derived();
        let _ = layout_derived.get();

        let child = allocate_index(None);
        core::set_view_type(child, ViewType::AbsoluteLayout);
        core::set_parent_index(child, Some(root));
        layout_props::set_width(child, Dimension::Dip(40.0));
        layout_props::set_height(child, Dimension::Dip(10.0));

        let layout = layout_derived.get();
        assert_eq!(layout.frame(child), Some(Frame::new(0.0, 20.0, 40.0, 10.0)));
    }

    #[test]
    fn test_set_and_clear_layout() {
        setup();
        assert!(try_get_layout().is_none());

        let shared = set_layout(ComputedLayout::new());
        assert!(Rc::ptr_eq(&shared, &try_get_layout().unwrap()));

        clear_layout();
        assert!(try_get_layout().is_none());
    }
}
