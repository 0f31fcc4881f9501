//! Mount API - Page lifecycle and the layout run loop.
//!
//! Mounting a root view sets up the layout derived. Each `tick` is one
//! run-loop iteration: if any view changed since the last pass, the derived
//! is pulled, the result committed, and the dirty set drained.
//!
//! # Example
//!
//! ```ignore
//! use safe_layout::builder::parse;
//! use safe_layout::pipeline::mount;
//!
//! let root = parse(r#"<StackLayout id="stack" />"#)?;
//! let handle = mount::mount(root);
//!
//! while !root.is_layout_valid() {
//!     mount::tick(&handle)?;
//! }
//!
//! handle.unmount();
//! ```

use std::rc::Rc;

use spark_signals::Derived;
use tracing::debug;

use crate::engine::arrays::dirty::{clear_dirty, dirty_indices};
use crate::engine::{is_allocated, release_index};
use crate::error::LayoutError;
use crate::layout::ComputedLayout;
use crate::view::View;
use super::layout_derived::{clear_layout, create_layout_derived, set_layout, try_get_layout};

// =============================================================================
// Mount Handle
// =============================================================================

/// Handle returned by mount() that allows unmounting.
pub struct MountHandle {
    root: View,
    layout_derived: Derived<ComputedLayout>,
}

impl MountHandle {
    /// The mounted root view.
    pub fn root(&self) -> View {
        self.root
    }

    /// Release the root's subtree and drop the committed layout.
    pub fn unmount(self) {
        debug!(root = %self.root, "unmount");
        release_index(self.root.index());
        clear_layout();
    }
}

// =============================================================================
// Mount Function
// =============================================================================

/// Mount a root view.
///
/// No layout happens until the first `tick` or `layout_pass`.
pub fn mount(root: View) -> MountHandle {
    debug!(root = %root, "mount");
    MountHandle {
        root,
        layout_derived: create_layout_derived(),
    }
}

// =============================================================================
// Run Loop
// =============================================================================

/// Run a layout pass now and commit the result.
pub fn layout_pass(handle: &MountHandle) -> Result<Rc<ComputedLayout>, LayoutError> {
    if !is_allocated(handle.root.index()) {
        return Err(LayoutError::UnknownView(handle.root.index()));
    }
    let layout = handle.layout_derived.get();
    if let Some(error) = &layout.error {
        return Err(LayoutError::Failed(error.clone()));
    }
    clear_dirty();
    Ok(set_layout(layout))
}

/// Run the run loop once.
///
/// Returns `Ok(true)` when a layout pass ran, `Ok(false)` when nothing had
/// changed since the last one.
pub fn tick(handle: &MountHandle) -> Result<bool, LayoutError> {
    if try_get_layout().is_some() && dirty_indices().is_empty() {
        return Ok(false);
    }
    layout_pass(handle)?;
    Ok(true)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::arrays::{core, layout as layout_props};
    use crate::engine::{allocate_index, release_index, reset_registry};
    use crate::pipeline::device::{Device, set_device};
    use crate::types::{Dimension, ViewType};

    fn setup() -> View {
        reset_registry();
        clear_layout();
        set_device(Device::iphone_x());

        let idx = allocate_index(None);
        core::set_view_type(idx, ViewType::StackLayout);
        View::from_index(idx).unwrap()
    }

    #[test]
    fn test_tick_runs_pass_only_when_dirty() {
        let root = setup();
        let handle = mount(root);

        assert!(tick(&handle).unwrap());
        assert!(root.is_layout_valid());
        assert!(!tick(&handle).unwrap());

        layout_props::set_width(root.index(), Dimension::Dip(100.0));
        assert!(!root.is_layout_valid());
        assert!(tick(&handle).unwrap());
        assert!(root.is_layout_valid());
    }

    #[test]
    fn test_unmount_releases_tree() {
        let root = setup();
        let handle = mount(root);
        layout_pass(&handle).unwrap();

        handle.unmount();
        assert!(!is_allocated(root.index()));
        assert!(try_get_layout().is_none());
    }

    #[test]
    fn test_layout_pass_rejects_released_root() {
        let root = setup();
        let handle = mount(root);
        release_index(root.index());

        assert!(matches!(layout_pass(&handle), Err(LayoutError::UnknownView(_))));
    }
}
