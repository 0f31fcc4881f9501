//! View handle.
//!
//! A `View` is a copyable index into the parallel arrays. Geometry reads go
//! through the layout committed by the last layout pass; property writes go
//! straight to the arrays and mark the view dirty until the next pass.

use std::fmt;

use crate::engine::arrays::dirty::{dirty_indices, mark_dirty};
use crate::engine::arrays::{core, layout, text};
use crate::engine::{get_view_by_id, is_allocated, is_in_subtree};
use crate::pipeline::layout_derived::try_get_layout;
use crate::types::{Dimension, Frame, Insets, ViewType, Visibility};

/// Handle to an allocated view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct View {
    index: usize,
}

impl View {
    /// Wrap an index, if it is allocated.
    pub fn from_index(index: usize) -> Option<Self> {
        is_allocated(index).then_some(Self { index })
    }

    /// Wrap an index the caller just allocated.
    pub(crate) fn from_allocated(index: usize) -> Self {
        Self { index }
    }

    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Find a descendant (or this view) by its `id` attribute.
    pub fn get_view_by_id(&self, id: &str) -> Option<View> {
        get_view_by_id(self.index, id).map(|index| View { index })
    }

    /// The `id` attribute, empty when unset.
    pub fn id(&self) -> String {
        core::get_view_id(self.index)
    }

    pub fn parent(&self) -> Option<View> {
        core::get_parent_index(self.index).map(|index| View { index })
    }

    pub fn children(&self) -> Vec<View> {
        core::get_children(self.index)
            .into_iter()
            .map(|index| View { index })
            .collect()
    }

    pub fn view_type(&self) -> ViewType {
        core::get_view_type(self.index)
    }

    // =========================================================================
    // Geometry
    // =========================================================================

    /// Absolute frame from the last layout pass.
    ///
    /// `None` before the view has been laid out, or while collapsed.
    pub fn frame(&self) -> Option<Frame> {
        try_get_layout().and_then(|layout| layout.frame(self.index))
    }

    /// How far this view was extended under the system bars on each edge.
    pub fn get_safe_area_insets(&self) -> Insets {
        try_get_layout()
            .map(|layout| layout.insets(self.index))
            .unwrap_or_default()
    }

    /// True once a layout pass has covered this view and nothing in its
    /// subtree changed since.
    pub fn is_layout_valid(&self) -> bool {
        let laid_out = try_get_layout().is_some_and(|layout| layout.contains(self.index));
        laid_out
            && dirty_indices()
                .into_iter()
                .all(|dirty| !is_in_subtree(self.index, dirty))
    }

    /// Invalidate this view and every ancestor.
    pub fn request_layout(&self) {
        let mut current = Some(self.index);
        while let Some(index) = current {
            mark_dirty(index);
            current = core::get_parent_index(index);
        }
    }

    // =========================================================================
    // Properties
    // =========================================================================

    pub fn set_text(&self, content: impl Into<String>) {
        text::set_text_content(self.index, content.into());
    }

    pub fn text(&self) -> String {
        text::get_text_content(self.index)
    }

    pub fn set_width(&self, width: impl Into<Dimension>) {
        layout::set_width(self.index, width.into());
    }

    pub fn set_height(&self, height: impl Into<Dimension>) {
        layout::set_height(self.index, height.into());
    }

    pub fn set_margin(&self, margin: [f32; 4]) {
        layout::set_margin(self.index, margin);
    }

    pub fn set_visibility(&self, visibility: Visibility) {
        core::set_visibility(self.index, visibility);
    }

    pub fn set_overflow_safe_area(&self, overflow: bool) {
        layout::set_overflow_safe_area(self.index, overflow);
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let id = self.id();
        if id.is_empty() {
            write!(f, "{}({})", self.view_type().tag(), self.index)
        } else {
            write!(f, "{}<{}>", self.view_type().tag(), id)
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::arrays::dirty::clear_dirty;
    use crate::engine::{allocate_index, pop_parent_context, push_parent_context, reset_registry};
    use crate::layout::ComputedLayout;
    use crate::pipeline::layout_derived::{clear_layout, set_layout};

    fn setup() {
        reset_registry();
        clear_layout();
    }

    fn make(view_type: ViewType, id: Option<&str>) -> View {
        let index = allocate_index(id);
        core::set_view_type(index, view_type);
        View::from_index(index).unwrap()
    }

    #[test]
    fn test_hierarchy_and_lookup() {
        setup();

        let root = make(ViewType::StackLayout, Some("root"));
        push_parent_context(root.index());
        let label = make(ViewType::Label, Some("title"));
        let button = make(ViewType::Button, None);
        pop_parent_context();

        assert_eq!(root.children(), vec![label, button]);
        assert_eq!(label.parent(), Some(root));
        assert_eq!(root.get_view_by_id("title"), Some(label));
        assert_eq!(root.get_view_by_id("root"), Some(root));
        assert_eq!(label.get_view_by_id("root"), None);
        assert_eq!(button.view_type(), ViewType::Button);
    }

    #[test]
    fn test_from_index_requires_allocation() {
        setup();
        assert!(View::from_index(0).is_none());
        let view = make(ViewType::Label, None);
        assert_eq!(View::from_index(view.index()), Some(view));
    }

    #[test]
    fn test_layout_validity() {
        setup();

        let root = make(ViewType::GridLayout, None);
        push_parent_context(root.index());
        let child = make(ViewType::Label, None);
        pop_parent_context();

        // Nothing committed yet
        assert!(!root.is_layout_valid());

        let mut layout = ComputedLayout::with_len(2);
        layout.set_frame(root.index(), Frame::new(0.0, 0.0, 100.0, 100.0));
        layout.set_frame(child.index(), Frame::new(0.0, 0.0, 10.0, 10.0));
        set_layout(layout);
        clear_dirty();
        assert!(root.is_layout_valid());
        assert_eq!(child.frame(), Some(Frame::new(0.0, 0.0, 10.0, 10.0)));

        // A write below the root invalidates it
        child.set_text("changed");
        assert!(!root.is_layout_valid());
        assert!(!child.is_layout_valid());

        clear_dirty();
        child.request_layout();
        assert!(!root.is_layout_valid());
    }

    #[test]
    fn test_insets_default_to_zero() {
        setup();
        let view = make(ViewType::StackLayout, None);
        assert_eq!(view.get_safe_area_insets(), Insets::ZERO);
        assert!(view.frame().is_none());
    }

    #[test]
    fn test_display() {
        setup();
        let named = make(ViewType::DockLayout, Some("dock"));
        let anonymous = make(ViewType::Label, None);
        assert_eq!(named.to_string(), "DockLayout<dock>");
        assert_eq!(anonymous.to_string(), format!("Label({})", anonymous.index()));
    }
}
