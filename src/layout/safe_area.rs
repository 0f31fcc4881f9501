//! Safe Area
//!
//! Roots are laid out inside the safe area. This pass then grows every
//! layout container that sits flush against a safe-area edge out to the
//! matching screen edge, so backgrounds reach under the system bars while
//! content stays clear of them.
//!
//! Rules:
//! - Only layout containers with `overflowSafeArea` set grow; leaves never move.
//! - A container grows on an edge only if its parent reaches the screen on
//!   that edge, so a non-overflowing ancestor stops the growth below it.
//! - Growth targets the screen edge, never "parent edge plus inset", so the
//!   insets apply once however deep the nesting.
//! - The amount grown on each edge is what the view reports as its
//!   safe-area insets.

use tracing::trace;

use crate::engine::arrays::{core, layout as props};
use crate::types::{Edges, Frame, Insets};

use super::types::{ComputedLayout, Viewport};

/// Tolerance for "edge coincides with edge", in dips.
pub const EDGE_EPSILON: f32 = 0.01;

#[inline]
fn near(a: f32, b: f32) -> bool {
    (a - b).abs() <= EDGE_EPSILON
}

/// Grow the containers of the tree rooted at `root` into the unsafe area.
///
/// Does nothing for viewports that do not expand to the screen (legacy
/// layout-guide devices, or devices without insets).
pub fn apply_safe_area(layout: &mut ComputedLayout, root: usize, viewport: &Viewport) {
    if !viewport.expand_to_screen {
        return;
    }
    expand(layout, root, Edges::ALL, viewport);
}

fn can_overflow(idx: usize) -> bool {
    core::get_view_type(idx).is_layout() && props::get_overflow_safe_area(idx)
}

fn expand(layout: &mut ComputedLayout, idx: usize, parent_reach: Edges, viewport: &Viewport) {
    let Some(frame) = layout.frame(idx) else {
        return;
    };

    let content = viewport.content;
    let screen = viewport.screen;
    let (mut left, mut top, mut right, mut bottom) =
        (frame.left, frame.top, frame.right(), frame.bottom());

    if can_overflow(idx) {
        if parent_reach.contains(Edges::LEFT) && near(left, content.left) {
            left = screen.left;
        }
        if parent_reach.contains(Edges::TOP) && near(top, content.top) {
            top = screen.top;
        }
        if parent_reach.contains(Edges::RIGHT) && near(right, content.right()) {
            right = screen.right();
        }
        if parent_reach.contains(Edges::BOTTOM) && near(bottom, content.bottom()) {
            bottom = screen.bottom();
        }

        let insets = Insets::new(
            frame.left - left,
            frame.top - top,
            right - frame.right(),
            bottom - frame.bottom(),
        );
        if !insets.is_zero() {
            trace!(view = idx, ?insets, "expanded into unsafe area");
            layout.set_frame(idx, Frame::from_edges(left, top, right, bottom));
            layout.set_insets(idx, insets);
        }
    }

    let mut reach = Edges::NONE;
    if near(left, screen.left) {
        reach |= Edges::LEFT;
    }
    if near(top, screen.top) {
        reach |= Edges::TOP;
    }
    if near(right, screen.right()) {
        reach |= Edges::RIGHT;
    }
    if near(bottom, screen.bottom()) {
        reach |= Edges::BOTTOM;
    }

    for child in core::get_children(idx) {
        expand(layout, child, reach, viewport);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{allocate_index, pop_parent_context, push_parent_context, reset_registry};
    use crate::types::ViewType;

    fn setup() -> Viewport {
        reset_registry();
        Viewport::with_safe_area(375.0, 812.0, Insets::new(0.0, 44.0, 0.0, 34.0))
    }

    fn view(view_type: ViewType) -> usize {
        let idx = allocate_index(None);
        core::set_view_type(idx, view_type);
        idx
    }

    #[test]
    fn test_root_grows_to_screen() {
        let viewport = setup();
        let root = view(ViewType::GridLayout);

        let mut layout = ComputedLayout::new();
        layout.set_frame(root, viewport.content);
        apply_safe_area(&mut layout, root, &viewport);

        assert_eq!(layout.frame(root), Some(viewport.screen));
        assert_eq!(layout.insets(root), Insets::new(0.0, 44.0, 0.0, 34.0));
    }

    #[test]
    fn test_leaves_keep_their_frames() {
        let viewport = setup();
        let root = view(ViewType::StackLayout);
        push_parent_context(root);
        let leaf = view(ViewType::Label);
        pop_parent_context();

        let leaf_frame = Frame::new(0.0, 44.0, 375.0, 20.0);
        let mut layout = ComputedLayout::new();
        layout.set_frame(root, viewport.content);
        layout.set_frame(leaf, leaf_frame);
        apply_safe_area(&mut layout, root, &viewport);

        assert_eq!(layout.frame(leaf), Some(leaf_frame));
        assert!(layout.insets(leaf).is_zero());
    }

    #[test]
    fn test_nested_containers_grow_only_on_flush_edges() {
        let viewport = setup();
        let root = view(ViewType::StackLayout);
        push_parent_context(root);
        let first = view(ViewType::StackLayout);
        let second = view(ViewType::StackLayout);
        pop_parent_context();

        let mut layout = ComputedLayout::new();
        layout.set_frame(root, viewport.content);
        layout.set_frame(first, Frame::new(0.0, 44.0, 375.0, 100.0));
        layout.set_frame(second, Frame::new(0.0, 144.0, 375.0, 100.0));
        apply_safe_area(&mut layout, root, &viewport);

        assert_eq!(layout.frame(first), Some(Frame::new(0.0, 0.0, 375.0, 144.0)));
        assert_eq!(layout.insets(first), Insets::new(0.0, 44.0, 0.0, 0.0));
        assert_eq!(layout.frame(second), Some(Frame::new(0.0, 144.0, 375.0, 100.0)));
    }

    #[test]
    fn test_non_overflowing_parent_stops_growth() {
        let viewport = setup();
        let root = view(ViewType::StackLayout);
        props::set_overflow_safe_area(root, false);
        push_parent_context(root);
        let child = view(ViewType::StackLayout);
        pop_parent_context();

        let mut layout = ComputedLayout::new();
        layout.set_frame(root, viewport.content);
        layout.set_frame(child, Frame::new(0.0, 44.0, 375.0, 100.0));
        apply_safe_area(&mut layout, root, &viewport);

        assert_eq!(layout.frame(root), Some(viewport.content));
        assert_eq!(layout.frame(child), Some(Frame::new(0.0, 44.0, 375.0, 100.0)));
    }

    #[test]
    fn test_legacy_viewport_is_untouched() {
        reset_registry();
        let root = view(ViewType::StackLayout);
        let mut viewport = Viewport::full_screen(375.0, 667.0);
        viewport.content = Frame::from_edges(0.0, 20.0, 375.0, 667.0);

        let mut layout = ComputedLayout::new();
        layout.set_frame(root, viewport.content);
        apply_safe_area(&mut layout, root, &viewport);

        assert_eq!(layout.frame(root), Some(viewport.content));
    }
}
