//! Layout Arrays
//!
//! Every property the layout pass reads, one tracked array per property:
//! - sizing: width, height, minWidth, minHeight
//! - spacing: margin and padding per edge
//! - alignment: horizontalAlignment, verticalAlignment
//! - absolute: left, top
//! - dock: dock, stretchLastChild
//! - stack: orientation
//! - grid: rows, columns, row, col, rowSpan, colSpan
//! - safe area: overflowSafeArea (`iosOverflowSafeArea` in markup)
//!
//! The arrays and their accessors are generated by `layout_properties!`;
//! each accessor pair has the same shape as the hand-written ones in `text`.

use spark_signals::{TrackedSlotArray, tracked_slot_array};

use crate::types::{Dimension, Dock, HorizontalAlignment, ItemSpec, Orientation, VerticalAlignment};
use super::dirty::LAYOUT_DIRTY_SET;
use super::ClearAll;

macro_rules! layout_properties {
    ($(
        $(#[$doc:meta])*
        $store:ident: $ty:ty = $default:expr => $get:ident / $set:ident;
    )*) => {
        thread_local! {
            $(
                $(#[$doc])*
                static $store: TrackedSlotArray<$ty> = tracked_slot_array(
                    Some($default),
                    LAYOUT_DIRTY_SET.with(|s| s.clone())
                );
            )*
        }

        /// Ensure arrays have capacity for the given index.
        pub fn ensure_capacity(index: usize) {
            $(
                $store.with(|arr| {
                    let _ = arr.peek(index);
                });
            )*
        }

        /// Clear values at index.
        pub fn clear_at_index(index: usize) {
            $( $store.with(|arr| arr.clear(index)); )*
        }

        /// Reset all arrays.
        pub fn reset() {
            $( $store.with(|arr| arr.clear_all()); )*
        }

        $(
            $(#[$doc])*
            pub fn $get(index: usize) -> $ty {
                $store.with(|arr| arr.get(index)).unwrap_or($default)
            }

            $(#[$doc])*
            pub fn $set(index: usize, value: $ty) {
                $store.with(|arr| arr.set_value(index, value));
            }
        )*
    };
}

// =============================================================================
// Arrays
// =============================================================================

layout_properties! {
    /// Requested width.
    WIDTH: Dimension = Dimension::Auto => get_width / set_width;
    /// Requested height.
    HEIGHT: Dimension = Dimension::Auto => get_height / set_height;
    /// Minimum width in dips.
    MIN_WIDTH: f32 = 0.0 => get_min_width / set_min_width;
    /// Minimum height in dips.
    MIN_HEIGHT: f32 = 0.0 => get_min_height / set_min_height;

    MARGIN_TOP: f32 = 0.0 => get_margin_top / set_margin_top;
    MARGIN_RIGHT: f32 = 0.0 => get_margin_right / set_margin_right;
    MARGIN_BOTTOM: f32 = 0.0 => get_margin_bottom / set_margin_bottom;
    MARGIN_LEFT: f32 = 0.0 => get_margin_left / set_margin_left;

    PADDING_TOP: f32 = 0.0 => get_padding_top / set_padding_top;
    PADDING_RIGHT: f32 = 0.0 => get_padding_right / set_padding_right;
    PADDING_BOTTOM: f32 = 0.0 => get_padding_bottom / set_padding_bottom;
    PADDING_LEFT: f32 = 0.0 => get_padding_left / set_padding_left;

    /// Placement inside the slot the parent hands out, horizontally.
    HORIZONTAL_ALIGNMENT: HorizontalAlignment = HorizontalAlignment::Stretch
        => get_horizontal_alignment / set_horizontal_alignment;
    /// Placement inside the slot the parent hands out, vertically.
    VERTICAL_ALIGNMENT: VerticalAlignment = VerticalAlignment::Stretch
        => get_vertical_alignment / set_vertical_alignment;

    /// Offset from the left edge of an absolute layout's content box.
    LEFT: f32 = 0.0 => get_left / set_left;
    /// Offset from the top edge of an absolute layout's content box.
    TOP: f32 = 0.0 => get_top / set_top;

    /// Edge a dock layout child attaches to.
    DOCK: Dock = Dock::Left => get_dock / set_dock;
    /// Whether a dock layout gives its last child all remaining space.
    STRETCH_LAST_CHILD: bool = true => get_stretch_last_child / set_stretch_last_child;

    /// Stack layout direction.
    ORIENTATION: Orientation = Orientation::Vertical => get_orientation / set_orientation;

    /// Grid row definitions; empty means a single star row.
    ROWS: Vec<ItemSpec> = Vec::new() => get_rows / set_rows;
    /// Grid column definitions; empty means a single star column.
    COLUMNS: Vec<ItemSpec> = Vec::new() => get_columns / set_columns;
    ROW: u16 = 0 => get_row / set_row;
    COL: u16 = 0 => get_col / set_col;
    ROW_SPAN: u16 = 1 => get_row_span / set_row_span;
    COL_SPAN: u16 = 1 => get_col_span / set_col_span;

    /// Whether a layout container may extend under the system bars.
    OVERFLOW_SAFE_AREA: bool = true => get_overflow_safe_area / set_overflow_safe_area;
}

// =============================================================================
// Grouped accessors
// =============================================================================

/// Margins as `[top, right, bottom, left]`.
pub fn get_margin(index: usize) -> [f32; 4] {
    [
        get_margin_top(index),
        get_margin_right(index),
        get_margin_bottom(index),
        get_margin_left(index),
    ]
}

/// Set all four margins from `[top, right, bottom, left]`.
pub fn set_margin(index: usize, [top, right, bottom, left]: [f32; 4]) {
    set_margin_top(index, top);
    set_margin_right(index, right);
    set_margin_bottom(index, bottom);
    set_margin_left(index, left);
}

/// Paddings as `[top, right, bottom, left]`.
pub fn get_padding(index: usize) -> [f32; 4] {
    [
        get_padding_top(index),
        get_padding_right(index),
        get_padding_bottom(index),
        get_padding_left(index),
    ]
}

/// Set all four paddings from `[top, right, bottom, left]`.
pub fn set_padding(index: usize, [top, right, bottom, left]: [f32; 4]) {
    set_padding_top(index, top);
    set_padding_right(index, right);
    set_padding_bottom(index, bottom);
    set_padding_left(index, left);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::arrays::dirty::{clear_dirty, is_dirty};

    fn setup() {
        reset();
        clear_dirty();
    }

    #[test]
    fn test_defaults() {
        setup();
        assert_eq!(get_width(3), Dimension::Auto);
        assert_eq!(get_row_span(3), 1);
        assert!(get_stretch_last_child(3));
        assert!(get_overflow_safe_area(3));
        assert!(get_rows(3).is_empty());
    }

    #[test]
    fn test_set_marks_dirty() {
        setup();
        ensure_capacity(2);
        clear_dirty();

        set_left(2, 25.0);
        assert_eq!(get_left(2), 25.0);
        assert!(is_dirty(2));
        assert!(!is_dirty(1));
    }

    #[test]
    fn test_grouped_margin() {
        setup();
        set_margin(0, [1.0, 2.0, 3.0, 4.0]);
        assert_eq!(get_margin_left(0), 4.0);
        assert_eq!(get_margin(0), [1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_clear_restores_default() {
        setup();
        set_dock(1, Dock::Bottom);
        clear_at_index(1);
        assert_eq!(get_dock(1), Dock::Left);
    }
}
