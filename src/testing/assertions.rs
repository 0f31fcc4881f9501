//! Comparison primitives for layout assertions.
//!
//! `equal` allows float noise from the layout pass; `close_enough` allows a
//! whole dip. The relational checks take the views in reading order:
//! `is_below_with(a, b, d)` holds when `b` starts `d` below the top of `a`.

use std::fmt::Display;

use thiserror::Error;

use crate::view::View;
use super::geometry::{bottom, height, left, right, top, width};

/// Tolerance of `equal`.
pub const EQUAL_EPSILON: f32 = 1e-3;

/// Tolerance of `close_enough`.
pub const CLOSE_ENOUGH_EPSILON: f32 = 1.0;

/// A geometric relationship did not hold.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AssertionError {
    #[error("{label} - actual: {actual} expected: {expected}")]
    Mismatch { label: String, expected: f32, actual: f32 },

    #[error("{label} - both are {value}")]
    Unexpected { label: String, value: f32 },

    #[error("{0}")]
    Check(String),
}

pub type AssertionResult = Result<(), AssertionError>;

fn within(actual: f32, expected: f32, epsilon: f32) -> bool {
    (actual - expected).abs() <= epsilon
}

pub fn equal(actual: f32, expected: f32, label: impl Display) -> AssertionResult {
    if within(actual, expected, EQUAL_EPSILON) {
        Ok(())
    } else {
        Err(AssertionError::Mismatch { label: label.to_string(), expected, actual })
    }
}

pub fn close_enough(actual: f32, expected: f32, label: impl Display) -> AssertionResult {
    if within(actual, expected, CLOSE_ENOUGH_EPSILON) {
        Ok(())
    } else {
        Err(AssertionError::Mismatch { label: label.to_string(), expected, actual })
    }
}

pub fn not_equal(actual: f32, other: f32, label: impl Display) -> AssertionResult {
    if within(actual, other, EQUAL_EPSILON) {
        Err(AssertionError::Unexpected { label: label.to_string(), value: actual })
    } else {
        Ok(())
    }
}

/// `actual` is at most `bound`, allowing `EQUAL_EPSILON` of float noise.
pub fn less_or_equal(actual: f32, bound: f32, label: impl Display) -> AssertionResult {
    check(
        actual <= bound + EQUAL_EPSILON,
        format_args!("{label}<{actual}> not less or equal {bound}"),
    )
}

/// `actual` is at least `bound`, allowing `EQUAL_EPSILON` of float noise.
pub fn greater_or_equal(actual: f32, bound: f32, label: impl Display) -> AssertionResult {
    check(
        actual + EQUAL_EPSILON >= bound,
        format_args!("{label}<{actual}> not greater or equal {bound}"),
    )
}

pub fn check(condition: bool, message: impl Display) -> AssertionResult {
    if condition {
        Ok(())
    } else {
        Err(AssertionError::Check(message.to_string()))
    }
}

// =============================================================================
// Sizes
// =============================================================================

pub fn height_equal(view1: &View, view2: &View) -> AssertionResult {
    equal(height(view2), height(view1), format!("{view2}.height vs {view1}.height"))
}

pub fn width_equal(view1: &View, view2: &View) -> AssertionResult {
    equal(width(view2), width(view1), format!("{view2}.width vs {view1}.width"))
}

// =============================================================================
// Edge alignment
// =============================================================================

pub fn is_left_aligned_with(view1: &View, view2: &View) -> AssertionResult {
    equal(left(view2), left(view1), format!("{view2}.left vs {view1}.left"))
}

pub fn is_right_aligned_with(view1: &View, view2: &View) -> AssertionResult {
    equal(right(view2), right(view1), format!("{view2}.right vs {view1}.right"))
}

pub fn is_top_aligned_with(view1: &View, view2: &View) -> AssertionResult {
    equal(top(view2), top(view1), format!("{view2}.top vs {view1}.top"))
}

pub fn is_bottom_aligned_with(view1: &View, view2: &View) -> AssertionResult {
    equal(bottom(view2), bottom(view1), format!("{view2}.bottom vs {view1}.bottom"))
}

// =============================================================================
// Ordering
// =============================================================================

/// `view1` ends at or before `view2` starts, horizontally.
pub fn is_left_of(view1: &View, view2: &View) -> AssertionResult {
    check(
        right(view1) <= left(view2) + EQUAL_EPSILON,
        format!("{view1}.right<{}> is not left of {view2}.left<{}>", right(view1), left(view2)),
    )
}

/// `view1` starts at or after `view2` ends, horizontally.
pub fn is_right_of(view1: &View, view2: &View) -> AssertionResult {
    check(
        left(view1) + EQUAL_EPSILON >= right(view2),
        format!("{view1}.left<{}> is not right of {view2}.right<{}>", left(view1), right(view2)),
    )
}

/// `view1` ends at or before `view2` starts, vertically.
pub fn is_above(view1: &View, view2: &View) -> AssertionResult {
    check(
        bottom(view1) <= top(view2) + EQUAL_EPSILON,
        format!("{view1}.bottom<{}> is not above {view2}.top<{}>", bottom(view1), top(view2)),
    )
}

/// `view1` starts at or after `view2` ends, vertically.
pub fn is_below(view1: &View, view2: &View) -> AssertionResult {
    check(
        top(view1) + EQUAL_EPSILON >= bottom(view2),
        format!("{view1}.top<{}> is not below {view2}.bottom<{}>", top(view1), bottom(view2)),
    )
}

// =============================================================================
// Offsets
// =============================================================================

/// `view2.left - view1.left == distance`
pub fn is_left_with(view1: &View, view2: &View, distance: f32) -> AssertionResult {
    equal(left(view2) - left(view1), distance, format!("{view2}.left - {view1}.left"))
}

/// `view2.top - view1.top == distance`
pub fn is_below_with(view1: &View, view2: &View, distance: f32) -> AssertionResult {
    equal(top(view2) - top(view1), distance, format!("{view2}.top - {view1}.top"))
}

/// `view2.right - view1.right == distance`
pub fn is_right_with(view1: &View, view2: &View, distance: f32) -> AssertionResult {
    equal(right(view2) - right(view1), distance, format!("{view2}.right - {view1}.right"))
}

/// `view2.bottom - view1.bottom == distance`
pub fn is_above_with(view1: &View, view2: &View, distance: f32) -> AssertionResult {
    equal(bottom(view2) - bottom(view1), distance, format!("{view2}.bottom - {view1}.bottom"))
}

// =============================================================================
// Tests
// =============================================================================
