//! Geometry accessors in dips.
//!
//! All read the frame committed by the last layout pass. A view without a
//! frame reads as NaN, which fails every comparison.

use crate::types::Frame;
use crate::view::View;

fn frame_or_nan(view: &View) -> Frame {
    view.frame()
        .unwrap_or(Frame::new(f32::NAN, f32::NAN, f32::NAN, f32::NAN))
}

pub fn left(view: &View) -> f32 {
    frame_or_nan(view).left
}

pub fn top(view: &View) -> f32 {
    frame_or_nan(view).top
}

pub fn right(view: &View) -> f32 {
    frame_or_nan(view).right()
}

pub fn bottom(view: &View) -> f32 {
    frame_or_nan(view).bottom()
}

pub fn width(view: &View) -> f32 {
    frame_or_nan(view).width
}

pub fn height(view: &View) -> f32 {
    frame_or_nan(view).height
}
