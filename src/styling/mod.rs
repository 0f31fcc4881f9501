//! Styling - typed values from style tokens.
//!
//! - [`converters`] - string token → typed value (time, curves, lengths, grid specs, keywords)
//! - [`animation_curve`] - keyword and cubic-bezier timing functions

pub mod animation_curve;
pub mod converters;

pub use animation_curve::{AnimationCurve, CubicBezier};
pub use converters::{
    animation_timing_function_converter, bool_converter, dock_converter,
    horizontal_alignment_converter, index_converter, item_specs_converter, length_converter,
    number_converter, orientation_converter, parse_float, thickness_converter, time_converter,
    vertical_alignment_converter, visibility_converter,
};
