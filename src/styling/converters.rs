//! Style value converters.
//!
//! Turn raw style-sheet / XML attribute tokens into typed values.
//!
//! # Example
//!
//! ```
//! use safe_layout::styling::{animation_timing_function_converter, time_converter, AnimationCurve};
//!
//! assert_eq!(time_converter("300ms"), 300.0);
//! assert_eq!(time_converter("0.3"), 300.0);
//!
//! let curve = animation_timing_function_converter(Some("ease-in")).unwrap();
//! assert_eq!(curve, AnimationCurve::EaseIn);
//! ```

use crate::error::StyleError;
use crate::types::{Dimension, Dock, HorizontalAlignment, ItemSpec, Orientation, VerticalAlignment, Visibility};

use super::animation_curve::{AnimationCurve, CubicBezier};

// =============================================================================
// NUMBER PARSING
// =============================================================================

/// Parse the longest numeric prefix of `value`, the way style sheets do.
///
/// Leading whitespace is skipped and trailing garbage is ignored, so
/// `"300ms"` parses as `300.0`. Returns NaN when no number is present.
pub fn parse_float(value: &str) -> f64 {
    let s = value.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }

    if s[end..].starts_with("Infinity") {
        return if s.starts_with('-') { f64::NEG_INFINITY } else { f64::INFINITY };
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }

    if digits == 0 {
        return f64::NAN;
    }

    // Exponent only counts when at least one digit follows it.
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().unwrap_or(f64::NAN)
}

/// Strictly parse a whole token as a number.
pub fn number_converter(value: &str) -> Result<f32, StyleError> {
    value
        .trim()
        .parse::<f32>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or_else(|| StyleError::InvalidNumber(value.to_string()))
}

// =============================================================================
// TIME
// =============================================================================

/// Convert a duration token to milliseconds.
///
/// A token ending in `ms` is already in milliseconds; anything else is read as
/// seconds. The result is clamped to be non-negative. Malformed tokens yield
/// NaN rather than an error.
pub fn time_converter(value: &str) -> f64 {
    let mut result = parse_float(value);
    if !value.trim_end().ends_with("ms") {
        result *= 1000.0;
    }

    if result.is_nan() {
        return result;
    }
    result.max(0.0)
}

// =============================================================================
// ANIMATION CURVE
// =============================================================================

const STYLE_CURVE_MAP: [(&str, AnimationCurve); 6] = [
    ("ease", AnimationCurve::Ease),
    ("linear", AnimationCurve::Linear),
    ("ease-in", AnimationCurve::EaseIn),
    ("ease-out", AnimationCurve::EaseOut),
    ("ease-in-out", AnimationCurve::EaseInOut),
    ("spring", AnimationCurve::Spring),
];

/// Convert an `animation-timing-function` token to a curve.
///
/// Absent or empty input yields [`AnimationCurve::Ease`]. Keywords resolve
/// through a fixed table; anything else must be `cubic-bezier(x1, y1, x2, y2)`.
pub fn animation_timing_function_converter(value: Option<&str>) -> Result<AnimationCurve, StyleError> {
    let Some(value) = value.filter(|v| !v.is_empty()) else {
        return Ok(AnimationCurve::Ease);
    };

    if let Some((_, curve)) = STYLE_CURVE_MAP.iter().find(|(key, _)| *key == value) {
        return Ok(*curve);
    }

    parse_cubic_bezier_curve(value)
}

fn parse_cubic_bezier_curve(value: &str) -> Result<AnimationCurve, StyleError> {
    let invalid = || StyleError::InvalidAnimationValue(value.to_string());

    if !value.starts_with("cubic-bezier") {
        return Err(invalid());
    }

    // First parenthesised group, up to the nearest closing paren on the same line.
    let open = value.find('(').ok_or_else(invalid)?;
    let close = value[open + 1..].find(')').ok_or_else(invalid)? + open + 1;
    let args = &value[open + 1..close];
    if args.contains('\n') {
        return Err(invalid());
    }

    let coords: Vec<f64> = args.split(',').map(string_to_bezier_coord).collect();
    match coords[..] {
        [x1, y1, x2, y2] if coords.iter().all(|c| !c.is_nan()) => {
            Ok(AnimationCurve::CubicBezier(CubicBezier::new(x1, y1, x2, y2)))
        }
        _ => Err(invalid()),
    }
}

fn string_to_bezier_coord(value: &str) -> f64 {
    let result = parse_float(value);
    if result < 0.0 {
        0.0
    } else if result > 1.0 {
        1.0
    } else {
        result
    }
}

// =============================================================================
// LENGTHS
// =============================================================================

/// Convert a length token to a [`Dimension`].
///
/// Accepts `auto`, `N`, `Ndip`, `Npx` (divided by `scale`) and `N%`.
pub fn length_converter(value: &str, scale: f32) -> Result<Dimension, StyleError> {
    let token = value.trim();
    let invalid = || StyleError::InvalidLength(value.to_string());

    if token.eq_ignore_ascii_case("auto") {
        return Ok(Dimension::Auto);
    }

    if let Some(number) = token.strip_suffix('%') {
        return number_converter(number).map(Dimension::Percent).map_err(|_| invalid());
    }

    if let Some(number) = token.strip_suffix("px") {
        let px = number_converter(number).map_err(|_| invalid())?;
        let scale = if scale > 0.0 { scale } else { 1.0 };
        return Ok(Dimension::Dip(px / scale));
    }

    let number = token.strip_suffix("dip").unwrap_or(token);
    number_converter(number).map(Dimension::Dip).map_err(|_| invalid())
}

/// Convert a CSS-style thickness shorthand to `[top, right, bottom, left]`.
///
/// One value applies to all edges, two to vertical/horizontal, three to
/// top/horizontal/bottom, four to each edge clockwise from the top.
pub fn thickness_converter(value: &str) -> Result<[f32; 4], StyleError> {
    let parts: Vec<f32> = value
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|p| !p.is_empty())
        .map(number_converter)
        .collect::<Result<_, _>>()?;

    match parts[..] {
        [all] => Ok([all, all, all, all]),
        [vertical, horizontal] => Ok([vertical, horizontal, vertical, horizontal]),
        [top, horizontal, bottom] => Ok([top, horizontal, bottom, horizontal]),
        [top, right, bottom, left] => Ok([top, right, bottom, left]),
        _ => Err(StyleError::InvalidLength(value.to_string())),
    }
}

// =============================================================================
// GRID
// =============================================================================

/// Convert a grid `rows` / `columns` definition such as `"*, 2*, auto, 100"`.
pub fn item_specs_converter(value: &str) -> Result<Vec<ItemSpec>, StyleError> {
    if value.trim().is_empty() {
        return Ok(Vec::new());
    }

    value
        .split(',')
        .map(|part| {
            let token = part.trim();
            let invalid = || StyleError::InvalidItemSpec(token.to_string());

            if token.eq_ignore_ascii_case("auto") {
                Ok(ItemSpec::Auto)
            } else if let Some(weight) = token.strip_suffix('*') {
                if weight.trim().is_empty() {
                    Ok(ItemSpec::Star(1.0))
                } else {
                    number_converter(weight)
                        .ok()
                        .filter(|w| *w >= 0.0)
                        .map(ItemSpec::Star)
                        .ok_or_else(invalid)
                }
            } else {
                number_converter(token)
                    .ok()
                    .filter(|px| *px >= 0.0)
                    .map(ItemSpec::Pixel)
                    .ok_or_else(invalid)
            }
        })
        .collect()
}

// =============================================================================
// KEYWORDS
// =============================================================================

fn keyword_error(kind: &'static str, value: &str) -> StyleError {
    StyleError::InvalidKeyword { kind, value: value.to_string() }
}

pub fn dock_converter(value: &str) -> Result<Dock, StyleError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "left" => Ok(Dock::Left),
        "top" => Ok(Dock::Top),
        "right" => Ok(Dock::Right),
        "bottom" => Ok(Dock::Bottom),
        _ => Err(keyword_error("dock", value)),
    }
}

pub fn orientation_converter(value: &str) -> Result<Orientation, StyleError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "vertical" => Ok(Orientation::Vertical),
        "horizontal" => Ok(Orientation::Horizontal),
        _ => Err(keyword_error("orientation", value)),
    }
}

pub fn horizontal_alignment_converter(value: &str) -> Result<HorizontalAlignment, StyleError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "stretch" => Ok(HorizontalAlignment::Stretch),
        "left" => Ok(HorizontalAlignment::Left),
        "center" => Ok(HorizontalAlignment::Center),
        "right" => Ok(HorizontalAlignment::Right),
        _ => Err(keyword_error("horizontalAlignment", value)),
    }
}

pub fn vertical_alignment_converter(value: &str) -> Result<VerticalAlignment, StyleError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "stretch" => Ok(VerticalAlignment::Stretch),
        "top" => Ok(VerticalAlignment::Top),
        "middle" | "center" => Ok(VerticalAlignment::Middle),
        "bottom" => Ok(VerticalAlignment::Bottom),
        _ => Err(keyword_error("verticalAlignment", value)),
    }
}

pub fn visibility_converter(value: &str) -> Result<Visibility, StyleError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "visible" => Ok(Visibility::Visible),
        "hidden" => Ok(Visibility::Hidden),
        "collapse" | "collapsed" => Ok(Visibility::Collapse),
        _ => Err(keyword_error("visibility", value)),
    }
}

pub fn bool_converter(value: &str) -> Result<bool, StyleError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(keyword_error("boolean", value)),
    }
}

/// Convert a non-negative integer token such as a grid row index.
pub fn index_converter(value: &str) -> Result<u16, StyleError> {
    value
        .trim()
        .parse::<u16>()
        .map_err(|_| StyleError::InvalidNumber(value.to_string()))
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // parse_float
    // =========================================================================

    #[test]
    fn test_parse_float_prefix() {
        assert_eq!(parse_float("300ms"), 300.0);
        assert_eq!(parse_float("  0.5s"), 0.5);
        assert_eq!(parse_float("-5"), -5.0);
        assert_eq!(parse_float(".25"), 0.25);
        assert_eq!(parse_float("1e3ms"), 1000.0);
        assert_eq!(parse_float("2e"), 2.0);
        assert_eq!(parse_float("3."), 3.0);
        assert_eq!(parse_float("+7x"), 7.0);
        assert_eq!(parse_float("-Infinity"), f64::NEG_INFINITY);
    }

    #[test]
    fn test_parse_float_nan() {
        assert!(parse_float("").is_nan());
        assert!(parse_float("ms").is_nan());
        assert!(parse_float(".").is_nan());
        assert!(parse_float("-").is_nan());
        assert!(parse_float("abc1").is_nan());
    }

    // =========================================================================
    // time_converter
    // =========================================================================

    #[test]
    fn test_time_converter() {
        assert_eq!(time_converter("300ms"), 300.0);
        assert_eq!(time_converter("0.3"), 300.0);
        assert_eq!(time_converter("0.3s"), 300.0);
        assert_eq!(time_converter("-5"), 0.0);
        assert_eq!(time_converter("0ms"), 0.0);
        assert_eq!(time_converter("-20ms"), 0.0);
        assert_eq!(time_converter("2"), 2000.0);
    }

    #[test]
    fn test_time_converter_unit_is_suffix() {
        // "ms" buried inside the token is not a unit.
        assert!(time_converter("comms").is_nan());
        assert_eq!(time_converter("1msx"), 1000.0);
        assert_eq!(time_converter("150ms "), 150.0);
    }

    #[test]
    fn test_time_converter_malformed_is_nan() {
        assert!(time_converter("fast").is_nan());
        assert!(time_converter("").is_nan());
    }

    // =========================================================================
    // animation_timing_function_converter
    // =========================================================================

    #[test]
    fn test_curve_keywords() {
        let cases = [
            ("ease", AnimationCurve::Ease),
            ("linear", AnimationCurve::Linear),
            ("ease-in", AnimationCurve::EaseIn),
            ("ease-out", AnimationCurve::EaseOut),
            ("ease-in-out", AnimationCurve::EaseInOut),
            ("spring", AnimationCurve::Spring),
        ];
        for (token, expected) in cases {
            assert_eq!(animation_timing_function_converter(Some(token)), Ok(expected), "{token}");
        }
    }

    #[test]
    fn test_curve_default() {
        assert_eq!(animation_timing_function_converter(None), Ok(AnimationCurve::Ease));
        assert_eq!(animation_timing_function_converter(Some("")), Ok(AnimationCurve::Ease));
    }

    #[test]
    fn test_curve_cubic_bezier() {
        let curve = animation_timing_function_converter(Some("cubic-bezier(0.1, 0.2, 0.3, 0.4)")).unwrap();
        assert_eq!(curve, AnimationCurve::CubicBezier(CubicBezier::new(0.1, 0.2, 0.3, 0.4)));
    }

    #[test]
    fn test_curve_cubic_bezier_clamped() {
        let curve = animation_timing_function_converter(Some("cubic-bezier(-1, 2, 0.5, 1.5)")).unwrap();
        assert_eq!(curve, AnimationCurve::CubicBezier(CubicBezier::new(0.0, 1.0, 0.5, 1.0)));
    }

    #[test]
    fn test_curve_invalid() {
        for token in [
            "bounce",
            "cubic-bezier(0.1, 0.2, 0.3)",
            "cubic-bezier(0.1, 0.2, 0.3, 0.4, 0.5)",
            "bezier(0.1, 0.2, 0.3, 0.4)",
            "cubic-bezier",
            "cubic-bezier(a, b, c, d)",
            "cubic-bezier(\n0, 0, 1, 1)",
            "cubic-bezier(0, 0,\n1, 1)",
            "EASE",
        ] {
            assert_eq!(
                animation_timing_function_converter(Some(token)),
                Err(StyleError::InvalidAnimationValue(token.to_string())),
                "{token}"
            );
        }
    }

    #[test]
    fn test_curve_error_message() {
        let err = animation_timing_function_converter(Some("wobble")).unwrap_err();
        assert_eq!(err.to_string(), "Invalid value for animation: wobble");
    }

    // =========================================================================
    // Lengths, thickness, grid
    // =========================================================================

    #[test]
    fn test_length_converter() {
        assert_eq!(length_converter("auto", 2.0), Ok(Dimension::Auto));
        assert_eq!(length_converter("100", 2.0), Ok(Dimension::Dip(100.0)));
        assert_eq!(length_converter("100dip", 2.0), Ok(Dimension::Dip(100.0)));
        assert_eq!(length_converter("100px", 2.0), Ok(Dimension::Dip(50.0)));
        assert_eq!(length_converter("50%", 2.0), Ok(Dimension::Percent(50.0)));
        assert!(length_converter("wide", 2.0).is_err());
        assert!(length_converter("%", 2.0).is_err());
    }

    #[test]
    fn test_thickness_converter() {
        assert_eq!(thickness_converter("4"), Ok([4.0; 4]));
        assert_eq!(thickness_converter("4 8"), Ok([4.0, 8.0, 4.0, 8.0]));
        assert_eq!(thickness_converter("1, 2, 3"), Ok([1.0, 2.0, 3.0, 2.0]));
        assert_eq!(thickness_converter("1 2 3 4"), Ok([1.0, 2.0, 3.0, 4.0]));
        assert!(thickness_converter("1 2 3 4 5").is_err());
        assert!(thickness_converter("").is_err());
    }

    #[test]
    fn test_item_specs_converter() {
        assert_eq!(
            item_specs_converter("*, 2*, auto, 100"),
            Ok(vec![ItemSpec::Star(1.0), ItemSpec::Star(2.0), ItemSpec::Auto, ItemSpec::Pixel(100.0)])
        );
        assert_eq!(item_specs_converter(""), Ok(vec![]));
        assert!(item_specs_converter("*, big").is_err());
        assert!(item_specs_converter("-1*").is_err());
    }

    #[test]
    fn test_keyword_converters() {
        assert_eq!(dock_converter("Left"), Ok(Dock::Left));
        assert_eq!(dock_converter("bottom"), Ok(Dock::Bottom));
        assert!(dock_converter("middle").is_err());
        assert_eq!(orientation_converter("horizontal"), Ok(Orientation::Horizontal));
        assert_eq!(vertical_alignment_converter("center"), Ok(VerticalAlignment::Middle));
        assert_eq!(horizontal_alignment_converter("right"), Ok(HorizontalAlignment::Right));
        assert_eq!(visibility_converter("collapse"), Ok(Visibility::Collapse));
        assert_eq!(bool_converter("TRUE"), Ok(true));
        assert!(bool_converter("yes").is_err());
        assert_eq!(index_converter("2"), Ok(2));
        assert!(index_converter("-1").is_err());
    }
}
