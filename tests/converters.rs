//! Properties of the style converters.

use proptest::prelude::*;
use safe_layout::styling::{animation_timing_function_converter, time_converter};
use safe_layout::{AnimationCurve, StyleError};

// ── Strategies ───────────────────────────────────────────────────────

fn arb_keyword() -> impl Strategy<Value = (&'static str, AnimationCurve)> {
    prop_oneof![
        Just(("ease", AnimationCurve::Ease)),
        Just(("linear", AnimationCurve::Linear)),
        Just(("ease-in", AnimationCurve::EaseIn)),
        Just(("ease-out", AnimationCurve::EaseOut)),
        Just(("ease-in-out", AnimationCurve::EaseInOut)),
        Just(("spring", AnimationCurve::Spring)),
    ]
}

fn arb_coord() -> impl Strategy<Value = f64> {
    -10.0f64..10.0
}

// ── Properties ───────────────────────────────────────────────────────

proptest! {
    #[test]
    fn keywords_resolve_through_the_table((keyword, curve) in arb_keyword()) {
        prop_assert_eq!(animation_timing_function_converter(Some(keyword)), Ok(curve));
    }

    #[test]
    fn bezier_components_are_clamped(
        x1 in arb_coord(), y1 in arb_coord(), x2 in arb_coord(), y2 in arb_coord()
    ) {
        let input = format!("cubic-bezier({x1}, {y1}, {x2}, {y2})");
        let curve = animation_timing_function_converter(Some(&input)).unwrap();
        let AnimationCurve::CubicBezier(bezier) = curve else {
            panic!("expected a bezier for {input}");
        };

        for (component, raw) in [(bezier.x1, x1), (bezier.y1, y1), (bezier.x2, x2), (bezier.y2, y2)] {
            prop_assert!((0.0..=1.0).contains(&component));
            prop_assert!((component - raw.clamp(0.0, 1.0)).abs() < 1e-9);
        }
    }

    #[test]
    fn wrong_arity_is_rejected(coords in proptest::collection::vec(0.0f64..1.0, 0..8)) {
        prop_assume!(coords.len() != 4);
        let args: Vec<String> = coords.iter().map(f64::to_string).collect();
        let input = format!("cubic-bezier({})", args.join(", "));
        prop_assert_eq!(
            animation_timing_function_converter(Some(&input)),
            Err(StyleError::InvalidAnimationValue(input.clone()))
        );
    }

    #[test]
    fn times_are_never_negative(value in -1.0e6f64..1.0e6, millis in any::<bool>()) {
        let input = if millis { format!("{value}ms") } else { value.to_string() };
        let ms = time_converter(&input);
        prop_assert!(ms >= 0.0, "{input} -> {ms}");
    }

    #[test]
    fn seconds_become_milliseconds(seconds in 0.0f64..1000.0) {
        let ms = time_converter(&seconds.to_string());
        prop_assert!((ms - seconds * 1000.0).abs() < 1e-6 * seconds.max(1.0) * 1000.0);
    }
}

#[test]
fn documented_time_values() {
    assert_eq!(time_converter("300ms"), 300.0);
    assert_eq!(time_converter("0.3"), 300.0);
    assert_eq!(time_converter("-5"), 0.0);
    assert_eq!(time_converter("0ms"), 0.0);
    assert!(time_converter("fast").is_nan());
}

#[test]
fn absent_or_empty_curve_is_ease() {
    assert_eq!(animation_timing_function_converter(None), Ok(AnimationCurve::Ease));
    assert_eq!(animation_timing_function_converter(Some("")), Ok(AnimationCurve::Ease));
}

#[test]
fn unknown_curve_keeps_original_input() {
    let err = animation_timing_function_converter(Some("bounce")).unwrap_err();
    assert_eq!(err.to_string(), "Invalid value for animation: bounce");
}
