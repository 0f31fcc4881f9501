//! Animation curves.
//!
//! An [`AnimationCurve`] is what the style layer hands to the animation
//! system: either one of the named keyword curves or an explicit
//! [`CubicBezier`] timing function.

/// A CSS-style cubic-bezier timing function.
///
/// The curve starts at (0, 0) and ends at (1, 1); `(x1, y1)` and `(x2, y2)`
/// are the two inner control points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

const NEWTON_ITERATIONS: usize = 8;
const NEWTON_MIN_SLOPE: f64 = 1e-6;
const SOLVE_EPSILON: f64 = 1e-7;
const BISECTION_ITERATIONS: usize = 32;

impl CubicBezier {
    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    // Polynomial coefficients for one axis: B(s) = ((a*s + b)*s + c)*s
    #[inline]
    fn coefficients(p1: f64, p2: f64) -> (f64, f64, f64) {
        let c = 3.0 * p1;
        let b = 3.0 * (p2 - p1) - c;
        let a = 1.0 - c - b;
        (a, b, c)
    }

    #[inline]
    fn sample(p1: f64, p2: f64, s: f64) -> f64 {
        let (a, b, c) = Self::coefficients(p1, p2);
        ((a * s + b) * s + c) * s
    }

    #[inline]
    fn slope(p1: f64, p2: f64, s: f64) -> f64 {
        let (a, b, c) = Self::coefficients(p1, p2);
        (3.0 * a * s + 2.0 * b) * s + c
    }

    /// Find the curve parameter whose x coordinate equals `x`.
    fn parameter_for_x(&self, x: f64) -> f64 {
        // Newton-Raphson first; it converges in a few steps for most curves.
        let mut s = x;
        for _ in 0..NEWTON_ITERATIONS {
            let error = Self::sample(self.x1, self.x2, s) - x;
            if error.abs() < SOLVE_EPSILON {
                return s;
            }
            let d = Self::slope(self.x1, self.x2, s);
            if d.abs() < NEWTON_MIN_SLOPE {
                break;
            }
            s -= error / d;
        }

        // Flat regions: bisection always converges.
        let (mut lo, mut hi) = (0.0_f64, 1.0_f64);
        s = x;
        for _ in 0..BISECTION_ITERATIONS {
            let value = Self::sample(self.x1, self.x2, s);
            if (value - x).abs() < SOLVE_EPSILON {
                break;
            }
            if value < x {
                lo = s;
            } else {
                hi = s;
            }
            s = (lo + hi) / 2.0;
        }
        s
    }

    /// Eased progress for the time fraction `t` (clamped to [0, 1]).
    pub fn solve(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        if t == 0.0 || t == 1.0 {
            return t;
        }
        let s = self.parameter_for_x(t);
        Self::sample(self.y1, self.y2, s)
    }
}

/// A resolved animation timing function.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum AnimationCurve {
    #[default]
    Ease,
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
    /// Platform spring; has no bezier equivalent.
    Spring,
    CubicBezier(CubicBezier),
}

impl AnimationCurve {
    /// Control points for the curve, if it is bezier-shaped.
    pub fn to_cubic_bezier(&self) -> Option<CubicBezier> {
        match self {
            Self::Ease => Some(CubicBezier::new(0.25, 0.1, 0.25, 1.0)),
            Self::Linear => Some(CubicBezier::new(0.0, 0.0, 1.0, 1.0)),
            Self::EaseIn => Some(CubicBezier::new(0.42, 0.0, 1.0, 1.0)),
            Self::EaseOut => Some(CubicBezier::new(0.0, 0.0, 0.58, 1.0)),
            Self::EaseInOut => Some(CubicBezier::new(0.42, 0.0, 0.58, 1.0)),
            Self::Spring => None,
            Self::CubicBezier(bezier) => Some(*bezier),
        }
    }

    /// Eased progress at `t`, or `None` for curves the platform drives itself.
    pub fn progress(&self, t: f64) -> Option<f64> {
        self.to_cubic_bezier().map(|bezier| bezier.solve(t))
    }
}
