//! Transition timing functions
//!
//! Mirrors the CSS `transition-timing-function` values a compositor
//! understands: `linear` and `cubic-bezier(x1, y1, x2, y2)`.

/// Timing function of a transition
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Easing {
    #[default]
    Linear,
    /// CSS `cubic-bezier(x1, y1, x2, y2)`; x values must lie in `[0, 1]`
    CubicBezier(f32, f32, f32, f32),
}

impl Easing {
    /// `cubic-bezier(0, 0, 0.25, 1)`: fast start, long soft landing.
    /// Used for momentum flings and scrollbar movement.
    pub const DECELERATE: Easing = Easing::CubicBezier(0.0, 0.0, 0.25, 1.0);

    /// Eased progress for a linear progress `t` in `[0, 1]`
    pub fn apply(&self, t: f32) -> f32 {
        match *self {
            Easing::Linear => t.clamp(0.0, 1.0),
            Easing::CubicBezier(x1, y1, x2, y2) => {
                if t <= 0.0 {
                    0.0
                } else if t >= 1.0 {
                    1.0
                } else {
                    BezierCurve::new(x1, y1, x2, y2).solve(t as f64) as f32
                }
            }
        }
    }
}

/// One coordinate of a bezier running from 0 to 1, in polynomial form
#[derive(Clone, Copy)]
struct Polynomial {
    a: f64,
    b: f64,
    c: f64,
}

impl Polynomial {
    fn new(p1: f32, p2: f32) -> Self {
        let (p1, p2) = (p1 as f64, p2 as f64);
        let c = 3.0 * p1;
        let b = 3.0 * (p2 - p1) - c;
        Self {
            a: 1.0 - c - b,
            b,
            c,
        }
    }

    fn sample(&self, s: f64) -> f64 {
        ((self.a * s + self.b) * s + self.c) * s
    }

    fn derivative(&self, s: f64) -> f64 {
        (3.0 * self.a * s + 2.0 * self.b) * s + self.c
    }
}

/// Curve through (0,0), (x1,y1), (x2,y2), (1,1)
///
/// Computed in f64 so long transitions don't jitter near the end.
struct BezierCurve {
    x: Polynomial,
    y: Polynomial,
}

impl BezierCurve {
    const EPSILON: f64 = 1e-7;

    fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self {
            x: Polynomial::new(x1, x2),
            y: Polynomial::new(y1, y2),
        }
    }

    /// y at the curve parameter whose x equals `x`
    fn solve(&self, x: f64) -> f64 {
        self.y.sample(self.parameter_for(x))
    }

    fn parameter_for(&self, x: f64) -> f64 {
        // Newton-Raphson converges in a few steps for well-behaved curves
        let mut s = x;
        for _ in 0..8 {
            let err = self.x.sample(s) - x;
            if err.abs() < Self::EPSILON {
                return s;
            }
            let slope = self.x.derivative(s);
            if slope.abs() < Self::EPSILON {
                break;
            }
            s -= err / slope;
        }

        // Flat spots: fall back to bisection
        let (mut lo, mut hi) = (0.0_f64, 1.0_f64);
        s = x;
        for _ in 0..30 {
            let value = self.x.sample(s);
            if (value - x).abs() < Self::EPSILON {
                break;
            }
            if value < x {
                lo = s;
            } else {
                hi = s;
            }
            s = (lo + hi) * 0.5;
        }
        s
    }
}
