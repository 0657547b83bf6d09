//! Segmented log-domain spline tone curves.
//!
//! Both ACES tone curves are piecewise quadratic B-splines in `log10`
//! space: a low segment between the min and mid anchors, a high segment
//! between the mid and max anchors, and straight-line extensions outside
//! `[min.x, max.x]`.
//!
//! ```text
//!  log10 y
//!     |                    high segment ______ high extension
//!     |                 ___/
//!     |          mid __/
//!     |       ___/
//!     |  ____/ low segment
//!     |_/ low extension
//!     +------------------------------------ log10 x
//!       min.x        mid.x           max.x
//! ```
//!
//! - [`SplineParams5`]: 6 coefficients per segment (4 knots), the fixed RRT curve
//! - [`SplineParams9`]: 10 coefficients per segment (8 knots), the ODT curves
//!
//! Region boundaries are half-open on purpose: `x == min.x` takes the low
//! extension, `x == mid.x` takes the high segment, `x == max.x` takes the high
//! extension.

use serde::{Deserialize, Serialize};

/// Uniform quadratic B-spline basis, applied as `coefs * M`.
pub(crate) const BASIS: [[f32; 3]; 3] = [[0.5, -1.0, 0.5], [-1.0, 1.0, 0.5], [0.5, 0.0, 0.0]];

/// Inverse of [`BASIS`]: turns polynomial coefficients back into control points.
pub(crate) const BASIS_INV: [[f32; 3]; 3] = [[0.0, 0.0, 2.0], [-0.5, 0.5, 1.5], [1.0, 1.0, 1.0]];

/// Input substituted for non-positive values on the RRT curve.
pub const RRT_LOG_EPSILON: f32 = 1.0 / 16384.0;

/// Input substituted for non-positive values on ODT curves.
pub const ODT_LOG_EPSILON: f32 = 1e-4;

/// Row vector times 3x3 matrix.
#[inline]
pub(crate) fn mul_row(v: [f32; 3], m: &[[f32; 3]; 3]) -> [f32; 3] {
    [
        v[0] * m[0][0] + v[1] * m[1][0] + v[2] * m[2][0],
        v[0] * m[0][1] + v[1] * m[1][1] + v[2] * m[2][1],
        v[0] * m[0][2] + v[1] * m[1][2] + v[2] * m[2][2],
    ]
}

/// Three consecutive control points starting at `j`.
#[inline]
pub(crate) fn window<const C: usize>(coefs: &[f32; C], j: usize) -> [f32; 3] {
    [coefs[j], coefs[j + 1], coefs[j + 2]]
}

/// Writes three control points back starting at `j`.
#[inline]
pub(crate) fn set_window<const C: usize>(coefs: &mut [f32; C], j: usize, v: [f32; 3]) {
    coefs[j..j + 3].copy_from_slice(&v);
}

/// Anchor point: linear input luminance `x` mapped to output luminance `y`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2 {
    /// Input luminance
    pub x: f32,
    /// Output luminance
    pub y: f32,
}

impl Point2 {
    /// Creates a point.
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// 5-knot segmented spline (the RRT tone scale).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplineParams5 {
    /// Low segment control points, log10 output
    pub coefs_low: [f32; 6],
    /// High segment control points, log10 output
    pub coefs_high: [f32; 6],
    /// Start of the low segment
    pub min_point: Point2,
    /// Junction of the two segments
    pub mid_point: Point2,
    /// End of the high segment
    pub max_point: Point2,
    /// Log-log slope below `min_point`
    pub slope_low: f32,
    /// Log-log slope above `max_point`
    pub slope_high: f32,
}

/// The RRT tone scale: 18 stops below and above mid grey, 1e-4 to 1e4 out.
pub const RRT_CURVE: SplineParams5 = SplineParams5 {
    coefs_low: [-4.0, -4.0, -3.157_376_6, -0.485_249_98, 1.847_732_5, 1.847_732_5],
    coefs_high: [-0.718_548_24, 2.081_030_8, 3.668_124_2, 4.0, 4.0, 4.0],
    min_point: Point2::new(0.18 / 32768.0, 0.0001),
    mid_point: Point2::new(0.18, 4.8),
    max_point: Point2::new(0.18 * 262_144.0, 10000.0),
    slope_low: 0.0,
    slope_high: 0.0,
};

impl SplineParams5 {
    /// Evaluates the curve at linear `x`.
    #[inline]
    pub fn eval(&self, x: f32) -> f32 {
        eval_segments(
            x,
            RRT_LOG_EPSILON,
            &self.coefs_low,
            &self.coefs_high,
            [self.min_point, self.mid_point, self.max_point],
            [self.slope_low, self.slope_high],
        )
    }
}

/// Evaluates the RRT tone scale.
///
/// ```rust
/// use odt_tonemap::rrt_spline;
///
/// assert!((rrt_spline(0.18) - 4.8).abs() < 1e-3);
/// ```
#[inline]
pub fn rrt_spline(x: f32) -> f32 {
    RRT_CURVE.eval(x)
}

/// 9-knot segmented spline (an ODT tone curve).
///
/// Either one of the four reference tables or the output of
/// [`adapt_spline`](crate::adapt_spline). Immutable once built.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SplineParams9 {
    /// Low segment control points, log10 output
    pub coefs_low: [f32; 10],
    /// High segment control points, log10 output
    pub coefs_high: [f32; 10],
    /// Start of the low segment
    pub min_point: Point2,
    /// Junction of the two segments
    pub mid_point: Point2,
    /// End of the high segment
    pub max_point: Point2,
    /// Log-log slope below `min_point`
    pub slope_low: f32,
    /// Log-log slope above `max_point`
    pub slope_high: f32,
    /// Scene-linear exposure range (before the RRT) the curve was built for
    pub limits: Point2,
}

impl SplineParams9 {
    /// Evaluates the curve at `x`, an RRT output luminance.
    #[inline]
    pub fn eval(&self, x: f32) -> f32 {
        eval_segments(
            x,
            ODT_LOG_EPSILON,
            &self.coefs_low,
            &self.coefs_high,
            [self.min_point, self.mid_point, self.max_point],
            [self.slope_low, self.slope_high],
        )
    }

    /// Output luminance range `(min.y, max.y)` the curve spans.
    #[inline]
    pub fn cinema_limits(&self) -> (f32, f32) {
        (self.min_point.y, self.max_point.y)
    }

    /// Coefficients packed as ten `(low, high, 0, 0)` quads for GPU constant buffers.
    pub fn to_constants(&self) -> [f32; 40] {
        let mut out = [0.0; 40];
        for (i, quad) in out.chunks_exact_mut(4).enumerate() {
            quad[0] = self.coefs_low[i];
            quad[1] = self.coefs_high[i];
        }
        out
    }
}

/// Shared evaluator for both spline families.
///
/// `C` is the coefficient count; the knot span of each segment is `C - 3`.
fn eval_segments<const C: usize>(
    x: f32,
    log_epsilon: f32,
    coefs_low: &[f32; C],
    coefs_high: &[f32; C],
    [min, mid, max]: [Point2; 3],
    [slope_low, slope_high]: [f32; 2],
) -> f32 {
    let span = (C - 3) as f32;
    let x = if x <= 0.0 { log_epsilon } else { x };
    let log_x = x.log10();

    let log_min = min.x.log10();
    let log_mid = mid.x.log10();
    let log_max = max.x.log10();

    let log_y = if log_x <= log_min {
        log_x * slope_low + (min.y.log10() - slope_low * log_min)
    } else if log_x < log_mid {
        let knot = span * (log_x - log_min) / (log_mid - log_min);
        quadratic(coefs_low, knot)
    } else if log_x < log_max {
        let knot = span * (log_x - log_mid) / (log_max - log_mid);
        quadratic(coefs_high, knot)
    } else {
        log_x * slope_high + (max.y.log10() - slope_high * log_max)
    };

    10f32.powf(log_y)
}

#[inline]
fn quadratic<const C: usize>(coefs: &[f32; C], knot: f32) -> f32 {
    // Clamped so rounding at the segment end cannot index past the table.
    let j = (knot.max(0.0) as usize).min(C - 3);
    let t = knot - j as f32;
    let b = mul_row(window(coefs, j), &BASIS);
    t * t * b[0] + t * b[1] + b[2]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rrt_mid_grey() {
        assert!((rrt_spline(0.18) - 4.8).abs() < 1e-3);
    }

    #[test]
    fn test_rrt_reference_values() {
        let cases = [(1.0, 54.0135), (0.01, 0.0414597), (100.0, 3387.006)];
        for (x, y) in cases {
            let got = rrt_spline(x);
            assert!((got - y).abs() / y < 1e-4, "x={x}: {got} vs {y}");
        }
    }

    #[test]
    fn test_rrt_extensions_are_flat() {
        // Both slopes are zero: the curve saturates at the anchor outputs.
        assert!((rrt_spline(1e-7) - 1e-4).abs() < 1e-8);
        assert!((rrt_spline(1e6) - 1e4).abs() < 0.5);
        assert_eq!(rrt_spline(0.0), rrt_spline(-3.0));
    }

    #[test]
    fn test_rrt_monotonic() {
        let mut prev = 0.0;
        let mut x = 1e-6f32;
        while x < 1e5 {
            let y = rrt_spline(x);
            assert!(y >= prev * (1.0 - 1e-5), "dip at x={x}");
            prev = y;
            x *= 1.05;
        }
    }

    #[test]
    fn test_to_constants_layout() {
        let mut c = SplineParams9 {
            coefs_low: [0.0; 10],
            coefs_high: [0.0; 10],
            min_point: Point2::new(0.01, 0.02),
            mid_point: Point2::new(4.8, 4.8),
            max_point: Point2::new(1000.0, 48.0),
            slope_low: 0.0,
            slope_high: 0.04,
            limits: Point2::new(0.002, 16.0),
        };
        for i in 0..10 {
            c.coefs_low[i] = i as f32;
            c.coefs_high[i] = 10.0 + i as f32;
        }
        let k = c.to_constants();
        assert_eq!(&k[0..4], &[0.0, 10.0, 0.0, 0.0]);
        assert_eq!(&k[36..40], &[9.0, 19.0, 0.0, 0.0]);
    }
}
