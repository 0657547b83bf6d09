//! Reference ODT curves and curve selection.
//!
//! | Curve | Peak | Mid grey | Black | Scene range (stops) |
//! |-------|------|----------|-------|---------------------|
//! | [`ReferenceCurve::Ldr48`] | 48 nits | 4.8 | 0.02 | -6.5 .. +6.5 |
//! | [`ReferenceCurve::Hdr1000`] | 1000 nits | 10 | 0.005 | -12 .. +10 |
//! | [`ReferenceCurve::Hdr2000`] | 2000 nits | 10 | 0.005 | -12 .. +11 |
//! | [`ReferenceCurve::Hdr4000`] | 4000 nits | 10 | 0.005 | -12 .. +12 |
//!
//! Each table's input anchors are the scene range pushed through the RRT
//! tone scale, so the tables are built once on first use.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::adapt::adapt_spline;
use crate::error::TonemapError;
use crate::spline::{rrt_spline, Point2, SplineParams9};

/// Scene-linear mid grey.
pub const MID_GREY: f32 = 0.18;

/// Scene-linear value `stops` stops away from mid grey.
#[inline]
pub fn stops_to_linear(stops: f32) -> f32 {
    MID_GREY * 2f32.powf(stops)
}

/// The four authored ODT curves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReferenceCurve {
    /// 48 nit cinema / SDR.
    #[default]
    #[serde(alias = "ldr", alias = "48")]
    Ldr48,
    /// 1000 nit HDR.
    #[serde(alias = "1000")]
    Hdr1000,
    /// 2000 nit HDR.
    #[serde(alias = "2000")]
    Hdr2000,
    /// 4000 nit HDR.
    #[serde(alias = "4000")]
    Hdr4000,
}

impl ReferenceCurve {
    /// All reference curves, brightest last.
    pub const ALL: [Self; 4] = [Self::Ldr48, Self::Hdr1000, Self::Hdr2000, Self::Hdr4000];

    /// Peak output luminance in nits.
    pub const fn peak_nits(self) -> f32 {
        match self {
            Self::Ldr48 => 48.0,
            Self::Hdr1000 => 1000.0,
            Self::Hdr2000 => 2000.0,
            Self::Hdr4000 => 4000.0,
        }
    }

    /// Scene range `(min, max)` in stops around mid grey the table was authored for.
    pub const fn default_stops(self) -> (f32, f32) {
        match self {
            Self::Ldr48 => (-6.5, 6.5),
            Self::Hdr1000 => (-12.0, 10.0),
            Self::Hdr2000 => (-12.0, 11.0),
            Self::Hdr4000 => (-12.0, 12.0),
        }
    }

    /// Curve whose peak is exactly `nits`, if any.
    pub fn from_nits(nits: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.peak_nits() as u32 == nits)
    }

    /// The reference table.
    pub fn params(self) -> SplineParams9 {
        REFERENCE_TABLES[self as usize]
    }
}

impl fmt::Display for ReferenceCurve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.peak_nits() as u32)
    }
}

impl FromStr for ReferenceCurve {
    type Err = TonemapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        if matches!(lower.as_str(), "ldr" | "sdr") {
            return Ok(Self::Ldr48);
        }
        lower
            .trim_start_matches("hdr")
            .trim_start_matches("ldr")
            .trim_end_matches("nits")
            .trim_end_matches("nit")
            .trim()
            .parse::<u32>()
            .ok()
            .and_then(Self::from_nits)
            .ok_or_else(|| TonemapError::UnknownCurve(s.to_string()))
    }
}

/// Which curve the ODT should use.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CurveSelector {
    /// A reference table as authored.
    Reference(ReferenceCurve),
    /// A reference table retargeted with [`adapt_spline`].
    ///
    /// Non-positive `max_nits` / `max_stop` and non-negative `min_stop`
    /// fall back to the reference curve's own values.
    Adjustable {
        /// Base table
        curve: ReferenceCurve,
        /// Darkest scene exposure, stops below mid grey (negative)
        min_stop: f32,
        /// Brightest scene exposure, stops above mid grey (positive)
        max_stop: f32,
        /// Peak output luminance in nits
        max_nits: f32,
        /// Multiplier on the mid grey output luminance
        mid_gray_scale: f32,
    },
}

impl CurveSelector {
    /// The reference table this selection starts from.
    pub const fn base(&self) -> ReferenceCurve {
        match *self {
            Self::Reference(c) => c,
            Self::Adjustable { curve, .. } => curve,
        }
    }
}

impl From<ReferenceCurve> for CurveSelector {
    fn from(c: ReferenceCurve) -> Self {
        Self::Reference(c)
    }
}

/// Resolves a selection to curve parameters.
///
/// ```rust
/// use odt_tonemap::{resolve_curve, CurveSelector, ReferenceCurve};
///
/// let c = resolve_curve(&CurveSelector::Adjustable {
///     curve: ReferenceCurve::Hdr1000,
///     min_stop: 0.0,
///     max_stop: 0.0,
///     max_nits: 600.0,
///     mid_gray_scale: 1.0,
/// });
/// assert_eq!(c.max_point.y, 600.0);
/// ```
pub fn resolve_curve(selector: &CurveSelector) -> SplineParams9 {
    match *selector {
        CurveSelector::Reference(curve) => curve.params(),
        CurveSelector::Adjustable {
            curve,
            min_stop,
            max_stop,
            max_nits,
            mid_gray_scale,
        } => {
            let (default_min, default_max) = curve.default_stops();
            let max_nits = if max_nits > 0.0 { max_nits } else { curve.peak_nits() };
            let max_stop = if max_stop > 0.0 { max_stop } else { default_max };
            let min_stop = if min_stop < 0.0 { min_stop } else { default_min };

            debug!(
                curve = %curve,
                min_stop,
                max_stop,
                max_nits,
                mid_gray_scale,
                "adapting ODT curve"
            );

            adapt_spline(
                &curve.params(),
                stops_to_linear(min_stop),
                stops_to_linear(max_stop),
                max_nits,
                mid_gray_scale,
            )
        }
    }
}

// ============================================================================
// Reference tables
// ============================================================================

const HDR_COEFS_LOW: [f32; 10] = [
    -2.301_03, -2.301_03, -1.9312, -1.5205, -1.0578, -0.4668, 0.11938, 0.708_813_4, 1.291_186_6,
    1.291_186_6,
];

static REFERENCE_TABLES: LazyLock<[SplineParams9; 4]> = LazyLock::new(|| {
    [
        table(
            ReferenceCurve::Ldr48,
            [
                -1.698_970_0, -1.698_970_0, -1.4779, -1.2291, -0.8648, -0.448, 0.00518,
                0.451_108_03, 0.911_374_4, 0.911_374_4,
            ],
            [
                0.515_438_7, 0.847_043_8, 1.1358, 1.3802, 1.5197, 1.5985, 1.6467, 1.674_609_1,
                1.687_873_3, 1.687_873_3,
            ],
            (0.02, 4.8),
            0.04,
        ),
        table(
            ReferenceCurve::Hdr1000,
            HDR_COEFS_LOW,
            [
                0.808_913_2, 1.191_086_8, 1.5683, 1.9483, 2.3083, 2.6384, 2.8595, 2.987_260_8,
                3.012_739_2, 3.012_739_2,
            ],
            (0.005, 10.0),
            0.06,
        ),
        table(
            ReferenceCurve::Hdr2000,
            HDR_COEFS_LOW,
            [
                0.801_995_2, 1.198_004_8, 1.5943, 1.9973, 2.3783, 2.7684, 3.0515, 3.274_629_4,
                3.327_430_7, 3.327_430_7,
            ],
            (0.005, 10.0),
            0.12,
        ),
        table(
            ReferenceCurve::Hdr4000,
            HDR_COEFS_LOW,
            [
                0.797_318_7, 1.202_681_3, 1.6093, 2.0108, 2.4148, 2.8179, 3.1725, 3.534_499_6,
                3.669_620_5, 3.669_620_5,
            ],
            (0.005, 10.0),
            0.3,
        ),
    ]
});

fn table(
    curve: ReferenceCurve,
    coefs_low: [f32; 10],
    coefs_high: [f32; 10],
    (black, mid): (f32, f32),
    slope_high: f32,
) -> SplineParams9 {
    let (min_stop, max_stop) = curve.default_stops();
    let lo = stops_to_linear(min_stop);
    let hi = stops_to_linear(max_stop);
    SplineParams9 {
        coefs_low,
        coefs_high,
        min_point: Point2::new(rrt_spline(lo), black),
        mid_point: Point2::new(rrt_spline(MID_GREY), mid),
        max_point: Point2::new(rrt_spline(hi), curve.peak_nits()),
        slope_low: 0.0,
        slope_high,
        limits: Point2::new(lo, hi),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_order_matches_enum() {
        for curve in ReferenceCurve::ALL {
            assert_eq!(curve.params().max_point.y, curve.peak_nits());
        }
    }

    #[test]
    fn test_anchor_inputs() {
        let ldr = ReferenceCurve::Ldr48.params();
        assert!((ldr.min_point.x - 0.0028799).abs() / 0.0028799 < 1e-3);
        assert!((ldr.max_point.x - 1005.72).abs() / 1005.72 < 1e-3);
        assert!((ldr.mid_point.x - 4.8).abs() < 1e-3);

        let maxes = [4505.08, 5771.86, 6824.36];
        for (curve, expect) in ReferenceCurve::ALL[1..].iter().zip(maxes) {
            let p = curve.params();
            assert!((p.min_point.x - 0.00014180).abs() / 0.00014180 < 1e-3, "{curve}");
            assert!((p.max_point.x - expect).abs() / expect < 1e-3, "{curve}");
        }
    }

    #[test]
    fn test_reference_values_1000() {
        let c = ReferenceCurve::Hdr1000.params();
        assert!((c.eval(0.18) - 0.50908).abs() / 0.50908 < 1e-3);
        assert!((c.eval(100.0) - 146.607).abs() / 146.607 < 1e-3);
    }

    #[test]
    fn test_mid_grey_maps_to_mid() {
        for curve in ReferenceCurve::ALL {
            let c = curve.params();
            let y = c.eval(c.mid_point.x);
            assert!((y - c.mid_point.y).abs() / c.mid_point.y < 1e-3, "{curve}: {y}");
        }
    }

    #[test]
    fn test_reference_curves_monotonic() {
        for curve in ReferenceCurve::ALL {
            let c = curve.params();
            let mut prev = 0.0;
            let mut x = 1e-5f32;
            while x < 1e5 {
                let y = c.eval(x);
                assert!(y >= prev * (1.0 - 1e-5), "{curve}: dip at x={x}");
                prev = y;
                x *= 1.03;
            }
        }
    }

    #[test]
    fn test_boundaries() {
        // Below min.x the low extension applies exactly (slope 0: flat at min.y).
        for curve in ReferenceCurve::ALL {
            let c = curve.params();
            assert_eq!(c.eval(c.min_point.x * 0.5), c.eval(c.min_point.x * 0.1));
            let at_min = c.eval(c.min_point.x);
            assert!((at_min - c.min_point.y).abs() / c.min_point.y < 1e-4);
            let at_max = c.eval(c.max_point.x);
            assert!((at_max - c.max_point.y).abs() / c.max_point.y < 1e-4);
            // High extension follows slope_high in log-log.
            let above = c.eval(c.max_point.x * 10.0);
            let expect = c.max_point.y * 10f32.powf(c.slope_high);
            assert!((above - expect).abs() / expect < 1e-4);
        }
    }

    #[test]
    fn test_resolve_defaults() {
        let adj = CurveSelector::Adjustable {
            curve: ReferenceCurve::Hdr2000,
            min_stop: 0.0,
            max_stop: -1.0,
            max_nits: -1.0,
            mid_gray_scale: 1.0,
        };
        let c = resolve_curve(&adj);
        let r = ReferenceCurve::Hdr2000.params();
        assert_eq!(c.max_point.y, 2000.0);
        assert_eq!(c.limits, r.limits);
        assert_eq!(c.min_point.x, r.min_point.x);
        assert_eq!(c.max_point.x, r.max_point.x);
    }

    #[test]
    fn test_resolve_reference_is_table() {
        let c = resolve_curve(&ReferenceCurve::Hdr4000.into());
        assert_eq!(c, ReferenceCurve::Hdr4000.params());
    }

    #[test]
    fn test_parse_curve() {
        assert_eq!("1000".parse::<ReferenceCurve>().unwrap(), ReferenceCurve::Hdr1000);
        assert_eq!("2000nits".parse::<ReferenceCurve>().unwrap(), ReferenceCurve::Hdr2000);
        assert_eq!("4000 nit".parse::<ReferenceCurve>().unwrap(), ReferenceCurve::Hdr4000);
        assert_eq!("LDR".parse::<ReferenceCurve>().unwrap(), ReferenceCurve::Ldr48);
        assert_eq!("48".parse::<ReferenceCurve>().unwrap(), ReferenceCurve::Ldr48);
        assert_eq!("hdr1000".parse::<ReferenceCurve>().unwrap(), ReferenceCurve::Hdr1000);
        assert_eq!("ldr48".parse::<ReferenceCurve>().unwrap(), ReferenceCurve::Ldr48);
        assert!("600".parse::<ReferenceCurve>().is_err());
        assert_eq!(ReferenceCurve::from_nits(1000), Some(ReferenceCurve::Hdr1000));
    }
}
