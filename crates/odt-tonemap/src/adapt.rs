//! Retargeting an ODT curve to a new exposure range and peak luminance.
//!
//! The reference ODT curves are authored for fixed ranges (for instance
//! -12..+10 stops into 0.005..1000 nits). [`adapt_spline`] moves the anchor
//! points to a new range and then reshapes the control points so the curve
//! keeps the character of the reference:
//!
//! 1. Anchors: `min.x`/`max.x` come from pushing the new scene range through
//!    the RRT tone scale, `max.y` becomes the new peak, `mid.y` is scaled.
//! 2. Both segments are rescaled in log space to span the new anchors.
//! 3. The first high window is rebuilt so its slope at the junction
//!    matches the low segment's end slope (weighted 1/8 against 7/8 of the
//!    rescaled slope).
//! 4. The remaining high windows ease back towards the rescaled slopes,
//!    the blend moving from the joined curve to the rescaled one by `j/8`.

use crate::spline::{
    mul_row, rrt_spline, set_window, window, SplineParams9, BASIS, BASIS_INV,
};

/// Knot count of the ODT high segment, minus one.
const SPAN: f32 = 7.0;

/// Derives a curve covering `[new_min, new_max]` scene-linear input and
/// peaking at `out_max` nits, with mid grey output scaled by `mid_scale`.
///
/// Requires `0 < new_min < new_max`, `out_max > 0`, `mid_scale > 0`; values
/// outside that produce a degenerate curve rather than an error. The
/// returned anchors match the request exactly:
///
/// ```rust
/// use odt_tonemap::{adapt_spline, ReferenceCurve};
///
/// let reference = ReferenceCurve::Hdr1000.params();
/// let c = adapt_spline(&reference, 0.18 * 2f32.powf(-10.0), 0.18 * 2f32.powf(8.0), 600.0, 1.5);
/// assert_eq!(c.max_point.y, 600.0);
/// assert_eq!(c.mid_point.y, reference.mid_point.y * 1.5);
/// assert_eq!(c.min_point.y, reference.min_point.y);
/// ```
pub fn adapt_spline(
    reference: &SplineParams9,
    new_min: f32,
    new_max: f32,
    out_max: f32,
    mid_scale: f32,
) -> SplineParams9 {
    let mut c = *reference;

    c.max_point.x = rrt_spline(new_max);
    c.max_point.y = out_max;
    c.limits.x = new_min;
    c.limits.y = new_max;
    c.min_point.x = rrt_spline(new_min);
    c.mid_point.y *= mid_scale;

    let ref_log_min_y = reference.min_point.y.log10();
    let ref_log_mid_y = reference.mid_point.y.log10();
    let ref_log_max_y = reference.max_point.y.log10();
    let log_min_y = c.min_point.y.log10();
    let log_mid_y = c.mid_point.y.log10();
    let log_max_y = c.max_point.y.log10();

    // Low segment keeps its floor and stretches up to the new mid.
    let scale = (ref_log_mid_y - ref_log_min_y) / (log_mid_y - log_min_y);
    for v in c.coefs_low.iter_mut() {
        *v = (*v - log_min_y) / scale + log_min_y;
    }

    // High segment is re-anchored from the reference mid to the new mid.
    let scale = (ref_log_max_y - ref_log_mid_y) / (log_max_y - log_mid_y);
    for v in c.coefs_high.iter_mut() {
        *v = (*v - ref_log_mid_y) / scale + log_mid_y;
    }
    let target = c.coefs_high;

    join_segments(&mut c);
    ease_high_segment(&mut c, &target);

    c
}

/// Matches the first high window to the end of the low segment.
fn join_segments(c: &mut SplineParams9) {
    let low = mul_row(window(&c.coefs_low, 7), &BASIS);
    let mut high = mul_row(window(&c.coefs_high, 0), &BASIS);

    let log_min_x = c.min_point.x.log10();
    let log_mid_x = c.mid_point.x.log10();
    let log_max_x = c.max_point.x.log10();
    let scale_low = 1.0 / (log_mid_x - log_min_x);
    let scale_high = 1.0 / (log_max_x - log_mid_x);

    let out_ref = high[0] * 2.0 + high[1];

    high[2] = low[2];
    high[1] = scale_low * low[1] / scale_high;

    let out = high[0] * 2.0 + high[1];
    let out_target = (out_ref * SPAN + out) / (SPAN + 1.0);
    high[0] = (out_target - high[1]) / 2.0;

    set_window(&mut c.coefs_high, 0, mul_row(high, &BASIS_INV));
}

/// Blends each later high window's end slope back towards `target`.
fn ease_high_segment(c: &mut SplineParams9, target: &[f32; 10]) {
    for j in 1..8 {
        let mut a = mul_row(window(&c.coefs_high, j), &BASIS);
        let b = mul_row(window(target, j), &BASIS);

        let out = a[0] * 2.0 + a[1];
        let out_ref = b[0] * 2.0 + b[1];

        let jf = j as f32;
        let out_target = (out_ref * (SPAN - jf) + out * (1.0 + jf)) / (SPAN + 1.0);
        a[0] = (out_target - a[1]) / 2.0;

        set_window(&mut c.coefs_high, j, mul_row(a, &BASIS_INV));
    }
}
