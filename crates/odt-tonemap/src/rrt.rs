//! Reference Rendering Transform.
//!
//! ACES 2065-1 (AP0) scene-linear in, OCES (AP0, tone scaled) out:
//!
//! ```text
//! glow -> red modifier -> clamp -> AP0->AP1 -> clamp -> desat 0.96
//!      -> RRT tone scale per channel -> AP1->AP0
//! ```

use odt_math::{Mat3, Vec3};
use odt_primaries::{AP0_TO_AP1, AP1_RGB2Y, AP1_TO_AP0};

use crate::spline::rrt_spline;

// Glow module
const GLOW_GAIN: f32 = 0.05;
const GLOW_MID: f32 = 0.08;

// Red modifier
const RED_SCALE: f32 = 0.82;
const RED_PIVOT: f32 = 0.03;
const RED_HUE: f32 = 0.0;
const RED_WIDTH: f32 = 135.0;

// Global desaturation
const RRT_SAT_FACTOR: f32 = 0.96;

/// Largest finite half-float value; the working-space clamp.
const HALF_MAX: f32 = 65504.0;

/// Applies the RRT to an ACES AP0 value.
///
/// ```rust
/// use odt_math::Vec3;
/// use odt_tonemap::rrt;
///
/// let oces = rrt(Vec3::splat(0.18));
/// assert!((oces.y - 4.8).abs() < 0.01);
/// ```
pub fn rrt(aces: Vec3) -> Vec3 {
    let saturation = rgb_saturation(aces);

    // Glow
    let yc_in = rgb_to_yc(aces, 1.75);
    let s = sigmoid_shaper((saturation - 0.4) / 0.2);
    let glow = 1.0 + glow_fwd(yc_in, GLOW_GAIN * s, GLOW_MID);
    let mut aces = aces * glow;

    // Red modifier
    let hue = rgb_to_hue(aces);
    let hue_weight = cubic_basis_shaper(center_hue(hue, RED_HUE), RED_WIDTH);
    aces.x += hue_weight * saturation * (RED_PIVOT - aces.x) * (1.0 - RED_SCALE);

    // Working space, clamped to what half floats hold
    let aces = aces.max(Vec3::ZERO);
    let rgb_pre = (AP0_TO_AP1 * aces).clamp_scalar(0.0, HALF_MAX);
    let rgb_pre = Mat3::saturation(RRT_SAT_FACTOR, AP1_RGB2Y) * rgb_pre;

    let rgb_post = rgb_pre.map(rrt_spline);

    AP1_TO_AP0 * rgb_post
}

/// `(max - min) / max` with floors that keep black and near-black finite.
pub fn rgb_saturation(rgb: Vec3) -> f32 {
    let hi = rgb.max_element().max(1e-10);
    let lo = rgb.min_element().max(1e-10);
    (hi - lo) / rgb.max_element().max(1e-2)
}

/// Luminance proxy that adds a chroma term: `(r + g + b + k * chroma) / 3`.
pub fn rgb_to_yc(rgb: Vec3, yc_radius_weight: f32) -> f32 {
    let Vec3 { x: r, y: g, z: b } = rgb;
    let chroma = (b * (b - g) + g * (g - r) + r * (r - b)).max(0.0).sqrt();
    (b + g + r + yc_radius_weight * chroma) / 3.0
}

/// Hue in degrees, `[0, 360)`. Achromatic input returns 0.
pub fn rgb_to_hue(rgb: Vec3) -> f32 {
    if rgb.x == rgb.y && rgb.y == rgb.z {
        return 0.0;
    }
    let hue = (3f32.sqrt() * (rgb.y - rgb.z))
        .atan2(2.0 * rgb.x - rgb.y - rgb.z)
        .to_degrees();
    if hue < 0.0 { hue + 360.0 } else { hue }
}

/// Hue relative to `center`, wrapped into `[-180, 180]`.
pub fn center_hue(hue: f32, center: f32) -> f32 {
    let h = hue - center;
    if h < -180.0 {
        h + 360.0
    } else if h > 180.0 {
        h - 360.0
    } else {
        h
    }
}

/// Smooth step from 0 to 1 over `[-2, 2]`.
pub fn sigmoid_shaper(x: f32) -> f32 {
    let t = (1.0 - (x / 2.0).abs()).max(0.0);
    (1.0 + x.signum() * (1.0 - t * t)) / 2.0
}

/// Glow gain as a function of `yc`: full below `2/3 mid`, none above `2 mid`.
pub fn glow_fwd(yc_in: f32, glow_gain_in: f32, glow_mid: f32) -> f32 {
    if yc_in <= 2.0 / 3.0 * glow_mid {
        glow_gain_in
    } else if yc_in >= 2.0 * glow_mid {
        0.0
    } else {
        glow_gain_in * (glow_mid / yc_in - 0.5)
    }
}

/// Uniform cubic B-spline bump of full width `width`, peaking at 1 in the middle.
pub fn cubic_basis_shaper(x: f32, width: f32) -> f32 {
    const M: [[f32; 4]; 4] = [
        [-1.0 / 6.0, 3.0 / 6.0, -3.0 / 6.0, 1.0 / 6.0],
        [3.0 / 6.0, -6.0 / 6.0, 3.0 / 6.0, 0.0],
        [-3.0 / 6.0, 0.0, 3.0 / 6.0, 0.0],
        [1.0 / 6.0, 4.0 / 6.0, 1.0 / 6.0, 0.0],
    ];

    let half = width / 2.0;
    if x <= -half || x >= half {
        return 0.0;
    }

    let knot = (x + half) * 4.0 / width;
    let j = (knot as usize).min(3);
    let t = knot - j as f32;
    let monomials = [t * t * t, t * t, t, 1.0];
    let col = 3 - j;

    let y: f32 = (0..4).map(|k| monomials[k] * M[k][col]).sum();
    y * 1.5
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_rrt_mid_grey() {
        let out = rrt(Vec3::splat(0.18));
        for c in out.to_array() {
            assert_relative_eq!(c, 4.8, max_relative = 2e-3);
        }
    }

    #[test]
    fn test_rrt_saturated_orange() {
        let out = rrt(Vec3::new(0.5, 0.05, 0.02));
        assert_relative_eq!(out.x, 18.269, max_relative = 2e-3);
        assert_relative_eq!(out.y, 1.4388, max_relative = 2e-3);
        assert_relative_eq!(out.z, 0.11702, max_relative = 5e-3);
    }

    #[test]
    fn test_rrt_black_and_negative() {
        let black = rrt(Vec3::ZERO);
        assert!(black.is_finite());
        assert!(black.min_element() >= 0.0);
        assert_eq!(rrt(Vec3::splat(-1.0)), black);
    }

    #[test]
    fn test_rrt_huge_input_is_clamped() {
        let out = rrt(Vec3::new(1e9, 1e9, 1e9));
        assert!(out.is_finite());
        assert!(out.max_element() <= 10001.0);
    }

    #[test]
    fn test_hue() {
        assert_eq!(rgb_to_hue(Vec3::splat(0.3)), 0.0);
        assert_relative_eq!(rgb_to_hue(Vec3::new(1.0, 0.0, 0.0)), 0.0, epsilon = 1e-4);
        assert_relative_eq!(rgb_to_hue(Vec3::new(0.0, 1.0, 0.0)), 120.0, epsilon = 1e-3);
        assert_relative_eq!(rgb_to_hue(Vec3::new(0.0, 0.0, 1.0)), 240.0, epsilon = 1e-3);
    }

    #[test]
    fn test_center_hue_wraps() {
        assert_eq!(center_hue(350.0, 0.0), -10.0);
        assert_eq!(center_hue(10.0, 0.0), 10.0);
        assert_eq!(center_hue(180.0, 0.0), 180.0);
    }

    #[test]
    fn test_cubic_basis_shaper() {
        assert_relative_eq!(cubic_basis_shaper(0.0, 135.0), 1.0, epsilon = 1e-5);
        assert_eq!(cubic_basis_shaper(67.5, 135.0), 0.0);
        assert_eq!(cubic_basis_shaper(-90.0, 135.0), 0.0);
        // Symmetric
        let a = cubic_basis_shaper(-20.0, 135.0);
        let b = cubic_basis_shaper(20.0, 135.0);
        assert_relative_eq!(a, b, epsilon = 1e-5);
    }

    #[test]
    fn test_sigmoid_shaper() {
        assert_eq!(sigmoid_shaper(0.0), 0.5);
        assert_eq!(sigmoid_shaper(2.0), 1.0);
        assert_eq!(sigmoid_shaper(-5.0), 0.0);
        assert_relative_eq!(sigmoid_shaper(1.0) + sigmoid_shaper(-1.0), 1.0);
    }

    #[test]
    fn test_glow() {
        assert_eq!(glow_fwd(0.01, 0.05, 0.08), 0.05);
        assert_eq!(glow_fwd(0.2, 0.05, 0.08), 0.0);
        // Continuous at the lower knee
        let knee = 2.0 / 3.0 * 0.08;
        assert_relative_eq!(glow_fwd(knee * 1.0001, 0.05, 0.08), 0.05, epsilon = 1e-4);
    }

    #[test]
    fn test_saturation_metric() {
        assert_eq!(rgb_saturation(Vec3::splat(0.5)), 0.0);
        assert_relative_eq!(rgb_saturation(Vec3::new(1.0, 0.0, 0.0)), 1.0, epsilon = 1e-6);
        assert!(rgb_saturation(Vec3::ZERO).is_finite());
    }
}
