//! XYZ <-> xyY conversion.
//!
//! Both directions floor their denominators so that black and degenerate
//! chromaticities stay finite.

use crate::Vec3;

/// Denominator floor for chromaticity math.
pub const CHROMA_EPS: f32 = 1e-10;

/// XYZ to xyY. Returned as `(x, y, Y)`.
///
/// A component sum of exactly zero is replaced by [`CHROMA_EPS`].
#[inline]
pub fn xyz_to_xyy(xyz: Vec3) -> Vec3 {
    let mut divisor = xyz.sum();
    if divisor == 0.0 {
        divisor = CHROMA_EPS;
    }
    Vec3::new(xyz.x / divisor, xyz.y / divisor, xyz.y)
}

/// xyY (as `(x, y, Y)`) to XYZ.
///
/// The chromaticity `y` is floored at [`CHROMA_EPS`].
#[inline]
pub fn xyy_to_xyz(xyy: Vec3) -> Vec3 {
    let y = xyy.y.max(CHROMA_EPS);
    let big_y = xyy.z;
    Vec3::new(
        xyy.x * big_y / y,
        big_y,
        (1.0 - xyy.x - xyy.y) * big_y / y,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_roundtrip_d65_white() {
        let xyz = Vec3::new(0.95047, 1.0, 1.08883);
        let xyy = xyz_to_xyy(xyz);
        assert_relative_eq!(xyy.x, 0.31271, epsilon = 1e-4);
        assert_relative_eq!(xyy.y, 0.32902, epsilon = 1e-4);
        let back = xyy_to_xyz(xyy);
        assert_relative_eq!(back.x, xyz.x, epsilon = 1e-5);
        assert_relative_eq!(back.z, xyz.z, epsilon = 1e-5);
    }

    #[test]
    fn test_black_stays_finite() {
        let xyy = xyz_to_xyy(Vec3::ZERO);
        assert!(xyy.is_finite());
        assert_eq!(xyy_to_xyz(xyy), Vec3::ZERO);
        assert!(xyy_to_xyz(Vec3::new(0.3, 0.0, 1.0)).is_finite());
    }
}
