//! Chromatic adaptation between D65 and the ACES white point.
//!
//! The output transform works in ACES (D60-ish) white and talks to D65
//! displays, so only this one pair of illuminants matters here. The fixed
//! [`D65_TO_D60_CAT`] / [`D60_TO_D65_CAT`] tables are what the pipeline
//! uses; [`adapt_matrix`] derives the same thing from first principles and
//! is kept for checking those tables and for custom white points.

use crate::{Mat3, Vec3};

// ============================================================================
// White points (XYZ, Y = 1)
// ============================================================================

/// CIE D65.
pub const D65: Vec3 = Vec3::new(0.95047, 1.0, 1.08883);

/// ACES white point (xy 0.32168, 0.33767).
pub const D60: Vec3 = Vec3::new(0.95265, 1.0, 1.00883);

// ============================================================================
// Cone response
// ============================================================================

/// Bradford cone response matrix.
pub const BRADFORD: Mat3 = Mat3::from_rows([
    [0.8951, 0.2664, -0.1614],
    [-0.7502, 1.7135, 0.0367],
    [0.0389, -0.0685, 1.0296],
]);

/// von Kries-style adaptation through `cone`: `cone^-1 * diag(dst/src) * cone`.
///
/// Falls back to plain XYZ scaling if `cone` is singular.
///
/// ```rust
/// use odt_math::{adapt_matrix, BRADFORD, D60, D65};
///
/// let m = adapt_matrix(BRADFORD, D65, D60);
/// let w = m * D65;
/// assert!((w.z - D60.z).abs() < 1e-3);
/// ```
pub fn adapt_matrix(cone: Mat3, src_white: Vec3, dst_white: Vec3) -> Mat3 {
    let cone_inv = cone.inverse().unwrap_or(Mat3::IDENTITY);
    let src = cone * src_white;
    let dst = cone * dst_white;
    let scale = Mat3::diagonal(dst.x / src.x, dst.y / src.y, dst.z / src.z);
    cone_inv * scale * cone
}

/// D65 -> ACES white, Bradford.
pub const D65_TO_D60_CAT: Mat3 = Mat3::from_rows([
    [1.01303, 0.00610531, -0.014971],
    [0.00769823, 0.998165, -0.00503203],
    [-0.00284131, 0.00468516, 0.924507],
]);

/// ACES white -> D65, Bradford.
pub const D60_TO_D65_CAT: Mat3 = Mat3::from_rows([
    [0.987224, -0.00611327, 0.0159533],
    [-0.00759836, 1.00186, 0.00533002],
    [0.00307257, -0.00509595, 1.08168],
]);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_cat_matches_bradford() {
        let derived = adapt_matrix(BRADFORD, D65, D60);
        assert!(derived.max_abs_diff(&D65_TO_D60_CAT) < 1e-3);

        let derived = adapt_matrix(BRADFORD, D60, D65);
        assert!(derived.max_abs_diff(&D60_TO_D65_CAT) < 1e-3);
    }

    #[test]
    fn test_fixed_cat_pair_inverts() {
        let m = D60_TO_D65_CAT * D65_TO_D60_CAT;
        assert!(m.max_abs_diff(&Mat3::IDENTITY) < 1e-4);
    }

    #[test]
    fn test_adapt_identity() {
        let m = adapt_matrix(BRADFORD, D65, D65);
        assert!(m.max_abs_diff(&Mat3::IDENTITY) < 1e-5);
    }
}
