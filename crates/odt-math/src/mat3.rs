//! 3x3 matrix type for gamut and white point conversions.
//!
//! # Convention
//!
//! Matrices are stored in **row-major** order and use **column vectors**:
//!
//! ```text
//! | m00 m01 m02 |   | x |   | m00*x + m01*y + m02*z |
//! | m10 m11 m12 | * | y | = | m10*x + m11*y + m12*z |
//! | m20 m21 m22 |   | z |   | m20*x + m21*y + m22*z |
//! ```
//!
//! Chains read right to left: `c * b * a` applies `a` first.

use crate::Vec3;
use std::ops::{Index, Mul};

/// A 3x3 color matrix, row-major.
///
/// # Example
///
/// ```rust
/// use odt_math::{Mat3, Vec3};
///
/// let v = Vec3::new(1.0, 2.0, 3.0);
/// assert_eq!(Mat3::IDENTITY * v, v);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(C)]
pub struct Mat3 {
    /// Matrix elements in row-major order: [row0, row1, row2]
    pub m: [[f32; 3]; 3],
}

impl Mat3 {
    /// Zero matrix.
    pub const ZERO: Self = Self { m: [[0.0; 3]; 3] };

    /// Identity matrix.
    pub const IDENTITY: Self = Self::diagonal(1.0, 1.0, 1.0);

    /// Creates a matrix from row arrays.
    #[inline]
    pub const fn from_rows(rows: [[f32; 3]; 3]) -> Self {
        Self { m: rows }
    }

    /// Creates a matrix from column arrays.
    #[inline]
    pub const fn from_cols(cols: [[f32; 3]; 3]) -> Self {
        Self {
            m: [
                [cols[0][0], cols[1][0], cols[2][0]],
                [cols[0][1], cols[1][1], cols[2][1]],
                [cols[0][2], cols[1][2], cols[2][2]],
            ],
        }
    }

    /// Creates a matrix whose columns are the given vectors.
    #[inline]
    pub fn from_col_vecs(c0: Vec3, c1: Vec3, c2: Vec3) -> Self {
        Self::from_cols([c0.to_array(), c1.to_array(), c2.to_array()])
    }

    /// Creates a diagonal matrix.
    #[inline]
    pub const fn diagonal(d0: f32, d1: f32, d2: f32) -> Self {
        Self::from_rows([[d0, 0.0, 0.0], [0.0, d1, 0.0], [0.0, 0.0, d2]])
    }

    /// Saturation matrix around the luma axis defined by `weights`.
    ///
    /// Row `i` is `(1 - amount) * weights + amount * e_i`. At `amount = 1`
    /// this is the identity; at `amount = 0` every row equals `weights`, so
    /// the output is the weighted luma in all three channels.
    ///
    /// ```rust
    /// use odt_math::{Mat3, Vec3};
    ///
    /// let w = Vec3::new(0.3, 0.6, 0.1);
    /// assert_eq!(Mat3::saturation(1.0, w), Mat3::IDENTITY);
    /// ```
    pub fn saturation(amount: f32, weights: Vec3) -> Self {
        let mut out = Self::ZERO;
        for i in 0..3 {
            for j in 0..3 {
                let keep = if i == j { amount } else { 0.0 };
                out.m[i][j] = (1.0 - amount) * weights[j] + keep;
            }
        }
        out
    }

    /// Returns a row as Vec3.
    #[inline]
    pub fn row(&self, i: usize) -> Vec3 {
        Vec3::from_array(self.m[i])
    }

    /// Returns a column as Vec3.
    #[inline]
    pub fn col(&self, i: usize) -> Vec3 {
        Vec3::new(self.m[0][i], self.m[1][i], self.m[2][i])
    }

    /// Returns the transpose.
    #[inline]
    pub fn transpose(&self) -> Self {
        Self::from_cols(self.m)
    }

    /// Computes the determinant.
    #[inline]
    pub fn determinant(&self) -> f32 {
        let m = &self.m;
        m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
            - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
            + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
    }

    /// Computes the inverse.
    ///
    /// Returns `None` if the matrix is singular.
    pub fn inverse(&self) -> Option<Self> {
        let det = self.determinant();
        if det.abs() < 1e-10 {
            return None;
        }

        let m = &self.m;
        let inv_det = 1.0 / det;

        // Adjugate scaled by 1/det
        Some(Self::from_rows([
            [
                (m[1][1] * m[2][2] - m[1][2] * m[2][1]) * inv_det,
                (m[0][2] * m[2][1] - m[0][1] * m[2][2]) * inv_det,
                (m[0][1] * m[1][2] - m[0][2] * m[1][1]) * inv_det,
            ],
            [
                (m[1][2] * m[2][0] - m[1][0] * m[2][2]) * inv_det,
                (m[0][0] * m[2][2] - m[0][2] * m[2][0]) * inv_det,
                (m[0][2] * m[1][0] - m[0][0] * m[1][2]) * inv_det,
            ],
            [
                (m[1][0] * m[2][1] - m[1][1] * m[2][0]) * inv_det,
                (m[0][1] * m[2][0] - m[0][0] * m[2][1]) * inv_det,
                (m[0][0] * m[1][1] - m[0][1] * m[1][0]) * inv_det,
            ],
        ]))
    }

    /// Transforms a Vec3 by this matrix.
    #[inline]
    pub fn transform(&self, v: Vec3) -> Vec3 {
        Vec3::new(self.row(0).dot(v), self.row(1).dot(v), self.row(2).dot(v))
    }

    /// Multiplies two matrices (`self * other`).
    #[inline]
    pub fn mul_mat(&self, other: &Self) -> Self {
        let mut result = Self::ZERO;
        for i in 0..3 {
            for j in 0..3 {
                result.m[i][j] = self.row(i).dot(other.col(j));
            }
        }
        result
    }

    /// Largest absolute element-wise difference to `other`.
    pub fn max_abs_diff(&self, other: &Self) -> f32 {
        self.m
            .iter()
            .flatten()
            .zip(other.m.iter().flatten())
            .map(|(a, b)| (a - b).abs())
            .fold(0.0, f32::max)
    }

    /// Returns true if all elements are finite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.m.iter().flatten().all(|x| x.is_finite())
    }

    /// Converts to a glam matrix (column-major).
    #[inline]
    pub fn to_glam(&self) -> glam::Mat3 {
        glam::Mat3::from_cols_array_2d(&self.transpose().m)
    }

    /// Creates from a glam matrix.
    #[inline]
    pub fn from_glam(m: glam::Mat3) -> Self {
        Self::from_cols(m.to_cols_array_2d())
    }
}

impl Default for Mat3 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul<Vec3> for Mat3 {
    type Output = Vec3;

    #[inline]
    fn mul(self, rhs: Vec3) -> Vec3 {
        self.transform(rhs)
    }
}

impl Mul for Mat3 {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        self.mul_mat(&rhs)
    }
}

impl Index<usize> for Mat3 {
    type Output = [f32; 3];

    #[inline]
    fn index(&self, i: usize) -> &[f32; 3] {
        &self.m[i]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const W: Vec3 = Vec3::new(0.27222872, 0.67408168, 0.05368952);

    #[test]
    fn test_mat3_identity() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(Mat3::IDENTITY * v, v);
    }

    #[test]
    fn test_mat3_inverse() {
        let m = Mat3::from_rows([[1.0, 2.0, 3.0], [0.0, 1.0, 4.0], [5.0, 6.0, 0.0]]);
        let inv = m.inverse().unwrap();
        assert!((m * inv).max_abs_diff(&Mat3::IDENTITY) < 1e-5);
    }

    #[test]
    fn test_mat3_singular() {
        let m = Mat3::from_rows([[1.0, 2.0, 3.0], [2.0, 4.0, 6.0], [1.0, 1.0, 1.0]]);
        assert!(m.inverse().is_none());
    }

    #[test]
    fn test_mat3_chain_order() {
        let a = Mat3::diagonal(2.0, 1.0, 1.0);
        let b = Mat3::from_rows([[0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]]);
        let v = Vec3::new(1.0, 3.0, 0.0);
        assert_eq!((b * a) * v, b * (a * v));
        assert_eq!((b * a) * v, Vec3::new(3.0, 2.0, 0.0));
    }

    #[test]
    fn test_saturation_identity_at_one() {
        assert_eq!(Mat3::saturation(1.0, W), Mat3::IDENTITY);
    }

    #[test]
    fn test_saturation_zero_projects_to_luma() {
        let rgb = Vec3::new(0.8, 0.3, 0.05);
        let luma = rgb.dot(W);
        let out = Mat3::saturation(0.0, W) * rgb;
        assert_relative_eq!(out.x, luma, epsilon = 1e-6);
        assert_relative_eq!(out.y, luma, epsilon = 1e-6);
        assert_relative_eq!(out.z, luma, epsilon = 1e-6);
    }

    #[test]
    fn test_saturation_preserves_neutral() {
        // Weights sum to 1, so neutral colors are fixed points.
        let grey = Vec3::splat(0.42);
        let out = Mat3::saturation(0.93, W) * grey;
        assert_relative_eq!(out.x, 0.42, epsilon = 1e-6);
        assert_relative_eq!(out.z, 0.42, epsilon = 1e-6);
    }

    #[test]
    fn test_mat3_glam_roundtrip() {
        let m = Mat3::from_rows([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]]);
        assert_eq!(Mat3::from_glam(m.to_glam()), m);
        let v = glam::Vec3::new(1.0, 0.0, 0.0);
        assert_eq!(m.to_glam() * v, glam::Vec3::new(1.0, 4.0, 7.0));
    }
}
