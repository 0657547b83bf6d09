//! Color triplet type.
//!
//! [`Vec3`] carries RGB, XYZ and xyY values through the transform. The
//! arithmetic is component-wise; `dot` is used for luma weighting.

use std::ops::{Add, Index, IndexMut, Mul, Sub};

/// A 3-component color value.
///
/// For RGB: x=R, y=G, z=B. For XYZ: x=X, y=Y, z=Z. For xyY: x=x, y=y, z=Y.
///
/// # Example
///
/// ```rust
/// use odt_math::Vec3;
///
/// let grey = Vec3::splat(0.18);
/// assert_eq!(grey[1], 0.18);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[repr(C)]
pub struct Vec3 {
    /// First component (R, X or chromaticity x)
    pub x: f32,
    /// Second component (G, Y or chromaticity y)
    pub y: f32,
    /// Third component (B, Z or luminance Y)
    pub z: f32,
}

impl Vec3 {
    /// Zero vector.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    /// One vector.
    pub const ONE: Self = Self::new(1.0, 1.0, 1.0);

    /// Creates a new vector.
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Creates a vector with all components set to `v`.
    #[inline]
    pub const fn splat(v: f32) -> Self {
        Self::new(v, v, v)
    }

    /// Creates from an array.
    #[inline]
    pub const fn from_array(a: [f32; 3]) -> Self {
        Self::new(a[0], a[1], a[2])
    }

    /// Converts to an array.
    #[inline]
    pub const fn to_array(self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }

    /// Dot product.
    #[inline]
    pub fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Component-wise minimum.
    #[inline]
    pub fn min(self, other: Self) -> Self {
        Self::new(self.x.min(other.x), self.y.min(other.y), self.z.min(other.z))
    }

    /// Component-wise maximum.
    #[inline]
    pub fn max(self, other: Self) -> Self {
        Self::new(self.x.max(other.x), self.y.max(other.y), self.z.max(other.z))
    }

    /// Clamps every component to `[lo, hi]`.
    #[inline]
    pub fn clamp_scalar(self, lo: f32, hi: f32) -> Self {
        self.map(|c| c.clamp(lo, hi))
    }

    /// Clamps every component to `[0, 1]`.
    #[inline]
    pub fn clamp01(self) -> Self {
        self.clamp_scalar(0.0, 1.0)
    }

    /// Applies `f` to each component.
    #[inline]
    pub fn map(self, f: impl Fn(f32) -> f32) -> Self {
        Self::new(f(self.x), f(self.y), f(self.z))
    }

    /// Linear interpolation: `self + (other - self) * t`.
    #[inline]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        self + (other - self) * t
    }

    /// Smallest component.
    #[inline]
    pub fn min_element(self) -> f32 {
        self.x.min(self.y).min(self.z)
    }

    /// Largest component.
    #[inline]
    pub fn max_element(self) -> f32 {
        self.x.max(self.y).max(self.z)
    }

    /// Sum of the components.
    #[inline]
    pub fn sum(self) -> f32 {
        self.x + self.y + self.z
    }

    /// Returns true if all components are finite.
    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// Converts to a glam vector.
    #[inline]
    pub fn to_glam(self) -> glam::Vec3 {
        glam::Vec3::new(self.x, self.y, self.z)
    }

    /// Creates from a glam vector.
    #[inline]
    pub fn from_glam(v: glam::Vec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl Index<usize> for Vec3 {
    type Output = f32;

    #[inline]
    fn index(&self, i: usize) -> &f32 {
        match i {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            _ => panic!("Vec3 index out of bounds: {i}"),
        }
    }
}

impl IndexMut<usize> for Vec3 {
    #[inline]
    fn index_mut(&mut self, i: usize) -> &mut f32 {
        match i {
            0 => &mut self.x,
            1 => &mut self.y,
            2 => &mut self.z,
            _ => panic!("Vec3 index out of bounds: {i}"),
        }
    }
}

impl Add for Vec3 {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3 {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f32> for Vec3 {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Mul<Vec3> for f32 {
    type Output = Vec3;

    #[inline]
    fn mul(self, rhs: Vec3) -> Vec3 {
        rhs * self
    }
}

impl From<[f32; 3]> for Vec3 {
    #[inline]
    fn from(a: [f32; 3]) -> Self {
        Self::from_array(a)
    }
}

impl From<Vec3> for [f32; 3] {
    #[inline]
    fn from(v: Vec3) -> Self {
        v.to_array()
    }
}

impl From<glam::Vec3> for Vec3 {
    #[inline]
    fn from(v: glam::Vec3) -> Self {
        Self::from_glam(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec3_dot_weights() {
        let w = Vec3::new(0.25, 0.5, 0.25);
        assert_eq!(Vec3::splat(2.0).dot(w), 2.0);
    }

    #[test]
    fn test_vec3_lerp_endpoints() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(3.0, 2.0, 1.0);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        assert_eq!(a.lerp(b, 0.5), Vec3::splat(2.0));
    }

    #[test]
    fn test_vec3_clamp() {
        let v = Vec3::new(-1.0, 0.5, 70000.0).clamp_scalar(0.0, 65504.0);
        assert_eq!(v, Vec3::new(0.0, 0.5, 65504.0));
        assert_eq!(Vec3::new(-0.5, 0.5, 1.5).clamp01(), Vec3::new(0.0, 0.5, 1.0));
    }

    #[test]
    fn test_vec3_index_mut() {
        let mut v = Vec3::ZERO;
        v[2] = 4.0;
        assert_eq!(v.z, 4.0);
        assert_eq!(v.max_element(), 4.0);
        assert_eq!(v.min_element(), 0.0);
    }

    #[test]
    fn test_vec3_glam_interop() {
        let v = Vec3::new(0.1, 0.2, 0.3);
        assert_eq!(Vec3::from_glam(v.to_glam()), v);
    }
}
