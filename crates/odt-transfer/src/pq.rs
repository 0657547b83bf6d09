//! SMPTE ST 2084 Perceptual Quantizer (PQ).
//!
//! # Range
//!
//! - Encoded: [0, 1]
//! - Linear: [0, 10000] cd/m2 (nits)
//!
//! The power chain is evaluated in `f64`: the `m2` exponent is close to 79,
//! so single precision loses the round-trip accuracy near black.
//!
//! # Usage
//!
//! ```rust
//! use odt_transfer::pq;
//!
//! let nits = pq::eotf(0.5);
//! let code = pq::oetf(nits);
//! assert!((code - 0.5).abs() < 1e-5);
//! ```

/// Luminance that maps to code value 1.0, in cd/m2.
pub const L_MAX: f32 = 10000.0;

const M1: f64 = 0.1593017578125;
const M2: f64 = 78.84375;
const C1: f64 = 0.8359375;
const C2: f64 = 18.8515625;
const C3: f64 = 18.6875;

/// PQ EOTF: code value to absolute luminance (cd/m2).
///
/// `n` is clamped to `[0, 1]`.
///
/// ```rust
/// use odt_transfer::pq::eotf;
///
/// assert_eq!(eotf(0.0), 0.0);
/// assert!((eotf(1.0) - 10000.0).abs() < 0.5);
/// ```
#[inline]
pub fn eotf(n: f32) -> f32 {
    let np = (n.clamp(0.0, 1.0) as f64).powf(1.0 / M2);
    let l = ((np - C1).max(0.0) / (C2 - C3 * np)).powf(1.0 / M1);
    (l * L_MAX as f64) as f32
}

/// Inverse EOTF: absolute luminance (cd/m2) to PQ code value.
///
/// Negative luminance is clamped to zero. Zero encodes to `C1^M2`, a code
/// value a hair above 0, exactly as the closed form gives.
///
/// ```rust
/// use odt_transfer::pq::oetf;
///
/// assert!((oetf(10.0) - 0.29970).abs() < 1e-4);
/// ```
#[inline]
pub fn oetf(nits: f32) -> f32 {
    let lm = (nits.max(0.0) as f64 / L_MAX as f64).powf(M1);
    ((C1 + C2 * lm) / (1.0 + C3 * lm)).powf(M2) as f32
}
