//! Monitor curve: power law with a linear toe.
//!
//! This is the parametric display curve ACES uses for sRGB-like outputs
//! (gamma 2.4, offset 0.055). The toe slope and break point are derived
//! from `gamma` and `offset` so that both segments meet with matching value
//! and slope.
//!
//! - [`decode`]: code value -> linear, `((x + o) / (1 + o))^gamma` above the break
//! - [`encode`]: linear -> code value, `(1 + o) * y^(1/gamma) - o` above the break

/// Gamma / offset pair for the monitor curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonCurve {
    /// Power-law exponent (> 1)
    pub gamma: f32,
    /// Offset of the power segment (> 0)
    pub offset: f32,
}

/// sRGB display curve.
pub const SRGB: MonCurve = MonCurve::new(2.4, 0.055);

impl MonCurve {
    /// Creates a curve from gamma and offset.
    pub const fn new(gamma: f32, offset: f32) -> Self {
        Self { gamma, offset }
    }

    /// Code value at which the decode side switches from linear to power.
    #[inline]
    pub fn code_break(&self) -> f32 {
        self.offset / (self.gamma - 1.0)
    }

    /// Linear value at which the encode side switches from linear to power.
    #[inline]
    pub fn linear_break(&self) -> f32 {
        let (g, o) = (self.gamma, self.offset);
        (o * g / ((g - 1.0) * (1.0 + o))).powf(g)
    }

    /// Slope of the linear toe on the decode side.
    #[inline]
    pub fn decode_slope(&self) -> f32 {
        let (g, o) = (self.gamma, self.offset);
        ((g - 1.0) / o) * (o * g / ((g - 1.0) * (1.0 + o))).powf(g)
    }

    /// Slope of the linear toe on the encode side.
    #[inline]
    pub fn encode_slope(&self) -> f32 {
        let (g, o) = (self.gamma, self.offset);
        ((g - 1.0) / o).powf(g - 1.0) * ((1.0 + o) / g).powf(g)
    }
}

/// Code value to linear light.
#[inline]
pub fn decode(x: f32, curve: MonCurve) -> f32 {
    if x >= curve.code_break() {
        ((x + curve.offset) / (1.0 + curve.offset)).powf(curve.gamma)
    } else {
        x * curve.decode_slope()
    }
}

/// Linear light to code value.
///
/// ```rust
/// use odt_transfer::moncurve::{encode, SRGB};
///
/// assert_eq!(encode(0.0, SRGB), 0.0);
/// assert!((encode(1.0, SRGB) - 1.0).abs() < 1e-6);
/// ```
#[inline]
pub fn encode(y: f32, curve: MonCurve) -> f32 {
    if y >= curve.linear_break() {
        (1.0 + curve.offset) * y.powf(1.0 / curve.gamma) - curve.offset
    } else {
        y * curve.encode_slope()
    }
}
