//! Error types for tone mapping configuration.
//!
//! Pixel evaluation never fails; errors come from parsing names, loading
//! settings and validating ranges before a [`TransformConfig`] is built.
//!
//! [`TransformConfig`]: crate::TransformConfig

use thiserror::Error;

/// Tone mapping error.
#[derive(Debug, Error)]
pub enum TonemapError {
    /// Curve name or nit level does not match a reference curve.
    #[error("unknown ODT curve: {0} (expected 48, 1000, 2000 or 4000)")]
    UnknownCurve(String),

    /// Display name not recognized.
    #[error("unknown display primaries: {0}")]
    UnknownDisplay(#[from] odt_primaries::UnknownDisplay),

    /// Output mode name not recognized.
    #[error("unknown output mode: {0} (expected ldr, pq or scrgb)")]
    UnknownOutputMode(String),

    /// LUT shaper name not recognized.
    #[error("unknown shaper: {0} (expected log2 or pq)")]
    UnknownShaper(String),

    /// Preset name not recognized.
    #[error("unknown preset: {0}")]
    UnknownPreset(String),

    /// Exposure range is not finite or wider than 20 stops either side.
    #[error("invalid stop range: min {min}, max {max} (expected -20 <= min < 0 < max <= 20)")]
    InvalidStopRange {
        /// Requested minimum stops.
        min: f32,
        /// Requested maximum stops.
        max: f32,
    },

    /// Peak luminance not positive or below mid grey output.
    #[error("invalid peak luminance: {0} nits")]
    InvalidPeak(f32),

    /// Mid grey scale not in `(0, 10]`, or it pushes mid grey below the
    /// curve's black level.
    #[error("invalid mid grey scale: {0}")]
    InvalidMidGrayScale(f32),

    /// Surround gamma not in `(0, 2]`.
    #[error("invalid surround gamma: {0}")]
    InvalidSurroundGamma(f32),

    /// Display gamma not in `[0.2, 4]`.
    #[error("invalid output gamma: {0}")]
    InvalidOutputGamma(f32),

    /// Luminance-mapping saturation not in `[0, 1]`.
    #[error("invalid tone curve saturation: {0}")]
    InvalidSaturation(f32),

    /// LUT edge length outside the supported range.
    #[error("invalid LUT size: {0} (expected 2..=129)")]
    InvalidLutSize(usize),

    /// Settings file could not be parsed.
    #[error("settings parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for tone mapping operations.
pub type TonemapResult<T> = Result<T, TonemapError>;
