//! Output Device Transform and the full scene-to-display pipeline.
//!
//! # Pipeline
//!
//! ```text
//! linear sRGB (D65)
//!   -> XYZ -> D65->ACES white -> AP0
//!   -> RRT                                  (rrt.rs)
//!   -> AP1 -> ODT tone curve                (per channel or luminance)
//!   -> linear code values (cinema limits)
//!   -> [surround gamma] -> [desat 0.93]
//!   -> XYZ -> [ACES white->D65] -> display RGB
//!   -> LDR (monitor curve) | PQ | scRGB
//! ```
//!
//! Everything is configured through an immutable [`TransformConfig`] that is
//! `Send + Sync` and cheap to copy, so any number of threads can evaluate
//! pixels against one configuration.

use std::fmt;
use std::str::FromStr;

use odt_math::{xyy_to_xyz, xyz_to_xyy, Mat3, Vec3, D60_TO_D65_CAT, D65_TO_D60_CAT};
use odt_primaries::{
    DisplayPrimaries, GamutPair, AP0_TO_AP1, AP1_RGB2Y, AP1_TO_XYZ, SRGB_TO_XYZ, XYZ_TO_AP0,
    XYZ_TO_AP1, XYZ_TO_SRGB,
};
use odt_transfer::{moncurve, pq};
use serde::{Deserialize, Serialize};

use crate::error::TonemapError;
use crate::rrt::rrt;
use crate::spline::SplineParams9;

/// Surround gamma for dark (cinema) to dim (living room) viewing.
pub const DIM_SURROUND_GAMMA: f32 = 0.9811;

/// Saturation applied after the tone curve when `desaturate` is set.
pub const ODT_SAT_FACTOR: f32 = 0.93;

/// Default exponent for pure-gamma displays.
pub const OUTPUT_GAMMA: f32 = 2.2;

/// scRGB encodes 80 nits as 1.0.
pub const SCRGB_WHITE_NITS: f32 = 80.0;

/// Floor for the luminance used to derive the luminance-only scale.
const LUMINANCE_FLOOR: f32 = 1e-10;

/// Display encoding at the end of the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputMode {
    /// Relative `[0, 1]` code values through the sRGB monitor curve.
    #[serde(alias = "srgb")]
    Ldr,
    /// Absolute luminance through SMPTE ST 2084.
    Pq,
    /// Linear sRGB primaries, 1.0 = 80 nits.
    #[default]
    #[serde(rename = "scrgb")]
    ScRgb,
}

impl OutputMode {
    /// All output modes.
    pub const ALL: [Self; 3] = [Self::Ldr, Self::Pq, Self::ScRgb];

    /// Index used by the shader constant block.
    pub const fn index(self) -> u32 {
        match self {
            Self::Ldr => 0,
            Self::Pq => 1,
            Self::ScRgb => 2,
        }
    }

    /// Canonical name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Ldr => "ldr",
            Self::Pq => "pq",
            Self::ScRgb => "scrgb",
        }
    }
}

impl fmt::Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OutputMode {
    type Err = TonemapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace(['-', '_'], "").as_str() {
            "ldr" | "sdr" | "srgb" => Ok(Self::Ldr),
            "pq" | "hdr10" | "st2084" => Ok(Self::Pq),
            "scrgb" => Ok(Self::ScRgb),
            _ => Err(TonemapError::UnknownOutputMode(s.to_string())),
        }
    }
}

/// Everything the ODT needs to evaluate a pixel.
///
/// Build one per configuration change, then share it read-only.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformConfig {
    /// Resolved ODT tone curve
    pub curve: SplineParams9,
    /// Destination gamut
    pub gamut: GamutPair,
    /// Final encoding
    pub output: OutputMode,
    /// Convert ACES white to D65 before the display matrix
    pub apply_cat: bool,
    /// Apply the 0.93 post-curve desaturation
    pub desaturate: bool,
    /// Apply [`alter_surround`] with `surround_gamma`
    pub adjust_surround: bool,
    /// Gamma on Y used when `adjust_surround` is set
    pub surround_gamma: f32,
    /// Exponent for pure-gamma displays, only carried to the shader block
    pub output_gamma: f32,
    /// Tone map luminance and blend towards the per-channel result
    pub tonemap_luminance: bool,
    /// Blend weight of the luminance-scaled result, 1 = luminance only
    pub saturation_level: f32,
}

impl TransformConfig {
    /// Creates a config with the stock ODT options: CAT on, desaturation
    /// on, dim surround on, per-channel tone mapping.
    pub fn new(curve: SplineParams9, display: DisplayPrimaries, output: OutputMode) -> Self {
        Self {
            curve,
            gamut: display.gamut(),
            output,
            apply_cat: true,
            desaturate: true,
            adjust_surround: true,
            surround_gamma: DIM_SURROUND_GAMMA,
            output_gamma: OUTPUT_GAMMA,
            tonemap_luminance: false,
            saturation_level: 1.0,
        }
    }

    /// Output luminance range of the curve, `(black, peak)` in nits.
    #[inline]
    pub fn cinema_limits(&self) -> (f32, f32) {
        self.curve.cinema_limits()
    }

    /// Sets chromatic adaptation.
    pub fn with_cat(mut self, on: bool) -> Self {
        self.apply_cat = on;
        self
    }

    /// Sets post-curve desaturation.
    pub fn with_desaturate(mut self, on: bool) -> Self {
        self.desaturate = on;
        self
    }

    /// Sets the surround adjustment; `None` disables it.
    pub fn with_surround(mut self, gamma: Option<f32>) -> Self {
        self.adjust_surround = gamma.is_some();
        if let Some(g) = gamma {
            self.surround_gamma = g;
        }
        self
    }

    /// Sets luminance tone mapping; `None` restores per-channel mapping.
    pub fn with_luminance_mapping(mut self, saturation_level: Option<f32>) -> Self {
        self.tonemap_luminance = saturation_level.is_some();
        if let Some(s) = saturation_level {
            self.saturation_level = s;
        }
        self
    }

    /// Sets the display gamma passed to the shader.
    pub fn with_output_gamma(mut self, gamma: f32) -> Self {
        self.output_gamma = gamma;
        self
    }

    /// Replaces the destination gamut.
    pub fn with_gamut(mut self, gamut: GamutPair) -> Self {
        self.gamut = gamut;
        self
    }

    /// Packs the configuration into the GPU constant block layout.
    pub fn shader_constants(&self) -> ShaderConstants {
        let (lo, hi) = self.cinema_limits();
        let c = &self.curve;
        let mut flags = 0;
        if self.adjust_surround {
            flags |= ShaderConstants::FLAG_SURROUND;
        }
        if self.desaturate {
            flags |= ShaderConstants::FLAG_DESATURATE;
        }
        if self.apply_cat {
            flags |= ShaderConstants::FLAG_CAT;
        }
        if self.tonemap_luminance {
            flags |= ShaderConstants::FLAG_LUMINANCE;
        }
        ShaderConstants {
            min: [c.min_point.x, c.min_point.y],
            mid: [c.mid_point.x, c.mid_point.y],
            max: [c.max_point.x, c.max_point.y],
            slope: [c.slope_low, c.slope_high],
            coefs: c.to_constants(),
            color_mat: pad_rows(&self.gamut.xyz_to_display),
            color_mat_inv: pad_rows(&self.gamut.display_to_xyz),
            cinema_limits: [lo, hi],
            output_mode: self.output.index(),
            flags,
            surround_gamma: self.surround_gamma,
            saturation: self.saturation_level,
            gamma: self.output_gamma,
        }
    }
}

/// GPU constant block for the parameterized ODT shader (std140-style rows).
#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(C)]
pub struct ShaderConstants {
    /// Curve min anchor
    pub min: [f32; 2],
    /// Curve mid anchor
    pub mid: [f32; 2],
    /// Curve max anchor
    pub max: [f32; 2],
    /// Low / high extension slopes
    pub slope: [f32; 2],
    /// `(low, high, 0, 0)` x 10
    pub coefs: [f32; 40],
    /// XYZ -> display, rows padded to 4
    pub color_mat: [f32; 12],
    /// Display -> XYZ, rows padded to 4
    pub color_mat_inv: [f32; 12],
    /// Curve output range
    pub cinema_limits: [f32; 2],
    /// [`OutputMode::index`]
    pub output_mode: u32,
    /// `FLAG_*` bits
    pub flags: u32,
    /// Surround gamma
    pub surround_gamma: f32,
    /// Luminance-mapping blend
    pub saturation: f32,
    /// Exponent for pure-gamma displays
    pub gamma: f32,
}

impl ShaderConstants {
    /// Surround adjustment enabled.
    pub const FLAG_SURROUND: u32 = 0x1;
    /// Desaturation enabled.
    pub const FLAG_DESATURATE: u32 = 0x2;
    /// Chromatic adaptation enabled.
    pub const FLAG_CAT: u32 = 0x4;
    /// Luminance tone mapping enabled.
    pub const FLAG_LUMINANCE: u32 = 0x8;
}

fn pad_rows(m: &Mat3) -> [f32; 12] {
    let mut out = [0.0; 12];
    for (row, dst) in m.m.iter().zip(out.chunks_exact_mut(4)) {
        dst[..3].copy_from_slice(row);
    }
    out
}

// ============================================================================
// Helpers
// ============================================================================

/// Maps luminance in `[y_min, y_max]` to a `[0, 1]` linear code value.
#[inline]
pub fn y_to_lin_cv(y: f32, y_max: f32, y_min: f32) -> f32 {
    (y - y_min) / (y_max - y_min)
}

/// Inverse of [`y_to_lin_cv`].
#[inline]
pub fn lin_cv_to_y(cv: f32, y_max: f32, y_min: f32) -> f32 {
    cv * (y_max - y_min) + y_min
}

/// Applies a gamma to luminance in xyY, keeping chromaticity.
///
/// Input and output are AP1 linear code values.
pub fn alter_surround(lin_cv: Vec3, gamma: f32) -> Vec3 {
    let mut xyy = xyz_to_xyy(AP1_TO_XYZ * lin_cv);
    xyy.z = xyy.z.max(0.0).powf(gamma);
    XYZ_TO_AP1 * xyy_to_xyz(xyy)
}

/// Compensates a dark-surround rendering for dim viewing.
pub fn dark_to_dim_surround(lin_cv: Vec3) -> Vec3 {
    alter_surround(lin_cv, DIM_SURROUND_GAMMA)
}

/// Reverses [`dark_to_dim_surround`].
pub fn dim_to_dark_surround(lin_cv: Vec3) -> Vec3 {
    alter_surround(lin_cv, 1.0 / DIM_SURROUND_GAMMA)
}

/// Linear sRGB (D65) to ACES 2065-1.
#[inline]
pub fn srgb_to_aces(rgb: Vec3) -> Vec3 {
    XYZ_TO_AP0 * (D65_TO_D60_CAT * (SRGB_TO_XYZ * rgb))
}

// ============================================================================
// Evaluation
// ============================================================================

/// Scene-linear sRGB (D65) to display code values.
///
/// ```rust
/// use odt_math::Vec3;
/// use odt_primaries::DisplayPrimaries;
/// use odt_tonemap::{eval_aces, OutputMode, ReferenceCurve, TransformConfig};
///
/// let cfg = TransformConfig::new(
///     ReferenceCurve::Hdr1000.params(),
///     DisplayPrimaries::Bt2020,
///     OutputMode::Pq,
/// )
/// .with_desaturate(false)
/// .with_surround(None);
///
/// let out = eval_aces(Vec3::splat(0.18), &cfg);
/// assert!((out.y - 0.2997).abs() < 2e-3);
/// ```
pub fn eval_aces(rgb: Vec3, config: &TransformConfig) -> Vec3 {
    odt(rrt(srgb_to_aces(rgb)), config)
}

/// OCES (RRT output, AP0) to display code values.
pub fn odt(oces: Vec3, config: &TransformConfig) -> Vec3 {
    let (lo, hi) = config.cinema_limits();
    let curve = &config.curve;

    let rgb_pre = AP0_TO_AP1 * oces;
    let per_channel = rgb_pre.map(|c| curve.eval(c));

    let rgb_post = if config.tonemap_luminance {
        let y = rgb_pre.dot(AP1_RGB2Y).max(LUMINANCE_FLOOR);
        let scale = curve.eval(y) / y;
        per_channel
            .lerp(rgb_pre * scale, config.saturation_level)
            .max(Vec3::splat(lo))
    } else {
        per_channel
    };

    let mut lin_cv = rgb_post.map(|y| y_to_lin_cv(y, hi, lo));

    if config.adjust_surround {
        lin_cv = alter_surround(lin_cv, config.surround_gamma);
    }
    if config.desaturate {
        lin_cv = Mat3::saturation(ODT_SAT_FACTOR, AP1_RGB2Y) * lin_cv;
    }

    let mut xyz = AP1_TO_XYZ * lin_cv;
    if config.apply_cat {
        xyz = D60_TO_D65_CAT * xyz;
    }
    let display = config.gamut.xyz_to_display * xyz;

    encode(display, config.output, lo, hi, &config.gamut)
}

fn encode(cv: Vec3, output: OutputMode, lo: f32, hi: f32, gamut: &GamutPair) -> Vec3 {
    match output {
        OutputMode::Ldr => cv.clamp01().map(|c| moncurve::encode(c, moncurve::SRGB)),
        OutputMode::Pq => cv.map(|c| pq::oetf(lin_cv_to_y(c, hi, lo).max(0.0))),
        OutputMode::ScRgb => {
            let nits = cv.map(|c| lin_cv_to_y(c, hi, lo).max(0.0));
            let srgb = XYZ_TO_SRGB * (gamut.display_to_xyz * nits);
            srgb * (1.0 / SCRGB_WHITE_NITS.min(hi))
        }
    }
}
