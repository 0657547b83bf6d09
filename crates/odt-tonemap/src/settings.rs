//! User-facing tone mapping settings and presets.
//!
//! [`AcesSettings`] is the serializable configuration surface. It is
//! validated and resolved once into an immutable [`TransformConfig`]; the
//! per-pixel path never sees it.
//!
//! ```yaml
//! # tonemap.yaml
//! output-mode: pq
//! display: bt2020
//! curve: hdr1000
//! adjustable: true
//! min-stops: -10
//! max-stops: 8
//! max-level: 600
//! desaturate: false
//! ```
//!
//! Missing keys take the [`Default`] values.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use odt_primaries::DisplayPrimaries;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::{resolve_curve, CurveSelector, ReferenceCurve};
use crate::error::{TonemapError, TonemapResult};
use crate::odt::{OutputMode, TransformConfig, DIM_SURROUND_GAMMA, OUTPUT_GAMMA};

/// Highest luminance PQ can encode.
const PQ_PEAK_NITS: f32 = 10000.0;

/// Largest accepted mid grey multiplier.
const MAX_MID_GRAY_SCALE: f32 = 10.0;

/// Widest exposure range, in stops either side of mid grey.
const MAX_STOPS: f32 = 20.0;

/// Accepted display gamma range.
const OUTPUT_GAMMA_RANGE: std::ops::RangeInclusive<f32> = 0.2..=4.0;

/// Tone mapper settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct AcesSettings {
    /// Display encoding.
    pub output_mode: OutputMode,
    /// Gamma on Y for the dim surround adjustment.
    pub surround_gamma: f32,
    /// Exponent handed to pure-gamma displays.
    pub output_gamma: f32,
    /// Luminance-mapping blend weight, `[0, 1]`.
    pub tone_curve_saturation: f32,
    /// Display gamut.
    pub display: DisplayPrimaries,
    /// Reference curve, used as-is or as the base for adaptation.
    pub curve: ReferenceCurve,
    /// Retarget the curve with `min-stops`, `max-stops`, `max-level`, `mid-gray-scale`.
    pub adjustable: bool,
    /// Chromatic adaptation from the ACES white to D65.
    pub adjust_white_point: bool,
    /// Post-curve desaturation.
    pub desaturate: bool,
    /// Dark to dim surround compensation.
    pub dim_surround: bool,
    /// Tone map luminance instead of each channel.
    pub luminance_only: bool,
    /// Darkest exposure in stops below mid grey; `>= 0` uses the curve's.
    pub min_stops: f32,
    /// Brightest exposure in stops above mid grey; `<= 0` uses the curve's.
    pub max_stops: f32,
    /// Peak luminance in nits; `<= 0` uses the curve's.
    pub max_level: f32,
    /// Multiplier on mid grey output luminance.
    pub mid_gray_scale: f32,
}

impl Default for AcesSettings {
    fn default() -> Self {
        Self {
            output_mode: OutputMode::ScRgb,
            surround_gamma: DIM_SURROUND_GAMMA,
            output_gamma: OUTPUT_GAMMA,
            tone_curve_saturation: 1.0,
            display: DisplayPrimaries::Rec709,
            curve: ReferenceCurve::Ldr48,
            adjustable: false,
            adjust_white_point: true,
            desaturate: true,
            dim_surround: true,
            luminance_only: false,
            min_stops: -6.5,
            max_stops: 8.0,
            max_level: -1.0,
            mid_gray_scale: 1.0,
        }
    }
}

impl AcesSettings {
    /// Parses YAML and validates the result.
    pub fn from_yaml_str(s: &str) -> TonemapResult<Self> {
        let settings: Self = serde_yaml::from_str(s)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Loads settings from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> TonemapResult<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading tone mapping settings");
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }

    /// Serializes to YAML.
    pub fn to_yaml(&self) -> TonemapResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Checks the ranges the transform relies on.
    pub fn validate(&self) -> TonemapResult<()> {
        if !(self.surround_gamma > 0.0 && self.surround_gamma <= 2.0) {
            return Err(TonemapError::InvalidSurroundGamma(self.surround_gamma));
        }
        if !(0.0..=1.0).contains(&self.tone_curve_saturation) {
            return Err(TonemapError::InvalidSaturation(self.tone_curve_saturation));
        }
        if !OUTPUT_GAMMA_RANGE.contains(&self.output_gamma) {
            return Err(TonemapError::InvalidOutputGamma(self.output_gamma));
        }
        if !self.adjustable {
            return Ok(());
        }

        let reference = self.curve.params();
        let mid = reference.mid_point.y * self.mid_gray_scale;
        if !(self.mid_gray_scale > 0.0 && self.mid_gray_scale <= MAX_MID_GRAY_SCALE)
            || mid <= reference.min_point.y
        {
            return Err(TonemapError::InvalidMidGrayScale(self.mid_gray_scale));
        }

        let (min, max) = self.effective_stops();
        if !(min.is_finite() && max.is_finite() && min >= -MAX_STOPS && max <= MAX_STOPS) {
            return Err(TonemapError::InvalidStopRange {
                min: self.min_stops,
                max: self.max_stops,
            });
        }

        let peak = self.effective_peak();
        if !peak.is_finite() || peak > PQ_PEAK_NITS || peak <= mid {
            return Err(TonemapError::InvalidPeak(peak));
        }
        Ok(())
    }

    /// Exposure range in stops after default substitution.
    pub fn effective_stops(&self) -> (f32, f32) {
        let (lo, hi) = self.curve.default_stops();
        let min = if self.min_stops >= 0.0 { lo } else { self.min_stops };
        let max = if self.max_stops <= 0.0 { hi } else { self.max_stops };
        (min, max)
    }

    /// Peak luminance after default substitution.
    pub fn effective_peak(&self) -> f32 {
        if self.adjustable && self.max_level > 0.0 {
            self.max_level
        } else {
            self.curve.peak_nits()
        }
    }

    /// Curve selection these settings describe.
    pub fn selector(&self) -> CurveSelector {
        if self.adjustable {
            CurveSelector::Adjustable {
                curve: self.curve,
                min_stop: self.min_stops,
                max_stop: self.max_stops,
                max_nits: self.max_level,
                mid_gray_scale: self.mid_gray_scale,
            }
        } else {
            CurveSelector::Reference(self.curve)
        }
    }

    /// Validates and builds the immutable per-pixel configuration.
    pub fn transform_config(&self) -> TonemapResult<TransformConfig> {
        self.validate()?;
        let curve = resolve_curve(&self.selector());
        debug!(
            curve = %self.curve,
            adjustable = self.adjustable,
            display = %self.display,
            output = %self.output_mode,
            "building transform config"
        );
        Ok(TransformConfig {
            curve,
            gamut: self.display.gamut(),
            output: self.output_mode,
            apply_cat: self.adjust_white_point,
            desaturate: self.desaturate,
            adjust_surround: self.dim_surround,
            surround_gamma: self.surround_gamma,
            output_gamma: self.output_gamma,
            tonemap_luminance: self.luminance_only,
            saturation_level: self.tone_curve_saturation,
        })
    }
}

/// Named starting points for common displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Preset {
    /// 1000 nit HDR10 monitor, full exposure range.
    Hdr1000,
    /// 1000 nit HDR10 monitor, compressed range for more contrast.
    Hdr1000Sharp,
    /// Standard dynamic range sRGB.
    Sdr,
    /// Extended dynamic range on an sRGB display, brighter mid grey.
    Edr,
    /// Extended dynamic range on an sRGB display, wide exposure range.
    EdrExtreme,
}

impl Preset {
    /// All presets.
    pub const ALL: [Self; 5] = [
        Self::Hdr1000,
        Self::Hdr1000Sharp,
        Self::Sdr,
        Self::Edr,
        Self::EdrExtreme,
    ];

    /// Canonical name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Hdr1000 => "hdr1000",
            Self::Hdr1000Sharp => "hdr1000-sharp",
            Self::Sdr => "sdr",
            Self::Edr => "edr",
            Self::EdrExtreme => "edr-extreme",
        }
    }

    /// Settings for this preset.
    pub fn settings(self) -> AcesSettings {
        let base = AcesSettings {
            adjustable: true,
            adjust_white_point: true,
            desaturate: false,
            mid_gray_scale: 1.0,
            ..AcesSettings::default()
        };
        match self {
            Self::Hdr1000 => AcesSettings {
                curve: ReferenceCurve::Hdr1000,
                min_stops: -12.0,
                max_stops: 10.0,
                display: DisplayPrimaries::Bt2020,
                output_mode: OutputMode::ScRgb,
                ..base
            },
            Self::Hdr1000Sharp => AcesSettings {
                curve: ReferenceCurve::Hdr1000,
                min_stops: -8.0,
                max_stops: 8.0,
                display: DisplayPrimaries::Bt2020,
                output_mode: OutputMode::ScRgb,
                ..base
            },
            Self::Sdr => AcesSettings {
                curve: ReferenceCurve::Ldr48,
                min_stops: -6.5,
                max_stops: 6.5,
                desaturate: true,
                display: DisplayPrimaries::Rec709,
                output_mode: OutputMode::Ldr,
                ..base
            },
            Self::Edr => AcesSettings {
                curve: ReferenceCurve::Hdr1000,
                min_stops: -8.0,
                max_stops: 8.0,
                mid_gray_scale: 3.0,
                display: DisplayPrimaries::Rec709,
                output_mode: OutputMode::Ldr,
                ..base
            },
            Self::EdrExtreme => AcesSettings {
                curve: ReferenceCurve::Hdr1000,
                min_stops: -12.0,
                max_stops: 9.0,
                display: DisplayPrimaries::Rec709,
                output_mode: OutputMode::Ldr,
                ..base
            },
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = TonemapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|p| p.name() == key)
            .ok_or_else(|| TonemapError::UnknownPreset(s.to_string()))
    }
}
