//! Baking the full transform into a 3D LUT.
//!
//! The LUT is indexed through a shaper so that its texels cover the curve's
//! scene range evenly in a perceptual domain:
//!
//! ```text
//! texel centre t in (0,1)  --shaper decode-->  scene-linear sRGB
//!                          --eval_aces-->      display code value (f16 RGBA)
//! ```
//!
//! Storage is R fastest, then G, then B: `index = r + size * (g + size * b)`.
//! Blue slices are filled in parallel.

use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

use half::f16;
use odt_math::Vec3;
use odt_transfer::pq;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::{TonemapError, TonemapResult};
use crate::odt::{eval_aces, TransformConfig};

/// Supported LUT edge lengths.
pub const LUT_SIZE_RANGE: std::ops::RangeInclusive<usize> = 2..=129;

/// Floor for the log2 shaper's lower limit.
const LOG2_MIN_INPUT: f32 = 1e-7;

/// LUT input encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Shaper {
    /// Log2 between the curve's scene limits.
    #[default]
    Log2,
    /// PQ over the curve's scene limits mapped onto 0..10000.
    Pq,
}

impl Shaper {
    /// Canonical name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Log2 => "log2",
            Self::Pq => "pq",
        }
    }
}

impl fmt::Display for Shaper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Shaper {
    type Err = TonemapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "log2" | "log" => Ok(Self::Log2),
            "pq" | "st2084" => Ok(Self::Pq),
            _ => Err(TonemapError::UnknownShaper(s.to_string())),
        }
    }
}

/// A shaper fitted to a scene range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShaperParams {
    /// Encoding
    pub kind: Shaper,
    /// Multiplier in the shaper domain
    pub scale: f32,
    /// Offset in the shaper domain
    pub bias: f32,
}

impl ShaperParams {
    /// Fits `kind` so that `[min, max]` scene-linear maps onto `[0, 1]`.
    pub fn fit(kind: Shaper, min: f32, max: f32) -> Self {
        match kind {
            Shaper::Log2 => {
                let lo = min.max(LOG2_MIN_INPUT).log2();
                let scale = 1.0 / (max.log2() - lo);
                Self { kind, scale, bias: -scale * lo }
            }
            Shaper::Pq => {
                let scale = pq::L_MAX / (max - min);
                Self { kind, scale, bias: -scale * min }
            }
        }
    }

    /// Shaper value to scene-linear.
    #[inline]
    pub fn decode(&self, t: f32) -> f32 {
        match self.kind {
            Shaper::Log2 => ((t - self.bias) / self.scale).exp2(),
            Shaper::Pq => (pq::eotf(t) - self.bias) / self.scale,
        }
    }

    /// Scene-linear to shaper value.
    #[inline]
    pub fn encode(&self, x: f32) -> f32 {
        match self.kind {
            Shaper::Log2 => x.max(LOG2_MIN_INPUT).log2() * self.scale + self.bias,
            Shaper::Pq => pq::oetf(x * self.scale + self.bias),
        }
    }
}

/// A baked cubic LUT with RGBA half-float texels.
#[derive(Debug, Clone, PartialEq)]
pub struct BakedLut {
    /// Edge length
    pub size: usize,
    /// Input shaper
    pub shaper: ShaperParams,
    /// `size^3` texels, R fastest
    pub data: Vec<[f16; 4]>,
}

impl BakedLut {
    #[inline]
    fn index(&self, r: usize, g: usize, b: usize) -> usize {
        r + self.size * (g + self.size * b)
    }

    /// Texel at integer coordinates, as `f32` RGB.
    pub fn texel(&self, r: usize, g: usize, b: usize) -> [f32; 3] {
        let t = self.data[self.index(r, g, b)];
        [t[0].to_f32(), t[1].to_f32(), t[2].to_f32()]
    }

    /// Writes the LUT as an Adobe/Resolve `.cube` file.
    pub fn write_cube<P: AsRef<Path>>(&self, path: P) -> TonemapResult<()> {
        let file = File::create(path.as_ref())?;
        let mut writer = BufWriter::new(file);
        self.write_cube_to(&mut writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Writes `.cube` text to any writer.
    pub fn write_cube_to<W: Write>(&self, mut writer: W) -> TonemapResult<()> {
        let s = &self.shaper;
        writeln!(writer, "# Generated by odt-tonemap")?;
        writeln!(writer, "# shaper {} scale {} bias {}", s.kind, s.scale, s.bias)?;
        writeln!(writer, "LUT_3D_SIZE {}", self.size)?;
        writeln!(writer)?;

        for texel in &self.data {
            let [r, g, b, _] = texel.map(f16::to_f32);
            writeln!(writer, "{r:.6} {g:.6} {b:.6}")?;
        }
        Ok(())
    }
}

/// Samples `config` over a `size^3` grid through `shaper`.
///
/// ```rust
/// use odt_tonemap::{bake_lut, ReferenceCurve, Shaper, TransformConfig, OutputMode};
/// use odt_primaries::DisplayPrimaries;
///
/// let cfg = TransformConfig::new(
///     ReferenceCurve::Ldr48.params(),
///     DisplayPrimaries::Rec709,
///     OutputMode::Ldr,
/// );
/// let lut = bake_lut(&cfg, 9, Shaper::Log2).unwrap();
/// assert_eq!(lut.data.len(), 9 * 9 * 9);
/// ```
pub fn bake_lut(config: &TransformConfig, size: usize, shaper: Shaper) -> TonemapResult<BakedLut> {
    if !LUT_SIZE_RANGE.contains(&size) {
        return Err(TonemapError::InvalidLutSize(size));
    }

    let limits = config.curve.limits;
    let params = ShaperParams::fit(shaper, limits.x, limits.y);
    debug!(size, shaper = %shaper, scale = params.scale, bias = params.bias, "baking LUT");

    // Decoded sample positions are shared by all three axes.
    let axis: Vec<f32> = (0..size)
        .map(|k| params.decode((k as f32 + 0.5) / size as f32))
        .collect();

    let mut data = vec![[f16::ZERO; 4]; size * size * size];
    data.par_chunks_mut(size * size)
        .enumerate()
        .for_each(|(b, slice)| {
            trace!(slice = b, "baking slice");
            for g in 0..size {
                for r in 0..size {
                    let rgb = Vec3::new(axis[r], axis[g], axis[b]);
                    let out = eval_aces(rgb, config);
                    slice[r + size * g] = [
                        f16::from_f32(out.x),
                        f16::from_f32(out.y),
                        f16::from_f32(out.z),
                        f16::ONE,
                    ];
                }
            }
        });

    Ok(BakedLut { size, shaper: params, data })
}
