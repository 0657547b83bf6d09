//! # odt-tonemap
//!
//! Parameterized ACES Reference Rendering Transform and Output Device
//! Transform with adjustable tone curves.
//!
//! - **Segmented splines** - the RRT tone scale and the four ODT curves
//! - **Curve adaptation** - retarget a reference curve to any exposure
//!   range, peak luminance and mid grey level
//! - **Pipeline** - scene-linear sRGB in, LDR / PQ / scRGB out
//! - **Settings** - YAML configuration and presets
//! - **LUT bake** - the whole transform sampled into a shaped 3D LUT
//!
//! # Architecture
//!
//! ```text
//!                   odt-tonemap
//!                        |
//!          +-------------+-------------+
//!          |             |             |
//!    odt-transfer  odt-primaries       |
//!          |             |             |
//!          +------+------+             |
//!                 |                    |
//!             odt-math ----------------+
//! ```
//!
//! Inside the crate:
//!
//! ```text
//! spline -> catalog -> adapt      (curve data)
//! rrt                             (scene -> OCES)
//! odt                             (OCES -> display)
//! settings -> TransformConfig     (configuration)
//! bake                            (LUT generation)
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use odt_math::Vec3;
//! use odt_tonemap::{eval_aces, Preset};
//!
//! let config = Preset::Hdr1000.settings().transform_config().unwrap();
//! let out = eval_aces(Vec3::new(0.18, 0.18, 0.18), &config);
//! assert!(out.is_finite());
//! ```
//!
//! # Threading
//!
//! Curve resolution and settings validation happen once; the resulting
//! [`TransformConfig`] is plain data, so evaluation is safe from any number
//! of threads. [`bake_lut`] uses `rayon` for that.
//!
//! # Dependencies
//!
//! - [`odt-math`](odt_math) - Vec3, Mat3, chromatic adaptation
//! - [`odt-transfer`](odt_transfer) - PQ and the monitor curve
//! - [`odt-primaries`](odt_primaries) - gamut matrices and display targets

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod adapt;
pub mod bake;
pub mod catalog;
pub mod error;
pub mod odt;
pub mod rrt;
pub mod settings;
pub mod spline;

pub use adapt::adapt_spline;
pub use bake::{bake_lut, BakedLut, Shaper, ShaperParams};
pub use catalog::{resolve_curve, stops_to_linear, CurveSelector, ReferenceCurve, MID_GREY};
pub use error::{TonemapError, TonemapResult};
pub use odt::{
    alter_surround, dark_to_dim_surround, dim_to_dark_surround, eval_aces, lin_cv_to_y, odt,
    srgb_to_aces, y_to_lin_cv, OutputMode, ShaderConstants, TransformConfig,
};
pub use rrt::rrt;
pub use settings::{AcesSettings, Preset};
pub use spline::{rrt_spline, Point2, SplineParams5, SplineParams9, RRT_CURVE};

// Re-export sub-crates for advanced usage
pub use odt_math as math;
pub use odt_primaries as primaries;
pub use odt_transfer as transfer;

const _: () = {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<TransformConfig>();
    assert_send_sync::<BakedLut>();
};
