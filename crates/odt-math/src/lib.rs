//! # odt-math
//!
//! Math primitives for the ACES output transform.
//!
//! - [`Vec3`] - RGB / XYZ / xyY triplets
//! - [`Mat3`] - 3x3 matrices for gamut and white point conversion
//! - [`Mat3::saturation`] - luma-preserving saturation matrix
//! - [`xyz_to_xyy`] / [`xyy_to_xyz`] - chromaticity round trip
//! - Chromatic adaptation between D65 and the ACES white point
//!
//! # Design
//!
//! All matrix operations assume **row-major** storage and **column vectors**:
//!
//! ```text
//! result = matrix * vector
//! ```
//!
//! Every function is total over finite input. Divisions that could hit zero
//! are floored with small epsilons instead of returning errors, so the
//! per-pixel path never panics.
//!
//! # Usage
//!
//! ```rust
//! use odt_math::{Mat3, Vec3};
//!
//! let weights = Vec3::new(0.2722287, 0.6740817, 0.0536895);
//! let desat = Mat3::saturation(0.0, weights);
//! let grey = desat * Vec3::new(1.0, 0.0, 0.0);
//! assert!((grey.x - grey.y).abs() < 1e-6);
//! ```
//!
//! # Dependencies
//!
//! - [`glam`] - interop with the wider Rust math ecosystem
//!
//! # Used By
//!
//! - `odt-primaries` - RGB/XYZ matrix generation
//! - `odt-tonemap` - RRT and ODT stages

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod adapt;
mod chroma;
mod mat3;
mod vec3;

pub use adapt::*;
pub use chroma::*;
pub use mat3::*;
pub use vec3::*;
