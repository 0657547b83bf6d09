//! # odt-transfer
//!
//! Display encodings used at the end of the ACES output transform.
//!
//! # Terminology
//!
//! - **EOTF** (Electro-Optical Transfer Function): code value -> light
//! - **OETF** direction here means the inverse: light -> code value
//!
//! # Supported Transfer Functions
//!
//! | Module | Use Case | Linear range |
//! |--------|----------|--------------|
//! | [`pq`] | HDR10 / ST 2084 outputs | [0, 10000] cd/m2 |
//! | [`moncurve`] | sRGB-style gamma with linear toe (LDR) | [0, 1] |
//!
//! # Usage
//!
//! ```rust
//! use odt_transfer::{moncurve, pq};
//!
//! let code = pq::oetf(100.0);
//! assert!((code - 0.508).abs() < 0.001);
//!
//! let srgb = moncurve::encode(0.18, moncurve::SRGB);
//! assert!((srgb - 0.4614).abs() < 0.001);
//! ```
//!
//! # Domain
//!
//! Inputs outside the defined domain are clamped (code values to `[0, 1]`,
//! luminance to `>= 0`) so that no NaN leaves these functions.
//!
//! # Used By
//!
//! - `odt-tonemap` - output encoding and LUT shaper decoding

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod moncurve;
pub mod pq;

pub use moncurve::{decode as moncurve_decode, encode as moncurve_encode, MonCurve};
pub use pq::{eotf as pq_eotf, oetf as pq_oetf};
