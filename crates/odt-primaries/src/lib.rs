//! # odt-primaries
//!
//! Color primaries, RGB <-> XYZ matrix generation and the fixed ACES
//! gamut matrices used by the output transform.
//!
//! # Included Color Spaces
//!
//! | Color Space | White | Role |
//! |-------------|-------|------|
//! | sRGB / Rec.709 | D65 | scene input, LDR / scRGB display |
//! | DCI-P3 | DCI | cinema display |
//! | Rec.2020 | D65 | HDR display |
//! | ACES AP0 | ACES | RRT input / output (OCES) |
//! | ACES AP1 | ACES | rendering working space |
//!
//! # Fixed vs derived matrices
//!
//! The pipeline uses the published fixed-precision tables (`AP0_TO_XYZ`,
//! [`DisplayPrimaries::gamut`], ...). [`rgb_to_xyz_matrix`] derives the same
//! matrices from chromaticities; it backs [`GamutPair::from_primaries`] for
//! displays outside the built-in set.
//!
//! # Usage
//!
//! ```rust
//! use odt_primaries::{rgb_to_xyz_matrix, SRGB, SRGB_TO_XYZ};
//!
//! let derived = rgb_to_xyz_matrix(&SRGB);
//! assert!(derived.max_abs_diff(&SRGB_TO_XYZ) < 1e-4);
//! ```
//!
//! # Dependencies
//!
//! - `odt-math` - matrix operations
//! - [`serde`] - (de)serialization of [`DisplayPrimaries`]
//!
//! # Used By
//!
//! - `odt-tonemap` - RRT / ODT color conversions

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod display;

pub use display::*;

use odt_math::{Mat3, Vec3};

/// Primaries and white point as CIE xy chromaticities.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Primaries {
    /// Red primary (x, y)
    pub r: (f32, f32),
    /// Green primary (x, y)
    pub g: (f32, f32),
    /// Blue primary (x, y)
    pub b: (f32, f32),
    /// White point (x, y)
    pub w: (f32, f32),
    /// Display name
    pub name: &'static str,
}

impl Primaries {
    /// White point as XYZ (Y=1).
    #[inline]
    pub fn white_xyz(&self) -> Vec3 {
        xy_to_xyz(self.w.0, self.w.1)
    }
}

// ============================================================================
// White points
// ============================================================================

/// D65 white point chromaticity.
pub const D65_XY: (f32, f32) = (0.31270, 0.32900);

/// ACES white point chromaticity (~D60).
pub const ACES_WHITE_XY: (f32, f32) = (0.32168, 0.33767);

/// DCI theatrical white point chromaticity.
pub const DCI_XY: (f32, f32) = (0.31400, 0.35100);

// ============================================================================
// Primaries
// ============================================================================

/// sRGB / Rec.709.
pub const SRGB: Primaries = Primaries {
    r: (0.6400, 0.3300),
    g: (0.3000, 0.6000),
    b: (0.1500, 0.0600),
    w: D65_XY,
    name: "sRGB",
};

/// Rec.2020.
pub const REC2020: Primaries = Primaries {
    r: (0.7080, 0.2920),
    g: (0.1700, 0.7970),
    b: (0.1310, 0.0460),
    w: D65_XY,
    name: "Rec.2020",
};

/// DCI-P3 with the DCI white point.
pub const DCI_P3: Primaries = Primaries {
    r: (0.6800, 0.3200),
    g: (0.2650, 0.6900),
    b: (0.1500, 0.0600),
    w: DCI_XY,
    name: "DCI-P3",
};

/// Display P3 (DCI-P3 primaries, D65 white).
pub const DISPLAY_P3: Primaries = Primaries { w: D65_XY, name: "Display P3", ..DCI_P3 };

/// ACES AP0 (ACES 2065-1).
pub const ACES_AP0: Primaries = Primaries {
    r: (0.7347, 0.2653),
    g: (0.0000, 1.0000),
    b: (0.0001, -0.0770),
    w: ACES_WHITE_XY,
    name: "ACES AP0",
};

/// ACES AP1 (ACEScg).
pub const ACES_AP1: Primaries = Primaries {
    r: (0.7130, 0.2930),
    g: (0.1650, 0.8300),
    b: (0.1280, 0.0440),
    w: ACES_WHITE_XY,
    name: "ACES AP1",
};

// ============================================================================
// Matrix generation
// ============================================================================

fn xy_to_xyz(x: f32, y: f32) -> Vec3 {
    if y.abs() < 1e-10 {
        Vec3::ZERO
    } else {
        Vec3::new(x / y, 1.0, (1.0 - x - y) / y)
    }
}

/// RGB -> XYZ matrix for a set of primaries.
///
/// Primaries become the matrix columns, scaled so that RGB (1, 1, 1) maps
/// to the white point with Y = 1.
pub fn rgb_to_xyz_matrix(primaries: &Primaries) -> Mat3 {
    let r = xy_to_xyz(primaries.r.0, primaries.r.1);
    let g = xy_to_xyz(primaries.g.0, primaries.g.1);
    let b = xy_to_xyz(primaries.b.0, primaries.b.1);

    let m = Mat3::from_col_vecs(r, g, b);
    let s = m.inverse().unwrap_or(Mat3::IDENTITY) * primaries.white_xyz();

    Mat3::from_col_vecs(r * s.x, g * s.y, b * s.z)
}

/// XYZ -> RGB matrix, the inverse of [`rgb_to_xyz_matrix`].
pub fn xyz_to_rgb_matrix(primaries: &Primaries) -> Mat3 {
    rgb_to_xyz_matrix(primaries).inverse().unwrap_or(Mat3::IDENTITY)
}

/// RGB -> RGB through XYZ. No chromatic adaptation is applied.
///
/// The pipeline uses the fixed tables below; this rebuilds them for checks.
pub fn rgb_to_rgb_matrix(src: &Primaries, dst: &Primaries) -> Mat3 {
    xyz_to_rgb_matrix(dst) * rgb_to_xyz_matrix(src)
}

// ============================================================================
// Fixed ACES matrices
// ============================================================================

/// AP0 -> XYZ.
pub const AP0_TO_XYZ: Mat3 = Mat3::from_rows([
    [0.95255238, 0.00000000, 0.00009368],
    [0.34396642, 0.72816616, -0.07213254],
    [-0.00000004, 0.00000000, 1.00882506],
]);

/// XYZ -> AP0.
pub const XYZ_TO_AP0: Mat3 = Mat3::from_rows([
    [1.04981101, 0.00000000, -0.00009748],
    [-0.49590296, 1.37331295, 0.09824003],
    [0.00000004, 0.00000000, 0.99125212],
]);

/// AP1 -> XYZ.
pub const AP1_TO_XYZ: Mat3 = Mat3::from_rows([
    [0.66245413, 0.13400421, 0.15618768],
    [0.27222872, 0.67408168, 0.05368952],
    [-0.00557466, 0.00406073, 1.01033902],
]);

/// XYZ -> AP1.
pub const XYZ_TO_AP1: Mat3 = Mat3::from_rows([
    [1.64102352, -0.32480335, -0.23642471],
    [-0.66366309, 1.61533189, 0.01675635],
    [0.01172191, -0.00828444, 0.98839492],
]);

/// AP0 -> AP1.
pub const AP0_TO_AP1: Mat3 = Mat3::from_rows([
    [1.45143950, -0.23651081, -0.21492855],
    [-0.07655388, 1.17623007, -0.09967594],
    [0.00831613, -0.00603245, 0.99771625],
]);

/// AP1 -> AP0.
pub const AP1_TO_AP0: Mat3 = Mat3::from_rows([
    [0.69545215, 0.14067869, 0.16386905],
    [0.04479461, 0.85967094, 0.09553432],
    [-0.00552587, 0.00402521, 1.00150073],
]);

/// sRGB -> XYZ (D65).
pub const SRGB_TO_XYZ: Mat3 = Mat3::from_rows([
    [0.41239089, 0.35758430, 0.18048084],
    [0.21263906, 0.71516860, 0.07219233],
    [0.01933082, 0.11919472, 0.95053232],
]);

/// XYZ (D65) -> sRGB.
pub const XYZ_TO_SRGB: Mat3 = Mat3::from_rows([
    [3.24096942, -1.53738296, -0.49861076],
    [-0.96924388, 1.87596786, 0.04155510],
    [0.05563002, -0.20397684, 1.05697131],
]);

/// AP1 luminance weights: the Y row of [`AP1_TO_XYZ`].
pub const AP1_RGB2Y: Vec3 = Vec3::new(0.27222872, 0.67408168, 0.05368952);
