//! Display targets for the output transform.
//!
//! A display is described by a [`GamutPair`]: the XYZ -> display RGB matrix
//! used to encode, and its inverse used by the scRGB path to get back to
//! XYZ. Both are stored so that the per-pixel path never inverts anything.

use std::fmt;
use std::str::FromStr;

use odt_math::Mat3;
use serde::{Deserialize, Serialize};

use crate::{rgb_to_xyz_matrix, Primaries};

/// Built-in display primaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DisplayPrimaries {
    /// Rec.709 / sRGB, D65.
    #[default]
    #[serde(alias = "srgb")]
    Rec709,
    /// DCI-P3, DCI white.
    #[serde(alias = "p3")]
    DciP3,
    /// Rec.2020 / BT.2020, D65.
    #[serde(alias = "rec2020")]
    Bt2020,
}

impl DisplayPrimaries {
    /// All built-in displays.
    pub const ALL: [Self; 3] = [Self::Rec709, Self::DciP3, Self::Bt2020];

    /// Canonical name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Rec709 => "rec709",
            Self::DciP3 => "dci-p3",
            Self::Bt2020 => "bt2020",
        }
    }

    /// Chromaticities of this display.
    pub const fn primaries(self) -> Primaries {
        match self {
            Self::Rec709 => crate::SRGB,
            Self::DciP3 => crate::DCI_P3,
            Self::Bt2020 => crate::REC2020,
        }
    }

    /// Fixed-precision matrix pair.
    pub const fn gamut(self) -> GamutPair {
        match self {
            Self::Rec709 => GamutPair {
                xyz_to_display: crate::XYZ_TO_SRGB,
                display_to_xyz: crate::SRGB_TO_XYZ,
            },
            Self::DciP3 => GamutPair {
                xyz_to_display: XYZ_TO_DCI_P3,
                display_to_xyz: DCI_P3_TO_XYZ,
            },
            Self::Bt2020 => GamutPair {
                xyz_to_display: XYZ_TO_BT2020,
                display_to_xyz: BT2020_TO_XYZ,
            },
        }
    }
}

impl fmt::Display for DisplayPrimaries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a display name is not recognised.
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown display primaries '{0}' (expected rec709, dci-p3 or bt2020)")]
pub struct UnknownDisplay(pub String);

impl FromStr for DisplayPrimaries {
    type Err = UnknownDisplay;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace(['.', '_', '-'], "").as_str() {
            "rec709" | "srgb" | "bt709" => Ok(Self::Rec709),
            "dcip3" | "p3" => Ok(Self::DciP3),
            "bt2020" | "rec2020" => Ok(Self::Bt2020),
            _ => Err(UnknownDisplay(s.to_string())),
        }
    }
}

/// Forward / inverse matrix pair for a display gamut.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GamutPair {
    /// XYZ -> display RGB.
    pub xyz_to_display: Mat3,
    /// Display RGB -> XYZ.
    pub display_to_xyz: Mat3,
}

impl GamutPair {
    /// Derives a pair for arbitrary primaries.
    ///
    /// ```rust
    /// use odt_primaries::{DisplayPrimaries, GamutPair, DISPLAY_P3};
    ///
    /// let pair = GamutPair::from_primaries(&DISPLAY_P3);
    /// assert_ne!(pair, DisplayPrimaries::DciP3.gamut());
    /// ```
    pub fn from_primaries(primaries: &Primaries) -> Self {
        let display_to_xyz = rgb_to_xyz_matrix(primaries);
        Self {
            xyz_to_display: display_to_xyz.inverse().unwrap_or(Mat3::IDENTITY),
            display_to_xyz,
        }
    }
}

impl Default for GamutPair {
    fn default() -> Self {
        DisplayPrimaries::default().gamut()
    }
}

impl From<DisplayPrimaries> for GamutPair {
    fn from(d: DisplayPrimaries) -> Self {
        d.gamut()
    }
}

/// XYZ -> DCI-P3 (DCI white).
pub const XYZ_TO_DCI_P3: Mat3 = Mat3::from_rows([
    [2.72539496, -1.01800334, -0.44016343],
    [-0.79516816, 1.68973231, 0.02264720],
    [0.04124193, -0.08763910, 1.10092998],
]);

/// DCI-P3 (DCI white) -> XYZ.
pub const DCI_P3_TO_XYZ: Mat3 = Mat3::from_rows([
    [0.44516969, 0.27713439, 0.17228261],
    [0.20949161, 0.72159523, 0.06891304],
    [0.00000000, 0.04706058, 0.90735501],
]);

/// XYZ -> BT.2020.
pub const XYZ_TO_BT2020: Mat3 = Mat3::from_rows([
    [1.71665096, -0.35567081, -0.25336623],
    [-0.66668433, 1.61648130, 0.01576854],
    [0.01763985, -0.04277061, 0.94210327],
]);

/// BT.2020 -> XYZ.
pub const BT2020_TO_XYZ: Mat3 = Mat3::from_rows([
    [0.63695812, 0.14461692, 0.16888094],
    [0.26270023, 0.67799807, 0.05930171],
    [0.00000000, 0.02807269, 1.06098485],
]);
