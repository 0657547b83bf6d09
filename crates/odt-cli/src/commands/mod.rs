//! CLI command implementations

pub mod bake;
pub mod curve;
pub mod eval;
pub mod presets;

use anyhow::{bail, Context, Result};
use odt_math::Vec3;
use odt_primaries::DisplayPrimaries;
use odt_tonemap::{AcesSettings, OutputMode, Preset, ReferenceCurve, TransformConfig};
use tracing::debug;

use crate::SettingsArgs;

/// Builds settings from file / preset / defaults, then applies overrides.
pub fn resolve_settings(args: &SettingsArgs) -> Result<AcesSettings> {
    if args.settings.is_some() && args.preset.is_some() {
        bail!("--settings and --preset are mutually exclusive");
    }

    let mut s = if let Some(path) = &args.settings {
        AcesSettings::from_file(path)
            .with_context(|| format!("Failed to load settings: {}", path.display()))?
    } else if let Some(name) = &args.preset {
        name.parse::<Preset>()?.settings()
    } else {
        AcesSettings::default()
    };

    if let Some(curve) = &args.curve {
        s.curve = curve.parse::<ReferenceCurve>()?;
    }
    if let Some(display) = &args.display {
        s.display = display.parse::<DisplayPrimaries>()?;
    }
    if let Some(mode) = &args.output_mode {
        s.output_mode = mode.parse::<OutputMode>()?;
    }

    let range_override = args.min_stops.is_some()
        || args.max_stops.is_some()
        || args.max_nits.is_some()
        || args.mid_gray_scale.is_some();
    if args.adjustable || range_override {
        s.adjustable = true;
    }
    if let Some(v) = args.min_stops {
        s.min_stops = v;
    }
    if let Some(v) = args.max_stops {
        s.max_stops = v;
    }
    if let Some(v) = args.max_nits {
        s.max_level = v;
    }
    if let Some(v) = args.mid_gray_scale {
        s.mid_gray_scale = v;
    }

    if args.no_cat {
        s.adjust_white_point = false;
    }
    if args.no_desat {
        s.desaturate = false;
    }
    if args.no_surround {
        s.dim_surround = false;
    }
    if let Some(g) = args.surround_gamma {
        s.surround_gamma = g;
    }
    if let Some(g) = args.output_gamma {
        s.output_gamma = g;
    }
    if let Some(sat) = args.luminance {
        s.luminance_only = true;
        s.tone_curve_saturation = sat;
    }

    s.validate().context("Invalid tone mapping settings")?;
    debug!(?s, "resolved settings");
    Ok(s)
}

/// Resolves settings straight to a transform.
pub fn resolve_config(args: &SettingsArgs) -> Result<TransformConfig> {
    Ok(resolve_settings(args)?.transform_config()?)
}

/// Parses `r,g,b` (commas or whitespace). A single value is splatted.
pub fn parse_triple(s: &str) -> Result<Vec3> {
    let parts: Vec<f32> = s
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|p| !p.is_empty())
        .map(|p| p.parse::<f32>().with_context(|| format!("Invalid number '{p}' in '{s}'")))
        .collect::<Result<_>>()?;
    match parts.as_slice() {
        [v] => Ok(Vec3::splat(*v)),
        [r, g, b] => Ok(Vec3::new(*r, *g, *b)),
        _ => bail!("Expected r,g,b or a single value, got '{s}'"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_triple() {
        assert_eq!(parse_triple("0.1,0.2,0.3").unwrap(), Vec3::new(0.1, 0.2, 0.3));
        assert_eq!(parse_triple("0.18").unwrap(), Vec3::splat(0.18));
        assert_eq!(parse_triple("1 0 0").unwrap(), Vec3::new(1.0, 0.0, 0.0));
        assert!(parse_triple("1,2").is_err());
        assert!(parse_triple("a,b,c").is_err());
    }

    #[test]
    fn test_defaults() {
        let s = resolve_settings(&SettingsArgs::default()).unwrap();
        assert_eq!(s, AcesSettings::default());
    }

    #[test]
    fn test_overrides_imply_adjustable() {
        let args = SettingsArgs {
            curve: Some("1000".into()),
            max_nits: Some(600.0),
            output_mode: Some("pq".into()),
            no_surround: true,
            ..SettingsArgs::default()
        };
        let s = resolve_settings(&args).unwrap();
        assert!(s.adjustable);
        assert!(!s.dim_surround);
        assert_eq!(s.curve, ReferenceCurve::Hdr1000);
        assert_eq!(s.output_mode, OutputMode::Pq);
        let cfg = resolve_config(&args).unwrap();
        assert_eq!(cfg.curve.max_point.y, 600.0);
    }

    #[test]
    fn test_preset_and_override() {
        let args = SettingsArgs {
            preset: Some("edr".into()),
            display: Some("p3".into()),
            ..SettingsArgs::default()
        };
        let s = resolve_settings(&args).unwrap();
        assert_eq!(s.mid_gray_scale, 3.0);
        assert_eq!(s.display, DisplayPrimaries::DciP3);
    }

    #[test]
    fn test_bad_values() {
        let bad_curve = SettingsArgs {
            curve: Some("600".into()),
            ..SettingsArgs::default()
        };
        assert!(resolve_settings(&bad_curve).is_err());

        let bad_sat = SettingsArgs {
            luminance: Some(3.0),
            ..SettingsArgs::default()
        };
        assert!(resolve_settings(&bad_sat).is_err());
    }
}
