//! End-to-end pipeline validation.
//!
//! Reference values were computed with an independent double-precision
//! evaluation of the ACES 1.x RRT and the parameterized ODT using the same
//! curve tables and matrices.

use approx::assert_relative_eq;
use odt_math::Vec3;
use odt_primaries::DisplayPrimaries;
use odt_tonemap::transfer::pq;
use odt_tonemap::{
    adapt_spline, eval_aces, resolve_curve, stops_to_linear, AcesSettings, CurveSelector,
    OutputMode, Preset, ReferenceCurve, TransformConfig,
};

const GREY: Vec3 = Vec3::splat(0.18);

fn assert_grey(out: Vec3, expect: f32, tol: f32) {
    for c in out.to_array() {
        assert_relative_eq!(c, expect, max_relative = tol);
    }
}

// ============================================================================
// Stock ODT options (CAT, desaturation, dim surround)
// ============================================================================

#[test]
fn hdr1000_pq_stock_options() {
    let cfg = TransformConfig::new(
        ReferenceCurve::Hdr1000.params(),
        DisplayPrimaries::Bt2020,
        OutputMode::Pq,
    );
    assert_grey(eval_aces(GREY, &cfg), 0.30660, 3e-3);
}

#[test]
fn ldr48_rec709_stock_options() {
    let cfg = TransformConfig::new(
        ReferenceCurve::Ldr48.params(),
        DisplayPrimaries::Rec709,
        OutputMode::Ldr,
    );
    assert_grey(eval_aces(GREY, &cfg), 0.35595, 3e-3);
}

#[test]
fn default_settings_match_stock_ldr_curve_in_scrgb() {
    let cfg = AcesSettings::default().transform_config().unwrap();
    let stock = TransformConfig::new(
        ReferenceCurve::Ldr48.params(),
        DisplayPrimaries::Rec709,
        OutputMode::ScRgb,
    );
    assert_eq!(cfg, stock);
}

// ============================================================================
// Mid grey lands on the curve's mid anchor
// ============================================================================

#[test]
fn mid_grey_is_ten_nits_for_every_hdr_curve() {
    for curve in &ReferenceCurve::ALL[1..] {
        let cfg = TransformConfig::new(curve.params(), DisplayPrimaries::Bt2020, OutputMode::Pq)
            .with_desaturate(false)
            .with_surround(None);
        let out = eval_aces(GREY, &cfg);
        for c in out.to_array() {
            assert!((c - pq::oetf(10.0)).abs() < 2e-3, "{curve}: {c}");
        }
    }
}

#[test]
fn adjusted_peak_keeps_mid_grey() {
    let curve = resolve_curve(&CurveSelector::Adjustable {
        curve: ReferenceCurve::Hdr1000,
        min_stop: -10.0,
        max_stop: 8.0,
        max_nits: 600.0,
        mid_gray_scale: 1.0,
    });
    let cfg = TransformConfig::new(curve, DisplayPrimaries::Bt2020, OutputMode::Pq)
        .with_desaturate(false)
        .with_surround(None);
    assert_grey(eval_aces(GREY, &cfg), 0.29970, 2e-3);
}

// ============================================================================
// Presets
// ============================================================================

#[test]
fn preset_edr_mid_grey() {
    let cfg = Preset::Edr.settings().transform_config().unwrap();
    assert_grey(eval_aces(GREY, &cfg), 0.19658, 3e-3);
}

#[test]
fn preset_hdr1000_scrgb() {
    let cfg = Preset::Hdr1000.settings().transform_config().unwrap();
    assert_grey(eval_aces(GREY, &cfg), 0.13636, 3e-3);

    let out = eval_aces(Vec3::new(0.5, 0.2, 0.1), &cfg);
    assert_relative_eq!(out.x, 0.46152, max_relative = 3e-3);
    assert_relative_eq!(out.y, 0.16042, max_relative = 3e-3);
    assert_relative_eq!(out.z, 0.06128, max_relative = 5e-3);
}

#[test]
fn hdr1000_preset_curve_equals_reference() {
    // The preset asks for the reference range, so adaptation is an identity.
    let cfg = Preset::Hdr1000.settings().transform_config().unwrap();
    let r = ReferenceCurve::Hdr1000.params();
    assert_eq!(cfg.curve.limits, r.limits);
    for i in 0..10 {
        assert!((cfg.curve.coefs_high[i] - r.coefs_high[i]).abs() < 2e-3);
    }
}

// ============================================================================
// Range and stability
// ============================================================================

#[test]
fn pq_output_is_bounded_and_finite() {
    let cfg = TransformConfig::new(
        ReferenceCurve::Hdr4000.params(),
        DisplayPrimaries::DciP3,
        OutputMode::Pq,
    );
    let samples = [0.0, 1e-8, 1e-3, 0.18, 1.0, 16.0, 1e3, 1e6, 1e30];
    for &r in &samples {
        for &g in &samples {
            let out = eval_aces(Vec3::new(r, g, 0.05), &cfg);
            assert!(out.is_finite(), "({r}, {g}): {out:?}");
            assert!(out.min_element() >= 0.0 && out.max_element() <= 1.0, "({r}, {g}): {out:?}");
        }
    }
}

#[test]
fn brighter_input_is_brighter_output() {
    let cfg = TransformConfig::new(
        ReferenceCurve::Hdr2000.params(),
        DisplayPrimaries::Bt2020,
        OutputMode::Pq,
    );
    let mut prev = 0.0;
    for stop in -14..14 {
        let v = stops_to_linear(stop as f32);
        let y = eval_aces(Vec3::splat(v), &cfg).y;
        assert!(y >= prev, "stop {stop}: {y} < {prev}");
        prev = y;
    }
}

#[test]
fn negative_and_black_input_are_safe() {
    for mode in OutputMode::ALL {
        for display in DisplayPrimaries::ALL {
            let cfg = TransformConfig::new(ReferenceCurve::Hdr1000.params(), display, mode)
                .with_luminance_mapping(Some(0.7));
            assert!(eval_aces(Vec3::ZERO, &cfg).is_finite());
            assert!(eval_aces(Vec3::new(-1.0, 0.5, -0.2), &cfg).is_finite());
        }
    }
}

#[test]
fn config_is_shared_across_threads() {
    let cfg = TransformConfig::new(
        ReferenceCurve::Hdr1000.params(),
        DisplayPrimaries::Bt2020,
        OutputMode::Pq,
    );
    let expect = eval_aces(Vec3::new(0.3, 0.2, 0.1), &cfg);
    std::thread::scope(|s| {
        for _ in 0..4 {
            s.spawn(|| {
                let got = eval_aces(Vec3::new(0.3, 0.2, 0.1), &cfg);
                assert_eq!(got, expect);
            });
        }
    });
}

#[test]
fn adapted_curve_from_yaml() {
    let s = AcesSettings::from_yaml_str(
        "curve: hdr2000\nadjustable: true\nmin-stops: -9\nmax-stops: 9\nmax-level: 1500\nmid-gray-scale: 1.2\n",
    )
    .unwrap();
    let cfg = s.transform_config().unwrap();
    let expect = adapt_spline(
        &ReferenceCurve::Hdr2000.params(),
        stops_to_linear(-9.0),
        stops_to_linear(9.0),
        1500.0,
        1.2,
    );
    assert_eq!(cfg.curve, expect);
    assert_eq!(cfg.cinema_limits(), (0.005, 1500.0));
}
