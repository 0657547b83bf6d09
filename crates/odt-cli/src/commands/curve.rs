//! Tone curve inspection command.

use anyhow::Result;
use odt_tonemap::{rrt_spline, SplineParams9};
use tracing::{info, trace};

use super::resolve_settings;
use crate::CurveArgs;

pub fn run(args: CurveArgs) -> Result<()> {
    trace!("curve::run");
    let settings = resolve_settings(&args.settings)?;
    let curve = settings.transform_config()?.curve;
    info!(curve = %settings.curve, adjustable = settings.adjustable, "Resolved ODT curve");

    if args.json {
        println!("{}", serde_json::to_string_pretty(&curve)?);
    } else {
        print_summary(&curve);
    }

    if args.samples > 0 {
        print_samples(&curve, args.samples);
    }
    Ok(())
}

fn print_summary(c: &SplineParams9) {
    println!("scene range : {:.6} .. {:.3}", c.limits.x, c.limits.y);
    println!("min         : {:.6} -> {:.4} nits", c.min_point.x, c.min_point.y);
    println!("mid         : {:.6} -> {:.4} nits", c.mid_point.x, c.mid_point.y);
    println!("max         : {:.3} -> {:.2} nits", c.max_point.x, c.max_point.y);
    println!("slopes      : {} / {}", c.slope_low, c.slope_high);
    println!("coefs low   : {}", join(&c.coefs_low));
    println!("coefs high  : {}", join(&c.coefs_high));
}

/// Log-spaced samples from the scene minimum to the scene maximum.
fn print_samples(c: &SplineParams9, n: usize) {
    let lo = c.limits.x.log2();
    let hi = c.limits.y.log2();
    println!();
    println!("{:>14} {:>14} {:>14}", "scene", "oces", "nits");
    for i in 0..n {
        let t = if n == 1 { 0.5 } else { i as f32 / (n - 1) as f32 };
        let scene = (lo + t * (hi - lo)).exp2();
        let oces = rrt_spline(scene);
        println!("{scene:>14.6} {oces:>14.6} {:>14.6}", c.eval(oces));
    }
}

fn join(v: &[f32]) -> String {
    v.iter().map(|x| format!("{x:.5}")).collect::<Vec<_>>().join(" ")
}
