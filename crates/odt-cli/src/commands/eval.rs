//! Color evaluation command.

use anyhow::Result;
use odt_tonemap::{eval_aces, odt, rrt};
use tracing::{debug, trace};

use super::{parse_triple, resolve_config};
use crate::EvalArgs;

pub fn run(args: EvalArgs) -> Result<()> {
    trace!(count = args.values.len(), "eval::run");
    let config = resolve_config(&args.settings)?;
    let (black, peak) = config.cinema_limits();
    debug!(black, peak, output = %config.output, "Evaluating");

    for value in &args.values {
        let rgb = parse_triple(value)?;
        let out = if args.aces {
            odt(rrt(rgb), &config)
        } else {
            eval_aces(rgb, &config)
        };
        println!(
            "{:.6} {:.6} {:.6} -> {:.6} {:.6} {:.6}",
            rgb.x, rgb.y, rgb.z, out.x, out.y, out.z
        );
    }
    Ok(())
}
