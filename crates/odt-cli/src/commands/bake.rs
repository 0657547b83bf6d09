//! LUT bake command.

use anyhow::{Context, Result};
use odt_tonemap::{bake_lut, Shaper};
use std::time::Instant;
use tracing::{info, trace};

use super::resolve_config;
use crate::BakeArgs;

pub fn run(args: BakeArgs) -> Result<()> {
    trace!(output = %args.output.display(), size = args.size, "bake::run");
    let config = resolve_config(&args.settings)?;
    let shaper: Shaper = args.shaper.parse()?;

    let start = Instant::now();
    let lut = bake_lut(&config, args.size, shaper)?;
    info!(
        size = args.size,
        shaper = %shaper,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Baked LUT"
    );

    lut.write_cube(&args.output)
        .with_context(|| format!("Failed to write: {}", args.output.display()))?;
    println!(
        "Wrote {} ({}^3, {} shaper, scale {:.6}, bias {:.6})",
        args.output.display(),
        lut.size,
        shaper,
        lut.shaper.scale,
        lut.shaper.bias
    );
    Ok(())
}
