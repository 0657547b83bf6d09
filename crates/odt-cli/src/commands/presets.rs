//! Preset listing command.

use anyhow::Result;
use odt_tonemap::Preset;

use crate::PresetsArgs;

pub fn run(args: PresetsArgs) -> Result<()> {
    for preset in Preset::ALL {
        let s = preset.settings();
        if args.yaml {
            println!("# {preset}");
            println!("{}", s.to_yaml()?);
        } else {
            println!(
                "{:<14} curve {:>4}  stops {:>5}..{:<4}  mid x{:<3}  {:<7} {}",
                preset.name(),
                s.curve.to_string(),
                s.min_stops,
                s.max_stops,
                s.mid_gray_scale,
                s.display.name(),
                s.output_mode.name()
            );
        }
    }
    Ok(())
}
