//! acesodt - ACES RRT + parameterized ODT from the command line
//!
//! Inspect tone curves, evaluate colors and bake LUTs.

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "acesodt")]
#[command(author, version, about = "ACES RRT + parameterized ODT tone mapping")]
#[command(long_about = "
Evaluate the ACES Reference Rendering Transform followed by a parameterized
Output Device Transform for SDR, HDR10 (PQ) and scRGB displays.

Examples:
  acesodt curve --curve 1000                       # Reference 1000 nit curve
  acesodt curve --curve 1000 --max-nits 600 --json # Adapted curve as JSON
  acesodt eval 0.18,0.18,0.18 --preset hdr1000     # Evaluate one color
  acesodt eval 1,0,0 0,1,0 -m pq --display bt2020
  acesodt bake -o odt.cube --preset sdr --size 65
  acesodt presets --yaml
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Number of threads (0 = auto)
    #[arg(short = 'j', long, global = true, default_value = "0")]
    threads: usize,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve and print an ODT tone curve
    Curve(CurveArgs),

    /// Evaluate scene-linear sRGB triples through RRT + ODT
    #[command(visible_alias = "e")]
    Eval(EvalArgs),

    /// Bake the full transform into a 3D LUT
    Bake(BakeArgs),

    /// List built-in presets
    Presets(PresetsArgs),
}

/// Settings shared by every command that builds a transform.
#[derive(Args, Debug, Default)]
struct SettingsArgs {
    /// YAML settings file
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Start from a preset (hdr1000, hdr1000-sharp, sdr, edr, edr-extreme)
    #[arg(short, long)]
    preset: Option<String>,

    /// Reference curve: 48, 1000, 2000 or 4000
    #[arg(short, long)]
    curve: Option<String>,

    /// Display primaries: rec709, dci-p3, bt2020
    #[arg(short, long)]
    display: Option<String>,

    /// Output encoding: ldr, pq, scrgb
    #[arg(short = 'm', long = "output-mode")]
    output_mode: Option<String>,

    /// Adapt the curve (implied by any of the range options below)
    #[arg(long)]
    adjustable: bool,

    /// Darkest exposure in stops below mid grey
    #[arg(long, allow_hyphen_values = true)]
    min_stops: Option<f32>,

    /// Brightest exposure in stops above mid grey
    #[arg(long)]
    max_stops: Option<f32>,

    /// Peak luminance in nits
    #[arg(long)]
    max_nits: Option<f32>,

    /// Multiplier on mid grey output luminance
    #[arg(long)]
    mid_gray_scale: Option<f32>,

    /// Skip the ACES white to D65 adaptation
    #[arg(long)]
    no_cat: bool,

    /// Skip the post-curve desaturation
    #[arg(long)]
    no_desat: bool,

    /// Skip the dim surround compensation
    #[arg(long)]
    no_surround: bool,

    /// Surround gamma
    #[arg(long)]
    surround_gamma: Option<f32>,

    /// Display gamma written to the shader constants
    #[arg(long)]
    output_gamma: Option<f32>,

    /// Tone map luminance, blending by this saturation level (0..1)
    #[arg(long, value_name = "SAT")]
    luminance: Option<f32>,
}

#[derive(Args)]
struct CurveArgs {
    #[command(flatten)]
    settings: SettingsArgs,

    /// Print the curve parameters as JSON
    #[arg(long)]
    json: bool,

    /// Also print this many samples across the scene range
    #[arg(short, long, default_value = "0")]
    samples: usize,
}

#[derive(Args)]
struct EvalArgs {
    /// Colors as r,g,b (put negative values after `--`)
    #[arg(required = true)]
    values: Vec<String>,

    #[command(flatten)]
    settings: SettingsArgs,

    /// Treat input as ACES 2065-1 instead of linear sRGB
    #[arg(long)]
    aces: bool,
}

#[derive(Args)]
struct BakeArgs {
    /// Output .cube file
    #[arg(short, long)]
    output: PathBuf,

    #[command(flatten)]
    settings: SettingsArgs,

    /// LUT edge length
    #[arg(short, long, default_value = "33")]
    size: usize,

    /// Input shaper: log2 or pq
    #[arg(long, default_value = "log2")]
    shaper: String,
}

#[derive(Args)]
struct PresetsArgs {
    /// Print each preset's full settings as YAML
    #[arg(long)]
    yaml: bool,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Configure thread pool
    if cli.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
            .context("Failed to configure thread pool")?;
    }

    match cli.command {
        Commands::Curve(args) => commands::curve::run(args),
        Commands::Eval(args) => commands::eval::run(args),
        Commands::Bake(args) => commands::bake::run(args),
        Commands::Presets(args) => commands::presets::run(args),
    }
}
