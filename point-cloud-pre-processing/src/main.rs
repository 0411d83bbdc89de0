/// Vegetation point cloud to COFF converter main entry point
mod aggregator;
mod bounds;
mod colour;
mod error;
mod laz;
mod manifest;
mod summary;
mod thinning;

use aggregator::VegetationAggregator;
use clap::Parser;
use colour::JitterColour;
use constants::thinning::{KEEP_CLASS, KEEP_EVERY_NTH};
use manifest::Manifest;
use std::error::Error;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use summary::RunSummary;
use thinning::{LastoolsThinner, NativeThinner, PointThinner, ThinningOptions};
use tool_runner::ToolCommand;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Thin the LAS/LAZ datasets of a 3dfier config and merge them into one coloured OFF point cloud"
)]
struct Cli {
    /// YAML config listing `input_elevation` datasets.
    manifest: PathBuf,
    /// Output COFF file.
    output: PathBuf,
    /// Directory for the intermediate thinned files.
    #[arg(long, default_value = "thinned")]
    scratch_dir: PathBuf,
    /// las2las command line, e.g. `wine /opt/lastools/bin/las2las`.
    #[arg(long, env = "LAS2LAS", default_value = "las2las")]
    las2las: String,
    /// las2txt command line.
    #[arg(long, env = "LAS2TXT", default_value = "las2txt")]
    las2txt: String,
    #[arg(long, default_value_t = KEEP_EVERY_NTH)]
    keep_every_nth: u32,
    #[arg(long, default_value_t = KEEP_CLASS)]
    keep_class: u8,
    /// Thin with the built-in LAS reader instead of LAStools.
    #[arg(long)]
    native: bool,
    /// Write a JSON run summary here.
    #[arg(long)]
    summary: Option<PathBuf>,
}

fn main() -> ExitCode {
    tool_runner::init_logging();
    let args = Cli::parse();
    tool_runner::exit_status(run(&args))
}

fn run(args: &Cli) -> Result<(), Box<dyn Error>> {
    let manifest = Manifest::load(&args.manifest)?;
    let datasets = manifest.datasets();
    info!(datasets = ?datasets, "read {}", args.manifest.display());
    if datasets.is_empty() {
        warn!("manifest lists no elevation datasets");
    }

    let options = ThinningOptions {
        keep_every_nth: args.keep_every_nth,
        keep_class: args.keep_class,
    };

    if args.native {
        aggregate(args, &datasets, NativeThinner::new(options))
    } else {
        let las2las: ToolCommand = args.las2las.parse()?;
        let las2txt: ToolCommand = args.las2txt.parse()?;
        aggregate(args, &datasets, LastoolsThinner::new(las2las, las2txt, options))
    }
}

fn aggregate<T: PointThinner>(
    args: &Cli,
    datasets: &[&Path],
    thinner: T,
) -> Result<(), Box<dyn Error>> {
    let aggregator = VegetationAggregator::new(thinner, &args.scratch_dir);
    let mut colours = JitterColour::from_thread_rng();
    let report = aggregator.run(datasets, &args.output, &mut colours)?;

    let summary = RunSummary::new(&args.manifest, &args.output, &report);
    summary.log();
    if let Some(path) = &args.summary {
        summary.write(path)?;
    }

    info!("Vegetation point cloud complete");
    Ok(())
}
