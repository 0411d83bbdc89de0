/// Splits a semantically annotated OBJ mesh into one mesh per class.
use clap::Parser;
use mesh_processing::{ClassSplitPipeline, IdentityCleanup, MeshlabCleanup, SplitterOptions};
use std::error::Error;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use tool_runner::ToolCommand;
use tracing::info;

#[derive(Parser, Debug)]
#[command(version, about = "Split a 3dfier OBJ mesh into one OBJ per semantic class")]
struct Cli {
    /// Input OBJ file with `usemtl <Class>` annotations.
    input: PathBuf,
    /// Directory receiving the `<Class>_1.obj` files.
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,
    /// Directory for the pre-cleanup class meshes.
    #[arg(long, default_value = ".")]
    scratch_dir: PathBuf,
    /// meshlabserver command line, e.g. `/Applications/meshlab.app/Contents/MacOS/meshlabserver`.
    #[arg(long, env = "MESHLABSERVER", default_value = "meshlabserver")]
    meshlabserver: String,
    /// meshlab filter script removing unreferenced vertices.
    #[arg(long, default_value = "cleanvertices.mlx")]
    script: PathBuf,
    /// Skip meshlab and keep the full vertex table in every class mesh.
    #[arg(long)]
    no_cleanup: bool,
}

fn main() -> ExitCode {
    tool_runner::init_logging();
    let args = Cli::parse();
    tool_runner::exit_status(run(&args))
}

fn run(args: &Cli) -> Result<(), Box<dyn Error>> {
    let text = fs::read_to_string(&args.input)?;
    let options = SplitterOptions {
        scratch_dir: args.scratch_dir.clone(),
        output_dir: args.output_dir.clone(),
    };

    let outputs = if args.no_cleanup {
        ClassSplitPipeline::new(options, IdentityCleanup).run(&text)?
    } else {
        let command: ToolCommand = args.meshlabserver.parse()?;
        ClassSplitPipeline::new(options, MeshlabCleanup::new(command, &args.script)).run(&text)?
    };

    info!(files = outputs.len(), "class split complete");
    Ok(())
}
