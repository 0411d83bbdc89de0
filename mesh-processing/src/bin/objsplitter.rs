/// Writes one compact OBJ file per object of the input mesh.
use clap::Parser;
use mesh_processing::object_splitter::split_by_object;
use std::error::Error;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use tool_runner::progress_bar;
use tracing::info;

#[derive(Parser, Debug)]
#[command(version, about = "Split an OBJ mesh into one file per object")]
struct Cli {
    /// Input OBJ file.
    input: PathBuf,
    /// Directory receiving `<object id>.obj` files.
    output_dir: PathBuf,
}

fn main() -> ExitCode {
    tool_runner::init_logging();
    let args = Cli::parse();
    tool_runner::exit_status(run(&args))
}

fn run(args: &Cli) -> Result<(), Box<dyn Error>> {
    info!("Opening {}", args.input.display());
    let text = fs::read_to_string(&args.input)?;
    let split = split_by_object(&text)?;
    fs::create_dir_all(&args.output_dir)?;

    let pb = progress_bar(split.objects.len() as u64, "objects");
    pb.set_message("Writing objects");
    for object in &split.objects {
        let path = args.output_dir.join(object.file_name());
        fs::write(&path, split.render(object))?;
        pb.inc(1);
    }
    pb.finish_with_message("Objects written");

    info!(objects = split.objects.len(), "split complete");
    Ok(())
}
