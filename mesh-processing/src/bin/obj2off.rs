/// Wavefront OBJ to OFF mesh converter.
use clap::Parser;
use mesh_processing::{parse_obj, write_off};
use std::error::Error;
use std::fs::{self, File};
use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

#[derive(Parser, Debug)]
#[command(version, about = "Convert a Wavefront OBJ mesh to OFF")]
struct Cli {
    /// Input OBJ file.
    input: PathBuf,
    /// Output OFF file; standard output when omitted.
    output: Option<PathBuf>,
}

fn main() -> ExitCode {
    tool_runner::init_logging();
    let args = Cli::parse();
    tool_runner::exit_status(run(&args))
}

fn run(args: &Cli) -> Result<(), Box<dyn Error>> {
    let text = fs::read_to_string(&args.input)?;
    let mesh = parse_obj(&text)?;
    info!(
        vertices = mesh.vertex_count(),
        faces = mesh.face_count(),
        "parsed {}",
        args.input.display()
    );

    match &args.output {
        Some(path) => {
            write_off(&mesh, BufWriter::new(File::create(path)?))?;
            info!("wrote {}", path.display());
        }
        None => write_off(&mesh, BufWriter::new(io::stdout().lock()))?,
    }

    Ok(())
}
