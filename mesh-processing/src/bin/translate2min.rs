/// Moves an OBJ mesh so its minimum x and y sit at the origin.
use clap::Parser;
use mesh_processing::translate::translate_to_min;
use std::error::Error;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

#[derive(Parser, Debug)]
#[command(version, about = "Translate an OBJ mesh so min x and min y become 0")]
struct Cli {
    /// Input OBJ file.
    input: PathBuf,
    /// Output OBJ file; standard output when omitted.
    output: Option<PathBuf>,
}

fn main() -> ExitCode {
    tool_runner::init_logging();
    let args = Cli::parse();
    tool_runner::exit_status(run(&args))
}

fn run(args: &Cli) -> Result<(), Box<dyn Error>> {
    let text = fs::read_to_string(&args.input)?;
    let translated = translate_to_min(&text)?;

    match &args.output {
        Some(path) => {
            fs::write(path, translated)?;
            info!("wrote {}", path.display());
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(translated.as_bytes())?;
            stdout.flush()?;
        }
    }

    Ok(())
}
