//! Shared plumbing for the batch converters: external tool invocation,
//! log setup and progress reporting.
pub mod command;
pub mod progress;

pub use command::{ToolCommand, ToolError};
pub use progress::progress_bar;

use std::fmt::Display;
use std::io::Write;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Installs the stderr log subscriber. Level comes from `RUST_LOG`,
/// defaulting to `info`. Stdout stays free for converter output.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Turns the outcome of a converter run into the process exit status.
/// A failure is printed to stderr with its display text, so a tool's own
/// error output reaches the operator unescaped.
pub fn exit_status<E: Display>(result: Result<(), E>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_failure(&err, &mut std::io::stderr().lock());
            ExitCode::FAILURE
        }
    }
}

fn report_failure<E: Display, W: Write>(err: &E, out: &mut W) {
    // Nothing left to report to if stderr itself is gone.
    let _ = writeln!(out, "Error: {}", err.to_string().trim_end());
}
