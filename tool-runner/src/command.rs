/// Synchronous invocation of third-party command line tools.
use std::ffi::OsStr;
use std::fmt;
use std::process::{Command, Output, Stdio};
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;

/// Failures surfaced by an external tool run.
#[derive(Error, Debug)]
pub enum ToolError {
    #[error("empty tool command")]
    EmptyCommand,

    #[error("failed to launch {tool}: {source}")]
    Spawn {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{tool} exited with {}: {stderr}", exit_code_text(.code))]
    Failed {
        tool: String,
        code: Option<i32>,
        stderr: String,
    },
}

fn exit_code_text(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {}", code),
        None => "a signal".to_string(),
    }
}

/// A program plus the leading arguments configured for it, e.g.
/// `wine /opt/lastools/bin/las2las`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCommand {
    program: String,
    leading_args: Vec<String>,
}

impl ToolCommand {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            leading_args: Vec::new(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Runs the tool to completion with `args` appended to the configured
    /// leading arguments. A non-zero exit is an error carrying stderr verbatim.
    pub fn run<I, S>(&self, args: I) -> Result<Output, ToolError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let mut command = Command::new(&self.program);
        command
            .args(&self.leading_args)
            .args(args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        debug!(command = ?command, "running external tool");

        let output = command.output().map_err(|source| ToolError::Spawn {
            tool: self.to_string(),
            source,
        })?;

        if !output.status.success() {
            return Err(ToolError::Failed {
                tool: self.to_string(),
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        Ok(output)
    }
}

impl FromStr for ToolCommand {
    type Err = ToolError;

    /// Splits on whitespace: the first word is the program.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut words = s.split_whitespace().map(str::to_string);
        let program = words.next().ok_or(ToolError::EmptyCommand)?;
        Ok(Self {
            program,
            leading_args: words.collect(),
        })
    }
}

impl fmt::Display for ToolCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.leading_args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}
