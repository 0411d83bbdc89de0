use thiserror::Error;

/// Result type for mesh conversions
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while converting or splitting meshes
#[derive(Error, Debug)]
pub enum Error {
    #[error("line {line}: {message}")]
    Malformed { line: usize, message: String },

    #[error("line {line}: face record before any {expected} record")]
    Sequencing { line: usize, expected: &'static str },

    #[error("line {line}: unrecognized class '{name}'")]
    UnrecognizedClass { line: usize, name: String },

    #[error(transparent)]
    Tool(#[from] tool_runner::ToolError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn malformed(line: usize, message: impl Into<String>) -> Self {
        Error::Malformed {
            line,
            message: message.into(),
        }
    }
}
