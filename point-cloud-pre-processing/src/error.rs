use std::path::PathBuf;
use thiserror::Error;

/// Result type for the vegetation point cloud run
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort a vegetation point cloud run
#[derive(Error, Debug)]
pub enum Error {
    #[error("{}: line {line}: {message}", .path.display())]
    MalformedPoint {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error("invalid manifest {}: {source}", .path.display())]
    Manifest {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error(transparent)]
    Tool(#[from] tool_runner::ToolError),

    #[error("LAS error: {0}")]
    Las(#[from] las::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
