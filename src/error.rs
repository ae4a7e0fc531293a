use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChunkError {
    /// The export or the persisted chunk file does not have the expected shape.
    #[error("Format error: {0}")]
    Format(String),

    #[error("IO error on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Requested chunk index is out of range or not a non-negative integer.
    #[error("Chunk '{0}' not found")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ChunkError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ChunkError::Io { path: path.into(), source }
    }

    pub fn format(context: &str, err: serde_json::Error) -> Self {
        ChunkError::Format(format!("{}: {}", context, err))
    }
}
