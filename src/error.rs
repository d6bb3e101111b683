use std::path::PathBuf;

/// Errors produced by the network, its persistence layer and the loaders
/// that feed it.
#[derive(thiserror::Error, Debug)]
pub enum NetworkError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Dimension mismatch for {what}: expected {expected}, got {actual}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Format error: {0}")]
    Format(String),

    #[error("Training diverged: non-finite weight after epoch {epoch}")]
    Diverged { epoch: usize },
}

impl NetworkError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        NetworkError::Io { path: path.into(), source }
    }

    /// Checks `actual` against `expected` for the named quantity.
    pub(crate) fn check_len(what: &'static str, expected: usize, actual: usize) -> Result<()> {
        if expected == actual {
            Ok(())
        } else {
            Err(NetworkError::DimensionMismatch { what, expected, actual })
        }
    }
}

pub type Result<T> = std::result::Result<T, NetworkError>;
