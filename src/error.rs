use std::path::PathBuf;

use thiserror::Error;

/// Failures raised by the regression pipeline stages.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// A row or field could not be parsed into a [`Record`](crate::data::model::Record).
    #[error("{path}: line {line}: {message}")]
    Parse {
        path: PathBuf,
        line: u64,
        message: String,
    },

    /// The operation needs more samples than it was given.
    #[error("{stage}: need at least {needed} sample(s), got {found}")]
    InsufficientData {
        stage: &'static str,
        needed: usize,
        found: usize,
    },

    /// The input makes the computation undefined (e.g. a zero denominator).
    #[error("{stage}: {message}")]
    DegenerateInput {
        stage: &'static str,
        message: String,
    },

    #[error("model artifact not found: {0}")]
    NotFound(PathBuf),

    #[error("model artifact {path} is corrupt: {reason}")]
    CorruptArtifact { path: PathBuf, reason: String },

    #[error("I/O error on {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("chart rendering failed: {0}")]
    Render(String),
}

impl PipelineError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PipelineError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T, E = PipelineError> = std::result::Result<T, E>;
