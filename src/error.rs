use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoverageError {
    #[error("invalid arguments provided")]
    InvalidArguments { hints: Vec<String> },

    #[error("no data found in report, cannot proceed")]
    EmptyReport,

    #[error("no result bundles found in directory {}", .0.display())]
    NoResultBundle(PathBuf),

    #[error("xccov failed: {0}")]
    Tool(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON decode error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl CoverageError {
    /// Build an `InvalidArguments` error from a list of remediation hints.
    pub fn invalid<I, S>(hints: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        CoverageError::InvalidArguments {
            hints: hints.into_iter().map(Into::into).collect(),
        }
    }

    /// Remediation hints attached to this error, if any.
    pub fn hints(&self) -> &[String] {
        match self {
            CoverageError::InvalidArguments { hints } => hints,
            _ => &[],
        }
    }
}

pub type Result<T> = std::result::Result<T, CoverageError>;
