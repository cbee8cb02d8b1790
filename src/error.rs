use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, MtxError>;

#[derive(Debug, Error)]
pub enum MtxError {
    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read similarity CSV {path:?}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A cell inside the scanned lower triangle is not a number.
    #[error("row {row}, column {col}: cannot parse {value:?} as a number")]
    Parse { row: usize, col: usize, value: String },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("failed to load config {path:?}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("malformed edge list at line {line}: {reason}")]
    Malformed { line: usize, reason: String },
}

impl MtxError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }
}
