use shopsynth_core::TableName;
use thiserror::Error;

use crate::checks::IntegrityReport;

/// Errors emitted by the generation engine.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// A generator ran while one of its upstream tables was still empty.
    #[error("cannot generate {table}: required table {missing} has no rows")]
    Precondition {
        table: TableName,
        missing: TableName,
    },
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("schema error: {0}")]
    Schema(#[from] shopsynth_core::Error),
    #[error("integrity check failed with {} violation(s)", .0.violations())]
    IntegrityViolation(IntegrityReport),
    #[error("failed to export {target}: {source}")]
    Export {
        target: String,
        #[source]
        source: csv::Error,
    },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl GenerationError {
    pub(crate) fn export(target: impl Into<String>, source: impl Into<csv::Error>) -> Self {
        GenerationError::Export {
            target: target.into(),
            source: source.into(),
        }
    }
}
