use thiserror::Error;

/// Core error type shared across shopsynth crates.
#[derive(Debug, Error)]
pub enum Error {
    /// The schema violates internal invariants.
    #[error("invalid schema: {0}")]
    InvalidSchema(String),
    /// Table dependencies form a cycle, so no generation order exists.
    #[error("table dependency cycle: {}", .0.join(", "))]
    Cycle(Vec<String>),
}

/// Convenience alias for results returned by shopsynth crates.
pub type Result<T> = std::result::Result<T, Error>;
