//! Error types.
//!
//! The engine itself falls back to defaults instead of failing; these cover
//! the few cases a caller has to see.

/// Errors returned by engine operations.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// A suggestion pass is already running; treat as a no-op.
    #[error("suggestion generation already in progress")]
    GenerationInProgress,
}

/// Errors loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Value out of range
    #[error("invalid config: {0}")]
    Invalid(String),
}
