//! Error types

/// Errors from the key-value persistence layer.
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("stored record {key} is not valid JSON: {source}")]
    Parse {
        key: String,
        source: serde_json::Error,
    },

    #[error("failed to serialize record: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write {key}: {reason}")]
    Write { key: String, reason: String },

    #[error("local storage is unavailable")]
    Unavailable,
}

/// Errors from validating a game configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("maxLevel must be at least 1")]
    InvalidMaxLevel,

    #[error("sequenceDelay must be greater than zero")]
    InvalidSequenceDelay,
}
