//! Error types for the password recovery tool

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the application
#[derive(Error, Debug)]
pub enum RecoveryError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Wordlist error: {0}")]
    Wordlist(#[from] WordlistError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-related errors
///
/// All of these are raised by [`crate::config::SearchConfig::validate`]
/// before any search resources are allocated.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Target must not be empty")]
    EmptyTarget,

    #[error("Invalid maximum length: {0}. Must be at least 1")]
    InvalidMaxLength(usize),

    #[error("Invalid thread count: {0}. Must be greater than 0")]
    InvalidThreadCount(usize),

    #[error("Invalid batch size: {0}. Must be greater than 0")]
    InvalidBatchSize(u64),
}

/// Wordlist scan errors, kept distinct from a plain "not found"
#[derive(Error, Debug)]
pub enum WordlistError {
    #[error("Failed to open wordlist {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read wordlist: {source}")]
    Read {
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, RecoveryError>;
