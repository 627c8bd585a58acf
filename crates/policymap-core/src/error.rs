//! Error types for policymap

use crate::llm::{Classify, ErrorKind};
use thiserror::Error;

/// Result type alias using PolicyMapError
pub type Result<T> = std::result::Result<T, PolicyMapError>;

/// Error type alias for convenience
pub type Error = PolicyMapError;

/// Exit codes for CLI
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL_ERROR: i32 = 1;
    pub const NOT_FOUND: i32 = 2;
    pub const INVALID_INPUT: i32 = 3;
}

/// Main error type for policymap
#[derive(Debug, Error)]
pub enum PolicyMapError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Walk directory error: {0}")]
    WalkDir(#[from] walkdir::Error),

    #[error("Glob pattern error: {0}")]
    GlobPattern(#[from] glob::PatternError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Rate limited by remote service: {0}")]
    RateLimited(String),

    #[error("External service error (HTTP {status}): {message}")]
    ExternalError { status: u16, message: String },

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("Embedding has {actual} dimensions, expected {expected}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl PolicyMapError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Io(e) if e.kind() == std::io::ErrorKind::NotFound => exit_codes::NOT_FOUND,
            Self::InvalidInput(_) | Self::Config(_) | Self::GlobPattern(_) => {
                exit_codes::INVALID_INPUT
            }
            _ => exit_codes::GENERAL_ERROR,
        }
    }
}

impl Classify for PolicyMapError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::RateLimited(_) => ErrorKind::RateLimited,
            Self::ExternalError { status, .. } if *status == 429 => ErrorKind::RateLimited,
            Self::ExternalError { status, .. } if *status >= 500 => ErrorKind::Server,
            Self::ExternalError { .. } => ErrorKind::Client,
            Self::Http(e) if e.is_timeout() => ErrorKind::Timeout,
            Self::Http(e) if e.is_connect() => ErrorKind::Connection,
            Self::Http(e) if e.is_decode() => ErrorKind::Decode,
            Self::Http(e) => match e.status() {
                Some(s) if s.as_u16() == 429 => ErrorKind::RateLimited,
                Some(s) if s.is_server_error() => ErrorKind::Server,
                Some(_) => ErrorKind::Client,
                None => ErrorKind::Other,
            },
            Self::Serialization(_) | Self::Llm(_) => ErrorKind::Decode,
            _ => ErrorKind::Other,
        }
    }
}
