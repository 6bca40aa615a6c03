//! Error types for the ppt_core library.
//!
//! Only configuration loading, persistence plumbing and onboarding validation
//! produce errors. The program and analytics derivations are infallible.

use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for ppt_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Onboarding input rejected (schedule, start date)
    #[error("Setup error: {0}")]
    Setup(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}
