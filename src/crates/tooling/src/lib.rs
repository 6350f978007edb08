//! Tooling utilities shared across the artsearch workspace
//!
//! # Modules
//!
//! - `config` - Environment variable loading with proper error handling
//! - `async_utils` - Deadlines for external async calls
//! - `logging` - Subscriber setup and log-safe formatting helpers

pub mod async_utils;
pub mod config;
pub mod logging;

use thiserror::Error;

/// Errors that can occur in the tooling crate
#[derive(Debug, Error)]
pub enum ToolingError {
    /// A required environment variable is absent or blank
    #[error("Missing required environment variable: {0}")]
    MissingEnv(String),

    /// An environment variable is present but unusable
    #[error("Invalid value for environment variable {key}: {reason}")]
    InvalidEnv { key: String, reason: String },

    /// The global tracing subscriber could not be installed
    #[error("Logging setup failed: {0}")]
    Logging(String),
}

/// Result type for tooling operations
pub type Result<T> = std::result::Result<T, ToolingError>;
