//! Centralized error types for the asciiwx application.
//!
//! Refresh-path failures (location, lookups) are handled inside the
//! coordinator and degrade to placeholders; they never surface here. This
//! type covers the startup path, where a failure genuinely prevents the
//! panel from running.

use thiserror::Error;

/// Top-level application error type.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("State store error: {0}")]
    Store(String),

    #[error("Terminal error: {0}")]
    Terminal(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
