//! Error types for Lorebook operations.
//!
//! This module provides a common `Error` type and `Result<T>` alias used
//! across all Lorebook crates. Uses `thiserror` for derive macros.
//!
//! The taxonomy mirrors what the rendering layer can actually show: a 404
//! page, a 500 page, or a passthrough of whatever status the backend
//! returned. Everything the fetcher cannot interpret collapses into
//! [`Error::ServerError`].

use thiserror::Error;

/// Errors that can occur in Lorebook operations.
#[derive(Error, Debug)]
pub enum Error {
    /// The backend explicitly returned 404 for the requested page.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Transport failure, malformed payload, backend 500, or a missing
    /// route parameter. The catch-all failure of the fetch contract.
    #[error("Server error: {0}")]
    ServerError(String),

    /// The backend returned a non-success status other than 404/500.
    /// Passed through verbatim to the rendering layer.
    #[error("Upstream error: status {status}")]
    Upstream {
        /// HTTP status code returned by the backend.
        status: u16,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a not found error.
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create a server error.
    pub fn server_error(msg: impl Into<String>) -> Self {
        Self::ServerError(msg.into())
    }

    /// Create an upstream status passthrough error.
    pub fn upstream(status: u16) -> Self {
        Self::Upstream { status }
    }

    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// The HTTP status code the rendering layer should surface.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::NotFound(_) => 404,
            Self::ServerError(_) | Self::Config(_) => 500,
            Self::Upstream { status } => *status,
        }
    }

    /// Whether this error is an explicit backend 404.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Result type alias using Lorebook's Error type.
pub type Result<T> = std::result::Result<T, Error>;
