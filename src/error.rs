// src/error.rs

//! Unified error handling for the sync service.

use std::fmt;

use thiserror::Error;

/// Result type alias for sync operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// JWT signing failed
    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Service-account token exchange failed
    #[error("Auth error: {0}")]
    Auth(String),

    /// Google Sheets API returned a non-success status
    #[error("Sheets API error ({status}): {message}")]
    Sheets { status: u16, message: String },

    /// Remote content API error
    #[error("Content API error for {resource}: {message}")]
    Api { resource: String, message: String },
}

impl AppError {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create an auth error.
    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth(message.into())
    }

    /// Create a Sheets API error from a response status and body.
    pub fn sheets(status: u16, message: impl fmt::Display) -> Self {
        Self::Sheets {
            status,
            message: message.to_string(),
        }
    }

    /// Create a content API error with the resource as context.
    pub fn api(resource: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Api {
            resource: resource.into(),
            message: message.to_string(),
        }
    }
}
