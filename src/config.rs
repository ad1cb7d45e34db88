// src/config.rs

//! Explicit configuration structs loaded from the process environment.
//!
//! The Sheets credentials are resolved once at startup and passed into
//! constructors, so a missing variable fails the process immediately
//! instead of surfacing as an auth error on the first request.

use std::env;

use crate::error::{AppError, Result};

/// Google Sheets scope requested for the service account.
pub const SPREADSHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";

/// OAuth2 token endpoint for service-account JWT exchange.
pub const TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

/// Credentials and target for the Google Sheets client.
#[derive(Debug, Clone)]
pub struct SheetsConfig {
    /// Service-account email (the JWT issuer)
    pub service_account_email: String,

    /// PEM-encoded RSA private key
    pub private_key: String,

    /// Identifier of the spreadsheet document to sync into
    pub spreadsheet_id: String,
}

impl SheetsConfig {
    /// Load Sheets credentials from the environment.
    ///
    /// Hosting dashboards store the private key with literal `\n`
    /// sequences, so those are unescaped here.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            service_account_email: require_env("GOOGLE_SERVICE_ACCOUNT_EMAIL")?,
            private_key: require_env("GOOGLE_PRIVATE_KEY")?.replace("\\n", "\n"),
            spreadsheet_id: require_env("GOOGLE_SPREADSHEET_ID")?,
        })
    }
}

/// Settings for the remote content API client.
#[derive(Debug, Clone)]
pub struct ContentConfig {
    /// Base URL of the content API (e.g. `https://api.example.com/api`)
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Page size used for bulk exports
    pub page_limit: usize,
}

impl ContentConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            base_url: require_env("CONTENT_API_URL")?,
            timeout_secs: 30,
            page_limit: 1000,
        })
    }
}

fn require_env(name: &str) -> Result<String> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(AppError::config(format!(
            "Missing environment variable: {name}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn private_key_newlines_are_unescaped() {
        // SAFETY: test-local env mutation, keys are unique to this test.
        unsafe {
            env::set_var("GOOGLE_SERVICE_ACCOUNT_EMAIL", "svc@example.iam");
            env::set_var("GOOGLE_PRIVATE_KEY", "-----BEGIN\\nKEY-----");
            env::set_var("GOOGLE_SPREADSHEET_ID", "sheet-123");
        }
        let config = SheetsConfig::from_env().unwrap();
        assert_eq!(config.private_key, "-----BEGIN\nKEY-----");
        assert_eq!(config.spreadsheet_id, "sheet-123");
    }

    #[test]
    fn missing_variable_is_a_config_error() {
        let err = require_env("SHEETSYNC_DOES_NOT_EXIST").unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }
}
