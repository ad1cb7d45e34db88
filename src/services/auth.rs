// src/services/auth.rs

//! Service-account access tokens for the Sheets API.
//!
//! Implements the OAuth2 JWT-bearer flow: sign an RS256 assertion with
//! the service-account key, exchange it at the token endpoint, and cache
//! the resulting access token until shortly before it expires.

use std::time::{Duration, Instant};

use chrono::Utc;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::config::{SPREADSHEETS_SCOPE, SheetsConfig, TOKEN_URI};
use crate::error::{AppError, Result};

/// Tokens are refreshed this long before their reported expiry.
const EXPIRY_MARGIN: Duration = Duration::from_secs(60);

/// Lifetime requested for the signed assertion.
const ASSERTION_LIFETIME_SECS: i64 = 3600;

#[derive(Debug, Serialize)]
struct Claims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: u64,
}

struct CachedToken {
    token: String,
    expires_at: Instant,
}

/// Issues and caches service-account access tokens.
pub struct TokenProvider {
    client: reqwest::Client,
    email: String,
    key: EncodingKey,
    token_uri: String,
    cached: Mutex<Option<CachedToken>>,
}

impl TokenProvider {
    /// Build a provider from Sheets credentials.
    ///
    /// Fails if the private key is not valid RSA PEM, so a malformed key
    /// is caught at startup rather than on the first sync.
    pub fn new(client: reqwest::Client, config: &SheetsConfig) -> Result<Self> {
        let key = EncodingKey::from_rsa_pem(config.private_key.as_bytes())?;
        Ok(Self {
            client,
            email: config.service_account_email.clone(),
            key,
            token_uri: TOKEN_URI.to_string(),
            cached: Mutex::new(None),
        })
    }

    /// Return a valid access token, fetching a fresh one if needed.
    pub async fn access_token(&self) -> Result<String> {
        let mut cached = self.cached.lock().await;
        if let Some(entry) = cached.as_ref() {
            if entry.expires_at > Instant::now() {
                return Ok(entry.token.clone());
            }
        }

        let response = self.exchange().await?;
        let token = response.access_token.clone();
        let lifetime = Duration::from_secs(response.expires_in)
            .saturating_sub(EXPIRY_MARGIN);
        *cached = Some(CachedToken {
            token: response.access_token,
            expires_at: Instant::now() + lifetime,
        });
        Ok(token)
    }

    async fn exchange(&self) -> Result<TokenResponse> {
        let assertion = self.sign_assertion()?;
        let response = self
            .client
            .post(&self.token_uri)
            .form(&[
                ("grant_type", "urn:ietf:params:oauth:grant-type:jwt-bearer"),
                ("assertion", assertion.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::auth(format!(
                "token exchange failed ({}): {}",
                status.as_u16(),
                body
            )));
        }
        Ok(response.json().await?)
    }

    fn sign_assertion(&self) -> Result<String> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            iss: &self.email,
            scope: SPREADSHEETS_SCOPE,
            aud: &self.token_uri,
            iat: now,
            exp: now + ASSERTION_LIFETIME_SECS,
        };
        Ok(jsonwebtoken::encode(
            &Header::new(Algorithm::RS256),
            &claims,
            &self.key,
        )?)
    }
}
