//! Login/logout entry points.
//!
//! `Auth` coordinates the session store and the API client: a successful
//! login writes the issued token into the store, logout clears it. The
//! token endpoint is called over a plain transport so no stale
//! `Authorization` header can leak into the credential exchange.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;
use serde::Deserialize;
use tracing::info;

use crate::api::{ApiClient, ApiError};

use super::SessionStore;

/// Login request timeout in seconds. Matches the API client's timeout.
const LOGIN_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Deserialize)]
struct TokenResponse {
    token: String,
}

pub struct Auth {
    client: Client,
    base_url: String,
    store: Arc<SessionStore>,
    api: ApiClient,
}

impl Auth {
    pub fn new(base_url: &str, store: Arc<SessionStore>, api: ApiClient) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(LOGIN_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            store,
            api,
        })
    }

    /// Exchange credentials for a token and store it.
    ///
    /// The store is written only after a confirmed 2xx, so a failed
    /// attempt leaves any existing session untouched. Errors carry the
    /// server's status and body unchanged; a 401 surfaces as
    /// `ApiError::InvalidCredentials` with the server's detail message.
    /// Concurrent calls are not serialized; the last writer wins.
    pub async fn login(&self, username: &str, password: &str) -> Result<()> {
        let url = format!("{}/api/token/", self.base_url);
        let body = serde_json::json!({ "username": username, "password": password });

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(ApiError::Network)
            .context("Failed to send login request")?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(ApiError::from_login_status(status, &text).into());
        }

        let token_response: TokenResponse = response
            .json()
            .await
            .context("Failed to parse token response")?;

        self.store.set(&token_response.token)?;
        self.api.refresh()?;
        info!(username, "Login successful");
        Ok(())
    }

    /// Clear the stored token and resynchronize the client's defaults.
    /// Safe to call when no session exists; never contacts the server.
    pub fn logout(&self) -> Result<()> {
        self.store.clear()?;
        self.api.refresh()?;
        info!("Logged out");
        Ok(())
    }
}
