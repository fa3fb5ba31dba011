//! HTTP client for the Winged REST API.
//!
//! Every request reads the session store at dispatch time and attaches
//! `Authorization: Token <value>` when a token is present. The token
//! endpoint itself is handled by `auth::Auth`, which uses a plain
//! transport.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::{header, Client};
use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

use crate::auth::SessionStore;
use crate::models::{Container, Item};

use super::ApiError;

/// HTTP request timeout in seconds.
/// 30s allows for slow API responses while failing fast enough for good UX.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// API client for the Winged backend.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling,
/// and the default header map is shared so `refresh` is visible to all clones.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    store: Arc<SessionStore>,
    default_headers: Arc<Mutex<header::HeaderMap>>,
}

impl ApiClient {
    /// Create a new API client against the given base URL.
    pub fn new(base_url: &str, store: Arc<SessionStore>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        let api = Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            store,
            default_headers: Arc::new(Mutex::new(header::HeaderMap::new())),
        };
        api.refresh()?;
        Ok(api)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Synchronize the cached default header map with the session store.
    ///
    /// The per-request path never consults this map; it exists for code
    /// that hands a prebuilt header set to a raw `reqwest::Client`. When
    /// the store is empty the `Authorization` entry is removed rather
    /// than written with an empty token.
    pub fn refresh(&self) -> Result<()> {
        let mut headers = self.default_headers.lock().unwrap();
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );
        match self.store.get() {
            Some(token) => {
                headers.insert(
                    header::AUTHORIZATION,
                    header::HeaderValue::from_str(&format!("Token {}", token))?,
                );
            }
            None => {
                headers.remove(header::AUTHORIZATION);
            }
        }
        Ok(())
    }

    /// Snapshot of the default headers, for use with a raw client.
    pub fn default_headers(&self) -> header::HeaderMap {
        self.default_headers.lock().unwrap().clone()
    }

    /// Headers for one outgoing request, built from a fresh read of the
    /// session store. No token means no `Authorization` header at all.
    fn auth_headers(&self) -> Result<header::HeaderMap> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );
        if let Some(token) = self.store.get() {
            headers.insert(
                header::AUTHORIZATION,
                header::HeaderValue::from_str(&format!("Token {}", token))?,
            );
        }
        Ok(headers)
    }

    /// Check if response is successful, returning an error with status and
    /// body unchanged if not.
    async fn check_response(response: reqwest::Response) -> Result<reqwest::Response> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body).into())
        }
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .get(&url)
            .headers(self.auth_headers()?)
            .send()
            .await
            .map_err(ApiError::Network)
            .with_context(|| format!("Failed to send GET request to {}", url))?;

        let response = Self::check_response(response).await?;
        response
            .json()
            .await
            .with_context(|| format!("Failed to parse JSON response from {}", url))
    }

    async fn patch<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .patch(&url)
            .headers(self.auth_headers()?)
            .json(body)
            .send()
            .await
            .map_err(ApiError::Network)
            .with_context(|| format!("Failed to send PATCH request to {}", url))?;

        let response = Self::check_response(response).await?;
        response
            .json()
            .await
            .with_context(|| format!("Failed to parse JSON response from {}", url))
    }

    // ===== Data Fetching Methods =====

    /// Fetch all containers visible to the logged-in user
    pub async fn fetch_containers(&self) -> Result<Vec<Container>> {
        debug!("Fetching containers");
        self.get("/containers/").await
    }

    /// Fetch the items of one container
    pub async fn fetch_container_items(&self, container_id: i64) -> Result<Vec<Item>> {
        debug!(container_id, "Fetching container items");
        self.get(&format!("/containers/{}/items/", container_id))
            .await
    }

    /// Mark an item done or not done
    pub async fn set_item_done(&self, item_id: i64, done: bool) -> Result<Item> {
        debug!(item_id, done, "Updating item");
        let body = serde_json::json!({ "done": done });
        self.patch(&format!("/items/{}/", item_id), &body).await
    }
}
