//! HTTP API client with bearer-token injection and session invalidation.

use std::sync::Arc;

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use smartshelf_shared::{keys, ApiError};

use crate::config::ClientConfig;
use crate::router::Navigator;
use crate::storage::{SharedStorage, Storage};
use crate::{log_debug, log_error, log_warn};

/// Shared HTTP client for the SmartShelf API.
///
/// The token is read from storage on every request, so a login or logout
/// done through [`crate::session::SessionStore`] takes effect immediately.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    storage: SharedStorage,
    navigator: Arc<dyn Navigator>,
    login_path: String,
}

impl ApiClient {
    /// Create a new API client
    pub fn new(config: &ClientConfig, storage: SharedStorage, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            client: build_client(config),
            base_url: config.api_base_url.clone(),
            storage,
            navigator,
            login_path: config.login_path.clone(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        if self.base_url.is_empty() {
            if path.starts_with('/') {
                path.to_string()
            } else {
                format!("/{path}")
            }
        } else {
            let base = self.base_url.trim_end_matches('/');
            let path = path.trim_start_matches('/');
            format!("{base}/{path}")
        }
    }

    fn bearer_token(&self) -> Option<String> {
        match self.storage.get_item(keys::TOKEN) {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                log_warn!("could not read token: {e}");
                None
            }
        }
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let mut rb = self
            .client
            .request(method, self.url(path))
            .header(CONTENT_TYPE, "application/json");
        if let Some(token) = self.bearer_token() {
            rb = rb.bearer_auth(token);
        }
        rb
    }

    fn with_body<TReq: Serialize + ?Sized>(rb: RequestBuilder, body: &TReq) -> Result<RequestBuilder, ApiError> {
        let body_bytes = serde_json::to_vec(body).map_err(|e| ApiError::Serialize(e.to_string()))?;
        Ok(rb.body(body_bytes))
    }

    async fn execute<TRes: DeserializeOwned>(&self, rb: RequestBuilder) -> Result<TRes, ApiError> {
        let resp = rb.send().await.map_err(|e| ApiError::Network(e.to_string()))?;

        let status = resp.status().as_u16();
        let is_success = resp.status().is_success();
        let text = resp
            .text()
            .await
            .map_err(|e| ApiError::Network(format!("failed to read body: {e}")))?;

        if !is_success {
            let err = ApiError::Http { status, body: text };
            if err.is_auth_failure() {
                self.invalidate_session(status);
            }
            return Err(err);
        }

        if text.is_empty() {
            serde_json::from_str("null").map_err(|e| ApiError::Deserialize(e.to_string()))
        } else {
            serde_json::from_str(&text).map_err(|e| ApiError::Deserialize(e.to_string()))
        }
    }

    /// Drop the persisted session and send the user to login.
    ///
    /// Skipped when already on the login screen, so a failed login attempt
    /// does not loop.
    fn invalidate_session(&self, status: u16) {
        log_debug!("backend rejected session with HTTP {status}");
        for key in keys::AUTH {
            if let Err(e) = self.storage.remove_item(key) {
                log_error!("failed to clear {key}: {e}");
            }
        }

        if !self.navigator.current_path().contains(&self.login_path) {
            log_warn!("Authentication failed, redirecting to login...");
            self.navigator.navigate(&self.login_path);
        }
    }

    /// Make an authenticated GET request
    pub async fn get_json<TRes: DeserializeOwned>(&self, path: &str) -> Result<TRes, ApiError> {
        self.execute(self.request(Method::GET, path)).await
    }

    /// Make an authenticated GET request with a query-parameter bag
    pub async fn get_json_with<TQuery, TRes>(&self, path: &str, query: &TQuery) -> Result<TRes, ApiError>
    where
        TQuery: Serialize + ?Sized,
        TRes: DeserializeOwned,
    {
        self.execute(self.request(Method::GET, path).query(query)).await
    }

    /// Make an authenticated POST request with JSON body
    pub async fn post_json<TReq, TRes>(&self, path: &str, body: &TReq) -> Result<TRes, ApiError>
    where
        TReq: Serialize + ?Sized,
        TRes: DeserializeOwned,
    {
        let rb = Self::with_body(self.request(Method::POST, path), body)?;
        self.execute(rb).await
    }

    /// Make an authenticated POST request without a body
    pub async fn post_empty<TRes: DeserializeOwned>(&self, path: &str) -> Result<TRes, ApiError> {
        self.execute(self.request(Method::POST, path)).await
    }

    /// Make an authenticated PUT request with JSON body
    pub async fn put_json<TReq, TRes>(&self, path: &str, body: &TReq) -> Result<TRes, ApiError>
    where
        TReq: Serialize + ?Sized,
        TRes: DeserializeOwned,
    {
        let rb = Self::with_body(self.request(Method::PUT, path), body)?;
        self.execute(rb).await
    }

    /// Make an authenticated PUT request without a body
    pub async fn put_empty<TRes: DeserializeOwned>(&self, path: &str) -> Result<TRes, ApiError> {
        self.execute(self.request(Method::PUT, path)).await
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn build_client(config: &ClientConfig) -> Client {
    Client::builder()
        .timeout(config.request_timeout)
        .build()
        .unwrap_or_else(|e| {
            log_error!("falling back to default HTTP client: {e}");
            Client::new()
        })
}

#[cfg(target_arch = "wasm32")]
fn build_client(_config: &ClientConfig) -> Client {
    Client::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router::HistoryNavigator;
    use crate::storage::MemoryStorage;

    fn client(base: &str) -> ApiClient {
        let config = ClientConfig::default().with_base_url(base);
        ApiClient::new(&config, MemoryStorage::shared(), Arc::new(HistoryNavigator::default()))
    }

    #[test]
    fn joins_base_and_path() {
        let api = client("http://localhost:5002/api/");
        assert_eq!(api.url("/orders/3"), "http://localhost:5002/api/orders/3");
        assert_eq!(api.url("products"), "http://localhost:5002/api/products");
        assert_eq!(api.url("https://cdn.test/x"), "https://cdn.test/x");
    }

    #[test]
    fn relative_base_keeps_leading_slash() {
        let api = client("");
        assert_eq!(api.url("stores"), "/stores");
        assert_eq!(api.url("/stores"), "/stores");
    }

    #[test]
    fn empty_token_is_not_sent() {
        let api = client("http://localhost:5002/api");
        api.storage.set_item(keys::TOKEN, "").unwrap();
        assert_eq!(api.bearer_token(), None);
        api.storage.set_item(keys::TOKEN, "abc").unwrap();
        assert_eq!(api.bearer_token().as_deref(), Some("abc"));
    }
}
