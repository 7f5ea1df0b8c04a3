//! Client configuration from environment variables.

use std::time::Duration;

use smartshelf_shared::DEFAULT_API_BASE_URL;

/// Environment variable holding the API base URL.
pub const API_BASE_URL_VAR: &str = "SMARTSHELF_API_BASE_URL";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL every resource path is appended to, without trailing slash.
    pub api_base_url: String,
    /// Per-request timeout (native builds only; browsers manage their own).
    pub request_timeout: Duration,
    /// Where invalid sessions and guarded routes send the user.
    pub login_path: String,
    /// Where an already-authenticated user lands instead of login/register.
    pub landing_path: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(30),
            login_path: "/login".to_string(),
            landing_path: "/home".to_string(),
        }
    }
}

impl ClientConfig {
    /// Read configuration from the environment.
    ///
    /// Environment variables:
    /// - `SMARTSHELF_API_BASE_URL`: API root (default: `http://localhost:5002/api`).
    ///   Read at runtime on native and baked in at compile time on wasm.
    ///
    /// An unparsable URL falls back to the default with a warning.
    pub fn from_env() -> Self {
        Self::default().with_base_url_override(base_url_from_env())
    }

    fn with_base_url_override(mut self, raw: Option<String>) -> Self {
        let Some(raw) = raw.filter(|v| !v.trim().is_empty()) else {
            return self;
        };
        match url::Url::parse(raw.trim()) {
            Ok(_) => self.api_base_url = raw.trim().trim_end_matches('/').to_string(),
            Err(e) => {
                crate::log_warn!("ignoring {API_BASE_URL_VAR}={raw:?}: {e}");
            }
        }
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.api_base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn base_url_from_env() -> Option<String> {
    std::env::var(API_BASE_URL_VAR).ok()
}

#[cfg(target_arch = "wasm32")]
fn base_url_from_env() -> Option<String> {
    option_env!("SMARTSHELF_API_BASE_URL").map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_local_backend() {
        let config = ClientConfig::default();
        assert_eq!(config.api_base_url, "http://localhost:5002/api");
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.login_path, "/login");
        assert_eq!(config.landing_path, "/home");
    }

    #[test]
    fn override_is_trimmed_and_validated() {
        let config = ClientConfig::default()
            .with_base_url_override(Some("https://shop.example.com/api/ ".to_string()));
        assert_eq!(config.api_base_url, "https://shop.example.com/api");

        let config = ClientConfig::default().with_base_url_override(Some("not a url".to_string()));
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);

        let config = ClientConfig::default().with_base_url_override(Some("   ".to_string()));
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
    }
}
