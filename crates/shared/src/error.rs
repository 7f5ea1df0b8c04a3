//! Shared error types and backend error-envelope parsing.

use serde::Deserialize;

/// Error envelope returned by the SmartShelf backend on failure.
///
/// Every non-2xx response from the API carries `{"error": "..."}`; some
/// handlers (stats) put an exception string in the same field.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: String,
}

/// Attempt to parse a backend error body into a user-facing message.
pub fn try_error_message(body: &str) -> Option<String> {
    let parsed = serde_json::from_str::<ErrorBody>(body).ok()?;
    let message = parsed.error.trim();
    if message.is_empty() {
        None
    } else {
        Some(message.to_string())
    }
}

/// API error type for client-side use
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },
    #[error("Serialization error: {0}")]
    Serialize(String),
    #[error("Deserialization error: {0}")]
    Deserialize(String),
}

impl ApiError {
    /// HTTP status of the failed response, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True for the statuses the backend uses to reject a session token.
    ///
    /// `flask_jwt_extended` answers 401 for missing/expired tokens and 422
    /// for tokens it cannot decode.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self.status(), Some(401) | Some(422))
    }

    /// Message suitable for showing to the user.
    pub fn message(&self) -> String {
        match self {
            ApiError::Http { body, .. } => {
                try_error_message(body).unwrap_or_else(|| self.to_string())
            }
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_backend_error_text() {
        let err = ApiError::Http {
            status: 400,
            body: r#"{"error": "Insufficient stock for product 4"}"#.to_string(),
        };
        assert_eq!(err.message(), "Insufficient stock for product 4");
        assert_eq!(err.status(), Some(400));
        assert!(!err.is_auth_failure());
    }

    #[test]
    fn falls_back_to_display_for_unstructured_bodies() {
        let err = ApiError::Http {
            status: 502,
            body: "<html>bad gateway</html>".to_string(),
        };
        assert_eq!(err.message(), "HTTP 502: <html>bad gateway</html>");
        assert_eq!(try_error_message(r#"{"error": "  "}"#), None);
    }

    #[test]
    fn auth_failures_are_401_and_422() {
        for status in [401, 422] {
            let err = ApiError::Http { status, body: String::new() };
            assert!(err.is_auth_failure());
        }
        assert!(!ApiError::Network("connection refused".into()).is_auth_failure());
    }
}
