use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    InvalidCredentials(String),

    #[error("Unauthorized - token may be expired or revoked")]
    Unauthorized,

    #[error("Access denied: {0}")]
    AccessDenied(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Server error ({status}): {body}")]
    ServerError { status: u16, body: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Maximum length for error response bodies in error messages
const MAX_ERROR_BODY_LENGTH: usize = 500;

/// Error body shape used by the API for 4xx responses: `{"detail": "..."}`
#[derive(Debug, Deserialize)]
struct ErrorDetail {
    detail: String,
}

impl ApiError {
    /// Truncate a response body to avoid logging excessive data.
    /// Cuts at a char boundary so multi-byte bodies cannot panic the slice.
    fn truncate_body(body: &str) -> String {
        if body.len() <= MAX_ERROR_BODY_LENGTH {
            body.to_string()
        } else {
            let mut end = MAX_ERROR_BODY_LENGTH;
            while !body.is_char_boundary(end) {
                end -= 1;
            }
            format!(
                "{}... (truncated, {} total bytes)",
                &body[..end],
                body.len()
            )
        }
    }

    pub fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        let truncated = Self::truncate_body(body);
        match status.as_u16() {
            401 => ApiError::Unauthorized,
            403 => ApiError::AccessDenied(truncated),
            404 => ApiError::NotFound(truncated),
            500..=599 => ApiError::ServerError {
                status: status.as_u16(),
                body: truncated,
            },
            _ => ApiError::InvalidResponse(format!("Status {}: {}", status, truncated)),
        }
    }

    /// Map a failed login response. A 401 from the token endpoint is a
    /// credential rejection carrying the server-provided detail message,
    /// not a stale-session condition.
    pub fn from_login_status(status: reqwest::StatusCode, body: &str) -> Self {
        if status.as_u16() == 401 {
            let detail = serde_json::from_str::<ErrorDetail>(body)
                .map(|e| e.detail)
                .unwrap_or_else(|_| Self::truncate_body(body));
            ApiError::InvalidCredentials(detail)
        } else {
            Self::from_status(status, body)
        }
    }
}
