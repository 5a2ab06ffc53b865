//! Request-level error types and their HTTP rendering.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use thiserror::Error;

use crate::types::ErrorEnvelope;

#[derive(Debug, Error)]
pub enum ProxyError {
    /// The upstream answered with a non-success status.
    #[error("{message}")]
    Upstream { status: u16, message: String },

    /// No response was received (connect failure, timeout, broken body).
    #[error("proxy internal error: {0}")]
    Unreachable(#[from] reqwest::Error),

    #[error("invalid request body: {0}")]
    InvalidBody(#[from] serde_json::Error),
}

impl ProxyError {
    /// Wrap an upstream failure, preferring the body's top-level `message`.
    pub fn from_upstream(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|v| {
                v.get("message")
                    .and_then(|m| m.as_str())
                    .filter(|m| !m.is_empty())
                    .map(|m| m.to_string())
            })
            .unwrap_or_else(|| format!("Request failed with status code {}", status));

        Self::Upstream { status, message }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Upstream { .. } => "proxy_error",
            Self::Unreachable(_) => "internal_error",
            Self::InvalidBody(_) => "invalid_request_error",
        }
    }

    pub fn envelope(&self) -> ErrorEnvelope {
        ErrorEnvelope::new(self.to_string(), self.kind(), self.status_code().as_u16())
    }
}

impl ResponseError for ProxyError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Upstream { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            Self::Unreachable(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::InvalidBody(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(self.envelope())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_message_comes_from_body() {
        let err = ProxyError::from_upstream(403, r#"{"message":"forbidden"}"#);
        assert_eq!(err.to_string(), "forbidden");
        assert_eq!(err.status_code(), StatusCode::FORBIDDEN);

        let env = err.envelope();
        assert_eq!(env.error.kind, "proxy_error");
        assert_eq!(env.error.code, 403);
    }

    #[test]
    fn upstream_message_falls_back_to_status_description() {
        let err = ProxyError::from_upstream(502, "<html>bad gateway</html>");
        assert_eq!(err.to_string(), "Request failed with status code 502");

        let err = ProxyError::from_upstream(400, r#"{"error":{"message":"nested"}}"#);
        assert_eq!(err.to_string(), "Request failed with status code 400");
    }

    #[test]
    fn invalid_body_is_a_client_error() {
        let err: ProxyError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.envelope().error.kind, "invalid_request_error");
    }
}
