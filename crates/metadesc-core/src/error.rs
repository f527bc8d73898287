//! Error taxonomy shared by every provider call.
//!
//! Failures are values: each public operation returns [`ApiResult`], and the
//! stable [`ApiError::code`] is what collaborators switch on.

use thiserror::Error;

/// Result alias used across the provider layer.
pub type ApiResult<T> = Result<T, ApiError>;

/// A structured failure from a provider call.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ApiError {
    /// The facade was asked for a provider name the registry doesn't know.
    #[error("provider '{0}' not found")]
    ProviderNotFound(String),

    /// Transport failure (DNS, refused, timeout) or a non-2xx status.
    ///
    /// `status` is `None` for transport failures. `body` keeps the raw
    /// response text so vendors can pull their own error message out of it.
    #[error("{message}")]
    Http {
        status: Option<u16>,
        message: String,
        body: Option<String>,
    },

    /// The response could not be decoded, or lacked the expected field.
    #[error("{0}")]
    Parse(String),
}

impl ApiError {
    /// Build a transport-level failure (no HTTP status).
    pub fn transport(message: impl Into<String>) -> Self {
        ApiError::Http {
            status: None,
            message: message.into(),
            body: None,
        }
    }

    /// Build a failure for a non-2xx response.
    pub fn status(status: u16, message: impl Into<String>, body: impl Into<String>) -> Self {
        ApiError::Http {
            status: Some(status),
            message: message.into(),
            body: Some(body.into()),
        }
    }

    pub fn parse(message: impl Into<String>) -> Self {
        ApiError::Parse(message.into())
    }

    /// Stable machine-readable code: `provider_not_found`, `http_error` or `parse_error`.
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::ProviderNotFound(_) => "provider_not_found",
            ApiError::Http { .. } => "http_error",
            ApiError::Parse(_) => "parse_error",
        }
    }

    /// HTTP status, when the failure came from a response.
    pub fn http_status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => *status,
            _ => None,
        }
    }

    /// Raw response body of a failed request, if one was received.
    pub fn raw_body(&self) -> Option<&str> {
        match self {
            ApiError::Http { body, .. } => body.as_deref(),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Parse(format!("invalid JSON: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes() {
        assert_eq!(
            ApiError::ProviderNotFound("x".into()).code(),
            "provider_not_found"
        );
        assert_eq!(ApiError::transport("boom").code(), "http_error");
        assert_eq!(ApiError::status(500, "oops", "{}").code(), "http_error");
        assert_eq!(ApiError::parse("bad").code(), "parse_error");
    }

    #[test]
    fn test_display_messages() {
        assert_eq!(
            ApiError::ProviderNotFound("acme".into()).to_string(),
            "provider 'acme' not found"
        );
        assert_eq!(ApiError::status(429, "slow down", "").to_string(), "slow down");
    }

    #[test]
    fn test_status_and_body_accessors() {
        let err = ApiError::status(401, "Unauthorized", r#"{"error":"nope"}"#);
        assert_eq!(err.http_status(), Some(401));
        assert_eq!(err.raw_body(), Some(r#"{"error":"nope"}"#));

        let err = ApiError::transport("connection refused");
        assert_eq!(err.http_status(), None);
        assert_eq!(err.raw_body(), None);
    }

    #[test]
    fn test_from_serde_json_error() {
        let e = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: ApiError = e.into();
        assert_eq!(err.code(), "parse_error");
        assert!(err.to_string().starts_with("invalid JSON"));
    }
}
