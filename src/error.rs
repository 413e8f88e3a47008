//! Error types for the Bithumb client library.

use thiserror::Error;

/// The main error type for all Bithumb client operations.
#[derive(Error, Debug)]
pub enum BithumbError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// HTTP request with middleware failed
    #[error("HTTP request failed: {0}")]
    HttpMiddleware(#[from] reqwest_middleware::Error),

    /// Response body was not valid JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Bithumb API returned a non-success status code
    #[error("Bithumb API error: {0}")]
    Api(ApiError),

    /// A response payload field could not be decoded
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// Authentication error
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Missing required credentials
    #[error("Missing credentials: API key and secret required for private endpoints")]
    MissingCredentials,

    /// Request parameters rejected before any network call was made
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

/// Bithumb API error status and message.
///
/// Bithumb reports errors inside the response body as a non-`"0000"` status
/// code plus a human-readable message. Match on [`ApiError::code`] for
/// programmatic handling; the message is informational only and its wording
/// is not stable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// The status code returned by the exchange (e.g. "5100")
    pub code: String,
    /// Human-readable error message, when the exchange provided one
    pub message: Option<String>,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.message {
            Some(message) => write!(f, "{}: {}", self.code, message),
            None => write!(f, "{}", self.code),
        }
    }
}

impl ApiError {
    /// Create a new API error from a status code and optional message.
    pub fn new(code: impl Into<String>, message: Option<String>) -> Self {
        Self {
            code: code.into(),
            message,
        }
    }

    /// Check if this is a bad request error (missing or malformed parameters).
    pub fn is_bad_request(&self) -> bool {
        self.code == status_codes::BAD_REQUEST
    }

    /// Check if this is an authentication failure (bad key, signature, or nonce).
    pub fn is_auth_failure(&self) -> bool {
        matches!(
            self.code.as_str(),
            status_codes::NOT_MEMBER | status_codes::INVALID_API_KEY
        )
    }

    /// Check if the exchange rejected the request for exceeding its rate limits.
    pub fn is_rate_limited(&self) -> bool {
        self.code == status_codes::TOO_MANY_REQUESTS
    }

    /// Check if this is an insufficient funds error.
    pub fn is_insufficient_funds(&self) -> bool {
        self.code == status_codes::LACK_OF_KRW || self.code == status_codes::LACK_OF_COIN
    }
}

/// Known Bithumb status codes for pattern matching.
pub mod status_codes {
    /// Request succeeded.
    pub const SUCCESS: &str = "0000";
    /// Bad request (missing or malformed parameter).
    pub const BAD_REQUEST: &str = "5100";
    /// Not a member / unregistered API key.
    pub const NOT_MEMBER: &str = "5200";
    /// Invalid API key, signature, or nonce.
    pub const INVALID_API_KEY: &str = "5300";
    /// Method not allowed for this API key.
    pub const METHOD_NOT_ALLOWED: &str = "5302";
    /// Database failure on the exchange side.
    pub const DATABASE_FAIL: &str = "5400";
    /// Insufficient KRW balance.
    pub const LACK_OF_KRW: &str = "5500";
    /// Insufficient coin balance.
    pub const LACK_OF_COIN: &str = "5600";
    /// Too many requests.
    pub const TOO_MANY_REQUESTS: &str = "5900";
}

/// A response field failed to decode.
///
/// Produced when a payload field is missing, has the wrong JSON type, or
/// carries a malformed value (non-numeric decimal string, truncated epoch
/// string, unrecognized balance key, unregistered currency suffix). The
/// offending field is always named so callers can see exactly which part of
/// the payload was bad; a zeroed field is never substituted for a failed
/// decode.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("field `{field}`: {reason}")]
pub struct DecodeError {
    /// Name of the payload field (or key path) that failed to decode
    pub field: String,
    /// What was wrong with it
    pub reason: String,
}

impl DecodeError {
    /// Create a new decode error for the named field.
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// A field that was expected but absent from the payload.
    pub fn missing(field: impl Into<String>) -> Self {
        Self::new(field, "missing from payload")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let error = ApiError::new("5600", Some("Insufficient coin balance".to_string()));
        assert_eq!(error.to_string(), "5600: Insufficient coin balance");
        assert!(error.is_insufficient_funds());

        let bare = ApiError::new("5100", None);
        assert_eq!(bare.to_string(), "5100");
        assert!(bare.is_bad_request());
    }

    #[test]
    fn test_decode_error_display() {
        let error = DecodeError::new("opening_price", "invalid decimal string `abc`");
        assert_eq!(
            error.to_string(),
            "field `opening_price`: invalid decimal string `abc`"
        );
    }
}
