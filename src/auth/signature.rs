//! HMAC-SHA512 signature generation for Bithumb API authentication.
//!
//! Bithumb private endpoints require a signature computed as:
//! ```text
//! base64(hex(HMAC-SHA512(endpoint + NUL + POST_data + NUL + nonce, api_secret)))
//! ```
//!
//! The three parts are joined with NUL (`chr(0)`) separators, the HMAC digest
//! is rendered as a lowercase hex string, and that hex string is then
//! base64-encoded and sent in the `Api-Sign` header.

use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use hmac::{Hmac, Mac};
use sha2::Sha512;

use crate::auth::Credentials;
use crate::error::BithumbError;

type HmacSha512 = Hmac<Sha512>;

/// Sign a request for Bithumb's private API.
///
/// # Arguments
///
/// * `credentials` - API credentials containing the secret
/// * `endpoint` - The API endpoint path (e.g., "/info/balance")
/// * `nonce` - The millisecond nonce value for this request
/// * `post_data` - The URL-encoded POST body
///
/// # Returns
///
/// The base64-encoded hex HMAC-SHA512 signature for the `Api-Sign` header.
///
/// # Example
///
/// ```rust,no_run
/// use bithumb_api_client::auth::{Credentials, sign_request};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let credentials = Credentials::new("connect_key", "secret_key");
/// let signature = sign_request(
///     &credentials,
///     "/info/balance",
///     1616492376594,
///     "endpoint=%2Finfo%2Fbalance&currency=BTC",
/// )?;
/// # Ok(())
/// # }
/// ```
pub fn sign_request(
    credentials: &Credentials,
    endpoint: &str,
    nonce: u64,
    post_data: &str,
) -> Result<String, BithumbError> {
    // Join endpoint, POST data and nonce with NUL separators.
    let nonce_str = nonce.to_string();
    let mut message = Vec::with_capacity(endpoint.len() + post_data.len() + nonce_str.len() + 2);
    message.extend_from_slice(endpoint.as_bytes());
    message.push(0);
    message.extend_from_slice(post_data.as_bytes());
    message.push(0);
    message.extend_from_slice(nonce_str.as_bytes());

    // Compute HMAC-SHA512 over the joined message with the raw secret.
    let mut hmac = HmacSha512::new_from_slice(credentials.expose_secret().as_bytes())
        .map_err(|e| BithumbError::Auth(format!("Invalid HMAC key: {e}")))?;
    hmac.update(&message);
    let digest = hmac.finalize().into_bytes();

    // Hex-encode the digest, then base64 the hex string.
    Ok(BASE64.encode(hex::encode(digest)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signature_shape() {
        let credentials = Credentials::new("test_key", "test_secret_key_for_signing");

        let signature = sign_request(
            &credentials,
            "/info/balance",
            1616492376594,
            "endpoint=%2Finfo%2Fbalance&currency=BTC",
        )
        .unwrap();

        // The signature is base64 of the 128-char hex digest.
        let decoded = BASE64.decode(&signature).unwrap();
        assert_eq!(decoded.len(), 128);
        assert!(decoded.iter().all(|b| b.is_ascii_hexdigit()));
    }

    #[test]
    fn test_signature_consistency() {
        // Same inputs should produce same signature
        let credentials = Credentials::new("key", "my_secret");

        let sig1 = sign_request(
            &credentials,
            "/info/orders",
            12345,
            "endpoint=%2Finfo%2Forders&count=10",
        )
        .unwrap();
        let sig2 = sign_request(
            &credentials,
            "/info/orders",
            12345,
            "endpoint=%2Finfo%2Forders&count=10",
        )
        .unwrap();

        assert_eq!(sig1, sig2);
    }

    #[test]
    fn test_signature_changes_with_nonce() {
        let credentials = Credentials::new("key", "my_secret");

        let sig1 = sign_request(&credentials, "/info/balance", 12345, "currency=BTC").unwrap();
        let sig2 = sign_request(&credentials, "/info/balance", 12346, "currency=BTC").unwrap();

        assert_ne!(sig1, sig2);
    }

    #[test]
    fn test_signature_changes_with_endpoint() {
        let credentials = Credentials::new("key", "my_secret");

        let sig1 = sign_request(&credentials, "/info/balance", 12345, "currency=BTC").unwrap();
        let sig2 = sign_request(&credentials, "/info/account", 12345, "currency=BTC").unwrap();

        assert_ne!(sig1, sig2);
    }
}
