//! The success/failure envelope shared by all Bithumb responses.
//!
//! Every endpoint wraps its payload as `{"status": "...", "message"?: ...,
//! "data": ...}` with `"0000"` meaning success. The candlestick endpoint is
//! the one deviation: its status may arrive as a bare integer, and is
//! normalized here into the same failure model. Envelope parsing is a pure
//! decode step; it never retries and never touches caller state.

use serde::{Deserialize, Deserializer, de};
use serde_json::Value;

use crate::error::{ApiError, BithumbError, DecodeError, status_codes};

/// The standard response envelope.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiEnvelope {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<Value>,
    /// Trade endpoints return the new order id beside `status` rather than
    /// inside `data`.
    #[serde(default)]
    pub order_id: Option<String>,
}

impl ApiEnvelope {
    fn check(self) -> Result<Self, BithumbError> {
        if self.status == status_codes::SUCCESS {
            Ok(self)
        } else {
            Err(BithumbError::Api(ApiError::new(self.status, self.message)))
        }
    }

    /// Discriminate success from failure without consuming the payload.
    pub fn ensure_success(self) -> Result<(), BithumbError> {
        self.check().map(|_| ())
    }

    /// On success, yield the `data` payload; on failure, the API error.
    pub fn into_data(self) -> Result<Value, BithumbError> {
        let envelope = self.check()?;
        envelope
            .data
            .ok_or_else(|| DecodeError::missing("data").into())
    }

    /// On success, yield the top-level `order_id` of a trade response.
    pub fn into_order_id(self) -> Result<String, BithumbError> {
        let envelope = self.check()?;
        envelope
            .order_id
            .ok_or_else(|| DecodeError::missing("order_id").into())
    }
}

/// The candlestick response envelope with its integer-or-string status.
#[derive(Debug, Deserialize)]
pub(crate) struct CandleEnvelope {
    #[serde(deserialize_with = "status_as_string")]
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<Vec<Value>>,
}

impl CandleEnvelope {
    /// On success, yield the raw candle rows; on failure, the API error with
    /// the status code exactly as the exchange sent it.
    pub fn into_rows(self) -> Result<Vec<Value>, BithumbError> {
        if self.status != status_codes::SUCCESS && self.status != "0" {
            return Err(BithumbError::Api(ApiError::new(self.status, self.message)));
        }
        self.data
            .ok_or_else(|| DecodeError::missing("data").into())
    }
}

fn status_as_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        _ => Err(de::Error::custom("expected a string or integer status")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_envelope_success_yields_data() {
        let envelope: ApiEnvelope =
            serde_json::from_value(json!({"status": "0000", "data": {"k": "v"}})).unwrap();
        let data = envelope.into_data().unwrap();
        assert_eq!(data["k"], "v");
    }

    #[test]
    fn test_envelope_failure_carries_status_code() {
        let envelope: ApiEnvelope = serde_json::from_value(
            json!({"status": "5600", "message": "Invalid Parameter", "data": {"ignored": true}}),
        )
        .unwrap();
        match envelope.into_data() {
            Err(BithumbError::Api(api)) => {
                assert_eq!(api.code, "5600");
                assert_eq!(api.message.as_deref(), Some("Invalid Parameter"));
            }
            other => panic!("expected API error, got {other:?}"),
        }
    }

    #[test]
    fn test_envelope_success_without_data_is_decode_error() {
        let envelope: ApiEnvelope = serde_json::from_value(json!({"status": "0000"})).unwrap();
        match envelope.into_data() {
            Err(BithumbError::Decode(e)) => assert_eq!(e.field, "data"),
            other => panic!("expected decode error, got {other:?}"),
        }
    }

    #[test]
    fn test_envelope_order_id() {
        let envelope: ApiEnvelope =
            serde_json::from_value(json!({"status": "0000", "order_id": "1428646963419"}))
                .unwrap();
        assert_eq!(envelope.into_order_id().unwrap(), "1428646963419");
    }

    #[test]
    fn test_candle_envelope_integer_status() {
        let envelope: CandleEnvelope =
            serde_json::from_value(json!({"status": 0, "data": [[1, "2", "3", "4", "5", "6"]]}))
                .unwrap();
        assert_eq!(envelope.into_rows().unwrap().len(), 1);
    }

    #[test]
    fn test_candle_envelope_failure_normalized() {
        let envelope: CandleEnvelope =
            serde_json::from_value(json!({"status": 5500, "message": "bad interval"})).unwrap();
        match envelope.into_rows() {
            Err(BithumbError::Api(api)) => assert_eq!(api.code, "5500"),
            other => panic!("expected API error, got {other:?}"),
        }
    }
}
