use crate::core::errors::ExchangeError;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::value::RawValue;

/// Unwrapped `result` of a successful response, still unparsed
pub type Payload = Box<RawValue>;

/// Uniform wrapper around every response body
#[derive(Debug, Deserialize)]
pub struct Envelope {
    pub success: bool,
    /// Absent or `null` on most successful responses
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub result: Option<Payload>,
}

/// Unwrap the response envelope.
///
/// Fails with `MalformedResponse` when the body is not an envelope and with
/// `ApiError` (message preserved verbatim) when the exchange reports failure.
/// On success the `result` is returned untouched; a missing or null `result`
/// comes back as the JSON literal `null`.
pub fn decode_envelope(body: &[u8]) -> Result<Payload, ExchangeError> {
    let envelope: Envelope = serde_json::from_slice(body)
        .map_err(|e| ExchangeError::MalformedResponse(format!("invalid envelope: {}", e)))?;

    if !envelope.success {
        return Err(ExchangeError::ApiError {
            message: envelope.message.unwrap_or_default(),
        });
    }

    match envelope.result {
        Some(result) => Ok(result),
        None => RawValue::from_string("null".to_string())
            .map_err(|e| ExchangeError::MalformedResponse(e.to_string())),
    }
}

/// Decode an unwrapped payload into its endpoint-specific shape
pub fn decode_result<T: DeserializeOwned>(payload: &RawValue) -> Result<T, ExchangeError> {
    serde_json::from_str(payload.get()).map_err(|e| {
        ExchangeError::DeserializationError(format!("Failed to deserialize result: {}", e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    #[test]
    fn test_success_returns_result_unchanged() {
        let result = r#"[{"Currency":"BTC","Balance":1.5},{"Currency":"ETH","Balance":0}]"#;
        let body = format!(r#"{{"success":true,"message":"","result":{}}}"#, result);

        let payload = decode_envelope(body.as_bytes()).unwrap();
        assert_eq!(payload.get(), result);
    }

    #[test]
    fn test_failure_yields_api_error_verbatim() {
        let body = br#"{"success":false,"message":"INVALID_MARKET","result":null}"#;
        match decode_envelope(body) {
            Err(ExchangeError::ApiError { message }) => assert_eq!(message, "INVALID_MARKET"),
            other => panic!("expected ApiError, got {:?}", other),
        }

        // result may be absent entirely
        let body = br#"{"success":false,"message":"APIKEY_INVALID"}"#;
        let err = decode_envelope(body).unwrap_err();
        assert_eq!(err.api_message(), Some("APIKEY_INVALID"));
    }

    #[test]
    fn test_failure_ignores_result_payload() {
        let body = br#"{"success":false,"message":"ADDRESS_GENERATING","result":{"Address":"x"}}"#;
        let err = decode_envelope(body).unwrap_err();
        assert_eq!(err.api_message(), Some("ADDRESS_GENERATING"));
    }

    #[test]
    fn test_null_message_is_accepted() {
        let payload = decode_envelope(br#"{"success":true,"message":null,"result":[1,2]}"#).unwrap();
        assert_eq!(payload.get(), "[1,2]");

        match decode_envelope(br#"{"success":false,"message":null}"#) {
            Err(ExchangeError::ApiError { message }) => assert!(message.is_empty()),
            other => panic!("expected ApiError, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_json_is_malformed() {
        for body in [&b"<html>502 Bad Gateway</html>"[..], b"", br#"{"message":"x"}"#] {
            assert!(matches!(
                decode_envelope(body),
                Err(ExchangeError::MalformedResponse(_))
            ));
        }
    }

    #[test]
    fn test_missing_result_is_null() {
        let payload = decode_envelope(br#"{"success":true,"message":""}"#).unwrap();
        assert_eq!(payload.get(), "null");
        let payload = decode_envelope(br#"{"success":true,"message":"","result":null}"#).unwrap();
        assert_eq!(payload.get(), "null");
    }

    #[test]
    fn test_decode_result_maps_errors() {
        let payload = decode_envelope(br#"{"success":true,"result":{"uuid":"abc"}}"#).unwrap();
        let value: Value = decode_result(&payload).unwrap();
        assert_eq!(value, json!({"uuid": "abc"}));

        let err = decode_result::<Vec<String>>(&payload).unwrap_err();
        assert!(matches!(err, ExchangeError::DeserializationError(_)));
    }
}
