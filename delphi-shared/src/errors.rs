//! Error payloads reported by the Delphi service.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error body the service attaches to failed requests and failed tasks.
///
/// Every error response carries the same four fields: a human readable
/// `message`, a stable machine readable `code`, the error `kind` bucket
/// (serialized as `type` on the wire) and a `link` to the online
/// documentation for that code.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("{code}: {message}")]
pub struct ServiceError {
    /// Human readable description of the error.
    pub message: String,
    /// Stable error code, e.g. `index_not_found` or `invalid_api_key`.
    pub code: String,
    /// Error bucket: `invalid_request`, `internal`, `auth` or `system`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Link to the documentation page describing the error code.
    pub link: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_wire_shape() {
        let raw = r#"{
            "message": "The provided API key is invalid.",
            "code": "invalid_api_key",
            "type": "auth",
            "link": "https://docs.delphi.dev/errors#invalid_api_key"
        }"#;

        let err: ServiceError = serde_json::from_str(raw).unwrap();
        assert_eq!(err.code, "invalid_api_key");
        assert_eq!(err.kind, "auth");
        assert_eq!(
            err.to_string(),
            "invalid_api_key: The provided API key is invalid."
        );
    }

    #[test]
    fn round_trips_type_field_name() {
        let err = ServiceError {
            message: "Index `movies` not found.".to_string(),
            code: "index_not_found".to_string(),
            kind: "invalid_request".to_string(),
            link: "https://docs.delphi.dev/errors#index_not_found".to_string(),
        };

        let value = serde_json::to_value(&err).unwrap();
        assert_eq!(value["type"], "invalid_request");
        assert!(value.get("kind").is_none());
    }
}
