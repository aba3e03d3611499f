//! The response envelope wrapped around every backend payload.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Envelope wrapped around every API response.
///
/// `data` is only meaningful when `success` is true; failure envelopes carry
/// the user-facing `message` and, for validation failures, a field-keyed
/// `errors` map.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    /// HTTP status the backend recorded in the body. Serialized as
    /// `statusCode` on the wire; `status` is accepted too.
    #[serde(rename = "statusCode", alias = "status")]
    pub status: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<HashMap<String, String>>,
}

/// A failure envelope, surfaced as an error.
#[derive(Debug, Clone, Error)]
#[error("API request failed ({status}): {message}")]
pub struct ApiFailure {
    pub status: u16,
    pub message: String,
}

impl<T> ApiResponse<T> {
    /// Unwrap the payload of a success envelope, turning a failure envelope
    /// into an [`ApiFailure`].
    pub fn into_data(self) -> Result<T, ApiFailure> {
        match (self.success, self.data) {
            (true, Some(data)) => Ok(data),
            _ => Err(ApiFailure {
                status: self.status,
                message: self.message,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_success_envelope() {
        let json = r#"{
            "success": true,
            "statusCode": 200,
            "message": "Login successful",
            "data": {"token": "abc"}
        }"#;

        let envelope: ApiResponse<serde_json::Value> = serde_json::from_str(json).unwrap();
        assert!(envelope.success);
        assert_eq!(envelope.status, 200);
        assert_eq!(envelope.into_data().unwrap()["token"], "abc");
    }

    #[test]
    fn accepts_status_spelling() {
        let json = r#"{"success": false, "status": 401, "message": "Incorrect username or password"}"#;
        let envelope: ApiResponse<()> = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.status, 401);
    }

    #[test]
    fn failure_envelope_becomes_api_failure() {
        let json = r#"{
            "success": false,
            "statusCode": 400,
            "message": "Validation failed",
            "errors": {"title": "Title must be between 3 and 255 characters"}
        }"#;

        let envelope: ApiResponse<serde_json::Value> = serde_json::from_str(json).unwrap();
        assert_eq!(
            envelope.errors.as_ref().unwrap()["title"],
            "Title must be between 3 and 255 characters"
        );
        let failure = envelope.into_data().unwrap_err();
        assert_eq!(failure.status, 400);
        assert_eq!(failure.message, "Validation failed");
    }

    #[test]
    fn missing_data_on_delete_is_tolerated() {
        let json = r#"{"success": true, "statusCode": 200, "message": "Task deleted successfully"}"#;
        let envelope: ApiResponse<()> = serde_json::from_str(json).unwrap();
        assert!(envelope.success);
        assert!(envelope.data.is_none());
    }
}
