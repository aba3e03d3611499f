//! Shared response decoding.

use crate::error::{ClientError, ClientResult};
use serde::de::DeserializeOwned;
use taskdeck_api::{ApiFailure, ApiResponse};
use tracing::error;

/// Decode a response into its envelope.
///
/// A 2xx response is returned as the envelope it carries, success flag and
/// all. A non-2xx response is an error: the backend wraps those in a failure
/// envelope too, which is surfaced as [`ClientError::Api`]; anything else
/// (proxy pages, empty bodies) becomes [`ClientError::UnexpectedResponse`].
pub(crate) async fn decode_envelope<T: DeserializeOwned>(
    response: reqwest::Response,
) -> ClientResult<ApiResponse<T>> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json().await?);
    }

    let body = response.text().await.unwrap_or_default();
    match serde_json::from_str::<ApiResponse<serde_json::Value>>(&body) {
        Ok(envelope) => {
            error!(status = envelope.status, "request failed: {}", envelope.message);
            Err(ApiFailure {
                status: envelope.status,
                message: envelope.message,
            }
            .into())
        }
        Err(_) => {
            error!(status = status.as_u16(), "non-envelope error response");
            Err(ClientError::UnexpectedResponse {
                status: status.as_u16(),
                body,
            })
        }
    }
}

/// Build the reqwest client both API clients share.
pub(crate) fn build_http_client(timeout_seconds: u64) -> ClientResult<reqwest::Client> {
    Ok(reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(timeout_seconds))
        .build()?)
}
