//! Client error types.

use taskdeck_api::ApiFailure;
use thiserror::Error;

pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("URL parsing error: {0}")]
    Url(#[from] url::ParseError),

    /// The backend answered non-2xx but still produced a well-formed
    /// failure envelope.
    #[error(transparent)]
    Api(#[from] ApiFailure),

    /// Non-2xx response whose body was not an envelope.
    #[error("Unexpected response ({status}): {body}")]
    UnexpectedResponse { status: u16, body: String },

    #[error("Session storage error: {0}")]
    Store(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    ConfigError(String),
}
