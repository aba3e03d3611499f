//! Login and registration against the `/auth` endpoints.

use crate::config::ClientConfig;
use crate::error::ClientResult;
use crate::http::{build_http_client, decode_envelope};
use crate::session::Session;
use taskdeck_api::{ApiResponse, AuthRequest, AuthResponse, RegistrationRequest};
use tracing::info;

/// Client for the authentication endpoints.
#[derive(Clone)]
pub struct AuthClient {
    http: reqwest::Client,
    base_url: String,
    session: Session,
}

impl AuthClient {
    pub fn new(config: &ClientConfig, session: Session) -> ClientResult<Self> {
        Ok(Self {
            http: build_http_client(config.http_timeout_seconds)?,
            base_url: config.origin().to_string(),
            session,
        })
    }

    /// Log in with username and password.
    ///
    /// On a success envelope the returned token is handed to the session
    /// store before the envelope is returned. Single attempt, no retry.
    pub async fn login(&self, request: &AuthRequest) -> ClientResult<ApiResponse<AuthResponse>> {
        let response = self
            .http
            .post(format!("{}/auth/login", self.base_url))
            .json(request)
            .send()
            .await?;

        let envelope: ApiResponse<AuthResponse> = decode_envelope(response).await?;

        if envelope.success {
            if let Some(auth) = &envelope.data {
                self.session.set_token(&auth.token).await?;
                info!(username = %request.username, "login succeeded, session token stored");
            }
        }

        Ok(envelope)
    }

    /// Register a new user. Does not log in.
    pub async fn register(
        &self,
        request: &RegistrationRequest,
    ) -> ClientResult<ApiResponse<()>> {
        let response = self
            .http
            .post(format!("{}/auth/register", self.base_url))
            .json(request)
            .send()
            .await?;

        decode_envelope(response).await
    }
}
