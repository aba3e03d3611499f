//! Client configuration.

/// Configuration shared by the auth and task clients.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend origin, e.g. `http://localhost:8080`. Trailing slashes are
    /// trimmed when requests are built.
    pub base_url: String,
    pub http_timeout_seconds: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            http_timeout_seconds: 30,
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn with_http_timeout(mut self, seconds: u64) -> Self {
        self.http_timeout_seconds = seconds;
        self
    }

    pub(crate) fn origin(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}
