//! Client configuration.

use std::time::Duration;

use guessword_transport::{HttpTransport, TransportError};

/// Default engine address: the engine's own development default.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// Where the engine lives and how to reach it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Root URL the engine's paths are appended to.
    pub base_url: String,

    /// Per-request timeout. `None` (the default) waits as long as the
    /// engine takes.
    pub timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
        }
    }
}

impl ClientConfig {
    /// Creates a config for `base_url` with no timeout.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Builds an [`HttpTransport`] from this config.
    ///
    /// # Errors
    /// Returns [`TransportError`] if the base URL is invalid or the HTTP
    /// client can't be built.
    pub fn http_transport(&self) -> Result<HttpTransport, TransportError> {
        let mut builder = HttpTransport::builder(self.base_url.clone());
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        builder.build()
    }
}
