//! HTTP transport implementation using `reqwest`.

use std::time::Duration;

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Url};

use crate::{Method, Request, Response, Transport, TransportError};

/// Builder for [`HttpTransport`].
///
/// No timeout is set by default: a slow engine call simply completes
/// later.
#[derive(Debug, Clone)]
pub struct HttpTransportBuilder {
    base_url: String,
    timeout: Option<Duration>,
}

impl HttpTransportBuilder {
    /// Sets a per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Parses the base URL and constructs the client.
    ///
    /// # Errors
    /// - [`TransportError::InvalidUrl`]: the base URL doesn't parse or
    ///   can't carry a path (e.g. `mailto:`)
    /// - [`TransportError::Setup`]: the reqwest client can't be built
    pub fn build(self) -> Result<HttpTransport, TransportError> {
        let base_url = Url::parse(&self.base_url)
            .map_err(|e| TransportError::InvalidUrl(format!("{}: {e}", self.base_url)))?;
        if base_url.cannot_be_a_base() {
            return Err(TransportError::InvalidUrl(self.base_url));
        }

        let mut builder = Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| TransportError::Setup(Box::new(e)))?;

        tracing::debug!(base_url = %base_url, "HTTP transport ready");
        Ok(HttpTransport { client, base_url })
    }
}

/// A [`Transport`] that talks to the engine over HTTP.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: Url,
}

impl HttpTransport {
    /// Starts building a transport rooted at `base_url`.
    pub fn builder(base_url: impl Into<String>) -> HttpTransportBuilder {
        HttpTransportBuilder {
            base_url: base_url.into(),
            timeout: None,
        }
    }

    /// Returns the base URL every request path is appended to.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Appends the request's path segments and query to the base URL.
    ///
    /// Segments are appended (not resolved), so a base of
    /// `http://host/api/` keeps its `/api` prefix.
    fn endpoint(&self, request: &Request) -> Result<Url, TransportError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| TransportError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(&request.path);
        if !request.query.is_empty() {
            url.query_pairs_mut().extend_pairs(&request.query);
        }
        Ok(url)
    }
}

impl Transport for HttpTransport {
    async fn send(&self, request: Request) -> Result<Response, TransportError> {
        let url = self.endpoint(&request)?;
        let path = request.path_string();
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
        };

        let mut builder = self
            .client
            .request(method, url)
            .header(ACCEPT, "application/json");
        if let Some(token) = &request.bearer {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = request.body {
            builder = builder
                .header(CONTENT_TYPE, body.content_type)
                .body(body.bytes);
        }

        let response = builder.send().await.map_err(map_reqwest_error)?;
        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(map_reqwest_error)?;

        tracing::debug!(
            method = %request.method,
            %path,
            status,
            "engine responded"
        );
        Ok(Response::new(status, body.to_vec()))
    }
}

fn map_reqwest_error(error: reqwest::Error) -> TransportError {
    if error.is_timeout() {
        TransportError::TimedOut
    } else {
        TransportError::RequestFailed(Box::new(error))
    }
}
