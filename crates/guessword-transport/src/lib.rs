//! Transport abstraction layer for Guessword.
//!
//! Provides the [`Transport`] trait: send one [`Request`] to the remote
//! game engine, get back one [`Response`]. Every engine call is a single
//! request/response exchange; there are no streams and no push messages.
//!
//! # Feature Flags
//!
//! - `http` (default): HTTP transport via `reqwest`

#![allow(async_fn_in_trait)]

mod error;
#[cfg(feature = "http")]
mod http;

pub use error::{BoxError, TransportError};
#[cfg(feature = "http")]
pub use http::{HttpTransport, HttpTransportBuilder};

use std::fmt;

/// Request method. The engine only uses these two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "GET"),
            Self::Post => write!(f, "POST"),
        }
    }
}

/// A request body together with its content type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Body {
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

/// One call to the engine.
///
/// The path is kept as raw segments (`["report", "user", "Alice"]`) so the
/// transport can percent-encode each one; a username never gets a chance
/// to inject a `/` or `?`.
#[derive(Clone, PartialEq, Eq)]
pub struct Request {
    pub method: Method,
    pub path: Vec<String>,
    pub query: Vec<(String, String)>,
    /// Bearer token for the `Authorization` header.
    pub bearer: Option<String>,
    pub body: Option<Body>,
}

impl Request {
    /// Creates a request with no query, no auth, and no body.
    pub fn new<I, S>(method: Method, path: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            method,
            path: path.into_iter().map(Into::into).collect(),
            query: Vec::new(),
            bearer: None,
            body: None,
        }
    }

    /// Shorthand for a `GET`.
    pub fn get<I, S>(path: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(Method::Get, path)
    }

    /// Shorthand for a `POST`.
    pub fn post<I, S>(path: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(Method::Post, path)
    }

    /// Adds a bearer token.
    pub fn bearer(mut self, token: impl Into<String>) -> Self {
        self.bearer = Some(token.into());
        self
    }

    /// Appends a query parameter.
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Attaches a body.
    pub fn body(mut self, content_type: &'static str, bytes: Vec<u8>) -> Self {
        self.body = Some(Body {
            content_type,
            bytes,
        });
        self
    }

    /// Returns the path as `/a/b/c`, for logging.
    pub fn path_string(&self) -> String {
        format!("/{}", self.path.join("/"))
    }
}

// The bearer token and body may carry credentials.
impl fmt::Debug for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Request")
            .field("method", &self.method)
            .field("path", &self.path_string())
            .field("query", &self.query)
            .field("bearer", &self.bearer.as_ref().map(|_| "<redacted>"))
            .field("body_len", &self.body.as_ref().map(|b| b.bytes.len()))
            .finish()
    }
}

/// What the engine answered: a status code and the raw body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub body: Vec<u8>,
}

impl Response {
    /// Creates a response from parts.
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Returns `true` for any 2xx status.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends requests to the remote game engine.
///
/// Implementations only move bytes. A non-success status is still
/// `Ok(Response)`; `Err` is reserved for "no response at all".
pub trait Transport: Send + Sync + 'static {
    /// Sends one request and waits for its response.
    async fn send(&self, request: Request) -> Result<Response, TransportError>;
}
