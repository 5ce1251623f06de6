/// Boxed source error, so test doubles can fail without pulling in reqwest.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that can occur in the transport layer.
///
/// None of these mean the engine said "no": a rejection still arrives as a
/// [`Response`](crate::Response) with a non-success status. These mean no
/// usable response arrived at all.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The base URL or a path segment couldn't form a valid URL.
    #[error("invalid url: {0}")]
    InvalidUrl(String),

    /// The underlying client couldn't be constructed.
    #[error("transport setup failed: {0}")]
    Setup(#[source] BoxError),

    /// Connecting, sending, or reading the response body failed.
    #[error("request failed: {0}")]
    RequestFailed(#[source] BoxError),

    /// A configured timeout elapsed before the engine answered.
    #[error("request timed out")]
    TimedOut,
}
