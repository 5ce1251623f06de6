//! Error types for the protocol layer.
//!
//! Each Guessword crate defines its own error enum. When you see a
//! `ProtocolError`, you know the problem is in the shape of a body the
//! engine sent (or that we tried to send), not in the network or the store.

/// Errors that can occur in the protocol layer.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// Serialization failed (turning a request body into bytes).
    #[cfg(feature = "json")]
    #[error("encode failed: {0}")]
    Encode(serde_json::Error),

    /// Deserialization failed (turning a response body into a Rust type).
    ///
    /// Common causes: the engine answered with a body of a different
    /// shape, a feedback list that isn't exactly five entries long, or an
    /// unknown letter status.
    #[cfg(feature = "json")]
    #[error("decode failed: {0}")]
    Decode(serde_json::Error),

    /// The body decoded but breaks a protocol rule.
    #[error("invalid message: {0}")]
    InvalidMessage(String),
}
