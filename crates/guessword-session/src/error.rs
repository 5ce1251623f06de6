//! Error types for the session layer.

use std::path::PathBuf;

/// Errors that can occur while reading or writing the session store.
///
/// There is no "not logged in" variant: absence is a normal answer
/// (`Ok(None)`), not a failure. These only fire when the store itself is
/// broken, which the client treats as fatal.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Reading, writing, renaming, or removing the backing file failed.
    #[error("session store i/o failed at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The session couldn't be serialized for storage.
    #[error("session store encode failed: {0}")]
    Encode(#[source] serde_json::Error),
}
