//! Unified error type for the Guessword client.

use guessword_game::{GameError, Outcome};
use guessword_protocol::ProtocolError;
use guessword_session::SessionError;
use guessword_transport::TransportError;

/// Everything a controller operation can fail with.
///
/// Local refusals (`Unauthenticated`, `InvalidGuessShape`,
/// `NoActiveSession`, `SessionEnded`) happen before any network call.
/// `RemoteRejected` is the engine saying no; its `Display` is the engine's
/// detail text, verbatim, ready to show to the user.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// No identity is stored; log in first.
    #[error("not logged in")]
    Unauthenticated,

    /// The guess isn't exactly five letters.
    #[error("guess must be exactly 5 letters, got {length}")]
    InvalidGuessShape { length: usize },

    /// There is no game to guess in; start one first.
    #[error("no active game session")]
    NoActiveSession,

    /// The game already ended; start a new one to keep playing.
    #[error("game session has ended ({0})")]
    SessionEnded(Outcome),

    /// The engine answered with a non-success status.
    #[error("{detail}")]
    RemoteRejected { status: u16, detail: String },

    /// No response arrived.
    #[error("engine unreachable: {0}")]
    Unreachable(#[from] TransportError),

    /// A response arrived but its body didn't have the expected shape.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// The session store failed.
    #[error(transparent)]
    Store(#[from] SessionError),
}

impl From<GameError> for ClientError {
    fn from(error: GameError) -> Self {
        match error {
            GameError::InvalidGuessShape { length } => Self::InvalidGuessShape { length },
        }
    }
}
