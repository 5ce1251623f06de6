//! Error types for the game layer.

/// Local validation failures. These never reach the network.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    /// The guess isn't exactly five characters after uppercasing.
    ///
    /// This is a shape check only. Whether the word is in the dictionary
    /// is the engine's call.
    #[error("guess must be exactly 5 letters, got {length}")]
    InvalidGuessShape { length: usize },
}
