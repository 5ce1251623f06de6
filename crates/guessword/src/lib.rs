//! # Guessword
//!
//! Client for a remote word-guessing engine.
//!
//! The engine owns every game: it picks the word, scores guesses, and
//! decides when a session ends. This crate keeps the client's side in
//! step with it: who is logged in, which session is active, and a 5×5
//! board rebuilt from the engine's feedback one accepted guess at a time.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use guessword::prelude::*;
//!
//! # async fn run() -> Result<(), ClientError> {
//! let transport = ClientConfig::default().http_transport()?;
//! let store = Arc::new(FileStore::new(".guessword-session.json"));
//! let mut game = GameController::new(EngineClient::new(transport), store)?;
//!
//! game.login("Alice", "Pass1@").await?;
//! game.start_session().await?;
//! game.submit_guess("crane").await?;
//! println!("{}", game.board().expect("session is active"));
//! # Ok(())
//! # }
//! ```

mod config;
mod controller;
mod engine;
mod error;

pub use config::{ClientConfig, DEFAULT_BASE_URL};
pub use controller::{GameController, GuessResult, View};
pub use engine::EngineClient;
pub use error::ClientError;

/// Everything needed to drive a session, in one import.
pub mod prelude {
    pub use crate::{
        ClientConfig, ClientError, EngineClient, GameController, GuessResult, View,
    };
    pub use guessword_game::{
        BOARD_ROWS, Board, Cell, CellStatus, GameState, Guess, Outcome,
    };
    pub use guessword_protocol::{
        DailyReport, Feedback, GameId, LetterStatus, Role, UserReport, UserReportDay,
    };
    pub use guessword_session::{
        FileStore, Identity, MemoryStore, SessionManager, SessionStore,
    };
    pub use guessword_transport::{
        HttpTransport, Request, Response, Transport, TransportError,
    };
}
