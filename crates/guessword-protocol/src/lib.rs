//! Wire protocol for Guessword.
//!
//! This crate defines the "language" the client and the remote game engine
//! speak:
//!
//! - **Types** ([`Credentials`], [`GuessRequest`], [`GuessResponse`],
//!   [`Feedback`], etc.): the bodies that travel in each engine call.
//! - **Codec** ([`Codec`] trait, [`JsonCodec`]): how those bodies are
//!   converted to/from bytes.
//! - **Errors** ([`ProtocolError`]): what can go wrong during
//!   encoding/decoding.
//!
//! # Architecture
//!
//! The protocol layer sits between transport (raw request/response bytes)
//! and the session controller. It doesn't know about stores or boards;
//! it only knows the shape of each engine call.
//!
//! ```text
//! Transport (bytes) → Protocol (typed bodies) → Controller (game state)
//! ```

mod codec;
mod error;
mod types;

pub use codec::Codec;
#[cfg(feature = "json")]
pub use codec::JsonCodec;
pub use error::ProtocolError;
pub use types::{
    Credentials, DailyReport, Feedback, GameId, GuessRequest, GuessResponse,
    LetterStatus, LoginResponse, Outcome, RegisterResponse, Role, StartGameResponse,
    UserReport, UserReportDay, WORD_LEN,
};
