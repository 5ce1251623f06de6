//! Board reconstruction and the game-session state machine.
//!
//! The remote engine is the only authority on a session. This crate holds
//! the client's mirror of it:
//!
//! - [`Board`]: 5 rows × 5 cells, filled top to bottom, one row per
//!   accepted guess
//! - [`Guess`]: a locally validated, uppercase, five-letter guess
//! - [`GameState`]: `NoSession | Active | Ended`
//! - [`transition`]: a pure `(state, event) → (state, effects)` function
//!
//! Nothing here does I/O. The controller feeds engine responses in as
//! [`GameEvent`]s and acts on the [`Effect`]s that come out.

mod board;
mod error;
mod guess;
mod state;

pub use board::{BOARD_ROWS, Board, Cell, CellStatus};
pub use error::GameError;
pub use guess::Guess;
pub use guessword_protocol::Outcome;
pub use state::{Effect, GameEvent, GameState, transition};
