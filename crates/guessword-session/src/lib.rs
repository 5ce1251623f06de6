//! Identity and active-game storage for the Guessword client.
//!
//! This crate answers two questions for the rest of the client:
//!
//! 1. **Who is logged in?** An [`Identity`] (username, role, token)
//! 2. **Which game is active?** A [`GameId`](guessword_protocol::GameId)
//!
//! Both live together in one [`StoredSession`] unit behind the
//! [`SessionStore`] trait, so they are written and cleared as one piece.
//! [`SessionManager`] is the typed front door the controller uses.
//!
//! # How it fits in the stack
//!
//! ```text
//! Controller (above)  ← asks "who am I?" and "which game?" before each call
//!     ↕
//! Session Layer (this crate)  ← owns identity + active game id
//!     ↕
//! SessionStore (below)  ← memory, or a JSON file that outlives the process
//! ```

mod error;
mod identity;
mod manager;
mod store;

pub use error::SessionError;
pub use identity::{Identity, StoredSession};
pub use manager::SessionManager;
pub use store::{FileStore, MemoryStore, SessionStore};
