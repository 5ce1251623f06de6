//! The session manager: single source of truth for "who is logged in" and
//! "which game is active".
//!
//! Every read goes to the store, never to a cached copy. If something else
//! clears the store (a logout from another handle, or another process
//! sharing the same file), the next read here sees it immediately.

use std::sync::Arc;

use guessword_protocol::{GameId, Outcome, Role};

use crate::{Identity, SessionError, SessionStore, StoredSession};

/// Typed access to the identity and active game id in a [`SessionStore`].
///
/// ## Lifecycle
///
/// ```text
/// set_identity() ──→ set_game_id() ──→ mark_ended() ──→ set_game_id() ──→ clear_all()
///      │                  │                 │             (new game)        │
///      ▼                  ▼                 ▼                               ▼
///  [logged in]     [logged in + game]  [game + outcome]               [nothing stored]
/// ```
pub struct SessionManager<S: SessionStore> {
    store: Arc<S>,
}

// Manual impl: `#[derive(Clone)]` would require `S: Clone`, but we only
// clone the `Arc`.
impl<S: SessionStore> Clone for SessionManager<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: SessionStore> SessionManager<S> {
    /// Creates a manager over a shared store.
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Stores the identity of a freshly logged-in user.
    ///
    /// Unconditional overwrite: the token is opaque and isn't validated.
    /// All three fields are written as one unit. An active game id is kept
    /// only when the same user logs in again; a different user never
    /// inherits someone else's game.
    ///
    /// # Errors
    /// Returns [`SessionError`] if the store can't be read or written.
    pub fn set_identity(
        &self,
        token: impl Into<String>,
        role: Role,
        username: impl Into<String>,
    ) -> Result<(), SessionError> {
        let identity = Identity::new(token, role, username);
        let current = self.store.load()?;

        let same_user = current
            .identity
            .as_ref()
            .is_some_and(|old| old.username == identity.username);
        let (game_id, outcome) = if same_user {
            (current.game_id, current.outcome)
        } else {
            (None, None)
        };

        tracing::info!(
            username = %identity.username,
            role = %identity.role,
            "identity set"
        );
        self.store.replace(StoredSession {
            identity: Some(identity),
            game_id,
            outcome,
        })
    }

    /// Removes identity and game id together. Used on logout.
    ///
    /// # Errors
    /// Returns [`SessionError`] if the store can't be cleared.
    pub fn clear_all(&self) -> Result<(), SessionError> {
        self.store.clear()?;
        tracing::info!("session cleared");
        Ok(())
    }

    /// Returns the logged-in identity, or `None`.
    ///
    /// An identity missing its token or username reads as `None`.
    ///
    /// # Errors
    /// Returns [`SessionError`] if the store can't be read.
    pub fn current_identity(&self) -> Result<Option<Identity>, SessionError> {
        Ok(self
            .store
            .load()?
            .identity
            .filter(Identity::is_complete))
    }

    /// Records the active game id, replacing any previous one along with
    /// its outcome.
    ///
    /// # Errors
    /// Returns [`SessionError`] if the store can't be read or written.
    pub fn set_game_id(&self, game_id: GameId) -> Result<(), SessionError> {
        let mut current = self.store.load()?;
        current.game_id = Some(game_id);
        current.outcome = None;
        self.store.replace(current)
    }

    /// Records that the engine ended `game_id` with `outcome`.
    ///
    /// Ignored if `game_id` is no longer the stored game: a late result
    /// never lands on a newer session.
    ///
    /// # Errors
    /// Returns [`SessionError`] if the store can't be read or written.
    pub fn mark_ended(&self, game_id: GameId, outcome: Outcome) -> Result<(), SessionError> {
        let mut current = self.store.load()?;
        if current.game_id != Some(game_id) {
            tracing::debug!(%game_id, "stored game changed, outcome not recorded");
            return Ok(());
        }
        current.outcome = Some(outcome);
        self.store.replace(current)
    }

    /// Returns the stored game and its outcome, if it has ended.
    ///
    /// Same rule as [`current_game_id`](Self::current_game_id): nothing is
    /// returned without a complete identity.
    ///
    /// # Errors
    /// Returns [`SessionError`] if the store can't be read.
    pub fn current_game(&self) -> Result<Option<(GameId, Option<Outcome>)>, SessionError> {
        let current = self.store.load()?;
        let has_identity = current
            .identity
            .as_ref()
            .is_some_and(Identity::is_complete);
        Ok(current
            .game_id
            .filter(|_| has_identity)
            .map(|game_id| (game_id, current.outcome)))
    }

    /// Returns the active game id, or `None` if never set or cleared.
    ///
    /// A game id without a complete identity next to it reads as `None`:
    /// a half-cleared store means "no session".
    ///
    /// # Errors
    /// Returns [`SessionError`] if the store can't be read.
    pub fn current_game_id(&self) -> Result<Option<GameId>, SessionError> {
        Ok(self.current_game()?.map(|(game_id, _)| game_id))
    }
}

// =========================================================================
// Tests
// =========================================================================
