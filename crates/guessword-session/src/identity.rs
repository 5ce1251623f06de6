//! The data held by the session store.

use std::fmt;

use guessword_protocol::{GameId, Outcome, Role};
use serde::{Deserialize, Serialize};

/// Who is logged in.
///
/// Written once on successful login, cleared on logout. The token is
/// opaque to the client: it is never parsed, only echoed back to the
/// engine as a bearer token.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub username: String,
    pub role: Role,
    pub token: String,
}

impl Identity {
    /// Creates an identity from its three parts.
    pub fn new(
        token: impl Into<String>,
        role: Role,
        username: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            role,
            token: token.into(),
        }
    }

    /// Returns `true` if both the token and the username are non-empty.
    ///
    /// An incomplete identity is reported as absent on read, so a
    /// non-empty token always comes with a username.
    pub fn is_complete(&self) -> bool {
        !self.token.is_empty() && !self.username.is_empty()
    }
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Identity")
            .field("username", &self.username)
            .field("role", &self.role)
            .field("token", &"<redacted>")
            .finish()
    }
}

/// Everything the store persists, as one unit.
///
/// `Default` is the empty session: nobody logged in, no game.
/// `outcome` belongs to `game_id`: it is `Some` once the engine has ended
/// that game, and is reset whenever a new game id is stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredSession {
    #[serde(default)]
    pub identity: Option<Identity>,
    #[serde(default)]
    pub game_id: Option<GameId>,
    #[serde(default)]
    pub outcome: Option<Outcome>,
}

impl StoredSession {
    /// Returns `true` if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.identity.is_none() && self.game_id.is_none() && self.outcome.is_none()
    }
}
