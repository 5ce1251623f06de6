//! Core protocol types for the engine's wire format.
//!
//! Every type here is a body that gets serialized to bytes, sent to the
//! remote game engine, or deserialized from its reply. Field names are
//! snake_case because that is what the engine emits.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Number of letters in a guess, and number of entries in [`Feedback`].
pub const WORD_LEN: usize = 5;

// ---------------------------------------------------------------------------
// Identity types
// ---------------------------------------------------------------------------

/// The engine-issued identifier of one game session.
///
/// A newtype over the engine's integer id so a game id can't be mixed up
/// with an attempt count or a row index. `#[serde(transparent)]` keeps it
/// a plain number on the wire: `GameId(42)` is just `42`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameId(pub i64);

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "G-{}", self.0)
    }
}

/// What an authenticated user is allowed to see after login.
///
/// `#[serde(rename_all = "lowercase")]` matches the engine's `"player"` /
/// `"admin"` strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Plays games.
    Player,
    /// Reads usage reports.
    Admin,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Player => write!(f, "player"),
            Self::Admin => write!(f, "admin"),
        }
    }
}

// ---------------------------------------------------------------------------
// Feedback
// ---------------------------------------------------------------------------

/// The engine's classification of one guessed letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LetterStatus {
    /// Right letter, right position.
    Correct,
    /// Right letter, wrong position.
    Present,
    /// Letter not in the answer (duplicates counted per the engine's rules).
    Absent,
}

/// Per-letter feedback for one accepted guess.
///
/// Backed by a fixed-size array, so a reply with four or six entries fails
/// to decode instead of producing a ragged board row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Feedback(pub [LetterStatus; WORD_LEN]);

impl Feedback {
    /// Returns the status at `index`, or `None` past the end.
    pub fn get(&self, index: usize) -> Option<LetterStatus> {
        self.0.get(index).copied()
    }

    /// Iterates over the statuses in letter order.
    pub fn iter(&self) -> impl Iterator<Item = LetterStatus> + '_ {
        self.0.iter().copied()
    }
}

/// How an ended session turned out.
///
/// Derived from the engine's `is_won` once it reports `is_active: false`,
/// and persisted with the game id so an ended game stays ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Won,
    Lost,
}

impl Outcome {
    /// Maps the engine's `is_won` flag.
    pub fn from_won(is_won: bool) -> Self {
        if is_won { Self::Won } else { Self::Lost }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Won => write!(f, "won"),
            Self::Lost => write!(f, "lost"),
        }
    }
}

// ---------------------------------------------------------------------------
// Auth bodies
// ---------------------------------------------------------------------------

/// Body of both `POST /register` and `POST /login`.
///
/// `Debug` is implemented by hand so a password never lands in a log line.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Success body of `POST /register`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterResponse {
    /// Human-readable confirmation, e.g. `"registered"`.
    #[serde(default)]
    pub msg: String,
}

/// Success body of `POST /login`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Opaque bearer token for every later call.
    pub access_token: String,
    /// Always `"bearer"` today; kept for completeness.
    #[serde(default)]
    pub token_type: String,
    pub username: String,
    pub role: Role,
}

impl fmt::Debug for LoginResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginResponse")
            .field("access_token", &"<redacted>")
            .field("token_type", &self.token_type)
            .field("username", &self.username)
            .field("role", &self.role)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Game bodies
// ---------------------------------------------------------------------------

/// Success body of `POST /start_game`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartGameResponse {
    pub game_id: GameId,
}

/// Body of `POST /guess`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessRequest {
    pub game_id: GameId,
    /// The normalized (uppercase) guess.
    pub guess: String,
}

/// Success body of `POST /guess`.
///
/// ```text
/// { "feedback": ["absent","present","correct","absent","correct"],
///   "attempts": 1, "is_won": false, "is_active": true }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessResponse {
    pub feedback: Feedback,
    /// Guesses the engine has counted for this session so far.
    #[serde(default)]
    pub attempts: u32,
    /// Only meaningful once `is_active` is `false`.
    #[serde(default)]
    pub is_won: bool,
    /// `false` means the engine has ended the session.
    pub is_active: bool,
}

// ---------------------------------------------------------------------------
// Admin report bodies
// ---------------------------------------------------------------------------

/// Success body of `GET /report/daily`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyReport {
    pub date: NaiveDate,
    /// Distinct users who started a game that day.
    pub users_played: u64,
    /// Games won that day.
    pub correct_guesses: u64,
}

/// One day's line in a [`UserReport`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserReportDay {
    pub date: NaiveDate,
    pub words_tried: u64,
    pub correct_guesses: u64,
}

/// Success body of `GET /report/user/{username}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserReport {
    pub username: String,
    pub report: Vec<UserReportDay>,
}

// =========================================================================
// Tests
// =========================================================================
