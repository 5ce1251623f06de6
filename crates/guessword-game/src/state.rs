//! The game-session state machine.
//!
//! ```text
//!                SessionStarted                GuessAccepted
//!   NoSession ─────────────────→ Active ──────(is_active)───────┐
//!       ↑                         │  ↑                          │
//!       │                         │  └──────────────────────────┘
//!       │ SessionCleared          │ GuessAccepted (!is_active)
//!       │                         ▼
//!       └──────────────────────  Ended ──(SessionStarted)──→ Active
//! ```
//!
//! - **NoSession**: no game id stored. Guesses are refused.
//! - **Active**: the engine has an open session; accepted guesses fill
//!   rows.
//! - **Ended**: the engine closed the session. Terminal until a new
//!   `SessionStarted`, which discards the old board.
//!
//! `SessionResumed` re-enters whichever of `Active` or `Ended` the store
//! records for a game, so a game that ended before a restart is still
//! ended after it.
//!
//! [`transition`] is a pure function of `(state, event)`. It never touches
//! the network or the store; the caller applies the returned [`Effect`]s.

use std::fmt;

use guessword_protocol::{GameId, GuessResponse, Outcome};

use crate::{Board, Guess};

/// The client's view of one game session.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum GameState {
    #[default]
    NoSession,
    Active {
        game_id: GameId,
        board: Board,
    },
    Ended {
        game_id: GameId,
        board: Board,
        outcome: Outcome,
    },
}

impl GameState {
    /// Returns the session's game id, if there is a session.
    pub fn game_id(&self) -> Option<GameId> {
        match self {
            Self::NoSession => None,
            Self::Active { game_id, .. } | Self::Ended { game_id, .. } => Some(*game_id),
        }
    }

    /// Returns the board, if there is a session.
    pub fn board(&self) -> Option<&Board> {
        match self {
            Self::NoSession => None,
            Self::Active { board, .. } | Self::Ended { board, .. } => Some(board),
        }
    }

    /// Returns the outcome once the session has ended.
    pub fn outcome(&self) -> Option<Outcome> {
        match self {
            Self::Ended { outcome, .. } => Some(*outcome),
            _ => None,
        }
    }

    /// Returns `true` if guesses may be submitted.
    pub fn can_submit(&self) -> bool {
        matches!(self, Self::Active { .. })
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoSession => write!(f, "NoSession"),
            Self::Active { game_id, .. } => write!(f, "Active({game_id})"),
            Self::Ended {
                game_id, outcome, ..
            } => write!(f, "Ended({game_id}, {outcome})"),
        }
    }
}

/// Something that happened to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// The engine opened a new session.
    SessionStarted { game_id: GameId },

    /// The engine accepted a guess for `game_id`.
    ///
    /// `game_id` is the session the guess was *sent* for, which may no
    /// longer be the current one by the time the response arrives.
    GuessAccepted {
        game_id: GameId,
        guess: Guess,
        response: GuessResponse,
    },

    /// A game id (and, if it ended, its outcome) was read back from the
    /// store, e.g. after a restart or a change made through another handle.
    SessionResumed {
        game_id: GameId,
        outcome: Option<Outcome>,
    },

    /// Identity and game were cleared (logout).
    SessionCleared,
}

/// What the caller should do as a result of a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Show an empty board.
    BoardReset,
    /// Turn guess input on.
    SubmissionEnabled,
    /// Turn guess input off.
    SubmissionDisabled,
    /// Row `row` was just filled.
    RowFilled { row: usize },
    /// An accepted guess found no empty row and was dropped.
    BoardFull,
    /// Tell the player how the session ended. Emitted exactly once per
    /// session.
    OutcomeReported(Outcome),
    /// A response arrived for a session that is no longer current.
    StaleResponseIgnored,
}

/// Applies `event` to `state`.
///
/// Returns the next state and the effects to apply, in order. Events that
/// don't apply to the current state leave it unchanged.
pub fn transition(state: GameState, event: GameEvent) -> (GameState, Vec<Effect>) {
    match (state, event) {
        // A new session always starts clean, whatever came before.
        (_, GameEvent::SessionStarted { game_id }) => (
            GameState::Active {
                game_id,
                board: Board::new(),
            },
            vec![Effect::BoardReset, Effect::SubmissionEnabled],
        ),

        // The stored session is the same one: keep the board, but an
        // outcome recorded elsewhere ends it. `Ended` never reopens.
        (
            GameState::Active {
                game_id: current,
                board,
            },
            GameEvent::SessionResumed {
                game_id,
                outcome: Some(outcome),
            },
        ) if current == game_id => (
            GameState::Ended {
                game_id,
                board,
                outcome,
            },
            vec![Effect::SubmissionDisabled],
        ),
        (state, GameEvent::SessionResumed { game_id, .. }) if state.game_id() == Some(game_id) => {
            (state, Vec::new())
        }

        // A different session: earlier guesses aren't refetched, so the
        // board starts empty.
        (_, GameEvent::SessionResumed { game_id, outcome }) => {
            let board = Board::new();
            match outcome {
                None => (
                    GameState::Active { game_id, board },
                    vec![Effect::BoardReset, Effect::SubmissionEnabled],
                ),
                Some(outcome) => (
                    GameState::Ended {
                        game_id,
                        board,
                        outcome,
                    },
                    vec![Effect::BoardReset, Effect::SubmissionDisabled],
                ),
            }
        }

        (GameState::Active { .. }, GameEvent::SessionCleared) => {
            (GameState::NoSession, vec![Effect::SubmissionDisabled])
        }
        (_, GameEvent::SessionCleared) => (GameState::NoSession, Vec::new()),

        (
            GameState::Active {
                game_id: current,
                mut board,
            },
            GameEvent::GuessAccepted {
                game_id,
                guess,
                response,
            },
        ) if current == game_id => {
            let mut effects = Vec::with_capacity(3);
            match board.fill_next(&guess, &response.feedback) {
                Some(row) => effects.push(Effect::RowFilled { row }),
                None => effects.push(Effect::BoardFull),
            }

            if response.is_active {
                return (GameState::Active { game_id, board }, effects);
            }

            let outcome = Outcome::from_won(response.is_won);
            effects.push(Effect::OutcomeReported(outcome));
            effects.push(Effect::SubmissionDisabled);
            (
                GameState::Ended {
                    game_id,
                    board,
                    outcome,
                },
                effects,
            )
        }

        // Wrong game id, or no longer Active.
        (state, GameEvent::GuessAccepted { .. }) => (state, vec![Effect::StaleResponseIgnored]),
    }
}
