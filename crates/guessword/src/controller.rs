//! The game-session controller.
//!
//! This is where the layers meet. For each user action the controller:
//!
//! 1. checks local preconditions against the [`SessionManager`]
//!    (identity present, session active, guess well-formed)
//! 2. makes exactly one engine call through the [`EngineClient`]
//! 3. feeds the result through [`transition`] and applies the effects
//!
//! A failed call applies nothing: the store, the state and the board stay
//! as they were.
//!
//! # Stale responses
//!
//! The store is shared, so a logout can land while a guess is in flight.
//! Before applying a guess response the controller re-reads the stored game
//! id; if it no longer matches the id the guess was sent for, the response
//! is discarded.

use std::sync::Arc;

use chrono::NaiveDate;
use guessword_game::{Board, Effect, GameEvent, GameState, Guess, Outcome, transition};
use guessword_protocol::{
    Codec, Credentials, DailyReport, Feedback, GameId, JsonCodec, Role, UserReport,
};
use guessword_session::{Identity, SessionManager, SessionStore};
use guessword_transport::Transport;

use crate::{ClientError, EngineClient};

/// Which screen the user belongs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Nobody is logged in.
    Login,
    /// A player: board and guess input.
    Game,
    /// An admin: reports.
    Admin,
}

impl View {
    /// The post-login view for `role`.
    pub fn for_role(role: Role) -> Self {
        match role {
            Role::Admin => Self::Admin,
            Role::Player => Self::Game,
        }
    }
}

/// What happened to an accepted guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessResult {
    /// The response was applied to the board.
    Applied {
        /// The row that was filled, or `None` if the board was already
        /// full and the update was dropped.
        row: Option<usize>,
        feedback: Feedback,
        /// Guesses the engine has counted so far.
        attempts: u32,
        /// `Some` exactly once: on the guess that ended the session.
        outcome: Option<Outcome>,
    },

    /// The session changed while the guess was in flight (logout, or a new
    /// game started elsewhere). Nothing was applied.
    Discarded,
}

/// Drives one device's game sessions against the remote engine.
pub struct GameController<T, S: SessionStore, C = JsonCodec> {
    engine: EngineClient<T, C>,
    sessions: SessionManager<S>,
    state: GameState,
}

impl<T, S, C> GameController<T, S, C>
where
    T: Transport,
    S: SessionStore,
    C: Codec,
{
    /// Creates a controller over a shared store.
    ///
    /// If the store already holds a logged-in user and a game id (e.g.
    /// after a restart), the controller resumes that session with an empty
    /// board: earlier guesses are not refetched. A game the engine already
    /// ended resumes as `Ended`, so no guess is sent for it.
    ///
    /// # Errors
    /// Returns [`ClientError::Store`] if the store can't be read.
    pub fn new(engine: EngineClient<T, C>, store: Arc<S>) -> Result<Self, ClientError> {
        let mut controller = Self {
            engine,
            sessions: SessionManager::new(store),
            state: GameState::NoSession,
        };
        controller.reconcile()?;
        if let Some(game_id) = controller.state.game_id() {
            tracing::info!(%game_id, state = %controller.state, "resumed stored game session");
        }
        Ok(controller)
    }

    /// Current state of the session.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// The board, if there is a session.
    pub fn board(&self) -> Option<&Board> {
        self.state.board()
    }

    /// Returns `true` if guess input should be enabled.
    pub fn can_submit(&self) -> bool {
        self.state.can_submit()
    }

    /// The session manager over the shared store.
    pub fn sessions(&self) -> &SessionManager<S> {
        &self.sessions
    }

    /// The engine client.
    pub fn engine(&self) -> &EngineClient<T, C> {
        &self.engine
    }

    /// The view the current identity belongs on.
    ///
    /// # Errors
    /// Returns [`ClientError::Store`] if the store can't be read.
    pub fn current_view(&self) -> Result<View, ClientError> {
        Ok(self
            .sessions
            .current_identity()?
            .map_or(View::Login, |identity| View::for_role(identity.role)))
    }

    // =====================================================================
    // Auth
    // =====================================================================

    /// Creates an account. Doesn't log in and doesn't touch the store.
    ///
    /// # Errors
    /// [`ClientError::RemoteRejected`] with the engine's reason.
    pub async fn register(&self, username: &str, password: &str) -> Result<String, ClientError> {
        let message = self.engine.register(&credentials(username, password)).await?;
        tracing::info!(username, "account registered");
        Ok(message)
    }

    /// Logs in and stores the identity. Returns the view to go to.
    ///
    /// On failure the store is left exactly as it was.
    ///
    /// # Errors
    /// [`ClientError::RemoteRejected`] with the engine's reason, verbatim.
    pub async fn login(&mut self, username: &str, password: &str) -> Result<View, ClientError> {
        let reply = self.engine.login(&credentials(username, password)).await?;
        self.sessions
            .set_identity(reply.access_token, reply.role, reply.username)?;
        // A different user may not inherit the previous user's game.
        self.reconcile()?;
        Ok(View::for_role(reply.role))
    }

    /// Clears identity and game together and returns to `NoSession`.
    ///
    /// Never fails: a store that can't be cleared is logged and the
    /// in-memory state is reset anyway.
    pub fn logout(&mut self) {
        if let Err(e) = self.sessions.clear_all() {
            tracing::error!(error = %e, "failed to clear session store on logout");
        }
        self.apply(GameEvent::SessionCleared);
    }

    /// Alias for [`logout`](Self::logout).
    pub fn end_session(&mut self) {
        self.logout();
    }

    // =====================================================================
    // Game
    // =====================================================================

    /// Starts a new game session, discarding any previous board.
    ///
    /// # Errors
    /// - [`ClientError::Unauthenticated`]: nobody is logged in (no
    ///   network call is made), or the user logged out while the request
    ///   was in flight
    /// - [`ClientError::RemoteRejected`]: the engine refused; the previous
    ///   state is kept
    pub async fn start_session(&mut self) -> Result<GameId, ClientError> {
        let identity = self.require_identity()?;

        let game_id = self.engine.start_game(&identity.token).await?;

        // Don't resurrect a session for someone who logged out meanwhile.
        let still_logged_in = self
            .sessions
            .current_identity()?
            .is_some_and(|now| now.token == identity.token);
        if !still_logged_in {
            tracing::debug!(%game_id, "identity cleared during start, dropping new session");
            self.reconcile()?;
            return Err(ClientError::Unauthenticated);
        }

        self.sessions.set_game_id(game_id)?;
        self.apply(GameEvent::SessionStarted { game_id });
        tracing::info!(%game_id, username = %identity.username, "game session started");
        Ok(game_id)
    }

    /// Submits one guess.
    ///
    /// Preconditions are checked in order, all before any network call:
    /// identity present, session `Active`, guess exactly five letters.
    ///
    /// # Errors
    /// - [`ClientError::Unauthenticated`]: nobody is logged in
    /// - [`ClientError::NoActiveSession`]: no game started
    /// - [`ClientError::SessionEnded`]: the game is over
    /// - [`ClientError::InvalidGuessShape`]: not five letters
    /// - [`ClientError::RemoteRejected`]: the engine refused (unknown
    ///   word, game not found, ...); no row is consumed
    pub async fn submit_guess(&mut self, text: &str) -> Result<GuessResult, ClientError> {
        let identity = self.require_identity()?;
        self.reconcile()?;
        let game_id = match &self.state {
            GameState::Active { game_id, .. } => *game_id,
            GameState::Ended { outcome, .. } => return Err(ClientError::SessionEnded(*outcome)),
            GameState::NoSession => return Err(ClientError::NoActiveSession),
        };
        let guess = Guess::parse(text)?;

        let response = self
            .engine
            .guess(&identity.token, game_id, guess.as_str())
            .await?;

        // The store may have been cleared or re-pointed while we waited.
        if self.sessions.current_game_id()? != Some(game_id) {
            tracing::debug!(%game_id, "session changed during guess, discarding response");
            self.reconcile()?;
            return Ok(GuessResult::Discarded);
        }

        let effects = self.apply(GameEvent::GuessAccepted {
            game_id,
            guess,
            response,
        });

        let mut row = None;
        let mut outcome = None;
        for effect in effects {
            match effect {
                Effect::RowFilled { row: r } => row = Some(r),
                Effect::OutcomeReported(o) => outcome = Some(o),
                Effect::StaleResponseIgnored => return Ok(GuessResult::Discarded),
                _ => {}
            }
        }

        // A failed write is logged only; in memory the game is already Ended.
        if let Some(outcome) = outcome {
            if let Err(e) = self.sessions.mark_ended(game_id, outcome) {
                tracing::error!(%game_id, error = %e, "failed to record game outcome");
            }
        }

        Ok(GuessResult::Applied {
            row,
            feedback: response.feedback,
            attempts: response.attempts,
            outcome,
        })
    }

    // =====================================================================
    // Admin reports
    // =====================================================================

    /// Usage summary for one day (`None` = the engine's today).
    ///
    /// # Errors
    /// - [`ClientError::Unauthenticated`]: nobody is logged in
    /// - [`ClientError::RemoteRejected`]: e.g. "Admin only"
    pub async fn daily_report(&self, date: Option<NaiveDate>) -> Result<DailyReport, ClientError> {
        let identity = self.require_identity()?;
        self.engine.daily_report(&identity.token, date).await
    }

    /// Per-day history for one user.
    ///
    /// # Errors
    /// - [`ClientError::Unauthenticated`]: nobody is logged in
    /// - [`ClientError::RemoteRejected`]: not an admin, or unknown user
    pub async fn user_report(&self, username: &str) -> Result<UserReport, ClientError> {
        let identity = self.require_identity()?;
        self.engine.user_report(&identity.token, username).await
    }

    // =====================================================================
    // Internals
    // =====================================================================

    fn require_identity(&self) -> Result<Identity, ClientError> {
        self.sessions
            .current_identity()?
            .ok_or(ClientError::Unauthenticated)
    }

    /// Brings the in-memory state in line with the stored game.
    ///
    /// - nothing stored → `NoSession`
    /// - a different id stored → `Active` or `Ended` on that id (per the
    ///   stored outcome), empty board
    /// - same id → board kept; an outcome stored elsewhere ends it
    fn reconcile(&mut self) -> Result<(), ClientError> {
        match self.sessions.current_game()? {
            None => {
                if self.state != GameState::NoSession {
                    self.apply(GameEvent::SessionCleared);
                }
            }
            Some((game_id, outcome)) => {
                self.apply(GameEvent::SessionResumed { game_id, outcome });
            }
        }
        Ok(())
    }

    /// Runs one transition and logs its effects.
    fn apply(&mut self, event: GameEvent) -> Vec<Effect> {
        let state = std::mem::take(&mut self.state);
        let (next, effects) = transition(state, event);
        self.state = next;

        for effect in &effects {
            match effect {
                Effect::RowFilled { row } => tracing::debug!(row, "board row filled"),
                Effect::BoardFull => {
                    tracing::warn!("accepted guess found no empty row, update dropped");
                }
                Effect::OutcomeReported(outcome) => {
                    tracing::info!(%outcome, "game session ended");
                }
                Effect::StaleResponseIgnored => tracing::debug!("stale guess response ignored"),
                Effect::BoardReset | Effect::SubmissionEnabled | Effect::SubmissionDisabled => {}
            }
        }
        effects
    }
}

fn credentials(username: &str, password: &str) -> Credentials {
    Credentials {
        username: username.to_string(),
        password: password.to_string(),
    }
}
