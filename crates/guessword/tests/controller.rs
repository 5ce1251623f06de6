//! Integration tests for the game-session controller.
//!
//! The engine is replaced by a scripted transport: each test queues the
//! responses the engine would give, then checks what the controller did
//! with them and which requests it actually sent. The store is a shared
//! `MemoryStore`, so tests can also inspect or clear it from outside, the
//! way a logout in another part of the UI would.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use guessword::prelude::*;
use guessword_session::StoredSession;
use serde_json::json;

// =========================================================================
// Scripted engine
// =========================================================================

type Hook = Box<dyn FnOnce() + Send>;

enum Step {
    Reply(u16, String),
    /// Runs the hook while the request is "in flight", then replies.
    ReplyAfter(Hook, u16, String),
}

#[derive(Default)]
struct Script {
    steps: Mutex<VecDeque<Step>>,
    requests: Mutex<Vec<Request>>,
}

impl Script {
    fn reply(&self, status: u16, body: impl Into<String>) {
        self.steps
            .lock()
            .unwrap()
            .push_back(Step::Reply(status, body.into()));
    }

    fn reply_after(&self, hook: impl FnOnce() + Send + 'static, status: u16, body: impl Into<String>) {
        self.steps
            .lock()
            .unwrap()
            .push_back(Step::ReplyAfter(Box::new(hook), status, body.into()));
    }

    fn requests(&self) -> Vec<Request> {
        self.requests.lock().unwrap().clone()
    }

    fn sent(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

struct ScriptedTransport(Arc<Script>);

impl Transport for ScriptedTransport {
    async fn send(&self, request: Request) -> Result<Response, TransportError> {
        self.0.requests.lock().unwrap().push(request);
        let step = self.0.steps.lock().unwrap().pop_front();
        match step {
            Some(Step::Reply(status, body)) => Ok(Response::new(status, body.into_bytes())),
            Some(Step::ReplyAfter(hook, status, body)) => {
                hook();
                Ok(Response::new(status, body.into_bytes()))
            }
            None => Err(TransportError::RequestFailed("script exhausted".into())),
        }
    }
}

// =========================================================================
// Helpers
// =========================================================================

type Controller = GameController<ScriptedTransport, MemoryStore>;

struct Harness {
    script: Arc<Script>,
    store: Arc<MemoryStore>,
    game: Controller,
}

fn harness_with(store: MemoryStore) -> Harness {
    harness_over(Arc::new(store))
}

fn harness_over(store: Arc<MemoryStore>) -> Harness {
    let script = Arc::new(Script::default());
    let engine = EngineClient::new(ScriptedTransport(Arc::clone(&script)));
    let game = GameController::new(engine, Arc::clone(&store)).expect("store readable");
    Harness { script, store, game }
}

/// A fresh controller over the same store: what a restart sees.
fn reopen(h: &Harness) -> Harness {
    harness_over(Arc::clone(&h.store))
}

fn logged_out() -> Harness {
    harness_with(MemoryStore::new())
}

fn logged_in() -> Harness {
    harness_with(MemoryStore::with_session(StoredSession {
        identity: Some(Identity::new("tok", Role::Player, "Alice")),
        game_id: None,
        outcome: None,
    }))
}

async fn active(game_id: i64) -> Harness {
    let mut h = logged_in();
    h.script.reply(200, json!({ "game_id": game_id }).to_string());
    h.game.start_session().await.expect("session should start");
    h
}

fn guess_reply(feedback: [&str; 5], is_active: bool, is_won: bool, attempts: u32) -> String {
    json!({
        "feedback": feedback,
        "attempts": attempts,
        "is_won": is_won,
        "is_active": is_active,
    })
    .to_string()
}

fn all(status: &str) -> [&str; 5] {
    [status; 5]
}

fn detail(message: &str) -> String {
    json!({ "detail": message }).to_string()
}

fn board(h: &Harness) -> &Board {
    h.game.board().expect("session should have a board")
}

fn row_text(board: &Board, index: usize) -> String {
    board
        .row(index)
        .expect("row exists")
        .iter()
        .filter_map(|c| c.letter)
        .collect()
}

// =========================================================================
// Login / register / logout
// =========================================================================

#[tokio::test]
async fn test_login_player_stores_identity_and_routes_to_game() {
    let mut h = logged_out();
    h.script.reply(
        200,
        json!({"access_token": "tok-9", "token_type": "bearer", "username": "Alice", "role": "player"})
            .to_string(),
    );

    let view = h.game.login("Alice", "Pass1@").await.unwrap();

    assert_eq!(view, View::Game);
    let identity = h.game.sessions().current_identity().unwrap().unwrap();
    assert_eq!(identity.token, "tok-9");
    assert_eq!(identity.username, "Alice");
    assert_eq!(identity.role, Role::Player);
    assert_eq!(h.game.current_view().unwrap(), View::Game);
}

#[tokio::test]
async fn test_login_admin_routes_to_admin() {
    let mut h = logged_out();
    h.script.reply(
        200,
        json!({"access_token": "t", "token_type": "bearer", "username": "ADMIN", "role": "admin"})
            .to_string(),
    );

    assert_eq!(h.game.login("ADMIN", "Admin1@").await.unwrap(), View::Admin);
}

#[tokio::test]
async fn test_login_wrong_password_leaves_store_empty() {
    let mut h = logged_out();
    h.script.reply(401, detail("Invalid credentials"));

    let err = h.game.login("Alice", "wrong").await.unwrap_err();

    assert_eq!(err.to_string(), "Invalid credentials");
    assert!(matches!(err, ClientError::RemoteRejected { status: 401, .. }));
    assert!(h.store.load().unwrap().is_empty());
    assert_eq!(h.game.current_view().unwrap(), View::Login);
}

#[tokio::test]
async fn test_login_as_other_user_drops_previous_game() {
    let mut h = active(5).await;
    h.script.reply(
        200,
        json!({"access_token": "t2", "token_type": "bearer", "username": "Bob", "role": "player"})
            .to_string(),
    );

    h.game.login("Bob", "Pass2@").await.unwrap();

    assert_eq!(h.game.state(), &GameState::NoSession);
    assert_eq!(h.game.sessions().current_game_id().unwrap(), None);
}

#[tokio::test]
async fn test_register_does_not_touch_store() {
    let h = logged_out();
    h.script.reply(200, json!({"msg": "registered"}).to_string());

    let message = h.game.register("NewUser", "Pass1@").await.unwrap();

    assert_eq!(message, "registered");
    assert!(h.store.load().unwrap().is_empty());
}

#[tokio::test]
async fn test_register_rejection_detail_is_verbatim() {
    let h = logged_out();
    h.script.reply(400, detail("Username already exists"));

    let err = h.game.register("Alice", "Pass1@").await.unwrap_err();

    assert_eq!(err.to_string(), "Username already exists");
}

#[tokio::test]
async fn test_logout_clears_everything_then_start_is_unauthenticated() {
    let mut h = active(3).await;

    h.game.logout();

    assert!(h.store.load().unwrap().is_empty());
    assert_eq!(h.game.state(), &GameState::NoSession);
    assert_eq!(h.game.current_view().unwrap(), View::Login);

    let before = h.script.sent();
    let err = h.game.start_session().await.unwrap_err();
    assert!(matches!(err, ClientError::Unauthenticated));
    assert_eq!(h.script.sent(), before, "no network call after logout");
}

#[tokio::test]
async fn test_end_session_from_ended_returns_to_no_session() {
    let mut h = active(4).await;
    h.script.reply(200, guess_reply(all("correct"), false, true, 1));
    h.game.submit_guess("CRANE").await.unwrap();

    h.game.end_session();

    assert_eq!(h.game.state(), &GameState::NoSession);
    assert!(h.game.board().is_none());
    assert!(h.store.load().unwrap().is_empty());
}

// =========================================================================
// start_session()
// =========================================================================

#[tokio::test]
async fn test_start_session_without_identity_makes_no_call() {
    let mut h = logged_out();

    let err = h.game.start_session().await.unwrap_err();

    assert!(matches!(err, ClientError::Unauthenticated));
    assert_eq!(h.script.sent(), 0);
}

#[tokio::test]
async fn test_start_session_stores_id_and_resets_board() {
    let mut h = logged_in();
    h.script.reply(200, json!({"game_id": 42}).to_string());

    let id = h.game.start_session().await.unwrap();

    assert_eq!(id, GameId(42));
    assert_eq!(h.game.sessions().current_game_id().unwrap(), Some(GameId(42)));
    assert!(h.game.can_submit());
    assert!(board(&h).is_empty());

    let sent = h.script.requests();
    assert_eq!(sent[0].path_string(), "/start_game");
    assert_eq!(sent[0].bearer.as_deref(), Some("tok"));
}

#[tokio::test]
async fn test_start_session_rejected_keeps_prior_state() {
    let mut h = active(1).await;
    h.script.reply(200, guess_reply(all("absent"), true, false, 1));
    h.game.submit_guess("CRANE").await.unwrap();
    let before = h.game.state().clone();

    h.script.reply(403, detail("Max 3 games per day"));
    let err = h.game.start_session().await.unwrap_err();

    assert_eq!(err.to_string(), "Max 3 games per day");
    assert_eq!(h.game.state(), &before);
    assert_eq!(h.game.sessions().current_game_id().unwrap(), Some(GameId(1)));
}

#[tokio::test]
async fn test_start_session_after_end_discards_old_board() {
    let mut h = active(1).await;
    h.script.reply(200, guess_reply(all("correct"), false, true, 1));
    h.game.submit_guess("CRANE").await.unwrap();

    h.script.reply(200, json!({"game_id": 2}).to_string());
    h.game.start_session().await.unwrap();

    assert_eq!(h.game.state().game_id(), Some(GameId(2)));
    assert!(board(&h).is_empty());
    assert!(h.game.can_submit());
}

#[tokio::test]
async fn test_start_session_logout_in_flight_creates_no_session() {
    let mut h = logged_in();
    let store = Arc::clone(&h.store);
    h.script.reply_after(
        move || store.clear().unwrap(),
        200,
        json!({"game_id": 8}).to_string(),
    );

    let err = h.game.start_session().await.unwrap_err();

    assert!(matches!(err, ClientError::Unauthenticated));
    assert!(h.store.load().unwrap().is_empty());
    assert_eq!(h.game.state(), &GameState::NoSession);
}

// =========================================================================
// submit_guess()
// =========================================================================

#[tokio::test]
async fn test_crane_scenario_fills_row_zero() {
    let mut h = active(1).await;
    h.script.reply(
        200,
        guess_reply(["absent", "present", "correct", "absent", "correct"], true, false, 1),
    );

    let result = h.game.submit_guess("crane").await.unwrap();

    assert!(matches!(
        result,
        GuessResult::Applied { row: Some(0), outcome: None, attempts: 1, .. }
    ));
    let row = board(&h).row(0).unwrap();
    let got: Vec<(Option<char>, CellStatus)> = row.iter().map(|c| (c.letter, c.status)).collect();
    assert_eq!(
        got,
        vec![
            (Some('C'), CellStatus::Absent),
            (Some('R'), CellStatus::Present),
            (Some('A'), CellStatus::Correct),
            (Some('N'), CellStatus::Absent),
            (Some('E'), CellStatus::Correct),
        ]
    );
    assert!(h.game.can_submit(), "guess controls stay enabled");

    // The guess went out normalized, for the current game.
    let sent = h.script.requests();
    let body: serde_json::Value =
        serde_json::from_slice(&sent[1].body.as_ref().unwrap().bytes).unwrap();
    assert_eq!(body["guess"], "CRANE");
    assert_eq!(body["game_id"], 1);
    assert_eq!(sent[1].bearer.as_deref(), Some("tok"));
}

#[tokio::test]
async fn test_each_accepted_guess_fills_next_row() {
    let mut h = active(1).await;
    let words = ["CRANE", "PLANT", "STONE", "LEMON"];

    for (i, word) in words.iter().enumerate() {
        h.script.reply(200, guess_reply(all("absent"), true, false, i as u32 + 1));
        let result = h.game.submit_guess(word).await.unwrap();
        assert!(matches!(result, GuessResult::Applied { row: Some(r), .. } if r == i));
    }

    for (i, word) in words.iter().enumerate() {
        assert_eq!(row_text(board(&h), i), *word, "row {i} must be unchanged");
    }
    assert_eq!(board(&h).next_row(), Some(words.len()));
}

#[tokio::test]
async fn test_rejected_guess_does_not_consume_a_row() {
    let mut h = active(1).await;
    h.script.reply(200, guess_reply(all("absent"), true, false, 1));
    h.game.submit_guess("CRANE").await.unwrap();
    let before = board(&h).clone();

    h.script.reply(400, detail("Guess must be 5 letters A-Z"));
    let err = h.game.submit_guess("AB1CD").await.unwrap_err();

    assert_eq!(err.to_string(), "Guess must be 5 letters A-Z");
    assert_eq!(board(&h), &before);

    h.script.reply(200, guess_reply(all("present"), true, false, 2));
    let result = h.game.submit_guess("PLANT").await.unwrap();

    assert!(matches!(result, GuessResult::Applied { row: Some(1), .. }));
    assert_eq!(row_text(board(&h), 1), "PLANT");
}

#[tokio::test]
async fn test_unreachable_engine_leaves_board_unchanged() {
    let mut h = active(1).await;
    // Nothing scripted: the transport fails.
    let err = h.game.submit_guess("CRANE").await.unwrap_err();

    assert!(matches!(err, ClientError::Unreachable(_)));
    assert!(board(&h).is_empty());
    assert!(h.game.can_submit());
}

#[tokio::test]
async fn test_invalid_shape_makes_no_call() {
    let mut h = active(1).await;
    let before = h.script.sent();

    for text in ["", "CRAN", "CRANES", "straß"] {
        let err = h.game.submit_guess(text).await.unwrap_err();
        assert!(matches!(err, ClientError::InvalidGuessShape { .. }), "{text:?}");
    }

    assert_eq!(h.script.sent(), before);
    assert!(board(&h).is_empty());
}

#[tokio::test]
async fn test_guess_without_session_makes_no_call() {
    let mut h = logged_in();

    let err = h.game.submit_guess("CRANE").await.unwrap_err();

    assert!(matches!(err, ClientError::NoActiveSession));
    assert_eq!(h.script.sent(), 0);
    assert!(h.game.board().is_none());
}

#[tokio::test]
async fn test_guess_without_identity_is_unauthenticated() {
    let mut h = logged_out();

    let err = h.game.submit_guess("CRANE").await.unwrap_err();

    assert!(matches!(err, ClientError::Unauthenticated));
    assert_eq!(h.script.sent(), 0);
}

#[tokio::test]
async fn test_losing_guess_ends_session_and_blocks_more() {
    let mut h = active(1).await;
    h.script.reply(200, guess_reply(all("absent"), false, false, 5));

    let result = h.game.submit_guess("CRANE").await.unwrap();

    assert!(matches!(
        result,
        GuessResult::Applied { outcome: Some(Outcome::Lost), .. }
    ));
    assert!(!h.game.can_submit());

    let before_calls = h.script.sent();
    let before_board = board(&h).clone();
    for _ in 0..3 {
        let err = h.game.submit_guess("STONE").await.unwrap_err();
        assert!(matches!(err, ClientError::SessionEnded(Outcome::Lost)));
    }
    assert_eq!(h.script.sent(), before_calls, "no call once ended");
    assert_eq!(board(&h), &before_board, "no row after the end");
}

#[tokio::test]
async fn test_sixth_guess_win_reports_once_without_seventh_row() {
    let mut h = active(1).await;
    for attempt in 1..=5 {
        h.script.reply(200, guess_reply(all("absent"), true, false, attempt));
        h.game.submit_guess("CRANE").await.unwrap();
    }
    assert!(board(&h).is_full());

    h.script.reply(200, guess_reply(all("correct"), false, true, 6));
    let result = h.game.submit_guess("STONE").await.unwrap();

    assert!(matches!(
        result,
        GuessResult::Applied { row: None, outcome: Some(Outcome::Won), .. }
    ));
    assert_eq!(board(&h).filled_rows(), BOARD_ROWS);
    assert_eq!(h.game.state().outcome(), Some(Outcome::Won));
    assert!(!h.game.can_submit(), "guess input disabled");
}

#[tokio::test]
async fn test_logout_during_guess_discards_response() {
    let mut h = active(1).await;
    let store = Arc::clone(&h.store);
    h.script.reply_after(
        move || store.clear().unwrap(),
        200,
        guess_reply(all("correct"), false, true, 1),
    );

    let result = h.game.submit_guess("CRANE").await.unwrap();

    assert_eq!(result, GuessResult::Discarded);
    assert_eq!(h.game.state(), &GameState::NoSession);
    assert!(h.store.load().unwrap().is_empty());
}

#[tokio::test]
async fn test_new_game_elsewhere_during_guess_discards_response() {
    let mut h = active(1).await;
    let other = SessionManager::new(Arc::clone(&h.store));
    h.script.reply_after(
        move || other.set_game_id(GameId(2)).unwrap(),
        200,
        guess_reply(all("absent"), true, false, 1),
    );

    let result = h.game.submit_guess("CRANE").await.unwrap();

    assert_eq!(result, GuessResult::Discarded);
    assert_eq!(h.game.state().game_id(), Some(GameId(2)));
    assert!(board(&h).is_empty());
}

#[tokio::test]
async fn test_guess_after_external_clear_is_no_session() {
    let mut h = active(1).await;
    h.store.clear().unwrap();
    h.store
        .replace(StoredSession {
            identity: Some(Identity::new("tok", Role::Player, "Alice")),
            game_id: None,
            outcome: None,
        })
        .unwrap();

    let err = h.game.submit_guess("CRANE").await.unwrap_err();

    assert!(matches!(err, ClientError::NoActiveSession));
    assert_eq!(h.game.state(), &GameState::NoSession);
}

// =========================================================================
// Resume
// =========================================================================

#[tokio::test]
async fn test_new_controller_resumes_stored_game_with_empty_board() {
    let h = harness_with(MemoryStore::with_session(StoredSession {
        identity: Some(Identity::new("tok", Role::Player, "Alice")),
        game_id: Some(GameId(77)),
        outcome: None,
    }));

    assert_eq!(h.game.state().game_id(), Some(GameId(77)));
    assert!(h.game.can_submit());
    assert!(board(&h).is_empty());
}

#[tokio::test]
async fn test_won_game_stays_ended_after_reload() {
    let mut h = active(1).await;
    h.script.reply(200, guess_reply(all("correct"), false, true, 1));
    h.game.submit_guess("CRANE").await.unwrap();

    let mut reloaded = reopen(&h);

    assert_eq!(reloaded.game.state().game_id(), Some(GameId(1)));
    assert_eq!(reloaded.game.state().outcome(), Some(Outcome::Won));
    assert!(!reloaded.game.can_submit());

    let err = reloaded.game.submit_guess("STONE").await.unwrap_err();
    assert!(matches!(err, ClientError::SessionEnded(Outcome::Won)));
    assert_eq!(reloaded.script.sent(), 0, "no call for an ended game");
}

#[tokio::test]
async fn test_lost_game_stays_ended_after_reload_until_new_start() {
    let mut h = active(1).await;
    h.script.reply(200, guess_reply(all("absent"), false, false, 6));
    h.game.submit_guess("CRANE").await.unwrap();

    let mut reloaded = reopen(&h);
    assert_eq!(reloaded.game.state().outcome(), Some(Outcome::Lost));

    reloaded.script.reply(200, json!({"game_id": 2}).to_string());
    reloaded.game.start_session().await.unwrap();

    assert!(reloaded.game.can_submit());
    assert_eq!(
        reloaded.game.sessions().current_game().unwrap(),
        Some((GameId(2), None))
    );
    assert!(reopen(&reloaded).game.can_submit(), "new game resumes as active");
}

#[tokio::test]
async fn test_game_ended_through_other_controller_blocks_guess() {
    let mut first = active(1).await;
    let mut second = reopen(&first);
    assert!(second.game.can_submit());

    first.script.reply(200, guess_reply(all("correct"), false, true, 2));
    first.game.submit_guess("CRANE").await.unwrap();

    let err = second.game.submit_guess("STONE").await.unwrap_err();
    assert!(matches!(err, ClientError::SessionEnded(Outcome::Won)));
    assert_eq!(second.script.sent(), 0);
}

#[tokio::test]
async fn test_new_controller_ignores_game_without_identity() {
    let h = harness_with(MemoryStore::with_session(StoredSession {
        identity: None,
        game_id: Some(GameId(77)),
        outcome: None,
    }));

    assert_eq!(h.game.state(), &GameState::NoSession);
}

// =========================================================================
// Reports
// =========================================================================

#[tokio::test]
async fn test_reports_require_identity() {
    let h = logged_out();

    assert!(matches!(
        h.game.daily_report(None).await,
        Err(ClientError::Unauthenticated)
    ));
    assert!(matches!(
        h.game.user_report("Alice").await,
        Err(ClientError::Unauthenticated)
    ));
    assert_eq!(h.script.sent(), 0);
}

#[tokio::test]
async fn test_report_for_non_admin_surfaces_engine_detail() {
    let h = logged_in();
    h.script.reply(403, detail("Admin only"));

    let err = h.game.daily_report(None).await.unwrap_err();

    assert_eq!(err.to_string(), "Admin only");
}

#[tokio::test]
async fn test_user_report_decodes_rows() {
    let h = logged_in();
    h.script.reply(
        200,
        json!({
            "username": "Alice",
            "report": [
                {"date": "2025-09-27", "words_tried": 2, "correct_guesses": 1},
                {"date": "2025-09-28", "words_tried": 3, "correct_guesses": 0}
            ]
        })
        .to_string(),
    );

    let report = h.game.user_report("Alice").await.unwrap();

    assert_eq!(report.username, "Alice");
    assert_eq!(report.report.len(), 2);
    assert_eq!(report.report[1].words_tried, 3);
}
