//! Terminal front end for a Guessword engine.
//!
//! Identity and the active game live in a small JSON file (`--store`), so
//! each subcommand picks up where the last one left off:
//!
//! ```text
//! guessword login Alice
//! guessword start
//! guessword guess crane
//! guessword play
//! ```

use std::error::Error;
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use guessword::prelude::*;
use tracing_subscriber::EnvFilter;

type Controller = GameController<HttpTransport, FileStore>;
type CliResult<T> = Result<T, Box<dyn Error>>;

// ---------------------------------------------------------------------------
// Arguments
// ---------------------------------------------------------------------------

#[derive(Debug, Parser)]
#[command(name = "guessword", about = "Play Guessword against a remote engine", version)]
struct Cli {
    /// Engine root URL.
    #[arg(long, env = "GUESSWORD_BASE_URL", default_value = guessword::DEFAULT_BASE_URL, global = true)]
    base_url: String,

    /// Where the logged-in identity and active game are kept.
    #[arg(long, env = "GUESSWORD_STORE", default_value = ".guessword-session.json", global = true)]
    store: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Create an account.
    Register {
        username: String,
        /// Read from `GUESSWORD_PASSWORD`, or from piped stdin, when omitted.
        #[arg(env = "GUESSWORD_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// Log in and remember the identity.
    Login {
        username: String,
        /// Read from `GUESSWORD_PASSWORD`, or from piped stdin, when omitted.
        #[arg(env = "GUESSWORD_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// Forget the identity and any active game.
    Logout,
    /// Start a new game.
    Start,
    /// Submit one guess to the active game.
    Guess { word: String },
    /// Guess interactively until the game ends.
    Play,
    /// Admin reports.
    #[command(subcommand)]
    Report(Report),
}

#[derive(Debug, Subcommand)]
enum Report {
    /// Players and wins for one day.
    Daily {
        /// `YYYY-MM-DD`; defaults to the engine's today.
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Per-day history for one user.
    User { username: String },
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    if let Err(e) = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init()
    {
        eprintln!("tracing init failed: {e}");
    }

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> CliResult<()> {
    let transport = ClientConfig::new(cli.base_url).http_transport()?;
    let store = Arc::new(FileStore::new(cli.store));
    let mut game = GameController::new(EngineClient::new(transport), store)?;

    match cli.command {
        Command::Register { username, password } => {
            let password = password_or_stdin(password)?;
            let message = game.register(&username, &password).await?;
            println!("{message}");
        }
        Command::Login { username, password } => {
            let password = password_or_stdin(password)?;
            let view = game.login(&username, &password).await?;
            // The engine's spelling of the name, not what was typed.
            let username = game
                .sessions()
                .current_identity()?
                .map_or(username, |identity| identity.username);
            match view {
                View::Admin => println!("logged in as {username} (admin): try `guessword report daily`"),
                _ => println!("logged in as {username}: try `guessword start`"),
            }
        }
        Command::Logout => {
            game.logout();
            println!("logged out");
        }
        Command::Start => {
            let game_id = game.start_session().await?;
            println!("game {game_id} started");
        }
        Command::Guess { word } => {
            guess(&mut game, &word).await?;
        }
        Command::Play => play(&mut game).await?,
        Command::Report(Report::Daily { date }) => {
            let report = game.daily_report(date).await?;
            println!(
                "{}: {} played, {} solved",
                report.date, report.users_played, report.correct_guesses
            );
        }
        Command::Report(Report::User { username }) => {
            let report = game.user_report(&username).await?;
            println!("{}", report.username);
            if report.report.is_empty() {
                println!("  no games played");
            }
            for day in &report.report {
                println!(
                    "  {}: {} words tried, {} solved",
                    day.date, day.words_tried, day.correct_guesses
                );
            }
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Game commands
// ---------------------------------------------------------------------------

/// Submits one guess and prints the board. Returns `true` once the game is
/// over.
async fn guess(game: &mut Controller, word: &str) -> Result<bool, ClientError> {
    match game.submit_guess(word).await? {
        GuessResult::Applied {
            attempts, outcome, ..
        } => {
            if let Some(board) = game.board() {
                println!("{board}");
            }
            match outcome {
                Some(Outcome::Won) => println!("solved in {attempts}!"),
                Some(Outcome::Lost) => println!("out of guesses"),
                None => println!("attempt {attempts}"),
            }
            Ok(outcome.is_some())
        }
        GuessResult::Discarded => {
            println!("the session changed while guessing; nothing applied");
            Ok(true)
        }
    }
}

async fn play(game: &mut Controller) -> CliResult<()> {
    if !game.can_submit() {
        let game_id = game.start_session().await?;
        println!("game {game_id} started");
    }
    if let Some(board) = game.board() {
        println!("{board}");
    }

    let stdin = io::stdin();
    loop {
        print!("guess> ");
        flush();
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            return Ok(());
        }
        let word = line.trim();
        match word {
            "" => continue,
            "quit" | "exit" => return Ok(()),
            _ => {}
        }

        match guess(game, word).await {
            Ok(true) => return Ok(()),
            Ok(false) => {}
            // Recoverable per guess: bad shape or a word the engine rejects.
            Err(e @ (ClientError::InvalidGuessShape { .. } | ClientError::RemoteRejected { .. })) => {
                println!("{e}");
            }
            Err(e) => return Err(e.into()),
        }
    }
}

// ---------------------------------------------------------------------------
// Input helpers
// ---------------------------------------------------------------------------

/// Uses `password` when given, otherwise the first line of piped stdin.
/// Refuses to read a terminal.
fn password_or_stdin(password: Option<String>) -> CliResult<String> {
    if let Some(password) = password {
        return Ok(password);
    }
    let stdin = io::stdin();
    if stdin.is_terminal() {
        return Err("no password given: pass it as an argument, set GUESSWORD_PASSWORD, or pipe it on stdin".into());
    }
    Ok(read_password(stdin.lock())?)
}

fn read_password(mut input: impl BufRead) -> io::Result<String> {
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

fn flush() {
    let _ = io::stdout().flush();
}
