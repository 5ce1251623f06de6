//! Typed calls to the remote game engine.
//!
//! `EngineClient` turns each engine call into one [`Request`], sends it
//! through a [`Transport`], and decodes the reply with a [`Codec`]. It holds
//! no state of its own: tokens and game ids are passed in by the caller.

use chrono::NaiveDate;
use guessword_protocol::{
    Codec, Credentials, DailyReport, GameId, GuessRequest, GuessResponse, JsonCodec,
    LoginResponse, ProtocolError, RegisterResponse, StartGameResponse, UserReport,
};
use guessword_transport::{Request, Response, Transport};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::ClientError;

/// Failure body the engine sends with any non-success status.
///
/// `detail` is usually a string, but validation failures carry a list of
/// objects instead, so it's kept as a raw JSON value.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<serde_json::Value>,
}

/// Client for the engine's request/response contract.
pub struct EngineClient<T, C = JsonCodec> {
    transport: T,
    codec: C,
}

impl<T: Transport> EngineClient<T> {
    /// Creates a client that speaks JSON over `transport`.
    pub fn new(transport: T) -> Self {
        Self::with_codec(transport, JsonCodec)
    }
}

impl<T: Transport, C: Codec> EngineClient<T, C> {
    /// Creates a client with an explicit codec.
    pub fn with_codec(transport: T, codec: C) -> Self {
        Self { transport, codec }
    }

    /// Returns the underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// `POST /register`. Returns the engine's confirmation message.
    ///
    /// # Errors
    /// [`ClientError::RemoteRejected`] carries the engine's reason (name
    /// taken, weak password, ...).
    pub async fn register(&self, credentials: &Credentials) -> Result<String, ClientError> {
        let request = self.json(Request::post(["register"]), credentials)?;
        let response: RegisterResponse = self.call(request).await?;
        Ok(response.msg)
    }

    /// `POST /login`.
    ///
    /// # Errors
    /// - [`ClientError::RemoteRejected`] on wrong credentials
    /// - [`ClientError::Protocol`] if the reply has an empty token or username
    pub async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, ClientError> {
        let request = self.json(Request::post(["login"]), credentials)?;
        let reply: LoginResponse = self.call(request).await?;
        if reply.access_token.is_empty() || reply.username.is_empty() {
            return Err(ProtocolError::InvalidMessage(
                "login reply is missing the token or username".into(),
            )
            .into());
        }
        Ok(reply)
    }

    /// `POST /start_game`. Returns the new session's id.
    ///
    /// # Errors
    /// [`ClientError::RemoteRejected`] on a bad token or a daily limit.
    pub async fn start_game(&self, token: &str) -> Result<GameId, ClientError> {
        let request = Request::post(["start_game"]).bearer(token);
        let response: StartGameResponse = self.call(request).await?;
        Ok(response.game_id)
    }

    /// `POST /guess`.
    ///
    /// # Errors
    /// [`ClientError::RemoteRejected`] for an unknown word, a missing or
    /// inactive game, or a bad token.
    pub async fn guess(
        &self,
        token: &str,
        game_id: GameId,
        guess: &str,
    ) -> Result<GuessResponse, ClientError> {
        let body = GuessRequest {
            game_id,
            guess: guess.to_string(),
        };
        let request = self.json(Request::post(["guess"]).bearer(token), &body)?;
        self.call(request).await
    }

    /// `GET /report/daily`. `None` asks for today (engine's clock).
    ///
    /// # Errors
    /// [`ClientError::RemoteRejected`] if the caller isn't an admin.
    pub async fn daily_report(
        &self,
        token: &str,
        date: Option<NaiveDate>,
    ) -> Result<DailyReport, ClientError> {
        let mut request = Request::get(["report", "daily"]).bearer(token);
        if let Some(date) = date {
            request = request.query("date_str", date.format("%Y-%m-%d").to_string());
        }
        self.call(request).await
    }

    /// `GET /report/user/{username}`.
    ///
    /// # Errors
    /// [`ClientError::RemoteRejected`] if the caller isn't an admin or the
    /// user doesn't exist.
    pub async fn user_report(&self, token: &str, username: &str) -> Result<UserReport, ClientError> {
        let request = Request::get(["report", "user", username]).bearer(token);
        self.call(request).await
    }

    // -- internals --------------------------------------------------------

    fn json<B: Serialize>(&self, request: Request, body: &B) -> Result<Request, ClientError> {
        let bytes = self.codec.encode(body)?;
        Ok(request.body(self.codec.content_type(), bytes))
    }

    async fn call<R: DeserializeOwned>(&self, request: Request) -> Result<R, ClientError> {
        let method = request.method;
        let path = request.path_string();
        tracing::debug!(%method, %path, "calling engine");

        let response = self.transport.send(request).await?;
        if !response.is_success() {
            let detail = self.rejection_detail(&response);
            tracing::debug!(%method, %path, status = response.status, %detail, "engine rejected call");
            return Err(ClientError::RemoteRejected {
                status: response.status,
                detail,
            });
        }

        Ok(self.codec.decode(&response.body)?)
    }

    /// The message to show for a rejected call.
    ///
    /// A string `detail` is returned verbatim. Anything else (a structured
    /// detail, a non-JSON body) falls back to the raw body text, and an
    /// empty body to `HTTP <status>`.
    fn rejection_detail(&self, response: &Response) -> String {
        if let Ok(ErrorBody {
            detail: Some(serde_json::Value::String(detail)),
        }) = self.codec.decode::<ErrorBody>(&response.body)
        {
            return detail;
        }

        let raw = String::from_utf8_lossy(&response.body).trim().to_string();
        if raw.is_empty() {
            format!("HTTP {}", response.status)
        } else {
            raw
        }
    }
}
