//! HTTP transport: session REST endpoints and chat webhooks.

use crate::config::Config;
use crate::dispatch::{Dispatcher, Reply};
use crate::error::SessionError;
use crate::session::{BoardView, MoveOutcome, SessionId};
use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

/// Body of `POST /sessions/{id}/moves`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveRequest {
    /// Cell index (0-8, where 0=top-left, 8=bottom-right).
    pub index: usize,
}

/// Body of `POST /chats/{id}/messages`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageRequest {
    /// Message text, e.g. `/newgame`.
    pub text: String,
}

/// Body of `POST /chats/{id}/callbacks`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallbackRequest {
    /// Button payload.
    pub data: String,
}

/// Error body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable message.
    pub error: String,
}

/// Session errors as HTTP responses.
#[derive(Debug)]
pub struct ApiError(SessionError);

impl From<SessionError> for ApiError {
    fn from(err: SessionError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.0 {
            SessionError::AlreadyInProgress(_) | SessionError::CellOccupied(_) => {
                StatusCode::CONFLICT
            }
            SessionError::NoActiveGame(_) => StatusCode::NOT_FOUND,
            SessionError::InvalidIndex(_) => StatusCode::UNPROCESSABLE_ENTITY,
        };
        let body = Json(ErrorResponse {
            error: self.0.to_string(),
        });
        (status, body).into_response()
    }
}

/// Builds the router over a shared dispatcher.
pub fn router(dispatcher: Dispatcher) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/sessions", get(list_sessions))
        .route("/sessions/{id}", get(get_session).post(start_session))
        .route("/sessions/{id}/moves", post(make_move))
        .route("/chats/{id}/messages", post(chat_message))
        .route("/chats/{id}/callbacks", post(chat_callback))
        .with_state(dispatcher)
}

/// Serves the router on the configured address until Ctrl+C.
#[instrument(skip_all, fields(host = %config.host(), port = config.port()))]
pub async fn serve(config: &Config, dispatcher: Dispatcher) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind((config.host().as_str(), *config.port())).await?;
    info!(addr = %listener.local_addr()?, "Server ready");

    axum::serve(listener, router(dispatcher))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    info!("Shutdown requested");
}

async fn health() -> &'static str {
    "ok"
}

async fn list_sessions(State(dispatcher): State<Dispatcher>) -> Json<Vec<SessionId>> {
    Json(dispatcher.registry().active_sessions())
}

async fn get_session(
    State(dispatcher): State<Dispatcher>,
    Path(id): Path<SessionId>,
) -> Result<Json<BoardView>, ApiError> {
    dispatcher
        .registry()
        .view(&id)
        .map(Json)
        .ok_or_else(|| SessionError::NoActiveGame(id).into())
}

async fn start_session(
    State(dispatcher): State<Dispatcher>,
    Path(id): Path<SessionId>,
) -> Result<(StatusCode, Json<BoardView>), ApiError> {
    let view = dispatcher.registry().start_game(&id)?;
    Ok((StatusCode::CREATED, Json(view)))
}

async fn make_move(
    State(dispatcher): State<Dispatcher>,
    Path(id): Path<SessionId>,
    Json(req): Json<MoveRequest>,
) -> Result<Json<MoveOutcome>, ApiError> {
    let outcome = dispatcher.registry().apply_move(&id, req.index)?;
    Ok(Json(outcome))
}

async fn chat_message(
    State(dispatcher): State<Dispatcher>,
    Path(id): Path<SessionId>,
    Json(req): Json<MessageRequest>,
) -> Json<Reply> {
    Json(dispatcher.handle_message(&id, &req.text))
}

async fn chat_callback(
    State(dispatcher): State<Dispatcher>,
    Path(id): Path<SessionId>,
    Json(req): Json<CallbackRequest>,
) -> Json<Reply> {
    Json(dispatcher.handle_callback(&id, &req.data))
}
