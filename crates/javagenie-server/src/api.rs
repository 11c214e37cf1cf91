use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;
use uuid::Uuid;

use javagenie_core::catalog::{self, GameDescriptor};
use javagenie_core::view::DemoPanel;
use javagenie_core::{GalleryView, GameKind, GenerationRequest, GuessOutcome, GuessResult, ViewMode};

use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct SessionCreated {
    pub session_id: Uuid,
    pub view: GalleryView,
}

#[derive(Debug, Deserialize)]
pub struct SelectBody {
    pub game: String,
}

#[derive(Debug, Deserialize)]
pub struct ModeBody {
    pub mode: ViewMode,
}

/// `game` defaults to the session's selected entry.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RegenerateBody {
    pub game: Option<String>,
}

/// Raw text as typed into the guess box.
#[derive(Debug, Deserialize)]
pub struct GuessBody {
    pub guess: String,
}

#[derive(Debug, Serialize)]
pub struct GuessResponse {
    /// False when the input was not a number.
    pub accepted: bool,
    pub outcome: Option<GuessOutcome>,
    pub demo: DemoPanel,
}

fn parse_session_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError::BadRequest(format!("invalid session id: {raw}")))
}

fn parse_game(key: &str) -> Result<GameKind, AppError> {
    GameKind::from_key(key).ok_or_else(|| AppError::BadRequest(format!("unknown game: {key}")))
}

fn session_not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("session {id} not found"))
}

/// Run `request` off the request path and fold the result back into the
/// session. A session evicted in the meantime just drops the result.
pub fn spawn_generation(
    state: &AppState,
    session_id: Uuid,
    request: GenerationRequest,
) -> JoinHandle<()> {
    let generator = Arc::clone(&state.generator);
    let sessions = Arc::clone(&state.sessions);
    tokio::spawn(async move {
        let result = request.run(generator.as_ref()).await;
        let mut sessions = sessions.write().await;
        match sessions.get_mut(&session_id) {
            Some(session) => session.controller.complete_generation(&request, result),
            None => {
                tracing::debug!(session = %session_id, game = %request.id, "Session gone, dropping generated code");
            },
        }
    })
}

pub async fn list_games() -> Json<&'static [GameDescriptor]> {
    Json(catalog::list())
}

/// Unknown keys resolve to the first catalog entry.
pub async fn get_game(Path(key): Path<String>) -> Json<&'static GameDescriptor> {
    Json(catalog::find_by_key(&key))
}

pub async fn create_session(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<SessionCreated>), AppError> {
    let mut sessions = state.sessions.write().await;
    let session_id = sessions.create().map_err(|e| {
        tracing::warn!("{e}");
        AppError::Unavailable(e)
    })?;
    let view = sessions
        .get(&session_id)
        .map(|s| s.view())
        .ok_or_else(|| session_not_found(session_id))?;
    tracing::info!(session = %session_id, "Session opened");
    Ok((StatusCode::CREATED, Json(SessionCreated { session_id, view })))
}

pub async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<GalleryView>, AppError> {
    let id = parse_session_id(&id)?;
    let mut sessions = state.sessions.write().await;
    let session = sessions.get_mut(&id).ok_or_else(|| session_not_found(id))?;
    Ok(Json(session.view()))
}

pub async fn select_game(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<SelectBody>,
) -> Result<Json<GalleryView>, AppError> {
    let id = parse_session_id(&id)?;
    let game = parse_game(&body.game)?;

    let mut sessions = state.sessions.write().await;
    let session = sessions.get_mut(&id).ok_or_else(|| session_not_found(id))?;
    if let Some(request) = session.controller.select_game(game) {
        tracing::info!(session = %id, game = %game, "Generating code on selection");
        spawn_generation(&state, id, request);
    }
    Ok(Json(session.view()))
}

pub async fn set_mode(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<ModeBody>,
) -> Result<Json<GalleryView>, AppError> {
    let id = parse_session_id(&id)?;
    let mut sessions = state.sessions.write().await;
    let session = sessions.get_mut(&id).ok_or_else(|| session_not_found(id))?;
    session.controller.set_mode(body.mode);
    Ok(Json(session.view()))
}

pub async fn regenerate(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<RegenerateBody>,
) -> Result<Json<GalleryView>, AppError> {
    let id = parse_session_id(&id)?;
    let requested = body.game.as_deref().map(parse_game).transpose()?;

    let mut sessions = state.sessions.write().await;
    let session = sessions.get_mut(&id).ok_or_else(|| session_not_found(id))?;
    let game = requested.unwrap_or_else(|| session.controller.selected());
    if game.is_demo() {
        return Err(AppError::BadRequest(format!(
            "{game} ships a static sample and is never generated"
        )));
    }

    let request = session.controller.regenerate(game);
    tracing::info!(session = %id, game = %game, "Regenerating code");
    spawn_generation(&state, id, request);
    Ok(Json(session.view()))
}

pub async fn submit_guess(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<GuessBody>,
) -> Result<Json<GuessResponse>, AppError> {
    let id = parse_session_id(&id)?;
    let mut sessions = state.sessions.write().await;
    let session = sessions.get_mut(&id).ok_or_else(|| session_not_found(id))?;
    if session.demo.is_won() {
        return Err(AppError::Conflict(
            "game already won; start a new game".to_string(),
        ));
    }

    let (accepted, outcome) = match session.demo.submit_guess(&body.guess) {
        GuessResult::Rejected => (false, None),
        GuessResult::Scored(outcome) => (true, Some(outcome)),
    };
    if outcome == Some(GuessOutcome::Correct) {
        tracing::info!(session = %id, attempts = session.demo.attempts(), "Demo game won");
    }
    Ok(Json(GuessResponse {
        accepted,
        outcome,
        demo: session.demo_panel(),
    }))
}

pub async fn new_demo_game(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DemoPanel>, AppError> {
    let id = parse_session_id(&id)?;
    let mut sessions = state.sessions.write().await;
    let session = sessions.get_mut(&id).ok_or_else(|| session_not_found(id))?;
    session.demo.start_new_game();
    Ok(Json(session.demo_panel()))
}
