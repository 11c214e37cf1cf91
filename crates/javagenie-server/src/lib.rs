pub mod api;
pub mod config;
pub mod error;
pub mod health;
pub mod session_manager;
pub mod state;

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::routing::{get, post};
use tower_http::services::ServeDir;

use javagenie_core::CodeGenerator;

use config::GalleryConfig;
use state::AppState;

/// Build the Axum router and application state, generating code with Gemini.
pub fn build_app(config: GalleryConfig) -> (Router<()>, AppState) {
    let state = AppState::new(config);
    (router(state.clone()), state)
}

/// Same as [`build_app`] with a caller-supplied generator.
pub fn build_app_with_generator(
    config: GalleryConfig,
    generator: Arc<dyn CodeGenerator>,
) -> (Router<()>, AppState) {
    let state = AppState::with_generator(config, generator);
    (router(state.clone()), state)
}

fn router(state: AppState) -> Router<()> {
    let web_root = state.config.web_root.clone();

    let api_routes = Router::new()
        .route("/games", get(api::list_games))
        .route("/games/{key}", get(api::get_game))
        .route("/sessions", post(api::create_session))
        .route("/sessions/{id}", get(api::get_session))
        .route("/sessions/{id}/select", post(api::select_game))
        .route("/sessions/{id}/mode", post(api::set_mode))
        .route("/sessions/{id}/regenerate", post(api::regenerate))
        .route("/sessions/{id}/demo/guess", post(api::submit_guess))
        .route("/sessions/{id}/demo/new", post(api::new_demo_game));

    Router::new()
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        .nest("/api/v1", api_routes)
        .fallback_service(ServeDir::new(&web_root))
        .with_state(state)
}

/// Background task that evicts idle sessions on the configured interval.
pub fn spawn_session_reaper(state: AppState) -> tokio::task::JoinHandle<()> {
    let interval = Duration::from_secs(state.config.sessions.idle_check_interval_secs);
    let max_idle = Duration::from_secs(state.config.sessions.idle_timeout_secs);
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        loop {
            ticker.tick().await;
            let removed = state.sessions.write().await.cleanup_idle_sessions(max_idle);
            if removed > 0 {
                tracing::info!(removed, "Evicted idle sessions");
            }
        }
    })
}
