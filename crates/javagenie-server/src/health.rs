use axum::Json;
use axum::extract::State;
use serde::Serialize;

use javagenie_core::catalog;

use crate::state::AppState;

/// Structured health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub sessions: usize,
    pub games: usize,
    pub generator_available: bool,
}

pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let sessions = state.sessions.read().await.len();
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        sessions,
        games: catalog::list().len(),
        generator_available: state.generator.is_available(),
    })
}

/// Readiness check. The catalog and demo always work; code generation
/// needs a usable generator.
pub async fn readiness_check(State(state): State<AppState>) -> &'static str {
    if !state.generator.is_available() {
        return "ready (code generation unavailable: no API key)";
    }
    "ready"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GalleryConfig;

    #[test]
    fn health_response_serializes() {
        let resp = HealthResponse {
            status: "healthy",
            version: "0.1.0",
            sessions: 3,
            games: 10,
            generator_available: false,
        };
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("\"healthy\""));
        assert!(json.contains("\"sessions\":3"));
        assert!(json.contains("\"generator_available\":false"));
    }

    #[tokio::test]
    async fn readiness_reports_missing_key() {
        let state = AppState::new(GalleryConfig::default());
        let msg = readiness_check(State(state)).await;
        assert!(msg.starts_with("ready"));
        assert!(msg.contains("no API key"));
    }
}
