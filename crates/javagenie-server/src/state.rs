use std::sync::Arc;
use tokio::sync::RwLock;

use javagenie_core::CodeGenerator;
use javagenie_gemini::GeminiClient;

use crate::config::GalleryConfig;
use crate::session_manager::SessionManager;

pub type SharedSessionManager = Arc<RwLock<SessionManager>>;

#[derive(Clone)]
pub struct AppState {
    pub sessions: SharedSessionManager,
    pub generator: Arc<dyn CodeGenerator>,
    pub config: Arc<GalleryConfig>,
}

impl AppState {
    /// State backed by the Gemini client described in `config`.
    pub fn new(config: GalleryConfig) -> Self {
        let client = GeminiClient::new(config.gemini.to_client_config());
        Self::with_generator(config, Arc::new(client))
    }

    pub fn with_generator(config: GalleryConfig, generator: Arc<dyn CodeGenerator>) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(SessionManager::new(
                config.sessions.max_sessions,
            ))),
            generator,
            config: Arc::new(config),
        }
    }
}
