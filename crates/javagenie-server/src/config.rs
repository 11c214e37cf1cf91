use serde::Deserialize;

use javagenie_gemini::GeminiConfig;
use javagenie_gemini::config::{DEFAULT_BASE_URL, DEFAULT_MODEL};

pub const CONFIG_FILE: &str = "javagenie.toml";

/// Top-level server configuration, loaded from `javagenie.toml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GalleryConfig {
    pub listen_addr: String,
    pub web_root: String,
    pub gemini: GeminiSection,
    pub sessions: SessionsConfig,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8080".to_string(),
            web_root: "web".to_string(),
            gemini: GeminiSection::default(),
            sessions: SessionsConfig::default(),
        }
    }
}

/// `[gemini]` section of the config file.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeminiSection {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
}

impl Default for GeminiSection {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl GeminiSection {
    pub fn to_client_config(&self) -> GeminiConfig {
        GeminiConfig {
            api_key: self.api_key.clone(),
            model: self.model.clone(),
            base_url: self.base_url.clone(),
        }
    }
}

/// Session lifecycle configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SessionsConfig {
    pub idle_timeout_secs: u64,
    pub idle_check_interval_secs: u64,
    pub max_sessions: usize,
}

impl Default for SessionsConfig {
    fn default() -> Self {
        Self {
            idle_timeout_secs: 3600,
            idle_check_interval_secs: 60,
            max_sessions: 1000,
        }
    }
}

impl GalleryConfig {
    /// Problems that make the config unusable, as messages.
    pub fn errors(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if self.listen_addr.parse::<std::net::SocketAddr>().is_err() {
            errors.push(format!(
                "listen_addr {:?} is not a valid socket address",
                self.listen_addr
            ));
        }
        if self.gemini.model.trim().is_empty() {
            errors.push("gemini.model must not be empty".to_string());
        }
        if self.sessions.idle_timeout_secs == 0 {
            errors.push("sessions.idle_timeout_secs must be > 0".to_string());
        }
        if self.sessions.idle_check_interval_secs == 0 {
            errors.push("sessions.idle_check_interval_secs must be > 0".to_string());
        }
        if self.sessions.max_sessions == 0 {
            errors.push("sessions.max_sessions must be > 0".to_string());
        }
        errors
    }

    /// Validate configuration, logging warnings for issues. Exits on errors.
    pub fn validate(&self, key_from_file: bool) {
        let errors = self.errors();
        for e in &errors {
            tracing::error!("{e}");
        }
        if !errors.is_empty() {
            std::process::exit(1);
        }

        if key_from_file {
            tracing::warn!(
                "gemini.api_key is set in {CONFIG_FILE}; prefer the GEMINI_API_KEY env var"
            );
        }
        if self.gemini.to_client_config().credential().is_none() {
            tracing::warn!("No Gemini API key configured; code generation will fail");
        }
    }

    /// Load config from `javagenie.toml` if it exists, then apply env var
    /// overrides. The flag reports whether the API key came from the file.
    pub fn load() -> (Self, bool) {
        let mut config = match std::fs::read_to_string(CONFIG_FILE) {
            Ok(content) => match toml::from_str::<GalleryConfig>(&content) {
                Ok(cfg) => {
                    tracing::info!("Loaded configuration from {CONFIG_FILE}");
                    cfg
                },
                Err(e) => {
                    tracing::warn!("Failed to parse {CONFIG_FILE}: {e}, using defaults");
                    GalleryConfig::default()
                },
            },
            Err(_) => {
                tracing::info!("No {CONFIG_FILE} found, using defaults");
                GalleryConfig::default()
            },
        };
        let file_key = config.gemini.api_key.clone();

        config.apply_env(|name| std::env::var(name).ok());
        let key_from_file = file_key.is_some() && config.gemini.api_key == file_key;
        (config, key_from_file)
    }

    /// Apply overrides from a variable lookup. Empty values are ignored.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let var = |name: &str| lookup(name).filter(|v| !v.is_empty());

        if let Some(addr) = var("JAVAGENIE_LISTEN_ADDR") {
            self.listen_addr = addr;
        }
        if let Some(root) = var("JAVAGENIE_WEB_ROOT") {
            self.web_root = root;
        }
        if let Some(key) = var("GEMINI_API_KEY").or_else(|| var("API_KEY")) {
            self.gemini.api_key = Some(key);
        }
        if let Some(model) = var("JAVAGENIE_MODEL") {
            self.gemini.model = model;
        }
        if let Some(url) = var("JAVAGENIE_GEMINI_BASE_URL") {
            self.gemini.base_url = url;
        }
    }
}
