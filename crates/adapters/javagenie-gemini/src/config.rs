pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Configuration for the Gemini code generator.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API key. `None` or empty makes every generation fail up front.
    pub api_key: Option<String>,
    /// Model identifier, e.g. `gemini-2.5-flash`.
    pub model: String,
    /// API root without a trailing slash.
    pub base_url: String,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl GeminiConfig {
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            ..Self::default()
        }
    }

    /// The key, if one is actually usable.
    pub fn credential(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|k| !k.trim().is_empty())
    }

    pub fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_google() {
        let cfg = GeminiConfig::default();
        assert_eq!(
            cfg.endpoint(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent"
        );
        assert!(cfg.credential().is_none());
    }

    #[test]
    fn blank_key_is_no_credential() {
        assert!(GeminiConfig::with_api_key("").credential().is_none());
        assert!(GeminiConfig::with_api_key("   ").credential().is_none());
        assert_eq!(GeminiConfig::with_api_key("k").credential(), Some("k"));
    }

    #[test]
    fn endpoint_tolerates_trailing_slash() {
        let cfg = GeminiConfig {
            base_url: "http://127.0.0.1:9000/".to_string(),
            model: "test-model".to_string(),
            ..GeminiConfig::default()
        };
        assert_eq!(
            cfg.endpoint(),
            "http://127.0.0.1:9000/models/test-model:generateContent"
        );
    }
}
