use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};

use javagenie_core::codegen::{CodeGenerator, CodegenError, build_prompt, normalize_generated};

use crate::config::GeminiConfig;

/// Calls Gemini's `generateContent` once per request.
pub struct GeminiClient {
    config: GeminiConfig,
    client: reqwest::Client,
}

/// Why a remote call failed. Logged, never shown to the user.
#[derive(Debug)]
enum RemoteError {
    Transport(reqwest::Error),
    Status { status: u16, body: String },
    Decode(String),
}

impl std::fmt::Display for RemoteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transport(e) => write!(f, "transport error: {e}"),
            Self::Status { status, body } => write!(f, "API returned {status}: {body}"),
            Self::Decode(e) => write!(f, "malformed response: {e}"),
        }
    }
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: [RequestContent<'a>; 1],
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: [RequestPart<'a>; 1],
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

/// Partial `generateContent` response.
#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Text of the first candidate, parts concatenated.
    fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(concat!("javagenie/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Falling back to default HTTP client");
                reqwest::Client::new()
            });
        Self { config, client }
    }

    pub fn has_credential(&self) -> bool {
        self.config.credential().is_some()
    }

    async fn request(&self, api_key: &str, prompt: &str) -> Result<String, RemoteError> {
        let body = GenerateContentRequest {
            contents: [RequestContent {
                parts: [RequestPart { text: prompt }],
            }],
        };

        let resp = self
            .client
            .post(self.config.endpoint())
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await
            .map_err(RemoteError::Transport)?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(RemoteError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateContentResponse = resp
            .json()
            .await
            .map_err(|e| RemoteError::Decode(e.to_string()))?;
        Ok(parsed.text())
    }

    async fn generate_code(&self, title: &str, tags: &[&str]) -> Result<String, CodegenError> {
        let Some(api_key) = self.config.credential() else {
            tracing::warn!(game = title, "Gemini API key missing, refusing to generate");
            return Err(CodegenError::missing_credential());
        };

        let prompt = build_prompt(title, tags);
        match self.request(api_key, &prompt).await {
            Ok(text) => {
                tracing::info!(game = title, model = %self.config.model, "Generated code");
                Ok(normalize_generated(&text))
            },
            Err(e) => {
                tracing::error!(
                    game = title,
                    model = %self.config.model,
                    error = %e,
                    "Gemini API error"
                );
                Err(CodegenError::Generation)
            },
        }
    }
}

impl CodeGenerator for GeminiClient {
    fn is_available(&self) -> bool {
        self.has_credential()
    }

    fn generate<'a>(
        &'a self,
        title: &'a str,
        tags: &'a [&'a str],
    ) -> BoxFuture<'a, Result<String, CodegenError>> {
        Box::pin(self.generate_code(title, tags))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_text_joins_parts_of_first_candidate() {
        let json = r#"{
            "candidates": [
                {"content": {"parts": [{"text": "class A {"}, {"text": "}"}], "role": "model"}},
                {"content": {"parts": [{"text": "ignored"}]}}
            ]
        }"#;
        let resp: GenerateContentResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.text(), "class A {}");
    }

    #[test]
    fn response_without_candidates_is_empty() {
        let resp: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(resp.text(), "");

        let resp: GenerateContentResponse =
            serde_json::from_str(r#"{"candidates": [{"finishReason": "SAFETY"}]}"#).unwrap();
        assert_eq!(resp.text(), "");
    }

    #[test]
    fn request_body_shape() {
        let body = GenerateContentRequest {
            contents: [RequestContent {
                parts: [RequestPart { text: "hi" }],
            }],
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json, serde_json::json!({"contents": [{"parts": [{"text": "hi"}]}]}));
    }

    #[tokio::test]
    async fn missing_key_fails_before_network() {
        // Port 9 (discard) is never contacted: the credential check runs first.
        let client = GeminiClient::new(GeminiConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            ..GeminiConfig::default()
        });
        assert!(!client.has_credential());
        let err = client.generate("Snake", &["Swing"]).await.unwrap_err();
        assert_eq!(err, CodegenError::missing_credential());
    }

    #[test]
    fn remote_error_display() {
        let e = RemoteError::Status {
            status: 429,
            body: "quota".to_string(),
        };
        assert_eq!(e.to_string(), "API returned 429: quota");
    }
}
