use futures::future::BoxFuture;

/// Placeholder substituted when the model returns no text.
pub const EMPTY_RESPONSE_PLACEHOLDER: &str = "// No code generated.";

/// Message shown when no API credential is configured.
pub const MISSING_CREDENTIAL_MESSAGE: &str =
    "API Key is missing. Please set your Gemini API Key.";

/// Generic, retryable message for any remote failure.
pub const GENERATION_FAILED_MESSAGE: &str = "Failed to generate code. Please try again.";

/// Tags that switch the prompt from a console program to a Swing GUI.
const GUI_TAGS: [&str; 2] = ["Swing", "Graphics"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodegenError {
    /// No credential for the remote service. Never retried automatically.
    Configuration(String),
    /// The remote call failed. The cause is logged by the generator.
    Generation,
}

impl CodegenError {
    pub fn missing_credential() -> Self {
        Self::Configuration(MISSING_CREDENTIAL_MESSAGE.to_string())
    }

    /// Text suitable for the code panel's error slot.
    pub fn user_message(&self) -> &str {
        match self {
            Self::Configuration(m) => m,
            Self::Generation => GENERATION_FAILED_MESSAGE,
        }
    }
}

impl std::fmt::Display for CodegenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.user_message())
    }
}

impl std::error::Error for CodegenError {}

/// Source of generated Java programs for catalog entries.
///
/// Implementations make exactly one remote attempt per call and never cache;
/// caching belongs to the view controller.
pub trait CodeGenerator: Send + Sync {
    /// Whether calls can succeed at all (e.g. a credential is present).
    fn is_available(&self) -> bool {
        true
    }

    fn generate<'a>(
        &'a self,
        title: &'a str,
        tags: &'a [&'a str],
    ) -> BoxFuture<'a, Result<String, CodegenError>>;
}

/// Whether a descriptor's tags call for a graphical program.
pub fn wants_gui(tags: &[&str]) -> bool {
    tags.iter().any(|t| GUI_TAGS.contains(t))
}

/// Build the natural-language instruction sent to the model.
pub fn build_prompt(title: &str, tags: &[&str]) -> String {
    let context = if wants_gui(tags) {
        "This should be a Java Swing application with a GUI in a single file."
    } else {
        "This should be a console-based application using System.in and System.out."
    };

    format!(
        "Create a complete, compilable, single-file Java source code for a \"{title}\" game.
{context}

Requirements:
1. The class name must be compatible with a file named based on the game (e.g., SnakeGame).
2. Include comments explaining the code for a beginner.
3. Ensure the code is robust and handles basic errors.
4. Do not use external libraries beyond the standard Java JDK.
5. The output must be ONLY the raw Java code. Do not wrap in markdown code blocks like ```java.

Make it educational and clean."
    )
}

/// Clean up raw model output: strip stray fences, substitute a placeholder
/// for empty output.
pub fn normalize_generated(text: &str) -> String {
    let code = strip_code_fences(text);
    if code.trim().is_empty() {
        EMPTY_RESPONSE_PLACEHOLDER.to_string()
    } else {
        code
    }
}

/// Remove an opening fence (with optional language tag) and a closing fence.
/// Text without fences is returned unchanged.
pub fn strip_code_fences(text: &str) -> String {
    let mut body = text;
    let mut fenced = false;

    if let Some(rest) = text.trim_start().strip_prefix("```") {
        fenced = true;
        body = match rest.find('\n') {
            Some(nl) if is_language_tag(&rest[..nl]) => &rest[nl + 1..],
            None if is_language_tag(rest) => "",
            _ => strip_inline_tag(rest),
        };
    }

    if let Some(rest) = body.trim_end().strip_suffix("```") {
        fenced = true;
        body = rest;
    }

    if fenced {
        body.trim_start_matches(['\r', '\n']).trim_end().to_string()
    } else {
        text.to_string()
    }
}

/// Tags recognized when the code starts on the fence line itself.
const INLINE_TAGS: [&str; 3] = ["java", "text", "plaintext"];

/// Drop a language tag that shares a line with the code
/// (```` ```java public class A {} ````). Only known tags are dropped so
/// ```` ```public class ```` keeps its first word.
fn strip_inline_tag(rest: &str) -> &str {
    let Some((token, after)) = rest.split_once(char::is_whitespace) else {
        return rest;
    };
    if INLINE_TAGS.iter().any(|t| t.eq_ignore_ascii_case(token)) {
        after.trim_start()
    } else {
        rest
    }
}

/// `java`, `Java`, `c++`, or nothing at all.
fn is_language_tag(s: &str) -> bool {
    s.trim()
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '#' | '-' | '_' | '.'))
}
