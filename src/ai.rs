//! AI-assisted splitting via the `genai` crate
//!
//! The backend is asked to rewrite the source text as a Plain-Thread
//! document; its response is then held to the exact same structural
//! contract as hand-written input (see [`crate::plain_thread`]).

use async_trait::async_trait;
use genai::chat::{ChatMessage, ChatRequest};
use genai::Client;
use tracing::info;

use crate::error::{Error, Result};
use crate::plain_thread;
use crate::types::{SourceMode, ThreadDraft};

/// Default model for thread composition
pub const DEFAULT_AI_MODEL: &str = "gpt-4o-mini";

/// System prompt instructing the model to answer in Plain-Thread format
const SYSTEM_PROMPT: &str = r"You are an expert social media manager who turns long-form text into engaging X (formerly Twitter) threads.

Strict rules:
1. Preserve the meaning, tone, and emojis of the source text. Do not invent facts.
2. Every tweet must be at most 280 characters.
3. Output the thread in the exact plain-thread format below and NOTHING else: no commentary, no code fences, no headings.

Plain-thread format:
- Each tweet is a block: a line containing only its number, then a blank line, then the tweet body.
- Numbers start at 1 and increase by exactly 1.
- A blank line separates one block from the next.

Example output for a two-tweet thread:

1

First tweet body.

2

Second tweet body.
";

/// A text-generation service that can compose a thread from raw text.
///
/// One request, one response; no streaming, no multi-turn state. Safe to
/// retry (no partial server-side state), but retries are caller policy.
#[async_trait]
pub trait ThreadBackend: Send + Sync {
    /// Ask the backend for Plain-Thread text covering `text`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Backend`] when the service is unreachable, rejects
    /// the request, or returns an empty response.
    async fn compose(&self, text: &str) -> Result<String>;
}

/// Configuration for the AI backend
#[derive(Debug, Clone)]
pub struct AiConfig {
    /// The AI model to use (e.g., "gpt-4o-mini", "claude-3-5-sonnet")
    pub model: String,

    /// Target language for the generated thread
    pub language: String,

    /// Additional free-form instructions appended to the request
    pub extra_instructions: Option<String>,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_AI_MODEL.to_string(),
            language: "English".to_string(),
            extra_instructions: None,
        }
    }
}

impl AiConfig {
    /// Create a new configuration with default values
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables
    ///
    /// Automatically loads a `.env` file if present. Supported variables:
    /// - `GENAI_API_KEY`: API key for the AI service (required)
    /// - `THREAD_AI_MODEL`: Model name (default: "gpt-4o-mini")
    /// - `THREAD_AI_LANGUAGE`: Target language (default: "English")
    /// - `THREAD_AI_INSTRUCTIONS`: Extra instructions for the model
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if `GENAI_API_KEY` is missing.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        if std::env::var("GENAI_API_KEY").is_err() {
            return Err(Error::Config(
                "GENAI_API_KEY environment variable is required".to_string(),
            ));
        }

        let model =
            std::env::var("THREAD_AI_MODEL").unwrap_or_else(|_| DEFAULT_AI_MODEL.to_string());
        let language =
            std::env::var("THREAD_AI_LANGUAGE").unwrap_or_else(|_| "English".to_string());
        let extra_instructions = std::env::var("THREAD_AI_INSTRUCTIONS").ok();

        Ok(Self {
            model,
            language,
            extra_instructions,
        })
    }

    /// Set the AI model to use
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the target language
    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Set extra instructions for the model
    #[must_use]
    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.extra_instructions = Some(instructions.into());
        self
    }
}

/// Thread backend implementation using the `genai` crate
pub struct GenAiBackend {
    client: Client,
    config: AiConfig,
}

impl GenAiBackend {
    /// Create a new genai-based backend
    #[must_use]
    pub fn new(config: AiConfig) -> Self {
        Self {
            client: Client::default(),
            config,
        }
    }

    /// Build the user message for one composition request
    fn build_user_prompt(&self, text: &str) -> String {
        let mut prompt = format!(
            "Rewrite the following text as a single thread in {}, \
            in the plain-thread format.\n\nOriginal text:\n\"\"\"\n{}\n\"\"\"\n",
            self.config.language, text
        );
        if let Some(extra) = &self.config.extra_instructions {
            prompt.push_str(&format!(
                "\nFollow these additional instructions carefully: {extra}"
            ));
        }
        prompt
    }
}

#[async_trait]
impl ThreadBackend for GenAiBackend {
    async fn compose(&self, text: &str) -> Result<String> {
        let request = ChatRequest::new(vec![
            ChatMessage::system(SYSTEM_PROMPT),
            ChatMessage::user(self.build_user_prompt(text)),
        ]);

        info!(model = %self.config.model, "requesting AI thread composition");
        let response = self
            .client
            .exec_chat(&self.config.model, request, None)
            .await
            .map_err(|e| Error::Backend(e.to_string()))?;

        let content = response
            .first_text()
            .ok_or_else(|| Error::Backend("Empty response from AI service".to_string()))?;

        Ok(content.to_string())
    }
}

/// Strip a surrounding Markdown code fence from a model response, if any.
/// Models occasionally wrap output in fences despite instructions.
fn strip_code_fences(response: &str) -> &str {
    let trimmed = response.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop an optional language tag on the fence line
    let after_tag = rest.find('\n').map_or("", |pos| &rest[pos + 1..]);
    after_tag.strip_suffix("```").unwrap_or(after_tag).trim()
}

/// Run one AI composition request and parse the result as Plain-Thread.
///
/// The backend's output is authoritative: if it fails validation, the error
/// is surfaced with the raw response attached — this never falls back to
/// another splitter.
///
/// # Errors
///
/// [`Error::Backend`] for transport-level failures; [`Error::BackendFormat`]
/// when the response is not valid Plain-Thread text.
pub async fn split_with_backend(backend: &dyn ThreadBackend, text: &str) -> Result<ThreadDraft> {
    let raw = backend.compose(text).await?;
    let cleaned = strip_code_fences(&raw);

    match plain_thread::parse(cleaned) {
        Ok(draft) => {
            info!(segments = draft.len(), "AI composition parsed");
            Ok(ThreadDraft {
                segments: draft.segments,
                source_mode: SourceMode::Ai,
            })
        }
        Err(source) => Err(Error::BackendFormat { source, raw }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FormatError;

    struct CannedBackend(&'static str);

    #[async_trait]
    impl ThreadBackend for CannedBackend {
        async fn compose(&self, _text: &str) -> Result<String> {
            Ok(self.0.to_string())
        }
    }

    struct FailingBackend;

    #[async_trait]
    impl ThreadBackend for FailingBackend {
        async fn compose(&self, _text: &str) -> Result<String> {
            Err(Error::Backend("connection refused".to_string()))
        }
    }

    #[test]
    fn user_prompt_embeds_text_language_and_instructions() {
        let backend = GenAiBackend::new(
            AiConfig::new()
                .with_language("Spanish")
                .with_instructions("keep it playful"),
        );
        let prompt = backend.build_user_prompt("some long text");
        assert!(prompt.contains("Spanish"));
        assert!(prompt.contains("some long text"));
        assert!(prompt.contains("keep it playful"));
    }

    #[test]
    fn strips_code_fences() {
        assert_eq!(strip_code_fences("```\n1\n\nhola\n```"), "1\n\nhola");
        assert_eq!(strip_code_fences("```text\n1\n\nhola\n```"), "1\n\nhola");
        assert_eq!(strip_code_fences("1\n\nhola"), "1\n\nhola");
    }

    #[tokio::test]
    async fn valid_response_matches_direct_parsing() {
        let reply = "1\n\nFirst\n\n2\n\nSecond";
        let draft = split_with_backend(&CannedBackend(reply), "whatever")
            .await
            .unwrap();
        let direct = plain_thread::parse(reply).unwrap();
        assert_eq!(draft.segments, direct.segments);
        assert_eq!(draft.source_mode, SourceMode::Ai);
    }

    #[tokio::test]
    async fn malformed_response_surfaces_raw_text() {
        let reply = "1\n\nFirst\n\n3\n\nGap";
        let err = split_with_backend(&CannedBackend(reply), "whatever")
            .await
            .unwrap_err();
        match err {
            Error::BackendFormat { source, raw } => {
                assert!(matches!(source, FormatError::IndexOutOfSequence { .. }));
                assert_eq!(raw, reply);
            }
            other => panic!("expected BackendFormat, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn transport_failure_is_a_backend_error() {
        let err = split_with_backend(&FailingBackend, "whatever")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Backend(_)));
    }

    #[test]
    fn default_config_uses_compact_model() {
        let config = AiConfig::default();
        assert_eq!(config.model, DEFAULT_AI_MODEL);
        assert_eq!(config.language, "English");
    }
}
