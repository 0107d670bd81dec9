//! Segmentation orchestrator: dispatches raw text to one splitter based on
//! the user-selected mode and returns a uniform draft

use crate::ai::ThreadBackend;
use crate::error::{Error, Result};
use crate::{autosplit, delimiter, plain_thread};
use crate::types::ThreadDraft;

/// The user-facing split modes. Selection is explicit: no mode ever
/// promotes itself to another.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitMode {
    /// Manual/automatic composition: delimiter splitting when the text
    /// contains a double newline, greedy word-fill otherwise
    Compose,
    /// Strict numbered Plain-Thread parsing
    PlainThread,
    /// AI-assisted composition
    Ai,
}

/// Orchestrates the four splitters behind a single entry point.
///
/// All splitters are pure computations over the input text; only the AI
/// path performs I/O (one blocking network call, no internal timeout —
/// timeouts and retries are caller policy).
#[derive(Default)]
pub struct ThreadSplitter {
    backend: Option<Box<dyn ThreadBackend>>,
}

impl ThreadSplitter {
    /// Create a splitter without an AI backend. [`SplitMode::Ai`] will
    /// fail with a configuration error.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a splitter with an AI backend for [`SplitMode::Ai`]
    #[must_use]
    pub fn with_backend(backend: Box<dyn ThreadBackend>) -> Self {
        Self {
            backend: Some(backend),
        }
    }

    /// Split `text` according to `mode`.
    ///
    /// Returns a fresh draft on every call; use [`ThreadDraft::summary`]
    /// for the segment count and over-limit warnings.
    ///
    /// # Errors
    ///
    /// Propagates the chosen splitter's error unchanged: [`Error::Format`]
    /// for malformed Plain-Thread input, [`Error::Backend`] /
    /// [`Error::BackendFormat`] from the AI path, and [`Error::Config`]
    /// when [`SplitMode::Ai`] is requested without a backend.
    pub async fn split(&self, text: &str, mode: SplitMode) -> Result<ThreadDraft> {
        match mode {
            SplitMode::Compose => Ok(compose(text)),
            SplitMode::PlainThread => Ok(plain_thread::parse(text)?),
            SplitMode::Ai => {
                let backend = self.backend.as_deref().ok_or_else(|| {
                    Error::Config("no AI backend configured for AI split mode".to_string())
                })?;
                crate::ai::split_with_backend(backend, text).await
            }
        }
    }
}

/// The manual/automatic affordance: authors who inserted double-newline
/// breaks get the delimiter splitter; everyone else gets greedy word-fill.
#[must_use]
pub fn compose(text: &str) -> ThreadDraft {
    if delimiter::has_manual_breaks(text) {
        delimiter::split(text)
    } else {
        autosplit::split(text)
    }
}
