//! Core thread types: segments, drafts, and split summaries

use serde::{Deserialize, Serialize};

use crate::limit::{display_len, TWEET_LIMIT};

/// Which splitter produced a draft
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceMode {
    /// Manual double-newline breaks
    Delimiter,
    /// Greedy word-fill
    Auto,
    /// Strict numbered Plain-Thread text
    PlainThread,
    /// AI backend output parsed as Plain-Thread
    Ai,
}

/// One post-sized unit of a thread
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    /// 1-based position in publication order; contiguous, no gaps
    pub index: usize,

    /// The segment body
    pub text: String,

    /// Media attached by the caller after segmentation. Splitters never
    /// set this; at publish time it is an already-uploaded media id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_ref: Option<String>,
}

impl Segment {
    /// Create a segment with no image
    #[must_use]
    pub fn new(index: usize, text: impl Into<String>) -> Self {
        Self {
            index,
            text: text.into(),
            image_ref: None,
        }
    }

    /// Attach an image reference
    #[must_use]
    pub fn with_image(mut self, image_ref: impl Into<String>) -> Self {
        self.image_ref = Some(image_ref.into());
        self
    }

    /// Displayable character count of the body
    #[must_use]
    pub fn len(&self) -> usize {
        display_len(&self.text)
    }

    /// True when the body has no characters
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// True when the body exceeds the platform limit. Over-limit segments
    /// are surfaced, never dropped; rejecting them is the caller's call.
    #[must_use]
    pub fn over_limit(&self) -> bool {
        self.len() > TWEET_LIMIT
    }
}

/// The full result of one segmentation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreadDraft {
    /// Ordered segments; order is publication order
    pub segments: Vec<Segment>,

    /// Which splitter produced this draft
    pub source_mode: SourceMode,
}

impl ThreadDraft {
    /// Build a draft from ordered segment bodies, assigning contiguous
    /// 1-based indices.
    #[must_use]
    pub fn from_bodies<I, S>(bodies: I, source_mode: SourceMode) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments = bodies
            .into_iter()
            .enumerate()
            .map(|(i, body)| Segment::new(i + 1, body))
            .collect();
        Self {
            segments,
            source_mode,
        }
    }

    /// Number of segments
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// True when the draft has no segments
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Diagnostic summary: segment count and the 1-based indices of any
    /// over-limit segments, for the caller to render as warnings.
    #[must_use]
    pub fn summary(&self) -> SplitSummary {
        SplitSummary {
            segment_count: self.segments.len(),
            over_limit: self
                .segments
                .iter()
                .filter(|s| s.over_limit())
                .map(|s| s.index)
                .collect(),
        }
    }

    /// Render this draft as Plain-Thread text.
    ///
    /// Re-parsing the result reproduces the same bodies and indices
    /// (round-trip law).
    #[must_use]
    pub fn to_plain_thread(&self) -> String {
        self.segments
            .iter()
            .map(|s| format!("{}\n\n{}", s.index, s.text))
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// Diagnostic summary attached to every split result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitSummary {
    /// Total segments in the draft
    pub segment_count: usize,

    /// 1-based indices of segments exceeding the platform limit
    pub over_limit: Vec<usize>,
}

impl SplitSummary {
    /// True when every segment is within the platform limit
    #[must_use]
    pub fn all_within_limit(&self) -> bool {
        self.over_limit.is_empty()
    }
}
