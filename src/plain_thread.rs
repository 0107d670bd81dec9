//! Strict parser for the numbered Plain-Thread text format
//!
//! ```text
//! 1
//!
//! First segment body
//!
//! 2
//!
//! Second segment body
//! ```
//!
//! Indices start at 1 and increase by exactly 1; a blank line separates an
//! index from its body and one block from the next. Malformed input is
//! rejected with a positional [`FormatError`], never repaired.

use crate::error::FormatError;
use crate::types::{SourceMode, ThreadDraft};

/// Parsing-only intermediate: one numbered block of the input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlainThreadBlock {
    /// The parsed index line value
    pub index: usize,

    /// Block body, internal line breaks preserved, outer whitespace trimmed
    pub body: String,
}

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

fn index_value(line: &str) -> Option<usize> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        None
    } else {
        trimmed.parse().ok()
    }
}

/// Parse `raw` as Plain-Thread text into validated blocks.
///
/// A line counts as an index line when it trims to an integer and is either
/// the first non-blank line of the input or preceded by a blank line. A bare
/// number inside a body paragraph therefore stays body text.
///
/// # Errors
///
/// Returns a [`FormatError`] naming the offending line on any violation:
/// non-consecutive indices, a first index other than 1, a missing blank line
/// after an index, an empty body, content before the first index line, or
/// input with no index line at all.
pub fn parse_blocks(raw: &str) -> Result<Vec<PlainThreadBlock>, FormatError> {
    let data = raw.replace("\r\n", "\n");
    let lines: Vec<&str> = data.split('\n').collect();

    let mut i = 0;
    while i < lines.len() && is_blank(lines[i]) {
        i += 1;
    }
    if i == lines.len() {
        return Err(FormatError::NoIndexLines);
    }
    if index_value(lines[i]).is_none() {
        // Distinguish "no indices anywhere" from a stray preamble.
        if lines.iter().any(|l| index_value(l).is_some()) {
            return Err(FormatError::ExpectedIndexLine { line: i + 1 });
        }
        return Err(FormatError::NoIndexLines);
    }

    let mut blocks = Vec::new();
    let mut expected = 1;

    while i < lines.len() {
        let index_line = i + 1;
        let found = index_value(lines[i]).ok_or(FormatError::ExpectedIndexLine {
            line: index_line,
        })?;
        if found != expected {
            return Err(FormatError::IndexOutOfSequence {
                line: index_line,
                expected,
                found,
            });
        }
        if i + 1 >= lines.len() || !is_blank(lines[i + 1]) {
            return Err(FormatError::MissingBlankLine {
                line: index_line + 1,
                index: found,
            });
        }

        // Body runs until the next index line (integer-only line preceded
        // by a blank line) or end of input.
        let body_start = i + 2;
        let mut j = body_start;
        while j < lines.len() {
            if index_value(lines[j]).is_some() && is_blank(lines[j - 1]) {
                break;
            }
            j += 1;
        }

        let body = lines[body_start..j].join("\n").trim().to_string();
        if body.is_empty() {
            return Err(FormatError::EmptyBody {
                line: index_line,
                index: found,
            });
        }

        blocks.push(PlainThreadBlock { index: found, body });
        expected += 1;
        i = j;
    }

    Ok(blocks)
}

/// Parse `raw` as Plain-Thread text into a draft.
///
/// Over-limit bodies are accepted and flagged through the draft summary;
/// only structural violations fail.
///
/// # Errors
///
/// See [`parse_blocks`].
pub fn parse(raw: &str) -> Result<ThreadDraft, FormatError> {
    let blocks = parse_blocks(raw)?;
    Ok(ThreadDraft::from_bodies(
        blocks.into_iter().map(|b| b.body),
        SourceMode::PlainThread,
    ))
}
