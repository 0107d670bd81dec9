//! Delimiter-based splitter: one segment per manually separated block

use std::sync::LazyLock;

use regex::Regex;

use crate::types::{SourceMode, ThreadDraft};

static BLOCK_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{2,}").expect("valid block-break pattern"));

/// Split `text` wherever the author inserted a double line-break.
///
/// Each block becomes one segment verbatim: single newlines inside a block
/// are preserved, blocks are trimmed, and blocks that trim to nothing are
/// dropped. This splitter never subdivides a block by length; a block that
/// still exceeds the limit is surfaced with its over-limit flag set.
#[must_use]
pub fn split(text: &str) -> ThreadDraft {
    let normalized = text.replace("\r\n", "\n");
    let bodies = BLOCK_BREAK
        .split(&normalized)
        .map(str::trim)
        .filter(|block| !block.is_empty())
        .map(str::to_string);
    ThreadDraft::from_bodies(bodies, SourceMode::Delimiter)
}

/// Whether `text` contains at least one double line-break, i.e. the author
/// marked manual segment boundaries.
#[must_use]
pub fn has_manual_breaks(text: &str) -> bool {
    BLOCK_BREAK.is_match(&text.replace("\r\n", "\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_double_newline() {
        let draft = split("Hello world.\n\nThis is tweet two.");
        let bodies: Vec<&str> = draft.segments.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(bodies, vec!["Hello world.", "This is tweet two."]);
        assert_eq!(draft.segments[0].index, 1);
        assert_eq!(draft.segments[1].index, 2);
        assert_eq!(draft.source_mode, SourceMode::Delimiter);
    }

    #[test]
    fn runs_of_newlines_count_as_one_break() {
        let draft = split("one\n\n\n\ntwo");
        assert_eq!(draft.len(), 2);
    }

    #[test]
    fn single_newlines_stay_inside_a_block() {
        let draft = split("line one\nline two\n\nnext");
        assert_eq!(draft.segments[0].text, "line one\nline two");
    }

    #[test]
    fn crlf_input_is_normalized() {
        let draft = split("one\r\n\r\ntwo");
        assert_eq!(draft.len(), 2);
        assert_eq!(draft.segments[1].text, "two");
    }

    #[test]
    fn blank_blocks_are_dropped() {
        let draft = split("one\n\n   \n\ntwo");
        assert_eq!(draft.len(), 2);
    }

    #[test]
    fn never_subdivides_an_oversized_block() {
        let long = "word ".repeat(100);
        let draft = split(&long);
        assert_eq!(draft.len(), 1);
        assert!(draft.segments[0].over_limit());
    }

    #[test]
    fn empty_input_yields_empty_draft() {
        assert!(split("").is_empty());
        assert!(split("  \n\n  ").is_empty());
    }

    #[test]
    fn detects_manual_breaks() {
        assert!(has_manual_breaks("a\n\nb"));
        assert!(has_manual_breaks("a\r\n\r\nb"));
        assert!(!has_manual_breaks("a\nb"));
    }
}
