//! Greedy word-fill splitter: the automatic fallback when the author
//! marked no manual breaks

use crate::limit::{display_len, TWEET_LIMIT};
use crate::types::{SourceMode, ThreadDraft};

/// Split `text` into segments by greedily packing whitespace-separated
/// words up to the platform limit.
///
/// Words are rejoined with single spaces. A segment closes when appending
/// the next word would push it past the limit (a segment of exactly the
/// limit is acceptable). A single word longer than the limit becomes its
/// own over-limit segment rather than corrupting its neighbours. Blank
/// lines in the input are ordinary whitespace here.
///
/// Pure function of the text and limit: never drops or reorders words.
#[must_use]
pub fn split(text: &str) -> ThreadDraft {
    split_with_limit(text, TWEET_LIMIT)
}

/// [`split`] with an explicit limit, for callers and tests that need
/// something shorter than the platform limit.
#[must_use]
pub fn split_with_limit(text: &str, limit: usize) -> ThreadDraft {
    let mut bodies: Vec<String> = Vec::new();
    let mut buffer = String::new();

    for word in text.split_whitespace() {
        let word_len = display_len(word);

        if buffer.is_empty() {
            if word_len > limit {
                // Oversized lone word: isolate it, flagged, content intact.
                bodies.push(word.to_string());
            } else {
                buffer.push_str(word);
            }
            continue;
        }

        if display_len(&buffer) + 1 + word_len > limit {
            bodies.push(std::mem::take(&mut buffer));
            if word_len > limit {
                bodies.push(word.to_string());
            } else {
                buffer.push_str(word);
            }
        } else {
            buffer.push(' ');
            buffer.push_str(word);
        }
    }

    if !buffer.is_empty() {
        bodies.push(buffer);
    }

    ThreadDraft::from_bodies(bodies, SourceMode::Auto)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words_of(draft: &ThreadDraft) -> Vec<String> {
        draft
            .segments
            .iter()
            .flat_map(|s| s.text.split_whitespace().map(str::to_string))
            .collect()
    }

    #[test]
    fn short_text_is_one_segment() {
        let draft = split("Hello world");
        assert_eq!(draft.len(), 1);
        assert_eq!(draft.segments[0].text, "Hello world");
        assert_eq!(draft.source_mode, SourceMode::Auto);
    }

    #[test]
    fn respects_the_limit() {
        let text = "Hello ".repeat(50) + "world";
        let draft = split_with_limit(&text, 50);
        assert!(draft.len() > 1);
        assert!(draft.segments.iter().all(|s| s.len() <= 50));
    }

    #[test]
    fn reconstructs_the_word_sequence_exactly() {
        let text = "the quick brown fox jumps over the lazy dog ".repeat(20);
        let draft = split_with_limit(&text, 40);
        let original: Vec<String> = text.split_whitespace().map(str::to_string).collect();
        assert_eq!(words_of(&draft), original);
    }

    #[test]
    fn exactly_at_the_limit_is_acceptable() {
        // "aaaa bbbb" is 9 characters: must stay one segment at limit 9.
        let draft = split_with_limit("aaaa bbbb", 9);
        assert_eq!(draft.len(), 1);
        assert_eq!(draft.segments[0].text, "aaaa bbbb");

        // At limit 8 the pair no longer fits.
        let draft = split_with_limit("aaaa bbbb", 8);
        assert_eq!(draft.len(), 2);
    }

    #[test]
    fn oversized_word_gets_its_own_flagged_segment() {
        let word = "x".repeat(300);
        let draft = split(&word);
        assert_eq!(draft.len(), 1);
        assert_eq!(draft.segments[0].text, word);
        assert!(draft.segments[0].over_limit());
    }

    #[test]
    fn oversized_word_does_not_corrupt_neighbours() {
        let long = "y".repeat(300);
        let text = format!("start {long} end");
        let draft = split(&text);
        let bodies: Vec<&str> = draft.segments.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(bodies, vec!["start", long.as_str(), "end"]);
        assert!(draft.segments[1].over_limit());
        assert!(!draft.segments[0].over_limit());
    }

    #[test]
    fn blank_lines_are_ordinary_whitespace() {
        let draft = split("one\n\ntwo");
        assert_eq!(draft.len(), 1);
        assert_eq!(draft.segments[0].text, "one two");
    }

    #[test]
    fn whitespace_only_input_yields_empty_draft() {
        assert!(split("").is_empty());
        assert!(split(" \n\t ").is_empty());
    }

    #[test]
    fn deterministic_across_calls() {
        let text = "repeatable input with several words to pack";
        assert_eq!(split_with_limit(text, 15), split_with_limit(text, 15));
    }
}
