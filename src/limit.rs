//! Platform length policy: the per-segment character limit and how
//! characters are counted.

/// Maximum characters allowed in a single tweet
pub const TWEET_LIMIT: usize = 280;

/// Count the displayable characters of `text`.
///
/// Counts Unicode scalar values, never bytes, so multi-byte characters
/// (accents, emoji) count once each.
///
/// # Examples
///
/// ```
/// use threadweave::limit::display_len;
///
/// assert_eq!(display_len("hola"), 4);
/// assert_eq!(display_len("café"), 4);
/// ```
#[must_use]
pub fn display_len(text: &str) -> usize {
    text.chars().count()
}
