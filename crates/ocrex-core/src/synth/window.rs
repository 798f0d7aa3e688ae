//! Window patterns: token shape anchored to nearby words on the same line.

use super::dedup_preserving_order;
use super::shape::infer_token_shape;

/// Default maximum number of intervening words between anchor and value.
pub const DEFAULT_MAX_WORD_GAP: usize = 3;

/// Words shorter than this are too noisy to anchor on.
const MIN_ANCHOR_LEN: usize = 2;

/// Generate patterns requiring the sample's shape within `max_gap` words of
/// a literal anchor word.
///
/// At most `max_gap` usable anchors are taken from each side. `shape`
/// overrides the inferred token shape fragment.
pub fn generate_window_patterns<B, A>(
    sample: &str,
    before_words: &[B],
    after_words: &[A],
    max_gap: usize,
    shape: Option<&str>,
) -> Vec<String>
where
    B: AsRef<str>,
    A: AsRef<str>,
{
    if sample.trim().is_empty() {
        return Vec::new();
    }

    let shape = shape
        .map(str::to_string)
        .unwrap_or_else(|| infer_token_shape(sample));
    let gap = format!(r"(?:\W+\w+){{0,{}}}", max_gap);

    let before = anchors(before_words, max_gap)
        .map(|w| format!(r"\b{}\b{}\W+({})", w, gap, shape));
    let after = anchors(after_words, max_gap)
        .map(|w| format!(r"({}){}\W+\b{}\b", shape, gap, w));

    dedup_preserving_order(before.chain(after))
}

fn anchors<W: AsRef<str>>(words: &[W], limit: usize) -> impl Iterator<Item = String> + '_ {
    words
        .iter()
        .map(AsRef::as_ref)
        .filter(|w| w.chars().count() >= MIN_ANCHOR_LEN)
        .take(limit)
        .map(regex::escape)
}
