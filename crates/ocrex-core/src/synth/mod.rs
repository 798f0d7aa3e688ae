//! Pattern synthesis from user-selected samples.

pub mod sample;
pub mod session;
pub mod shape;
pub mod smart;
pub mod window;

pub use sample::{Sample, DEFAULT_CONTEXT_RADIUS};
pub use session::{FieldSession, FieldSpec, SynthesisOptions, DEFAULT_FIELD_NAME};
pub use shape::{infer_token_shape, ShapeClass, TokenShape};
pub use smart::{generate_smart_patterns, SampleCategory};
pub use window::{generate_window_patterns, DEFAULT_MAX_WORD_GAP};

use std::collections::HashSet;

/// Remove exact duplicates, keeping the first occurrence of each pattern.
pub(crate) fn dedup_preserving_order<I>(patterns: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut seen = HashSet::new();
    patterns
        .into_iter()
        .filter(|p| seen.insert(p.clone()))
        .collect()
}
