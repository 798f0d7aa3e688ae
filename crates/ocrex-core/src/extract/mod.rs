//! Field extraction: compiled resolvers, batch runs and the built-in pipeline.

pub mod bulk;
pub mod pipeline;
pub mod postprocess;
pub mod resolver;
pub mod rules;

pub use bulk::{annotate_unmatched, bulk_extract, bulk_extract_licenses};
pub use pipeline::{process_document, Pipeline};
pub use postprocess::{add_summary_column, default_summary};
pub use resolver::{compile_pattern, CompiledFieldSet, FieldResolver, Resolution};
pub use rules::FieldExtractor;
