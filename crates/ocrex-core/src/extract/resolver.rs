//! Ordered first-match resolution of candidate patterns.

use regex::{Regex, RegexBuilder};
use tracing::{debug, trace, warn};

use crate::error::PatternError;
use crate::models::config::ExtractionConfig;
use crate::models::document::{DocumentText, ExtractionRow};
use crate::synth::session::{FieldSession, FieldSpec};

/// Compile one candidate pattern, case-insensitively.
pub fn compile_pattern(pattern: &str, size_limit: usize) -> Result<Regex, PatternError> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .size_limit(size_limit)
        .build()
        .map_err(|e| PatternError::compile(pattern, e))
}

/// The value a field resolved to, and which pattern produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Extracted value.
    pub value: String,
    /// Position of the winning pattern in the field's pattern list.
    pub pattern_index: usize,
    /// Byte span of the whole match in the source text.
    pub span: (usize, usize),
}

#[derive(Debug, Clone)]
struct CompiledPattern {
    index: usize,
    regex: Regex,
}

/// Compiled, immutable pattern list for one field.
#[derive(Debug, Clone)]
pub struct FieldResolver {
    name: String,
    patterns: Vec<CompiledPattern>,
}

impl FieldResolver {
    /// Compile a field's patterns in order.
    ///
    /// Patterns that fail to compile are skipped, logged, and returned
    /// alongside the resolver.
    pub fn compile(spec: &FieldSpec, size_limit: usize) -> (Self, Vec<PatternError>) {
        let mut patterns = Vec::with_capacity(spec.patterns.len());
        let mut skipped = Vec::new();

        for (index, pattern) in spec.patterns.iter().enumerate() {
            match compile_pattern(pattern, size_limit) {
                Ok(regex) => patterns.push(CompiledPattern { index, regex }),
                Err(e) => {
                    warn!("Skipping pattern for field {:?}: {}", spec.name, e);
                    skipped.push(e);
                }
            }
        }

        let resolver = Self {
            name: spec.name.clone(),
            patterns,
        };
        (resolver, skipped)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of usable (compiled) patterns.
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Try patterns in list order; the first that matches anywhere wins.
    ///
    /// The value is the first capturing group when the match engaged any
    /// group, otherwise the whole match.
    pub fn resolve(&self, text: &str) -> Option<Resolution> {
        for pattern in &self.patterns {
            let Some(caps) = pattern.regex.captures(text) else {
                continue;
            };
            let whole = caps.get(0)?;
            let engaged_group = caps.iter().skip(1).any(|g| g.is_some());
            let value = if engaged_group {
                caps.get(1).map(|m| m.as_str()).unwrap_or_default()
            } else {
                whole.as_str()
            };

            trace!(
                "Field {:?} resolved by pattern #{} to {:?}",
                self.name, pattern.index, value
            );
            return Some(Resolution {
                value: value.to_string(),
                pattern_index: pattern.index,
                span: (whole.start(), whole.end()),
            });
        }
        None
    }
}

/// Compiled resolvers for every field of a session, in definition order.
///
/// Immutable once built, so one set can be shared across worker threads
/// for a whole batch.
#[derive(Debug, Clone, Default)]
pub struct CompiledFieldSet {
    fields: Vec<FieldResolver>,
    skipped: Vec<String>,
}

impl CompiledFieldSet {
    /// Compile every field of a session.
    pub fn compile(session: &FieldSession, config: &ExtractionConfig) -> Self {
        let mut fields = Vec::with_capacity(session.fields.len());
        let mut skipped = Vec::new();

        for spec in &session.fields {
            let (resolver, errors) = FieldResolver::compile(spec, config.regex_size_limit);
            skipped.extend(errors.iter().map(|e| format!("{}: {}", spec.name, e)));
            fields.push(resolver);
        }

        debug!(
            "Compiled {} fields ({} patterns skipped)",
            fields.len(),
            skipped.len()
        );
        Self { fields, skipped }
    }

    /// Descriptions of patterns that failed to compile.
    pub fn skipped(&self) -> &[String] {
        &self.skipped
    }

    /// Field names in definition order.
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(FieldResolver::name).collect()
    }

    pub fn field(&self, name: &str) -> Option<&FieldResolver> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Resolve every field against `text`; unresolved fields are empty strings.
    pub fn resolve(&self, text: &str) -> Vec<(String, String)> {
        self.fields
            .iter()
            .map(|field| {
                let value = field.resolve(text).map(|r| r.value).unwrap_or_default();
                (field.name.clone(), value)
            })
            .collect()
    }

    /// Resolve every field for one document.
    pub fn resolve_document(&self, document: &DocumentText) -> ExtractionRow {
        ExtractionRow {
            file_name: document.file_name.clone(),
            fields: self.resolve(&document.text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn resolver(patterns: &[&str]) -> FieldResolver {
        let mut spec = FieldSpec::new("field");
        spec.extend(patterns.iter().copied());
        FieldResolver::compile(&spec, ExtractionConfig::default().regex_size_limit).0
    }

    #[test]
    fn test_list_order_beats_text_order() {
        let r = resolver(&[r"\d{3}", "[A-Z]+"]);
        let resolution = r.resolve("abc DEF 123").unwrap();
        assert_eq!(resolution.value, "123");
        assert_eq!(resolution.pattern_index, 0);
        assert_eq!(resolution.span, (8, 11));
    }

    #[test]
    fn test_case_insensitive() {
        let r = resolver(&["[A-Z]+"]);
        assert_eq!(r.resolve("abc DEF").unwrap().value, "abc");
    }

    #[test]
    fn test_capture_group_preferred() {
        let r = resolver(&[r"REF[-\s]*([A-Z0-9]{4,10})"]);
        assert_eq!(r.resolve("see ref-AB1234 now").unwrap().value, "AB1234");
    }

    #[test]
    fn test_unengaged_group_falls_back_to_whole_match() {
        let r = resolver(&[r"No\.\s*\d+(?:\s+(rev))?"]);
        assert_eq!(r.resolve("No. 42 only").unwrap().value, "No. 42");
    }

    #[test]
    fn test_malformed_pattern_skipped() {
        let mut spec = FieldSpec::new("field");
        spec.extend(["([unclosed", r"\d+"]);
        let (r, skipped) = FieldResolver::compile(&spec, 1 << 20);
        assert_eq!(skipped.len(), 1);
        assert_eq!(r.len(), 1);
        let resolution = r.resolve("value 77").unwrap();
        assert_eq!(resolution.value, "77");
        assert_eq!(resolution.pattern_index, 1);
    }

    #[test]
    fn test_oversized_pattern_skipped() {
        let mut spec = FieldSpec::new("field");
        spec.extend([r"\w{1000}", r"\d+"]);
        let (r, skipped) = FieldResolver::compile(&spec, 1 << 16);
        assert_eq!(skipped.len(), 1);
        assert_eq!(r.resolve("7").unwrap().value, "7");
    }

    #[test]
    fn test_no_match_and_empty_text() {
        let r = resolver(&[r"\d+"]);
        assert_eq!(r.resolve("no digits"), None);
        assert_eq!(r.resolve(""), None);
    }

    #[test]
    fn test_field_set_resolves_in_definition_order() {
        let mut session = FieldSession::new();
        session.add_patterns("Number", [r"\d+"]);
        session.add_patterns("Broken", ["("]);
        session.add_patterns("Word", [r"[a-z]+"]);
        let set = CompiledFieldSet::compile(&session, &ExtractionConfig::default());

        assert_eq!(set.skipped().len(), 1);
        let row = set.resolve_document(&DocumentText::new("a.txt", "abc 12"));
        assert_eq!(row.file_name, "a.txt");
        assert_eq!(row.fields, vec![
            ("Number".to_string(), "12".to_string()),
            ("Broken".to_string(), String::new()),
            ("Word".to_string(), "abc".to_string()),
        ]);
    }
}
