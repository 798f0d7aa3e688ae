//! Field definitions accumulated from captured samples.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::sample::Sample;
use super::smart::generate_smart_patterns;
use super::window::generate_window_patterns;
use crate::extract::resolver::CompiledFieldSet;
use crate::models::config::ExtractionConfig;

/// Name used when a sample is captured without a field name.
pub const DEFAULT_FIELD_NAME: &str = "Field";

/// A field name and its ordered candidate patterns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    pub patterns: Vec<String>,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            patterns: Vec::new(),
        }
    }

    /// Append patterns not already present. Returns how many were added.
    pub fn extend<I, S>(&mut self, patterns: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let before = self.patterns.len();
        for pattern in patterns {
            let pattern = pattern.into();
            if !self.patterns.contains(&pattern) {
                self.patterns.push(pattern);
            }
        }
        self.patterns.len() - before
    }
}

/// Synthesis settings applied when a sample is captured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SynthesisOptions {
    /// Smart patterns kept per sample.
    pub smart_limit: usize,
    /// Word gap for window patterns.
    pub window_max_words: usize,
}

impl Default for SynthesisOptions {
    fn default() -> Self {
        Self::from(&ExtractionConfig::default())
    }
}

impl From<&ExtractionConfig> for SynthesisOptions {
    fn from(config: &ExtractionConfig) -> Self {
        Self {
            smart_limit: config.smart_pattern_limit,
            window_max_words: config.window_max_words,
        }
    }
}

/// Ordered set of field definitions for one extraction session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSession {
    pub fields: Vec<FieldSpec>,
    #[serde(skip)]
    options: Option<SynthesisOptions>,
}

impl FieldSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the synthesis options used by `add_sample`.
    pub fn with_options(mut self, options: SynthesisOptions) -> Self {
        self.options = Some(options);
        self
    }

    /// Load a session from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize the session to pretty JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Look up a field by name.
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Field names in definition order.
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Compile every field for resolution; malformed patterns are skipped.
    pub fn compile(&self, config: &ExtractionConfig) -> CompiledFieldSet {
        CompiledFieldSet::compile(self, config)
    }

    fn field_mut(&mut self, name: &str) -> &mut FieldSpec {
        let name = match name.trim() {
            "" => DEFAULT_FIELD_NAME,
            trimmed => trimmed,
        };
        let idx = match self.fields.iter().position(|f| f.name == name) {
            Some(idx) => idx,
            None => {
                self.fields.push(FieldSpec::new(name));
                self.fields.len() - 1
            }
        };
        &mut self.fields[idx]
    }

    /// Append explicit patterns to a field, creating it if needed.
    pub fn add_patterns<I, S>(&mut self, name: &str, patterns: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.field_mut(name).extend(patterns)
    }

    /// Synthesize patterns from a sample and merge them into a field.
    ///
    /// Smart patterns (truncated to the configured limit) come first, then
    /// window patterns built from the sample's line words. Returns how many
    /// new patterns the field gained.
    pub fn add_sample(&mut self, name: &str, sample: &Sample) -> usize {
        let options = self.options.unwrap_or_default();

        let mut patterns = generate_smart_patterns(&sample.value, sample.context());
        patterns.truncate(options.smart_limit);
        patterns.extend(generate_window_patterns(
            &sample.value,
            sample.before_words(),
            sample.after_words(),
            options.window_max_words,
            None,
        ));

        let field = self.field_mut(name);
        let added = field.extend(patterns);
        debug!(
            "Field {:?} gained {} patterns from sample {:?} ({} total)",
            field.name,
            added,
            sample.value,
            field.patterns.len()
        );
        added
    }
}
