//! Locale-specific pattern bundles used by the scoring rules.
//!
//! A bundle supplies four slots: a country-code pattern, an area-code
//! indicator, a format-indicator pattern and an ordered list of "typical
//! deduction" patterns (shapes that are unlikely to be phone numbers).
//! Bundles are compiled once and shared read-only across threads.

mod culture;
mod english;

pub use culture::Culture;
pub use english::EnglishPatterns;

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, OnceLock};
use thiserror::Error;

/// Errors raised while resolving or compiling a pattern bundle
#[derive(Debug, Error)]
pub enum PatternError {
    #[error("pattern slot `{slot}` is empty")]
    EmptyPattern { slot: String },

    #[error("invalid regular expression in pattern slot `{slot}`: {source}")]
    InvalidPattern {
        slot: String,
        #[source]
        source: regex::Error,
    },

    #[error("unsupported culture `{0}` (supported: {supported})", supported = Culture::supported_codes().join(", "))]
    UnsupportedCulture(String),
}

/// Raw pattern strings for one locale
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternDefinitions {
    pub country_code: String,
    pub area_code_indicator: String,
    pub format_indicator: String,
    /// Checked in order; only the first match is penalized
    #[serde(default)]
    pub typical_deductions: Vec<String>,
}

/// Capability interface: anything that can supply the four pattern slots
pub trait PatternSource: Send + Sync {
    /// Name of the bundle (for logs and reports)
    fn name(&self) -> &'static str;

    /// Pattern strings for this bundle
    fn definitions(&self) -> PatternDefinitions;
}

/// Compiled matchers for one pattern bundle
#[derive(Debug, Clone)]
pub struct CompiledPatterns {
    pub country_code: Regex,
    pub area_code_indicator: Regex,
    pub format_indicator: Regex,
    pub typical_deductions: Vec<Regex>,
}

impl CompiledPatterns {
    /// Compile a bundle, failing on the first empty or invalid slot
    pub fn compile(defs: &PatternDefinitions) -> Result<Self, PatternError> {
        let country_code = compile_slot("countryCode", &defs.country_code, false)?;
        let area_code_indicator =
            compile_slot("areaCodeIndicator", &defs.area_code_indicator, false)?;
        // Format indicators match case-insensitively and across newlines
        let format_indicator = compile_slot("formatIndicator", &defs.format_indicator, true)?;
        let typical_deductions = defs
            .typical_deductions
            .iter()
            .enumerate()
            .map(|(i, p)| compile_slot(&format!("typicalDeductions[{}]", i), p, false))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            country_code,
            area_code_indicator,
            format_indicator,
            typical_deductions,
        })
    }

    /// Compile the bundle supplied by a pattern source
    pub fn from_source(source: &dyn PatternSource) -> Result<Self, PatternError> {
        tracing::debug!(bundle = source.name(), "compiling pattern bundle");
        Self::compile(&source.definitions())
    }
}

fn compile_slot(slot: &str, pattern: &str, format_flags: bool) -> Result<Regex, PatternError> {
    if pattern.trim().is_empty() {
        return Err(PatternError::EmptyPattern {
            slot: slot.to_string(),
        });
    }
    RegexBuilder::new(pattern)
        .case_insensitive(format_flags)
        .dot_matches_new_line(format_flags)
        .build()
        .map_err(|source| PatternError::InvalidPattern {
            slot: slot.to_string(),
            source,
        })
}

/// Built-in English patterns (compile once per process).
pub fn english_patterns() -> Arc<CompiledPatterns> {
    static CACHE: OnceLock<Arc<CompiledPatterns>> = OnceLock::new();
    CACHE
        .get_or_init(|| {
            Arc::new(
                CompiledPatterns::from_source(&EnglishPatterns)
                    .expect("built-in English patterns must compile"),
            )
        })
        .clone()
}

/// Compiled built-in patterns for a culture
pub fn patterns_for(culture: Culture) -> Arc<CompiledPatterns> {
    match culture {
        Culture::English => english_patterns(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn english_defs() -> PatternDefinitions {
        EnglishPatterns.definitions()
    }

    #[test]
    fn english_bundle_compiles() {
        let compiled = CompiledPatterns::compile(&english_defs()).unwrap();
        assert_eq!(compiled.typical_deductions.len(), 4);
    }

    #[test]
    fn cache_returns_same_instance() {
        let a = english_patterns();
        let b = english_patterns();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn empty_slot_is_rejected() {
        let mut defs = english_defs();
        defs.area_code_indicator = "   ".to_string();
        let err = CompiledPatterns::compile(&defs).unwrap_err();
        assert!(matches!(err, PatternError::EmptyPattern { ref slot } if slot == "areaCodeIndicator"));
    }

    #[test]
    fn invalid_regex_names_the_slot() {
        let mut defs = english_defs();
        defs.typical_deductions.push("(unclosed".to_string());
        let err = CompiledPatterns::compile(&defs).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("typicalDeductions[4]"), "got: {}", msg);
    }

    #[test]
    fn empty_deduction_list_is_allowed() {
        let mut defs = english_defs();
        defs.typical_deductions.clear();
        let compiled = CompiledPatterns::compile(&defs).unwrap();
        assert!(compiled.typical_deductions.is_empty());
    }

    #[test]
    fn format_indicator_is_case_insensitive() {
        let mut defs = english_defs();
        defs.format_indicator = "ext".to_string();
        let compiled = CompiledPatterns::compile(&defs).unwrap();
        assert!(compiled.format_indicator.is_match("555 EXT 12"));
        // Other slots keep default matching
        defs.country_code = "ext".to_string();
        let compiled = CompiledPatterns::compile(&defs).unwrap();
        assert!(!compiled.country_code.is_match("EXT"));
    }

    #[test]
    fn definitions_deserialize_camel_case() {
        let json = r#"{
            "countryCode": "^\\+\\d",
            "areaCodeIndicator": "\\(",
            "formatIndicator": "-+"
        }"#;
        let defs: PatternDefinitions = serde_json::from_str(json).unwrap();
        assert_eq!(defs.format_indicator, "-+");
        assert!(defs.typical_deductions.is_empty());
    }
}
