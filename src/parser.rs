//! Recognizer-facing parser: wraps the scorer in the extract/parse contract
//! shared by every recognizer in a text-recognition pipeline.

use crate::patterns::{self, CompiledPatterns, Culture};
use crate::scorer::PhoneNumberScorer;
use crate::{CandidateReport, ScoreBreakdown, PHONE_NUMBER_TYPE};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A candidate span produced by an extractor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractResult {
    /// Offset of the span in the source text (in chars)
    pub start: usize,
    /// Length of the span (in chars)
    pub length: usize,
    /// Surface text of the span
    pub text: String,
    #[serde(rename = "type")]
    pub type_name: String,
}

impl ExtractResult {
    /// Standalone candidate (no surrounding source text)
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            start: 0,
            length: text.chars().count(),
            text,
            type_name: PHONE_NUMBER_TYPE.to_string(),
        }
    }

    /// Candidate found at a char offset inside a larger text
    pub fn at(start: usize, text: impl Into<String>) -> Self {
        Self {
            start,
            ..Self::new(text)
        }
    }
}

/// Typed result handed back to callers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseResult {
    pub start: usize,
    pub length: usize,
    pub text: String,
    #[serde(rename = "type")]
    pub type_name: String,
    /// Parsed value (the confidence score for phone numbers)
    pub value: Option<f64>,
    /// Resolution string (the candidate text, echoed)
    pub resolution_str: Option<String>,
}

impl ParseResult {
    /// Empty result carrying the span of an extract result
    pub fn from_extract(source: &ExtractResult) -> Self {
        Self {
            start: source.start,
            length: source.length,
            text: source.text.clone(),
            type_name: source.type_name.clone(),
            value: None,
            resolution_str: None,
        }
    }
}

/// Trait for recognizers that turn an extracted span into a typed result
pub trait Parser {
    fn parse(&self, source: &ExtractResult) -> ParseResult;
}

/// Parser that resolves phone-number candidates to a confidence score
#[derive(Debug, Clone)]
pub struct PhoneNumberParser {
    patterns: Arc<CompiledPatterns>,
    scorer: PhoneNumberScorer,
}

impl PhoneNumberParser {
    /// Parser with the built-in English patterns
    pub fn new() -> Self {
        Self::for_culture(Culture::English)
    }

    /// Parser with the built-in patterns for a culture
    pub fn for_culture(culture: Culture) -> Self {
        Self::with_patterns(patterns::patterns_for(culture))
    }

    /// Parser over an already-compiled pattern bundle
    pub fn with_patterns(patterns: Arc<CompiledPatterns>) -> Self {
        Self {
            patterns,
            scorer: PhoneNumberScorer::new(),
        }
    }

    pub fn patterns(&self) -> &CompiledPatterns {
        &self.patterns
    }

    /// Confidence score for a bare candidate text
    pub fn score(&self, text: &str) -> f64 {
        self.scorer.score(text, &self.patterns)
    }

    /// Per-rule breakdown for a bare candidate text
    pub fn explain(&self, text: &str) -> ScoreBreakdown {
        self.scorer.explain(text, &self.patterns)
    }

    /// Parse many candidates in parallel; output order matches input order
    pub fn parse_batch(&self, sources: &[ExtractResult]) -> Vec<ParseResult> {
        sources.par_iter().map(|s| self.parse(s)).collect()
    }

    /// Parse many candidates in parallel, optionally with breakdowns.
    ///
    /// Each candidate is scored once: with `explain`, the result's value is
    /// taken from its breakdown.
    pub fn report_batch(&self, sources: &[ExtractResult], explain: bool) -> Vec<CandidateReport> {
        sources
            .par_iter()
            .map(|source| {
                if !explain {
                    return CandidateReport {
                        result: self.parse(source),
                        breakdown: None,
                    };
                }
                let breakdown = self.explain(&source.text);
                let mut result = ParseResult::from_extract(source);
                result.resolution_str = Some(source.text.clone());
                result.value = Some(breakdown.value);
                CandidateReport {
                    result,
                    breakdown: Some(breakdown),
                }
            })
            .collect()
    }
}

impl Default for PhoneNumberParser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser for PhoneNumberParser {
    fn parse(&self, source: &ExtractResult) -> ParseResult {
        let mut result = ParseResult::from_extract(source);
        result.resolution_str = Some(source.text.clone());
        result.value = Some(self.score(&source.text));
        result
    }
}
