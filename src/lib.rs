//! Phonescore: confidence scoring for phone-number candidates
//!
//! Extractors over-generate phone-number candidates from permissive patterns.
//! This library ranks those candidates with a fixed battery of heuristic
//! rules and returns a normalized confidence in `[0, 1]`.

pub mod config;
pub mod logging;
pub mod parser;
pub mod patterns;
pub mod reporter;
pub mod scorer;

pub use parser::{ExtractResult, ParseResult, Parser, PhoneNumberParser};
pub use patterns::{CompiledPatterns, Culture, PatternDefinitions, PatternError, PatternSource};
pub use scorer::{PhoneNumberScorer, RuleWeights};

use serde::{Deserialize, Serialize};

/// Type name carried by phone-number extract and parse results
pub const PHONE_NUMBER_TYPE: &str = "phonenumber";

/// Scoring rules, in the order they are applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Rule {
    /// Country code present, or failing that an area-code indicator
    CodeIndicator,
    /// Formatting separators (bonus, with a penalty for multi-char runs)
    FormatIndicator,
    /// Digit count relative to the expected baseline
    DigitLength,
    /// Same digit repeated at the end
    TailSameDigit,
    /// Unformatted pure-digit string that is too long
    PureDigitLength,
    /// Matches a known non-phone shape (dates, ZIP+4, ...)
    TypicalFormat,
    /// More than one long run of consecutive digits
    ContinuousDigitRun,
}

impl Rule {
    /// Short human description used by reporters
    pub fn description(&self) -> &'static str {
        match self {
            Rule::CodeIndicator => "Country or area code indicator",
            Rule::FormatIndicator => "Format indicators",
            Rule::DigitLength => "Digit count",
            Rule::TailSameDigit => "Repeated trailing digit",
            Rule::PureDigitLength => "Long unformatted digit string",
            Rule::TypicalFormat => "Known non-phone shape",
            Rule::ContinuousDigitRun => "Extra long digit runs",
        }
    }
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rule::CodeIndicator => write!(f, "code-indicator"),
            Rule::FormatIndicator => write!(f, "format-indicator"),
            Rule::DigitLength => write!(f, "digit-length"),
            Rule::TailSameDigit => write!(f, "tail-same-digit"),
            Rule::PureDigitLength => write!(f, "pure-digit-length"),
            Rule::TypicalFormat => write!(f, "typical-format"),
            Rule::ContinuousDigitRun => write!(f, "continuous-digit-run"),
        }
    }
}

/// Signed point adjustment a single rule made to the running score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleContribution {
    pub rule: Rule,
    pub points: i32,
}

/// Transparent breakdown of one scoring run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    /// Starting score before any rule fires
    pub base: i32,
    /// Adjustments in rule order (zero contributions included)
    pub contributions: Vec<RuleContribution>,
    /// Accumulated score before clamping
    pub raw: i32,
    /// Raw score clamped to the score limits
    pub clamped: i32,
    /// Normalized confidence in [0, 1]
    pub value: f64,
}

impl ScoreBreakdown {
    /// Points contributed by a given rule
    pub fn points_for(&self, rule: Rule) -> i32 {
        self.contributions
            .iter()
            .filter(|c| c.rule == rule)
            .map(|c| c.points)
            .sum()
    }

    /// Contributions that actually moved the score
    pub fn fired(&self) -> impl Iterator<Item = &RuleContribution> {
        self.contributions.iter().filter(|c| c.points != 0)
    }
}

/// One scored candidate as reported by the CLI
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateReport {
    #[serde(flatten)]
    pub result: ParseResult,
    /// Per-rule breakdown (only with --explain)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<ScoreBreakdown>,
}

impl CandidateReport {
    /// Score of the candidate (0 when the parser produced no value)
    pub fn score(&self) -> f64 {
        self.result.value.unwrap_or(0.0)
    }
}

/// Aggregate numbers over a batch of scored candidates
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchSummary {
    pub candidates: usize,
    pub mean_score: f64,
    pub below_threshold: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threshold: Option<f64>,
}

impl BatchSummary {
    pub fn from_reports(reports: &[CandidateReport], threshold: Option<f64>) -> Self {
        let candidates = reports.len();
        let mean_score = if candidates == 0 {
            0.0
        } else {
            reports.iter().map(CandidateReport::score).sum::<f64>() / candidates as f64
        };
        let below_threshold = threshold
            .map(|t| reports.iter().filter(|r| r.score() < t).count())
            .unwrap_or(0);
        Self {
            candidates,
            mean_score,
            below_threshold,
            threshold,
        }
    }
}
