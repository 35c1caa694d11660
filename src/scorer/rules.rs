//! Feature rules applied to a candidate, in a fixed order.
//!
//! Each rule inspects the candidate text on its own and returns a signed
//! point adjustment. No rule reads another rule's outcome.

use super::RuleWeights;
use crate::patterns::CompiledPatterns;
use crate::Rule;
use regex::Regex;
use std::sync::OnceLock;

/// Longest trailing same-digit run that is counted (one digit plus up to ten repeats)
const TAIL_RUN_MATCH_CAP: usize = 11;

/// Trait for scoring rules
pub trait ScoringRule: Send + Sync {
    /// Which rule this is
    fn rule(&self) -> Rule;

    /// Signed points this rule adds to the running score
    fn adjust(&self, text: &str, patterns: &CompiledPatterns, weights: &RuleWeights) -> i32;
}

/// Rules in application order
pub const STANDARD_RULES: &[&dyn ScoringRule] = &[
    &CodeIndicatorRule,
    &FormatIndicatorRule,
    &DigitLengthRule,
    &TailSameDigitRule,
    &PureDigitLengthRule,
    &TypicalFormatRule,
    &ContinuousDigitRunRule,
];

fn digit_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\d").unwrap())
}

// End anchors also accept one trailing newline before the end of text
fn trailing_digits_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\d+)\n?\z").unwrap())
}

fn pure_digit_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d*\n?\z").unwrap())
}

fn continue_digit_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\d{5}\d*").unwrap())
}

fn saturating_i32(n: usize) -> i32 {
    i32::try_from(n).unwrap_or(i32::MAX)
}

/// `units * per_unit` points taken off, saturating instead of wrapping
fn deduction(units: i32, per_unit: i32) -> i32 {
    -units.max(0).saturating_mul(per_unit)
}

/// Country code bonus, else area-code indicator bonus
pub struct CodeIndicatorRule;

impl ScoringRule for CodeIndicatorRule {
    fn rule(&self) -> Rule {
        Rule::CodeIndicator
    }

    fn adjust(&self, text: &str, patterns: &CompiledPatterns, weights: &RuleWeights) -> i32 {
        if patterns.country_code.is_match(text) {
            weights.country_code_award
        } else if patterns.area_code_indicator.is_match(text) {
            weights.area_code_award
        } else {
            0
        }
    }
}

/// Bonus per format indicator (capped), minus a one-off penalty for multi-char runs
pub struct FormatIndicatorRule;

impl ScoringRule for FormatIndicatorRule {
    fn rule(&self) -> Rule {
        Rule::FormatIndicator
    }

    fn adjust(&self, text: &str, patterns: &CompiledPatterns, weights: &RuleWeights) -> i32 {
        let mut count = 0usize;
        let mut has_multi_char = false;
        for m in patterns.format_indicator.find_iter(text) {
            count += 1;
            if m.as_str().chars().count() > 1 {
                has_multi_char = true;
            }
        }

        let mut points =
            saturating_i32(count).min(weights.max_format_indicator_num) * weights.formatted_award;
        if has_multi_char {
            points -= weights.continue_format_indicator_deduction_score;
        }
        points
    }
}

/// Bonus (or deduction) for digit count relative to the baseline
pub struct DigitLengthRule;

impl ScoringRule for DigitLengthRule {
    fn rule(&self) -> Rule {
        Rule::DigitLength
    }

    fn adjust(&self, text: &str, _patterns: &CompiledPatterns, weights: &RuleWeights) -> i32 {
        let digits = saturating_i32(digit_regex().find_iter(text).count());
        if digits == 0 {
            return 0;
        }
        // Not floored: short candidates go negative here
        (digits - weights.phone_number_length_base).min(weights.max_length_award_num)
            * weights.length_award
    }
}

/// Deduction for the same digit repeated three or more times at the very end
pub struct TailSameDigitRule;

impl TailSameDigitRule {
    /// Length of the counted trailing run of one repeated digit (0 if none)
    fn tail_run_len(text: &str) -> usize {
        let Some(m) = trailing_digits_regex()
            .captures(text)
            .and_then(|caps| caps.get(1))
        else {
            return 0;
        };
        let mut chars = m.as_str().chars().rev();
        let Some(last) = chars.next() else {
            return 0;
        };
        let run = 1 + chars.take_while(|&c| c == last).count();
        if run < 3 {
            0
        } else {
            run.min(TAIL_RUN_MATCH_CAP)
        }
    }
}

impl ScoringRule for TailSameDigitRule {
    fn rule(&self) -> Rule {
        Rule::TailSameDigit
    }

    fn adjust(&self, text: &str, _patterns: &CompiledPatterns, weights: &RuleWeights) -> i32 {
        match Self::tail_run_len(text) {
            0 => 0,
            run => deduction(
                saturating_i32(run) - weights.tail_same_limit,
                weights.tail_same_deduction_score,
            ),
        }
    }
}

/// Deduction for an unformatted digit-only string longer than the limit
pub struct PureDigitLengthRule;

impl ScoringRule for PureDigitLengthRule {
    fn rule(&self) -> Rule {
        Rule::PureDigitLength
    }

    fn adjust(&self, text: &str, _patterns: &CompiledPatterns, weights: &RuleWeights) -> i32 {
        if !pure_digit_regex().is_match(text) {
            return 0;
        }
        // Length of the whole text, trailing newline included
        Self::penalty_for_len(text.chars().count(), weights)
    }
}

impl PureDigitLengthRule {
    fn penalty_for_len(len: usize, weights: &RuleWeights) -> i32 {
        let excess = saturating_i32(len).saturating_sub(weights.pure_digit_length_limit);
        deduction(excess, weights.length_award)
    }
}

/// One-off deduction when the text matches a known non-phone shape
pub struct TypicalFormatRule;

impl ScoringRule for TypicalFormatRule {
    fn rule(&self) -> Rule {
        Rule::TypicalFormat
    }

    fn adjust(&self, text: &str, patterns: &CompiledPatterns, weights: &RuleWeights) -> i32 {
        if patterns.typical_deductions.iter().any(|re| re.is_match(text)) {
            -weights.typical_format_deduction_score
        } else {
            0
        }
    }
}

/// Deduction for every long digit run after the first
pub struct ContinuousDigitRunRule;

impl ScoringRule for ContinuousDigitRunRule {
    fn rule(&self) -> Rule {
        Rule::ContinuousDigitRun
    }

    fn adjust(&self, text: &str, _patterns: &CompiledPatterns, weights: &RuleWeights) -> i32 {
        let runs = continue_digit_regex().find_iter(text).count();
        Self::penalty_for_runs(runs, weights)
    }
}

impl ContinuousDigitRunRule {
    fn penalty_for_runs(runs: usize, weights: &RuleWeights) -> i32 {
        deduction(
            saturating_i32(runs).saturating_sub(1),
            weights.continue_digit_deduction_score,
        )
    }
}
