//! Scoring engine - runs every rule over a candidate and normalizes the total

use super::{RuleWeights, ScoringRule, STANDARD_RULES};
use crate::patterns::CompiledPatterns;
use crate::{RuleContribution, ScoreBreakdown};

/// Stateless scorer over the standard rule pipeline
#[derive(Debug, Clone, Copy)]
pub struct PhoneNumberScorer {
    weights: RuleWeights,
}

impl PhoneNumberScorer {
    /// Create a scorer with the standard weight table
    pub fn new() -> Self {
        Self {
            weights: RuleWeights::STANDARD,
        }
    }

    pub fn weights(&self) -> &RuleWeights {
        &self.weights
    }

    /// Normalized confidence in [0, 1] that `text` is a phone number
    pub fn score(&self, text: &str, patterns: &CompiledPatterns) -> f64 {
        let raw = self.raw_score(text, patterns, |_, _| {});
        self.weights.normalize(self.weights.clamp(raw))
    }

    /// Score with every rule's contribution recorded
    pub fn explain(&self, text: &str, patterns: &CompiledPatterns) -> ScoreBreakdown {
        let mut contributions = Vec::with_capacity(STANDARD_RULES.len());
        let raw = self.raw_score(text, patterns, |rule, points| {
            contributions.push(RuleContribution {
                rule: rule.rule(),
                points,
            })
        });
        let clamped = self.weights.clamp(raw);

        ScoreBreakdown {
            base: self.weights.base_score,
            contributions,
            raw,
            clamped,
            value: self.weights.normalize(clamped),
        }
    }

    fn raw_score<F>(&self, text: &str, patterns: &CompiledPatterns, mut on_rule: F) -> i32
    where
        F: FnMut(&dyn ScoringRule, i32),
    {
        let mut score = self.weights.base_score;
        for rule in STANDARD_RULES {
            let points = rule.adjust(text, patterns, &self.weights);
            if points != 0 {
                tracing::trace!(rule = %rule.rule(), points, candidate = text, "rule fired");
            }
            score = score.saturating_add(points);
            on_rule(*rule, points);
        }
        score
    }
}

impl Default for PhoneNumberScorer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patterns::english_patterns;
    use crate::Rule;

    fn score(text: &str) -> f64 {
        PhoneNumberScorer::new().score(text, &english_patterns())
    }

    fn explain(text: &str) -> ScoreBreakdown {
        PhoneNumberScorer::new().explain(text, &english_patterns())
    }

    #[test]
    fn empty_text_scores_base() {
        assert_eq!(score(""), 0.3);
        let b = explain("");
        assert_eq!(b.raw, 30);
        assert_eq!(b.fired().count(), 0);
    }

    #[test]
    fn formatted_international_number_beats_bare_digits() {
        let formatted = explain("+1 (555) 123-4567");
        assert_eq!(formatted.points_for(Rule::CodeIndicator), 40);
        assert_eq!(formatted.points_for(Rule::FormatIndicator), 60);
        assert_eq!(formatted.points_for(Rule::DigitLength), 30);
        assert_eq!(formatted.raw, 160);
        assert_eq!(formatted.value, 1.0);

        let bare = explain("5551234567");
        assert_eq!(bare.raw, 50);
        assert_eq!(bare.value, 0.5);
        assert!(formatted.value > bare.value);
    }

    #[test]
    fn repeated_digits_score_below_bare_number() {
        let repeated = explain("11111111111");
        assert_eq!(repeated.points_for(Rule::TailSameDigit), -90);
        assert_eq!(repeated.raw, -30);
        assert_eq!(repeated.clamped, 0);
        assert!(score("11111111111") < score("5551234567"));
    }

    #[test]
    fn parenthesized_area_code_vs_spaced() {
        // Area-code indicator and two single-char separators
        let parens = explain("(555) 123-4567");
        assert_eq!(parens.raw, 120);
        let spaced = explain("555 123 4567");
        assert_eq!(spaced.raw, 90);
        assert!(parens.value > spaced.value);
    }

    #[test]
    fn pure_digit_penalty_boundary() {
        let eleven = explain("12345678901");
        let twelve = explain("123456789012");
        assert_eq!(eleven.raw, 60);
        assert_eq!(twelve.raw, 50);
        assert_eq!(eleven.raw - twelve.raw, RuleWeights::STANDARD.length_award);
    }

    #[test]
    fn tail_same_boundary() {
        let two = explain("555 123 4577");
        let three = explain("555 123 4777");
        assert_eq!(two.raw - three.raw, RuleWeights::STANDARD.tail_same_deduction_score);
    }

    #[test]
    fn format_bonus_capped_at_three() {
        let three = explain("12-34-56-7890");
        let four = explain("12-34-56-78-90");
        let five = explain("12-34-56-78-9-0");
        assert_eq!(three.raw, 110);
        assert_eq!(four.raw, three.raw);
        assert_eq!(five.raw, three.raw);
    }

    #[test]
    fn ssn_shape_is_penalized() {
        let ssn = explain("123-45-6789");
        assert_eq!(ssn.points_for(Rule::TypicalFormat), -40);
        assert_eq!(ssn.raw, 40);
        assert!(score("123-45-6789") < score("555-123-4567"));
    }

    #[test]
    fn extra_digit_runs_are_penalized() {
        let b = explain("12345 67890 12345");
        assert_eq!(b.points_for(Rule::ContinuousDigitRun), -20);
        assert_eq!(b.raw, 80);
    }

    #[test]
    fn short_digit_run_scores_zero() {
        assert_eq!(explain("12345").raw, 0);
        assert_eq!(score("123"), 0.0);
    }

    #[test]
    fn explain_matches_score() {
        for text in ["", "+44 20 7946 0958", "0044 20 7946 0958", "abc", "2021-03-15", "555.123.4567"] {
            assert_eq!(explain(text).value.to_bits(), score(text).to_bits(), "{}", text);
        }
    }

    #[test]
    fn breakdown_lists_every_rule_in_order() {
        let b = explain("555-123-4567");
        assert_eq!(b.contributions.len(), STANDARD_RULES.len());
        assert_eq!(b.contributions[0].rule, Rule::CodeIndicator);
        assert_eq!(b.contributions[6].rule, Rule::ContinuousDigitRun);
        let sum: i32 = b.contributions.iter().map(|c| c.points).sum();
        assert_eq!(b.base + sum, b.raw);
    }
}

#[cfg(test)]
mod proptest_tests {
    use super::*;
    use crate::patterns::english_patterns;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(300))]

        #[test]
        fn score_is_within_unit_range(text in "\\PC{0,40}") {
            let s = PhoneNumberScorer::new().score(&text, &english_patterns());
            prop_assert!((0.0..=1.0).contains(&s));
        }

        #[test]
        fn phone_like_score_is_within_unit_range(text in "[+(]?[0-9 ()./-]{0,30}") {
            let s = PhoneNumberScorer::new().score(&text, &english_patterns());
            prop_assert!((0.0..=1.0).contains(&s));
        }

        #[test]
        fn score_is_deterministic(text in "[0-9a-z +()./-]{0,30}") {
            let scorer = PhoneNumberScorer::new();
            let patterns = english_patterns();
            let first = scorer.score(&text, &patterns);
            let second = scorer.score(&text, &patterns);
            prop_assert_eq!(first.to_bits(), second.to_bits());
        }

        #[test]
        fn extra_format_indicators_never_raise_score(groups in 4usize..8) {
            // Same ten digits, three separators vs `groups` separators
            let digits = "1357924680";
            let base = format!("{}-{}-{}-{}", &digits[..2], &digits[2..4], &digits[4..6], &digits[6..]);
            let mut split = String::new();
            for (i, c) in digits.chars().enumerate() {
                if i > 0 && i <= groups {
                    split.push('-');
                }
                split.push(c);
            }
            let scorer = PhoneNumberScorer::new();
            let patterns = english_patterns();
            prop_assert!(scorer.explain(&split, &patterns).raw <= scorer.explain(&base, &patterns).raw);
        }
    }
}
