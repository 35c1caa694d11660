//! Fixed rule weight table

/// Named point values and limits used by the scoring rules.
///
/// These are configuration, not learned parameters. Changing any of them
/// changes scores for every candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleWeights {
    /// Clamp ceiling for the raw score
    pub score_upper_limit: i32,
    /// Clamp floor for the raw score
    pub score_lower_limit: i32,
    /// Starting score
    pub base_score: i32,
    pub country_code_award: i32,
    pub area_code_award: i32,
    /// Per counted format indicator
    pub formatted_award: i32,
    /// Per extra digit, and per excess character of a long pure-digit string
    pub length_award: i32,
    pub typical_format_deduction_score: i32,
    /// Per extra run of five or more consecutive digits
    pub continue_digit_deduction_score: i32,
    /// Per repeated trailing digit beyond `tail_same_limit`
    pub tail_same_deduction_score: i32,
    /// Applied once when any format indicator match is longer than one char
    pub continue_format_indicator_deduction_score: i32,
    pub max_format_indicator_num: i32,
    pub max_length_award_num: i32,
    pub tail_same_limit: i32,
    /// Expected baseline digit count
    pub phone_number_length_base: i32,
    /// Longest unformatted digit string tolerated without penalty
    pub pure_digit_length_limit: i32,
}

impl RuleWeights {
    pub const STANDARD: RuleWeights = RuleWeights {
        score_upper_limit: 100,
        score_lower_limit: 0,
        base_score: 30,
        country_code_award: 40,
        area_code_award: 30,
        formatted_award: 20,
        length_award: 10,
        typical_format_deduction_score: 40,
        continue_digit_deduction_score: 10,
        tail_same_deduction_score: 10,
        continue_format_indicator_deduction_score: 20,
        max_format_indicator_num: 3,
        max_length_award_num: 3,
        tail_same_limit: 2,
        phone_number_length_base: 8,
        pure_digit_length_limit: 11,
    };

    /// Clamp a raw score into the score limits
    pub fn clamp(&self, raw: i32) -> i32 {
        raw.min(self.score_upper_limit).max(self.score_lower_limit)
    }

    /// Map a clamped score onto [0, 1]
    pub fn normalize(&self, clamped: i32) -> f64 {
        clamped as f64 / (self.score_upper_limit - self.score_lower_limit) as f64
    }
}

impl Default for RuleWeights {
    fn default() -> Self {
        Self::STANDARD
    }
}
