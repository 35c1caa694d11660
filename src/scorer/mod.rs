//! Phone-number confidence scoring

pub mod engine;
pub mod rules;
mod weights;

pub use engine::PhoneNumberScorer;
pub use rules::{ScoringRule, STANDARD_RULES};
pub use weights::RuleWeights;
