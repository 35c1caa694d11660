//! Culture code resolution

use super::{EnglishPatterns, PatternError, PatternSource};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Cultures with a built-in pattern bundle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Culture {
    #[default]
    English,
}

impl Culture {
    /// Culture codes accepted by `from_str` (case-insensitive, `_` or `-`)
    pub fn supported_codes() -> &'static [&'static str] {
        &["en", "en-us", "en-gb", "en-ca", "en-au", "en-in", "english"]
    }

    /// Pattern source for this culture
    pub fn pattern_source(self) -> &'static dyn PatternSource {
        match self {
            Culture::English => &EnglishPatterns,
        }
    }
}

impl FromStr for Culture {
    type Err = PatternError;

    fn from_str(code: &str) -> Result<Self, Self::Err> {
        let normalized = code.trim().to_lowercase().replace('_', "-");
        if Self::supported_codes().contains(&normalized.as_str())
            || normalized.starts_with("en-")
        {
            Ok(Culture::English)
        } else {
            Err(PatternError::UnsupportedCulture(code.to_string()))
        }
    }
}

impl std::fmt::Display for Culture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Culture::English => write!(f, "en-us"),
        }
    }
}
