//! English pattern bundle

use super::{PatternDefinitions, PatternSource};

/// `+1`, `+ 44`, `0044`, or the same wrapped in parentheses, at the start
const COUNTRY_CODE: &str = r"^(\(\s?(\+\s?|00)\d{1,3}\s?\)|(\+\s?|00)\d{1,3})";

const AREA_CODE_INDICATOR: &str = r"\(";

/// Whitespace, hyphen, slash and dot separators (runs count as one match)
const FORMAT_INDICATOR: &str = r"(\s|-|/|\.)+";

const TYPICAL_DEDUCTIONS: &[&str] = &[
    // 123-45-6789 (SSN)
    r"^\d{3}-\d{2}-\d{4}\n?\z",
    // 12345-6789 (ZIP+4)
    r"^\d{5}-\d{4}\n?\z",
    // 2021-03-15, 2021/3/15
    r"^\d{4}[-/.]\d{1,2}[-/.]\d{1,2}\n?\z",
    // 15/03/2021, 3-15-2021
    r"^\d{1,2}[-/.]\d{1,2}[-/.]\d{4}\n?\z",
];

/// Pattern bundle for English text
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishPatterns;

impl PatternSource for EnglishPatterns {
    fn name(&self) -> &'static str {
        "english"
    }

    fn definitions(&self) -> PatternDefinitions {
        PatternDefinitions {
            country_code: COUNTRY_CODE.to_string(),
            area_code_indicator: AREA_CODE_INDICATOR.to_string(),
            format_indicator: FORMAT_INDICATOR.to_string(),
            typical_deductions: TYPICAL_DEDUCTIONS.iter().map(|p| p.to_string()).collect(),
        }
    }
}
