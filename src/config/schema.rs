//! Config schema and deserialization

use crate::patterns::{self, CompiledPatterns, Culture, PatternDefinitions, PatternError};
use serde::Deserialize;
use std::sync::Arc;

/// Per-slot pattern overrides applied on top of the culture's bundle
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternOverrides {
    #[serde(default)]
    pub country_code: Option<String>,
    #[serde(default)]
    pub area_code_indicator: Option<String>,
    #[serde(default)]
    pub format_indicator: Option<String>,
    /// Replaces the whole deduction list when set
    #[serde(default)]
    pub typical_deductions: Option<Vec<String>>,
}

impl PatternOverrides {
    pub fn is_empty(&self) -> bool {
        self.country_code.is_none()
            && self.area_code_indicator.is_none()
            && self.format_indicator.is_none()
            && self.typical_deductions.is_none()
    }

    /// Apply overrides to a base bundle
    pub fn apply(&self, mut defs: PatternDefinitions) -> PatternDefinitions {
        if let Some(ref p) = self.country_code {
            defs.country_code = p.clone();
        }
        if let Some(ref p) = self.area_code_indicator {
            defs.area_code_indicator = p.clone();
        }
        if let Some(ref p) = self.format_indicator {
            defs.format_indicator = p.clone();
        }
        if let Some(ref list) = self.typical_deductions {
            defs.typical_deductions = list.clone();
        }
        defs
    }

    /// Fill unset slots from a base config's overrides (for extends)
    fn merge_from(&mut self, base: PatternOverrides) {
        if self.country_code.is_none() {
            self.country_code = base.country_code;
        }
        if self.area_code_indicator.is_none() {
            self.area_code_indicator = base.area_code_indicator;
        }
        if self.format_indicator.is_none() {
            self.format_indicator = base.format_indicator;
        }
        if self.typical_deductions.is_none() {
            self.typical_deductions = base.typical_deductions;
        }
    }
}

/// Root config structure for .phonescorerc.json
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Extend another config file (path relative to this config)
    #[serde(default)]
    pub extends: Option<String>,

    /// Culture code selecting the built-in pattern bundle. Default: en-us
    #[serde(default)]
    pub culture: Option<String>,

    /// Minimum acceptable score in [0, 1] (exit 1 if any candidate is below)
    #[serde(default)]
    pub threshold: Option<f64>,

    /// Pattern slot overrides
    #[serde(default)]
    pub patterns: PatternOverrides,
}

impl Config {
    /// Merge CLI overrides into config. CLI values take precedence.
    pub fn merge_with_cli(mut self, cli_threshold: Option<f64>, cli_culture: Option<&str>) -> Self {
        if cli_threshold.is_some() {
            self.threshold = cli_threshold;
        }
        if let Some(culture) = cli_culture {
            self.culture = Some(culture.to_string());
        }
        self
    }

    /// Merge another config into this one (for extends)
    pub fn merge_from(&mut self, base: Config) {
        if self.threshold.is_none() {
            self.threshold = base.threshold;
        }
        if self.culture.is_none() {
            self.culture = base.culture;
        }
        if self.extends.is_none() {
            self.extends = base.extends;
        }
        self.patterns.merge_from(base.patterns);
    }

    /// Resolved culture (default English)
    pub fn culture(&self) -> Result<Culture, PatternError> {
        match self.culture.as_deref() {
            Some(code) => code.parse(),
            None => Ok(Culture::default()),
        }
    }

    /// Validate values that serde cannot check
    pub fn validate(&self) -> anyhow::Result<()> {
        if let Some(t) = self.threshold {
            if !(0.0..=1.0).contains(&t) {
                anyhow::bail!("threshold must be between 0 and 1, got {}", t);
            }
        }
        self.culture()?;
        Ok(())
    }

    /// Compile the pattern bundle this config selects.
    /// Without overrides the shared built-in bundle is returned.
    pub fn resolve_patterns(&self) -> Result<Arc<CompiledPatterns>, PatternError> {
        let culture = self.culture()?;
        if self.patterns.is_empty() {
            return Ok(patterns::patterns_for(culture));
        }
        tracing::debug!(%culture, "compiling pattern bundle with config overrides");
        let defs = self.patterns.apply(culture.pattern_source().definitions());
        CompiledPatterns::compile(&defs).map(Arc::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_config() {
        let json = r#"{
            "culture": "en-GB",
            "threshold": 0.6,
            "patterns": {
                "areaCodeIndicator": "\\(0\\d+\\)",
                "typicalDeductions": ["^\\d{6}$"]
            }
        }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.threshold, Some(0.6));
        assert_eq!(config.culture().unwrap(), Culture::English);
        assert!(!config.patterns.is_empty());
        let patterns = config.resolve_patterns().unwrap();
        assert!(patterns.area_code_indicator.is_match("(020) 7946 0958"));
        assert!(!patterns.area_code_indicator.is_match("(555) 123"));
        assert_eq!(patterns.typical_deductions.len(), 1);
    }

    #[test]
    fn no_overrides_uses_shared_bundle() {
        let config = Config::default();
        let a = config.resolve_patterns().unwrap();
        let b = patterns::english_patterns();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn invalid_override_fails() {
        let config = Config {
            patterns: PatternOverrides {
                format_indicator: Some("[".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        let err = config.resolve_patterns().unwrap_err();
        assert!(err.to_string().contains("formatIndicator"));
    }

    #[test]
    fn validate_rejects_out_of_range_threshold() {
        let config = Config {
            threshold: Some(1.5),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_unknown_culture() {
        let config = Config {
            culture: Some("xx".to_string()),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("unsupported culture"));
    }

    #[test]
    fn cli_values_take_precedence() {
        let config = Config {
            threshold: Some(0.4),
            ..Default::default()
        }
        .merge_with_cli(Some(0.7), Some("en-au"));
        assert_eq!(config.threshold, Some(0.7));
        assert_eq!(config.culture.as_deref(), Some("en-au"));
    }

    #[test]
    fn merge_keeps_own_values() {
        let mut child: Config =
            serde_json::from_str(r#"{"threshold": 0.8, "patterns": {"countryCode": "^\\+"}}"#)
                .unwrap();
        let base: Config = serde_json::from_str(
            r#"{"threshold": 0.2, "culture": "en", "patterns": {"countryCode": "^00", "formatIndicator": "-"}}"#,
        )
        .unwrap();
        child.merge_from(base);
        assert_eq!(child.threshold, Some(0.8));
        assert_eq!(child.culture.as_deref(), Some("en"));
        assert_eq!(child.patterns.country_code.as_deref(), Some("^\\+"));
        assert_eq!(child.patterns.format_indicator.as_deref(), Some("-"));
    }
}
