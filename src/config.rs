//! Engine configuration, loaded from `kinship.toml`.
//!
//! Every field has a default, so an empty or missing file yields the
//! stock heuristics.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::error::{KinshipError, Result};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub suggestions: SuggestionConfig,
}

/// Thresholds for the link suggestion heuristics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestionConfig {
    /// Smallest plausible parent/child age gap, in years.
    #[serde(default = "default_min_parent_age_gap_years")]
    pub min_parent_age_gap_years: f64,
    /// Length of a year in days when converting birth date gaps.
    #[serde(default = "default_days_per_year")]
    pub days_per_year: f64,
    /// A surname group with more unlinked pairs than this is collapsed
    /// into a single summary suggestion.
    #[serde(default = "default_same_name_pair_limit")]
    pub same_name_pair_limit: usize,
}

impl Default for SuggestionConfig {
    fn default() -> Self {
        Self {
            min_parent_age_gap_years: default_min_parent_age_gap_years(),
            days_per_year: default_days_per_year(),
            same_name_pair_limit: default_same_name_pair_limit(),
        }
    }
}

fn default_min_parent_age_gap_years() -> f64 {
    12.0
}

fn default_days_per_year() -> f64 {
    365.25
}

fn default_same_name_pair_limit() -> usize {
    5
}

impl EngineConfig {
    /// Load config from a TOML file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse and validate config text.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| KinshipError::Config(e.to_string()))?;
        config.suggestions.validate()?;
        Ok(config)
    }
}

impl SuggestionConfig {
    /// Both thresholds must be finite and strictly positive.
    pub fn validate(&self) -> Result<()> {
        if !self.days_per_year.is_finite() || self.days_per_year <= 0.0 {
            return Err(KinshipError::Config(format!(
                "suggestions.days_per_year must be a positive number, got {}",
                self.days_per_year
            )));
        }
        if !self.min_parent_age_gap_years.is_finite() || self.min_parent_age_gap_years <= 0.0 {
            return Err(KinshipError::Config(format!(
                "suggestions.min_parent_age_gap_years must be a positive number, got {}",
                self.min_parent_age_gap_years
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_match_heuristics() {
        let config = EngineConfig::default();
        assert_eq!(config.suggestions.min_parent_age_gap_years, 12.0);
        assert_eq!(config.suggestions.days_per_year, 365.25);
        assert_eq!(config.suggestions.same_name_pair_limit, 5);
    }

    #[test]
    fn test_partial_toml_keeps_other_defaults() {
        let config = EngineConfig::from_toml(
            r#"
[suggestions]
min_parent_age_gap_years = 14.0
"#,
        )
        .unwrap();
        assert_eq!(config.suggestions.min_parent_age_gap_years, 14.0);
        assert_eq!(config.suggestions.same_name_pair_limit, 5);
    }

    #[test]
    fn test_empty_toml() {
        let config = EngineConfig::from_toml("").unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = EngineConfig::load(&dir.path().join("kinship.toml")).unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kinship.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "[suggestions]\nsame_name_pair_limit = 2").unwrap();

        let config = EngineConfig::load(&path).unwrap();
        assert_eq!(config.suggestions.same_name_pair_limit, 2);
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let result = EngineConfig::from_toml("[suggestions\nbroken");
        assert!(matches!(
            result.unwrap_err(),
            crate::error::KinshipError::Config(_)
        ));
    }

    #[test]
    fn test_non_positive_age_gap_rejected() {
        for value in ["0.0", "-10.0"] {
            let toml = format!("[suggestions]\nmin_parent_age_gap_years = {}", value);
            assert!(matches!(
                EngineConfig::from_toml(&toml).unwrap_err(),
                KinshipError::Config(_)
            ));
        }
    }

    #[test]
    fn test_bad_days_per_year_rejected() {
        for value in ["0.0", "-365.25", "nan", "inf"] {
            let toml = format!("[suggestions]\ndays_per_year = {}", value);
            assert!(
                matches!(EngineConfig::from_toml(&toml), Err(KinshipError::Config(_))),
                "days_per_year = {} accepted",
                value
            );
        }
    }

    #[test]
    fn test_load_rejects_invalid_thresholds() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kinship.toml");
        std::fs::write(&path, "[suggestions]\ndays_per_year = 0.0\n").unwrap();
        assert!(matches!(
            EngineConfig::load(&path).unwrap_err(),
            KinshipError::Config(_)
        ));
    }
}
