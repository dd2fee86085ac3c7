//! Scoring configuration
//!
//! The heuristic constants of the scorer. They have no derivation beyond
//! calibration against real Methods sections, so they are settings rather
//! than literals.

use serde::{Deserialize, Serialize};

use reprolint_common::{ReprolintError, Result};

/// Calibration constants for [`crate::CompletenessScorer`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Score for step text that reads as background prose
    pub non_procedural_penalty: f64,
    /// Score when no required parameters apply and the text looks like an instruction
    pub unrecognized_procedural_score: f64,
    /// Score when no required parameters apply and nothing signals an instruction
    pub unrecognized_score: f64,
    /// Score for a known action that requires nothing, given no step text
    pub no_requirements_score: f64,
    /// Descriptive phrases needed before text counts as background
    pub min_descriptive_matches: usize,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            non_procedural_penalty: crate::DEFAULT_NON_PROCEDURAL_PENALTY,
            unrecognized_procedural_score: crate::DEFAULT_UNRECOGNIZED_PROCEDURAL_SCORE,
            unrecognized_score: crate::DEFAULT_UNRECOGNIZED_SCORE,
            no_requirements_score: crate::DEFAULT_NO_REQUIREMENTS_SCORE,
            min_descriptive_matches: crate::DEFAULT_MIN_DESCRIPTIVE_MATCHES,
        }
    }
}

impl ScoringConfig {
    /// Reject scores outside [0, 1] and a zero match threshold
    pub fn validate(&self) -> Result<()> {
        let scores = [
            ("non_procedural_penalty", self.non_procedural_penalty),
            ("unrecognized_procedural_score", self.unrecognized_procedural_score),
            ("unrecognized_score", self.unrecognized_score),
            ("no_requirements_score", self.no_requirements_score),
        ];
        for (name, value) in scores {
            if !(0.0..=1.0).contains(&value) {
                return Err(ReprolintError::Config(format!(
                    "scoring.{name} must be within [0, 1], got {value}"
                )));
            }
        }
        if self.min_descriptive_matches == 0 {
            return Err(ReprolintError::Config(
                "scoring.min_descriptive_matches must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = ScoringConfig::default();
        config.validate().unwrap();
        assert_eq!(config.non_procedural_penalty, 0.1);
        assert_eq!(config.unrecognized_procedural_score, 0.3);
        assert_eq!(config.unrecognized_score, 0.1);
        assert_eq!(config.no_requirements_score, 1.0);
        assert_eq!(config.min_descriptive_matches, 2);
    }

    #[test]
    fn test_out_of_range_score_rejected() {
        let config = ScoringConfig {
            unrecognized_procedural_score: 1.5,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("unrecognized_procedural_score"));

        let config = ScoringConfig {
            non_procedural_penalty: f64::NAN,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_threshold_rejected() {
        let config = ScoringConfig {
            min_descriptive_matches: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: ScoringConfig = serde_json::from_str(r#"{"unrecognized_score": 0.05}"#).unwrap();
        assert_eq!(config.unrecognized_score, 0.05);
        assert_eq!(config.non_procedural_penalty, 0.1);
    }
}
