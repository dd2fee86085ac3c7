//! Completeness Scorer
//!
//! Scores one step in [0, 1]. Rules, first match wins:
//!
//! 1. Step text present and non-procedural → fixed penalty
//! 2. Required set non-empty → fraction of required parameters that were provided
//! 3. Nothing to check and step text present → higher fallback if the text
//!    seems procedural, else the low one
//! 4. Known action that requires nothing, no text → vacuously complete
//! 5. Unknown action, no text → low fallback
//!
//! Unknown actions have an empty required set, so rules 3 to 5 treat them
//! like known actions that require nothing, except that only a known action
//! can be vacuously complete.
//!
//! The missing-parameter list comes from the registry alone; the text
//! heuristic only caps the score.

use std::collections::HashSet;
use std::sync::Arc;

use reprolint_common::ScoreBasis;

use crate::classifier::ProceduralTextClassifier;
use crate::config::ScoringConfig;
use crate::registry::RequirementsRegistry;

/// A score and the rule that produced it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepScore {
    pub score: f64,
    pub basis: ScoreBasis,
}

/// Combines registry lookups with the text classifier
#[derive(Debug, Clone)]
pub struct CompletenessScorer {
    registry: Arc<RequirementsRegistry>,
    classifier: ProceduralTextClassifier,
    config: ScoringConfig,
}

impl Default for CompletenessScorer {
    fn default() -> Self {
        Self::new(RequirementsRegistry::shared(), ScoringConfig::default())
    }
}

impl CompletenessScorer {
    pub fn new(registry: Arc<RequirementsRegistry>, config: ScoringConfig) -> Self {
        Self {
            registry,
            classifier: ProceduralTextClassifier::new(config.min_descriptive_matches),
            config,
        }
    }

    pub fn registry(&self) -> &RequirementsRegistry {
        &self.registry
    }

    pub fn classifier(&self) -> &ProceduralTextClassifier {
        &self.classifier
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Completeness score for a step
    pub fn score<'a, I>(&self, action: &str, provided: I, raw_text: Option<&str>) -> f64
    where
        I: IntoIterator<Item = &'a str>,
    {
        self.evaluate(action, provided, raw_text).score
    }

    /// Completeness score together with the rule that produced it
    pub fn evaluate<'a, I>(&self, action: &str, provided: I, raw_text: Option<&str>) -> StepScore
    where
        I: IntoIterator<Item = &'a str>,
    {
        let text = raw_text.filter(|t| !t.is_empty());

        if let Some(text) = text {
            if self.classifier.is_non_procedural(text) {
                return StepScore {
                    score: self.config.non_procedural_penalty,
                    basis: ScoreBasis::NonProceduralText,
                };
            }
        }

        let requirement = self.registry.get(action);
        let required = requirement
            .map(|r| &r.required_params)
            .filter(|required| !required.is_empty());

        let Some(required) = required else {
            return match text {
                Some(text) if self.classifier.seems_procedural(text) => StepScore {
                    score: self.config.unrecognized_procedural_score,
                    basis: ScoreBasis::UnrecognizedProcedural,
                },
                None if requirement.is_some() => StepScore {
                    score: self.config.no_requirements_score,
                    basis: ScoreBasis::NoRequirements,
                },
                _ => StepScore {
                    score: self.config.unrecognized_score,
                    basis: ScoreBasis::UnrecognizedAction,
                },
            };
        };

        let provided: HashSet<&str> = provided.into_iter().collect();
        let found = required
            .iter()
            .filter(|param| provided.contains(param.as_str()))
            .count();

        StepScore {
            score: found as f64 / required.len() as f64,
            basis: ScoreBasis::ParameterCoverage,
        }
    }

    /// Required parameters not provided, sorted ascending
    pub fn missing_required<'a, I>(&self, action: &str, provided: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        self.registry.missing_params(action, provided)
    }
}
