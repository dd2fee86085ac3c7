//! Completeness reports
//!
//! These types are the stable contract between the scoring core and its
//! presentation layers. Every aggregate a renderer needs is computed here once;
//! CLI tables and HTTP responses only format it.

use serde::{Deserialize, Serialize};

use super::procedure::SourceInfo;
use crate::{DISPLAY_TEXT_LIMIT, TRUNCATION_MARKER};

/// Which scoring rule produced a step's score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBasis {
    /// Fraction of required parameters present (recognized action)
    ParameterCoverage,
    /// Recognized action that requires nothing, no step text
    NoRequirements,
    /// Step text reads as background or review prose
    NonProceduralText,
    /// No required parameters to check (unknown action, or a known one
    /// requiring nothing), but the text looks like an instruction
    UnrecognizedProcedural,
    /// Unknown action, or no required parameters to check, and no procedural
    /// signal in the text
    UnrecognizedAction,
}

/// Completeness verdict for one step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepAnalysis {
    pub step_id: String,
    pub action: String,

    /// Display text: the first characters of the raw text, marked when truncated
    pub raw_text: String,

    /// Provided parameter names, sorted and de-duplicated
    pub parameters_found: Vec<String>,

    /// Required parameters not provided, sorted ascending
    pub missing_required: Vec<String>,

    /// Score in [0, 1], rounded to two decimals
    pub completeness_score: f64,

    /// True iff nothing required is missing
    pub is_complete: bool,

    /// Whether `action` is a registered action type
    pub action_recognized: bool,

    pub score_basis: ScoreBasis,
}

/// Aggregate figures for a procedure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSummary {
    pub total_steps: usize,
    pub complete_steps: usize,
    pub incomplete_steps: usize,
    pub total_missing_params: usize,

    /// complete_steps / total_steps, 0 for an empty procedure
    pub overall_completeness: f64,

    /// Mean of the per-step scores, 0 for an empty procedure
    pub mean_step_score: f64,

    /// Steps whose action is not in the registry
    pub unrecognized_steps: usize,
}

/// Summary plus per-step verdicts, in the original step order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProcedureAnalysis {
    pub summary: AnalysisSummary,
    pub steps: Vec<StepAnalysis>,
}

impl ProcedureAnalysis {
    /// Incomplete steps, most missing parameters first
    ///
    /// Returns a re-sorted copy; `self.steps` keeps the procedure order. Ties
    /// keep their procedure order.
    pub fn steps_needing_attention(&self, limit: usize) -> Vec<&StepAnalysis> {
        let mut incomplete: Vec<&StepAnalysis> =
            self.steps.iter().filter(|s| !s.is_complete).collect();
        incomplete.sort_by(|a, b| b.missing_required.len().cmp(&a.missing_required.len()));
        incomplete.truncate(limit);
        incomplete
    }

    /// Steps that need a human to re-classify the action
    pub fn unrecognized(&self) -> impl Iterator<Item = &StepAnalysis> {
        self.steps.iter().filter(|s| !s.action_recognized)
    }
}

/// The JSON report handed to presentation layers
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub summary: AnalysisSummary,
    pub steps: Vec<StepAnalysis>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<SourceInfo>,
}

impl AnalysisReport {
    pub fn new(analysis: ProcedureAnalysis, source: Option<SourceInfo>) -> Self {
        Self {
            summary: analysis.summary,
            steps: analysis.steps,
            source,
        }
    }
}

/// Round to two decimals for display
#[inline]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Truncate text to the display limit, on character boundaries
pub fn display_text(text: &str) -> String {
    display_text_with_limit(text, DISPLAY_TEXT_LIMIT)
}

/// Truncate text to `limit` characters, appending the marker only when something was cut
pub fn display_text_with_limit(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((cut, _)) => format!("{}{}", &text[..cut], TRUNCATION_MARKER),
        None => text.to_string(),
    }
}
