//! Procedure Analyzer
//!
//! Scores every step of a procedure and aggregates the summary. Holds no state
//! between calls: the same steps always produce the same analysis.

use tracing::debug;

use reprolint_common::{
    display_text, round2, AnalysisReport, AnalysisSummary, ProcedureAnalysis, ProcedureDocument,
    Step, StepAnalysis,
};

use crate::scorer::CompletenessScorer;

/// Per-step scoring plus aggregation
#[derive(Debug, Clone, Default)]
pub struct ProcedureAnalyzer {
    scorer: CompletenessScorer,
}

impl ProcedureAnalyzer {
    pub fn new(scorer: CompletenessScorer) -> Self {
        Self { scorer }
    }

    pub fn scorer(&self) -> &CompletenessScorer {
        &self.scorer
    }

    /// Step verdict plus its unrounded score
    fn analyze_step(&self, step: &Step) -> (StepAnalysis, f64) {
        let names = step.parameter_names();
        let result = self
            .scorer
            .evaluate(&step.action, names.iter().copied(), step.raw_text.as_deref());
        let missing_required = self.scorer.missing_required(&step.action, names.iter().copied());

        debug!(
            step_id = %step.id,
            action = %step.action,
            score = result.score,
            basis = ?result.basis,
            missing = missing_required.len(),
            "Scored step"
        );

        let analysis = StepAnalysis {
            step_id: step.id.clone(),
            action: step.action.clone(),
            raw_text: display_text(step.text()),
            parameters_found: names.iter().map(|name| name.to_string()).collect(),
            is_complete: missing_required.is_empty(),
            missing_required,
            completeness_score: round2(result.score),
            action_recognized: self.scorer.registry().contains(&step.action),
            score_basis: result.basis,
        };
        (analysis, result.score)
    }

    /// Analyze steps in order and aggregate
    pub fn analyze(&self, steps: &[Step]) -> ProcedureAnalysis {
        let (steps, scores): (Vec<StepAnalysis>, Vec<f64>) =
            steps.iter().map(|step| self.analyze_step(step)).unzip();
        let summary = summarize(&steps, &scores);

        debug!(
            total = summary.total_steps,
            complete = summary.complete_steps,
            overall = summary.overall_completeness,
            "Analyzed procedure"
        );

        ProcedureAnalysis { summary, steps }
    }

    /// Analyze a whole document, carrying its source block into the report
    pub fn analyze_document(&self, document: &ProcedureDocument) -> AnalysisReport {
        AnalysisReport::new(self.analyze(&document.steps), document.source.clone())
    }
}

/// `scores` are the unrounded step scores; the mean is rounded once
fn summarize(steps: &[StepAnalysis], scores: &[f64]) -> AnalysisSummary {
    let total_steps = steps.len();
    let complete_steps = steps.iter().filter(|s| s.is_complete).count();
    let total_missing_params = steps.iter().map(|s| s.missing_required.len()).sum();
    let unrecognized_steps = steps.iter().filter(|s| !s.action_recognized).count();

    let (overall_completeness, mean_step_score) = if total_steps == 0 {
        (0.0, 0.0)
    } else {
        let score_sum: f64 = scores.iter().sum();
        (
            complete_steps as f64 / total_steps as f64,
            score_sum / total_steps as f64,
        )
    };

    AnalysisSummary {
        total_steps,
        complete_steps,
        incomplete_steps: total_steps - complete_steps,
        total_missing_params,
        overall_completeness: round2(overall_completeness),
        mean_step_score: round2(mean_step_score),
        unrecognized_steps,
    }
}
