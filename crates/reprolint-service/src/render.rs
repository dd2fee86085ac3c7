//! Terminal rendering for analysis results

use std::fmt::Write;

use colored::{ColoredString, Colorize};

use reprolint_common::{AnalysisSummary, ProcedureAnalysis, StepAnalysis};
use reprolint_scoring::{ActionRequirement, RequirementsRegistry, StepScore};

const STEP_WIDTH: usize = 12;
const ACTION_WIDTH: usize = 15;
const SCORE_WIDTH: usize = 7;

/// Whole-number percentage, e.g. `0.33` → `"33%"`
pub fn percent(score: f64) -> String {
    format!("{:.0}%", score * 100.0)
}

fn colored_score(score: f64, text: String) -> ColoredString {
    if score >= 1.0 {
        text.green()
    } else if score >= 0.5 {
        text.yellow()
    } else {
        text.red()
    }
}

/// Summary block
pub fn render_summary(summary: &AnalysisSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", "Procedure Analysis Summary".bold());
    let _ = writeln!(out, "  {} {}", "Total Steps:".bold(), summary.total_steps);
    let _ = writeln!(out, "  {} {}", "Complete:".green().bold(), summary.complete_steps);
    let _ = writeln!(out, "  {} {}", "Incomplete:".yellow().bold(), summary.incomplete_steps);
    let _ = writeln!(
        out,
        "  {} {}",
        "Missing Parameters:".red().bold(),
        summary.total_missing_params
    );
    let _ = writeln!(
        out,
        "  {} {}",
        "Completeness:".bold(),
        percent(summary.overall_completeness)
    );
    let _ = writeln!(
        out,
        "  {} {}",
        "Mean Step Score:".bold(),
        percent(summary.mean_step_score)
    );
    if summary.unrecognized_steps > 0 {
        let _ = writeln!(
            out,
            "  {} {}",
            "Unrecognized Actions:".magenta().bold(),
            summary.unrecognized_steps
        );
    }
    out
}

/// One row per step: id, action, score, missing parameters
pub fn render_step_table(steps: &[StepAnalysis]) -> String {
    let mut out = String::new();
    let header = format!(
        "{:<STEP_WIDTH$} {:<ACTION_WIDTH$} {:>SCORE_WIDTH$}  {}",
        "Step", "Action", "Score", "Missing Parameters"
    );
    let _ = writeln!(out, "{}", header.magenta().bold());

    for step in steps {
        let score = format!("{:>SCORE_WIDTH$}", percent(step.completeness_score));
        let missing = if !step.action_recognized {
            "? Unrecognized action".magenta()
        } else if step.missing_required.is_empty() {
            "✓ Complete".green()
        } else {
            step.missing_required.join(", ").normal()
        };

        let _ = writeln!(
            out,
            "{} {} {}  {}",
            format!("{:<STEP_WIDTH$}", step.step_id).cyan(),
            format!("{:<ACTION_WIDTH$}", step.action).blue(),
            colored_score(step.completeness_score, score),
            missing
        );
    }
    out
}

/// Incomplete steps, most missing parameters first, at most `limit`
pub fn render_attention(analysis: &ProcedureAnalysis, limit: usize) -> String {
    let steps = analysis.steps_needing_attention(limit);
    if steps.is_empty() {
        return String::new();
    }

    let mut out = String::new();
    let _ = writeln!(out, "{}", "⚠ Steps Needing Attention:".yellow().bold());
    for step in steps {
        let _ = writeln!(out);
        let _ = writeln!(out, "{} ({})", step.step_id.cyan(), step.action);
        let _ = writeln!(out, "  Text: {}", step.raw_text);
        let _ = writeln!(out, "  Missing:");
        for param in &step.missing_required {
            let _ = writeln!(out, "    • {param}");
        }
    }
    out
}

/// Summary, table and attention list
pub fn render_analysis(analysis: &ProcedureAnalysis, attention_limit: usize) -> String {
    let mut out = render_summary(&analysis.summary);
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", "Step-by-Step Analysis:".bold());
    out.push_str(&render_step_table(&analysis.steps));

    let attention = render_attention(analysis, attention_limit);
    if !attention.is_empty() {
        let _ = writeln!(out);
        out.push_str(&attention);
    }
    out
}

/// One action's requirements
pub fn render_requirement(requirement: &ActionRequirement) -> String {
    let join = |params: &std::collections::BTreeSet<String>| {
        if params.is_empty() {
            "-".to_string()
        } else {
            params.iter().map(String::as_str).collect::<Vec<_>>().join(", ")
        }
    };

    let mut out = String::new();
    let _ = writeln!(out, "{} {}", requirement.action.cyan().bold(), requirement.description);
    let _ = writeln!(out, "  {} {}", "required:".bold(), join(&requirement.required_params));
    let _ = writeln!(out, "  {} {}", "optional:".bold(), join(&requirement.optional_params));
    out
}

/// Every registered action with its required parameter count
pub fn render_actions(registry: &RequirementsRegistry) -> String {
    let mut out = String::new();
    for requirement in registry.iter() {
        let _ = writeln!(
            out,
            "{} {:>2} required  {}",
            format!("{:<ACTION_WIDTH$}", requirement.action).cyan(),
            requirement.required_params.len(),
            requirement.description
        );
    }
    let _ = writeln!(out, "{} actions", registry.len());
    out
}

/// Verdict for a single ad-hoc step
pub fn render_score(action: &str, result: &StepScore, missing: &[String]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} {} ({:?})",
        action.cyan().bold(),
        colored_score(result.score, percent(result.score)),
        result.basis
    );
    if missing.is_empty() {
        let _ = writeln!(out, "  {}", "✓ No required parameters missing".green());
    } else {
        let _ = writeln!(out, "  Missing:");
        for param in missing {
            let _ = writeln!(out, "    • {param}");
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use reprolint_common::Step;
    use reprolint_scoring::ProcedureAnalyzer;

    fn analysis() -> ProcedureAnalysis {
        colored::control::set_override(false);
        ProcedureAnalyzer::default().analyze(&[
            Step::new("step_1", "mount").with_parameter_names(["mounting_medium"]),
            Step::new("step_2", "wash")
                .with_raw_text("Cells were washed.")
                .with_parameter_names(["wash_buffer"]),
            Step::new("step_3", "block").with_parameter_names(["blocking_agent", "concentration"]),
            Step::new("step_4", "sonicate").with_raw_text("Sonicate for 30 s."),
        ])
    }

    #[test]
    fn test_percent() {
        assert_eq!(percent(0.33), "33%");
        assert_eq!(percent(1.0), "100%");
        assert_eq!(percent(0.0), "0%");
    }

    #[test]
    fn test_summary_lines() {
        let text = render_summary(&analysis().summary);
        assert!(text.contains("Total Steps: 4"));
        assert!(text.contains("Complete: 2"));
        assert!(text.contains("Missing Parameters: 3"));
        assert!(text.contains("Completeness: 50%"));
        assert!(text.contains("Unrecognized Actions: 1"));
    }

    #[test]
    fn test_table_rows() {
        let text = render_step_table(&analysis().steps);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[1].starts_with("step_1"));
        assert!(lines[1].ends_with("✓ Complete"));
        assert!(lines[2].contains("33%"));
        assert!(lines[2].ends_with("duration_per_wash_min, number_of_washes"));
        assert!(lines[4].ends_with("? Unrecognized action"));
    }

    #[test]
    fn test_attention_orders_by_missing_count() {
        let text = render_attention(&analysis(), 5);
        let wash = text.find("step_2").unwrap();
        let block = text.find("step_3").unwrap();
        assert!(wash < block);
        assert!(!text.contains("step_1"));

        let limited = render_attention(&analysis(), 1);
        assert!(!limited.contains("step_3"));
    }

    #[test]
    fn test_attention_empty_when_all_complete() {
        colored::control::set_override(false);
        let analysis = ProcedureAnalyzer::default()
            .analyze(&[Step::new("s", "mount").with_parameter_names(["mounting_medium"])]);
        assert!(render_attention(&analysis, 5).is_empty());
    }

    #[test]
    fn test_requirement_and_actions() {
        colored::control::set_override(false);
        let registry = RequirementsRegistry::builtin();

        let text = render_requirement(registry.get("mount").unwrap());
        assert!(text.contains("required: mounting_medium"));

        let listing = render_actions(&registry);
        assert!(listing.trim_end().ends_with(&format!("{} actions", registry.len())));
    }
}
