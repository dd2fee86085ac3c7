//! Property tests for the scoring core

use std::collections::BTreeSet;

use proptest::prelude::*;

use reprolint_common::Step;
use reprolint_scoring::{CompletenessScorer, ProcedureAnalyzer, RequirementsRegistry};

const TEXTS: &[&str] = &[
    "",
    "Cells were fixed in 4% PFA for 15 min at RT",
    "Wash three times with PBS, then incubate overnight at 4 °C.",
    "Fixatives are chemical agents that preserve tissue structure and are essential for subsequent staining; studies have shown they play an important role.",
    "Microglia are the resident macrophages of the brain.",
];

fn known_action() -> impl Strategy<Value = String> {
    let actions: Vec<String> = RequirementsRegistry::builtin()
        .all_actions()
        .into_iter()
        .map(String::from)
        .collect();
    proptest::sample::select(actions)
}

fn any_text() -> impl Strategy<Value = Option<&'static str>> {
    prop_oneof![Just(None), proptest::sample::select(TEXTS).prop_map(Some)]
}

/// A subset of the action's required parameters plus some unrelated names
fn provided_for(action: &str, mask: u8, extras: &[String]) -> Vec<String> {
    let registry = RequirementsRegistry::shared();
    let mut provided: Vec<String> = registry
        .required_params(action)
        .into_iter()
        .enumerate()
        .filter(|(i, _)| mask & (1 << i) != 0)
        .map(|(_, name)| name)
        .collect();
    provided.extend(extras.iter().cloned());
    provided
}

fn step_strategy() -> impl Strategy<Value = Step> {
    (
        "[a-z]{1,6}",
        prop_oneof![known_action(), "[a-z_]{1,12}"],
        any_text(),
        proptest::collection::vec("[a-z_]{1,16}", 0..6),
    )
        .prop_map(|(id, action, text, names)| {
            let step = Step::new(id, action).with_parameter_names(names);
            match text {
                Some(text) => step.with_raw_text(text),
                None => step,
            }
        })
}

proptest! {
    #[test]
    fn coverage_score_matches_fraction(action in known_action(), mask in any::<u8>(),
                                       extras in proptest::collection::vec("[a-z_]{1,10}", 0..4)) {
        let scorer = CompletenessScorer::default();
        let provided = provided_for(&action, mask, &extras);
        let names: Vec<&str> = provided.iter().map(String::as_str).collect();

        let required = scorer.registry().required_params(&action);
        let provided_set: BTreeSet<String> = provided.iter().cloned().collect();
        let expected = required.intersection(&provided_set).count() as f64 / required.len() as f64;

        prop_assert_eq!(scorer.score(&action, names.iter().copied(), None), expected);
    }

    #[test]
    fn adding_a_missing_parameter_is_monotone(action in known_action(), mask in any::<u8>(),
                                              text in any_text()) {
        let scorer = CompletenessScorer::default();
        let provided = provided_for(&action, mask, &[]);
        let names: Vec<&str> = provided.iter().map(String::as_str).collect();

        let before = scorer.score(&action, names.iter().copied(), text);
        let missing = scorer.missing_required(&action, names.iter().copied());

        for added in &missing {
            let mut more = names.clone();
            more.push(added.as_str());

            let after = scorer.score(&action, more.iter().copied(), text);
            let missing_after = scorer.missing_required(&action, more.iter().copied());

            prop_assert!(after >= before);
            prop_assert!(missing_after.len() < missing.len());
        }
    }

    #[test]
    fn unrecognized_actions_miss_nothing(action in "[A-Z][a-z]{2,10}|zz_[a-z]{1,8}",
                                         names in proptest::collection::vec("[a-z_]{1,10}", 0..5),
                                         text in any_text()) {
        let scorer = CompletenessScorer::default();
        prop_assume!(!scorer.registry().contains(&action));

        let missing = scorer.missing_required(&action, names.iter().map(String::as_str));
        prop_assert!(missing.is_empty());

        let score = scorer.score(&action, names.iter().map(String::as_str), text);
        prop_assert!(score == 0.1 || score == 0.3);
    }

    #[test]
    fn analysis_is_idempotent_and_consistent(steps in proptest::collection::vec(step_strategy(), 0..12)) {
        let analyzer = ProcedureAnalyzer::default();
        let first = analyzer.analyze(&steps);
        let second = analyzer.analyze(&steps);

        prop_assert_eq!(&first, &second);
        prop_assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );

        let summary = &first.summary;
        prop_assert_eq!(summary.complete_steps + summary.incomplete_steps, summary.total_steps);
        prop_assert_eq!(summary.total_steps, steps.len());

        for (analysis, step) in first.steps.iter().zip(&steps) {
            prop_assert_eq!(&analysis.step_id, &step.id);
            prop_assert!((0.0..=1.0).contains(&analysis.completeness_score));

            let required = analyzer.scorer().registry().required_params(&step.action);
            prop_assert!(analysis.missing_required.iter().all(|m| required.contains(m)));
            prop_assert!(analysis.missing_required.windows(2).all(|w| w[0] < w[1]));
            prop_assert_eq!(analysis.is_complete, analysis.missing_required.is_empty());
        }
    }
}
