//! Scoring Benchmarks
//!
//! - Text classification over instruction and review prose
//! - Per-step scoring
//! - Whole-procedure analysis at increasing step counts

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use reprolint_common::Step;
use reprolint_scoring::{CompletenessScorer, ProceduralTextClassifier, ProcedureAnalyzer};

const INSTRUCTION: &str = "Cells were then washed twice with PBS and fixed with 4% paraformaldehyde \
    for 15 minutes at room temperature.";

const REVIEW: &str = "Microglia are the resident macrophages of the central nervous system. \
    Moreover, studies have shown that these cells are essential for brain development.";

fn bench_classifier(c: &mut Criterion) {
    let mut group = c.benchmark_group("classifier");
    let classifier = ProceduralTextClassifier::default();

    group.bench_function("non_procedural_instruction", |b| {
        b.iter(|| classifier.is_non_procedural(black_box(INSTRUCTION)))
    });
    group.bench_function("non_procedural_review", |b| {
        b.iter(|| classifier.is_non_procedural(black_box(REVIEW)))
    });
    group.bench_function("seems_procedural_review", |b| {
        b.iter(|| classifier.seems_procedural(black_box(REVIEW)))
    });

    group.finish();
}

fn bench_scorer(c: &mut Criterion) {
    let scorer = CompletenessScorer::default();
    let provided = ["fixative", "fixative_concentration", "duration_min"];

    c.bench_function("score_fix_step", |b| {
        b.iter(|| scorer.score(black_box("fix"), provided, Some(black_box(INSTRUCTION))))
    });
}

fn bench_analyzer(c: &mut Criterion) {
    let mut group = c.benchmark_group("analyze");
    let analyzer = ProcedureAnalyzer::default();

    for count in [10usize, 100, 1000].iter() {
        let steps: Vec<Step> = (0..*count)
            .map(|i| {
                Step::new(format!("step_{i}"), if i % 2 == 0 { "fix" } else { "wash" })
                    .with_raw_text(INSTRUCTION)
                    .with_parameter_names(["fixative", "wash_buffer", "duration_min"])
            })
            .collect();

        group.throughput(Throughput::Elements(*count as u64));
        group.bench_with_input(BenchmarkId::new("steps", count), &steps, |b, steps| {
            b.iter(|| analyzer.analyze(black_box(steps)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_classifier, bench_scorer, bench_analyzer);
criterion_main!(benches);
