//! # Reprolint Scoring
//!
//! Scores experimental procedures for reproducibility: does each step state the
//! parameters an independent lab would need to repeat it?
//!
//! ## Key Concepts
//!
//! - **Action**: The category of a step (e.g. "fix", "wash", "image")
//! - **Required parameter**: A named datum a step of that action must state
//! - **Completeness score**: Fraction of required parameters present, capped
//!   when the step text reads as background prose rather than an instruction
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────┐
//! │              ProcedureAnalyzer                │
//! │      (per-step verdicts + summary)            │
//! └──────────────────────┬────────────────────────┘
//!                        │
//! ┌──────────────────────┴────────────────────────┐
//! │             CompletenessScorer                │
//! └──────────┬───────────────────────┬────────────┘
//!            │                       │
//! ┌──────────┴──────────┐ ┌──────────┴────────────┐
//! │ RequirementsRegistry│ │ProceduralTextClassifier│
//! │  (action → params)  │ │ (lexical heuristics)   │
//! └─────────────────────┘ └───────────────────────┘
//! ```
//!
//! Everything here is synchronous and pure; all types are `Send + Sync` and can
//! be shared across threads without locking.

pub mod analyzer;
pub mod classifier;
pub mod config;
pub mod registry;
pub mod scorer;

pub use analyzer::ProcedureAnalyzer;
pub use classifier::{ProceduralTextClassifier, TextAssessment};
pub use config::ScoringConfig;
pub use registry::{ActionRequirement, RegistryBuilder, RequirementsRegistry};
pub use scorer::{CompletenessScorer, StepScore};

/// Score for step text that reads as background prose
pub const DEFAULT_NON_PROCEDURAL_PENALTY: f64 = 0.1;

/// Score when no required parameters apply and the text looks like an instruction
pub const DEFAULT_UNRECOGNIZED_PROCEDURAL_SCORE: f64 = 0.3;

/// Score when no required parameters apply and nothing signals an instruction
pub const DEFAULT_UNRECOGNIZED_SCORE: f64 = 0.1;

/// Score for a known action that requires nothing, given no step text
pub const DEFAULT_NO_REQUIREMENTS_SCORE: f64 = 1.0;

/// Descriptive phrases needed before text counts as background
pub const DEFAULT_MIN_DESCRIPTIVE_MATCHES: usize = 2;
