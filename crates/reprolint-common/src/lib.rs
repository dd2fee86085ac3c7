//! # Reprolint Common
//!
//! Shared types and errors for the reprolint workspace.
//!
//! ## Core Types
//!
//! - [`ProcedureDocument`]: A procedure extracted from a Methods section (input)
//! - [`Step`] / [`Parameter`]: One extracted experimental step and its named parameters
//! - [`StepAnalysis`]: Completeness verdict for a single step (output)
//! - [`ProcedureAnalysis`] / [`AnalysisReport`]: Aggregated verdict for a procedure
//!
//! ## Errors
//!
//! - [`ReprolintError`]: Unified error type with [`RegistryError`] and [`DocumentError`] variants

pub mod error;
pub mod types;

// Re-export commonly used types at crate root
pub use error::{DocumentError, RegistryError, ReprolintError, Result};
pub use types::{
    analysis::{
        display_text, round2, AnalysisReport, AnalysisSummary, ProcedureAnalysis, ScoreBasis,
        StepAnalysis,
    },
    procedure::{Parameter, ProcedureDocument, SourceInfo, Step},
};

/// Reprolint version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Action label used when a step carries no action
pub const DEFAULT_ACTION: &str = "other";

/// Step id used when a step carries no id
pub const DEFAULT_STEP_ID: &str = "unknown";

/// Number of characters of raw text kept for display
pub const DISPLAY_TEXT_LIMIT: usize = 100;

/// Marker appended to display text that was truncated
pub const TRUNCATION_MARKER: &str = "...";
