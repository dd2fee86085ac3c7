//! # Reprolint Service
//!
//! HTTP API and terminal rendering on top of `reprolint-scoring`.
//!
//! - [`config`]: Service configuration from file, environment and `.env`
//! - [`api`]: axum router for health, registry lookups, scoring and analysis
//! - [`render`]: Plain-text summaries and tables for the command line

pub mod api;
pub mod config;
pub mod render;

pub use api::{create_router, AppState};
pub use config::{RegistrySettings, ServiceConfig};

/// Service name reported by the version endpoint
pub const SERVICE_NAME: &str = "reprolint";

/// Default listening port
pub const DEFAULT_PORT: u16 = 8085;

/// Default number of steps listed under "Steps Needing Attention"
pub const DEFAULT_ATTENTION_LIMIT: usize = 5;
