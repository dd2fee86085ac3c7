//! Reprolint service configuration
//!
//! Sources, lowest priority first: built-in defaults, an optional config file,
//! `REPROLINT_` environment variables (nested keys separated by `__`, e.g.
//! `REPROLINT_SCORING__NON_PROCEDURAL_PENALTY`), then `PORT`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use reprolint_scoring::{RequirementsRegistry, ScoringConfig};

/// Reprolint service configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Service host
    pub host: String,
    /// Service port
    pub port: u16,
    /// Scoring calibration
    pub scoring: ScoringConfig,
    /// Requirements registry settings
    pub registry: RegistrySettings,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: crate::DEFAULT_PORT,
            scoring: ScoringConfig::default(),
            registry: RegistrySettings::default(),
        }
    }
}

/// Requirements registry settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistrySettings {
    /// JSON file of extra action requirements merged over the built-in table
    pub extra_actions_path: Option<PathBuf>,
}

impl ServiceConfig {
    /// Load configuration from environment and an optional file
    pub fn load(file: Option<&Path>) -> Result<Self> {
        // Try to load .env file
        let _ = dotenvy::dotenv();

        let mut builder = config::Config::builder()
            .add_source(config::Config::try_from(&Self::default())?);

        if let Some(path) = file {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        let settings = builder
            .add_source(
                config::Environment::with_prefix("REPROLINT")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to read configuration")?;

        let mut cfg: Self = settings
            .try_deserialize()
            .context("Invalid configuration")?;

        // PORT set by the hosting platform takes priority
        if let Ok(port) = std::env::var("PORT") {
            if let Ok(p) = port.parse::<u16>() {
                cfg.port = p;
            }
        }

        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject unusable scoring constants
    pub fn validate(&self) -> Result<()> {
        self.scoring.validate()?;
        Ok(())
    }

    /// Built-in requirements, extended from `registry.extra_actions_path` when set
    pub fn build_registry(&self) -> Result<RequirementsRegistry> {
        let builder = RequirementsRegistry::builder().with_builtin();

        let Some(path) = &self.registry.extra_actions_path else {
            return Ok(builder.build());
        };

        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read requirements file {}", path.display()))?;
        let registry = builder
            .extend_from_json(&json)
            .with_context(|| format!("Invalid requirements file {}", path.display()))?
            .build();

        info!(
            "Loaded requirements from {} ({} actions)",
            path.display(),
            registry.len()
        );
        Ok(registry)
    }
}
