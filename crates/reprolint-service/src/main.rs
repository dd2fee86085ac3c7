//! Reprolint Binary
//!
//! Reproducibility completeness scoring for experimental procedures

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use reprolint_common::{AnalysisReport, ProcedureDocument, VERSION};
use reprolint_service::{
    create_router, render, AppState, ServiceConfig, DEFAULT_ATTENTION_LIMIT,
};

#[derive(Parser)]
#[command(name = "reprolint")]
#[command(about = "Score experimental procedures for missing reproducibility parameters", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file (TOML, JSON or YAML)
    #[arg(short, long, global = true, env = "REPROLINT_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API
    Serve {
        /// Bind host, overriding configuration
        #[arg(long)]
        host: Option<String>,

        /// Bind port, overriding configuration
        #[arg(long)]
        port: Option<u16>,
    },

    /// Analyze a procedure document
    Analyze {
        /// Procedure JSON file
        file: PathBuf,

        /// Write the JSON report to this file
        #[arg(short, long)]
        report: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,

        /// Number of steps listed under "Steps Needing Attention"
        #[arg(long, default_value_t = DEFAULT_ATTENTION_LIMIT)]
        top: usize,
    },

    /// List registered actions, or show one
    Actions {
        /// Action to show
        action: Option<String>,
    },

    /// Score a single step
    Score {
        /// Action label
        action: String,

        /// Provided parameter name (repeatable)
        #[arg(short, long = "param")]
        params: Vec<String>,

        /// Step text
        #[arg(short, long)]
        text: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so JSON output stays clean
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
    Ok(())
}

async fn run(cli: Cli) -> Result<()> {
    let config = ServiceConfig::load(cli.config.as_deref())?;
    let registry = config.build_registry()?;
    let state = AppState::new(registry, config.scoring.clone());

    match cli.command {
        Commands::Serve { host, port } => serve(config, state, host, port).await,
        Commands::Analyze {
            file,
            report,
            format,
            top,
        } => analyze(&state, &file, report.as_deref(), format, top),
        Commands::Actions { action } => actions(&state, action.as_deref()),
        Commands::Score {
            action,
            params,
            text,
        } => {
            let scorer = state.analyzer().scorer();
            let provided = params.iter().map(String::as_str);
            let result = scorer.evaluate(&action, provided.clone(), text.as_deref());
            let missing = scorer.missing_required(&action, provided);
            print!("{}", render::render_score(&action, &result, &missing));
            Ok(())
        }
    }
}

async fn serve(
    config: ServiceConfig,
    state: AppState,
    host: Option<String>,
    port: Option<u16>,
) -> Result<()> {
    info!("Starting Reprolint Service v{}", VERSION);

    let host = host.unwrap_or(config.host);
    let port = port.unwrap_or(config.port);
    let addr: SocketAddr = format!("{host}:{port}")
        .parse()
        .with_context(|| format!("Invalid bind address {host}:{port}"))?;

    info!(
        "Scoring config: non_procedural_penalty={}, unrecognized_procedural={}, unrecognized={}, min_descriptive_matches={}",
        config.scoring.non_procedural_penalty,
        config.scoring.unrecognized_procedural_score,
        config.scoring.unrecognized_score,
        config.scoring.min_descriptive_matches
    );
    info!(
        "Registry: {} actions",
        state.analyzer().scorer().registry().len()
    );

    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("REST API server started on {}", addr);
    info!("Endpoints: /health, /api/v1/version, /api/v1/actions, /api/v1/analyze, /api/v1/score");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shutting down Reprolint service");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to install CTRL+C signal handler: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Received shutdown signal");
}

fn analyze(
    state: &AppState,
    file: &Path,
    report_path: Option<&Path>,
    format: OutputFormat,
    top: usize,
) -> Result<()> {
    let json = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let document = ProcedureDocument::from_json_str(&json)
        .with_context(|| format!("Invalid procedure document {}", file.display()))?;

    let analysis = state.analyzer().analyze(&document.steps);
    let report = AnalysisReport::new(analysis.clone(), document.source.clone());
    let report_json = serde_json::to_string_pretty(&report)?;

    match format {
        OutputFormat::Table => print!("{}", render::render_analysis(&analysis, top)),
        OutputFormat::Json => println!("{report_json}"),
    }

    if let Some(path) = report_path {
        std::fs::write(path, &report_json)
            .with_context(|| format!("Failed to write report {}", path.display()))?;
        eprintln!("{} Saved analysis report to: {}", "✓".green(), path.display());
    }
    Ok(())
}

fn actions(state: &AppState, action: Option<&str>) -> Result<()> {
    let registry = state.analyzer().scorer().registry();
    match action {
        None => print!("{}", render::render_actions(registry)),
        Some(name) => {
            let requirement = registry
                .get(name)
                .with_context(|| format!("Unknown action: {name}"))?;
            print!("{}", render::render_requirement(requirement));
        }
    }
    Ok(())
}
