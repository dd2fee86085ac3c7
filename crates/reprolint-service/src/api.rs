//! REST API
//!
//! Stateless JSON endpoints: every request is scored against the registry and
//! calibration the service was started with.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, Method, StatusCode},
    response::Json,
    routing::{get, post},
    Router,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};

use reprolint_common::{round2, ProcedureDocument, VERSION};
use reprolint_scoring::{CompletenessScorer, ProcedureAnalyzer, RequirementsRegistry, ScoringConfig};

use crate::SERVICE_NAME;

type ApiResult = Result<Json<Value>, (StatusCode, Json<Value>)>;

/// Shared, read-only state behind every handler
#[derive(Clone)]
pub struct AppState {
    analyzer: Arc<ProcedureAnalyzer>,
}

impl AppState {
    pub fn new(registry: RequirementsRegistry, scoring: ScoringConfig) -> Self {
        let scorer = CompletenessScorer::new(Arc::new(registry), scoring);
        Self {
            analyzer: Arc::new(ProcedureAnalyzer::new(scorer)),
        }
    }

    pub fn analyzer(&self) -> &ProcedureAnalyzer {
        &self.analyzer
    }

    fn registry(&self) -> &RequirementsRegistry {
        self.analyzer.scorer().registry()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            analyzer: Arc::new(ProcedureAnalyzer::default()),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ScoreRequest {
    action: String,
    #[serde(default)]
    parameters: Vec<String>,
    raw_text: Option<String>,
}

/// Build the REST router
pub fn create_router(state: AppState) -> Router {
    // The browser extension calls from arbitrary origins
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    Router::new()
        .route("/health", get(health_check))
        .route("/api/v1/version", get(version))
        .route("/api/v1/actions", get(list_actions))
        .route("/api/v1/actions/:action", get(get_action))
        .route("/api/v1/analyze", post(analyze))
        .route("/api/v1/score", post(score_step))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": Utc::now().to_rfc3339(),
        "version": VERSION,
    }))
}

async fn version() -> Json<Value> {
    Json(json!({
        "service": SERVICE_NAME,
        "version": VERSION,
        "description": "Reproducibility completeness scoring for experimental procedures",
    }))
}

async fn list_actions(State(state): State<AppState>) -> Json<Value> {
    let actions: Vec<_> = state.registry().iter().collect();
    Json(json!({
        "actions": actions,
        "total": actions.len(),
    }))
}

async fn get_action(State(state): State<AppState>, Path(action): Path<String>) -> ApiResult {
    match state.registry().get(&action) {
        Some(requirement) => Ok(Json(json!(requirement))),
        None => Err((
            StatusCode::NOT_FOUND,
            Json(json!({ "error": format!("Unknown action: {action}") })),
        )),
    }
}

async fn analyze(State(state): State<AppState>, Json(body): Json<Value>) -> ApiResult {
    let document = ProcedureDocument::from_value(body).map_err(|e| {
        warn!("Rejected procedure document: {}", e);
        (
            StatusCode::BAD_REQUEST,
            Json(json!({ "success": false, "error": e.to_string() })),
        )
    })?;

    let report = state.analyzer.analyze_document(&document);
    info!(
        steps = report.summary.total_steps,
        complete = report.summary.complete_steps,
        overall = report.summary.overall_completeness,
        "Analyzed procedure"
    );

    Ok(Json(json!({
        "success": true,
        "analysis": report,
        "metadata": {
            "schema_version": document.schema_version,
            "version": VERSION,
            "timestamp": Utc::now().to_rfc3339(),
        },
    })))
}

async fn score_step(State(state): State<AppState>, Json(request): Json<ScoreRequest>) -> Json<Value> {
    let scorer = state.analyzer.scorer();
    let provided = request.parameters.iter().map(String::as_str);

    let result = scorer.evaluate(&request.action, provided.clone(), request.raw_text.as_deref());
    let missing = scorer.missing_required(&request.action, provided);

    Json(json!({
        "action": request.action,
        "completeness_score": round2(result.score),
        "score_basis": result.basis,
        "action_recognized": scorer.registry().contains(&request.action),
        "missing_required": missing,
        "is_complete": missing.is_empty(),
    }))
}
