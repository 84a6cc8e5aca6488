use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;

use crate::batch::process_affiliation;
use crate::config::MetricsConfig;
use crate::engine::compute_row_with;
use crate::error::MetricsError;
use crate::leadership::LeadershipCurve;
use crate::model::Author;
use crate::report::{summarize, MetricSummary, SkippedAuthor};
use crate::row::{Metric, MetricRow};
use crate::source::MemorySource;

#[derive(Clone)]
pub struct AppState {
    curve: Arc<LeadershipCurve>,
    /// Report ordering (`rank_by`) for `/authors/report`.
    config: Arc<MetricsConfig>,
}

impl AppState {
    pub fn new(curve: LeadershipCurve, config: MetricsConfig) -> Self {
        Self {
            curve: Arc::new(curve),
            config: Arc::new(config),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(LeadershipCurve::canonical(), MetricsConfig::default())
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/author/metrics", post(author_metrics))
        .route("/authors/report", post(authors_report))
        .route("/leadership-weight", get(leadership_weight))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

/// Engine errors answer `422 {"error": ...}`, anything else `500`.
pub enum ApiError {
    Metrics(MetricsError),
    Internal(anyhow::Error),
}

impl From<MetricsError> for ApiError {
    fn from(e: MetricsError) -> Self {
        Self::Metrics(e)
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(e: anyhow::Error) -> Self {
        Self::Internal(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Metrics(e) => {
                tracing::debug!(target: "api", error = %e, "request rejected");
                (StatusCode::UNPROCESSABLE_ENTITY, e.to_string())
            }
            ApiError::Internal(e) => {
                tracing::error!(target: "api", error = ?e, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, format!("{e:#}"))
            }
        };
        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

async fn author_metrics(
    State(state): State<AppState>,
    Json(author): Json<Author>,
) -> Result<Json<MetricRow>, ApiError> {
    let row = compute_row_with(&author, &state.curve)?;
    Ok(Json(row))
}

#[derive(Serialize)]
struct ReportResp {
    rows: Vec<MetricRow>,
    skipped: Vec<SkippedAuthor>,
    summary: MetricSummary,
}

/// Rows come back ordered by the configured `rank_by` metric.
async fn authors_report(
    State(state): State<AppState>,
    Json(authors): Json<Vec<Author>>,
) -> Result<Json<ReportResp>, ApiError> {
    let source = MemorySource::new(authors);
    let report = process_affiliation(&source, &state.config, Arc::clone(&state.curve)).await?;
    let summary = summarize(&report.rows, Metric::HLeadershipIndex);
    Ok(Json(ReportResp {
        rows: report.rows,
        skipped: report.skipped,
        summary,
    }))
}

#[derive(Deserialize)]
struct WeightQuery {
    position: usize,
    n: usize,
}

#[derive(Serialize)]
struct WeightResp {
    position: usize,
    n: usize,
    weight: f64,
}

async fn leadership_weight(
    State(state): State<AppState>,
    Query(q): Query<WeightQuery>,
) -> Result<Json<WeightResp>, ApiError> {
    let weight = state.curve.weight(q.position, q.n)?;
    Ok(Json(WeightResp {
        position: q.position,
        n: q.n,
        weight,
    }))
}
