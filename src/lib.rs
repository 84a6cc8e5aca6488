//! Public library surface for the binaries and integration tests.

pub mod error;
pub mod model;
pub mod stats;

// Metric engine (pure, no I/O)
pub mod authorship;
pub mod citations;
pub mod composite;
pub mod engine;
pub mod hindex;
pub mod leadership;
pub mod row;

// Collaborators around the engine: config, record sources, batch runs, reports, HTTP
pub mod api;
pub mod batch;
pub mod config;
pub mod report;
pub mod source;
pub mod telemetry;

// ---- Re-exports for stable public API ----
pub use crate::api::router;
pub use crate::engine::{compute_row, compute_row_with};
pub use crate::error::{MetricsError, Result};
pub use crate::leadership::{h_leadership_index, leadership_weight, CurveParams, LeadershipCurve};
pub use crate::model::{Author, AuthorRef, Publication};
pub use crate::row::{Metric, MetricRow};

use tracing::info;

/// Build the full HTTP app: engine routes plus `/metrics`, using the curve from config.
///
/// Example usage inside a `#[shuttle_runtime::main]` function:
/// ```ignore
/// let router = leadership_metrics::app().await?;
/// ```
pub async fn app() -> anyhow::Result<axum::Router> {
    let cfg = config::load_config_default()?;
    let curve = LeadershipCurve::new(cfg.curve)?;
    let telemetry = telemetry::Telemetry::init(curve.params())?;
    info!(
        target: "api",
        floor = curve.params().floor,
        samples = curve.params().samples,
        rank_by = %cfg.rank_by,
        "app configured"
    );
    Ok(api::router(api::AppState::new(curve, cfg)).merge(telemetry.router()))
}
