//! Leadership Metrics Service: binary entrypoint.
//! Boots the Axum HTTP server: engine routes, shared curve state, `/metrics`.
//!
//! For offline runs over exported author files see the `leadership-batch` binary.

use shuttle_axum::ShuttleAxum;

#[shuttle_runtime::main]
async fn axum() -> ShuttleAxum {
    // Load .env in local/dev; no-op in prod environments.
    // This enables METRICS_CONFIG_PATH / RUST_LOG from .env.
    let _ = dotenvy::dotenv();

    leadership_metrics::telemetry::init_tracing();

    let router = leadership_metrics::app()
        .await
        .map_err(shuttle_runtime::Error::Custom)?;

    Ok(router.into())
}
