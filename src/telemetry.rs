use axum::{routing::get, Router};
use metrics::gauge;
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::leadership::CurveParams;

/// Default log filter when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "leadership_metrics=info,warn";

#[derive(Clone)]
pub struct Telemetry {
    pub handle: PrometheusHandle,
}

static RECORDER: OnceCell<PrometheusHandle> = OnceCell::new();

impl Telemetry {
    /// Install the Prometheus recorder once per process and publish the curve floor
    /// as a static gauge. Later calls reuse the installed recorder.
    pub fn init(curve: &CurveParams) -> Result<Self, BuildError> {
        let handle = RECORDER
            .get_or_try_init(|| PrometheusBuilder::new().install_recorder())?
            .clone();

        gauge!("leadership_curve_floor").set(curve.floor);
        gauge!("leadership_curve_samples").set(curve.samples as f64);

        Ok(Self { handle })
    }

    /// Returns a router exposing `/metrics` with the Prometheus exposition format.
    pub fn router(&self) -> Router {
        let handle = self.handle.clone();
        Router::new().route(
            "/metrics",
            get(move || {
                let h = handle.clone();
                async move { h.render() }
            }),
        )
    }
}

/// Compact console logs filtered by `RUST_LOG` (falls back to [`DEFAULT_LOG_FILTER`]).
/// `LOG_FORMAT=json` switches to JSON lines. Safe to call more than once.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(filter);
    let _ = if json {
        registry.with(fmt::layer().json()).try_init()
    } else {
        registry.with(fmt::layer().compact()).try_init()
    };
}
