//! Offline batch run: computes a report for every affiliation directory under
//! `data_dir` and writes the JSON artefacts to `results_dir/<affiliation>/`.
//!
//! Usage: `leadership-batch [config-path]` (otherwise `METRICS_CONFIG_PATH`,
//! `config/metrics.toml`, `config/metrics.json`, defaults).

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use leadership_metrics::batch::{process_affiliation, write_report};
use leadership_metrics::config::{load_config_default, load_config_from};
use leadership_metrics::source::{affiliation_dirs, AuthorSource, DirectorySource};
use leadership_metrics::LeadershipCurve;

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    leadership_metrics::telemetry::init_tracing();

    let cfg = match std::env::args().nth(1) {
        Some(p) => load_config_from(&PathBuf::from(p))?,
        None => load_config_default()?,
    };
    let curve = Arc::new(LeadershipCurve::new(cfg.curve).context("building leadership curve")?);

    let dirs = affiliation_dirs(&cfg.data_dir, &cfg.affiliations)?;
    if dirs.is_empty() {
        tracing::warn!(target: "batch", data_dir = %cfg.data_dir.display(), "no affiliation directories found");
    }

    for dir in dirs {
        let source = DirectorySource::new(&dir);
        // One unreadable affiliation should not sink the others.
        let report = match process_affiliation(&source, &cfg, Arc::clone(&curve)).await {
            Ok(r) => r,
            Err(e) => {
                tracing::error!(target: "batch", affiliation = source.name(), error = ?e, "affiliation failed");
                continue;
            }
        };
        let out_dir = cfg.results_dir.join(source.name());
        write_report(&report, &out_dir).await?;
        tracing::info!(
            target: "batch",
            affiliation = source.name(),
            rows = report.rows.len(),
            skipped = report.skipped.len(),
            out = %out_dir.display(),
            "report written"
        );
    }

    println!("leadership-batch done");
    Ok(())
}
