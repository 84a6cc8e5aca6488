//! Batch runner: fan out one blocking task per author, collect rows in input order,
//! skip (and count) authors whose metrics fail instead of aborting the batch.

use anyhow::{Context, Result};
use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};
use once_cell::sync::OnceCell;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tokio::task::{self, JoinSet};

use crate::config::MetricsConfig;
use crate::engine::compute_row_with;
use crate::leadership::LeadershipCurve;
use crate::model::Author;
use crate::report::{metric_file_stem, Report, SkippedAuthor};
use crate::row::{Metric, MetricRow};
use crate::source::AuthorSource;

/// One-time metrics registration (so series show up on /metrics).
fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("batch_authors_total", "Authors submitted to the batch runner.");
        describe_counter!(
            "batch_authors_failed_total",
            "Authors skipped because a metric could not be computed."
        );
        describe_histogram!("batch_compute_ms", "Batch computation time in milliseconds.");
        describe_gauge!("batch_last_run_ts", "Unix ts when a batch last finished.");
    });
}

#[derive(Debug, Clone, Default)]
pub struct BatchOutcome {
    /// Successful rows, in the order the authors were submitted.
    pub rows: Vec<MetricRow>,
    pub skipped: Vec<SkippedAuthor>,
}

/// Compute rows for all `authors` concurrently.
pub async fn run_batch(authors: Vec<Author>, curve: Arc<LeadershipCurve>) -> BatchOutcome {
    run_with(authors, move |author| compute_row_with(author, &curve)).await
}

/// Fan-out behind [`run_batch`], generic over the per-author computation.
async fn run_with<F>(authors: Vec<Author>, compute: F) -> BatchOutcome
where
    F: Fn(&Author) -> crate::error::Result<MetricRow> + Send + Sync + 'static,
{
    ensure_metrics_described();
    let started = Instant::now();
    let total = authors.len();
    let compute = Arc::new(compute);

    let mut tasks = JoinSet::new();
    let mut names = Vec::with_capacity(total);
    // Panicked tasks only report their id; map it back to the author.
    let mut task_index: HashMap<task::Id, usize> = HashMap::with_capacity(total);
    for (idx, author) in authors.into_iter().enumerate() {
        names.push((author.name.clone(), author.id.clone()));
        let compute = Arc::clone(&compute);
        let handle = tasks.spawn_blocking(move || (idx, compute(&author)));
        task_index.insert(handle.id(), idx);
    }

    let mut slots: Vec<Option<MetricRow>> = vec![None; total];
    let mut skipped = Vec::new();
    while let Some(joined) = tasks.join_next_with_id().await {
        match joined {
            Ok((_, (idx, Ok(row)))) => slots[idx] = Some(row),
            Ok((_, (idx, Err(e)))) => {
                let (name, author_id) = names[idx].clone();
                tracing::warn!(target: "batch", author = %name, error = %e, "skipping author");
                skipped.push(SkippedAuthor {
                    name,
                    author_id,
                    error: e.to_string(),
                });
            }
            Err(e) => {
                let (name, author_id) = task_index
                    .get(&e.id())
                    .map(|&idx| names[idx].clone())
                    .unwrap_or_default();
                tracing::error!(target: "batch", author = %name, error = ?e, "metric task failed");
                skipped.push(SkippedAuthor {
                    name,
                    author_id,
                    error: format!("task failed: {e}"),
                });
            }
        }
    }

    let rows: Vec<MetricRow> = slots.into_iter().flatten().collect();

    // Telemetry
    counter!("batch_authors_total").increment(total as u64);
    counter!("batch_authors_failed_total").increment(skipped.len() as u64);
    histogram!("batch_compute_ms").record(started.elapsed().as_secs_f64() * 1000.0);
    gauge!("batch_last_run_ts").set(chrono::Utc::now().timestamp().max(0) as f64);

    tracing::info!(
        target: "batch",
        authors = total,
        rows = rows.len(),
        skipped = skipped.len(),
        "batch finished"
    );

    BatchOutcome { rows, skipped }
}

/// Load one affiliation from `source`, compute every row and build its report.
pub async fn process_affiliation(
    source: &dyn AuthorSource,
    cfg: &MetricsConfig,
    curve: Arc<LeadershipCurve>,
) -> Result<Report> {
    let authors = source
        .fetch_authors()
        .await
        .with_context(|| format!("loading authors for {}", source.name()))?;
    tracing::info!(target: "batch", affiliation = source.name(), authors = authors.len(), "loaded");

    let outcome = run_batch(authors, curve).await;
    Ok(Report::build(
        source.name(),
        outcome.rows,
        cfg.rank_by,
        &cfg.summary_metrics,
        outcome.skipped,
    ))
}

/// Write a report's JSON artefacts into `dir` (created if missing):
/// `metrics.json`, one summary file per summary metric, `correlation_matrix.json`
/// and `correlation_authorship_position.json`.
pub async fn write_report(report: &Report, dir: &Path) -> Result<()> {
    tokio::fs::create_dir_all(dir)
        .await
        .with_context(|| format!("creating {}", dir.display()))?;

    write_json(&dir.join("metrics.json"), &report.rows).await?;
    for summary in &report.summaries {
        let stem = summary
            .metric
            .parse::<Metric>()
            .map(metric_file_stem)
            .unwrap_or_else(|_| summary.metric.clone());
        write_json(&dir.join(format!("{stem}.json")), summary).await?;
    }
    write_json(
        &dir.join("correlation_matrix.json"),
        &report.correlation.to_named(),
    )
    .await?;
    write_json(
        &dir.join("correlation_authorship_position.json"),
        &report.position_correlation(),
    )
    .await?;
    if !report.skipped.is_empty() {
        write_json(&dir.join("skipped.json"), &report.skipped).await?;
    }
    Ok(())
}

async fn write_json<T: serde::Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let body = serde_json::to_string_pretty(value)?;
    tokio::fs::write(path, body)
        .await
        .with_context(|| format!("writing {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::leadership::CurveParams;
    use crate::model::{AuthorRef, Publication};

    fn author(id: &str, counts: &[u64]) -> Author {
        Author::new(
            id,
            format!("Author {id}"),
            counts
                .iter()
                .map(|&c| Publication::new(c, vec![AuthorRef::new(id, "")]))
                .collect(),
        )
    }

    #[tokio::test]
    async fn rows_keep_input_order() {
        let authors = vec![author("1", &[5, 5]), author("2", &[1]), author("3", &[9, 9, 9])];
        let curve = Arc::new(LeadershipCurve::new(CurveParams::default()).unwrap());
        let out = run_batch(authors, curve).await;
        let ids: Vec<&str> = out.rows.iter().map(|r| r.author_id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
        assert!(out.skipped.is_empty());
    }

    #[tokio::test]
    async fn panicking_task_still_names_the_author() {
        let authors = vec![author("1", &[3]), author("2", &[4]), author("3", &[5])];
        let curve = LeadershipCurve::canonical();
        let out = run_with(authors, move |a| {
            if a.id == "2" {
                panic!("bad record");
            }
            compute_row_with(a, &curve)
        })
        .await;
        let ids: Vec<&str> = out.rows.iter().map(|r| r.author_id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);
        assert_eq!(out.skipped.len(), 1);
        assert_eq!(out.skipped[0].author_id, "2");
        assert_eq!(out.skipped[0].name, "Author 2");
        assert!(out.skipped[0].error.starts_with("task failed"));
    }

    #[tokio::test]
    async fn empty_batch_is_empty() {
        let out = run_batch(Vec::new(), Arc::new(LeadershipCurve::canonical())).await;
        assert!(out.rows.is_empty());
        assert!(out.skipped.is_empty());
    }

    #[tokio::test]
    async fn writes_report_files() {
        let tmp = tempfile::tempdir().unwrap();
        let out = run_batch(
            vec![author("1", &[4, 4, 4]), author("2", &[1, 0])],
            Arc::new(LeadershipCurve::canonical()),
        )
        .await;
        let report = Report::build(
            "Test",
            out.rows,
            Metric::HIndex,
            &[Metric::HLeadershipIndex, Metric::PercentFirstAuthor],
            out.skipped,
        );
        let dir = tmp.path().join("Test");
        write_report(&report, &dir).await.unwrap();
        for f in [
            "metrics.json",
            "h_leadership_index.json",
            "first_author.json",
            "correlation_matrix.json",
            "correlation_authorship_position.json",
        ] {
            assert!(dir.join(f).exists(), "missing {f}");
        }
        assert!(!dir.join("skipped.json").exists());
        let rows: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(dir.join("metrics.json")).unwrap())
                .unwrap();
        assert_eq!(rows[0]["Scopus ID"], serde_json::json!("1"));
        assert_eq!(rows[0]["h-index"], serde_json::json!(3));
    }
}
