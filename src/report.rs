//! Cross-author reporting: per-metric summary statistics and a Pearson correlation
//! matrix, mainly to see how each metric moves with median author position.
//!
//! Non-finite values (NaN medians, `-inf` c-scores) are left out of every statistic.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::row::{Metric, MetricRow};
use crate::stats;

/// count / mean / std / min / quartiles / max of one metric across rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricSummary {
    pub metric: String,
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    #[serde(rename = "25%")]
    pub p25: f64,
    #[serde(rename = "50%")]
    pub p50: f64,
    #[serde(rename = "75%")]
    pub p75: f64,
    pub max: f64,
}

pub fn summarize(rows: &[MetricRow], metric: Metric) -> MetricSummary {
    let mut values: Vec<f64> = rows
        .iter()
        .map(|r| r.value(metric))
        .filter(|v| v.is_finite())
        .collect();
    values.sort_by(f64::total_cmp);

    MetricSummary {
        metric: metric.as_str().to_string(),
        count: values.len(),
        mean: stats::mean(&values),
        std: stats::sample_std(&values),
        min: values.first().copied().unwrap_or(f64::NAN),
        p25: stats::quantile_sorted(&values, 0.25),
        p50: stats::quantile_sorted(&values, 0.50),
        p75: stats::quantile_sorted(&values, 0.75),
        max: values.last().copied().unwrap_or(f64::NAN),
    }
}

/// Pearson correlation over the pairs where both values are finite.
/// NaN with fewer than two pairs or a constant series.
pub fn pearson(xs: &[f64], ys: &[f64]) -> f64 {
    let pairs: Vec<(f64, f64)> = xs
        .iter()
        .zip(ys)
        .filter(|(x, y)| x.is_finite() && y.is_finite())
        .map(|(x, y)| (*x, *y))
        .collect();
    if pairs.len() < 2 {
        return f64::NAN;
    }
    let n = pairs.len() as f64;
    let mx = pairs.iter().map(|p| p.0).sum::<f64>() / n;
    let my = pairs.iter().map(|p| p.1).sum::<f64>() / n;
    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for (x, y) in &pairs {
        let dx = x - mx;
        let dy = y - my;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }
    if sxx == 0.0 || syy == 0.0 {
        return f64::NAN;
    }
    sxy / (sxx.sqrt() * syy.sqrt())
}

/// Symmetric metric × metric correlation table.
#[derive(Debug, Clone)]
pub struct CorrelationMatrix {
    pub metrics: Vec<Metric>,
    values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    pub fn get(&self, a: Metric, b: Metric) -> Option<f64> {
        let i = self.metrics.iter().position(|m| *m == a)?;
        let j = self.metrics.iter().position(|m| *m == b)?;
        Some(self.values[i][j])
    }

    /// Correlation of every other metric with `target`.
    pub fn column(&self, target: Metric) -> Vec<(Metric, f64)> {
        self.metrics
            .iter()
            .filter(|m| **m != target)
            .filter_map(|m| self.get(*m, target).map(|v| (*m, v)))
            .collect()
    }

    /// Nested `{row: {col: value}}` map keyed by display names, for JSON output.
    pub fn to_named(&self) -> BTreeMap<String, BTreeMap<String, f64>> {
        self.metrics
            .iter()
            .enumerate()
            .map(|(i, a)| {
                let inner = self
                    .metrics
                    .iter()
                    .enumerate()
                    .map(|(j, b)| (b.as_str().to_string(), self.values[i][j]))
                    .collect();
                (a.as_str().to_string(), inner)
            })
            .collect()
    }
}

/// Correlations between every metric that has at least one finite value.
pub fn correlation_matrix(rows: &[MetricRow]) -> CorrelationMatrix {
    let metrics: Vec<Metric> = Metric::ALL
        .iter()
        .copied()
        .filter(|m| rows.iter().any(|r| r.value(*m).is_finite()))
        .collect();
    let series: Vec<Vec<f64>> = metrics
        .iter()
        .map(|m| rows.iter().map(|r| r.value(*m)).collect())
        .collect();

    let k = metrics.len();
    let mut values = vec![vec![f64::NAN; k]; k];
    for i in 0..k {
        for j in i..k {
            let r = pearson(&series[i], &series[j]);
            values[i][j] = r;
            values[j][i] = r;
        }
    }
    CorrelationMatrix { metrics, values }
}

/// Correlation of each metric with median author position.
pub fn correlation_with_position(rows: &[MetricRow]) -> Vec<(Metric, f64)> {
    correlation_matrix(rows).column(Metric::MedianAuthorPosition)
}

/// File stem for a metric: `"% first author"` → `"first_author"`.
pub fn metric_file_stem(metric: Metric) -> String {
    metric
        .as_str()
        .replace('-', "_")
        .replace('%', "")
        .trim()
        .replace(' ', "_")
        .to_lowercase()
}

/// Sort rows by `metric`, largest first; non-finite values go last. Stable.
pub fn sort_rows_desc(rows: &mut [MetricRow], metric: Metric) {
    rows.sort_by(|a, b| {
        let (x, y) = (a.value(metric), b.value(metric));
        match (x.is_finite(), y.is_finite()) {
            (true, true) => y.total_cmp(&x),
            (true, false) => std::cmp::Ordering::Less,
            (false, true) => std::cmp::Ordering::Greater,
            (false, false) => std::cmp::Ordering::Equal,
        }
    });
}

/// Author left out of a report because its metrics could not be computed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedAuthor {
    pub name: String,
    pub author_id: String,
    pub error: String,
}

/// Everything written for one affiliation.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub affiliation: String,
    pub generated_at: chrono::DateTime<chrono::Utc>,
    pub rows: Vec<MetricRow>,
    pub summaries: Vec<MetricSummary>,
    #[serde(skip)]
    pub correlation: CorrelationMatrix,
    pub skipped: Vec<SkippedAuthor>,
}

impl Report {
    pub fn build(
        affiliation: impl Into<String>,
        mut rows: Vec<MetricRow>,
        rank_by: Metric,
        summary_metrics: &[Metric],
        skipped: Vec<SkippedAuthor>,
    ) -> Self {
        sort_rows_desc(&mut rows, rank_by);
        let summaries = summary_metrics.iter().map(|m| summarize(&rows, *m)).collect();
        let correlation = correlation_matrix(&rows);
        Self {
            affiliation: affiliation.into(),
            generated_at: chrono::Utc::now(),
            rows,
            summaries,
            correlation,
            skipped,
        }
    }

    pub fn position_correlation(&self) -> BTreeMap<String, f64> {
        self.correlation
            .column(Metric::MedianAuthorPosition)
            .into_iter()
            .map(|(m, v)| (m.as_str().to_string(), v))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::compute_row;
    use crate::model::{Author, AuthorRef, Publication};

    fn p(citations: u64, ids: &[&str]) -> Publication {
        Publication::new(
            citations,
            ids.iter().map(|id| AuthorRef::new(*id, "")).collect(),
        )
    }

    fn rows() -> Vec<MetricRow> {
        let a = Author::new("A", "A", vec![p(10, &["A"]), p(8, &["A", "B"]), p(5, &["A", "B"])]);
        let b = Author::new("B", "B", vec![p(3, &["A", "B"]), p(2, &["C", "B", "D"])]);
        let c = Author::new("C", "C", vec![p(50, &["X", "Y", "C"]), p(40, &["X", "C", "Y"]), p(1, &["C"])]);
        [a, b, c].iter().map(|x| compute_row(x).unwrap()).collect()
    }

    #[test]
    fn summary_matches_describe_conventions() {
        let s = summarize(&rows(), Metric::HIndex);
        // h: A = 3, B = 2, C = 2
        assert_eq!(s.count, 3);
        assert!((s.mean - 7.0 / 3.0).abs() < 1e-12);
        assert_eq!(s.min, 2.0);
        assert_eq!(s.p50, 2.0);
        assert_eq!(s.max, 3.0);
    }

    #[test]
    fn summary_of_empty_is_nan() {
        let s = summarize(&[], Metric::HIndex);
        assert_eq!(s.count, 0);
        assert!(s.mean.is_nan() && s.min.is_nan() && s.max.is_nan());
    }

    #[test]
    fn pearson_basics() {
        assert!((pearson(&[1.0, 2.0, 3.0], &[2.0, 4.0, 6.0]) - 1.0).abs() < 1e-12);
        assert!((pearson(&[1.0, 2.0, 3.0], &[3.0, 2.0, 1.0]) + 1.0).abs() < 1e-12);
        assert!(pearson(&[1.0, 1.0], &[2.0, 3.0]).is_nan());
        assert!(pearson(&[1.0, f64::NAN, 3.0], &[1.0, 2.0, 3.0]).is_finite());
    }

    #[test]
    fn matrix_is_symmetric_with_unit_diagonal() {
        let m = correlation_matrix(&rows());
        let h = m.get(Metric::HIndex, Metric::HIndex).unwrap();
        assert!((h - 1.0).abs() < 1e-12);
        assert_eq!(
            m.get(Metric::HIndex, Metric::MedianAuthorPosition),
            m.get(Metric::MedianAuthorPosition, Metric::HIndex)
        );
        // hp metrics have no data and are left out.
        assert!(m.get(Metric::HpIndex, Metric::HIndex).is_none());
        let col = correlation_with_position(&rows());
        assert!(col.iter().all(|(metric, _)| *metric != Metric::MedianAuthorPosition));
    }

    #[test]
    fn stems_and_sorting() {
        assert_eq!(metric_file_stem(Metric::PercentFirstAuthor), "first_author");
        assert_eq!(metric_file_stem(Metric::HLeadershipIndex), "h_leadership_index");
        assert_eq!(metric_file_stem(Metric::MedianAuthorPosition), "median_author_position");

        let mut r = rows();
        sort_rows_desc(&mut r, Metric::TotalCitations);
        let names: Vec<&str> = r.iter().map(|x| x.name.as_str()).collect();
        assert_eq!(names, vec!["C", "A", "B"]);
    }
}
