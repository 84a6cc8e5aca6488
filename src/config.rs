//! Batch/report configuration: `METRICS_CONFIG_PATH`, then `config/metrics.toml`,
//! then `config/metrics.json`, then built-in defaults. Metric names are validated here.

use anyhow::{anyhow, bail, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::leadership::CurveParams;
use crate::row::Metric;

pub const ENV_CONFIG_PATH: &str = "METRICS_CONFIG_PATH";

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}
fn default_results_dir() -> PathBuf {
    PathBuf::from("results")
}
fn default_rank_by() -> String {
    Metric::HLeadershipIndex.as_str().to_string()
}
fn default_summary_metrics() -> Vec<String> {
    vec![Metric::HLeadershipIndex.as_str().to_string()]
}

/// Raw file shape; names are validated into [`MetricsConfig`].
#[derive(Debug, Deserialize)]
struct RawConfig {
    #[serde(default = "default_data_dir")]
    data_dir: PathBuf,
    #[serde(default = "default_results_dir")]
    results_dir: PathBuf,
    #[serde(default)]
    affiliations: Vec<String>,
    #[serde(default = "default_rank_by")]
    rank_by: String,
    #[serde(default = "default_summary_metrics")]
    summary_metrics: Vec<String>,
    #[serde(default)]
    curve: CurveParams,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MetricsConfig {
    /// Root of the per-affiliation author directories.
    pub data_dir: PathBuf,
    pub results_dir: PathBuf,
    /// Sub-directories of `data_dir` to process; empty means all of them.
    pub affiliations: Vec<String>,
    /// Column the report rows are ordered by (descending).
    pub rank_by: Metric,
    pub summary_metrics: Vec<Metric>,
    pub curve: CurveParams,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            results_dir: default_results_dir(),
            affiliations: Vec::new(),
            rank_by: Metric::HLeadershipIndex,
            summary_metrics: vec![Metric::HLeadershipIndex],
            curve: CurveParams::default(),
        }
    }
}

impl TryFrom<RawConfig> for MetricsConfig {
    type Error = anyhow::Error;

    fn try_from(raw: RawConfig) -> Result<Self> {
        let rank_by = raw
            .rank_by
            .parse::<Metric>()
            .map_err(|e| anyhow!("rank_by: {e}"))?;
        let mut summary_metrics = Vec::with_capacity(raw.summary_metrics.len());
        for name in &raw.summary_metrics {
            let m = name
                .parse::<Metric>()
                .map_err(|e| anyhow!("summary_metrics: {e}"))?;
            if !summary_metrics.contains(&m) {
                summary_metrics.push(m);
            }
        }

        let mut curve = raw.curve;
        if curve.samples < 4 {
            bail!("curve.samples must be >= 4, got {}", curve.samples);
        }
        curve.floor = curve.floor.clamp(0.0, 1.0);

        let affiliations = clean_list(raw.affiliations);

        Ok(Self {
            data_dir: raw.data_dir,
            results_dir: raw.results_dir,
            affiliations,
            rank_by,
            summary_metrics,
            curve,
        })
    }
}

/// Load configuration from an explicit path. Supports TOML or JSON formats.
pub fn load_config_from(path: &Path) -> Result<MetricsConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading metrics config from {}", path.display()))?;
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    let raw = parse_config(&content, ext.as_str())
        .with_context(|| format!("parsing metrics config {}", path.display()))?;
    raw.try_into()
}

/// Load configuration using env var + fallbacks:
/// 1) $METRICS_CONFIG_PATH
/// 2) config/metrics.toml
/// 3) config/metrics.json
/// 4) built-in defaults
pub fn load_config_default() -> Result<MetricsConfig> {
    if let Ok(p) = std::env::var(ENV_CONFIG_PATH) {
        let pb = PathBuf::from(p);
        if pb.exists() {
            return load_config_from(&pb);
        } else {
            return Err(anyhow!("{ENV_CONFIG_PATH} points to non-existent path"));
        }
    }
    let toml_p = PathBuf::from("config/metrics.toml");
    if toml_p.exists() {
        return load_config_from(&toml_p);
    }
    let json_p = PathBuf::from("config/metrics.json");
    if json_p.exists() {
        return load_config_from(&json_p);
    }
    Ok(MetricsConfig::default())
}

fn parse_config(s: &str, hint_ext: &str) -> Result<RawConfig> {
    match hint_ext {
        "toml" => Ok(toml::from_str(s)?),
        "json" => Ok(serde_json::from_str(s)?),
        // No usable extension: JSON objects start with '{', anything else is tried as TOML.
        _ if s.trim_start().starts_with('{') => Ok(serde_json::from_str(s)?),
        _ => toml::from_str(s).map_err(|e| anyhow!("unsupported config format: {e}")),
    }
}

fn clean_list(items: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(items.len());
    for it in items {
        let t = it.trim();
        if !t.is_empty() && !out.iter().any(|o| o == t) {
            out.push(t.to_string());
        }
    }
    out
}
