//! # Leadership Weight Model
//! Credits an author continuously by list position instead of a binary
//! first/last/middle split.
//!
//! Curve construction:
//! 1. Sample the standard normal density at `samples` points evenly spaced over
//!    `[-sigma_span, sigma_span]` and keep the first half.
//! 2. Invert (`1 - density`) so the edge is high and the centre low, then min-max
//!    normalize to `[0, 1]`.
//! 3. Dampen by author count: `floor + (1 - floor) * curve * d(n)` with
//!    `d(n) = 1 - min(ln n / (scale * ln base), 1)`. Large consortium papers squeeze
//!    the lead-author premium toward the floor.
//! 4. Positions past the middle are folded (`n - p + 1`), so first and last author
//!    always carry the same weight.
//! 5. The half-curve is stretched over the folded positions `1..=ceil(n/2)` and read
//!    by linear interpolation: the lead author gets the full premium, the centre
//!    author sits on the floor. The premium itself shrinks with `d(n)`.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::error::{MetricsError, Result};
use crate::hindex::threshold_rank;
use crate::model::Publication;
use crate::stats;

fn default_samples() -> usize {
    100
}
fn default_sigma_span() -> f64 {
    3.0
}
fn default_floor() -> f64 {
    0.3
}
fn default_dampening_base() -> f64 {
    100.0
}
fn default_dampening_scale() -> f64 {
    4.0
}

/// Tunables of the weighting curve. Defaults reproduce the canonical curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurveParams {
    #[serde(default = "default_samples")]
    pub samples: usize,
    #[serde(default = "default_sigma_span")]
    pub sigma_span: f64,
    #[serde(default = "default_floor")]
    pub floor: f64,
    #[serde(default = "default_dampening_base")]
    pub dampening_base: f64,
    #[serde(default = "default_dampening_scale")]
    pub dampening_scale: f64,
}

impl Default for CurveParams {
    fn default() -> Self {
        Self {
            samples: default_samples(),
            sigma_span: default_sigma_span(),
            floor: default_floor(),
            dampening_base: default_dampening_base(),
            dampening_scale: default_dampening_scale(),
        }
    }
}

/// Precomputed, normalized half-curve. Build once, share across publications and threads.
#[derive(Debug, Clone)]
pub struct LeadershipCurve {
    params: CurveParams,
    /// Sample positions `1..=half`.
    xp: Vec<f64>,
    /// Normalized inverted density, 1.0 at the lead-author end, 0.0 at the centre.
    normalized: Vec<f64>,
}

static DEFAULT_CURVE: Lazy<LeadershipCurve> = Lazy::new(LeadershipCurve::canonical);

fn normal_pdf(x: f64) -> f64 {
    (-0.5 * x * x).exp() / (2.0 * std::f64::consts::PI).sqrt()
}

impl LeadershipCurve {
    pub fn new(params: CurveParams) -> Result<Self> {
        if params.samples < 4 {
            return Err(MetricsError::InvalidCurve(format!(
                "samples must be >= 4, got {}",
                params.samples
            )));
        }
        if params.sigma_span.is_nan() || params.sigma_span <= 0.0 {
            return Err(MetricsError::InvalidCurve(format!(
                "sigma_span must be positive, got {}",
                params.sigma_span
            )));
        }
        if params.dampening_base.is_nan()
            || params.dampening_base <= 1.0
            || params.dampening_scale.is_nan()
            || params.dampening_scale <= 0.0
        {
            return Err(MetricsError::InvalidCurve(
                "dampening base must be > 1 and scale > 0".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&params.floor) {
            return Err(MetricsError::InvalidCurve(format!(
                "floor must lie in [0, 1], got {}",
                params.floor
            )));
        }

        let n = params.samples;
        let span = params.sigma_span;
        let step = 2.0 * span / (n - 1) as f64;
        let half = n / 2;

        let inverted: Vec<f64> = (0..half)
            .map(|i| 1.0 - normal_pdf(-span + step * i as f64))
            .collect();

        let max = inverted.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let min = inverted.iter().copied().fold(f64::INFINITY, f64::min);
        let range = max - min;
        if range.is_nan() || range <= 0.0 {
            return Err(MetricsError::InvalidCurve(
                "sampled curve is flat".to_string(),
            ));
        }

        Ok(Self {
            params,
            xp: (1..=half).map(|p| p as f64).collect(),
            normalized: inverted.iter().map(|v| (v - min) / range).collect(),
        })
    }

    /// The 100-point, 3-sigma, floor-0.3 curve.
    pub fn canonical() -> Self {
        Self::new(CurveParams::default()).expect("default curve parameters are valid")
    }

    pub fn params(&self) -> &CurveParams {
        &self.params
    }

    /// Author-count dampening in `[0, 1]`; 1 for a sole author.
    pub fn dampening(&self, n: usize) -> f64 {
        let p = &self.params;
        let ratio = (n as f64).ln() / (p.dampening_scale * p.dampening_base.ln());
        1.0 - ratio.min(1.0)
    }

    /// Half-curve coordinate for a folded position: `1..=ceil(n/2)` is stretched over
    /// `1..=samples/2`, so the lead author reads the first sample and the centre
    /// author the last.
    fn sample_at(&self, folded: usize, n: usize) -> f64 {
        let centre = n.div_ceil(2);
        if centre <= 1 {
            return 1.0;
        }
        let last = self.xp.len() as f64;
        1.0 + (folded - 1) as f64 * (last - 1.0) / (centre - 1) as f64
    }

    /// Weight of the author at 1-based `position` in a list of `n` authors.
    pub fn weight(&self, position: usize, n: usize) -> Result<f64> {
        if n == 0 || position == 0 || position > n {
            return Err(MetricsError::InvalidPosition { position, n });
        }
        let folded = if position as f64 > (n + 1) as f64 / 2.0 {
            n - position + 1
        } else {
            position
        };
        let curve = stats::interp(self.sample_at(folded, n), &self.xp, &self.normalized);
        let floor = self.params.floor;
        Ok(floor + (1.0 - floor) * curve * self.dampening(n))
    }

    /// Weights for every position `1..=n`.
    pub fn weights(&self, n: usize) -> Result<Vec<f64>> {
        (1..=n).map(|p| self.weight(p, n)).collect()
    }

    /// Weighted citation value credited to `author_id` for one publication.
    /// `None` when the author is not on the list (publication excluded).
    pub fn credited_citations(&self, author_id: &str, p: &Publication) -> Result<Option<f64>> {
        if p.citations == 0 {
            return Ok(Some(0.0));
        }
        match p.position_of(author_id) {
            Some(pos) => Ok(Some(p.citations as f64 * self.weight(pos, p.author_count())?)),
            None => Ok(None),
        }
    }

    /// h-index over leadership-weighted citation values.
    pub fn h_leadership_index(&self, author_id: &str, pubs: &[Publication]) -> Result<u64> {
        let mut values = Vec::with_capacity(pubs.len());
        for p in pubs {
            if let Some(v) = self.credited_citations(author_id, p)? {
                values.push(v);
            }
        }
        Ok(threshold_rank(&values))
    }
}

/// Weight on the canonical curve.
pub fn leadership_weight(position: usize, n: usize) -> Result<f64> {
    DEFAULT_CURVE.weight(position, n)
}

/// h-leadership index on the canonical curve.
pub fn h_leadership_index(author_id: &str, pubs: &[Publication]) -> Result<u64> {
    DEFAULT_CURVE.h_leadership_index(author_id, pubs)
}

pub fn default_curve() -> &'static LeadershipCurve {
    &DEFAULT_CURVE
}
