//! # H-Index Family
//! Every variant derives a "citation-equivalent" value per publication, sorts the
//! values descending and runs the same rank-threshold search: the largest 1-based
//! rank `i` whose value is at least `i`.
//!
//! `hm_index` is the odd one out: it reports a citation count, not a rank.

use crate::error::{MetricsError, Result};
use crate::model::Publication;

/// Largest rank `i` (1-based) such that the `i`-th largest value is `>= i`.
/// Works on a private copy; the caller's slice keeps its order.
pub fn threshold_rank(values: &[f64]) -> u64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| b.total_cmp(a));
    sorted
        .iter()
        .enumerate()
        .take_while(|(i, v)| **v >= (*i + 1) as f64)
        .count() as u64
}

pub fn h_index(pubs: &[Publication]) -> u64 {
    let values: Vec<f64> = pubs.iter().map(|p| p.citations as f64).collect();
    threshold_rank(&values)
}

/// h-index on citations divided by author count; empty author lists are excluded.
pub fn h_frac_index(pubs: &[Publication]) -> u64 {
    let values: Vec<f64> = pubs
        .iter()
        .filter(|p| p.has_authors())
        .map(|p| p.citations as f64 / p.author_count() as f64)
        .collect();
    threshold_rank(&values)
}

/// Walk publications in ascending citation order, accumulating `1 / authors`;
/// the first publication whose citations fall below the running weight gives hm.
/// Zero-citation and empty-author publications are excluded; 0 when no publication
/// ever drops below the running weight.
pub fn hm_index(pubs: &[Publication]) -> u64 {
    let mut eligible: Vec<&Publication> = pubs
        .iter()
        .filter(|p| p.citations > 0 && p.has_authors())
        .collect();
    // Stable: equal citation counts keep their relative order.
    eligible.sort_by_key(|p| p.citations);

    let mut cumulative = 0.0f64;
    for p in eligible {
        cumulative += 1.0 / p.author_count() as f64;
        if (p.citations as f64) < cumulative {
            return p.citations;
        }
    }
    0
}

/// Number of publications with at least 10 citations.
pub fn i10_index(pubs: &[Publication]) -> u64 {
    pubs.iter().filter(|p| p.citations >= 10).count() as u64
}

/// Replace each publication's citation count with the h-index of its citing papers.
/// Author lists are carried over so the fractional variant can reuse them.
fn derive_citing_h(pubs: &[Publication]) -> Result<Vec<Publication>> {
    pubs.iter()
        .enumerate()
        .map(|(index, p)| {
            let citing = p
                .cited_by
                .as_deref()
                .ok_or(MetricsError::MissingCitedBy { index })?;
            Ok(Publication::new(h_index(citing), p.authors.clone()))
        })
        .collect()
}

/// h-index over the per-publication h-indices of the citing-paper sets.
pub fn hp_index(pubs: &[Publication]) -> Result<u64> {
    Ok(h_index(&derive_citing_h(pubs)?))
}

/// Fractional variant of [`hp_index`]: the derived counts are split by author count.
pub fn hp_frac_index(pubs: &[Publication]) -> Result<u64> {
    Ok(h_frac_index(&derive_citing_h(pubs)?))
}

/// True when every publication carries a citing-paper list.
pub fn has_citing_data(pubs: &[Publication]) -> bool {
    pubs.iter().all(|p| p.cited_by.is_some())
}
