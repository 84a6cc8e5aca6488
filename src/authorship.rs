//! # Authorship Position Analyzer
//! Percentages and positional statistics over the *qualifying set*: publications
//! with at least one recorded author. Publications with an empty author list never
//! enter a denominator.
//!
//! Author-specific ratios (first/last and their unions) only look at qualifying
//! publications that list the author; a publication without the author is skipped,
//! never counted at a sentinel position.
//!
//! Zero denominators give 0 for percentages, NaN for medians and means.

use crate::model::Publication;
use crate::stats;

fn qualifying(pubs: &[Publication]) -> impl Iterator<Item = &Publication> {
    pubs.iter().filter(|p| p.has_authors())
}

/// `(publication, 1-based position)` for every qualifying publication listing `author_id`.
fn positioned<'a>(
    author_id: &'a str,
    pubs: &'a [Publication],
) -> impl Iterator<Item = (&'a Publication, usize)> + 'a {
    qualifying(pubs).filter_map(move |p| p.position_of(author_id).map(|pos| (p, pos)))
}

fn percent(hits: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        hits as f64 * 100.0 / total as f64
    }
}

fn percent_by_role<F>(author_id: &str, pubs: &[Publication], is_role: F) -> f64
where
    F: Fn(&Publication, usize) -> bool,
{
    let mut total = 0usize;
    let mut hits = 0usize;
    for (p, pos) in positioned(author_id, pubs) {
        total += 1;
        if is_role(p, pos) {
            hits += 1;
        }
    }
    percent(hits, total)
}

fn is_single(p: &Publication) -> bool {
    p.author_count() == 1
}

fn is_last(p: &Publication, pos: usize) -> bool {
    pos == p.author_count()
}

pub fn percent_first_author(author_id: &str, pubs: &[Publication]) -> f64 {
    percent_by_role(author_id, pubs, |_, pos| pos == 1)
}

pub fn percent_last_author(author_id: &str, pubs: &[Publication]) -> f64 {
    percent_by_role(author_id, pubs, is_last)
}

/// Share of the qualifying set written by exactly one author.
pub fn percent_single_author(pubs: &[Publication]) -> f64 {
    let mut total = 0usize;
    let mut hits = 0usize;
    for p in qualifying(pubs) {
        total += 1;
        if is_single(p) {
            hits += 1;
        }
    }
    percent(hits, total)
}

pub fn percent_single_or_first_author(author_id: &str, pubs: &[Publication]) -> f64 {
    percent_by_role(author_id, pubs, |p, pos| is_single(p) || pos == 1)
}

pub fn percent_single_or_first_or_last_author(author_id: &str, pubs: &[Publication]) -> f64 {
    percent_by_role(author_id, pubs, |p, pos| {
        is_single(p) || pos == 1 || is_last(p, pos)
    })
}

/// Median 1-based position of `author_id` across the publications that list it.
pub fn median_author_position(author_id: &str, pubs: &[Publication]) -> f64 {
    let positions: Vec<f64> = positioned(author_id, pubs)
        .map(|(_, pos)| pos as f64)
        .collect();
    stats::median(&positions)
}

pub fn mean_coauthors(pubs: &[Publication]) -> f64 {
    stats::mean(&author_counts(pubs))
}

pub fn median_coauthors(pubs: &[Publication]) -> f64 {
    stats::median(&author_counts(pubs))
}

fn author_counts(pubs: &[Publication]) -> Vec<f64> {
    qualifying(pubs).map(|p| p.author_count() as f64).collect()
}
