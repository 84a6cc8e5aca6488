//! # Metric Engine
//! Pure, testable logic that maps one `Author` → one `MetricRow`.
//! No I/O, no logging, no shared state: rows are returned by value and the caller
//! owns whatever collection they are appended to.

use crate::authorship::{
    mean_coauthors, median_author_position, median_coauthors, percent_first_author,
    percent_last_author, percent_single_author,
};
use crate::citations::{median_citations, total_citations};
use crate::composite::{cscore, h_adjusted, h_leadership_adjusted};
use crate::error::Result;
use crate::hindex::{h_frac_index, h_index, has_citing_data, hm_index, hp_frac_index, hp_index, i10_index};
use crate::leadership::{default_curve, LeadershipCurve};
use crate::model::Author;
use crate::row::MetricRow;

/// Compute every metric for `author` on the canonical leadership curve.
pub fn compute_row(author: &Author) -> Result<MetricRow> {
    compute_row_with(author, default_curve())
}

/// Same as [`compute_row`] with an explicit leadership curve.
pub fn compute_row_with(author: &Author, curve: &LeadershipCurve) -> Result<MetricRow> {
    let id = author.id.as_str();
    let pubs = author.publications.as_slice();

    let h = h_index(pubs);
    let h_leadership = curve.h_leadership_index(id, pubs)?;
    let pct_first = percent_first_author(id, pubs);
    let pct_last = percent_last_author(id, pubs);
    let pct_single = percent_single_author(pubs);

    // hp metrics only when the citing-paper lists came along with the record.
    let (hp, hp_frac) = if !pubs.is_empty() && has_citing_data(pubs) {
        (Some(hp_index(pubs)?), Some(hp_frac_index(pubs)?))
    } else {
        (None, None)
    };

    Ok(MetricRow {
        name: author.name.clone(),
        author_id: author.id.clone(),
        publications: pubs.len() as u64,
        total_citations: total_citations(pubs),
        median_citations: median_citations(pubs),
        h_index: h,
        h_frac_index: h_frac_index(pubs),
        hm_index: hm_index(pubs),
        h_leadership_index: h_leadership,
        h_adjusted: h_adjusted(h, pct_first, pct_last, pct_single),
        h_leadership_adjusted: h_leadership_adjusted(h_leadership, pct_first, pct_last, pct_single),
        pct_first_author: pct_first,
        pct_last_author: pct_last,
        pct_single_author: pct_single,
        median_author_position: median_author_position(id, pubs),
        cscore: cscore(id, pubs),
        i10_index: i10_index(pubs),
        mean_authors: mean_coauthors(pubs),
        median_authors: median_coauthors(pubs),
        hp_index: hp,
        hp_frac_index: hp_frac,
    })
}
