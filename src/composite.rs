//! Composite scores mixing h-index family outputs with authorship-role shares.

use crate::authorship::{
    percent_single_author, percent_single_or_first_author, percent_single_or_first_or_last_author,
};
use crate::citations::total_citations;
use crate::hindex::{h_index, hm_index};
use crate::model::Publication;

/// `h * (first% + last% + single%) / 100`. Also used for the leadership variant.
pub fn adjusted(index: u64, pct_first: f64, pct_last: f64, pct_single: f64) -> f64 {
    index as f64 * (pct_first + pct_last + pct_single) / 100.0
}

pub fn h_adjusted(h: u64, pct_first: f64, pct_last: f64, pct_single: f64) -> f64 {
    adjusted(h, pct_first, pct_last, pct_single)
}

pub fn h_leadership_adjusted(h_leadership: u64, pct_first: f64, pct_last: f64, pct_single: f64) -> f64 {
    adjusted(h_leadership, pct_first, pct_last, pct_single)
}

/// Sum of natural logs of total citations, h, hm and the three single/first/last shares.
///
/// Any zero input makes the sum `-inf`; it is returned unmodified so callers can
/// special-case it before display.
pub fn cscore(author_id: &str, pubs: &[Publication]) -> f64 {
    [
        total_citations(pubs) as f64,
        h_index(pubs) as f64,
        hm_index(pubs) as f64,
        percent_single_author(pubs),
        percent_single_or_first_author(author_id, pubs),
        percent_single_or_first_or_last_author(author_id, pubs),
    ]
    .iter()
    .map(|v| v.ln())
    .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AuthorRef;

    fn p(citations: u64, ids: &[&str]) -> Publication {
        Publication::new(
            citations,
            ids.iter().map(|id| AuthorRef::new(*id, "")).collect(),
        )
    }

    #[test]
    fn adjusted_scales_by_role_share() {
        assert_eq!(h_adjusted(10, 50.0, 20.0, 30.0), 10.0);
        assert_eq!(h_leadership_adjusted(8, 25.0, 0.0, 0.0), 2.0);
        assert_eq!(h_adjusted(0, 100.0, 100.0, 100.0), 0.0);
    }

    #[test]
    fn cscore_is_negative_infinity_on_zero_input() {
        // No zero-citation publication with a fractional weight above it → hm = 0.
        let pubs = vec![p(10, &["A", "B"]), p(9, &["A", "B"])];
        let c = cscore("A", &pubs);
        assert!(c.is_infinite() && c.is_sign_negative());
    }

    #[test]
    fn cscore_finite_when_all_inputs_positive() {
        // hm: ascending 1 (cum 1.0), 1 (cum 2.0 → 1 < 2) → hm = 1.
        let pubs = vec![p(1, &["A"]), p(1, &["A"]), p(3, &["A", "B"])];
        let expected = (5f64).ln()
            + (1f64).ln()
            + (1f64).ln()
            + (200.0f64 / 3.0).ln()
            + (100f64).ln()
            + (100f64).ln();
        assert!((cscore("A", &pubs) - expected).abs() < 1e-9);
    }
}
