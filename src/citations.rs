//! Citation totals and medians over an author's publication set.

use crate::model::Publication;
use crate::stats;

/// Sum of all citation counts. Empty input → 0.
pub fn total_citations(pubs: &[Publication]) -> u64 {
    pubs.iter().map(|p| p.citations).sum()
}

/// Median citation count. Empty input → NaN (not 0).
pub fn median_citations(pubs: &[Publication]) -> f64 {
    let values: Vec<f64> = pubs.iter().map(|p| p.citations as f64).collect();
    stats::median(&values)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pubs(counts: &[u64]) -> Vec<Publication> {
        counts
            .iter()
            .map(|&c| Publication::new(c, Vec::new()))
            .collect()
    }

    #[test]
    fn totals() {
        assert_eq!(total_citations(&pubs(&[10, 8, 5, 4, 3])), 30);
        assert_eq!(total_citations(&[]), 0);
    }

    #[test]
    fn medians() {
        assert_eq!(median_citations(&pubs(&[10, 8, 5, 4, 3])), 5.0);
        assert_eq!(median_citations(&pubs(&[1, 4])), 2.5);
        assert!(median_citations(&[]).is_nan());
    }

    #[test]
    fn input_order_is_untouched() {
        let p = pubs(&[3, 1, 2]);
        let _ = median_citations(&p);
        let order: Vec<u64> = p.iter().map(|x| x.citations).collect();
        assert_eq!(order, vec![3, 1, 2]);
    }
}
