// tests/engine_examples.rs
//
// Worked examples over one small publication set:
//   10:[A]  8:[A,B]  5:[A,B,C]  4:[D]  3:[D]

use leadership_metrics::authorship::{
    median_author_position, percent_first_author, percent_last_author, percent_single_author,
};
use leadership_metrics::citations::{median_citations, total_citations};
use leadership_metrics::hindex::{h_frac_index, h_index, hm_index, i10_index};
use leadership_metrics::{compute_row, h_leadership_index, leadership_weight};
use leadership_metrics::{Author, AuthorRef, Publication};

fn p(citations: u64, ids: &[&str]) -> Publication {
    Publication::new(
        citations,
        ids.iter().map(|id| AuthorRef::new(*id, format!("Name {id}"))).collect(),
    )
}

fn pubs() -> Vec<Publication> {
    vec![
        p(10, &["A"]),
        p(8, &["A", "B"]),
        p(5, &["A", "B", "C"]),
        p(4, &["D"]),
        p(3, &["D"]),
    ]
}

#[test]
fn h_index_of_example_is_four() {
    assert_eq!(h_index(&pubs()), 4);
}

#[test]
fn citation_totals_and_median() {
    assert_eq!(total_citations(&pubs()), 30);
    assert_eq!(median_citations(&pubs()), 5.0);
}

#[test]
fn a_is_first_on_every_paper_it_appears_on() {
    assert_eq!(percent_first_author("A", &pubs()), 100.0);
    assert!((percent_last_author("A", &pubs()) - 100.0 / 3.0).abs() < 1e-9);
    assert_eq!(median_author_position("A", &pubs()), 1.0);
    // 3 of 5 papers have a single author.
    assert_eq!(percent_single_author(&pubs()), 60.0);
}

#[test]
fn other_h_variants() {
    // 10, 4, 5/3, 4, 3 → 10, 4, 4, 3, 1.67 → 3
    assert_eq!(h_frac_index(&pubs()), 3);
    assert_eq!(i10_index(&pubs()), 1);
    // Ascending 3,4,5,8,10 with weights 1,1,1/3,1/2,1 never drop below the running sum.
    assert_eq!(hm_index(&pubs()), 0);
}

#[test]
fn sole_author_weight_is_one() {
    assert!((leadership_weight(1, 1).unwrap() - 1.0).abs() < 1e-12);
}

#[test]
fn leadership_index_for_a() {
    // A: 10·w(1,1)=10, 8·w(1,2)≈7.8, 5·w(1,3)≈4.8 → 3
    assert_eq!(h_leadership_index("A", &pubs()).unwrap(), 3);
    // D: 4 and 3 as sole author → 2
    assert_eq!(h_leadership_index("D", &pubs()).unwrap(), 2);
    assert_eq!(h_leadership_index("nobody", &pubs()).unwrap(), 0);
}

#[test]
fn full_row_serializes_with_display_names() {
    let author = Author::new("A", "Alpha A.", pubs());
    let row = compute_row(&author).unwrap();
    assert_eq!(row.h_index, 4);
    assert_eq!(row.h_leadership_index, 3);
    // h-adjusted = 4 · (100 + 33.3 + 60) / 100
    let expected = 4.0 * (100.0 + 100.0 / 3.0 + 60.0) / 100.0;
    assert!((row.h_adjusted - expected).abs() < 1e-9);

    let v = serde_json::to_value(&row).unwrap();
    for key in [
        "Name",
        "Publications",
        "Total citations",
        "Median citations",
        "h-index",
        "h-frac-index",
        "hm-index",
        "h-leadership-index",
        "h-adjusted",
        "h-leadership-adjusted",
        "% first author",
        "% last author",
        "% single author",
        "Median author position",
        "i10-index",
        "Average number of Authors",
        "Median number of Authors",
    ] {
        assert!(v.get(key).is_some(), "row missing '{key}'");
    }
    // hm = 0 → ln(0) → -inf → null
    assert!(v["cscore"].is_null());
}
