//! Output shape: one flat metric row per author.
//!
//! Serialized keys are the display names used by the reports. Non-finite values
//! (NaN medians on empty input, `-inf` c-scores) serialize as JSON `null`.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Numeric columns of a [`MetricRow`], in report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Metric {
    Publications,
    TotalCitations,
    MedianCitations,
    HIndex,
    HFracIndex,
    HmIndex,
    HLeadershipIndex,
    HAdjusted,
    HLeadershipAdjusted,
    PercentFirstAuthor,
    PercentLastAuthor,
    PercentSingleAuthor,
    MedianAuthorPosition,
    CScore,
    I10Index,
    MeanAuthors,
    MedianAuthors,
    HpIndex,
    HpFracIndex,
}

impl Metric {
    pub const ALL: [Metric; 19] = [
        Metric::Publications,
        Metric::TotalCitations,
        Metric::MedianCitations,
        Metric::HIndex,
        Metric::HFracIndex,
        Metric::HmIndex,
        Metric::HLeadershipIndex,
        Metric::HAdjusted,
        Metric::HLeadershipAdjusted,
        Metric::PercentFirstAuthor,
        Metric::PercentLastAuthor,
        Metric::PercentSingleAuthor,
        Metric::MedianAuthorPosition,
        Metric::CScore,
        Metric::I10Index,
        Metric::MeanAuthors,
        Metric::MedianAuthors,
        Metric::HpIndex,
        Metric::HpFracIndex,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Metric::Publications => "Publications",
            Metric::TotalCitations => "Total citations",
            Metric::MedianCitations => "Median citations",
            Metric::HIndex => "h-index",
            Metric::HFracIndex => "h-frac-index",
            Metric::HmIndex => "hm-index",
            Metric::HLeadershipIndex => "h-leadership-index",
            Metric::HAdjusted => "h-adjusted",
            Metric::HLeadershipAdjusted => "h-leadership-adjusted",
            Metric::PercentFirstAuthor => "% first author",
            Metric::PercentLastAuthor => "% last author",
            Metric::PercentSingleAuthor => "% single author",
            Metric::MedianAuthorPosition => "Median author position",
            Metric::CScore => "cscore",
            Metric::I10Index => "i10-index",
            Metric::MeanAuthors => "Average number of Authors",
            Metric::MedianAuthors => "Median number of Authors",
            Metric::HpIndex => "hp-index",
            Metric::HpFracIndex => "hp-frac-index",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Metric {
    type Err = String;

    /// Accepts the display name, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Metric::ALL
            .iter()
            .copied()
            .find(|m| m.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| format!("unknown metric: {wanted}"))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricRow {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Scopus ID")]
    pub author_id: String,
    #[serde(rename = "Publications")]
    pub publications: u64,
    #[serde(rename = "Total citations")]
    pub total_citations: u64,
    #[serde(rename = "Median citations")]
    pub median_citations: f64,
    #[serde(rename = "h-index")]
    pub h_index: u64,
    #[serde(rename = "h-frac-index")]
    pub h_frac_index: u64,
    #[serde(rename = "hm-index")]
    pub hm_index: u64,
    #[serde(rename = "h-leadership-index")]
    pub h_leadership_index: u64,
    #[serde(rename = "h-adjusted")]
    pub h_adjusted: f64,
    #[serde(rename = "h-leadership-adjusted")]
    pub h_leadership_adjusted: f64,
    #[serde(rename = "% first author")]
    pub pct_first_author: f64,
    #[serde(rename = "% last author")]
    pub pct_last_author: f64,
    #[serde(rename = "% single author")]
    pub pct_single_author: f64,
    #[serde(rename = "Median author position")]
    pub median_author_position: f64,
    #[serde(rename = "cscore")]
    pub cscore: f64,
    #[serde(rename = "i10-index")]
    pub i10_index: u64,
    #[serde(rename = "Average number of Authors")]
    pub mean_authors: f64,
    #[serde(rename = "Median number of Authors")]
    pub median_authors: f64,
    #[serde(rename = "hp-index", skip_serializing_if = "Option::is_none")]
    pub hp_index: Option<u64>,
    #[serde(rename = "hp-frac-index", skip_serializing_if = "Option::is_none")]
    pub hp_frac_index: Option<u64>,
}

impl MetricRow {
    /// Value of one column as `f64`; absent hp metrics read as NaN.
    pub fn value(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Publications => self.publications as f64,
            Metric::TotalCitations => self.total_citations as f64,
            Metric::MedianCitations => self.median_citations,
            Metric::HIndex => self.h_index as f64,
            Metric::HFracIndex => self.h_frac_index as f64,
            Metric::HmIndex => self.hm_index as f64,
            Metric::HLeadershipIndex => self.h_leadership_index as f64,
            Metric::HAdjusted => self.h_adjusted,
            Metric::HLeadershipAdjusted => self.h_leadership_adjusted,
            Metric::PercentFirstAuthor => self.pct_first_author,
            Metric::PercentLastAuthor => self.pct_last_author,
            Metric::PercentSingleAuthor => self.pct_single_author,
            Metric::MedianAuthorPosition => self.median_author_position,
            Metric::CScore => self.cscore,
            Metric::I10Index => self.i10_index as f64,
            Metric::MeanAuthors => self.mean_authors,
            Metric::MedianAuthors => self.median_authors,
            Metric::HpIndex => self.hp_index.map_or(f64::NAN, |v| v as f64),
            Metric::HpFracIndex => self.hp_frac_index.map_or(f64::NAN, |v| v as f64),
        }
    }

    /// `(display name, value)` pairs in report order.
    pub fn entries(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        Metric::ALL.iter().map(move |m| (m.as_str(), self.value(*m)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> MetricRow {
        MetricRow {
            name: "Doe J.".into(),
            author_id: "42".into(),
            publications: 0,
            total_citations: 0,
            median_citations: f64::NAN,
            h_index: 0,
            h_frac_index: 0,
            hm_index: 0,
            h_leadership_index: 0,
            h_adjusted: 0.0,
            h_leadership_adjusted: 0.0,
            pct_first_author: 0.0,
            pct_last_author: 0.0,
            pct_single_author: 0.0,
            median_author_position: f64::NAN,
            cscore: f64::NEG_INFINITY,
            i10_index: 0,
            mean_authors: f64::NAN,
            median_authors: f64::NAN,
            hp_index: None,
            hp_frac_index: None,
        }
    }

    #[test]
    fn serialize_uses_display_names_and_nulls() {
        let v = serde_json::to_value(row()).unwrap();
        assert_eq!(v["Name"], serde_json::json!("Doe J."));
        assert_eq!(v["h-leadership-index"], serde_json::json!(0));
        assert!(v["Median citations"].is_null());
        assert!(v["cscore"].is_null());
        assert!(v.get("hp-index").is_none());
    }

    #[test]
    fn metric_names_round_trip_through_from_str() {
        for m in Metric::ALL {
            assert_eq!(m.as_str().parse::<Metric>().unwrap(), m);
        }
        assert_eq!("H-LEADERSHIP-INDEX".parse::<Metric>().unwrap(), Metric::HLeadershipIndex);
        assert!("h-bogus".parse::<Metric>().is_err());
    }

    #[test]
    fn value_reads_optional_as_nan() {
        let r = row();
        assert!(r.value(Metric::HpIndex).is_nan());
        assert_eq!(r.entries().count(), Metric::ALL.len());
    }
}
