//! Input records: authors, their publications and the ordered author lists.
//!
//! The JSON shape follows the bibliographic export the records come from
//! (`scopus_id` as identity key). Extra fields such as `title` or `doi` are ignored.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Person appearing on a publication's author list. Equality is by `id` only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorRef {
    #[serde(rename = "scopus_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
}

impl PartialEq for AuthorRef {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for AuthorRef {}

impl AuthorRef {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Publication {
    pub citations: u64,
    /// Index 0 is the lead author, the last index the senior author.
    #[serde(default)]
    pub authors: Vec<AuthorRef>,
    /// Citing papers; only needed by the hp-index family.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cited_by: Option<Vec<Publication>>,
}

impl Publication {
    pub fn new(citations: u64, authors: Vec<AuthorRef>) -> Self {
        Self {
            citations,
            authors,
            cited_by: None,
        }
    }

    /// Builder style: attach the citing-paper list.
    pub fn cited_by(mut self, citing: Vec<Publication>) -> Self {
        self.cited_by = Some(citing);
        self
    }

    pub fn author_count(&self) -> usize {
        self.authors.len()
    }

    /// 1-based position of the first author entry matching `author_id`.
    pub fn position_of(&self, author_id: &str) -> Option<usize> {
        self.authors
            .iter()
            .position(|a| a.id == author_id)
            .map(|i| i + 1)
    }

    pub fn has_authors(&self) -> bool {
        !self.authors.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Author {
    #[serde(rename = "scopus_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub publications: Vec<Publication>,
}

impl Author {
    pub fn new(id: impl Into<String>, name: impl Into<String>, publications: Vec<Publication>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            publications,
        }
    }

    /// Decode one author record. Negative or non-numeric citation counts are rejected here.
    pub fn from_json(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Decode either a single author object or an array of them.
    pub fn many_from_json(s: &str) -> Result<Vec<Self>> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum OneOrMany {
            Many(Vec<Author>),
            One(Author),
        }
        let parsed: OneOrMany = serde_json::from_str(s)?;
        Ok(match parsed {
            OneOrMany::Many(v) => v,
            OneOrMany::One(a) => vec![a],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MetricsError;

    #[test]
    fn decodes_export_shape_and_ignores_extra_fields() {
        let raw = r#"{
            "scopus_id": "123",
            "name": "Doe J.",
            "affiliation": "UNSW",
            "publications": [
                {"title": "X", "citations": 7, "doi": "10/x",
                 "authors": [{"scopus_id": "123", "name": "Doe J."}, {"scopus_id": "9", "name": "Roe R."}]},
                {"citations": 0, "authors": []}
            ]
        }"#;
        let a = Author::from_json(raw).unwrap();
        assert_eq!(a.id, "123");
        assert_eq!(a.publications.len(), 2);
        assert_eq!(a.publications[0].position_of("9"), Some(2));
        assert!(a.publications[0].cited_by.is_none());
        assert!(!a.publications[1].has_authors());
    }

    #[test]
    fn negative_citations_are_a_data_error() {
        let raw = r#"{"scopus_id": "1", "name": "", "publications": [{"citations": -3, "authors": []}]}"#;
        let err = Author::from_json(raw).unwrap_err();
        assert!(matches!(err, MetricsError::InvalidRecord(_)));
    }

    #[test]
    fn non_numeric_citations_are_a_data_error() {
        let raw = r#"{"scopus_id": "1", "publications": [{"citations": "many"}]}"#;
        assert!(matches!(
            Author::from_json(raw),
            Err(MetricsError::InvalidRecord(_))
        ));
    }

    #[test]
    fn position_resolves_first_duplicate() {
        let p = Publication::new(
            1,
            vec![
                AuthorRef::new("b", ""),
                AuthorRef::new("a", "first"),
                AuthorRef::new("a", "dup"),
            ],
        );
        assert_eq!(p.position_of("a"), Some(2));
        assert_eq!(p.position_of("zz"), None);
    }

    #[test]
    fn author_ref_equality_is_by_id() {
        assert_eq!(AuthorRef::new("1", "A. Smith"), AuthorRef::new("1", "Smith A."));
        assert_ne!(AuthorRef::new("1", "x"), AuthorRef::new("2", "x"));
    }

    #[test]
    fn many_accepts_object_or_array() {
        let one = r#"{"scopus_id": "1", "name": "a", "publications": []}"#;
        let many = r#"[{"scopus_id": "1"}, {"scopus_id": "2"}]"#;
        assert_eq!(Author::many_from_json(one).unwrap().len(), 1);
        assert_eq!(Author::many_from_json(many).unwrap().len(), 2);
    }
}
