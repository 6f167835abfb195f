//! Core types for research records and search outcomes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single academic publication in canonical form.
///
/// Every remote response shape is normalised into this record. Only the
/// title is mandatory; empty optional fields are represented as `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResearchRecord {
    /// Publication title.
    pub title: String,
    /// Authors in the order the source listed them.
    #[serde(default)]
    pub authors: Vec<String>,
    /// Publication year, kept as text because sources disagree on its type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    /// Abstract or summary text.
    #[serde(
        rename = "abstract",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub abstract_text: Option<String>,
    /// Digital Object Identifier without the resolver prefix.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doi: Option<String>,
    /// Landing page URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl ResearchRecord {
    /// Create a record with only a title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            authors: Vec::new(),
            year: None,
            abstract_text: None,
            doi: None,
            url: None,
        }
    }

    /// Attach authors.
    pub fn with_authors<I, S>(mut self, authors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.authors = authors.into_iter().map(Into::into).collect();
        self
    }

    /// Attach a publication year.
    pub fn with_year(mut self, year: impl Into<String>) -> Self {
        self.year = Some(year.into());
        self
    }

    /// Attach an abstract.
    pub fn with_abstract(mut self, text: impl Into<String>) -> Self {
        self.abstract_text = Some(text.into());
        self
    }

    /// Attach a DOI.
    pub fn with_doi(mut self, doi: impl Into<String>) -> Self {
        self.doi = Some(doi.into());
        self
    }

    /// Attach a landing page URL.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Where the record should open: its URL, else the DOI resolver link.
    pub fn link(&self) -> Option<String> {
        match (&self.url, &self.doi) {
            (Some(url), _) => Some(url.clone()),
            (None, Some(doi)) => Some(format!("https://doi.org/{doi}")),
            (None, None) => None,
        }
    }
}

/// Which path produced a result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultSource {
    /// Records normalised from the webhook response.
    Remote,
    /// Records taken from the built-in demo corpus.
    Fallback,
}

impl ResultSource {
    /// Returns the human-readable name of this source.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Remote => "remote",
            Self::Fallback => "fallback",
        }
    }
}

impl fmt::Display for ResultSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Records returned by a search together with their provenance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchOutcome {
    /// The result set, in source order.
    pub records: Vec<ResearchRecord>,
    /// Whether the records came from the webhook or the demo corpus.
    pub source: ResultSource,
}

impl SearchOutcome {
    /// Outcome built from webhook records.
    pub fn remote(records: Vec<ResearchRecord>) -> Self {
        Self {
            records,
            source: ResultSource::Remote,
        }
    }

    /// Outcome built from the demo corpus.
    pub fn fallback(records: Vec<ResearchRecord>) -> Self {
        Self {
            records,
            source: ResultSource::Fallback,
        }
    }

    /// Returns `true` when the demo corpus was used.
    pub fn is_fallback(&self) -> bool {
        self.source == ResultSource::Fallback
    }

    /// Discard provenance and keep the records.
    pub fn into_records(self) -> Vec<ResearchRecord> {
        self.records
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_fields() {
        let record = ResearchRecord::new("Başlık")
            .with_authors(["A", "B"])
            .with_year("2023")
            .with_abstract("Özet")
            .with_doi("10.1000/x");
        assert_eq!(record.title, "Başlık");
        assert_eq!(record.authors, vec!["A".to_string(), "B".to_string()]);
        assert_eq!(record.year.as_deref(), Some("2023"));
        assert_eq!(record.abstract_text.as_deref(), Some("Özet"));
        assert!(record.url.is_none());
    }

    #[test]
    fn abstract_serialized_under_abstract_key() {
        let record = ResearchRecord::new("T").with_abstract("summary text");
        let json = serde_json::to_value(&record).expect("serialize");
        assert_eq!(json["abstract"], "summary text");
        assert!(json.get("abstract_text").is_none());
    }

    #[test]
    fn empty_optionals_skipped_when_serialized() {
        let json = serde_json::to_value(ResearchRecord::new("T")).expect("serialize");
        let object = json.as_object().expect("object");
        assert!(object.contains_key("title"));
        assert!(object.contains_key("authors"));
        assert!(!object.contains_key("year"));
        assert!(!object.contains_key("doi"));
    }

    #[test]
    fn link_prefers_url_over_doi() {
        let record = ResearchRecord::new("T")
            .with_url("https://example.org/paper")
            .with_doi("10.1/abc");
        assert_eq!(record.link().as_deref(), Some("https://example.org/paper"));
    }

    #[test]
    fn link_falls_back_to_doi_resolver() {
        let record = ResearchRecord::new("T").with_doi("10.1/abc");
        assert_eq!(record.link().as_deref(), Some("https://doi.org/10.1/abc"));
        assert!(ResearchRecord::new("T").link().is_none());
    }

    #[test]
    fn outcome_constructors_set_source() {
        assert!(SearchOutcome::fallback(vec![]).is_fallback());
        let remote = SearchOutcome::remote(vec![ResearchRecord::new("T")]);
        assert_eq!(remote.source, ResultSource::Remote);
        assert_eq!(remote.into_records().len(), 1);
    }

    #[test]
    fn result_source_display() {
        assert_eq!(ResultSource::Remote.to_string(), "remote");
        assert_eq!(ResultSource::Fallback.to_string(), "fallback");
    }
}
