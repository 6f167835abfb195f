//! Response-shape matching and record normalisation.
//!
//! Remote sources disagree on where the result array lives and on field
//! names. Shapes are tried in priority order and the first one that yields
//! an array wins; each item is then mapped onto [`ResearchRecord`] with
//! per-field fallback keys. Everything here is pure and transport-free.

use serde_json::Value;

use crate::types::ResearchRecord;

/// Title used by the alternate index when a publication has none.
pub const UNTITLED_PUBLICATION: &str = "Başlıksız Yayın";

/// Where a result array may live inside a JSON body.
///
/// A shape is a path of object keys; the empty path means the body itself
/// is the array.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseShape(pub &'static [&'static str]);

impl ResponseShape {
    /// The body is a bare array.
    pub const BARE: Self = Self(&[]);

    /// Follow the path and return the array found there, if any.
    pub fn extract<'a>(&self, body: &'a Value) -> Option<&'a [Value]> {
        let mut node = body;
        for key in self.0 {
            node = node.get(key)?;
        }
        node.as_array().map(Vec::as_slice)
    }
}

/// Shapes accepted from the webhook, highest priority first.
pub const WEBHOOK_SHAPES: &[ResponseShape] = &[
    ResponseShape::BARE,
    ResponseShape(&["data"]),
    ResponseShape(&["result"]),
    ResponseShape(&["publications"]),
];

/// Shapes accepted from the alternate index, highest priority first.
pub const DIRECT_SHAPES: &[ResponseShape] = &[
    ResponseShape(&["data", "publications"]),
    ResponseShape(&["publications"]),
];

/// Return the items of the first matching shape, or an empty slice.
pub fn extract_items<'a>(body: &'a Value, shapes: &[ResponseShape]) -> &'a [Value] {
    shapes
        .iter()
        .find_map(|shape| shape.extract(body))
        .unwrap_or(&[])
}

/// Normalise a webhook body into records.
///
/// Items without a usable `title` or `name` are dropped, so the result may
/// be empty even when the body held an array.
pub fn normalize_webhook_body(body: &Value) -> Vec<ResearchRecord> {
    extract_items(body, WEBHOOK_SHAPES)
        .iter()
        .filter_map(normalize_webhook_item)
        .collect()
}

/// Map one webhook item onto a record.
///
/// Field priority: `title`/`name`, `year`/`publicationYear`,
/// `abstract`/`summary`, then `doi`, `url` and `authors`.
pub fn normalize_webhook_item(item: &Value) -> Option<ResearchRecord> {
    if !item.is_object() {
        return None;
    }
    let title = text_field(item, &["title", "name"])?;
    Some(ResearchRecord {
        title,
        authors: authors_field(item),
        year: text_field(item, &["year", "publicationYear"]),
        abstract_text: text_field(item, &["abstract", "summary"]),
        doi: text_field(item, &["doi"]),
        url: text_field(item, &["url"]),
    })
}

/// Normalise an alternate-index body into records.
///
/// Unlike the webhook path, untitled publications are kept under
/// [`UNTITLED_PUBLICATION`].
pub fn normalize_direct_body(body: &Value) -> Vec<ResearchRecord> {
    extract_items(body, DIRECT_SHAPES)
        .iter()
        .map(|item| ResearchRecord {
            title: text_field(item, &["title"]).unwrap_or_else(|| UNTITLED_PUBLICATION.to_owned()),
            authors: authors_field(item),
            year: text_field(item, &["publicationYear"]),
            abstract_text: text_field(item, &["abstract"]),
            doi: text_field(item, &["doi"]),
            url: text_field(item, &["url"]),
        })
        .collect()
}

/// First key holding a non-empty string or a number, rendered as text.
fn text_field(item: &Value, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| scalar_text(item.get(key)?))
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn authors_field(item: &Value) -> Vec<String> {
    match item.get("authors") {
        Some(Value::Array(entries)) => entries.iter().filter_map(scalar_text).collect(),
        Some(Value::String(single)) if !single.is_empty() => vec![single.clone()],
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn bare_array_takes_priority() {
        let body = json!([{ "title": "A" }]);
        assert_eq!(extract_items(&body, WEBHOOK_SHAPES).len(), 1);
    }

    #[test]
    fn wrapper_keys_tried_in_order() {
        let body = json!({
            "result": [{ "title": "from result" }],
            "publications": [{ "title": "p1" }, { "title": "p2" }],
        });
        let records = normalize_webhook_body(&body);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "from result");
    }

    #[test]
    fn non_array_data_skipped_for_next_shape() {
        let body = json!({
            "data": { "publications": [] },
            "publications": [{ "title": "fallthrough" }],
        });
        let records = normalize_webhook_body(&body);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "fallthrough");
    }

    #[test]
    fn unrecognised_shape_yields_nothing() {
        assert!(normalize_webhook_body(&json!({ "items": [{ "title": "x" }] })).is_empty());
        assert!(normalize_webhook_body(&json!("just a string")).is_empty());
        assert!(normalize_webhook_body(&Value::Null).is_empty());
    }

    #[test]
    fn items_without_title_or_name_dropped() {
        let body = json!([
            { "title": "kept" },
            { "name": "kept by name" },
            { "title": "", "summary": "empty title" },
            { "abstract": "no title at all" },
            null,
            "stray string",
        ]);
        let titles: Vec<_> = normalize_webhook_body(&body)
            .into_iter()
            .map(|r| r.title)
            .collect();
        assert_eq!(titles, vec!["kept", "kept by name"]);
    }

    #[test]
    fn field_fallback_priority() {
        let item = json!({
            "name": "Ad",
            "publicationYear": "2020",
            "summary": "kısa özet",
            "doi": "10.1/x",
        });
        let record = normalize_webhook_item(&item).expect("record");
        assert_eq!(record.title, "Ad");
        assert_eq!(record.year.as_deref(), Some("2020"));
        assert_eq!(record.abstract_text.as_deref(), Some("kısa özet"));
        assert_eq!(record.doi.as_deref(), Some("10.1/x"));
        assert!(record.url.is_none());
    }

    #[test]
    fn primary_keys_win_over_fallback_keys() {
        let item = json!({
            "title": "Başlık",
            "name": "Ad",
            "year": 2023,
            "publicationYear": "1999",
            "abstract": "asıl",
            "summary": "yedek",
        });
        let record = normalize_webhook_item(&item).expect("record");
        assert_eq!(record.title, "Başlık");
        assert_eq!(record.year.as_deref(), Some("2023"));
        assert_eq!(record.abstract_text.as_deref(), Some("asıl"));
    }

    #[test]
    fn authors_accept_array_or_single_string() {
        let listed = normalize_webhook_item(&json!({
            "title": "T",
            "authors": ["A", 7, null, "B"],
        }))
        .expect("record");
        assert_eq!(listed.authors, vec!["A", "7", "B"]);

        let single = normalize_webhook_item(&json!({ "title": "T", "authors": "Tek Yazar" }))
            .expect("record");
        assert_eq!(single.authors, vec!["Tek Yazar"]);

        let missing = normalize_webhook_item(&json!({ "title": "T" })).expect("record");
        assert!(missing.authors.is_empty());
    }

    #[test]
    fn direct_body_prefers_nested_publications() {
        let body = json!({
            "data": { "publications": [{ "title": "nested", "publicationYear": 2021 }] },
            "publications": [{ "title": "top" }],
        });
        let records = normalize_direct_body(&body);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "nested");
        assert_eq!(records[0].year.as_deref(), Some("2021"));
    }

    #[test]
    fn direct_body_keeps_untitled_publications() {
        let body = json!({ "publications": [{ "abstract": "isimsiz" }] });
        let records = normalize_direct_body(&body);
        assert_eq!(records[0].title, UNTITLED_PUBLICATION);
        assert_eq!(records[0].abstract_text.as_deref(), Some("isimsiz"));
    }

    #[test]
    fn direct_body_without_publications_is_empty() {
        assert!(normalize_direct_body(&json!({ "data": {} })).is_empty());
    }
}
