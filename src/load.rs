//! Content loading and normalization.
//!
//! Stage 1 of the pipeline. Reads one JSON document, either from disk or over
//! HTTP, and resolves it into a [`Content`] value. Two document shapes are
//! accepted:
//!
//! ```text
//! { "categories": [...], "items": [...], "sectionDescriptions": {...} }
//! [ item, item, ... ]                       # legacy flat list
//! ```
//!
//! The shape ambiguity ends here. Individual items are never rejected: every
//! field has a default, so a malformed entry degrades into an empty card
//! rather than failing the load.

use crate::types::{Content, Item, MediaKind, SectionDescriptions};
use reqwest::header::CACHE_CONTROL;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::fmt;
use std::fs;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, info};
use url::Url;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("could not load {url} (HTTP {status})")]
    Status { url: String, status: u16 },
    #[error("could not load {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("could not read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("content is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("content must be a JSON object or array, found {0}")]
    Shape(&'static str),
}

/// Where the content document comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentSource {
    File(PathBuf),
    Url(Url),
}

impl ContentSource {
    /// `http://` and `https://` locations are fetched, anything else is a path.
    pub fn parse(location: &str) -> Self {
        match Url::parse(location) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => ContentSource::Url(url),
            _ => ContentSource::File(PathBuf::from(location)),
        }
    }
}

impl fmt::Display for ContentSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentSource::File(path) => write!(f, "{}", path.display()),
            ContentSource::Url(url) => write!(f, "{url}"),
        }
    }
}

/// Read and normalize the content document. One attempt, no caching, no retry.
pub fn load(source: &ContentSource) -> Result<Content, LoadError> {
    let body = match source {
        ContentSource::File(path) => fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.clone(),
            source,
        })?,
        ContentSource::Url(url) => fetch(url)?,
    };
    let content = parse_document(&body)?;
    info!(
        source = %source,
        items = content.items.len(),
        categories = content.categories.len(),
        "content loaded"
    );
    Ok(content)
}

fn fetch(url: &Url) -> Result<String, LoadError> {
    let transport = |source| LoadError::Transport {
        url: url.to_string(),
        source,
    };
    let client = reqwest::blocking::Client::builder()
        .build()
        .map_err(transport)?;
    debug!(%url, "fetching content");
    let response = client
        .get(url.clone())
        .header(CACHE_CONTROL, "no-store")
        .send()
        .map_err(transport)?;
    let status = response.status();
    if !status.is_success() {
        return Err(LoadError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }
    response.text().map_err(transport)
}

/// The two accepted top-level shapes, plus a catch-all for everything else.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawDocument {
    Legacy(Vec<Value>),
    Structured(Map<String, Value>),
    Other(Value),
}

/// Parse a document body into canonical content.
pub fn parse_document(body: &str) -> Result<Content, LoadError> {
    match serde_json::from_str::<RawDocument>(body)? {
        RawDocument::Legacy(items) => Ok(Content {
            categories: Vec::new(),
            items: items.iter().map(normalize_item).collect(),
            section_descriptions: SectionDescriptions::default(),
        }),
        RawDocument::Structured(doc) => Ok(normalize_structured(&doc)),
        RawDocument::Other(value) => Err(LoadError::Shape(json_type_name(&value))),
    }
}

fn normalize_structured(doc: &Map<String, Value>) -> Content {
    let categories = match doc.get("categories") {
        Some(Value::Array(entries)) => entries.iter().map(text).collect(),
        _ => Vec::new(),
    };
    let items = match doc.get("items") {
        Some(Value::Array(entries)) => entries.iter().map(normalize_item).collect(),
        _ => Vec::new(),
    };
    let section_descriptions = match doc.get("sectionDescriptions") {
        Some(Value::Object(map)) => SectionDescriptions {
            identified: description(map.get("identified")),
            rare: description(map.get("rare")),
            categories: description(map.get("categories")),
        },
        _ => SectionDescriptions::default(),
    };
    Content {
        categories,
        items,
        section_descriptions,
    }
}

/// Build an [`Item`] from whatever JSON value sits in the item list.
pub fn normalize_item(value: &Value) -> Item {
    let Value::Object(fields) = value else {
        return Item::default();
    };
    let field = |key: &str| fields.get(key).map(text).unwrap_or_default();
    let flag = |key: &str| fields.get(key).is_some_and(truthy);

    let mut preview = field("preview");
    if preview.trim().is_empty() {
        preview = field("gif");
    }

    Item {
        kind: MediaKind::from_type_field(&field("type")),
        src: field("src"),
        poster: field("poster"),
        preview,
        title: field("title"),
        description: field("description"),
        category: field("category"),
        identified: flag("identified"),
        rare: flag("rare"),
    }
}

/// Strings pass through, numbers are stringified, everything else is empty.
fn text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    }
}

fn description(value: Option<&Value>) -> Option<String> {
    let trimmed = value.map(text)?.trim().to_string();
    (!trimmed.is_empty()).then_some(trimmed)
}

/// JSON truthiness: absent, `null`, `false`, `0` and `""` are false.
fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn structured_document() {
        let content = parse_document(
            r#"{
                "categories": ["Cats", "Dogs"],
                "items": [{"type": "video", "src": "a.mp4", "title": "A", "category": "Cats"}],
                "sectionDescriptions": {"rare": "  Hard to find  "}
            }"#,
        )
        .unwrap();
        assert_eq!(content.categories, vec!["Cats", "Dogs"]);
        assert_eq!(content.items.len(), 1);
        assert_eq!(content.items[0].kind, MediaKind::Video);
        assert_eq!(content.items[0].src, "a.mp4");
        assert_eq!(
            content.section_descriptions.rare.as_deref(),
            Some("Hard to find")
        );
        assert_eq!(content.section_descriptions.identified, None);
    }

    #[test]
    fn legacy_array_document() {
        let content = parse_document(r#"[{"src": "a.png"}, {"src": "b.png"}]"#).unwrap();
        assert!(content.categories.is_empty());
        assert_eq!(content.items.len(), 2);
        assert_eq!(content.section_descriptions, SectionDescriptions::default());
    }

    #[test]
    fn misshapen_top_level_fields_default() {
        let content = parse_document(
            r#"{"categories": "Cats", "items": {"src": "a.png"}, "sectionDescriptions": []}"#,
        )
        .unwrap();
        assert!(content.categories.is_empty());
        assert!(content.items.is_empty());
        assert_eq!(content.section_descriptions, SectionDescriptions::default());
    }

    #[test]
    fn scalar_document_is_rejected() {
        let err = parse_document("42").unwrap_err();
        assert!(matches!(err, LoadError::Shape("a number")));
        assert!(matches!(parse_document("null"), Err(LoadError::Shape("null"))));
    }

    #[test]
    fn invalid_json_is_parse_error() {
        let err = parse_document("{not json").unwrap_err();
        assert!(matches!(err, LoadError::Parse(_)));
        assert!(err.to_string().starts_with("content is not valid JSON"));
    }

    #[test]
    fn item_defaults() {
        let item = normalize_item(&json!({}));
        assert_eq!(item, Item::default());
        assert_eq!(item.kind, MediaKind::Image);
        assert_eq!(item.category_name(), "Uncategorized");
    }

    #[test]
    fn non_object_item_is_empty() {
        assert_eq!(normalize_item(&json!("a.png")), Item::default());
        assert_eq!(normalize_item(&json!(null)), Item::default());
    }

    #[test]
    fn legacy_gif_alias_used_when_preview_blank() {
        let item = normalize_item(&json!({"src": "a.png", "preview": " ", "gif": "a.gif"}));
        assert_eq!(item.preview, "a.gif");

        let item = normalize_item(&json!({"src": "a.png", "preview": "p.mp4", "gif": "a.gif"}));
        assert_eq!(item.preview, "p.mp4");
    }

    #[test]
    fn flags_follow_truthiness() {
        for (value, expected) in [
            (json!(true), true),
            (json!(false), false),
            (json!(1), true),
            (json!(0), false),
            (json!("yes"), true),
            (json!(""), false),
            (json!(null), false),
            (json!([]), true),
        ] {
            let item = normalize_item(&json!({"identified": value.clone()}));
            assert_eq!(item.identified, expected, "identified = {value}");
        }
        assert!(!normalize_item(&json!({})).rare);
    }

    #[test]
    fn numeric_text_fields_are_stringified() {
        let item = normalize_item(&json!({"title": 42, "category": 2024, "src": ["x"]}));
        assert_eq!(item.title, "42");
        assert_eq!(item.category, "2024");
        assert_eq!(item.src, "");
    }

    #[test]
    fn source_parse_distinguishes_urls() {
        assert!(matches!(
            ContentSource::parse("https://example.com/content.json"),
            ContentSource::Url(_)
        ));
        assert_eq!(
            ContentSource::parse("content.json"),
            ContentSource::File(PathBuf::from("content.json"))
        );
        assert!(matches!(
            ContentSource::parse("file:///tmp/content.json"),
            ContentSource::File(_)
        ));
    }

    #[test]
    fn load_from_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("content.json");
        fs::write(&path, r#"{"items": [{"src": "a.png", "title": "T"}]}"#).unwrap();
        let content = load(&ContentSource::File(path)).unwrap();
        assert_eq!(content.items[0].title, "T");
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let tmp = TempDir::new().unwrap();
        let err = load(&ContentSource::File(tmp.path().join("missing.json"))).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
        assert!(err.to_string().contains("missing.json"));
    }
}
