//! Shared test utilities.
//!
//! Provides an [`Item`] builder and helpers for reading back what the
//! renderer wrote.
//!
//! # Usage
//!
//! ```ignore
//! use crate::test_helpers::*;
//!
//! let fox = item("Fox").video("fox.mp4").poster("fox.jpg").rare().build();
//! let html = render_card(&fox, &MediaPolicy::default()).into_string();
//! assert_eq!(card_attribute(&html, "data-title").as_deref(), Some("Fox"));
//! ```

use crate::types::{Item, MediaKind};

// =========================================================================
// Item builder
// =========================================================================

pub struct ItemBuilder(Item);

/// Start an image item with the given title.
pub fn item(title: &str) -> ItemBuilder {
    ItemBuilder(Item {
        title: title.to_string(),
        ..Default::default()
    })
}

impl ItemBuilder {
    pub fn src(mut self, src: &str) -> Self {
        self.0.src = src.to_string();
        self
    }

    /// Make this a video item with the given primary locator.
    pub fn video(mut self, src: &str) -> Self {
        self.0.kind = MediaKind::Video;
        self.0.src = src.to_string();
        self
    }

    pub fn poster(mut self, poster: &str) -> Self {
        self.0.poster = poster.to_string();
        self
    }

    pub fn preview(mut self, preview: &str) -> Self {
        self.0.preview = preview.to_string();
        self
    }

    pub fn description(mut self, description: &str) -> Self {
        self.0.description = description.to_string();
        self
    }

    pub fn category(mut self, category: &str) -> Self {
        self.0.category = category.to_string();
        self
    }

    pub fn identified(mut self) -> Self {
        self.0.identified = true;
        self
    }

    pub fn rare(mut self) -> Self {
        self.0.rare = true;
        self
    }

    pub fn build(self) -> Item {
        self.0
    }
}

/// Titles of a list of items, in order.
pub fn titles<'a>(items: &[&'a Item]) -> Vec<&'a str> {
    items.iter().map(|i| i.title.as_str()).collect()
}

// =========================================================================
// Reading rendered markup
// =========================================================================

/// Read an attribute from the first `<article>` in `html`, unescaped.
///
/// Attribute values are always escaped, so the opening tag ends at the first
/// `>` after `<article`.
pub fn card_attribute(html: &str, name: &str) -> Option<String> {
    let start = html.find("<article")?;
    let tag_end = start + html[start..].find('>')?;
    let tag = &html[start..tag_end];
    let needle = format!(" {name}=\"");
    let value_start = tag.find(&needle)? + needle.len();
    let value_len = tag[value_start..].find('"')?;
    Some(unescape(&tag[value_start..value_start + value_len]))
}

fn unescape(value: &str) -> String {
    value
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#x27;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}
