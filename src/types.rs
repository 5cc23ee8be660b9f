//! Canonical content types shared by every stage of the pipeline.
//!
//! The loader resolves whatever shape the source document had into these
//! types once. Nothing downstream ever sees raw JSON.

/// Category name used when an item has no category (or only whitespace).
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Whether an item's primary media is a still image or a video.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MediaKind {
    #[default]
    Image,
    Video,
}

impl MediaKind {
    pub fn as_str(self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Video => "video",
        }
    }

    /// Parse a `type` field. Anything other than `"video"` is an image.
    pub fn from_type_field(value: &str) -> Self {
        if value == "video" {
            MediaKind::Video
        } else {
            MediaKind::Image
        }
    }
}

/// One media entry from the source document, with every field defaulted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Item {
    pub kind: MediaKind,
    /// Primary media locator.
    pub src: String,
    /// Still image shown before a primary video plays. Empty when absent.
    pub poster: String,
    /// Secondary media locator, already resolved from `preview` or legacy `gif`.
    pub preview: String,
    pub title: String,
    pub description: String,
    /// Raw category text as given; see [`Item::category_name`] for the grouping key.
    pub category: String,
    pub identified: bool,
    pub rare: bool,
}

impl Item {
    /// Grouping key: trimmed category, or [`UNCATEGORIZED`] when blank.
    pub fn category_name(&self) -> &str {
        normalize_category(&self.category)
    }

    /// True when the preview locator is non-empty after trimming.
    pub fn has_preview(&self) -> bool {
        !self.preview.trim().is_empty()
    }

    /// Whether this item lives in the Identified or Rare section by default.
    pub fn is_featured(&self) -> bool {
        self.identified || self.rare
    }
}

/// Trim a category name, falling back to [`UNCATEGORIZED`] when empty.
pub fn normalize_category(raw: &str) -> &str {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        UNCATEGORIZED
    } else {
        trimmed
    }
}

/// The three presentation sections, in page order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKey {
    Identified,
    Rare,
    Categories,
}

impl SectionKey {
    pub const ALL: [SectionKey; 3] = [
        SectionKey::Identified,
        SectionKey::Rare,
        SectionKey::Categories,
    ];

    /// Key used in the `sectionDescriptions` object and as the container id stem.
    pub fn key(self) -> &'static str {
        match self {
            SectionKey::Identified => "identified",
            SectionKey::Rare => "rare",
            SectionKey::Categories => "categories",
        }
    }

    /// DOM id of the container the host page provides for this section.
    pub fn container_id(self) -> &'static str {
        match self {
            SectionKey::Identified => "identifiedSection",
            SectionKey::Rare => "rareSection",
            SectionKey::Categories => "categoriesSection",
        }
    }
}

/// Optional subtitle per section. Blank strings are stored as `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SectionDescriptions {
    pub identified: Option<String>,
    pub rare: Option<String>,
    pub categories: Option<String>,
}

impl SectionDescriptions {
    pub fn get(&self, section: SectionKey) -> Option<&str> {
        match section {
            SectionKey::Identified => self.identified.as_deref(),
            SectionKey::Rare => self.rare.as_deref(),
            SectionKey::Categories => self.categories.as_deref(),
        }
    }
}

/// Normalized content document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Content {
    /// Explicit category order hints, exactly as given (not yet trimmed).
    pub categories: Vec<String>,
    pub items: Vec<Item>,
    pub section_descriptions: SectionDescriptions,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_category_is_uncategorized() {
        assert_eq!(normalize_category(""), UNCATEGORIZED);
        assert_eq!(normalize_category("   "), UNCATEGORIZED);
        assert_eq!(normalize_category("  Cats "), "Cats");
    }

    #[test]
    fn media_kind_only_video_for_exact_string() {
        assert_eq!(MediaKind::from_type_field("video"), MediaKind::Video);
        assert_eq!(MediaKind::from_type_field("Video"), MediaKind::Image);
        assert_eq!(MediaKind::from_type_field(""), MediaKind::Image);
    }

    #[test]
    fn has_preview_ignores_whitespace() {
        let item = Item {
            preview: "  ".to_string(),
            ..Default::default()
        };
        assert!(!item.has_preview());
    }

    #[test]
    fn section_descriptions_lookup() {
        let desc = SectionDescriptions {
            rare: Some("Hard to find".to_string()),
            ..Default::default()
        };
        assert_eq!(desc.get(SectionKey::Rare), Some("Hard to find"));
        assert_eq!(desc.get(SectionKey::Identified), None);
    }
}
