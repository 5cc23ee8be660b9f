//! Card rendering: one [`Item`] → one self-describing `<article class="card">`.
//!
//! A card carries everything the click handler needs as `data-*` attributes,
//! so opening the modal never consults a side index:
//!
//! ```text
//! <article class="card" data-type data-src data-preview data-poster data-title data-desc>
//!   <div class="media" data-media="main">…</div>            # no preview
//!
//!   <div class="media split">                                # with preview
//!     <div class="media-box" data-media="main">…</div>
//!     <div class="media-box" data-media="preview">…</div>
//!   </div>
//!   <div class="content"><h3 class="title">…</h3><p class="desc">…</p></div>
//! </article>
//! ```
//!
//! Videos never get a `src` at render time. The locator sits in `data-src`
//! until the [visibility controller](crate::visibility) assigns it, so a page
//! full of clips doesn't fetch all of them on load. Images use the browser's
//! native `loading="lazy"`.

use crate::types::{Item, MediaKind};
use maud::{Markup, Render, html};

pub const ATTR_TYPE: &str = "data-type";
pub const ATTR_SRC: &str = "data-src";
pub const ATTR_PREVIEW: &str = "data-preview";
pub const ATTR_POSTER: &str = "data-poster";
pub const ATTR_TITLE: &str = "data-title";
pub const ATTR_DESC: &str = "data-desc";
/// Tags a media box as `main` or `preview`.
pub const ATTR_MEDIA: &str = "data-media";

/// Class shared by every `<video>` whose source is deferred.
pub const DEFERRED_VIDEO_CLASS: &str = "previewVideo";

/// Text spliced into markup, with both quote kinds escaped.
///
/// Maud's own escaping leaves `'` alone; this is safe in any attribute quoting.
#[derive(Debug, Clone, Copy)]
pub struct Text<'a>(pub &'a str);

impl Render for Text<'_> {
    fn render_to(&self, buffer: &mut String) {
        for c in self.0.chars() {
            match c {
                '&' => buffer.push_str("&amp;"),
                '<' => buffer.push_str("&lt;"),
                '>' => buffer.push_str("&gt;"),
                '"' => buffer.push_str("&quot;"),
                '\'' => buffer.push_str("&#39;"),
                _ => buffer.push(c),
            }
        }
    }
}

/// Decides whether a locator points at a video, by lowercased file suffix.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaPolicy {
    /// Lowercase suffixes including the dot, e.g. `".mp4"`.
    pub video_extensions: Vec<String>,
}

impl Default for MediaPolicy {
    fn default() -> Self {
        Self {
            video_extensions: vec![".mp4".into(), ".webm".into(), ".mov".into()],
        }
    }
}

impl MediaPolicy {
    /// Classify a preview locator. Query strings and fragments are ignored.
    pub fn classify(&self, locator: &str) -> MediaClass {
        let path = locator
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .to_lowercase();
        if self
            .video_extensions
            .iter()
            .any(|ext| path.ends_with(ext.as_str()))
        {
            MediaClass::Video
        } else {
            MediaClass::Image
        }
    }
}

/// How a locator is presented: as a video element or an image element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaClass {
    Video,
    Image,
}

/// Which of a card's two media boxes a locator belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaRole {
    Main,
    Preview,
}

impl MediaRole {
    pub fn as_str(self) -> &'static str {
        match self {
            MediaRole::Main => "main",
            MediaRole::Preview => "preview",
        }
    }

    pub fn from_attr(value: &str) -> Option<Self> {
        match value {
            "main" => Some(MediaRole::Main),
            "preview" => Some(MediaRole::Preview),
            _ => None,
        }
    }
}

/// A video element rendered without its source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeferredVideo {
    pub role: MediaRole,
    pub locator: String,
}

/// The attribute set recorded on a card, and read back when it is clicked.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CardAttributes {
    pub kind: MediaKind,
    pub src: String,
    pub preview: String,
    pub poster: String,
    pub title: String,
    pub description: String,
}

impl CardAttributes {
    pub fn from_item(item: &Item) -> Self {
        Self {
            kind: item.kind,
            src: item.src.clone(),
            preview: item.preview.clone(),
            poster: item.poster.clone(),
            title: item.title.clone(),
            description: item.description.clone(),
        }
    }

    /// Rebuild from a card element's attributes. Missing attributes are empty.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |name: &str| lookup(name).unwrap_or_default();
        Self {
            kind: MediaKind::from_type_field(&get(ATTR_TYPE)),
            src: get(ATTR_SRC),
            preview: get(ATTR_PREVIEW),
            poster: get(ATTR_POSTER),
            title: get(ATTR_TITLE),
            description: get(ATTR_DESC),
        }
    }

    /// The trimmed preview locator, if there is one.
    pub fn preview_locator(&self) -> Option<&str> {
        let trimmed = self.preview.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }
}

/// Every video on the card whose source must be assigned lazily.
pub fn deferred_videos(item: &Item, policy: &MediaPolicy) -> Vec<DeferredVideo> {
    let mut videos = Vec::new();
    if item.kind == MediaKind::Video {
        videos.push(DeferredVideo {
            role: MediaRole::Main,
            locator: item.src.clone(),
        });
    }
    let preview = item.preview.trim();
    if !preview.is_empty() && policy.classify(preview) == MediaClass::Video {
        videos.push(DeferredVideo {
            role: MediaRole::Preview,
            locator: preview.to_string(),
        });
    }
    videos
}

pub fn render_card(item: &Item, policy: &MediaPolicy) -> Markup {
    let attrs = CardAttributes::from_item(item);
    html! {
        article.card
            data-type=(attrs.kind.as_str())
            data-src=(Text(&attrs.src))
            data-preview=(Text(&attrs.preview))
            data-poster=(Text(&attrs.poster))
            data-title=(Text(&attrs.title))
            data-desc=(Text(&attrs.description))
        {
            @if let Some(preview) = attrs.preview_locator() {
                div.media.split {
                    div.media-box data-media=(MediaRole::Main.as_str()) {
                        (primary_media(&attrs))
                    }
                    div.media-box data-media=(MediaRole::Preview.as_str()) {
                        (preview_media(preview, &attrs.title, policy))
                    }
                }
            } @else {
                div.media data-media=(MediaRole::Main.as_str()) {
                    (primary_media(&attrs))
                }
            }
            div.content {
                h3.title { (Text(&attrs.title)) }
                p.desc { (Text(&attrs.description)) }
            }
        }
    }
}

fn primary_media(attrs: &CardAttributes) -> Markup {
    match attrs.kind {
        MediaKind::Video => html! {
            video class=(DEFERRED_VIDEO_CLASS)
                muted loop playsinline preload="metadata"
                poster=[non_empty(&attrs.poster).map(Text)]
                data-src=(Text(&attrs.src)) {}
        },
        MediaKind::Image => html! {
            img loading="lazy" src=(Text(&attrs.src)) alt={ (Text(&attrs.title)) " preview" };
        },
    }
}

fn preview_media(locator: &str, title: &str, policy: &MediaPolicy) -> Markup {
    match policy.classify(locator) {
        MediaClass::Video => html! {
            video class={ (DEFERRED_VIDEO_CLASS) " previewClip" }
                muted loop playsinline preload="metadata"
                data-src=(Text(locator)) {}
        },
        MediaClass::Image => html! {
            img.previewImage loading="lazy" src=(Text(locator)) alt={ (Text(title)) " animated preview" };
        },
    }
}

fn non_empty(value: &str) -> Option<&str> {
    (!value.is_empty()).then_some(value)
}
