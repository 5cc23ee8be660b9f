//! The seam between the gallery and whatever hosts it.
//!
//! The host page owns the actual elements: three section containers, the
//! deferred `<video>` elements inside rendered cards, and the modal overlay.
//! Controllers only talk to them through these traits. The `Memory*` types
//! are plain in-memory hosts: the generator renders through them, and tests
//! use their counters to observe what a controller did.

use crate::card::DeferredVideo;
use thiserror::Error;

/// A container the host page provides for one section.
pub trait SectionContainer {
    fn replace_markup(&mut self, markup: String);
    fn clear(&mut self);
    fn set_displayed(&mut self, displayed: bool);
}

/// The host refused a playback request (e.g. autoplay policy).
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("playback request refused")]
pub struct PlaybackRefused;

/// A `<video>` rendered with its source withheld.
pub trait MediaElement {
    /// The assigned source, if any.
    fn source(&self) -> Option<&str>;
    /// The locator recorded at render time, waiting to be assigned.
    fn deferred_source(&self) -> &str;
    fn assign_source(&mut self, locator: &str);
    fn play(&mut self) -> Result<(), PlaybackRefused>;
    fn pause(&mut self);
}

/// The single media element shown inside the modal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalMedia {
    /// Rendered with controls and inline playback.
    Video { src: String, poster: Option<String> },
    Image { src: String, alt: String },
}

/// The modal overlay: text slots, a media slot, and its visibility flags.
pub trait ModalSurface {
    fn set_text(&mut self, title: &str, description: &str);
    /// Replace whatever media is showing with a freshly created element.
    fn show_media(&mut self, media: ModalMedia);
    fn clear_media(&mut self);
    fn set_open(&mut self, open: bool);
    fn set_aria_hidden(&mut self, hidden: bool);
    /// Lock or restore scrolling of the page behind the overlay.
    fn set_scroll_locked(&mut self, locked: bool);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemorySection {
    pub markup: String,
    pub displayed: bool,
}

impl Default for MemorySection {
    fn default() -> Self {
        Self {
            markup: String::new(),
            displayed: true,
        }
    }
}

impl SectionContainer for MemorySection {
    fn replace_markup(&mut self, markup: String) {
        self.markup = markup;
    }

    fn clear(&mut self) {
        self.markup.clear();
    }

    fn set_displayed(&mut self, displayed: bool) {
        self.displayed = displayed;
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryMedia {
    pub deferred: String,
    pub source: Option<String>,
    pub playing: bool,
    /// Simulates a host that rejects every play request.
    pub refuse_playback: bool,
    pub assignments: usize,
    pub play_requests: usize,
    pub pause_requests: usize,
}

impl MemoryMedia {
    pub fn new(deferred: impl Into<String>) -> Self {
        Self {
            deferred: deferred.into(),
            ..Default::default()
        }
    }
}

impl From<&DeferredVideo> for MemoryMedia {
    fn from(video: &DeferredVideo) -> Self {
        MemoryMedia::new(video.locator.clone())
    }
}

impl MediaElement for MemoryMedia {
    fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    fn deferred_source(&self) -> &str {
        &self.deferred
    }

    fn assign_source(&mut self, locator: &str) {
        self.source = Some(locator.to_string());
        self.assignments += 1;
    }

    fn play(&mut self) -> Result<(), PlaybackRefused> {
        self.play_requests += 1;
        if self.refuse_playback {
            return Err(PlaybackRefused);
        }
        self.playing = true;
        Ok(())
    }

    fn pause(&mut self) {
        self.pause_requests += 1;
        self.playing = false;
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryModal {
    pub open: bool,
    pub aria_hidden: bool,
    pub scroll_locked: bool,
    pub title: String,
    pub description: String,
    pub media: Option<ModalMedia>,
    /// How many media elements have been created over the modal's life.
    pub media_created: usize,
}

impl MemoryModal {
    /// A closed modal, as the host page ships it.
    pub fn closed() -> Self {
        Self {
            aria_hidden: true,
            ..Default::default()
        }
    }
}

impl ModalSurface for MemoryModal {
    fn set_text(&mut self, title: &str, description: &str) {
        self.title = title.to_string();
        self.description = description.to_string();
    }

    fn show_media(&mut self, media: ModalMedia) {
        self.media = Some(media);
        self.media_created += 1;
    }

    fn clear_media(&mut self) {
        self.media = None;
    }

    fn set_open(&mut self, open: bool) {
        self.open = open;
    }

    fn set_aria_hidden(&mut self, hidden: bool) {
        self.aria_hidden = hidden;
    }

    fn set_scroll_locked(&mut self, locked: bool) {
        self.scroll_locked = locked;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_media_counts_requests() {
        let mut media = MemoryMedia::new("a.mp4");
        assert_eq!(media.source(), None);
        media.assign_source("a.mp4");
        assert_eq!(media.source(), Some("a.mp4"));
        assert!(media.play().is_ok());
        assert!(media.playing);
        media.pause();
        assert!(!media.playing);
        assert_eq!(
            (media.assignments, media.play_requests, media.pause_requests),
            (1, 1, 1)
        );
    }

    #[test]
    fn memory_media_can_refuse_playback() {
        let mut media = MemoryMedia {
            refuse_playback: true,
            ..MemoryMedia::new("a.mp4")
        };
        assert_eq!(media.play(), Err(PlaybackRefused));
        assert!(!media.playing);
    }

    #[test]
    fn memory_section_clear_keeps_display_flag() {
        let mut section = MemorySection::default();
        section.replace_markup("<p>x</p>".into());
        section.set_displayed(false);
        section.clear();
        assert_eq!(section.markup, "");
        assert!(!section.displayed);
    }
}
