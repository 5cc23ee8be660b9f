//! The full-size viewer overlay.
//!
//! Two states, `Closed` and `Open`. Page events are routed through one
//! exhaustive table:
//!
//! | state  | event                         | effect                       |
//! |--------|-------------------------------|------------------------------|
//! | Closed | click on a card / media box   | open with that card          |
//! | Open   | click on backdrop or close    | close                        |
//! | Open   | cancel key (Escape)           | close                        |
//! | Open   | click inside the modal        | nothing, never reaches cards |
//! | Open   | click on a card               | nothing                      |
//! | any    | anything else                 | nothing                      |
//!
//! Each open creates a new media element; closing destroys it.

use crate::card::{CardAttributes, MediaClass, MediaPolicy, MediaRole};
use crate::dom::{ModalMedia, ModalSurface};
use crate::types::MediaKind;
use tracing::debug;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ModalState {
    #[default]
    Closed,
    Open,
}

/// What a click landed on, resolved by the host.
#[derive(Debug, Clone, PartialEq)]
pub enum ClickTarget {
    /// A card, or one of its tagged media boxes.
    Card {
        card: CardAttributes,
        media: Option<MediaRole>,
    },
    /// Anywhere inside the open modal's panel.
    ModalContent,
    Backdrop,
    CloseControl,
    Elsewhere,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    Other,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value.
    pub fn from_name(name: &str) -> Self {
        match name {
            "Escape" | "Esc" => Key::Escape,
            _ => Key::Other,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent {
    Click(ClickTarget),
    KeyDown(Key),
}

pub struct ModalController<S> {
    surface: S,
    state: ModalState,
    policy: MediaPolicy,
}

impl<S: ModalSurface> ModalController<S> {
    pub fn new(surface: S, policy: MediaPolicy) -> Self {
        Self {
            surface,
            state: ModalState::Closed,
            policy,
        }
    }

    pub fn state(&self) -> ModalState {
        self.state
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Route one page event. Returns true when the state changed.
    pub fn handle(&mut self, event: PageEvent) -> bool {
        match (self.state, event) {
            (ModalState::Closed, PageEvent::Click(ClickTarget::Card { card, media })) => {
                self.open(&card, media);
                true
            }
            (ModalState::Open, PageEvent::Click(ClickTarget::Backdrop | ClickTarget::CloseControl))
            | (ModalState::Open, PageEvent::KeyDown(Key::Escape)) => {
                self.close();
                true
            }
            (ModalState::Open, PageEvent::Click(ClickTarget::ModalContent | ClickTarget::Card { .. }))
            | (_, PageEvent::Click(ClickTarget::Elsewhere))
            | (ModalState::Closed, PageEvent::Click(ClickTarget::ModalContent))
            | (ModalState::Closed, PageEvent::Click(ClickTarget::Backdrop | ClickTarget::CloseControl))
            | (_, PageEvent::KeyDown(_)) => false,
        }
    }

    fn open(&mut self, card: &CardAttributes, media: Option<MediaRole>) {
        let shown = modal_media(card, media, &self.policy);
        debug!(title = %card.title, ?media, "opening modal");
        self.surface.set_text(&card.title, &card.description);
        self.surface.clear_media();
        self.surface.show_media(shown);
        self.surface.set_open(true);
        self.surface.set_aria_hidden(false);
        self.surface.set_scroll_locked(true);
        self.state = ModalState::Open;
    }

    fn close(&mut self) {
        debug!("closing modal");
        self.surface.set_open(false);
        self.surface.set_aria_hidden(true);
        self.surface.clear_media();
        self.surface.set_scroll_locked(false);
        self.state = ModalState::Closed;
    }
}

/// Pick what to show: the preview when its box was clicked and it exists,
/// otherwise the primary media.
pub fn modal_media(card: &CardAttributes, media: Option<MediaRole>, policy: &MediaPolicy) -> ModalMedia {
    let alt = if card.title.is_empty() {
        "Preview".to_string()
    } else {
        card.title.clone()
    };

    if media == Some(MediaRole::Preview) {
        if let Some(preview) = card.preview_locator() {
            return match policy.classify(preview) {
                MediaClass::Video => ModalMedia::Video {
                    src: preview.to_string(),
                    poster: None,
                },
                MediaClass::Image => ModalMedia::Image {
                    src: preview.to_string(),
                    alt,
                },
            };
        }
    }

    match card.kind {
        MediaKind::Video => ModalMedia::Video {
            src: card.src.clone(),
            poster: (!card.poster.is_empty()).then(|| card.poster.clone()),
        },
        MediaKind::Image => ModalMedia::Image {
            src: card.src.clone(),
            alt,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::MemoryModal;

    fn controller() -> ModalController<MemoryModal> {
        ModalController::new(MemoryModal::closed(), MediaPolicy::default())
    }

    fn video_card() -> CardAttributes {
        CardAttributes {
            kind: MediaKind::Video,
            src: "clip.mp4".into(),
            poster: "clip.jpg".into(),
            preview: "clip.gif".into(),
            title: "Clip".into(),
            description: "A clip".into(),
        }
    }

    fn click_card(card: CardAttributes, media: Option<MediaRole>) -> PageEvent {
        PageEvent::Click(ClickTarget::Card { card, media })
    }

    #[test]
    fn opens_with_primary_media() {
        let mut modal = controller();
        assert!(modal.handle(click_card(video_card(), Some(MediaRole::Main))));

        let surface = modal.surface();
        assert_eq!(modal.state(), ModalState::Open);
        assert!(surface.open);
        assert!(!surface.aria_hidden);
        assert!(surface.scroll_locked);
        assert_eq!(surface.title, "Clip");
        assert_eq!(surface.description, "A clip");
        assert_eq!(
            surface.media,
            Some(ModalMedia::Video {
                src: "clip.mp4".into(),
                poster: Some("clip.jpg".into())
            })
        );
    }

    #[test]
    fn preview_box_shows_preview() {
        let mut modal = controller();
        modal.handle(click_card(video_card(), Some(MediaRole::Preview)));
        assert_eq!(
            modal.surface().media,
            Some(ModalMedia::Image {
                src: "clip.gif".into(),
                alt: "Clip".into()
            })
        );
    }

    #[test]
    fn video_preview_shows_as_video() {
        let card = CardAttributes {
            preview: "clip-teaser.webm".into(),
            ..video_card()
        };
        let media = modal_media(&card, Some(MediaRole::Preview), &MediaPolicy::default());
        assert_eq!(
            media,
            ModalMedia::Video {
                src: "clip-teaser.webm".into(),
                poster: None
            }
        );
    }

    #[test]
    fn preview_box_without_preview_falls_back_to_primary() {
        let card = CardAttributes {
            kind: MediaKind::Image,
            src: "a.png".into(),
            ..Default::default()
        };
        let media = modal_media(&card, Some(MediaRole::Preview), &MediaPolicy::default());
        assert_eq!(
            media,
            ModalMedia::Image {
                src: "a.png".into(),
                alt: "Preview".into()
            }
        );
    }

    #[test]
    fn card_body_click_shows_primary() {
        let media = modal_media(&video_card(), None, &MediaPolicy::default());
        assert!(matches!(media, ModalMedia::Video { ref src, .. } if src == "clip.mp4"));
    }

    #[test]
    fn video_without_poster() {
        let card = CardAttributes {
            poster: String::new(),
            ..video_card()
        };
        let media = modal_media(&card, None, &MediaPolicy::default());
        assert_eq!(
            media,
            ModalMedia::Video {
                src: "clip.mp4".into(),
                poster: None
            }
        );
    }

    #[test]
    fn closes_on_backdrop_close_and_escape() {
        for event in [
            PageEvent::Click(ClickTarget::Backdrop),
            PageEvent::Click(ClickTarget::CloseControl),
            PageEvent::KeyDown(Key::Escape),
        ] {
            let mut modal = controller();
            modal.handle(click_card(video_card(), None));
            assert!(modal.handle(event.clone()), "{event:?}");

            let surface = modal.surface();
            assert_eq!(modal.state(), ModalState::Closed);
            assert!(!surface.open);
            assert!(surface.aria_hidden);
            assert!(!surface.scroll_locked);
            assert_eq!(surface.media, None);
        }
    }

    #[test]
    fn clicks_inside_open_modal_are_ignored() {
        let mut modal = controller();
        modal.handle(click_card(video_card(), None));
        assert!(!modal.handle(PageEvent::Click(ClickTarget::ModalContent)));
        assert_eq!(modal.state(), ModalState::Open);
    }

    #[test]
    fn card_clicks_while_open_are_ignored() {
        let mut modal = controller();
        modal.handle(click_card(video_card(), None));
        let other = CardAttributes {
            title: "Other".into(),
            ..video_card()
        };
        assert!(!modal.handle(click_card(other, None)));
        assert_eq!(modal.surface().title, "Clip");
        assert_eq!(modal.surface().media_created, 1);
    }

    #[test]
    fn closed_modal_ignores_close_events() {
        let mut modal = controller();
        assert!(!modal.handle(PageEvent::KeyDown(Key::Escape)));
        assert!(!modal.handle(PageEvent::Click(ClickTarget::Backdrop)));
        assert!(!modal.handle(PageEvent::Click(ClickTarget::Elsewhere)));
        assert_eq!(modal.surface(), &MemoryModal::closed());
    }

    #[test]
    fn other_keys_do_nothing() {
        let mut modal = controller();
        modal.handle(click_card(video_card(), None));
        assert!(!modal.handle(PageEvent::KeyDown(Key::from_name("Enter"))));
        assert_eq!(modal.state(), ModalState::Open);
    }

    #[test]
    fn media_recreated_on_every_open() {
        let mut modal = controller();
        for _ in 0..3 {
            modal.handle(click_card(video_card(), None));
            modal.handle(PageEvent::KeyDown(Key::Escape));
        }
        assert_eq!(modal.surface().media_created, 3);
        assert_eq!(modal.surface().media, None);
    }

    #[test]
    fn key_names() {
        assert_eq!(Key::from_name("Escape"), Key::Escape);
        assert_eq!(Key::from_name("Esc"), Key::Escape);
        assert_eq!(Key::from_name("a"), Key::Other);
    }
}
