//! The application context: built once, owns every host handle.
//!
//! ```text
//! App::init      load → classify → render into the three containers
//!                (or the error state when the load fails)
//! App::attach    register the rendered deferred videos for lazy playback
//! App::dispatch  route clicks and key presses to the modal
//! App::on_visibility_change  forward intersection changes
//! ```
//!
//! Each container is written only by the app's render step, and the modal
//! surface only by the modal controller.

use crate::card::{DeferredVideo, deferred_videos};
use crate::classify::{Classified, classify};
use crate::config::GalleryConfig;
use crate::dom::{MediaElement, ModalSurface, SectionContainer};
use crate::load::{ContentSource, LoadError, load};
use crate::modal::{ModalController, PageEvent};
use crate::section::{RenderedSections, SectionRenderer, SectionView};
use crate::types::{Content, Item, SectionKey};
use crate::visibility::{Intersection, MediaId, VisibilityController};
use tracing::{info, warn};

/// The three section containers supplied by the host page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Containers<C> {
    pub identified: C,
    pub rare: C,
    pub categories: C,
}

impl<C> Containers<C> {
    pub fn get(&self, section: SectionKey) -> &C {
        match section {
            SectionKey::Identified => &self.identified,
            SectionKey::Rare => &self.rare,
            SectionKey::Categories => &self.categories,
        }
    }

    fn get_mut(&mut self, section: SectionKey) -> &mut C {
        match section {
            SectionKey::Identified => &mut self.identified,
            SectionKey::Rare => &mut self.rare,
            SectionKey::Categories => &mut self.categories,
        }
    }
}

/// Result of a successful load and render.
#[derive(Debug, Clone)]
pub struct Loaded {
    pub content: Content,
    /// Deferred videos in page order, one per rendered `<video>`.
    pub deferred: Vec<DeferredVideo>,
}

pub struct App<C, M, S> {
    config: GalleryConfig,
    sections: Containers<C>,
    visibility: VisibilityController<M>,
    modal: ModalController<S>,
}

impl<C, M, S> App<C, M, S>
where
    C: SectionContainer,
    M: MediaElement,
    S: ModalSurface,
{
    pub fn new(config: GalleryConfig, sections: Containers<C>, modal_surface: S) -> Self {
        let visibility = VisibilityController::new(config.media.visibility_threshold);
        let modal = ModalController::new(modal_surface, config.media.policy());
        Self {
            config,
            sections,
            visibility,
            modal,
        }
    }

    pub fn config(&self) -> &GalleryConfig {
        &self.config
    }

    pub fn sections(&self) -> &Containers<C> {
        &self.sections
    }

    pub fn visibility(&self) -> &VisibilityController<M> {
        &self.visibility
    }

    pub fn modal(&self) -> &ModalController<S> {
        &self.modal
    }

    /// Load once and render. A failed load leaves the page in its error state
    /// and hands the error back for reporting; there is no retry.
    pub fn init(&mut self, source: &ContentSource) -> Result<Loaded, LoadError> {
        match load(source) {
            Ok(content) => {
                let deferred = self.render(&content);
                Ok(Loaded { content, deferred })
            }
            Err(err) => {
                warn!(source = %source, error = %err, "content load failed");
                self.show_load_error(&err);
                Err(err)
            }
        }
    }

    /// Render all three sections. Returns the deferred videos just rendered.
    pub fn render(&mut self, content: &Content) -> Vec<DeferredVideo> {
        let classified = classify(content, self.config.classify_options());
        let policy = self.config.media.policy();
        let renderer = SectionRenderer {
            labels: &self.config.sections,
            policy: &policy,
        };
        let rendered = renderer.render_all(&classified, &content.section_descriptions);
        self.apply(&rendered);

        let deferred: Vec<DeferredVideo> = rendered_items(&classified)
            .flat_map(|item| deferred_videos(item, &policy))
            .collect();
        info!(
            identified = classified.identified.len(),
            rare = classified.rare.len(),
            category_blocks = classified.categories.len(),
            deferred_videos = deferred.len(),
            "sections rendered"
        );
        deferred
    }

    pub fn show_load_error(&mut self, err: &LoadError) {
        self.apply(&RenderedSections::load_error(&err.to_string()));
    }

    fn apply(&mut self, rendered: &RenderedSections) {
        for key in SectionKey::ALL {
            let container = self.sections.get_mut(key);
            match rendered.get(key) {
                SectionView::Hidden => {
                    container.set_displayed(false);
                    container.clear();
                }
                SectionView::Shown(markup) => {
                    container.set_displayed(true);
                    container.replace_markup(markup.0.clone());
                }
            }
        }
    }

    /// Register the host's deferred video elements for lazy playback.
    pub fn attach(&mut self, elements: impl IntoIterator<Item = M>) -> Vec<MediaId> {
        self.visibility.observe_all(elements)
    }

    pub fn on_visibility_change(&mut self, entries: &[Intersection]) {
        self.visibility.on_intersections(entries);
    }

    /// Route a click or key press. Returns true when the modal changed state.
    pub fn dispatch(&mut self, event: PageEvent) -> bool {
        self.modal.handle(event)
    }
}

/// Items in rendering order: Identified, Rare, then each category block.
fn rendered_items<'a>(classified: &'a Classified<'a>) -> impl Iterator<Item = &'a Item> + 'a {
    classified
        .identified
        .iter()
        .chain(&classified.rare)
        .chain(classified.categories.iter().flat_map(|g| &g.items))
        .copied()
}
