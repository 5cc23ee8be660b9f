//! Section rendering: titled blocks of cards.
//!
//! Identified and Rare are only rendered when they have items; an empty one
//! comes back as [`SectionView::Hidden`] so the host clears and hides its
//! container. Categories is always shown, with an explicit empty-state
//! message when no category block survived filtering.

use crate::card::{MediaPolicy, Text, render_card};
use crate::classify::{CategoryGroup, Classified};
use crate::config::SectionsConfig;
use crate::types::{Item, SectionDescriptions, SectionKey};
use maud::{Markup, html};

/// Prefix of the message shown when the content document can't be loaded.
pub const LOAD_ERROR_PREFIX: &str = "Error loading previews:";

/// What a section container should show.
#[derive(Debug, Clone)]
pub enum SectionView {
    /// Container emptied and not displayed.
    Hidden,
    /// Container displayed with this markup.
    Shown(Markup),
}

impl SectionView {
    pub fn is_hidden(&self) -> bool {
        matches!(self, SectionView::Hidden)
    }

    pub fn markup(&self) -> Option<&str> {
        match self {
            SectionView::Hidden => None,
            SectionView::Shown(markup) => Some(markup.0.as_str()),
        }
    }
}

/// The three section views for one render pass.
#[derive(Debug, Clone)]
pub struct RenderedSections {
    pub identified: SectionView,
    pub rare: SectionView,
    pub categories: SectionView,
}

impl RenderedSections {
    pub fn get(&self, section: SectionKey) -> &SectionView {
        match section {
            SectionKey::Identified => &self.identified,
            SectionKey::Rare => &self.rare,
            SectionKey::Categories => &self.categories,
        }
    }

    /// Error state: Identified carries the message, the others are hidden.
    pub fn load_error(message: &str) -> Self {
        Self {
            identified: SectionView::Shown(html! {
                div.empty { (LOAD_ERROR_PREFIX) " " (Text(message)) }
            }),
            rare: SectionView::Hidden,
            categories: SectionView::Hidden,
        }
    }
}

/// Renders sections with a fixed set of labels and media rules.
pub struct SectionRenderer<'a> {
    pub labels: &'a SectionsConfig,
    pub policy: &'a MediaPolicy,
}

impl SectionRenderer<'_> {
    pub fn render_all(
        &self,
        classified: &Classified,
        descriptions: &SectionDescriptions,
    ) -> RenderedSections {
        RenderedSections {
            identified: self.featured(
                &self.labels.identified_title,
                descriptions.get(SectionKey::Identified),
                &classified.identified,
            ),
            rare: self.featured(
                &self.labels.rare_title,
                descriptions.get(SectionKey::Rare),
                &classified.rare,
            ),
            categories: self.categories(
                descriptions.get(SectionKey::Categories),
                &classified.categories,
            ),
        }
    }

    /// Identified or Rare: hidden when empty.
    pub fn featured(&self, title: &str, description: Option<&str>, items: &[&Item]) -> SectionView {
        if items.is_empty() {
            return SectionView::Hidden;
        }
        SectionView::Shown(html! {
            (section_header(title, description))
            (self.grid(items))
        })
    }

    /// Categories: always shown.
    pub fn categories(&self, description: Option<&str>, groups: &[CategoryGroup]) -> SectionView {
        SectionView::Shown(html! {
            (section_header(&self.labels.categories_title, description))
            @if groups.is_empty() {
                div.empty { (Text(&self.labels.empty_categories)) }
            } @else {
                @for group in groups {
                    div.categoryBlock {
                        h3.categoryTitle { (Text(&group.name)) }
                        (self.grid(&group.items))
                    }
                }
            }
        })
    }

    pub fn grid(&self, items: &[&Item]) -> Markup {
        html! {
            @if items.is_empty() {
                div.empty { (Text(&self.labels.empty_grid)) }
            } @else {
                div.grid {
                    @for item in items {
                        (render_card(item, self.policy))
                    }
                }
            }
        }
    }
}

pub fn section_header(title: &str, description: Option<&str>) -> Markup {
    html! {
        div.sectionHeader {
            h2.sectionTitle { (Text(title)) }
            @if let Some(sub) = description.filter(|s| !s.is_empty()) {
                p.sectionSub { (Text(sub)) }
            }
        }
    }
}
