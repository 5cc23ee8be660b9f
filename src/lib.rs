//! # Preview Gal
//!
//! Renders a JSON media catalogue into a sectioned preview gallery: cards
//! with lazy-loaded image and video previews, grouped into Identified, Rare,
//! and per-category blocks, with a full-size modal viewer.
//!
//! # Architecture: Load → Classify → Render
//!
//! ```text
//! 1. Load       content.json  →  Content        (any accepted shape → one canonical form)
//! 2. Classify   Content       →  Classified     (Identified / Rare / category blocks)
//! 3. Render     Classified    →  section markup (cards, headers, empty states)
//! ```
//!
//! Each stage is a plain function over owned or borrowed data, so the rules
//! can be tested without a browser. After rendering, two controllers react
//! to page events for the rest of the page's life:
//!
//! - [`visibility`] assigns deferred video sources the first time a video
//!   scrolls into view and pauses/plays it as it leaves and re-enters.
//! - [`modal`] opens a full-size viewer for a clicked card and closes it on
//!   backdrop, close button, or Escape.
//!
//! Both talk to the host page only through the traits in [`dom`], and the
//! [`app`] context is the one place that owns every host handle.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`load`] | Fetches/reads the content document and normalizes it |
//! | [`classify`] | Section membership and category ordering |
//! | [`card`] | One item → one card, plus media classification |
//! | [`section`] | Section headers, grids, category blocks, empty and error states |
//! | [`visibility`] | One-shot lazy source assignment and play/pause |
//! | [`modal`] | Two-state full-size viewer |
//! | [`dom`] | Host seam traits and in-memory hosts |
//! | [`app`] | Application context wiring the above together |
//! | [`generate`] | Writes the rendered page as `index.html` |
//! | [`config`] | `config.toml` loading, validation, and merging |
//! | [`types`] | Canonical content types |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## One Canonical Shape
//!
//! The content document may be an object or a legacy bare array, and any
//! item field may be missing or mistyped. All of that is resolved inside
//! [`load`]; an [`types::Item`] always has every field, with `false` and
//! empty-string defaults. A bad item becomes an empty card, never a failed
//! load.
//!
//! ## Maud For Markup
//!
//! Cards and sections are generated with [Maud](https://maud.lambda.xyz/).
//! Every interpolated value is escaped, which is exactly the guarantee the
//! card attributes need: titles and descriptions come straight from the
//! content document.
//!
//! ## Attributes, Not An Index
//!
//! A card records its type, locators, title and description as `data-*`
//! attributes. The modal rebuilds a [`card::CardAttributes`] from those at
//! click time, so there is no side table to keep in sync with the page.

pub mod app;
pub mod card;
pub mod classify;
pub mod config;
pub mod dom;
pub mod generate;
pub mod load;
pub mod modal;
pub mod output;
pub mod section;
pub mod types;
pub mod visibility;

#[cfg(test)]
pub(crate) mod test_helpers;
