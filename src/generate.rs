//! HTML page generation.
//!
//! Runs the gallery pipeline against the in-memory host and writes the
//! result as a single `index.html`:
//!
//! ```text
//! dist/
//! └── index.html      # three pre-filled section containers + modal skeleton
//! ```
//!
//! The page carries every element of the host contract: the section
//! containers (`identifiedSection`, `rareSection`, `categoriesSection`), the
//! footer year stamp, and the modal overlay with its backdrop, close control,
//! media slot, and text slots. Hidden sections are written with
//! `display:none` and no content.
//!
//! Browser behaviour comes from `static/gallery.js`, inlined after a small
//! settings block carrying the configured visibility threshold and video
//! suffixes. It binds the same rules as [`crate::visibility`] and
//! [`crate::modal`] to the live page, and stamps the footer year.
//!
//! A failed load still writes the page, in its error state, before the error
//! is returned.

use crate::app::{App, Containers, Loaded};
use crate::classify::classify;
use crate::config::{GalleryConfig, MediaConfig};
use crate::dom::{MemoryMedia, MemoryModal, MemorySection};
use crate::load::{ContentSource, LoadError};
use crate::output::Summary;
use crate::types::SectionKey;
use maud::{DOCTYPE, Markup, PreEscaped, html};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Error loading previews: {0}")]
    Load(#[from] LoadError),
}

const CSS: &str = include_str!("../static/style.css");
const JS: &str = include_str!("../static/gallery.js");

/// What a successful build wrote.
#[derive(Debug, Clone)]
pub struct Generated {
    pub index_path: PathBuf,
    pub summary: Summary,
}

type MemoryApp = App<MemorySection, MemoryMedia, MemoryModal>;

pub fn generate(config: &GalleryConfig, output_dir: &Path) -> Result<Generated, GenerateError> {
    let mut app = memory_app(config);
    let loaded = app.init(&ContentSource::parse(&config.content));

    fs::create_dir_all(output_dir)?;
    let index_path = output_dir.join("index.html");
    let page = render_page(config, app.sections());
    fs::write(&index_path, page.into_string())?;
    info!(path = %index_path.display(), "wrote gallery page");

    Ok(Generated {
        index_path,
        summary: summarize_loaded(config, &loaded?),
    })
}

/// Load and render without writing anything.
pub fn summarize(config: &GalleryConfig) -> Result<Summary, LoadError> {
    let loaded = memory_app(config).init(&ContentSource::parse(&config.content))?;
    Ok(summarize_loaded(config, &loaded))
}

fn memory_app(config: &GalleryConfig) -> MemoryApp {
    App::new(config.clone(), Containers::default(), MemoryModal::closed())
}

fn summarize_loaded(config: &GalleryConfig, loaded: &Loaded) -> Summary {
    let classified = classify(&loaded.content, config.classify_options());
    Summary::new(&classified, loaded.deferred.len())
}

/// Renders the base HTML document structure
fn base_document(title: &str, script: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (PreEscaped(CSS)) }
            }
            body {
                (content)
                script { (PreEscaped(script)) }
            }
        }
    }
}

fn section_container(key: SectionKey, container: &MemorySection) -> Markup {
    html! {
        section.section id=(key.container_id())
            style=[(!container.displayed).then_some("display:none")]
        {
            (PreEscaped(&container.markup))
        }
    }
}

/// Modal overlay skeleton, closed.
fn modal_skeleton() -> Markup {
    html! {
        div.modal id="modal" aria-hidden="true" {
            div.modalBackdrop id="modalBackdrop" {}
            div.modalPanel role="dialog" aria-modal="true" {
                button.modalClose id="modalClose" type="button" aria-label="Close" { "×" }
                div.modalMedia id="modalMedia" {}
                div.modalText {
                    h3.modalTitle id="modalTitle" {}
                    p.modalDesc id="modalDesc" {}
                }
            }
        }
    }
}

/// Settings block read by `gallery.js`, followed by the script itself.
fn client_script(media: &MediaConfig) -> String {
    let extensions = serde_json::to_string(&media.policy().video_extensions)
        .unwrap_or_else(|_| "[]".to_string())
        .replace('<', "\\u003c");
    format!(
        "const VISIBILITY_THRESHOLD = {};\nconst VIDEO_EXTENSIONS = {};\n{}",
        media.visibility_threshold, extensions, JS
    )
}

pub fn render_page(config: &GalleryConfig, sections: &Containers<MemorySection>) -> Markup {
    let content = html! {
        header.site-header {
            h1 { (config.site.title) }
        }
        main {
            @for key in SectionKey::ALL {
                (section_container(key, sections.get(key)))
            }
        }
        footer.site-footer {
            "© " span id="year" {}
        }
        (modal_skeleton())
    };
    base_document(&config.site.title, &client_script(&config.media), content)
}
