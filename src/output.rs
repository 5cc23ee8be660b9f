//! CLI output formatting.
//!
//! Output is **section-centric**: each section leads with its heading and
//! card count, followed by indented card lines. Category blocks are listed
//! in their rendered order so the ordering rules can be checked at a glance.
//!
//! ```text
//! Identified (1)
//!     001 Red Fox
//! Rare Series (hidden)
//! Categories (3)
//!     001 Cats (2)
//!         001 Tabby
//!         002 (cat-02.png)
//!     002 Uncategorized (1)
//!         001 Lamp
//! Deferred videos: 2
//! ```
//!
//! Each `format_*` function returns `Vec<String>` and does no I/O; the
//! `print_*` wrappers write to stdout.

use crate::classify::Classified;
use crate::config::SectionsConfig;
use crate::types::Item;
use std::path::Path;

/// Owned snapshot of one render pass, for reporting.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Summary {
    pub identified: Vec<String>,
    pub rare: Vec<String>,
    pub categories: Vec<(String, Vec<String>)>,
    pub deferred_videos: usize,
}

impl Summary {
    pub fn new(classified: &Classified, deferred_videos: usize) -> Self {
        Self {
            identified: card_lines(&classified.identified),
            rare: card_lines(&classified.rare),
            categories: classified
                .categories
                .iter()
                .map(|g| (g.name.clone(), card_lines(&g.items)))
                .collect(),
            deferred_videos,
        }
    }
}

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Titled cards show their title; untitled ones fall back to the locator in parens.
fn card_label(item: &Item) -> String {
    if item.title.trim().is_empty() {
        format!("({})", item.src)
    } else {
        item.title.clone()
    }
}

fn card_lines(items: &[&Item]) -> Vec<String> {
    items.iter().map(|item| card_label(item)).collect()
}

fn featured_lines(title: &str, cards: &[String], depth: usize) -> Vec<String> {
    if cards.is_empty() {
        return vec![format!("{}{} (hidden)", indent(depth), title)];
    }
    let mut lines = vec![format!("{}{} ({})", indent(depth), title, cards.len())];
    for (i, card) in cards.iter().enumerate() {
        lines.push(format!("{}{} {}", indent(depth + 1), format_index(i + 1), card));
    }
    lines
}

/// Section-by-section listing of a render pass.
pub fn format_summary(summary: &Summary, labels: &SectionsConfig) -> Vec<String> {
    let mut lines = featured_lines(&labels.identified_title, &summary.identified, 0);
    lines.extend(featured_lines(&labels.rare_title, &summary.rare, 0));

    let total: usize = summary.categories.iter().map(|(_, cards)| cards.len()).sum();
    lines.push(format!("{} ({})", labels.categories_title, total));
    if summary.categories.is_empty() {
        lines.push(format!("{}{}", indent(1), labels.empty_categories));
    }
    for (i, (name, cards)) in summary.categories.iter().enumerate() {
        lines.push(format!(
            "{}{} {} ({})",
            indent(1),
            format_index(i + 1),
            name,
            cards.len()
        ));
        for (j, card) in cards.iter().enumerate() {
            lines.push(format!("{}{} {}", indent(2), format_index(j + 1), card));
        }
    }

    lines.push(format!("Deferred videos: {}", summary.deferred_videos));
    lines
}

pub fn print_summary(summary: &Summary, labels: &SectionsConfig) {
    for line in format_summary(summary, labels) {
        println!("{}", line);
    }
}

/// Closing line of the `build` command.
pub fn format_generate_output(summary: &Summary, index_path: &Path) -> Vec<String> {
    let cards = summary.identified.len()
        + summary.rare.len()
        + summary
            .categories
            .iter()
            .map(|(_, cards)| cards.len())
            .sum::<usize>();
    vec![
        format!("Gallery → {}", index_path.display()),
        format!(
            "Generated {} cards in {} category blocks",
            cards,
            summary.categories.len()
        ),
    ]
}

pub fn print_generate_output(summary: &Summary, index_path: &Path) {
    for line in format_generate_output(summary, index_path) {
        println!("{}", line);
    }
}
