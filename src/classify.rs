//! Partitioning items into the Identified, Rare and Categories sections.
//!
//! Precedence is Identified > Rare > Categories: an item flagged both
//! `identified` and `rare` only ever appears under Identified, and featured
//! items stay out of Categories unless
//! [`ClassifyOptions::include_featured_in_categories`] is set.
//!
//! ## Category Order
//!
//! Category blocks are ordered by the explicit `categories` list from the
//! document first, then by any names only discovered on items, sorted:
//!
//! ```text
//! explicit:  ["B", "A"]
//! items:     A, C, B, Z, c
//! order:     B, A, C, Z        # "c" is already seen as "C"
//! ```
//!
//! Deduplication is case-insensitive, but grouping is not: items are bucketed
//! under their exact trimmed category, and each order entry looks up its own
//! spelling. An order entry whose bucket is empty produces no block.

use crate::types::{Content, Item};
use deunicode::deunicode;
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClassifyOptions {
    /// Also list Identified and Rare items under their category.
    pub include_featured_in_categories: bool,
}

/// One category block: its display label and the items under it.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryGroup<'a> {
    pub name: String,
    pub items: Vec<&'a Item>,
}

/// The three renderable groups.
#[derive(Debug, Clone, PartialEq)]
pub struct Classified<'a> {
    pub identified: Vec<&'a Item>,
    pub rare: Vec<&'a Item>,
    pub categories: Vec<CategoryGroup<'a>>,
}

impl Classified<'_> {
    /// Number of cards across all category blocks.
    pub fn categorized_count(&self) -> usize {
        self.categories.iter().map(|g| g.items.len()).sum()
    }
}

pub fn classify(content: &Content, options: ClassifyOptions) -> Classified<'_> {
    Classified {
        identified: identified(&content.items),
        rare: rare(&content.items),
        categories: categorized(&content.items, &content.categories, options),
    }
}

/// Items flagged `identified`, in source order.
pub fn identified(items: &[Item]) -> Vec<&Item> {
    items.iter().filter(|item| item.identified).collect()
}

/// Items flagged `rare` but not `identified`, in source order.
pub fn rare(items: &[Item]) -> Vec<&Item> {
    items
        .iter()
        .filter(|item| item.rare && !item.identified)
        .collect()
}

/// Category blocks in display order, empty blocks omitted.
pub fn categorized<'a>(
    items: &'a [Item],
    explicit: &[String],
    options: ClassifyOptions,
) -> Vec<CategoryGroup<'a>> {
    let source: Vec<&Item> = items
        .iter()
        .filter(|item| options.include_featured_in_categories || !item.is_featured())
        .collect();

    let mut buckets: HashMap<&str, Vec<&Item>> = HashMap::new();
    for &item in &source {
        buckets.entry(item.category_name()).or_default().push(item);
    }

    category_order(explicit, &source)
        .into_iter()
        .filter_map(|name| {
            let items = buckets.remove(name.as_str())?;
            Some(CategoryGroup { name, items })
        })
        .collect()
}

/// Explicit names (trimmed, blanks dropped) followed by sorted extras.
pub fn category_order(explicit: &[String], items: &[&Item]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut order: Vec<String> = explicit
        .iter()
        .map(|name| name.trim())
        .filter(|name| !name.is_empty())
        .filter(|name| seen.insert(name.to_lowercase()))
        .map(str::to_string)
        .collect();

    let mut extras: Vec<String> = Vec::new();
    for item in items {
        let name = item.category_name();
        if seen.insert(name.to_lowercase()) {
            extras.push(name.to_string());
        }
    }
    extras.sort_by(|a, b| locale_cmp(a, b));

    order.extend(extras);
    order
}

/// Locale-style ordering of display names.
///
/// Letters compare without accents or case first, so `"Éclair"` sorts between
/// `"apple"` and `"Zebra"`. Ties go to the unaccented spelling, then to
/// lowercase (`"apple" < "Apple" < "banana"`).
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        .then_with(|| b.cmp(a))
}

/// Primary sort key: ASCII transliteration, lowercased.
fn collation_key(name: &str) -> String {
    deunicode(name).to_lowercase()
}
