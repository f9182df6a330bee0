// ABOUTME: Element selection over a parsed page using a compiled selection plan.
// ABOUTME: Finds description elements, the tag container, the name heading, and listing anchors.

//! Element selection.
//!
//! Key behaviors:
//! - Missing elements are empty selections, never errors.
//! - Document order is preserved for every multi-element selection.
//! - No text is extracted here; see [`crate::normalize`].

use scraper::{ElementRef, Html};

use crate::plan::CompiledPlan;

/// Outcome of looking up the heading that carries the entry name.
#[derive(Debug, Clone, Copy)]
pub enum NameHeading<'a> {
    Found(ElementRef<'a>),
    NotFound,
}

impl<'a> NameHeading<'a> {
    pub fn element(self) -> Option<ElementRef<'a>> {
        match self {
            NameHeading::Found(el) => Some(el),
            NameHeading::NotFound => None,
        }
    }
}

/// Every element matching the description selector, in document order.
pub fn description_elements<'a>(doc: &'a Html, plan: &CompiledPlan) -> Vec<ElementRef<'a>> {
    doc.select(&plan.description).collect()
}

/// The first element matching the tag container selector, if any.
pub fn tag_container<'a>(doc: &'a Html, plan: &CompiledPlan) -> Option<ElementRef<'a>> {
    doc.select(&plan.tag_container).next()
}

/// The heading at `plan.heading_index` among all matching headings.
///
/// Page templates render the site banner as the first heading, so the entry
/// name is looked up by position. Fewer headings than required is `NotFound`.
pub fn name_heading<'a>(doc: &'a Html, plan: &CompiledPlan) -> NameHeading<'a> {
    match doc.select(&plan.heading).nth(plan.heading_index) {
        Some(el) => NameHeading::Found(el),
        None => NameHeading::NotFound,
    }
}

/// The first anchor nested in each link cell. Cells without one are skipped.
pub fn link_anchors<'a>(doc: &'a Html, plan: &CompiledPlan) -> Vec<ElementRef<'a>> {
    doc.select(&plan.link_cell)
        .filter_map(|cell| cell.select(&plan.link_anchor).next())
        .collect()
}

/// Number of link cells on the page, with or without an anchor.
pub fn link_cell_count(doc: &Html, plan: &CompiledPlan) -> usize {
    doc.select(&plan.link_cell).count()
}
