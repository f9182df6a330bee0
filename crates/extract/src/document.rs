// ABOUTME: Page-level record assembly for detail and listing pages.
// ABOUTME: Parses markup, runs the selector, and normalizes the selections into records.

use scraper::Html;
use tracing::debug;

use crate::models::{ExtractionResult, LinkRecord, RawMarkup};
use crate::normalize::{
    clean_tag_group, description_text, inner_text, link_title, resolve_href, stripped_text,
};
use crate::plan::CompiledPlan;
use crate::select::{description_elements, link_anchors, link_cell_count, name_heading, tag_container};

/// Builds the detail record for one page.
///
/// Missing elements leave their field empty. When `keep_raw` is set the outer
/// HTML of the description elements and the tag container is attached.
pub fn extract_detail(
    html: &str,
    source: &str,
    plan: &CompiledPlan,
    keep_raw: bool,
) -> ExtractionResult {
    let doc = Html::parse_document(html);

    let descriptions = description_elements(&doc, plan);
    let container = tag_container(&doc, plan);

    let name = name_heading(&doc, plan)
        .element()
        .map(|el| stripped_text(&el))
        .unwrap_or_default();

    let tags: Vec<Vec<String>> = container
        .iter()
        .map(|el| clean_tag_group(&stripped_text(el)))
        .collect();

    let raw = keep_raw.then(|| RawMarkup {
        descriptions: descriptions.iter().map(|el| el.html()).collect(),
        tags: container.iter().map(|el| el.html()).collect(),
    });

    debug!(
        source = %source,
        descriptions = descriptions.len(),
        tag_groups = tags.len(),
        has_name = !name.is_empty(),
        "extracted detail page"
    );

    ExtractionResult {
        source: source.to_string(),
        name,
        descriptions: descriptions.iter().map(description_text).collect(),
        tags,
        error: None,
        raw,
    }
}

/// Listing page extraction output.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingPage {
    /// Title cells seen, including those without an anchor.
    pub cells: usize,
    pub links: Vec<LinkRecord>,
}

/// Builds the link records for one listing page, in document order.
pub fn extract_links(html: &str, source: &str, plan: &CompiledPlan) -> ListingPage {
    let doc = Html::parse_document(html);

    let links = link_anchors(&doc, plan)
        .iter()
        .map(|anchor| {
            let attrs = anchor.value();
            LinkRecord {
                title: link_title(anchor, &plan.title_attr),
                href: attrs
                    .attr("href")
                    .map(|raw| resolve_href(source, raw))
                    .unwrap_or_default(),
                lang: attrs.attr("lang").unwrap_or_default().to_string(),
                text: inner_text(anchor),
                source: source.to_string(),
            }
        })
        .collect();

    ListingPage {
        cells: link_cell_count(&doc, plan),
        links,
    }
}
