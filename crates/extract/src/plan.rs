// ABOUTME: Selection plan naming the elements extracted from catalog pages.
// ABOUTME: Holds selector strings with site defaults and compiles them into scraper Selectors.

//! Selection plan.
//!
//! The catalog pages follow a fixed template, so extraction is driven by a
//! small set of CSS selectors rather than heuristics. `SelectionPlan` keeps
//! them as plain strings (deserializable from JSON, missing fields fall back
//! to the site defaults) and `CompiledPlan` holds the parsed selectors used
//! by [`crate::select`].

use std::fs;
use std::path::Path;

use scraper::Selector;
use serde::{Deserialize, Serialize};

use crate::error::ExtractError;

/// Selector strings for both page variants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionPlan {
    /// Elements holding description text (every match).
    pub description: String,
    /// The unique tag container (first match only).
    pub tag_container: String,
    /// Headings scanned for the entry name.
    pub heading: String,
    /// Zero-based position of the name among `heading` matches.
    pub heading_index: usize,
    /// Listing cells holding a cross-reference link.
    pub link_cell: String,
    /// Anchor looked up inside each link cell (first match only).
    pub link_anchor: String,
    /// Anchor attribute preferred for the link title.
    pub title_attr: String,
}

impl Default for SelectionPlan {
    fn default() -> Self {
        Self {
            description: ".vndesc".to_string(),
            tag_container: "div#vntags".to_string(),
            heading: "h1".to_string(),
            heading_index: 1,
            link_cell: "td.tc_title".to_string(),
            link_anchor: "a".to_string(),
            title_attr: "title".to_string(),
        }
    }
}

impl SelectionPlan {
    /// Parses a plan from JSON. Absent fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ExtractError> {
        serde_json::from_str(json).map_err(ExtractError::invalid_plan)
    }

    /// Reads and parses a JSON plan file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ExtractError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .map_err(|e| ExtractError::invalid_plan(format!("{}: {}", path.display(), e)))?;
        Self::from_json_str(&json)
    }

    /// Compiles every selector in the plan.
    pub fn compile(&self) -> Result<CompiledPlan, ExtractError> {
        Ok(CompiledPlan {
            description: compile("description", &self.description)?,
            tag_container: compile("tag_container", &self.tag_container)?,
            heading: compile("heading", &self.heading)?,
            heading_index: self.heading_index,
            link_cell: compile("link_cell", &self.link_cell)?,
            link_anchor: compile("link_anchor", &self.link_anchor)?,
            title_attr: self.title_attr.clone(),
        })
    }
}

fn compile(field: &'static str, css: &str) -> Result<Selector, ExtractError> {
    Selector::parse(css).map_err(|e| ExtractError::invalid_selector(field, css, e))
}

/// A plan whose selectors have been parsed and are ready for matching.
#[derive(Debug, Clone)]
pub struct CompiledPlan {
    pub description: Selector,
    pub tag_container: Selector,
    pub heading: Selector,
    pub heading_index: usize,
    pub link_cell: Selector,
    pub link_anchor: Selector,
    pub title_attr: String,
}
