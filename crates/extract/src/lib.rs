// ABOUTME: Page extraction library for catalog entry and listing pages.
// ABOUTME: Re-exports the selection plan, record models, and page-level extractors.

//! Catalog page extraction.
//!
//! Turns catalog markup into records without touching the network:
//!
//! ```
//! use catalog_extract::{extract_detail, SelectionPlan};
//!
//! let plan = SelectionPlan::default().compile().unwrap();
//! let html = r#"<h1>Site</h1><h1>Entry</h1><div id="vntags">3.Drama</div>"#;
//! let record = extract_detail(html, "https://example.org/v1", &plan, false);
//! assert_eq!(record.name, "Entry");
//! assert_eq!(record.tags, vec![vec!["Drama".to_string()]]);
//! ```

pub mod document;
pub mod error;
pub mod models;
pub mod normalize;
pub mod plan;
pub mod select;

pub use document::{extract_detail, extract_links, ListingPage};
pub use error::ExtractError;
pub use models::{ExtractionResult, LinkRecord, RawMarkup};
pub use normalize::{clean_tag_group, resolve_href, site_root};
pub use plan::{CompiledPlan, SelectionPlan};
