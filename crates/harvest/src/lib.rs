// ABOUTME: Main library entry point for harvesting records from catalog pages.
// ABOUTME: Re-exports the public API: Harvester, HarvesterBuilder, Options, HarvestError, ErrorCode.

//! Catalog harvesting.
//!
//! Fetches catalog entry and listing pages one at a time, with a polite pause
//! between requests, and turns them into records using `catalog-extract`.
//!
//! # Example
//!
//! ```no_run
//! use catalog_harvest::{Harvester, HarvestError};
//!
//! fn main() -> Result<(), HarvestError> {
//!     let mut harvester = Harvester::builder().build()?;
//!     let records = harvester.harvest_details(&["https://vndb.org/v2002"]);
//!     println!("{}", serde_json::to_string_pretty(&records).unwrap());
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod fetch;
pub mod harvester;
pub mod options;
pub mod pacing;

pub use catalog_extract::{ExtractionResult, LinkRecord, RawMarkup, SelectionPlan};

pub use crate::error::{ErrorCode, HarvestError};
pub use crate::fetch::{Fetch, FetchOptions, FetchResult, HttpFetcher};
pub use crate::harvester::{CancelToken, Harvester};
pub use crate::options::{HarvesterBuilder, Options, DEFAULT_USER_AGENT};
pub use crate::pacing::{DelayRange, Sleeper, ThreadSleeper};
