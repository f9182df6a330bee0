// ABOUTME: The Harvester: per-target record building and the sequential batch orchestrator.
// ABOUTME: Paces requests, isolates per-target failures, and returns records in input order.

//! Batch harvesting.
//!
//! A batch walks its targets strictly in order on the calling thread:
//! no pause before the first target, a random pause from the configured
//! [`DelayRange`] before each later one, then fetch, parse and build.
//!
//! Failures never leave a target's scope. Detail batches turn them into
//! error-shaped records so the output always has one record per target;
//! listing batches log them and contribute no links for that target.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use catalog_extract::{extract_detail, extract_links, CompiledPlan, ExtractionResult, LinkRecord};
use rand::rngs::StdRng;
use tracing::{debug, info, warn};

use crate::error::HarvestError;
use crate::fetch::Fetch;
use crate::options::HarvesterBuilder;
use crate::pacing::{DelayRange, Sleeper};

/// Shared flag that stops a running batch before its next target.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Fetches targets and builds records from them, one at a time.
pub struct Harvester {
    fetcher: Box<dyn Fetch>,
    sleeper: Box<dyn Sleeper>,
    rng: StdRng,
    delay: DelayRange,
    plan: CompiledPlan,
    keep_raw_html: bool,
    cancel: Option<CancelToken>,
}

impl Harvester {
    pub(crate) fn new(
        fetcher: Box<dyn Fetch>,
        sleeper: Box<dyn Sleeper>,
        rng: StdRng,
        delay: DelayRange,
        plan: CompiledPlan,
        keep_raw_html: bool,
        cancel: Option<CancelToken>,
    ) -> Self {
        Self {
            fetcher,
            sleeper,
            rng,
            delay,
            plan,
            keep_raw_html,
            cancel,
        }
    }

    /// Create a new HarvesterBuilder.
    pub fn builder() -> HarvesterBuilder {
        HarvesterBuilder::new()
    }

    fn fetch_markup(&self, url: &str) -> Result<String, HarvestError> {
        let page = self.fetcher.fetch(url)?;
        debug!(url = %url, status = page.status, bytes = page.body.len(), "fetched page");
        Ok(page.text())
    }

    fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(CancelToken::is_cancelled)
    }

    /// Pause before every target except the first.
    fn pace(&mut self, index: usize) {
        if index == 0 || self.delay.is_zero() {
            return;
        }
        let pause = self.delay.sample(&mut self.rng);
        debug!(pause_ms = pause.as_millis() as u64, "pausing before next target");
        self.sleeper.sleep(pause);
    }

    /// Build the detail record for one target.
    ///
    /// Both arms carry a record for `url`; `Err` holds the error-shaped one.
    pub fn extract_target(&self, url: &str) -> Result<ExtractionResult, ExtractionResult> {
        match self.fetch_markup(url) {
            Ok(html) => Ok(self.extract_html(&html, url)),
            Err(err) => Err(ExtractionResult::failed(url, err.to_string())),
        }
    }

    /// Build a detail record from markup already in hand.
    pub fn extract_html(&self, html: &str, url: &str) -> ExtractionResult {
        extract_detail(html, url, &self.plan, self.keep_raw_html)
    }

    /// Collect the link records of one listing target.
    pub fn collect_links(&self, url: &str) -> Result<Vec<LinkRecord>, HarvestError> {
        let html = self.fetch_markup(url)?;
        Ok(self.links_from_html(&html, url))
    }

    /// Collect link records from markup already in hand.
    pub fn links_from_html(&self, html: &str, url: &str) -> Vec<LinkRecord> {
        let page = extract_links(html, url, &self.plan);
        info!(
            url = %url,
            cells = page.cells,
            links = page.links.len(),
            "scraped listing page"
        );
        page.links
    }

    /// Harvest detail records: exactly one per target, in input order.
    pub fn harvest_details<S: AsRef<str>>(&mut self, targets: &[S]) -> Vec<ExtractionResult> {
        let mut results = Vec::with_capacity(targets.len());

        for (index, target) in targets.iter().enumerate() {
            let url = target.as_ref();

            if self.is_cancelled() {
                results.push(ExtractionResult::failed(
                    url,
                    HarvestError::cancelled(url, "Harvest").to_string(),
                ));
                continue;
            }

            self.pace(index);

            let record = match self.extract_target(url) {
                Ok(record) => record,
                Err(record) => {
                    warn!(
                        url = %url,
                        error = record.error.as_deref().unwrap_or_default(),
                        "failed to harvest target"
                    );
                    record
                }
            };
            results.push(record);
        }

        info!(
            targets = targets.len(),
            failed = results.iter().filter(|r| r.is_error()).count(),
            "detail harvest finished"
        );
        results
    }

    /// Harvest link records from every listing target, in input order.
    ///
    /// A failed target contributes no records; the failure is only logged.
    pub fn harvest_links<S: AsRef<str>>(&mut self, targets: &[S]) -> Vec<LinkRecord> {
        let mut results = Vec::new();

        for (index, target) in targets.iter().enumerate() {
            let url = target.as_ref();

            if self.is_cancelled() {
                warn!(url = %url, remaining = targets.len() - index, "harvest cancelled");
                break;
            }

            self.pace(index);

            match self.collect_links(url) {
                Ok(links) => results.extend(links),
                Err(err) => warn!(url = %url, error = %err, "failed to scrape listing page"),
            }
        }

        info!(
            targets = targets.len(),
            links = results.len(),
            "listing harvest finished"
        );
        results
    }
}
