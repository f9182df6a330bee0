// ABOUTME: Configuration options for a harvest run and the HarvesterBuilder.
// ABOUTME: HarvesterBuilder provides a fluent API for constructing Harvester instances with custom settings.

use std::collections::HashMap;
use std::time::Duration;

use catalog_extract::SelectionPlan;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::error::HarvestError;
use crate::fetch::{Fetch, FetchOptions, HttpFetcher};
use crate::harvester::{CancelToken, Harvester};
use crate::pacing::{DelayRange, Sleeper, ThreadSleeper};

/// User agent sent when none is configured.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Configuration options for a harvester. Fixed once the harvester is built.
#[derive(Debug, Clone)]
pub struct Options {
    pub timeout: Duration,
    pub user_agent: String,
    pub headers: HashMap<String, String>,
    pub delay: DelayRange,
    pub plan: SelectionPlan,
    pub keep_raw_html: bool,
    pub http_client: Option<reqwest::blocking::Client>,
    pub seed: Option<u64>,
    pub cancel: Option<CancelToken>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            headers: HashMap::new(),
            delay: DelayRange::default(),
            plan: SelectionPlan::default(),
            keep_raw_html: false,
            http_client: None,
            seed: None,
            cancel: None,
        }
    }
}

/// Builder for constructing Harvester instances with custom configuration.
pub struct HarvesterBuilder {
    opts: Options,
    fetcher: Option<Box<dyn Fetch>>,
    sleeper: Option<Box<dyn Sleeper>>,
}

impl HarvesterBuilder {
    /// Create a new HarvesterBuilder with default options.
    pub fn new() -> Self {
        Self {
            opts: Options::default(),
            fetcher: None,
            sleeper: None,
        }
    }

    /// Replace all options at once.
    pub fn options(mut self, opts: Options) -> Self {
        self.opts = opts;
        self
    }

    /// Set the per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.opts.timeout = timeout;
        self
    }

    /// Set the User-Agent header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.opts.user_agent = user_agent.into();
        self
    }

    /// Add a custom header to all requests.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.opts.headers.insert(key.into(), value.into());
        self
    }

    /// Set the pause range between targets.
    pub fn delay(mut self, delay: DelayRange) -> Self {
        self.opts.delay = delay;
        self
    }

    /// Set the selection plan.
    pub fn plan(mut self, plan: SelectionPlan) -> Self {
        self.opts.plan = plan;
        self
    }

    /// Attach the outer HTML of selected elements to detail records.
    pub fn keep_raw_html(mut self, keep: bool) -> Self {
        self.opts.keep_raw_html = keep;
        self
    }

    /// Use a custom HTTP client. Its own user agent and timeout apply.
    pub fn http_client(mut self, client: reqwest::blocking::Client) -> Self {
        self.opts.http_client = Some(client);
        self
    }

    /// Seed the delay RNG for reproducible pauses.
    pub fn seed(mut self, seed: u64) -> Self {
        self.opts.seed = Some(seed);
        self
    }

    /// Stop a batch early when the token is cancelled.
    pub fn cancel_token(mut self, token: CancelToken) -> Self {
        self.opts.cancel = Some(token);
        self
    }

    /// Use a custom document fetcher instead of HTTP.
    pub fn fetcher(mut self, fetcher: impl Fetch + 'static) -> Self {
        self.fetcher = Some(Box::new(fetcher));
        self
    }

    /// Use a custom sleeper for the pauses between targets.
    pub fn sleeper(mut self, sleeper: impl Sleeper + 'static) -> Self {
        self.sleeper = Some(Box::new(sleeper));
        self
    }

    /// Build the Harvester with the configured options.
    ///
    /// Fails if the selection plan does not compile or the HTTP client cannot
    /// be constructed.
    pub fn build(self) -> Result<Harvester, HarvestError> {
        let opts = self.opts;

        let plan = opts.plan.compile().map_err(|e| {
            HarvestError::parse("", "CompilePlan", Some(anyhow::Error::new(e)))
        })?;

        let fetcher: Box<dyn Fetch> = match (self.fetcher, opts.http_client) {
            (Some(fetcher), _) => fetcher,
            (None, Some(client)) => Box::new(HttpFetcher::with_client(client, opts.headers)),
            (None, None) => Box::new(HttpFetcher::new(&FetchOptions {
                timeout: opts.timeout,
                user_agent: opts.user_agent,
                headers: opts.headers,
            })?),
        };

        let rng = match opts.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Harvester::new(
            fetcher,
            self.sleeper.unwrap_or_else(|| Box::new(ThreadSleeper)),
            rng,
            opts.delay,
            plan,
            opts.keep_raw_html,
            opts.cancel,
        ))
    }
}

impl Default for HarvesterBuilder {
    fn default() -> Self {
        Self::new()
    }
}
