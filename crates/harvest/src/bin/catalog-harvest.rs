// ABOUTME: CLI binary for harvesting catalog entry and listing pages.
// ABOUTME: Fetches URLs (or reads a local HTML file) and writes the extracted records as JSON.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use catalog_harvest::{DelayRange, Harvester, SelectionPlan};
use clap::{Parser, ValueEnum};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Entry pages: name, descriptions, and tag groups
    Detail,
    /// Listing pages: links found in title cells
    Links,
}

#[derive(Parser, Debug)]
#[command(name = "catalog-harvest")]
#[command(about = "Harvest records from catalog entry and listing pages")]
struct Args {
    /// Page type to extract
    #[arg(short = 'm', long = "mode", value_enum, default_value_t = Mode::Detail)]
    mode: Mode,

    /// File with one URL per line (blank lines and # comments are skipped)
    #[arg(short = 'i', long = "input")]
    input: Option<PathBuf>,

    /// HTML file to extract from instead of fetching (requires --url)
    #[arg(long = "html")]
    html: Option<PathBuf>,

    /// Source URL of the --html file
    #[arg(long = "url")]
    url: Option<String>,

    /// Minimum pause between requests, in seconds
    #[arg(long = "min-delay", default_value_t = 1.0)]
    min_delay: f64,

    /// Maximum pause between requests, in seconds
    #[arg(long = "max-delay", default_value_t = 3.0)]
    max_delay: f64,

    /// Per-request timeout, in seconds
    #[arg(long = "timeout", default_value_t = 10.0)]
    timeout: f64,

    /// User-Agent sent with every request
    #[arg(long = "user-agent")]
    user_agent: Option<String>,

    /// JSON selection plan overriding the default selectors
    #[arg(long = "plan")]
    plan: Option<PathBuf>,

    /// Include the raw HTML of selected elements in detail records
    #[arg(long = "raw-html")]
    raw_html: bool,

    /// Output compact JSON instead of pretty
    #[arg(long = "compact")]
    compact: bool,

    /// Output file path (default: stdout)
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// URLs to harvest, in order
    #[arg()]
    urls: Vec<String>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::from(1)
        }
    }
}

/// Runs the harvest. Returns false when any detail target failed.
fn run(args: &Args) -> Result<bool> {
    if args.html.is_some() && args.url.is_none() {
        bail!("--url is required when using --html");
    }
    if !args.timeout.is_finite() || args.timeout <= 0.0 {
        bail!("--timeout must be a positive number of seconds");
    }
    if !args.min_delay.is_finite() || !args.max_delay.is_finite() {
        bail!("--min-delay and --max-delay must be finite");
    }

    let mut builder = Harvester::builder()
        .delay(DelayRange::from_secs_f64(args.min_delay, args.max_delay))
        .timeout(Duration::from_secs_f64(args.timeout))
        .keep_raw_html(args.raw_html);
    if let Some(ua) = &args.user_agent {
        builder = builder.user_agent(ua.clone());
    }
    if let Some(path) = &args.plan {
        builder = builder.plan(SelectionPlan::from_path(path)?);
    }
    let mut harvester = builder.build()?;

    if let (Some(html_path), Some(url)) = (&args.html, &args.url) {
        if !args.urls.is_empty() || args.input.is_some() {
            bail!("cannot use --html together with URLs or --input");
        }
        let html = fs::read_to_string(html_path)
            .with_context(|| format!("reading {}", html_path.display()))?;
        return match args.mode {
            Mode::Detail => {
                let record = harvester.extract_html(&html, url);
                write_output(args, &[record])?;
                Ok(true)
            }
            Mode::Links => {
                let links = harvester.links_from_html(&html, url);
                write_output(args, &links)?;
                Ok(true)
            }
        };
    }

    let mut targets = args.urls.clone();
    if let Some(path) = &args.input {
        targets.extend(read_targets(path)?);
    }
    if targets.is_empty() {
        bail!("at least one URL is required, or use --input, or --html with --url");
    }

    match args.mode {
        Mode::Detail => {
            let records = harvester.harvest_details(&targets);
            let failed = records.iter().filter(|r| r.is_error()).count();
            write_output(args, &records)?;
            eprintln!(
                "harvested {} targets ({} ok, {} failed)",
                records.len(),
                records.len() - failed,
                failed
            );
            Ok(failed == 0)
        }
        Mode::Links => {
            let links = harvester.harvest_links(&targets);
            write_output(args, &links)?;
            eprintln!("collected {} links from {} targets", links.len(), targets.len());
            Ok(true)
        }
    }
}

/// Reads one URL per line, skipping blanks and `#` comments.
fn read_targets(path: &Path) -> Result<Vec<String>> {
    let text =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    Ok(text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect())
}

fn write_output<T: Serialize>(args: &Args, records: &[T]) -> Result<()> {
    let json = if args.compact {
        serde_json::to_string(records)?
    } else {
        serde_json::to_string_pretty(records)?
    };

    match &args.output {
        Some(path) => {
            fs::write(path, json).with_context(|| format!("writing {}", path.display()))?
        }
        None => println!("{}", json),
    }
    Ok(())
}
