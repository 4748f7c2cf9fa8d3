//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `session_scraper` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - User-facing output formatting
//!
//! All fetching, session and cache behavior lives in the library crate.

use std::path::PathBuf;
use std::process;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::info;

use session_scraper::config::DEFAULT_TIMEOUT_SECS;
use session_scraper::initialization::init_logger_with;
use session_scraper::{
    validate_and_normalize_url, CachedFetcher, DirectoryCache, FetchResult, Fetcher, FormBody,
    LogFilter, LogFormat, LogLevel, Scraper, ScraperOptions,
};

/// Fetch pages on one browsing session, carrying cookies and referer between them.
#[derive(Debug, Parser)]
#[command(name = "session_scraper", version, about)]
struct Cli {
    /// URLs to fetch, in order
    #[arg(required = true, value_name = "URL")]
    urls: Vec<String>,

    /// Fixed User-Agent (a random browser User-Agent is used otherwise)
    #[arg(long)]
    user_agent: Option<String>,

    /// Directory that receives one JSON record per request
    #[arg(long, value_name = "DIR")]
    output: Option<PathBuf>,

    /// Directory of JSON records to replay instead of using the network
    #[arg(long, value_name = "DIR")]
    input: Option<PathBuf>,

    /// Directory used to cache GET responses
    #[arg(long, value_name = "DIR")]
    cache_dir: Option<PathBuf>,

    /// Print per-request session diagnostics
    #[arg(short, long)]
    verbose: bool,

    /// Log level: error, warn, info, debug, trace
    #[arg(long, value_enum, default_value = "info")]
    log_level: LogFilter,

    /// Log format: plain or json
    #[arg(long, value_enum, default_value = "plain")]
    log_format: LogFormat,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout: u64,

    /// Form field as key=value; when given, every URL is submitted with POST
    #[arg(long = "form", value_name = "KEY=VALUE", value_parser = parse_form_field)]
    form: Vec<(String, String)>,

    /// CSS selector whose text is printed for each page
    #[arg(long, value_name = "CSS")]
    select: Option<String>,
}

fn parse_form_field(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected key=value, got '{s}'")),
    }
}

impl Cli {
    fn scraper_options(&self) -> ScraperOptions {
        ScraperOptions {
            user_agent: self.user_agent.clone(),
            output: self.output.clone(),
            input: self.input.clone(),
            log_level: if self.verbose {
                LogLevel::Verbose
            } else {
                LogLevel::Quiet
            },
            timeout_seconds: self.timeout,
            ..Default::default()
        }
    }
}

fn print_page(url: &str, page: &FetchResult, select: Option<&str>) {
    println!(
        "{} {} {}",
        page.status(),
        url,
        page.document.title().unwrap_or_default()
    );
    if let Some(selector) = select {
        println!("{}", page.document.text(selector));
    }
}

async fn run(cli: Cli) -> Result<usize> {
    let scraper =
        Scraper::with_options(cli.scraper_options()).context("Failed to initialize session")?;
    let mut fetcher = CachedFetcher::new(scraper);
    if let Some(dir) = &cli.cache_dir {
        fetcher.set_store(Arc::new(DirectoryCache::new(dir.clone())));
    }

    let form: Option<FormBody> = (!cli.form.is_empty()).then(|| cli.form.clone());
    let urls: Vec<String> = cli
        .urls
        .iter()
        .filter_map(|url| validate_and_normalize_url(url))
        .collect();
    if urls.is_empty() {
        bail!("No valid URLs given");
    }

    for url in &urls {
        let page = match &form {
            Some(form) => fetcher.post(url, form.clone()).await,
            None => fetcher.get(url).await,
        }
        .with_context(|| format!("Failed to fetch {url}"))?;
        print_page(url, &page, cli.select.as_deref());
    }

    Ok(urls.len())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logger_with(cli.log_level.clone().into(), cli.log_format.clone())
        .context("Failed to initialize logger")?;

    match run(cli).await {
        Ok(count) => {
            info!("Fetched {count} page{}", if count == 1 { "" } else { "s" });
            Ok(())
        }
        Err(e) => {
            eprintln!("session_scraper error: {:#}", e);
            process::exit(1);
        }
    }
}
