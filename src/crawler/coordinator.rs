//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the pagination loop:
//! - Fetching the current listing page
//! - Extracting its quotes and the next-page link
//! - Resolving each page's authors into the author cache
//! - Advancing until a page has no next link
//!
//! Pages are processed strictly one at a time, so quote order is page order
//! followed by document order within a page.

use crate::config::{validate, Config};
use crate::crawler::authors::AuthorResolver;
use crate::crawler::fetcher::{build_http_client, fetch_url};
use crate::crawler::parser::parse_listing;
use crate::output::{write_outputs, CrawlStatistics};
use crate::records::Quote;
use crate::state::{AuthorCache, VisitedPages};
use crate::url::{parse_base_url, resolve_url};
use crate::ScrapeError;
use chrono::Utc;
use std::path::Path;
use std::time::Instant;
use url::Url;

/// Pagination state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrawlState {
    /// A listing page remains to be processed
    Fetching(Url),
    /// The last page has been processed
    Done,
}

/// Everything a successful crawl produced
#[derive(Debug)]
pub struct CrawlOutcome {
    /// Quotes in page order, then document order
    pub quotes: Vec<Quote>,

    /// Distinct authors in first-seen order
    pub authors: AuthorCache,

    /// Run counters
    pub stats: CrawlStatistics,
}

/// Main crawler coordinator structure
pub struct Coordinator {
    base: Url,
    client: reqwest::Client,
    resolver: AuthorResolver,
}

impl Coordinator {
    /// Creates a new coordinator instance
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Ready to run
    /// * `Err(ScrapeError)` - The configuration is invalid or the HTTP client could not be built
    pub fn new(config: &Config) -> Result<Self, ScrapeError> {
        validate(config)?;
        let base = parse_base_url(&config.crawler.base_url)?;
        let client = build_http_client(&config.user_agent, &config.crawler)?;
        let resolver = AuthorResolver::new(
            client.clone(),
            base.clone(),
            config.crawler.max_concurrent_authors as usize,
        );

        Ok(Self {
            base,
            client,
            resolver,
        })
    }

    /// Runs the pagination loop to completion
    ///
    /// Starts at the base URL and follows next-page links until a page has
    /// none. Fails on the first fetch or extraction error, or if a next-page
    /// link leads back to a page already visited.
    pub async fn run(&mut self) -> Result<CrawlOutcome, ScrapeError> {
        tracing::info!("Starting crawl at {}", self.base);

        let started_at = Utc::now();
        let start_time = Instant::now();

        let mut quotes: Vec<Quote> = Vec::new();
        let mut authors = AuthorCache::new();
        let mut visited = VisitedPages::new();
        let mut state = CrawlState::Fetching(self.base.clone());

        while let CrawlState::Fetching(url) = state {
            if !visited.mark(&url) {
                tracing::error!("Next-page link returned to {}", url);
                return Err(ScrapeError::CycleDetected {
                    url: url.to_string(),
                });
            }

            state = self.process_page(url, &mut quotes, &mut authors).await?;
        }

        tracing::debug!("Visited pages: {:?}", visited.pages());

        let resolver_stats = self.resolver.stats();
        let stats = CrawlStatistics {
            started_at,
            elapsed: start_time.elapsed(),
            pages_visited: visited.len() as u64,
            quotes: quotes.len() as u64,
            authors: authors.len() as u64,
            author_fetches: resolver_stats.fetches,
            author_cache_hits: resolver_stats.cache_hits,
        };

        tracing::info!(
            "Crawl completed: {} pages, {} quotes, {} authors in {:?}",
            stats.pages_visited,
            stats.quotes,
            stats.authors,
            stats.elapsed
        );

        Ok(CrawlOutcome {
            quotes,
            authors,
            stats,
        })
    }

    /// Processes a single listing page and returns the next state
    async fn process_page(
        &mut self,
        url: Url,
        quotes: &mut Vec<Quote>,
        authors: &mut AuthorCache,
    ) -> Result<CrawlState, ScrapeError> {
        let page = fetch_url(&self.client, url).await?;
        let listing = parse_listing(&page.text(), page.url.as_str())?;

        let author_urls: Vec<&str> = listing
            .quotes
            .iter()
            .map(|extracted| extracted.author_url.as_str())
            .collect();
        self.resolver.resolve_all(author_urls, authors).await?;

        let found = listing.quotes.len();
        quotes.extend(listing.quotes.into_iter().map(|extracted| extracted.quote));

        tracing::info!(
            "Processed {}: {} quotes ({} total, {} authors)",
            page.url,
            found,
            quotes.len(),
            authors.len()
        );

        match listing.next_page {
            Some(href) => Ok(CrawlState::Fetching(resolve_url(&self.base, &href)?)),
            None => {
                tracing::info!("No next page after {}, crawl complete", page.url);
                Ok(CrawlState::Done)
            }
        }
    }
}

/// Runs the full crawl and writes both output files
///
/// Output is only written after the loop has finished successfully; a
/// failed crawl leaves existing files untouched.
///
/// # Example
///
/// ```no_run
/// use toscrape_quotes::config::Config;
/// use toscrape_quotes::crawler::run_crawl;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let outcome = run_crawl(&Config::default()).await?;
/// println!("{} quotes", outcome.quotes.len());
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(config: &Config) -> Result<CrawlOutcome, ScrapeError> {
    let mut coordinator = Coordinator::new(config)?;
    let outcome = coordinator.run().await?;

    write_outputs(
        &outcome.quotes,
        &outcome.authors,
        Path::new(&config.output.quotes_path),
        Path::new(&config.output.authors_path),
    )?;

    Ok(outcome)
}
