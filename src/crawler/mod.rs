//! Crawler module for page fetching and extraction
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching (`fetcher`)
//! - Quote, pagination and author extraction (`parser`)
//! - Memoized author resolution (`authors`)
//! - The pagination loop (`coordinator`)

mod authors;
mod coordinator;
mod fetcher;
mod parser;

pub use authors::{AuthorResolver, ResolverStats};
pub use coordinator::{run_crawl, Coordinator, CrawlOutcome, CrawlState};
pub use fetcher::{build_http_client, fetch_page, fetch_url, FetchedPage};
pub use parser::{
    extract_author, extract_quotes, find_next_page_link, parse_author, parse_listing,
    ExtractedQuote, ListingPage,
};

use crate::config::Config;
use crate::ScrapeError;

/// Runs a complete crawl
///
/// This is the main entry point. It will:
/// 1. Build the HTTP client
/// 2. Follow pagination from the base URL
/// 3. Resolve each distinct author once
/// 4. Write the quotes and authors CSV files
///
/// # Returns
///
/// * `Ok(CrawlOutcome)` - Crawl completed and both files were written
/// * `Err(ScrapeError)` - Crawl failed; no file was written
pub async fn crawl(config: &Config) -> Result<CrawlOutcome, ScrapeError> {
    run_crawl(config).await
}
