//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler:
//! - Building the HTTP client with a proper user agent string
//! - GET requests for listing and author pages
//! - Mapping non-success statuses to `ScrapeError::Fetch`
//!
//! There is no retry; the first failure aborts the crawl.

use crate::config::{CrawlerConfig, UserAgentConfig};
use crate::url::resolve_url;
use crate::ScrapeError;
use reqwest::Client;
use std::borrow::Cow;
use std::time::Duration;
use url::Url;

/// A successfully fetched page
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// The absolute URL that was requested
    pub url: Url,

    /// HTTP status code
    pub status_code: u16,

    /// Raw response body
    pub body: Vec<u8>,
}

impl FetchedPage {
    /// Body decoded as UTF-8
    ///
    /// Invalid sequences are replaced with U+FFFD and a warning is logged,
    /// since the replaced text ends up in the output tables.
    pub fn text(&self) -> Cow<'_, str> {
        let text = String::from_utf8_lossy(&self.body);
        if let Cow::Owned(_) = text {
            tracing::warn!(
                "Body of {} is not valid UTF-8; invalid bytes were replaced",
                self.url
            );
        }
        text
    }
}

/// Builds an HTTP client with proper configuration
///
/// The request timeout is only set when configured; otherwise the client
/// default applies.
///
/// # Example
///
/// ```no_run
/// use toscrape_quotes::config::{CrawlerConfig, UserAgentConfig};
/// use toscrape_quotes::crawler::build_http_client;
///
/// let client = build_http_client(&UserAgentConfig::default(), &CrawlerConfig::default()).unwrap();
/// ```
pub fn build_http_client(
    user_agent: &UserAgentConfig,
    crawler: &CrawlerConfig,
) -> Result<Client, reqwest::Error> {
    let mut builder = Client::builder()
        .user_agent(user_agent.header_value())
        .gzip(true)
        .brotli(true);

    if let Some(secs) = crawler.request_timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }

    builder.build()
}

/// Fetches a page, resolving `href` against `base` first
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `base` - Base URL relative links are resolved against
/// * `href` - Absolute or relative URL of the page
///
/// # Returns
///
/// * `Ok(FetchedPage)` - 2xx response with its body
/// * `Err(ScrapeError::Fetch)` - Any other status
/// * `Err(ScrapeError::Http)` - Transport failure
pub async fn fetch_page(client: &Client, base: &Url, href: &str) -> Result<FetchedPage, ScrapeError> {
    let url = resolve_url(base, href)?;
    fetch_url(client, url).await
}

/// Fetches an absolute URL
pub async fn fetch_url(client: &Client, url: Url) -> Result<FetchedPage, ScrapeError> {
    tracing::debug!("GET {}", url);

    let response = client
        .get(url.clone())
        .send()
        .await
        .map_err(|source| ScrapeError::Http {
            url: url.to_string(),
            source,
        })?;

    let status = response.status();
    if !status.is_success() {
        tracing::warn!("HTTP {} for {}", status.as_u16(), url);
        return Err(ScrapeError::Fetch {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }

    let body = response
        .bytes()
        .await
        .map_err(|source| ScrapeError::Http {
            url: url.to_string(),
            source,
        })?
        .to_vec();

    tracing::debug!("Fetched {} ({} bytes)", url, body.len());

    Ok(FetchedPage {
        url,
        status_code: status.as_u16(),
        body,
    })
}
