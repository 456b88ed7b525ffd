//! Author resolution
//!
//! Turns author page URLs into `AuthorRecord`s, fetching each distinct URL at
//! most once per run. With a concurrency limit of 1 resolution is strictly
//! sequential; above that, the uncached authors of one listing page are
//! fetched in parallel behind a semaphore. Records are always inserted into
//! the cache by the caller's task, in first-seen order, after every fetch for
//! the page has been joined. The first failed fetch aborts the rest of the
//! page's fetches and leaves the cache unchanged.

use crate::crawler::fetcher::fetch_page;
use crate::crawler::parser::parse_author;
use crate::records::AuthorRecord;
use crate::state::AuthorCache;
use crate::ScrapeError;
use reqwest::Client;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use url::Url;

/// Counters kept by the resolver
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolverStats {
    /// Author pages actually fetched
    pub fetches: u64,

    /// Lookups answered from the cache (or already pending on the same page)
    pub cache_hits: u64,
}

/// Resolves author page URLs into the author cache
pub struct AuthorResolver {
    client: Client,
    base: Url,
    max_concurrent: usize,
    limiter: Arc<Semaphore>,
    stats: ResolverStats,
}

impl AuthorResolver {
    /// Creates a resolver
    ///
    /// # Arguments
    ///
    /// * `client` - HTTP client shared with the page loop
    /// * `base` - Base URL author links are resolved against
    /// * `max_concurrent` - Maximum author pages in flight (clamped to at least 1)
    pub fn new(client: Client, base: Url, max_concurrent: usize) -> Self {
        let max_concurrent = max_concurrent.max(1);
        Self {
            client,
            base,
            max_concurrent,
            limiter: Arc::new(Semaphore::new(max_concurrent)),
            stats: ResolverStats::default(),
        }
    }

    pub fn stats(&self) -> ResolverStats {
        self.stats
    }

    /// Resolves a single author URL
    ///
    /// Returns immediately without a request if `author_url` is cached.
    /// Otherwise fetches and parses the author page and inserts the record
    /// under `author_url`. Any failure is returned to the caller unchanged.
    pub async fn resolve(
        &mut self,
        author_url: &str,
        cache: &mut AuthorCache,
    ) -> Result<(), ScrapeError> {
        if cache.contains(author_url) {
            tracing::debug!("Author cache hit: {}", author_url);
            self.stats.cache_hits += 1;
            return Ok(());
        }

        let record = fetch_author(&self.client, &self.base, author_url).await?;
        self.stats.fetches += 1;
        cache.insert(author_url, record);
        Ok(())
    }

    /// Resolves every author URL referenced by one listing page
    ///
    /// URLs are deduplicated against the cache and against each other, so a
    /// page that links the same author twice costs one request.
    pub async fn resolve_all<'a, I>(
        &mut self,
        author_urls: I,
        cache: &mut AuthorCache,
    ) -> Result<(), ScrapeError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        if self.max_concurrent == 1 {
            for author_url in author_urls {
                self.resolve(author_url, cache).await?;
            }
            return Ok(());
        }

        let mut pending: Vec<String> = Vec::new();
        let mut queued: HashSet<&str> = HashSet::new();
        for author_url in author_urls {
            if cache.contains(author_url) || !queued.insert(author_url) {
                tracing::debug!("Author cache hit: {}", author_url);
                self.stats.cache_hits += 1;
            } else {
                pending.push(author_url.to_string());
            }
        }

        if pending.is_empty() {
            return Ok(());
        }

        tracing::debug!(
            "Fetching {} authors (limit {})",
            pending.len(),
            self.max_concurrent
        );

        let mut tasks: JoinSet<Result<(usize, AuthorRecord), ScrapeError>> = JoinSet::new();
        for (index, author_url) in pending.iter().enumerate() {
            let client = self.client.clone();
            let base = self.base.clone();
            let limiter = Arc::clone(&self.limiter);
            let href = author_url.clone();
            tasks.spawn(async move {
                let _permit = limiter.acquire_owned().await?;
                let record = fetch_author(&client, &base, &href).await?;
                Ok((index, record))
            });
        }

        // Completion order is arbitrary; slots restore first-seen order
        let mut slots: Vec<Option<AuthorRecord>> = vec![None; pending.len()];
        while let Some(joined) = tasks.join_next().await {
            let outcome = match joined {
                Ok(outcome) => outcome,
                Err(e) => Err(e.into()),
            };
            match outcome {
                Ok((index, record)) => slots[index] = Some(record),
                Err(e) => {
                    tasks.abort_all();
                    tracing::debug!("Aborted {} pending author fetches", tasks.len());
                    return Err(e);
                }
            }
        }

        let resolved = pending
            .into_iter()
            .zip(slots)
            .filter_map(|(author_url, record)| record.map(|record| (author_url, record)));

        for (author_url, record) in resolved {
            self.stats.fetches += 1;
            cache.insert(author_url, record);
        }

        Ok(())
    }
}

/// Fetches and parses one author page
async fn fetch_author(client: &Client, base: &Url, href: &str) -> Result<AuthorRecord, ScrapeError> {
    let page = fetch_page(client, base, href).await?;
    let record = parse_author(&page.text(), page.url.as_str())?;
    tracing::debug!("Resolved author {} ({})", record.title, href);
    Ok(record)
}
