//! Crawl statistics
//!
//! Counters collected by the coordinator during a run, printed once the
//! output files have been written.

use chrono::{DateTime, Utc};
use std::time::Duration;

/// Crawl statistics summary
#[derive(Debug, Clone)]
pub struct CrawlStatistics {
    /// When the crawl started
    pub started_at: DateTime<Utc>,

    /// Wall time spent crawling (excluding output)
    pub elapsed: Duration,

    /// Listing pages processed
    pub pages_visited: u64,

    /// Quotes collected
    pub quotes: u64,

    /// Distinct authors resolved
    pub authors: u64,

    /// Author pages fetched
    pub author_fetches: u64,

    /// Author lookups served from the cache
    pub author_cache_hits: u64,
}

impl CrawlStatistics {
    /// Share of author lookups served without a request, as a percentage
    pub fn cache_hit_rate(&self) -> f64 {
        let lookups = self.author_fetches + self.author_cache_hits;
        if lookups == 0 {
            return 0.0;
        }
        (self.author_cache_hits as f64 / lookups as f64) * 100.0
    }

    /// Requests issued in total (listing pages plus author pages)
    pub fn total_requests(&self) -> u64 {
        self.pages_visited + self.author_fetches
    }
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &CrawlStatistics) {
    println!("=== Crawl Statistics ===\n");

    println!("Run:");
    println!("  Started: {}", stats.started_at.to_rfc3339());
    println!("  Elapsed: {:.2}s", stats.elapsed.as_secs_f64());
    println!("  Requests: {}", stats.total_requests());
    println!();

    println!("Results:");
    println!("  Pages visited: {}", stats.pages_visited);
    println!("  Quotes: {}", stats.quotes);
    println!("  Authors: {}", stats.authors);
    println!();

    println!(
        "Author cache: {} fetched, {} hits ({:.1}% hit rate)",
        stats.author_fetches,
        stats.author_cache_hits,
        stats.cache_hit_rate()
    );
}
