use serde::Deserialize;

/// Default site crawled when no base URL is configured
pub const DEFAULT_BASE_URL: &str = "https://quotes.toscrape.com/";

/// Main configuration structure for the quote crawler
///
/// Every section and key is optional; an empty file (or no file at all)
/// yields the defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub output: OutputConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// First listing page; relative links are resolved against it
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Maximum number of author pages fetched at once for a single listing page
    #[serde(rename = "max-concurrent-authors")]
    pub max_concurrent_authors: u32,

    /// Overall request timeout in seconds (client default when absent)
    #[serde(rename = "request-timeout-secs")]
    pub request_timeout_secs: Option<u64>,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            max_concurrent_authors: 1,
            request_timeout_secs: None,
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: "toscrape-quotes".to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
            contact_url: "https://quotes.toscrape.com/".to_string(),
        }
    }
}

impl UserAgentConfig {
    /// Formats the User-Agent header value: `Name/Version (+ContactURL)`
    pub fn header_value(&self) -> String {
        format!(
            "{}/{} (+{})",
            self.crawler_name, self.crawler_version, self.contact_url
        )
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path to the quotes CSV file
    #[serde(rename = "quotes-path")]
    pub quotes_path: String,

    /// Path to the authors CSV file
    #[serde(rename = "authors-path")]
    pub authors_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            quotes_path: "quotes.csv".to_string(),
            authors_path: "authors.csv".to_string(),
        }
    }
}
