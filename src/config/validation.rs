use crate::config::types::{Config, CrawlerConfig, OutputConfig, UserAgentConfig};
use crate::ConfigError;
use url::Url;

/// Upper bound on concurrent author fetches
pub const MAX_CONCURRENT_AUTHORS: u32 = 32;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.base_url).map_err(|e| {
        ConfigError::InvalidUrl(format!("Invalid base_url '{}': {}", config.base_url, e))
    })?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "base_url '{}' must use http or https",
            config.base_url
        )));
    }

    if config.max_concurrent_authors < 1 || config.max_concurrent_authors > MAX_CONCURRENT_AUTHORS
    {
        return Err(ConfigError::Validation(format!(
            "max_concurrent_authors must be between 1 and {}, got {}",
            MAX_CONCURRENT_AUTHORS, config.max_concurrent_authors
        )));
    }

    if config.request_timeout_secs == Some(0) {
        return Err(ConfigError::Validation(
            "request_timeout_secs must be > 0 when set".to_string(),
        ));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    // Crawler name: non-empty, alphanumeric + hyphens only
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler_name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler_name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    Url::parse(&config.contact_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact_url: {}", e)))?;

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.quotes_path.is_empty() {
        return Err(ConfigError::Validation(
            "quotes_path cannot be empty".to_string(),
        ));
    }

    if config.authors_path.is_empty() {
        return Err(ConfigError::Validation(
            "authors_path cannot be empty".to_string(),
        ));
    }

    // Both writers truncate; sharing a path would lose the quotes
    if config.quotes_path == config.authors_path {
        return Err(ConfigError::Validation(format!(
            "quotes_path and authors_path must differ, both are '{}'",
            config.quotes_path
        )));
    }

    Ok(())
}
