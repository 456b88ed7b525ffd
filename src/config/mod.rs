//! Configuration module
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every key has a default, so the crawler runs without any file at all.
//!
//! # Example
//!
//! ```no_run
//! use toscrape_quotes::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("quotes.toml")).unwrap();
//! println!("Writing quotes to: {}", config.output.quotes_path);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlerConfig, OutputConfig, UserAgentConfig, DEFAULT_BASE_URL};

// Re-export parser functions
pub use parser::{
    compute_config_hash, hash_config_content, load_config, load_config_with_hash, parse_config,
};
pub use validation::{validate, MAX_CONCURRENT_AUTHORS};
