//! Output module
//!
//! This module handles:
//! - Writing the quotes and authors CSV files
//! - Encoding and decoding the tags column
//! - Reporting crawl statistics

mod csv_output;
pub mod stats;

pub use csv_output::{
    decode_tags, encode_tags, write_authors, write_outputs, write_quotes, AUTHORS_HEADER,
    QUOTES_HEADER,
};
pub use stats::{print_statistics, CrawlStatistics};
