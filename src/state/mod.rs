//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `AuthorCache`: author page URL → resolved biography, first-seen order
//! - `VisitedPages`: listing pages already processed, used to stop on cycles

mod author_cache;
mod visited;

// Re-export main types
pub use author_cache::AuthorCache;
pub use visited::VisitedPages;
