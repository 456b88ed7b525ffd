/// Visited-page tracking for the pagination loop
use std::collections::HashSet;
use url::Url;

/// Set of listing pages already processed in this run
#[derive(Debug, Default)]
pub struct VisitedPages {
    seen: HashSet<String>,
    order: Vec<String>,
}

impl VisitedPages {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a page as visited
    ///
    /// Fragments are ignored so `/page/2/#top` and `/page/2/` count as the
    /// same page.
    ///
    /// # Returns
    ///
    /// * `true` - First visit
    /// * `false` - The page was already visited (pagination cycle)
    pub fn mark(&mut self, url: &Url) -> bool {
        let mut key = url.clone();
        key.set_fragment(None);
        let key = key.to_string();

        if self.seen.insert(key.clone()) {
            self.order.push(key);
            true
        } else {
            false
        }
    }

    /// Number of pages visited
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Visited pages in crawl order
    pub fn pages(&self) -> &[String] {
        &self.order
    }
}
