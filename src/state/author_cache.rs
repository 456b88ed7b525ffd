/// Deduplicating author cache keyed by author page URL
///
/// Entries keep first-seen order, which is the order the authors CSV is
/// written in. A key is populated at most once.
use crate::records::AuthorRecord;
use indexmap::map::Entry;
use indexmap::IndexMap;

/// Mapping from author detail-page URL to its resolved record
#[derive(Debug, Clone, Default)]
pub struct AuthorCache {
    entries: IndexMap<String, AuthorRecord>,
}

impl AuthorCache {
    /// Creates an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the author URL has already been resolved
    pub fn contains(&self, author_url: &str) -> bool {
        self.entries.contains_key(author_url)
    }

    /// Looks up a resolved author
    pub fn get(&self, author_url: &str) -> Option<&AuthorRecord> {
        self.entries.get(author_url)
    }

    /// Inserts a record unless the key is already present
    ///
    /// # Returns
    ///
    /// * `true` - The record was inserted
    /// * `false` - The key already existed; the stored record is unchanged
    pub fn insert(&mut self, author_url: impl Into<String>, record: AuthorRecord) -> bool {
        match self.entries.entry(author_url.into()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(record);
                true
            }
        }
    }

    /// Number of distinct authors resolved
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates records in insertion order
    pub fn records(&self) -> impl Iterator<Item = &AuthorRecord> {
        self.entries.values()
    }
}
