//! Value records produced by the crawl
//!
//! - `Quote`: one quotation as shown on a listing page
//! - `AuthorRecord`: biographical fields from an author detail page

/// A single quotation extracted from a listing page
///
/// `author` is the display name printed next to the quote. It is not a key
/// into the author cache; that cache is keyed by the author page URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quote {
    /// The quotation text
    pub text: String,

    /// Author display name
    pub author: String,

    /// Tag labels in page order
    pub tags: Vec<String>,
}

impl Quote {
    pub fn new(text: impl Into<String>, author: impl Into<String>, tags: Vec<String>) -> Self {
        Self {
            text: text.into(),
            author: author.into(),
            tags,
        }
    }
}

/// Biographical data from an author detail page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorRecord {
    /// Author display name
    pub title: String,

    /// Birth date and birth location joined by a single space
    pub born: String,

    /// Free-text biography
    pub description: String,
}

impl AuthorRecord {
    /// Builds a record, joining the birth date and location the way the
    /// author page presents them ("March 14, 1879 in Ulm, Germany")
    pub fn new(
        title: impl Into<String>,
        born_date: &str,
        born_location: &str,
        description: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            born: format!("{} {}", born_date, born_location),
            description: description.into(),
        }
    }
}
