//! URL handling
//!
//! Every link the crawler follows (next-page links and author links) is
//! relative to the site's base URL. This module resolves them.

use url::Url;

/// Parses the configured base URL
pub fn parse_base_url(base: &str) -> Result<Url, url::ParseError> {
    Url::parse(base)
}

/// Resolves an href against the base URL
///
/// Absolute hrefs are returned unchanged; relative hrefs (`/page/2/`,
/// `/author/Albert-Einstein`) are joined onto the base. An empty href
/// resolves to the base itself.
///
/// # Examples
///
/// ```
/// use toscrape_quotes::url::resolve_url;
/// use url::Url;
///
/// let base = Url::parse("https://quotes.toscrape.com/").unwrap();
/// let next = resolve_url(&base, "/page/2/").unwrap();
/// assert_eq!(next.as_str(), "https://quotes.toscrape.com/page/2/");
/// ```
pub fn resolve_url(base: &Url, href: &str) -> Result<Url, url::ParseError> {
    base.join(href.trim())
}
