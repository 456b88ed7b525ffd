//! HTML extraction for listing and author pages
//!
//! Listing pages yield quote blocks plus the "next" pagination link.
//! Author pages yield a single `AuthorRecord`.
//!
//! Every structural lookup returns an `Option`; each call site decides
//! whether absence is acceptable (the next link) or turns it into
//! `ScrapeError::MalformedPage` (everything else).

use crate::records::{AuthorRecord, Quote};
use crate::ScrapeError;
use scraper::{ElementRef, Html, Selector};

const NEXT_LINK: &str = ".next > a";
const QUOTE_BLOCK: &str = ".row > .col-md-8 .quote";
const QUOTE_TEXT: &str = ".text";
const QUOTE_AUTHOR: &str = ".author";
const QUOTE_AUTHOR_LINK: &str = "span a[href]";
const QUOTE_TAG: &str = "a.tag";

const AUTHOR_DETAILS: &str = ".author-details";
const AUTHOR_TITLE: &str = ".author-title";
const AUTHOR_BORN_DATE: &str = ".author-born-date";
const AUTHOR_BORN_LOCATION: &str = ".author-born-location";
const AUTHOR_DESCRIPTION: &str = ".author-description";

/// A quote as it appears on a listing page, with its author link
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedQuote {
    /// The quote record itself
    pub quote: Quote,

    /// Relative URL of the author's detail page (e.g. `/author/Jane-Austen`)
    pub author_url: String,
}

/// Everything the crawl loop needs from one listing page
#[derive(Debug, Clone, Default)]
pub struct ListingPage {
    /// Quotes in document order
    pub quotes: Vec<ExtractedQuote>,

    /// Relative URL of the next page, absent on the last page
    pub next_page: Option<String>,
}

/// Parses a listing page
///
/// The document is dropped before returning so the result can be held
/// across `.await` points.
///
/// # Arguments
///
/// * `html` - Page body
/// * `page_url` - URL of the page, used in error messages
///
/// # Example
///
/// ```
/// use toscrape_quotes::crawler::parse_listing;
///
/// let html = r#"<div class="row"><div class="col-md-8">
///   <div class="quote">
///     <span class="text">Be yourself.</span>
///     <span>by <small class="author">Oscar Wilde</small> <a href="/author/Oscar-Wilde">(about)</a></span>
///     <div class="tags"><a class="tag" href="/tag/life/">life</a></div>
///   </div>
///   <nav><ul class="pager"><li class="next"><a href="/page/2/">Next</a></li></ul></nav>
/// </div></div>"#;
///
/// let page = parse_listing(html, "https://quotes.toscrape.com/").unwrap();
/// assert_eq!(page.quotes.len(), 1);
/// assert_eq!(page.quotes[0].author_url, "/author/Oscar-Wilde");
/// assert_eq!(page.next_page.as_deref(), Some("/page/2/"));
/// ```
pub fn parse_listing(html: &str, page_url: &str) -> Result<ListingPage, ScrapeError> {
    let document = Html::parse_document(html);

    let next_page = find_next_page_link(&document, page_url)?;
    let quotes = extract_quotes(&document, page_url)?;

    Ok(ListingPage { quotes, next_page })
}

/// Parses an author detail page
pub fn parse_author(html: &str, page_url: &str) -> Result<AuthorRecord, ScrapeError> {
    let document = Html::parse_document(html);
    extract_author(&document, page_url)
}

/// Locates the "next" pagination control
///
/// # Returns
///
/// * `Ok(Some(href))` - Relative URL of the next page
/// * `Ok(None)` - No next control; this is the last page
/// * `Err(MalformedPage)` - The control exists but carries no href
pub fn find_next_page_link(document: &Html, page_url: &str) -> Result<Option<String>, ScrapeError> {
    let selector = compile(NEXT_LINK)?;

    let Some(anchor) = document.select(&selector).next() else {
        return Ok(None);
    };

    anchor
        .value()
        .attr("href")
        .map(|href| Some(href.to_string()))
        .ok_or_else(|| malformed(page_url, "next-page link has no href"))
}

/// Extracts every quote block in document order
///
/// A page with no quote blocks yields an empty list. A quote block missing
/// its text, author name, or author link is a malformed page.
pub fn extract_quotes(document: &Html, page_url: &str) -> Result<Vec<ExtractedQuote>, ScrapeError> {
    let block_selector = compile(QUOTE_BLOCK)?;
    let text_selector = compile(QUOTE_TEXT)?;
    let author_selector = compile(QUOTE_AUTHOR)?;
    let link_selector = compile(QUOTE_AUTHOR_LINK)?;
    let tag_selector = compile(QUOTE_TAG)?;

    let mut quotes = Vec::new();

    for (index, block) in document.select(&block_selector).enumerate() {
        let text = first_text(block, &text_selector)
            .ok_or_else(|| malformed(page_url, &format!("quote #{} has no text", index + 1)))?;

        let author = first_text(block, &author_selector).ok_or_else(|| {
            malformed(page_url, &format!("quote #{} has no author name", index + 1))
        })?;

        let author_url = block
            .select(&link_selector)
            .next()
            .and_then(|anchor| anchor.value().attr("href"))
            .map(str::to_string)
            .ok_or_else(|| {
                malformed(page_url, &format!("quote #{} has no author link", index + 1))
            })?;

        let tags = block.select(&tag_selector).map(element_text).collect();

        quotes.push(ExtractedQuote {
            quote: Quote::new(text, author, tags),
            author_url,
        });
    }

    Ok(quotes)
}

/// Extracts the biographical fields from an author detail page
pub fn extract_author(document: &Html, page_url: &str) -> Result<AuthorRecord, ScrapeError> {
    let details_selector = compile(AUTHOR_DETAILS)?;

    let details = document
        .select(&details_selector)
        .next()
        .ok_or_else(|| malformed(page_url, "author page has no details container"))?;

    let field = |css: &str, name: &str| -> Result<String, ScrapeError> {
        let selector = compile(css)?;
        first_text(details, &selector)
            .ok_or_else(|| malformed(page_url, &format!("author page has no {}", name)))
    };

    let title = field(AUTHOR_TITLE, "title")?;
    let born_date = field(AUTHOR_BORN_DATE, "birth date")?;
    let born_location = field(AUTHOR_BORN_LOCATION, "birth location")?;
    let description = field(AUTHOR_DESCRIPTION, "description")?;

    Ok(AuthorRecord::new(title, &born_date, &born_location, description))
}

fn compile(css: &str) -> Result<Selector, ScrapeError> {
    Selector::parse(css).map_err(|e| ScrapeError::Selector {
        selector: css.to_string(),
        message: format!("{:?}", e),
    })
}

/// Trimmed text of the first match under `scope`
fn first_text(scope: ElementRef<'_>, selector: &Selector) -> Option<String> {
    scope.select(selector).next().map(element_text)
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

fn malformed(page_url: &str, message: &str) -> ScrapeError {
    ScrapeError::MalformedPage {
        url: page_url.to_string(),
        message: message.to_string(),
    }
}
