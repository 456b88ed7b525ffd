//! CSV writers for quotes and authors
//!
//! Quotes: `text,author,tags`, where `tags` is a JSON array such as
//! `["life","love"]`. Authors: `title,born,description`, in cache order.

use crate::records::Quote;
use crate::state::AuthorCache;
use crate::ScrapeError;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

pub const QUOTES_HEADER: [&str; 3] = ["text", "author", "tags"];
pub const AUTHORS_HEADER: [&str; 3] = ["title", "born", "description"];

/// Encodes a tag list as a single CSV field
pub fn encode_tags(tags: &[String]) -> Result<String, ScrapeError> {
    Ok(serde_json::to_string(tags)?)
}

/// Decodes a tags field written by `encode_tags`
///
/// # Example
///
/// ```
/// use toscrape_quotes::output::decode_tags;
///
/// let tags = decode_tags(r#"["life","love"]"#).unwrap();
/// assert_eq!(tags, vec!["life", "love"]);
/// ```
pub fn decode_tags(field: &str) -> Result<Vec<String>, ScrapeError> {
    Ok(serde_json::from_str(field)?)
}

/// Writes the quotes table to any writer
pub fn write_quotes<W: Write>(quotes: &[Quote], writer: W) -> Result<(), ScrapeError> {
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record(QUOTES_HEADER)?;

    for quote in quotes {
        let tags = encode_tags(&quote.tags)?;
        writer.write_record([quote.text.as_str(), quote.author.as_str(), tags.as_str()])?;
    }

    writer.flush()?;
    Ok(())
}

/// Writes the authors table to any writer, in cache insertion order
pub fn write_authors<W: Write>(authors: &AuthorCache, writer: W) -> Result<(), ScrapeError> {
    let mut writer = csv::Writer::from_writer(writer);
    writer.write_record(AUTHORS_HEADER)?;

    for author in authors.records() {
        writer.write_record([
            author.title.as_str(),
            author.born.as_str(),
            author.description.as_str(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

/// Renders both tables, then writes them to their paths
///
/// Both tables are encoded in memory and staged into temporary files next to
/// their destinations. Nothing is renamed into place until both staged files
/// are complete, so a failure on either table leaves any existing output
/// untouched. Existing files are replaced on success.
pub fn write_outputs(
    quotes: &[Quote],
    authors: &AuthorCache,
    quotes_path: &Path,
    authors_path: &Path,
) -> Result<(), ScrapeError> {
    let mut quotes_buf = Vec::new();
    write_quotes(quotes, &mut quotes_buf)?;

    let mut authors_buf = Vec::new();
    write_authors(authors, &mut authors_buf)?;

    let staged_quotes = stage(quotes_path, &quotes_buf)?;
    let staged_authors = stage(authors_path, &authors_buf)?;

    staged_quotes.persist(quotes_path).map_err(|e| e.error)?;
    tracing::info!("Wrote {} quotes to {}", quotes.len(), quotes_path.display());

    staged_authors.persist(authors_path).map_err(|e| e.error)?;
    tracing::info!(
        "Wrote {} authors to {}",
        authors.len(),
        authors_path.display()
    );

    Ok(())
}

/// Writes `contents` to a temporary file in the destination's directory
fn stage(destination: &Path, contents: &[u8]) -> Result<NamedTempFile, ScrapeError> {
    let dir = destination
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut staged = NamedTempFile::new_in(dir)?;
    staged.write_all(contents)?;
    staged.flush()?;
    Ok(staged)
}
