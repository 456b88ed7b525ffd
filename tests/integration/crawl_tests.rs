//! Integration tests for the crawler
//!
//! These tests use wiremock to serve a small quotes site and run the full
//! crawl cycle end-to-end, including the CSV files it writes.

use std::path::{Path, PathBuf};
use tempfile::TempDir;
use toscrape_quotes::config::Config;
use toscrape_quotes::crawler::{crawl, Coordinator};
use toscrape_quotes::output::decode_tags;
use toscrape_quotes::ScrapeError;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// A quote on a fixture listing page: (text, author name, author href, space-separated tags)
type FixtureQuote<'a> = (&'a str, &'a str, &'a str, &'a str);

fn listing_page(quotes: &[FixtureQuote<'_>], next: Option<&str>) -> String {
    let blocks: String = quotes
        .iter()
        .map(|(text, author, href, tags)| {
            let tags: String = tags
                .split_whitespace()
                .map(|t| format!(r#"<a class="tag" href="/tag/{0}/page/1/">{0}</a>"#, t))
                .collect();
            format!(
                r#"<div class="quote" itemscope itemtype="http://schema.org/CreativeWork">
                <span class="text" itemprop="text">{}</span>
                <span>by <small class="author" itemprop="author">{}</small>
                <a href="{}">(about)</a>
                </span>
                <div class="tags">Tags: {}</div>
                </div>"#,
                text, author, href, tags
            )
        })
        .collect();

    let pager = next
        .map(|href| {
            format!(
                r#"<nav><ul class="pager"><li class="next"><a href="{}">Next <span aria-hidden="true">&rarr;</span></a></li></ul></nav>"#,
                href
            )
        })
        .unwrap_or_default();

    format!(
        r#"<!DOCTYPE html><html lang="en"><head><title>Quotes to Scrape</title></head><body>
        <div class="container">
        <div class="row header-box"><div class="col-md-8"><h1><a href="/">Quotes to Scrape</a></h1></div></div>
        <div class="row"><div class="col-md-8">{}{}</div>
        <div class="col-md-4 tags-box"><h2>Top Ten tags</h2><a class="tag" href="/tag/love/">love</a></div>
        </div></div></body></html>"#,
        blocks, pager
    )
}

fn author_page(name: &str, born_date: &str, born_location: &str, description: &str) -> String {
    format!(
        r#"<!DOCTYPE html><html lang="en"><body><div class="container">
        <div class="author-details">
            <h3 class="author-title">{}
            </h3>
            <p><strong>Born:</strong> <span class="author-born-date">{}</span>
            <span class="author-born-location">{}</span></p>
            <p><strong>Description:</strong></p>
            <div class="author-description">
            {}
            </div>
        </div></div></body></html>"#,
        name, born_date, born_location, description
    )
}

async fn mount_html(server: &MockServer, route: &str, body: String, calls: u64) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html; charset=utf-8"),
        )
        .expect(calls)
        .mount(server)
        .await;
}

async fn mount_status(server: &MockServer, route: &str, status: u16) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

/// Creates a test configuration pointed at the mock server, writing into `dir`
fn create_test_config(server: &MockServer, dir: &TempDir, max_concurrent_authors: u32) -> Config {
    let mut config = Config::default();
    config.crawler.base_url = format!("{}/", server.uri());
    config.crawler.max_concurrent_authors = max_concurrent_authors;
    config.user_agent.crawler_name = "TestBot".to_string();
    config.output.quotes_path = path_string(&dir.path().join("quotes.csv"));
    config.output.authors_path = path_string(&dir.path().join("authors.csv"));
    config
}

fn path_string(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

fn read_rows(path: &str) -> (Vec<String>, Vec<Vec<String>>) {
    let mut reader = csv::Reader::from_path(path).expect("Failed to open CSV");
    let headers = reader
        .headers()
        .expect("Failed to read headers")
        .iter()
        .map(str::to_string)
        .collect();
    let rows = reader
        .records()
        .map(|r| r.expect("Bad CSV row").iter().map(str::to_string).collect())
        .collect();
    (headers, rows)
}

/// Mounts the two-page site: page 1 has quotes by X and Y, page 2 one more by X
async fn mount_two_page_site(server: &MockServer) {
    mount_html(
        server,
        "/",
        listing_page(
            &[
                ("“q1”", "Author X", "/author/X", "life love"),
                ("“q2”", "Author Y", "/author/Y", "humor"),
            ],
            Some("/page/2/"),
        ),
        1,
    )
    .await;

    mount_html(
        server,
        "/page/2/",
        listing_page(&[("“q3”", "Author X", "/author/X", "")], None),
        1,
    )
    .await;

    mount_html(
        server,
        "/author/X",
        author_page("Author X", "March 14, 1879", "in Ulm, Germany", "Physicist."),
        1,
    )
    .await;

    mount_html(
        server,
        "/author/Y",
        author_page("Author Y", "December 16, 1775", "in Steventon, England", "Novelist."),
        1,
    )
    .await;
}

#[tokio::test]
async fn test_end_to_end_two_page_site() {
    let server = MockServer::start().await;
    mount_two_page_site(&server).await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(&server, &dir, 1);

    let outcome = crawl(&config).await.expect("Crawl failed");
    assert_eq!(outcome.stats.pages_visited, 2);
    assert_eq!(outcome.stats.author_fetches, 2);
    assert_eq!(outcome.stats.author_cache_hits, 1);

    let (headers, rows) = read_rows(&config.output.quotes_path);
    assert_eq!(headers, vec!["text", "author", "tags"]);
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0][0], "“q1”");
    assert_eq!(rows[1][0], "“q2”");
    assert_eq!(rows[2][0], "“q3”");
    assert_eq!(rows[2][1], "Author X");
    assert_eq!(decode_tags(&rows[0][2]).unwrap(), vec!["life", "love"]);
    assert!(decode_tags(&rows[2][2]).unwrap().is_empty());

    let (headers, rows) = read_rows(&config.output.authors_path);
    assert_eq!(headers, vec!["title", "born", "description"]);
    assert_eq!(rows.len(), 2);
    assert_eq!(
        rows[0],
        vec!["Author X", "March 14, 1879 in Ulm, Germany", "Physicist."]
    );
    assert_eq!(rows[1][0], "Author Y");

    // Mock expectations (each author fetched once) are verified on drop
}

#[tokio::test]
async fn test_end_to_end_with_concurrent_authors() {
    let server = MockServer::start().await;
    mount_two_page_site(&server).await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(&server, &dir, 4);

    let outcome = crawl(&config).await.expect("Crawl failed");

    let titles: Vec<_> = outcome.authors.records().map(|a| a.title.as_str()).collect();
    assert_eq!(titles, vec!["Author X", "Author Y"]);

    let (_, rows) = read_rows(&config.output.authors_path);
    assert_eq!(rows.len(), 2);
}

#[tokio::test]
async fn test_order_preserved_across_pages() {
    let server = MockServer::start().await;
    mount_html(
        &server,
        "/",
        listing_page(
            &[("A", "One", "/author/1", ""), ("B", "One", "/author/1", "")],
            Some("/page/2/"),
        ),
        1,
    )
    .await;
    mount_html(
        &server,
        "/page/2/",
        listing_page(
            &[("C", "One", "/author/1", ""), ("D", "One", "/author/1", "")],
            None,
        ),
        1,
    )
    .await;
    mount_html(&server, "/author/1", author_page("One", "1900", "in A", "Bio"), 1).await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(&server, &dir, 1);
    let mut coordinator = Coordinator::new(&config).expect("Failed to create coordinator");
    let outcome = coordinator.run().await.expect("Crawl failed");

    let texts: Vec<_> = outcome.quotes.iter().map(|q| q.text.as_str()).collect();
    assert_eq!(texts, vec!["A", "B", "C", "D"]);
}

#[tokio::test]
async fn test_pagination_terminates_on_last_page() {
    let server = MockServer::start().await;
    mount_html(
        &server,
        "/",
        listing_page(&[("p1", "One", "/author/1", "")], Some("/page/2/")),
        1,
    )
    .await;
    mount_html(
        &server,
        "/page/2/",
        listing_page(&[("p2", "One", "/author/1", "")], Some("/page/3/")),
        1,
    )
    .await;
    mount_html(
        &server,
        "/page/3/",
        listing_page(&[("p3", "One", "/author/1", "")], None),
        1,
    )
    .await;
    mount_html(&server, "/author/1", author_page("One", "1900", "in A", "Bio"), 1).await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(&server, &dir, 1);
    let mut coordinator = Coordinator::new(&config).unwrap();
    let outcome = coordinator.run().await.expect("Crawl failed");

    assert_eq!(outcome.stats.pages_visited, 3);
    assert_eq!(outcome.quotes.len(), 3);
}

#[tokio::test]
async fn test_author_dedup_within_page() {
    let server = MockServer::start().await;
    mount_html(
        &server,
        "/",
        listing_page(
            &[
                ("q1", "One", "/author/1", ""),
                ("q2", "Two", "/author/2", ""),
                ("q3", "One", "/author/1", ""),
            ],
            None,
        ),
        1,
    )
    .await;
    mount_html(&server, "/author/1", author_page("One", "1900", "in A", "Bio"), 1).await;
    mount_html(&server, "/author/2", author_page("Two", "1901", "in B", "Bio"), 1).await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(&server, &dir, 1);
    crawl(&config).await.expect("Crawl failed");

    let (_, rows) = read_rows(&config.output.authors_path);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0][0], "One");
    assert_eq!(rows[1][0], "Two");
}

#[tokio::test]
async fn test_pagination_cycle_is_detected() {
    let server = MockServer::start().await;
    mount_html(
        &server,
        "/",
        listing_page(&[("q1", "One", "/author/1", "")], Some("/page/2/")),
        1,
    )
    .await;
    mount_html(
        &server,
        "/page/2/",
        listing_page(&[("q2", "One", "/author/1", "")], Some("/")),
        1,
    )
    .await;
    mount_html(&server, "/author/1", author_page("One", "1900", "in A", "Bio"), 1).await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(&server, &dir, 1);

    match crawl(&config).await {
        Err(ScrapeError::CycleDetected { url }) => assert_eq!(url, format!("{}/", server.uri())),
        other => panic!("expected cycle detection, got {:?}", other.map(|o| o.quotes)),
    }

    assert!(!PathBuf::from(&config.output.quotes_path).exists());
    assert!(!PathBuf::from(&config.output.authors_path).exists());
}

#[tokio::test]
async fn test_listing_fetch_error_writes_nothing() {
    let server = MockServer::start().await;
    mount_html(
        &server,
        "/",
        listing_page(&[("q1", "One", "/author/1", "")], Some("/page/2/")),
        1,
    )
    .await;
    mount_status(&server, "/page/2/", 500).await;
    mount_html(&server, "/author/1", author_page("One", "1900", "in A", "Bio"), 1).await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(&server, &dir, 1);

    // An existing file from an earlier run must survive a failed crawl
    std::fs::write(&config.output.quotes_path, "previous run\n").unwrap();

    let result = crawl(&config).await;
    assert!(matches!(
        result,
        Err(ScrapeError::Fetch { status: 500, .. })
    ));

    assert_eq!(
        std::fs::read_to_string(&config.output.quotes_path).unwrap(),
        "previous run\n"
    );
    assert!(!PathBuf::from(&config.output.authors_path).exists());
}

#[tokio::test]
async fn test_author_not_found_aborts_crawl() {
    let server = MockServer::start().await;
    mount_html(
        &server,
        "/",
        listing_page(&[("q1", "Ghost", "/author/ghost", "")], None),
        1,
    )
    .await;
    mount_status(&server, "/author/ghost", 404).await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(&server, &dir, 1);

    match crawl(&config).await {
        Err(ScrapeError::Fetch { status, url }) => {
            assert_eq!(status, 404);
            assert!(url.ends_with("/author/ghost"));
        }
        other => panic!("expected fetch error, got {:?}", other.map(|o| o.quotes)),
    }

    assert!(!PathBuf::from(&config.output.quotes_path).exists());
}

#[tokio::test]
async fn test_malformed_listing_aborts_crawl() {
    let server = MockServer::start().await;
    mount_html(
        &server,
        "/",
        r#"<html><body><div class="row"><div class="col-md-8">
        <div class="quote"><span>by <small class="author">Nobody</small>
        <a href="/author/nobody">(about)</a></span></div>
        </div></div></body></html>"#
            .to_string(),
        1,
    )
    .await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(&server, &dir, 1);

    let result = crawl(&config).await;
    assert!(matches!(result, Err(ScrapeError::MalformedPage { .. })));
    assert!(!PathBuf::from(&config.output.quotes_path).exists());
}
