//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full search and chapter walk end-to-end over the HTTP session.

use novel_trawler::config::{Config, CookieConfig, SessionConfig, SiteConfig};
use novel_trawler::crawler::{run_crawl, CrawlOutcome};
use novel_trawler::output::{render_book, write_book};
use novel_trawler::session::{HttpSession, PageSession, SessionError};
use novel_trawler::TrawlerError;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration pointing the search at the mock server
fn create_test_config(base_url: &str) -> Config {
    Config {
        session: SessionConfig {
            timeout_secs: 5,
            cookies: vec![],
            ..SessionConfig::default()
        },
        site: SiteConfig {
            search_url: format!("{}/search?kw={{query}}", base_url),
            ..SiteConfig::default()
        },
        ..Config::default()
    }
}

fn html(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(body)
        .insert_header("content-type", "text/html; charset=utf-8")
}

fn search_page(title: &str, link: &str) -> String {
    format!(
        r#"<html><body><div id="result-list"><ul>
        <li><h4>{}</h4><p class="update"><a href="{}">Latest chapter</a></p></li>
        </ul></div></body></html>"#,
        title, link
    )
}

fn chapter_page(title: &str, body: &str, prev: Option<&str>) -> String {
    let link = prev
        .map(|href| format!(r#"<a id="pagePrevBottomBtn" href="{}">Previous</a>"#, href))
        .unwrap_or_default();
    format!(
        r#"<html><body><h1>{}</h1><div id="content">{}</div>{}</body></html>"#,
        title, body, link
    )
}

async fn mount_page(server: &MockServer, page_path: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(html(body))
        .mount(server)
        .await;
}

async fn mount_search(server: &MockServer, query: &str, body: String) {
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("kw", query))
        .respond_with(html(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_end_to_end_single_chapter() {
    let mock_server = MockServer::start().await;

    mount_search(
        &mock_server,
        "Example Novel",
        search_page("Example Novel", "/chapter/1"),
    )
    .await;
    mount_page(
        &mock_server,
        "/chapter/1",
        chapter_page("Chapter 1", "Hello", None),
    )
    .await;

    let config = create_test_config(&mock_server.uri());
    let outcome = run_crawl(&config, "Example Novel")
        .await
        .expect("Crawl failed");

    let CrawlOutcome::Found(book) = outcome else {
        panic!("Expected a book");
    };
    assert_eq!(book.title, "Example Novel");
    assert_eq!(book.chapters.len(), 1);
    assert_eq!(book.chapters[0].title, "Chapter 1");
    assert_eq!(book.chapters[0].content, "Hello\n");
}

#[tokio::test]
async fn test_walks_backward_and_writes_reading_order() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    // Latest chapter link is absolute, the rest are root-relative
    mount_search(
        &mock_server,
        "Example Novel",
        search_page("Example Novel", &format!("{}/chapter/3", base_url)),
    )
    .await;
    mount_page(
        &mock_server,
        "/chapter/3",
        chapter_page("Chapter 3", "Third.", Some("/chapter/2")),
    )
    .await;
    mount_page(
        &mock_server,
        "/chapter/2",
        chapter_page("Chapter 2", "Second.", Some("/chapter/1")),
    )
    .await;
    mount_page(
        &mock_server,
        "/chapter/1",
        chapter_page("Chapter 1", "First.", None),
    )
    .await;

    let config = create_test_config(&base_url);
    let outcome = run_crawl(&config, "Example Novel")
        .await
        .expect("Crawl failed");

    let CrawlOutcome::Found(book) = outcome else {
        panic!("Expected a book");
    };
    assert_eq!(
        render_book(&book),
        "Example Novel\n\nChapter 1\nFirst.\n\nChapter 2\nSecond.\n\nChapter 3\nThird.\n"
    );

    let dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    let path = write_book(&book, dir.path(), "Example Novel").expect("Failed to write book");
    let written = std::fs::read_to_string(path).expect("Failed to read book");
    assert!(written.starts_with("Example Novel\n\nChapter 1\n"));
}

#[tokio::test]
async fn test_search_without_result() {
    let mock_server = MockServer::start().await;

    mount_search(
        &mock_server,
        "Missing Book",
        r#"<html><body><div id="result-list"><ul></ul></div></body></html>"#.to_string(),
    )
    .await;

    let config = create_test_config(&mock_server.uri());
    let outcome = run_crawl(&config, "Missing Book")
        .await
        .expect("Crawl failed");

    assert_eq!(outcome, CrawlOutcome::NotFound);
}

#[tokio::test]
async fn test_cycle_stops_walk() {
    let mock_server = MockServer::start().await;

    mount_search(
        &mock_server,
        "Looping",
        search_page("Looping", "/chapter/a"),
    )
    .await;
    mount_page(
        &mock_server,
        "/chapter/a",
        chapter_page("A", "a", Some("/chapter/b")),
    )
    .await;
    mount_page(
        &mock_server,
        "/chapter/b",
        chapter_page("B", "b", Some("/chapter/a")),
    )
    .await;

    let config = create_test_config(&mock_server.uri());
    let outcome = run_crawl(&config, "Looping").await.expect("Crawl failed");

    let CrawlOutcome::Found(book) = outcome else {
        panic!("Expected a book");
    };
    let titles: Vec<_> = book.chapters.iter().map(|c| c.title.as_str()).collect();
    assert_eq!(titles, vec!["B", "A"]);

    // Search, A, B, then A once more before the duplicate link is detected
    let requests = mock_server.received_requests().await.unwrap_or_default();
    assert_eq!(requests.len(), 4);
}

#[tokio::test]
async fn test_chapter_limit_bounds_walk() {
    let mock_server = MockServer::start().await;

    mount_search(&mock_server, "Endless", search_page("Endless", "/chapter/1")).await;
    for n in 1..=8 {
        mount_page(
            &mock_server,
            &format!("/chapter/{}", n),
            chapter_page(
                &format!("Chapter {}", n),
                "text",
                Some(&format!("/chapter/{}", n + 1)),
            ),
        )
        .await;
    }

    let mut config = create_test_config(&mock_server.uri());
    config.crawler.max_chapters = 3;
    let outcome = run_crawl(&config, "Endless").await.expect("Crawl failed");

    let CrawlOutcome::Found(book) = outcome else {
        panic!("Expected a book");
    };
    assert_eq!(book.chapters.len(), 3);
    assert_eq!(book.chapters[0].title, "Chapter 3");
}

#[tokio::test]
async fn test_paragraph_breaks_normalized() {
    let mock_server = MockServer::start().await;

    mount_search(&mock_server, "狂神", search_page("狂神", "/chapter/1")).await;
    mount_page(
        &mock_server,
        "/chapter/1",
        chapter_page(
            "第一章",
            "\u{3000}\u{3000}天色已晚。\u{3000}\u{3000}他走了。<a href=\"/ad\">广告</a>",
            None,
        ),
    )
    .await;

    let config = create_test_config(&mock_server.uri());
    let outcome = run_crawl(&config, "狂神").await.expect("Crawl failed");

    let CrawlOutcome::Found(book) = outcome else {
        panic!("Expected a book");
    };
    assert_eq!(book.chapters[0].content, "  天色已晚。\n  他走了。\n");
}

#[tokio::test]
async fn test_navigation_failure_aborts_crawl() {
    let mock_server = MockServer::start().await;

    mount_search(&mock_server, "Broken", search_page("Broken", "/chapter/2")).await;
    mount_page(
        &mock_server,
        "/chapter/2",
        chapter_page("Chapter 2", "b", Some("/chapter/1")),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/chapter/1"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri());
    let result = run_crawl(&config, "Broken").await;

    assert!(matches!(
        result,
        Err(TrawlerError::Session(SessionError::Status { status: 500, .. }))
    ));
}

/// Opens one page through an HTTP session seeded with `ns=2` expiring at `expires`
///
/// The page only answers 200 when the request carries the cookie.
async fn open_with_seeded_cookie(expires: i64) -> Result<String, SessionError> {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/chapter/1"))
        .and(header("cookie", "ns=2"))
        .respond_with(html(chapter_page("Chapter 1", "Hello", None)))
        .mount(&mock_server)
        .await;

    let config = SessionConfig {
        timeout_secs: 5,
        cookies: vec![CookieConfig {
            domain: "127.0.0.1".to_string(),
            path: "/".to_string(),
            http_only: false,
            secure: false,
            expires,
            name: "ns".to_string(),
            value: "2".to_string(),
        }],
        ..SessionConfig::default()
    };

    let mut session = HttpSession::new(&config)?;
    let page = session
        .open(&format!("{}/chapter/1", mock_server.uri()))
        .await;
    session.close().await?;
    page.map(|page| page.markup)
}

#[tokio::test]
async fn test_live_cookie_is_sent() {
    let markup = open_with_seeded_cookie(4_102_444_800_000)
        .await
        .expect("Cookie was not sent");
    assert!(markup.contains("Chapter 1"));
}

#[tokio::test]
async fn test_expired_cookie_is_still_sent() {
    let markup = open_with_seeded_cookie(1_577_808_000_000)
        .await
        .expect("Expired cookie was not sent");
    assert!(markup.contains("Chapter 1"));
}
