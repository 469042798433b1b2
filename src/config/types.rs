use crate::crawler::DEFAULT_MAX_CHAPTERS;
use serde::Deserialize;

/// Main configuration structure for Novel-Trawler
///
/// Every section is optional; missing sections fall back to the built-in site.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub crawler: CrawlerConfig,
    pub session: SessionConfig,
    pub site: SiteConfig,
    pub output: OutputConfig,
}

/// Chapter walk configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Maximum number of chapter pages visited in one walk
    #[serde(rename = "max-chapters")]
    pub max_chapters: u32,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_chapters: DEFAULT_MAX_CHAPTERS,
        }
    }
}

/// Which page renderer backs the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Renderer {
    /// Plain HTTP fetch, no script execution
    #[default]
    Http,
    /// Headless Chromium (requires the `browser` feature)
    Browser,
}

/// Page session configuration, applied once before the first navigation
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub renderer: Renderer,

    #[serde(rename = "javascript-enabled")]
    pub javascript_enabled: bool,

    /// Per-navigation timeout in seconds
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,

    #[serde(rename = "user-agent")]
    pub user_agent: String,

    /// Cookies seeded into the session before the first navigation
    pub cookies: Vec<CookieConfig>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            renderer: Renderer::Http,
            javascript_enabled: true,
            timeout_secs: 30,
            user_agent: concat!("NovelTrawler/", env!("CARGO_PKG_VERSION")).to_string(),
            cookies: vec![CookieConfig {
                domain: "qidian.com".to_string(),
                path: "/".to_string(),
                http_only: false,
                secure: false,
                expires: 4_102_444_800_000,
                name: "ns".to_string(),
                value: "2".to_string(),
            }],
        }
    }
}

/// A single pre-seeded cookie
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CookieConfig {
    pub domain: String,

    #[serde(default = "default_cookie_path")]
    pub path: String,

    #[serde(rename = "http-only", default)]
    pub http_only: bool,

    #[serde(default)]
    pub secure: bool,

    /// Expiry as milliseconds since the Unix epoch
    pub expires: i64,

    pub name: String,

    pub value: String,
}

fn default_cookie_path() -> String {
    "/".to_string()
}

/// Site-specific parsing rules
///
/// All selectors are CSS selectors. `prev-links` is tried in order and the
/// first element carrying an `href` wins.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Search endpoint; `{query}` is replaced with the URL-encoded book name
    #[serde(rename = "search-url")]
    pub search_url: String,

    /// One entry of the search result listing; only the first is read
    #[serde(rename = "result-entry")]
    pub result_entry: String,

    /// Book title, relative to the result entry
    #[serde(rename = "result-title")]
    pub result_title: String,

    /// Latest-chapter link, relative to the result entry
    #[serde(rename = "result-link")]
    pub result_link: String,

    #[serde(rename = "chapter-title")]
    pub chapter_title: String,

    #[serde(rename = "chapter-body")]
    pub chapter_body: String,

    #[serde(rename = "prev-links")]
    pub prev_links: Vec<String>,

    /// Elements removed from the body after scripts and anchors
    pub strip: Vec<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            search_url: "http://se.qidian.com/?kw={query}".to_string(),
            result_entry: "#result-list ul li".to_string(),
            result_title: "h4".to_string(),
            result_link: ".update a".to_string(),
            chapter_title: "h1".to_string(),
            chapter_body: "#content, .bookreadercontent".to_string(),
            prev_links: vec![
                "#pagePrevBottomBtn".to_string(),
                ".prev".to_string(),
                ".prew".to_string(),
            ],
            strip: vec![".nice_books".to_string()],
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory the book text file is written to
    pub directory: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: "output".to_string(),
        }
    }
}
