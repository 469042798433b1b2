//! Field extraction from rendered markup
//!
//! Two extractors share the [`FieldExtractor`] interface:
//! - [`SearchExtractor`] reads the book title and latest-chapter link from a
//!   search results page
//! - [`ChapterExtractor`] reads a chapter title, cleaned body text and the
//!   "previous chapter" link from a chapter page
//!
//! Neither extractor fails. Markup that matches nothing yields empty fields, which
//! the traversal engine reads as the end of the chain.

use crate::config::SiteConfig;
use crate::crawler::model::{Chapter, SearchResult};
use crate::ConfigError;
use scraper::{ElementRef, Html, Selector};

/// Indent placed at the start of a body and after every paragraph break
const INDENT: &str = "  ";

/// Two full-width spaces, the site's paragraph separator
const PARAGRAPH_BREAK: &str = "\u{3000}\u{3000}";

/// Parsing rules applied to one kind of page
pub trait FieldExtractor {
    type Output;

    /// Extracts structured fields from page markup
    fn extract(&self, markup: &str) -> Self::Output;
}

/// Compiles a CSS selector from configuration
fn compile(selector: &str) -> Result<Selector, ConfigError> {
    Selector::parse(selector)
        .map_err(|e| ConfigError::InvalidSelector(format!("'{}': {:?}", selector, e)))
}

/// Text of the first element under `scope` matching `selector`, trimmed
fn first_text(scope: ElementRef, selector: &Selector) -> String {
    scope
        .select(selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .unwrap_or_default()
}

/// One way of finding a link on a page
#[derive(Debug, Clone)]
pub struct LinkStrategy {
    selector: Selector,
}

impl LinkStrategy {
    pub fn new(selector: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            selector: compile(selector)?,
        })
    }

    /// Returns the first non-empty `href` among matching elements under `scope`
    pub fn find(&self, scope: ElementRef) -> Option<String> {
        scope
            .select(&self.selector)
            .filter_map(|element| element.value().attr("href"))
            .map(str::trim)
            .find(|href| !href.is_empty())
            .map(str::to_string)
    }
}

/// Tries each strategy in priority order and returns the first link found
pub fn first_link(strategies: &[LinkStrategy], scope: ElementRef) -> Option<String> {
    strategies.iter().find_map(|strategy| strategy.find(scope))
}

/// Extractor for the search results page
///
/// Title and link are both read from inside the first result entry.
#[derive(Debug, Clone)]
pub struct SearchExtractor {
    entry: Selector,
    title: Selector,
    link: LinkStrategy,
}

impl SearchExtractor {
    pub fn new(entry: &str, title: &str, link: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            entry: compile(entry)?,
            title: compile(title)?,
            link: LinkStrategy::new(link)?,
        })
    }
}

impl FieldExtractor for SearchExtractor {
    type Output = SearchResult;

    fn extract(&self, markup: &str) -> SearchResult {
        let document = Html::parse_document(markup);
        let Some(entry) = document.select(&self.entry).next() else {
            return SearchResult::default();
        };

        let title = first_text(entry, &self.title);
        if title.is_empty() {
            return SearchResult::default();
        }

        let next_url = self.link.find(entry);
        tracing::info!("Book title: {}", title);

        SearchResult { title, next_url }
    }
}

/// Extractor for a single chapter page
#[derive(Debug, Clone)]
pub struct ChapterExtractor {
    title: Selector,
    body: Selector,
    strip: Vec<Selector>,
    prev_links: Vec<LinkStrategy>,
}

impl ChapterExtractor {
    pub fn new(
        title: &str,
        body: &str,
        strip: &[String],
        prev_links: &[String],
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            title: compile(title)?,
            body: compile(body)?,
            strip: strip
                .iter()
                .map(|s| compile(s))
                .collect::<Result<Vec<_>, _>>()?,
            prev_links: prev_links
                .iter()
                .map(|s| LinkStrategy::new(s))
                .collect::<Result<Vec<_>, _>>()?,
        })
    }

    /// Raw text of every body container, minus scripts, anchors and stripped elements
    fn body_text(&self, document: &Html) -> String {
        let mut text = String::new();
        for container in document.select(&self.body) {
            collect_text(container, &self.strip, &mut text);
        }
        text
    }
}

impl FieldExtractor for ChapterExtractor {
    type Output = Chapter;

    fn extract(&self, markup: &str) -> Chapter {
        let document = Html::parse_document(markup);
        let root = document.root_element();

        let title = first_text(root, &self.title);
        let content = normalize_body(&self.body_text(&document));
        let next_url = first_link(&self.prev_links, root);

        Chapter {
            title,
            content,
            next_url,
        }
    }
}

/// Returns true if an element and everything under it is left out of the body
fn is_stripped(element: &ElementRef, strip: &[Selector]) -> bool {
    matches!(element.value().name(), "script" | "a")
        || strip.iter().any(|selector| selector.matches(element))
}

/// Appends the text under `element`, skipping stripped subtrees
fn collect_text(element: ElementRef, strip: &[Selector], out: &mut String) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            out.push_str(text);
        } else if let Some(child) = ElementRef::wrap(child) {
            if !is_stripped(&child, strip) {
                collect_text(child, strip, out);
            }
        }
    }
}

/// Normalizes chapter body text
///
/// 1. Leading whitespace, if any, becomes a two-space indent
/// 2. Trailing whitespace is dropped and a single newline ends the text
/// 3. Each pair of full-width spaces becomes a newline plus indent
///
/// Blank input stays empty. Applying the function twice changes nothing.
pub fn normalize_body(text: &str) -> String {
    let body = text.trim_start();
    if body.is_empty() {
        return String::new();
    }

    let mut normalized = String::with_capacity(text.len() + 2);
    if body.len() != text.len() {
        normalized.push_str(INDENT);
    }
    normalized.push_str(body.trim_end());
    normalized.push('\n');

    normalized.replace(PARAGRAPH_BREAK, &format!("\n{}", INDENT))
}

/// Compiled parsing rules for one site
#[derive(Debug, Clone)]
pub struct SiteRules {
    pub search_url: String,
    pub search: SearchExtractor,
    pub chapter: ChapterExtractor,
}

impl SiteRules {
    /// Compiles every selector in the site configuration
    pub fn from_config(config: &SiteConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            search_url: config.search_url.clone(),
            search: SearchExtractor::new(
                &config.result_entry,
                &config.result_title,
                &config.result_link,
            )?,
            chapter: ChapterExtractor::new(
                &config.chapter_title,
                &config.chapter_body,
                &config.strip,
                &config.prev_links,
            )?,
        })
    }
}
