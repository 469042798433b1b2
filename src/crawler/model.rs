//! Data carried through a crawl, from the search term to the assembled book

use crate::TrawlerError;
use std::fmt;

/// A non-empty book name to search for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookQuery(String);

impl BookQuery {
    /// Wraps a search term, rejecting blank input
    pub fn new(term: &str) -> Result<Self, TrawlerError> {
        let term = term.trim();
        if term.is_empty() {
            return Err(TrawlerError::EmptyQuery);
        }
        Ok(Self(term.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BookQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// First entry of a search results page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchResult {
    /// Display title of the book; empty when the search found nothing
    pub title: String,

    /// Link to the most recent chapter
    pub next_url: Option<String>,
}

impl SearchResult {
    /// Returns true if the search page listed a book
    pub fn is_found(&self) -> bool {
        !self.title.is_empty()
    }
}

/// One chapter page as extracted
///
/// `next_url` points at the previous chapter in site order, since the walk runs
/// from the latest chapter back to the first. Once a chapter is accepted into a
/// walk it holds the resolved URL that was followed next.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Chapter {
    pub title: String,
    pub content: String,
    pub next_url: Option<String>,
}

/// A chapter as it appears in the finished book
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookChapter {
    pub title: String,
    pub content: String,
}

/// The assembled book, chapters in reading order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    pub title: String,
    pub chapters: Vec<BookChapter>,
}
