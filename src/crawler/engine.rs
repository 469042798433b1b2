//! Traversal engine - the page-by-page walk over a book
//!
//! The engine runs in two phases:
//! 1. **Search**: open the search page once and read the first result
//! 2. **Chapter walk**: follow "previous chapter" links from the latest chapter
//!    back towards the first, one page at a time
//!
//! The walk is an explicit loop over `(current URL, chapters, hop budget)`. It stops
//! when one of these guards fires:
//!
//! | Guard | Condition | Effect |
//! |-------|-----------|--------|
//! | End of chain | no next URL | return chapters |
//! | Cycle | resolved next URL already recorded | drop page, return chapters |
//! | End of book | page has no title | drop page, return chapters |
//! | Hop budget | budget spent | next URL ignored, walk ends after this page |
//!
//! The cycle guard only compares next-link values, so a longer loop through
//! distinct URLs is bounded by the hop budget alone.

use crate::crawler::extractor::{FieldExtractor, SiteRules};
use crate::crawler::model::{BookQuery, Chapter, SearchResult};
use crate::session::{PageSession, SessionResult};
use crate::url::{build_search_url, resolve_link};

/// Default number of chapter pages a walk may visit
pub const DEFAULT_MAX_CHAPTERS: u32 = 1000;

/// Why a chapter walk ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The last page had no previous-chapter link
    EndOfChain,
    /// A page pointed at a link that was already followed
    Cycle,
    /// A page had no chapter title
    EndOfBook,
    /// The hop budget ran out and the last discovered link was ignored
    BudgetExhausted,
}

/// Result of a chapter walk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterWalk {
    /// Chapters in traversal order (latest first)
    pub chapters: Vec<Chapter>,
    pub stop: StopReason,
    /// Pages opened during the walk
    pub hops: u32,
}

/// Remaining number of chapter pages a walk may visit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HopBudget {
    remaining: u32,
}

impl HopBudget {
    pub fn new(cap: u32) -> Self {
        Self { remaining: cap }
    }

    /// Spends one hop and reports whether links found on this page may be followed
    ///
    /// The hop that spends the last unit may not follow its link, so a cap of `n`
    /// admits at most `n` chapters.
    pub fn consume(&mut self) -> bool {
        self.remaining = self.remaining.saturating_sub(1);
        self.remaining > 0
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }
}

/// Returns true if following `candidate` would revisit a link already recorded
pub fn closes_cycle(chapters: &[Chapter], candidate: Option<&str>) -> bool {
    chapters
        .iter()
        .any(|chapter| chapter.next_url.as_deref() == candidate)
}

/// Returns true if the extracted page marks the end of the book
///
/// A page the chapter rules do not recognize also lands here.
pub fn is_end_of_book(chapter: &Chapter) -> bool {
    chapter.title.is_empty()
}

/// Drives a page session through the search and chapter phases
pub struct TraversalEngine<'a, S: PageSession + ?Sized> {
    session: &'a mut S,
    rules: &'a SiteRules,
    max_chapters: u32,
}

impl<'a, S: PageSession + ?Sized> TraversalEngine<'a, S> {
    pub fn new(session: &'a mut S, rules: &'a SiteRules, max_chapters: u32) -> Self {
        Self {
            session,
            rules,
            max_chapters,
        }
    }

    /// Opens the search page for `query` and reads the first result
    ///
    /// The returned `next_url` is already resolved against the search page origin.
    pub async fn search(&mut self, query: &BookQuery) -> SessionResult<SearchResult> {
        let url = build_search_url(&self.rules.search_url, query.as_str());
        let page = self.session.open(&url).await?;

        let result = self.rules.search.extract(&page.markup);
        if !result.is_found() {
            return Ok(result);
        }

        let next_url = resolve_link(&page.origin, result.next_url.as_deref());
        Ok(SearchResult {
            title: result.title,
            next_url,
        })
    }

    /// Walks the chapter chain starting at `start`
    ///
    /// Navigation failures abort the walk and are returned as-is; chapters
    /// gathered so far are discarded with it.
    pub async fn walk(&mut self, start: Option<String>) -> SessionResult<ChapterWalk> {
        let mut chapters: Vec<Chapter> = Vec::new();
        let mut budget = HopBudget::new(self.max_chapters);
        let mut current = start;
        let mut hops = 0;
        let mut link_suppressed = false;

        while let Some(url) = current {
            let page = self.session.open(&url).await?;
            let mut chapter = self.rules.chapter.extract(&page.markup);
            hops += 1;

            let link = if budget.consume() {
                chapter.next_url.take()
            } else {
                link_suppressed = chapter.next_url.is_some();
                None
            };
            let next = resolve_link(&page.origin, link.as_deref());

            if closes_cycle(&chapters, next.as_deref()) {
                tracing::warn!("Duplicate chapter link {:?} on {}, stopping", next, url);
                return Ok(ChapterWalk {
                    chapters,
                    stop: StopReason::Cycle,
                    hops,
                });
            }

            if is_end_of_book(&chapter) {
                tracing::info!("Reached end of book at {}", url);
                return Ok(ChapterWalk {
                    chapters,
                    stop: StopReason::EndOfBook,
                    hops,
                });
            }

            tracing::info!("Chapter: {}", chapter.title);
            tracing::debug!(
                "Next link: {:?} ({} hops left)",
                next,
                budget.remaining()
            );

            chapter.next_url = next.clone();
            chapters.push(chapter);
            current = next;
        }

        let stop = if link_suppressed {
            tracing::warn!("Chapter limit of {} reached", self.max_chapters);
            StopReason::BudgetExhausted
        } else {
            StopReason::EndOfChain
        };

        Ok(ChapterWalk {
            chapters,
            stop,
            hops,
        })
    }
}
