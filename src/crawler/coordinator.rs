//! Crawl coordinator - ties a page session to the traversal engine
//!
//! This module owns the crawl lifecycle:
//! - Starting the page session selected by configuration
//! - Running the search and chapter phases
//! - Assembling the book
//! - Closing the session on every exit path

use crate::config::Config;
use crate::crawler::assembler::assemble;
use crate::crawler::engine::{StopReason, TraversalEngine};
use crate::crawler::extractor::SiteRules;
use crate::crawler::model::{Book, BookQuery};
use crate::session::{start_session, PageSession};
use crate::TrawlerError;
use std::time::Instant;

/// Terminal outcome of a crawl
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrawlOutcome {
    /// The book was found and walked
    Found(Book),
    /// The search page listed no book
    NotFound,
}

/// Crawls one book through `session`, then closes the session
///
/// The session is closed exactly once whether the crawl succeeds or fails. A
/// crawl error takes precedence over a close error.
///
/// # Arguments
///
/// * `session` - A freshly started page session
/// * `rules` - Compiled site parsing rules
/// * `query` - The book to search for
/// * `max_chapters` - Hop cap for the chapter walk
pub async fn crawl<S: PageSession + ?Sized>(
    session: &mut S,
    rules: &SiteRules,
    query: &BookQuery,
    max_chapters: u32,
) -> Result<CrawlOutcome, TrawlerError> {
    let outcome = crawl_book(session, rules, query, max_chapters).await;
    let closed = session.close().await;

    match (outcome, closed) {
        (Ok(outcome), Ok(())) => Ok(outcome),
        (Ok(_), Err(e)) => Err(e.into()),
        (Err(e), closed) => {
            if let Err(close_error) = closed {
                tracing::warn!("Failed to close page session: {}", close_error);
            }
            Err(e)
        }
    }
}

/// Search phase followed by the chapter walk
async fn crawl_book<S: PageSession + ?Sized>(
    session: &mut S,
    rules: &SiteRules,
    query: &BookQuery,
    max_chapters: u32,
) -> Result<CrawlOutcome, TrawlerError> {
    let mut engine = TraversalEngine::new(session, rules, max_chapters);

    let search = engine.search(query).await?;
    if !search.is_found() {
        tracing::warn!("No book found for '{}'", query);
        return Ok(CrawlOutcome::NotFound);
    }

    let walk = engine.walk(search.next_url.clone()).await?;
    tracing::info!(
        "Walk finished after {} pages with {} chapters ({})",
        walk.hops,
        walk.chapters.len(),
        describe_stop(walk.stop)
    );

    Ok(CrawlOutcome::Found(assemble(search, walk.chapters)))
}

fn describe_stop(stop: StopReason) -> &'static str {
    match stop {
        StopReason::EndOfChain => "no previous chapter link",
        StopReason::Cycle => "duplicate chapter link",
        StopReason::EndOfBook => "page without chapter title",
        StopReason::BudgetExhausted => "chapter limit reached",
    }
}

/// Runs a complete crawl for `query` using `config`
///
/// Compiles the site rules, starts the configured page session and crawls the
/// book. Navigation failures abort the crawl and are returned after the session
/// has been closed.
pub async fn run_crawl(config: &Config, query: &str) -> Result<CrawlOutcome, TrawlerError> {
    let query = BookQuery::new(query)?;
    let rules = SiteRules::from_config(&config.site)?;

    tracing::info!("Starting crawl for '{}'", query);
    let started = Instant::now();

    let mut session = start_session(&config.session).await?;
    let result = crawl(&mut *session, &rules, &query, config.crawler.max_chapters).await;

    match &result {
        Ok(_) => tracing::info!("Crawl finished in {:.1}s", started.elapsed().as_secs_f64()),
        Err(TrawlerError::Session(e)) if e.is_navigation() => {
            tracing::error!("Navigation failed, crawl aborted: {}", e)
        }
        Err(e) => tracing::error!("Crawl failed: {}", e),
    }

    result
}
