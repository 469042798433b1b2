//! Crawler module for locating and walking a book
//!
//! This module contains the core crawling logic, including:
//! - Field extraction from search and chapter pages
//! - The traversal engine and its stopping guards
//! - Book assembly in reading order
//! - Overall crawl coordination and session lifecycle

mod assembler;
mod coordinator;
mod engine;
mod extractor;
mod model;

pub use assembler::assemble;
pub use coordinator::{crawl, run_crawl, CrawlOutcome};
pub use engine::{
    closes_cycle, is_end_of_book, ChapterWalk, HopBudget, StopReason, TraversalEngine,
    DEFAULT_MAX_CHAPTERS,
};
pub use extractor::{
    first_link, normalize_body, ChapterExtractor, FieldExtractor, LinkStrategy, SearchExtractor,
    SiteRules,
};
pub use model::{Book, BookChapter, BookQuery, Chapter, SearchResult};
