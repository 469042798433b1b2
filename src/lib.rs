//! Novel-Trawler: a chapter-chain novel crawler
//!
//! This crate locates a serialized novel by name on a content site, then walks the
//! chain of "previous chapter" links from the latest chapter back to the first,
//! extracting a title and cleaned body text from each page. The result is a
//! [`Book`](crawler::Book) in reading order.

pub mod config;
pub mod crawler;
pub mod output;
pub mod session;
pub mod url;

use thiserror::Error;

/// Main error type for Novel-Trawler operations
#[derive(Debug, Error)]
pub enum TrawlerError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Page session error: {0}")]
    Session(#[from] session::SessionError),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("Book name cannot be empty")]
    EmptyQuery,
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid selector in config: {0}")]
    InvalidSelector(String),
}

/// Result type alias for Novel-Trawler operations
pub type Result<T> = std::result::Result<T, TrawlerError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{crawl, Book, CrawlOutcome};
pub use session::{PageSession, RawPage};
pub use url::resolve_link;
