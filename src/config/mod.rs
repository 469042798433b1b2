//! Configuration module for Novel-Trawler
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! A missing file is not an error at this level: callers fall back to
//! [`Config::default`], which targets the built-in site.
//!
//! # Example
//!
//! ```no_run
//! use novel_trawler::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("trawler.toml")).unwrap();
//! println!("Walk will stop after {} chapters", config.crawler.max_chapters);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, CookieConfig, CrawlerConfig, OutputConfig, Renderer, SessionConfig, SiteConfig,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::validate;
