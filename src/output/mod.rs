//! Output module for writing finished books
//!
//! This module handles:
//! - Rendering a book as a plain text document
//! - Writing the document under the configured output directory

mod text;

pub use text::{book_file_path, render_book, write_book};

use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write {path}: {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },

    #[error("Cannot derive a file name from '{0}'")]
    FileName(String),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;
