//! Plain text book rendering
//!
//! Layout: the book title, a blank line, then each chapter title followed by its
//! body, chapters joined by a newline.

use crate::crawler::Book;
use crate::output::{OutputError, OutputResult};
use std::fs;
use std::path::{Path, PathBuf};

/// Renders a book as a text document
///
/// # Example
///
/// ```
/// use novel_trawler::crawler::{Book, BookChapter};
/// use novel_trawler::output::render_book;
///
/// let book = Book {
///     title: "Example Novel".to_string(),
///     chapters: vec![BookChapter {
///         title: "Chapter 1".to_string(),
///         content: "Hello\n".to_string(),
///     }],
/// };
/// assert_eq!(render_book(&book), "Example Novel\n\nChapter 1\nHello\n");
/// ```
pub fn render_book(book: &Book) -> String {
    let chapters = book
        .chapters
        .iter()
        .map(|chapter| format!("{}\n{}", chapter.title, chapter.content))
        .collect::<Vec<_>>()
        .join("\n");

    format!("{}\n\n{}", book.title, chapters)
}

/// Path of the text file for a book searched as `query`
pub fn book_file_path(directory: &Path, query: &str) -> OutputResult<PathBuf> {
    let stem = sanitize_filename::sanitize(query.trim());
    if stem.is_empty() {
        return Err(OutputError::FileName(query.to_string()));
    }
    Ok(directory.join(format!("{}.txt", stem)))
}

/// Writes a book to `<directory>/<query>.txt`, creating the directory if needed
///
/// # Returns
///
/// * `Ok(PathBuf)` - Path of the written file
/// * `Err(OutputError)` - The directory or file could not be written
pub fn write_book(book: &Book, directory: &Path, query: &str) -> OutputResult<PathBuf> {
    let path = book_file_path(directory, query)?;

    fs::create_dir_all(directory).map_err(|source| OutputError::Write {
        path: directory.display().to_string(),
        source,
    })?;

    fs::write(&path, render_book(book)).map_err(|source| OutputError::Write {
        path: path.display().to_string(),
        source,
    })?;

    tracing::info!(
        "Wrote {} chapters to {}",
        book.chapters.len(),
        path.display()
    );

    Ok(path)
}
