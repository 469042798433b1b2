use crate::crawler::model::{Book, BookChapter, Chapter, SearchResult};

/// Builds the final book from a search result and a walk
///
/// `chapters` arrive in traversal order (latest first) and are reversed into
/// reading order. The link bookkeeping on each chapter is dropped.
pub fn assemble(search: SearchResult, chapters: Vec<Chapter>) -> Book {
    Book {
        title: search.title,
        chapters: chapters
            .into_iter()
            .rev()
            .map(|chapter| BookChapter {
                title: chapter.title,
                content: chapter.content,
            })
            .collect(),
    }
}
