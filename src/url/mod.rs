//! URL handling module for Novel-Trawler
//!
//! This module provides link resolution against a page origin, origin extraction
//! and search URL templating.

mod origin;
mod resolve;

// Re-export main functions
pub use origin::extract_origin;
pub use resolve::resolve_link;

/// Placeholder replaced by the encoded book name in a search template
pub const QUERY_PLACEHOLDER: &str = "{query}";

/// Marks `encodeURIComponent` leaves alone but `urlencoding` escapes
const UNRESERVED_MARKS: [(&str, &str); 5] = [
    ("%21", "!"),
    ("%27", "'"),
    ("%28", "("),
    ("%29", ")"),
    ("%2A", "*"),
];

/// Builds the search URL for a book name
///
/// The name is percent-encoded the way `encodeURIComponent` does it, so spaces
/// become `%20`, CJK characters become their UTF-8 escapes and `!'()*` pass
/// through unchanged.
///
/// # Examples
///
/// ```
/// use novel_trawler::url::build_search_url;
///
/// assert_eq!(
///     build_search_url("http://se.qidian.com/?kw={query}", "狂神"),
///     "http://se.qidian.com/?kw=%E7%8B%82%E7%A5%9E"
/// );
/// ```
pub fn build_search_url(template: &str, query: &str) -> String {
    let encoded = UNRESERVED_MARKS
        .iter()
        .fold(urlencoding::encode(query).into_owned(), |encoded, (escape, mark)| {
            encoded.replace(escape, mark)
        });
    template.replace(QUERY_PLACEHOLDER, &encoded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_url_encodes_spaces() {
        assert_eq!(
            build_search_url("https://example.com/search?kw={query}", "Example Novel"),
            "https://example.com/search?kw=Example%20Novel"
        );
    }

    #[test]
    fn test_search_url_encodes_reserved_characters() {
        assert_eq!(
            build_search_url("https://example.com/s?q={query}", "a&b=c/d"),
            "https://example.com/s?q=a%26b%3Dc%2Fd"
        );
    }

    #[test]
    fn test_search_url_keeps_unreserved_marks() {
        assert_eq!(
            build_search_url("https://example.com/s?q={query}", "Re(1)!*'"),
            "https://example.com/s?q=Re(1)!*'"
        );
        // A literal percent sign still escapes, even when followed by a mark code
        assert_eq!(
            build_search_url("https://example.com/s?q={query}", "%21"),
            "https://example.com/s?q=%2521"
        );
    }

    #[test]
    fn test_search_url_cjk() {
        assert_eq!(
            build_search_url("http://se.qidian.com/?kw={query}", "狂神"),
            "http://se.qidian.com/?kw=%E7%8B%82%E7%A5%9E"
        );
    }
}
