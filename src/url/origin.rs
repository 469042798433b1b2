use url::Url;

/// Extracts the origin (scheme, host and port) of a URL
///
/// Default ports are omitted, matching what a browser reports as
/// `document.location.origin`.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use novel_trawler::url::extract_origin;
///
/// let url = Url::parse("https://book.example.com/chapter/12").unwrap();
/// assert_eq!(extract_origin(&url), "https://book.example.com");
///
/// let url = Url::parse("http://127.0.0.1:8080/c/1").unwrap();
/// assert_eq!(extract_origin(&url), "http://127.0.0.1:8080");
/// ```
pub fn extract_origin(url: &Url) -> String {
    url.origin().ascii_serialization()
}
