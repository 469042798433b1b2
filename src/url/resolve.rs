/// Resolves a link found on a page into an absolute URL
///
/// Root-relative links (starting with `/`) are joined onto `origin`, the origin of
/// the page that contained the link. Anything else is taken to be absolute
/// already and returned unchanged.
///
/// # Arguments
///
/// * `origin` - Scheme, host and port of the containing page (no trailing slash)
/// * `link` - The raw `href` value, if the page had one
///
/// # Examples
///
/// ```
/// use novel_trawler::url::resolve_link;
///
/// assert_eq!(
///     resolve_link("http://a.com", Some("/x")),
///     Some("http://a.com/x".to_string())
/// );
/// assert_eq!(
///     resolve_link("http://a.com", Some("http://b.com/y")),
///     Some("http://b.com/y".to_string())
/// );
/// assert_eq!(resolve_link("http://a.com", None), None);
/// ```
pub fn resolve_link(origin: &str, link: Option<&str>) -> Option<String> {
    let link = link?;

    if link.starts_with('/') {
        Some(format!("{}{}", origin, link))
    } else {
        Some(link.to_string())
    }
}
