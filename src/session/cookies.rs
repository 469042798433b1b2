//! Pre-seeded cookie helpers shared by the session backends

use crate::config::CookieConfig;
use chrono::{DateTime, Utc};
use url::Url;

/// Expiry to hand to a session backend
///
/// A cookie that has already expired at `now` is still seeded, as a session
/// cookie with no expiry; a backend given the past date would drop it. The same
/// applies to a timestamp outside chrono's range.
pub fn seed_expiry(cookie: &CookieConfig, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    if is_expired(cookie, now) {
        tracing::warn!(
            "Cookie '{}' for {} expired before this crawl started, sending it without an expiry",
            cookie.name,
            cookie.domain
        );
        return None;
    }
    DateTime::<Utc>::from_timestamp_millis(cookie.expires)
}

/// Formats a cookie record as a `Set-Cookie` header value
///
/// Expiry is rendered as an RFC 1123 date, see [`seed_expiry`].
pub fn set_cookie_header(cookie: &CookieConfig, now: DateTime<Utc>) -> String {
    let mut header = format!(
        "{}={}; Domain={}; Path={}",
        cookie.name, cookie.value, cookie.domain, cookie.path
    );

    if let Some(expires) = seed_expiry(cookie, now) {
        header.push_str(&format!(
            "; Expires={}",
            expires.format("%a, %d %b %Y %H:%M:%S GMT")
        ));
    }

    if cookie.secure {
        header.push_str("; Secure");
    }

    if cookie.http_only {
        header.push_str("; HttpOnly");
    }

    header
}

/// URL a cookie is scoped to, used to seed a cookie jar
pub(crate) fn cookie_url(cookie: &CookieConfig) -> Result<Url, url::ParseError> {
    let scheme = if cookie.secure { "https" } else { "http" };
    let host = cookie.domain.trim_start_matches('.');
    Url::parse(&format!("{}://{}{}", scheme, host, cookie.path))
}

/// Returns true if the cookie's expiry is at or before `now`
pub fn is_expired(cookie: &CookieConfig, now: DateTime<Utc>) -> bool {
    cookie.expires <= now.timestamp_millis()
}
