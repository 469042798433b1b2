//! Page session module
//!
//! A page session is the rendering collaborator the crawler drives: it opens a URL,
//! waits for the page to settle and hands back the document markup together with
//! the origin the document was finally served from.
//!
//! - [`HttpSession`] fetches pages over plain HTTP with `reqwest`
//! - `BrowserSession` renders pages in headless Chromium (feature `browser`)

#[cfg(feature = "browser")]
mod browser;
mod cookies;
mod http;

#[cfg(feature = "browser")]
pub use browser::BrowserSession;
pub use cookies::{is_expired, seed_expiry, set_cookie_header};
pub use http::{build_http_client, HttpSession};

use crate::config::{Renderer, SessionConfig};
use async_trait::async_trait;
use thiserror::Error;

/// Errors raised by a page session
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Navigation to {url} failed: {source}")]
    Navigation { url: String, source: reqwest::Error },

    #[error("Navigation to {url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("Invalid page URL '{0}'")]
    InvalidUrl(String),

    #[error("Failed to start page session: {0}")]
    Launch(String),

    #[error("Browser error for {url}: {message}")]
    Render { url: String, message: String },

    #[error("Failed to close page session: {0}")]
    Close(String),
}

impl SessionError {
    /// Returns true if this error came from opening a page
    pub fn is_navigation(&self) -> bool {
        matches!(
            self,
            Self::Navigation { .. } | Self::Status { .. } | Self::Render { .. } | Self::InvalidUrl(_)
        )
    }
}

/// Result type for page session operations
pub type SessionResult<T> = Result<T, SessionError>;

/// A rendered page, valid for a single extraction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPage {
    /// Outer markup of the rendered document
    pub markup: String,

    /// Origin of the document after redirects, e.g. `https://read.example.com`
    pub origin: String,
}

/// Capability interface the traversal engine consumes
///
/// Sessions are owned by exactly one crawl. `close` must be called exactly once,
/// after the last `open`, whether or not the crawl succeeded.
#[async_trait]
pub trait PageSession: Send {
    /// Navigates to `url` and returns the settled document
    async fn open(&mut self, url: &str) -> SessionResult<RawPage>;

    /// Releases every resource held by the session
    async fn close(&mut self) -> SessionResult<()>;
}

/// Starts the session selected by `config.renderer`
pub async fn start_session(config: &SessionConfig) -> SessionResult<Box<dyn PageSession>> {
    match config.renderer {
        Renderer::Http => Ok(Box::new(HttpSession::new(config)?)),
        #[cfg(feature = "browser")]
        Renderer::Browser => Ok(Box::new(BrowserSession::launch(config).await?)),
        #[cfg(not(feature = "browser"))]
        Renderer::Browser => Err(SessionError::Launch(
            "browser renderer requested but novel-trawler was built without the `browser` feature"
                .to_string(),
        )),
    }
}
