//! HTTP page session
//!
//! This module backs a [`PageSession`] with a plain `reqwest` client:
//! - Building the client with the configured user agent and timeout
//! - Seeding the cookie jar before the first navigation
//! - Following redirects and reporting the final document origin
//! - Classifying failures as navigation errors

use crate::config::SessionConfig;
use crate::session::cookies::{cookie_url, set_cookie_header};
use crate::session::{PageSession, RawPage, SessionError, SessionResult};
use crate::url::extract_origin;
use async_trait::async_trait;
use reqwest::cookie::Jar;
use reqwest::Client;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Builds an HTTP client with the session's cookies already in its jar
///
/// # Arguments
///
/// * `config` - The page session configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(SessionError)` - A cookie could not be scoped or the client failed to build
pub fn build_http_client(config: &SessionConfig) -> SessionResult<Client> {
    let jar = Jar::default();
    let now = chrono::Utc::now();

    for cookie in &config.cookies {
        let url = cookie_url(cookie).map_err(|e| {
            SessionError::Launch(format!("Invalid cookie domain '{}': {}", cookie.domain, e))
        })?;
        jar.add_cookie_str(&set_cookie_header(cookie, now), &url);
        tracing::debug!("Seeded cookie '{}' for {}", cookie.name, url);
    }

    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .cookie_provider(Arc::new(jar))
        .gzip(true)
        .brotli(true)
        .build()
        .map_err(|e| SessionError::Launch(e.to_string()))
}

/// Page session that fetches markup over HTTP without running scripts
pub struct HttpSession {
    client: Option<Client>,
}

impl HttpSession {
    /// Creates a session, applying cookies and client settings once
    pub fn new(config: &SessionConfig) -> SessionResult<Self> {
        if config.javascript_enabled {
            tracing::debug!("HTTP renderer does not execute page scripts");
        }

        Ok(Self {
            client: Some(build_http_client(config)?),
        })
    }
}

#[async_trait]
impl PageSession for HttpSession {
    async fn open(&mut self, url: &str) -> SessionResult<RawPage> {
        let client = self
            .client
            .as_ref()
            .ok_or_else(|| SessionError::Launch("session already closed".to_string()))?;

        let started = Instant::now();
        tracing::info!("Opening page: {}", url);

        let response = client
            .get(url)
            .send()
            .await
            .map_err(|source| classify_send_error(url, source))?;

        let status = response.status();
        if status.is_client_error() || status.is_server_error() {
            return Err(SessionError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let origin = extract_origin(response.url());
        let markup = response
            .text()
            .await
            .map_err(|source| SessionError::Navigation {
                url: url.to_string(),
                source,
            })?;

        tracing::info!("Loaded in {}ms", started.elapsed().as_millis());

        Ok(RawPage { markup, origin })
    }

    async fn close(&mut self) -> SessionResult<()> {
        // Dropping the client releases its connection pool
        match self.client.take() {
            Some(_) => Ok(()),
            None => Err(SessionError::Close("session already closed".to_string())),
        }
    }
}

/// Maps a request failure onto a session error
fn classify_send_error(url: &str, source: reqwest::Error) -> SessionError {
    if source.is_builder() {
        SessionError::InvalidUrl(url.to_string())
    } else {
        SessionError::Navigation {
            url: url.to_string(),
            source,
        }
    }
}
