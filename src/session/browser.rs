//! Headless Chromium page session
//!
//! Pages are rendered with scripts executing, then the serialized DOM and the
//! document origin are read back once navigation settles.

use crate::config::{CookieConfig, SessionConfig};
use crate::session::cookies::seed_expiry;
use crate::session::{PageSession, RawPage, SessionError, SessionResult};
use crate::url::extract_origin;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::emulation::SetScriptExecutionDisabledParams;
use chromiumoxide::cdp::browser_protocol::network::{CookieParam, TimeSinceEpoch};
use chromiumoxide::Page;
use futures::StreamExt;
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;
use url::Url;

/// Page session backed by a single headless Chromium tab
pub struct BrowserSession {
    browser: Browser,
    handler: JoinHandle<()>,
    page: Page,
}

impl BrowserSession {
    /// Launches the browser, opens a blank tab and applies session settings
    pub async fn launch(config: &SessionConfig) -> SessionResult<Self> {
        let browser_config = BrowserConfig::builder()
            .request_timeout(Duration::from_secs(config.timeout_secs))
            .arg(format!("--user-agent={}", config.user_agent))
            .build()
            .map_err(SessionError::Launch)?;

        let (mut browser, mut handler) = Browser::launch(browser_config)
            .await
            .map_err(|e| SessionError::Launch(e.to_string()))?;

        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    tracing::debug!("Browser handler error: {:?}", e);
                }
            }
        });

        let page = match prepare_page(&browser, config).await {
            Ok(page) => page,
            Err(e) => {
                let _ = browser.close().await;
                handler.abort();
                return Err(e);
            }
        };

        tracing::info!("Browser session ready");

        Ok(Self {
            browser,
            handler,
            page,
        })
    }
}

/// Opens the working tab, toggles script execution and seeds cookies
async fn prepare_page(browser: &Browser, config: &SessionConfig) -> SessionResult<Page> {
    let page = browser
        .new_page("about:blank")
        .await
        .map_err(|e| SessionError::Launch(e.to_string()))?;

    page.execute(SetScriptExecutionDisabledParams::new(
        !config.javascript_enabled,
    ))
    .await
    .map_err(|e| SessionError::Launch(e.to_string()))?;

    let now = Utc::now();
    let cookies = config
        .cookies
        .iter()
        .map(|cookie| cookie_param(cookie, now))
        .collect::<SessionResult<Vec<_>>>()?;

    if !cookies.is_empty() {
        page.set_cookies(cookies)
            .await
            .map_err(|e| SessionError::Launch(e.to_string()))?;
    }

    Ok(page)
}

/// Converts a configured cookie into a DevTools cookie parameter
fn cookie_param(cookie: &CookieConfig, now: DateTime<Utc>) -> SessionResult<CookieParam> {
    let mut builder = CookieParam::builder()
        .name(cookie.name.clone())
        .value(cookie.value.clone())
        .domain(cookie.domain.clone())
        .path(cookie.path.clone())
        .secure(cookie.secure)
        .http_only(cookie.http_only);

    if let Some(expires) = seed_expiry(cookie, now) {
        builder = builder.expires(TimeSinceEpoch::new(
            expires.timestamp_millis() as f64 / 1000.0,
        ));
    }

    builder.build().map_err(SessionError::Launch)
}

#[async_trait]
impl PageSession for BrowserSession {
    async fn open(&mut self, url: &str) -> SessionResult<RawPage> {
        let render_error = |e: chromiumoxide::error::CdpError| SessionError::Render {
            url: url.to_string(),
            message: e.to_string(),
        };

        let started = Instant::now();
        tracing::info!("Opening page: {}", url);

        self.page.goto(url).await.map_err(render_error)?;
        self.page.wait_for_navigation().await.map_err(render_error)?;

        let markup = self.page.content().await.map_err(render_error)?;
        let location = self
            .page
            .url()
            .await
            .map_err(render_error)?
            .unwrap_or_else(|| url.to_string());
        let location =
            Url::parse(&location).map_err(|_| SessionError::InvalidUrl(location.clone()))?;

        tracing::info!("Loaded in {}ms", started.elapsed().as_millis());

        Ok(RawPage {
            markup,
            origin: extract_origin(&location),
        })
    }

    async fn close(&mut self) -> SessionResult<()> {
        let closed = self
            .browser
            .close()
            .await
            .map(|_| ())
            .map_err(|e| SessionError::Close(e.to_string()));
        let _ = self.browser.wait().await;
        self.handler.abort();
        closed
    }
}
