use crate::config::types::{
    Config, CookieConfig, CrawlerConfig, OutputConfig, SessionConfig, SiteConfig,
};
use crate::url::{build_search_url, QUERY_PLACEHOLDER};
use crate::ConfigError;
use scraper::Selector;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_session_config(&config.session)?;
    validate_site_config(&config.site)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.max_chapters < 1 {
        return Err(ConfigError::Validation(format!(
            "max_chapters must be >= 1, got {}",
            config.max_chapters
        )));
    }

    Ok(())
}

/// Validates page session configuration
fn validate_session_config(config: &SessionConfig) -> Result<(), ConfigError> {
    if config.timeout_secs < 1 || config.timeout_secs > 600 {
        return Err(ConfigError::Validation(format!(
            "timeout_secs must be between 1 and 600, got {}",
            config.timeout_secs
        )));
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    for cookie in &config.cookies {
        validate_cookie(cookie)?;
    }

    Ok(())
}

/// Validates a pre-seeded cookie record
fn validate_cookie(cookie: &CookieConfig) -> Result<(), ConfigError> {
    if cookie.name.is_empty() {
        return Err(ConfigError::Validation(
            "cookie name cannot be empty".to_string(),
        ));
    }

    // Characters that would break the Set-Cookie line
    let forbidden = |c: char| c == ';' || c == '=' || c.is_whitespace();
    if cookie.name.chars().any(forbidden) {
        return Err(ConfigError::Validation(format!(
            "cookie name '{}' contains invalid characters",
            cookie.name
        )));
    }

    if cookie.value.contains(';') {
        return Err(ConfigError::Validation(format!(
            "cookie '{}' value cannot contain ';'",
            cookie.name
        )));
    }

    if !cookie.path.starts_with('/') {
        return Err(ConfigError::Validation(format!(
            "cookie '{}' path must start with '/', got '{}'",
            cookie.name, cookie.path
        )));
    }

    // A leading dot is the legacy "include subdomains" spelling
    let domain = cookie.domain.strip_prefix('.').unwrap_or(&cookie.domain);
    validate_domain_string(domain)
}

/// Validates a cookie domain (without the optional leading dot)
fn validate_domain_string(domain: &str) -> Result<(), ConfigError> {
    if domain.is_empty() {
        return Err(ConfigError::Validation(
            "cookie domain cannot be empty".to_string(),
        ));
    }

    if !domain
        .chars()
        .all(|c| c.is_alphanumeric() || c == '.' || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "cookie domain '{}' contains invalid characters",
            domain
        )));
    }

    if domain.starts_with('.')
        || domain.ends_with('.')
        || domain.starts_with('-')
        || domain.ends_with('-')
    {
        return Err(ConfigError::Validation(format!(
            "cookie domain '{}' cannot start or end with '.' or '-'",
            domain
        )));
    }

    if domain.contains("..") {
        return Err(ConfigError::Validation(format!(
            "cookie domain '{}' cannot contain consecutive dots",
            domain
        )));
    }

    Ok(())
}

/// Validates site parsing rules and the search template
fn validate_site_config(config: &SiteConfig) -> Result<(), ConfigError> {
    if !config.search_url.contains(QUERY_PLACEHOLDER) {
        return Err(ConfigError::Validation(format!(
            "search_url must contain a {{query}} placeholder, got '{}'",
            config.search_url
        )));
    }

    let probe = build_search_url(&config.search_url, "probe");
    let url = Url::parse(&probe)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid search_url '{}': {}", probe, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "search_url must use http or https, got '{}'",
            url.scheme()
        )));
    }

    validate_selector(&config.result_entry)?;
    validate_selector(&config.result_title)?;
    validate_selector(&config.result_link)?;
    validate_selector(&config.chapter_title)?;
    validate_selector(&config.chapter_body)?;

    if config.prev_links.is_empty() {
        return Err(ConfigError::Validation(
            "prev_links must list at least one selector".to_string(),
        ));
    }

    for selector in config.prev_links.iter().chain(&config.strip) {
        validate_selector(selector)?;
    }

    Ok(())
}

/// Checks that a CSS selector compiles
pub(crate) fn validate_selector(selector: &str) -> Result<(), ConfigError> {
    Selector::parse(selector)
        .map(|_| ())
        .map_err(|e| ConfigError::InvalidSelector(format!("'{}': {:?}", selector, e)))
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.directory.is_empty() {
        return Err(ConfigError::Validation(
            "output directory cannot be empty".to_string(),
        ));
    }

    Ok(())
}
