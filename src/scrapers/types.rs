use crate::error::FetchError;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::env;

/// Endpoints and client settings for a deal search
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Search page; the title is sent as the `title` query parameter
    pub search_url: String,
    /// Site root that relative detail and deep-link paths are joined onto
    pub site_url: String,
    /// Shortening endpoint; the target is sent as the `url` query parameter
    pub shortener_url: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            search_url: "https://gg.deals/games/".to_string(),
            site_url: "https://gg.deals".to_string(),
            shortener_url: "http://tinyurl.com/api-create.php".to_string(),
            timeout_secs: 30,
            user_agent: "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36".to_string(),
        }
    }
}

impl SearchConfig {
    /// Defaults overridden by any `DEAL_SCOUT_*` variables that are set
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(url) = env::var("DEAL_SCOUT_SEARCH_URL") {
            config.search_url = url;
        }
        if let Ok(url) = env::var("DEAL_SCOUT_SITE_URL") {
            config.site_url = url;
        }
        if let Ok(url) = env::var("DEAL_SCOUT_SHORTENER_URL") {
            config.shortener_url = url;
        }
        if let Some(secs) = env::var("DEAL_SCOUT_TIMEOUT_SECS")
            .ok()
            .and_then(|raw| raw.parse().ok())
        {
            config.timeout_secs = secs;
        }

        config
    }

    /// Search page URL for a title, escaped as a query parameter
    pub fn search_page_url(&self, title: &str) -> Result<Url, FetchError> {
        with_query(&self.search_url, "title", title)
    }

    /// Join a path scraped from the site onto the site root
    pub fn absolute_url(&self, href: &str) -> String {
        if href.starts_with("http://") || href.starts_with("https://") {
            return href.to_string();
        }

        // Protocol-relative links only borrow the site's scheme
        if href.starts_with("//") {
            let scheme = self
                .site_url
                .split_once("://")
                .map_or("https", |(scheme, _)| scheme);
            return format!("{}:{}", scheme, href);
        }

        let root = self.site_url.trim_end_matches('/');
        if href.starts_with('/') {
            format!("{}{}", root, href)
        } else {
            format!("{}/{}", root, href)
        }
    }

    /// Key-shop tab of a detail page
    pub fn key_shops_url(detail_url: &str) -> String {
        let separator = if detail_url.contains('?') { '&' } else { '?' };
        format!("{}{}tab=keyshops", detail_url, separator)
    }
}

/// Build `base?key=value` with `value` form-encoded
pub(crate) fn with_query(base: &str, key: &str, value: &str) -> Result<Url, FetchError> {
    Url::parse_with_params(base, &[(key, value)]).map_err(|e| FetchError::InvalidUrl {
        url: base.to_string(),
        reason: e.to_string(),
    })
}

/// Raw response from a page fetch
#[derive(Debug, Clone, PartialEq)]
pub struct FetchedPage {
    pub status: u16,
    pub body: String,
}

impl FetchedPage {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_page_url_escapes_title() {
        let config = SearchConfig::default();
        let url = config.search_page_url("Baldur's Gate 3").unwrap();

        assert_eq!(url.path(), "/games/");
        let (key, value) = url.query_pairs().next().unwrap();
        assert_eq!(key, "title");
        assert_eq!(value, "Baldur's Gate 3");
        assert!(!url.as_str().contains(' '));
    }

    #[test]
    fn test_absolute_url_joins_paths() {
        let config = SearchConfig {
            site_url: "https://gg.deals/".to_string(),
            ..SearchConfig::default()
        };

        assert_eq!(config.absolute_url("/game/hades/"), "https://gg.deals/game/hades/");
        assert_eq!(config.absolute_url("game/hades/"), "https://gg.deals/game/hades/");
        assert_eq!(config.absolute_url("https://example.com/x"), "https://example.com/x");
    }

    #[test]
    fn test_absolute_url_protocol_relative() {
        let config = SearchConfig::default();

        assert_eq!(
            config.absolute_url("//cdn.gg.deals/go/1/"),
            "https://cdn.gg.deals/go/1/"
        );

        let plain = SearchConfig {
            site_url: "http://127.0.0.1:8080".to_string(),
            ..SearchConfig::default()
        };
        assert_eq!(plain.absolute_url("//cdn.test/go/1/"), "http://cdn.test/go/1/");
    }

    #[test]
    fn test_from_env_overrides() {
        env::set_var("DEAL_SCOUT_SITE_URL", "http://localhost:9000");
        env::set_var("DEAL_SCOUT_SHORTENER_URL", "http://localhost:9000/shorten");
        env::set_var("DEAL_SCOUT_TIMEOUT_SECS", "7");

        let config = SearchConfig::from_env();
        assert_eq!(config.site_url, "http://localhost:9000");
        assert_eq!(config.shortener_url, "http://localhost:9000/shorten");
        assert_eq!(config.timeout_secs, 7);
        assert_eq!(config.search_url, SearchConfig::default().search_url);

        // Unparseable timeout keeps the default
        env::set_var("DEAL_SCOUT_TIMEOUT_SECS", "soon");
        assert_eq!(SearchConfig::from_env().timeout_secs, 30);

        env::remove_var("DEAL_SCOUT_SITE_URL");
        env::remove_var("DEAL_SCOUT_SHORTENER_URL");
        env::remove_var("DEAL_SCOUT_TIMEOUT_SECS");
    }

    #[test]
    fn test_key_shops_url() {
        assert_eq!(
            SearchConfig::key_shops_url("https://gg.deals/game/hades/"),
            "https://gg.deals/game/hades/?tab=keyshops"
        );
        assert_eq!(
            SearchConfig::key_shops_url("https://gg.deals/game/hades/?region=us"),
            "https://gg.deals/game/hades/?region=us&tab=keyshops"
        );
    }
}
