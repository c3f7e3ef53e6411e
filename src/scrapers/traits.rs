use crate::error::{FetchError, SearchError};
use crate::models::SearchResult;
use crate::scrapers::types::FetchedPage;
use async_trait::async_trait;

/// Fetches a page and reports its status and body.
/// Non-success statuses are not errors here; callers decide what they mean.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn get(&self, url: &str) -> Result<FetchedPage, FetchError>;
}

/// Rewrites a deep link through a URL-shortening service
#[async_trait]
pub trait LinkShortener: Send + Sync {
    async fn shorten(&self, link: &str) -> Result<String, FetchError>;
}

/// Common trait for deal sources, so other price-comparison sites can be added
#[async_trait]
pub trait DealSource: Send + Sync {
    /// Search the source for a game title
    async fn search(&self, title: &str) -> Result<SearchResult, SearchError>;

    /// Get the name of the deal source
    fn source_name(&self) -> &'static str;
}
