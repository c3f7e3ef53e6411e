use crate::error::FetchError;
use crate::scrapers::traits::{LinkShortener, PageFetcher};
use crate::scrapers::types::{with_query, FetchedPage, SearchConfig};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// `PageFetcher` backed by a shared reqwest client
#[derive(Clone)]
pub struct ReqwestFetcher {
    client: Client,
}

impl ReqwestFetcher {
    pub fn new(config: &SearchConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for ReqwestFetcher {
    async fn get(&self, url: &str) -> Result<FetchedPage, FetchError> {
        debug!("Fetching URL: {}", url);

        let request_error = |e: reqwest::Error| FetchError::Request {
            url: url.to_string(),
            reason: e.to_string(),
        };

        let response = self.client.get(url).send().await.map_err(request_error)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(request_error)?;

        debug!("Downloaded {} bytes with status {}", body.len(), status);

        Ok(FetchedPage { status, body })
    }
}

/// Shortens links through TinyURL's plain-text API
pub struct TinyUrlShortener<F> {
    fetcher: F,
    endpoint: String,
}

impl<F: PageFetcher> TinyUrlShortener<F> {
    pub fn new(fetcher: F, endpoint: impl Into<String>) -> Self {
        Self {
            fetcher,
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl<F: PageFetcher> LinkShortener for TinyUrlShortener<F> {
    async fn shorten(&self, link: &str) -> Result<String, FetchError> {
        let url = with_query(&self.endpoint, "url", link)?;
        let page = self.fetcher.get(url.as_str()).await?;

        if !page.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: page.status,
            });
        }

        // Body is the shortened URL itself, no envelope
        let short = page.body.trim();
        if short.is_empty() {
            return Err(FetchError::EmptyBody { url: url.to_string() });
        }

        Ok(short.to_string())
    }
}
