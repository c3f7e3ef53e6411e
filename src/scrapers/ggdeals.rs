use crate::error::{FetchError, KeyShopError, SearchError, Stage};
use crate::models::{Offer, OfferTable, SearchResult};
use crate::scrapers::http::{ReqwestFetcher, TinyUrlShortener};
use crate::scrapers::markup::{self, Listing, OfferRows};
use crate::scrapers::traits::{DealSource, LinkShortener, PageFetcher};
use crate::scrapers::types::SearchConfig;
use anyhow::Result;
use async_trait::async_trait;
use tracing::{debug, info, warn};

/// gg.deals searcher.
///
/// Runs the whole pipeline for one title: search page, detail page offer
/// rows, detail page top offer, then the key-shop tab. Requests are issued one
/// after another and every deep link is shortened before the next one.
pub struct DealSearcher<F = ReqwestFetcher, S = TinyUrlShortener<ReqwestFetcher>> {
    config: SearchConfig,
    fetcher: F,
    shortener: S,
}

impl DealSearcher {
    /// Create a searcher against the live gg.deals and TinyURL endpoints
    pub fn new() -> Result<Self> {
        Self::with_config(SearchConfig::default())
    }

    /// Create a searcher with custom endpoints
    pub fn with_config(config: SearchConfig) -> Result<Self> {
        let fetcher = ReqwestFetcher::new(&config)?;
        let shortener = TinyUrlShortener::new(fetcher.clone(), config.shortener_url.clone());

        Ok(Self::with_parts(config, fetcher, shortener))
    }
}

impl<F: PageFetcher, S: LinkShortener> DealSearcher<F, S> {
    pub fn with_parts(config: SearchConfig, fetcher: F, shortener: S) -> Self {
        Self {
            config,
            fetcher,
            shortener,
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    pub fn shortener(&self) -> &S {
        &self.shortener
    }

    /// Search for a title and scrape its offers.
    ///
    /// Fails without a partial result if the search page is unavailable or any
    /// stage of the official-shop listing cannot be scraped. The key-shop
    /// listing is best effort; its outcome is recorded on the result.
    pub async fn search(&self, title: &str) -> Result<SearchResult, SearchError> {
        info!("Searching gg.deals for {:?}", title);

        let search_url = self.config.search_page_url(title)?;
        let page = self.fetcher.get(search_url.as_str()).await?;
        if !page.is_success() {
            warn!("Search page returned status: {}", page.status);
            return Err(SearchError::UpstreamUnavailable {
                status: page.status,
            });
        }

        let hit = markup::parse_search_hit(&page.body)
            .map_err(|reason| SearchError::parse(Stage::SearchPage, reason))?;
        let detail_url = self.config.absolute_url(&hit.href);
        info!("Best match: {} ({})", hit.name, detail_url);

        let offers = self.scrape_offers(&detail_url).await?;
        let cheapest = self.scrape_cheapest(&detail_url).await?;
        let key_shops = self.scrape_key_shops(&detail_url).await;

        if let Err(err) = &key_shops {
            warn!("Key shop listing skipped: {}", err);
        }

        info!(
            "✅ Found {} offers for {}, cheapest {} at {}",
            offers.len(),
            hit.name,
            cheapest.price,
            cheapest.shop
        );

        Ok(SearchResult::found(hit.name, offers, cheapest, key_shops))
    }

    async fn scrape_offers(&self, detail_url: &str) -> Result<OfferTable, SearchError> {
        let page = self.fetcher.get(detail_url).await?;
        if !page.is_success() {
            warn!("Detail page returned status: {}", page.status);
        }

        let rows = markup::parse_offer_rows(&page.body, Listing::Official)
            .map_err(|reason| SearchError::parse(Stage::DetailOffers, reason))?;
        debug!("Parsed {} offer rows", rows.shops.len());

        let links = self
            .shorten_all(&rows.hrefs)
            .await
            .map_err(|(link, source)| SearchError::Shortening { link, source })?;

        OfferTable::new(rows.shops, rows.prices, links)
            .map_err(|reason| SearchError::parse(Stage::DetailOffers, reason))
    }

    /// Fetches the detail page again and takes its top offer
    async fn scrape_cheapest(&self, detail_url: &str) -> Result<Offer, SearchError> {
        let page = self.fetcher.get(detail_url).await?;

        let top = markup::parse_top_offer(&page.body, Listing::Official)
            .map_err(|reason| SearchError::parse(Stage::CheapestOffer, reason))?;

        let deep_link = self.config.absolute_url(&top.href);
        let link = self
            .shortener
            .shorten(&deep_link)
            .await
            .map_err(|source| SearchError::Shortening {
                link: deep_link,
                source,
            })?;

        Ok(Offer::new(top.shop, top.price, link))
    }

    async fn scrape_key_shops(&self, detail_url: &str) -> Result<OfferTable, KeyShopError> {
        let url = SearchConfig::key_shops_url(detail_url);
        let page = self.fetcher.get(&url).await?;
        if !page.is_success() {
            return Err(KeyShopError::Unavailable {
                status: page.status,
            });
        }

        let OfferRows { shops, prices, hrefs } =
            markup::parse_offer_rows(&page.body, Listing::KeyShops)
                .map_err(|reason| KeyShopError::ParseFailure { reason })?;

        let links = self
            .shorten_all(&hrefs)
            .await
            .map_err(|(link, source)| KeyShopError::Shortening {
                link,
                reason: source.to_string(),
            })?;

        debug!("Parsed {} key shop offers", shops.len());

        OfferTable::new(shops, prices, links).map_err(|reason| KeyShopError::ParseFailure { reason })
    }

    /// Shorten scraped hrefs in order, stopping at the first failure
    async fn shorten_all(
        &self,
        hrefs: &[String],
    ) -> Result<Vec<String>, (String, FetchError)> {
        let mut links = Vec::with_capacity(hrefs.len());

        for href in hrefs {
            let deep_link = self.config.absolute_url(href);
            match self.shortener.shorten(&deep_link).await {
                Ok(short) => links.push(short),
                Err(err) => return Err((deep_link, err)),
            }
        }

        Ok(links)
    }
}

#[async_trait]
impl<F: PageFetcher, S: LinkShortener> DealSource for DealSearcher<F, S> {
    async fn search(&self, title: &str) -> Result<SearchResult, SearchError> {
        DealSearcher::<F, S>::search(self, title).await
    }

    fn source_name(&self) -> &'static str {
        "gg.deals"
    }
}
