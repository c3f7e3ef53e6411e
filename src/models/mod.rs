use crate::error::{KeyShopError, QueryError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One vendor offer for a game
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Offer {
    pub shop: String,
    /// Decimal string, currency symbol and `~` marker already stripped
    pub price: String,
    pub link: String,
}

impl Offer {
    pub fn new(shop: impl Into<String>, price: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            shop: shop.into(),
            price: price.into(),
            link: link.into(),
        }
    }

    /// Numeric value of the price. `NaN` and infinities are rejected.
    pub fn price_value(&self) -> Result<f64, QueryError> {
        self.price
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .ok_or_else(|| QueryError::InvalidPrice {
                shop: self.shop.clone(),
                price: self.price.clone(),
            })
    }
}

/// Index-aligned shop / price / link columns.
/// `shops[i]`, `prices[i]` and `links[i]` always describe the same offer.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct OfferTable {
    shops: Vec<String>,
    prices: Vec<String>,
    links: Vec<String>,
}

impl OfferTable {
    /// Build a table, rejecting columns of unequal length
    pub fn new(shops: Vec<String>, prices: Vec<String>, links: Vec<String>) -> Result<Self, String> {
        if shops.len() != prices.len() || shops.len() != links.len() {
            return Err(format!(
                "misaligned offer lists: {} shops, {} prices, {} links",
                shops.len(),
                prices.len(),
                links.len()
            ));
        }

        Ok(Self { shops, prices, links })
    }

    pub fn len(&self) -> usize {
        self.shops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shops.is_empty()
    }

    pub fn shops(&self) -> &[String] {
        &self.shops
    }

    pub fn prices(&self) -> &[String] {
        &self.prices
    }

    pub fn links(&self) -> &[String] {
        &self.links
    }

    pub fn offers(&self) -> Vec<Offer> {
        self.shops
            .iter()
            .zip(&self.prices)
            .zip(&self.links)
            .map(|((shop, price), link)| Offer::new(shop, price, link))
            .collect()
    }
}

/// The scraped price listing for one searched game.
///
/// A fresh `SearchResult::new()` is the unsearched state; every query accessor
/// fails with [`QueryError::NotSearched`] until the result came out of a
/// successful search.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SearchResult {
    name: Option<String>,
    cheapest: Option<Offer>,
    offers: OfferTable,
    found: bool,
    key_shop_offers: OfferTable,
    key_shop_found: bool,
    key_shop_error: Option<KeyShopError>,
    searched_at: Option<DateTime<Utc>>,
}

impl SearchResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assemble a successful result. Key-shop outcome is kept separately and
    /// never affects `found`.
    pub(crate) fn found(
        name: String,
        offers: OfferTable,
        cheapest: Offer,
        key_shops: Result<OfferTable, KeyShopError>,
    ) -> Self {
        let (key_shop_offers, key_shop_found, key_shop_error) = match key_shops {
            Ok(table) => (table, true, None),
            Err(err) => (OfferTable::default(), false, Some(err)),
        };

        Self {
            name: Some(name),
            cheapest: Some(cheapest),
            offers,
            found: true,
            key_shop_offers,
            key_shop_found,
            key_shop_error,
            searched_at: Some(Utc::now()),
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn is_found(&self) -> bool {
        self.found
    }

    pub fn shops(&self) -> &[String] {
        self.offers.shops()
    }

    pub fn prices(&self) -> &[String] {
        self.offers.prices()
    }

    pub fn links(&self) -> &[String] {
        self.offers.links()
    }

    pub fn key_shops(&self) -> &[String] {
        self.key_shop_offers.shops()
    }

    pub fn key_prices(&self) -> &[String] {
        self.key_shop_offers.prices()
    }

    pub fn key_links(&self) -> &[String] {
        self.key_shop_offers.links()
    }

    pub fn key_shop_found(&self) -> bool {
        self.key_shop_found
    }

    /// Why the key-shop listing is missing, if it is
    pub fn key_shop_error(&self) -> Option<&KeyShopError> {
        self.key_shop_error.as_ref()
    }

    pub fn searched_at(&self) -> Option<DateTime<Utc>> {
        self.searched_at
    }

    fn ensure_searched(&self) -> Result<(), QueryError> {
        if self.found {
            Ok(())
        } else {
            Err(QueryError::NotSearched)
        }
    }

    /// Every official-shop offer, in the order the site lists them
    pub fn all_offers(&self) -> Result<Vec<Offer>, QueryError> {
        self.ensure_searched()?;
        Ok(self.offers.offers())
    }

    /// The top offer as rendered by the site. No numeric comparison is made.
    pub fn cheapest(&self) -> Result<&Offer, QueryError> {
        self.ensure_searched()?;
        self.cheapest.as_ref().ok_or(QueryError::NotSearched)
    }

    pub fn cheapest_link(&self) -> Result<&str, QueryError> {
        self.cheapest().map(|offer| offer.link.as_str())
    }

    /// First offer whose vendor name matches, ignoring case
    pub fn by_vendor(&self, vendor: &str) -> Result<Offer, QueryError> {
        let wanted = vendor.to_lowercase();

        self.all_offers()?
            .into_iter()
            .find(|offer| offer.shop.to_lowercase() == wanted)
            .ok_or_else(|| QueryError::NotFound {
                vendor: vendor.to_string(),
            })
    }

    /// Offers priced at or below `threshold`, original order preserved
    pub fn at_or_below(&self, threshold: f64) -> Result<Vec<Offer>, QueryError> {
        let mut matching = Vec::new();

        for offer in self.all_offers()? {
            if offer.price_value()? <= threshold {
                matching.push(offer);
            }
        }

        Ok(matching)
    }

    pub fn key_shop_offers(&self) -> Result<Vec<Offer>, QueryError> {
        self.ensure_searched()?;
        Ok(self.key_shop_offers.offers())
    }
}

impl fmt::Display for SearchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.found {
            return writeln!(f, "no game has been searched for yet");
        }

        writeln!(f, "{}", self.name.as_deref().unwrap_or_default())?;
        writeln!(f, "----------")?;
        for offer in self.offers.offers() {
            writeln!(f, "shop: {} for {} -> {}", offer.shop, offer.price, offer.link)?;
        }

        Ok(())
    }
}
