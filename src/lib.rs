//! Game price lookup against gg.deals.
//!
//! Searches the site for a title, scrapes every vendor offer from the game's
//! detail page (and its key-shop tab) and rewrites each deep link through
//! TinyURL. The scraped listing is returned as a [`SearchResult`] with query
//! helpers for the cheapest offer, a vendor lookup and a price ceiling.

pub mod error;
pub mod models;
pub mod scrapers;

pub use error::{FetchError, KeyShopError, QueryError, SearchError, Stage};
pub use models::{Offer, OfferTable, SearchResult};
pub use scrapers::{DealSearcher, DealSource, LinkShortener, PageFetcher, SearchConfig};
