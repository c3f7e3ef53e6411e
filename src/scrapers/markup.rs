//! Markup knowledge for gg.deals pages.
//!
//! All structural selectors live here, so a change in the site's HTML only
//! touches this file. Extraction functions take raw HTML and hand back owned
//! data; a parsed `Html` document never leaves this module.

use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;

static DETAILS: LazyLock<Selector> = LazyLock::new(|| Selector::parse("div.details").unwrap());
static TITLE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a.ellipsis.title").unwrap());
static GAME_LINK: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a.game-link").unwrap());

static SHOP_LINK: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a.shop-link").unwrap());
static SHOP_IMAGE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("img").unwrap());
static DEAL_ITEM: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.game-deals-item").unwrap());
static CURRENT_PRICE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("span.game-price-current").unwrap());
static FULL_LINK: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a.full-link").unwrap());
static HOVERABLE_FULL_LINK: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a.game-hoverable.full-link").unwrap());

/// Which deep-link elements a listing uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Listing {
    /// Official storefronts, the default tab
    Official,
    /// Third-party resellers under `?tab=keyshops`
    KeyShops,
}

impl Listing {
    fn link_selector(self) -> &'static Selector {
        match self {
            Listing::Official => &*FULL_LINK,
            Listing::KeyShops => &*HOVERABLE_FULL_LINK,
        }
    }
}

/// Best match on the search page
#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit {
    pub name: String,
    /// Detail page path relative to the site root
    pub href: String,
}

/// Parallel columns scraped from a listing, before link shortening
#[derive(Debug, Clone, PartialEq)]
pub struct OfferRows {
    pub shops: Vec<String>,
    pub prices: Vec<String>,
    pub hrefs: Vec<String>,
}

/// First vendor, price and link on a listing
#[derive(Debug, Clone, PartialEq)]
pub struct TopOffer {
    pub shop: String,
    pub price: String,
    pub href: String,
}

pub fn parse_search_hit(html: &str) -> Result<SearchHit, String> {
    let document = Html::parse_document(html);

    let details = document
        .select(&DETAILS)
        .next()
        .ok_or("no div.details on search page")?;
    let name = details
        .select(&TITLE)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .ok_or("no a.ellipsis.title in first result")?;

    let href = document
        .select(&GAME_LINK)
        .next()
        .ok_or("no a.game-link on search page")?
        .value()
        .attr("href")
        .ok_or("a.game-link has no href")?
        .to_string();

    Ok(SearchHit { name, href })
}

/// Every offer row of a listing. Rows must line up one-to-one.
pub fn parse_offer_rows(html: &str, listing: Listing) -> Result<OfferRows, String> {
    let document = Html::parse_document(html);

    let shops = document
        .select(&SHOP_LINK)
        .map(shop_name)
        .collect::<Result<Vec<_>, _>>()?;

    let prices = document
        .select(&DEAL_ITEM)
        .map(|item| {
            item.select(&CURRENT_PRICE)
                .next()
                .map(|el| clean_price(&el.text().collect::<String>()))
                .ok_or_else(|| "deal item without span.game-price-current".to_string())
        })
        .collect::<Result<Vec<_>, _>>()?;

    let hrefs = document
        .select(listing.link_selector())
        .map(link_href)
        .collect::<Result<Vec<_>, _>>()?;

    if prices.is_empty() {
        return Err("no div.game-deals-item on detail page".to_string());
    }
    if shops.len() != prices.len() || shops.len() != hrefs.len() {
        return Err(format!(
            "misaligned offer lists: {} shops, {} prices, {} links",
            shops.len(),
            prices.len(),
            hrefs.len()
        ));
    }

    Ok(OfferRows { shops, prices, hrefs })
}

/// The first match of each selector, i.e. what the site ranks as cheapest
pub fn parse_top_offer(html: &str, listing: Listing) -> Result<TopOffer, String> {
    let document = Html::parse_document(html);

    let shop = document
        .select(&SHOP_LINK)
        .next()
        .ok_or_else(|| "no a.shop-link on detail page".to_string())
        .and_then(shop_name)?;
    let price = document
        .select(&CURRENT_PRICE)
        .next()
        .map(|el| clean_price(&el.text().collect::<String>()))
        .ok_or("no span.game-price-current on detail page")?;
    let href = document
        .select(listing.link_selector())
        .next()
        .ok_or_else(|| "no deep link on detail page".to_string())
        .and_then(link_href)?;

    Ok(TopOffer { shop, price, href })
}

/// Strip whitespace, the `~` approximation marker and `$`; keep the first line
pub fn clean_price(text: &str) -> String {
    text.trim()
        .replace(['~', '$'], "")
        .lines()
        .next()
        .unwrap_or_default()
        .trim()
        .to_string()
}

fn shop_name(link: ElementRef<'_>) -> Result<String, String> {
    link.select(&SHOP_IMAGE)
        .next()
        .and_then(|img| img.value().attr("alt"))
        .map(str::to_string)
        .ok_or_else(|| "a.shop-link without an img alt".to_string())
}

fn link_href(link: ElementRef<'_>) -> Result<String, String> {
    link.value()
        .attr("href")
        .map(str::to_string)
        .ok_or_else(|| "deep link without href".to_string())
}
