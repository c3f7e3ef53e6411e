use anyhow::{bail, Context};
use deal_scout::{DealSearcher, SearchConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let title = std::env::args().skip(1).collect::<Vec<_>>().join(" ");
    if title.trim().is_empty() {
        bail!("usage: deal-scout <game title>");
    }

    info!("🎮 Deal Scout - gg.deals price lookup");

    let searcher = DealSearcher::with_config(SearchConfig::from_env())?;
    let result = searcher
        .search(&title)
        .await
        .with_context(|| format!("Search for {:?} failed", title))?;

    print!("{}", result);

    if let Ok(cheapest) = result.cheapest() {
        println!();
        println!("Cheapest: {} for {} -> {}", cheapest.shop, cheapest.price, cheapest.link);
    }

    if result.key_shop_found() {
        info!("{} key shop offers", result.key_shops().len());
    } else if let Some(err) = result.key_shop_error() {
        info!("No key shop offers: {}", err);
    }

    println!();
    println!("{}", serde_json::to_string_pretty(&result)?);

    Ok(())
}
