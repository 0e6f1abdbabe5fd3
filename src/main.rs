mod config;
mod models;
mod output;
mod scrapers;

use config::ScrapeConfig;
use scrapers::{scrape_listings, ChromeRenderer};
use tracing::{info, Level};
use tracing_subscriber;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    let cfg = ScrapeConfig::default();

    info!("🔎 OLX Scout - Car Cover Listings");
    info!("Search: {}{}", cfg.base_url, cfg.search_path);
    info!("");

    let renderer = ChromeRenderer::new(&cfg)?;
    let listings = scrape_listings(&renderer, &cfg)?;

    info!("\n✅ Scraped {} unique listings\n", listings.len());

    for (i, listing) in listings.iter().enumerate() {
        println!("{}. {}", i + 1, listing.title);
        if let Some(price) = &listing.price {
            println!("   Price: {}", price);
        }
        if let Some(location) = &listing.location {
            println!("   Location: {}", location);
        }
        if let Some(posted) = &listing.posted {
            println!("   Posted: {}", posted);
        }
        if let Some(ad_id) = &listing.ad_id {
            println!("   Ad ID: {}", ad_id);
        }
        println!("   URL: {}", listing.link);
        println!();
    }

    let data = output::to_csv_bytes(&listings)?;
    tokio::fs::write(&cfg.output_path, data).await?;
    info!("💾 Wrote {} rows to {}", listings.len(), cfg.output_path);

    Ok(())
}
