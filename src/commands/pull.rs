use crate::constants::{BARS_DIR, LEDGER_FILE, LISTINGS_FILE, SCREENER_FILE};
use crate::error::Error;
use crate::models::BarInterval;
use crate::services::{self, RemoteFeed, WatchlistStore};
use crate::utils::{get_data_dir, get_watchlist_path};
use chrono::Local;
use std::path::Path;

pub async fn run() {
    println!("🚀 Pulling CSV exports into the local data directory");

    let feed = match RemoteFeed::from_env() {
        Ok(Some(feed)) => feed,
        Ok(None) => {
            eprintln!("❌ No feed configured");
            eprintln!("   Set STOCKLENS_FEED_URL to the base URL of a CSV feed");
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("❌ Invalid feed configuration: {}", e);
            std::process::exit(1);
        }
    };

    let data_dir = get_data_dir();
    println!("🌐 Feed:           {}", feed.base_url());
    println!("📁 Data directory: {}", data_dir.display());

    match pull_all(&feed, &data_dir).await {
        Ok(_) => {
            println!("\n✅ Pull completed successfully!");
            println!("💡 Run 'stocklens analyze' or 'stocklens serve' to work with the data");
        }
        Err(e) => {
            eprintln!("\n❌ Pull failed: {}", e);
            std::process::exit(1);
        }
    }
}

async fn pull_all(feed: &RemoteFeed, data_dir: &Path) -> Result<(), Error> {
    std::fs::create_dir_all(data_dir)?;

    // Step 1: Wholesale tables. The raw export is stored as-is; counts below
    // reflect rows that survive parsing, not lines in the file.
    println!("\n📋 Pulling wholesale tables...");

    let body = feed.fetch_csv(LISTINGS_FILE).await?;
    let listings = services::parse_company_listings(body.as_bytes())?;
    std::fs::write(data_dir.join(LISTINGS_FILE), &body)?;
    println!("   ✅ {:<14} {} rows", LISTINGS_FILE, listings.len());

    let body = feed.fetch_csv(SCREENER_FILE).await?;
    let screener = services::parse_screener_rows(body.as_bytes())?;
    std::fs::write(data_dir.join(SCREENER_FILE), &body)?;
    println!("   ✅ {:<14} {} rows", SCREENER_FILE, screener.len());

    let body = feed.fetch_csv(LEDGER_FILE).await?;
    let ledger = services::parse_ledger_entries(body.as_bytes())?;
    std::fs::write(data_dir.join(LEDGER_FILE), &body)?;
    println!("   ✅ {:<14} {} rows", LEDGER_FILE, ledger.len());

    // Step 2: Bar series for watched symbols
    let watchlist = WatchlistStore::open(get_watchlist_path())?;
    let symbols = watchlist.symbols().await;
    if symbols.is_empty() {
        println!("\n💡 Watchlist is empty, no bar series pulled");
        println!("   Add symbols with 'stocklens watch add <SYMBOL>'");
        return Ok(());
    }

    println!("\n📈 Pulling bar series for {} watched symbols...", symbols.len());
    let now = Local::now().naive_local();
    for symbol in &symbols {
        let symbol_dir = data_dir.join(BARS_DIR).join(symbol);
        std::fs::create_dir_all(&symbol_dir)?;

        for interval in BarInterval::all() {
            match feed.fetch_csv(&RemoteFeed::bars_path(symbol, interval)).await {
                Ok(body) => {
                    let bars = services::parse_bars(body.as_bytes(), interval, now)?;
                    std::fs::write(symbol_dir.join(interval.file_name()), &body)?;
                    println!("   ✅ {} {:<9} {} bars in window", symbol, interval.as_str(), bars.len());
                }
                Err(e) => {
                    // A single missing series should not abort the whole pull
                    eprintln!("   ⚠️  {} {:<9} {}", symbol, interval.as_str(), e);
                }
            }
        }
    }

    Ok(())
}
