use crate::server;
use crate::services::{MarketStore, RemoteFeed, WatchlistStore};
use crate::utils::{get_data_dir, get_watchlist_path};
use crate::worker;
use chrono::Local;
use std::sync::Arc;

pub async fn run(port: u16) {
    println!("🚀 Starting stocklens server on port {}", port);

    let data_dir = get_data_dir();
    println!("📁 Data directory: {}", data_dir.display());

    let store = Arc::new(MarketStore::new());

    println!("📊 Loading local dataset into memory...");
    let now = Local::now().naive_local();
    match store.load_local_dataset(&data_dir, now).await {
        Ok(counts) => {
            println!("✅ Dataset loaded successfully:");
            println!("   🏷️  Listings:   {}", counts.listings);
            println!("   🔎 Screener:   {}", counts.screener);
            println!("   📒 Ledger:     {}", counts.ledger);
            println!(
                "   📈 Bar series: {} ({} records)",
                counts.bar_series, counts.bar_records
            );
        }
        Err(e) => {
            eprintln!("⚠️  Warning: Failed to load local dataset: {}", e);
            eprintln!("   Server will start with an empty cache");
        }
    }

    let watchlist = match WatchlistStore::open(get_watchlist_path()) {
        Ok(watchlist) => Arc::new(watchlist),
        Err(e) => {
            eprintln!("❌ Failed to open watchlist: {}", e);
            std::process::exit(1);
        }
    };
    println!("⭐ Watchlist symbols: {}", watchlist.count().await);

    match RemoteFeed::from_env() {
        Ok(Some(feed)) => {
            println!("🔄 Background refresh enabled (feed: {})", feed.base_url());
            let worker_store = store.clone();
            let worker_watchlist = watchlist.clone();
            tokio::spawn(async move {
                worker::run_refresh_worker(worker_store, worker_watchlist, feed).await;
            });
        }
        Ok(None) => {
            println!("💡 No feed configured (set STOCKLENS_FEED_URL to enable background refresh)");
        }
        Err(e) => {
            eprintln!("❌ Invalid feed configuration: {}", e);
            std::process::exit(1);
        }
    }

    if let Err(e) = server::serve(store, watchlist, port).await {
        eprintln!("❌ Server error: {}", e);
        std::process::exit(1);
    }
}
