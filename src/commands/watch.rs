use crate::cli::WatchAction;
use crate::services::WatchlistStore;
use crate::utils::get_watchlist_path;

pub async fn run(action: WatchAction) {
    let watchlist = match WatchlistStore::open(get_watchlist_path()) {
        Ok(watchlist) => watchlist,
        Err(e) => {
            eprintln!("❌ Failed to open watchlist: {}", e);
            std::process::exit(1);
        }
    };

    match action {
        WatchAction::Add { symbol } => {
            match watchlist.add(&symbol).await {
                Ok(entry) => {
                    println!("✅ Watching {} (id: {})", entry.symbol, entry.id);
                }
                Err(e) => {
                    eprintln!("❌ Could not add '{}': {}", symbol, e);
                    std::process::exit(1);
                }
            }
        }
        WatchAction::Remove { symbol } => {
            match watchlist.remove_symbol(&symbol).await {
                Ok(true) => {
                    println!("✅ Stopped watching {}", symbol.trim().to_uppercase());
                }
                Ok(false) => {
                    eprintln!("⚠️  '{}' is not on the watchlist", symbol);
                    std::process::exit(1);
                }
                Err(e) => {
                    eprintln!("❌ Could not remove '{}': {}", symbol, e);
                    std::process::exit(1);
                }
            }
        }
        WatchAction::List => {
            let entries = watchlist.entries().await;
            if entries.is_empty() {
                println!("⭐ Watchlist is empty");
                println!("💡 Add a symbol with 'stocklens watch add <SYMBOL>'");
                return;
            }

            println!("⭐ Watching {} symbols:", entries.len());
            for entry in &entries {
                println!("   🔹 {:<8} {}", entry.symbol, entry.id);
            }
        }
    }
}
