use crate::models::WatchlistEntry;
use crate::services;
use crate::utils::{get_data_dir, get_watchlist_path};
use std::path::Path;

pub fn run() {
    println!("📊 Local Dataset Status\n");

    match show_status() {
        Ok(()) => {}
        Err(e) => {
            eprintln!("❌ Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn show_status() -> Result<(), Box<dyn std::error::Error>> {
    let data_dir = get_data_dir();
    let stats = services::get_dataset_stats(&data_dir)?;

    if !stats.has_data {
        println!("⚠️  No dataset found in {}. Run 'pull' first.", data_dir.display());
        return Ok(());
    }

    println!("🏷️  Listings: {}", describe_rows(stats.listings_rows));
    println!("🔎 Screener: {}", describe_rows(stats.screener_rows));
    println!("📒 Ledger:   {}", describe_rows(stats.ledger_rows));
    println!("📈 Symbols with bar series: {}", stats.bar_symbols);

    let symbols = services::list_bar_symbols(&data_dir)?;
    if !symbols.is_empty() {
        println!("\n═══════════════════════════════════════════════════════════\n");
        for symbol in &symbols {
            if let Err(e) = show_symbol(&data_dir, symbol) {
                eprintln!("⚠️  Could not read {}: {}", symbol, e);
            }
        }
    }

    let watchlist_path = get_watchlist_path();
    if watchlist_path.exists() {
        let raw = std::fs::read_to_string(&watchlist_path)?;
        let entries: Vec<WatchlistEntry> = serde_json::from_str(&raw)?;
        println!("\n═══════════════════════════════════════════════════════════\n");
        println!("⭐ Watchlist: {} symbols", entries.len());
        for entry in &entries {
            println!("   🔹 {}", entry.symbol);
        }
    }

    println!("\n💡 Tip: bar series live under {}/bars/<SYMBOL>/", data_dir.display());
    println!("   Each symbol has: intraday.csv, weekly.csv, monthly.csv");

    Ok(())
}

fn show_symbol(data_dir: &Path, symbol: &str) -> Result<(), Box<dyn std::error::Error>> {
    let info = services::get_symbol_info(data_dir, symbol)?;

    println!("🔹 {}", info.symbol);

    if let Some(intraday) = &info.intraday {
        println!("   Intraday: {:>8} records  ({} → {})",
            format_number(intraday.record_count),
            intraday.first_date,
            intraday.last_date
        );
        println!("             Latest close: {:.2}", intraday.last_close);
    }

    if let Some(weekly) = &info.weekly {
        println!("   Weekly:   {:>8} records  ({} → {})",
            format_number(weekly.record_count),
            weekly.first_date,
            weekly.last_date
        );
    }

    if let Some(monthly) = &info.monthly {
        println!("   Monthly:  {:>8} records  ({} → {})",
            format_number(monthly.record_count),
            monthly.first_date,
            monthly.last_date
        );
    }

    Ok(())
}

fn describe_rows(rows: Option<usize>) -> String {
    match rows {
        Some(count) => format!("{} rows", format_number(count)),
        None => "not pulled".to_string(),
    }
}

fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.insert(0, ',');
        }
        result.insert(0, c);
    }
    result
}
