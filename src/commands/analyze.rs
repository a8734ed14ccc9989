use crate::constants::{LEDGER_FILE, SCREENER_FILE};
use crate::services::{self, LedgerAnalytics, LedgerSummary};
use crate::utils::get_data_dir;
use std::fs::File;

pub fn run() {
    println!("📊 Trade Ledger Analytics\n");

    match analyze() {
        Ok(()) => {}
        Err(e) => {
            eprintln!("❌ Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn analyze() -> Result<(), Box<dyn std::error::Error>> {
    let data_dir = get_data_dir();

    let ledger_path = data_dir.join(LEDGER_FILE);
    if !ledger_path.exists() {
        println!("⚠️  No ledger found at {}. Run 'pull' first.", ledger_path.display());
        return Ok(());
    }
    let entries = services::parse_ledger_entries(File::open(&ledger_path)?)?;

    // The screener table is optional here. Without it the industry breakdown
    // stays empty but every other aggregate is unaffected.
    let screener_path = data_dir.join(SCREENER_FILE);
    let screener = if screener_path.exists() {
        services::parse_screener_rows(File::open(&screener_path)?)?
    } else {
        println!("⚠️  No screener table found, industry preferences will be empty\n");
        Vec::new()
    };

    println!("📒 Ledger entries: {}", format_number(entries.len()));
    println!("🔎 Screener rows:  {}", format_number(screener.len()));

    let summary = LedgerAnalytics::summarize(&entries, &screener);
    print_summary(&summary);

    Ok(())
}

fn print_summary(summary: &LedgerSummary) {
    println!("\n═══════════════════════════════════════════════════════════\n");

    println!("🔹 Daily volume (shares filled per day)");
    if summary.daily_volume.is_empty() {
        println!("   (no data)");
    }
    for (day, volume) in &summary.daily_volume {
        println!("   {}  {:>14.2}", day, volume);
    }

    println!("\n🔹 Amount by side (price x quantity)");
    for (side, amount) in &summary.amount_by_side {
        println!("   {:<6} {:>14.2}", side, amount);
    }

    println!("\n🔹 Active periods (shares by time of day)");
    if summary.active_periods.is_empty() {
        println!("   (no data)");
    }
    for bucket in &summary.active_periods {
        println!("   {:<12} {:>14.2}", bucket.label, bucket.volume);
    }

    println!("\n🔹 Industry preferences (trades per industry)");
    if summary.industry_preferences.is_empty() {
        println!("   (no data)");
    }
    for (industry, count) in &summary.industry_preferences {
        println!("   {:<32} {:>8}", industry, format_number(*count as usize));
    }

    println!("\n🔹 Monthly activity (trades per month)");
    if summary.monthly_activity.is_empty() {
        println!("   (no data)");
    }
    for (month, count) in &summary.monthly_activity {
        println!("   {}  {:>8}", month, format_number(*count as usize));
    }

    println!("\n🔹 Profit / loss by side (sells positive, buys negative)");
    for (side, amount) in &summary.profit_loss_by_side {
        println!("   {:<6} {:>14.2}", side, amount);
    }

    println!("\n═══════════════════════════════════════════════════════════");
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
