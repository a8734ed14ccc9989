//! In-Memory Market Store
//!
//! Single shared snapshot of everything the API serves: the four record
//! families plus per-symbol bar series. Writers replace whole tables (the
//! feed is the source of truth, there is no merging); readers get cloned
//! snapshots. One `RwLock` guards the snapshot, so refresh cycles never
//! block concurrent reads against each other.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

use crate::constants::{BARS_DIR, LEDGER_FILE, LISTINGS_FILE, SCREENER_FILE};
use crate::error::Result;
use crate::models::{BarInterval, BarSeries, CompanyListing, ScreenerRow, TradeLedgerEntry};
use crate::services::ledger_analytics::{LedgerAnalytics, LedgerSummary};
use crate::services::{bar_parser, ledger_parser, listing_parser, screener_parser};

/// Shared handle to the market store
pub type SharedMarketStore = Arc<MarketStore>;

#[derive(Default)]
struct MarketSnapshot {
    listings: Vec<CompanyListing>,
    screener: Vec<ScreenerRow>,
    ledger: Vec<TradeLedgerEntry>,
    bars: HashMap<String, HashMap<BarInterval, BarSeries>>,
    last_refresh: Option<DateTime<Utc>>,
}

/// Record counts for health and status reporting
#[derive(Debug, Clone, Serialize)]
pub struct StoreCounts {
    pub listings: usize,
    pub screener: usize,
    pub ledger: usize,
    pub bar_series: usize,
    pub bar_records: usize,
}

pub struct MarketStore {
    snapshot: RwLock<MarketSnapshot>,
}

impl MarketStore {
    pub fn new() -> Self {
        Self {
            snapshot: RwLock::new(MarketSnapshot::default()),
        }
    }

    /// Replace the company listing table
    pub async fn replace_listings(&self, listings: Vec<CompanyListing>) {
        let mut snapshot = self.snapshot.write().await;
        snapshot.listings = listings;
    }

    /// Replace the screener table
    pub async fn replace_screener(&self, screener: Vec<ScreenerRow>) {
        let mut snapshot = self.snapshot.write().await;
        snapshot.screener = screener;
    }

    /// Replace the trade ledger
    pub async fn replace_ledger(&self, ledger: Vec<TradeLedgerEntry>) {
        let mut snapshot = self.snapshot.write().await;
        snapshot.ledger = ledger;
    }

    /// Replace one bar series; the previous series for that symbol and
    /// interval is discarded
    pub async fn replace_bars(&self, symbol: &str, interval: BarInterval, bars: BarSeries) {
        let mut snapshot = self.snapshot.write().await;
        snapshot
            .bars
            .entry(symbol.to_uppercase())
            .or_default()
            .insert(interval, bars);
    }

    pub async fn listings(&self) -> Vec<CompanyListing> {
        self.snapshot.read().await.listings.clone()
    }

    pub async fn screener(&self) -> Vec<ScreenerRow> {
        self.snapshot.read().await.screener.clone()
    }

    pub async fn ledger(&self) -> Vec<TradeLedgerEntry> {
        self.snapshot.read().await.ledger.clone()
    }

    /// Cached bar series for a symbol (symbol lookup is case-insensitive)
    pub async fn bars(&self, symbol: &str, interval: BarInterval) -> Option<BarSeries> {
        let snapshot = self.snapshot.read().await;
        snapshot
            .bars
            .get(&symbol.to_uppercase())?
            .get(&interval)
            .cloned()
    }

    /// Recompute the dashboard aggregates from the current snapshot
    pub async fn ledger_summary(&self) -> LedgerSummary {
        let snapshot = self.snapshot.read().await;
        LedgerAnalytics::summarize(&snapshot.ledger, &snapshot.screener)
    }

    pub async fn counts(&self) -> StoreCounts {
        let snapshot = self.snapshot.read().await;
        StoreCounts {
            listings: snapshot.listings.len(),
            screener: snapshot.screener.len(),
            ledger: snapshot.ledger.len(),
            bar_series: snapshot.bars.values().map(|series| series.len()).sum(),
            bar_records: snapshot
                .bars
                .values()
                .flat_map(|series| series.values())
                .map(|bars| bars.len())
                .sum(),
        }
    }

    /// Stamp the snapshot as freshly refreshed
    pub async fn mark_refreshed(&self) {
        let mut snapshot = self.snapshot.write().await;
        snapshot.last_refresh = Some(Utc::now());
    }

    pub async fn last_refresh(&self) -> Option<DateTime<Utc>> {
        self.snapshot.read().await.last_refresh
    }

    /// Ingest the bundled dataset from the data directory
    ///
    /// Missing files are fine (a fresh checkout has none); IO failures
    /// abort the load. `now` drives the intraday/weekly filters of the bar
    /// parsers.
    pub async fn load_local_dataset(&self, data_dir: &Path, now: NaiveDateTime) -> Result<StoreCounts> {
        let listings_path = data_dir.join(LISTINGS_FILE);
        if listings_path.exists() {
            let listings = listing_parser::parse_company_listings(File::open(&listings_path)?)?;
            info!(count = listings.len(), "Loaded company listings");
            self.replace_listings(listings).await;
        }

        let screener_path = data_dir.join(SCREENER_FILE);
        if screener_path.exists() {
            let screener = screener_parser::parse_screener_rows(File::open(&screener_path)?)?;
            info!(count = screener.len(), "Loaded screener rows");
            self.replace_screener(screener).await;
        }

        let ledger_path = data_dir.join(LEDGER_FILE);
        if ledger_path.exists() {
            let ledger = ledger_parser::parse_ledger_entries(File::open(&ledger_path)?)?;
            info!(count = ledger.len(), "Loaded ledger entries");
            self.replace_ledger(ledger).await;
        }

        let bars_dir = data_dir.join(BARS_DIR);
        if bars_dir.is_dir() {
            for entry in std::fs::read_dir(&bars_dir)? {
                let entry = entry?;
                if !entry.path().is_dir() {
                    continue;
                }
                let symbol = entry.file_name().to_string_lossy().to_string();
                for interval in BarInterval::all() {
                    let path = entry.path().join(interval.file_name());
                    if !path.exists() {
                        continue;
                    }
                    let bars = bar_parser::parse_bars(File::open(&path)?, interval, now)?;
                    self.replace_bars(&symbol, interval, bars).await;
                }
            }
        }

        Ok(self.counts().await)
    }
}

impl Default for MarketStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PriceBar;
    use chrono::NaiveDate;

    fn test_bar(y: i32, m: u32, d: u32, close: f64) -> PriceBar {
        PriceBar::period(
            NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(0, 0, 0).unwrap(),
            close,
            close,
            close,
            close,
            100.0,
        )
    }

    #[tokio::test]
    async fn test_replace_and_read_back() {
        let store = MarketStore::new();
        store
            .replace_listings(vec![CompanyListing::new("AAPL", "Apple", "NASDAQ")])
            .await;
        let listings = store.listings().await;
        assert_eq!(listings.len(), 1);
        assert_eq!(listings[0].symbol, "AAPL");
    }

    #[tokio::test]
    async fn test_bars_lookup_is_case_insensitive() {
        let store = MarketStore::new();
        store
            .replace_bars("aapl", BarInterval::Monthly, vec![test_bar(2024, 1, 1, 10.0)])
            .await;
        assert!(store.bars("AAPL", BarInterval::Monthly).await.is_some());
        assert!(store.bars("Aapl", BarInterval::Monthly).await.is_some());
        assert!(store.bars("AAPL", BarInterval::Weekly).await.is_none());
        assert!(store.bars("MSFT", BarInterval::Monthly).await.is_none());
    }

    #[tokio::test]
    async fn test_replace_bars_discards_previous_series() {
        let store = MarketStore::new();
        store
            .replace_bars("AAPL", BarInterval::Monthly, vec![test_bar(2024, 1, 1, 10.0)])
            .await;
        store
            .replace_bars(
                "AAPL",
                BarInterval::Monthly,
                vec![test_bar(2024, 2, 1, 11.0), test_bar(2024, 3, 1, 12.0)],
            )
            .await;
        let bars = store.bars("AAPL", BarInterval::Monthly).await.unwrap();
        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0].close, 11.0);
    }

    #[tokio::test]
    async fn test_counts_cover_all_series() {
        let store = MarketStore::new();
        store
            .replace_bars("AAPL", BarInterval::Monthly, vec![test_bar(2024, 1, 1, 10.0)])
            .await;
        store
            .replace_bars("MSFT", BarInterval::Weekly, vec![test_bar(2024, 1, 8, 20.0), test_bar(2024, 1, 15, 21.0)])
            .await;
        let counts = store.counts().await;
        assert_eq!(counts.bar_series, 2);
        assert_eq!(counts.bar_records, 3);
        assert_eq!(counts.listings, 0);
    }

    #[tokio::test]
    async fn test_load_local_dataset_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(LISTINGS_FILE),
            "symbol,name,exchange\nAAPL,Apple,NASDAQ\nMSFT,Microsoft,NASDAQ\n",
        )
        .unwrap();
        let aapl_dir = dir.path().join(BARS_DIR).join("AAPL");
        std::fs::create_dir_all(&aapl_dir).unwrap();
        std::fs::write(
            aapl_dir.join("monthly.csv"),
            "date,open,high,low,close,volume\n2024-01-01,1,2,1,1.5,10\n",
        )
        .unwrap();

        let store = MarketStore::new();
        let now = NaiveDate::from_ymd_opt(2024, 3, 14).unwrap().and_hms_opt(10, 0, 0).unwrap();
        let counts = store.load_local_dataset(dir.path(), now).await.unwrap();

        assert_eq!(counts.listings, 2);
        assert_eq!(counts.bar_series, 1);
        assert!(store.bars("AAPL", BarInterval::Monthly).await.is_some());
        // families with no file on disk stay empty
        assert_eq!(counts.ledger, 0);
    }
}
