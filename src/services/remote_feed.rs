//! Remote CSV Feed Client
//!
//! Fetches the raw CSV exports over HTTP and runs them through the family
//! parsers. The feed mirrors the local data directory layout:
//! `listings.csv`, `screener.csv`, `ledger.csv`, and
//! `bars/{SYMBOL}/{interval}.csv` below one base URL. Single attempt per
//! fetch; retry policy belongs to the callers (the worker just waits for
//! the next cycle).

use chrono::NaiveDateTime;
use std::time::Duration;
use tracing::debug;

use crate::constants::{BARS_DIR, LEDGER_FILE, LISTINGS_FILE, SCREENER_FILE};
use crate::error::{AppError, Result};
use crate::models::{BarInterval, CompanyListing, PriceBar, ScreenerRow, TradeLedgerEntry};
use crate::services::{bar_parser, ledger_parser, listing_parser, screener_parser};

/// Client for one CSV feed endpoint
pub struct RemoteFeed {
    base_url: String,
    client: reqwest::Client,
}

impl RemoteFeed {
    /// Create a feed client for a validated base URL
    pub fn new(base_url: &str) -> Result<Self> {
        // Trim whitespace and remove trailing slashes from base_url
        let base_url = base_url.trim().trim_end_matches('/').to_string();

        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(AppError::Config(format!(
                "Invalid feed URL: must start with http:// or https://, got: '{}'",
                base_url
            )));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| AppError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { base_url, client })
    }

    /// Build a client from `STOCKLENS_FEED_URL`; `None` when unset
    pub fn from_env() -> Result<Option<Self>> {
        match crate::utils::get_feed_url() {
            Some(url) => Ok(Some(Self::new(&url)?)),
            None => Ok(None),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Feed path of one symbol's bar series
    pub fn bars_path(symbol: &str, interval: BarInterval) -> String {
        format!("{}/{}/{}", BARS_DIR, symbol.to_uppercase(), interval.file_name())
    }

    /// Fetch one CSV document below the base URL
    pub async fn fetch_csv(&self, path: &str) -> Result<String> {
        let url = format!("{}/{}", self.base_url, path);
        debug!(url = %url, "Fetching CSV document");

        let response = self.client.get(&url).send().await?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(AppError::NotFound(format!("Feed has no document at {}", url)));
        }
        if !response.status().is_success() {
            return Err(AppError::Network(format!(
                "Feed returned {} for {}",
                response.status(),
                url
            )));
        }
        Ok(response.text().await?)
    }

    pub async fn fetch_listings(&self) -> Result<Vec<CompanyListing>> {
        let body = self.fetch_csv(LISTINGS_FILE).await?;
        listing_parser::parse_company_listings(body.as_bytes())
    }

    pub async fn fetch_screener(&self) -> Result<Vec<ScreenerRow>> {
        let body = self.fetch_csv(SCREENER_FILE).await?;
        screener_parser::parse_screener_rows(body.as_bytes())
    }

    pub async fn fetch_ledger(&self) -> Result<Vec<TradeLedgerEntry>> {
        let body = self.fetch_csv(LEDGER_FILE).await?;
        ledger_parser::parse_ledger_entries(body.as_bytes())
    }

    /// Fetch and filter one bar series; `now` drives the temporal filters
    pub async fn fetch_bars(
        &self,
        symbol: &str,
        interval: BarInterval,
        now: NaiveDateTime,
    ) -> Result<Vec<PriceBar>> {
        let body = self.fetch_csv(&Self::bars_path(symbol, interval)).await?;
        bar_parser::parse_bars(body.as_bytes(), interval, now)
    }
}
