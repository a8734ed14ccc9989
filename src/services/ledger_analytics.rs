//! Trade Ledger Analytics
//!
//! Computes the fixed set of grouped summaries the tracker's dashboard
//! renders from one ledger snapshot. Every aggregate is a full recomputation
//! over the snapshot; there is no incremental state.
//!
//! Grouping keys are defined on raw substrings of the export timestamps
//! (`created_at[0..10]` day, `[0..7]` month, `[11..16]` clock time). An
//! entry whose timestamp is too short for one aggregate's substring is
//! skipped by that aggregate only.

use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

use crate::models::{ScreenerRow, TradeLedgerEntry, TradeSide};

/// Label of the bucket before the 09:30 session open
pub const PRE_MARKET_LABEL: &str = "Pre-Market";

/// Label of the bucket at and after the 16:00 session close
pub const POST_MARKET_LABEL: &str = "Post-Market";

/// All dashboard aggregates over one ledger snapshot
#[derive(Debug, Clone, Default, Serialize)]
pub struct LedgerSummary {
    /// Total filled quantity per calendar day
    pub daily_volume: BTreeMap<String, f64>,

    /// Total notional amount (price x quantity) per order side
    pub amount_by_side: BTreeMap<String, f64>,

    /// Filled quantity per time-of-day bucket, session-ordered
    pub active_periods: Vec<PeriodBucket>,

    /// Entry count per industry, joined through the screener table
    pub industry_preferences: BTreeMap<String, u64>,

    /// Entry count per calendar month
    pub monthly_activity: BTreeMap<String, u64>,

    /// Signed notional per order side: negative for buys, positive for sells
    pub profit_loss_by_side: BTreeMap<String, f64>,
}

/// One occupied time-of-day bucket
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodBucket {
    pub label: String,
    pub volume: f64,
}

/// Slot of the trading day a ledger timestamp falls into
enum PeriodSlot {
    PreMarket,
    HalfHour { hour: u32, minute: u32 },
    PostMarket,
}

/// Stateless analytics over ledger snapshots
pub struct LedgerAnalytics;

impl LedgerAnalytics {
    /// Compute every aggregate for one snapshot
    pub fn summarize(entries: &[TradeLedgerEntry], screener: &[ScreenerRow]) -> LedgerSummary {
        LedgerSummary {
            daily_volume: Self::daily_volume(entries),
            amount_by_side: Self::amount_by_side(entries),
            active_periods: Self::active_periods(entries),
            industry_preferences: Self::industry_preferences(entries, screener),
            monthly_activity: Self::monthly_activity(entries),
            profit_loss_by_side: Self::profit_loss_by_side(entries),
        }
    }

    fn daily_volume(entries: &[TradeLedgerEntry]) -> BTreeMap<String, f64> {
        let mut buckets: BTreeMap<String, f64> = BTreeMap::new();
        for entry in entries {
            let day = match entry.created_at.get(0..10) {
                Some(day) => day,
                None => continue,
            };
            *buckets.entry(day.to_string()).or_default() += entry.filled_quantity;
        }
        buckets
    }

    fn amount_by_side(entries: &[TradeLedgerEntry]) -> BTreeMap<String, f64> {
        let mut buckets: BTreeMap<String, f64> = BTreeMap::new();
        for entry in entries {
            *buckets.entry(entry.side.as_str().to_string()).or_default() += entry.amount();
        }
        buckets
    }

    /// Bucket filled quantity by time of day
    ///
    /// Output order is fixed: Pre-Market, the half-hour buckets by ascending
    /// hour and half, Post-Market. Only occupied buckets appear.
    fn active_periods(entries: &[TradeLedgerEntry]) -> Vec<PeriodBucket> {
        let mut pre_market: Option<f64> = None;
        let mut post_market: Option<f64> = None;
        let mut session: BTreeMap<(u32, u32), f64> = BTreeMap::new();

        for entry in entries {
            let slot = match Self::period_slot(&entry.created_at) {
                Some(slot) => slot,
                None => continue,
            };
            match slot {
                PeriodSlot::PreMarket => {
                    *pre_market.get_or_insert(0.0) += entry.filled_quantity;
                }
                PeriodSlot::HalfHour { hour, minute } => {
                    *session.entry((hour, minute)).or_default() += entry.filled_quantity;
                }
                PeriodSlot::PostMarket => {
                    *post_market.get_or_insert(0.0) += entry.filled_quantity;
                }
            }
        }

        let mut buckets = Vec::new();
        if let Some(volume) = pre_market {
            buckets.push(PeriodBucket {
                label: PRE_MARKET_LABEL.to_string(),
                volume,
            });
        }
        for ((hour, minute), volume) in session {
            // unpadded hour, zero-padded minute: "9:30", "15:00"
            buckets.push(PeriodBucket {
                label: format!("{}:{:02}", hour, minute),
                volume,
            });
        }
        if let Some(volume) = post_market {
            buckets.push(PeriodBucket {
                label: POST_MARKET_LABEL.to_string(),
                volume,
            });
        }
        buckets
    }

    fn period_slot(created_at: &str) -> Option<PeriodSlot> {
        let clock = created_at.get(11..16)?;
        let (hour_raw, minute_raw) = clock.split_once(':')?;
        let hour: u32 = hour_raw.parse().ok()?;
        let minute: u32 = minute_raw.parse().ok()?;

        if (hour, minute) < (9, 30) {
            Some(PeriodSlot::PreMarket)
        } else if hour >= 16 {
            Some(PeriodSlot::PostMarket)
        } else {
            Some(PeriodSlot::HalfHour {
                hour,
                minute: if minute < 30 { 0 } else { 30 },
            })
        }
    }

    /// Count entries per industry via an exact symbol join against the
    /// screener table; entries whose symbol is not in the screener are not
    /// counted.
    fn industry_preferences(
        entries: &[TradeLedgerEntry],
        screener: &[ScreenerRow],
    ) -> BTreeMap<String, u64> {
        let industry_by_symbol: HashMap<&str, &str> = screener
            .iter()
            .map(|row| (row.symbol.as_str(), row.industry.as_str()))
            .collect();

        let mut buckets: BTreeMap<String, u64> = BTreeMap::new();
        for entry in entries {
            let industry = match industry_by_symbol.get(entry.symbol.as_str()) {
                Some(industry) => *industry,
                None => continue,
            };
            *buckets.entry(industry.to_string()).or_default() += 1;
        }
        buckets
    }

    fn monthly_activity(entries: &[TradeLedgerEntry]) -> BTreeMap<String, u64> {
        let mut buckets: BTreeMap<String, u64> = BTreeMap::new();
        for entry in entries {
            let month = match entry.created_at.get(0..7) {
                Some(month) => month,
                None => continue,
            };
            *buckets.entry(month.to_string()).or_default() += 1;
        }
        buckets
    }

    fn profit_loss_by_side(entries: &[TradeLedgerEntry]) -> BTreeMap<String, f64> {
        let mut buckets: BTreeMap<String, f64> = BTreeMap::new();
        for entry in entries {
            let signed = match entry.side {
                TradeSide::Buy => -entry.amount(),
                TradeSide::Sell => entry.amount(),
            };
            *buckets.entry(entry.side.as_str().to_string()).or_default() += signed;
        }
        buckets
    }
}
