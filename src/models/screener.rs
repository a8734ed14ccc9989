use serde::{Deserialize, Serialize};

/// One row of the market screener export
///
/// Screener rows are all-or-nothing: every column must be present and every
/// numeric column must parse, otherwise the whole row is dropped. The source
/// decorates `last_sale` with a leading `$` and `percent_change` with a
/// trailing `%`; both are stored stripped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenerRow {
    /// Ticker symbol
    pub symbol: String,

    /// Company name
    pub name: String,

    /// Last traded price, dollars
    pub last_sale: f64,

    /// Absolute price change over the session
    pub net_change: f64,

    /// Relative price change over the session, percent
    pub percent_change: f64,

    /// Market capitalization, dollars
    pub market_cap: f64,

    /// Country of incorporation
    pub country: String,

    /// Year of the initial public offering
    pub ipo_year: i32,

    /// Session volume, shares
    pub volume: i64,

    /// Sector classification
    pub sector: String,

    /// Industry classification (join key for trade analytics)
    pub industry: String,
}
