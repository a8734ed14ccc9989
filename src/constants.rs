//! CSV Format Constants
//!
//! Defines the fixed column layouts for every CSV family the tracker ingests.
//! All layouts are positional: columns are addressed by 0-based index, never
//! by header name, and the header row is always skipped. Reordering columns
//! in a source file is a breaking change.

/// Column indices for company listing files (0-indexed)
///
/// `symbol,name,exchange`: all three are required-presence string fields.
pub mod listing_column {
    pub const SYMBOL: usize = 0;
    pub const NAME: usize = 1;
    pub const EXCHANGE: usize = 2;
}

/// Column indices for intraday bar files (0-indexed)
///
/// `timestamp,<unused>,high,low,close,volume`: only `timestamp` and `close`
/// are required; `high`, `low` and `volume` default to 0.0 when missing or
/// non-numeric. Index 1 is carried by the export but never read.
pub mod intraday_column {
    pub const TIMESTAMP: usize = 0;
    pub const HIGH: usize = 2;
    pub const LOW: usize = 3;
    pub const CLOSE: usize = 4;
    pub const VOLUME: usize = 5;
}

/// Column indices for weekly and monthly bar files (0-indexed)
///
/// `date,open,high,low,close,volume`: the four prices are required;
/// `volume` defaults to 0.0.
pub mod period_column {
    pub const DATE: usize = 0;
    pub const OPEN: usize = 1;
    pub const HIGH: usize = 2;
    pub const LOW: usize = 3;
    pub const CLOSE: usize = 4;
    pub const VOLUME: usize = 5;
}

/// Column indices for screener export files (0-indexed)
///
/// All 11 columns are required; a row missing any of them is dropped whole.
/// `last_sale` carries a `$` prefix and `percent_change` a `%` suffix in the
/// source, stripped before the numeric parse.
pub mod screener_column {
    pub const SYMBOL: usize = 0;
    pub const NAME: usize = 1;
    pub const LAST_SALE: usize = 2;
    pub const NET_CHANGE: usize = 3;
    pub const PERCENT_CHANGE: usize = 4;
    pub const MARKET_CAP: usize = 5;
    pub const COUNTRY: usize = 6;
    pub const IPO_YEAR: usize = 7;
    pub const VOLUME: usize = 8;
    pub const SECTOR: usize = 9;
    pub const INDUSTRY: usize = 10;
}

/// Column indices for trade ledger export files (0-indexed)
///
/// | Index | Field                  | Policy                         |
/// |-------|------------------------|--------------------------------|
/// | 0     | id                     | required presence              |
/// | 1     | account number         | required presence              |
/// | 2     | symbol                 | required presence              |
/// | 3     | (unused)               | skipped                        |
/// | 4     | side                   | BUY / SELL, case-insensitive   |
/// | 5     | executions blob        | optional, quote-coerced        |
/// | 6     | order type             | fixed vocabulary               |
/// | 7     | order state            | fixed vocabulary               |
/// | 8     | average price          | required numeric               |
/// | 9     | filled quantity        | required numeric               |
/// | 10    | created at             | required presence, raw string  |
/// | 11    | updated at             | required presence, raw string  |
/// | 12-15 | order config blobs     | optional, quote-coerced        |
pub mod ledger_column {
    pub const ID: usize = 0;
    pub const ACCOUNT_NUMBER: usize = 1;
    pub const SYMBOL: usize = 2;
    pub const SIDE: usize = 4;
    pub const EXECUTIONS: usize = 5;
    pub const ORDER_TYPE: usize = 6;
    pub const ORDER_STATE: usize = 7;
    pub const AVERAGE_PRICE: usize = 8;
    pub const FILLED_QUANTITY: usize = 9;
    pub const CREATED_AT: usize = 10;
    pub const UPDATED_AT: usize = 11;
    pub const MARKET_ORDER_CONFIG: usize = 12;
    pub const LIMIT_ORDER_CONFIG: usize = 13;
    pub const STOP_LOSS_ORDER_CONFIG: usize = 14;
    pub const STOP_LIMIT_ORDER_CONFIG: usize = 15;
}

/// Timestamp format of intraday bar rows
pub const INTRADAY_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Date format of weekly and monthly bar rows
pub const BAR_DATE_FORMAT: &str = "%Y-%m-%d";

/// Hour (naive local time) after which the current weekday's intraday data
/// is considered complete. Before the cutoff the previous trading day is
/// served instead.
pub const INTRADAY_CUTOFF_HOUR: u32 = 21;

/// Width of the weekly-bar lookback window, in weeks. Rows on the window
/// boundary are retained.
pub const WEEKLY_WINDOW_WEEKS: i64 = 4;

/// File names inside the data directory
pub const LISTINGS_FILE: &str = "listings.csv";
pub const SCREENER_FILE: &str = "screener.csv";
pub const LEDGER_FILE: &str = "ledger.csv";
pub const WATCHLIST_FILE: &str = "watchlist.json";

/// Subdirectory of the data directory holding per-symbol bar files
/// (`bars/{SYMBOL}/{interval}.csv`)
pub const BARS_DIR: &str = "bars";
