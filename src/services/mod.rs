pub mod bar_parser;
pub mod csv_rows;
pub mod dataset_stats;
pub mod ledger_analytics;
pub mod ledger_parser;
pub mod listing_parser;
pub mod market_calendar;
pub mod market_store;
pub mod remote_feed;
pub mod screener_parser;
pub mod watchlist_store;

pub use bar_parser::{parse_bars, parse_intraday_bars, parse_monthly_bars, parse_weekly_bars};
pub use dataset_stats::{
    get_dataset_stats, get_symbol_info, list_bar_symbols, DatasetStats, SeriesInfo, SymbolInfo,
};
pub use ledger_analytics::{LedgerAnalytics, LedgerSummary, PeriodBucket};
pub use ledger_parser::parse_ledger_entries;
pub use listing_parser::parse_company_listings;
pub use market_store::{MarketStore, SharedMarketStore, StoreCounts};
pub use remote_feed::RemoteFeed;
pub use screener_parser::parse_screener_rows;
pub use watchlist_store::{SharedWatchlistStore, WatchlistStore};
