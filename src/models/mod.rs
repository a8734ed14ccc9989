mod bar;
mod ledger;
mod listing;
mod screener;
mod watchlist;

pub use bar::{BarInterval, PriceBar};
pub use ledger::{OrderState, OrderType, TradeLedgerEntry, TradeSide};
pub use listing::CompanyListing;
pub use screener::ScreenerRow;
pub use watchlist::WatchlistEntry;

/// Bar series for a single symbol and interval
pub type BarSeries = Vec<PriceBar>;
