use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One user-owned watchlist entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchlistEntry {
    /// Generated id, stable across restarts
    pub id: String,

    /// Ticker symbol, stored trimmed and uppercased
    pub symbol: String,
}

impl WatchlistEntry {
    /// Create an entry with a fresh id for a normalized symbol
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            symbol: symbol.into(),
        }
    }
}
