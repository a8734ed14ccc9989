use serde::{Deserialize, Serialize};

/// One exchange-listed company
///
/// All three fields are required-presence strings: a source row missing a
/// column is dropped, but a present-and-empty column is kept as `""`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyListing {
    /// Ticker symbol
    pub symbol: String,

    /// Company name (may be empty in the source)
    pub name: String,

    /// Listing exchange
    pub exchange: String,
}

impl CompanyListing {
    /// Create a new listing record
    pub fn new(symbol: impl Into<String>, name: impl Into<String>, exchange: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            name: name.into(),
            exchange: exchange.into(),
        }
    }
}
