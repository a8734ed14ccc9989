use serde::{Deserialize, Serialize};
use std::fmt;

/// Order side of a ledger entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TradeSide {
    Buy,
    Sell,
}

impl TradeSide {
    /// Parse from string (case-insensitive)
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_uppercase().as_str() {
            "BUY" => Ok(TradeSide::Buy),
            "SELL" => Ok(TradeSide::Sell),
            _ => Err(format!("Invalid side: '{}'. Valid values: BUY, SELL", s)),
        }
    }

    /// Convert to the export's string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeSide::Buy => "BUY",
            TradeSide::Sell => "SELL",
        }
    }
}

impl fmt::Display for TradeSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Order type of a ledger entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderType {
    Market,
    Limit,
    StopLimit,
    StopLoss,
}

impl OrderType {
    /// Parse from string (case-insensitive)
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_uppercase().as_str() {
            "MARKET" => Ok(OrderType::Market),
            "LIMIT" => Ok(OrderType::Limit),
            "STOP_LIMIT" => Ok(OrderType::StopLimit),
            "STOP_LOSS" => Ok(OrderType::StopLoss),
            _ => Err(format!(
                "Invalid order type: '{}'. Valid values: MARKET, LIMIT, STOP_LIMIT, STOP_LOSS",
                s
            )),
        }
    }

    /// Convert to the export's string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderType::Market => "MARKET",
            OrderType::Limit => "LIMIT",
            OrderType::StopLimit => "STOP_LIMIT",
            OrderType::StopLoss => "STOP_LOSS",
        }
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Lifecycle state of a ledger entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderState {
    Open,
    Closed,
    Cancelled,
}

impl OrderState {
    /// Parse from string (case-insensitive)
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_uppercase().as_str() {
            "OPEN" => Ok(OrderState::Open),
            "CLOSED" => Ok(OrderState::Closed),
            "CANCELLED" => Ok(OrderState::Cancelled),
            _ => Err(format!(
                "Invalid order state: '{}'. Valid values: OPEN, CLOSED, CANCELLED",
                s
            )),
        }
    }

    /// Convert to the export's string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderState::Open => "OPEN",
            OrderState::Closed => "CLOSED",
            OrderState::Cancelled => "CANCELLED",
        }
    }
}

impl fmt::Display for OrderState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One executed or pending order from the trade ledger export
///
/// `created_at`/`updated_at` are kept as the export's raw strings: the
/// analytics aggregates are defined on fixed substrings of them (date,
/// year-month, clock time), so no datetime parsing happens at this layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeLedgerEntry {
    /// Order id from the brokerage export
    pub id: String,

    /// Brokerage account number
    pub account_number: String,

    /// Ticker symbol
    pub symbol: String,

    /// Order side
    pub side: TradeSide,

    /// Raw executions blob, single quotes rewritten to double quotes
    pub executions: String,

    /// Order type
    pub order_type: OrderType,

    /// Lifecycle state
    pub state: OrderState,

    /// Average fill price, dollars
    pub average_price: f64,

    /// Filled quantity, shares
    pub filled_quantity: f64,

    /// Creation timestamp, raw ISO-like string
    pub created_at: String,

    /// Last-update timestamp, raw ISO-like string
    pub updated_at: String,

    /// Market order config blob (empty when the column is absent)
    pub market_order_config: String,

    /// Limit order config blob
    pub limit_order_config: String,

    /// Stop-loss order config blob
    pub stop_loss_order_config: String,

    /// Stop-limit order config blob
    pub stop_limit_order_config: String,
}

impl TradeLedgerEntry {
    /// Notional amount of the entry (price x quantity)
    pub fn amount(&self) -> f64 {
        self.average_price * self.filled_quantity
    }
}
