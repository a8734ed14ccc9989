use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::INTRADAY_TIMESTAMP_FORMAT;

/// Chart interval for price bars
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BarInterval {
    /// Half-hour candles for the current trading day
    Intraday,
    /// Weekly candles over the trailing four-week window
    Weekly,
    /// Monthly candles, unwindowed
    Monthly,
}

impl BarInterval {
    /// Parse from string
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "intraday" => Ok(BarInterval::Intraday),
            "weekly" => Ok(BarInterval::Weekly),
            "monthly" => Ok(BarInterval::Monthly),
            _ => Err(format!(
                "Invalid interval: '{}'. Valid values: intraday, weekly, monthly",
                s
            )),
        }
    }

    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            BarInterval::Intraday => "intraday",
            BarInterval::Weekly => "weekly",
            BarInterval::Monthly => "monthly",
        }
    }

    /// File name of this interval's series inside a symbol's bar directory
    pub fn file_name(&self) -> &'static str {
        match self {
            BarInterval::Intraday => "intraday.csv",
            BarInterval::Weekly => "weekly.csv",
            BarInterval::Monthly => "monthly.csv",
        }
    }

    /// Get all available intervals
    pub fn all() -> Vec<BarInterval> {
        vec![BarInterval::Intraday, BarInterval::Weekly, BarInterval::Monthly]
    }
}

impl fmt::Display for BarInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Default for BarInterval {
    fn default() -> Self {
        BarInterval::Intraday
    }
}

/// One price bar of any interval
///
/// Weekly and monthly bars carry an opening price; intraday exports do not,
/// so `open` stays `None` for them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    /// Bar timestamp (naive, as exported; midnight for weekly/monthly)
    #[serde(with = "bar_time")]
    pub timestamp: NaiveDateTime,

    /// Opening price (absent for intraday bars)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open: Option<f64>,

    /// Highest price
    pub high: f64,

    /// Lowest price
    pub low: f64,

    /// Closing price
    pub close: f64,

    /// Traded volume
    pub volume: f64,
}

impl PriceBar {
    /// Create an intraday bar (no opening price in the export)
    pub fn intraday(timestamp: NaiveDateTime, high: f64, low: f64, close: f64, volume: f64) -> Self {
        Self {
            timestamp,
            open: None,
            high,
            low,
            close,
            volume,
        }
    }

    /// Create a weekly or monthly bar
    pub fn period(
        timestamp: NaiveDateTime,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
    ) -> Self {
        Self {
            timestamp,
            open: Some(open),
            high,
            low,
            close,
            volume,
        }
    }
}

/// Serialize bar timestamps in the source export format
/// (`YYYY-MM-DD HH:MM:SS`) instead of serde's default ISO form.
mod bar_time {
    use chrono::NaiveDateTime;
    use serde::{self, Deserialize, Deserializer, Serializer};

    use super::INTRADAY_TIMESTAMP_FORMAT;

    pub fn serialize<S>(time: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&time.format(INTRADAY_TIMESTAMP_FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, INTRADAY_TIMESTAMP_FORMAT)
            .map_err(serde::de::Error::custom)
    }
}
