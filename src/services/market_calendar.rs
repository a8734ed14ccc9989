//! Trading Calendar
//!
//! Calendar rules for the timezone-free price series (effective trading
//! day, weekly lookback window) plus the exchange-session check the refresh
//! worker keys its cadence on. The calendar knows weekends but no exchange
//! holidays; around a holiday the "most recent trading day" can point at a
//! closed day, a known limitation of the export format.
//!
//! Series filtering is naive on purpose: the exports carry no timezone and
//! the cutoff rules are defined on wall-clock strings. `now` is always
//! passed in by the caller; only the outermost call sites read the clock.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Utc, Weekday};
use chrono_tz::Tz;

use crate::constants::{INTRADAY_CUTOFF_HOUR, WEEKLY_WINDOW_WEEKS};

/// Exchange session configuration for the refresh worker
pub struct MarketSession {
    pub open_hour: u32,      // 9 for 9:30am open
    pub open_minute: u32,    // 30
    pub close_hour: u32,     // 16 for 4pm close
    pub timezone: &'static str, // "America/New_York"
    pub weekdays_only: bool, // true for Monday-Friday only
}

impl Default for MarketSession {
    fn default() -> Self {
        Self {
            open_hour: 9,
            open_minute: 30,
            close_hour: 16,
            timezone: "America/New_York",
            weekdays_only: true,
        }
    }
}

/// Check whether a date is a trading day (weekend-only calendar)
pub fn is_trading_day(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// The most recent day with a complete intraday series, relative to `now`
///
/// The current day's intraday export is complete only after the 21:00
/// cutoff. Strictly after the cutoff on a trading day the effective day is
/// today; in every other case it is the most recent trading day strictly
/// before today, stepping back over weekends.
pub fn effective_trading_day(now: NaiveDateTime) -> NaiveDate {
    let today = now.date();
    let cutoff = NaiveTime::from_hms_opt(INTRADAY_CUTOFF_HOUR, 0, 0).unwrap();

    if now.time() > cutoff && is_trading_day(today) {
        return today;
    }

    let mut day = today - Duration::days(1);
    while !is_trading_day(day) {
        day -= Duration::days(1);
    }
    day
}

/// First retained date of the weekly-bar window (inclusive)
///
/// Rows dated exactly on the returned date survive the filter; there is no
/// upper bound, so future-dated rows pass through.
pub fn weekly_window_start(today: NaiveDate) -> NaiveDate {
    today - Duration::weeks(WEEKLY_WINDOW_WEEKS)
}

/// Check if the exchange session is currently open
pub fn is_market_session_open() -> bool {
    let config = MarketSession::default();

    let tz: Tz = match config.timezone.parse() {
        Ok(tz) => tz,
        Err(e) => {
            tracing::warn!("Failed to parse timezone '{}': {}", config.timezone, e);
            return false; // Default to closed if timezone parsing fails
        }
    };

    let now_local = Utc::now().with_timezone(&tz);

    if config.weekdays_only && !is_trading_day(now_local.date_naive()) {
        return false;
    }

    let after_open =
        (now_local.hour(), now_local.minute()) >= (config.open_hour, config.open_minute);
    after_open && now_local.hour() < config.close_hour
}

/// Get appropriate refresh interval based on the exchange session
///
/// In session the worker polls frequently; out of session (nights and
/// weekends) it relaxes.
pub fn get_refresh_interval(
    session_interval: std::time::Duration,
    off_session_interval: std::time::Duration,
) -> std::time::Duration {
    if is_market_session_open() {
        session_interval
    } else {
        off_session_interval
    }
}
