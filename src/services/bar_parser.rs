//! Price Bar Parsers
//!
//! Three bar families share one record shape but differ in layout, required
//! fields, temporal filter, and sort:
//!
//! - intraday: `timestamp,_,high,low,close,volume`; only timestamp and close
//!   are required; filtered to the effective trading day; sorted by clock
//!   hour.
//! - weekly: `date,open,high,low,close,volume`; four prices required;
//!   filtered to the trailing four-week window; sorted by date.
//! - monthly: same layout as weekly; unfiltered; sorted by date.

use chrono::{NaiveDate, NaiveDateTime, Timelike};
use csv::StringRecord;
use std::io::Read;

use crate::constants::{intraday_column, period_column, BAR_DATE_FORMAT, INTRADAY_TIMESTAMP_FORMAT};
use crate::error::Result;
use crate::models::{BarInterval, PriceBar};
use crate::services::csv_rows::{self, optional_f64, required_f64};
use crate::services::market_calendar;

/// Parse an intraday bar stream, keeping only the effective trading day
///
/// The sort key is the clock hour alone. After the filter every surviving
/// row shares one calendar date, which is what makes that key sufficient;
/// the sort is stable, so rows within the same hour keep source order.
pub fn parse_intraday_bars<R: Read>(source: R, now: NaiveDateTime) -> Result<Vec<PriceBar>> {
    let effective_day = market_calendar::effective_trading_day(now);
    let mut bars = csv_rows::parse_rows(source, extract_intraday_bar)?;
    bars.retain(|bar| bar.timestamp.date() == effective_day);
    bars.sort_by_key(|bar| bar.timestamp.hour());
    Ok(bars)
}

/// Parse a weekly bar stream, keeping the trailing four-week window
///
/// Rows dated exactly on the window start survive; future-dated rows are
/// not filtered out.
pub fn parse_weekly_bars<R: Read>(source: R, today: NaiveDate) -> Result<Vec<PriceBar>> {
    let window_start = market_calendar::weekly_window_start(today);
    let mut bars = csv_rows::parse_rows(source, extract_period_bar)?;
    bars.retain(|bar| bar.timestamp.date() >= window_start);
    bars.sort_by_key(|bar| bar.timestamp.date());
    Ok(bars)
}

/// Parse a monthly bar stream (no temporal filter)
pub fn parse_monthly_bars<R: Read>(source: R) -> Result<Vec<PriceBar>> {
    let mut bars = csv_rows::parse_rows(source, extract_period_bar)?;
    bars.sort_by_key(|bar| bar.timestamp.date());
    Ok(bars)
}

/// Parse a bar stream of any interval with the filters that interval uses
pub fn parse_bars<R: Read>(
    source: R,
    interval: BarInterval,
    now: NaiveDateTime,
) -> Result<Vec<PriceBar>> {
    match interval {
        BarInterval::Intraday => parse_intraday_bars(source, now),
        BarInterval::Weekly => parse_weekly_bars(source, now.date()),
        BarInterval::Monthly => parse_monthly_bars(source),
    }
}

fn extract_intraday_bar(record: &StringRecord) -> Option<PriceBar> {
    let raw_time = record.get(intraday_column::TIMESTAMP)?;
    let timestamp = NaiveDateTime::parse_from_str(raw_time, INTRADAY_TIMESTAMP_FORMAT).ok()?;
    let close = required_f64(record, intraday_column::CLOSE)?;
    Some(PriceBar::intraday(
        timestamp,
        optional_f64(record, intraday_column::HIGH),
        optional_f64(record, intraday_column::LOW),
        close,
        optional_f64(record, intraday_column::VOLUME),
    ))
}

fn extract_period_bar(record: &StringRecord) -> Option<PriceBar> {
    let raw_date = record.get(period_column::DATE)?;
    let date = NaiveDate::parse_from_str(raw_date, BAR_DATE_FORMAT).ok()?;
    Some(PriceBar::period(
        date.and_hms_opt(0, 0, 0)?,
        required_f64(record, period_column::OPEN)?,
        required_f64(record, period_column::HIGH)?,
        required_f64(record, period_column::LOW)?,
        required_f64(record, period_column::CLOSE)?,
        optional_f64(record, period_column::VOLUME),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    // Thursday morning: the effective trading day is Wednesday 2024-03-13
    fn thursday_morning() -> NaiveDateTime {
        at(2024, 3, 14, 10, 0)
    }

    #[test]
    fn test_intraday_keeps_only_the_effective_day() {
        let data = "\
timestamp,session,high,low,close,volume
2024-03-13 10:30:00,reg,11.0,9.0,10.0,100
2024-03-14 10:30:00,reg,12.0,10.0,11.0,200
2024-03-12 15:30:00,reg,10.0,8.0,9.0,300
";
        let bars = parse_intraday_bars(data.as_bytes(), thursday_morning()).unwrap();
        assert_eq!(bars.len(), 1);
        assert_eq!(bars[0].close, 10.0);
        assert_eq!(bars[0].timestamp, at(2024, 3, 13, 10, 30));
    }

    #[test]
    fn test_intraday_after_cutoff_serves_today() {
        let data = "\
timestamp,session,high,low,close,volume
2024-03-14 10:30:00,reg,12.0,10.0,11.0,200
2024-03-13 10:30:00,reg,11.0,9.0,10.0,100
";
        let bars = parse_intraday_bars(data.as_bytes(), at(2024, 3, 14, 21, 30)).unwrap();
        assert_eq!(bars.len(), 1);
        assert_eq!(bars[0].close, 11.0);
    }

    #[test]
    fn test_intraday_sorts_by_clock_hour_not_full_timestamp() {
        // Same hour keeps source order (10:45 stays before 10:15); a full
        // timestamp sort would put 10:15 first.
        let data = "\
timestamp,session,high,low,close,volume
2024-03-13 10:45:00,reg,1,1,1.0,0
2024-03-13 10:15:00,reg,1,1,2.0,0
2024-03-13 09:50:00,reg,1,1,3.0,0
";
        let bars = parse_intraday_bars(data.as_bytes(), thursday_morning()).unwrap();
        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
        assert_eq!(closes, vec![3.0, 1.0, 2.0]);
    }

    #[test]
    fn test_intraday_close_is_required_but_high_low_default() {
        let data = "\
timestamp,session,high,low,close,volume
2024-03-13 10:30:00,reg,,,10.0,
2024-03-13 11:30:00,reg,11.0,9.0,,100
";
        let bars = parse_intraday_bars(data.as_bytes(), thursday_morning()).unwrap();
        assert_eq!(bars.len(), 1);
        assert_eq!(bars[0].high, 0.0);
        assert_eq!(bars[0].low, 0.0);
        assert_eq!(bars[0].volume, 0.0);
        assert_eq!(bars[0].open, None);
    }

    #[test]
    fn test_intraday_bad_timestamp_drops_only_that_row() {
        let data = "\
timestamp,session,high,low,close,volume
13/03/2024 10:30,reg,11.0,9.0,10.0,100
2024-03-13 11:30:00,reg,11.0,9.0,10.5,100
";
        let bars = parse_intraday_bars(data.as_bytes(), thursday_morning()).unwrap();
        assert_eq!(bars.len(), 1);
        assert_eq!(bars[0].close, 10.5);
    }

    #[test]
    fn test_weekly_window_boundary_is_inclusive() {
        // today = 2024-03-15, window start = 2024-02-16
        let data = "\
date,open,high,low,close,volume
2024-02-16,1,2,1,1.5,10
2024-02-15,1,2,1,1.4,10
2024-03-11,1,2,1,1.6,10
";
        let today = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let bars = parse_weekly_bars(data.as_bytes(), today).unwrap();
        let dates: Vec<NaiveDate> = bars.iter().map(|b| b.timestamp.date()).collect();
        assert_eq!(
            dates,
            vec![
                NaiveDate::from_ymd_opt(2024, 2, 16).unwrap(),
                NaiveDate::from_ymd_opt(2024, 3, 11).unwrap(),
            ]
        );
    }

    #[test]
    fn test_weekly_future_rows_are_retained() {
        let data = "\
date,open,high,low,close,volume
2024-04-01,1,2,1,1.5,10
2024-03-11,1,2,1,1.6,10
";
        let today = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let bars = parse_weekly_bars(data.as_bytes(), today).unwrap();
        assert_eq!(bars.len(), 2);
        // sorted ascending by date
        assert!(bars[0].timestamp < bars[1].timestamp);
    }

    #[test]
    fn test_weekly_requires_all_four_prices() {
        let data = "\
date,open,high,low,close,volume
2024-03-11,,2,1,1.5,10
2024-03-12,1,2,1,1.6,10
";
        let today = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let bars = parse_weekly_bars(data.as_bytes(), today).unwrap();
        assert_eq!(bars.len(), 1);
        assert_eq!(bars[0].open, Some(1.0));
    }

    #[test]
    fn test_monthly_is_unfiltered_and_sorted() {
        let data = "\
date,open,high,low,close,volume
2021-06-01,1,2,1,1.5,10
2019-01-01,1,2,1,1.2,10
2024-02-01,1,2,1,1.8,
";
        let bars = parse_monthly_bars(data.as_bytes()).unwrap();
        assert_eq!(bars.len(), 3);
        assert_eq!(bars[0].timestamp.date(), NaiveDate::from_ymd_opt(2019, 1, 1).unwrap());
        assert_eq!(bars[2].volume, 0.0);
    }

    #[test]
    fn test_parse_bars_dispatches_by_interval() {
        let data = "\
date,open,high,low,close,volume
2024-03-11,1,2,1,1.6,10
";
        let bars = parse_bars(data.as_bytes(), BarInterval::Monthly, thursday_morning()).unwrap();
        assert_eq!(bars.len(), 1);
    }
}
