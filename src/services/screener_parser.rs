//! Screener Export Parser
//!
//! Eleven fixed columns, all required: any absent column or failed numeric
//! conversion drops the whole row (no partial screener records). Two
//! columns arrive decorated and are stored stripped: `last_sale` with a
//! leading `$`, `percent_change` with a trailing `%`.

use csv::StringRecord;
use std::io::Read;

use crate::constants::screener_column;
use crate::error::Result;
use crate::models::ScreenerRow;
use crate::services::csv_rows;

/// Parse a screener CSV stream, preserving source order
pub fn parse_screener_rows<R: Read>(source: R) -> Result<Vec<ScreenerRow>> {
    csv_rows::parse_rows(source, extract_screener_row)
}

fn extract_screener_row(record: &StringRecord) -> Option<ScreenerRow> {
    Some(ScreenerRow {
        symbol: record.get(screener_column::SYMBOL)?.to_string(),
        name: record.get(screener_column::NAME)?.to_string(),
        last_sale: parse_dollar(record.get(screener_column::LAST_SALE)?)?,
        net_change: record.get(screener_column::NET_CHANGE)?.parse().ok()?,
        percent_change: parse_percent(record.get(screener_column::PERCENT_CHANGE)?)?,
        market_cap: record.get(screener_column::MARKET_CAP)?.parse().ok()?,
        country: record.get(screener_column::COUNTRY)?.to_string(),
        ipo_year: record.get(screener_column::IPO_YEAR)?.parse().ok()?,
        volume: record.get(screener_column::VOLUME)?.parse().ok()?,
        sector: record.get(screener_column::SECTOR)?.to_string(),
        industry: record.get(screener_column::INDUSTRY)?.to_string(),
    })
}

/// Strip the `$` decoration before the numeric parse. Undecorated input
/// parses as-is.
fn parse_dollar(raw: &str) -> Option<f64> {
    raw.strip_prefix('$').unwrap_or(raw).parse().ok()
}

/// Strip the `%` decoration before the numeric parse
fn parse_percent(raw: &str) -> Option<f64> {
    raw.strip_suffix('%').unwrap_or(raw).parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str =
        "Symbol,Name,Last Sale,Net Change,% Change,Market Cap,Country,IPO Year,Volume,Sector,Industry\n";

    fn row(fields: &str) -> String {
        format!("{}{}\n", HEADER, fields)
    }

    #[test]
    fn test_decorated_numbers_are_stripped() {
        let data = row("AAPL,Apple Inc.,$123.45,1.02,12.3%,2900000000000,United States,1980,51000000,Technology,Consumer Electronics");
        let rows = parse_screener_rows(data.as_bytes()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].last_sale, 123.45);
        assert_eq!(rows[0].percent_change, 12.3);
        assert_eq!(rows[0].net_change, 1.02);
        assert_eq!(rows[0].ipo_year, 1980);
        assert_eq!(rows[0].volume, 51_000_000);
    }

    #[test]
    fn test_negative_percent_change() {
        let data = row("XOM,Exxon,$104.20,-0.84,-0.8%,420000000000,United States,1920,18000000,Energy,Oil & Gas");
        let rows = parse_screener_rows(data.as_bytes()).unwrap();
        assert_eq!(rows[0].percent_change, -0.8);
        assert_eq!(rows[0].net_change, -0.84);
    }

    #[test]
    fn test_undecorated_numbers_still_parse() {
        let data = row("T,Test,123.45,1.0,2.5,1000,US,2000,10,Misc,Misc");
        let rows = parse_screener_rows(data.as_bytes()).unwrap();
        assert_eq!(rows[0].last_sale, 123.45);
        assert_eq!(rows[0].percent_change, 2.5);
    }

    #[test]
    fn test_blank_ipo_year_drops_the_whole_row() {
        let data = row("NEW,NewCo,$10.00,0.1,1.0%,500000,US,,1000,Tech,Software");
        let rows = parse_screener_rows(data.as_bytes()).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_short_row_is_dropped_entirely() {
        let data = row("AAPL,Apple Inc.,$123.45,1.02,12.3%");
        let rows = parse_screener_rows(data.as_bytes()).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_quoted_name_with_comma_keeps_alignment() {
        let data = row("BRK,\"Berkshire Hathaway, Inc.\",$400.00,2.0,0.5%,900000000000,United States,1996,3000000,Financials,Insurance");
        let rows = parse_screener_rows(data.as_bytes()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "Berkshire Hathaway, Inc.");
        assert_eq!(rows[0].industry, "Insurance");
    }

    #[test]
    fn test_source_order_is_preserved() {
        let data = format!(
            "{}{}\n{}\n",
            HEADER,
            "ZZZ,Last Alphabetically,$1.00,0,0%,10,US,2001,1,A,B",
            "AAA,First Alphabetically,$1.00,0,0%,10,US,2001,1,A,B"
        );
        let rows = parse_screener_rows(data.as_bytes()).unwrap();
        assert_eq!(rows[0].symbol, "ZZZ");
        assert_eq!(rows[1].symbol, "AAA");
    }
}
