//! Company Listing Parser
//!
//! `symbol,name,exchange` rows. Presence is the only requirement: a row
//! missing a column is dropped, an empty-but-present column is kept as an
//! empty string. Source order is preserved.

use csv::StringRecord;
use std::io::Read;

use crate::constants::listing_column;
use crate::error::Result;
use crate::models::CompanyListing;
use crate::services::csv_rows;

/// Parse a company listing CSV stream
pub fn parse_company_listings<R: Read>(source: R) -> Result<Vec<CompanyListing>> {
    csv_rows::parse_rows(source, extract_listing)
}

fn extract_listing(record: &StringRecord) -> Option<CompanyListing> {
    Some(CompanyListing {
        symbol: record.get(listing_column::SYMBOL)?.to_string(),
        name: record.get(listing_column::NAME)?.to_string(),
        exchange: record.get(listing_column::EXCHANGE)?.to_string(),
    })
}
