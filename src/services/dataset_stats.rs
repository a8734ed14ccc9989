use crate::constants::{BARS_DIR, LEDGER_FILE, LISTINGS_FILE, SCREENER_FILE};
use crate::models::BarInterval;
use std::fs;
use std::path::Path;

/// Overall local dataset statistics
#[derive(Debug, Clone)]
pub struct DatasetStats {
    pub listings_rows: Option<usize>,
    pub screener_rows: Option<usize>,
    pub ledger_rows: Option<usize>,
    pub bar_symbols: usize,
    pub has_data: bool,
}

/// Bar series information for a single symbol
#[derive(Debug, Clone)]
pub struct SymbolInfo {
    pub symbol: String,
    pub intraday: Option<SeriesInfo>,
    pub weekly: Option<SeriesInfo>,
    pub monthly: Option<SeriesInfo>,
}

/// Information about one bar series file
#[derive(Debug, Clone)]
pub struct SeriesInfo {
    pub record_count: usize,
    pub first_date: String,
    pub last_date: String,
    pub last_close: f64,
}

/// Get overall statistics for the local dataset
pub fn get_dataset_stats(data_dir: &Path) -> Result<DatasetStats, Box<dyn std::error::Error>> {
    if !data_dir.exists() {
        return Ok(DatasetStats {
            listings_rows: None,
            screener_rows: None,
            ledger_rows: None,
            bar_symbols: 0,
            has_data: false,
        });
    }

    let listings_rows = count_data_rows(&data_dir.join(LISTINGS_FILE))?;
    let screener_rows = count_data_rows(&data_dir.join(SCREENER_FILE))?;
    let ledger_rows = count_data_rows(&data_dir.join(LEDGER_FILE))?;

    let bars_dir = data_dir.join(BARS_DIR);
    let bar_symbols = if bars_dir.is_dir() {
        fs::read_dir(bars_dir)?
            .filter_map(|e| e.ok())
            .filter(|e| e.path().is_dir())
            .count()
    } else {
        0
    };

    let has_data = listings_rows.is_some()
        || screener_rows.is_some()
        || ledger_rows.is_some()
        || bar_symbols > 0;

    Ok(DatasetStats {
        listings_rows,
        screener_rows,
        ledger_rows,
        bar_symbols,
        has_data,
    })
}

/// List the symbols that have a bar directory, sorted
pub fn list_bar_symbols(data_dir: &Path) -> Result<Vec<String>, Box<dyn std::error::Error>> {
    let bars_dir = data_dir.join(BARS_DIR);
    if !bars_dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut symbols: Vec<String> = fs::read_dir(bars_dir)?
        .filter_map(|e| e.ok())
        .filter(|e| e.path().is_dir())
        .map(|e| e.file_name().to_string_lossy().to_string())
        .collect();
    symbols.sort();
    Ok(symbols)
}

/// Get detailed bar information for a specific symbol
pub fn get_symbol_info(data_dir: &Path, symbol: &str) -> Result<SymbolInfo, Box<dyn std::error::Error>> {
    let symbol_path = data_dir.join(BARS_DIR).join(symbol);

    if !symbol_path.exists() {
        return Err(format!("Symbol '{}' not found", symbol).into());
    }

    Ok(SymbolInfo {
        symbol: symbol.to_string(),
        intraday: read_series_info(&symbol_path.join(BarInterval::Intraday.file_name()))?,
        weekly: read_series_info(&symbol_path.join(BarInterval::Weekly.file_name()))?,
        monthly: read_series_info(&symbol_path.join(BarInterval::Monthly.file_name()))?,
    })
}

/// Count data rows of a CSV file without parsing it; `None` when absent
fn count_data_rows(path: &Path) -> Result<Option<usize>, Box<dyn std::error::Error>> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    Ok(Some(content.lines().count().saturating_sub(1)))
}

/// Read header-line information about one bar series file
fn read_series_info(path: &Path) -> Result<Option<SeriesInfo>, Box<dyn std::error::Error>> {
    if !path.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(path)?;
    let lines: Vec<&str> = content.lines().collect();

    if lines.len() <= 1 {
        return Ok(None);
    }

    let record_count = lines.len() - 1;
    let first_line = lines.get(1).unwrap_or(&"");
    let last_line = lines.last().unwrap_or(&"");

    Ok(Some(SeriesInfo {
        record_count,
        first_date: extract_date(first_line),
        last_date: extract_date(last_line),
        last_close: extract_close(last_line),
    }))
}

/// Extract the date part of a bar CSV line (timestamp is column 0)
fn extract_date(line: &str) -> String {
    let parts: Vec<&str> = line.split(',').collect();
    if !parts.is_empty() {
        parts[0].split_whitespace().next().unwrap_or("N/A").to_string()
    } else {
        "N/A".to_string()
    }
}

/// Extract the closing price of a bar CSV line (close is column 4)
fn extract_close(line: &str) -> f64 {
    let parts: Vec<&str> = line.split(',').collect();
    if parts.len() > 4 {
        parts[4].parse().unwrap_or(0.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_date_drops_clock_time() {
        assert_eq!(extract_date("2024-03-13 10:30:00,x,11,9,10,100"), "2024-03-13");
        assert_eq!(extract_date("2024-03-13,1,2,1,1.5,10"), "2024-03-13");
        assert_eq!(extract_date(""), "N/A");
    }

    #[test]
    fn test_extract_close_reads_column_four() {
        assert_eq!(extract_close("2024-03-13,1,2,1,1.5,10"), 1.5);
        assert_eq!(extract_close("2024-03-13,1,2"), 0.0);
        assert_eq!(extract_close("2024-03-13,1,2,1,n/a,10"), 0.0);
    }

    #[test]
    fn test_missing_dataset_reports_no_data() {
        let dir = tempfile::tempdir().unwrap();
        let stats = get_dataset_stats(&dir.path().join("nope")).unwrap();
        assert!(!stats.has_data);
        assert_eq!(stats.bar_symbols, 0);
        assert!(stats.listings_rows.is_none());
    }

    #[test]
    fn test_dataset_stats_counts_rows_and_symbols() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(LISTINGS_FILE),
            "symbol,name,exchange\nAAPL,Apple,NASDAQ\nMSFT,Microsoft,NASDAQ\n",
        )
        .unwrap();
        std::fs::create_dir_all(dir.path().join(BARS_DIR).join("AAPL")).unwrap();

        let stats = get_dataset_stats(dir.path()).unwrap();
        assert!(stats.has_data);
        assert_eq!(stats.listings_rows, Some(2));
        assert_eq!(stats.screener_rows, None);
        assert_eq!(stats.bar_symbols, 1);
    }

    #[test]
    fn test_symbol_info_reads_series_files() {
        let dir = tempfile::tempdir().unwrap();
        let aapl = dir.path().join(BARS_DIR).join("AAPL");
        std::fs::create_dir_all(&aapl).unwrap();
        std::fs::write(
            aapl.join("monthly.csv"),
            "date,open,high,low,close,volume\n2024-01-01,1,2,1,1.5,10\n2024-02-01,1,2,1,1.8,10\n",
        )
        .unwrap();

        let info = get_symbol_info(dir.path(), "AAPL").unwrap();
        assert!(info.intraday.is_none());
        let monthly = info.monthly.unwrap();
        assert_eq!(monthly.record_count, 2);
        assert_eq!(monthly.first_date, "2024-01-01");
        assert_eq!(monthly.last_date, "2024-02-01");
        assert_eq!(monthly.last_close, 1.8);
    }
}
