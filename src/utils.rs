use std::path::PathBuf;

/// Get data directory from environment variable or use default
pub fn get_data_dir() -> PathBuf {
    std::env::var("STOCKLENS_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("data"))
}

/// Path of the persisted watchlist document inside the data directory
pub fn get_watchlist_path() -> PathBuf {
    get_data_dir().join(crate::constants::WATCHLIST_FILE)
}

/// Base URL of the CSV feed, if one is configured
pub fn get_feed_url() -> Option<String> {
    std::env::var("STOCKLENS_FEED_URL").ok().filter(|v| !v.trim().is_empty())
}
