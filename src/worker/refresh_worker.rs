use crate::models::BarInterval;
use crate::services::market_calendar::{get_refresh_interval, is_market_session_open};
use crate::services::{RemoteFeed, SharedMarketStore, SharedWatchlistStore};
use chrono::Local;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{error, info, instrument, warn};

// In session: 60 seconds (active market)
// Out of session: 15 minutes (market closed, relaxed refresh)
const SESSION_INTERVAL_SECS: u64 = 60;
const OFF_SESSION_INTERVAL_SECS: u64 = 900; // 15 minutes

#[instrument(skip(store, watchlist, feed))]
pub async fn run(store: SharedMarketStore, watchlist: SharedWatchlistStore, feed: RemoteFeed) {
    info!(
        "Starting refresh worker - In session: {}s, Out of session: {}s, feed: {}",
        SESSION_INTERVAL_SECS,
        OFF_SESSION_INTERVAL_SECS,
        feed.base_url()
    );

    let mut iteration_count = 0u64;

    loop {
        iteration_count += 1;
        let loop_start = std::time::Instant::now();
        let in_session = is_market_session_open();

        info!(
            iteration = iteration_count,
            in_session = in_session,
            "Refresh worker: Starting cycle"
        );

        // Step 1: Refresh the three wholesale tables
        match feed.fetch_listings().await {
            Ok(listings) => {
                info!(iteration = iteration_count, count = listings.len(), "Refresh worker: Listings refreshed");
                store.replace_listings(listings).await;
            }
            Err(e) => {
                error!(iteration = iteration_count, error = %e, "Refresh worker: Listings refresh failed");
            }
        }

        match feed.fetch_screener().await {
            Ok(screener) => {
                info!(iteration = iteration_count, count = screener.len(), "Refresh worker: Screener refreshed");
                store.replace_screener(screener).await;
            }
            Err(e) => {
                error!(iteration = iteration_count, error = %e, "Refresh worker: Screener refresh failed");
            }
        }

        match feed.fetch_ledger().await {
            Ok(ledger) => {
                info!(iteration = iteration_count, count = ledger.len(), "Refresh worker: Ledger refreshed");
                store.replace_ledger(ledger).await;
            }
            Err(e) => {
                error!(iteration = iteration_count, error = %e, "Refresh worker: Ledger refresh failed");
            }
        }

        // Step 2: Refresh bar series for watched symbols only; the full
        // listing table would be thousands of fetches per cycle
        let symbols = watchlist.symbols().await;
        let now = Local::now().naive_local();
        for symbol in &symbols {
            for interval in BarInterval::all() {
                match feed.fetch_bars(symbol, interval, now).await {
                    Ok(bars) => {
                        store.replace_bars(symbol, interval, bars).await;
                    }
                    Err(e) => {
                        warn!(
                            iteration = iteration_count,
                            symbol = %symbol,
                            interval = %interval,
                            error = %e,
                            "Refresh worker: Bar refresh failed"
                        );
                    }
                }
            }
        }

        // Step 3: Stamp the snapshot
        store.mark_refreshed().await;

        let loop_duration = loop_start.elapsed();
        let refresh_interval = get_refresh_interval(
            Duration::from_secs(SESSION_INTERVAL_SECS),
            Duration::from_secs(OFF_SESSION_INTERVAL_SECS),
        );

        info!(
            iteration = iteration_count,
            watched_symbols = symbols.len(),
            loop_duration_secs = loop_duration.as_secs_f64(),
            next_refresh_secs = refresh_interval.as_secs(),
            in_session = in_session,
            "Refresh worker: Cycle completed"
        );

        sleep(refresh_interval).await;
    }
}
