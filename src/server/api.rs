use crate::error::AppError;
use crate::models::BarInterval;
use crate::server::AppState;
use crate::services::market_calendar::is_market_session_open;
use crate::services::{SharedMarketStore, SharedWatchlistStore};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{error, instrument, warn};

/// Health and cache overview for monitoring
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub listings: usize,
    pub screener: usize,
    pub ledger: usize,
    pub bar_series: usize,
    pub bar_records: usize,
    pub watchlist: usize,
    pub market_session_open: bool,
    /// RFC 3339 timestamp of the last completed refresh cycle, if any
    pub last_refresh: Option<String>,
    pub current_time: String,
}

/// Query parameters for /bars/{symbol}
#[derive(Debug, Deserialize)]
pub struct BarsQuery {
    /// Interval: intraday (default), weekly, monthly
    pub interval: Option<String>,
}

/// Request body for POST /watchlist
#[derive(Debug, Deserialize)]
pub struct AddWatchlistRequest {
    pub symbol: String,
}

/// GET /health - store counts and refresh status
#[instrument(skip(store, watchlist))]
pub async fn health_handler(
    State(store): State<SharedMarketStore>,
    State(watchlist): State<SharedWatchlistStore>,
) -> impl IntoResponse {
    let counts = store.counts().await;
    Json(HealthResponse {
        status: "ok".to_string(),
        listings: counts.listings,
        screener: counts.screener,
        ledger: counts.ledger,
        bar_series: counts.bar_series,
        bar_records: counts.bar_records,
        watchlist: watchlist.count().await,
        market_session_open: is_market_session_open(),
        last_refresh: store.last_refresh().await.map(|time| time.to_rfc3339()),
        current_time: Utc::now().to_rfc3339(),
    })
}

/// GET /listings - the cached company listing table
#[instrument(skip(app_state))]
pub async fn get_listings_handler(State(app_state): State<AppState>) -> impl IntoResponse {
    Json(app_state.store.listings().await)
}

/// GET /screener - the cached screener table
#[instrument(skip(app_state))]
pub async fn get_screener_handler(State(app_state): State<AppState>) -> impl IntoResponse {
    Json(app_state.store.screener().await)
}

/// GET /bars/{symbol}?interval=intraday|weekly|monthly - one cached series
#[instrument(skip(app_state))]
pub async fn get_bars_handler(
    State(app_state): State<AppState>,
    Path(symbol): Path<String>,
    Query(params): Query<BarsQuery>,
) -> impl IntoResponse {
    let interval = match params.interval.as_deref() {
        None => BarInterval::default(),
        Some(raw) => match BarInterval::from_str(raw) {
            Ok(interval) => interval,
            Err(message) => {
                warn!(interval = %raw, "Invalid interval parameter");
                return (
                    StatusCode::BAD_REQUEST,
                    Json(serde_json::json!({ "error": message })),
                )
                    .into_response();
            }
        },
    };

    match app_state.store.bars(&symbol, interval).await {
        Some(bars) => Json(bars).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({
                "error": format!("No {} bars cached for '{}'", interval, symbol)
            })),
        )
            .into_response(),
    }
}

/// GET /analytics - the six ledger aggregates as one document
#[instrument(skip(app_state))]
pub async fn get_analytics_handler(State(app_state): State<AppState>) -> impl IntoResponse {
    Json(app_state.store.ledger_summary().await)
}

/// GET /watchlist - all watchlist entries
#[instrument(skip(app_state))]
pub async fn get_watchlist_handler(State(app_state): State<AppState>) -> impl IntoResponse {
    Json(app_state.watchlist.entries().await)
}

/// POST /watchlist - watch a symbol (idempotent per symbol)
#[instrument(skip(app_state))]
pub async fn add_watchlist_handler(
    State(app_state): State<AppState>,
    Json(request): Json<AddWatchlistRequest>,
) -> impl IntoResponse {
    match app_state.watchlist.add(&request.symbol).await {
        Ok(entry) => (StatusCode::CREATED, Json(entry)).into_response(),
        Err(AppError::InvalidInput(message)) => (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({ "error": message })),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "Failed to add watchlist entry");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "error": "Failed to persist watchlist" })),
            )
                .into_response()
        }
    }
}

/// DELETE /watchlist/{id} - stop watching by entry id
#[instrument(skip(app_state))]
pub async fn delete_watchlist_handler(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match app_state.watchlist.remove(&id).await {
        Ok(true) => StatusCode::NO_CONTENT.into_response(),
        Ok(false) => (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({
                "error": format!("No watchlist entry with id '{}'", id)
            })),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "Failed to remove watchlist entry");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "error": "Failed to persist watchlist" })),
            )
                .into_response()
        }
    }
}
