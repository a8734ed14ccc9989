pub mod api;

use crate::services::{SharedMarketStore, SharedWatchlistStore};
use axum::{
    extract::FromRef,
    routing::{delete, get},
    Router,
};
use std::net::SocketAddr;
use tower_http::cors::{Any, CorsLayer};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: SharedMarketStore,
    pub watchlist: SharedWatchlistStore,
}

// FromRef implementations to extract specific state components
impl FromRef<AppState> for SharedMarketStore {
    fn from_ref(app_state: &AppState) -> SharedMarketStore {
        app_state.store.clone()
    }
}

impl FromRef<AppState> for SharedWatchlistStore {
    fn from_ref(app_state: &AppState) -> SharedWatchlistStore {
        app_state.watchlist.clone()
    }
}

/// Start the axum server
pub async fn serve(
    store: SharedMarketStore,
    watchlist: SharedWatchlistStore,
    port: u16,
) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!("Starting stocklens server");

    let app_state = AppState { store, watchlist };

    // The API is read-mostly and unauthenticated; any origin may call it
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::DELETE,
            axum::http::Method::OPTIONS,
        ])
        .allow_headers(Any);

    tracing::info!("Registering routes:");
    tracing::info!("  GET    /health");
    tracing::info!("  GET    /listings");
    tracing::info!("  GET    /screener");
    tracing::info!("  GET    /bars/{{symbol}}?interval=intraday|weekly|monthly");
    tracing::info!("  GET    /analytics");
    tracing::info!("  GET    /watchlist");
    tracing::info!("  POST   /watchlist");
    tracing::info!("  DELETE /watchlist/{{id}}");

    let app = Router::new()
        .route("/health", get(api::health_handler))
        .route("/listings", get(api::get_listings_handler))
        .route("/screener", get(api::get_screener_handler))
        .route("/bars/{symbol}", get(api::get_bars_handler))
        .route("/analytics", get(api::get_analytics_handler))
        .route(
            "/watchlist",
            get(api::get_watchlist_handler).post(api::add_watchlist_handler),
        )
        .route("/watchlist/{id}", delete(api::delete_watchlist_handler))
        .layer(cors)
        .with_state(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!(%addr, "Server listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
