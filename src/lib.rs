//! Sakura Tours booking service
//!
//! JSON API for the tour-booking site: catalog, price quotes, bookings,
//! pickup-location search, contact inquiries, and reviews. Persistence
//! lives in the backing store; the pricing engine in [`pricing`] is the
//! only component with real business rules.

pub mod cache;
pub mod db;
pub mod email;
pub mod error;
pub mod models;
pub mod pricing;
pub mod routes;

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use sqlx::PgPool;
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use crate::cache::{AppCache, CacheStats};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub cache: AppCache,
}

/// Build the application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/cache/stats", get(cache_stats))
        .route("/api/tours", get(routes::tours::list))
        .route("/api/tours/:id", get(routes::tours::detail))
        .route("/api/tours/:id/reviews", get(routes::reviews::list_for_tour))
        .route("/api/quotes", post(routes::quotes::create))
        .route("/api/bookings", post(routes::bookings::create))
        .route("/api/bookings/:booking_number", get(routes::bookings::lookup))
        .route(
            "/api/bookings/:booking_number/coupon",
            post(routes::bookings::count_coupon),
        )
        .route("/api/locations/search", get(routes::locations::search))
        .route("/api/contact", post(routes::contact::create))
        .route("/api/reviews", post(routes::reviews::create))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn cache_stats(State(state): State<AppState>) -> Json<CacheStats> {
    Json(state.cache.stats())
}
