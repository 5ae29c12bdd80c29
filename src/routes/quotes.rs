//! Price quote route handler
//!
//! Consumed by the booking page to show the live breakdown as the guest
//! count or coupon changes.

use axum::{extract::State, Json};

use crate::error::Result;
use crate::pricing::requests::QuoteRequest;
use crate::pricing::responses::QuoteResponse;
use crate::pricing::services::quote_tour;
use crate::AppState;

/// Quote a tour for a guest count and optional coupon code
pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<QuoteRequest>,
) -> Result<Json<QuoteResponse>> {
    let quote = quote_tour(&state.db, &state.cache, &req).await?;
    Ok(Json(quote))
}
