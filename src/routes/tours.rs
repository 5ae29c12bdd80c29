//! Tour catalog route handlers

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::error::Result;
use crate::models::Tour;
use crate::AppState;

/// List active tours, newest first
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Tour>>> {
    let tours = state.cache.active_tours(&state.db).await?;
    Ok(Json((*tours).clone()))
}

/// Tour detail
pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Tour>> {
    let tour = state.cache.tour(&state.db, id).await?;
    Ok(Json((*tour).clone()))
}
