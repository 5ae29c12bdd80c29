//! Review route handlers
//!
//! Reviews are tied to a real booking: the caller identifies it by the
//! booking reference rather than an account.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::db;
use crate::error::{AppError, Result};
use crate::models::{NewReview, Review};
use crate::AppState;

/// Incoming review payload
#[derive(Debug, Deserialize)]
pub struct CreateReviewRequest {
    pub booking_number: String,
    pub rating: i32,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub review_text: Option<String>,
}

/// Create a review for an existing booking
pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<CreateReviewRequest>,
) -> Result<(StatusCode, Json<Review>)> {
    if !(1..=5).contains(&req.rating) {
        return Err(AppError::Validation(
            "rating must be between 1 and 5".to_string(),
        ));
    }

    let booking = db::get_booking_by_number(&state.db, &req.booking_number).await?;

    let review = db::insert_review(
        &state.db,
        &NewReview {
            booking_id: booking.id,
            tour_id: booking.tour_id,
            rating: req.rating,
            title: req.title.clone(),
            review_text: req.review_text.clone(),
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(review)))
}

/// List reviews for a tour
pub async fn list_for_tour(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<Review>>> {
    let reviews = db::list_tour_reviews(&state.db, id).await?;
    Ok(Json(reviews))
}
