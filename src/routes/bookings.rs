//! Booking route handlers
//!
//! Creation never trusts a client-supplied total: the authoritative charge
//! is recomputed through the quote service and handed to the store's atomic
//! insert together with the customer and scheduling fields.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::db;
use crate::email;
use crate::error::{AppError, Result};
use crate::models::{Booking, NewBooking};
use crate::pricing::requests::QuoteRequest;
use crate::pricing::services::quote_tour;
use crate::AppState;

/// Incoming booking payload
#[derive(Debug, Clone, Deserialize)]
pub struct CreateBookingRequest {
    pub tour_id: Uuid,
    pub tour_date: NaiveDate,
    pub tour_time: NaiveTime,
    pub guests: i32,
    pub pickup_location: String,
    #[serde(default)]
    pub pickup_lat: Option<f64>,
    #[serde(default)]
    pub pickup_lng: Option<f64>,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    #[serde(default)]
    pub special_requests: Option<String>,
    #[serde(default)]
    pub coupon: Option<String>,
}

/// Validate required booking fields against the selected tour.
///
/// Field presence is a presentation-layer concern the server re-checks;
/// pricing itself never rejects input.
fn validate(req: &CreateBookingRequest, max_guests: i32) -> std::result::Result<(), String> {
    let mut errors = Vec::new();

    if req.customer_name.trim().is_empty() {
        errors.push("customer_name is required");
    }
    if req.customer_email.trim().is_empty() || !req.customer_email.contains('@') {
        errors.push("customer_email must be a valid email address");
    }
    if req.customer_phone.trim().is_empty() {
        errors.push("customer_phone is required");
    }
    if req.pickup_location.trim().is_empty() {
        errors.push("pickup_location is required");
    }
    if req.guests < 1 {
        errors.push("guests must be at least 1");
    } else if req.guests > max_guests {
        errors.push("guests exceeds the tour's maximum group size");
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors.join("; "))
    }
}

/// Create a booking
pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<CreateBookingRequest>,
) -> Result<(StatusCode, Json<Booking>)> {
    let tour = state.cache.tour(&state.db, req.tour_id).await?;
    validate(&req, tour.max_guests).map_err(AppError::Validation)?;

    let quote = quote_tour(
        &state.db,
        &state.cache,
        &QuoteRequest {
            tour_id: req.tour_id,
            guests: f64::from(req.guests),
            coupon: req.coupon.clone(),
        },
    )
    .await?;

    // Persist the coupon ref only when the code actually resolved, so the
    // confirmation flow never tries to count an unknown coupon.
    let coupon_ref = quote.coupon.as_ref().map(|c| c.ref_code.clone());

    let new = NewBooking {
        tour_id: req.tour_id,
        tour_date: req.tour_date,
        tour_time: req.tour_time,
        guests: req.guests,
        total_price: quote.breakdown.total,
        pickup_location: req.pickup_location.trim().to_string(),
        pickup_lat: req.pickup_lat,
        pickup_lng: req.pickup_lng,
        customer_name: req.customer_name.trim().to_string(),
        customer_email: req.customer_email.trim().to_string(),
        customer_phone: req.customer_phone.trim().to_string(),
        special_requests: req
            .special_requests
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from),
        coupon_ref,
    };

    let booking = db::create_booking_atomic(&state.db, &new).await?;
    tracing::info!(
        booking_number = %booking.booking_number,
        total_price = booking.total_price,
        "booking created"
    );
    email::send_booking_confirmation(&booking);

    Ok((StatusCode::CREATED, Json(booking)))
}

/// Look up a booking by its reference
pub async fn lookup(
    State(state): State<AppState>,
    Path(booking_number): Path<String>,
) -> Result<Json<Booking>> {
    let booking = db::get_booking_by_number(&state.db, &booking_number).await?;
    Ok(Json(booking))
}

/// Result of the coupon counting step
#[derive(Debug, Serialize)]
pub struct CouponCountResponse {
    pub counted: bool,
}

/// Count the booking's coupon use, exactly once.
///
/// Called by the confirmation page; safe to retry.
pub async fn count_coupon(
    State(state): State<AppState>,
    Path(booking_number): Path<String>,
) -> Result<Json<CouponCountResponse>> {
    let counted = db::mark_coupon_counted(&state.db, &booking_number).await?;
    Ok(Json(CouponCountResponse { counted }))
}
