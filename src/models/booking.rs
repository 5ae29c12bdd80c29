//! Booking and coupon models

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// Booking from the bookings table
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Booking {
    pub id: Uuid,
    /// Human-facing reference generated by the store on insert.
    pub booking_number: String,
    pub tour_id: Uuid,
    pub tour_date: NaiveDate,
    pub tour_time: NaiveTime,
    pub guests: i32,
    /// Authoritative charge in whole yen, computed by the pricing engine.
    pub total_price: i64,
    pub pickup_location: Option<String>,
    pub pickup_lat: Option<f64>,
    pub pickup_lng: Option<f64>,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub special_requests: Option<String>,
    /// pending | confirmed | cancelled | completed
    pub status: String,
    /// pending | paid | refunded
    pub payment_status: String,
    pub coupon_ref: Option<String>,
    /// Set once the coupon usage counter has been incremented for this
    /// booking, so a refreshed confirmation page cannot double count.
    pub coupon_counted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields handed to the store's atomic booking insert
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub tour_id: Uuid,
    pub tour_date: NaiveDate,
    pub tour_time: NaiveTime,
    pub guests: i32,
    pub total_price: i64,
    pub pickup_location: String,
    pub pickup_lat: Option<f64>,
    pub pickup_lng: Option<f64>,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub special_requests: Option<String>,
    pub coupon_ref: Option<String>,
}

/// Coupon from the coupons table
///
/// Owned and mutated entirely by the store; the pricing engine only ever
/// sees the resolved `discount` percent.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Coupon {
    pub id: Uuid,
    /// Unique code, matched case-insensitively.
    #[serde(rename = "ref")]
    pub ref_code: String,
    pub title: String,
    /// Percentage discount in [0, 100].
    pub discount: f64,
    /// Usage counter, incremented by the confirmation flow.
    pub times: i32,
    pub created_at: DateTime<Utc>,
}
