//! Tour catalog and review models

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// Tour from the tours table
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Tour {
    pub id: Uuid,
    pub title: String,
    pub short_title: Option<String>,
    pub description: String,
    pub long_description: Option<String>,
    /// Per-person rate in whole yen.
    pub price: i64,
    pub duration: String,
    pub max_guests: i32,
    pub rating: f64,
    pub review_count: i32,
    pub images: Vec<String>,
    pub highlights: Vec<String>,
    pub included: Vec<String>,
    pub not_included: Vec<String>,
    pub itinerary: Option<serde_json::Value>,
    pub pickup_restrictions: String,
    pub fixed_pickup_location: Option<String>,
    pub pickup_areas: Vec<String>,
    pub booking_notes: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Customer review from the reviews table
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Review {
    pub id: Uuid,
    pub booking_id: Uuid,
    pub tour_id: Uuid,
    pub rating: i32,
    pub title: Option<String>,
    pub review_text: Option<String>,
    pub is_featured: bool,
    pub created_at: DateTime<Utc>,
}

/// Fields required to insert a review
#[derive(Debug, Clone)]
pub struct NewReview {
    pub booking_id: Uuid,
    pub tour_id: Uuid,
    pub rating: i32,
    pub title: Option<String>,
    pub review_text: Option<String>,
}
