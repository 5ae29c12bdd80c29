//! Pickup location model

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// Pickup location from the locations table
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Location {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub lat: f64,
    pub lng: f64,
    /// hotel | station | landmark | ...
    pub location_type: String,
    pub area: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}
