//! Contact inquiry models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Contact message from the contact_messages table
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ContactMessage {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub whatsapp: Option<String>,
    pub tour_interest: Option<String>,
    pub message: String,
    /// new | read | replied | closed
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// Incoming contact form payload
#[derive(Debug, Clone, Deserialize)]
pub struct NewContactMessage {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub whatsapp: Option<String>,
    #[serde(default)]
    pub tour_interest: Option<String>,
    pub message: String,
}
