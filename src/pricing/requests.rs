//! Request DTOs for pricing API endpoints.

use serde::Deserialize;
use uuid::Uuid;

/// Request to quote a tour booking.
///
/// `guests` is accepted as a raw number and normalized by the engine, so a
/// malformed form value degrades instead of failing the quote.
#[derive(Debug, Clone, Deserialize)]
pub struct QuoteRequest {
    pub tour_id: Uuid,
    pub guests: f64,
    /// Coupon code; resolved to a percent before the engine runs.
    #[serde(default)]
    pub coupon: Option<String>,
}
