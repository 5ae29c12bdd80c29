//! Quote service: the caller-side glue around the pricing engine.
//!
//! Resolves a tour's per-person rate and an optional coupon code through
//! the cache and store, then invokes the pure engine. The engine itself
//! never fails; only the tour lookup can, and a broken coupon lookup
//! degrades to "no coupon" rather than blocking the quote.

use sqlx::PgPool;

use crate::cache::AppCache;
use crate::error::Result;

use super::calculators::{price_breakdown, PriceInput};
use super::requests::QuoteRequest;
use super::responses::{CouponSummary, QuoteDisplay, QuoteResponse};

/// Quote a tour booking.
///
/// The returned `breakdown.total` is the authoritative charge the booking
/// flow submits with the atomic booking insert.
pub async fn quote_tour(
    pool: &PgPool,
    cache: &AppCache,
    req: &QuoteRequest,
) -> Result<QuoteResponse> {
    let tour = cache.tour(pool, req.tour_id).await?;

    let coupon = match req.coupon.as_deref() {
        Some(code) => cache.coupon(pool, code).await,
        None => None,
    };

    let input = PriceInput {
        price_per_person: tour.price as f64,
        guests: req.guests,
        coupon_percent: coupon.as_ref().map(|c| c.discount).unwrap_or(0.0),
        ..Default::default()
    };
    let breakdown = price_breakdown(&input);
    let display = QuoteDisplay::from_breakdown(&breakdown);

    Ok(QuoteResponse {
        tour_id: tour.id,
        tour_title: tour.title.clone(),
        breakdown,
        coupon: coupon.as_deref().map(CouponSummary::from),
        display,
    })
}
