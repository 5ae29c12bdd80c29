//! Pricing engine module for Sakura Tours.
//!
//! The one place in the site with real business rules: computes a booking's
//! final charge from a per-person rate, guest count, solo-traveler
//! surcharge, tiered group discounts, and an optional coupon percent. The
//! booking flow displays the breakdown live and submits its `total` as the
//! authoritative charge.

pub mod calculators;
pub mod requests;
pub mod responses;
pub mod services;

// Re-export commonly used items
pub use calculators::{
    clamp_percent, fmt_jpy, group_discount_percent, price_breakdown, round_yen,
    GroupDiscountRule, PriceBreakdown, PriceInput, DEFAULT_GROUP_RULES, DEFAULT_SOLO_MULTIPLIER,
};
pub use services::quote_tour;
