//! Response DTOs for pricing API endpoints.

use serde::Serialize;
use uuid::Uuid;

use crate::models::Coupon;

use super::calculators::{fmt_jpy, PriceBreakdown};

/// Resolved coupon echoed back with a quote
#[derive(Debug, Clone, Serialize)]
pub struct CouponSummary {
    #[serde(rename = "ref")]
    pub ref_code: String,
    pub title: String,
    pub percent: f64,
}

impl From<&Coupon> for CouponSummary {
    fn from(coupon: &Coupon) -> Self {
        Self {
            ref_code: coupon.ref_code.clone(),
            title: coupon.title.clone(),
            percent: coupon.discount,
        }
    }
}

/// Receipt-style display strings for the breakdown
#[derive(Debug, Clone, Serialize)]
pub struct QuoteDisplay {
    pub base_total: String,
    pub group_discount: String,
    pub coupon_discount: String,
    pub total: String,
}

impl QuoteDisplay {
    pub fn from_breakdown(b: &PriceBreakdown) -> Self {
        Self {
            base_total: fmt_jpy(b.base_total as f64),
            group_discount: fmt_jpy(b.group_discount_amount as f64),
            coupon_discount: fmt_jpy(b.coupon_amount as f64),
            total: fmt_jpy(b.total as f64),
        }
    }
}

/// Response for a tour quote
#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    pub tour_id: Uuid,
    pub tour_title: String,
    pub breakdown: PriceBreakdown,
    /// `None` when no code was given or the code did not resolve.
    pub coupon: Option<CouponSummary>,
    pub display: QuoteDisplay,
}
