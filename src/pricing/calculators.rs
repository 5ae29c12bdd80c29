//! Core pricing calculation functions.
//!
//! Pure functions for booking price math - no database access. The engine
//! never fails: malformed numeric input is normalized to the nearest safe
//! default so a price display can never block a booking form.

use rust_decimal::prelude::*;
use rust_decimal::Decimal;

/// Solo multiplier used when the caller does not supply one.
pub const DEFAULT_SOLO_MULTIPLIER: f64 = 2.0;

/// One tier of the group discount table.
///
/// `min`/`max` are inclusive guest counts; `max` of `None` means open-ended.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroupDiscountRule {
    pub min: u32,
    pub max: Option<u32>,
    pub percent: f64,
}

/// Canonical group discount tiers. Tiers must not overlap; when a custom
/// table does overlap, the first matching rule in array order wins.
pub const DEFAULT_GROUP_RULES: [GroupDiscountRule; 5] = [
    GroupDiscountRule { min: 3, max: Some(3), percent: 10.0 },
    GroupDiscountRule { min: 4, max: Some(4), percent: 15.0 },
    GroupDiscountRule { min: 5, max: Some(5), percent: 20.0 },
    GroupDiscountRule { min: 6, max: Some(7), percent: 30.0 },
    GroupDiscountRule { min: 8, max: None, percent: 45.0 },
];

/// Round a monetary amount to whole yen, half away from zero.
///
/// Every monetary step in the breakdown (base, group discount, coupon) goes
/// through this one function so scenario outputs stay bit-exact.
///
/// # Examples
/// ```
/// use rust_decimal_macros::dec;
/// use sakuratours_web::pricing::round_yen;
///
/// assert_eq!(round_yen(dec!(2.5)), 3);
/// assert_eq!(round_yen(dec!(2.4)), 2);
/// assert_eq!(round_yen(dec!(19999.5)), 20000);
/// ```
pub fn round_yen(amount: Decimal) -> i64 {
    amount
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .unwrap_or(0)
}

/// Clamp any percentage input to [0, 100], rounded to 2 decimal places.
///
/// Non-finite input (NaN, infinities) degrades to 0. Total function, never
/// fails.
pub fn clamp_percent(n: f64) -> Decimal {
    let Some(x) = Decimal::from_f64(n) else {
        return Decimal::ZERO;
    };
    x.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Map a guest count to a discount percentage using an ordered rule table.
///
/// Scans `rules` in array order and returns the percent of the first rule
/// where `guests >= min` and (`max` is `None` or `guests <= max`), clamped
/// to [0, 100]. A guest count of 0 (the typed stand-in for invalid input)
/// never matches.
pub fn group_discount_percent(guests: u32, rules: &[GroupDiscountRule]) -> Decimal {
    if guests == 0 {
        return Decimal::ZERO;
    }
    rules
        .iter()
        .find(|r| guests >= r.min && r.max.map_or(true, |max| guests <= max))
        .map(|r| clamp_percent(r.percent))
        .unwrap_or(Decimal::ZERO)
}

/// Input to a pricing call.
///
/// `price_per_person` and `guests` arrive as raw numbers from untrusted
/// upstream data; `price_breakdown` normalizes them rather than rejecting.
#[derive(Debug, Clone)]
pub struct PriceInput {
    /// Per-person rate in whole yen; negative or non-finite clamps to 0.
    pub price_per_person: f64,
    /// Guest count; floored and clamped to >= 1.
    pub guests: f64,
    /// Applied in place of per-guest multiplication when exactly 1 guest.
    pub solo_multiplier: f64,
    /// Percentage discount already resolved from a coupon lookup.
    pub coupon_percent: f64,
    /// Discount tier table; `None` uses `DEFAULT_GROUP_RULES`.
    pub group_rules: Option<Vec<GroupDiscountRule>>,
}

impl Default for PriceInput {
    fn default() -> Self {
        Self {
            price_per_person: 0.0,
            guests: 1.0,
            solo_multiplier: DEFAULT_SOLO_MULTIPLIER,
            coupon_percent: 0.0,
            group_rules: None,
        }
    }
}

/// Full receipt-style breakdown returned by one pricing call.
///
/// All monetary fields are non-negative whole yen. Created fresh on every
/// call and never mutated; the caller persists only `total` into a booking.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct PriceBreakdown {
    /// Clamped per-person rate as supplied (echo, not re-rounded).
    #[serde(with = "rust_decimal::serde::str")]
    pub base_per_person: Decimal,
    pub guests: u32,
    pub solo_applied: bool,
    #[serde(with = "rust_decimal::serde::str")]
    pub solo_multiplier: Decimal,
    pub base_total: i64,
    #[serde(with = "rust_decimal::serde::str")]
    pub group_discount_percent: Decimal,
    pub group_discount_amount: i64,
    pub subtotal_after_group: i64,
    #[serde(with = "rust_decimal::serde::str")]
    pub coupon_percent: Decimal,
    pub coupon_amount: i64,
    pub total: i64,
}

/// Compute the full price breakdown for a booking.
///
/// Single source of truth for "what does this booking cost". The steps run
/// in a fixed order because discounts compound sequentially: the group
/// discount applies to the base total and the coupon applies to the
/// post-group subtotal, never to the original base.
///
/// Solo pricing replaces per-guest multiplication when there is exactly one
/// guest and the multiplier exceeds 1; the group discount is still resolved
/// from the raw guest count (all default tiers start at 3, so a solo
/// traveler never qualifies).
pub fn price_breakdown(input: &PriceInput) -> PriceBreakdown {
    let base_per_person = Decimal::from_f64(input.price_per_person)
        .unwrap_or(Decimal::ZERO)
        .max(Decimal::ZERO);

    let guests: u32 = if input.guests.is_finite() {
        input.guests.floor().max(1.0) as u32
    } else {
        1
    };

    let solo_multiplier = Decimal::from_f64(input.solo_multiplier).unwrap_or(Decimal::TWO);

    let solo_applied = guests == 1 && solo_multiplier > Decimal::ONE;
    let base_total = if solo_applied {
        round_yen(base_per_person * solo_multiplier)
    } else {
        round_yen(base_per_person * Decimal::from(guests))
    };

    let rules = input.group_rules.as_deref().unwrap_or(&DEFAULT_GROUP_RULES);
    let group_discount_percent = group_discount_percent(guests, rules);
    let group_discount_amount =
        round_yen(Decimal::from(base_total) * group_discount_percent / Decimal::ONE_HUNDRED);
    let subtotal_after_group = (base_total - group_discount_amount).max(0);

    let coupon_percent = clamp_percent(input.coupon_percent);
    let coupon_amount =
        round_yen(Decimal::from(subtotal_after_group) * coupon_percent / Decimal::ONE_HUNDRED);
    let total = (subtotal_after_group - coupon_amount).max(0);

    PriceBreakdown {
        base_per_person,
        guests,
        solo_applied,
        solo_multiplier,
        base_total,
        group_discount_percent,
        group_discount_amount,
        subtotal_after_group,
        coupon_percent,
        coupon_amount,
        total,
    }
}

/// Format whole-yen currency for display.
///
/// Negative or fractional input is first normalized to `max(0, round(n))`.
///
/// # Examples
/// ```
/// use sakuratours_web::pricing::fmt_jpy;
///
/// assert_eq!(fmt_jpy(35200.0), "¥35,200");
/// assert_eq!(fmt_jpy(-100.0), "¥0");
/// ```
pub fn fmt_jpy(n: f64) -> String {
    let yen: i64 = if n.is_finite() {
        (n.round() as i64).max(0)
    } else {
        0
    };

    let digits = yen.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    format!("¥{out}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    // ==================== round_yen tests ====================

    #[test]
    fn test_round_yen_half_away_from_zero() {
        assert_eq!(round_yen(dec!(0.5)), 1);
        assert_eq!(round_yen(dec!(1.5)), 2);
        assert_eq!(round_yen(dec!(2.5)), 3);
        assert_eq!(round_yen(dec!(2.4)), 2);
        assert_eq!(round_yen(dec!(2.6)), 3);
    }

    #[test]
    fn test_round_yen_integral_passthrough() {
        assert_eq!(round_yen(dec!(0)), 0);
        assert_eq!(round_yen(dec!(20000)), 20000);
        assert_eq!(round_yen(dec!(123456789)), 123456789);
    }

    #[test]
    fn test_round_yen_negative() {
        assert_eq!(round_yen(dec!(-2.5)), -3);
        assert_eq!(round_yen(dec!(-2.4)), -2);
    }

    // ==================== clamp_percent tests ====================

    #[test]
    fn test_clamp_percent_in_range() {
        assert_eq!(clamp_percent(0.0), dec!(0));
        assert_eq!(clamp_percent(45.0), dec!(45));
        assert_eq!(clamp_percent(100.0), dec!(100));
    }

    #[test]
    fn test_clamp_percent_out_of_range() {
        assert_eq!(clamp_percent(150.0), dec!(100));
        assert_eq!(clamp_percent(-5.0), dec!(0));
    }

    #[test]
    fn test_clamp_percent_non_finite() {
        assert_eq!(clamp_percent(f64::NAN), dec!(0));
        assert_eq!(clamp_percent(f64::INFINITY), dec!(0));
        assert_eq!(clamp_percent(f64::NEG_INFINITY), dec!(0));
    }

    #[test]
    fn test_clamp_percent_rounds_to_two_places() {
        assert_eq!(clamp_percent(33.333), dec!(33.33));
        assert_eq!(clamp_percent(12.3456), dec!(12.35));
        assert_eq!(clamp_percent(99.999), dec!(100));
    }

    // ==================== group_discount_percent tests ====================

    #[test]
    fn test_group_discount_default_tiers() {
        assert_eq!(group_discount_percent(1, &DEFAULT_GROUP_RULES), dec!(0));
        assert_eq!(group_discount_percent(2, &DEFAULT_GROUP_RULES), dec!(0));
        assert_eq!(group_discount_percent(3, &DEFAULT_GROUP_RULES), dec!(10));
        assert_eq!(group_discount_percent(4, &DEFAULT_GROUP_RULES), dec!(15));
        assert_eq!(group_discount_percent(5, &DEFAULT_GROUP_RULES), dec!(20));
        assert_eq!(group_discount_percent(6, &DEFAULT_GROUP_RULES), dec!(30));
        assert_eq!(group_discount_percent(7, &DEFAULT_GROUP_RULES), dec!(30));
        assert_eq!(group_discount_percent(8, &DEFAULT_GROUP_RULES), dec!(45));
        assert_eq!(group_discount_percent(100, &DEFAULT_GROUP_RULES), dec!(45));
    }

    #[test]
    fn test_group_discount_zero_guests_never_matches() {
        assert_eq!(group_discount_percent(0, &DEFAULT_GROUP_RULES), dec!(0));
    }

    #[test]
    fn test_group_discount_empty_rules() {
        assert_eq!(group_discount_percent(5, &[]), dec!(0));
    }

    #[test]
    fn test_group_discount_first_match_wins_on_overlap() {
        let rules = [
            GroupDiscountRule { min: 2, max: Some(10), percent: 5.0 },
            GroupDiscountRule { min: 3, max: Some(3), percent: 10.0 },
        ];
        assert_eq!(group_discount_percent(3, &rules), dec!(5));
    }

    #[test]
    fn test_group_discount_rule_percent_is_clamped() {
        let rules = [GroupDiscountRule { min: 2, max: None, percent: 150.0 }];
        assert_eq!(group_discount_percent(4, &rules), dec!(100));
    }

    // ==================== price_breakdown scenarios ====================

    #[test]
    fn test_breakdown_solo_traveler_surcharge() {
        let b = price_breakdown(&PriceInput {
            price_per_person: 10000.0,
            guests: 1.0,
            ..Default::default()
        });
        assert!(b.solo_applied);
        assert_eq!(b.base_total, 20000);
        assert_eq!(b.group_discount_percent, dec!(0));
        assert_eq!(b.group_discount_amount, 0);
        assert_eq!(b.subtotal_after_group, 20000);
        assert_eq!(b.total, 20000);
    }

    #[test]
    fn test_breakdown_group_of_three() {
        let b = price_breakdown(&PriceInput {
            price_per_person: 10000.0,
            guests: 3.0,
            ..Default::default()
        });
        assert!(!b.solo_applied);
        assert_eq!(b.base_total, 30000);
        assert_eq!(b.group_discount_percent, dec!(10));
        assert_eq!(b.group_discount_amount, 3000);
        assert_eq!(b.subtotal_after_group, 27000);
        assert_eq!(b.coupon_amount, 0);
        assert_eq!(b.total, 27000);
    }

    #[test]
    fn test_breakdown_large_group_with_coupon() {
        let b = price_breakdown(&PriceInput {
            price_per_person: 10000.0,
            guests: 8.0,
            coupon_percent: 20.0,
            ..Default::default()
        });
        assert_eq!(b.base_total, 80000);
        assert_eq!(b.group_discount_percent, dec!(45));
        assert_eq!(b.group_discount_amount, 36000);
        assert_eq!(b.subtotal_after_group, 44000);
        assert_eq!(b.coupon_percent, dec!(20));
        assert_eq!(b.coupon_amount, 8800);
        assert_eq!(b.total, 35200);
    }

    #[test]
    fn test_breakdown_pair_below_group_tier() {
        let b = price_breakdown(&PriceInput {
            price_per_person: 10000.0,
            guests: 2.0,
            coupon_percent: 50.0,
            ..Default::default()
        });
        assert!(!b.solo_applied);
        assert_eq!(b.base_total, 20000);
        assert_eq!(b.group_discount_percent, dec!(0));
        assert_eq!(b.subtotal_after_group, 20000);
        assert_eq!(b.coupon_amount, 10000);
        assert_eq!(b.total, 10000);
    }

    #[test]
    fn test_breakdown_free_tour_is_free() {
        let b = price_breakdown(&PriceInput {
            price_per_person: 0.0,
            guests: 5.0,
            coupon_percent: 80.0,
            ..Default::default()
        });
        assert_eq!(b.base_total, 0);
        assert_eq!(b.total, 0);
    }

    // ==================== price_breakdown boundaries ====================

    #[test]
    fn test_breakdown_zero_guests_normalized_to_one() {
        let b = price_breakdown(&PriceInput {
            price_per_person: 10000.0,
            guests: 0.0,
            ..Default::default()
        });
        assert_eq!(b.guests, 1);
        assert!(b.solo_applied);
        assert_eq!(b.base_total, 20000);
    }

    #[test]
    fn test_breakdown_negative_guests_normalized_to_one() {
        let b = price_breakdown(&PriceInput {
            price_per_person: 10000.0,
            guests: -5.0,
            ..Default::default()
        });
        assert_eq!(b.guests, 1);
    }

    #[test]
    fn test_breakdown_fractional_guests_floored() {
        let b = price_breakdown(&PriceInput {
            price_per_person: 10000.0,
            guests: 3.9,
            ..Default::default()
        });
        assert_eq!(b.guests, 3);
        assert_eq!(b.base_total, 30000);
        assert_eq!(b.group_discount_percent, dec!(10));
    }

    #[test]
    fn test_breakdown_nan_price_degrades_to_zero() {
        let b = price_breakdown(&PriceInput {
            price_per_person: f64::NAN,
            guests: 4.0,
            ..Default::default()
        });
        assert_eq!(b.base_per_person, dec!(0));
        assert_eq!(b.base_total, 0);
        assert_eq!(b.total, 0);
    }

    #[test]
    fn test_breakdown_negative_price_degrades_to_zero() {
        let b = price_breakdown(&PriceInput {
            price_per_person: -4500.0,
            guests: 2.0,
            ..Default::default()
        });
        assert_eq!(b.base_per_person, dec!(0));
        assert_eq!(b.total, 0);
    }

    #[test]
    fn test_breakdown_oversized_coupon_clamped_to_full_discount() {
        let b = price_breakdown(&PriceInput {
            price_per_person: 10000.0,
            guests: 4.0,
            coupon_percent: 150.0,
            ..Default::default()
        });
        assert_eq!(b.coupon_percent, dec!(100));
        assert_eq!(b.coupon_amount, b.subtotal_after_group);
        assert_eq!(b.total, 0);
    }

    #[test]
    fn test_breakdown_solo_multiplier_of_one_not_applied() {
        let b = price_breakdown(&PriceInput {
            price_per_person: 10000.0,
            guests: 1.0,
            solo_multiplier: 1.0,
            ..Default::default()
        });
        assert!(!b.solo_applied);
        assert_eq!(b.base_total, 10000);
    }

    #[test]
    fn test_breakdown_non_finite_solo_multiplier_uses_default() {
        let b = price_breakdown(&PriceInput {
            price_per_person: 10000.0,
            guests: 1.0,
            solo_multiplier: f64::NAN,
            ..Default::default()
        });
        assert_eq!(b.solo_multiplier, dec!(2));
        assert!(b.solo_applied);
        assert_eq!(b.base_total, 20000);
    }

    #[test]
    fn test_breakdown_fractional_price_rounds_base_total() {
        let b = price_breakdown(&PriceInput {
            price_per_person: 999.5,
            guests: 2.0,
            ..Default::default()
        });
        assert_eq!(b.base_per_person, dec!(999.5));
        assert_eq!(b.base_total, 1999);
    }

    #[test]
    fn test_breakdown_custom_rules_override_defaults() {
        let b = price_breakdown(&PriceInput {
            price_per_person: 10000.0,
            guests: 2.0,
            group_rules: Some(vec![GroupDiscountRule {
                min: 2,
                max: None,
                percent: 50.0,
            }]),
            ..Default::default()
        });
        assert_eq!(b.group_discount_percent, dec!(50));
        assert_eq!(b.group_discount_amount, 10000);
        assert_eq!(b.total, 10000);
    }

    // ==================== invariants ====================

    #[test]
    fn test_discounts_never_increase_price() {
        for guests in 0..12 {
            for coupon in [0.0, 7.5, 33.333, 100.0, 150.0, f64::NAN] {
                let b = price_breakdown(&PriceInput {
                    price_per_person: 12345.0,
                    guests: f64::from(guests),
                    coupon_percent: coupon,
                    ..Default::default()
                });
                assert!(b.total <= b.subtotal_after_group);
                assert!(b.subtotal_after_group <= b.base_total);
                assert!(b.total >= 0);
                assert!(b.group_discount_amount >= 0);
                assert!(b.coupon_amount >= 0);
            }
        }
    }

    #[test]
    fn test_group_percent_limited_to_known_tiers() {
        let known = [dec!(0), dec!(10), dec!(15), dec!(20), dec!(30), dec!(45)];
        for guests in 0..200 {
            let p = group_discount_percent(guests, &DEFAULT_GROUP_RULES);
            assert!(known.contains(&p), "unexpected percent {p} for {guests}");
        }
    }

    #[test]
    fn test_breakdown_is_deterministic() {
        let input = PriceInput {
            price_per_person: 8800.0,
            guests: 6.0,
            coupon_percent: 12.5,
            ..Default::default()
        };
        assert_eq!(price_breakdown(&input), price_breakdown(&input));
    }

    #[test]
    fn test_raising_coupon_never_raises_total() {
        let mut last = i64::MAX;
        for coupon in 0..=100 {
            let b = price_breakdown(&PriceInput {
                price_per_person: 9999.0,
                guests: 5.0,
                coupon_percent: f64::from(coupon),
                ..Default::default()
            });
            assert!(b.total <= last);
            last = b.total;
        }
    }

    // ==================== fmt_jpy tests ====================

    #[test]
    fn test_fmt_jpy_groups_thousands() {
        assert_eq!(fmt_jpy(0.0), "¥0");
        assert_eq!(fmt_jpy(999.0), "¥999");
        assert_eq!(fmt_jpy(1000.0), "¥1,000");
        assert_eq!(fmt_jpy(35200.0), "¥35,200");
        assert_eq!(fmt_jpy(1234567.0), "¥1,234,567");
    }

    #[test]
    fn test_fmt_jpy_normalizes_input() {
        assert_eq!(fmt_jpy(-100.0), "¥0");
        assert_eq!(fmt_jpy(999.6), "¥1,000");
        assert_eq!(fmt_jpy(f64::NAN), "¥0");
    }
}
