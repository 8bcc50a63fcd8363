#![allow(clippy::float_cmp)]

use super::*;

fn tier(min: u32, max: Option<u32>, discount: f64, price: f64) -> PricingTier {
    PricingTier { min, max, discount, price }
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

// =============================================================
// Default schedule
// =============================================================

#[test]
fn default_tiers_follow_standard_breaks() {
    let tiers = default_tiers(20.0);
    let shape: Vec<(u32, Option<u32>)> = tiers.iter().map(|t| (t.min, t.max)).collect();
    assert_eq!(shape, vec![(1, Some(9)), (10, Some(24)), (25, Some(49)), (50, Some(99)), (100, None)]);
    let discounts: Vec<f64> = tiers.iter().map(|t| t.discount).collect();
    assert_eq!(discounts, vec![0.0, 0.10, 0.15, 0.20, 0.25]);
    assert!(approx(tiers[0].price, 20.0));
    assert!(approx(tiers[4].price, 15.0));
}

#[test]
fn default_tiers_validate() {
    assert!(validate(&default_tiers(24.99)).is_ok());
}

#[test]
fn from_breaks_falls_back_to_default() {
    assert_eq!(PricingSchedule::from_breaks(None), PricingSchedule::Default);
    assert_eq!(PricingSchedule::from_breaks(Some(Vec::new())), PricingSchedule::Default);
    let custom = vec![tier(1, None, 0.0, 10.0)];
    assert_eq!(PricingSchedule::from_breaks(Some(custom.clone())), PricingSchedule::Custom(custom));
}

#[test]
fn resolve_default_uses_base_price() {
    let tiers = PricingSchedule::Default.resolve(40.0).unwrap();
    assert!(approx(tiers[1].price, 36.0));
}

#[test]
fn resolve_custom_ignores_base_price() {
    let custom = vec![tier(1, Some(4), 0.0, 12.0), tier(5, None, 0.5, 6.0)];
    let tiers = PricingSchedule::Custom(custom.clone()).resolve(999.0).unwrap();
    assert_eq!(tiers, custom);
}

#[test]
fn schedule_serializes_with_kind_tag() {
    let json = serde_json::to_value(PricingSchedule::Default).unwrap();
    assert_eq!(json, serde_json::json!({"kind": "default"}));
    let back: PricingSchedule =
        serde_json::from_value(serde_json::json!({"kind": "custom", "tiers": [{"min": 1, "max": null, "discount": 0.0, "price": 3.0}]}))
            .unwrap();
    assert_eq!(back, PricingSchedule::Custom(vec![tier(1, None, 0.0, 3.0)]));
}

// =============================================================
// Validation
// =============================================================

#[test]
fn validate_rejects_empty() {
    assert_eq!(validate(&[]), Err(ScheduleError::Empty));
}

#[test]
fn validate_rejects_late_start() {
    assert_eq!(validate(&[tier(2, None, 0.0, 1.0)]), Err(ScheduleError::DoesNotStartAtOne(2)));
}

#[test]
fn validate_rejects_gap() {
    let tiers = [tier(1, Some(9), 0.0, 10.0), tier(11, None, 0.1, 9.0)];
    assert_eq!(validate(&tiers), Err(ScheduleError::Gap { index: 1, expected: 10, found: 11 }));
}

#[test]
fn validate_rejects_overlap() {
    let tiers = [tier(1, Some(9), 0.0, 10.0), tier(9, None, 0.1, 9.0)];
    assert!(matches!(validate(&tiers), Err(ScheduleError::Gap { index: 1, .. })));
}

#[test]
fn validate_rejects_inverted_range() {
    let tiers = [tier(1, Some(0), 0.0, 10.0), tier(1, None, 0.1, 9.0)];
    assert_eq!(validate(&tiers), Err(ScheduleError::Inverted { index: 0, min: 1, max: 0 }));
}

#[test]
fn validate_rejects_bounded_last_tier() {
    let tiers = [tier(1, Some(9), 0.0, 10.0), tier(10, Some(20), 0.1, 9.0)];
    assert_eq!(validate(&tiers), Err(ScheduleError::BoundedEnd));
}

#[test]
fn validate_rejects_unbounded_middle_tier() {
    let tiers = [tier(1, None, 0.0, 10.0), tier(10, None, 0.1, 9.0)];
    assert_eq!(validate(&tiers), Err(ScheduleError::UnboundedBeforeEnd { index: 0 }));
}

#[test]
fn validate_rejects_bad_discount_and_price() {
    assert!(matches!(validate(&[tier(1, None, 1.5, 10.0)]), Err(ScheduleError::Discount { index: 0, .. })));
    assert!(matches!(validate(&[tier(1, None, f64::NAN, 10.0)]), Err(ScheduleError::Discount { .. })));
    assert!(matches!(validate(&[tier(1, None, 0.0, -1.0)]), Err(ScheduleError::Price { .. })));
    assert!(matches!(validate(&[tier(1, None, 0.0, f64::INFINITY)]), Err(ScheduleError::Price { .. })));
}

#[test]
fn resolve_surfaces_validation_error() {
    let bad = PricingSchedule::Custom(vec![tier(1, Some(5), 0.0, 10.0)]);
    assert_eq!(bad.resolve(10.0), Err(ScheduleError::BoundedEnd));
}

// =============================================================
// select_tier
// =============================================================

#[test]
fn select_tier_reference_quantities() {
    let tiers = default_tiers(20.0);
    let t1 = select_tier(&tiers, 1).unwrap();
    assert_eq!((t1.min, t1.max, t1.discount), (1, Some(9), 0.0));
    assert!(approx(t1.price, 20.0));

    let t10 = select_tier(&tiers, 10).unwrap();
    assert_eq!((t10.min, t10.max, t10.discount), (10, Some(24), 0.10));
    assert!(approx(t10.price, 0.90 * 20.0));

    let t150 = select_tier(&tiers, 150).unwrap();
    assert_eq!((t150.min, t150.max, t150.discount), (100, None, 0.25));
    assert!(approx(t150.price, 0.75 * 20.0));
}

#[test]
fn select_tier_zero_is_treated_as_one() {
    let tiers = default_tiers(20.0);
    assert_eq!(select_tier(&tiers, 0), select_tier(&tiers, 1));
}

#[test]
fn select_tier_is_total_over_valid_schedule() {
    let tiers = default_tiers(13.0);
    for q in 1..=1_000 {
        let matching = tiers.iter().filter(|t| t.contains(q)).count();
        assert_eq!(matching, 1, "quantity {q}");
        assert!(select_tier(&tiers, q).is_some());
    }
    assert!(select_tier(&tiers, u32::MAX).is_some());
}

#[test]
fn select_tier_on_malformed_schedule_can_miss() {
    let tiers = [tier(1, Some(9), 0.0, 10.0)];
    assert!(select_tier(&tiers, 10).is_none());
}

#[test]
fn select_tier_is_deterministic() {
    let tiers = default_tiers(20.0);
    assert_eq!(select_tier(&tiers, 37), select_tier(&tiers, 37));
}

// =============================================================
// price_summary
// =============================================================

#[test]
fn summary_twenty_dollars_times_twenty_five() {
    let tiers = default_tiers(20.0);
    let t = select_tier(&tiers, 25).unwrap();
    let s = price_summary(20.0, t, 25);
    assert_eq!(s.tier.discount, 0.15);
    let d = s.display();
    assert_eq!(d.unit_price, 17.00);
    assert_eq!(d.total_price, 425.00);
    assert_eq!(d.savings, 75.00);
    assert_eq!(d.discount_percent, 15);
}

#[test]
fn summary_without_discount_has_zero_savings() {
    let tiers = default_tiers(20.0);
    let s = price_summary(20.0, select_tier(&tiers, 3).unwrap(), 3);
    assert_eq!(s.savings, 0.0);
    assert!(approx(s.total_price, 60.0));
}

#[test]
fn summary_never_reports_negative_savings() {
    let pricier = tier(10, None, 0.1, 25.0);
    let s = price_summary(20.0, &pricier, 10);
    assert_eq!(s.savings, 0.0);
}

#[test]
fn summary_zero_discount_ignores_price_difference() {
    let odd = tier(1, None, 0.0, 15.0);
    assert_eq!(price_summary(20.0, &odd, 4).savings, 0.0);
}

#[test]
fn summary_keeps_unrounded_internals() {
    let t = tier(1, None, 0.1, 10.0 / 3.0);
    let s = price_summary(10.0 / 3.0 / 0.9, &t, 3);
    assert!(approx(s.total_price, 10.0));
    assert!((s.unit_price - 3.333_333_333_333_333).abs() < 1e-12);
    assert_eq!(s.display().unit_price, 3.33);
}

#[test]
fn discount_steps_exactly_at_boundary() {
    let base = 20.0;
    let tiers = default_tiers(base);
    let at9 = price_summary(base, select_tier(&tiers, 9).unwrap(), 9);
    let at10 = price_summary(base, select_tier(&tiers, 10).unwrap(), 10);
    assert!(approx(at9.unit_price, 20.0));
    assert_eq!(at9.savings, 0.0);
    assert!(approx(at10.unit_price, 18.0));
    assert!(approx(at10.savings, 20.0));

    let at24 = price_summary(base, select_tier(&tiers, 24).unwrap(), 24);
    let at25 = price_summary(base, select_tier(&tiers, 25).unwrap(), 25);
    assert_eq!(at24.tier.discount, 0.10);
    assert_eq!(at25.tier.discount, 0.15);
}

#[test]
fn round_cents_rounds_half_away_from_zero() {
    assert_eq!(round_cents(1.005_000_1), 1.01);
    assert_eq!(round_cents(2.344), 2.34);
    assert_eq!(round_cents(0.0), 0.0);
}

// =============================================================
// Tier statuses
// =============================================================

#[test]
fn tier_statuses_mark_active_available_locked() {
    let tiers = default_tiers(20.0);
    let statuses: Vec<TierStatus> = tier_statuses(&tiers, 30).into_iter().map(|(_, s)| s).collect();
    assert_eq!(
        statuses,
        vec![TierStatus::Available, TierStatus::Available, TierStatus::Active, TierStatus::Locked, TierStatus::Locked]
    );
}

#[test]
fn quick_quantities_are_ascending() {
    assert!(QUICK_QUANTITIES.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn schedule_error_code() {
    use crate::error::ErrorCode;
    assert_eq!(ScheduleError::Empty.error_code(), "E_PRICING_SCHEDULE");
}
