//! Bulk pricing: quantity-break schedules, tier selection, and price summaries.
//!
//! DESIGN
//! ======
//! A product's schedule is resolved once, at load, into a validated tier list
//! (`PricingSchedule::resolve`). Tier selection and summaries are pure
//! functions of their inputs; nothing here holds state between calls. Values
//! stay unrounded `f64` internally and are rounded to cents only by
//! `PriceSummary::display`.

use serde::{Deserialize, Serialize};

/// Quantities offered as one-click shortcuts in quote tables.
pub const QUICK_QUANTITIES: [u32; 5] = [10, 25, 50, 100, 250];

/// `(min, max, discount)` rows of the schedule used when a product has none.
const DEFAULT_BREAKS: [(u32, Option<u32>, f64); 5] = [
    (1, Some(9), 0.0),
    (10, Some(24), 0.10),
    (25, Some(49), 0.15),
    (50, Some(99), 0.20),
    (100, None, 0.25),
];

// =============================================================================
// TYPES
// =============================================================================

/// One quantity break.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricingTier {
    /// Smallest quantity in this tier.
    pub min: u32,
    /// Largest quantity in this tier; `None` means unbounded.
    pub max: Option<u32>,
    /// Fraction off the base price, `0.0..=1.0`.
    pub discount: f64,
    /// Unit price at this tier.
    pub price: f64,
}

impl PricingTier {
    /// Whether `quantity` falls inside this tier.
    #[must_use]
    pub fn contains(&self, quantity: u32) -> bool {
        quantity >= self.min && self.max.is_none_or(|max| quantity <= max)
    }
}

/// How a product prices bulk orders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "tiers")]
pub enum PricingSchedule {
    /// The storefront-wide 0/10/15/20/25% schedule applied to the base price.
    Default,
    /// Product-specific tiers.
    Custom(Vec<PricingTier>),
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScheduleError {
    #[error("pricing schedule has no tiers")]
    Empty,
    #[error("first tier must start at 1, starts at {0}")]
    DoesNotStartAtOne(u32),
    #[error("tier {index}: max {max} is below min {min}")]
    Inverted { index: usize, min: u32, max: u32 },
    #[error("tier {index}: expected min {expected}, found {found}")]
    Gap { index: usize, expected: u32, found: u32 },
    #[error("tier {index} is unbounded but is not the last tier")]
    UnboundedBeforeEnd { index: usize },
    #[error("last tier must be unbounded")]
    BoundedEnd,
    #[error("tier {index}: discount {discount} is outside 0..=1")]
    Discount { index: usize, discount: f64 },
    #[error("tier {index}: price {price} is not a non-negative number")]
    Price { index: usize, price: f64 },
}

impl crate::error::ErrorCode for ScheduleError {
    fn error_code(&self) -> &'static str {
        "E_PRICING_SCHEDULE"
    }
}

/// Tier status relative to the current quantity, for tier listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TierStatus {
    /// The tier that prices the current quantity.
    Active,
    /// Reachable from the current quantity but not selected.
    Available,
    /// Requires a larger quantity.
    Locked,
}

/// Unrounded price breakdown for a quantity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PriceSummary {
    pub tier: PricingTier,
    pub quantity: u32,
    pub unit_price: f64,
    pub total_price: f64,
    pub savings: f64,
}

/// Price breakdown rounded to cents for display.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DisplayPrice {
    pub unit_price: f64,
    pub total_price: f64,
    pub savings: f64,
    /// Whole-number discount percentage, e.g. `15` for 15%.
    pub discount_percent: u32,
}

// =============================================================================
// SCHEDULE
// =============================================================================

/// The storefront-wide schedule for a given base price.
#[must_use]
pub fn default_tiers(base_price: f64) -> Vec<PricingTier> {
    DEFAULT_BREAKS
        .iter()
        .map(|&(min, max, discount)| PricingTier { min, max, discount, price: base_price * (1.0 - discount) })
        .collect()
}

impl PricingSchedule {
    /// Build from the optional `quantityBreaks` list found in fixture data.
    #[must_use]
    pub fn from_breaks(breaks: Option<Vec<PricingTier>>) -> Self {
        match breaks {
            Some(tiers) if !tiers.is_empty() => Self::Custom(tiers),
            _ => Self::Default,
        }
    }

    /// Concrete tiers for `base_price`, validated.
    ///
    /// # Errors
    ///
    /// Returns a [`ScheduleError`] when custom tiers are not contiguous from 1
    /// to an unbounded last tier, or carry an out-of-range discount or price.
    pub fn resolve(&self, base_price: f64) -> Result<Vec<PricingTier>, ScheduleError> {
        let tiers = match self {
            Self::Default => default_tiers(base_price),
            Self::Custom(tiers) => tiers.clone(),
        };
        validate(&tiers)?;
        Ok(tiers)
    }
}

/// Check that `tiers` cover every quantity `>= 1` exactly once.
///
/// # Errors
///
/// Returns the first violation found, in tier order.
pub fn validate(tiers: &[PricingTier]) -> Result<(), ScheduleError> {
    let first = tiers.first().ok_or(ScheduleError::Empty)?;
    if first.min != 1 {
        return Err(ScheduleError::DoesNotStartAtOne(first.min));
    }

    let last_index = tiers.len() - 1;
    let mut expected_min = 1;
    for (index, tier) in tiers.iter().enumerate() {
        if !(0.0..=1.0).contains(&tier.discount) {
            return Err(ScheduleError::Discount { index, discount: tier.discount });
        }
        if !tier.price.is_finite() || tier.price < 0.0 {
            return Err(ScheduleError::Price { index, price: tier.price });
        }
        if tier.min != expected_min {
            return Err(ScheduleError::Gap { index, expected: expected_min, found: tier.min });
        }
        match tier.max {
            Some(max) if max < tier.min => {
                return Err(ScheduleError::Inverted { index, min: tier.min, max });
            }
            Some(_) if index == last_index => return Err(ScheduleError::BoundedEnd),
            Some(max) => expected_min = max.saturating_add(1),
            None if index != last_index => return Err(ScheduleError::UnboundedBeforeEnd { index }),
            None => {}
        }
    }
    Ok(())
}

// =============================================================================
// SELECTION
// =============================================================================

/// First tier containing `quantity`; quantities below 1 are treated as 1.
///
/// Always `Some` for a schedule that passed [`validate`].
#[must_use]
pub fn select_tier(tiers: &[PricingTier], quantity: u32) -> Option<&PricingTier> {
    let quantity = quantity.max(1);
    tiers.iter().find(|t| t.contains(quantity))
}

/// Status of every tier for `quantity`, in schedule order.
#[must_use]
pub fn tier_statuses(tiers: &[PricingTier], quantity: u32) -> Vec<(PricingTier, TierStatus)> {
    let quantity = quantity.max(1);
    let active = select_tier(tiers, quantity).copied();
    tiers
        .iter()
        .map(|t| {
            let status = if Some(*t) == active {
                TierStatus::Active
            } else if quantity >= t.min {
                TierStatus::Available
            } else {
                TierStatus::Locked
            };
            (*t, status)
        })
        .collect()
}

// =============================================================================
// SUMMARY
// =============================================================================

/// Unit price, total, and savings for `quantity` units at `tier`.
#[must_use]
pub fn price_summary(base_price: f64, tier: &PricingTier, quantity: u32) -> PriceSummary {
    let quantity = quantity.max(1);
    let units = f64::from(quantity);
    let unit_price = tier.price;
    let savings = if tier.discount == 0.0 { 0.0 } else { ((base_price - tier.price) * units).max(0.0) };
    PriceSummary { tier: *tier, quantity, unit_price, total_price: unit_price * units, savings }
}

/// Round to the nearest cent.
#[must_use]
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

impl PriceSummary {
    /// Cents-rounded view of this summary.
    #[must_use]
    pub fn display(&self) -> DisplayPrice {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let discount_percent = (self.tier.discount * 100.0).round() as u32;
        DisplayPrice {
            unit_price: round_cents(self.unit_price),
            total_price: round_cents(self.total_price),
            savings: round_cents(self.savings),
            discount_percent,
        }
    }
}

#[cfg(test)]
#[path = "pricing_test.rs"]
mod tests;
