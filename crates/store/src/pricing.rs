//! Cart-level discount rules.
//!
//! The discount is a pure function of the subtotal, never stored state:
//! orders strictly above the threshold get a flat percentage off.

use rust_decimal::{Decimal, dec};

/// Subtotal above which the discount applies, in currency units.
pub const DISCOUNT_THRESHOLD: Decimal = dec!(5000);

/// Discount rate applied above the threshold.
pub const DISCOUNT_RATE: Decimal = dec!(0.10);

/// Discount for a given subtotal: 10% when strictly above the threshold,
/// zero otherwise.
#[must_use]
pub fn discount_for(subtotal: Decimal) -> Decimal {
    if subtotal > DISCOUNT_THRESHOLD {
        subtotal * DISCOUNT_RATE
    } else {
        Decimal::ZERO
    }
}

/// Amount due after the discount.
#[must_use]
pub fn total_for(subtotal: Decimal) -> Decimal {
    subtotal - discount_for(subtotal)
}
