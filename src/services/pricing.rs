use serde::Serialize;

use crate::error::{BookingError, BookingResult};
use crate::models::Money;

pub const DEFAULT_BASE_PRICE: Money = Money::from_cents(1299);
pub const DEFAULT_BOOKING_FEE: Money = Money::from_cents(200);

/// Flat per-seat pricing plus a fixed booking fee.
///
/// Seat type does not affect the price: VIP seats are shown differently but
/// cost the same as regular ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricingPolicy {
    base_price: Money,
    booking_fee: Money,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PriceQuote {
    pub seat_count: usize,
    pub unit_price: Money,
    pub subtotal: Money,
    pub booking_fee: Money,
    pub total: Money,
}

impl PricingPolicy {
    pub fn new(base_price: Money, booking_fee: Money) -> Self {
        Self {
            base_price,
            booking_fee,
        }
    }

    /// `None` when the amount does not fit in cents.
    pub fn subtotal(&self, seat_count: usize) -> Option<Money> {
        self.base_price.checked_times(seat_count)
    }

    pub fn total(&self, seat_count: usize) -> Option<Money> {
        self.subtotal(seat_count)?.checked_add(self.booking_fee)
    }

    pub fn quote(&self, seat_count: usize) -> BookingResult<PriceQuote> {
        let overflow = || BookingError::PriceOverflow(seat_count);
        let subtotal = self.subtotal(seat_count).ok_or_else(overflow)?;
        let total = subtotal.checked_add(self.booking_fee).ok_or_else(overflow)?;

        Ok(PriceQuote {
            seat_count,
            unit_price: self.base_price,
            subtotal,
            booking_fee: self.booking_fee,
            total,
        })
    }
}

impl Default for PricingPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_PRICE, DEFAULT_BOOKING_FEE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn three_seats_cost_40_97() {
        let quote = PricingPolicy::default().quote(3).unwrap();
        assert_eq!(quote.subtotal.to_string(), "38.97");
        assert_eq!(quote.total, Money::from_cents(4097));
        assert_eq!(quote.total.to_string(), "40.97");
    }

    #[test]
    fn fee_applies_once() {
        let pricing = PricingPolicy::default();
        assert_eq!(pricing.total(1), Some(Money::from_cents(1499)));
        assert_eq!(pricing.total(0), Some(DEFAULT_BOOKING_FEE));
    }

    #[test]
    fn oversized_amounts_are_rejected() {
        let pricing = PricingPolicy::new(Money::from_cents(i64::MAX / 2), DEFAULT_BOOKING_FEE);
        assert_eq!(pricing.subtotal(3), None);
        assert!(matches!(pricing.quote(3), Err(BookingError::PriceOverflow(3))));
    }

    proptest! {
        #[test]
        fn total_is_exact_to_the_cent(count in 0usize..=116, base in 0i64..100_000, fee in 0i64..10_000) {
            let pricing = PricingPolicy::new(Money::from_cents(base), Money::from_cents(fee));
            prop_assert_eq!(pricing.total(count).map(Money::cents), Some(count as i64 * base + fee));
        }
    }
}
