//! Fee breakdown math for load settlement.

use haulpay_shared::types::Currency;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Fee breakdown for one load, as returned by the pricing collaborator.
///
/// All derived amounts are rounded to the currency's minor unit with
/// banker's rounding before they reach the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeBreakdown {
    /// Fixed base fare.
    pub base_fare: Decimal,
    /// Rate per kilometre.
    pub per_km_rate: Decimal,
    /// Trip distance in kilometres.
    pub trip_distance_km: Decimal,
    /// Platform service fee before discount.
    pub service_fee: Decimal,
    /// Service-fee discount (promotions, volume deals).
    pub discount: Decimal,
}

impl FeeBreakdown {
    /// Total fare charged to the paying party:
    /// `base_fare + per_km_rate * trip_distance_km`.
    #[must_use]
    pub fn total_fare(&self, currency: Currency) -> Decimal {
        currency.round(self.base_fare + self.per_km_rate * self.trip_distance_km)
    }

    /// Service fee actually due: `service_fee - discount`, floored at zero.
    #[must_use]
    pub fn fee_due(&self, currency: Currency) -> Decimal {
        let due = self.service_fee - self.discount;
        if due < Decimal::ZERO {
            Decimal::ZERO
        } else {
            currency.round(due)
        }
    }

    /// Amount credited to the carrier: `total_fare - fee_due`.
    #[must_use]
    pub fn carrier_payout(&self, currency: Currency) -> Decimal {
        self.total_fare(currency) - self.fee_due(currency)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn breakdown(service_fee: Decimal, discount: Decimal) -> FeeBreakdown {
        FeeBreakdown {
            base_fare: dec!(500),
            per_km_rate: dec!(15.5),
            trip_distance_km: dec!(515),
            service_fee,
            discount,
        }
    }

    #[test]
    fn test_total_fare_standard_tariff() {
        // 500 + 15.5 * 515 = 8482.5
        let fb = breakdown(dec!(848.25), Decimal::ZERO);
        assert_eq!(fb.total_fare(Currency::Usd), dec!(8482.50));
    }

    #[test]
    fn test_carrier_payout() {
        let fb = breakdown(dec!(848.25), Decimal::ZERO);
        assert_eq!(fb.fee_due(Currency::Usd), dec!(848.25));
        assert_eq!(fb.carrier_payout(Currency::Usd), dec!(7634.25));
    }

    #[test]
    fn test_discount_reduces_fee() {
        let fb = breakdown(dec!(848.25), dec!(48.25));
        assert_eq!(fb.fee_due(Currency::Usd), dec!(800.00));
        assert_eq!(fb.carrier_payout(Currency::Usd), dec!(7682.50));
    }

    #[test]
    fn test_discount_floors_fee_at_zero() {
        let fb = breakdown(dec!(100), dec!(200));
        assert_eq!(fb.fee_due(Currency::Usd), Decimal::ZERO);
        assert_eq!(fb.carrier_payout(Currency::Usd), fb.total_fare(Currency::Usd));
    }

    #[test]
    fn test_fare_rounded_to_minor_unit() {
        let fb = FeeBreakdown {
            base_fare: dec!(10),
            per_km_rate: dec!(0.333),
            trip_distance_km: dec!(10),
            service_fee: Decimal::ZERO,
            discount: Decimal::ZERO,
        };
        // 10 + 3.33 = 13.33 after rounding 13.330
        assert_eq!(fb.total_fare(Currency::Usd), dec!(13.33));
    }
}
