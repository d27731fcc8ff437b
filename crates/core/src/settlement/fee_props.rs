//! Property tests for settlement math.

use haulpay_shared::types::{AccountId, Currency};
use proptest::prelude::*;
use rust_decimal::Decimal;

use crate::ledger::types::signed_amount;

use super::fee::FeeBreakdown;
use super::lines::{SettlementAccounts, build_settlement_lines};

fn money_strategy(max: i64) -> impl Strategy<Value = Decimal> {
    (0i64..max).prop_map(|n| Decimal::new(n, 2))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Payout plus fee always reassembles the fare exactly.
    #[test]
    fn prop_fare_splits_exactly(
        base in money_strategy(500_000),
        rate in money_strategy(10_000),
        distance in (1i64..5_000i64).prop_map(Decimal::from),
        fee in money_strategy(100_000),
        discount in money_strategy(100_000),
    ) {
        let fb = FeeBreakdown {
            base_fare: base,
            per_km_rate: rate,
            trip_distance_km: distance,
            service_fee: fee,
            discount,
        };
        let currency = Currency::Usd;
        prop_assert_eq!(
            fb.carrier_payout(currency) + fb.fee_due(currency),
            fb.total_fare(currency)
        );
        prop_assert!(fb.fee_due(currency) >= Decimal::ZERO);
    }

    /// Whenever line construction succeeds, the lines net to zero.
    #[test]
    fn prop_settlement_lines_net_zero(
        base in money_strategy(500_000),
        rate in money_strategy(10_000),
        distance in (1i64..5_000i64).prop_map(Decimal::from),
        fee in money_strategy(100_000),
    ) {
        let fb = FeeBreakdown {
            base_fare: base,
            per_km_rate: rate,
            trip_distance_km: distance,
            service_fee: fee,
            discount: Decimal::ZERO,
        };
        let accounts = SettlementAccounts {
            payer: AccountId::new(),
            carrier: AccountId::new(),
            platform_revenue: AccountId::new(),
        };
        if let Ok(lines) = build_settlement_lines(&accounts, &fb, Currency::Usd) {
            let net: Decimal = lines.iter().map(|l| signed_amount(l.side, l.amount)).sum();
            prop_assert_eq!(net, Decimal::ZERO);
            prop_assert!(lines.iter().all(|l| l.amount > Decimal::ZERO));
        }
    }
}
