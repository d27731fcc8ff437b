//! Property tests for journal entry validation.

use haulpay_shared::types::AccountId;
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::error::LedgerError;
use super::types::{EntryInput, EntrySide, LineInput, TransactionType, signed_amount};
use super::validation::validate_entry;

/// Strategy for positive minor-unit amounts.
fn amount_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000i64).prop_map(|n| Decimal::new(n, 2))
}

fn make_input(lines: Vec<LineInput>) -> EntryInput {
    EntryInput {
        transaction_type: TransactionType::Adjustment,
        reference: "prop".to_string(),
        description: "property test".to_string(),
        lines,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Splitting one debit across any number of credit lines that sum to
    /// the same total always validates.
    #[test]
    fn prop_balanced_split_validates(
        parts in proptest::collection::vec(amount_strategy(), 1..8),
    ) {
        let total: Decimal = parts.iter().copied().sum();
        let mut lines = vec![LineInput::debit(AccountId::new(), total)];
        lines.extend(parts.iter().map(|p| LineInput::credit(AccountId::new(), *p)));

        let totals = validate_entry(&make_input(lines)).unwrap();
        prop_assert!(totals.is_balanced);
        prop_assert_eq!(totals.debit, total);
        prop_assert_eq!(totals.credit, total);
    }

    /// Perturbing any line of a balanced entry breaks validation.
    #[test]
    fn prop_perturbed_entry_fails(
        amount in amount_strategy(),
        delta in amount_strategy(),
    ) {
        let lines = vec![
            LineInput::debit(AccountId::new(), amount + delta),
            LineInput::credit(AccountId::new(), amount),
        ];
        prop_assert!(
            matches!(
                validate_entry(&make_input(lines)),
                Err(LedgerError::Unbalanced { .. })
            ),
            "expected Err(LedgerError::Unbalanced)"
        );
    }

    /// The signed amounts of a balanced entry always sum to zero.
    #[test]
    fn prop_signed_amounts_sum_to_zero(
        parts in proptest::collection::vec(amount_strategy(), 1..8),
    ) {
        let total: Decimal = parts.iter().copied().sum();
        let mut lines = vec![LineInput::debit(AccountId::new(), total)];
        lines.extend(parts.iter().map(|p| LineInput::credit(AccountId::new(), *p)));

        let signed: Decimal = lines
            .iter()
            .map(|l| signed_amount(l.side, l.amount))
            .sum();
        prop_assert_eq!(signed, Decimal::ZERO);
    }

    /// Single-sided entries never validate, whatever the amounts.
    #[test]
    fn prop_single_sided_fails(
        amounts in proptest::collection::vec(amount_strategy(), 2..6),
        side_debit in any::<bool>(),
    ) {
        let side = if side_debit { EntrySide::Debit } else { EntrySide::Credit };
        let lines: Vec<LineInput> = amounts
            .iter()
            .map(|a| LineInput { account_id: AccountId::new(), side, amount: *a })
            .collect();
        prop_assert!(matches!(
            validate_entry(&make_input(lines)),
            Err(LedgerError::SingleSided)
        ));
    }
}
