// Property-based tests for the GST regime split
//
// Any valid (line_total, rate, from, to) must produce exactly one regime shape,
// equal CGST/SGST halves when intra-state, and a total that is the sum of its parts.

use bizbooks::core::AppError;
use bizbooks::modules::taxes::{TaxBreakdown, TaxRegime, TaxRuleEngine};
use proptest::prelude::*;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

const STATES: &[&str] = &["", "West Bengal", "Maharashtra", "Karnataka", "Goa", "goa"];
const RATES: &[u32] = &[0, 3, 5, 9, 12, 18, 28];

fn amount(paise: u64) -> Decimal {
    Decimal::new(paise as i64, 2)
}

fn compute(total: Decimal, rate: Decimal, from: &str, to: &str) -> TaxBreakdown {
    TaxRuleEngine::new()
        .compute_tax(total, rate, from, to)
        .expect("valid input")
}

proptest! {
    #[test]
    fn test_regimes_are_exclusive(
        paise in 0u64..10_000_000_000u64,
        rate_idx in 0usize..RATES.len(),
        from_idx in 0usize..STATES.len(),
        to_idx in 0usize..STATES.len(),
    ) {
        let rate = Decimal::from(RATES[rate_idx]);
        let tax = compute(amount(paise), rate, STATES[from_idx], STATES[to_idx]);

        let has_igst = tax.igst_amount > Decimal::ZERO;
        let has_split = tax.cgst_amount > Decimal::ZERO || tax.sgst_amount > Decimal::ZERO;
        prop_assert!(!(has_igst && has_split), "IGST and CGST/SGST both set: {:?}", tax);
    }

    #[test]
    fn test_intra_state_halves_are_equal(
        paise in 0u64..10_000_000_000u64,
        rate in 0u32..=100u32,
        state_idx in 1usize..STATES.len(),
    ) {
        let rate = Decimal::from(rate);
        let state = STATES[state_idx];
        let tax = compute(amount(paise), rate, state, state);

        prop_assert_eq!(tax.cgst_amount, tax.sgst_amount);
        prop_assert_eq!(tax.cgst_rate, rate / dec!(2));
        prop_assert_eq!(tax.sgst_rate, rate / dec!(2));
        prop_assert_eq!(tax.igst_amount, Decimal::ZERO);
    }

    #[test]
    fn test_total_is_sum_of_components(
        paise in 0u64..10_000_000_000u64,
        rate in 0u32..=100u32,
        from_idx in 0usize..STATES.len(),
        to_idx in 0usize..STATES.len(),
    ) {
        let tax = compute(amount(paise), Decimal::from(rate), STATES[from_idx], STATES[to_idx]);

        prop_assert_eq!(
            tax.total_tax_amount,
            tax.igst_amount + tax.cgst_amount + tax.sgst_amount
        );
        prop_assert!(tax.is_consistent());
    }

    #[test]
    fn test_inter_state_is_rounded_full_rate(
        paise in 0u64..10_000_000_000u64,
        rate in 0u32..=100u32,
    ) {
        let total = amount(paise);
        let rate = Decimal::from(rate);
        let tax = compute(total, rate, "West Bengal", "Maharashtra");

        prop_assert_eq!(tax.igst_rate, rate);
        prop_assert_eq!(tax.igst_amount, (total * rate / dec!(100))
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero));
        prop_assert_eq!(tax.total_tax_amount, tax.igst_amount);
    }

    #[test]
    fn test_computation_is_deterministic(
        paise in 0u64..10_000_000_000u64,
        rate_idx in 0usize..RATES.len(),
        from_idx in 0usize..STATES.len(),
        to_idx in 0usize..STATES.len(),
    ) {
        let rate = Decimal::from(RATES[rate_idx]);
        let first = compute(amount(paise), rate, STATES[from_idx], STATES[to_idx]);
        let second = compute(amount(paise), rate, STATES[from_idx], STATES[to_idx]);
        prop_assert_eq!(first, second);
    }
}

#[test]
fn test_intra_state_eighteen_percent_on_thousand() {
    let tax = compute(dec!(1000), dec!(18), "West Bengal", "West Bengal");

    assert_eq!(tax.igst_rate, Decimal::ZERO);
    assert_eq!(tax.igst_amount, Decimal::ZERO);
    assert_eq!(tax.cgst_rate, dec!(9));
    assert_eq!(tax.cgst_amount, dec!(45));
    assert_eq!(tax.sgst_rate, dec!(9));
    assert_eq!(tax.sgst_amount, dec!(45));
    assert_eq!(tax.total_tax_amount, dec!(90));
    assert_eq!(tax.regime(), TaxRegime::IntraState);
}

#[test]
fn test_inter_state_eighteen_percent_on_thousand() {
    let tax = compute(dec!(1000), dec!(18), "West Bengal", "Maharashtra");

    assert_eq!(tax.igst_rate, dec!(18));
    assert_eq!(tax.igst_amount, dec!(180));
    assert_eq!(tax.cgst_amount, Decimal::ZERO);
    assert_eq!(tax.sgst_amount, Decimal::ZERO);
    assert_eq!(tax.total_tax_amount, dec!(180));
    assert_eq!(tax.regime(), TaxRegime::InterState);
}

#[test]
fn test_missing_jurisdiction_gives_zero_breakdown() {
    let tax = compute(dec!(1000), dec!(18), "", "Maharashtra");
    assert_eq!(tax, TaxBreakdown::zero());
}

#[test]
fn test_odd_rate_keeps_half_percent() {
    let tax = compute(dec!(1000), dec!(9), "Goa", "Goa");
    assert_eq!(tax.cgst_rate, dec!(4.5));
    assert_eq!(tax.sgst_rate, dec!(4.5));
    assert_eq!(tax.cgst_amount, tax.sgst_amount);
}

#[test]
fn test_state_names_are_not_normalized() {
    let tax = compute(dec!(100), dec!(18), "Delhi", "NCT of Delhi");
    assert_eq!(tax.regime(), TaxRegime::InterState);
}

#[test]
fn test_negative_amount_is_invalid() {
    let err = TaxRuleEngine::new()
        .compute_tax(dec!(-1), dec!(18), "Goa", "Goa")
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidAmount(_)));
}

#[test]
fn test_rate_above_hundred_is_rejected() {
    let err = TaxRuleEngine::new()
        .compute_tax(dec!(100), dec!(101), "Goa", "Kerala")
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}
