use microloan_core::lending::format::{format_money, QuoteDisplay};
use microloan_core::lending::product::LoanProduct;
use microloan_core::lending::quote::{
    is_valid_principal, is_valid_tenure, price_loan, quote_loan, FieldState, LoanQuoteInput,
    LoanQuoteResult,
};
use microloan_core::lending::schedule::{repayment_schedule, round_schedule};
use microloan_core::Currency;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// Boundaries
// ===========================================================================

#[test]
fn test_principal_bounds_inclusive() {
    assert!(is_valid_principal(dec!(200000)));
    assert!(is_valid_principal(dec!(1000000)));
    assert!(!is_valid_principal(dec!(199999.99)));
    assert!(!is_valid_principal(dec!(1000000.01)));
}

#[test]
fn test_tenure_bounds_inclusive() {
    assert!(is_valid_tenure(1));
    assert!(is_valid_tenure(6));
    assert!(!is_valid_tenure(0));
    assert!(!is_valid_tenure(7));
}

// ===========================================================================
// Worked scenarios
// ===========================================================================

#[test]
fn test_five_hundred_thousand_over_three_months() {
    let q = quote_loan(&LoanQuoteInput::new(dec!(500000), 3));

    // 500,000 * 0.04 * 3 = 60,000
    assert_eq!(q.total_interest, dec!(60000));
    assert_eq!(q.total_repayable, dec!(560000));
    assert_eq!(q.monthly_installment.round_dp(2), dec!(186666.67));
    assert_eq!(q.upfront_fees, dec!(10000));
}

#[test]
fn test_two_hundred_thousand_over_one_month() {
    let q = quote_loan(&LoanQuoteInput::new(dec!(200000), 1));
    assert_eq!(q.total_interest, dec!(8000));
    assert_eq!(q.total_repayable, dec!(208000));
    assert_eq!(q.monthly_installment, dec!(208000));
    assert_eq!(q.upfront_fees, dec!(4000));
}

#[test]
fn test_below_minimum_never_displayed() {
    let product = LoanProduct::default();
    for tenure in 1..=6 {
        let input = LoanQuoteInput::new(dec!(150000), tenure);
        assert_eq!(quote_loan(&input), LoanQuoteResult::default());
        assert!(!input.is_ready(&product));
    }
}

#[test]
fn test_empty_fields_are_incomplete_not_errors() {
    let product = LoanProduct::default();
    let out = price_loan(&LoanQuoteInput::default(), &product).unwrap();
    assert_eq!(out.result.principal_state, FieldState::Incomplete);
    assert_eq!(out.result.tenure_state, FieldState::Incomplete);
    assert!(!out.result.ready);
}

#[test]
fn test_custom_product_changes_limits_and_messages() {
    let mut product = LoanProduct::default();
    product.limits.max_tenure_months = 12;
    product.currency = Currency::USD;
    product.limits.min_principal = dec!(500);
    product.limits.max_principal = dec!(5000);

    let input = LoanQuoteInput::new(dec!(6000), 12);
    match input.principal_state(&product) {
        FieldState::OutOfRange { message } => {
            assert_eq!(message, "Amount must be between $500 and $5,000")
        }
        other => panic!("unexpected state {other:?}"),
    }
    assert_eq!(input.tenure_state(&product), FieldState::Valid);
}

#[test]
fn test_display_and_schedule_agree() {
    let product = LoanProduct::default();
    let input = LoanQuoteInput::new(dec!(750000), 4);
    let q = quote_loan(&input);
    let rows = round_schedule(&repayment_schedule(&input, &product).unwrap(), 2);
    let display = QuoteDisplay::from_quote(&q, 4, &product.currency);

    // 750,000 * 1.16 / 4 = 217,500
    assert_eq!(display.monthly_installment, "₦217,500");
    assert_eq!(format_money(rows[0].amount, &Currency::NGN), "₦217,500");
    assert_eq!(rows.len(), 4);
}

// ===========================================================================
// Properties
// ===========================================================================

fn valid_principal() -> impl Strategy<Value = Decimal> {
    // whole kobo between 200,000.00 and 1,000,000.00
    (20_000_000i64..=100_000_000i64).prop_map(|kobo| Decimal::new(kobo, 2))
}

proptest! {
    #[test]
    fn total_repayable_is_principal_plus_flat_interest(
        principal in valid_principal(),
        tenure in 1u32..=6,
    ) {
        let q = quote_loan(&LoanQuoteInput::new(principal, tenure));
        let expected = principal + principal * dec!(0.04) * Decimal::from(tenure);
        prop_assert_eq!(q.total_repayable, expected);
    }

    #[test]
    fn installments_multiply_back_to_total(
        principal in valid_principal(),
        tenure in 1u32..=6,
    ) {
        let q = quote_loan(&LoanQuoteInput::new(principal, tenure));
        let diff = (q.monthly_installment * Decimal::from(tenure) - q.total_repayable).abs();
        prop_assert!(diff < dec!(0.000001));
    }

    #[test]
    fn upfront_fees_are_two_percent_regardless_of_tenure(
        principal in valid_principal(),
        tenure in 1u32..=6,
    ) {
        let q = quote_loan(&LoanQuoteInput::new(principal, tenure));
        prop_assert_eq!(q.upfront_fees, principal * dec!(0.02));
    }

    #[test]
    fn out_of_range_tenure_yields_zero(
        principal in valid_principal(),
        tenure in prop_oneof![Just(0u32), 7u32..100],
    ) {
        let q = quote_loan(&LoanQuoteInput::new(principal, tenure));
        prop_assert_eq!(q, LoanQuoteResult::default());
    }

    #[test]
    fn rounded_schedule_sums_to_rounded_total(
        principal in valid_principal(),
        tenure in 1u32..=6,
    ) {
        let input = LoanQuoteInput::new(principal, tenure);
        let product = LoanProduct::default();
        let q = quote_loan(&input);
        let rows = round_schedule(&repayment_schedule(&input, &product).unwrap(), 2);
        let sum: Decimal = rows.iter().map(|r| r.amount).sum();
        prop_assert_eq!(sum, q.total_repayable.round_dp(2));
        prop_assert_eq!(rows.len() as u32, tenure);
    }
}
