//! Month-by-month breakdown of a flat-rate repayment.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::product::LoanProduct;
use super::quote::{flat_quote, LoanQuoteInput};
use crate::types::{Money, Months};

/// One scheduled repayment. Balances track the outstanding repayable
/// amount (principal plus unpaid flat interest).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Installment {
    pub month: Months,
    pub opening_balance: Money,
    pub principal_portion: Money,
    pub interest_portion: Money,
    pub amount: Money,
    pub closing_balance: Money,
}

/// Build the schedule, or `None` while the input is not ready (or the
/// product's figures overflow `Decimal`).
///
/// The final installment takes whatever remains so that the amounts sum
/// to `total_repayable` exactly and the last closing balance is zero.
pub fn repayment_schedule(input: &LoanQuoteInput, product: &LoanProduct) -> Option<Vec<Installment>> {
    let (principal, tenure) = input.ready_terms(&product.limits)?;
    let quote = flat_quote(principal, tenure, &product.rates)?;

    let periods = Decimal::from(tenure);
    let principal_portion = principal / periods;
    let interest_portion = principal * product.rates.monthly_interest_rate;

    let mut rows = Vec::with_capacity(tenure as usize);
    let mut balance = quote.total_repayable;
    let mut principal_left = principal;
    let mut interest_left = quote.total_interest;

    for month in 1..=tenure {
        let last = month == tenure;
        let (p, i, amount) = if last {
            (principal_left, interest_left, balance)
        } else {
            (principal_portion, interest_portion, quote.monthly_installment)
        };
        let closing = balance - amount;
        rows.push(Installment {
            month,
            opening_balance: balance,
            principal_portion: p,
            interest_portion: i,
            amount,
            closing_balance: closing,
        });
        balance = closing;
        principal_left -= p;
        interest_left -= i;
    }

    Some(rows)
}

/// Round a schedule for display to `dp` places.
///
/// Every row except the last is rounded half away from zero; the last row
/// absorbs the residual so the rounded amounts still sum to the rounded
/// total, and its closing balance stays zero.
pub fn round_schedule(rows: &[Installment], dp: u32) -> Vec<Installment> {
    let round = |v: Decimal| v.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);

    let total: Money = round(rows.iter().map(|r| r.amount).sum());
    let total_principal: Money = round(rows.iter().map(|r| r.principal_portion).sum());

    let mut out = Vec::with_capacity(rows.len());
    let mut balance = total;
    let mut principal_left = total_principal;

    for (idx, row) in rows.iter().enumerate() {
        let last = idx + 1 == rows.len();
        let (amount, principal_portion) = if last {
            (balance, principal_left)
        } else {
            (round(row.amount), round(row.principal_portion))
        };
        let closing = balance - amount;
        out.push(Installment {
            month: row.month,
            opening_balance: balance,
            principal_portion,
            interest_portion: amount - principal_portion,
            amount,
            closing_balance: closing,
        });
        balance = closing;
        principal_left -= principal_portion;
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn schedule(principal: Money, tenure: Months) -> Vec<Installment> {
        repayment_schedule(
            &LoanQuoteInput::new(principal, tenure),
            &LoanProduct::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_not_ready_has_no_schedule() {
        let product = LoanProduct::default();
        assert!(repayment_schedule(&LoanQuoteInput::default(), &product).is_none());
        assert!(repayment_schedule(&LoanQuoteInput::new(dec!(150000), 3), &product).is_none());
        assert!(repayment_schedule(&LoanQuoteInput::new(dec!(500000), 7), &product).is_none());
    }

    #[test]
    fn test_even_schedule() {
        let rows = schedule(dec!(600000), 3);
        assert_eq!(rows.len(), 3);
        // 600k * 4% = 24k interest a month, 200k principal a month
        for row in &rows {
            assert_eq!(row.principal_portion, dec!(200000));
            assert_eq!(row.interest_portion, dec!(24000));
            assert_eq!(row.amount, dec!(224000));
        }
        assert_eq!(rows[0].opening_balance, dec!(672000));
        assert_eq!(rows[1].opening_balance, dec!(448000));
        assert_eq!(rows[2].closing_balance, Decimal::ZERO);
    }

    #[test]
    fn test_uneven_schedule_sums_exactly() {
        let rows = schedule(dec!(500000), 3);
        let total: Decimal = rows.iter().map(|r| r.amount).sum();
        assert_eq!(total, dec!(560000));
        let principal: Decimal = rows.iter().map(|r| r.principal_portion).sum();
        assert_eq!(principal, dec!(500000));
        let interest: Decimal = rows.iter().map(|r| r.interest_portion).sum();
        assert_eq!(interest, dec!(60000));
        assert_eq!(rows.last().unwrap().closing_balance, Decimal::ZERO);
    }

    #[test]
    fn test_single_month_schedule() {
        let rows = schedule(dec!(200000), 1);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].amount, dec!(208000));
        assert_eq!(rows[0].interest_portion, dec!(8000));
    }

    #[test]
    fn test_round_schedule_last_row_absorbs_residual() {
        let rows = round_schedule(&schedule(dec!(500000), 3), 2);
        assert_eq!(rows[0].amount, dec!(186666.67));
        assert_eq!(rows[1].amount, dec!(186666.67));
        assert_eq!(rows[2].amount, dec!(186666.66));
        let total: Decimal = rows.iter().map(|r| r.amount).sum();
        assert_eq!(total, dec!(560000));
        assert_eq!(rows[2].closing_balance, Decimal::ZERO);
        for row in &rows {
            assert_eq!(row.principal_portion + row.interest_portion, row.amount);
        }
    }

    #[test]
    fn test_overflowing_product_has_no_schedule() {
        let mut product = LoanProduct::default();
        product.limits.max_principal = Decimal::MAX;
        let input = LoanQuoteInput::new(dec!(70000000000000000000000000000), 6);
        assert!(repayment_schedule(&input, &product).is_none());
    }

    #[test]
    fn test_round_schedule_whole_naira() {
        let rows = round_schedule(&schedule(dec!(333333), 6), 0);
        let total: Decimal = rows.iter().map(|r| r.amount).sum();
        // 333,333 + 333,333 * 0.24 = 413,332.92 -> 413,333
        assert_eq!(total, dec!(413333));
        assert_eq!(rows.last().unwrap().closing_balance, Decimal::ZERO);
    }
}
