//! Presentation formatting for quotes. Rounding happens here and nowhere else.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::quote::LoanQuoteResult;
use crate::types::{Currency, Money, Months};

/// Maximum fraction digits shown for a currency amount.
pub const DISPLAY_DECIMALS: u32 = 2;

/// Render `amount` with the currency symbol, thousands separators and at
/// most two fraction digits, dropping trailing zeros (`₦186,666.67`, `₦208,000`).
pub fn format_money(amount: Money, currency: &Currency) -> String {
    let rounded = round_for_display(amount).normalize();
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let digits = rounded.abs().to_string();
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (digits.as_str(), None),
    };

    let mut out = format!("{sign}{}{}", currency.symbol(), group_thousands(int_part));
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

fn group_thousands(int_part: &str) -> String {
    let len = int_part.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// "1 month" / "3 months".
pub fn tenure_label(months: Months) -> String {
    if months == 1 {
        "1 month".to_string()
    } else {
        format!("{months} months")
    }
}

/// The four lines a calculator panel shows once a quote is ready.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteDisplay {
    pub upfront_fees: String,
    pub total_interest: String,
    pub total_repayable: String,
    pub tenure: String,
    pub monthly_installment: String,
}

impl QuoteDisplay {
    pub fn from_quote(quote: &LoanQuoteResult, tenure_months: Months, currency: &Currency) -> Self {
        Self {
            upfront_fees: format_money(quote.upfront_fees, currency),
            total_interest: format_money(quote.total_interest, currency),
            total_repayable: format_money(quote.total_repayable, currency),
            tenure: tenure_label(tenure_months),
            monthly_installment: format_money(quote.monthly_installment, currency),
        }
    }
}

/// Round an amount for display without formatting it.
pub fn round_for_display(amount: Money) -> Decimal {
    amount.round_dp_with_strategy(DISPLAY_DECIMALS, RoundingStrategy::MidpointAwayFromZero)
}
