//! Flat-rate repayment quote.
//!
//! Interest accrues monthly on the original principal and is never
//! compounded. Management and insurance fees are charged once on the
//! principal and collected before disbursement, so they are reported
//! separately and excluded from the repayable total.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::debug;

use super::format::{format_money, tenure_label};
use super::product::{LoanLimits, LoanProduct, RateSchedule};
use crate::types::{with_metadata, ComputationOutput, Money, Months};
use crate::MicroloanResult;

// ---------------------------------------------------------------------------
// Input / Output Types
// ---------------------------------------------------------------------------

/// Values as entered by the applicant. `None` means the field is still empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoanQuoteInput {
    #[serde(default)]
    pub principal: Option<Money>,
    #[serde(default)]
    pub tenure_months: Option<Months>,
}

/// Quote figures. All zero unless both inputs are valid.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoanQuoteResult {
    pub management_fee: Money,
    pub insurance_fee: Money,
    /// management_fee + insurance_fee, payable once before disbursement.
    pub upfront_fees: Money,
    pub total_interest: Money,
    /// principal + total_interest. Fees are not included.
    pub total_repayable: Money,
    pub monthly_installment: Money,
}

/// Display state of a single input field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum FieldState {
    /// Nothing entered yet. Not an error.
    Incomplete,
    /// Entered but outside the product limits. `message` is shown inline.
    OutOfRange { message: String },
    Valid,
}

impl FieldState {
    pub fn is_valid(&self) -> bool {
        matches!(self, FieldState::Valid)
    }
}

/// Quote envelope used by the CLI and bindings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanQuoteOutput {
    /// True when both fields are valid and the figures may be displayed.
    pub ready: bool,
    pub principal_state: FieldState,
    pub tenure_state: FieldState,
    #[serde(flatten)]
    pub quote: LoanQuoteResult,
}

// ---------------------------------------------------------------------------
// Validity predicates
// ---------------------------------------------------------------------------

/// Principal check against the default product (200,000 to 1,000,000 inclusive).
pub fn is_valid_principal(principal: Money) -> bool {
    LoanLimits::default().is_valid_principal(principal)
}

/// Tenure check against the default product (1 to 6 months inclusive).
pub fn is_valid_tenure(tenure_months: Months) -> bool {
    LoanLimits::default().is_valid_tenure(tenure_months)
}

impl LoanQuoteInput {
    pub fn new(principal: Money, tenure_months: Months) -> Self {
        Self {
            principal: Some(principal),
            tenure_months: Some(tenure_months),
        }
    }

    pub fn principal_state(&self, product: &LoanProduct) -> FieldState {
        let limits = &product.limits;
        match self.principal {
            None => FieldState::Incomplete,
            Some(p) if limits.is_valid_principal(p) => FieldState::Valid,
            Some(_) => FieldState::OutOfRange {
                message: format!(
                    "Amount must be between {} and {}",
                    format_money(limits.min_principal, &product.currency),
                    format_money(limits.max_principal, &product.currency)
                ),
            },
        }
    }

    pub fn tenure_state(&self, product: &LoanProduct) -> FieldState {
        let limits = &product.limits;
        match self.tenure_months {
            None => FieldState::Incomplete,
            Some(t) if limits.is_valid_tenure(t) => FieldState::Valid,
            Some(t) if t < limits.min_tenure_months => FieldState::OutOfRange {
                message: format!(
                    "Minimum tenure is {}",
                    tenure_label(limits.min_tenure_months)
                ),
            },
            Some(_) => FieldState::OutOfRange {
                message: format!(
                    "Maximum tenure is {}",
                    tenure_label(limits.max_tenure_months)
                ),
            },
        }
    }

    /// Both fields entered and within limits.
    pub fn is_ready(&self, product: &LoanProduct) -> bool {
        self.ready_terms(&product.limits).is_some()
    }

    /// The (principal, tenure) pair when both are valid.
    pub(crate) fn ready_terms(&self, limits: &LoanLimits) -> Option<(Money, Months)> {
        match (self.principal, self.tenure_months) {
            (Some(p), Some(t)) if limits.is_valid_principal(p) && limits.is_valid_tenure(t) => {
                Some((p, t))
            }
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Quote against the default product. Never fails; invalid or missing
/// input yields an all-zero result that callers must not display.
pub fn quote_loan(input: &LoanQuoteInput) -> LoanQuoteResult {
    quote_loan_with(input, &LoanProduct::default())
}

/// Quote against an explicit product. Full precision, no rounding.
///
/// A product whose figures overflow `Decimal` quotes as all zero; such a
/// product never passes `LoanProduct::validate`.
pub fn quote_loan_with(input: &LoanQuoteInput, product: &LoanProduct) -> LoanQuoteResult {
    let Some((principal, tenure)) = input.ready_terms(&product.limits) else {
        return LoanQuoteResult::default();
    };

    flat_quote(principal, tenure, &product.rates).unwrap_or_else(|| {
        debug!(%principal, tenure, "quote overflowed decimal range");
        LoanQuoteResult::default()
    })
}

/// Flat-rate figures with checked arithmetic. `None` on overflow.
pub(crate) fn flat_quote(
    principal: Money,
    tenure: Months,
    rates: &RateSchedule,
) -> Option<LoanQuoteResult> {
    let periods = Decimal::from(tenure);

    let total_interest = principal
        .checked_mul(rates.monthly_interest_rate)?
        .checked_mul(periods)?;
    let management_fee = principal.checked_mul(rates.management_fee_rate)?;
    let insurance_fee = principal.checked_mul(rates.insurance_fee_rate)?;
    let upfront_fees = principal.checked_mul(rates.upfront_fee_rate())?;
    let total_repayable = principal.checked_add(total_interest)?;
    let monthly_installment = total_repayable.checked_div(periods)?;

    Some(LoanQuoteResult {
        management_fee,
        insurance_fee,
        upfront_fees,
        total_interest,
        total_repayable,
        monthly_installment,
    })
}

/// Validate the product, quote, and wrap the figures with field states.
///
/// Out-of-range input is a normal state and is reported through
/// `warnings` and the field states, not as an error.
pub fn price_loan(
    input: &LoanQuoteInput,
    product: &LoanProduct,
) -> MicroloanResult<ComputationOutput<LoanQuoteOutput>> {
    let start = Instant::now();
    product.validate()?;

    let principal_state = input.principal_state(product);
    let tenure_state = input.tenure_state(product);

    let mut warnings = Vec::new();
    for (field, state) in [("principal", &principal_state), ("tenure_months", &tenure_state)] {
        match state {
            FieldState::Incomplete => warnings.push(format!("{field} has not been entered")),
            FieldState::OutOfRange { message } => warnings.push(message.clone()),
            FieldState::Valid => {}
        }
    }

    let quote = quote_loan_with(input, product);
    let ready = principal_state.is_valid() && tenure_state.is_valid();

    debug!(
        principal = ?input.principal,
        tenure = ?input.tenure_months,
        ready,
        monthly_installment = %quote.monthly_installment,
        "loan quoted"
    );

    let output = LoanQuoteOutput {
        ready,
        principal_state,
        tenure_state,
        quote,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Flat monthly interest on original principal; upfront fees excluded from repayment",
        product,
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
