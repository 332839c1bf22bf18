//! Loan product definition: rate schedule and eligibility limits.
//!
//! A product is fixed for the lifetime of a process. Quotes never override
//! it per request; the CLI may load a product file once at start-up.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::quote::flat_quote;
use crate::error::MicroloanError;
use crate::types::{Currency, Money, Months, Rate};
use crate::MicroloanResult;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Flat monthly interest on the full principal (4%).
pub const MONTHLY_INTEREST_RATE: Rate = dec!(0.04);
pub const MANAGEMENT_FEE_RATE: Rate = dec!(0.01);
pub const INSURANCE_FEE_RATE: Rate = dec!(0.01);

pub const MIN_PRINCIPAL: Money = dec!(200000);
pub const MAX_PRINCIPAL: Money = dec!(1000000);
pub const MIN_TENURE_MONTHS: Months = 1;
pub const MAX_TENURE_MONTHS: Months = 6;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Rates applied to the principal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateSchedule {
    /// Charged per month on the original principal, never compounded.
    pub monthly_interest_rate: Rate,
    /// One-off fee, collected before disbursement.
    pub management_fee_rate: Rate,
    /// One-off fee, collected before disbursement.
    pub insurance_fee_rate: Rate,
}

impl Default for RateSchedule {
    fn default() -> Self {
        Self {
            monthly_interest_rate: MONTHLY_INTEREST_RATE,
            management_fee_rate: MANAGEMENT_FEE_RATE,
            insurance_fee_rate: INSURANCE_FEE_RATE,
        }
    }
}

impl RateSchedule {
    /// Combined upfront fee rate (management + insurance).
    pub fn upfront_fee_rate(&self) -> Rate {
        self.management_fee_rate + self.insurance_fee_rate
    }
}

/// Inclusive eligibility bounds for principal and tenure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanLimits {
    pub min_principal: Money,
    pub max_principal: Money,
    pub min_tenure_months: Months,
    pub max_tenure_months: Months,
}

impl Default for LoanLimits {
    fn default() -> Self {
        Self {
            min_principal: MIN_PRINCIPAL,
            max_principal: MAX_PRINCIPAL,
            min_tenure_months: MIN_TENURE_MONTHS,
            max_tenure_months: MAX_TENURE_MONTHS,
        }
    }
}

impl LoanLimits {
    pub fn is_valid_principal(&self, principal: Money) -> bool {
        principal >= self.min_principal && principal <= self.max_principal
    }

    pub fn is_valid_tenure(&self, tenure_months: Months) -> bool {
        tenure_months >= self.min_tenure_months && tenure_months <= self.max_tenure_months
    }
}

/// A complete loan product as offered to applicants.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoanProduct {
    #[serde(default)]
    pub rates: RateSchedule,
    #[serde(default)]
    pub limits: LoanLimits,
    #[serde(default)]
    pub currency: Currency,
}

impl LoanProduct {
    /// Reject products that could never produce a sensible quote.
    pub fn validate(&self) -> MicroloanResult<()> {
        let rates = &self.rates;
        for (name, rate) in [
            ("monthly_interest_rate", rates.monthly_interest_rate),
            ("management_fee_rate", rates.management_fee_rate),
            ("insurance_fee_rate", rates.insurance_fee_rate),
        ] {
            if rate < Decimal::ZERO {
                return Err(MicroloanError::InvalidProduct(format!(
                    "{name} must be non-negative, got {rate}"
                )));
            }
            if rate >= Decimal::ONE {
                return Err(MicroloanError::InvalidProduct(format!(
                    "{name} is a decimal rate (0.04 = 4%), got {rate}"
                )));
            }
        }

        let limits = &self.limits;
        if limits.min_principal <= Decimal::ZERO {
            return Err(MicroloanError::InvalidProduct(
                "min_principal must be positive".into(),
            ));
        }
        if limits.min_principal > limits.max_principal {
            return Err(MicroloanError::InvalidProduct(format!(
                "min_principal {} exceeds max_principal {}",
                limits.min_principal, limits.max_principal
            )));
        }
        if limits.min_tenure_months == 0 {
            return Err(MicroloanError::InvalidProduct(
                "min_tenure_months must be at least 1".into(),
            ));
        }
        if limits.min_tenure_months > limits.max_tenure_months {
            return Err(MicroloanError::InvalidProduct(format!(
                "min_tenure_months {} exceeds max_tenure_months {}",
                limits.min_tenure_months, limits.max_tenure_months
            )));
        }

        // Quotes grow with principal and tenure, so the largest eligible
        // loan bounds every figure the product can produce.
        if flat_quote(limits.max_principal, limits.max_tenure_months, rates).is_none() {
            return Err(MicroloanError::InvalidProduct(format!(
                "max_principal {} over {} months exceeds the representable range",
                limits.max_principal, limits.max_tenure_months
            )));
        }

        debug!(
            monthly_rate = %rates.monthly_interest_rate,
            min_principal = %limits.min_principal,
            max_principal = %limits.max_principal,
            max_tenure = limits.max_tenure_months,
            "loan product validated"
        );
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
