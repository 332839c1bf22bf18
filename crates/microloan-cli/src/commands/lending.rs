use clap::Args;
use rust_decimal::Decimal;
use serde_json::{json, Value};
use tracing::debug;

use microloan_core::lending::format::QuoteDisplay;
use microloan_core::lending::product::LoanProduct;
use microloan_core::lending::quote::{self, LoanQuoteInput};
use microloan_core::lending::schedule;

use crate::input;

/// Arguments shared by quote and schedule
#[derive(Args)]
pub struct TermsArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Amount requested
    #[arg(long, alias = "amount")]
    pub principal: Option<Decimal>,

    /// Repayment period in whole months
    #[arg(long, alias = "tenure-months")]
    pub tenure: Option<u32>,
}

/// Arguments for a loan quote
#[derive(Args)]
pub struct QuoteArgs {
    #[command(flatten)]
    pub terms: TermsArgs,
}

/// Arguments for a repayment schedule
#[derive(Args)]
pub struct ScheduleArgs {
    #[command(flatten)]
    pub terms: TermsArgs,

    /// Round amounts to this many decimal places; the last month absorbs the remainder
    #[arg(long)]
    pub round: Option<u32>,
}

fn resolve_terms(args: &TermsArgs) -> Result<LoanQuoteInput, Box<dyn std::error::Error>> {
    if let Some(ref path) = args.input {
        return input::file::read_json(path);
    }
    if args.principal.is_some() || args.tenure.is_some() {
        return Ok(LoanQuoteInput {
            principal: args.principal,
            tenure_months: args.tenure,
        });
    }
    Ok(input::stdin::read_stdin()?.unwrap_or_default())
}

pub fn run_quote(args: QuoteArgs, product: &LoanProduct) -> Result<Value, Box<dyn std::error::Error>> {
    let terms = resolve_terms(&args.terms)?;
    debug!(?terms, "quote requested");

    let output = quote::price_loan(&terms, product)?;
    let display = match (output.result.ready, terms.tenure_months) {
        (true, Some(tenure)) => Some(QuoteDisplay::from_quote(
            &output.result.quote,
            tenure,
            &product.currency,
        )),
        _ => None,
    };

    let mut value = serde_json::to_value(&output)?;
    if let (Some(display), Value::Object(map)) = (display, &mut value) {
        map.insert("display".into(), serde_json::to_value(display)?);
    }
    Ok(value)
}

pub fn run_schedule(args: ScheduleArgs, product: &LoanProduct) -> Result<Value, Box<dyn std::error::Error>> {
    let terms = resolve_terms(&args.terms)?;
    debug!(?terms, round = ?args.round, "schedule requested");

    let Some(rows) = schedule::repayment_schedule(&terms, product) else {
        let output = quote::price_loan(&terms, product)?;
        return Err(format!(
            "cannot build a schedule until the quote is ready: {}",
            output.warnings.join("; ")
        )
        .into());
    };

    let rows = match args.round {
        Some(dp) => schedule::round_schedule(&rows, dp),
        None => rows,
    };
    let totals = quote::quote_loan_with(&terms, product);

    Ok(json!({
        "results": rows,
        "total_repayable": totals.total_repayable,
        "upfront_fees": totals.upfront_fees,
        "methodology": "Equal monthly installments of principal plus flat interest; final month absorbs rounding",
    }))
}
