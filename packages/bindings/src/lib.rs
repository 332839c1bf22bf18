use napi::Result as NapiResult;
use napi_derive::napi;
use serde::de::DeserializeOwned;
use serde::Serialize;

use microloan_core::applications::{
    prepare_submission, Application, CareerApplication, ContactMessage, LoanApplication,
};
use microloan_core::lending::product::LoanProduct;
use microloan_core::lending::quote::LoanQuoteInput;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

fn parse<T: DeserializeOwned>(json: &str) -> NapiResult<T> {
    serde_json::from_str(json).map_err(to_napi_error)
}

fn render<T: Serialize>(value: &T) -> NapiResult<String> {
    serde_json::to_string(value).map_err(to_napi_error)
}

/// Product JSON is optional; an empty string means the published product.
fn parse_product(product_json: Option<String>) -> NapiResult<LoanProduct> {
    match product_json.as_deref().map(str::trim) {
        None | Some("") => Ok(LoanProduct::default()),
        Some(json) => {
            let product: LoanProduct = parse(json)?;
            product.validate().map_err(to_napi_error)?;
            Ok(product)
        }
    }
}

// ---------------------------------------------------------------------------
// Lending
// ---------------------------------------------------------------------------

/// Raw quote figures; all zero while the input is incomplete or out of range.
#[napi]
pub fn quote_loan(input_json: String, product_json: Option<String>) -> NapiResult<String> {
    let input: LoanQuoteInput = parse(&input_json)?;
    let product = parse_product(product_json)?;
    render(&microloan_core::lending::quote::quote_loan_with(&input, &product))
}

#[napi]
pub fn price_loan(input_json: String, product_json: Option<String>) -> NapiResult<String> {
    let input: LoanQuoteInput = parse(&input_json)?;
    let product = parse_product(product_json)?;
    let output =
        microloan_core::lending::quote::price_loan(&input, &product).map_err(to_napi_error)?;
    render(&output)
}

/// Schedule rows, or `null` while the quote is not ready.
#[napi]
pub fn repayment_schedule(
    input_json: String,
    product_json: Option<String>,
    round_dp: Option<u32>,
) -> NapiResult<String> {
    let input: LoanQuoteInput = parse(&input_json)?;
    let product = parse_product(product_json)?;
    let rows = microloan_core::lending::schedule::repayment_schedule(&input, &product).map(|rows| {
        match round_dp {
            Some(dp) => microloan_core::lending::schedule::round_schedule(&rows, dp),
            None => rows,
        }
    });
    render(&rows)
}

// ---------------------------------------------------------------------------
// Applications
// ---------------------------------------------------------------------------

fn prepare<A: Application + DeserializeOwned>(form_json: &str) -> NapiResult<String> {
    let form: A = parse(form_json)?;
    let submission = prepare_submission(&form).map_err(to_napi_error)?;
    render(&submission)
}

#[napi]
pub fn prepare_loan_application(form_json: String) -> NapiResult<String> {
    prepare::<LoanApplication>(&form_json)
}

#[napi]
pub fn prepare_career_application(form_json: String) -> NapiResult<String> {
    prepare::<CareerApplication>(&form_json)
}

#[napi]
pub fn prepare_contact_message(form_json: String) -> NapiResult<String> {
    prepare::<ContactMessage>(&form_json)
}
