use clap::Args;
use serde::de::DeserializeOwned;
use serde_json::Value;

use microloan_core::applications::{
    prepare_submission, Application, CareerApplication, ContactMessage, ContactSubject,
    LoanApplication,
};

use crate::input;

/// Arguments for a loan application
#[derive(Args)]
pub struct LoanApplicationArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Bank Verification Number
    #[arg(long)]
    pub bvn: Option<String>,

    /// National Identification Number
    #[arg(long)]
    pub nin: Option<String>,

    /// Utility bill link
    #[arg(long)]
    pub utility_bill_link: Option<String>,

    /// Bank statement link (within 6 months)
    #[arg(long)]
    pub bank_statement_link: Option<String>,

    /// Passport photo link
    #[arg(long)]
    pub passport_photo_link: Option<String>,

    /// Guarantor full name
    #[arg(long)]
    pub guarantor: Option<String>,

    /// Guarantor BVN/NIN link
    #[arg(long)]
    pub guarantor_id_link: Option<String>,
}

/// Arguments for a career application
#[derive(Args)]
pub struct CareerArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    #[arg(long)]
    pub full_name: Option<String>,

    #[arg(long)]
    pub email: Option<String>,

    #[arg(long)]
    pub phone: Option<String>,

    /// Position applied for
    #[arg(long)]
    pub position: Option<String>,

    #[arg(long)]
    pub resume_link: Option<String>,

    /// Optional cover letter link
    #[arg(long)]
    pub cover_letter: Option<String>,
}

/// Arguments for a contact message
#[derive(Args)]
pub struct ContactArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub email: Option<String>,

    #[arg(long)]
    pub phone: Option<String>,

    /// loan-inquiry, investment, complaint or general
    #[arg(long)]
    pub subject: Option<String>,

    #[arg(long)]
    pub message: Option<String>,
}

/// Form from `--input`, flags, or piped stdin, in that order (the same
/// order `quote` and `schedule` use). With nothing given, the flag builder
/// runs on empty values so validation names the first missing field.
fn resolve_form<T: DeserializeOwned>(
    path: Option<&str>,
    any_flag: bool,
    from_flags: impl FnOnce() -> Result<T, Box<dyn std::error::Error>>,
) -> Result<T, Box<dyn std::error::Error>> {
    if let Some(path) = path {
        return input::file::read_json(path);
    }
    if any_flag {
        return from_flags();
    }
    if let Some(form) = input::stdin::read_stdin()? {
        return Ok(form);
    }
    from_flags()
}

fn submit<A: Application>(form: &A) -> Result<Value, Box<dyn std::error::Error>> {
    let submission = prepare_submission(form)?;
    Ok(serde_json::to_value(submission)?)
}

pub fn run_loan_application(args: LoanApplicationArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let any_flag = [
        &args.bvn,
        &args.nin,
        &args.utility_bill_link,
        &args.bank_statement_link,
        &args.passport_photo_link,
        &args.guarantor,
        &args.guarantor_id_link,
    ]
    .iter()
    .any(|flag| flag.is_some());
    let form: LoanApplication = resolve_form(args.input.as_deref(), any_flag, || {
        Ok(LoanApplication {
            bvn: args.bvn.unwrap_or_default(),
            nin: args.nin.unwrap_or_default(),
            utility_bill_link: args.utility_bill_link.unwrap_or_default(),
            bank_statement_link: args.bank_statement_link.unwrap_or_default(),
            passport_photo_link: args.passport_photo_link.unwrap_or_default(),
            guarantor: args.guarantor.unwrap_or_default(),
            guarantor_id_link: args.guarantor_id_link.unwrap_or_default(),
        })
    })?;
    submit(&form)
}

pub fn run_career_application(args: CareerArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let any_flag = [
        &args.full_name,
        &args.email,
        &args.phone,
        &args.position,
        &args.resume_link,
        &args.cover_letter,
    ]
    .iter()
    .any(|flag| flag.is_some());
    let form: CareerApplication = resolve_form(args.input.as_deref(), any_flag, || {
        Ok(CareerApplication {
            full_name: args.full_name.unwrap_or_default(),
            email: args.email.unwrap_or_default(),
            phone: args.phone.unwrap_or_default(),
            position: args.position.unwrap_or_default(),
            resume_link: args.resume_link.unwrap_or_default(),
            cover_letter: args.cover_letter,
        })
    })?;
    submit(&form)
}

pub fn run_contact(args: ContactArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let any_flag = [
        &args.name,
        &args.email,
        &args.phone,
        &args.subject,
        &args.message,
    ]
    .iter()
    .any(|flag| flag.is_some());
    let form: ContactMessage = resolve_form(args.input.as_deref(), any_flag, || {
        let subject: ContactSubject = args
            .subject
            .as_deref()
            .ok_or("--subject is required (or provide --input)")?
            .parse()?;
        Ok(ContactMessage {
            name: args.name.unwrap_or_default(),
            email: args.email.unwrap_or_default(),
            phone: args.phone,
            subject,
            message: args.message.unwrap_or_default(),
        })
    })?;
    submit(&form)
}
