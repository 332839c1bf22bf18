//! Applicant-facing forms and the payload they hand to an email relay.
//!
//! Nothing here sends mail. `prepare_submission` validates a form and
//! returns the flat template parameters a relay fills its template with.

pub mod career;
pub mod contact;
pub mod loan;

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::LazyLock;
use tracing::debug;
use url::Url;

use crate::error::MicroloanError;
use crate::MicroloanResult;

pub use career::CareerApplication;
pub use contact::{ContactMessage, ContactSubject};
pub use loan::LoanApplication;

/// Flat key/value payload for a message template.
pub type TemplateParams = BTreeMap<String, String>;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationKind {
    LoanApplication,
    CareerApplication,
    ContactMessage,
}

/// A form an applicant can submit.
pub trait Application {
    fn kind(&self) -> ApplicationKind;

    /// Check required fields and links, reporting the first failure.
    fn validate(&self) -> MicroloanResult<()>;

    /// Template parameters, assuming `validate` has passed.
    fn template_params(&self) -> TemplateParams;
}

/// A validated form, ready to relay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    pub kind: ApplicationKind,
    pub template_params: TemplateParams,
}

/// Validate `form` and build its relay payload.
pub fn prepare_submission<A: Application>(form: &A) -> MicroloanResult<Submission> {
    form.validate()?;
    let template_params = form.template_params();
    debug!(kind = ?form.kind(), params = template_params.len(), "submission prepared");
    Ok(Submission {
        kind: form.kind(),
        template_params,
    })
}

// ---------------------------------------------------------------------------
// Field checks shared by the forms
// ---------------------------------------------------------------------------

/// Required text field: present once surrounding whitespace is removed.
pub(crate) fn require(field: &str, value: &str) -> MicroloanResult<()> {
    if value.trim().is_empty() {
        return Err(MicroloanError::MissingField {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Absolute http(s) URL, as the document-link fields expect.
pub fn validate_link(field: &str, value: &str) -> MicroloanResult<()> {
    let value = value.trim();
    if value.is_empty() {
        return Err(MicroloanError::InvalidLink {
            field: field.to_string(),
            reason: "URL cannot be empty".into(),
        });
    }

    match Url::parse(value) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(MicroloanError::InvalidLink {
                field: field.to_string(),
                reason: format!("Unsupported URL scheme: {scheme}"),
            }),
        },
        Err(e) => Err(MicroloanError::InvalidLink {
            field: field.to_string(),
            reason: format!("Invalid URL format: {e}"),
        }),
    }
}

pub fn validate_email(field: &str, value: &str) -> MicroloanResult<()> {
    require(field, value)?;
    if !EMAIL_RE.is_match(value.trim()) {
        return Err(MicroloanError::InvalidInput {
            field: field.to_string(),
            reason: "not a valid email address".into(),
        });
    }
    Ok(())
}

pub(crate) fn param(params: &mut TemplateParams, key: &str, value: &str) {
    params.insert(key.to_string(), value.trim().to_string());
}
