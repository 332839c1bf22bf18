use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::{param, require, validate_email, Application, ApplicationKind, TemplateParams};
use crate::error::MicroloanError;
use crate::MicroloanResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContactSubject {
    LoanInquiry,
    Investment,
    Complaint,
    General,
}

impl ContactSubject {
    pub const ALL: [ContactSubject; 4] = [
        ContactSubject::LoanInquiry,
        ContactSubject::Investment,
        ContactSubject::Complaint,
        ContactSubject::General,
    ];

    /// Value submitted with the form.
    pub fn as_str(&self) -> &'static str {
        match self {
            ContactSubject::LoanInquiry => "loan-inquiry",
            ContactSubject::Investment => "investment",
            ContactSubject::Complaint => "complaint",
            ContactSubject::General => "general",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ContactSubject::LoanInquiry => "Loan Inquiry",
            ContactSubject::Investment => "Investment Services",
            ContactSubject::Complaint => "Complaint",
            ContactSubject::General => "General Inquiry",
        }
    }
}

impl FromStr for ContactSubject {
    type Err = MicroloanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|subject| subject.as_str() == wanted)
            .ok_or_else(|| {
                let options: Vec<String> = Self::ALL
                    .iter()
                    .map(|subject| format!("{} ({})", subject.as_str(), subject.label()))
                    .collect();
                MicroloanError::InvalidInput {
                    field: "subject".into(),
                    reason: format!("unknown subject '{wanted}', expected one of {}", options.join(", ")),
                }
            })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub subject: ContactSubject,
    pub message: String,
}

impl Application for ContactMessage {
    fn kind(&self) -> ApplicationKind {
        ApplicationKind::ContactMessage
    }

    fn validate(&self) -> MicroloanResult<()> {
        require("name", &self.name)?;
        validate_email("email", &self.email)?;
        require("message", &self.message)
    }

    fn template_params(&self) -> TemplateParams {
        let mut params = TemplateParams::new();
        param(&mut params, "name", &self.name);
        param(&mut params, "email", &self.email);
        param(&mut params, "phone", self.phone.as_deref().unwrap_or_default());
        param(&mut params, "subject", self.subject.as_str());
        param(&mut params, "message", &self.message);
        params
    }
}
