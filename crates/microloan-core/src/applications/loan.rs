use serde::{Deserialize, Serialize};

use super::{param, require, validate_link, Application, ApplicationKind, TemplateParams};
use crate::MicroloanResult;

/// Borrower and guarantor details collected after a quote is accepted.
/// Documents are supplied as shareable links, not uploads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanApplication {
    /// Bank Verification Number. Presence only; not checked against any registry.
    pub bvn: String,
    /// National Identification Number.
    pub nin: String,
    pub utility_bill_link: String,
    /// Statement covering the last six months.
    pub bank_statement_link: String,
    pub passport_photo_link: String,
    /// Guarantor's full name.
    pub guarantor: String,
    /// Link to the guarantor's BVN/NIN slip.
    pub guarantor_id_link: String,
}

impl LoanApplication {
    fn fields(&self) -> [(&'static str, &str); 7] {
        [
            ("bvn", self.bvn.as_str()),
            ("nin", self.nin.as_str()),
            ("utility_bill_link", self.utility_bill_link.as_str()),
            ("bank_statement_link", self.bank_statement_link.as_str()),
            ("passport_photo_link", self.passport_photo_link.as_str()),
            ("guarantor", self.guarantor.as_str()),
            ("guarantor_id_link", self.guarantor_id_link.as_str()),
        ]
    }
}

impl Application for LoanApplication {
    fn kind(&self) -> ApplicationKind {
        ApplicationKind::LoanApplication
    }

    fn validate(&self) -> MicroloanResult<()> {
        for (field, value) in self.fields() {
            require(field, value)?;
        }
        for (field, value) in [
            ("utility_bill_link", &self.utility_bill_link),
            ("bank_statement_link", &self.bank_statement_link),
            ("passport_photo_link", &self.passport_photo_link),
            ("guarantor_id_link", &self.guarantor_id_link),
        ] {
            validate_link(field, value)?;
        }
        Ok(())
    }

    fn template_params(&self) -> TemplateParams {
        let mut params = TemplateParams::new();
        for (field, value) in self.fields() {
            param(&mut params, field, value);
        }
        params
    }
}
