use serde::{Deserialize, Serialize};

use super::{param, require, validate_email, validate_link, Application, ApplicationKind, TemplateParams};
use crate::MicroloanResult;

/// Placeholder sent when no cover letter link is given.
pub const NO_COVER_LETTER: &str = "N/A";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CareerApplication {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub position: String,
    pub resume_link: String,
    /// Optional link to a cover letter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_letter: Option<String>,
}

impl CareerApplication {
    fn cover_letter(&self) -> Option<&str> {
        self.cover_letter
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

impl Application for CareerApplication {
    fn kind(&self) -> ApplicationKind {
        ApplicationKind::CareerApplication
    }

    fn validate(&self) -> MicroloanResult<()> {
        require("full_name", &self.full_name)?;
        validate_email("email", &self.email)?;
        require("phone", &self.phone)?;
        require("position", &self.position)?;
        validate_link("resume_link", &self.resume_link)?;
        if let Some(letter) = self.cover_letter() {
            validate_link("cover_letter", letter)?;
        }
        Ok(())
    }

    fn template_params(&self) -> TemplateParams {
        let mut params = TemplateParams::new();
        param(&mut params, "full_name", &self.full_name);
        param(&mut params, "email", &self.email);
        param(&mut params, "phone", &self.phone);
        param(&mut params, "position", &self.position);
        param(&mut params, "resume_link", &self.resume_link);
        param(
            &mut params,
            "cover_letter",
            self.cover_letter().unwrap_or(NO_COVER_LETTER),
        );
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::applications::prepare_submission;
    use crate::error::MicroloanError;

    fn applicant() -> CareerApplication {
        CareerApplication {
            full_name: "Amaka Eze".into(),
            email: "amaka@example.com".into(),
            phone: "+234 802 000 0000".into(),
            position: "Loan Officer".into(),
            resume_link: "https://example.com/amaka-cv.pdf".into(),
            cover_letter: None,
        }
    }

    #[test]
    fn test_missing_cover_letter_sends_placeholder() {
        let sub = prepare_submission(&applicant()).unwrap();
        assert_eq!(sub.kind, ApplicationKind::CareerApplication);
        assert_eq!(sub.template_params["cover_letter"], NO_COVER_LETTER);
        assert_eq!(sub.template_params["position"], "Loan Officer");
    }

    #[test]
    fn test_blank_cover_letter_treated_as_absent() {
        let mut app = applicant();
        app.cover_letter = Some("   ".into());
        assert!(app.validate().is_ok());
        assert_eq!(app.template_params()["cover_letter"], NO_COVER_LETTER);
    }

    #[test]
    fn test_invalid_cover_letter_rejected() {
        let mut app = applicant();
        app.cover_letter = Some("my letter".into());
        match app.validate() {
            Err(MicroloanError::InvalidLink { field, .. }) => assert_eq!(field, "cover_letter"),
            other => panic!("expected cover letter failure, got {other:?}"),
        }
    }

    #[test]
    fn test_resume_link_checked_before_cover_letter() {
        let mut app = applicant();
        app.resume_link = "cv.pdf".into();
        app.cover_letter = Some("letter.pdf".into());
        match app.validate() {
            Err(MicroloanError::InvalidLink { field, .. }) => assert_eq!(field, "resume_link"),
            other => panic!("expected resume failure, got {other:?}"),
        }
    }

    #[test]
    fn test_bad_email_rejected() {
        let mut app = applicant();
        app.email = "amaka".into();
        assert!(matches!(
            app.validate(),
            Err(MicroloanError::InvalidInput { .. })
        ));
    }
}
