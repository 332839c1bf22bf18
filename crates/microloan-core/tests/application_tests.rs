use microloan_core::applications::{
    prepare_submission, ApplicationKind, CareerApplication, ContactMessage, ContactSubject,
    LoanApplication,
};
use microloan_core::MicroloanError;

#[test]
fn test_loan_application_from_front_end_json() {
    let json = r#"{
        "bvn": "22212345678",
        "nin": "12345678901",
        "utility_bill_link": "https://drive.example.com/bill",
        "bank_statement_link": "https://drive.example.com/statement",
        "passport_photo_link": "https://drive.example.com/photo",
        "guarantor": "Ngozi Adebayo",
        "guarantor_id_link": "https://drive.example.com/guarantor"
    }"#;
    let app: LoanApplication = serde_json::from_str(json).unwrap();
    let sub = prepare_submission(&app).unwrap();
    assert_eq!(sub.kind, ApplicationKind::LoanApplication);

    let payload = serde_json::to_value(&sub).unwrap();
    assert_eq!(payload["kind"], "loan_application");
    assert_eq!(payload["template_params"]["bvn"], "22212345678");
}

#[test]
fn test_loan_application_rejects_relative_link() {
    let app = LoanApplication {
        bvn: "1".into(),
        nin: "2".into(),
        utility_bill_link: "bill.pdf".into(),
        bank_statement_link: "https://example.com/s".into(),
        passport_photo_link: "https://example.com/p".into(),
        guarantor: "G".into(),
        guarantor_id_link: "https://example.com/g".into(),
    };
    let err = prepare_submission(&app).unwrap_err();
    assert!(matches!(err, MicroloanError::InvalidLink { ref field, .. } if field == "utility_bill_link"));
    assert!(err.to_string().starts_with("Invalid or missing URL for utility_bill_link"));
}

#[test]
fn test_career_application_round_trip_through_json() {
    let json = r#"{
        "full_name": "Amaka Eze",
        "email": "amaka@example.com",
        "phone": "08020000000",
        "position": "Credit Analyst",
        "resume_link": "https://example.com/cv.pdf"
    }"#;
    let app: CareerApplication = serde_json::from_str(json).unwrap();
    assert!(app.cover_letter.is_none());
    let sub = prepare_submission(&app).unwrap();
    assert_eq!(sub.template_params["cover_letter"], "N/A");
}

#[test]
fn test_contact_message_subject_required() {
    let json = r#"{"name":"A","email":"a@b.co","message":"hi"}"#;
    assert!(serde_json::from_str::<ContactMessage>(json).is_err());

    let json = r#"{"name":"A","email":"a@b.co","subject":"investment","message":"hi"}"#;
    let msg: ContactMessage = serde_json::from_str(json).unwrap();
    assert_eq!(msg.subject, ContactSubject::Investment);
    assert!(prepare_submission(&msg).is_ok());
}
