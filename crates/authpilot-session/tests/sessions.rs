use jiff::civil::{Date, date};
use pretty_assertions::assert_eq;

use authpilot_core::models::guidelines::LetterGuidelines;
use authpilot_core::models::snapshot::{EvidenceField, FieldId, FormSnapshot, WorkStatus};
use authpilot_session::config::SessionConfig;
use authpilot_session::error::{FileIntakeError, SessionError};
use authpilot_session::intake::IncomingFile;
use authpilot_session::session::{AppealSession, AuthorizationSession, EvidenceTarget};
use authpilot_session::strategy::BedrockGenerator;

const MB: usize = 1024 * 1024;

fn today() -> Date {
    date(2024, 10, 20)
}

fn ready_snapshot() -> FormSnapshot {
    FormSnapshot {
        patient_name: "John Smith".to_string(),
        date_of_birth: "1975-03-02".to_string(),
        insurer: "united".to_string(),
        member_id: "UHC123456".to_string(),
        diagnosis_code: "M54.5".to_string(),
        procedure_code: "72148".to_string(),
        therapy_weeks: Some(8),
        medication_name: "Ibuprofen".to_string(),
        objective_findings: EvidenceField::typed("positive straight leg raise"),
        pain_scale: Some(8),
        work_status: Some(WorkStatus::Off),
        ..Default::default()
    }
}

fn authorization(snapshot: FormSnapshot) -> AuthorizationSession {
    AuthorizationSession::with_snapshot(
        SessionConfig::default(),
        LetterGuidelines::default(),
        snapshot,
    )
}

#[test]
fn edits_recompute_the_assessment() {
    let mut session = AuthorizationSession::new(SessionConfig::default(), LetterGuidelines::default());
    let before = session.assessment().score;
    let after = session
        .edit(|s| s.objective_findings = EvidenceField::typed("antalgic gait"))
        .score;
    assert!(after > before);
}

#[test]
fn incomplete_form_cannot_generate() {
    let mut session = authorization(FormSnapshot {
        patient_name: "John Smith".to_string(),
        diagnosis_code: "banana".to_string(),
        ..Default::default()
    });

    let err = session.begin_generation(today()).unwrap_err();
    let SessionError::Validation(aggregate) = err else {
        panic!("expected aggregate validation error, got {err:?}");
    };
    assert!(aggregate.contains(FieldId::DiagnosisCode));
    assert!(aggregate.contains(FieldId::MemberId));
    assert!(!aggregate.contains(FieldId::PatientName));
    assert!(!session.is_generating());
}

#[tokio::test]
async fn local_generation_without_remote() {
    let mut session = authorization(ready_snapshot());
    let letter = session
        .generate::<BedrockGenerator>(None, today())
        .await
        .unwrap()
        .unwrap();

    assert!(!letter.is_remote());
    assert!(letter.content.contains("John Smith"));
    assert!(session.fallback_notice().is_none());
    assert!(!session.is_generating());
}

#[tokio::test]
async fn second_request_is_refused_while_one_is_in_flight() {
    let mut session = authorization(ready_snapshot());
    let pending = session.begin_generation(today()).unwrap();
    assert!(session.is_generating());
    assert!(matches!(
        session.begin_generation(today()),
        Err(SessionError::GenerationInFlight)
    ));

    let result = pending.run::<BedrockGenerator>(None).await;
    assert!(session.finish_generation(pending.ticket(), result).unwrap());
    assert!(!session.is_generating());
}

#[tokio::test]
async fn superseded_letter_is_discarded() {
    let mut session = authorization(ready_snapshot());
    let first = session.begin_generation(today()).unwrap();

    session.edit(|s| s.patient_name = "Jane Doe".to_string());
    let second = session.supersede_generation(today()).unwrap();

    let second_result = second.run::<BedrockGenerator>(None).await;
    let first_result = first.run::<BedrockGenerator>(None).await;

    assert!(session.finish_generation(second.ticket(), second_result).unwrap());
    assert!(!session.finish_generation(first.ticket(), first_result).unwrap());

    let letter = session.letter().unwrap();
    assert!(letter.content.contains("Jane Doe"));
    assert!(!letter.content.contains("John Smith"));
}

#[test]
fn evidence_upload_marks_the_field_without_text() {
    let mut session = authorization(FormSnapshot::default());
    let file = IncomingFile::new("exam-notes.pdf", "application/pdf", vec![0; 6 * MB]);
    session
        .upload_evidence(EvidenceTarget::ObjectiveFindings, file)
        .unwrap();

    assert_eq!(
        session.snapshot().objective_findings,
        EvidenceField::uploaded("exam-notes.pdf")
    );
    assert!(
        !session
            .assessment()
            .missing_documentation
            .contains(&"Objective examination findings".to_string())
    );
}

#[test]
fn rejected_upload_leaves_the_form_alone() {
    let mut session = authorization(ready_snapshot());
    let before = session.snapshot().clone();

    let file = IncomingFile::new("huge.pdf", "application/pdf", vec![0; 11 * MB]);
    let err = session
        .upload_evidence(EvidenceTarget::ImagingSummary, file)
        .unwrap_err();
    assert_eq!(err.to_string(), "File size must be less than 10MB.");
    assert_eq!(session.snapshot(), &before);
}

#[test]
fn six_megabyte_context_file_is_too_large() {
    let mut session = authorization(ready_snapshot());
    let file = IncomingFile::new("history.pdf", "application/pdf", vec![0; 6 * MB]);

    let err = session.upload_context(file).unwrap_err();
    assert!(matches!(
        err,
        SessionError::Intake(FileIntakeError::TooLarge { limit_mb: 5, .. })
    ));
    assert_eq!(err.to_string(), "File size must be less than 5MB.");
    assert!(session.context_file().is_none());

    let file = IncomingFile::new("history.txt", "text/plain", b"Chronic LBP since 2021".to_vec());
    assert_eq!(session.upload_context(file).unwrap().name, "history.txt");
    assert_eq!(session.clear_context().unwrap().name, "history.txt");
}

#[test]
fn appeal_checklist_drives_success_probability() {
    let mut session =
        AppealSession::open("PA-2024-003", SessionConfig::default(), LetterGuidelines::default())
            .unwrap();
    assert_eq!(session.draft().checklist.len(), 3);
    assert_eq!(session.success_probability(), 84);
    assert_eq!(session.similar_case_rate(), Some(83));

    session
        .set_item_notes("2", "NSAIDs for 6 weeks without relief")
        .unwrap();
    assert_eq!(session.success_probability(), 89);

    let file = IncomingFile::new("pt-notes.pdf", "application/pdf", vec![0; 1024]);
    let handle = session.attach_to_item("1", file).unwrap();
    assert_eq!(session.success_probability(), 94);

    session.detach_from_item("1", handle.id).unwrap();
    assert_eq!(session.success_probability(), 89);

    assert!(matches!(
        session.set_item_notes("9", "x"),
        Err(SessionError::Core(_))
    ));
}

#[test]
fn unknown_case_is_an_error() {
    let err = AppealSession::open("PA-0000-000", SessionConfig::default(), LetterGuidelines::default())
        .unwrap_err();
    assert!(matches!(err, SessionError::UnknownCase(id) if id == "PA-0000-000"));
}

#[tokio::test]
async fn appeal_letter_lists_completed_items_and_files() {
    let mut session =
        AppealSession::open("PA-2024-003", SessionConfig::default(), LetterGuidelines::default())
            .unwrap();
    session.set_item_notes("1", "12 sessions documented").unwrap();
    session
        .attach_additional(IncomingFile::new("xray.png", "image/png", vec![0; 100]))
        .unwrap();
    session.set_provider("Sarah Chen", "1234567890");

    let letter = session
        .generate::<BedrockGenerator>(None, today())
        .await
        .unwrap()
        .unwrap();
    assert!(letter.content.contains("Tom Davidson"));
    assert!(letter.content.contains("Physical therapy progress notes (minimum 6 weeks)"));
    assert!(!letter.content.contains("Pain scale progression chart"));
    assert!(letter.content.contains("xray.png"));
    assert!(letter.content.contains("Sarah Chen, MD"));
}
