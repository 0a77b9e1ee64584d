use authpilot_core::fixtures::find_denied_case;
use authpilot_core::models::appeal::AppealDraft;
use authpilot_core::models::snapshot::FormSnapshot;
use authpilot_letters::assemble::{LetterContext, assemble};
use authpilot_letters::docx::generate_docx;
use authpilot_letters::print::render_print_document;
use authpilot_letters::styles::DocumentStyles;
use jiff::civil::date;

#[test]
fn authorization_letter_exports_to_docx_and_print() {
    let snapshot = FormSnapshot {
        patient_name: "John Smith".to_string(),
        insurer: "bcbs".to_string(),
        ..Default::default()
    };
    let letter = assemble(LetterContext::Authorization(&snapshot)).unwrap();
    let styles = DocumentStyles::default();

    let docx = generate_docx(&letter, &styles).unwrap();
    assert!(docx.len() > 1_000);

    let html = render_print_document("Prior Authorization - John Smith", &letter, &styles).unwrap();
    assert!(html.contains("<p>Dear Blue Cross Blue Shield Prior Authorization Department,</p>"));
    assert!(html.contains("RE: Prior Authorization Request<br>Patient: John Smith<br>"));
}

#[test]
fn appeal_letter_exports_to_print() {
    let mut draft = AppealDraft::new(find_denied_case("PA-2024-007").unwrap().clone());
    draft.seed_checklist();
    draft.set_item_notes("2", "Reflexes diminished at L5").unwrap();

    let letter = assemble(LetterContext::Appeal {
        draft: &draft,
        letter_date: date(2024, 10, 21),
    })
    .unwrap();
    assert!(letter.contains("- Neurological assessment results\n  Reflexes diminished at L5\n"));

    let html = render_print_document("Appeal Letter - Patricia Miller", &letter, &DocumentStyles::default())
        .unwrap();
    assert!(html.contains("Date: October 21, 2024"));
    assert!(html.contains("- Neurological assessment results<br>  Reflexes diminished at L5"));
}
