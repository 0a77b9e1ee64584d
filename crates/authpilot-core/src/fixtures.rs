//! Bundled reference data: denials for the appeals screen, the case board
//! and the patient directory.

use std::sync::LazyLock;

use crate::models::case::{CaseStatus, TrackedCase};
use crate::models::denial::{DenialAnalysis, DeniedCase, SimilarCases};
use crate::models::letter::LetterKind;
use crate::models::patient::{
    Patient, PatientLetter, PatientRecord, PatientRequest, RequestCounts, TimelineEvent,
    TimelineKind,
};

static DENIED_CASES: LazyLock<Vec<DeniedCase>> = LazyLock::new(|| {
    let strings = |items: &[&str]| items.iter().map(|s| s.to_string()).collect::<Vec<_>>();

    vec![
        DeniedCase {
            id: "PA-2024-003".to_string(),
            patient: "Tom Davidson".to_string(),
            procedure: "CT Scan Lumbar".to_string(),
            insurance: "Aetna".to_string(),
            amount: "$8,500".to_string(),
            denial_date: "Oct 14, 2024".to_string(),
            denial_reason: "Not medically necessary".to_string(),
            analysis: Some(DenialAnalysis {
                primary_reason: "Not medically necessary".to_string(),
                real_meaning: "Missing documentation of functional impairment and conservative \
                               treatment failure"
                    .to_string(),
                missing_documents: strings(&[
                    "Physical therapy progress notes (minimum 6 weeks)",
                    "Documentation of failed conservative treatments",
                    "Pain scale progression chart",
                ]),
                policy_violation: Some(
                    "Aetna Clinical Policy Bulletin 0157: Advanced imaging requires 6-8 weeks of \
                     documented conservative treatment failure"
                        .to_string(),
                ),
                recommended_actions: strings(&[
                    "Obtain and attach all physical therapy session notes",
                    "Document patient's pain progression with objective measurements",
                    "Provide detailed timeline showing treatment progression",
                    "Cite medical literature supporting early imaging for this specific condition",
                ]),
                similar_cases: SimilarCases {
                    total: 47,
                    successful: 39,
                },
            }),
        },
        DeniedCase {
            id: "PA-2024-007".to_string(),
            patient: "Patricia Miller".to_string(),
            procedure: "MRI Lumbar Spine".to_string(),
            insurance: "Blue Cross Blue Shield".to_string(),
            amount: "$4,200".to_string(),
            denial_date: "Oct 10, 2024".to_string(),
            denial_reason: "Insufficient documentation".to_string(),
            analysis: Some(DenialAnalysis {
                primary_reason: "Insufficient documentation".to_string(),
                real_meaning: "Missing clinical examination findings and neurological assessment"
                    .to_string(),
                missing_documents: strings(&[
                    "Complete clinical examination findings",
                    "Neurological assessment results",
                    "Prior treatment history and outcomes",
                ]),
                policy_violation: Some(
                    "BCBS Medical Policy 2.01.17: MRI requires documented physical examination \
                     and failed conservative treatment"
                        .to_string(),
                ),
                recommended_actions: strings(&[
                    "Provide detailed neurological examination findings",
                    "Document all conservative treatments attempted",
                    "Include patient's functional limitations",
                    "Reference clinical guidelines supporting imaging",
                ]),
                similar_cases: SimilarCases {
                    total: 32,
                    successful: 28,
                },
            }),
        },
        DeniedCase {
            id: "PA-2024-011".to_string(),
            patient: "James Wilson".to_string(),
            procedure: "Spinal Surgery".to_string(),
            insurance: "Medicare".to_string(),
            amount: "$52,000".to_string(),
            denial_date: "Oct 8, 2024".to_string(),
            denial_reason: "Experimental treatment".to_string(),
            analysis: None,
        },
        DeniedCase {
            id: "PA-2024-015".to_string(),
            patient: "Maria Garcia".to_string(),
            procedure: "Hip Replacement".to_string(),
            insurance: "United Healthcare".to_string(),
            amount: "$38,000".to_string(),
            denial_date: "Oct 5, 2024".to_string(),
            denial_reason: "Not medically necessary".to_string(),
            analysis: None,
        },
    ]
});

/// All bundled denied cases, newest denial first.
pub fn denied_cases() -> &'static [DeniedCase] {
    &DENIED_CASES
}

/// Look up a bundled denied case by id.
pub fn find_denied_case(id: &str) -> Option<&'static DeniedCase> {
    DENIED_CASES.iter().find(|c| c.id == id)
}

static TRACKED_CASES: LazyLock<Vec<TrackedCase>> = LazyLock::new(|| {
    let case = |id: &str,
                patient: &str,
                procedure: &str,
                insurance: &str,
                status: CaseStatus,
                amount: &str,
                date: &str,
                days_open: Option<u32>| TrackedCase {
        id: id.to_string(),
        patient: patient.to_string(),
        procedure: procedure.to_string(),
        insurance: insurance.to_string(),
        status,
        amount: amount.to_string(),
        date: date.to_string(),
        days_open,
    };
    use CaseStatus::*;

    vec![
        case("PA-2024-002", "Mike Rodriguez", "Shoulder Surgery", "Blue Cross Blue Shield", Pending, "$45,000", "Oct 16, 2024", Some(2)),
        case("PA-2024-006", "Jennifer Lee", "Hip MRI", "United Healthcare", Pending, "$4,500", "Oct 17, 2024", Some(1)),
        case("PA-2024-001", "Sarah Johnson", "MRI Lumbar Spine", "United Healthcare", Approved, "$4,200", "Oct 15, 2024", None),
        case("PA-2024-003", "Tom Davidson", "CT Scan", "Aetna", Denied, "$8,500", "Oct 14, 2024", None),
        case("PA-2024-004", "Lisa Kim", "Knee MRI", "Cigna", Approved, "$3,800", "Oct 13, 2024", None),
        case("PA-2024-005", "Robert Chen", "Spinal Injection", "Medicare", Approved, "$2,100", "Oct 12, 2024", None),
    ]
});

/// The case board: open cases first, then decided cases newest first.
pub fn tracked_cases() -> &'static [TrackedCase] {
    &TRACKED_CASES
}

static PATIENTS: LazyLock<Vec<PatientRecord>> = LazyLock::new(|| {
    let strings = |items: &[&str]| items.iter().map(|s| s.to_string()).collect::<Vec<_>>();
    let patient = |id: &str,
                   name: &str,
                   dob: &str,
                   age: u32,
                   gender: &str,
                   insurance: &str,
                   member_id: &str,
                   contact: (&str, &str),
                   [total, approved, pending, denied]: [u32; 4],
                   last_visit: &str,
                   diagnoses: &[&str],
                   medications: &[&str]| Patient {
        id: id.to_string(),
        name: name.to_string(),
        date_of_birth: dob.to_string(),
        age,
        gender: gender.to_string(),
        insurance: insurance.to_string(),
        member_id: member_id.to_string(),
        phone: contact.0.to_string(),
        email: contact.1.to_string(),
        requests: RequestCounts {
            total,
            approved,
            pending,
            denied,
        },
        last_visit: last_visit.to_string(),
        diagnoses: strings(diagnoses),
        medications: strings(medications),
    };
    let request = |id: &str,
                   procedure: &str,
                   cpt: &str,
                   amount: &str,
                   status: CaseStatus,
                   date: &str,
                   diagnosis: &str,
                   notes: &str| PatientRequest {
        id: id.to_string(),
        procedure: procedure.to_string(),
        cpt: cpt.to_string(),
        amount: amount.to_string(),
        status,
        date: date.to_string(),
        diagnosis: diagnosis.to_string(),
        clinical_notes: Some(notes.to_string()),
        denial_reason: None,
        has_appeal: false,
    };
    let letter = |id: &str, kind: LetterKind, request_id: &str, procedure: &str, date: &str, status: CaseStatus| {
        PatientLetter {
            id: id.to_string(),
            kind,
            request_id: request_id.to_string(),
            procedure: procedure.to_string(),
            date: date.to_string(),
            status,
        }
    };
    let event = |id: &str,
                 kind: TimelineKind,
                 title: &str,
                 description: &str,
                 date: &str,
                 status: Option<CaseStatus>| TimelineEvent {
        id: id.to_string(),
        kind,
        title: title.to_string(),
        description: description.to_string(),
        date: date.to_string(),
        status,
    };
    let bare = |patient: Patient| PatientRecord {
        patient,
        requests: Vec::new(),
        letters: Vec::new(),
        timeline: Vec::new(),
    };
    use CaseStatus::*;

    vec![
        PatientRecord {
            requests: vec![request(
                "PA-2024-025", "MRI Lumbar Spine", "72148", "$4,200", Approved, "Oct 15, 2024",
                "Chronic Lower Back Pain",
                "Progressive symptoms, failed conservative treatment for 8 weeks.",
            )],
            ..bare(patient(
                "PT-001", "Sarah Johnson", "03/15/1978", 46, "Female", "United Healthcare",
                "UHC-987654321", ("(555) 123-4567", "sarah.j@email.com"), [8, 6, 1, 1],
                "Oct 15, 2024",
                &["Chronic Lower Back Pain (M54.5)", "Sciatica (M54.3)"],
                &["Ibuprofen 800mg TID", "Gabapentin 300mg BID"],
            ))
        },
        bare(patient(
            "PT-002", "Mike Rodriguez", "07/22/1985", 39, "Male", "Blue Cross Blue Shield",
            "BCBS-123456789", ("(555) 234-5678", "mrodriguez@email.com"), [12, 9, 2, 1],
            "Oct 16, 2024",
            &["Rotator Cuff Tear (M75.1)", "Shoulder Impingement (M75.4)"],
            &["Meloxicam 15mg QD", "Physical Therapy"],
        )),
        PatientRecord {
            requests: vec![
                request(
                    "PA-2024-015", "MRI Cervical Spine", "72141", "$3,800", Approved, "Sep 28, 2024",
                    "Cervical Radiculopathy",
                    "Patient reports persistent neck pain radiating to right arm. Failed 6 weeks conservative treatment.",
                ),
                request(
                    "PA-2024-012", "Physical Therapy (12 sessions)", "97110", "$1,440", Approved,
                    "Sep 15, 2024", "Lumbar Disc Herniation",
                    "Conservative management for disc herniation at L4-L5.",
                ),
                request(
                    "PA-2024-008", "Epidural Steroid Injection", "62311", "$2,200", Approved,
                    "Aug 22, 2024", "Radiculopathy",
                    "Failed oral medications and PT. Pain scale 8/10.",
                ),
                PatientRequest {
                    denial_reason: Some("Not medically necessary".to_string()),
                    has_appeal: true,
                    ..request(
                        "PA-2024-003", "CT Scan Lumbar", "72132", "$8,500", Denied, "Oct 14, 2024",
                        "Lumbar Disc Herniation",
                        "Advanced imaging requested due to worsening symptoms despite treatment.",
                    )
                },
                request(
                    "PA-2024-001", "MRI Lumbar Spine", "72148", "$4,200", Approved, "Jul 10, 2024",
                    "Lumbar Disc Herniation", "Initial imaging to assess disc herniation.",
                ),
            ],
            letters: vec![
                letter("LTR-2024-015", LetterKind::Authorization, "PA-2024-015", "MRI Cervical Spine", "Sep 28, 2024", Approved),
                letter("LTR-2024-012", LetterKind::Authorization, "PA-2024-012", "Physical Therapy", "Sep 15, 2024", Approved),
                letter("LTR-2024-003A", LetterKind::Appeal, "PA-2024-003", "CT Scan Lumbar - Appeal", "Oct 16, 2024", Pending),
                letter("LTR-2024-003", LetterKind::Authorization, "PA-2024-003", "CT Scan Lumbar", "Oct 14, 2024", Denied),
            ],
            timeline: vec![
                event("TL-001", TimelineKind::Appeal, "Appeal Submitted", "CT Scan Lumbar appeal letter submitted to Aetna", "Oct 16, 2024", Some(Pending)),
                event("TL-002", TimelineKind::Denial, "Authorization Denied", "CT Scan Lumbar - Reason: Not medically necessary", "Oct 14, 2024", Some(Denied)),
                event("TL-003", TimelineKind::Visit, "Office Visit", "Follow-up visit - discussed imaging options", "Oct 12, 2024", None),
                event("TL-004", TimelineKind::Approval, "Authorization Approved", "MRI Cervical Spine approved", "Sep 28, 2024", Some(Approved)),
                event("TL-005", TimelineKind::Approval, "Authorization Approved", "Physical Therapy (12 sessions) approved", "Sep 15, 2024", Some(Approved)),
                event("TL-006", TimelineKind::Approval, "Authorization Approved", "Epidural Steroid Injection approved", "Aug 22, 2024", Some(Approved)),
            ],
            ..bare(patient(
                "PT-003", "Tom Davidson", "11/08/1972", 52, "Male", "Aetna", "AET-456789123",
                ("(555) 345-6789", "tdavidson@email.com"), [15, 10, 0, 5], "Oct 14, 2024",
                &["Lumbar Disc Herniation (M51.2)", "Radiculopathy (M54.1)"],
                &["Prednisone 20mg QD", "Cyclobenzaprine 10mg QHS"],
            ))
        },
        bare(patient(
            "PT-004", "Jennifer Lee", "05/30/1990", 34, "Female", "United Healthcare",
            "UHC-147258369", ("(555) 456-7890", "jlee@email.com"), [5, 3, 2, 0], "Oct 17, 2024",
            &["Hip Dysplasia (M25.8)", "Hip Pain (M25.5)"],
            &["Naproxen 500mg BID"],
        )),
        bare(patient(
            "PT-005", "Lisa Kim", "09/12/1983", 41, "Female", "Cigna", "CGN-789123456",
            ("(555) 567-8901", "lkim@email.com"), [6, 5, 0, 1], "Oct 13, 2024",
            &["Knee Osteoarthritis (M17.0)"],
            &["Tramadol 50mg PRN", "Acetaminophen 650mg QID"],
        )),
        bare(patient(
            "PT-006", "Robert Chen", "01/25/1968", 56, "Male", "Medicare", "MED-321654987",
            ("(555) 678-9012", "rchen@email.com"), [20, 18, 1, 1], "Oct 12, 2024",
            &["Spinal Stenosis (M48.0)", "Degenerative Disc Disease (M51.3)"],
            &["Duloxetine 60mg QD", "Lidocaine Patch PRN"],
        )),
    ]
});

/// Every patient in the directory with their history.
pub fn patient_records() -> &'static [PatientRecord] {
    &PATIENTS
}

/// Look up a patient by directory id.
pub fn find_patient(id: &str) -> Option<&'static PatientRecord> {
    PATIENTS.iter().find(|record| record.patient.id == id)
}
