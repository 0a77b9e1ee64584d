//! Local letter assembly.
//!
//! Both letters are plain text with a fixed section skeleton. Every value is
//! resolved to display text in Rust before rendering, so the templates only
//! decide which optional sections appear. Empty fields are replaced with a
//! readable fallback; no slot ever renders blank.

use jiff::civil::Date;
use serde::Serialize;
use tera::{Context, Tera};

use authpilot_core::models::appeal::AppealDraft;
use authpilot_core::models::snapshot::{EvidenceField, FormSnapshot, payer_display_name};

use crate::error::LetterError;

const AUTHORIZATION_TEMPLATE: &str = r#"Dear {{ payer }} Prior Authorization Department,

RE: Prior Authorization Request
Patient: {{ patient_name }}
Date of Birth: {{ date_of_birth }}
Member ID: {{ member_id }}
{% if group_number %}Group Number: {{ group_number }}
{% endif %}Procedure: {{ procedure }} - {{ location }}
ICD-10: {{ diagnosis_code }}
CPT: {{ procedure_code }}

I am writing to request prior authorization for the above-referenced procedure. This patient presents with {{ symptom_history }} that have failed conservative management.

Conservative Treatment History:
The patient has completed an extensive conservative treatment regimen without significant clinical improvement:
{% for item in treatments %}- {{ item }}
{% endfor %}
Clinical Presentation:
The patient reports {{ pain }} with {{ impairment }} functional impairment. Current work status: {{ work_status }}. {{ findings }}
{% if imaging %}Prior imaging: {{ imaging }}
{% endif %}
Medical Necessity:
Given the failed conservative treatment course, persistent symptoms, and significant functional impairment, the requested procedure is medically necessary to:
- Identify underlying pathology requiring intervention
- Guide appropriate treatment planning
- Evaluate for potential surgical candidacy if indicated
- Prevent further deterioration and complications

This request meets your organization's medical necessity criteria and clinical guidelines for this procedure following failed conservative management.

Thank you for your prompt consideration of this request.

Sincerely,
{{ provider_name }}, MD
NPI: {{ npi }}
"#;

const APPEAL_TEMPLATE: &str = r#"To: {{ payer }} Appeals Department
Re: Appeal for Prior Authorization Denial
Case ID: {{ case_id }}
Patient: {{ patient }}
Date: {{ letter_date }}

Dear Appeals Review Team,

I am writing to appeal the denial of prior authorization for {{ procedure }} for my patient, {{ patient }}. The initial request was denied on {{ denial_date }} with the stated reason: "{{ denial_reason }}."

This appeal provides additional clinical documentation and evidence that demonstrates the medical necessity of this procedure for this patient's specific condition.

Clinical Justification:
The patient has undergone extensive conservative treatment as outlined in the attached documentation. Treatment notes show progressive care without adequate improvement. Pain scale documentation demonstrates ongoing functional impairment affecting daily activities.
{% if supporting %}
Supporting Documentation Provided:
{% for item in supporting %}- {{ item.label }}
{% if item.notes %}{{ item.notes }}
{% endif %}{% endfor %}{% endif %}
{% if comments %}Additional Clinical Context:
{{ comments }}

{% endif %}Medical Necessity:
Based on current clinical guidelines and the patient's documented treatment history, this procedure is medically necessary to properly diagnose and develop an appropriate treatment plan. Delay in obtaining it may result in prolonged disability and increased healthcare costs.
{% if attachments %}
Attached Documents:
{% for name in attachments %}- {{ name }}
{% endfor %}{% endif %}
I respectfully request that you review the attached documentation and reconsider the denial of this medically necessary procedure. Should you require any additional information, please do not hesitate to contact me directly.

Sincerely,
{{ provider_name }}, MD
NPI: {{ npi }}
"#;

/// Which letter to assemble and from what.
#[derive(Debug, Clone, Copy)]
pub enum LetterContext<'a> {
    Authorization(&'a FormSnapshot),
    Appeal {
        draft: &'a AppealDraft,
        letter_date: Date,
    },
}

pub fn assemble(context: LetterContext<'_>) -> Result<String, LetterError> {
    match context {
        LetterContext::Authorization(snapshot) => assemble_authorization_letter(snapshot),
        LetterContext::Appeal { draft, letter_date } => assemble_appeal_letter(draft, letter_date),
    }
}

#[derive(Debug, Serialize)]
struct AuthorizationFields {
    payer: String,
    patient_name: String,
    date_of_birth: String,
    member_id: String,
    group_number: String,
    procedure: String,
    location: String,
    diagnosis_code: String,
    procedure_code: String,
    symptom_history: String,
    treatments: Vec<String>,
    pain: String,
    impairment: String,
    work_status: String,
    findings: String,
    imaging: String,
    provider_name: String,
    npi: String,
}

impl AuthorizationFields {
    fn from_snapshot(s: &FormSnapshot) -> Self {
        let payer = match s.insurer.trim() {
            "" => "Insurance".to_string(),
            key => payer_display_name(key),
        };
        let symptom_history = match s.symptom_duration {
            Some(1) => format!("symptoms of 1 {} duration", s.symptom_duration_unit.label()),
            Some(n) => format!("symptoms of {n} {}s duration", s.symptom_duration_unit.label()),
            None => "a prolonged history of symptoms".to_string(),
        };
        let pain = match s.documented_pain() {
            Some(p) => format!("a pain scale of {p}/10"),
            None => "persistent pain".to_string(),
        };

        Self {
            payer,
            patient_name: or(&s.patient_name, "Patient Name"),
            date_of_birth: or(&s.date_of_birth, "DOB"),
            member_id: or(&s.member_id, "Member ID"),
            group_number: s.group_number.trim().to_string(),
            procedure: or(&s.procedure_type.to_uppercase(), "Procedure"),
            location: or(&s.anatomical_location, "Location"),
            diagnosis_code: or(&s.diagnosis_code, "ICD-10 Code"),
            procedure_code: or(&s.procedure_code, "CPT Code"),
            symptom_history,
            treatments: treatment_bullets(s),
            pain,
            impairment: s
                .functional_impairment
                .map(|level| level.label().to_string())
                .unwrap_or_else(|| "significant".to_string()),
            work_status: s
                .work_status
                .map(|status| status.label().to_string())
                .unwrap_or_else(|| "impacted".to_string()),
            findings: findings_sentence(&s.objective_findings),
            imaging: imaging_line(s),
            provider_name: or(&s.provider_name, "Provider Name"),
            npi: or(&s.npi, "NPI Number"),
        }
    }
}

fn treatment_bullets(s: &FormSnapshot) -> Vec<String> {
    let mut bullets = Vec::new();
    if let Some(weeks) = s.therapy_weeks.filter(|w| *w > 0) {
        bullets.push(format!(
            "Physical therapy: {weeks} weeks with minimal improvement in functional status"
        ));
    }
    if !s.medication_name.trim().is_empty() {
        let weeks = s
            .medication_weeks
            .map(|w| w.to_string())
            .unwrap_or_else(|| "several".to_string());
        bullets.push(format!(
            "Medications: {} for {weeks} weeks with inadequate pain relief",
            s.medication_name.trim()
        ));
    }
    if !s.injection_type.trim().is_empty() {
        let count = s
            .injection_count
            .filter(|n| *n > 0)
            .map(|n| n.to_string())
            .unwrap_or_else(|| "Multiple".to_string());
        bullets.push(format!(
            "{} injections: {count} injections with only temporary relief",
            s.injection_type.trim()
        ));
    }
    if bullets.is_empty() {
        bullets.push("Conservative management as documented in the enclosed clinical records".to_string());
    }
    bullets
}

fn findings_sentence(findings: &EvidenceField) -> String {
    match findings {
        EvidenceField::Uploaded { .. } => {
            "Objective examination findings are documented in the enclosed records.".to_string()
        }
        other => match other.text() {
            Some(text) => sentence(text),
            None => "Clinical examination reveals findings consistent with the diagnosis."
                .to_string(),
        },
    }
}

fn imaging_line(s: &FormSnapshot) -> String {
    let kind = s.imaging_type.trim();
    let has_kind = !kind.is_empty() && !kind.eq_ignore_ascii_case("none");
    let summary = match &s.imaging_summary {
        EvidenceField::Uploaded { .. } => Some("report enclosed.".to_string()),
        other => other.text().map(sentence),
    };
    if !has_kind && summary.is_none() {
        return String::new();
    }

    let mut line = if has_kind { kind.to_string() } else { "Imaging".to_string() };
    if !s.imaging_date.trim().is_empty() {
        line.push_str(&format!(" ({})", s.imaging_date.trim()));
    }
    match summary {
        Some(summary) => format!("{line}, {summary}"),
        None => format!("{line}."),
    }
}

/// Render the prior-authorization request letter.
pub fn assemble_authorization_letter(snapshot: &FormSnapshot) -> Result<String, LetterError> {
    let fields = AuthorizationFields::from_snapshot(snapshot);
    render("authorization.txt", AUTHORIZATION_TEMPLATE, &fields)
}

#[derive(Debug, Serialize)]
struct SupportingItem {
    label: String,
    /// Already indented for display under the bullet.
    notes: String,
}

#[derive(Debug, Serialize)]
struct AppealFields {
    payer: String,
    case_id: String,
    patient: String,
    letter_date: String,
    procedure: String,
    denial_date: String,
    denial_reason: String,
    supporting: Vec<SupportingItem>,
    comments: String,
    attachments: Vec<String>,
    provider_name: String,
    npi: String,
}

impl AppealFields {
    fn from_draft(draft: &AppealDraft, letter_date: Date) -> Self {
        let case = &draft.case;
        let supporting = draft
            .completed_items()
            .map(|item| SupportingItem {
                label: or(&item.label, "Supporting document"),
                notes: indent(item.notes().trim()),
            })
            .collect();

        Self {
            payer: or(&case.insurance, "Insurance"),
            case_id: or(&case.id, "Case ID"),
            patient: or(&case.patient, "Patient Name"),
            letter_date: letter_date.strftime("%B %-d, %Y").to_string(),
            procedure: or(&case.procedure, "the requested procedure"),
            denial_date: or(&case.denial_date, "the date of the initial determination"),
            denial_reason: or(case.denial_reason.trim().trim_end_matches('.'), "Not specified"),
            supporting,
            comments: draft.additional_comments.trim().to_string(),
            attachments: draft.attachment_names(),
            provider_name: or(&draft.provider_name, "Provider Name"),
            npi: or(&draft.npi, "NPI Number"),
        }
    }
}

/// Render the appeal letter for a denied case. Only completed checklist
/// items are cited as supporting documentation.
pub fn assemble_appeal_letter(draft: &AppealDraft, letter_date: Date) -> Result<String, LetterError> {
    let fields = AppealFields::from_draft(draft, letter_date);
    render("appeal.txt", APPEAL_TEMPLATE, &fields)
}

fn render<T: Serialize>(name: &str, template: &str, fields: &T) -> Result<String, LetterError> {
    let mut tera = Tera::default();
    tera.add_raw_template(name, template)
        .map_err(|e| LetterError::TemplateParse(e.to_string()))?;
    let context = Context::from_serialize(fields)?;
    Ok(tera.render(name, &context)?)
}

fn or(value: &str, fallback: &str) -> String {
    match value.trim() {
        "" => fallback.to_string(),
        v => v.to_string(),
    }
}

fn sentence(text: &str) -> String {
    let text = text.trim();
    if text.ends_with(['.', '!', '?']) {
        text.to_string()
    } else {
        format!("{text}.")
    }
}

fn indent(text: &str) -> String {
    text.lines()
        .map(|line| format!("  {}", line.trim()))
        .collect::<Vec<_>>()
        .join("\n")
}
