use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Top of the pain scale.
pub const MAX_PAIN_SCALE: u8 = 10;

/// One prior-authorization request in progress.
///
/// A snapshot is a value: every evaluation (score, recommendations, letter)
/// takes the whole snapshot and derives its output from scratch. Empty text
/// fields and `None` numbers both mean "not provided".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export)]
pub struct FormSnapshot {
    // Identity
    pub patient_name: String,
    /// Raw `YYYY-MM-DD` input, validated separately.
    pub date_of_birth: String,
    /// Payer key, e.g. `united`, `bcbs`, `aetna`.
    pub insurer: String,
    pub member_id: String,
    pub group_number: String,
    pub provider_name: String,
    pub npi: String,

    // Coding
    pub diagnosis_code: String,
    pub procedure_code: String,
    pub procedure_type: String,
    pub anatomical_location: String,
    pub symptom_duration: Option<u32>,
    pub symptom_duration_unit: DurationUnit,

    // Treatment history
    pub therapy_weeks: Option<u32>,
    pub medication_name: String,
    pub medication_weeks: Option<u32>,
    pub injection_type: String,
    pub injection_count: Option<u32>,
    pub imaging_type: String,
    pub imaging_date: String,
    pub imaging_summary: EvidenceField,

    // Clinical evidence
    pub pain_scale: Option<u8>,
    pub functional_impairment: Option<FunctionalImpairment>,
    pub work_status: Option<WorkStatus>,
    pub objective_findings: EvidenceField,
}

/// A free-text field that may instead be backed by an uploaded document.
///
/// An upload counts as "present" but carries no text: nothing about the
/// file name leaks into character counts or letter bodies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "source", rename_all = "snake_case")]
#[ts(export)]
pub enum EvidenceField {
    #[default]
    Empty,
    Typed {
        text: String,
    },
    Uploaded {
        file_name: String,
    },
}

impl EvidenceField {
    pub fn typed(text: impl Into<String>) -> Self {
        let text = text.into();
        if text.trim().is_empty() {
            Self::Empty
        } else {
            Self::Typed { text }
        }
    }

    pub fn uploaded(file_name: impl Into<String>) -> Self {
        Self::Uploaded {
            file_name: file_name.into(),
        }
    }

    /// True for typed text with content, or any upload.
    pub fn is_present(&self) -> bool {
        match self {
            Self::Empty => false,
            Self::Typed { text } => !text.trim().is_empty(),
            Self::Uploaded { .. } => true,
        }
    }

    /// The typed text, if any. Uploads yield `None`.
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Typed { text } if !text.trim().is_empty() => Some(text.as_str()),
            _ => None,
        }
    }

    /// Character count of typed text. Uploads contribute nothing.
    pub fn text_len(&self) -> usize {
        self.text().map(|t| t.chars().count()).unwrap_or(0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum FunctionalImpairment {
    None,
    Mild,
    Moderate,
    Severe,
}

impl FunctionalImpairment {
    pub fn label(&self) -> &'static str {
        match self {
            Self::None => "no",
            Self::Mild => "mild",
            Self::Moderate => "moderate",
            Self::Severe => "severe",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum WorkStatus {
    Working,
    Modified,
    Off,
    Retired,
}

impl WorkStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Working => "working full duty",
            Self::Modified => "modified / light duty",
            Self::Off => "off work",
            Self::Retired => "retired / not applicable",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum DurationUnit {
    Days,
    #[default]
    Weeks,
    Months,
    Years,
}

impl DurationUnit {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Days => "day",
            Self::Weeks => "week",
            Self::Months => "month",
            Self::Years => "year",
        }
    }
}

/// Named fields of a [`FormSnapshot`], used for field-level error reporting
/// and fill-ratio accounting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum FieldId {
    PatientName,
    DateOfBirth,
    Insurer,
    MemberId,
    GroupNumber,
    ProviderName,
    Npi,
    DiagnosisCode,
    ProcedureCode,
    ProcedureType,
    AnatomicalLocation,
    SymptomDuration,
    TherapyWeeks,
    MedicationName,
    MedicationWeeks,
    InjectionType,
    InjectionCount,
    ImagingType,
    ImagingDate,
    ImagingSummary,
    PainScale,
    FunctionalImpairment,
    WorkStatus,
    ObjectiveFindings,
}

impl FieldId {
    pub fn label(&self) -> &'static str {
        match self {
            Self::PatientName => "Patient name",
            Self::DateOfBirth => "Date of birth",
            Self::Insurer => "Insurance provider",
            Self::MemberId => "Member ID",
            Self::GroupNumber => "Group number",
            Self::ProviderName => "Provider name",
            Self::Npi => "NPI number",
            Self::DiagnosisCode => "ICD-10 diagnosis code",
            Self::ProcedureCode => "CPT procedure code",
            Self::ProcedureType => "Procedure type",
            Self::AnatomicalLocation => "Anatomical location",
            Self::SymptomDuration => "Duration of symptoms",
            Self::TherapyWeeks => "Physical therapy duration",
            Self::MedicationName => "Medication name",
            Self::MedicationWeeks => "Medication duration",
            Self::InjectionType => "Injection type",
            Self::InjectionCount => "Number of injections",
            Self::ImagingType => "Prior imaging type",
            Self::ImagingDate => "Imaging date",
            Self::ImagingSummary => "Imaging result summary",
            Self::PainScale => "Pain scale",
            Self::FunctionalImpairment => "Functional impairment",
            Self::WorkStatus => "Work status",
            Self::ObjectiveFindings => "Objective findings",
        }
    }
}

/// How a single field is populated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldFill {
    Empty,
    Filled,
    Uploaded,
}

impl FieldFill {
    fn from_text(text: &str) -> Self {
        if text.trim().is_empty() {
            Self::Empty
        } else {
            Self::Filled
        }
    }

    fn from_option<T>(value: &Option<T>) -> Self {
        if value.is_some() {
            Self::Filled
        } else {
            Self::Empty
        }
    }

    fn from_evidence(field: &EvidenceField) -> Self {
        match field {
            EvidenceField::Uploaded { .. } => Self::Uploaded,
            other if other.is_present() => Self::Filled,
            _ => Self::Empty,
        }
    }
}

impl FormSnapshot {
    /// The pain score when it lies on the 0–10 scale. Anything above is
    /// treated as not provided.
    pub fn documented_pain(&self) -> Option<u8> {
        self.pain_scale.filter(|p| *p <= MAX_PAIN_SCALE)
    }

    /// Every field with its fill state, in declaration order.
    pub fn field_fills(&self) -> Vec<(FieldId, FieldFill)> {
        vec![
            (FieldId::PatientName, FieldFill::from_text(&self.patient_name)),
            (FieldId::DateOfBirth, FieldFill::from_text(&self.date_of_birth)),
            (FieldId::Insurer, FieldFill::from_text(&self.insurer)),
            (FieldId::MemberId, FieldFill::from_text(&self.member_id)),
            (FieldId::GroupNumber, FieldFill::from_text(&self.group_number)),
            (FieldId::ProviderName, FieldFill::from_text(&self.provider_name)),
            (FieldId::Npi, FieldFill::from_text(&self.npi)),
            (FieldId::DiagnosisCode, FieldFill::from_text(&self.diagnosis_code)),
            (FieldId::ProcedureCode, FieldFill::from_text(&self.procedure_code)),
            (FieldId::ProcedureType, FieldFill::from_text(&self.procedure_type)),
            (
                FieldId::AnatomicalLocation,
                FieldFill::from_text(&self.anatomical_location),
            ),
            (
                FieldId::SymptomDuration,
                FieldFill::from_option(&self.symptom_duration),
            ),
            (FieldId::TherapyWeeks, FieldFill::from_option(&self.therapy_weeks)),
            (FieldId::MedicationName, FieldFill::from_text(&self.medication_name)),
            (
                FieldId::MedicationWeeks,
                FieldFill::from_option(&self.medication_weeks),
            ),
            (FieldId::InjectionType, FieldFill::from_text(&self.injection_type)),
            (
                FieldId::InjectionCount,
                FieldFill::from_option(&self.injection_count),
            ),
            (FieldId::ImagingType, FieldFill::from_text(&self.imaging_type)),
            (FieldId::ImagingDate, FieldFill::from_text(&self.imaging_date)),
            (
                FieldId::ImagingSummary,
                FieldFill::from_evidence(&self.imaging_summary),
            ),
            (FieldId::PainScale, FieldFill::from_option(&self.pain_scale)),
            (
                FieldId::FunctionalImpairment,
                FieldFill::from_option(&self.functional_impairment),
            ),
            (FieldId::WorkStatus, FieldFill::from_option(&self.work_status)),
            (
                FieldId::ObjectiveFindings,
                FieldFill::from_evidence(&self.objective_findings),
            ),
        ]
    }

    /// Character counts of every text-valued field. Uploaded evidence
    /// contributes zero.
    pub fn text_lengths(&self) -> Vec<(FieldId, usize)> {
        let len = |s: &str| s.trim().chars().count();
        vec![
            (FieldId::PatientName, len(&self.patient_name)),
            (FieldId::DateOfBirth, len(&self.date_of_birth)),
            (FieldId::Insurer, len(&self.insurer)),
            (FieldId::MemberId, len(&self.member_id)),
            (FieldId::GroupNumber, len(&self.group_number)),
            (FieldId::ProviderName, len(&self.provider_name)),
            (FieldId::Npi, len(&self.npi)),
            (FieldId::DiagnosisCode, len(&self.diagnosis_code)),
            (FieldId::ProcedureCode, len(&self.procedure_code)),
            (FieldId::ProcedureType, len(&self.procedure_type)),
            (FieldId::AnatomicalLocation, len(&self.anatomical_location)),
            (FieldId::MedicationName, len(&self.medication_name)),
            (FieldId::InjectionType, len(&self.injection_type)),
            (FieldId::ImagingType, len(&self.imaging_type)),
            (FieldId::ImagingDate, len(&self.imaging_date)),
            (FieldId::ImagingSummary, self.imaging_summary.text_len()),
            (FieldId::ObjectiveFindings, self.objective_findings.text_len()),
        ]
    }

    /// Display text for every filled field, in form order. Uploaded evidence
    /// is reported as on file without its name or content.
    pub fn filled_values(&self) -> Vec<(FieldId, String)> {
        let text = |s: &str| Some(s.trim()).filter(|s| !s.is_empty()).map(str::to_string);
        let number = |n: Option<u32>| n.map(|n| n.to_string());
        let evidence = |e: &EvidenceField| match e {
            EvidenceField::Empty => None,
            EvidenceField::Typed { .. } => e.text().map(|t| t.trim().to_string()),
            EvidenceField::Uploaded { .. } => Some("uploaded document on file".to_string()),
        };

        let values = vec![
            (FieldId::PatientName, text(&self.patient_name)),
            (FieldId::DateOfBirth, text(&self.date_of_birth)),
            (FieldId::Insurer, text(&self.insurer).map(|k| payer_display_name(&k))),
            (FieldId::MemberId, text(&self.member_id)),
            (FieldId::GroupNumber, text(&self.group_number)),
            (FieldId::ProviderName, text(&self.provider_name)),
            (FieldId::Npi, text(&self.npi)),
            (FieldId::DiagnosisCode, text(&self.diagnosis_code)),
            (FieldId::ProcedureCode, text(&self.procedure_code)),
            (FieldId::ProcedureType, text(&self.procedure_type)),
            (FieldId::AnatomicalLocation, text(&self.anatomical_location)),
            (
                FieldId::SymptomDuration,
                self.symptom_duration
                    .map(|n| format!("{n} {}(s)", self.symptom_duration_unit.label())),
            ),
            (FieldId::TherapyWeeks, self.therapy_weeks.map(|w| format!("{w} weeks"))),
            (FieldId::MedicationName, text(&self.medication_name)),
            (
                FieldId::MedicationWeeks,
                self.medication_weeks.map(|w| format!("{w} weeks")),
            ),
            (FieldId::InjectionType, text(&self.injection_type)),
            (FieldId::InjectionCount, number(self.injection_count)),
            (FieldId::ImagingType, text(&self.imaging_type)),
            (FieldId::ImagingDate, text(&self.imaging_date)),
            (FieldId::ImagingSummary, evidence(&self.imaging_summary)),
            (FieldId::PainScale, self.documented_pain().map(|p| format!("{p}/10"))),
            (
                FieldId::FunctionalImpairment,
                self.functional_impairment.map(|f| f.label().to_string()),
            ),
            (
                FieldId::WorkStatus,
                self.work_status.map(|w| w.label().to_string()),
            ),
            (FieldId::ObjectiveFindings, evidence(&self.objective_findings)),
        ];

        values
            .into_iter()
            .filter_map(|(id, value)| value.map(|v| (id, v)))
            .collect()
    }

    /// True when the field carries no value.
    pub fn is_blank(&self, field: FieldId) -> bool {
        self.field_fills()
            .into_iter()
            .find(|(id, _)| *id == field)
            .map(|(_, fill)| fill == FieldFill::Empty)
            .unwrap_or(true)
    }
}

/// Display name for a payer key. Unknown keys are title-cased.
pub fn payer_display_name(key: &str) -> String {
    match key.trim().to_lowercase().as_str() {
        "united" => "United Healthcare".to_string(),
        "bcbs" => "Blue Cross Blue Shield".to_string(),
        "aetna" => "Aetna".to_string(),
        "cigna" => "Cigna".to_string(),
        "medicare" => "Medicare".to_string(),
        "medicaid" => "Medicaid".to_string(),
        "humana" => "Humana".to_string(),
        other => {
            let mut chars = other.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_typed_evidence_collapses_to_empty() {
        assert_eq!(EvidenceField::typed("   "), EvidenceField::Empty);
        assert!(!EvidenceField::typed("").is_present());
    }

    #[test]
    fn uploaded_evidence_is_present_but_has_no_text() {
        let field = EvidenceField::uploaded("mri_report.pdf");
        assert!(field.is_present());
        assert_eq!(field.text(), None);
        assert_eq!(field.text_len(), 0);
    }

    #[test]
    fn field_fills_cover_every_field_once() {
        let fills = FormSnapshot::default().field_fills();
        assert_eq!(fills.len(), 24);
        assert!(fills.iter().all(|(_, f)| *f == FieldFill::Empty));
    }

    #[test]
    fn uploads_are_reported_separately_from_filled() {
        let snapshot = FormSnapshot {
            objective_findings: EvidenceField::uploaded("exam.pdf"),
            imaging_summary: EvidenceField::typed("L4-L5 disc protrusion"),
            ..Default::default()
        };
        let fills = snapshot.field_fills();
        let find = |id| fills.iter().find(|(f, _)| *f == id).map(|(_, fill)| *fill);
        assert_eq!(find(FieldId::ObjectiveFindings), Some(FieldFill::Uploaded));
        assert_eq!(find(FieldId::ImagingSummary), Some(FieldFill::Filled));
    }

    #[test]
    fn filled_values_hide_upload_names() {
        let snapshot = FormSnapshot {
            insurer: "aetna".to_string(),
            therapy_weeks: Some(8),
            objective_findings: EvidenceField::uploaded("exam_notes.pdf"),
            ..Default::default()
        };
        let values = snapshot.filled_values();
        assert_eq!(
            values,
            vec![
                (FieldId::Insurer, "Aetna".to_string()),
                (FieldId::TherapyWeeks, "8 weeks".to_string()),
                (
                    FieldId::ObjectiveFindings,
                    "uploaded document on file".to_string()
                ),
            ]
        );
    }

    #[test]
    fn payer_names() {
        assert_eq!(payer_display_name("united"), "United Healthcare");
        assert_eq!(payer_display_name("BCBS"), "Blue Cross Blue Shield");
        assert_eq!(payer_display_name("tricare"), "Tricare");
        assert_eq!(payer_display_name(""), "");
    }

    #[test]
    fn pain_above_the_scale_is_not_documented() {
        let at = |pain| FormSnapshot {
            pain_scale: pain,
            ..Default::default()
        };
        assert_eq!(at(Some(10)).documented_pain(), Some(10));
        assert_eq!(at(Some(11)).documented_pain(), None);
        assert!(at(Some(50)).filled_values().is_empty());
    }

    #[test]
    fn snapshot_deserializes_with_missing_fields() {
        let snapshot: FormSnapshot =
            serde_json::from_str(r#"{"patient_name":"John Smith","pain_scale":8}"#).unwrap();
        assert_eq!(snapshot.patient_name, "John Smith");
        assert_eq!(snapshot.pain_scale, Some(8));
        assert_eq!(snapshot.symptom_duration_unit, DurationUnit::Weeks);
        assert_eq!(snapshot.objective_findings, EvidenceField::Empty);
    }
}
