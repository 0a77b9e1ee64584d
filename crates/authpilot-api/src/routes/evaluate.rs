use axum::Json;
use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use authpilot_core::models::snapshot::{FieldId, FormSnapshot};
use authpilot_scoring::insights::{Assessment, assess};
use authpilot_scoring::readiness::{FieldIssue, validate_for_generation};
use authpilot_scoring::validators::{
    ValidationResult, validate_birth_date, validate_diagnosis_code, validate_pain_scale,
    validate_procedure_code,
};

/// Score a form and list what would strengthen it.
pub async fn evaluate(Json(snapshot): Json<FormSnapshot>) -> Json<Assessment> {
    Json(assess(&snapshot))
}

#[derive(Deserialize)]
pub struct ValidateRequest {
    pub snapshot: FormSnapshot,
    #[serde(default)]
    pub today: Option<Date>,
}

/// Inline result for one formatted field.
#[derive(Serialize)]
pub struct FieldCheck {
    pub field: FieldId,
    #[serde(flatten)]
    pub result: ValidationResult,
}

#[derive(Serialize)]
pub struct ValidateResponse {
    /// True when a letter can be generated.
    pub ready: bool,
    /// Everything blocking generation, in form order.
    pub issues: Vec<FieldIssue>,
    /// Format checks for the fields the user has filled in.
    pub fields: Vec<FieldCheck>,
}

pub async fn validate(Json(req): Json<ValidateRequest>) -> Json<ValidateResponse> {
    let today = req.today.unwrap_or_else(super::today);
    let snapshot = &req.snapshot;

    let issues = match validate_for_generation(snapshot, today) {
        Ok(()) => Vec::new(),
        Err(err) => err.issues,
    };

    let mut fields = Vec::new();
    let mut check = |field: FieldId, result: ValidationResult| {
        fields.push(FieldCheck { field, result });
    };
    if !snapshot.date_of_birth.trim().is_empty() {
        check(
            FieldId::DateOfBirth,
            validate_birth_date(&snapshot.date_of_birth, today),
        );
    }
    if !snapshot.diagnosis_code.trim().is_empty() {
        check(
            FieldId::DiagnosisCode,
            validate_diagnosis_code(&snapshot.diagnosis_code),
        );
    }
    if !snapshot.procedure_code.trim().is_empty() {
        check(
            FieldId::ProcedureCode,
            validate_procedure_code(&snapshot.procedure_code),
        );
    }
    if let Some(pain) = snapshot.pain_scale {
        check(FieldId::PainScale, validate_pain_scale(i64::from(pain)));
    }

    Json(ValidateResponse {
        ready: issues.is_empty(),
        issues,
        fields,
    })
}
