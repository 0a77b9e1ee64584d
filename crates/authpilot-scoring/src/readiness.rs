//! Pre-generation gate: collect every missing or invalid required field.

use jiff::civil::Date;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

use authpilot_core::models::snapshot::{FieldId, FormSnapshot};

use crate::validators::{
    ValidationResult, validate_birth_date, validate_diagnosis_code, validate_pain_scale,
    validate_procedure_code,
};

/// One problem with one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FieldIssue {
    pub field: FieldId,
    pub message: String,
}

/// Every issue blocking letter generation, in form order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, Error)]
#[ts(export)]
#[error(
    "{} field(s) must be corrected before generating: {}",
    .issues.len(),
    summary(.issues)
)]
pub struct AggregateValidationError {
    pub issues: Vec<FieldIssue>,
}

fn summary(issues: &[FieldIssue]) -> String {
    issues
        .iter()
        .map(|i| i.field.label())
        .collect::<Vec<_>>()
        .join(", ")
}

impl AggregateValidationError {
    pub fn contains(&self, field: FieldId) -> bool {
        self.issues.iter().any(|i| i.field == field)
    }
}

/// Fields that must be filled before a letter can be generated.
pub const REQUIRED_FIELDS: &[FieldId] = &[
    FieldId::PatientName,
    FieldId::DateOfBirth,
    FieldId::Insurer,
    FieldId::MemberId,
    FieldId::DiagnosisCode,
    FieldId::ProcedureCode,
];

/// Check required fields and field formats, collecting every failure.
///
/// Validation runs on all fields even after the first failure so the user
/// sees the whole list at once.
pub fn validate_for_generation(
    snapshot: &FormSnapshot,
    today: Date,
) -> Result<(), AggregateValidationError> {
    let mut issues = Vec::new();
    let mut check = |field: FieldId, result: ValidationResult| {
        if let Some(message) = result.error.filter(|_| !result.is_valid) {
            issues.push(FieldIssue { field, message });
        }
    };

    for field in REQUIRED_FIELDS {
        let validated = matches!(
            field,
            FieldId::DateOfBirth | FieldId::DiagnosisCode | FieldId::ProcedureCode
        );
        if !validated && snapshot.is_blank(*field) {
            check(
                *field,
                ValidationResult::invalid(format!("{} is required", field.label())),
            );
        }
    }

    check(
        FieldId::DateOfBirth,
        validate_birth_date(&snapshot.date_of_birth, today),
    );
    check(
        FieldId::DiagnosisCode,
        validate_diagnosis_code(&snapshot.diagnosis_code),
    );
    check(
        FieldId::ProcedureCode,
        validate_procedure_code(&snapshot.procedure_code),
    );
    if let Some(pain) = snapshot.pain_scale {
        check(FieldId::PainScale, validate_pain_scale(i64::from(pain)));
    }

    if issues.is_empty() {
        Ok(())
    } else {
        issues.sort_by_key(|issue| form_position(issue.field));
        Err(AggregateValidationError { issues })
    }
}

fn form_position(field: FieldId) -> usize {
    FormSnapshot::default()
        .field_fills()
        .iter()
        .position(|(id, _)| *id == field)
        .unwrap_or(usize::MAX)
}
