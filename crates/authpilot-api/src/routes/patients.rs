use axum::Json;
use axum::extract::{Path, Query};
use serde::Serialize;

use authpilot_core::fixtures::{find_patient, patient_records};
use authpilot_core::models::patient::{Patient, PatientFilter, PatientRecord, insurers};

use crate::error::ApiError;

#[derive(Serialize)]
pub struct PatientDirectory {
    patients: Vec<Patient>,
    /// Every insurer in the directory, for the filter menu. Not narrowed.
    insurances: Vec<String>,
}

pub async fn list_patients(Query(filter): Query<PatientFilter>) -> Json<PatientDirectory> {
    let all = patient_records().iter().map(|record| &record.patient);
    Json(PatientDirectory {
        insurances: insurers(all.clone()),
        patients: all.filter(|p| filter.matches(p)).cloned().collect(),
    })
}

/// A patient with their requests, letters and timeline.
pub async fn get_patient(Path(id): Path<String>) -> Result<Json<PatientRecord>, ApiError> {
    find_patient(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("patient not found: {id}")))
}
