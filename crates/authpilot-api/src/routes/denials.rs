use axum::Json;
use axum::extract::{Path, State};
use serde::Serialize;

use authpilot_core::fixtures::denied_cases;
use authpilot_core::models::checklist::ChecklistItem;
use authpilot_core::models::denial::DeniedCase;
use authpilot_session::session::AppealSession;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Serialize)]
pub struct DenialSummary {
    id: String,
    patient: String,
    procedure: String,
    insurance: String,
    amount: String,
    denial_date: String,
    denial_reason: String,
    analyzed: bool,
}

#[derive(Serialize)]
pub struct DenialDetail {
    case: DeniedCase,
    checklist: Vec<ChecklistItem>,
    success_probability: u8,
    similar_case_rate: Option<u8>,
}

pub async fn list_denials() -> Json<Vec<DenialSummary>> {
    let denials = denied_cases()
        .iter()
        .map(|case| DenialSummary {
            id: case.id.clone(),
            patient: case.patient.clone(),
            procedure: case.procedure.clone(),
            insurance: case.insurance.clone(),
            amount: case.amount.clone(),
            denial_date: case.denial_date.clone(),
            denial_reason: case.denial_reason.clone(),
            analyzed: case.analysis.is_some(),
        })
        .collect();
    Json(denials)
}

/// A denied case with its appeal checklist and starting outlook.
pub async fn get_denial(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DenialDetail>, ApiError> {
    let session = AppealSession::open(&id, state.session.clone(), (*state.guidelines).clone())?;

    Ok(Json(DenialDetail {
        success_probability: session.success_probability(),
        similar_case_rate: session.similar_case_rate(),
        checklist: session.draft().checklist.clone(),
        case: session.draft().case.clone(),
    }))
}
