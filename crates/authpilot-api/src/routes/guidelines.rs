use axum::Json;
use axum::extract::State;

use authpilot_core::models::guidelines::LetterGuidelines;

use crate::state::AppState;

/// The standing instructions sent with remote drafting requests.
pub async fn get_guidelines(State(state): State<AppState>) -> Json<LetterGuidelines> {
    Json(LetterGuidelines::clone(&state.guidelines))
}
