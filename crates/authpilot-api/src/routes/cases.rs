use axum::Json;
use axum::extract::Query;

use authpilot_core::fixtures::tracked_cases;
use authpilot_core::models::case::{CaseFilter, TrackedCase};

/// The case board, narrowed by `?status=` and `?search=`.
pub async fn list_cases(Query(filter): Query<CaseFilter>) -> Json<Vec<TrackedCase>> {
    let cases = tracked_cases()
        .iter()
        .filter(|case| filter.matches(case))
        .cloned()
        .collect();
    Json(cases)
}
