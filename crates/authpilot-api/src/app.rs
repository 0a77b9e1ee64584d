use axum::Router;
use axum::middleware as axum_mw;
use axum::routing::{get, post};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};

use crate::middleware;
use crate::routes;
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(routes::health::health_check))
        // Evaluation
        .route("/evaluate", post(routes::evaluate::evaluate))
        .route("/validate", post(routes::evaluate::validate))
        // Letters
        .route(
            "/letters/authorization",
            post(routes::letters::authorization_letter),
        )
        .route("/letters/appeal", post(routes::letters::appeal_letter))
        .route("/letters/export", post(routes::letters::export_letter))
        // Reference data
        .route("/cases", get(routes::cases::list_cases))
        .route("/patients", get(routes::patients::list_patients))
        .route("/patients/{id}", get(routes::patients::get_patient))
        .route("/denials", get(routes::denials::list_denials))
        .route("/denials/{id}", get(routes::denials::get_denial))
        .route("/guidelines", get(routes::guidelines::get_guidelines))
        .layer(
            ServiceBuilder::new()
                .layer(cors)
                .layer(axum_mw::from_fn(middleware::audit::audit_log)),
        )
        .with_state(state)
}
