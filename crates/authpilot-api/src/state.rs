use std::sync::Arc;

use authpilot_core::models::guidelines::LetterGuidelines;
use authpilot_session::config::SessionConfig;
use authpilot_session::strategy::BedrockGenerator;

/// Shared application state, injected into all route handlers via Axum state.
#[derive(Clone)]
pub struct AppState {
    pub guidelines: Arc<LetterGuidelines>,
    pub session: SessionConfig,
    /// Present when remote drafting is enabled.
    pub remote: Option<BedrockGenerator>,
}

impl AppState {
    pub fn new(guidelines: LetterGuidelines, session: SessionConfig) -> Self {
        Self {
            guidelines: Arc::new(guidelines),
            session,
            remote: None,
        }
    }

    pub fn with_remote(mut self, remote: BedrockGenerator) -> Self {
        self.remote = Some(remote);
        self
    }
}
