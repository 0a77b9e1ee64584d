use thiserror::Error;

use authpilot_bedrock::error::BedrockError;
use authpilot_core::error::CoreError;
use authpilot_letters::error::LetterError;
use authpilot_scoring::readiness::AggregateValidationError;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Validation(#[from] AggregateValidationError),

    #[error(transparent)]
    Intake(#[from] FileIntakeError),

    #[error("letter assembly failed: {0}")]
    Letter(#[from] LetterError),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("unknown denied case: {0}")]
    UnknownCase(String),

    #[error("a letter is already being generated")]
    GenerationInFlight,

    #[error("the debounce worker has stopped")]
    DebouncerClosed,
}

/// A rejected upload. Each cause has its own user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FileIntakeError {
    #[error("Please upload {allowed} only.")]
    UnsupportedType {
        file_name: String,
        mime_type: String,
        allowed: &'static str,
    },

    #[error("File size must be less than {limit_mb}MB.")]
    TooLarge {
        file_name: String,
        size_bytes: u64,
        limit_mb: u64,
    },
}

/// The remote drafting path failed; the caller falls back to local assembly.
#[derive(Debug, Error)]
pub enum RemoteGenerationError {
    #[error("remote letter generation failed: {0}")]
    Service(#[from] BedrockError),
}
