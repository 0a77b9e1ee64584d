//! Letter generation strategies and the remote-then-local fallback.

use std::future::Future;

use aws_sdk_bedrockruntime::Client;
use jiff::civil::Date;
use tracing::{info, warn};

use authpilot_bedrock::generate::{GenerationRequest, LetterSubject, generate_letter_text};
use authpilot_core::models::letter::{GeneratedLetter, LetterKind};
use authpilot_letters::assemble::{LetterContext, assemble};
use authpilot_letters::error::LetterError;

use crate::error::RemoteGenerationError;

/// Input for one letter, whichever strategy produces it.
#[derive(Debug, Clone, Copy)]
pub struct LetterJob<'a> {
    pub request: GenerationRequest<'a>,
    /// Date printed on appeal letters.
    pub letter_date: Date,
}

impl LetterJob<'_> {
    pub fn kind(&self) -> LetterKind {
        self.request.subject.kind()
    }
}

/// A way to turn a [`LetterJob`] into letter text.
pub trait LetterGenerator {
    type Error: std::error::Error;

    fn generate(
        &self,
        job: &LetterJob<'_>,
    ) -> impl Future<Output = Result<GeneratedLetter, Self::Error>> + Send;
}

/// Fills the built-in letter templates. Needs no network and only fails on
/// a template error.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalAssembler;

impl LocalAssembler {
    pub fn assemble(&self, job: &LetterJob<'_>) -> Result<GeneratedLetter, LetterError> {
        let context = match job.request.subject {
            LetterSubject::Authorization(snapshot) => LetterContext::Authorization(snapshot),
            LetterSubject::Appeal(draft) => LetterContext::Appeal {
                draft,
                letter_date: job.letter_date,
            },
        };
        Ok(GeneratedLetter::local(job.kind(), assemble(context)?))
    }
}

impl LetterGenerator for LocalAssembler {
    type Error = LetterError;

    async fn generate(&self, job: &LetterJob<'_>) -> Result<GeneratedLetter, LetterError> {
        self.assemble(job)
    }
}

/// Drafts letters with a Bedrock model.
#[derive(Debug, Clone)]
pub struct BedrockGenerator {
    client: Client,
    model_id: String,
}

impl BedrockGenerator {
    pub fn new(client: Client, model_id: impl Into<String>) -> Self {
        Self {
            client,
            model_id: model_id.into(),
        }
    }
}

impl LetterGenerator for BedrockGenerator {
    type Error = RemoteGenerationError;

    async fn generate(&self, job: &LetterJob<'_>) -> Result<GeneratedLetter, RemoteGenerationError> {
        let output = generate_letter_text(&self.client, &self.model_id, &job.request).await?;
        Ok(GeneratedLetter::remote(
            job.kind(),
            output.text,
            output.model_id,
            Some(output.usage),
        ))
    }
}

/// A generated letter, plus the remote failure if the local template had to
/// stand in.
#[derive(Debug)]
pub struct GenerationOutcome {
    pub letter: GeneratedLetter,
    pub remote_error: Option<RemoteGenerationError>,
}

impl GenerationOutcome {
    pub fn fell_back(&self) -> bool {
        self.remote_error.is_some()
    }
}

/// Try `remote` once, and assemble locally if it fails or is absent.
///
/// There are no retries. A remote failure is returned alongside the local
/// letter so the caller can tell the two apart.
pub async fn generate_with_fallback<R>(
    remote: Option<&R>,
    job: &LetterJob<'_>,
) -> Result<GenerationOutcome, LetterError>
where
    R: LetterGenerator<Error = RemoteGenerationError>,
{
    let kind = job.kind();
    let Some(remote) = remote else {
        info!(?kind, "assembling letter locally");
        return Ok(GenerationOutcome {
            letter: LocalAssembler.assemble(job)?,
            remote_error: None,
        });
    };

    match remote.generate(job).await {
        Ok(letter) => {
            info!(?kind, letter_id = %letter.metadata.id, "remote letter generated");
            Ok(GenerationOutcome {
                letter,
                remote_error: None,
            })
        }
        Err(e) => {
            warn!(?kind, error = %e, "remote generation failed, falling back to local assembly");
            Ok(GenerationOutcome {
                letter: LocalAssembler.assemble(job)?,
                remote_error: Some(e),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use aws_sdk_bedrockruntime::config::{BehaviorVersion, Region};

    use authpilot_bedrock::error::BedrockError;
    use authpilot_core::models::guidelines::LetterGuidelines;
    use authpilot_core::models::letter::LetterSource;
    use authpilot_core::models::snapshot::FormSnapshot;

    use super::*;

    struct Unreachable;

    impl LetterGenerator for Unreachable {
        type Error = RemoteGenerationError;

        async fn generate(&self, _: &LetterJob<'_>) -> Result<GeneratedLetter, Self::Error> {
            Err(BedrockError::Invocation("connection refused".to_string()).into())
        }
    }

    struct Canned;

    impl LetterGenerator for Canned {
        type Error = RemoteGenerationError;

        async fn generate(&self, job: &LetterJob<'_>) -> Result<GeneratedLetter, Self::Error> {
            Ok(GeneratedLetter::remote(
                job.kind(),
                "Dear Reviewer,".to_string(),
                "test-model",
                None,
            ))
        }
    }

    fn snapshot() -> FormSnapshot {
        FormSnapshot {
            patient_name: "John Smith".to_string(),
            ..Default::default()
        }
    }

    fn job<'a>(snapshot: &'a FormSnapshot, guidelines: &'a LetterGuidelines) -> LetterJob<'a> {
        LetterJob {
            request: GenerationRequest {
                subject: LetterSubject::Authorization(snapshot),
                guidelines,
                context: &[],
            },
            letter_date: Date::constant(2024, 3, 1),
        }
    }

    #[tokio::test]
    async fn remote_failure_falls_back_to_local() {
        let (snapshot, guidelines) = (snapshot(), LetterGuidelines::default());
        let outcome = generate_with_fallback(Some(&Unreachable), &job(&snapshot, &guidelines))
            .await
            .unwrap();

        assert!(outcome.fell_back());
        assert_eq!(outcome.letter.metadata.source, LetterSource::Local);
        assert!(outcome.letter.content.contains("John Smith"));
        assert!(
            outcome
                .remote_error
                .unwrap()
                .to_string()
                .contains("connection refused")
        );
    }

    #[tokio::test]
    async fn remote_success_is_used() {
        let (snapshot, guidelines) = (snapshot(), LetterGuidelines::default());
        let outcome = generate_with_fallback(Some(&Canned), &job(&snapshot, &guidelines))
            .await
            .unwrap();

        assert!(!outcome.fell_back());
        assert!(outcome.letter.is_remote());
        assert_eq!(outcome.letter.content, "Dear Reviewer,");
    }

    #[tokio::test]
    async fn no_remote_means_local_without_error() {
        let (snapshot, guidelines) = (snapshot(), LetterGuidelines::default());
        let outcome = generate_with_fallback::<Canned>(None, &job(&snapshot, &guidelines))
            .await
            .unwrap();

        assert!(!outcome.fell_back());
        assert!(!outcome.letter.is_remote());
    }

    #[tokio::test]
    async fn unconfigured_model_falls_back_to_local() {
        let config = aws_sdk_bedrockruntime::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new("us-east-1"))
            .build();
        let remote = BedrockGenerator::new(Client::from_conf(config), "");
        let (snapshot, guidelines) = (snapshot(), LetterGuidelines::default());

        let outcome = generate_with_fallback(Some(&remote), &job(&snapshot, &guidelines))
            .await
            .unwrap();

        assert!(matches!(
            outcome.remote_error,
            Some(RemoteGenerationError::Service(BedrockError::Config(_)))
        ));
        assert_eq!(outcome.letter.metadata.source, LetterSource::Local);
    }
}
