//! The two workflows a user drives: a new prior-authorization request and an
//! appeal against a denied one.
//!
//! Each session has exactly one writer. Edits recompute derived state
//! synchronously; only letter generation suspends, and it runs outside the
//! session through a [`PendingGeneration`] so a newer request can supersede
//! it while it is in flight.

use jiff::civil::Date;
use tracing::info;
use uuid::Uuid;

use authpilot_bedrock::context::ContextDocument;
use authpilot_bedrock::generate::{GenerationRequest, LetterSubject};
use authpilot_core::fixtures::find_denied_case;
use authpilot_core::models::appeal::AppealDraft;
use authpilot_core::models::checklist::FileHandle;
use authpilot_core::models::denial::DeniedCase;
use authpilot_core::models::guidelines::LetterGuidelines;
use authpilot_core::models::letter::GeneratedLetter;
use authpilot_core::models::snapshot::{EvidenceField, FormSnapshot};
use authpilot_letters::error::LetterError;
use authpilot_scoring::appeal::{similar_case_rate, success_probability};
use authpilot_scoring::insights::{Assessment, assess};
use authpilot_scoring::readiness::{AggregateValidationError, validate_for_generation};

use crate::config::SessionConfig;
use crate::error::{RemoteGenerationError, SessionError};
use crate::intake::{AcceptedFile, IncomingFile, UploadSlot, accept_file};
use crate::sequence::{GenerationTicket, GenerationTracker};
use crate::strategy::{GenerationOutcome, LetterGenerator, LetterJob, generate_with_fallback};

/// Free-text fields that may be backed by an uploaded document instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvidenceTarget {
    ObjectiveFindings,
    ImagingSummary,
}

#[derive(Debug, Clone)]
enum PendingSubject {
    Authorization(FormSnapshot),
    Appeal(AppealDraft),
}

/// A generation request detached from its session. Holds its own copy of
/// the inputs, so the session stays editable while it runs.
#[derive(Debug, Clone)]
pub struct PendingGeneration {
    ticket: GenerationTicket,
    subject: PendingSubject,
    guidelines: LetterGuidelines,
    context: Vec<ContextDocument>,
    letter_date: Date,
}

impl PendingGeneration {
    pub fn ticket(&self) -> GenerationTicket {
        self.ticket
    }

    pub fn job(&self) -> LetterJob<'_> {
        let subject = match &self.subject {
            PendingSubject::Authorization(snapshot) => LetterSubject::Authorization(snapshot),
            PendingSubject::Appeal(draft) => LetterSubject::Appeal(draft),
        };
        LetterJob {
            request: GenerationRequest {
                subject,
                guidelines: &self.guidelines,
                context: &self.context,
            },
            letter_date: self.letter_date,
        }
    }

    pub async fn run<R>(&self, remote: Option<&R>) -> Result<GenerationOutcome, LetterError>
    where
        R: LetterGenerator<Error = RemoteGenerationError>,
    {
        generate_with_fallback(remote, &self.job()).await
    }
}

/// Current letter and the bookkeeping around producing it.
#[derive(Debug, Default)]
struct LetterState {
    tracker: GenerationTracker,
    letter: Option<GeneratedLetter>,
    fallback_notice: Option<String>,
}

impl LetterState {
    fn begin(&mut self, supersede: bool) -> Result<GenerationTicket, SessionError> {
        if supersede {
            Ok(self.tracker.supersede())
        } else {
            self.tracker.try_begin()
        }
    }

    /// Apply a finished request. Stale results are dropped, errors included.
    fn finish(
        &mut self,
        ticket: GenerationTicket,
        result: Result<GenerationOutcome, LetterError>,
    ) -> Result<bool, SessionError> {
        let Some(result) = self.tracker.complete(ticket, result) else {
            return Ok(false);
        };
        let outcome = result?;
        self.fallback_notice = outcome.remote_error.as_ref().map(ToString::to_string);
        info!(
            ticket = ticket.sequence(),
            letter_id = %outcome.letter.metadata.id,
            fell_back = outcome.fell_back(),
            "letter applied"
        );
        self.letter = Some(outcome.letter);
        Ok(true)
    }
}

/// A prior-authorization request being filled in.
#[derive(Debug)]
pub struct AuthorizationSession {
    config: SessionConfig,
    guidelines: LetterGuidelines,
    snapshot: FormSnapshot,
    assessment: Assessment,
    context_file: Option<AcceptedFile>,
    letters: LetterState,
}

impl AuthorizationSession {
    pub fn new(config: SessionConfig, guidelines: LetterGuidelines) -> Self {
        Self::with_snapshot(config, guidelines, FormSnapshot::default())
    }

    pub fn with_snapshot(
        config: SessionConfig,
        guidelines: LetterGuidelines,
        snapshot: FormSnapshot,
    ) -> Self {
        Self {
            config,
            guidelines,
            assessment: assess(&snapshot),
            snapshot,
            context_file: None,
            letters: LetterState::default(),
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn snapshot(&self) -> &FormSnapshot {
        &self.snapshot
    }

    pub fn assessment(&self) -> &Assessment {
        &self.assessment
    }

    pub fn letter(&self) -> Option<&GeneratedLetter> {
        self.letters.letter.as_ref()
    }

    /// Why the last applied letter came from the local template instead of
    /// the remote model, if it did.
    pub fn fallback_notice(&self) -> Option<&str> {
        self.letters.fallback_notice.as_deref()
    }

    pub fn is_generating(&self) -> bool {
        self.letters.tracker.is_busy()
    }

    /// Change the form and re-evaluate it.
    pub fn edit(&mut self, change: impl FnOnce(&mut FormSnapshot)) -> &Assessment {
        change(&mut self.snapshot);
        self.assessment = assess(&self.snapshot);
        &self.assessment
    }

    pub fn replace_snapshot(&mut self, snapshot: FormSnapshot) -> &Assessment {
        self.edit(|current| *current = snapshot)
    }

    /// Set the background document sent with remote requests, replacing any
    /// earlier one. A rejected file leaves the current one in place.
    pub fn upload_context(&mut self, file: IncomingFile) -> Result<&FileHandle, SessionError> {
        let accepted = accept_file(UploadSlot::Context, file, &self.config)?;
        Ok(self.context_file.insert(accepted).handle())
    }

    pub fn clear_context(&mut self) -> Option<FileHandle> {
        self.context_file.take().map(AcceptedFile::into_handle)
    }

    pub fn context_file(&self) -> Option<&FileHandle> {
        self.context_file.as_ref().map(AcceptedFile::handle)
    }

    /// Back a clinical field with an uploaded document. The field counts as
    /// provided but contributes no text.
    pub fn upload_evidence(
        &mut self,
        target: EvidenceTarget,
        file: IncomingFile,
    ) -> Result<&Assessment, SessionError> {
        let handle = accept_file(UploadSlot::ClinicalEvidence, file, &self.config)?.into_handle();
        let field = EvidenceField::uploaded(handle.name);
        Ok(self.edit(|snapshot| match target {
            EvidenceTarget::ObjectiveFindings => snapshot.objective_findings = field,
            EvidenceTarget::ImagingSummary => snapshot.imaging_summary = field,
        }))
    }

    pub fn validate(&self, today: Date) -> Result<(), AggregateValidationError> {
        validate_for_generation(&self.snapshot, today)
    }

    /// Start generating a letter. Fails if the form is incomplete or a
    /// request is already in flight.
    pub fn begin_generation(&mut self, today: Date) -> Result<PendingGeneration, SessionError> {
        self.start(today, false)
    }

    /// Start generating a letter, making any in-flight request stale.
    pub fn supersede_generation(&mut self, today: Date) -> Result<PendingGeneration, SessionError> {
        self.start(today, true)
    }

    /// Apply a finished request. Returns `false` when the result was stale
    /// and has been discarded.
    pub fn finish_generation(
        &mut self,
        ticket: GenerationTicket,
        result: Result<GenerationOutcome, LetterError>,
    ) -> Result<bool, SessionError> {
        self.letters.finish(ticket, result)
    }

    /// Validate, generate and apply in one step.
    pub async fn generate<R>(
        &mut self,
        remote: Option<&R>,
        today: Date,
    ) -> Result<Option<&GeneratedLetter>, SessionError>
    where
        R: LetterGenerator<Error = RemoteGenerationError>,
    {
        let pending = self.begin_generation(today)?;
        let result = pending.run(remote).await;
        self.finish_generation(pending.ticket(), result)?;
        Ok(self.letter())
    }

    fn start(&mut self, today: Date, supersede: bool) -> Result<PendingGeneration, SessionError> {
        self.validate(today)?;
        let ticket = self.letters.begin(supersede)?;
        Ok(PendingGeneration {
            ticket,
            subject: PendingSubject::Authorization(self.snapshot.clone()),
            guidelines: self.guidelines.clone(),
            context: self.context_documents(),
            letter_date: today,
        })
    }

    fn context_documents(&self) -> Vec<ContextDocument> {
        match &self.context_file {
            Some(AcceptedFile::Text { handle, text }) => vec![ContextDocument {
                filename: handle.name.clone(),
                text: text.clone(),
            }],
            _ => Vec::new(),
        }
    }
}

/// An appeal being assembled against one denied case.
#[derive(Debug)]
pub struct AppealSession {
    config: SessionConfig,
    guidelines: LetterGuidelines,
    draft: AppealDraft,
    letters: LetterState,
}

impl AppealSession {
    /// Open an appeal for a bundled denied case, with its checklist seeded.
    pub fn open(
        case_id: &str,
        config: SessionConfig,
        guidelines: LetterGuidelines,
    ) -> Result<Self, SessionError> {
        let case = find_denied_case(case_id)
            .ok_or_else(|| SessionError::UnknownCase(case_id.to_string()))?;
        Ok(Self::for_case(case.clone(), config, guidelines))
    }

    pub fn for_case(case: DeniedCase, config: SessionConfig, guidelines: LetterGuidelines) -> Self {
        let mut draft = AppealDraft::new(case);
        draft.seed_checklist();
        Self {
            config,
            guidelines,
            draft,
            letters: LetterState::default(),
        }
    }

    pub fn draft(&self) -> &AppealDraft {
        &self.draft
    }

    pub fn letter(&self) -> Option<&GeneratedLetter> {
        self.letters.letter.as_ref()
    }

    pub fn fallback_notice(&self) -> Option<&str> {
        self.letters.fallback_notice.as_deref()
    }

    pub fn is_generating(&self) -> bool {
        self.letters.tracker.is_busy()
    }

    pub fn success_probability(&self) -> u8 {
        success_probability(&self.draft.checklist)
    }

    pub fn similar_case_rate(&self) -> Option<u8> {
        self.draft
            .case
            .analysis
            .as_ref()
            .and_then(|a| similar_case_rate(a.similar_cases))
    }

    pub fn set_item_notes(&mut self, item_id: &str, notes: impl Into<String>) -> Result<(), SessionError> {
        Ok(self.draft.set_item_notes(item_id, notes)?)
    }

    /// Attach a document to a checklist item, completing it.
    pub fn attach_to_item(
        &mut self,
        item_id: &str,
        file: IncomingFile,
    ) -> Result<FileHandle, SessionError> {
        self.draft.item_mut(item_id)?;
        let handle = accept_file(UploadSlot::ClinicalEvidence, file, &self.config)?.into_handle();
        self.draft.attach_file(item_id, handle.clone())?;
        Ok(handle)
    }

    pub fn detach_from_item(&mut self, item_id: &str, file_id: Uuid) -> Result<FileHandle, SessionError> {
        Ok(self.draft.detach_file(item_id, file_id)?)
    }

    /// Attach a document that is not tied to a checklist item.
    pub fn attach_additional(&mut self, file: IncomingFile) -> Result<FileHandle, SessionError> {
        let handle = accept_file(UploadSlot::ClinicalEvidence, file, &self.config)?.into_handle();
        self.draft.additional_files.push(handle.clone());
        Ok(handle)
    }

    pub fn remove_additional(&mut self, file_id: Uuid) -> Option<FileHandle> {
        let index = self
            .draft
            .additional_files
            .iter()
            .position(|f| f.id == file_id)?;
        Some(self.draft.additional_files.remove(index))
    }

    pub fn set_comments(&mut self, comments: impl Into<String>) {
        self.draft.additional_comments = comments.into();
    }

    pub fn set_provider(&mut self, name: impl Into<String>, npi: impl Into<String>) {
        self.draft.provider_name = name.into();
        self.draft.npi = npi.into();
    }

    /// Start generating the appeal letter unless a request is in flight.
    pub fn begin_generation(&mut self, today: Date) -> Result<PendingGeneration, SessionError> {
        let ticket = self.letters.begin(false)?;
        Ok(self.pending(ticket, today))
    }

    pub fn supersede_generation(&mut self, today: Date) -> PendingGeneration {
        let ticket = self.letters.tracker.supersede();
        self.pending(ticket, today)
    }

    pub fn finish_generation(
        &mut self,
        ticket: GenerationTicket,
        result: Result<GenerationOutcome, LetterError>,
    ) -> Result<bool, SessionError> {
        self.letters.finish(ticket, result)
    }

    pub async fn generate<R>(
        &mut self,
        remote: Option<&R>,
        today: Date,
    ) -> Result<Option<&GeneratedLetter>, SessionError>
    where
        R: LetterGenerator<Error = RemoteGenerationError>,
    {
        let pending = self.begin_generation(today)?;
        let result = pending.run(remote).await;
        self.finish_generation(pending.ticket(), result)?;
        Ok(self.letter())
    }

    fn pending(&self, ticket: GenerationTicket, today: Date) -> PendingGeneration {
        PendingGeneration {
            ticket,
            subject: PendingSubject::Appeal(self.draft.clone()),
            guidelines: self.guidelines.clone(),
            context: Vec::new(),
            letter_date: today,
        }
    }
}
