use axum::Json;
use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use authpilot_core::models::letter::GeneratedLetter;
use authpilot_core::models::snapshot::FormSnapshot;
use authpilot_letters::docx::generate_docx;
use authpilot_letters::print::render_print_document;
use authpilot_letters::styles::DocumentStyles;
use authpilot_session::intake::IncomingFile;
use authpilot_session::session::{AppealSession, AuthorizationSession};

use crate::error::ApiError;
use crate::state::AppState;

const DOCX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// A file the browser holds. Text files may include their content.
#[derive(Deserialize)]
pub struct FileUpload {
    pub name: String,
    #[serde(default)]
    pub mime_type: String,
    #[serde(default)]
    pub size_bytes: u64,
    #[serde(default)]
    pub text: Option<String>,
}

impl From<FileUpload> for IncomingFile {
    fn from(file: FileUpload) -> Self {
        match file.text {
            Some(text) => IncomingFile::new(file.name, file.mime_type, text.into_bytes()),
            None => IncomingFile::described(file.name, file.mime_type, file.size_bytes),
        }
    }
}

#[derive(Serialize)]
pub struct LetterResponse {
    pub letter: GeneratedLetter,
    /// Set when the remote model failed and the local template was used.
    pub fallback_notice: Option<String>,
}

#[derive(Deserialize)]
pub struct AuthorizationLetterRequest {
    pub snapshot: FormSnapshot,
    #[serde(default)]
    pub context: Option<FileUpload>,
    #[serde(default)]
    pub today: Option<Date>,
}

pub async fn authorization_letter(
    State(state): State<AppState>,
    Json(req): Json<AuthorizationLetterRequest>,
) -> Result<Json<LetterResponse>, ApiError> {
    let mut session = AuthorizationSession::with_snapshot(
        state.session.clone(),
        (*state.guidelines).clone(),
        req.snapshot,
    );
    if let Some(context) = req.context {
        session.upload_context(context.into())?;
    }

    let today = req.today.unwrap_or_else(super::today);
    let letter = session
        .generate(state.remote.as_ref(), today)
        .await?
        .cloned()
        .ok_or_else(|| ApiError::Internal("generation produced no letter".to_string()))?;

    Ok(Json(LetterResponse {
        letter,
        fallback_notice: session.fallback_notice().map(str::to_string),
    }))
}

#[derive(Deserialize)]
pub struct ChecklistUpdate {
    pub id: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub files: Vec<FileUpload>,
}

#[derive(Deserialize)]
pub struct AppealLetterRequest {
    pub case_id: String,
    #[serde(default)]
    pub items: Vec<ChecklistUpdate>,
    #[serde(default)]
    pub additional_comments: String,
    #[serde(default)]
    pub additional_files: Vec<FileUpload>,
    #[serde(default)]
    pub provider_name: String,
    #[serde(default)]
    pub npi: String,
    #[serde(default)]
    pub today: Option<Date>,
}

#[derive(Serialize)]
pub struct AppealLetterResponse {
    pub letter: GeneratedLetter,
    pub fallback_notice: Option<String>,
    pub success_probability: u8,
}

pub async fn appeal_letter(
    State(state): State<AppState>,
    Json(req): Json<AppealLetterRequest>,
) -> Result<Json<AppealLetterResponse>, ApiError> {
    let mut session = AppealSession::open(
        &req.case_id,
        state.session.clone(),
        (*state.guidelines).clone(),
    )?;

    for item in req.items {
        session.set_item_notes(&item.id, item.notes)?;
        for file in item.files {
            session.attach_to_item(&item.id, file.into())?;
        }
    }
    for file in req.additional_files {
        session.attach_additional(file.into())?;
    }
    session.set_comments(req.additional_comments);
    session.set_provider(req.provider_name, req.npi);

    let today = req.today.unwrap_or_else(super::today);
    let letter = session
        .generate(state.remote.as_ref(), today)
        .await?
        .cloned()
        .ok_or_else(|| ApiError::Internal("generation produced no letter".to_string()))?;

    Ok(Json(AppealLetterResponse {
        letter,
        fallback_notice: session.fallback_notice().map(str::to_string),
        success_probability: session.success_probability(),
    }))
}

#[derive(Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    Docx,
    Print,
}

#[derive(Deserialize)]
pub struct ExportRequest {
    #[serde(default = "default_title")]
    pub title: String,
    pub content: String,
    pub format: ExportFormat,
}

fn default_title() -> String {
    "Letter".to_string()
}

/// Export letter text as a DOCX download or a print-ready HTML page.
pub async fn export_letter(Json(req): Json<ExportRequest>) -> Result<Response, ApiError> {
    if req.content.trim().is_empty() {
        return Err(ApiError::BadRequest("letter content is empty".to_string()));
    }
    let styles = DocumentStyles::default();

    match req.format {
        ExportFormat::Docx => {
            let bytes = generate_docx(&req.content, &styles)?;
            let disposition = format!("attachment; filename=\"{}.docx\"", file_stem(&req.title));
            Ok((
                [
                    (header::CONTENT_TYPE, DOCX_CONTENT_TYPE.to_string()),
                    (header::CONTENT_DISPOSITION, disposition),
                ],
                bytes,
            )
                .into_response())
        }
        ExportFormat::Print => {
            let html = render_print_document(&req.title, &req.content, &styles)?;
            Ok((
                [(header::CONTENT_TYPE, "text/html; charset=utf-8".to_string())],
                html,
            )
                .into_response())
        }
    }
}

/// `Appeal Letter - PA-2024-003` becomes `appeal-letter-pa-2024-003`.
fn file_stem(title: &str) -> String {
    let stem = title
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(str::to_ascii_lowercase)
        .collect::<Vec<_>>()
        .join("-");
    if stem.is_empty() { "letter".to_string() } else { stem }
}
