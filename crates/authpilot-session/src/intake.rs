//! Upload boundary: one file per slot, checked against a type allow-list and
//! a size limit.
//!
//! Only `text/plain` uploads yield content. Every other accepted format is
//! kept as an opaque handle; its contents are never parsed.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use authpilot_core::models::checklist::FileHandle;

use crate::config::{SessionConfig, whole_megabytes};
use crate::error::FileIntakeError;

const TEXT_PLAIN: &str = "text/plain";

const CONTEXT_TYPES: &[&str] = &[TEXT_PLAIN, "application/pdf"];

const EVIDENCE_TYPES: &[&str] = &[
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "image/jpeg",
    "image/png",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UploadSlot {
    /// Background records sent along with a remote drafting request.
    Context,
    /// Documents backing a clinical field or an appeal checklist item.
    ClinicalEvidence,
}

impl UploadSlot {
    pub fn allowed_types(self) -> &'static [&'static str] {
        match self {
            Self::Context => CONTEXT_TYPES,
            Self::ClinicalEvidence => EVIDENCE_TYPES,
        }
    }

    fn allowed_description(self) -> &'static str {
        match self {
            Self::Context => "a .txt or .pdf file",
            Self::ClinicalEvidence => "a .pdf, .doc, .docx, .jpg or .png file",
        }
    }

    pub fn max_bytes(self, config: &SessionConfig) -> u64 {
        match self {
            Self::Context => config.context_upload_max_bytes,
            Self::ClinicalEvidence => config.evidence_upload_max_bytes,
        }
    }
}

/// A file as handed over by the browser.
#[derive(Debug, Clone)]
pub struct IncomingFile {
    pub name: String,
    pub mime_type: String,
    pub size_bytes: u64,
    /// File contents, when the client sent them.
    pub content: Option<Vec<u8>>,
}

impl IncomingFile {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            size_bytes: bytes.len() as u64,
            content: Some(bytes),
        }
    }

    /// A file whose bytes stayed on the client. Only its metadata is checked.
    pub fn described(name: impl Into<String>, mime_type: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            size_bytes,
            content: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AcceptedFile {
    /// A plain-text upload sent with its content.
    Text { handle: FileHandle, text: String },
    /// Any other accepted format. Only the handle is kept.
    Received { handle: FileHandle },
}

impl AcceptedFile {
    pub fn handle(&self) -> &FileHandle {
        match self {
            Self::Text { handle, .. } | Self::Received { handle } => handle,
        }
    }

    pub fn into_handle(self) -> FileHandle {
        match self {
            Self::Text { handle, .. } | Self::Received { handle } => handle,
        }
    }
}

/// Check an upload against the slot's rules.
///
/// The type is checked before the size. A file exactly at the limit is
/// accepted.
pub fn accept_file(
    slot: UploadSlot,
    file: IncomingFile,
    config: &SessionConfig,
) -> Result<AcceptedFile, FileIntakeError> {
    let mime_type = effective_mime_type(&file.mime_type, &file.name);
    if !slot.allowed_types().contains(&mime_type.as_str()) {
        warn!(file = %file.name, mime_type = %file.mime_type, ?slot, "rejected upload: unsupported type");
        return Err(FileIntakeError::UnsupportedType {
            file_name: file.name,
            mime_type: file.mime_type,
            allowed: slot.allowed_description(),
        });
    }

    let size_bytes = file.size_bytes;
    let limit = slot.max_bytes(config);
    if size_bytes > limit {
        warn!(file = %file.name, size_bytes, limit, ?slot, "rejected upload: too large");
        return Err(FileIntakeError::TooLarge {
            file_name: file.name,
            size_bytes,
            limit_mb: whole_megabytes(limit),
        });
    }

    info!(file = %file.name, %mime_type, size_bytes, ?slot, "accepted upload");
    let handle = FileHandle::new(file.name, mime_type.clone(), size_bytes);
    match file.content {
        Some(bytes) if mime_type == TEXT_PLAIN => Ok(AcceptedFile::Text {
            handle,
            text: String::from_utf8_lossy(&bytes).into_owned(),
        }),
        _ => Ok(AcceptedFile::Received { handle }),
    }
}

/// Lowercased MIME type without parameters. Browsers sometimes send no type
/// or a generic one, so fall back to the extension.
fn effective_mime_type(declared: &str, file_name: &str) -> String {
    let declared = declared
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    if !declared.is_empty() && declared != "application/octet-stream" {
        return declared;
    }

    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "txt" => TEXT_PLAIN,
        "pdf" => "application/pdf",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        _ => "application/octet-stream",
    }
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> SessionConfig {
        SessionConfig::default()
    }

    #[test]
    fn text_context_yields_content() {
        let file = IncomingFile::new("notes.txt", "text/plain; charset=utf-8", b"PT x 8 weeks".to_vec());
        let accepted = accept_file(UploadSlot::Context, file, &config()).unwrap();
        match accepted {
            AcceptedFile::Text { handle, text } => {
                assert_eq!(text, "PT x 8 weeks");
                assert_eq!(handle.mime_type, "text/plain");
                assert_eq!(handle.size_bytes, 12);
            }
            other => panic!("expected text, got {other:?}"),
        }
    }

    #[test]
    fn pdf_context_is_only_received() {
        let file = IncomingFile::new("mri.pdf", "application/pdf", vec![0; 1024]);
        let accepted = accept_file(UploadSlot::Context, file, &config()).unwrap();
        assert!(matches!(accepted, AcceptedFile::Received { .. }));
        assert_eq!(accepted.handle().name, "mri.pdf");
    }

    #[test]
    fn wrong_type_has_its_own_message() {
        let file = IncomingFile::new("scan.png", "image/png", vec![0; 10]);
        let err = accept_file(UploadSlot::Context, file, &config()).unwrap_err();
        assert!(matches!(err, FileIntakeError::UnsupportedType { .. }));
        assert_eq!(err.to_string(), "Please upload a .txt or .pdf file only.");
    }

    #[test]
    fn oversized_file_has_its_own_message() {
        let file = IncomingFile::new("big.pdf", "application/pdf", vec![0; 6 * 1024 * 1024]);
        let err = accept_file(UploadSlot::Context, file, &config()).unwrap_err();
        assert_eq!(
            err,
            FileIntakeError::TooLarge {
                file_name: "big.pdf".to_string(),
                size_bytes: 6 * 1024 * 1024,
                limit_mb: 5,
            }
        );
        assert_eq!(err.to_string(), "File size must be less than 5MB.");
    }

    #[test]
    fn evidence_slot_allows_larger_files_and_images() {
        let file = IncomingFile::new("big.pdf", "application/pdf", vec![0; 6 * 1024 * 1024]);
        assert!(accept_file(UploadSlot::ClinicalEvidence, file, &config()).is_ok());

        let file = IncomingFile::new("xray.JPG", "", vec![0; 10]);
        let accepted = accept_file(UploadSlot::ClinicalEvidence, file, &config()).unwrap();
        assert_eq!(accepted.handle().mime_type, "image/jpeg");

        let file = IncomingFile::new("notes.txt", "text/plain", vec![0; 10]);
        assert!(accept_file(UploadSlot::ClinicalEvidence, file, &config()).is_err());
    }

    #[test]
    fn described_files_are_checked_by_metadata() {
        let file = IncomingFile::described("notes.txt", "text/plain", 200);
        assert!(matches!(
            accept_file(UploadSlot::Context, file, &config()).unwrap(),
            AcceptedFile::Received { .. }
        ));

        let file = IncomingFile::described("ct.pdf", "application/pdf", 11 * 1024 * 1024);
        assert!(matches!(
            accept_file(UploadSlot::ClinicalEvidence, file, &config()),
            Err(FileIntakeError::TooLarge { limit_mb: 10, .. })
        ));
    }

    #[test]
    fn limit_is_inclusive() {
        let limit = config().context_upload_max_bytes as usize;
        let file = IncomingFile::new("edge.pdf", "application/pdf", vec![0; limit]);
        assert!(accept_file(UploadSlot::Context, file, &config()).is_ok());
    }
}
