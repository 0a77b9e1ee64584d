use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("unknown checklist item: {0}")]
    UnknownChecklistItem(String),

    #[error("checklist item {item} has no file {file}")]
    UnknownFile { item: String, file: Uuid },
}
