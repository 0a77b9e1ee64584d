use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::CoreError;
use crate::models::checklist::{ChecklistItem, FileHandle};
use crate::models::denial::DeniedCase;

/// An appeal being prepared against one denied case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AppealDraft {
    pub case: DeniedCase,
    #[serde(default)]
    pub checklist: Vec<ChecklistItem>,
    #[serde(default)]
    pub additional_comments: String,
    #[serde(default)]
    pub additional_files: Vec<FileHandle>,
    #[serde(default)]
    pub provider_name: String,
    #[serde(default)]
    pub npi: String,
}

impl AppealDraft {
    /// Start a draft with an empty checklist. The checklist is seeded once
    /// the denial letter has been received.
    pub fn new(case: DeniedCase) -> Self {
        Self {
            case,
            checklist: Vec::new(),
            additional_comments: String::new(),
            additional_files: Vec::new(),
            provider_name: String::new(),
            npi: String::new(),
        }
    }

    /// Replace the checklist with one item per missing document in the
    /// case's analysis. Cases without an analysis get an empty checklist.
    pub fn seed_checklist(&mut self) {
        self.checklist = self
            .case
            .analysis
            .as_ref()
            .map(|a| ChecklistItem::seed_from(&a.missing_documents))
            .unwrap_or_default();
    }

    pub fn item_mut(&mut self, id: &str) -> Result<&mut ChecklistItem, CoreError> {
        self.checklist
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or_else(|| CoreError::UnknownChecklistItem(id.to_string()))
    }

    pub fn set_item_notes(&mut self, id: &str, notes: impl Into<String>) -> Result<(), CoreError> {
        self.item_mut(id)?.set_notes(notes);
        Ok(())
    }

    pub fn attach_file(&mut self, id: &str, file: FileHandle) -> Result<(), CoreError> {
        self.item_mut(id)?.add_file(file);
        Ok(())
    }

    pub fn detach_file(&mut self, id: &str, file_id: Uuid) -> Result<FileHandle, CoreError> {
        let item = self.item_mut(id)?;
        let index = item
            .files()
            .iter()
            .position(|f| f.id == file_id)
            .ok_or_else(|| CoreError::UnknownFile {
                item: id.to_string(),
                file: file_id,
            })?;
        item.remove_file(index).ok_or(CoreError::UnknownFile {
            item: id.to_string(),
            file: file_id,
        })
    }

    pub fn completed_items(&self) -> impl Iterator<Item = &ChecklistItem> {
        self.checklist.iter().filter(|item| item.completed())
    }

    /// Names of every file going out with the appeal: files on completed
    /// checklist items first, then the extra files.
    pub fn attachment_names(&self) -> Vec<String> {
        self.completed_items()
            .flat_map(|item| item.files().iter())
            .chain(self.additional_files.iter())
            .map(|f| f.name.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::find_denied_case;

    fn draft() -> AppealDraft {
        let mut draft = AppealDraft::new(find_denied_case("PA-2024-003").unwrap().clone());
        draft.seed_checklist();
        draft
    }

    #[test]
    fn seeding_follows_missing_documents() {
        let draft = draft();
        assert_eq!(draft.checklist.len(), 3);
        assert_eq!(draft.checklist[0].id, "1");
        assert!(draft.checklist[0].label.starts_with("Physical therapy progress notes"));
        assert!(draft.checklist.iter().all(|item| !item.completed()));
    }

    #[test]
    fn case_without_analysis_has_empty_checklist() {
        let mut draft = AppealDraft::new(find_denied_case("PA-2024-011").unwrap().clone());
        draft.seed_checklist();
        assert!(draft.checklist.is_empty());
    }

    #[test]
    fn attachments_only_include_completed_items() {
        let mut draft = draft();
        draft
            .attach_file("1", FileHandle::new("pt_notes.pdf", "application/pdf", 2048))
            .unwrap();
        draft.additional_files.push(FileHandle::new("letter.txt", "text/plain", 10));

        assert_eq!(draft.attachment_names(), vec!["pt_notes.pdf", "letter.txt"]);
        assert_eq!(draft.completed_items().count(), 1);
    }

    #[test]
    fn detaching_last_file_reopens_item() {
        let mut draft = draft();
        let file = FileHandle::new("pt_notes.pdf", "application/pdf", 2048);
        let file_id = file.id;
        draft.attach_file("2", file).unwrap();
        assert!(draft.checklist[1].completed());

        let removed = draft.detach_file("2", file_id).unwrap();
        assert_eq!(removed.name, "pt_notes.pdf");
        assert!(!draft.checklist[1].completed());
        assert!(matches!(
            draft.detach_file("2", file_id),
            Err(CoreError::UnknownFile { .. })
        ));
    }

    #[test]
    fn unknown_item_is_reported() {
        let mut draft = draft();
        assert!(matches!(
            draft.set_item_notes("9", "n/a"),
            Err(CoreError::UnknownChecklistItem(id)) if id == "9"
        ));
    }
}
