use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// Opaque reference to a file the user attached. No content is held.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FileHandle {
    pub id: Uuid,
    pub name: String,
    pub mime_type: String,
    pub size_bytes: u64,
}

impl FileHandle {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            mime_type: mime_type.into(),
            size_bytes,
        }
    }
}

/// A document the appeal still needs, seeded from a denial analysis.
///
/// `completed` is derived: it is true exactly when the item has non-blank
/// notes or at least one file. It is recomputed on every mutation and on
/// deserialization, so a payload cannot claim completion on its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(from = "ChecklistItemFields")]
#[ts(export)]
pub struct ChecklistItem {
    pub id: String,
    pub label: String,
    pub reason: String,
    completed: bool,
    files: Vec<FileHandle>,
    notes: String,
}

/// Wire shape of a [`ChecklistItem`]. Any `completed` flag sent is ignored.
#[derive(Deserialize)]
struct ChecklistItemFields {
    id: String,
    label: String,
    reason: String,
    #[serde(default)]
    files: Vec<FileHandle>,
    #[serde(default)]
    notes: String,
}

impl From<ChecklistItemFields> for ChecklistItem {
    fn from(fields: ChecklistItemFields) -> Self {
        let mut item = Self {
            id: fields.id,
            label: fields.label,
            reason: fields.reason,
            completed: false,
            files: fields.files,
            notes: fields.notes,
        };
        item.refresh();
        item
    }
}

/// Reason attached to checklist items seeded from a denial analysis.
pub const DEFAULT_CHECKLIST_REASON: &str =
    "Required to meet insurer's medical necessity criteria";

impl ChecklistItem {
    pub fn new(id: impl Into<String>, label: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            reason: reason.into(),
            completed: false,
            files: Vec::new(),
            notes: String::new(),
        }
    }

    /// Build a checklist from a list of missing documents. Ids are 1-based.
    pub fn seed_from(missing_documents: &[String]) -> Vec<Self> {
        missing_documents
            .iter()
            .enumerate()
            .map(|(i, doc)| Self::new((i + 1).to_string(), doc.clone(), DEFAULT_CHECKLIST_REASON))
            .collect()
    }

    pub fn completed(&self) -> bool {
        self.completed
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    pub fn files(&self) -> &[FileHandle] {
        &self.files
    }

    pub fn set_notes(&mut self, notes: impl Into<String>) {
        self.notes = notes.into();
        self.refresh();
    }

    pub fn add_file(&mut self, file: FileHandle) {
        self.files.push(file);
        self.refresh();
    }

    /// Remove the file at `index`. Out-of-range indexes are ignored.
    pub fn remove_file(&mut self, index: usize) -> Option<FileHandle> {
        let removed = (index < self.files.len()).then(|| self.files.remove(index));
        self.refresh();
        removed
    }

    fn refresh(&mut self) {
        self.completed = !self.notes.trim().is_empty() || !self.files.is_empty();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completion_follows_notes_and_files() {
        let mut item = ChecklistItem::new("1", "PT notes", DEFAULT_CHECKLIST_REASON);
        assert!(!item.completed());

        item.set_notes("   ");
        assert!(!item.completed(), "whitespace notes do not complete an item");

        item.add_file(FileHandle::new("pt.pdf", "application/pdf", 1024));
        assert!(item.completed());

        item.set_notes("8 weeks, 16 sessions");
        assert!(item.remove_file(0).is_some());
        assert!(item.completed(), "notes alone keep it complete");

        item.set_notes("");
        assert!(!item.completed());
    }

    #[test]
    fn remove_out_of_range_is_noop() {
        let mut item = ChecklistItem::new("1", "PT notes", DEFAULT_CHECKLIST_REASON);
        assert!(item.remove_file(3).is_none());
        assert!(!item.completed());
    }

    #[test]
    fn seeded_ids_are_one_based_and_ordered() {
        let docs = vec!["A".to_string(), "B".to_string()];
        let items = ChecklistItem::seed_from(&docs);
        assert_eq!(items[0].id, "1");
        assert_eq!(items[1].id, "2");
        assert_eq!(items[1].label, "B");
        assert_eq!(items[0].reason, DEFAULT_CHECKLIST_REASON);
    }

    #[test]
    fn deserialized_completion_is_recomputed() {
        let item: ChecklistItem = serde_json::from_str(
            r#"{"id":"1","label":"PT notes","reason":"","completed":true,"files":[],"notes":" "}"#,
        )
        .unwrap();
        assert!(!item.completed());

        let item: ChecklistItem = serde_json::from_str(
            r#"{"id":"1","label":"PT notes","reason":"","completed":false,"notes":"16 sessions"}"#,
        )
        .unwrap();
        assert!(item.completed());
        assert_eq!(item.notes(), "16 sessions");
    }
}
