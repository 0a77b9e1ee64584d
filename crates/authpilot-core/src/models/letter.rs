use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use super::usage::TokenUsage;

/// Letter text produced for the user. Replaced wholesale on regeneration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GeneratedLetter {
    pub content: String,
    pub metadata: LetterMetadata,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LetterMetadata {
    pub id: Uuid,
    pub kind: LetterKind,
    pub source: LetterSource,
    pub generated_at: jiff::Timestamp,
    pub usage: Option<TokenUsage>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum LetterKind {
    Authorization,
    Appeal,
}

/// Where the letter text came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "type", rename_all = "snake_case")]
#[ts(export)]
pub enum LetterSource {
    /// Assembled from the built-in template.
    Local,
    /// Produced by a remote text-generation model.
    Remote { model_id: String },
}

impl GeneratedLetter {
    pub fn local(kind: LetterKind, content: String) -> Self {
        Self {
            content,
            metadata: LetterMetadata {
                id: Uuid::new_v4(),
                kind,
                source: LetterSource::Local,
                generated_at: jiff::Timestamp::now(),
                usage: None,
            },
        }
    }

    pub fn remote(
        kind: LetterKind,
        content: String,
        model_id: impl Into<String>,
        usage: Option<TokenUsage>,
    ) -> Self {
        Self {
            content,
            metadata: LetterMetadata {
                id: Uuid::new_v4(),
                kind,
                source: LetterSource::Remote {
                    model_id: model_id.into(),
                },
                generated_at: jiff::Timestamp::now(),
                usage,
            },
        }
    }

    pub fn is_remote(&self) -> bool {
        matches!(self.metadata.source, LetterSource::Remote { .. })
    }
}
