use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// One actionable suggestion for strengthening a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Recommendation {
    pub action: String,
    pub impact: Level,
    pub effort: Level,
    pub priority: Priority,
}

/// Low / medium / high rating used for both impact and effort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Level {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "kebab-case")]
#[ts(export)]
pub enum Priority {
    QuickWin,
    Medium,
    High,
}
