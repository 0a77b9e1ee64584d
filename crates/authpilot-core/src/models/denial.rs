use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A historical prior-authorization denial. Read-only reference data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DeniedCase {
    pub id: String,
    pub patient: String,
    pub procedure: String,
    pub insurance: String,
    pub amount: String,
    pub denial_date: String,
    pub denial_reason: String,
    #[serde(default)]
    pub analysis: Option<DenialAnalysis>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DenialAnalysis {
    pub primary_reason: String,
    /// What the payer's stated reason actually means in practice.
    pub real_meaning: String,
    #[serde(default)]
    pub missing_documents: Vec<String>,
    #[serde(default)]
    pub policy_violation: Option<String>,
    #[serde(default)]
    pub recommended_actions: Vec<String>,
    pub similar_cases: SimilarCases,
}

/// Outcome counts for appeals of comparable denials.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SimilarCases {
    pub total: u32,
    pub successful: u32,
}
