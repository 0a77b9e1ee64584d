use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Where an authorization request stands with the payer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum CaseStatus {
    Approved,
    Pending,
    Denied,
}

impl CaseStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Approved => "Approved",
            Self::Pending => "Pending",
            Self::Denied => "Denied",
        }
    }
}

/// A submitted authorization request on the case board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TrackedCase {
    pub id: String,
    pub patient: String,
    pub procedure: String,
    pub insurance: String,
    pub status: CaseStatus,
    pub amount: String,
    /// Submission date for open cases, decision date otherwise.
    pub date: String,
    /// Days since submission. Only open cases carry it.
    #[serde(default)]
    pub days_open: Option<u32>,
}

impl TrackedCase {
    /// Still waiting on the payer.
    pub fn is_active(&self) -> bool {
        self.status == CaseStatus::Pending
    }

    /// Denied cases are the ones that can be appealed.
    pub fn is_appealable(&self) -> bool {
        self.status == CaseStatus::Denied
    }
}

/// Narrows the case board. Blank or absent criteria match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export)]
pub struct CaseFilter {
    pub status: Option<CaseStatus>,
    /// Case-insensitive substring of the id, patient, procedure or insurer.
    pub search: String,
}

impl CaseFilter {
    pub fn matches(&self, case: &TrackedCase) -> bool {
        if self.status.is_some_and(|status| status != case.status) {
            return false;
        }
        let needle = self.search.trim().to_lowercase();
        needle.is_empty()
            || [&case.id, &case.patient, &case.procedure, &case.insurance]
                .iter()
                .any(|field| field.to_lowercase().contains(&needle))
    }
}
