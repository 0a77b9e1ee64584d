use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::case::CaseStatus;
use crate::models::letter::LetterKind;

/// A patient in the practice directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Patient {
    pub id: String,
    pub name: String,
    pub date_of_birth: String,
    pub age: u32,
    pub gender: String,
    pub insurance: String,
    pub member_id: String,
    pub phone: String,
    pub email: String,
    pub requests: RequestCounts,
    pub last_visit: String,
    #[serde(default)]
    pub diagnoses: Vec<String>,
    #[serde(default)]
    pub medications: Vec<String>,
}

/// Lifetime authorization request tallies for one patient.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RequestCounts {
    pub total: u32,
    pub approved: u32,
    pub pending: u32,
    pub denied: u32,
}

/// One authorization request in a patient's history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PatientRequest {
    pub id: String,
    pub procedure: String,
    pub cpt: String,
    pub amount: String,
    pub status: CaseStatus,
    pub date: String,
    pub diagnosis: String,
    #[serde(default)]
    pub clinical_notes: Option<String>,
    #[serde(default)]
    pub denial_reason: Option<String>,
    /// An appeal has already been filed against this denial.
    #[serde(default)]
    pub has_appeal: bool,
}

/// A letter sent on a patient's behalf.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PatientLetter {
    pub id: String,
    pub kind: LetterKind,
    pub request_id: String,
    pub procedure: String,
    pub date: String,
    pub status: CaseStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum TimelineKind {
    Request,
    Approval,
    Denial,
    Appeal,
    Visit,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TimelineEvent {
    pub id: String,
    pub kind: TimelineKind,
    pub title: String,
    pub description: String,
    pub date: String,
    /// Visits have no outcome.
    #[serde(default)]
    pub status: Option<CaseStatus>,
}

/// Everything shown on a patient's detail page. Lists are newest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PatientRecord {
    pub patient: Patient,
    #[serde(default)]
    pub requests: Vec<PatientRequest>,
    #[serde(default)]
    pub letters: Vec<PatientLetter>,
    #[serde(default)]
    pub timeline: Vec<TimelineEvent>,
}

/// Narrows the patient directory. Blank criteria match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export)]
pub struct PatientFilter {
    /// Case-insensitive substring of the name, id or insurer.
    pub search: String,
    /// Exact insurer name, ignoring case. Blank or `all` disables it.
    pub insurance: String,
}

impl PatientFilter {
    pub fn matches(&self, patient: &Patient) -> bool {
        let insurance = self.insurance.trim();
        if !insurance.is_empty()
            && !insurance.eq_ignore_ascii_case("all")
            && !patient.insurance.eq_ignore_ascii_case(insurance)
        {
            return false;
        }
        let needle = self.search.trim().to_lowercase();
        needle.is_empty()
            || [&patient.name, &patient.id, &patient.insurance]
                .iter()
                .any(|field| field.to_lowercase().contains(&needle))
    }
}

/// Distinct insurers in first-seen order, for the directory's filter menu.
pub fn insurers<'a>(patients: impl IntoIterator<Item = &'a Patient>) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for patient in patients {
        if !seen.contains(&patient.insurance) {
            seen.push(patient.insurance.clone());
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patient(name: &str, insurance: &str) -> Patient {
        Patient {
            id: "PT-001".to_string(),
            name: name.to_string(),
            date_of_birth: "03/15/1978".to_string(),
            age: 46,
            gender: "Female".to_string(),
            insurance: insurance.to_string(),
            member_id: "UHC-987654321".to_string(),
            phone: "(555) 123-4567".to_string(),
            email: "sarah.j@email.com".to_string(),
            requests: RequestCounts::default(),
            last_visit: "Oct 15, 2024".to_string(),
            diagnoses: Vec::new(),
            medications: Vec::new(),
        }
    }

    #[test]
    fn blank_filter_matches_everyone() {
        assert!(PatientFilter::default().matches(&patient("Sarah Johnson", "Aetna")));
        let filter = PatientFilter {
            search: "   ".to_string(),
            insurance: "all".to_string(),
        };
        assert!(filter.matches(&patient("Sarah Johnson", "Aetna")));
    }

    #[test]
    fn search_ignores_case_across_fields() {
        let sarah = patient("Sarah Johnson", "United Healthcare");
        let by = |search: &str| PatientFilter {
            search: search.to_string(),
            ..Default::default()
        };
        assert!(by("JOHNSON").matches(&sarah));
        assert!(by("pt-001").matches(&sarah));
        assert!(by("united").matches(&sarah));
        assert!(!by("cigna").matches(&sarah));
    }

    #[test]
    fn insurance_is_an_exact_match() {
        let sarah = patient("Sarah Johnson", "United Healthcare");
        let on = |insurance: &str| PatientFilter {
            insurance: insurance.to_string(),
            ..Default::default()
        };
        assert!(on("united healthcare").matches(&sarah));
        assert!(!on("United").matches(&sarah));
        assert!(!on("Humana").matches(&sarah));
    }

    #[test]
    fn insurers_are_distinct_in_order() {
        let patients = [
            patient("A", "Aetna"),
            patient("B", "Cigna"),
            patient("C", "Aetna"),
        ];
        assert_eq!(insurers(&patients), vec!["Aetna", "Cigna"]);
    }
}
