//! Actionable recommendations for strengthening a request.
//!
//! [`RULES`] is evaluated top to bottom and every rule whose predicate holds
//! contributes one recommendation. Output order is the declaration order of
//! the table, not a priority sort; callers and tests rely on it.

use authpilot_core::models::recommendation::{Level, Priority, Recommendation};
use authpilot_core::models::snapshot::{FormSnapshot, WorkStatus, payer_display_name};

use crate::validators::{validate_diagnosis_code, validate_procedure_code};

/// Payers that apply stricter conservative-treatment criteria.
pub const PAYER_WATCH_LIST: &[&str] = &["united", "aetna"];

pub const RECOMMENDED_THERAPY_WEEKS: u32 = 6;
pub const PAIN_DOCUMENTATION_THRESHOLD: u8 = 6;

/// A predicate paired with the recommendation it produces.
pub struct RecommendationRule {
    pub id: &'static str,
    pub applies: fn(&FormSnapshot) -> bool,
    pub build: fn(&FormSnapshot) -> Recommendation,
}

pub static RULES: &[RecommendationRule] = &[
    RecommendationRule {
        id: "procedure_code",
        applies: |s| !validate_procedure_code(&s.procedure_code).is_valid,
        build: |_| Recommendation {
            action: "Enter a valid 5-digit CPT procedure code (e.g., 72148)".to_string(),
            impact: Level::High,
            effort: Level::Low,
            priority: Priority::QuickWin,
        },
    },
    RecommendationRule {
        id: "diagnosis_code",
        applies: |s| !validate_diagnosis_code(&s.diagnosis_code).is_valid,
        build: |_| Recommendation {
            action: "Enter a valid ICD-10 diagnosis code (e.g., M54.5)".to_string(),
            impact: Level::High,
            effort: Level::Low,
            priority: Priority::QuickWin,
        },
    },
    RecommendationRule {
        id: "therapy_duration",
        applies: |s| s.therapy_weeks.unwrap_or(0) < RECOMMENDED_THERAPY_WEEKS,
        build: |s| {
            let needed = RECOMMENDED_THERAPY_WEEKS - s.therapy_weeks.unwrap_or(0);
            let unit = if needed == 1 { "week" } else { "weeks" };
            Recommendation {
                action: format!(
                    "Document {needed} more {unit} of physical therapy \
                     ({RECOMMENDED_THERAPY_WEEKS} weeks minimum)"
                ),
                impact: Level::High,
                effort: Level::High,
                priority: Priority::High,
            }
        },
    },
    RecommendationRule {
        id: "medication",
        applies: |s| s.medication_name.trim().is_empty(),
        build: |_| Recommendation {
            action: "Document medication trials with name and duration".to_string(),
            impact: Level::Medium,
            effort: Level::Low,
            priority: Priority::QuickWin,
        },
    },
    RecommendationRule {
        id: "objective_findings",
        applies: |s| !s.objective_findings.is_present(),
        build: |_| Recommendation {
            action: "Add objective examination findings (range of motion, neurological signs, \
                     positive provocative tests)"
                .to_string(),
            impact: Level::High,
            effort: Level::Medium,
            priority: Priority::High,
        },
    },
    RecommendationRule {
        id: "imaging_summary",
        applies: |s| !s.imaging_summary.is_present(),
        build: |_| Recommendation {
            action: "Summarize or attach prior imaging results".to_string(),
            impact: Level::Medium,
            effort: Level::Medium,
            priority: Priority::Medium,
        },
    },
    RecommendationRule {
        id: "work_status",
        applies: |s| !matches!(s.work_status, Some(WorkStatus::Off | WorkStatus::Modified)),
        build: |_| Recommendation {
            action: "Document work impact or duty restrictions from the employer".to_string(),
            impact: Level::Medium,
            effort: Level::Medium,
            priority: Priority::Medium,
        },
    },
    RecommendationRule {
        id: "pain_scale",
        applies: |s| s.documented_pain().unwrap_or(0) < PAIN_DOCUMENTATION_THRESHOLD,
        build: |_| Recommendation {
            action: "Document pain progression with objective measurements".to_string(),
            impact: Level::Low,
            effort: Level::Low,
            priority: Priority::Medium,
        },
    },
    RecommendationRule {
        id: "payer_watch_list",
        applies: |s| is_watched_payer(&s.insurer),
        build: |s| Recommendation {
            action: format!(
                "{} applies strict conservative-treatment criteria; cite the payer's clinical \
                 policy bulletin and document 8+ weeks of treatment",
                payer_display_name(&s.insurer)
            ),
            impact: Level::Medium,
            effort: Level::Low,
            priority: Priority::QuickWin,
        },
    },
];

pub fn is_watched_payer(insurer: &str) -> bool {
    let key = insurer.trim().to_lowercase();
    PAYER_WATCH_LIST.contains(&key.as_str())
}

/// Evaluate every rule in declaration order.
pub fn recommend(snapshot: &FormSnapshot) -> Vec<Recommendation> {
    RULES
        .iter()
        .filter(|rule| (rule.applies)(snapshot))
        .map(|rule| (rule.build)(snapshot))
        .collect()
}

/// Ids of the rules that fire, in the same order as [`recommend`].
pub fn triggered_rules(snapshot: &FormSnapshot) -> Vec<&'static str> {
    RULES
        .iter()
        .filter(|rule| (rule.applies)(snapshot))
        .map(|rule| rule.id)
        .collect()
}

#[cfg(test)]
mod tests {
    use authpilot_core::models::snapshot::EvidenceField;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn empty_snapshot_triggers_all_but_payer_rule_in_order() {
        assert_eq!(
            triggered_rules(&FormSnapshot::default()),
            vec![
                "procedure_code",
                "diagnosis_code",
                "therapy_duration",
                "medication",
                "objective_findings",
                "imaging_summary",
                "work_status",
                "pain_scale",
            ]
        );
    }

    #[test]
    fn procedure_code_precedes_objective_findings() {
        let snapshot = FormSnapshot {
            procedure_code: "7214".to_string(),
            diagnosis_code: "M54.5".to_string(),
            therapy_weeks: Some(8),
            medication_name: "Naproxen".to_string(),
            imaging_summary: EvidenceField::typed("Mild degenerative changes"),
            work_status: Some(WorkStatus::Off),
            pain_scale: Some(8),
            ..Default::default()
        };
        assert_eq!(
            triggered_rules(&snapshot),
            vec!["procedure_code", "objective_findings"]
        );
        let recs = recommend(&snapshot);
        assert!(recs[0].action.contains("CPT"));
        assert!(recs[1].action.contains("objective examination"));
    }

    #[test]
    fn therapy_recommendation_counts_remaining_weeks() {
        let snapshot = FormSnapshot {
            therapy_weeks: Some(5),
            ..Default::default()
        };
        let recs = recommend(&snapshot);
        let therapy = recs
            .iter()
            .find(|r| r.action.contains("physical therapy"))
            .unwrap();
        assert!(therapy.action.starts_with("Document 1 more week "));
        assert_eq!(therapy.priority, Priority::High);
    }

    #[test]
    fn watched_payer_is_last() {
        let snapshot = FormSnapshot {
            insurer: "united".to_string(),
            ..Default::default()
        };
        let rules = triggered_rules(&snapshot);
        assert_eq!(rules.last(), Some(&"payer_watch_list"));
        let recs = recommend(&snapshot);
        assert!(recs.last().unwrap().action.starts_with("United Healthcare"));
    }

    #[test]
    fn uploaded_evidence_satisfies_evidence_rules() {
        let snapshot = FormSnapshot {
            imaging_summary: EvidenceField::uploaded("mri.pdf"),
            objective_findings: EvidenceField::uploaded("exam.pdf"),
            ..Default::default()
        };
        let rules = triggered_rules(&snapshot);
        assert!(!rules.contains(&"imaging_summary"));
        assert!(!rules.contains(&"objective_findings"));
    }

    #[test]
    fn payer_matching_ignores_case() {
        assert!(is_watched_payer("Aetna"));
        assert!(!is_watched_payer("cigna"));
        assert!(!is_watched_payer(""));
    }
}
