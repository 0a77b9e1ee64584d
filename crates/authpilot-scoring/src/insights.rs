//! Everything the request screen shows next to the score.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use authpilot_core::models::recommendation::Recommendation;
use authpilot_core::models::snapshot::{
    FieldFill, FormSnapshot, FunctionalImpairment, WorkStatus, payer_display_name,
};

use crate::recommend::{is_watched_payer, recommend};
use crate::score::{ScoreBreakdown, ScoreOptions, breakdown};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ScoreBand {
    Strong,
    Moderate,
    Weak,
}

impl ScoreBand {
    pub fn for_score(score: u8) -> Self {
        match score {
            75.. => Self::Strong,
            50.. => Self::Moderate,
            _ => Self::Weak,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Strong => "Strong",
            Self::Moderate => "Moderate",
            Self::Weak => "Needs work",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ConfidenceLevel {
    High,
    Medium,
    Low,
}

impl ConfidenceLevel {
    pub fn for_score(score: u8) -> Self {
        if score > 75 {
            Self::High
        } else if score > 45 {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

/// Full evaluation of one snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Assessment {
    pub score: u8,
    pub band: ScoreBand,
    pub confidence: ConfidenceLevel,
    pub breakdown: ScoreBreakdown,
    pub recommendations: Vec<Recommendation>,
    pub missing_documentation: Vec<String>,
    pub completion_percent: u8,
    pub risk_factors: Vec<String>,
    pub positive_factors: Vec<String>,
    pub estimated_days_to_decision: u32,
}

/// Evaluate a snapshot for display. Malformed codes score as absent so the
/// score agrees with the code recommendations.
pub fn assess(snapshot: &FormSnapshot) -> Assessment {
    let breakdown = breakdown(snapshot, ScoreOptions::validated());
    let score = breakdown.score;

    Assessment {
        score,
        band: ScoreBand::for_score(score),
        confidence: ConfidenceLevel::for_score(score),
        recommendations: recommend(snapshot),
        missing_documentation: missing_documentation(snapshot),
        completion_percent: completion_percent(snapshot),
        risk_factors: risk_factors(snapshot),
        positive_factors: positive_factors(snapshot),
        estimated_days_to_decision: estimated_days_to_decision(score, &snapshot.insurer),
        breakdown,
    }
}

/// Clinical documentation a reviewer will look for, in checklist order.
pub fn missing_documentation(snapshot: &FormSnapshot) -> Vec<String> {
    let mut missing = Vec::new();
    if !snapshot.objective_findings.is_present() {
        missing.push("Objective examination findings");
    }
    if matches!(
        snapshot.functional_impairment,
        None | Some(FunctionalImpairment::None)
    ) {
        missing.push("Functional impairment documentation");
    }
    if snapshot.therapy_weeks.is_none() {
        missing.push("Physical therapy duration");
    }
    if snapshot.medication_name.trim().is_empty() {
        missing.push("Medication trial details");
    }
    missing.into_iter().map(String::from).collect()
}

/// Share of fields carrying a value, rounded to a whole percent. Uploads
/// count as filled here.
pub fn completion_percent(snapshot: &FormSnapshot) -> u8 {
    let fills = snapshot.field_fills();
    let filled = fills
        .iter()
        .filter(|(_, fill)| *fill != FieldFill::Empty)
        .count();
    ((filled as f64 / fills.len() as f64) * 100.0).round() as u8
}

pub fn risk_factors(snapshot: &FormSnapshot) -> Vec<String> {
    let mut risks = Vec::new();

    let weeks = snapshot.therapy_weeks.unwrap_or(0);
    if weeks < 4 {
        risks.push(format!(
            "Only {weeks} weeks of physical therapy documented (minimum 6 expected)"
        ));
    }
    if is_watched_payer(&snapshot.insurer) {
        risks.push(format!(
            "{} frequently denies this procedure without extended conservative treatment",
            payer_display_name(&snapshot.insurer)
        ));
    }
    let surgical = snapshot.procedure_type.to_lowercase().contains("surgery");
    if surgical && snapshot.injection_type.trim().is_empty() {
        risks.push("No injection trial before surgery request".to_string());
    }
    if snapshot.documented_pain().unwrap_or(0) < 5 {
        risks.push("Pain score below moderate threshold".to_string());
    }
    if !missing_documentation(snapshot).is_empty() {
        risks.push("Incomplete documentation".to_string());
    }

    risks
}

pub fn positive_factors(snapshot: &FormSnapshot) -> Vec<String> {
    let mut positives = Vec::new();

    if let Some(weeks) = snapshot.therapy_weeks.filter(|w| *w >= 6) {
        positives.push(format!("Completed {weeks} weeks of physical therapy"));
    }
    if snapshot.objective_findings.is_present() {
        positives.push("Documented objective examination findings".to_string());
    }
    if snapshot.work_status == Some(WorkStatus::Off) {
        positives.push("Documented work disability".to_string());
    }
    if let Some(level @ (FunctionalImpairment::Moderate | FunctionalImpairment::Severe)) =
        snapshot.functional_impairment
    {
        positives.push(format!("Documented {} functional impairment", level.label()));
    }
    if snapshot.imaging_summary.is_present() {
        positives.push("Prior imaging results on file".to_string());
    }
    if let Some(pain) = snapshot.documented_pain().filter(|p| *p >= 7) {
        positives.push(format!("Severe pain documented ({pain}/10)"));
    }

    positives
}

/// Expected turnaround for a payer decision, in days.
pub fn estimated_days_to_decision(score: u8, insurer: &str) -> u32 {
    let base: i32 = if score > 80 {
        5
    } else if score < 30 {
        14
    } else {
        7
    };
    let payer = match insurer.trim().to_lowercase().as_str() {
        "united" => 2,
        "bcbs" => -1,
        _ => 0,
    };
    (base + payer).max(1) as u32
}
