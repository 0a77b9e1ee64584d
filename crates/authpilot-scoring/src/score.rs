//! Approval-likelihood scoring.
//!
//! The score starts at [`weights::BASE`] and applies an ordered sequence of
//! independent adjustments, each keyed off one or more snapshot fields. The
//! sum is clamped to `[MIN_SCORE, MAX_SCORE]` once, after every adjustment
//! has been applied.
//!
//! The weights are illustrative defaults tuned by hand, not derived from
//! outcome data.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use authpilot_core::models::snapshot::{
    FieldFill, FormSnapshot, FunctionalImpairment, WorkStatus,
};

use crate::validators::{validate_diagnosis_code, validate_procedure_code};

pub const MIN_SCORE: u8 = 1;
pub const MAX_SCORE: u8 = 95;

/// Rule weights. Positive values are bonuses, negative values penalties.
pub mod weights {
    pub const BASE: i32 = 40;

    pub const PATIENT_NAME: i32 = 3;
    pub const DIAGNOSIS_CODE: i32 = 8;
    pub const DIAGNOSIS_CODE_MISSING: i32 = -8;
    pub const PROCEDURE_CODE: i32 = 8;
    pub const PROCEDURE_CODE_MISSING: i32 = -8;
    pub const INSURER: i32 = 2;

    pub const THERAPY_FULL_WEEKS: u32 = 6;
    pub const THERAPY_PARTIAL_WEEKS: u32 = 3;
    pub const THERAPY_FULL: i32 = 12;
    pub const THERAPY_PARTIAL: i32 = 6;
    pub const THERAPY_INSUFFICIENT: i32 = -8;
    pub const SYMPTOM_DURATION: i32 = 3;
    pub const SYMPTOM_DURATION_MISSING: i32 = -3;

    pub const MEDICATION: i32 = 6;
    pub const MEDICATION_MISSING: i32 = -6;
    pub const INJECTION: i32 = 3;

    pub const IMAGING_TYPE: i32 = 2;
    pub const IMAGING_SUMMARY: i32 = 5;
    pub const IMAGING_SUMMARY_MISSING: i32 = -4;
    pub const OBJECTIVE_FINDINGS: i32 = 12;
    pub const OBJECTIVE_FINDINGS_MISSING: i32 = -12;

    pub const IMPAIRMENT: i32 = 6;
    pub const IMPAIRMENT_MISSING: i32 = -6;
    pub const WORK_OFF: i32 = 6;
    pub const WORK_MODIFIED: i32 = 3;

    pub const PAIN_SEVERE_THRESHOLD: u8 = 7;
    pub const PAIN_MODERATE_THRESHOLD: u8 = 4;
    pub const PAIN_SEVERE: i32 = 6;
    pub const PAIN_MODERATE: i32 = 3;
    pub const PAIN_LOW: i32 = -5;

    /// One point per this many characters of text.
    pub const RICHNESS_CHARS_PER_POINT: usize = 100;
    pub const RICHNESS_MAX: i32 = 5;
    /// Points for a fully filled snapshot before the cap applies.
    pub const FILL_RATIO_SCALE: f64 = 10.0;
    pub const FILL_RATIO_MAX: i32 = 5;
}

/// Identifies which rule produced an [`Adjustment`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ScoreRule {
    PatientName,
    DiagnosisCode,
    ProcedureCode,
    Insurer,
    TherapyDuration,
    SymptomDuration,
    Medication,
    Injection,
    ImagingType,
    ImagingSummary,
    ObjectiveFindings,
    FunctionalImpairment,
    WorkStatus,
    PainScale,
    Richness,
    FillRatio,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Adjustment {
    pub rule: ScoreRule,
    pub delta: i32,
}

/// Every step of a score computation, for display and testing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScoreBreakdown {
    pub base: i32,
    /// Non-zero adjustments in rule order.
    pub adjustments: Vec<Adjustment>,
    /// Base plus all adjustments, before clamping.
    pub raw_total: i32,
    /// Characters of typed text counted toward the richness bonus.
    pub text_chars: usize,
    /// Fraction of fields filled with typed values (uploads excluded).
    pub fill_ratio: f64,
    pub score: u8,
}

impl ScoreBreakdown {
    pub fn delta_for(&self, rule: ScoreRule) -> i32 {
        self.adjustments
            .iter()
            .filter(|a| a.rule == rule)
            .map(|a| a.delta)
            .sum()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoreOptions {
    /// When set, malformed diagnosis and procedure codes score as absent.
    pub treat_invalid_codes_as_absent: bool,
}

impl ScoreOptions {
    pub fn validated() -> Self {
        Self {
            treat_invalid_codes_as_absent: true,
        }
    }
}

/// Score a snapshot with presence-only code checks.
pub fn score(snapshot: &FormSnapshot) -> u8 {
    breakdown(snapshot, ScoreOptions::default()).score
}

pub fn score_with(snapshot: &FormSnapshot, options: ScoreOptions) -> u8 {
    breakdown(snapshot, options).score
}

pub fn breakdown(snapshot: &FormSnapshot, options: ScoreOptions) -> ScoreBreakdown {
    use weights::*;

    let mut adjustments = Vec::new();
    let mut apply = |rule: ScoreRule, delta: i32| {
        if delta != 0 {
            adjustments.push(Adjustment { rule, delta });
        }
    };

    // Identity and coding
    apply(
        ScoreRule::PatientName,
        if present(&snapshot.patient_name) { PATIENT_NAME } else { 0 },
    );
    let diagnosis_ok = present(&snapshot.diagnosis_code)
        && (!options.treat_invalid_codes_as_absent
            || validate_diagnosis_code(&snapshot.diagnosis_code).is_valid);
    apply(
        ScoreRule::DiagnosisCode,
        if diagnosis_ok { DIAGNOSIS_CODE } else { DIAGNOSIS_CODE_MISSING },
    );
    let procedure_ok = present(&snapshot.procedure_code)
        && (!options.treat_invalid_codes_as_absent
            || validate_procedure_code(&snapshot.procedure_code).is_valid);
    apply(
        ScoreRule::ProcedureCode,
        if procedure_ok { PROCEDURE_CODE } else { PROCEDURE_CODE_MISSING },
    );
    apply(
        ScoreRule::Insurer,
        if present(&snapshot.insurer) { INSURER } else { 0 },
    );

    // Treatment duration
    let therapy = match snapshot.therapy_weeks {
        Some(w) if w >= THERAPY_FULL_WEEKS => THERAPY_FULL,
        Some(w) if w >= THERAPY_PARTIAL_WEEKS => THERAPY_PARTIAL,
        _ => THERAPY_INSUFFICIENT,
    };
    apply(ScoreRule::TherapyDuration, therapy);
    apply(
        ScoreRule::SymptomDuration,
        if snapshot.symptom_duration.is_some() {
            SYMPTOM_DURATION
        } else {
            SYMPTOM_DURATION_MISSING
        },
    );

    // Medication and injections
    apply(
        ScoreRule::Medication,
        if present(&snapshot.medication_name) { MEDICATION } else { MEDICATION_MISSING },
    );
    let has_injection =
        present(&snapshot.injection_type) || snapshot.injection_count.is_some_and(|n| n > 0);
    apply(ScoreRule::Injection, if has_injection { INJECTION } else { 0 });

    // Imaging and findings
    let has_imaging_type = present(&snapshot.imaging_type)
        && !snapshot.imaging_type.trim().eq_ignore_ascii_case("none");
    apply(
        ScoreRule::ImagingType,
        if has_imaging_type { IMAGING_TYPE } else { 0 },
    );
    apply(
        ScoreRule::ImagingSummary,
        if snapshot.imaging_summary.is_present() {
            IMAGING_SUMMARY
        } else {
            IMAGING_SUMMARY_MISSING
        },
    );
    apply(
        ScoreRule::ObjectiveFindings,
        if snapshot.objective_findings.is_present() {
            OBJECTIVE_FINDINGS
        } else {
            OBJECTIVE_FINDINGS_MISSING
        },
    );

    // Function and work
    let impaired = matches!(
        snapshot.functional_impairment,
        Some(level) if level != FunctionalImpairment::None
    );
    apply(
        ScoreRule::FunctionalImpairment,
        if impaired { IMPAIRMENT } else { IMPAIRMENT_MISSING },
    );
    let work = match snapshot.work_status {
        Some(WorkStatus::Off) => WORK_OFF,
        Some(WorkStatus::Modified) => WORK_MODIFIED,
        _ => 0,
    };
    apply(ScoreRule::WorkStatus, work);

    // Pain
    let pain = match snapshot.documented_pain() {
        Some(p) if p >= PAIN_SEVERE_THRESHOLD => PAIN_SEVERE,
        Some(p) if p >= PAIN_MODERATE_THRESHOLD => PAIN_MODERATE,
        _ => PAIN_LOW,
    };
    apply(ScoreRule::PainScale, pain);

    // Richness and completeness
    let text_chars: usize = snapshot.text_lengths().iter().map(|(_, n)| n).sum();
    let richness = ((text_chars / RICHNESS_CHARS_PER_POINT) as i32).min(RICHNESS_MAX);
    apply(ScoreRule::Richness, richness);

    let fills = snapshot.field_fills();
    let filled = fills.iter().filter(|(_, f)| *f == FieldFill::Filled).count();
    let fill_ratio = filled as f64 / fills.len() as f64;
    let fill_bonus = ((fill_ratio * FILL_RATIO_SCALE).floor() as i32).min(FILL_RATIO_MAX);
    apply(ScoreRule::FillRatio, fill_bonus);

    let raw_total = BASE + adjustments.iter().map(|a| a.delta).sum::<i32>();
    let score = raw_total.clamp(i32::from(MIN_SCORE), i32::from(MAX_SCORE)) as u8;

    ScoreBreakdown {
        base: BASE,
        adjustments,
        raw_total,
        text_chars,
        fill_ratio,
        score,
    }
}

fn present(value: &str) -> bool {
    !value.trim().is_empty()
}
