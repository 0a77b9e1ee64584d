//! Field format and range checks.
//!
//! Validators never fail: they return a [`ValidationResult`] that the UI
//! shows inline next to the field.

use std::sync::LazyLock;

use jiff::civil::Date;
use regex::Regex;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// CPT codes: exactly five digits.
static PROCEDURE_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{5}$").expect("procedure code pattern is valid"));

/// ICD-10 codes: one letter, two digits, optional `.` and one or two digits.
static DIAGNOSIS_CODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z]\d{2}(\.\d{1,2})?$").expect("diagnosis code pattern is valid")
});

pub const MAX_AGE_YEARS: i16 = 120;
pub const MAX_PAIN_SCALE: i64 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub error: Option<String>,
}

impl ValidationResult {
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            error: None,
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            error: Some(message.into()),
        }
    }
}

pub fn validate_procedure_code(code: &str) -> ValidationResult {
    let code = code.trim();
    if PROCEDURE_CODE.is_match(code) {
        ValidationResult::valid()
    } else if code.is_empty() {
        ValidationResult::invalid("CPT procedure code is required")
    } else {
        ValidationResult::invalid(format!(
            "CPT procedure code must be exactly 5 digits (e.g., 72148), got '{code}'"
        ))
    }
}

pub fn validate_diagnosis_code(code: &str) -> ValidationResult {
    let code = code.trim();
    if DIAGNOSIS_CODE.is_match(code) {
        ValidationResult::valid()
    } else if code.is_empty() {
        ValidationResult::invalid("ICD-10 diagnosis code is required")
    } else {
        ValidationResult::invalid(format!(
            "ICD-10 diagnosis code must be a letter, two digits, and an optional decimal \
             (e.g., M54.5), got '{code}'"
        ))
    }
}

/// Check an age in whole years.
pub fn validate_age(years: i64) -> ValidationResult {
    if (0..=i64::from(MAX_AGE_YEARS)).contains(&years) {
        ValidationResult::valid()
    } else {
        ValidationResult::invalid(format!(
            "Age must be between 0 and {MAX_AGE_YEARS} years, got {years}"
        ))
    }
}

/// Derive the age from a `YYYY-MM-DD` birth date as of `today` and check it.
pub fn validate_birth_date(raw: &str, today: Date) -> ValidationResult {
    let raw = raw.trim();
    if raw.is_empty() {
        return ValidationResult::invalid("Date of birth is required");
    }
    match raw.parse::<Date>() {
        Ok(dob) => validate_age(age_on(dob, today)),
        Err(_) => ValidationResult::invalid(format!(
            "Date of birth must be a date in YYYY-MM-DD format, got '{raw}'"
        )),
    }
}

/// Whole years between `dob` and `today`. Negative when `dob` is in the future.
pub fn age_on(dob: Date, today: Date) -> i64 {
    let mut years = i64::from(today.year()) - i64::from(dob.year());
    if (today.month(), today.day()) < (dob.month(), dob.day()) {
        years -= 1;
    }
    years
}

pub fn validate_pain_scale(value: i64) -> ValidationResult {
    if (0..=MAX_PAIN_SCALE).contains(&value) {
        ValidationResult::valid()
    } else {
        ValidationResult::invalid(format!(
            "Pain scale must be a whole number from 0 to {MAX_PAIN_SCALE}, got {value}"
        ))
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;

    #[test]
    fn procedure_codes() {
        assert!(validate_procedure_code("72148").is_valid);
        assert!(validate_procedure_code(" 72148 ").is_valid);
        assert!(!validate_procedure_code("7214").is_valid);
        assert!(!validate_procedure_code("721480").is_valid);
        assert!(!validate_procedure_code("7214A").is_valid);

        let empty = validate_procedure_code("");
        assert!(!empty.is_valid);
        assert_eq!(empty.error.as_deref(), Some("CPT procedure code is required"));
    }

    #[test]
    fn diagnosis_codes() {
        for ok in ["M54.5", "M54", "S83.21", "m51.16"] {
            assert!(validate_diagnosis_code(ok).is_valid, "{ok} should be valid");
        }
        for bad in ["54.5", "M5", "M54.", "M54.567", "MM54"] {
            let result = validate_diagnosis_code(bad);
            assert!(!result.is_valid, "{bad} should be invalid");
            assert!(result.error.unwrap().contains(bad));
        }
    }

    #[test]
    fn age_bounds() {
        assert!(validate_age(0).is_valid);
        assert!(validate_age(120).is_valid);
        assert!(!validate_age(121).is_valid);
        assert!(!validate_age(-1).is_valid);
    }

    #[test]
    fn birth_dates() {
        let today = date(2024, 10, 15);
        assert!(validate_birth_date("1980-05-12", today).is_valid);
        assert!(!validate_birth_date("1890-01-01", today).is_valid);
        assert!(!validate_birth_date("2030-01-01", today).is_valid);
        assert!(!validate_birth_date("05/12/1980", today).is_valid);
        assert!(!validate_birth_date("", today).is_valid);
    }

    #[test]
    fn age_counts_birthday_not_yet_reached() {
        assert_eq!(age_on(date(1980, 10, 16), date(2024, 10, 15)), 43);
        assert_eq!(age_on(date(1980, 10, 15), date(2024, 10, 15)), 44);
    }

    #[test]
    fn pain_scale_bounds() {
        assert!(validate_pain_scale(0).is_valid);
        assert!(validate_pain_scale(10).is_valid);
        assert!(!validate_pain_scale(11).is_valid);
        assert!(!validate_pain_scale(-3).is_valid);
    }
}
