//! Appeal outlook from checklist progress and historical outcomes.

use authpilot_core::models::checklist::ChecklistItem;
use authpilot_core::models::denial::SimilarCases;

/// Success probability before any checklist item is completed.
pub const BASE_SUCCESS_PROBABILITY: u8 = 84;
/// Extra points when every checklist item is completed.
pub const CHECKLIST_BONUS: u8 = 16;

/// Estimated appeal success probability in percent.
///
/// Grows with the share of completed checklist items, from 84 with nothing
/// done to 100 with everything done. An empty checklist stays at the base.
pub fn success_probability(items: &[ChecklistItem]) -> u8 {
    if items.is_empty() {
        return BASE_SUCCESS_PROBABILITY;
    }
    let completed = items.iter().filter(|item| item.completed()).count();
    let bonus = (completed as f64 / items.len() as f64 * f64::from(CHECKLIST_BONUS)).floor();
    BASE_SUCCESS_PROBABILITY + bonus as u8
}

/// Share of similar appeals that succeeded, rounded to a whole percent.
/// `None` when there is no history.
pub fn similar_case_rate(cases: SimilarCases) -> Option<u8> {
    if cases.total == 0 {
        return None;
    }
    let successful = cases.successful.min(cases.total);
    Some((f64::from(successful) / f64::from(cases.total) * 100.0).round() as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checklist(done: usize, total: usize) -> Vec<ChecklistItem> {
        (0..total)
            .map(|i| {
                let mut item = ChecklistItem::new((i + 1).to_string(), format!("Document {i}"), "");
                if i < done {
                    item.set_notes("attached");
                }
                item
            })
            .collect()
    }

    #[test]
    fn probability_grows_with_completion() {
        assert_eq!(success_probability(&[]), 84);
        assert_eq!(success_probability(&checklist(0, 3)), 84);
        assert_eq!(success_probability(&checklist(1, 3)), 89);
        assert_eq!(success_probability(&checklist(2, 3)), 94);
        assert_eq!(success_probability(&checklist(3, 3)), 100);
    }

    #[test]
    fn similar_case_rates() {
        assert_eq!(
            similar_case_rate(SimilarCases {
                total: 47,
                successful: 39
            }),
            Some(83)
        );
        assert_eq!(
            similar_case_rate(SimilarCases {
                total: 32,
                successful: 28
            }),
            Some(88)
        );
        assert_eq!(
            similar_case_rate(SimilarCases {
                total: 0,
                successful: 0
            }),
            None
        );
    }
}
