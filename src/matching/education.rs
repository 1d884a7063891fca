use serde::{Deserialize, Serialize};

use crate::core::EducationEntry;

/// Base score when an entry's field or degree matches the requirement
pub const MATCHED_BASE_SCORE: u8 = 80;

/// Base score for any education history without a textual match
pub const UNMATCHED_BASE_SCORE: u8 = 20;

/// Added once when any entry reaches the high-achievement threshold
pub const HIGH_ACHIEVEMENT_BONUS: u8 = 20;

/// Grade threshold for the education bonus.
///
/// The default of 3.5 reads like a 4.0-scale GPA while student profiles
/// accept grades from 0 to 10, so on a 10-point scale almost every grade
/// earns the bonus. The value is kept as is until the grade scale is settled.
pub const DEFAULT_HIGH_ACHIEVEMENT_THRESHOLD: f64 = 3.5;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EducationPolicy {
    pub high_achievement_threshold: f64,
}

impl Default for EducationPolicy {
    fn default() -> Self {
        Self {
            high_achievement_threshold: DEFAULT_HIGH_ACHIEVEMENT_THRESHOLD,
        }
    }
}

fn lower(value: &Option<String>) -> String {
    value.as_deref().unwrap_or_default().to_lowercase()
}

/// Field contains the requirement or the requirement contains the field, or
/// the degree contains the requirement. An absent field of study is the empty
/// string and so is contained in every requirement.
fn entry_matches(entry: &EducationEntry, requirement: &str) -> bool {
    let field = lower(&entry.field_of_study);
    let degree = lower(&entry.degree);

    field.contains(requirement) || requirement.contains(field.as_str()) || degree.contains(requirement)
}

/// Score education history against free-text requirements (0-100).
///
/// 0 when the requirement text or the history is empty, otherwise
/// [`MATCHED_BASE_SCORE`] or [`UNMATCHED_BASE_SCORE`] plus
/// [`HIGH_ACHIEVEMENT_BONUS`] if any grade meets the policy threshold,
/// capped at 100.
pub fn match_education(
    requirement_text: &str,
    education: &[EducationEntry],
    policy: &EducationPolicy,
) -> u8 {
    if requirement_text.is_empty() || education.is_empty() {
        return 0;
    }
    let requirement = requirement_text.trim().to_lowercase();

    let has_match = education.iter().any(|entry| entry_matches(entry, &requirement));

    let high_achiever = education.iter().any(|entry| {
        entry
            .cgpa
            .map(|grade| grade >= policy.high_achievement_threshold)
            .unwrap_or(false)
    });

    let mut score = if has_match {
        MATCHED_BASE_SCORE
    } else {
        UNMATCHED_BASE_SCORE
    };
    if high_achiever {
        score = score.saturating_add(HIGH_ACHIEVEMENT_BONUS).min(100);
    }

    score
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> EducationPolicy {
        EducationPolicy::default()
    }

    #[test]
    fn test_empty_inputs() {
        let entries = vec![EducationEntry::new("BS", "Biology")];
        assert_eq!(match_education("", &entries, &policy()), 0);
        assert_eq!(match_education("Biology", &[], &policy()), 0);
    }

    #[test]
    fn test_whitespace_requirement_matches_every_entry() {
        // trims to the empty string, which every field contains
        let entries = vec![EducationEntry::new("BA", "History")];
        assert_eq!(match_education("   ", &entries, &policy()), 80);

        let entries = vec![EducationEntry::new("BA", "History").with_cgpa(3.9)];
        assert_eq!(match_education(" \t", &entries, &policy()), 100);
    }

    #[test]
    fn test_computer_science_with_high_cgpa() {
        let entries = vec![
            EducationEntry::new("BS Computer Science", "Computer Science").with_cgpa(3.8),
        ];
        let requirements = "Students pursuing Computer Science or a related field";
        assert_eq!(match_education(requirements, &entries, &policy()), 100);
    }

    #[test]
    fn test_match_without_grade_bonus() {
        let entries = vec![EducationEntry::new("BSc", "Mathematics").with_cgpa(3.0)];
        assert_eq!(match_education("mathematics", &entries, &policy()), 80);
    }

    #[test]
    fn test_degree_contains_requirement() {
        let entries = vec![EducationEntry {
            degree: Some("Master of Data Science".to_string()),
            ..EducationEntry::default()
        }];
        assert_eq!(match_education("Data Science", &entries, &policy()), 80);
    }

    #[test]
    fn test_no_match_still_weakly_relevant() {
        let entries = vec![EducationEntry::new("BA", "History")];
        assert_eq!(match_education("electrical engineering", &entries, &policy()), 20);
    }

    #[test]
    fn test_missing_field_of_study_matches_any_requirement() {
        let entries = vec![EducationEntry {
            degree: Some("BA".to_string()),
            ..EducationEntry::default()
        }];
        assert_eq!(match_education("chemistry", &entries, &policy()), 80);

        let entries = vec![EducationEntry::default().with_cgpa(3.6)];
        assert_eq!(match_education("chemistry", &entries, &policy()), 100);
    }

    #[test]
    fn test_ten_point_scale_grades_mostly_earn_bonus() {
        // Documents current behavior: 4.0 on a 0-10 scale clears the 3.5 threshold
        let entries = vec![EducationEntry::new("BA", "History").with_cgpa(4.0)];
        assert_eq!(match_education("engineering", &entries, &policy()), 40);
    }

    #[test]
    fn test_threshold_is_configurable() {
        let ten_point = EducationPolicy {
            high_achievement_threshold: 8.5,
        };
        let entries = vec![EducationEntry::new("BA", "History").with_cgpa(4.0)];
        assert_eq!(match_education("engineering", &entries, &ten_point), 20);

        let entries = vec![EducationEntry::new("BA", "History").with_cgpa(9.1)];
        assert_eq!(match_education("history", &entries, &ten_point), 100);
    }
}
