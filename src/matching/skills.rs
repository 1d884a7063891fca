use serde::{Deserialize, Serialize};

/// Outcome of comparing required skills against a candidate's skills
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    /// Matched share of the required skills, 0-100
    pub percentage: u8,

    /// Normalized (lowercase, trimmed) required skills that matched, unique
    pub matched_skills: Vec<String>,

    /// Required skills in their original case that did not match
    pub missing_skills: Vec<String>,

    pub total_required: usize,

    pub total_matched: usize,
}

impl MatchResult {
    /// Result for an empty requirement list
    pub fn empty() -> Self {
        Self::default()
    }
}

fn normalize_skill(skill: &str) -> String {
    skill.trim().to_lowercase()
}

/// Compare required skills with candidate skills.
///
/// A required skill matches when a candidate skill equals it, contains it, or
/// is contained in it (all after lowercasing and trimming). The containment
/// tests catch variants such as "js" / "node.js" and knowingly accept false
/// positives from short candidate tokens; a blank candidate skill is
/// contained in every requirement.
///
/// Duplicates are kept: `total_required` counts every entry while
/// `matched_skills` holds each normalized match once.
pub fn match_skills(required: &[String], candidate: &[String]) -> MatchResult {
    if required.is_empty() {
        return MatchResult::empty();
    }

    let normalized_candidate: Vec<String> = candidate
        .iter()
        .map(|s| normalize_skill(s))
        .collect();

    let mut matched_skills: Vec<String> = Vec::new();
    for skill in required {
        let wanted = normalize_skill(skill);
        if matched_skills.contains(&wanted) {
            continue;
        }

        let hit = normalized_candidate
            .iter()
            .any(|have| *have == wanted || have.contains(&wanted) || wanted.contains(have.as_str()));

        if hit {
            matched_skills.push(wanted);
        }
    }

    let missing_skills: Vec<String> = required
        .iter()
        .filter(|skill| !matched_skills.contains(&normalize_skill(skill)))
        .cloned()
        .collect();

    let total_required = required.len();
    let total_matched = matched_skills.len();
    let percentage = (total_matched as f64 / total_required as f64 * 100.0)
        .round()
        .min(100.0) as u8;

    MatchResult {
        percentage,
        matched_skills,
        missing_skills,
        total_required,
        total_matched,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skills(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_empty_requirements() {
        let result = match_skills(&[], &skills(&["rust", "go"]));
        assert_eq!(result.percentage, 0);
        assert!(result.matched_skills.is_empty());
        assert!(result.missing_skills.is_empty());
        assert_eq!(result.total_required, 0);
    }

    #[test]
    fn test_react_node_scenario() {
        let result = match_skills(&skills(&["React", "Node.js"]), &skills(&["react", "express"]));
        assert_eq!(result.percentage, 50);
        assert_eq!(result.matched_skills, vec!["react"]);
        assert_eq!(result.missing_skills, vec!["Node.js"]);
        assert_eq!(result.total_matched, 1);
        assert_eq!(result.total_required, 2);
    }

    #[test]
    fn test_full_case_insensitive_containment() {
        let result = match_skills(
            &skills(&["  Python ", "SQL", "Docker"]),
            &skills(&["docker", "sql", "PYTHON", "git"]),
        );
        assert_eq!(result.percentage, 100);
        assert!(result.missing_skills.is_empty());
    }

    #[test]
    fn test_substring_match_either_direction() {
        let result = match_skills(&skills(&["JS"]), &skills(&["Node.js"]));
        assert_eq!(result.percentage, 100);
        assert_eq!(result.matched_skills, vec!["js"]);

        // "js" is not a contiguous part of "javascript"
        let result = match_skills(&skills(&["JS"]), &skills(&["JavaScript"]));
        assert_eq!(result.percentage, 0);
        assert_eq!(result.missing_skills, vec!["JS"]);

        // Short candidate token inside a longer requirement also counts
        let result = match_skills(&skills(&["Machine Learning"]), &skills(&["learning"]));
        assert_eq!(result.percentage, 100);
    }

    #[test]
    fn test_duplicate_requirements_not_deduplicated() {
        let result = match_skills(&skills(&["JavaScript", "javascript", "Go"]), &skills(&["javascript"]));
        assert_eq!(result.total_required, 3);
        assert_eq!(result.total_matched, 1);
        assert_eq!(result.matched_skills, vec!["javascript"]);
        assert_eq!(result.missing_skills, vec!["Go"]);
        assert_eq!(result.percentage, 33);
    }

    #[test]
    fn test_blank_candidate_skill_matches_everything() {
        let result = match_skills(&skills(&["Kotlin", "Swift"]), &skills(&["  "]));
        assert_eq!(result.percentage, 100);
        assert_eq!(result.matched_skills, vec!["kotlin", "swift"]);
        assert!(result.missing_skills.is_empty());
    }

    #[test]
    fn test_rounding() {
        let result = match_skills(
            &skills(&["a1", "b2", "c3"]),
            &skills(&["a1", "b2"]),
        );
        assert_eq!(result.percentage, 67);
    }
}
