use serde::{Deserialize, Serialize};

use crate::matching::MatchResult;

/// Cut-offs for the wording of the match reason
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TierThresholds {
    /// Skill percentage for "Strong skills match"
    pub strong_skills: u8,
    /// Skill percentage for "Good skills match"
    pub good_skills: u8,
    /// Text similarity for "Cover letter aligns with requirements"
    pub text_alignment: u8,
    pub highly_recommended: u32,
    pub recommended: u32,
    pub consider: u32,
}

impl Default for TierThresholds {
    fn default() -> Self {
        Self {
            strong_skills: 80,
            good_skills: 50,
            text_alignment: 30,
            highly_recommended: 80,
            recommended: 60,
            consider: 40,
        }
    }
}

/// Overall verdict derived from the aggregate score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Assessment {
    HighlyRecommended,
    Recommended,
    ConsiderForReview,
    LowMatch,
}

impl Assessment {
    pub fn from_score(score: u32, tiers: &TierThresholds) -> Self {
        if score >= tiers.highly_recommended {
            Assessment::HighlyRecommended
        } else if score >= tiers.recommended {
            Assessment::Recommended
        } else if score >= tiers.consider {
            Assessment::ConsiderForReview
        } else {
            Assessment::LowMatch
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Assessment::HighlyRecommended => "Highly Recommended",
            Assessment::Recommended => "Recommended",
            Assessment::ConsiderForReview => "Consider for Review",
            Assessment::LowMatch => "Low Match",
        }
    }
}

fn skill_reason(skills: &MatchResult, tiers: &TierThresholds) -> String {
    let tier = if skills.percentage >= tiers.strong_skills {
        "Strong"
    } else if skills.percentage >= tiers.good_skills {
        "Good"
    } else if skills.percentage > 0 {
        "Partial"
    } else {
        return "Limited skills match".to_string();
    };

    format!(
        "{} skills match ({}% - {}/{} skills)",
        tier, skills.percentage, skills.total_matched, skills.total_required
    )
}

fn text_reason(similarity: u8, tiers: &TierThresholds) -> Option<&'static str> {
    if similarity >= tiers.text_alignment {
        Some("Cover letter aligns with requirements")
    } else if similarity > 0 {
        Some("Some alignment with requirements")
    } else {
        None
    }
}

/// Build `"<assessment> - <reason>; <reason>..."`.
///
/// `total_score` is the rounded aggregate before clamping; the text reason is
/// left out when similarity is 0 and the education reason only appears when
/// `education_relevant` is set.
pub fn match_reason(
    skills: &MatchResult,
    text_similarity: u8,
    education_relevant: bool,
    total_score: u32,
    tiers: &TierThresholds,
) -> String {
    let mut reasons = vec![skill_reason(skills, tiers)];

    if let Some(reason) = text_reason(text_similarity, tiers) {
        reasons.push(reason.to_string());
    }

    if education_relevant {
        reasons.push("Relevant educational background".to_string());
    }

    format!(
        "{} - {}",
        Assessment::from_score(total_score, tiers).label(),
        reasons.join("; ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skills(percentage: u8, matched: usize, total: usize) -> MatchResult {
        MatchResult {
            percentage,
            total_matched: matched,
            total_required: total,
            ..MatchResult::default()
        }
    }

    #[test]
    fn test_assessment_ladder() {
        let tiers = TierThresholds::default();
        assert_eq!(Assessment::from_score(100, &tiers), Assessment::HighlyRecommended);
        assert_eq!(Assessment::from_score(80, &tiers), Assessment::HighlyRecommended);
        assert_eq!(Assessment::from_score(79, &tiers), Assessment::Recommended);
        assert_eq!(Assessment::from_score(60, &tiers), Assessment::Recommended);
        assert_eq!(Assessment::from_score(40, &tiers), Assessment::ConsiderForReview);
        assert_eq!(Assessment::from_score(39, &tiers), Assessment::LowMatch);
        assert_eq!(Assessment::from_score(0, &tiers), Assessment::LowMatch);
    }

    #[test]
    fn test_full_reason() {
        let reason = match_reason(&skills(100, 3, 3), 45, true, 87, &TierThresholds::default());
        assert_eq!(
            reason,
            "Highly Recommended - Strong skills match (100% - 3/3 skills); \
             Cover letter aligns with requirements; Relevant educational background"
        );
    }

    #[test]
    fn test_zero_text_is_silent() {
        let reason = match_reason(&skills(50, 1, 2), 0, false, 25, &TierThresholds::default());
        assert_eq!(reason, "Low Match - Good skills match (50% - 1/2 skills)");
    }

    #[test]
    fn test_partial_and_limited_skill_tiers() {
        let tiers = TierThresholds::default();
        let reason = match_reason(&skills(25, 1, 4), 10, false, 41, &tiers);
        assert_eq!(
            reason,
            "Consider for Review - Partial skills match (25% - 1/4 skills); Some alignment with requirements"
        );

        let reason = match_reason(&skills(0, 0, 4), 0, true, 4, &tiers);
        assert_eq!(reason, "Low Match - Limited skills match; Relevant educational background");
    }

    #[test]
    fn test_custom_tiers() {
        let tiers = TierThresholds {
            strong_skills: 95,
            ..TierThresholds::default()
        };
        let reason = match_reason(&skills(90, 9, 10), 0, false, 65, &tiers);
        assert_eq!(reason, "Recommended - Good skills match (90% - 9/10 skills)");
    }
}
