//! Weighted aggregation of the matchers into a `RecommendationScore`.

pub mod config;
pub mod explain;

use serde::{Deserialize, Serialize};

use crate::core::{EducationEntry, Internship, StudentProfile};
use crate::matching::{match_education, match_skills, text_similarity, MatchResult};

pub use config::{ScoringConfig, ScoringWeights};
pub use explain::{Assessment, TierThresholds};

/// Scoring inputs as they arrive from collaborators or the wire; every field
/// may be missing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringRequest {
    #[serde(default)]
    pub required_skills: Option<Vec<String>>,

    #[serde(default, alias = "studentSkills")]
    pub candidate_skills: Option<Vec<String>>,

    #[serde(default, alias = "internshipRequirements")]
    pub requirements_text: Option<String>,

    #[serde(default, alias = "coverLetter")]
    pub cover_letter_text: Option<String>,

    #[serde(default, alias = "studentEducation")]
    pub education: Option<Vec<EducationEntry>>,

    #[serde(default)]
    pub student_major: Option<String>,

    #[serde(default)]
    pub student_university: Option<String>,
}

/// Fully populated scoring inputs; defaults are applied once here.
///
/// `student_major` and `student_university` are carried but no matcher reads
/// them yet.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoringParams {
    pub required_skills: Vec<String>,
    pub candidate_skills: Vec<String>,
    pub requirements_text: String,
    pub cover_letter_text: String,
    pub education: Vec<EducationEntry>,
    pub student_major: String,
    pub student_university: String,
}

impl From<ScoringRequest> for ScoringParams {
    fn from(request: ScoringRequest) -> Self {
        Self {
            required_skills: request.required_skills.unwrap_or_default(),
            candidate_skills: request.candidate_skills.unwrap_or_default(),
            requirements_text: request.requirements_text.unwrap_or_default(),
            cover_letter_text: request.cover_letter_text.unwrap_or_default(),
            education: request.education.unwrap_or_default(),
            student_major: request.student_major.unwrap_or_default(),
            student_university: request.student_university.unwrap_or_default(),
        }
    }
}

impl ScoringParams {
    /// Inputs for one applicant against one internship
    pub fn for_applicant(
        internship: &Internship,
        student: &StudentProfile,
        cover_letter: Option<&str>,
    ) -> Self {
        Self {
            required_skills: internship.skills.clone(),
            candidate_skills: student.skills.clone(),
            requirements_text: internship.requirements.clone().unwrap_or_default(),
            cover_letter_text: cover_letter.unwrap_or_default().to_string(),
            education: student.education.clone(),
            student_major: student.major.clone().unwrap_or_default(),
            student_university: student.university.clone().unwrap_or_default(),
        }
    }
}

/// Weighted sub-scores, each rounded on its own
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub skill_score: u32,
    pub text_score: u32,
    pub education_score: u32,
}

/// Aggregate score for one applicant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationScore {
    /// 0-100, clamped
    pub overall_score: u8,
    pub breakdown: ScoreBreakdown,
    pub skill_match: MatchResult,
    pub match_reason: String,
}

/// Runs the three matchers and combines them with the configured weights
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoreAggregator {
    config: ScoringConfig,
}

impl ScoreAggregator {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Score one applicant.
    ///
    /// `overall_score = min(100, round(skill * w_s + text * w_t + edu * w_e))`.
    /// Breakdown values are rounded separately and need not add up to it.
    pub fn score(&self, params: &ScoringParams) -> RecommendationScore {
        let weights = self.config.weights;

        let skill_match = match_skills(&params.required_skills, &params.candidate_skills);
        let skill_score = f64::from(skill_match.percentage) * weights.skill;

        let similarity = text_similarity(&params.requirements_text, &params.cover_letter_text);
        let text_score = f64::from(similarity) * weights.text;

        let education = match_education(
            &params.requirements_text,
            &params.education,
            &self.config.education,
        );
        let education_score = f64::from(education) * weights.education;

        let total = (skill_score + text_score + education_score).round().max(0.0) as u32;
        let overall_score = total.min(100) as u8;

        let match_reason = explain::match_reason(
            &skill_match,
            similarity,
            education_score > 0.0,
            total,
            &self.config.tiers,
        );

        tracing::trace!(
            skill = skill_match.percentage,
            text = similarity,
            education,
            overall = overall_score,
            "scored applicant"
        );

        RecommendationScore {
            overall_score,
            breakdown: ScoreBreakdown {
                skill_score: skill_score.round() as u32,
                text_score: text_score.round() as u32,
                education_score: education_score.round() as u32,
            },
            skill_match,
            match_reason,
        }
    }

    /// Normalize a raw request, then score it
    pub fn score_request(&self, request: ScoringRequest) -> RecommendationScore {
        self.score(&ScoringParams::from(request))
    }
}
