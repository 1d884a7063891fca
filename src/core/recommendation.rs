use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::{Application, ApplicationStatus, EducationEntry, Internship, StudentProfile};
use crate::scoring::RecommendationScore;

const NOT_AVAILABLE: &str = "N/A";

fn or_not_available(value: &Option<String>) -> String {
    value
        .as_deref()
        .filter(|v| !v.is_empty())
        .unwrap_or(NOT_AVAILABLE)
        .to_string()
}

/// One scored applicant with the profile fields a reviewer needs
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RankedApplicant {
    pub application_id: String,
    pub student_id: String,
    pub student_email: String,
    pub student_name: String,
    pub student_skills: Vec<String>,
    pub student_education: Vec<EducationEntry>,
    pub student_university: String,
    pub student_major: String,
    pub student_graduation_year: Option<i32>,
    pub resume_path: Option<String>,
    pub resume_filename: Option<String>,
    pub cover_letter: Option<String>,
    pub application_status: ApplicationStatus,
    pub applied_at: DateTime<Utc>,
    pub recommendation: RecommendationScore,
}

impl RankedApplicant {
    pub fn new(
        application: &Application,
        student: &StudentProfile,
        recommendation: RecommendationScore,
    ) -> Self {
        let resume = application.resume.clone().unwrap_or_default();
        Self {
            application_id: application.id.clone(),
            student_id: student.id.clone(),
            student_email: student.email.clone(),
            student_name: or_not_available(&student.name),
            student_skills: student.skills.clone(),
            student_education: student.education.clone(),
            student_university: or_not_available(&student.university),
            student_major: or_not_available(&student.major),
            student_graduation_year: student.graduation_year,
            resume_path: resume.path,
            resume_filename: resume.filename,
            cover_letter: application
                .cover_letter
                .clone()
                .filter(|text| !text.is_empty()),
            application_status: application.status,
            applied_at: application.applied_at,
            recommendation,
        }
    }

    pub fn overall_score(&self) -> u8 {
        self.recommendation.overall_score
    }
}

/// Ranked applicants of one internship
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InternshipRecommendations {
    pub internship_id: String,
    pub internship_title: String,
    pub internship_skills: Vec<String>,
    pub internship_requirements: String,
    pub total_applicants: usize,
    pub applicants: Vec<RankedApplicant>,
}

impl InternshipRecommendations {
    pub fn new(internship: &Internship, applicants: Vec<RankedApplicant>) -> Self {
        Self {
            internship_id: internship.id.clone(),
            internship_title: internship.title.clone(),
            internship_skills: internship.skills.clone(),
            internship_requirements: internship.requirements.clone().unwrap_or_default(),
            total_applicants: applicants.len(),
            applicants,
        }
    }

    /// Highest ranked applicant, if any
    pub fn top(&self) -> Option<&RankedApplicant> {
        self.applicants.first()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InternshipSummary {
    pub id: String,
    pub title: String,
    pub skills: Vec<String>,
    pub requirements: String,
    pub description: String,
}

/// Detailed breakdown of a single application
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ApplicantAnalysis {
    pub applicant: RankedApplicant,
    pub internship: InternshipSummary,
    /// Most frequent terms of the internship requirements
    pub requirement_keywords: Vec<String>,
    /// Most frequent terms of the cover letter
    pub cover_letter_keywords: Vec<String>,
    /// Requirement keywords that also appear among the cover letter keywords
    pub shared_keywords: Vec<String>,
}

impl ApplicantAnalysis {
    pub fn summarize(internship: &Internship) -> InternshipSummary {
        InternshipSummary {
            id: internship.id.clone(),
            title: internship.title.clone(),
            skills: internship.skills.clone(),
            requirements: internship.requirements.clone().unwrap_or_default(),
            description: internship.description.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ResumeRef;
    use crate::scoring::{ScoreAggregator, ScoringParams};

    #[test]
    fn test_missing_profile_fields_default_to_na() {
        let student = StudentProfile::new("s1", "s1@uni.edu");
        let mut application = Application::new("a1", "i1", student.clone()).with_cover_letter("");
        application.resume = Some(ResumeRef {
            filename: Some("cv.pdf".to_string()),
            path: Some("uploads/resumes/cv.pdf".to_string()),
        });

        let score = ScoreAggregator::default().score(&ScoringParams::default());
        let ranked = RankedApplicant::new(&application, &student, score);

        assert_eq!(ranked.student_name, "N/A");
        assert_eq!(ranked.student_university, "N/A");
        assert_eq!(ranked.student_major, "N/A");
        assert_eq!(ranked.cover_letter, None);
        assert_eq!(ranked.resume_filename.as_deref(), Some("cv.pdf"));
        assert_eq!(ranked.overall_score(), 0);
    }

    #[test]
    fn test_serializes_camel_case() {
        let student = StudentProfile::new("s1", "s1@uni.edu");
        let application = Application::new("a1", "i1", student.clone());
        let score = ScoreAggregator::default().score(&ScoringParams::default());
        let ranked = RankedApplicant::new(&application, &student, score);

        let json = serde_json::to_value(&ranked).unwrap();
        assert_eq!(json["applicationId"], "a1");
        assert_eq!(json["applicationStatus"], "pending");
        assert_eq!(json["recommendation"]["overallScore"], 0);
        assert!(json["resumePath"].is_null());
    }

    #[test]
    fn test_empty_recommendations_keep_internship_fields() {
        let mut internship = Internship::new("i1", "c1", "Data Intern");
        internship.skills = vec!["SQL".to_string()];
        let recs = InternshipRecommendations::new(&internship, Vec::new());
        assert_eq!(recs.total_applicants, 0);
        assert_eq!(recs.internship_requirements, "");
        assert!(recs.top().is_none());
    }
}
