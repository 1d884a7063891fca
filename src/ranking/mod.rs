use crate::core::{Application, Internship, InternshipRecommendations, RankedApplicant};
use crate::scoring::{ScoreAggregator, ScoringConfig, ScoringParams};

/// Scores a materialized applicant list and orders it best first.
///
/// Pure and synchronous: all fetching happens before this is called.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecommendationRanker {
    aggregator: ScoreAggregator,
}

impl RecommendationRanker {
    pub fn new(config: ScoringConfig) -> Self {
        Self {
            aggregator: ScoreAggregator::new(config),
        }
    }

    pub fn aggregator(&self) -> &ScoreAggregator {
        &self.aggregator
    }

    /// Score one application, `None` if its student did not resolve
    pub fn score_application(
        &self,
        internship: &Internship,
        application: &Application,
    ) -> Option<RankedApplicant> {
        let student = application.student.as_ref()?;
        let params =
            ScoringParams::for_applicant(internship, student, application.cover_letter.as_deref());
        let recommendation = self.aggregator.score(&params);
        Some(RankedApplicant::new(application, student, recommendation))
    }

    /// Rank applications for `internship` by overall score, highest first.
    ///
    /// Applications in an ineligible status are ignored and applications
    /// whose student profile is missing are skipped with a warning. Equal
    /// scores keep their input order. The internship is assumed to be valid
    /// and already authorized for the caller.
    pub fn rank_for_internship(
        &self,
        internship: &Internship,
        applications: &[Application],
    ) -> Vec<RankedApplicant> {
        let mut ranked: Vec<RankedApplicant> = applications
            .iter()
            .filter(|app| app.status.is_eligible())
            .filter_map(|app| {
                let scored = self.score_application(internship, app);
                if scored.is_none() {
                    tracing::warn!(
                        application_id = %app.id,
                        student_id = %app.student_id,
                        internship_id = %internship.id,
                        "student profile unresolved, skipping applicant"
                    );
                }
                scored
            })
            .collect();

        // Vec::sort_by is stable
        ranked.sort_by(|a, b| b.overall_score().cmp(&a.overall_score()));
        ranked
    }

    /// Rank and wrap with the internship's identifying fields
    pub fn recommend(
        &self,
        internship: &Internship,
        applications: &[Application],
    ) -> InternshipRecommendations {
        InternshipRecommendations::new(internship, self.rank_for_internship(internship, applications))
    }
}
