use futures::future::try_join_all;
use std::sync::Arc;
use std::time::Instant;

use crate::config::EngineConfig;
use crate::core::{ApplicantAnalysis, InternshipRecommendations};
use crate::error::{RecommenderError, Result};
use crate::matching::extract_keywords;
use crate::providers::{ApplicantSource, SqliteStore};
use crate::ranking::RecommendationRanker;
use crate::scoring::{RecommendationScore, ScoringConfig, ScoringRequest};

/// Main recommendation orchestrator: fetch through the source, then rank
pub struct RecommendationEngine {
    source: Arc<dyn ApplicantSource>,
    ranker: RecommendationRanker,
}

impl RecommendationEngine {
    /// Create engine over any applicant source
    pub fn new(source: Arc<dyn ApplicantSource>, scoring: ScoringConfig) -> Self {
        Self {
            source,
            ranker: RecommendationRanker::new(scoring),
        }
    }

    /// Create engine with the SQLite store named in the config
    pub async fn open(config: &EngineConfig) -> Result<Self> {
        config.validate()?;
        let store = SqliteStore::new(&config.database_path).await?;
        tracing::info!("✅ SQLite store opened at {}", config.database_path);
        Ok(Self::new(Arc::new(store), config.scoring))
    }

    pub fn ranker(&self) -> &RecommendationRanker {
        &self.ranker
    }

    pub fn source_name(&self) -> &str {
        self.source.name()
    }

    /// Ranked applicants for one internship owned by the company.
    ///
    /// Fails with `InternshipNotFound` when the internship does not exist or
    /// belongs to another company. No applicants is an empty list, not an
    /// error.
    pub async fn recommend_for_internship(
        &self,
        company_id: &str,
        internship_id: &str,
    ) -> Result<InternshipRecommendations> {
        let start = Instant::now();

        let internship = self
            .source
            .internship(company_id, internship_id)
            .await?
            .ok_or_else(|| RecommenderError::InternshipNotFound(internship_id.to_string()))?;

        let applications = self.source.eligible_applications(&internship.id).await?;
        let recommendations = self.ranker.recommend(&internship, &applications);

        tracing::info!(
            company_id,
            internship_id,
            fetched = applications.len(),
            ranked = recommendations.total_applicants,
            elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
            "ranked internship applicants"
        );

        Ok(recommendations)
    }

    /// Ranked applicants for every open internship of the company.
    ///
    /// Application fetches run concurrently and must all finish before any
    /// scoring starts. Internship order follows the source; internships
    /// without eligible applicants are kept with an empty list.
    pub async fn recommend_all(&self, company_id: &str) -> Result<Vec<InternshipRecommendations>> {
        let start = Instant::now();

        if !self.source.company_exists(company_id).await? {
            return Err(RecommenderError::CompanyNotFound(company_id.to_string()));
        }

        let internships = self.source.open_internships(company_id).await?;
        let fetches = internships
            .iter()
            .map(|internship| self.source.eligible_applications(&internship.id));
        let applications = try_join_all(fetches).await?;

        let recommendations: Vec<InternshipRecommendations> = internships
            .iter()
            .zip(applications.iter())
            .map(|(internship, apps)| self.ranker.recommend(internship, apps))
            .collect();

        tracing::info!(
            company_id,
            internships = recommendations.len(),
            applicants = recommendations.iter().map(|r| r.total_applicants).sum::<usize>(),
            elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
            "ranked open internships"
        );

        Ok(recommendations)
    }

    /// Score and keyword breakdown for a single application of the company
    pub async fn analyze_applicant(
        &self,
        company_id: &str,
        application_id: &str,
    ) -> Result<ApplicantAnalysis> {
        let application = self
            .source
            .application(company_id, application_id)
            .await?
            .ok_or_else(|| RecommenderError::ApplicationNotFound(application_id.to_string()))?;

        let internship = self
            .source
            .internship(company_id, &application.internship_id)
            .await?
            .ok_or_else(|| RecommenderError::InternshipNotFound(application.internship_id.clone()))?;

        let applicant = self
            .ranker
            .score_application(&internship, &application)
            .ok_or_else(|| RecommenderError::Source {
                source_name: self.source.name().to_string(),
                message: format!(
                    "student '{}' of application '{}' could not be resolved",
                    application.student_id, application.id
                ),
            })?;

        let requirement_keywords =
            extract_keywords(internship.requirements.as_deref().unwrap_or_default());
        let cover_letter_keywords =
            extract_keywords(application.cover_letter.as_deref().unwrap_or_default());
        let shared_keywords = requirement_keywords
            .iter()
            .filter(|k| cover_letter_keywords.contains(k))
            .cloned()
            .collect();

        tracing::debug!(
            company_id,
            application_id,
            score = applicant.overall_score(),
            "analyzed applicant"
        );

        Ok(ApplicantAnalysis {
            applicant,
            internship: ApplicantAnalysis::summarize(&internship),
            requirement_keywords,
            cover_letter_keywords,
            shared_keywords,
        })
    }

    /// Score raw inputs without touching the source
    pub fn score(&self, request: ScoringRequest) -> RecommendationScore {
        self.ranker.aggregator().score_request(request)
    }
}
