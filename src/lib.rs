//! # Internship Recommender
//!
//! Ranks a company's internship applicants with:
//! - Skill matching (case-insensitive, substring tolerant)
//! - Requirements vs cover letter Jaccard similarity
//! - Education relevance with a high-achievement bonus
//! - Weighted aggregation (50/30/20 by default) and a readable match reason
//! - Pluggable applicant sources (SQLite, in-memory fixtures)
//! - Multiple interfaces: Rust library, HTTP API, CLI
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use internship_recommender::{EngineConfig, RecommendationEngine};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let engine = RecommendationEngine::open(&EngineConfig::default()).await?;
//!
//!     let recs = engine.recommend_for_internship("company-1", "internship-42").await?;
//!
//!     for applicant in &recs.applicants {
//!         println!("{} - {}", applicant.student_name, applicant.recommendation.match_reason);
//!     }
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod core;
pub mod engine;
pub mod error;
pub mod matching;
pub mod providers;
pub mod ranking;
pub mod scoring;

// Re-export primary types
pub use config::EngineConfig;
pub use crate::core::{
    ApplicantAnalysis, Application, ApplicationStatus, Dataset, EducationEntry, Internship,
    InternshipRecommendations, RankedApplicant, StudentProfile,
};
pub use engine::RecommendationEngine;
pub use error::{RecommenderError, Result};
pub use providers::{ApplicantSource, MemorySource, SqliteStore};
pub use ranking::RecommendationRanker;
pub use scoring::{
    RecommendationScore, ScoreAggregator, ScoringConfig, ScoringParams, ScoringRequest,
    ScoringWeights,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
