use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use internship_recommender::{
    ApplicantAnalysis, EngineConfig, InternshipRecommendations, RecommendationEngine,
    RecommendationScore, RecommenderError, ScoringRequest,
};

#[derive(Clone)]
struct AppState {
    engine: Arc<RecommendationEngine>,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: String,
    version: String,
    source: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RecommendationsResponse {
    total_internships: usize,
    recommendations: Vec<InternshipRecommendations>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "recommender_server=debug,internship_recommender=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = EngineConfig::load(None)?;

    tracing::info!("🚀 Starting Internship Recommender Server");
    tracing::info!("⚙️ Config: {}", config);

    let engine = RecommendationEngine::open(&config).await?;

    let state = AppState {
        engine: Arc::new(engine),
    };

    // Build router
    let app = Router::new()
        .route("/health", get(health_handler))
        .route("/v1/score", post(score_handler))
        .route(
            "/v1/companies/:company_id/recommendations",
            get(recommend_all_handler),
        )
        .route(
            "/v1/companies/:company_id/recommendations/:internship_id",
            get(recommend_internship_handler),
        )
        .route(
            "/v1/companies/:company_id/applications/:application_id/analysis",
            get(analyze_handler),
        )
        .layer(CorsLayer::permissive())
        .with_state(state);

    // Start server
    let addr = config.bind_address();
    tracing::info!("🎓 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: internship_recommender::VERSION.to_string(),
        source: state.engine.source_name().to_string(),
    })
}

async fn score_handler(
    State(state): State<AppState>,
    Json(req): Json<ScoringRequest>,
) -> Json<RecommendationScore> {
    Json(state.engine.score(req))
}

async fn recommend_all_handler(
    State(state): State<AppState>,
    Path(company_id): Path<String>,
) -> Result<Json<RecommendationsResponse>, AppError> {
    let recommendations = state.engine.recommend_all(&company_id).await?;

    tracing::info!(
        "✅ {} → {} open internships",
        company_id,
        recommendations.len()
    );

    Ok(Json(RecommendationsResponse {
        total_internships: recommendations.len(),
        recommendations,
    }))
}

async fn recommend_internship_handler(
    State(state): State<AppState>,
    Path((company_id, internship_id)): Path<(String, String)>,
) -> Result<Json<InternshipRecommendations>, AppError> {
    let recs = state
        .engine
        .recommend_for_internship(&company_id, &internship_id)
        .await?;

    tracing::info!(
        "✅ {} → {} applicants ranked",
        internship_id,
        recs.total_applicants
    );

    Ok(Json(recs))
}

async fn analyze_handler(
    State(state): State<AppState>,
    Path((company_id, application_id)): Path<(String, String)>,
) -> Result<Json<ApplicantAnalysis>, AppError> {
    let analysis = state
        .engine
        .analyze_applicant(&company_id, &application_id)
        .await?;
    Ok(Json(analysis))
}

// Error handling
struct AppError(RecommenderError);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            e if e.is_not_found() => StatusCode::NOT_FOUND,
            RecommenderError::Source { .. } => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let message = self.0.to_string();

        tracing::error!("❌ Error: {} - {}", status, message);

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<RecommenderError>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
