use clap::{Parser, Subcommand};
use std::path::PathBuf;

use internship_recommender::{
    Dataset, EngineConfig, InternshipRecommendations, RecommendationEngine, ScoringRequest,
    SqliteStore,
};

#[derive(Parser)]
#[command(name = "recommender-cli")]
#[command(about = "Internship Recommender CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Database path (overrides config and DB_PATH)
    #[arg(short, long, global = true)]
    db: Option<String>,

    /// YAML config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Print JSON instead of a summary
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Import companies, internships, students and applications from JSON
    Import {
        /// Dataset file
        file: PathBuf,
    },

    /// Rank applicants of one internship
    Rank {
        #[arg(long)]
        company: String,

        #[arg(long)]
        internship: String,
    },

    /// Rank applicants of every open internship of a company
    RankAll {
        #[arg(long)]
        company: String,
    },

    /// Score and keyword breakdown for one application
    Analyze {
        #[arg(long)]
        company: String,

        #[arg(long)]
        application: String,
    },

    /// Score a raw scoring request (JSON file)
    Score {
        file: PathBuf,
    },
}

fn print_recommendations(recs: &InternshipRecommendations) {
    println!("\n📋 {} ({})", recs.internship_title, recs.internship_id);
    println!("   Skills: {}", recs.internship_skills.join(", "));
    println!("   Applicants: {}", recs.total_applicants);

    for (i, applicant) in recs.applicants.iter().enumerate() {
        println!(
            "   {}. {} <{}> - {}%",
            i + 1,
            applicant.student_name,
            applicant.student_email,
            applicant.overall_score()
        );
        println!("      {}", applicant.recommendation.match_reason);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let cli = Cli::parse();

    let mut config = EngineConfig::load(cli.config.as_deref())?;
    if let Some(db) = cli.db {
        config.database_path = db;
    }

    match cli.command {
        Commands::Import { file } => {
            println!("📥 Importing {}", file.display());

            let dataset = Dataset::from_json(&std::fs::read_to_string(&file)?)?;
            let store = SqliteStore::new(&config.database_path).await?;
            store.import(&dataset).await?;
            let stats = store.stats().await?;

            println!("✅ Store now holds:");
            println!("   Companies: {}", stats.companies);
            println!("   Internships: {}", stats.internships);
            println!("   Students: {}", stats.students);
            println!("   Applications: {}", stats.applications);
        }

        Commands::Rank { company, internship } => {
            let engine = RecommendationEngine::open(&config).await?;
            let recs = engine.recommend_for_internship(&company, &internship).await?;

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&recs)?);
            } else {
                print_recommendations(&recs);
            }
        }

        Commands::RankAll { company } => {
            let engine = RecommendationEngine::open(&config).await?;
            let all = engine.recommend_all(&company).await?;

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&all)?);
            } else {
                println!("🔍 {} open internships for {}", all.len(), company);
                for recs in &all {
                    print_recommendations(recs);
                }
            }
        }

        Commands::Analyze { company, application } => {
            let engine = RecommendationEngine::open(&config).await?;
            let analysis = engine.analyze_applicant(&company, &application).await?;

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&analysis)?);
            } else {
                let applicant = &analysis.applicant;
                println!("🔎 {} for {}", applicant.student_name, analysis.internship.title);
                println!("   Score: {}%", applicant.overall_score());
                println!("   {}", applicant.recommendation.match_reason);
                println!(
                    "   Missing skills: {}",
                    applicant.recommendation.skill_match.missing_skills.join(", ")
                );
                println!("   Shared keywords: {}", analysis.shared_keywords.join(", "));
            }
        }

        Commands::Score { file } => {
            let request: ScoringRequest = serde_json::from_str(&std::fs::read_to_string(&file)?)?;
            let aggregator = internship_recommender::ScoreAggregator::new(config.scoring);
            let score = aggregator.score_request(request);

            println!("{}", serde_json::to_string_pretty(&score)?);
        }
    }

    Ok(())
}
