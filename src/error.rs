use thiserror::Error;

/// Main error type for the recommendation engine
#[derive(Error, Debug)]
pub enum RecommenderError {
    /// Database errors
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML configuration parse errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// File system errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Applicant source (persistence collaborator) errors
    #[error("Source '{source_name}' error: {message}")]
    Source { source_name: String, message: String },

    /// Company does not exist
    #[error("Company not found: {0}")]
    CompanyNotFound(String),

    /// Internship does not exist or is not owned by the company
    #[error("Internship not found or does not belong to company: {0}")]
    InternshipNotFound(String),

    /// Application does not exist or is not owned by the company
    #[error("Application not found or does not belong to company: {0}")]
    ApplicationNotFound(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

impl RecommenderError {
    /// True for the lookup failures a caller should surface as "not found"
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            RecommenderError::CompanyNotFound(_)
                | RecommenderError::InternshipNotFound(_)
                | RecommenderError::ApplicationNotFound(_)
        )
    }
}

impl From<String> for RecommenderError {
    fn from(s: String) -> Self {
        RecommenderError::Other(s)
    }
}

impl From<&str> for RecommenderError {
    fn from(s: &str) -> Self {
        RecommenderError::Other(s.to_string())
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, RecommenderError>;
