use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{RecommenderError, Result};
use crate::scoring::ScoringConfig;

/// Environment variable naming a YAML config file
pub const CONFIG_PATH_ENV: &str = "RECOMMENDER_CONFIG";

/// Engine and binary configuration.
///
/// Resolution order: defaults, then the YAML file, then environment
/// variables (`DB_PATH`, `HOST`, `PORT`, `SKILL_WEIGHT`, `TEXT_WEIGHT`,
/// `EDUCATION_WEIGHT`, `HIGH_GPA_THRESHOLD`).
///
/// ```yaml
/// database_path: recommender.db
/// port: 8090
/// scoring:
///   weights: { skill: 0.5, text: 0.3, education: 0.2 }
///   education: { high_achievement_threshold: 3.5 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub database_path: String,
    pub host: String,
    pub port: u16,
    pub scoring: ScoringConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            database_path: "recommender.db".to_string(),
            host: "0.0.0.0".to_string(),
            port: 8090,
            scoring: ScoringConfig::default(),
        }
    }
}

fn parse_env<T: std::str::FromStr>(name: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| RecommenderError::Config(format!("{} has an invalid value: '{}'", name, value)))
}

impl EngineConfig {
    /// Parse a YAML document; missing keys keep their defaults
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let yaml = std::fs::read_to_string(path)?;
        Self::from_yaml(&yaml)
    }

    /// Load from `path` (or `$RECOMMENDER_CONFIG`), apply environment
    /// overrides and validate
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let env_path = std::env::var(CONFIG_PATH_ENV).ok();
        let path = path.or_else(|| env_path.as_deref().map(Path::new));

        let mut config = match path {
            Some(path) => {
                tracing::debug!("Loading config from {}", path.display());
                Self::from_file(path)?
            }
            None => Self::default(),
        };

        config.apply_overrides(|name| std::env::var(name).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from a variable lookup (the process environment in
    /// `load`)
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup("DB_PATH") {
            self.database_path = value;
        }
        if let Some(value) = lookup("HOST") {
            self.host = value;
        }
        if let Some(value) = lookup("PORT") {
            self.port = parse_env("PORT", &value)?;
        }
        if let Some(value) = lookup("SKILL_WEIGHT") {
            self.scoring.weights.skill = parse_env("SKILL_WEIGHT", &value)?;
        }
        if let Some(value) = lookup("TEXT_WEIGHT") {
            self.scoring.weights.text = parse_env("TEXT_WEIGHT", &value)?;
        }
        if let Some(value) = lookup("EDUCATION_WEIGHT") {
            self.scoring.weights.education = parse_env("EDUCATION_WEIGHT", &value)?;
        }
        if let Some(value) = lookup("HIGH_GPA_THRESHOLD") {
            self.scoring.education.high_achievement_threshold =
                parse_env("HIGH_GPA_THRESHOLD", &value)?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.database_path.trim().is_empty() {
            return Err(RecommenderError::Config("database_path must not be empty".to_string()));
        }
        self.scoring.validate()
    }

    /// `host:port` for the HTTP listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl std::fmt::Display for EngineConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let weights = self.scoring.weights;
        write!(
            f,
            "db={}, bind={}, weights=skill:{}/text:{}/education:{}, gpa_threshold={}",
            self.database_path,
            self.bind_address(),
            weights.skill,
            weights.text,
            weights.education,
            self.scoring.education.high_achievement_threshold
        )
    }
}
