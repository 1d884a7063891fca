use serde::{Deserialize, Serialize};

use crate::error::{RecommenderError, Result};
use crate::matching::EducationPolicy;
use crate::scoring::explain::TierThresholds;

/// Share of each matcher's 0-100 score in the aggregate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    pub skill: f64,
    pub text: f64,
    pub education: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            skill: 0.5,
            text: 0.3,
            education: 0.2,
        }
    }
}

impl ScoringWeights {
    pub fn sum(&self) -> f64 {
        self.skill + self.text + self.education
    }

    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("skill", self.skill),
            ("text", self.text),
            ("education", self.education),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(RecommenderError::Config(format!(
                    "{} weight must be a non-negative number, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

/// Everything the aggregator needs besides its inputs
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub weights: ScoringWeights,
    pub education: EducationPolicy,
    pub tiers: TierThresholds,
}

impl ScoringConfig {
    pub fn with_weights(weights: ScoringWeights) -> Self {
        Self {
            weights,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.weights.validate()?;
        if !self.education.high_achievement_threshold.is_finite() {
            return Err(RecommenderError::Config(
                "high achievement threshold must be a finite number".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights_sum_to_one() {
        let weights = ScoringWeights::default();
        assert!((weights.sum() - 1.0).abs() < 1e-9);
        assert!(weights.validate().is_ok());
    }

    #[test]
    fn test_negative_weight_rejected() {
        let weights = ScoringWeights {
            skill: -0.1,
            ..ScoringWeights::default()
        };
        assert!(matches!(weights.validate(), Err(RecommenderError::Config(_))));
    }

    #[test]
    fn test_nan_threshold_rejected() {
        let mut config = ScoringConfig::default();
        config.education.high_achievement_threshold = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config: ScoringConfig = serde_yaml::from_str("weights:\n  skill: 0.7\n").unwrap();
        assert_eq!(config.weights.skill, 0.7);
        assert_eq!(config.weights.text, 0.3);
        assert_eq!(config.education.high_achievement_threshold, 3.5);
        assert_eq!(config.tiers, TierThresholds::default());
    }
}
