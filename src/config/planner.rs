//! Conversation and itinerary tuning

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::conversation::DEFAULT_READINESS_THRESHOLD;

/// Planner configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct PlannerConfig {
    /// Preferences required before the itinerary is offered
    #[serde(default = "default_readiness_threshold")]
    pub readiness_threshold: usize,

    /// Output budget for a conversational turn
    #[serde(default = "default_turn_max_tokens")]
    pub turn_max_tokens: u32,

    /// Output budget for the itinerary
    #[serde(default = "default_summary_max_tokens")]
    pub summary_max_tokens: u32,

    /// Sampling temperature for both calls
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

impl PlannerConfig {
    /// Validate planner configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.readiness_threshold == 0 {
            return Err(ValidationError::InvalidReadinessThreshold);
        }
        if self.turn_max_tokens == 0 {
            return Err(ValidationError::InvalidTokenBudget("turn"));
        }
        if self.summary_max_tokens == 0 {
            return Err(ValidationError::InvalidTokenBudget("summary"));
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ValidationError::InvalidTemperature);
        }
        Ok(())
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            readiness_threshold: default_readiness_threshold(),
            turn_max_tokens: default_turn_max_tokens(),
            summary_max_tokens: default_summary_max_tokens(),
            temperature: default_temperature(),
        }
    }
}

fn default_readiness_threshold() -> usize {
    DEFAULT_READINESS_THRESHOLD
}

fn default_turn_max_tokens() -> u32 {
    400
}

fn default_summary_max_tokens() -> u32 {
    20_000
}

fn default_temperature() -> f32 {
    0.7
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_planner_defaults() {
        let config = PlannerConfig::default();
        assert_eq!(config.readiness_threshold, 4);
        assert_eq!(config.turn_max_tokens, 400);
        assert_eq!(config.summary_max_tokens, 20_000);
        assert_eq!(config.temperature, 0.7);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_zero_threshold() {
        let config = PlannerConfig {
            readiness_threshold: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidReadinessThreshold));
    }

    #[test]
    fn test_rejects_out_of_range_temperature() {
        let config = PlannerConfig {
            temperature: 2.5,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidTemperature));
    }

    #[test]
    fn test_rejects_empty_budgets() {
        let config = PlannerConfig {
            summary_max_tokens: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidTokenBudget("summary")));
    }
}
