//! Model constants and negotiation configuration

use crate::error::{NegotiationError, Result};
use crate::types::{Role, ServiceLevel};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default round cap
pub const DEFAULT_MAX_ROUNDS: u32 = 10;

/// Default logistic scale for the customer's budget utility
pub const DEFAULT_BUDGET_SENSITIVITY: f64 = 5000.0;

const WEIGHT_TOLERANCE: f64 = 1e-9;

/// Weight of each dimension in the total utility
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct UtilityWeights {
    pub budget: f64,
    pub services: f64,
    pub timeline: f64,
}

impl UtilityWeights {
    pub fn sum(&self) -> f64 {
        self.budget + self.services + self.timeline
    }
}

/// Utility of each service level
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ServiceUtilities {
    pub premium: f64,
    pub standard: f64,
    pub basic: f64,
}

impl ServiceUtilities {
    pub fn lookup(&self, level: ServiceLevel) -> f64 {
        match level {
            ServiceLevel::Premium => self.premium,
            ServiceLevel::Standard => self.standard,
            ServiceLevel::Basic => self.basic,
        }
    }
}

/// Fixed per-role tables: weights, service utilities, threshold and concession steps
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoleProfile {
    pub weights: UtilityWeights,
    pub service_utilities: ServiceUtilities,
    pub acceptance_threshold: f64,
    /// Budget multiplier per customer concession. Only the customer concedes
    /// on budget; the planner's value must stay 1.0.
    pub budget_step: f64,
    /// Timeline multiplier per planner concession. Only the planner concedes
    /// on timeline; the customer's value must stay 1.0.
    pub timeline_step: f64,
}

impl RoleProfile {
    pub const CUSTOMER: RoleProfile = RoleProfile {
        weights: UtilityWeights {
            budget: 0.5,
            services: 0.3,
            timeline: 0.2,
        },
        service_utilities: ServiceUtilities {
            premium: 1.0,
            standard: 0.7,
            basic: 0.4,
        },
        acceptance_threshold: 0.8,
        budget_step: 1.05,
        timeline_step: 1.0,
    };

    pub const WEDDING_PLANNER: RoleProfile = RoleProfile {
        weights: UtilityWeights {
            budget: 0.6,
            services: 0.3,
            timeline: 0.1,
        },
        service_utilities: ServiceUtilities {
            premium: 1.0,
            standard: 0.8,
            basic: 0.5,
        },
        acceptance_threshold: 0.6,
        budget_step: 1.0,
        timeline_step: 0.9,
    };

    /// Default table for a role
    pub fn for_role(role: Role) -> Self {
        match role {
            Role::Customer => Self::CUSTOMER,
            Role::WeddingPlanner => Self::WEDDING_PLANNER,
        }
    }

    pub fn validate(&self, role: Role) -> Result<()> {
        let sum = self.weights.sum();
        if (sum - 1.0).abs() > WEIGHT_TOLERANCE {
            return Err(NegotiationError::InvalidConfig(format!(
                "{} weights must sum to 1.0, got {}",
                role, sum
            )));
        }

        let s = &self.service_utilities;
        if !(s.premium >= s.standard && s.standard >= s.basic) {
            return Err(NegotiationError::InvalidConfig(format!(
                "{} service utilities must satisfy premium >= standard >= basic",
                role
            )));
        }

        if !self.acceptance_threshold.is_finite() {
            return Err(NegotiationError::InvalidConfig(format!(
                "{} acceptance threshold must be finite",
                role
            )));
        }

        match role {
            Role::Customer => {
                if !(self.budget_step >= 1.0 && self.budget_step.is_finite()) {
                    return Err(NegotiationError::InvalidConfig(format!(
                        "{} budget_step must be at least 1, got {}",
                        role, self.budget_step
                    )));
                }
                if self.timeline_step != 1.0 {
                    return Err(NegotiationError::InvalidConfig(format!(
                        "{} does not concede on timeline, timeline_step must be 1",
                        role
                    )));
                }
            }
            Role::WeddingPlanner => {
                if !(0.0..=1.0).contains(&self.timeline_step) {
                    return Err(NegotiationError::InvalidConfig(format!(
                        "{} timeline_step must be within [0, 1], got {}",
                        role, self.timeline_step
                    )));
                }
                if self.budget_step != 1.0 {
                    return Err(NegotiationError::InvalidConfig(format!(
                        "{} does not concede on budget, budget_step must be 1",
                        role
                    )));
                }
            }
        }

        Ok(())
    }
}

/// How rounds attribute and evaluate offers
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProtocolMode {
    /// Historical bookkeeping: the responder may evaluate the offer it produced itself
    /// and the round is credited to the proposer-in-waiting.
    #[default]
    Legacy,
    /// Each role only evaluates the counterpart's latest proposal.
    StrictAlternation,
}

/// Negotiation configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NegotiationConfig {
    pub max_rounds: u32,
    pub budget_sensitivity: f64,
    pub protocol: ProtocolMode,
    pub customer: RoleProfile,
    pub wedding_planner: RoleProfile,
}

impl Default for NegotiationConfig {
    fn default() -> Self {
        Self {
            max_rounds: DEFAULT_MAX_ROUNDS,
            budget_sensitivity: DEFAULT_BUDGET_SENSITIVITY,
            protocol: ProtocolMode::default(),
            customer: RoleProfile::CUSTOMER,
            wedding_planner: RoleProfile::WEDDING_PLANNER,
        }
    }
}

impl NegotiationConfig {
    /// Profile used by a role
    pub fn profile(&self, role: Role) -> &RoleProfile {
        match role {
            Role::Customer => &self.customer,
            Role::WeddingPlanner => &self.wedding_planner,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_rounds == 0 {
            return Err(NegotiationError::InvalidConfig(
                "max_rounds must be at least 1".to_string(),
            ));
        }
        if !(self.budget_sensitivity.is_finite() && self.budget_sensitivity > 0.0) {
            return Err(NegotiationError::InvalidConfig(format!(
                "budget_sensitivity must be positive, got {}",
                self.budget_sensitivity
            )));
        }
        self.customer.validate(Role::Customer)?;
        self.wedding_planner.validate(Role::WeddingPlanner)?;
        Ok(())
    }

    /// Parse and validate configuration from JSON; absent fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: NegotiationConfig = serde_json::from_str(json)
            .map_err(|e| NegotiationError::Configuration(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_constants() {
        let config = NegotiationConfig::default();
        assert_eq!(config.max_rounds, 10);
        assert_eq!(config.budget_sensitivity, 5000.0);
        assert_eq!(config.protocol, ProtocolMode::Legacy);
        assert_eq!(config.customer.acceptance_threshold, 0.8);
        assert_eq!(config.wedding_planner.acceptance_threshold, 0.6);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_weights_sum_to_one() {
        for role in [Role::Customer, Role::WeddingPlanner] {
            let sum = RoleProfile::for_role(role).weights.sum();
            assert!((sum - 1.0).abs() < 1e-12, "{} weights sum to {}", role, sum);
        }
    }

    #[test]
    fn test_service_lookup_is_monotone() {
        for role in [Role::Customer, Role::WeddingPlanner] {
            let table = RoleProfile::for_role(role).service_utilities;
            let premium = table.lookup(ServiceLevel::Premium);
            let standard = table.lookup(ServiceLevel::Standard);
            let basic = table.lookup(ServiceLevel::Basic);
            assert!(premium >= standard && standard >= basic);
        }
    }

    #[test]
    fn test_rejects_unbalanced_weights() {
        let mut config = NegotiationConfig::default();
        config.customer.weights.budget = 0.6;
        assert!(matches!(
            config.validate(),
            Err(NegotiationError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_rejects_steps_for_unused_dimension() {
        let mut config = NegotiationConfig::default();
        config.customer.timeline_step = 0.8;
        assert!(matches!(
            config.validate(),
            Err(NegotiationError::InvalidConfig(_))
        ));

        let mut config = NegotiationConfig::default();
        config.wedding_planner.budget_step = 1.1;
        assert!(matches!(
            config.validate(),
            Err(NegotiationError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_accepts_custom_steps_for_conceding_dimension() {
        let mut config = NegotiationConfig::default();
        config.customer.budget_step = 1.1;
        config.wedding_planner.timeline_step = 0.5;
        assert!(config.validate().is_ok());

        config.customer.budget_step = 0.95;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_rounds() {
        let config = NegotiationConfig {
            max_rounds: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config =
            NegotiationConfig::from_json(r#"{"max_rounds": 4, "protocol": "strict_alternation"}"#)
                .unwrap();
        assert_eq!(config.max_rounds, 4);
        assert_eq!(config.protocol, ProtocolMode::StrictAlternation);
        assert_eq!(config.budget_sensitivity, DEFAULT_BUDGET_SENSITIVITY);
        assert_eq!(config.customer, RoleProfile::CUSTOMER);
    }

    #[test]
    fn test_malformed_json() {
        let err = NegotiationConfig::from_json("{max_rounds: }").unwrap_err();
        assert!(matches!(err, NegotiationError::Configuration(_)));
    }
}
