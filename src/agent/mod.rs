//! Negotiating parties
//!
//! An [`Agent`] binds a [`Role`] to its private [`Preferences`] and the
//! role's fixed [`RoleProfile`]. Scoring, offer generation and the accept
//! decision all dispatch on the role.

pub mod strategy;
pub mod utility;

pub use utility::UtilityBreakdown;

use crate::config::{NegotiationConfig, RoleProfile, DEFAULT_BUDGET_SENSITIVITY};
use crate::error::Result;
use crate::types::{Offer, Preferences, Role, ServiceLevel};

/// A party in the negotiation
#[derive(Clone, Debug, PartialEq)]
pub struct Agent {
    role: Role,
    preferences: Preferences,
    profile: RoleProfile,
    budget_sensitivity: f64,
}

impl Agent {
    /// Create an agent with the default tables for its role
    pub fn new(role: Role, preferences: Preferences) -> Result<Self> {
        preferences.validate()?;
        Ok(Self {
            role,
            preferences,
            profile: RoleProfile::for_role(role),
            budget_sensitivity: DEFAULT_BUDGET_SENSITIVITY,
        })
    }

    /// Create an agent whose tables come from a configuration
    pub fn with_config(
        role: Role,
        preferences: Preferences,
        config: &NegotiationConfig,
    ) -> Result<Self> {
        config.validate()?;
        preferences.validate()?;
        Ok(Self {
            role,
            preferences,
            profile: *config.profile(role),
            budget_sensitivity: config.budget_sensitivity,
        })
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    pub fn profile(&self) -> &RoleProfile {
        &self.profile
    }

    pub fn budget_sensitivity(&self) -> f64 {
        self.budget_sensitivity
    }

    pub fn acceptance_threshold(&self) -> f64 {
        self.profile.acceptance_threshold
    }

    pub fn budget_utility(&self, budget: f64) -> Result<f64> {
        utility::budget_utility(
            self.role,
            &self.preferences,
            self.budget_sensitivity,
            budget,
        )
    }

    pub fn services_utility(&self, level: ServiceLevel) -> f64 {
        utility::services_utility(&self.profile, level)
    }

    pub fn timeline_utility(&self, timeline: f64) -> f64 {
        utility::timeline_utility(self.role, &self.preferences, timeline)
    }

    /// Component utilities and weighted total of an offer
    pub fn utility_breakdown(&self, offer: &Offer) -> Result<UtilityBreakdown> {
        utility::score(
            self.role,
            &self.preferences,
            &self.profile,
            self.budget_sensitivity,
            offer,
        )
    }

    /// Total utility of an offer
    pub fn total_utility(&self, offer: &Offer) -> Result<f64> {
        Ok(self.utility_breakdown(offer)?.total)
    }

    /// Opening offer, or a concession on `previous`
    pub fn generate_offer(&self, previous: Option<&Offer>) -> Offer {
        strategy::next_offer(self.role, &self.preferences, &self.profile, previous)
    }

    /// Score an offer and decide on it
    pub fn assess(&self, offer: &Offer) -> Result<Assessment> {
        let utility = self.total_utility(offer)?;
        Ok(Assessment {
            utility,
            accepted: utility >= self.profile.acceptance_threshold,
        })
    }

    /// Accept iff the offer's total utility reaches this role's threshold
    pub fn evaluate_offer(&self, offer: &Offer) -> Result<bool> {
        Ok(self.assess(offer)?.accepted)
    }
}

/// Outcome of evaluating one offer
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Assessment {
    pub utility: f64,
    pub accepted: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NegotiationError;

    fn planner_preferences() -> Preferences {
        Preferences {
            min_budget: 10000.0,
            max_budget: 50000.0,
            optimal_budget: 40000.0,
            optimal_services: ServiceLevel::Premium,
            preferred_timeline: 4.0,
            max_timeline: 12.0,
            min_timeline: 3.0,
            optimal_timeline: 4.0,
        }
    }

    #[test]
    fn test_agent_creation() {
        let agent = Agent::new(Role::WeddingPlanner, planner_preferences()).unwrap();
        assert_eq!(agent.role(), Role::WeddingPlanner);
        assert_eq!(agent.acceptance_threshold(), 0.6);
        assert_eq!(agent.profile(), &RoleProfile::WEDDING_PLANNER);
    }

    #[test]
    fn test_agent_rejects_invalid_preferences() {
        let mut prefs = planner_preferences();
        prefs.max_budget = 5000.0;
        let err = Agent::new(Role::WeddingPlanner, prefs).unwrap_err();
        assert!(matches!(err, NegotiationError::Configuration(_)));
    }

    #[test]
    fn test_planner_accepts_own_opening() {
        let agent = Agent::new(Role::WeddingPlanner, planner_preferences()).unwrap();
        let opening = agent.generate_offer(None);
        // ln(4) * 0.6 + 0.3 + 0.1 * (2/3)
        assert!(agent.total_utility(&opening).unwrap() > 1.0);
        assert!(agent.evaluate_offer(&opening).unwrap());
    }

    #[test]
    fn test_evaluate_is_idempotent() {
        let agent = Agent::new(Role::WeddingPlanner, planner_preferences()).unwrap();
        let offer = Offer::new(16537.5, ServiceLevel::Standard, 4.86);
        let first = agent.evaluate_offer(&offer).unwrap();
        let second = agent.evaluate_offer(&offer).unwrap();
        assert_eq!(first, second);
        assert!(first);
    }

    #[test]
    fn test_evaluate_propagates_domain_error() {
        let agent = Agent::new(Role::WeddingPlanner, planner_preferences()).unwrap();
        let offer = Offer::new(0.0, ServiceLevel::Standard, 4.0);
        assert!(matches!(
            agent.evaluate_offer(&offer),
            Err(NegotiationError::ArithmeticDomain { .. })
        ));
    }

    #[test]
    fn test_with_config_uses_configured_threshold() {
        let mut config = NegotiationConfig::default();
        config.wedding_planner.acceptance_threshold = 0.9;
        let agent =
            Agent::with_config(Role::WeddingPlanner, planner_preferences(), &config).unwrap();
        assert_eq!(agent.acceptance_threshold(), 0.9);
    }
}
