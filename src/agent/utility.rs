//! Role-specific utility functions
//!
//! Every function here is pure: the score of an offer depends only on the
//! offer, the scoring party's preferences and its fixed profile.

use crate::config::{RoleProfile, UtilityWeights};
use crate::error::{NegotiationError, Result};
use crate::types::{Offer, Preferences, Role, ServiceLevel};
use serde::{Deserialize, Serialize};

/// Budget component.
///
/// The customer's satisfaction decays logistically around `min_budget`
/// (0.5 exactly at `min_budget`). The planner's grows as `ln(budget / min_budget)`,
/// which is negative below `min_budget` and unbounded above.
pub fn budget_utility(
    role: Role,
    preferences: &Preferences,
    sensitivity: f64,
    budget: f64,
) -> Result<f64> {
    match role {
        Role::Customer => {
            let exponent = (budget - preferences.min_budget) / sensitivity;
            Ok(1.0 / (1.0 + exponent.exp()))
        }
        Role::WeddingPlanner => {
            let utility = (budget / preferences.min_budget).ln();
            if utility.is_finite() {
                Ok(utility)
            } else {
                Err(NegotiationError::ArithmeticDomain {
                    budget,
                    min_budget: preferences.min_budget,
                })
            }
        }
    }
}

/// Services component: a fixed lookup per role
pub fn services_utility(profile: &RoleProfile, level: ServiceLevel) -> f64 {
    profile.service_utilities.lookup(level)
}

/// Timeline component.
///
/// The customer penalises distance from its preferred timeline in either
/// direction; the planner simply prefers shorter timelines.
pub fn timeline_utility(role: Role, preferences: &Preferences, timeline: f64) -> f64 {
    match role {
        Role::Customer => {
            1.0 - ((timeline - preferences.preferred_timeline) / preferences.max_timeline).abs()
        }
        Role::WeddingPlanner => 1.0 - timeline / preferences.max_timeline,
    }
}

/// Component utilities of one offer, and their weighted total
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct UtilityBreakdown {
    pub budget: f64,
    pub services: f64,
    pub timeline: f64,
    pub total: f64,
}

impl UtilityBreakdown {
    pub fn weighted(weights: &UtilityWeights, budget: f64, services: f64, timeline: f64) -> Self {
        Self {
            budget,
            services,
            timeline,
            total: weights.budget * budget
                + weights.services * services
                + weights.timeline * timeline,
        }
    }
}

/// Score an offer from one role's perspective
pub fn score(
    role: Role,
    preferences: &Preferences,
    profile: &RoleProfile,
    sensitivity: f64,
    offer: &Offer,
) -> Result<UtilityBreakdown> {
    let budget = budget_utility(role, preferences, sensitivity, offer.budget)?;
    let services = services_utility(profile, offer.services);
    let timeline = timeline_utility(role, preferences, offer.timeline);
    Ok(UtilityBreakdown::weighted(
        &profile.weights,
        budget,
        services,
        timeline,
    ))
}
