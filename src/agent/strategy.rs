//! Offer generation and concessions

use crate::config::RoleProfile;
use crate::types::{Offer, Preferences, Role, ServiceLevel};

/// Next offer a role makes.
///
/// Without a previous offer the role opens with its optimal terms. Afterwards
/// the customer only raises the budget (capped at `max_budget`) and lifts Basic
/// services to Standard; the planner only shortens the timeline (floored at
/// `min_timeline`).
pub fn next_offer(
    role: Role,
    preferences: &Preferences,
    profile: &RoleProfile,
    previous: Option<&Offer>,
) -> Offer {
    let Some(previous) = previous else {
        return preferences.opening_offer();
    };

    match role {
        Role::Customer => Offer {
            budget: (previous.budget * profile.budget_step).min(preferences.max_budget),
            services: match previous.services {
                ServiceLevel::Basic => ServiceLevel::Standard,
                other => other,
            },
            timeline: previous.timeline,
        },
        Role::WeddingPlanner => Offer {
            budget: previous.budget,
            services: previous.services,
            timeline: (previous.timeline * profile.timeline_step).max(preferences.min_timeline),
        },
    }
}
