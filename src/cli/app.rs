//! Simulation application wiring preferences, configuration and the engine

use crate::agent::{Agent, UtilityBreakdown};
use crate::config::NegotiationConfig;
use crate::error::Result;
use crate::negotiation::{NegotiationEngine, NegotiationOutcome};
use crate::types::{Offer, Preferences, Role, ServiceLevel};
use std::fmt::Write as _;
use std::path::Path;

/// Example preferences for a role
pub fn example_preferences(role: Role) -> Preferences {
    match role {
        Role::Customer => Preferences {
            min_budget: 10000.0,
            max_budget: 50000.0,
            optimal_budget: 15000.0,
            optimal_services: ServiceLevel::Standard,
            preferred_timeline: 6.0,
            max_timeline: 12.0,
            min_timeline: 3.0,
            optimal_timeline: 6.0,
        },
        Role::WeddingPlanner => Preferences {
            min_budget: 10000.0,
            max_budget: 50000.0,
            optimal_budget: 40000.0,
            optimal_services: ServiceLevel::Premium,
            preferred_timeline: 4.0,
            max_timeline: 12.0,
            min_timeline: 3.0,
            optimal_timeline: 4.0,
        },
    }
}

fn load_preferences(role: Role, path: Option<&Path>) -> Result<Preferences> {
    match path {
        Some(path) => {
            tracing::debug!("Loading {} preferences from {}", role, path.display());
            Preferences::from_file(path)
        }
        None => Ok(example_preferences(role)),
    }
}

fn load_config(path: Option<&Path>) -> Result<NegotiationConfig> {
    match path {
        Some(path) => {
            tracing::debug!("Loading configuration from {}", path.display());
            NegotiationConfig::from_file(path)
        }
        None => Ok(NegotiationConfig::default()),
    }
}

/// Single offer evaluation report
#[derive(Clone, Debug)]
pub struct Evaluation {
    pub role: Role,
    pub offer: Offer,
    pub breakdown: UtilityBreakdown,
    pub threshold: f64,
    pub accepted: bool,
}

/// Main simulation application
pub struct NegotiationApp {
    config: NegotiationConfig,
    customer: Preferences,
    wedding_planner: Preferences,
}

impl NegotiationApp {
    pub fn new(
        config: NegotiationConfig,
        customer: Preferences,
        wedding_planner: Preferences,
    ) -> Self {
        Self {
            config,
            customer,
            wedding_planner,
        }
    }

    /// Build an application from optional files, falling back to the examples
    pub fn from_files(
        customer: Option<&Path>,
        wedding_planner: Option<&Path>,
        config: Option<&Path>,
    ) -> Result<Self> {
        Ok(Self::new(
            load_config(config)?,
            load_preferences(Role::Customer, customer)?,
            load_preferences(Role::WeddingPlanner, wedding_planner)?,
        ))
    }

    pub fn config(&self) -> &NegotiationConfig {
        &self.config
    }

    fn agent(&self, role: Role) -> Result<Agent> {
        let preferences = match role {
            Role::Customer => self.customer.clone(),
            Role::WeddingPlanner => self.wedding_planner.clone(),
        };
        Agent::with_config(role, preferences, &self.config)
    }

    /// Run one negotiation
    pub fn run(&self) -> Result<NegotiationOutcome> {
        let mut engine = NegotiationEngine::with_config(
            self.agent(Role::Customer)?,
            self.agent(Role::WeddingPlanner)?,
            &self.config,
        )?;
        engine.run()
    }

    /// Score an offer from one role's perspective
    pub fn evaluate(&self, role: Role, offer: Offer) -> Result<Evaluation> {
        let agent = self.agent(role)?;
        let breakdown = agent.utility_breakdown(&offer)?;
        let accepted = agent.evaluate_offer(&offer)?;
        Ok(Evaluation {
            role,
            offer,
            breakdown,
            threshold: agent.acceptance_threshold(),
            accepted,
        })
    }
}

/// Human-readable report of a finished negotiation
pub fn render_outcome(outcome: &NegotiationOutcome) -> Result<String> {
    let mut out = String::new();

    writeln!(out, "Initial Offers:")?;
    writeln!(out, "  Customer Offer: {}", outcome.customer_opening)?;
    writeln!(out, "  Wedding Planner Offer: {}", outcome.planner_opening)?;

    writeln!(out, "\nNegotiation History:")?;
    for round in &outcome.history {
        writeln!(
            out,
            "  Round {}: {} offered {} ({} utility {:.4}, {})",
            round.round_number,
            round.offering_role,
            round.offer,
            round.evaluated_by,
            round.utility,
            verdict(round.accepted)
        )?;
    }

    match &outcome.agreement {
        Some(offer) => {
            writeln!(out, "\nAgreement Reached!")?;
            writeln!(out, "  Final Offer: {}", offer)?;
            writeln!(out, "  Total Rounds: {}", outcome.rounds)?;
        }
        None => {
            writeln!(
                out,
                "\nNegotiation Failed: Max Rounds Reached ({})",
                outcome.rounds
            )?;
        }
    }
    writeln!(out, "  Transcript: {}", outcome.history.digest()?)?;

    Ok(out)
}

fn verdict(accepted: bool) -> &'static str {
    if accepted {
        "accepted"
    } else {
        "rejected"
    }
}

/// Human-readable report of a single evaluation
pub fn render_evaluation(evaluation: &Evaluation) -> String {
    let b = &evaluation.breakdown;
    let decision = if evaluation.accepted {
        "accept"
    } else {
        "reject"
    };
    [
        format!("{} evaluates {}", evaluation.role, evaluation.offer),
        format!("  budget utility:   {:.4}", b.budget),
        format!("  services utility: {:.4}", b.services),
        format!("  timeline utility: {:.4}", b.timeline),
        format!(
            "  total utility:    {:.4} (threshold {:.2})",
            b.total, evaluation.threshold
        ),
        format!("  decision: {}", decision),
    ]
    .join("\n")
}
