//! Negotiation engine drives the alternating-offer protocol

use crate::agent::Agent;
use crate::config::{NegotiationConfig, ProtocolMode};
use crate::error::{NegotiationError, Result};
use crate::types::{Offer, Role};

use super::history::NegotiationHistory;
use super::types::{NegotiationOutcome, NegotiationRound, NegotiationState};

/// Runs one negotiation between a customer and a wedding planner
pub struct NegotiationEngine {
    customer: Agent,
    wedding_planner: Agent,
    max_rounds: u32,
    protocol: ProtocolMode,
    state: NegotiationState,
    history: NegotiationHistory,
}

impl NegotiationEngine {
    /// Create new engine with the default round cap and protocol
    pub fn new(customer: Agent, wedding_planner: Agent) -> Result<Self> {
        Self::with_config(customer, wedding_planner, &NegotiationConfig::default())
    }

    /// Create new engine using the round cap and protocol from `config`.
    ///
    /// Both agents must have been built with the same role tables and budget
    /// sensitivity as `config`.
    pub fn with_config(
        customer: Agent,
        wedding_planner: Agent,
        config: &NegotiationConfig,
    ) -> Result<Self> {
        config.validate()?;
        check_seat(&customer, Role::Customer)?;
        check_seat(&wedding_planner, Role::WeddingPlanner)?;
        check_tables(&customer, config)?;
        check_tables(&wedding_planner, config)?;

        Ok(Self {
            customer,
            wedding_planner,
            max_rounds: config.max_rounds,
            protocol: config.protocol,
            state: NegotiationState::Seeding,
            history: NegotiationHistory::new(),
        })
    }

    /// Run the negotiation to agreement or exhaustion
    pub fn run(&mut self) -> Result<NegotiationOutcome> {
        if self.state != NegotiationState::Seeding {
            return Err(NegotiationError::InvalidStateTransition(
                "Negotiation has already been run".to_string(),
            ));
        }

        let customer = &self.customer;
        let wedding_planner = &self.wedding_planner;
        let agent = |role: Role| match role {
            Role::Customer => customer,
            Role::WeddingPlanner => wedding_planner,
        };

        let customer_opening = customer.generate_offer(None);
        let planner_opening = wedding_planner.generate_offer(None);
        tracing::info!(
            "Opening offers: customer {}, wedding planner {}",
            customer_opening,
            planner_opening
        );

        let mut current_offer = customer_opening;
        // In legacy mode the planner is credited with the customer's opening.
        let mut current_role = match self.protocol {
            ProtocolMode::Legacy => Role::WeddingPlanner,
            ProtocolMode::StrictAlternation => Role::Customer,
        };
        let mut responding_role = current_role.counterpart();
        let mut round = 0;

        while round < self.max_rounds {
            round += 1;
            self.state = NegotiationState::Bargaining { round };

            let assessment = agent(responding_role).assess(&current_offer)?;
            tracing::debug!(
                "Round {}: {} offer {} evaluated by {} (utility {:.4}) -> {}",
                round,
                current_role,
                current_offer,
                responding_role,
                assessment.utility,
                if assessment.accepted {
                    "accepted"
                } else {
                    "rejected"
                }
            );

            self.history.record(NegotiationRound {
                round_number: round,
                offering_role: current_role,
                evaluated_by: responding_role,
                offer: current_offer,
                utility: assessment.utility,
                accepted: assessment.accepted,
            });

            if assessment.accepted {
                tracing::info!("Agreement reached in round {}: {}", round, current_offer);
                self.state = NegotiationState::Agreed {
                    offer: current_offer,
                    round,
                };
                return Ok(self.outcome(
                    Some(current_offer),
                    round,
                    customer_opening,
                    planner_opening,
                ));
            }

            let conceding_role = match self.protocol {
                ProtocolMode::Legacy => current_role,
                ProtocolMode::StrictAlternation => responding_role,
            };
            current_offer = agent(conceding_role).generate_offer(Some(&current_offer));
            std::mem::swap(&mut current_role, &mut responding_role);
        }

        tracing::warn!(
            "Negotiation failed: no agreement after {} rounds",
            self.max_rounds
        );
        self.state = NegotiationState::Exhausted { rounds: round };
        Ok(self.outcome(None, round, customer_opening, planner_opening))
    }

    fn outcome(
        &self,
        agreement: Option<Offer>,
        rounds: u32,
        customer_opening: Offer,
        planner_opening: Offer,
    ) -> NegotiationOutcome {
        NegotiationOutcome {
            agreement,
            rounds,
            customer_opening,
            planner_opening,
            history: self.history.clone(),
        }
    }

    /// Get current state
    pub fn state(&self) -> &NegotiationState {
        &self.state
    }

    /// Get the round log
    pub fn history(&self) -> &NegotiationHistory {
        &self.history
    }

    pub fn customer(&self) -> &Agent {
        &self.customer
    }

    pub fn wedding_planner(&self) -> &Agent {
        &self.wedding_planner
    }

    pub fn max_rounds(&self) -> u32 {
        self.max_rounds
    }

    pub fn protocol(&self) -> ProtocolMode {
        self.protocol
    }
}

fn check_seat(agent: &Agent, expected: Role) -> Result<()> {
    if agent.role() != expected {
        return Err(NegotiationError::RoleMismatch {
            expected: expected.to_string(),
            found: agent.role().to_string(),
        });
    }
    Ok(())
}

fn check_tables(agent: &Agent, config: &NegotiationConfig) -> Result<()> {
    let role = agent.role();
    if agent.profile() != config.profile(role) {
        return Err(NegotiationError::InvalidConfig(format!(
            "{} profile differs from the engine configuration",
            role
        )));
    }
    if agent.budget_sensitivity() != config.budget_sensitivity {
        return Err(NegotiationError::InvalidConfig(format!(
            "{} budget sensitivity {} differs from the engine configuration ({})",
            role,
            agent.budget_sensitivity(),
            config.budget_sensitivity
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Preferences, ServiceLevel};

    fn customer() -> Agent {
        Agent::new(
            Role::Customer,
            Preferences {
                min_budget: 10000.0,
                max_budget: 50000.0,
                optimal_budget: 15000.0,
                optimal_services: ServiceLevel::Standard,
                preferred_timeline: 6.0,
                max_timeline: 12.0,
                min_timeline: 3.0,
                optimal_timeline: 6.0,
            },
        )
        .unwrap()
    }

    fn wedding_planner() -> Agent {
        Agent::new(
            Role::WeddingPlanner,
            Preferences {
                min_budget: 10000.0,
                max_budget: 50000.0,
                optimal_budget: 40000.0,
                optimal_services: ServiceLevel::Premium,
                preferred_timeline: 4.0,
                max_timeline: 12.0,
                min_timeline: 3.0,
                optimal_timeline: 4.0,
            },
        )
        .unwrap()
    }

    fn assert_offer(actual: &Offer, budget: f64, services: ServiceLevel, timeline: f64) {
        assert!(
            (actual.budget - budget).abs() < 1e-6,
            "budget {}",
            actual.budget
        );
        assert_eq!(actual.services, services);
        assert!(
            (actual.timeline - timeline).abs() < 1e-9,
            "timeline {}",
            actual.timeline
        );
    }

    #[test]
    fn test_engine_creation() {
        let engine = NegotiationEngine::new(customer(), wedding_planner()).unwrap();
        assert_eq!(engine.state(), &NegotiationState::Seeding);
        assert!(engine.history().is_empty());
        assert_eq!(engine.max_rounds(), 10);
        assert_eq!(engine.protocol(), ProtocolMode::Legacy);
    }

    #[test]
    fn test_rejects_swapped_seats() {
        let result = NegotiationEngine::new(wedding_planner(), customer());
        assert!(matches!(result, Err(NegotiationError::RoleMismatch { .. })));
    }

    #[test]
    fn test_legacy_run_reaches_agreement() {
        let mut engine = NegotiationEngine::new(customer(), wedding_planner()).unwrap();
        let outcome = engine.run().unwrap();

        assert_eq!(outcome.rounds, 6);
        let agreement = outcome.agreement.unwrap();
        assert_offer(&agreement, 16537.5, ServiceLevel::Standard, 4.374);
        assert_eq!(
            engine.state(),
            &NegotiationState::Agreed {
                offer: agreement,
                round: 6
            }
        );
        assert_offer(
            &outcome.customer_opening,
            15000.0,
            ServiceLevel::Standard,
            6.0,
        );
        assert_offer(
            &outcome.planner_opening,
            40000.0,
            ServiceLevel::Premium,
            4.0,
        );
    }

    #[test]
    fn test_legacy_attribution_and_self_evaluation() {
        let mut engine = NegotiationEngine::new(customer(), wedding_planner()).unwrap();
        engine.run().unwrap();
        let rounds = engine.history().rounds();

        // The customer's own opening is credited to the planner and judged by the customer.
        assert_eq!(rounds[0].offering_role, Role::WeddingPlanner);
        assert_eq!(rounds[0].evaluated_by, Role::Customer);
        assert_offer(&rounds[0].offer, 15000.0, ServiceLevel::Standard, 6.0);

        // The planner's concession is credited to the customer and judged by the planner.
        assert_eq!(rounds[1].offering_role, Role::Customer);
        assert_eq!(rounds[1].evaluated_by, Role::WeddingPlanner);
        assert_offer(&rounds[1].offer, 15000.0, ServiceLevel::Standard, 5.4);

        // Round 5 would satisfy the planner but the customer is the one asked.
        assert!(!rounds[4].accepted);
        assert_eq!(rounds[4].evaluated_by, Role::Customer);
    }

    #[test]
    fn test_strict_alternation_run() {
        let config = NegotiationConfig {
            protocol: ProtocolMode::StrictAlternation,
            ..Default::default()
        };
        let mut engine =
            NegotiationEngine::with_config(customer(), wedding_planner(), &config).unwrap();
        let outcome = engine.run().unwrap();

        assert_eq!(outcome.rounds, 5);
        assert_offer(
            &outcome.agreement.unwrap(),
            16537.5,
            ServiceLevel::Standard,
            4.86,
        );

        for round in engine.history() {
            assert_ne!(round.offering_role, round.evaluated_by);
        }
        let first = &engine.history().rounds()[0];
        assert_eq!(first.offering_role, Role::Customer);
        assert_eq!(first.evaluated_by, Role::WeddingPlanner);
        assert_eq!(
            engine.history().last().unwrap().offering_role,
            Role::Customer
        );
    }

    #[test]
    fn test_exhaustion() {
        let config = NegotiationConfig {
            max_rounds: 3,
            ..Default::default()
        };
        let mut engine =
            NegotiationEngine::with_config(customer(), wedding_planner(), &config).unwrap();
        let outcome = engine.run().unwrap();

        assert!(!outcome.is_agreement());
        assert_eq!(outcome.rounds, 3);
        assert_eq!(outcome.history.len(), 3);
        assert!(outcome.history.iter().all(|r| !r.accepted));
        assert_eq!(engine.state(), &NegotiationState::Exhausted { rounds: 3 });
    }

    #[test]
    fn test_cannot_run_twice() {
        let mut engine = NegotiationEngine::new(customer(), wedding_planner()).unwrap();
        engine.run().unwrap();

        let result = engine.run();
        assert!(matches!(
            result,
            Err(NegotiationError::InvalidStateTransition(_))
        ));
        assert_eq!(engine.history().len(), 6);
    }

    #[test]
    fn test_rejects_agents_built_with_other_thresholds() {
        let mut config = NegotiationConfig::default();
        config.customer.acceptance_threshold = 0.75;

        let result = NegotiationEngine::with_config(customer(), wedding_planner(), &config);
        assert!(matches!(result, Err(NegotiationError::InvalidConfig(_))));
    }

    #[test]
    fn test_rejects_agents_built_with_other_sensitivity() {
        let config = NegotiationConfig {
            budget_sensitivity: 2500.0,
            ..Default::default()
        };

        let result = NegotiationEngine::with_config(customer(), wedding_planner(), &config);
        assert!(matches!(result, Err(NegotiationError::InvalidConfig(_))));
    }

    #[test]
    fn test_accepts_agents_built_from_same_config() {
        let mut config = NegotiationConfig::default();
        config.customer.acceptance_threshold = 0.75;
        let customer_prefs = customer().preferences().clone();
        let planner_prefs = wedding_planner().preferences().clone();
        let customer = Agent::with_config(Role::Customer, customer_prefs, &config).unwrap();
        let wedding_planner =
            Agent::with_config(Role::WeddingPlanner, planner_prefs, &config).unwrap();

        let engine = NegotiationEngine::with_config(customer, wedding_planner, &config).unwrap();
        assert_eq!(engine.customer().acceptance_threshold(), 0.75);
    }
}
