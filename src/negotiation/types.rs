//! Negotiation records and state machine

use crate::types::{Offer, Role};
use serde::{Deserialize, Serialize};

use super::history::NegotiationHistory;

/// Negotiation state machine
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum NegotiationState {
    /// Openings not yet generated
    Seeding,
    /// Alternating offers in progress
    Bargaining { round: u32 },
    /// An offer was accepted
    Agreed { offer: Offer, round: u32 },
    /// Round cap reached without acceptance
    Exhausted { rounds: u32 },
}

impl NegotiationState {
    /// Check if negotiation is in a terminal state
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            NegotiationState::Agreed { .. } | NegotiationState::Exhausted { .. }
        )
    }

    /// Check if negotiation is active
    pub fn is_active(&self) -> bool {
        !self.is_terminal()
    }
}

/// One logged round
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NegotiationRound {
    pub round_number: u32,
    /// Role credited with the offer this round
    pub offering_role: Role,
    /// Role whose utility decided the round
    pub evaluated_by: Role,
    pub offer: Offer,
    pub utility: f64,
    pub accepted: bool,
}

/// Final result of a run
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NegotiationOutcome {
    /// Accepted offer, `None` when the round cap was reached
    pub agreement: Option<Offer>,
    pub rounds: u32,
    pub customer_opening: Offer,
    pub planner_opening: Offer,
    pub history: NegotiationHistory,
}

impl NegotiationOutcome {
    pub fn is_agreement(&self) -> bool {
        self.agreement.is_some()
    }
}
