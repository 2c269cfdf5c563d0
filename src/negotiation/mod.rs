//! Alternating-offer negotiation between a customer and a wedding planner

pub mod engine;
pub mod history;
pub mod types;

pub use engine::NegotiationEngine;
pub use history::NegotiationHistory;
pub use types::{NegotiationOutcome, NegotiationRound, NegotiationState};
