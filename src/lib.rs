//! Wedding Negotiation
//!
//! Bilateral negotiation between a customer and a wedding planner. Each party
//! scores offers (budget, service level, timeline) with a private utility
//! function, concedes on the dimension it values least, and accepts once its
//! satisfaction threshold is met. The engine alternates offers for a bounded
//! number of rounds and returns the agreement (or its absence) together with
//! the full round log.

pub mod agent;
pub mod cli;
pub mod config;
pub mod error;
pub mod negotiation;
pub mod types;

// Re-export commonly used types
pub use agent::{Agent, Assessment, UtilityBreakdown};
pub use config::{NegotiationConfig, ProtocolMode, RoleProfile};
pub use error::{NegotiationError, Result};
pub use negotiation::{
    NegotiationEngine, NegotiationHistory, NegotiationOutcome, NegotiationRound, NegotiationState,
};
pub use types::{Offer, Preferences, Role, ServiceLevel};
