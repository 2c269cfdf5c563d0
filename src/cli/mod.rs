//! CLI module for the negotiation simulator

pub mod app;
pub mod commands;

pub use app::{example_preferences, render_evaluation, render_outcome, Evaluation, NegotiationApp};
pub use commands::{Cli, Commands};
