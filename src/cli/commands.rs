//! CLI command definitions

use crate::types::{Role, ServiceLevel};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "wedding-negotiation")]
#[command(about = "Customer / wedding planner negotiation simulator", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a negotiation to agreement or exhaustion
    Run {
        /// Customer preferences (JSON); defaults to the example customer
        #[arg(short = 'c', long)]
        customer: Option<PathBuf>,

        /// Wedding planner preferences (JSON); defaults to the example planner
        #[arg(short = 'p', long)]
        planner: Option<PathBuf>,

        /// Negotiation configuration (JSON)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Print the outcome as JSON
        #[arg(long)]
        json: bool,
    },

    /// Score a single offer for one role
    Evaluate {
        /// Role evaluating the offer (customer, wedding_planner)
        #[arg(short, long)]
        role: Role,

        /// Offered budget
        #[arg(short, long)]
        budget: f64,

        /// Offered service level (Premium, Standard, Basic)
        #[arg(short, long)]
        services: ServiceLevel,

        /// Offered timeline
        #[arg(short, long)]
        timeline: f64,

        /// Preferences of the evaluating role (JSON); defaults to the example
        #[arg(long)]
        preferences: Option<PathBuf>,

        /// Negotiation configuration (JSON)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Print example preferences for a role
    Preferences {
        /// Role (customer, wedding_planner)
        #[arg(short, long)]
        role: Role,
    },
}
