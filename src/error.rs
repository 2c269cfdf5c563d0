//! Error types for wedding negotiation

use thiserror::Error;

/// Main error type for the negotiation library
#[derive(Error, Debug)]
pub enum NegotiationError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid configuration value: {0}")]
    InvalidConfig(String),

    #[error("Missing configuration field: {0}")]
    MissingConfig(String),

    // Model errors
    #[error("Invalid service level: {0}")]
    InvalidCategory(String),

    #[error("Budget utility undefined for budget {budget} (min budget {min_budget})")]
    ArithmeticDomain { budget: f64, min_budget: f64 },

    // Protocol errors
    #[error("Role mismatch: expected {expected}, found {found}")]
    RoleMismatch { expected: String, found: String },

    #[error("Invalid negotiation state transition: {0}")]
    InvalidStateTransition(String),

    // General errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Formatting error: {0}")]
    Fmt(#[from] std::fmt::Error),
}

/// Result type alias for negotiation operations
pub type Result<T> = std::result::Result<T, NegotiationError>;
