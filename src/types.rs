//! Core types used throughout the negotiation

use crate::error::{NegotiationError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Party taking part in a negotiation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Customer,
    WeddingPlanner,
}

impl Role {
    /// The other party
    pub fn counterpart(self) -> Self {
        match self {
            Role::Customer => Role::WeddingPlanner,
            Role::WeddingPlanner => Role::Customer,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Customer => "customer",
            Role::WeddingPlanner => "wedding_planner",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Role {
    type Err = NegotiationError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "customer" => Ok(Role::Customer),
            "wedding_planner" | "planner" => Ok(Role::WeddingPlanner),
            other => Err(NegotiationError::InvalidConfig(format!(
                "unknown role '{}'",
                other
            ))),
        }
    }
}

/// Service package level, ordered by desirability (Basic < Standard < Premium)
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ServiceLevel {
    Basic,
    Standard,
    Premium,
}

impl ServiceLevel {
    pub const ALL: [ServiceLevel; 3] = [
        ServiceLevel::Basic,
        ServiceLevel::Standard,
        ServiceLevel::Premium,
    ];

    /// Desirability rank, 0 for Basic
    pub fn rank(self) -> u8 {
        match self {
            ServiceLevel::Basic => 0,
            ServiceLevel::Standard => 1,
            ServiceLevel::Premium => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ServiceLevel::Basic => "Basic",
            ServiceLevel::Standard => "Standard",
            ServiceLevel::Premium => "Premium",
        }
    }
}

impl fmt::Display for ServiceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ServiceLevel {
    type Err = NegotiationError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "premium" => Ok(ServiceLevel::Premium),
            "standard" => Ok(ServiceLevel::Standard),
            "basic" => Ok(ServiceLevel::Basic),
            _ => Err(NegotiationError::InvalidCategory(s.to_string())),
        }
    }
}

/// A proposed set of terms. Offers are values: every concession builds a new one.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Offer {
    pub budget: f64,
    pub services: ServiceLevel,
    pub timeline: f64,
}

impl Offer {
    pub fn new(budget: f64, services: ServiceLevel, timeline: f64) -> Self {
        Self {
            budget,
            services,
            timeline,
        }
    }
}

impl fmt::Display for Offer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{budget: {:.2}, services: {}, timeline: {:.3}}}",
            self.budget, self.services, self.timeline
        )
    }
}

/// Private preferences of one party
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    pub min_budget: f64,
    pub max_budget: f64,
    pub optimal_budget: f64,
    pub optimal_services: ServiceLevel,
    pub preferred_timeline: f64,
    pub max_timeline: f64,
    pub min_timeline: f64,
    pub optimal_timeline: f64,
}

impl Preferences {
    /// Check the ordering invariants and that every formula using these values is defined
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("min_budget", self.min_budget),
            ("max_budget", self.max_budget),
            ("optimal_budget", self.optimal_budget),
            ("preferred_timeline", self.preferred_timeline),
            ("max_timeline", self.max_timeline),
            ("min_timeline", self.min_timeline),
            ("optimal_timeline", self.optimal_timeline),
        ];
        if let Some((name, value)) = fields.iter().find(|(_, v)| !v.is_finite()) {
            return Err(NegotiationError::InvalidConfig(format!(
                "{} must be finite, got {}",
                name, value
            )));
        }

        if self.min_budget <= 0.0 {
            return Err(NegotiationError::Configuration(format!(
                "min_budget must be positive, got {}",
                self.min_budget
            )));
        }
        if !(self.min_budget <= self.optimal_budget && self.optimal_budget <= self.max_budget) {
            return Err(NegotiationError::Configuration(format!(
                "budget ordering violated: min {} <= optimal {} <= max {}",
                self.min_budget, self.optimal_budget, self.max_budget
            )));
        }

        if self.max_timeline <= 0.0 {
            return Err(NegotiationError::Configuration(format!(
                "max_timeline must be positive, got {}",
                self.max_timeline
            )));
        }
        if !(self.min_timeline <= self.optimal_timeline
            && self.optimal_timeline <= self.max_timeline)
        {
            return Err(NegotiationError::Configuration(format!(
                "timeline ordering violated: min {} <= optimal {} <= max {}",
                self.min_timeline, self.optimal_timeline, self.max_timeline
            )));
        }

        Ok(())
    }

    /// Parse and validate preferences from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        let preferences: Preferences = serde_json::from_str(json).map_err(|e| {
            let message = e.to_string();
            if message.starts_with("missing field") {
                NegotiationError::MissingConfig(message)
            } else if message.contains("unknown variant") {
                NegotiationError::InvalidCategory(message)
            } else {
                NegotiationError::Configuration(message)
            }
        })?;
        preferences.validate()?;
        Ok(preferences)
    }

    /// Load preferences from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// The offer this party opens with
    pub fn opening_offer(&self) -> Offer {
        Offer::new(
            self.optimal_budget,
            self.optimal_services,
            self.optimal_timeline,
        )
    }
}
