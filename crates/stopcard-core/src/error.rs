//! Problems the engine absorbs while building a plan.
//!
//! None of these abort a computation. They are logged where they occur and
//! collected on the returned plan so callers can show a degraded result.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanIssue {
    #[error("missing input: {0}")]
    MissingInput(String),

    #[error("invalid value {value} for {field}, using 0")]
    InvalidPolicyValue { field: &'static str, value: f64 },

    #[error("could not resolve location '{name}' for {feature}")]
    UnresolvedLocation { name: String, feature: &'static str },
}

impl PlanIssue {
    pub fn missing(reason: impl Into<String>) -> Self {
        Self::MissingInput(reason.into())
    }

    pub fn unresolved(name: impl Into<String>, feature: &'static str) -> Self {
        Self::UnresolvedLocation {
            name: name.into(),
            feature,
        }
    }
}
