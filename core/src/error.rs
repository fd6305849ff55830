//! Common error types for variables and domains.

use crate::Domain;
use thiserror::Error;

/// Errors that can occur when assigning values or bounds to variables.
#[derive(Debug, Error)]
pub enum DomainError {
    /// Value is not a member of the variable's domain.
    #[error("Value {value} is not in domain {domain} of variable '{var}'")]
    ValueOutsideDomain {
        var: String,
        value: f64,
        domain: Domain,
    },

    /// Value lies outside the variable's explicit bounds.
    #[error("Value {value} is outside bounds [{lb}, {ub}] of variable '{var}'")]
    ValueOutsideBounds {
        var: String,
        value: f64,
        lb: f64,
        ub: f64,
    },

    /// Bounds leave no feasible value in the domain.
    #[error("Invalid bounds [{lb}, {ub}] for variable '{var}'")]
    InvalidBounds { var: String, lb: f64, ub: f64 },
}

impl DomainError {
    pub fn value_outside_domain(var: impl Into<String>, value: f64, domain: Domain) -> Self {
        Self::ValueOutsideDomain {
            var: var.into(),
            value,
            domain,
        }
    }

    pub fn value_outside_bounds(
        var: impl Into<String>,
        value: f64,
        lb: Option<f64>,
        ub: Option<f64>,
    ) -> Self {
        Self::ValueOutsideBounds {
            var: var.into(),
            value,
            lb: lb.unwrap_or(f64::NEG_INFINITY),
            ub: ub.unwrap_or(f64::INFINITY),
        }
    }

    pub fn invalid_bounds(var: impl Into<String>, lb: Option<f64>, ub: Option<f64>) -> Self {
        Self::InvalidBounds {
            var: var.into(),
            lb: lb.unwrap_or(f64::NEG_INFINITY),
            ub: ub.unwrap_or(f64::INFINITY),
        }
    }
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
