//! Model error types.

use conic_constraint::ConstraintError;
use conic_core::DomainError;
use thiserror::Error;

/// Errors that can occur while building or querying a model.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Duplicate variable name: {0}")]
    DuplicateVariable(String),

    #[error("Duplicate constraint name: {0}")]
    DuplicateConstraint(String),

    #[error("Duplicate suffix name: {0}")]
    DuplicateSuffix(String),

    #[error("Unknown variable: {0}")]
    UnknownVariable(String),

    #[error("Unknown constraint: {0}")]
    UnknownConstraint(String),

    #[error("Unknown suffix: {0}")]
    UnknownSuffix(String),

    #[error("Duplicate set name: {0}")]
    DuplicateSet(String),

    #[error("Unknown set: {0}")]
    UnknownSet(String),

    #[error("{member} is not a member of {set}")]
    UnknownMember { set: String, member: String },

    #[error("Position {position} is out of range for {set} with {len} members")]
    SetPosition {
        set: String,
        position: isize,
        len: usize,
    },

    /// A constraint references a variable this model does not own.
    #[error("Constraint '{constraint}' references variable '{var}' not owned by this model")]
    ForeignVariable { constraint: String, var: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Constraint(#[from] ConstraintError),
}

impl ModelError {
    pub fn foreign_variable(constraint: impl Into<String>, var: impl Into<String>) -> Self {
        Self::ForeignVariable {
            constraint: constraint.into(),
            var: var.into(),
        }
    }

    pub fn unknown_member(set: impl Into<String>, member: impl ToString) -> Self {
        Self::UnknownMember {
            set: set.into(),
            member: member.to_string(),
        }
    }

    pub fn set_position(set: impl Into<String>, position: isize, len: usize) -> Self {
        Self::SetPosition {
            set: set.into(),
            position,
            len,
        }
    }

    /// Returns true if this wraps a constraint precondition violation.
    pub fn is_precondition(&self) -> bool {
        matches!(self, Self::Constraint(e) if e.is_precondition())
    }
}

impl From<serde_json::Error> for ModelError {
    fn from(e: serde_json::Error) -> Self {
        Self::InvalidConfig(e.to_string())
    }
}

/// Result type for model operations.
pub type ModelResult<T> = Result<T, ModelError>;
