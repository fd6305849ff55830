//! Constraint error types.

use conic_expr::ExprError;
use thiserror::Error;

/// Result type for constraint operations.
pub type ConstraintResult<T> = Result<T, ConstraintError>;

/// Errors that can occur while building or checking constraints.
#[derive(Debug, Error)]
pub enum ConstraintError {
    /// A constructor's precondition on its operands does not hold.
    #[error("Precondition violated building {constraint}: {message}")]
    PreconditionViolation { constraint: String, message: String },

    #[error(transparent)]
    Expr(#[from] ExprError),
}

impl ConstraintError {
    pub fn precondition(constraint: impl Into<String>, message: impl Into<String>) -> Self {
        Self::PreconditionViolation {
            constraint: constraint.into(),
            message: message.into(),
        }
    }

    /// Returns true if this is a precondition violation.
    pub fn is_precondition(&self) -> bool {
        matches!(self, Self::PreconditionViolation { .. })
    }
}
