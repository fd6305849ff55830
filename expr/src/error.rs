//! Expression error types.

use conic_core::VarId;
use thiserror::Error;

/// Errors that can occur during expression evaluation.
#[derive(Debug, Error)]
pub enum ExprError {
    /// Variable has no value in the assignment.
    #[error("Unbound variable '{name}' ({id})")]
    UnboundVariable { name: String, id: VarId },

    /// Evaluation produced NaN or an infinity.
    #[error("Non-finite result evaluating '{expr}'")]
    NonFinite { expr: String },
}

impl ExprError {
    pub fn unbound_variable(name: impl Into<String>, id: VarId) -> Self {
        Self::UnboundVariable {
            name: name.into(),
            id,
        }
    }

    pub fn non_finite(expr: impl Into<String>) -> Self {
        Self::NonFinite { expr: expr.into() }
    }
}

/// Result type for expression operations.
pub type ExprResult<T> = Result<T, ExprError>;
