//! Constraint violation types.

use conic_core::{ConstraintId, VarId};
use std::fmt;

/// Severity of a constraint violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViolationSeverity {
    /// Violated beyond tolerance - the point is infeasible.
    Error,
    /// Violated, but within tolerance - accepted and reported.
    Warning,
}

/// A constraint violation.
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    /// The constraint (or variable) that was violated.
    pub constraint_name: String,
    /// The severity of the violation.
    pub severity: ViolationSeverity,
    /// Human-readable message describing the violation.
    pub message: String,
    /// How far the point is from satisfying the constraint.
    pub residual: f64,
    /// Optional constraint ID involved in the violation.
    pub constraint_id: Option<ConstraintId>,
    /// Optional variable ID involved in the violation.
    pub var_id: Option<VarId>,
}

impl Violation {
    /// Create a new violation.
    pub fn new(
        constraint_name: impl Into<String>,
        severity: ViolationSeverity,
        message: impl Into<String>,
        residual: f64,
    ) -> Self {
        Self {
            constraint_name: constraint_name.into(),
            severity,
            message: message.into(),
            residual,
            constraint_id: None,
            var_id: None,
        }
    }

    /// Create an error-level violation.
    pub fn error(
        constraint_name: impl Into<String>,
        message: impl Into<String>,
        residual: f64,
    ) -> Self {
        Self::new(constraint_name, ViolationSeverity::Error, message, residual)
    }

    /// Create a warning-level violation.
    pub fn warning(
        constraint_name: impl Into<String>,
        message: impl Into<String>,
        residual: f64,
    ) -> Self {
        Self::new(constraint_name, ViolationSeverity::Warning, message, residual)
    }

    /// Add a constraint ID to the violation context.
    pub fn with_constraint(mut self, id: ConstraintId) -> Self {
        self.constraint_id = Some(id);
        self
    }

    /// Add a variable ID to the violation context.
    pub fn with_var(mut self, id: VarId) -> Self {
        self.var_id = Some(id);
        self
    }

    /// Check if this is an error-level violation.
    pub fn is_error(&self) -> bool {
        matches!(self.severity, ViolationSeverity::Error)
    }

    /// Check if this is a warning-level violation.
    pub fn is_warning(&self) -> bool {
        matches!(self.severity, ViolationSeverity::Warning)
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = match self.severity {
            ViolationSeverity::Error => "error",
            ViolationSeverity::Warning => "warning",
        };
        write!(f, "{} [{}]: {}", level, self.constraint_name, self.message)
    }
}

/// Collection of violations.
#[derive(Debug, Clone, Default)]
pub struct Violations {
    violations: Vec<Violation>,
}

impl Violations {
    /// Create a new empty violations collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a violation.
    pub fn push(&mut self, violation: Violation) {
        self.violations.push(violation);
    }

    /// Check if there are any violations.
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Check if there are any error-level violations.
    pub fn has_errors(&self) -> bool {
        self.violations.iter().any(|v| v.is_error())
    }

    /// Check if there are only warnings.
    pub fn has_only_warnings(&self) -> bool {
        !self.violations.is_empty() && !self.has_errors()
    }

    /// Get all violations.
    pub fn all(&self) -> &[Violation] {
        &self.violations
    }

    /// Get error-level violations.
    pub fn errors(&self) -> impl Iterator<Item = &Violation> {
        self.violations.iter().filter(|v| v.is_error())
    }

    /// Get warning-level violations.
    pub fn warnings(&self) -> impl Iterator<Item = &Violation> {
        self.violations.iter().filter(|v| v.is_warning())
    }

    /// Largest residual among all violations, 0 when empty.
    pub fn max_residual(&self) -> f64 {
        self.violations.iter().map(|v| v.residual).fold(0.0, f64::max)
    }

    /// Get the number of violations.
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Merge another violations collection.
    pub fn merge(&mut self, other: Violations) {
        self.violations.extend(other.violations);
    }
}

impl IntoIterator for Violations {
    type Item = Violation;
    type IntoIter = std::vec::IntoIter<Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.violations.into_iter()
    }
}

impl<'a> IntoIterator for &'a Violations {
    type Item = &'a Violation;
    type IntoIter = std::slice::Iter<'a, Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.violations.iter()
    }
}
