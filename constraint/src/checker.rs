//! Constraint checking.

use conic_expr::Assignment;
use tracing::{debug, warn};

use crate::constraint::Constraint;
use crate::error::ConstraintResult;
use crate::violation::{Violation, Violations};

/// Checks constraints against an assignment.
///
/// A residual above `tolerance` is an error. A positive residual at or below
/// `tolerance` is accepted and reported as a warning.
#[derive(Debug, Clone, Copy)]
pub struct ConstraintChecker {
    tolerance: f64,
}

impl ConstraintChecker {
    /// Create a new constraint checker. Negative tolerances are clamped to 0.
    pub fn new(tolerance: f64) -> Self {
        Self {
            tolerance: tolerance.max(0.0),
        }
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Check a single constraint.
    pub fn check(
        &self,
        name: &str,
        constraint: &Constraint,
        assignment: &Assignment,
    ) -> ConstraintResult<Option<Violation>> {
        let residual = constraint.residual(assignment)?;
        if residual == 0.0 {
            return Ok(None);
        }

        let message = format!("{} violated by {:e}", constraint, residual);
        let violation = if residual > self.tolerance {
            warn!(constraint = name, residual, "constraint violated");
            Violation::error(name, message, residual)
        } else {
            debug!(constraint = name, residual, "constraint within tolerance");
            Violation::warning(name, message, residual)
        };
        Ok(Some(violation))
    }

    /// Check every constraint yielded by `constraints`.
    pub fn check_all<'c, I>(
        &self,
        constraints: I,
        assignment: &Assignment,
    ) -> ConstraintResult<Violations>
    where
        I: IntoIterator<Item = (&'c str, &'c Constraint)>,
    {
        let mut violations = Violations::new();
        for (name, constraint) in constraints {
            if let Some(violation) = self.check(name, constraint, assignment)? {
                violations.push(violation);
            }
        }
        Ok(violations)
    }
}

impl Default for ConstraintChecker {
    fn default() -> Self {
        Self::new(1e-6)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Point3, SecondOrderCone};
    use conic_core::{Domain, VarId, VarRef};
    use conic_expr::VarRefExt;

    fn cone_point() -> Point3 {
        Point3::new(
            VarRef::new(VarId::new(0), "x", Domain::Reals),
            VarRef::new(VarId::new(1), "y", Domain::Reals),
            VarRef::new(VarId::new(2), "z", Domain::NonNegativeReals),
        )
    }

    #[test]
    fn test_satisfied_constraint_has_no_violation() {
        let p = cone_point();
        let cone = SecondOrderCone::new(&p).unwrap();
        let assignment = Assignment::new().with(&p.x, 3.0).with(&p.y, 4.0).with(&p.z, 5.0);

        let result = ConstraintChecker::default()
            .check("cone", cone.constraint(), &assignment)
            .unwrap();

        assert!(result.is_none());
    }

    #[test]
    fn test_outside_cone_is_error() {
        // GIVEN - ‖(3, 4)‖ = 5 > 4
        let p = cone_point();
        let cone = SecondOrderCone::new(&p).unwrap();
        let assignment = Assignment::new().with(&p.x, 3.0).with(&p.y, 4.0).with(&p.z, 4.0);

        // WHEN
        let violation = ConstraintChecker::default()
            .check("cone", cone.constraint(), &assignment)
            .unwrap()
            .unwrap();

        // THEN - 25 - 16
        assert!(violation.is_error());
        assert_eq!(violation.residual, 9.0);
        assert!(violation.message.starts_with("x^2 + y^2 <= z^2"));
    }

    #[test]
    fn test_within_tolerance_is_warning() {
        let x = VarRef::new(VarId::new(0), "x", Domain::Reals);
        let c = Constraint::new(x.expr().le(0.0));
        let assignment = Assignment::new().with(&x, 1e-9);

        let violation = ConstraintChecker::new(1e-6)
            .check("c", &c, &assignment)
            .unwrap()
            .unwrap();

        assert!(violation.is_warning());
    }

    #[test]
    fn test_check_all_collects() {
        let x = VarRef::new(VarId::new(0), "x", Domain::Reals);
        let upper = Constraint::new(x.expr().le(1.0));
        let lower = Constraint::new(x.expr().ge(3.0));
        let assignment = Assignment::new().with(&x, 2.0);

        let violations = ConstraintChecker::new(0.0)
            .check_all([("upper", &upper), ("lower", &lower)], &assignment)
            .unwrap();

        assert_eq!(violations.len(), 2);
        assert!(violations.has_errors());
    }

    #[test]
    fn test_negative_tolerance_clamped() {
        assert_eq!(ConstraintChecker::new(-1.0).tolerance(), 0.0);
    }
}
