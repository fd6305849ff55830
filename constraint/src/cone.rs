//! Cone constraints.
//!
//! Each constructor checks that the variables bounding the cone carry the
//! non-negativity tag before building anything. The check is done once, on
//! the domain recorded in the variable handle; later changes to a variable's
//! bounds or value do not re-trigger it.

use conic_core::VarRef;
use conic_expr::{Assignment, Evaluator, Expr, VarRefExt};
use tracing::debug;

use crate::constraint::{Constraint, ConstraintKind};
use crate::error::{ConstraintError, ConstraintResult};

/// A point-like value exposing three scalar variables.
pub trait ConePoint {
    fn x(&self) -> &VarRef;
    fn y(&self) -> &VarRef;
    fn z(&self) -> &VarRef;
}

/// Plain three-variable point.
#[derive(Debug, Clone, PartialEq)]
pub struct Point3 {
    pub x: VarRef,
    pub y: VarRef,
    pub z: VarRef,
}

impl Point3 {
    pub fn new(x: VarRef, y: VarRef, z: VarRef) -> Self {
        Self { x, y, z }
    }
}

impl ConePoint for Point3 {
    fn x(&self) -> &VarRef {
        &self.x
    }

    fn y(&self) -> &VarRef {
        &self.y
    }

    fn z(&self) -> &VarRef {
        &self.z
    }
}

fn require_non_negative(cone: ConstraintKind, role: &str, var: &VarRef) -> ConstraintResult<()> {
    if var.is_non_negative() {
        return Ok(());
    }
    Err(ConstraintError::precondition(
        cone.name(),
        format!(
            "{} variable '{}' must be non-negative, but its domain is {}",
            role,
            var.name(),
            var.domain()
        ),
    ))
}

fn sum_of_squares(r: &[VarRef]) -> Expr {
    Expr::sum(r.iter().map(|v| v.square()))
}

fn norm(r: &[VarRef], evaluator: &Evaluator<'_>) -> ConstraintResult<f64> {
    Ok(evaluator.eval(&sum_of_squares(r))?.sqrt())
}

// ==================== Quadratic cone ====================

/// `‖r‖₂ ≤ x` with `x` non-negative, stored as `Σ rᵢ² ≤ x²`.
#[derive(Debug, Clone, PartialEq)]
pub struct QuadraticCone {
    r: Vec<VarRef>,
    x: VarRef,
    constraint: Constraint,
}

impl QuadraticCone {
    /// Build the cone. Fails if `x` is not tagged non-negative or `r` is empty.
    pub fn new(r: &[VarRef], x: &VarRef) -> ConstraintResult<Self> {
        let kind = ConstraintKind::SecondOrderCone;
        require_non_negative(kind, "bounding", x)?;
        if r.is_empty() {
            return Err(ConstraintError::precondition(
                kind.name(),
                "at least one cone member is required",
            ));
        }

        let relation = sum_of_squares(r).le(x.square());
        debug!(bound = x.name(), members = r.len(), "building quadratic cone");

        Ok(Self {
            r: r.to_vec(),
            x: x.clone(),
            constraint: Constraint::with_kind(relation, kind),
        })
    }

    pub fn r(&self) -> &[VarRef] {
        &self.r
    }

    pub fn x(&self) -> &VarRef {
        &self.x
    }

    pub fn constraint(&self) -> &Constraint {
        &self.constraint
    }

    pub fn into_constraint(self) -> Constraint {
        self.constraint
    }

    /// `‖r‖₂ - x`: negative strictly inside the cone, zero on its boundary.
    pub fn conic_residual(&self, assignment: &Assignment) -> ConstraintResult<f64> {
        let evaluator = Evaluator::new(assignment);
        let x = evaluator.eval(&self.x.expr())?;
        Ok(norm(&self.r, &evaluator)? - x)
    }
}

impl From<QuadraticCone> for Constraint {
    fn from(cone: QuadraticCone) -> Self {
        cone.constraint
    }
}

// ==================== Rotated quadratic cone ====================

/// `‖r‖₂² ≤ 2·x₁·x₂` with `x₁` and `x₂` non-negative.
#[derive(Debug, Clone, PartialEq)]
pub struct RotatedQuadraticCone {
    r: Vec<VarRef>,
    x1: VarRef,
    x2: VarRef,
    constraint: Constraint,
}

impl RotatedQuadraticCone {
    /// Build the cone. Both bounding variables must be tagged non-negative.
    pub fn new(r: &[VarRef], x1: &VarRef, x2: &VarRef) -> ConstraintResult<Self> {
        let kind = ConstraintKind::RotatedSecondOrderCone;
        require_non_negative(kind, "first bounding", x1)?;
        require_non_negative(kind, "second bounding", x2)?;
        if r.is_empty() {
            return Err(ConstraintError::precondition(
                kind.name(),
                "at least one cone member is required",
            ));
        }

        let relation = sum_of_squares(r).le(2.0 * (x1.expr() * x2.expr()));
        debug!(
            bound1 = x1.name(),
            bound2 = x2.name(),
            members = r.len(),
            "building rotated quadratic cone"
        );

        Ok(Self {
            r: r.to_vec(),
            x1: x1.clone(),
            x2: x2.clone(),
            constraint: Constraint::with_kind(relation, kind),
        })
    }

    pub fn r(&self) -> &[VarRef] {
        &self.r
    }

    pub fn x1(&self) -> &VarRef {
        &self.x1
    }

    pub fn x2(&self) -> &VarRef {
        &self.x2
    }

    pub fn constraint(&self) -> &Constraint {
        &self.constraint
    }

    pub fn into_constraint(self) -> Constraint {
        self.constraint
    }

    /// `‖r‖₂ - sqrt(2·x₁·x₂)`: non-positive inside the cone.
    pub fn conic_residual(&self, assignment: &Assignment) -> ConstraintResult<f64> {
        let evaluator = Evaluator::new(assignment);
        let x1 = evaluator.eval(&self.x1.expr())?;
        let x2 = evaluator.eval(&self.x2.expr())?;
        Ok(norm(&self.r, &evaluator)? - (2.0 * x1 * x2).max(0.0).sqrt())
    }
}

impl From<RotatedQuadraticCone> for Constraint {
    fn from(cone: RotatedQuadraticCone) -> Self {
        cone.constraint
    }
}

// ==================== Second-order cone over a point ====================

/// `‖(x, y)‖₂ ≤ z` over a point, with `z` non-negative.
///
/// Built as the inequality `x² + y² ≤ z²`.
#[derive(Debug, Clone, PartialEq)]
pub struct SecondOrderCone {
    cone: QuadraticCone,
}

impl SecondOrderCone {
    /// Build the cone from a point.
    ///
    /// Fails with a precondition violation, before any constraint is built,
    /// if `point.z()` is not tagged non-negative.
    pub fn new(point: &impl ConePoint) -> ConstraintResult<Self> {
        let cone = QuadraticCone::new(&[point.x().clone(), point.y().clone()], point.z())?;
        Ok(Self { cone })
    }

    pub fn x(&self) -> &VarRef {
        &self.cone.r[0]
    }

    pub fn y(&self) -> &VarRef {
        &self.cone.r[1]
    }

    pub fn z(&self) -> &VarRef {
        &self.cone.x
    }

    pub fn constraint(&self) -> &Constraint {
        self.cone.constraint()
    }

    pub fn into_constraint(self) -> Constraint {
        self.cone.into_constraint()
    }

    /// `‖(x, y)‖₂ - z`.
    pub fn conic_residual(&self, assignment: &Assignment) -> ConstraintResult<f64> {
        self.cone.conic_residual(assignment)
    }
}

impl From<SecondOrderCone> for Constraint {
    fn from(cone: SecondOrderCone) -> Self {
        cone.into_constraint()
    }
}
