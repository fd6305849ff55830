//! Constraints.

use conic_core::{VarId, VarRef};
use conic_expr::{Assignment, Evaluator, Expr, RelOp, Relation};
use std::collections::BTreeMap;
use std::fmt;

use crate::error::ConstraintResult;

/// Structural kind of a constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstraintKind {
    /// Both sides have degree at most one.
    Linear,
    /// General polynomial constraint of degree two or more.
    Quadratic,
    /// `‖r‖₂ ≤ x` with `x ≥ 0`, stored as `Σ rᵢ² ≤ x²`.
    SecondOrderCone,
    /// `‖r‖₂² ≤ 2·x₁·x₂` with `x₁, x₂ ≥ 0`.
    RotatedSecondOrderCone,
}

impl ConstraintKind {
    pub fn name(&self) -> &'static str {
        match self {
            ConstraintKind::Linear => "linear",
            ConstraintKind::Quadratic => "quadratic",
            ConstraintKind::SecondOrderCone => "second-order cone",
            ConstraintKind::RotatedSecondOrderCone => "rotated second-order cone",
        }
    }

    /// Returns true for cone kinds.
    pub fn is_conic(&self) -> bool {
        matches!(
            self,
            ConstraintKind::SecondOrderCone | ConstraintKind::RotatedSecondOrderCone
        )
    }

    /// Returns true if the feasible set is known to be convex.
    ///
    /// A general quadratic constraint is not assumed convex.
    pub fn is_convex(&self) -> bool {
        !matches!(self, ConstraintKind::Quadratic)
    }
}

impl fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A constraint: a relation tagged with its kind.
#[derive(Debug, Clone, PartialEq)]
pub struct Constraint {
    relation: Relation,
    kind: ConstraintKind,
}

impl Constraint {
    /// Wrap a relation, classifying it as linear or quadratic by degree.
    pub fn new(relation: Relation) -> Self {
        let kind = if relation.degree() <= 1 {
            ConstraintKind::Linear
        } else {
            ConstraintKind::Quadratic
        };
        Self { relation, kind }
    }

    /// Used by the cone constructors once their preconditions hold.
    pub(crate) fn with_kind(relation: Relation, kind: ConstraintKind) -> Self {
        Self { relation, kind }
    }

    pub fn relation(&self) -> &Relation {
        &self.relation
    }

    pub fn lhs(&self) -> &Expr {
        &self.relation.lhs
    }

    pub fn rhs(&self) -> &Expr {
        &self.relation.rhs
    }

    pub fn op(&self) -> RelOp {
        self.relation.op
    }

    pub fn kind(&self) -> ConstraintKind {
        self.kind
    }

    pub fn is_conic(&self) -> bool {
        self.kind.is_conic()
    }

    pub fn is_convex(&self) -> bool {
        self.kind.is_convex()
    }

    /// Variables referenced on either side, unique and ordered by id.
    pub fn variables(&self) -> Vec<&VarRef> {
        let mut seen: BTreeMap<VarId, &VarRef> = BTreeMap::new();
        for v in self.lhs().variables().into_iter().chain(self.rhs().variables()) {
            seen.entry(v.id()).or_insert(v);
        }
        seen.into_values().collect()
    }

    /// Amount by which the constraint is violated under `assignment`.
    pub fn residual(&self, assignment: &Assignment) -> ConstraintResult<f64> {
        Ok(self.relation.residual(&Evaluator::new(assignment))?)
    }

    /// Check the constraint, accepting violations up to `tolerance`.
    pub fn is_satisfied(&self, assignment: &Assignment, tolerance: f64) -> ConstraintResult<bool> {
        Ok(self.residual(assignment)? <= tolerance)
    }
}

impl From<Relation> for Constraint {
    fn from(relation: Relation) -> Self {
        Self::new(relation)
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.relation)
    }
}
