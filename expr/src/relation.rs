//! Relations between expressions.

use crate::{Evaluator, Expr, ExprResult};
use std::fmt;

/// Relational operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelOp {
    LessEq,
    Equal,
    GreaterEq,
}

impl RelOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            RelOp::LessEq => "<=",
            RelOp::Equal => "==",
            RelOp::GreaterEq => ">=",
        }
    }
}

impl fmt::Display for RelOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// `lhs op rhs`.
#[derive(Debug, Clone, PartialEq)]
pub struct Relation {
    pub lhs: Expr,
    pub op: RelOp,
    pub rhs: Expr,
}

impl Relation {
    pub fn new(lhs: impl Into<Expr>, op: RelOp, rhs: impl Into<Expr>) -> Self {
        Self {
            lhs: lhs.into(),
            op,
            rhs: rhs.into(),
        }
    }

    /// `lhs - rhs`.
    pub fn body(&self) -> Expr {
        self.lhs.clone() - self.rhs.clone()
    }

    /// Bounds on `body()`: `(lower, upper)`, `None` for unbounded.
    pub fn bounds(&self) -> (Option<f64>, Option<f64>) {
        match self.op {
            RelOp::LessEq => (None, Some(0.0)),
            RelOp::Equal => (Some(0.0), Some(0.0)),
            RelOp::GreaterEq => (Some(0.0), None),
        }
    }

    /// Highest polynomial degree on either side.
    pub fn degree(&self) -> u32 {
        self.lhs.degree().max(self.rhs.degree())
    }

    /// Amount by which the relation is violated; 0 when it holds.
    pub fn residual(&self, evaluator: &Evaluator<'_>) -> ExprResult<f64> {
        let lhs = evaluator.eval(&self.lhs)?;
        let rhs = evaluator.eval(&self.rhs)?;
        Ok(match self.op {
            RelOp::LessEq => (lhs - rhs).max(0.0),
            RelOp::Equal => (lhs - rhs).abs(),
            RelOp::GreaterEq => (rhs - lhs).max(0.0),
        })
    }

    /// Check the relation exactly, with no tolerance.
    pub fn holds(&self, evaluator: &Evaluator<'_>) -> ExprResult<bool> {
        Ok(self.residual(evaluator)? == 0.0)
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.lhs, self.op, self.rhs)
    }
}

impl Expr {
    /// `self <= rhs`.
    pub fn le(self, rhs: impl Into<Expr>) -> Relation {
        Relation::new(self, RelOp::LessEq, rhs)
    }

    /// `self >= rhs`.
    pub fn ge(self, rhs: impl Into<Expr>) -> Relation {
        Relation::new(self, RelOp::GreaterEq, rhs)
    }

    /// `self == rhs`.
    pub fn equals(self, rhs: impl Into<Expr>) -> Relation {
        Relation::new(self, RelOp::Equal, rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Assignment, VarRefExt};
    use conic_core::{Domain, VarId, VarRef};

    fn var(id: u32, name: &str) -> VarRef {
        VarRef::new(VarId::new(id), name, Domain::Reals)
    }

    #[test]
    fn test_display() {
        let x = var(0, "x");
        let y = var(1, "y");
        let z = var(2, "z");

        let rel = (x.square() + y.square()).le(z.square());

        assert_eq!(rel.to_string(), "x^2 + y^2 <= z^2");
        assert_eq!(rel.degree(), 2);
        assert_eq!(rel.bounds(), (None, Some(0.0)));
    }

    #[test]
    fn test_residual() {
        // GIVEN
        let x = var(0, "x");
        let assignment = Assignment::new().with(&x, 3.0);
        let evaluator = Evaluator::new(&assignment);

        // THEN
        assert_eq!(x.expr().le(5.0).residual(&evaluator).unwrap(), 0.0);
        assert_eq!(x.expr().le(1.0).residual(&evaluator).unwrap(), 2.0);
        assert_eq!(x.expr().ge(4.0).residual(&evaluator).unwrap(), 1.0);
        assert_eq!(x.expr().equals(2.5).residual(&evaluator).unwrap(), 0.5);
        assert!(x.expr().equals(3.0).holds(&evaluator).unwrap());
    }

    #[test]
    fn test_body() {
        let x = var(0, "x");
        let y = var(1, "y");

        let rel = x.expr().ge(y.expr());

        assert_eq!(rel.body().to_string(), "x - y");
    }
}
