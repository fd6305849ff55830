//! Arithmetic operators for building expressions.

use crate::Expr;
use conic_core::VarRef;
use std::ops::{Add, Mul, Neg, Sub};

impl<R: Into<Expr>> Add<R> for Expr {
    type Output = Expr;

    fn add(self, rhs: R) -> Expr {
        self.add_term(rhs.into())
    }
}

impl<R: Into<Expr>> Sub<R> for Expr {
    type Output = Expr;

    fn sub(self, rhs: R) -> Expr {
        let rhs: Expr = rhs.into();
        self.add_term(-rhs)
    }
}

impl<R: Into<Expr>> Mul<R> for Expr {
    type Output = Expr;

    fn mul(self, rhs: R) -> Expr {
        Expr::Product(Box::new(self), Box::new(rhs.into()))
    }
}

impl Neg for Expr {
    type Output = Expr;

    fn neg(self) -> Expr {
        match self {
            Expr::Const(c) => Expr::Const(-c),
            Expr::Neg(inner) => *inner,
            other => Expr::Neg(Box::new(other)),
        }
    }
}

impl Add<Expr> for f64 {
    type Output = Expr;

    fn add(self, rhs: Expr) -> Expr {
        Expr::Const(self) + rhs
    }
}

impl Sub<Expr> for f64 {
    type Output = Expr;

    fn sub(self, rhs: Expr) -> Expr {
        Expr::Const(self) - rhs
    }
}

impl Mul<Expr> for f64 {
    type Output = Expr;

    fn mul(self, rhs: Expr) -> Expr {
        Expr::Const(self) * rhs
    }
}

impl Add<Expr> for &VarRef {
    type Output = Expr;

    fn add(self, rhs: Expr) -> Expr {
        Expr::from(self) + rhs
    }
}

impl Sub<Expr> for &VarRef {
    type Output = Expr;

    fn sub(self, rhs: Expr) -> Expr {
        Expr::from(self) - rhs
    }
}

impl Mul<Expr> for &VarRef {
    type Output = Expr;

    fn mul(self, rhs: Expr) -> Expr {
        Expr::from(self) * rhs
    }
}

/// Expression builders on variable handles.
///
/// `VarRef` lives in `conic-core`, so operators between two handles cannot be
/// implemented here; lift one side with `expr()` first.
pub trait VarRefExt {
    /// Lift the handle into an expression.
    fn expr(&self) -> Expr;

    /// `self^exponent`.
    fn pow(&self, exponent: u32) -> Expr {
        self.expr().pow(exponent)
    }

    /// `self^2`.
    fn square(&self) -> Expr {
        self.pow(2)
    }
}

impl VarRefExt for VarRef {
    fn expr(&self) -> Expr {
        Expr::Var(self.clone())
    }
}
