//! Expression evaluation.

use crate::{Expr, ExprError, ExprResult};
use conic_core::{VarId, VarRef};
use std::collections::HashMap;

/// Values for a set of variables.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Assignment {
    values: HashMap<VarId, f64>,
}

impl Assignment {
    /// Create an empty assignment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the value of a variable.
    pub fn insert(&mut self, id: VarId, value: f64) {
        self.values.insert(id, value);
    }

    /// Builder form of `insert`.
    pub fn with(mut self, var: &VarRef, value: f64) -> Self {
        self.insert(var.id(), value);
        self
    }

    /// Get the value of a variable.
    pub fn get(&self, id: VarId) -> Option<f64> {
        self.values.get(&id).copied()
    }

    /// Check if a variable has a value.
    pub fn contains(&self, id: VarId) -> bool {
        self.values.contains_key(&id)
    }

    /// Iterate over all (variable, value) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (VarId, f64)> + '_ {
        self.values.iter().map(|(id, v)| (*id, *v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl FromIterator<(VarId, f64)> for Assignment {
    fn from_iter<I: IntoIterator<Item = (VarId, f64)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

/// Expression evaluator.
///
/// Evaluates expressions against a fixed assignment.
pub struct Evaluator<'a> {
    assignment: &'a Assignment,
}

impl<'a> Evaluator<'a> {
    /// Create a new evaluator.
    pub fn new(assignment: &'a Assignment) -> Self {
        Self { assignment }
    }

    /// Evaluate an expression. Fails on unbound variables and non-finite results.
    pub fn eval(&self, expr: &Expr) -> ExprResult<f64> {
        let value = self.eval_node(expr)?;
        if value.is_finite() {
            Ok(value)
        } else {
            Err(ExprError::non_finite(expr.to_string()))
        }
    }

    fn eval_node(&self, expr: &Expr) -> ExprResult<f64> {
        match expr {
            Expr::Const(c) => Ok(*c),
            Expr::Var(v) => self.eval_var(v),
            Expr::Neg(inner) => Ok(-self.eval_node(inner)?),
            Expr::Sum(terms) => terms
                .iter()
                .try_fold(0.0, |acc, t| -> ExprResult<f64> {
                    Ok(acc + self.eval_node(t)?)
                }),
            Expr::Product(left, right) => Ok(self.eval_node(left)? * self.eval_node(right)?),
            Expr::Pow(base, exponent) => {
                let base = self.eval_node(base)?;
                Ok(match i32::try_from(*exponent) {
                    Ok(n) => base.powi(n),
                    Err(_) => base.powf(f64::from(*exponent)),
                })
            }
        }
    }

    fn eval_var(&self, var: &VarRef) -> ExprResult<f64> {
        self.assignment
            .get(var.id())
            .ok_or_else(|| ExprError::unbound_variable(var.name(), var.id()))
    }
}
