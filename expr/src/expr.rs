//! Expression trees.

use conic_core::{VarId, VarRef};
use std::collections::BTreeMap;
use std::fmt;

/// An algebraic expression over decision variables.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Numeric constant.
    Const(f64),
    /// Reference to a variable.
    Var(VarRef),
    /// Negation.
    Neg(Box<Expr>),
    /// Sum of terms, kept flat.
    Sum(Vec<Expr>),
    /// Product of two factors.
    Product(Box<Expr>, Box<Expr>),
    /// Integer power.
    Pow(Box<Expr>, u32),
}

impl Expr {
    /// Create a constant expression.
    pub fn constant(value: f64) -> Self {
        Expr::Const(value)
    }

    /// Create a variable expression.
    pub fn var(var: &VarRef) -> Self {
        Expr::Var(var.clone())
    }

    /// Sum an iterator of expressions. An empty iterator sums to zero.
    pub fn sum<I>(terms: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Expr>,
    {
        terms
            .into_iter()
            .map(Into::into)
            .fold(Expr::Sum(Vec::new()), |acc, term| acc.add_term(term))
    }

    /// Raise to an integer power.
    pub fn pow(self, exponent: u32) -> Self {
        Expr::Pow(Box::new(self), exponent)
    }

    /// Square this expression.
    pub fn square(self) -> Self {
        self.pow(2)
    }

    /// Append a term, flattening nested sums.
    pub(crate) fn add_term(self, term: Expr) -> Self {
        let mut terms = match self {
            Expr::Sum(terms) => terms,
            other => vec![other],
        };
        match term {
            Expr::Sum(more) => terms.extend(more),
            other => terms.push(other),
        }
        Expr::Sum(terms)
    }

    /// Returns true if this expression references no variables.
    pub fn is_constant(&self) -> bool {
        self.degree() == 0
    }

    /// Polynomial degree of the expression.
    pub fn degree(&self) -> u32 {
        match self {
            Expr::Const(_) => 0,
            Expr::Var(_) => 1,
            Expr::Neg(inner) => inner.degree(),
            Expr::Sum(terms) => terms.iter().map(Expr::degree).max().unwrap_or(0),
            Expr::Product(left, right) => left.degree().saturating_add(right.degree()),
            Expr::Pow(base, exponent) => base.degree().saturating_mul(*exponent),
        }
    }

    /// Variables referenced by this expression, unique and ordered by id.
    pub fn variables(&self) -> Vec<&VarRef> {
        let mut seen = BTreeMap::new();
        self.collect_vars(&mut seen);
        seen.into_values().collect()
    }

    /// Returns true if the expression references the given variable.
    pub fn references(&self, id: VarId) -> bool {
        match self {
            Expr::Const(_) => false,
            Expr::Var(v) => v.id() == id,
            Expr::Neg(inner) => inner.references(id),
            Expr::Sum(terms) => terms.iter().any(|t| t.references(id)),
            Expr::Product(left, right) => left.references(id) || right.references(id),
            Expr::Pow(base, _) => base.references(id),
        }
    }

    fn collect_vars<'a>(&'a self, seen: &mut BTreeMap<VarId, &'a VarRef>) {
        match self {
            Expr::Const(_) => {}
            Expr::Var(v) => {
                seen.entry(v.id()).or_insert(v);
            }
            Expr::Neg(inner) | Expr::Pow(inner, _) => inner.collect_vars(seen),
            Expr::Sum(terms) => terms.iter().for_each(|t| t.collect_vars(seen)),
            Expr::Product(left, right) => {
                left.collect_vars(seen);
                right.collect_vars(seen);
            }
        }
    }

    /// Whether this node needs parentheses when used as a factor.
    fn is_compound(&self) -> bool {
        match self {
            Expr::Sum(terms) => terms.len() > 1,
            Expr::Neg(_) => true,
            Expr::Const(c) => *c < 0.0,
            _ => false,
        }
    }

    fn fmt_factor(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_compound() {
            write!(f, "({})", self)
        } else {
            write!(f, "{}", self)
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Const(c) => write!(f, "{}", c),
            Expr::Var(v) => write!(f, "{}", v),
            Expr::Neg(inner) => {
                write!(f, "-")?;
                inner.fmt_factor(f)
            }
            Expr::Sum(terms) => {
                if terms.is_empty() {
                    return write!(f, "0");
                }
                for (i, term) in terms.iter().enumerate() {
                    match (i, term) {
                        (0, _) => write!(f, "{}", term)?,
                        (_, Expr::Neg(inner)) => {
                            write!(f, " - ")?;
                            inner.fmt_factor(f)?;
                        }
                        (_, Expr::Const(c)) if *c < 0.0 => write!(f, " - {}", -c)?,
                        _ => write!(f, " + {}", term)?,
                    }
                }
                Ok(())
            }
            Expr::Product(left, right) => {
                left.fmt_factor(f)?;
                write!(f, "*")?;
                right.fmt_factor(f)
            }
            Expr::Pow(base, exponent) => {
                match base.as_ref() {
                    Expr::Var(_) => write!(f, "{}", base)?,
                    Expr::Const(c) if *c >= 0.0 => write!(f, "{}", base)?,
                    _ => write!(f, "({})", base)?,
                }
                write!(f, "^{}", exponent)
            }
        }
    }
}

impl From<f64> for Expr {
    fn from(value: f64) -> Self {
        Expr::Const(value)
    }
}

impl From<i32> for Expr {
    fn from(value: i32) -> Self {
        Expr::Const(f64::from(value))
    }
}

impl From<&VarRef> for Expr {
    fn from(var: &VarRef) -> Self {
        Expr::Var(var.clone())
    }
}

impl From<VarRef> for Expr {
    fn from(var: VarRef) -> Self {
        Expr::Var(var)
    }
}
