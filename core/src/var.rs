//! Decision variables.
//!
//! A `Variable` is the model-owned record of a decision variable: its domain,
//! optional bounds, and current value. A `VarRef` is the handle that appears
//! inside expressions; it carries the id, the name, and the domain tag so a
//! constraint can inspect a variable's domain without consulting the model.

use crate::{Domain, DomainError, DomainResult, VarId};
use std::fmt;
use std::sync::Arc;

/// A decision variable owned by a model.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    /// Unique identifier.
    pub id: VarId,
    /// Variable name.
    pub name: Arc<str>,
    /// Domain tag.
    pub domain: Domain,
    /// Explicit lower bound, already intersected with the domain.
    lb: Option<f64>,
    /// Explicit upper bound, already intersected with the domain.
    ub: Option<f64>,
    /// Current value, if one has been assigned.
    pub value: Option<f64>,
    /// Whether the value is fixed.
    pub fixed: bool,
}

impl Variable {
    /// Create a new variable with the bounds implied by its domain.
    pub fn new(id: VarId, name: impl Into<Arc<str>>, domain: Domain) -> Self {
        let (lb, ub) = domain.bounds();
        Self {
            id,
            name: name.into(),
            domain,
            lb,
            ub,
            value: None,
            fixed: false,
        }
    }

    /// Narrow the variable's bounds.
    ///
    /// Bounds are intersected with the domain's own bounds, so a looser
    /// bound than the domain allows is silently tightened.
    pub fn with_bounds(mut self, lb: Option<f64>, ub: Option<f64>) -> DomainResult<Self> {
        let lb = match (self.lb, lb) {
            (Some(a), Some(b)) => Some(a.max(b)),
            (a, b) => a.or(b),
        };
        let ub = match (self.ub, ub) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        };

        let nan = lb.is_some_and(f64::is_nan) || ub.is_some_and(f64::is_nan);
        let inverted = matches!((lb, ub), (Some(l), Some(u)) if l > u);
        if nan || inverted {
            return Err(DomainError::invalid_bounds(self.name.as_ref(), lb, ub));
        }

        self.lb = lb;
        self.ub = ub;
        Ok(self)
    }

    /// Effective lower bound.
    pub fn lower(&self) -> Option<f64> {
        self.lb
    }

    /// Effective upper bound.
    pub fn upper(&self) -> Option<f64> {
        self.ub
    }

    /// Check a candidate value against the domain and bounds.
    pub fn validate(&self, value: f64) -> DomainResult<()> {
        if !self.domain.contains(value) {
            return Err(DomainError::value_outside_domain(
                self.name.as_ref(),
                value,
                self.domain,
            ));
        }
        let below = self.lb.is_some_and(|lb| value < lb);
        let above = self.ub.is_some_and(|ub| value > ub);
        if below || above {
            return Err(DomainError::value_outside_bounds(
                self.name.as_ref(),
                value,
                self.lb,
                self.ub,
            ));
        }
        Ok(())
    }

    /// Get a handle to this variable for use in expressions.
    pub fn to_ref(&self) -> VarRef {
        VarRef {
            id: self.id,
            name: Arc::clone(&self.name),
            domain: self.domain,
        }
    }
}

/// A reference to a variable as it appears in expressions.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VarRef {
    id: VarId,
    name: Arc<str>,
    domain: Domain,
}

impl VarRef {
    /// Create a standalone handle. Models hand these out via `Variable::to_ref`.
    pub fn new(id: VarId, name: impl Into<Arc<str>>, domain: Domain) -> Self {
        Self {
            id,
            name: name.into(),
            domain,
        }
    }

    pub fn id(&self) -> VarId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn domain(&self) -> Domain {
        self.domain
    }

    /// Returns true if the variable carries the non-negativity tag.
    pub fn is_non_negative(&self) -> bool {
        self.domain.is_non_negative()
    }
}

impl fmt::Display for VarRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl From<&Variable> for VarRef {
    fn from(var: &Variable) -> Self {
        var.to_ref()
    }
}
