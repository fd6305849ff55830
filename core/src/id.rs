//! Identity types for model components.
//!
//! All identifiers are 32-bit values that are:
//! - Unique within their model
//! - Immutable once assigned
//! - Opaque to external users

use std::fmt;

/// Unique identifier for a decision variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VarId(pub u32);

impl VarId {
    /// Create a new VarId from a raw value.
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw value.
    pub fn raw(&self) -> u32 {
        self.0
    }

    /// Position of the variable in its model's storage.
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for VarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// Unique identifier for a registered constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConstraintId(pub u32);

impl ConstraintId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn raw(&self) -> u32 {
        self.0
    }

    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ConstraintId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "c{}", self.0)
    }
}

/// Unified reference to any model component that can carry suffix data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ComponentRef {
    Var(VarId),
    Constraint(ConstraintId),
}

impl ComponentRef {
    /// Returns true if this refers to a variable.
    pub fn is_var(&self) -> bool {
        matches!(self, ComponentRef::Var(_))
    }

    /// Returns true if this refers to a constraint.
    pub fn is_constraint(&self) -> bool {
        matches!(self, ComponentRef::Constraint(_))
    }

    pub fn as_var(&self) -> Option<VarId> {
        match self {
            ComponentRef::Var(id) => Some(*id),
            ComponentRef::Constraint(_) => None,
        }
    }

    pub fn as_constraint(&self) -> Option<ConstraintId> {
        match self {
            ComponentRef::Var(_) => None,
            ComponentRef::Constraint(id) => Some(*id),
        }
    }
}

impl From<VarId> for ComponentRef {
    fn from(id: VarId) -> Self {
        ComponentRef::Var(id)
    }
}

impl From<ConstraintId> for ComponentRef {
    fn from(id: ConstraintId) -> Self {
        ComponentRef::Constraint(id)
    }
}

impl fmt::Display for ComponentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComponentRef::Var(id) => write!(f, "{}", id),
            ComponentRef::Constraint(id) => write!(f, "{}", id),
        }
    }
}
