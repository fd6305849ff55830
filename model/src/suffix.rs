//! Suffixes: named numeric data attached to model components.
//!
//! A solver interface exports suffixes marked for export (e.g. scaling
//! factors) and fills suffixes marked for import (e.g. constraint duals).

use conic_core::ComponentRef;
use std::collections::BTreeMap;

/// Which way suffix data flows relative to a solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SuffixDirection {
    /// Never sent to or read from a solver.
    #[default]
    Local,
    /// Sent to the solver.
    Export,
    /// Read back from the solver.
    Import,
    /// Both sent and read back.
    ImportExport,
}

impl SuffixDirection {
    pub fn is_import(&self) -> bool {
        matches!(self, SuffixDirection::Import | SuffixDirection::ImportExport)
    }

    pub fn is_export(&self) -> bool {
        matches!(self, SuffixDirection::Export | SuffixDirection::ImportExport)
    }
}

/// A named map from components to values.
#[derive(Debug, Clone, PartialEq)]
pub struct Suffix {
    name: String,
    direction: SuffixDirection,
    values: BTreeMap<ComponentRef, f64>,
}

impl Suffix {
    pub fn new(name: impl Into<String>, direction: SuffixDirection) -> Self {
        Self {
            name: name.into(),
            direction,
            values: BTreeMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn direction(&self) -> SuffixDirection {
        self.direction
    }

    /// Set the value for a component, returning the previous one.
    pub fn set(&mut self, component: impl Into<ComponentRef>, value: f64) -> Option<f64> {
        self.values.insert(component.into(), value)
    }

    pub fn get(&self, component: impl Into<ComponentRef>) -> Option<f64> {
        self.values.get(&component.into()).copied()
    }

    pub fn remove(&mut self, component: impl Into<ComponentRef>) -> Option<f64> {
        self.values.remove(&component.into())
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    /// Iterate over (component, value) pairs in component order.
    pub fn iter(&self) -> impl Iterator<Item = (ComponentRef, f64)> + '_ {
        self.values.iter().map(|(c, v)| (*c, *v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
