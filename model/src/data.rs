//! Declarative model data: sets and variables loadable from JSON.

use conic_core::Domain;
use serde::{Deserialize, Serialize};

use crate::error::ModelResult;
use crate::set::{IndexSet, Member, SetOrdering};

/// Declaration of an index set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetDecl {
    pub name: String,
    #[serde(default)]
    pub ordering: SetOrdering,
    #[serde(default)]
    pub members: Vec<Member>,
}

impl SetDecl {
    pub fn to_set(&self) -> IndexSet {
        IndexSet::with_ordering(self.name.as_str(), self.ordering).with_members(&self.members)
    }
}

/// Declaration of a variable, or of one variable per member of `index`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VarDecl {
    pub name: String,
    #[serde(default)]
    pub domain: Domain,
    /// Name of the index set, for an indexed variable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lb: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ub: Option<f64>,
    /// Initial value, applied to every element of an indexed variable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(default)]
    pub fixed: bool,
}

impl VarDecl {
    pub fn new(name: impl Into<String>, domain: Domain) -> Self {
        Self {
            name: name.into(),
            domain,
            index: None,
            lb: None,
            ub: None,
            value: None,
            fixed: false,
        }
    }

    pub fn indexed_by(mut self, set: impl Into<String>) -> Self {
        self.index = Some(set.into());
        self
    }

    pub fn with_bounds(mut self, lb: Option<f64>, ub: Option<f64>) -> Self {
        self.lb = lb;
        self.ub = ub;
        self
    }

    pub fn with_value(mut self, value: f64) -> Self {
        self.value = Some(value);
        self
    }

    pub fn with_fixed(mut self, fixed: bool) -> Self {
        self.fixed = fixed;
        self
    }
}

/// Sets and variables to declare on a model, in order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelData {
    pub sets: Vec<SetDecl>,
    pub vars: Vec<VarDecl>,
}

impl ModelData {
    pub fn from_json(json: &str) -> ModelResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> ModelResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
