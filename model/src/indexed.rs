//! Components defined over the members of an index set.

use conic_core::{ConstraintId, VarRef};
use std::collections::HashMap;

use crate::set::Member;

/// A family of components, one per member of an index set.
///
/// Entries keep the set's order. Members for which no component was built
/// (a constraint rule that skipped them) have no entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Indexed<T> {
    name: String,
    set: String,
    entries: Vec<(Member, T)>,
    positions: HashMap<Member, usize>,
}

/// Variables indexed by set members.
pub type IndexedVar = Indexed<VarRef>;

/// Registered constraints indexed by set members.
pub type IndexedConstraint = Indexed<ConstraintId>;

impl<T> Indexed<T> {
    pub(crate) fn new(name: impl Into<String>, set: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            set: set.into(),
            entries: Vec::new(),
            positions: HashMap::new(),
        }
    }

    pub(crate) fn push(&mut self, member: Member, value: T) {
        self.positions.insert(member.clone(), self.entries.len());
        self.entries.push((member, value));
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name of the index set.
    pub fn set_name(&self) -> &str {
        &self.set
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, member: impl Into<Member>) -> Option<&T> {
        self.positions
            .get(&member.into())
            .map(|&i| &self.entries[i].1)
    }

    pub fn contains(&self, member: impl Into<Member>) -> bool {
        self.positions.contains_key(&member.into())
    }

    /// Iterate over (member, component) pairs in set order.
    pub fn iter(&self) -> impl Iterator<Item = (&Member, &T)> {
        self.entries.iter().map(|(m, v)| (m, v))
    }

    pub fn members(&self) -> impl Iterator<Item = &Member> {
        self.entries.iter().map(|(m, _)| m)
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.entries.iter().map(|(_, v)| v)
    }
}

/// Name of the element of `name` at `member`, e.g. `x[Film]`.
pub fn element_name(name: &str, member: &Member) -> String {
    format!("{}[{}]", name, member)
}
