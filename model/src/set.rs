//! Finite ordered index sets.
//!
//! Sets index families of variables and constraints. Positions are 1-based:
//! `ord(first()) == 1`, and `at(-1)` is the last member.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::ops::{BitAnd, BitOr, BitXor, Mul, Sub};
use tracing::warn;

use crate::error::{ModelError, ModelResult};

/// A member of an index set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Member {
    Int(i64),
    Str(String),
    /// Members of a cross product. Always flat.
    Tuple(Vec<Member>),
}

impl Member {
    /// Build a tuple member, flattening nested tuples.
    pub fn tuple(parts: impl IntoIterator<Item = Member>) -> Self {
        let mut flat = Vec::new();
        for part in parts {
            match part {
                Member::Tuple(inner) => flat.extend(inner),
                other => flat.push(other),
            }
        }
        Member::Tuple(flat)
    }
}

impl fmt::Display for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Member::Int(i) => write!(f, "{}", i),
            Member::Str(s) => f.write_str(s),
            Member::Tuple(parts) => {
                for (i, part) in parts.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{}", part)?;
                }
                Ok(())
            }
        }
    }
}

impl From<i64> for Member {
    fn from(i: i64) -> Self {
        Member::Int(i)
    }
}

impl From<i32> for Member {
    fn from(i: i32) -> Self {
        Member::Int(i64::from(i))
    }
}

impl From<&str> for Member {
    fn from(s: &str) -> Self {
        Member::Str(s.to_string())
    }
}

impl From<String> for Member {
    fn from(s: String) -> Self {
        Member::Str(s)
    }
}

impl From<&Member> for Member {
    fn from(m: &Member) -> Self {
        m.clone()
    }
}

impl<A: Into<Member>, B: Into<Member>> From<(A, B)> for Member {
    fn from((a, b): (A, B)) -> Self {
        Member::tuple([a.into(), b.into()])
    }
}

/// How a set orders its members.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SetOrdering {
    /// The order members were added in.
    #[default]
    Insertion,
    /// Ascending member order, maintained on every insert.
    Sorted,
}

/// A finite, ordered set of members.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexSet {
    name: String,
    ordering: SetOrdering,
    members: Vec<Member>,
    /// 0-based position of each member in `members`.
    positions: HashMap<Member, usize>,
}

impl IndexSet {
    /// Create an empty insertion-ordered set.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_ordering(name, SetOrdering::Insertion)
    }

    /// Create an empty set kept in ascending order.
    pub fn sorted(name: impl Into<String>) -> Self {
        Self::with_ordering(name, SetOrdering::Sorted)
    }

    pub fn with_ordering(name: impl Into<String>, ordering: SetOrdering) -> Self {
        Self {
            name: name.into(),
            ordering,
            members: Vec::new(),
            positions: HashMap::new(),
        }
    }

    /// Builder form of `add` for several members.
    pub fn with_members<M: Into<Member>>(mut self, members: impl IntoIterator<Item = M>) -> Self {
        for member in members {
            self.add(member);
        }
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ordering(&self) -> SetOrdering {
        self.ordering
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Iterate over members in set order.
    pub fn iter(&self) -> impl Iterator<Item = &Member> {
        self.members.iter()
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn contains(&self, member: &Member) -> bool {
        self.positions.contains_key(member)
    }

    /// Add a member. Returns false, and leaves the set unchanged, if it is
    /// already present.
    pub fn add(&mut self, member: impl Into<Member>) -> bool {
        let member = member.into();
        if self.contains(&member) {
            warn!(set = %self.name, %member, "member already in set; no action taken");
            return false;
        }
        let at = match self.ordering {
            SetOrdering::Insertion => self.members.len(),
            SetOrdering::Sorted => self
                .members
                .binary_search(&member)
                .unwrap_or_else(|slot| slot),
        };
        self.members.insert(at, member);
        self.reindex(at);
        true
    }

    /// Remove a member if present. Returns whether it was.
    pub fn discard(&mut self, member: &Member) -> bool {
        let Some(at) = self.positions.remove(member) else {
            return false;
        };
        self.members.remove(at);
        self.reindex(at);
        true
    }

    /// Remove a member, failing if it is absent.
    pub fn remove(&mut self, member: &Member) -> ModelResult<()> {
        if self.discard(member) {
            Ok(())
        } else {
            Err(ModelError::unknown_member(&self.name, member))
        }
    }

    pub fn clear(&mut self) {
        self.members.clear();
        self.positions.clear();
    }

    fn reindex(&mut self, from: usize) {
        for (i, member) in self.members.iter().enumerate().skip(from) {
            self.positions.insert(member.clone(), i);
        }
    }

    // ==================== Positions ====================

    /// 1-based position of a member.
    pub fn ord(&self, member: &Member) -> ModelResult<usize> {
        self.positions
            .get(member)
            .map(|i| i + 1)
            .ok_or_else(|| ModelError::unknown_member(&self.name, member))
    }

    /// Member at a 1-based position. Negative positions count from the end.
    pub fn at(&self, position: isize) -> ModelResult<&Member> {
        let len = self.members.len() as isize;
        let index = match position {
            p if p >= 1 && p <= len => p - 1,
            p if p <= -1 && p >= -len => len + p,
            _ => return Err(ModelError::set_position(&self.name, position, self.len())),
        };
        Ok(&self.members[index as usize])
    }

    pub fn first(&self) -> ModelResult<&Member> {
        self.at(1)
    }

    pub fn last(&self) -> ModelResult<&Member> {
        self.at(-1)
    }

    /// The member `step` positions after `member`. Fails past either end.
    pub fn next(&self, member: &Member, step: isize) -> ModelResult<&Member> {
        let target = self.ord(member)? as isize + step;
        if target < 1 {
            return Err(ModelError::set_position(&self.name, target, self.len()));
        }
        self.at(target)
    }

    /// Like `next`, wrapping around the ends.
    pub fn nextw(&self, member: &Member, step: isize) -> ModelResult<&Member> {
        let len = self.members.len() as isize;
        let target = (self.ord(member)? as isize - 1 + step).rem_euclid(len);
        self.at(target + 1)
    }

    pub fn prev(&self, member: &Member, step: isize) -> ModelResult<&Member> {
        self.next(member, -step)
    }

    pub fn prevw(&self, member: &Member, step: isize) -> ModelResult<&Member> {
        self.nextw(member, -step)
    }

    // ==================== Set algebra ====================

    /// Members of `self` followed by the members of `other` not in `self`.
    pub fn union(&self, other: &IndexSet) -> IndexSet {
        self.derive(format!("{} | {}", self.name, other.name))
            .with_members(self.iter().chain(other.iter().filter(|m| !self.contains(m))))
    }

    /// Members of `self` that are also in `other`, in `self` order.
    pub fn intersection(&self, other: &IndexSet) -> IndexSet {
        self.derive(format!("{} & {}", self.name, other.name))
            .with_members(self.iter().filter(|m| other.contains(m)))
    }

    /// Members of `self` not in `other`.
    pub fn difference(&self, other: &IndexSet) -> IndexSet {
        self.derive(format!("{} - {}", self.name, other.name))
            .with_members(self.iter().filter(|m| !other.contains(m)))
    }

    /// Members in exactly one of the two sets.
    pub fn symmetric_difference(&self, other: &IndexSet) -> IndexSet {
        let left = self.iter().filter(|m| !other.contains(m));
        let right = other.iter().filter(|m| !self.contains(m));
        self.derive(format!("{} ^ {}", self.name, other.name))
            .with_members(left.chain(right))
    }

    /// Cross product. Members are flat tuples in lexicographic set order.
    pub fn cross(&self, other: &IndexSet) -> IndexSet {
        let pairs = self
            .iter()
            .flat_map(|a| other.iter().map(move |b| Member::tuple([a.clone(), b.clone()])));
        self.derive(format!("{} * {}", self.name, other.name))
            .with_members(pairs)
    }

    pub fn is_subset(&self, other: &IndexSet) -> bool {
        self.iter().all(|m| other.contains(m))
    }

    pub fn is_superset(&self, other: &IndexSet) -> bool {
        other.is_subset(self)
    }

    pub fn is_disjoint(&self, other: &IndexSet) -> bool {
        !self.iter().any(|m| other.contains(m))
    }

    fn derive(&self, name: String) -> IndexSet {
        IndexSet::with_ordering(name, self.ordering)
    }
}

impl fmt::Display for IndexSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {{", self.name)?;
        for (i, member) in self.members.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", member)?;
        }
        f.write_str("}")
    }
}

impl<'a> IntoIterator for &'a IndexSet {
    type Item = &'a Member;
    type IntoIter = std::slice::Iter<'a, Member>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.iter()
    }
}

impl BitOr for &IndexSet {
    type Output = IndexSet;

    fn bitor(self, rhs: &IndexSet) -> IndexSet {
        self.union(rhs)
    }
}

impl BitAnd for &IndexSet {
    type Output = IndexSet;

    fn bitand(self, rhs: &IndexSet) -> IndexSet {
        self.intersection(rhs)
    }
}

impl Sub for &IndexSet {
    type Output = IndexSet;

    fn sub(self, rhs: &IndexSet) -> IndexSet {
        self.difference(rhs)
    }
}

impl BitXor for &IndexSet {
    type Output = IndexSet;

    fn bitxor(self, rhs: &IndexSet) -> IndexSet {
        self.symmetric_difference(rhs)
    }
}

impl Mul for &IndexSet {
    type Output = IndexSet;

    fn mul(self, rhs: &IndexSet) -> IndexSet {
        self.cross(rhs)
    }
}
