//! The Model - owner of variables, constraints and suffixes.

use conic_constraint::{
    ConePoint, Constraint, ConstraintChecker, SecondOrderCone, Violation, Violations,
};
use conic_core::{ConstraintId, Domain, VarId, VarRef, Variable};
use conic_expr::Assignment;
use std::collections::{BTreeMap, HashMap, HashSet};
use tracing::debug;

use crate::config::ModelConfig;
use crate::data::{ModelData, VarDecl};
use crate::error::{ModelError, ModelResult};
use crate::indexed::{element_name, IndexedConstraint, IndexedVar};
use crate::set::{IndexSet, Member};
use crate::suffix::{Suffix, SuffixDirection};

/// A constraint registered with a model.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstraintData {
    /// Unique identifier.
    pub id: ConstraintId,
    /// Registration name.
    pub name: String,
    /// The constraint itself.
    pub constraint: Constraint,
    /// Inactive constraints are skipped by feasibility checks.
    pub active: bool,
}

/// An optimization model.
#[derive(Debug, Clone)]
pub struct Model {
    name: String,
    config: ModelConfig,

    /// Variables, indexed by `VarId`.
    vars: Vec<Variable>,
    /// Variable ID lookup by name.
    var_names: HashMap<String, VarId>,

    /// Constraints, indexed by `ConstraintId`.
    constraints: Vec<ConstraintData>,
    /// Constraint ID lookup by name.
    constraint_names: HashMap<String, ConstraintId>,

    suffixes: BTreeMap<String, Suffix>,

    sets: BTreeMap<String, IndexSet>,
    indexed_vars: BTreeMap<String, IndexedVar>,
    indexed_constraints: BTreeMap<String, IndexedConstraint>,
}

impl Model {
    /// Create an empty model with the default configuration.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            config: ModelConfig::default(),
            vars: Vec::new(),
            var_names: HashMap::new(),
            constraints: Vec::new(),
            constraint_names: HashMap::new(),
            suffixes: BTreeMap::new(),
            sets: BTreeMap::new(),
            indexed_vars: BTreeMap::new(),
            indexed_constraints: BTreeMap::new(),
        }
    }

    /// Create an empty model with a validated configuration.
    pub fn with_config(name: impl Into<String>, config: ModelConfig) -> ModelResult<Self> {
        config.validate()?;
        let mut model = Self::new(name);
        model.config = config;
        Ok(model)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    // ==================== Variables ====================

    /// Add a variable with the bounds implied by its domain.
    pub fn add_var(&mut self, name: impl Into<String>, domain: Domain) -> ModelResult<VarRef> {
        self.add_var_bounded(name, domain, None, None)
    }

    /// Add a variable with explicit bounds, intersected with its domain.
    pub fn add_var_bounded(
        &mut self,
        name: impl Into<String>,
        domain: Domain,
        lb: Option<f64>,
        ub: Option<f64>,
    ) -> ModelResult<VarRef> {
        let name = name.into();
        if self.var_names.contains_key(&name) || self.indexed_vars.contains_key(&name) {
            return Err(ModelError::DuplicateVariable(name));
        }

        let id = VarId::new(self.vars.len() as u32);
        let var = Variable::new(id, name.as_str(), domain).with_bounds(lb, ub)?;
        debug!(model = %self.name, var = %name, %domain, "adding variable");
        Ok(self.push_var(var))
    }

    fn push_var(&mut self, var: Variable) -> VarRef {
        let handle = var.to_ref();
        self.var_names.insert(var.name.to_string(), var.id);
        self.vars.push(var);
        handle
    }

    /// Add one variable per member of the set `set`, named `name[member]`.
    pub fn add_indexed_var(
        &mut self,
        name: impl Into<String>,
        set: &str,
        domain: Domain,
    ) -> ModelResult<IndexedVar> {
        self.add_indexed_var_bounded(name, set, domain, None, None)
    }

    /// Indexed form of `add_var_bounded`. Every element gets the same bounds.
    ///
    /// Either all elements are added or none are.
    pub fn add_indexed_var_bounded(
        &mut self,
        name: impl Into<String>,
        set: &str,
        domain: Domain,
        lb: Option<f64>,
        ub: Option<f64>,
    ) -> ModelResult<IndexedVar> {
        let name = name.into();
        if self.var_names.contains_key(&name) || self.indexed_vars.contains_key(&name) {
            return Err(ModelError::DuplicateVariable(name));
        }
        let members = self.set(set)?.members().to_vec();

        let mut staged = Vec::with_capacity(members.len());
        let mut seen = HashSet::new();
        for (offset, member) in members.into_iter().enumerate() {
            let element = element_name(&name, &member);
            if self.var_names.contains_key(&element) || !seen.insert(element.clone()) {
                return Err(ModelError::DuplicateVariable(element));
            }
            let id = VarId::new((self.vars.len() + offset) as u32);
            let var = Variable::new(id, element.as_str(), domain).with_bounds(lb, ub)?;
            staged.push((member, var));
        }

        debug!(
            model = %self.name,
            var = %name,
            set,
            elements = staged.len(),
            %domain,
            "adding indexed variable"
        );
        let mut indexed = IndexedVar::new(name.as_str(), set);
        for (member, var) in staged {
            let handle = self.push_var(var);
            indexed.push(member, handle);
        }
        self.indexed_vars.insert(name, indexed.clone());
        Ok(indexed)
    }

    /// Look up an indexed variable by name.
    pub fn indexed_var(&self, name: &str) -> ModelResult<&IndexedVar> {
        self.indexed_vars
            .get(name)
            .ok_or_else(|| ModelError::UnknownVariable(name.to_string()))
    }

    /// Handle of the element of indexed variable `name` at `member`.
    pub fn var_at(&self, name: &str, member: impl Into<Member>) -> ModelResult<VarRef> {
        let indexed = self.indexed_var(name)?;
        let member = member.into();
        indexed
            .get(&member)
            .cloned()
            .ok_or_else(|| ModelError::unknown_member(indexed.set_name(), &member))
    }

    /// Look up a variable handle by name.
    pub fn var(&self, name: &str) -> ModelResult<VarRef> {
        self.var_names
            .get(name)
            .map(|id| self.vars[id.index()].to_ref())
            .ok_or_else(|| ModelError::UnknownVariable(name.to_string()))
    }

    /// Get a variable record by ID.
    pub fn variable(&self, id: VarId) -> Option<&Variable> {
        self.vars.get(id.index())
    }

    /// Iterate over all variables in creation order.
    pub fn variables(&self) -> impl Iterator<Item = &Variable> {
        self.vars.iter()
    }

    pub fn var_count(&self) -> usize {
        self.vars.len()
    }

    /// Current value of a variable.
    pub fn value(&self, var: &VarRef) -> ModelResult<Option<f64>> {
        Ok(self.owned(var)?.value)
    }

    /// Assign a value, validating it when `validate_values` is set.
    pub fn set_value(&mut self, var: &VarRef, value: f64) -> ModelResult<()> {
        let validate = self.config.validate_values;
        let v = self.owned_mut(var)?;
        if validate {
            v.validate(value)?;
        }
        v.value = Some(value);
        Ok(())
    }

    /// Assign a value and mark the variable fixed.
    pub fn fix(&mut self, var: &VarRef, value: f64) -> ModelResult<()> {
        self.set_value(var, value)?;
        self.owned_mut(var)?.fixed = true;
        Ok(())
    }

    /// Release a fixed variable, keeping its value.
    pub fn unfix(&mut self, var: &VarRef) -> ModelResult<()> {
        self.owned_mut(var)?.fixed = false;
        Ok(())
    }

    /// Current values of all variables that have one.
    pub fn assignment(&self) -> Assignment {
        self.vars
            .iter()
            .filter_map(|v| v.value.map(|value| (v.id, value)))
            .collect()
    }

    fn owns(&self, var: &VarRef) -> bool {
        self.vars
            .get(var.id().index())
            .is_some_and(|v| v.name.as_ref() == var.name() && v.domain == var.domain())
    }

    fn owned(&self, var: &VarRef) -> ModelResult<&Variable> {
        if !self.owns(var) {
            return Err(ModelError::UnknownVariable(var.name().to_string()));
        }
        Ok(&self.vars[var.id().index()])
    }

    fn owned_mut(&mut self, var: &VarRef) -> ModelResult<&mut Variable> {
        if !self.owns(var) {
            return Err(ModelError::UnknownVariable(var.name().to_string()));
        }
        Ok(&mut self.vars[var.id().index()])
    }

    // ==================== Constraints ====================

    /// Register a constraint under a unique name.
    pub fn add_constraint(
        &mut self,
        name: impl Into<String>,
        constraint: impl Into<Constraint>,
    ) -> ModelResult<ConstraintId> {
        let name = name.into();
        let constraint = constraint.into();
        if self.indexed_constraints.contains_key(&name) {
            return Err(ModelError::DuplicateConstraint(name));
        }
        self.admit_constraint(&name, &constraint)?;
        Ok(self.push_constraint(name, constraint))
    }

    /// Check that `constraint` may be registered as `name`.
    fn admit_constraint(&self, name: &str, constraint: &Constraint) -> ModelResult<()> {
        if self.constraint_names.contains_key(name) {
            return Err(ModelError::DuplicateConstraint(name.to_string()));
        }
        if let Some(foreign) = constraint.variables().into_iter().find(|v| !self.owns(v)) {
            return Err(ModelError::foreign_variable(name, foreign.name()));
        }
        Ok(())
    }

    fn push_constraint(&mut self, name: String, constraint: Constraint) -> ConstraintId {
        let id = ConstraintId::new(self.constraints.len() as u32);
        debug!(
            model = %self.name,
            constraint = %name,
            kind = %constraint.kind(),
            "registering constraint"
        );
        self.constraint_names.insert(name.clone(), id);
        self.constraints.push(ConstraintData {
            id,
            name,
            constraint,
            active: true,
        });
        id
    }

    /// Build one constraint per member of the set `set` with `rule` and
    /// register each as `name[member]`.
    ///
    /// `rule` returns `Ok(None)` to skip a member. Every element is built and
    /// checked before any is registered, so a failing rule or a rejected
    /// element leaves the model unchanged.
    pub fn add_indexed_constraint<C, F>(
        &mut self,
        name: impl Into<String>,
        set: &str,
        mut rule: F,
    ) -> ModelResult<IndexedConstraint>
    where
        C: Into<Constraint>,
        F: FnMut(&Member) -> ModelResult<Option<C>>,
    {
        let name = name.into();
        if self.constraint_names.contains_key(&name)
            || self.indexed_constraints.contains_key(&name)
        {
            return Err(ModelError::DuplicateConstraint(name));
        }
        let members = self.set(set)?.members().to_vec();

        let mut staged = Vec::new();
        let mut seen = HashSet::new();
        for member in members {
            let Some(constraint) = rule(&member)? else {
                continue;
            };
            let constraint = constraint.into();
            let element = element_name(&name, &member);
            if !seen.insert(element.clone()) {
                return Err(ModelError::DuplicateConstraint(element));
            }
            self.admit_constraint(&element, &constraint)?;
            staged.push((member, element, constraint));
        }

        debug!(
            model = %self.name,
            constraint = %name,
            set,
            elements = staged.len(),
            "registering indexed constraint"
        );
        let mut indexed = IndexedConstraint::new(name.as_str(), set);
        for (member, element, constraint) in staged {
            let id = self.push_constraint(element, constraint);
            indexed.push(member, id);
        }
        self.indexed_constraints.insert(name, indexed.clone());
        Ok(indexed)
    }

    /// Look up an indexed constraint by name.
    pub fn indexed_constraint(&self, name: &str) -> ModelResult<&IndexedConstraint> {
        self.indexed_constraints
            .get(name)
            .ok_or_else(|| ModelError::UnknownConstraint(name.to_string()))
    }

    /// Iterate over indexed constraints in name order.
    pub fn indexed_constraints(&self) -> impl Iterator<Item = &IndexedConstraint> {
        self.indexed_constraints.values()
    }

    /// The element of indexed constraint `name` at `member`.
    pub fn constraint_at(
        &self,
        name: &str,
        member: impl Into<Member>,
    ) -> ModelResult<&ConstraintData> {
        let indexed = self.indexed_constraint(name)?;
        let member = member.into();
        let id = indexed
            .get(&member)
            .ok_or_else(|| ModelError::unknown_member(indexed.name(), &member))?;
        Ok(&self.constraints[id.index()])
    }

    /// Build `‖(x, y)‖₂ ≤ z` over `point` and register it.
    ///
    /// Fails with a precondition violation, and registers nothing, if
    /// `point.z()` is not tagged non-negative.
    pub fn add_second_order_cone(
        &mut self,
        name: impl Into<String>,
        point: &impl ConePoint,
    ) -> ModelResult<ConstraintId> {
        let cone = SecondOrderCone::new(point)?;
        self.add_constraint(name, cone)
    }

    /// Look up a registered constraint by name.
    pub fn constraint(&self, name: &str) -> ModelResult<&ConstraintData> {
        self.constraint_names
            .get(name)
            .map(|id| &self.constraints[id.index()])
            .ok_or_else(|| ModelError::UnknownConstraint(name.to_string()))
    }

    /// Get a registered constraint by ID.
    pub fn constraint_by_id(&self, id: ConstraintId) -> Option<&ConstraintData> {
        self.constraints.get(id.index())
    }

    /// Iterate over all constraints in registration order.
    pub fn constraints(&self) -> impl Iterator<Item = &ConstraintData> {
        self.constraints.iter()
    }

    /// Iterate over active constraints in registration order.
    pub fn active_constraints(&self) -> impl Iterator<Item = &ConstraintData> {
        self.constraints.iter().filter(|c| c.active)
    }

    /// Iterate over active cone constraints.
    pub fn conic_constraints(&self) -> impl Iterator<Item = &ConstraintData> {
        self.active_constraints().filter(|c| c.constraint.is_conic())
    }

    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }

    pub fn activate(&mut self, name: &str) -> ModelResult<()> {
        self.set_active(name, true)
    }

    pub fn deactivate(&mut self, name: &str) -> ModelResult<()> {
        self.set_active(name, false)
    }

    fn set_active(&mut self, name: &str, active: bool) -> ModelResult<()> {
        let id = *self
            .constraint_names
            .get(name)
            .ok_or_else(|| ModelError::UnknownConstraint(name.to_string()))?;
        debug!(model = %self.name, constraint = name, active, "setting constraint activity");
        self.constraints[id.index()].active = active;
        Ok(())
    }

    // ==================== Sets ====================

    /// Add an index set under its own name.
    pub fn add_set(&mut self, set: IndexSet) -> ModelResult<&IndexSet> {
        let name = set.name().to_string();
        if self.sets.contains_key(&name) {
            return Err(ModelError::DuplicateSet(name));
        }
        debug!(model = %self.name, set = %name, members = set.len(), "adding set");
        Ok(&*self.sets.entry(name).or_insert(set))
    }

    pub fn set(&self, name: &str) -> ModelResult<&IndexSet> {
        self.sets
            .get(name)
            .ok_or_else(|| ModelError::UnknownSet(name.to_string()))
    }

    /// Iterate over sets in name order.
    pub fn sets(&self) -> impl Iterator<Item = &IndexSet> {
        self.sets.values()
    }

    // ==================== Declarations ====================

    /// Declare a variable, returning one handle per created variable.
    ///
    /// The declared value, if any, is assigned through `set_value` and so is
    /// validated when `validate_values` is set.
    pub fn declare_var(&mut self, decl: &VarDecl) -> ModelResult<Vec<VarRef>> {
        let handles: Vec<VarRef> = match &decl.index {
            Some(set) => self
                .add_indexed_var_bounded(decl.name.as_str(), set, decl.domain, decl.lb, decl.ub)?
                .values()
                .cloned()
                .collect(),
            None => vec![self.add_var_bounded(decl.name.as_str(), decl.domain, decl.lb, decl.ub)?],
        };
        for handle in &handles {
            if let Some(value) = decl.value {
                self.set_value(handle, value)?;
            }
            self.owned_mut(handle)?.fixed = decl.fixed;
        }
        Ok(handles)
    }

    /// Declare the sets, then the variables, of `data`.
    pub fn load(&mut self, data: &ModelData) -> ModelResult<()> {
        for set in &data.sets {
            self.add_set(set.to_set())?;
        }
        for var in &data.vars {
            self.declare_var(var)?;
        }
        Ok(())
    }

    // ==================== Suffixes ====================

    /// Declare a suffix.
    pub fn add_suffix(
        &mut self,
        name: impl Into<String>,
        direction: SuffixDirection,
    ) -> ModelResult<&mut Suffix> {
        let name = name.into();
        if self.suffixes.contains_key(&name) {
            return Err(ModelError::DuplicateSuffix(name));
        }
        Ok(self
            .suffixes
            .entry(name.clone())
            .or_insert_with(|| Suffix::new(name, direction)))
    }

    pub fn suffix(&self, name: &str) -> ModelResult<&Suffix> {
        self.suffixes
            .get(name)
            .ok_or_else(|| ModelError::UnknownSuffix(name.to_string()))
    }

    pub fn suffix_mut(&mut self, name: &str) -> ModelResult<&mut Suffix> {
        self.suffixes
            .get_mut(name)
            .ok_or_else(|| ModelError::UnknownSuffix(name.to_string()))
    }

    /// Suffixes a solver should fill in, in name order.
    pub fn import_suffixes(&self) -> impl Iterator<Item = &Suffix> {
        self.suffixes.values().filter(|s| s.direction().is_import())
    }

    /// Suffixes a solver should receive, in name order.
    pub fn export_suffixes(&self) -> impl Iterator<Item = &Suffix> {
        self.suffixes.values().filter(|s| s.direction().is_export())
    }

    // ==================== Feasibility ====================

    /// Check the model's current variable values.
    pub fn check(&self) -> ModelResult<Violations> {
        self.check_assignment(&self.assignment())
    }

    /// Check an assignment against variable domains, then constraints.
    ///
    /// Every variable referenced by a checked constraint must be assigned.
    /// Domain violations are always errors: membership is exact, as in
    /// `set_value`. The feasibility tolerance applies to constraints only.
    /// Constraints over a non-finite value are skipped, since the domain
    /// check already reports that value.
    pub fn check_assignment(&self, assignment: &Assignment) -> ModelResult<Violations> {
        let mut violations = self.check_domains(assignment);

        let non_finite: HashSet<VarId> = assignment
            .iter()
            .filter(|(_, value)| !value.is_finite())
            .map(|(id, _)| id)
            .collect();

        let checker = ConstraintChecker::new(self.config.feasibility_tolerance);
        for data in self
            .constraints
            .iter()
            .filter(|c| c.active || self.config.check_inactive)
        {
            let vars = data.constraint.variables();
            if vars.iter().any(|v| non_finite.contains(&v.id())) {
                debug!(constraint = %data.name, "skipping constraint over non-finite values");
                continue;
            }
            if let Some(violation) = checker.check(&data.name, &data.constraint, assignment)? {
                violations.push(violation.with_constraint(data.id));
            }
        }

        debug!(
            model = %self.name,
            violations = violations.len(),
            errors = violations.errors().count(),
            "checked assignment"
        );
        Ok(violations)
    }

    /// Domain and bound violations of assigned variables, in id order.
    fn check_domains(&self, assignment: &Assignment) -> Violations {
        let mut values: Vec<(VarId, f64)> = assignment.iter().collect();
        values.sort_by_key(|(id, _)| *id);

        let mut violations = Violations::new();
        for (id, value) in values {
            let Some(var) = self.variable(id) else {
                continue;
            };
            if let Err(e) = var.validate(value) {
                let residual = domain_residual(var, value);
                let violation = Violation::error(var.name.as_ref(), e.to_string(), residual);
                violations.push(violation.with_var(id));
            }
        }
        violations
    }
}

/// Distance from `value` to the variable's feasible set.
///
/// Always positive for a value that fails validation. The excluded boundary
/// of an open domain (0 for `PositiveReals`) is at distance 0 from the set,
/// so it reports `f64::EPSILON`.
fn domain_residual(var: &Variable, value: f64) -> f64 {
    if !value.is_finite() {
        return f64::INFINITY;
    }
    let below = var.lower().map_or(0.0, |lb| (lb - value).max(0.0));
    let above = var.upper().map_or(0.0, |ub| (value - ub).max(0.0));
    let fractional = if var.domain.is_integer() {
        (value - value.round()).abs()
    } else {
        0.0
    };
    let distance = below.max(above).max(fractional);
    if distance == 0.0 && var.validate(value).is_err() {
        f64::EPSILON
    } else {
        distance
    }
}
