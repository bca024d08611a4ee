use std::collections::{BTreeSet, HashMap};

use crate::error::Result;
use crate::solver::constraint::Constraint;
use crate::solver::state::State;
use crate::solver::value::Value;

pub type ConstraintId = usize;

/// The constraint graph: an immutable-after-construction collection of
/// constraints plus the derived indices the propagators and heuristics
/// rely on.
///
/// All three indices are built once here and are pure lookups afterwards:
/// variable to constraints mentioning it, variable pair to constraints
/// mentioning both (arc consistency), and variable to co-occurring
/// neighbor names.
pub struct Csp<V: Value> {
    constraints: Vec<Box<dyn Constraint<V>>>,
    by_variable: HashMap<String, Vec<ConstraintId>>,
    by_pair: HashMap<String, HashMap<String, Vec<ConstraintId>>>,
    neighbors: HashMap<String, BTreeSet<String>>,
}

impl<V: Value> Csp<V> {
    pub fn new(constraints: Vec<Box<dyn Constraint<V>>>) -> Self {
        let mut by_variable: HashMap<String, Vec<ConstraintId>> = HashMap::new();
        let mut by_pair: HashMap<String, HashMap<String, Vec<ConstraintId>>> = HashMap::new();
        let mut neighbors: HashMap<String, BTreeSet<String>> = HashMap::new();

        for (id, constraint) in constraints.iter().enumerate() {
            for a in constraint.variables() {
                by_variable.entry(a.clone()).or_default().push(id);
                for b in constraint.variables() {
                    if a == b {
                        continue;
                    }
                    by_pair
                        .entry(a.clone())
                        .or_default()
                        .entry(b.clone())
                        .or_default()
                        .push(id);
                    neighbors.entry(a.clone()).or_default().insert(b.clone());
                }
            }
        }

        Self {
            constraints,
            by_variable,
            by_pair,
            neighbors,
        }
    }

    pub fn constraints(&self) -> &[Box<dyn Constraint<V>>] {
        &self.constraints
    }

    pub fn constraint(&self, id: ConstraintId) -> &dyn Constraint<V> {
        self.constraints[id].as_ref()
    }

    /// Ids of every constraint whose scope mentions `var`.
    pub fn constraints_for(&self, var: &str) -> &[ConstraintId] {
        self.by_variable.get(var).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Ids of every constraint whose scope mentions both `a` and `b`.
    pub fn constraints_between(&self, a: &str, b: &str) -> &[ConstraintId] {
        self.by_pair
            .get(a)
            .and_then(|inner| inner.get(b))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Names co-occurring with `var` in some constraint, in a stable
    /// order.
    pub fn neighbors<'a>(&'a self, var: &str) -> impl Iterator<Item = &'a str> + 'a {
        self.neighbors
            .get(var)
            .into_iter()
            .flatten()
            .map(String::as_str)
    }

    pub fn is_satisfied(&self, state: &State<V>) -> Result<bool> {
        for constraint in &self.constraints {
            if !constraint.is_satisfied(state)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Satisfaction restricted to the constraints mentioning `var`.
    pub fn is_satisfied_for(&self, var: &str, state: &State<V>) -> Result<bool> {
        for &id in self.constraints_for(var) {
            if !self.constraint(id).is_satisfied(state)? {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

impl<V: Value> std::fmt::Debug for Csp<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Csp")
            .field("constraints", &self.constraints)
            .finish_non_exhaustive()
    }
}
