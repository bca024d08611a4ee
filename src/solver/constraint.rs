use std::collections::{BTreeMap, BTreeSet};

use crate::error::Result;
use crate::solver::state::State;
use crate::solver::value::Value;

/// A (partial) assignment of values to variable names.
pub type Assignment<V> = BTreeMap<String, V>;

#[derive(Debug, Clone)]
pub struct ConstraintDescriptor {
    pub name: String,
    pub description: String,
}

/// A rule over a set of variables.
///
/// Implementers provide the variable scope, a descriptor, and a single
/// predicate over *partial* assignments: variables missing from the
/// assignment are treated optimistically, so a constraint only fails once
/// the values present already contradict it. Satisfaction over a
/// [`State`] is derived by restricting to the currently assigned
/// variables in scope.
pub trait Constraint<V: Value>: std::fmt::Debug {
    fn variables(&self) -> &BTreeSet<String>;

    fn descriptor(&self) -> ConstraintDescriptor;

    fn is_satisfied_with_partial(&self, assignment: &Assignment<V>) -> bool;

    fn is_satisfied(&self, state: &State<V>) -> Result<bool> {
        let mut assignment = Assignment::new();
        for name in self.variables() {
            if let Some(value) = state.variable(name)?.value() {
                assignment.insert(name.clone(), value);
            }
        }
        Ok(self.is_satisfied_with_partial(&assignment))
    }
}
