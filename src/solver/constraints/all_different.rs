use std::collections::{BTreeSet, HashSet};

use crate::solver::constraint::{Assignment, Constraint, ConstraintDescriptor};
use crate::solver::value::Value;

/// Requires every variable in its scope to take a distinct value.
///
/// Satisfaction is optimistic under partial assignment: only the scope
/// variables that already have values are compared, so the constraint
/// holds until two of them collide.
#[derive(Debug, Clone)]
pub struct AllDifferent {
    vars: BTreeSet<String>,
}

impl AllDifferent {
    pub fn new<I, S>(vars: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            vars: vars.into_iter().map(Into::into).collect(),
        }
    }
}

impl<V: Value> Constraint<V> for AllDifferent {
    fn variables(&self) -> &BTreeSet<String> {
        &self.vars
    }

    fn descriptor(&self) -> ConstraintDescriptor {
        let vars = self.vars.iter().cloned().collect::<Vec<_>>().join(", ");
        ConstraintDescriptor {
            name: "AllDifferent".to_string(),
            description: format!("AllDifferent({vars})"),
        }
    }

    fn is_satisfied_with_partial(&self, assignment: &Assignment<V>) -> bool {
        let mut seen = HashSet::new();
        for (name, value) in assignment {
            if !self.vars.contains(name) {
                continue;
            }
            if !seen.insert(value) {
                return false;
            }
        }
        true
    }
}
