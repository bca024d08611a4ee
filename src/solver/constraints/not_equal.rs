use std::collections::BTreeSet;

use crate::solver::constraint::{Assignment, Constraint, ConstraintDescriptor};
use crate::solver::value::Value;

/// Requires two variables to take different values.
#[derive(Debug, Clone)]
pub struct NotEqual {
    vars: BTreeSet<String>,
    a: String,
    b: String,
}

impl NotEqual {
    pub fn new(a: impl Into<String>, b: impl Into<String>) -> Self {
        let a = a.into();
        let b = b.into();
        Self {
            vars: [a.clone(), b.clone()].into_iter().collect(),
            a,
            b,
        }
    }
}

impl<V: Value> Constraint<V> for NotEqual {
    fn variables(&self) -> &BTreeSet<String> {
        &self.vars
    }

    fn descriptor(&self) -> ConstraintDescriptor {
        ConstraintDescriptor {
            name: "NotEqual".to_string(),
            description: format!("{} != {}", self.a, self.b),
        }
    }

    fn is_satisfied_with_partial(&self, assignment: &Assignment<V>) -> bool {
        match (assignment.get(&self.a), assignment.get(&self.b)) {
            (Some(left), Some(right)) => left != right,
            _ => true,
        }
    }
}
