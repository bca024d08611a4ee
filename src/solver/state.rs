use std::collections::BTreeMap;
use std::fmt;

use crate::error::{Result, SolverError};
use crate::solver::delta::DeltaRecord;
use crate::solver::value::Value;
use crate::solver::variable::Variable;

/// The container of all variables in one solve session, anchored to the
/// session's [`DeltaRecord`].
///
/// The state is shared down the entire search tree and mutated in place;
/// the only discipline keeping it consistent is strict stack-ordered
/// checkpoint/revert, which [`State::maintain`] packages up for scoped
/// hypothetical mutation. Variables iterate in name order so runs are
/// reproducible.
pub struct State<V: Value> {
    record: DeltaRecord,
    variables: BTreeMap<String, Variable<V>>,
}

impl<V: Value> State<V> {
    /// Builds a state from `variables`, all of which must share `record`.
    /// Duplicate names are rejected.
    pub fn new(
        record: &DeltaRecord,
        variables: impl IntoIterator<Item = Variable<V>>,
    ) -> Result<Self> {
        let mut map = BTreeMap::new();
        for variable in variables {
            if !record.same_record(variable.record()) {
                return Err(SolverError::RecordMismatch {
                    left: format!("variable {}", variable.name()),
                    right: "state".to_string(),
                }
                .into());
            }
            let name = variable.name().to_string();
            if map.insert(name.clone(), variable).is_some() {
                return Err(SolverError::DuplicateVariable { name }.into());
            }
        }
        Ok(Self {
            record: record.clone(),
            variables: map,
        })
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.variables.keys().map(String::as_str)
    }

    pub fn variables(&self) -> impl Iterator<Item = &Variable<V>> {
        self.variables.values()
    }

    pub fn get(&self, name: &str) -> Option<&Variable<V>> {
        self.variables.get(name)
    }

    pub fn variable(&self, name: &str) -> Result<&Variable<V>> {
        self.get(name).ok_or_else(|| {
            SolverError::UnknownVariable {
                name: name.to_string(),
            }
            .into()
        })
    }

    pub fn assign(&self, name: &str, value: V) -> Result<()> {
        self.variable(name)?.assign(value)
    }

    pub fn unassign(&self, name: &str) -> Result<()> {
        self.variable(name)?.unassign();
        Ok(())
    }

    pub fn unassigned_variables(&self) -> impl Iterator<Item = &Variable<V>> {
        self.variables().filter(|v| !v.is_assigned())
    }

    /// Every variable's domain is non-empty.
    pub fn is_valid(&self) -> bool {
        self.variables().all(Variable::is_valid)
    }

    /// Every variable is assigned.
    pub fn is_complete(&self) -> bool {
        self.variables().all(Variable::is_assigned)
    }

    pub fn checkpoint(&self) -> usize {
        self.record.checkpoint()
    }

    pub fn revert_to(&self, checkpoint: usize) -> Result<()> {
        self.record.revert_to(checkpoint)
    }

    /// Runs `f` under a checkpoint that is reverted on every exit path.
    /// See [`DeltaRecord::maintain`].
    pub fn maintain<R>(&self, f: impl FnOnce(&Self) -> R) -> R {
        self.record.maintain(|| f(self))
    }

    pub fn record(&self) -> &DeltaRecord {
        &self.record
    }
}

impl<V: Value> fmt::Debug for State<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.variables.iter().map(|(k, v)| (k, v)))
            .finish()
    }
}
