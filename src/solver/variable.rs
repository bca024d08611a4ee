use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use im::OrdSet;

use crate::error::{Error, Result, SolverError};
use crate::solver::delta::{Delta, DeltaRecord};
use crate::solver::domain::Domain;
use crate::solver::value::Value;

#[derive(Debug)]
struct Assign<V: Value> {
    cell: Rc<RefCell<Option<V>>>,
    previous: Option<V>,
    next: Option<V>,
}

impl<V: Value> Delta for Assign<V> {
    fn apply(&self) {
        *self.cell.borrow_mut() = self.next.clone();
    }

    fn revert(&self) {
        *self.cell.borrow_mut() = self.previous.clone();
    }
}

/// A named variable: a [`Domain`] of candidate values plus an optional
/// assigned value.
///
/// Invariants: an assigned value is always a member of the domain, and
/// the variable shares its [`DeltaRecord`] with the domain it owns.
/// Assignment, unassignment and the domain-narrowing helpers are all
/// delta-recorded.
pub struct Variable<V: Value> {
    record: DeltaRecord,
    name: String,
    domain: Domain<V>,
    value: Rc<RefCell<Option<V>>>,
}

impl<V: Value> Variable<V> {
    /// Builds a variable over `domain`, optionally pre-assigned.
    ///
    /// Fails if the variable and its domain disagree on the delta record,
    /// or if the initial value is not a member of the domain. The initial
    /// assignment predates the solve session, so it is not recorded.
    pub fn new(
        record: &DeltaRecord,
        name: impl Into<String>,
        domain: Domain<V>,
        value: Option<V>,
    ) -> Result<Self> {
        let name = name.into();
        if !record.same_record(domain.record()) {
            return Err(SolverError::RecordMismatch {
                left: format!("variable {name}"),
                right: "its domain".to_string(),
            }
            .into());
        }
        if let Some(value) = &value {
            if !domain.contains(value) {
                return Err(SolverError::ValueNotInDomain {
                    variable: name,
                    value: format!("{value:?}"),
                }
                .into());
            }
        }
        Ok(Self {
            record: record.clone(),
            name,
            domain,
            value: Rc::new(RefCell::new(value)),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn domain(&self) -> &Domain<V> {
        &self.domain
    }

    pub fn value(&self) -> Option<V> {
        self.value.borrow().clone()
    }

    pub fn is_assigned(&self) -> bool {
        self.value.borrow().is_some()
    }

    /// A variable is valid while its domain has at least one value,
    /// independent of whether it is assigned.
    pub fn is_valid(&self) -> bool {
        !self.domain.is_empty()
    }

    /// Assigns a value, which must be a member of the current domain.
    pub fn assign(&self, value: V) -> Result<()> {
        if !self.domain.contains(&value) {
            return Err(SolverError::ValueNotInDomain {
                variable: self.name.clone(),
                value: format!("{value:?}"),
            }
            .into());
        }
        self.record_assignment(Some(value));
        Ok(())
    }

    /// Clears the assignment, leaving the domain untouched.
    pub fn unassign(&self) {
        self.record_assignment(None);
    }

    fn record_assignment(&self, next: Option<V>) {
        let previous = self.value.borrow().clone();
        self.record.apply(Box::new(Assign {
            cell: Rc::clone(&self.value),
            previous,
            next,
        }));
    }

    pub fn add_value_to_domain(&self, value: V) {
        self.domain.add_value(value);
    }

    /// Narrows the domain, rejecting removal of the currently assigned
    /// value and wrapping domain-level errors with this variable's name.
    pub fn remove_value_from_domain(&self, value: &V) -> Result<()> {
        if self.value.borrow().as_ref() == Some(value) {
            return Err(SolverError::RemoveAssigned {
                variable: self.name.clone(),
                value: format!("{value:?}"),
            }
            .into());
        }
        self.domain
            .remove_value(value)
            .map_err(|source| self.domain_error(source))
    }

    fn domain_error(&self, source: Error) -> Error {
        SolverError::DomainOperation {
            variable: self.name.clone(),
            source: Box::new(source),
        }
        .into()
    }

    pub fn domain_values(&self) -> OrdSet<V> {
        self.domain.values()
    }

    pub fn domain_size(&self) -> usize {
        self.domain.len()
    }

    pub(crate) fn record(&self) -> &DeltaRecord {
        &self.record
    }
}

impl<V: Value> fmt::Debug for Variable<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Variable")
            .field("name", &self.name)
            .field("value", &*self.value.borrow())
            .field("domain", &self.domain)
            .finish()
    }
}
