use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use im::OrdSet;

use crate::error::{Result, SolverError};
use crate::solver::delta::{Delta, DeltaRecord, Noop};
use crate::solver::value::Value;

type Values<V> = Rc<RefCell<OrdSet<V>>>;

#[derive(Debug)]
struct AddValue<V: Value> {
    values: Values<V>,
    value: V,
}

impl<V: Value> Delta for AddValue<V> {
    fn apply(&self) {
        self.values.borrow_mut().insert(self.value.clone());
    }

    fn revert(&self) {
        self.values.borrow_mut().remove(&self.value);
    }
}

#[derive(Debug)]
struct RemoveValue<V: Value> {
    values: Values<V>,
    value: V,
}

impl<V: Value> Delta for RemoveValue<V> {
    fn apply(&self) {
        self.values.borrow_mut().remove(&self.value);
    }

    fn revert(&self) {
        self.values.borrow_mut().insert(self.value.clone());
    }
}

/// The mutable set of values still admissible for one variable.
///
/// Every mutation goes through the shared [`DeltaRecord`], so any
/// sequence of additions and removals can be rolled back exactly. The
/// backing set is persistent (`im::OrdSet`), which makes
/// [`Domain::values`] snapshots O(1) and safe to iterate while the live
/// domain keeps shrinking underneath them. Values iterate in `Ord` order,
/// keeping runs reproducible.
pub struct Domain<V: Value> {
    record: DeltaRecord,
    values: Values<V>,
}

impl<V: Value> Domain<V> {
    pub fn new(record: &DeltaRecord, values: impl IntoIterator<Item = V>) -> Self {
        Self {
            record: record.clone(),
            values: Rc::new(RefCell::new(values.into_iter().collect())),
        }
    }

    pub fn len(&self) -> usize {
        self.values.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, value: &V) -> bool {
        self.values.borrow().contains(value)
    }

    /// A snapshot of the current values. Cheap, and unaffected by later
    /// mutations of the live domain.
    pub fn values(&self) -> OrdSet<V> {
        self.values.borrow().clone()
    }

    /// Adds a value. Adding a value already present records a no-op
    /// delta, so checkpoint bookkeeping stays balanced either way.
    pub fn add_value(&self, value: V) {
        if self.contains(&value) {
            self.record.apply(Box::new(Noop));
        } else {
            self.record.apply(Box::new(AddValue {
                values: Rc::clone(&self.values),
                value,
            }));
        }
    }

    /// Removes a value. Removing a value that is not present is a
    /// protocol error, not a CSP contradiction.
    pub fn remove_value(&self, value: &V) -> Result<()> {
        if !self.contains(value) {
            return Err(SolverError::AbsentDomainValue {
                value: format!("{value:?}"),
            }
            .into());
        }
        self.record.apply(Box::new(RemoveValue {
            values: Rc::clone(&self.values),
            value: value.clone(),
        }));
        Ok(())
    }

    pub(crate) fn record(&self) -> &DeltaRecord {
        &self.record
    }
}

impl<V: Value> fmt::Debug for Domain<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Domain(")?;
        f.debug_set().entries(self.values.borrow().iter()).finish()?;
        write!(f, ")")
    }
}
