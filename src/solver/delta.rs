//! The transactional substrate: an append-only log of reversible
//! operations shared by every mutable object in one solve session.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::error::{Result, SolverError};

/// A single reversible operation.
///
/// `apply` and `revert` must be exact inverses: replaying `revert` for
/// every recorded delta in reverse order returns all mutated objects to
/// their state at record creation. Deltas mutate through shared interior
/// cells, so both methods take `&self`.
pub trait Delta: fmt::Debug {
    fn apply(&self);
    fn revert(&self);
}

/// A delta with no effect, recorded so that checkpoint arithmetic stays
/// uniform for operations that turn out to be no-ops.
#[derive(Debug)]
pub(crate) struct Noop;

impl Delta for Noop {
    fn apply(&self) {}
    fn revert(&self) {}
}

/// The undo log. One record is created per solve session and shared, via
/// cheap handle clones, by every [`Domain`], [`Variable`] and [`State`]
/// participating in that session.
///
/// Rollback is strictly stack-ordered: `checkpoint` returns the current
/// depth and `revert_to` pops and reverts deltas until the log returns to
/// that depth. Reverting past the bottom of the log is a protocol error,
/// not a CSP failure.
///
/// [`Domain`]: crate::solver::domain::Domain
/// [`Variable`]: crate::solver::variable::Variable
/// [`State`]: crate::solver::state::State
#[derive(Clone, Debug, Default)]
pub struct DeltaRecord {
    deltas: Rc<RefCell<Vec<Box<dyn Delta>>>>,
}

impl DeltaRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.deltas.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether two handles point at the same underlying log.
    pub fn same_record(&self, other: &DeltaRecord) -> bool {
        Rc::ptr_eq(&self.deltas, &other.deltas)
    }

    /// Runs the delta's effect and pushes it onto the log.
    pub fn apply(&self, delta: Box<dyn Delta>) {
        delta.apply();
        self.deltas.borrow_mut().push(delta);
    }

    /// Pops the newest delta and undoes its effect.
    pub fn revert(&self) -> Result<()> {
        let delta = self
            .deltas
            .borrow_mut()
            .pop()
            .ok_or(SolverError::RevertUnderflow)?;
        delta.revert();
        Ok(())
    }

    /// The current log depth, usable later with [`DeltaRecord::revert_to`].
    pub fn checkpoint(&self) -> usize {
        self.len()
    }

    /// Pops and reverts deltas until the log returns to `checkpoint`.
    ///
    /// A checkpoint deeper than the current log means the caller mixed up
    /// its checkpoint/revert pairing and is rejected.
    pub fn revert_to(&self, checkpoint: usize) -> Result<()> {
        if checkpoint > self.len() {
            return Err(SolverError::StaleCheckpoint {
                checkpoint,
                depth: self.len(),
            }
            .into());
        }
        while self.len() > checkpoint {
            self.revert()?;
        }
        Ok(())
    }

    /// Opens a checkpoint, runs `f`, and reverts to the checkpoint on
    /// every exit path, including `?` failures and unwinding. Nesting is
    /// reentrant: an inner rollback never disturbs an outer checkpoint.
    pub fn maintain<R>(&self, f: impl FnOnce() -> R) -> R {
        let _guard = RevertGuard {
            record: self.clone(),
            checkpoint: self.checkpoint(),
        };
        f()
    }
}

struct RevertGuard {
    record: DeltaRecord,
    checkpoint: usize,
}

impl Drop for RevertGuard {
    fn drop(&mut self) {
        // The checkpoint was taken from this record and inner scopes
        // restore their own depth first, so this cannot underflow.
        let _ = self.record.revert_to(self.checkpoint);
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::error::SolverError;

    #[derive(Debug)]
    struct AddOne {
        cell: Rc<Cell<i64>>,
    }

    impl Delta for AddOne {
        fn apply(&self) {
            self.cell.set(self.cell.get() + 1);
        }

        fn revert(&self) {
            self.cell.set(self.cell.get() - 1);
        }
    }

    fn counter() -> Rc<Cell<i64>> {
        Rc::new(Cell::new(0))
    }

    #[test]
    fn apply_runs_the_delta_and_records_it() {
        let record = DeltaRecord::new();
        let cell = counter();
        record.apply(Box::new(AddOne { cell: cell.clone() }));
        record.apply(Box::new(AddOne { cell: cell.clone() }));

        assert_eq!(cell.get(), 2);
        assert_eq!(record.len(), 2);
    }

    #[test]
    fn revert_undoes_the_newest_delta() {
        let record = DeltaRecord::new();
        let cell = counter();
        record.apply(Box::new(AddOne { cell: cell.clone() }));

        record.revert().unwrap();
        assert_eq!(cell.get(), 0);
        assert!(record.is_empty());
    }

    #[test]
    fn revert_on_an_empty_record_is_an_underflow_error() {
        let record = DeltaRecord::new();
        let err = record.revert().unwrap_err();
        assert!(matches!(
            err.solver_error(),
            SolverError::RevertUnderflow
        ));
    }

    #[test]
    fn revert_to_restores_the_checkpointed_depth() {
        let record = DeltaRecord::new();
        let cell = counter();
        record.apply(Box::new(AddOne { cell: cell.clone() }));

        let checkpoint = record.checkpoint();
        for _ in 0..5 {
            record.apply(Box::new(AddOne { cell: cell.clone() }));
        }
        assert_eq!(cell.get(), 6);

        record.revert_to(checkpoint).unwrap();
        assert_eq!(cell.get(), 1);
        assert_eq!(record.len(), checkpoint);
    }

    #[test]
    fn revert_to_rejects_a_stale_checkpoint() {
        let record = DeltaRecord::new();
        let err = record.revert_to(3).unwrap_err();
        assert!(matches!(
            err.solver_error(),
            SolverError::StaleCheckpoint { checkpoint: 3, depth: 0 }
        ));
    }

    #[test]
    fn maintain_rolls_back_on_normal_exit() {
        let record = DeltaRecord::new();
        let cell = counter();

        let seen = record.maintain(|| {
            record.apply(Box::new(AddOne { cell: cell.clone() }));
            cell.get()
        });

        assert_eq!(seen, 1);
        assert_eq!(cell.get(), 0);
        assert!(record.is_empty());
    }

    #[test]
    fn maintain_rolls_back_when_the_closure_fails() {
        let record = DeltaRecord::new();
        let cell = counter();

        let result: Result<()> = record.maintain(|| {
            record.apply(Box::new(AddOne { cell: cell.clone() }));
            Err(SolverError::NoSolution.into())
        });

        assert!(result.is_err());
        assert_eq!(cell.get(), 0);
    }

    #[test]
    fn nested_maintain_scopes_do_not_disturb_outer_checkpoints() {
        let record = DeltaRecord::new();
        let cell = counter();

        record.maintain(|| {
            record.apply(Box::new(AddOne { cell: cell.clone() }));
            record.maintain(|| {
                record.apply(Box::new(AddOne { cell: cell.clone() }));
                assert_eq!(cell.get(), 2);
            });
            // Inner scope is gone, outer delta survives.
            assert_eq!(cell.get(), 1);
            assert_eq!(record.len(), 1);
        });

        assert_eq!(cell.get(), 0);
        assert!(record.is_empty());
    }

    #[test]
    fn handles_share_one_log() {
        let record = DeltaRecord::new();
        let handle = record.clone();
        let cell = counter();

        handle.apply(Box::new(AddOne { cell: cell.clone() }));
        assert_eq!(record.len(), 1);
        assert!(record.same_record(&handle));
        assert!(!record.same_record(&DeltaRecord::new()));
    }
}
