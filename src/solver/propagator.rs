use std::ops::{Add, AddAssign};

use serde::Serialize;

use crate::error::Result;
use crate::solver::csp::Csp;
use crate::solver::state::State;
use crate::solver::value::Value;

/// Work counters for one propagation run. Summable, so totals can be
/// folded up across propagations and across whole searches.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PropagatorStats {
    pub domain_prunes: u64,
    pub constraint_checks: u64,
}

impl Add for PropagatorStats {
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self {
        self += rhs;
        self
    }
}

impl AddAssign for PropagatorStats {
    fn add_assign(&mut self, rhs: Self) {
        self.domain_prunes += rhs.domain_prunes;
        self.constraint_checks += rhs.constraint_checks;
    }
}

/// The outcome of one propagation run.
///
/// `success == false` reports a domain wipeout: no consistent assignment
/// remains reachable from the current branch. This is an expected,
/// frequent result that the search recovers from by backtracking; it is
/// never surfaced as an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Propagation {
    pub success: bool,
    pub stats: PropagatorStats,
}

impl Propagation {
    pub fn success(stats: PropagatorStats) -> Self {
        Self {
            success: true,
            stats,
        }
    }

    pub fn failure(stats: PropagatorStats) -> Self {
        Self {
            success: false,
            stats,
        }
    }
}

/// A consistency-maintenance strategy: prunes domains without ever
/// assigning values.
///
/// Propagators are not transactional. On failure the state's domains may
/// have been partially pruned; callers needing rollback must checkpoint
/// before calling.
pub trait Propagator<V: Value>: std::fmt::Debug {
    fn propagate(&self, csp: &Csp<V>, state: &State<V>) -> Result<Propagation>;
}
