use tracing::debug;

use crate::error::Result;
use crate::solver::csp::Csp;
use crate::solver::propagator::{Propagation, Propagator, PropagatorStats};
use crate::solver::state::State;
use crate::solver::value::Value;

/// One pass of value-by-value pruning, no fixpoint.
///
/// For every unassigned variable, each candidate value is hypothetically
/// assigned under a scoped checkpoint and the constraints touching that
/// variable are consulted; values that already violate one are pruned.
/// Variables whose domains shrink as a side effect of pruning another
/// variable are *not* revisited within the pass.
#[derive(Debug, Default, Clone, Copy)]
pub struct SimplePropagator;

impl<V: Value> Propagator<V> for SimplePropagator {
    fn propagate(&self, csp: &Csp<V>, state: &State<V>) -> Result<Propagation> {
        let mut stats = PropagatorStats::default();
        for variable in state.variables() {
            if variable.is_assigned() {
                continue;
            }
            for value in variable.domain_values() {
                stats.constraint_checks += csp.constraints_for(variable.name()).len() as u64;
                let consistent = state.maintain(|state| -> Result<bool> {
                    variable.assign(value.clone())?;
                    csp.is_satisfied_for(variable.name(), state)
                })?;
                if !consistent {
                    variable.remove_value_from_domain(&value)?;
                    stats.domain_prunes += 1;
                }
            }
            if !variable.is_valid() {
                debug!(variable = variable.name(), "domain wiped out");
                return Ok(Propagation::failure(stats));
            }
        }
        Ok(Propagation::success(stats))
    }
}
