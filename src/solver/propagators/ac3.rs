use im::OrdSet;
use tracing::debug;

use crate::error::Result;
use crate::solver::constraint::Assignment;
use crate::solver::csp::Csp;
use crate::solver::propagator::{Propagation, Propagator, PropagatorStats};
use crate::solver::state::State;
use crate::solver::value::Value;
use crate::solver::work_list::WorkList;

/// Full arc consistency via AC-3.
///
/// The worklist holds directed arcs (x, y) meaning "x must be revised
/// against y", seeded with every ordered pair of co-constrained
/// variables. Revising x prunes each of its values that has no support
/// in y's effective domain; a changed domain re-enqueues (z, x) for every
/// neighbor z other than y so consequences cascade until the worklist
/// drains.
///
/// An assigned variable is never revised itself; its assignment collapses
/// its effective domain to a singleton when a neighbor is revised against
/// it. Conflicts between two already-assigned variables are left for the
/// search's satisfaction check.
///
/// Revision is pairwise, which for constraints over three or more
/// variables is weaker than full consistency; the search re-checks
/// [`Csp::is_satisfied`] at every node to close that gap.
#[derive(Debug, Default, Clone, Copy)]
pub struct Ac3;

impl Ac3 {
    /// Whether some value in y's effective domain is compatible with
    /// `x = a` under every constraint between x and y.
    fn has_support<V: Value>(
        csp: &Csp<V>,
        state: &State<V>,
        x: &str,
        a: &V,
        y: &str,
        stats: &mut PropagatorStats,
    ) -> Result<bool> {
        let against = state.variable(y)?;
        let candidates: OrdSet<V> = match against.value() {
            Some(value) => OrdSet::unit(value),
            None => against.domain_values(),
        };

        for b in &candidates {
            let mut assignment = Assignment::new();
            assignment.insert(x.to_string(), a.clone());
            assignment.insert(y.to_string(), b.clone());

            let mut supported = true;
            for &id in csp.constraints_between(x, y) {
                stats.constraint_checks += 1;
                if !csp.constraint(id).is_satisfied_with_partial(&assignment) {
                    supported = false;
                    break;
                }
            }
            if supported {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

impl<V: Value> Propagator<V> for Ac3 {
    fn propagate(&self, csp: &Csp<V>, state: &State<V>) -> Result<Propagation> {
        let mut stats = PropagatorStats::default();

        let mut worklist = WorkList::new();
        for name in state.names() {
            for neighbor in csp.neighbors(name) {
                worklist.push_back(name, neighbor);
            }
        }

        while let Some((x, y)) = worklist.pop_front() {
            let variable = state.variable(&x)?;
            if variable.is_assigned() {
                continue;
            }

            let mut revised = false;
            for a in variable.domain_values() {
                if !Self::has_support(csp, state, &x, &a, &y, &mut stats)? {
                    variable.remove_value_from_domain(&a)?;
                    stats.domain_prunes += 1;
                    revised = true;
                }
            }

            if !variable.is_valid() {
                debug!(variable = %x, "domain wiped out during revision");
                return Ok(Propagation::failure(stats));
            }
            if revised {
                debug!(variable = %x, size = variable.domain_size(), "domain revised");
                for z in csp.neighbors(&x) {
                    if z != y {
                        worklist.push_back(z, &x);
                    }
                }
            }
        }

        Ok(Propagation::success(stats))
    }
}
