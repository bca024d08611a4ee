use crate::error::Result;
use crate::solver::csp::Csp;
use crate::solver::state::State;
use crate::solver::value::Value;
use crate::solver::variable::Variable;

/// A strategy for ordering the candidate values of the variable being
/// branched on. Like variable selection, ordering may change how fast
/// the search converges but never whether it succeeds.
pub trait ValueOrderingHeuristic<V: Value>: std::fmt::Debug {
    fn order_values(
        &self,
        csp: &Csp<V>,
        state: &State<V>,
        variable: &Variable<V>,
    ) -> Result<Vec<V>>;
}

/// Yields values in their natural domain order.
#[derive(Debug, Default, Clone, Copy)]
pub struct IdentityValueHeuristic;

impl<V: Value> ValueOrderingHeuristic<V> for IdentityValueHeuristic {
    fn order_values(
        &self,
        _csp: &Csp<V>,
        _state: &State<V>,
        variable: &Variable<V>,
    ) -> Result<Vec<V>> {
        Ok(variable.domain_values().into_iter().collect())
    }
}

/// Least constraining value: orders candidates ascending by how many
/// values they would eliminate from unassigned neighbors' domains,
/// breaking ties by value order.
///
/// Scores are computed by hypothetical assignment under scoped
/// checkpoints; the real state is never left mutated.
#[derive(Debug, Default, Clone, Copy)]
pub struct LeastConstrainingValueHeuristic;

impl LeastConstrainingValueHeuristic {
    fn eliminations<V: Value>(
        csp: &Csp<V>,
        state: &State<V>,
        variable: &Variable<V>,
        value: &V,
    ) -> Result<u64> {
        state.maintain(|state| {
            variable.assign(value.clone())?;
            let mut eliminated = 0;
            for neighbor_name in csp.neighbors(variable.name()) {
                let neighbor = state.variable(neighbor_name)?;
                if neighbor.is_assigned() {
                    continue;
                }
                for candidate in neighbor.domain_values() {
                    let ruled_out = state.maintain(|state| -> Result<bool> {
                        neighbor.assign(candidate.clone())?;
                        for &id in csp.constraints_between(variable.name(), neighbor_name) {
                            if !csp.constraint(id).is_satisfied(state)? {
                                return Ok(true);
                            }
                        }
                        Ok(false)
                    })?;
                    if ruled_out {
                        eliminated += 1;
                    }
                }
            }
            Ok(eliminated)
        })
    }
}

impl<V: Value> ValueOrderingHeuristic<V> for LeastConstrainingValueHeuristic {
    fn order_values(
        &self,
        csp: &Csp<V>,
        state: &State<V>,
        variable: &Variable<V>,
    ) -> Result<Vec<V>> {
        let mut scored = Vec::with_capacity(variable.domain_size());
        for value in variable.domain_values() {
            let score = Self::eliminations(csp, state, variable, &value)?;
            scored.push((score, value));
        }
        scored.sort();
        Ok(scored.into_iter().map(|(_, value)| value).collect())
    }
}
