use crate::error::Result;
use crate::solver::csp::Csp;
use crate::solver::propagator::{Propagation, Propagator, PropagatorStats};
use crate::solver::state::State;
use crate::solver::value::Value;

/// Performs no propagation at all: always succeeds, mutates nothing,
/// reports zero work. The baseline against which the real propagators
/// are measured.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullPropagator;

impl<V: Value> Propagator<V> for NullPropagator {
    fn propagate(&self, _csp: &Csp<V>, _state: &State<V>) -> Result<Propagation> {
        Ok(Propagation::success(PropagatorStats::default()))
    }
}
