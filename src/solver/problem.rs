use crate::error::{Result, SolverError};
use crate::solver::csp::Csp;
use crate::solver::state::State;
use crate::solver::strategy::{SearchStats, SearchStrategy};
use crate::solver::value::Value;

/// The boundary between the engine and a problem-specific frontend.
///
/// A frontend translates its own representation into a constraint graph
/// plus an initial state (`to_state`), and reconstructs itself from the
/// solved state (`from_state`), reading each variable's value and
/// treating "unassigned" as its own empty sentinel.
///
/// The provided [`Problem::solve`] drives the round trip: translate in,
/// run the strategy, and translate out — after defensively rejecting a
/// result whose state is invalid or does not actually satisfy the
/// constraint graph.
pub trait Problem<V: Value>: Sized {
    fn to_state(&self) -> Result<(Csp<V>, State<V>)>;

    fn from_state(&self, csp: &Csp<V>, state: &State<V>) -> Result<Self>;

    fn solve(&self, strategy: &dyn SearchStrategy<V>) -> Result<(Self, SearchStats)> {
        let (csp, state) = self.to_state()?;
        let result = strategy.solve(&csp, &state)?;
        if !result.success {
            return Err(SolverError::NoSolution.into());
        }
        if !state.is_valid() {
            return Err(SolverError::InvalidSolution.into());
        }
        if !csp.is_satisfied(&state)? {
            return Err(SolverError::UnsatisfiedSolution.into());
        }
        Ok((self.from_state(&csp, &state)?, result.stats))
    }
}
