use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::debug;

use crate::error::Result;
use crate::solver::csp::Csp;
use crate::solver::heuristics::value::ValueOrderingHeuristic;
use crate::solver::heuristics::variable::VariableSelectionHeuristic;
use crate::solver::propagator::{Propagator, PropagatorStats};
use crate::solver::state::State;
use crate::solver::value::Value;

/// Work counters for one search. Summable for aggregation across
/// branches and across benchmark runs: counters add pointwise,
/// `max_depth` takes the maximum, elapsed times add.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    pub state_visits: u64,
    pub assignments: u64,
    pub propagations: u64,
    pub max_depth: u64,
    pub elapsed: Duration,
    pub propagator: PropagatorStats,
}

impl SearchStats {
    pub fn merge(self, rhs: Self) -> Self {
        Self {
            state_visits: self.state_visits + rhs.state_visits,
            assignments: self.assignments + rhs.assignments,
            propagations: self.propagations + rhs.propagations,
            max_depth: self.max_depth.max(rhs.max_depth),
            elapsed: self.elapsed + rhs.elapsed,
            propagator: self.propagator + rhs.propagator,
        }
    }
}

/// The outcome of a search. `success == false` means the search space
/// was exhausted without a solution; it is an ordinary result, not an
/// error.
#[derive(Debug, Clone, Copy)]
pub struct SearchResult {
    pub success: bool,
    pub stats: SearchStats,
}

pub trait SearchStrategy<V: Value> {
    /// Searches for an assignment satisfying `csp`, mutating `state` in
    /// place. On success the state holds the winning assignment; on
    /// failure every trial assignment has been reverted.
    fn solve(&self, csp: &Csp<V>, state: &State<V>) -> Result<SearchResult>;
}

/// Backtracking depth-first search with pluggable propagation and
/// heuristics.
///
/// The recursion is expressed as an explicit frame stack (the variable
/// under trial, its remaining ordered values and the checkpoint of the
/// current trial), so search depth is bounded by memory rather than the
/// call stack. Visitation order and statistics are identical to the
/// naive recursive formulation.
#[derive(Debug)]
pub struct DepthFirstSearch<V: Value> {
    propagator: Box<dyn Propagator<V>>,
    variable_heuristic: Box<dyn VariableSelectionHeuristic<V>>,
    value_heuristic: Box<dyn ValueOrderingHeuristic<V>>,
}

struct Frame<V: Value> {
    variable: String,
    values: std::vec::IntoIter<V>,
    /// Checkpoint of the assignment currently under trial, if any.
    trial: Option<usize>,
}

impl<V: Value> DepthFirstSearch<V> {
    pub fn new(
        propagator: Box<dyn Propagator<V>>,
        variable_heuristic: Box<dyn VariableSelectionHeuristic<V>>,
        value_heuristic: Box<dyn ValueOrderingHeuristic<V>>,
    ) -> Self {
        Self {
            propagator,
            variable_heuristic,
            value_heuristic,
        }
    }

    fn descend(&self, csp: &Csp<V>, state: &State<V>, stats: &mut SearchStats) -> Result<bool> {
        let mut frames: Vec<Frame<V>> = Vec::new();

        loop {
            // Visit the node at the current depth.
            stats.state_visits += 1;
            stats.max_depth = stats.max_depth.max(frames.len() as u64);

            if state.is_valid() && csp.is_satisfied(state)? {
                if state.is_complete() {
                    debug!(depth = frames.len(), "complete assignment found");
                    return Ok(true);
                }
                let Some(name) = self.variable_heuristic.select_variable(state) else {
                    return Ok(true);
                };
                let variable = state.variable(&name)?;
                let values = self.value_heuristic.order_values(csp, state, variable)?;
                frames.push(Frame {
                    variable: name,
                    values: values.into_iter(),
                    trial: None,
                });
            }
            // A dead node falls through: the loop below reverts the trial
            // that produced it and moves to the next candidate.

            loop {
                let Some(frame) = frames.last_mut() else {
                    return Ok(false);
                };
                if let Some(checkpoint) = frame.trial.take() {
                    state.revert_to(checkpoint)?;
                }
                match frame.values.next() {
                    None => {
                        // Every value failed: backtrack to the parent.
                        frames.pop();
                    }
                    Some(value) => {
                        let checkpoint = state.checkpoint();
                        state.variable(&frame.variable)?.assign(value)?;
                        stats.assignments += 1;
                        frame.trial = Some(checkpoint);

                        let outcome = self.propagator.propagate(csp, state)?;
                        stats.propagations += 1;
                        stats.propagator += outcome.stats;
                        if outcome.success {
                            break; // Descend into the child node.
                        }
                    }
                }
            }
        }
    }
}

impl<V: Value> SearchStrategy<V> for DepthFirstSearch<V> {
    fn solve(&self, csp: &Csp<V>, state: &State<V>) -> Result<SearchResult> {
        let started = Instant::now();
        let mut stats = SearchStats::default();

        let entry = self.propagator.propagate(csp, state)?;
        stats.propagations += 1;
        stats.propagator += entry.stats;

        let success = if entry.success {
            self.descend(csp, state, &mut stats)?
        } else {
            debug!("entry propagation failed, search not started");
            false
        };

        stats.elapsed = started.elapsed();
        Ok(SearchResult { success, stats })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::solver::constraint::Constraint;
    use crate::solver::constraints::all_different::AllDifferent;
    use crate::solver::constraints::not_equal::NotEqual;
    use crate::solver::delta::DeltaRecord;
    use crate::solver::domain::Domain;
    use crate::solver::heuristics::value::{IdentityValueHeuristic, LeastConstrainingValueHeuristic};
    use crate::solver::heuristics::variable::{
        MinimumRemainingValuesHeuristic, SelectFirstHeuristic,
    };
    use crate::solver::propagators::ac3::Ac3;
    use crate::solver::propagators::null::NullPropagator;
    use crate::solver::propagators::simple::SimplePropagator;
    use crate::solver::variable::Variable;

    fn strategies() -> Vec<DepthFirstSearch<i64>> {
        vec![
            DepthFirstSearch::new(
                Box::new(NullPropagator),
                Box::new(SelectFirstHeuristic),
                Box::new(IdentityValueHeuristic),
            ),
            DepthFirstSearch::new(
                Box::new(SimplePropagator),
                Box::new(SelectFirstHeuristic),
                Box::new(IdentityValueHeuristic),
            ),
            DepthFirstSearch::new(
                Box::new(Ac3),
                Box::new(MinimumRemainingValuesHeuristic),
                Box::new(LeastConstrainingValueHeuristic),
            ),
            DepthFirstSearch::new(
                Box::new(Ac3),
                Box::new(SelectFirstHeuristic),
                Box::new(LeastConstrainingValueHeuristic),
            ),
            DepthFirstSearch::new(
                Box::new(Ac3),
                Box::new(MinimumRemainingValuesHeuristic),
                Box::new(IdentityValueHeuristic),
            ),
        ]
    }

    fn two_against_one() -> (DeltaRecord, State<i64>, Csp<i64>) {
        let record = DeltaRecord::new();
        let a = Variable::new(&record, "a", Domain::new(&record, [1, 2]), None).unwrap();
        let b = Variable::new(&record, "b", Domain::new(&record, [1]), None).unwrap();
        let state = State::new(&record, [a, b]).unwrap();
        let constraints: Vec<Box<dyn Constraint<i64>>> = vec![Box::new(NotEqual::new("a", "b"))];
        (record, state, Csp::new(constraints))
    }

    #[test]
    fn deduces_the_forced_assignment() {
        for strategy in strategies() {
            let (_record, state, csp) = two_against_one();
            let result = strategy.solve(&csp, &state).unwrap();

            assert!(result.success);
            assert!(state.is_complete());
            assert_eq!(state.variable("a").unwrap().value(), Some(2));
            assert_eq!(state.variable("b").unwrap().value(), Some(1));
            assert!(csp.is_satisfied(&state).unwrap());
        }
    }

    #[test]
    fn exhausts_an_unsolvable_instance_without_panicking() {
        // Three variables, two values, all different: pigeonhole.
        for strategy in strategies() {
            let record = DeltaRecord::new();
            let names = ["a", "b", "c"];
            let variables = names.map(|name| {
                Variable::new(&record, name, Domain::new(&record, [1, 2]), None).unwrap()
            });
            let state = State::new(&record, variables).unwrap();
            let constraints: Vec<Box<dyn Constraint<i64>>> =
                vec![Box::new(AllDifferent::new(names))];
            let csp = Csp::new(constraints);

            let result = strategy.solve(&csp, &state).unwrap();

            assert!(!result.success);
            // Every trial assignment was reverted on the way out.
            assert!(!state.is_complete());
        }
    }

    #[test]
    fn heuristics_change_work_not_outcomes() {
        let mut successes = Vec::new();
        let mut visits = Vec::new();
        for strategy in strategies() {
            let record = DeltaRecord::new();
            let names = ["a", "b", "c", "d"];
            let variables = names.map(|name| {
                Variable::new(&record, name, Domain::new(&record, [1, 2, 3, 4]), None).unwrap()
            });
            let state = State::new(&record, variables).unwrap();
            let constraints: Vec<Box<dyn Constraint<i64>>> =
                vec![Box::new(AllDifferent::new(names))];
            let csp = Csp::new(constraints);

            let result = strategy.solve(&csp, &state).unwrap();
            successes.push(result.success);
            visits.push(result.stats.state_visits);
            assert!(csp.is_satisfied(&state).unwrap());
        }
        assert!(successes.iter().all(|&success| success));
        assert!(visits.iter().all(|&count| count > 0));
    }

    #[test]
    fn pairwise_consistent_but_jointly_impossible_is_caught_by_the_search() {
        // a, b, c in {1,2} with a 3-way all-different: AC-3's pairwise
        // revision leaves all domains intact, so the search alone must
        // discover the contradiction.
        let record = DeltaRecord::new();
        let names = ["a", "b", "c"];
        let variables = names
            .map(|name| Variable::new(&record, name, Domain::new(&record, [1, 2]), None).unwrap());
        let state = State::new(&record, variables).unwrap();
        let constraints: Vec<Box<dyn Constraint<i64>>> = vec![Box::new(AllDifferent::new(names))];
        let csp = Csp::new(constraints);

        let entry = Ac3.propagate(&csp, &state).unwrap();
        assert!(entry.success);
        assert!(names
            .iter()
            .all(|name| state.variable(name).unwrap().domain_size() == 2));

        let strategy = DepthFirstSearch::new(
            Box::new(Ac3),
            Box::new(SelectFirstHeuristic),
            Box::new(IdentityValueHeuristic),
        );
        let result = strategy.solve(&csp, &state).unwrap();
        assert!(!result.success);
    }

    #[test]
    fn chain_propagation_solution_is_accepted() {
        // a in {1,2}, b in {2}, c in {1,2} with pairwise constraints
        // only: a = c = 1 is a legitimate solution.
        let record = DeltaRecord::new();
        let a = Variable::new(&record, "a", Domain::new(&record, [1, 2]), None).unwrap();
        let b = Variable::new(&record, "b", Domain::new(&record, [2]), None).unwrap();
        let c = Variable::new(&record, "c", Domain::new(&record, [1, 2]), None).unwrap();
        let state = State::new(&record, [a, b, c]).unwrap();
        let constraints: Vec<Box<dyn Constraint<i64>>> = vec![
            Box::new(AllDifferent::new(["a", "b"])),
            Box::new(AllDifferent::new(["b", "c"])),
        ];
        let csp = Csp::new(constraints);

        let strategy = DepthFirstSearch::new(
            Box::new(Ac3),
            Box::new(SelectFirstHeuristic),
            Box::new(IdentityValueHeuristic),
        );
        let result = strategy.solve(&csp, &state).unwrap();

        assert!(result.success);
        assert_eq!(state.variable("a").unwrap().value(), Some(1));
        assert_eq!(state.variable("b").unwrap().value(), Some(2));
        assert_eq!(state.variable("c").unwrap().value(), Some(1));
    }

    #[test]
    fn failed_entry_propagation_reports_failure_with_stats() {
        let record = DeltaRecord::new();
        let a = Variable::new(&record, "a", Domain::new(&record, [1]), None).unwrap();
        let b = Variable::new(&record, "b", Domain::new(&record, [1]), None).unwrap();
        let state = State::new(&record, [a, b]).unwrap();
        let constraints: Vec<Box<dyn Constraint<i64>>> = vec![Box::new(NotEqual::new("a", "b"))];
        let csp = Csp::new(constraints);

        let strategy = DepthFirstSearch::new(
            Box::new(Ac3),
            Box::new(SelectFirstHeuristic),
            Box::new(IdentityValueHeuristic),
        );
        let result = strategy.solve(&csp, &state).unwrap();

        assert!(!result.success);
        assert_eq!(result.stats.state_visits, 0);
        assert_eq!(result.stats.propagations, 1);
        assert!(result.stats.propagator.domain_prunes > 0);
    }

    #[test]
    fn statistics_count_the_work_done() {
        let (_record, state, csp) = two_against_one();
        let strategy = DepthFirstSearch::new(
            Box::new(NullPropagator),
            Box::new(SelectFirstHeuristic),
            Box::new(IdentityValueHeuristic),
        );

        let result = strategy.solve(&csp, &state).unwrap();

        assert!(result.success);
        // Root; the dead a=1 branch costs two visits (a=1, then the
        // conflicting b=1 under it); a=2 and its b=1 child succeed.
        assert_eq!(result.stats.state_visits, 5);
        assert_eq!(result.stats.assignments, 4);
        // One entry propagation plus one per assignment.
        assert_eq!(result.stats.propagations, 5);
        assert_eq!(result.stats.max_depth, 2);
    }

    #[test]
    fn stats_merge_sums_counters_and_maxes_depth() {
        let a = SearchStats {
            state_visits: 3,
            assignments: 2,
            propagations: 4,
            max_depth: 5,
            elapsed: Duration::from_millis(10),
            propagator: PropagatorStats {
                domain_prunes: 1,
                constraint_checks: 7,
            },
        };
        let b = SearchStats {
            state_visits: 1,
            assignments: 1,
            propagations: 1,
            max_depth: 2,
            elapsed: Duration::from_millis(5),
            propagator: PropagatorStats {
                domain_prunes: 2,
                constraint_checks: 3,
            },
        };

        let merged = a.merge(b);
        assert_eq!(merged.state_visits, 4);
        assert_eq!(merged.assignments, 3);
        assert_eq!(merged.propagations, 5);
        assert_eq!(merged.max_depth, 5);
        assert_eq!(merged.elapsed, Duration::from_millis(15));
        assert_eq!(merged.propagator.domain_prunes, 3);
        assert_eq!(merged.propagator.constraint_checks, 10);
    }
}
