//! Standard heuristics for choosing which variable the search branches
//! on next.

use std::cell::RefCell;

use rand::seq::IteratorRandom;
use rand_chacha::ChaCha8Rng;
use rand_core::SeedableRng;

use crate::solver::state::State;
use crate::solver::value::Value;

/// A strategy for choosing the next unassigned variable.
///
/// Heuristics must never change whether a problem is solvable, only how
/// much of the tree the search visits before deciding. Ties must be
/// broken in a stable, reproducible order.
pub trait VariableSelectionHeuristic<V: Value>: std::fmt::Debug {
    /// The name of the chosen variable, or `None` when every variable is
    /// already assigned.
    fn select_variable(&self, state: &State<V>) -> Option<String>;
}

/// Picks the first unassigned variable in name order. The simplest
/// deterministic choice.
#[derive(Debug, Default, Clone, Copy)]
pub struct SelectFirstHeuristic;

impl<V: Value> VariableSelectionHeuristic<V> for SelectFirstHeuristic {
    fn select_variable(&self, state: &State<V>) -> Option<String> {
        state
            .unassigned_variables()
            .next()
            .map(|variable| variable.name().to_string())
    }
}

/// Minimum remaining values: picks the unassigned variable with the
/// smallest domain, breaking ties by name.
///
/// A fail-first strategy. Tackling the most constrained variable early
/// prunes the search space faster on most problems.
#[derive(Debug, Default, Clone, Copy)]
pub struct MinimumRemainingValuesHeuristic;

impl<V: Value> VariableSelectionHeuristic<V> for MinimumRemainingValuesHeuristic {
    fn select_variable(&self, state: &State<V>) -> Option<String> {
        state
            .unassigned_variables()
            .min_by(|a, b| (a.domain_size(), a.name()).cmp(&(b.domain_size(), b.name())))
            .map(|variable| variable.name().to_string())
    }
}

/// Picks uniformly among the unassigned variables, driven by a seeded
/// generator so runs remain reproducible.
#[derive(Debug)]
pub struct RandomVariableHeuristic {
    rng: RefCell<ChaCha8Rng>,
}

impl RandomVariableHeuristic {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: RefCell::new(ChaCha8Rng::seed_from_u64(seed)),
        }
    }
}

impl<V: Value> VariableSelectionHeuristic<V> for RandomVariableHeuristic {
    fn select_variable(&self, state: &State<V>) -> Option<String> {
        let mut rng = self.rng.borrow_mut();
        state
            .unassigned_variables()
            .choose(&mut *rng)
            .map(|variable| variable.name().to_string())
    }
}
