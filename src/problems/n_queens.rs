use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::error::Result;
use crate::solver::constraint::{Assignment, Constraint, ConstraintDescriptor};
use crate::solver::constraints::all_different::AllDifferent;
use crate::solver::csp::Csp;
use crate::solver::delta::DeltaRecord;
use crate::solver::domain::Domain;
use crate::solver::problem::Problem;
use crate::solver::state::State;
use crate::solver::variable::Variable;

/// Forbids two queens from sharing a diagonal: the column distance of
/// the two rows must not equal their row separation.
///
/// Not part of the engine's standard constraint library; it lives here
/// to show the open [`Constraint`] seam a frontend extends.
#[derive(Debug, Clone)]
struct NotOnDiagonal {
    vars: BTreeSet<String>,
    a: String,
    b: String,
    separation: i64,
}

impl NotOnDiagonal {
    fn new(a: String, b: String, separation: i64) -> Self {
        Self {
            vars: [a.clone(), b.clone()].into_iter().collect(),
            a,
            b,
            separation,
        }
    }
}

impl Constraint<i64> for NotOnDiagonal {
    fn variables(&self) -> &BTreeSet<String> {
        &self.vars
    }

    fn descriptor(&self) -> ConstraintDescriptor {
        ConstraintDescriptor {
            name: "NotOnDiagonal".to_string(),
            description: format!("|{} - {}| != {}", self.a, self.b, self.separation),
        }
    }

    fn is_satisfied_with_partial(&self, assignment: &Assignment<i64>) -> bool {
        match (assignment.get(&self.a), assignment.get(&self.b)) {
            (Some(left), Some(right)) => (left - right).abs() != self.separation,
            _ => true,
        }
    }
}

/// Place `size` queens on a `size` x `size` board so that none attack
/// each other: one variable per row holding the queen's column, an
/// [`AllDifferent`] across the columns, and a [`NotOnDiagonal`] per row
/// pair.
#[derive(Debug, Clone)]
pub struct NQueens {
    size: usize,
    queens: BTreeMap<usize, i64>,
}

impl NQueens {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            queens: BTreeMap::new(),
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// The column of the queen in `row`, if solved.
    pub fn queen(&self, row: usize) -> Option<i64> {
        self.queens.get(&row).copied()
    }

    fn var_name(row: usize) -> String {
        format!("q{row}")
    }
}

impl Problem<i64> for NQueens {
    fn to_state(&self) -> Result<(Csp<i64>, State<i64>)> {
        let record = DeltaRecord::new();
        let mut variables = Vec::with_capacity(self.size);
        for row in 0..self.size {
            let domain = Domain::new(&record, 0..self.size as i64);
            variables.push(Variable::new(
                &record,
                Self::var_name(row),
                domain,
                self.queens.get(&row).copied(),
            )?);
        }
        let state = State::new(&record, variables)?;

        let mut constraints: Vec<Box<dyn Constraint<i64>>> = vec![Box::new(AllDifferent::new(
            (0..self.size).map(Self::var_name),
        ))];
        for i in 0..self.size {
            for j in (i + 1)..self.size {
                constraints.push(Box::new(NotOnDiagonal::new(
                    Self::var_name(i),
                    Self::var_name(j),
                    (j - i) as i64,
                )));
            }
        }
        Ok((Csp::new(constraints), state))
    }

    fn from_state(&self, _csp: &Csp<i64>, state: &State<i64>) -> Result<Self> {
        let mut solved = self.clone();
        solved.queens.clear();
        for row in 0..self.size {
            if let Some(column) = state.variable(&Self::var_name(row))?.value() {
                solved.queens.insert(row, column);
            }
        }
        Ok(solved)
    }
}

impl fmt::Display for NQueens {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.size {
            for column in 0..self.size as i64 {
                let square = if self.queen(row) == Some(column) {
                    'Q'
                } else {
                    '.'
                };
                write!(f, "{square} ")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::error::SolverError;
    use crate::solver::heuristics::value::LeastConstrainingValueHeuristic;
    use crate::solver::heuristics::variable::MinimumRemainingValuesHeuristic;
    use crate::solver::propagators::ac3::Ac3;
    use crate::solver::strategy::DepthFirstSearch;

    fn strategy() -> DepthFirstSearch<i64> {
        DepthFirstSearch::new(
            Box::new(Ac3),
            Box::new(MinimumRemainingValuesHeuristic),
            Box::new(LeastConstrainingValueHeuristic),
        )
    }

    fn assert_no_attacks(solved: &NQueens) {
        let n = solved.size();
        for i in 0..n {
            for j in (i + 1)..n {
                let qi = solved.queen(i).expect("row solved");
                let qj = solved.queen(j).expect("row solved");
                assert_ne!(qi, qj, "rows {i} and {j} share a column");
                assert_ne!(
                    (qi - qj).abs(),
                    (j - i) as i64,
                    "rows {i} and {j} share a diagonal"
                );
            }
        }
    }

    #[test]
    fn solves_the_classic_eight() {
        let (solved, stats) = NQueens::new(8).solve(&strategy()).unwrap();
        assert_no_attacks(&solved);
        assert!(stats.assignments >= 8);
    }

    #[test]
    fn four_queens_has_a_solution() {
        let (solved, _stats) = NQueens::new(4).solve(&strategy()).unwrap();
        assert_no_attacks(&solved);
        // The two solutions of 4-queens are mirror images; both start
        // with the first queen off the edge.
        assert!(matches!(solved.queen(0), Some(1) | Some(2)));
    }

    #[test]
    fn three_queens_is_impossible() {
        let err = NQueens::new(3).solve(&strategy()).unwrap_err();
        assert!(matches!(err.solver_error(), SolverError::NoSolution));
    }

    #[test]
    fn one_queen_is_trivial() {
        let (solved, _stats) = NQueens::new(1).solve(&strategy()).unwrap();
        assert_eq!(solved.queen(0), Some(0));
    }

    #[test]
    fn board_rendering_marks_the_queens() {
        let (solved, _stats) = NQueens::new(4).solve(&strategy()).unwrap();
        let board = solved.to_string();
        assert_eq!(board.matches('Q').count(), 4);
        assert_eq!(board.lines().count(), 4);
    }
}
