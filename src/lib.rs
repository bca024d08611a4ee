//! Vinculum is a generic, transactional constraint satisfaction problem
//! (CSP) solver.
//!
//! The engine is problem-agnostic: a problem is a set of named variables,
//! each with a finite domain of candidate values, plus a set of constraints
//! over subsets of those variables. The solver finds an assignment that
//! satisfies every constraint, or proves that none exists.
//!
//! # Core Concepts
//!
//! - **[`DeltaRecord`]**: the undo log. Every domain and assignment
//!   mutation is recorded as a reversible delta, so any branch of the
//!   search can be rolled back exactly to a checkpoint.
//! - **[`Constraint`]**: a variable scope plus a partial satisfaction
//!   predicate. The crate ships [`AllDifferent`] and [`NotEqual`];
//!   frontends add their own by implementing the trait.
//! - **[`Propagator`]**: a consistency-maintenance strategy that prunes
//!   domains without assigning values, from [`NullPropagator`] (nothing)
//!   to [`Ac3`] (full arc-consistency fixpoint).
//! - **[`DepthFirstSearch`]**: backtracking search over the shared state,
//!   parameterised by variable-selection and value-ordering heuristics.
//!
//! [`DeltaRecord`]: solver::delta::DeltaRecord
//! [`Constraint`]: solver::constraint::Constraint
//! [`AllDifferent`]: solver::constraints::all_different::AllDifferent
//! [`NotEqual`]: solver::constraints::not_equal::NotEqual
//! [`Propagator`]: solver::propagator::Propagator
//! [`NullPropagator`]: solver::propagators::null::NullPropagator
//! [`Ac3`]: solver::propagators::ac3::Ac3
//! [`DepthFirstSearch`]: solver::strategy::DepthFirstSearch
//!
//! # Example: A Simple 2-Variable Problem
//!
//! Solving `a != b` where `a` can be `1` or `2` and `b` can only be `1`.
//! The solver deduces that `a` must be `2`.
//!
//! ```
//! use vinculum::error::Result;
//! use vinculum::solver::constraint::Constraint;
//! use vinculum::solver::constraints::not_equal::NotEqual;
//! use vinculum::solver::csp::Csp;
//! use vinculum::solver::delta::DeltaRecord;
//! use vinculum::solver::domain::Domain;
//! use vinculum::solver::heuristics::value::IdentityValueHeuristic;
//! use vinculum::solver::heuristics::variable::SelectFirstHeuristic;
//! use vinculum::solver::propagators::ac3::Ac3;
//! use vinculum::solver::state::State;
//! use vinculum::solver::strategy::{DepthFirstSearch, SearchStrategy};
//! use vinculum::solver::variable::Variable;
//!
//! fn main() -> Result<()> {
//!     // 1. One delta record anchors the whole solve session.
//!     let record = DeltaRecord::new();
//!
//!     // 2. Variables own their domains; both share the record.
//!     let a = Variable::new(&record, "a", Domain::new(&record, [1, 2]), None)?;
//!     let b = Variable::new(&record, "b", Domain::new(&record, [1]), None)?;
//!     let state = State::new(&record, [a, b])?;
//!
//!     // 3. The constraint graph is immutable once built.
//!     let constraints: Vec<Box<dyn Constraint<i32>>> =
//!         vec![Box::new(NotEqual::new("a", "b"))];
//!     let csp = Csp::new(constraints);
//!
//!     // 4. Solve!
//!     let strategy = DepthFirstSearch::new(
//!         Box::new(Ac3),
//!         Box::new(SelectFirstHeuristic),
//!         Box::new(IdentityValueHeuristic),
//!     );
//!     let result = strategy.solve(&csp, &state)?;
//!
//!     assert!(result.success);
//!     assert_eq!(state.variable("a")?.value(), Some(2));
//!     assert_eq!(state.variable("b")?.value(), Some(1));
//!     Ok(())
//! }
//! ```
pub mod error;
pub mod problems;
pub mod solver;
