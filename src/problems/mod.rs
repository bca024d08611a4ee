//! Demonstration frontends: small, self-contained problems translated
//! through the [`Problem`](crate::solver::problem::Problem) boundary.
//! They double as integration tests and benchmark fixtures for the
//! engine.

pub mod map_colouring;
pub mod n_queens;
