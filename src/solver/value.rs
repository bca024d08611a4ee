/// The base trait for any value that can live in a variable's domain.
///
/// This is a marker trait: any type satisfying the bounds implements it.
/// `Ord` is part of the contract so that domain iteration and heuristic
/// tie-breaks have a stable, reproducible order across runs.
pub trait Value: Clone + std::fmt::Debug + Eq + std::hash::Hash + Ord + 'static {}
impl<T> Value for T where T: Clone + std::fmt::Debug + Eq + std::hash::Hash + Ord + 'static {}
