use tracing_subscriber::EnvFilter;
use vinculum::error::Result;
use vinculum::problems::map_colouring::MapColouring;
use vinculum::solver::heuristics::value::LeastConstrainingValueHeuristic;
use vinculum::solver::heuristics::variable::MinimumRemainingValuesHeuristic;
use vinculum::solver::problem::Problem;
use vinculum::solver::propagators::ac3::Ac3;
use vinculum::solver::stats::render_stats_table;
use vinculum::solver::strategy::DepthFirstSearch;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let problem = MapColouring::australia();
    let strategy = DepthFirstSearch::new(
        Box::new(Ac3),
        Box::new(MinimumRemainingValuesHeuristic),
        Box::new(LeastConstrainingValueHeuristic),
    );

    let (solved, stats) = problem.solve(&strategy)?;

    for (region, colour) in solved.colours() {
        println!("{region:>4}: {colour:?}");
    }
    println!();
    println!("{}", render_stats_table(&stats));
    Ok(())
}
