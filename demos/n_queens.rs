use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;
use vinculum::error::Result;
use vinculum::problems::n_queens::NQueens;
use vinculum::solver::heuristics::value::LeastConstrainingValueHeuristic;
use vinculum::solver::heuristics::variable::MinimumRemainingValuesHeuristic;
use vinculum::solver::problem::Problem;
use vinculum::solver::propagator::Propagator;
use vinculum::solver::propagators::ac3::Ac3;
use vinculum::solver::propagators::null::NullPropagator;
use vinculum::solver::propagators::simple::SimplePropagator;
use vinculum::solver::stats::render_stats_table;
use vinculum::solver::strategy::DepthFirstSearch;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PropagatorKind {
    Null,
    Simple,
    Ac3,
}

#[derive(Parser, Debug)]
#[command(about = "Solve n-queens with the vinculum CSP engine")]
struct Args {
    /// Board size (and number of queens).
    #[arg(long, default_value_t = 8)]
    size: usize,

    /// Propagation strategy used during the search.
    #[arg(long, value_enum, default_value_t = PropagatorKind::Ac3)]
    propagator: PropagatorKind,

    /// Emit statistics as JSON instead of a table.
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let propagator: Box<dyn Propagator<i64>> = match args.propagator {
        PropagatorKind::Null => Box::new(NullPropagator),
        PropagatorKind::Simple => Box::new(SimplePropagator),
        PropagatorKind::Ac3 => Box::new(Ac3),
    };
    let strategy = DepthFirstSearch::new(
        propagator,
        Box::new(MinimumRemainingValuesHeuristic),
        Box::new(LeastConstrainingValueHeuristic),
    );

    let (solved, stats) = NQueens::new(args.size).solve(&strategy)?;

    println!("{solved}");
    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&stats).expect("stats serialise to JSON")
        );
    } else {
        println!("{}", render_stats_table(&stats));
    }
    Ok(())
}
