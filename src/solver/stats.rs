use prettytable::{Cell, Row, Table};

use crate::solver::strategy::SearchStats;

/// Renders search statistics as a small text table for benchmark and
/// demo output.
pub fn render_stats_table(stats: &SearchStats) -> String {
    let mut table = Table::new();
    table.add_row(Row::new(vec![Cell::new("Metric"), Cell::new("Value")]));

    let rows: Vec<(&str, String)> = vec![
        ("State visits", stats.state_visits.to_string()),
        ("Assignments", stats.assignments.to_string()),
        ("Propagations", stats.propagations.to_string()),
        ("Max depth", stats.max_depth.to_string()),
        ("Domain prunes", stats.propagator.domain_prunes.to_string()),
        (
            "Constraint checks",
            stats.propagator.constraint_checks.to_string(),
        ),
        (
            "Elapsed (ms)",
            format!("{:.2}", stats.elapsed.as_secs_f64() * 1000.0),
        ),
    ];
    for (metric, value) in rows {
        table.add_row(Row::new(vec![Cell::new(metric), Cell::new(&value)]));
    }

    table.to_string()
}
