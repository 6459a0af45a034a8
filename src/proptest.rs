use crate::grid::UniformGrid;
use crate::settings::SolverSettings;
use ::proptest::prelude::*;

/// Valid grids with node counts in the given range.
pub fn uniform_grid(node_counts: std::ops::Range<usize>) -> impl Strategy<Value = UniformGrid<f64>> {
    assert!(node_counts.start >= 2, "A uniform grid needs at least two nodes");
    // Keep lengths in a moderate range so that spacings stay well away from under- and overflow
    (node_counts, 1e-2..1e2).prop_map(|(n, length)| {
        UniformGrid::try_new(n, length).expect("Strategy only produces valid parameters")
    })
}

/// Settings that pass validation, with a bounded number of steps.
pub fn solver_settings(max_nodes: usize, max_steps: usize) -> impl Strategy<Value = SolverSettings<f64>> {
    (2..=max_nodes, 1e-2..1e2, 1e-6..1e-3, 0..=max_steps).prop_map(
        |(node_count, domain_length, time_step, num_steps)| SolverSettings {
            node_count,
            domain_length,
            time_step,
            num_steps,
        },
    )
}
