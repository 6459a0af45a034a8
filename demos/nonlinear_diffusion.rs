//! Integrates the nonlinear diffusion equation $u_t = ((1 + u / 2) u_x)_x$ and prints the final state.
//!
//! Usage: `cargo run --example nonlinear_diffusion [settings.json]`
//!
//! Without arguments, 20 nodes on $[0, 2]$ are integrated for 100 steps of size 0.001, starting
//! from and held at $u = 1$. A settings file contains the fields of `SolverSettings`, e.g.
//! `{ "node_count": 40, "domain_length": 2.0, "time_step": 0.0001, "num_steps": 500 }`.
use eyre::{eyre, WrapErr};
use fenris_diffusion::model::NonlinearDiffusion;
use fenris_diffusion::settings::SolverSettings;
use fenris_diffusion::solver::DiffusionSolver;
use std::fs;

fn load_settings() -> eyre::Result<SolverSettings<f64>> {
    match std::env::args().nth(1) {
        Some(path) => {
            let json = fs::read_to_string(&path).wrap_err_with(|| format!("Failed to read settings file {}", path))?;
            serde_json::from_str(&json).wrap_err("Failed to parse solver settings")
        }
        None => Ok(SolverSettings {
            node_count: 20,
            domain_length: 2.0,
            time_step: 0.001,
            num_steps: 100,
        }),
    }
}

fn main() -> eyre::Result<()> {
    let settings = load_settings()?;
    let model = NonlinearDiffusion::default();
    let mut solver = DiffusionSolver::try_new(&settings, model)?;

    // The coefficient is 1.5 for the initial state
    let stability_number = solver.stability_number(1.5);
    if stability_number > 1.0 / 6.0 {
        println!("Warning: dt D / h^2 = {stability_number:.3} is likely too large for the explicit scheme.");
    }

    let summary = solver.solve()?;
    if let Some(step) = summary.first_non_finite_step {
        return Err(eyre!("Solution became non-finite at step {}", step));
    }

    println!(
        "Integrated {} steps to t = {} (max relative residual {:.2e})",
        summary.steps,
        solver.time(),
        summary.max_residual
    );
    for (i, (x, u)) in solver.nodal_values().enumerate() {
        println!("x[{i}] = {x:.6}, u[{i}] = {u:.12}");
    }
    Ok(())
}
