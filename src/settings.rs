use crate::error::SetupError;
use crate::grid::UniformGrid;
use crate::Real;
use serde::{Deserialize, Serialize};

/// Parameters of a diffusion problem.
///
/// All fields are required. The settings are validated when a solver is constructed, or
/// explicitly through [`SolverSettings::validate`].
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolverSettings<T> {
    /// Number of grid nodes, at least 2.
    pub node_count: usize,
    /// Length of the domain $[0, L]$.
    pub domain_length: T,
    /// Size of each time step.
    pub time_step: T,
    /// Number of time steps taken by a full solve. May be zero.
    pub num_steps: usize,
}

impl<T: Real> SolverSettings<T> {
    /// Checks the settings, returning the grid they describe.
    pub fn validate(&self) -> Result<UniformGrid<T>, SetupError> {
        let grid = UniformGrid::try_new(self.node_count, self.domain_length)?;
        if !self.time_step.is_finite() || self.time_step <= T::zero() {
            return Err(SetupError::InvalidTimeStep);
        }
        Ok(grid)
    }
}

/// Per-step checks performed by the solver.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StepChecks<T> {
    /// Upper bound on the relative residual $\| M x - b \| / \max(\| b \|, 1)$ of each linear solve.
    pub residual_tolerance: T,
    /// Whether to warn when a step produces non-finite values.
    pub check_finite: bool,
}

impl Default for StepChecks<f64> {
    fn default() -> Self {
        Self {
            residual_tolerance: 1e-8,
            check_finite: true,
        }
    }
}

impl Default for StepChecks<f32> {
    fn default() -> Self {
        Self {
            residual_tolerance: 1e-4,
            check_finite: true,
        }
    }
}
