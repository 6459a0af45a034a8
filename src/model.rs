//! Diffusion models.
//!
//! A [`DiffusionModel`] supplies the physics of the problem to the time integrator: the stiffness
//! matrix for a given state, and the boundary conditions imposed on each new state. Alternative
//! diffusion laws or boundary treatments are new implementors of the trait and need no changes
//! to the assembly routines or the solver.
use crate::assembly::assemble_coefficient_stiffness_into;
use crate::grid::UniformGrid;
use crate::Real;
use eyre::eyre;
use nalgebra::{DMatrix, DVectorView, DVectorViewMut};
use numeric_literals::replace_float_literals;
use serde::{Deserialize, Serialize};

pub trait DiffusionModel<T: Real> {
    /// Assembles the stiffness matrix associated with the state `u` into the output matrix.
    ///
    /// The output is an $N \times N$ matrix whose rows $0$ and $N - 1$ must be identity rows,
    /// matching the convention of the mass matrix.
    fn assemble_stiffness_matrix_into(
        &self,
        output: &mut DMatrix<T>,
        grid: &UniformGrid<T>,
        u: DVectorView<T>,
    ) -> eyre::Result<()>;

    /// Overwrites the boundary entries $0$ and $N - 1$ of a candidate state with the prescribed
    /// values. All other entries must be left untouched.
    fn apply_boundary_conditions(&self, candidate: DVectorViewMut<T>);

    fn assemble_stiffness_matrix(&self, grid: &UniformGrid<T>, u: DVectorView<T>) -> eyre::Result<DMatrix<T>> {
        let n = grid.num_nodes();
        let mut stiffness = DMatrix::zeros(n, n);
        self.assemble_stiffness_matrix_into(&mut stiffness, grid, u)?;
        Ok(stiffness)
    }
}

impl<'a, T, M> DiffusionModel<T> for &'a M
where
    T: Real,
    M: ?Sized + DiffusionModel<T>,
{
    fn assemble_stiffness_matrix_into(
        &self,
        output: &mut DMatrix<T>,
        grid: &UniformGrid<T>,
        u: DVectorView<T>,
    ) -> eyre::Result<()> {
        <M as DiffusionModel<T>>::assemble_stiffness_matrix_into(self, output, grid, u)
    }

    fn apply_boundary_conditions(&self, candidate: DVectorViewMut<T>) {
        <M as DiffusionModel<T>>::apply_boundary_conditions(self, candidate)
    }
}

/// Fixed values at the two ends of the domain.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirichletValues<T> {
    pub left: T,
    pub right: T,
}

impl<T: Real> DirichletValues<T> {
    pub fn new(left: T, right: T) -> Self {
        Self { left, right }
    }

    pub fn uniform(value: T) -> Self {
        Self::new(value, value)
    }

    pub fn apply(&self, mut candidate: DVectorViewMut<T>) {
        let n = candidate.len();
        assert!(n >= 2, "Dirichlet values require at least two nodes");
        candidate[0] = self.left;
        candidate[n - 1] = self.right;
    }
}

fn check_state_len<T: Real>(grid: &UniformGrid<T>, u: &DVectorView<T>) -> eyre::Result<()> {
    if u.len() != grid.num_nodes() {
        return Err(eyre!(
            "State has {} entries, but the grid has {} nodes",
            u.len(),
            grid.num_nodes()
        ));
    }
    Ok(())
}

/// Diffusion with the coefficient $D(u) = 1 + u / 2$.
///
/// The coefficient is evaluated per node with the state passed to the stiffness assembly,
/// which the solver lags at the previous time step. Boundary values default to $1$ at both ends.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct NonlinearDiffusion<T> {
    boundary_values: DirichletValues<T>,
    parallel_assembly: bool,
}

impl<T: Real> Default for NonlinearDiffusion<T> {
    fn default() -> Self {
        Self::new(DirichletValues::uniform(T::one()))
    }
}

impl<T: Real> NonlinearDiffusion<T> {
    pub fn new(boundary_values: DirichletValues<T>) -> Self {
        Self {
            boundary_values,
            parallel_assembly: false,
        }
    }

    /// Evaluate node coefficients in parallel during stiffness assembly.
    pub fn with_parallel_assembly(self, parallel: bool) -> Self {
        Self {
            parallel_assembly: parallel,
            ..self
        }
    }

    pub fn boundary_values(&self) -> &DirichletValues<T> {
        &self.boundary_values
    }

    #[replace_float_literals(T::from_f64(literal).unwrap())]
    pub fn diffusion_coefficient(&self, value: T) -> T {
        1.0 + 0.5 * value
    }
}

impl<T: Real> DiffusionModel<T> for NonlinearDiffusion<T> {
    fn assemble_stiffness_matrix_into(
        &self,
        output: &mut DMatrix<T>,
        grid: &UniformGrid<T>,
        u: DVectorView<T>,
    ) -> eyre::Result<()> {
        check_state_len(grid, &u)?;
        assemble_coefficient_stiffness_into(
            output,
            grid,
            u,
            |value| self.diffusion_coefficient(value),
            self.parallel_assembly,
        );
        Ok(())
    }

    fn apply_boundary_conditions(&self, candidate: DVectorViewMut<T>) {
        self.boundary_values.apply(candidate);
    }
}

/// Diffusion with a constant coefficient, i.e. the linear heat equation.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstantDiffusion<T> {
    pub coefficient: T,
    pub boundary_values: DirichletValues<T>,
}

impl<T: Real> ConstantDiffusion<T> {
    pub fn new(coefficient: T, boundary_values: DirichletValues<T>) -> Self {
        Self {
            coefficient,
            boundary_values,
        }
    }
}

impl<T: Real> DiffusionModel<T> for ConstantDiffusion<T> {
    fn assemble_stiffness_matrix_into(
        &self,
        output: &mut DMatrix<T>,
        grid: &UniformGrid<T>,
        u: DVectorView<T>,
    ) -> eyre::Result<()> {
        check_state_len(grid, &u)?;
        assemble_coefficient_stiffness_into(output, grid, u, |_| self.coefficient, false);
        Ok(())
    }

    fn apply_boundary_conditions(&self, candidate: DVectorViewMut<T>) {
        self.boundary_values.apply(candidate);
    }
}
