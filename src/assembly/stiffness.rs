use crate::assembly::{apply_dirichlet_rows, assemble_tridiagonal_into, assemble_tridiagonal_into_par, NodeStencil};
use crate::grid::UniformGrid;
use crate::Real;
use nalgebra::{DMatrix, DVectorView};
use numeric_literals::replace_float_literals;

/// The stiffness stencil of linear elements with spacing $h$, scaled by a diffusion coefficient $D$.
///
/// The diagonal entry is $2 D / h$ and the coupling entries are $-D / h$.
#[replace_float_literals(T::from_f64(literal).unwrap())]
pub fn stiffness_stencil<T: Real>(coefficient: T, spacing: T) -> NodeStencil<T> {
    NodeStencil {
        diagonal: 2.0 * coefficient / spacing,
        coupling: -coefficient / spacing,
    }
}

/// Assembles a stiffness matrix whose stencil at node $i$ is scaled by $D(u_i)$.
///
/// The coefficient is evaluated at the nodal value of the given state, so for a state-dependent
/// coefficient the matrix is lagged with respect to whatever the state is later used for.
/// Rows $0$ and $N - 1$ are identity rows.
///
/// If `parallel` is set, the coefficients are evaluated in parallel.
///
/// # Panics
///
/// Panics if the output matrix is not $N \times N$ or the state does not have $N$ entries.
pub fn assemble_coefficient_stiffness_into<T, F>(
    output: &mut DMatrix<T>,
    grid: &UniformGrid<T>,
    u: DVectorView<T>,
    coefficient: F,
    parallel: bool,
) where
    T: Real,
    F: Fn(T) -> T + Sync,
{
    let n = grid.num_nodes();
    assert_eq!(output.shape(), (n, n), "Output matrix dimension mismatch");
    assert_eq!(u.len(), n, "State must have one entry per node");

    let h = grid.spacing();
    let stencil = |i: usize| stiffness_stencil(coefficient(u[i]), h);
    if parallel {
        assemble_tridiagonal_into_par(output, stencil);
    } else {
        assemble_tridiagonal_into(output, stencil);
    }
    apply_dirichlet_rows(output, &grid.boundary_nodes());
}

pub fn assemble_coefficient_stiffness<T, F>(grid: &UniformGrid<T>, u: DVectorView<T>, coefficient: F) -> DMatrix<T>
where
    T: Real,
    F: Fn(T) -> T + Sync,
{
    let n = grid.num_nodes();
    let mut stiffness = DMatrix::zeros(n, n);
    assemble_coefficient_stiffness_into(&mut stiffness, grid, u, coefficient, false);
    stiffness
}
