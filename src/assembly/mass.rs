use crate::assembly::{apply_dirichlet_rows, assemble_tridiagonal_into, NodeStencil};
use crate::grid::UniformGrid;
use crate::Real;
use nalgebra::DMatrix;
use numeric_literals::replace_float_literals;

/// The mass stencil of linear elements with spacing $h$.
///
/// Integrating products of the hat functions $\phi_i$ over the two elements adjacent to node $i$
/// gives
///
/// $$
/// \int \phi_i \phi_i \\, \mathrm{d}x = \frac{2}{3} h, \qquad \int \phi_i \phi_{i-1} \\, \mathrm{d}x = \frac{1}{6} h.
/// $$
#[replace_float_literals(T::from_f64(literal).unwrap())]
pub fn mass_stencil<T: Real>(spacing: T) -> NodeStencil<T> {
    NodeStencil {
        diagonal: 2.0 / 3.0 * spacing,
        coupling: 1.0 / 6.0 * spacing,
    }
}

/// Assembles the mass matrix of the grid into the given matrix.
///
/// Rows $0$ and $N - 1$ are identity rows, encoding the Dirichlet boundary nodes.
///
/// # Panics
///
/// Panics if the output matrix is not $N \times N$.
pub fn assemble_mass_matrix_into<T: Real>(output: &mut DMatrix<T>, grid: &UniformGrid<T>) {
    let n = grid.num_nodes();
    assert_eq!(output.shape(), (n, n), "Output matrix dimension mismatch");

    let stencil = mass_stencil(grid.spacing());
    assemble_tridiagonal_into(output, |_| stencil);
    apply_dirichlet_rows(output, &grid.boundary_nodes());
}

pub fn assemble_mass_matrix<T: Real>(grid: &UniformGrid<T>) -> DMatrix<T> {
    let n = grid.num_nodes();
    let mut mass = DMatrix::zeros(n, n);
    assemble_mass_matrix_into(&mut mass, grid);
    mass
}
