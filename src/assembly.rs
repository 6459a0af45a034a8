//! Assembly of the tridiagonal system matrices.
//!
//! Both the mass matrix and the stiffness matrix of linear elements on a uniform 1D grid are
//! tridiagonal, and both are built by the same procedure: every node $i \geq 1$ contributes a
//! [`NodeStencil`], consisting of the diagonal entry $(i, i)$ (interior nodes only) and the
//! symmetric coupling entries $(i, i - 1)$ and $(i - 1, i)$. Each matrix entry is written by
//! exactly one node, so the stencils of different nodes are independent of each other.
//!
//! The rows of Dirichlet nodes are subsequently replaced with identity rows, see
//! [`apply_dirichlet_rows`].
use crate::Real;
use nalgebra::DMatrix;
use rayon::iter::{IntoParallelIterator, ParallelIterator};

mod mass;
mod stiffness;

pub use mass::*;
pub use stiffness::*;

/// The entries contributed by a single node to a tridiagonal matrix.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct NodeStencil<T> {
    /// The diagonal entry $(i, i)$. Ignored for the last node.
    pub diagonal: T,
    /// The coupling entries $(i, i - 1)$ and $(i - 1, i)$.
    pub coupling: T,
}

/// Assembles a tridiagonal matrix from per-node stencils.
///
/// The output is zeroed before assembly. The stencil function is called once for each node
/// $i = 1, \dots, N - 1$.
///
/// # Panics
///
/// Panics if the output matrix is not square or has fewer than two rows.
pub fn assemble_tridiagonal_into<T, F>(output: &mut DMatrix<T>, mut stencil: F)
where
    T: Real,
    F: FnMut(usize) -> NodeStencil<T>,
{
    let n = check_tridiagonal_output(output);
    output.fill(T::zero());
    for i in 1..n {
        scatter_node_stencil(output, i, stencil(i));
    }
}

/// Same as [`assemble_tridiagonal_into`], but evaluates the node stencils in parallel.
///
/// Only the stencil evaluation runs in parallel. The stencils are written to the matrix serially
/// afterwards, so the result is identical to the serial version.
pub fn assemble_tridiagonal_into_par<T, F>(output: &mut DMatrix<T>, stencil: F)
where
    T: Real,
    F: Fn(usize) -> NodeStencil<T> + Sync,
{
    let n = check_tridiagonal_output(output);
    let stencils: Vec<_> = (1..n).into_par_iter().map(|i| stencil(i)).collect();

    output.fill(T::zero());
    for (i, node_stencil) in (1..n).zip(stencils) {
        scatter_node_stencil(output, i, node_stencil);
    }
}

/// Replaces the rows associated with the given nodes by identity rows.
///
/// Only the rows are modified. The columns are left untouched, so a matrix that was symmetric
/// before is generally no longer symmetric afterwards.
pub fn apply_dirichlet_rows<T: Real>(matrix: &mut DMatrix<T>, nodes: &[usize]) {
    for &node in nodes {
        matrix.row_mut(node).fill(T::zero());
        matrix[(node, node)] = T::one();
    }
}

fn check_tridiagonal_output<T: Real>(output: &DMatrix<T>) -> usize {
    let n = output.nrows();
    assert_eq!(output.ncols(), n, "Output matrix must be square");
    assert!(n >= 2, "Tridiagonal assembly requires at least two nodes");
    n
}

fn scatter_node_stencil<T: Real>(output: &mut DMatrix<T>, i: usize, stencil: NodeStencil<T>) {
    if i + 1 < output.nrows() {
        output[(i, i)] = stencil.diagonal;
    }
    output[(i, i - 1)] = stencil.coupling;
    output[(i - 1, i)] = stencil.coupling;
}
