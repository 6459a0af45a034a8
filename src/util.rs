use crate::grid::UniformGrid;
use crate::Real;
use nalgebra::DVector;

/// Evaluates a function at every node of a grid.
///
/// This is the nodal interpolation of `f` and is typically used to set up initial states.
///
/// # Example
///
/// ```rust
/// use fenris_diffusion::grid::UniformGrid;
/// use fenris_diffusion::util::nodal_vector_from_fn;
///
/// let grid = UniformGrid::try_new(3, 2.0).unwrap();
/// let u = nodal_vector_from_fn(&grid, |x| 1.0 + x);
/// assert_eq!(u.as_slice(), &[1.0, 2.0, 3.0]);
/// ```
pub fn nodal_vector_from_fn<T, F>(grid: &UniformGrid<T>, f: F) -> DVector<T>
where
    T: Real,
    F: FnMut(T) -> T,
{
    DVector::from_iterator(grid.num_nodes(), grid.node_coordinates().map(f))
}
