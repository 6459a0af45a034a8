use crate::error::SetupError;
use crate::Real;

/// A uniform grid of nodes on the interval $[0, L]$.
///
/// Node $i$ is located at $x_i = i h$ with spacing $h = L / (N - 1)$.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct UniformGrid<T> {
    num_nodes: usize,
    length: T,
    spacing: T,
}

impl<T: Real> UniformGrid<T> {
    /// Creates a grid with the given number of nodes spanning a domain of the given length.
    ///
    /// Fails if there are fewer than two nodes or if the length is not positive and finite.
    pub fn try_new(num_nodes: usize, length: T) -> Result<Self, SetupError> {
        if num_nodes < 2 {
            return Err(SetupError::TooFewNodes { node_count: num_nodes });
        }
        if !length.is_finite() || length <= T::zero() {
            return Err(SetupError::InvalidDomainLength);
        }

        let num_intervals = T::from_usize(num_nodes - 1).ok_or(SetupError::UnrepresentableNodeCount { node_count: num_nodes })?;
        let spacing = length / num_intervals;
        // A huge node count relative to the length can still underflow
        if spacing <= T::zero() {
            return Err(SetupError::InvalidDomainLength);
        }

        Ok(Self {
            num_nodes,
            length,
            spacing,
        })
    }

    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    pub fn length(&self) -> T {
        self.length
    }

    pub fn spacing(&self) -> T {
        self.spacing
    }

    /// The coordinate of the node with the given index.
    ///
    /// # Panics
    ///
    /// Panics if the index is out of bounds.
    pub fn node_coordinate(&self, index: usize) -> T {
        assert!(index < self.num_nodes, "Node index out of bounds");
        T::from_usize(index).expect("Node index must be representable") * self.spacing
    }

    pub fn node_coordinates(&self) -> impl Iterator<Item = T> + '_ {
        (0..self.num_nodes).map(move |i| self.node_coordinate(i))
    }

    /// Indices of the two boundary nodes, left first.
    pub fn boundary_nodes(&self) -> [usize; 2] {
        [0, self.num_nodes - 1]
    }

    /// Indices of the nodes strictly inside the domain.
    pub fn interior_nodes(&self) -> std::ops::Range<usize> {
        1..self.num_nodes - 1
    }
}
