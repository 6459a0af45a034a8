//! Errors reported when setting up or running a diffusion solver.
use std::error::Error;
use std::fmt;
use std::fmt::Display;

/// Invalid construction parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum SetupError {
    /// A grid needs at least two nodes to define a positive spacing.
    TooFewNodes { node_count: usize },
    /// The number of grid intervals cannot be represented by the scalar type.
    UnrepresentableNodeCount { node_count: usize },
    /// The domain length must be positive and finite.
    InvalidDomainLength,
    /// The time step must be positive and finite.
    InvalidTimeStep,
    /// A supplied initial state does not have one value per grid node.
    InitialStateMismatch { expected: usize, actual: usize },
    /// An initial state was supplied to a solver that has already taken steps.
    AlreadyStarted { steps_taken: usize },
}

impl Display for SetupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooFewNodes { node_count } => {
                write!(f, "Grid must have at least 2 nodes, but {} were requested.", node_count)
            }
            Self::UnrepresentableNodeCount { node_count } => {
                write!(f, "Node count {} cannot be represented by the scalar type.", node_count)
            }
            Self::InvalidDomainLength => write!(f, "Domain length must be positive and finite."),
            Self::InvalidTimeStep => write!(f, "Time step must be positive and finite."),
            Self::InitialStateMismatch { expected, actual } => write!(
                f,
                "Initial state has {} values, but the grid has {} nodes.",
                actual, expected
            ),
            Self::AlreadyStarted { steps_taken } => write!(
                f,
                "Cannot replace the initial state after {} steps have been taken.",
                steps_taken
            ),
        }
    }
}

impl Error for SetupError {}

#[derive(Debug)]
pub enum SolveErrorKind<T> {
    /// The diffusion model failed to assemble its stiffness matrix.
    Assembly(eyre::Report),
    /// The mass matrix factorization could not produce a solution.
    SingularSystem,
    /// The solution of the linear system does not satisfy the residual tolerance.
    ResidualTooLarge { residual_norm: T, tolerance: T },
    /// A previous step failed, so the solver refuses to continue from its state.
    AlreadyFailed,
}

impl<T: Display> Display for SolveErrorKind<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Assembly(err) => write!(f, "Stiffness matrix assembly failed: {}", err),
            Self::SingularSystem => write!(f, "Linear system is singular."),
            Self::ResidualTooLarge {
                residual_norm,
                tolerance,
            } => write!(
                f,
                "Relative residual norm {} exceeds tolerance {}.",
                residual_norm, tolerance
            ),
            Self::AlreadyFailed => write!(f, "Solver is in a failed state."),
        }
    }
}

/// A failure during time integration.
///
/// The step index is zero-based and refers to the step that was being computed when the
/// failure occurred. The solution held by the solver is the one committed before that step.
#[derive(Debug)]
pub struct SolveError<T> {
    pub step: usize,
    pub kind: SolveErrorKind<T>,
}

impl<T> SolveError<T> {
    pub(crate) fn new(step: usize, kind: SolveErrorKind<T>) -> Self {
        Self { step, kind }
    }
}

impl<T: Display> Display for SolveError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Time step {} failed. Error: {}", self.step, self.kind)
    }
}

impl<T: fmt::Debug + Display> Error for SolveError<T> {}
