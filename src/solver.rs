//! Time integration of the semi-discrete diffusion equation.
//!
//! With mass matrix $M$ and a stiffness matrix $K(u)$ supplied by a [`DiffusionModel`], each
//! time step computes the new state $u^{n+1}$ from
//!
//! $$
//! M u^{n+1} = M u^n - \Delta t \\, K(u^n) u^n.
//! $$
//!
//! The stiffness matrix is assembled from the previous state, so the scheme is explicit. It is
//! only stable when $\Delta t$ is small compared to $h^2 / D$, and this is not checked: a
//! time step that is too large makes the solution oscillate and eventually diverge.
//! [`DiffusionSolver::stability_number`] computes $\Delta t D / h^2$ for a given coefficient,
//! and the solver warns when a step produces non-finite values (see [`StepChecks`]).
use crate::assembly::assemble_mass_matrix;
use crate::error::{SetupError, SolveError, SolveErrorKind};
use crate::grid::UniformGrid;
use crate::model::DiffusionModel;
use crate::settings::{SolverSettings, StepChecks};
use crate::Real;
use log::{debug, info, warn};
use nalgebra::linalg::ColPivQR;
use nalgebra::{DMatrix, DVector, DVectorView, DVectorViewMut, Dyn};

/// The stage of a time integration.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum IntegratorState {
    /// No steps have been taken yet.
    Ready,
    /// Some, but not all steps have been taken.
    Stepping { completed: usize },
    /// All steps have been taken. The current state is the final solution.
    Done,
    /// The given step failed. The current state is the one committed before it.
    Failed { step: usize },
}

impl IntegratorState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Failed { .. })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SolveSummary<T> {
    /// Number of steps taken by the call to [`DiffusionSolver::solve`].
    pub steps: usize,
    /// The largest relative residual of any linear solve so far.
    pub max_residual: T,
    /// The first step that produced non-finite values, if any.
    pub first_non_finite_step: Option<usize>,
}

/// Integrates a diffusion model forward in time on a uniform grid.
///
/// The mass matrix and its factorization are computed once at construction. The state is
/// initialized to all ones unless another initial state is supplied with
/// [`with_initial_state`](Self::with_initial_state).
#[derive(Debug)]
pub struct DiffusionSolver<T: Real, Model> {
    grid: UniformGrid<T>,
    model: Model,
    mass: DMatrix<T>,
    mass_factorization: ColPivQR<T, Dyn, Dyn>,
    u: DVector<T>,
    time_step: T,
    num_steps: usize,
    steps_taken: usize,
    state: IntegratorState,
    checks: StepChecks<T>,
    max_residual: T,
    first_non_finite_step: Option<usize>,

    // Reused between steps
    stiffness: DMatrix<T>,
    rhs: DVector<T>,
}

impl<T, Model> DiffusionSolver<T, Model>
where
    T: Real,
    Model: DiffusionModel<T>,
    StepChecks<T>: Default,
{
    pub fn try_new(settings: &SolverSettings<T>, model: Model) -> Result<Self, SetupError> {
        Self::try_new_with_checks(settings, model, StepChecks::default())
    }
}

impl<T, Model> DiffusionSolver<T, Model>
where
    T: Real,
    Model: DiffusionModel<T>,
{
    pub fn try_new_with_checks(
        settings: &SolverSettings<T>,
        model: Model,
        checks: StepChecks<T>,
    ) -> Result<Self, SetupError> {
        let grid = settings.validate()?;
        let n = grid.num_nodes();
        let mass = assemble_mass_matrix(&grid);
        let mass_factorization = mass.clone().col_piv_qr();

        debug!(
            "Created diffusion solver with {} nodes (h = {}), {} steps of size {}",
            n,
            grid.spacing(),
            settings.num_steps,
            settings.time_step
        );

        Ok(Self {
            grid,
            model,
            mass,
            mass_factorization,
            u: DVector::repeat(n, T::one()),
            time_step: settings.time_step,
            num_steps: settings.num_steps,
            steps_taken: 0,
            state: IntegratorState::Ready,
            checks,
            max_residual: T::zero(),
            first_non_finite_step: None,
            stiffness: DMatrix::zeros(n, n),
            rhs: DVector::zeros(n),
        })
    }

    /// Replaces the initial all-ones state.
    ///
    /// The state is used as given. In particular, the boundary conditions are not applied to it.
    /// Fails if the solver has already taken steps.
    pub fn with_initial_state(mut self, u: DVector<T>) -> Result<Self, SetupError> {
        if self.state != IntegratorState::Ready {
            return Err(SetupError::AlreadyStarted {
                steps_taken: self.steps_taken,
            });
        }
        if u.len() != self.grid.num_nodes() {
            return Err(SetupError::InitialStateMismatch {
                expected: self.grid.num_nodes(),
                actual: u.len(),
            });
        }
        self.u = u;
        Ok(self)
    }

    pub fn grid(&self) -> &UniformGrid<T> {
        &self.grid
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn mass_matrix(&self) -> &DMatrix<T> {
        &self.mass
    }

    pub fn solution(&self) -> DVectorView<'_, T> {
        DVectorView::from(&self.u)
    }

    pub fn into_solution(self) -> DVector<T> {
        self.u
    }

    /// Pairs of node coordinate $x_i = i h$ and solution value $u_i$, ordered by node index.
    pub fn nodal_values(&self) -> impl Iterator<Item = (T, T)> + '_ {
        self.grid
            .node_coordinates()
            .zip(self.u.iter().copied())
    }

    pub fn state(&self) -> IntegratorState {
        self.state
    }

    pub fn steps_taken(&self) -> usize {
        self.steps_taken
    }

    pub fn num_steps(&self) -> usize {
        self.num_steps
    }

    pub fn time_step(&self) -> T {
        self.time_step
    }

    /// The simulated time of the current state.
    pub fn time(&self) -> T {
        T::from_usize(self.steps_taken).expect("Step count must be representable") * self.time_step
    }

    /// The dimensionless number $\Delta t D / h^2$ for the given diffusion coefficient $D$.
    ///
    /// The explicit scheme requires this number to be small. With the consistent mass matrix,
    /// the highest frequency mode of the uniform-coefficient problem is damped only when it is
    /// below $1 / 6$.
    pub fn stability_number(&self, coefficient: T) -> T {
        let h = self.grid.spacing();
        self.time_step * coefficient / (h * h)
    }

    /// Takes the remaining time steps.
    ///
    /// Does nothing for a solver that has already taken all of its steps. A failed step aborts
    /// the integration, and the solver refuses to continue afterwards.
    pub fn solve(&mut self) -> Result<SolveSummary<T>, SolveError<T>> {
        let steps_before = self.steps_taken;
        let already_finished = self.state.is_terminal();
        if !already_finished {
            info!(
                "Integrating diffusion on {} nodes: steps {} to {} with time step {}",
                self.grid.num_nodes(),
                self.steps_taken,
                self.num_steps,
                self.time_step
            );
        }

        while self.step()? != IntegratorState::Done {}

        let summary = SolveSummary {
            steps: self.steps_taken - steps_before,
            max_residual: self.max_residual,
            first_non_finite_step: self.first_non_finite_step,
        };
        if !already_finished {
            info!(
                "Finished diffusion integration at t = {} after {} steps",
                self.time(),
                self.steps_taken
            );
        }
        Ok(summary)
    }

    /// Takes a single time step and returns the resulting integrator state.
    ///
    /// Once all steps have been taken, this returns [`IntegratorState::Done`] without changing
    /// the solution.
    pub fn step(&mut self) -> Result<IntegratorState, SolveError<T>> {
        if let IntegratorState::Failed { step } = self.state {
            return Err(SolveError::new(step, SolveErrorKind::AlreadyFailed));
        }
        if self.steps_taken >= self.num_steps {
            self.state = IntegratorState::Done;
            return Ok(self.state);
        }

        let step = self.steps_taken;
        let (candidate, residual_norm) = match self.compute_candidate(step) {
            Ok(result) => result,
            Err(err) => {
                warn!("Aborting diffusion integration: {}", err);
                self.state = IntegratorState::Failed { step };
                return Err(err);
            }
        };

        if self.checks.check_finite && self.first_non_finite_step.is_none() && !is_finite(&candidate) {
            warn!(
                "Step {} produced non-finite values. The time step {} is likely too large for the explicit scheme.",
                step, self.time_step
            );
            self.first_non_finite_step = Some(step);
        }
        debug!("Time step {}: relative residual {}", step, residual_norm);

        self.u = candidate;
        self.steps_taken += 1;
        if residual_norm > self.max_residual {
            self.max_residual = residual_norm;
        }
        self.state = if self.steps_taken == self.num_steps {
            IntegratorState::Done
        } else {
            IntegratorState::Stepping {
                completed: self.steps_taken,
            }
        };
        Ok(self.state)
    }

    fn compute_candidate(&mut self, step: usize) -> Result<(DVector<T>, T), SolveError<T>> {
        self.model
            .assemble_stiffness_matrix_into(&mut self.stiffness, &self.grid, DVectorView::from(&self.u))
            .map_err(|err| SolveError::new(step, SolveErrorKind::Assembly(err)))?;

        // rhs = M u - dt K u
        self.rhs.gemv(T::one(), &self.mass, &self.u, T::zero());
        self.rhs
            .gemv(-self.time_step, &self.stiffness, &self.u, T::one());
        // The Dirichlet rows of M are identity rows, so this prescribes the boundary unknowns
        self.model
            .apply_boundary_conditions(DVectorViewMut::from(&mut self.rhs));

        let mut candidate = self
            .mass_factorization
            .solve(&self.rhs)
            .ok_or_else(|| SolveError::new(step, SolveErrorKind::SingularSystem))?;

        // A NaN residual passes here. Non-finite states are reported separately.
        let residual_norm = relative_residual_norm(&self.mass, &candidate, &self.rhs);
        if residual_norm > self.checks.residual_tolerance {
            return Err(SolveError::new(
                step,
                SolveErrorKind::ResidualTooLarge {
                    residual_norm,
                    tolerance: self.checks.residual_tolerance,
                },
            ));
        }

        self.model
            .apply_boundary_conditions(DVectorViewMut::from(&mut candidate));
        Ok((candidate, residual_norm))
    }
}

/// Computes $\| A x - b \| / \max(\| b \|, 1)$.
pub fn relative_residual_norm<T: Real>(matrix: &DMatrix<T>, x: &DVector<T>, b: &DVector<T>) -> T {
    let residual = matrix * x - b;
    residual.norm() / T::max(b.norm(), T::one())
}

fn is_finite<T: Real>(u: &DVector<T>) -> bool {
    u.iter().all(|u_i| u_i.is_finite())
}
