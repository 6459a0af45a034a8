//! Finite element time integration of the one-dimensional nonlinear diffusion equation
//!
//! $$
//! \frac{\partial u}{\partial t} = \frac{\partial}{\partial x} \left( D(u) \frac{\partial u}{\partial x} \right),
//! \qquad x \in [0, L],
//! $$
//!
//! discretized with piecewise linear elements on a uniform grid and stepped forward in time with
//! the diffusion coefficient lagged at the previous time step.
//!
//! The building blocks are
//!
//! - [`grid::UniformGrid`], the node layout,
//! - the matrix assembly routines in [`assembly`],
//! - the [`model::DiffusionModel`] trait, which supplies the stiffness matrix and boundary conditions,
//! - [`solver::DiffusionSolver`], which drives the time loop.
//!
//! ```rust
//! use fenris_diffusion::model::NonlinearDiffusion;
//! use fenris_diffusion::settings::SolverSettings;
//! use fenris_diffusion::solver::DiffusionSolver;
//!
//! # fn main() -> eyre::Result<()> {
//! let settings = SolverSettings {
//!     node_count: 20,
//!     domain_length: 2.0,
//!     time_step: 0.001,
//!     num_steps: 100,
//! };
//! let mut solver = DiffusionSolver::try_new(&settings, NonlinearDiffusion::default())?;
//! solver.solve()?;
//! for (x, u) in solver.nodal_values() {
//!     println!("u({x}) = {u}");
//! }
//! # Ok(())
//! # }
//! ```
use nalgebra::RealField;

pub mod assembly;
pub mod error;
pub mod grid;
pub mod model;
pub mod settings;
pub mod solver;
pub mod util;

#[cfg(feature = "proptest")]
pub mod proptest;

pub extern crate nalgebra;

/// A real scalar type.
///
/// Used as a trait alias for the bounds needed by the generic routines in this crate.
pub trait Real: RealField + Copy {}

impl<T: RealField + Copy> Real for T {}
