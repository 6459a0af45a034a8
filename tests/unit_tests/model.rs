use fenris_diffusion::assembly::assemble_coefficient_stiffness;
use fenris_diffusion::grid::UniformGrid;
use fenris_diffusion::model::{ConstantDiffusion, DiffusionModel, DirichletValues, NonlinearDiffusion};
use nalgebra::{dvector, DMatrix, DVector, DVectorView, DVectorViewMut};
use proptest::prelude::*;

#[test]
fn nonlinear_diffusion_coefficient_values() {
    let model = NonlinearDiffusion::default();
    assert_eq!(model.diffusion_coefficient(0.0), 1.0);
    assert_eq!(model.diffusion_coefficient(2.0), 2.0);
    assert_eq!(model.diffusion_coefficient(-2.0), 0.0);
    assert_eq!(model.diffusion_coefficient(1.0), 1.5);
}

proptest! {
    #[test]
    fn nonlinear_diffusion_coefficient_is_increasing(a in -2.0f64..100.0, delta in 1e-6f64..10.0) {
        let model = NonlinearDiffusion::default();
        let b = a + delta;
        prop_assert!(model.diffusion_coefficient(a) < model.diffusion_coefficient(b));
        prop_assert!(model.diffusion_coefficient(b) > 0.0);
    }
}

#[test]
fn nonlinear_diffusion_boundary_conditions_overwrite_only_end_points() {
    let model = NonlinearDiffusion::default();
    let mut candidate = dvector![5.0, 6.0, 7.0, 8.0];
    model.apply_boundary_conditions(DVectorViewMut::from(&mut candidate));
    assert_eq!(candidate, dvector![1.0, 6.0, 7.0, 1.0]);

    let model = NonlinearDiffusion::new(DirichletValues::new(0.5, 2.0));
    let mut candidate = dvector![5.0, 6.0, 7.0, 8.0];
    model.apply_boundary_conditions(DVectorViewMut::from(&mut candidate));
    assert_eq!(candidate, dvector![0.5, 6.0, 7.0, 2.0]);
    assert_eq!(model.boundary_values(), &DirichletValues::new(0.5, 2.0));
}

#[test]
fn nonlinear_diffusion_stiffness_matches_coefficient_assembly() {
    let grid = UniformGrid::try_new(12, 3.0).unwrap();
    let u = DVector::from_fn(12, |i, _| 1.0 + 0.1 * i as f64);
    let model = NonlinearDiffusion::default();

    let stiffness = model
        .assemble_stiffness_matrix(&grid, DVectorView::from(&u))
        .unwrap();
    let expected = assemble_coefficient_stiffness(&grid, DVectorView::from(&u), |value| 1.0 + 0.5 * value);
    assert_eq!(stiffness, expected);

    // Dirichlet rows
    assert_eq!(stiffness[(0, 0)], 1.0);
    assert_eq!(stiffness[(11, 11)], 1.0);
    assert!(stiffness.row(0).iter().skip(1).all(|&v| v == 0.0));
    assert!(stiffness.row(11).iter().take(11).all(|&v| v == 0.0));
}

#[test]
fn nonlinear_diffusion_parallel_assembly_agrees_with_serial() {
    let grid = UniformGrid::try_new(25, 1.0).unwrap();
    let u = DVector::from_fn(25, |i, _| (i as f64).sin());
    let serial = NonlinearDiffusion::default();
    let parallel = NonlinearDiffusion::default().with_parallel_assembly(true);
    assert_eq!(
        serial
            .assemble_stiffness_matrix(&grid, DVectorView::from(&u))
            .unwrap(),
        parallel
            .assemble_stiffness_matrix(&grid, DVectorView::from(&u))
            .unwrap()
    );
}

#[test]
fn stiffness_assembly_reports_state_length_mismatch() {
    let grid = UniformGrid::try_new(5, 1.0).unwrap();
    let u = DVector::repeat(3, 1.0);
    let mut output = DMatrix::zeros(5, 5);

    let nonlinear = NonlinearDiffusion::default();
    assert!(nonlinear
        .assemble_stiffness_matrix_into(&mut output, &grid, DVectorView::from(&u))
        .is_err());

    let constant = ConstantDiffusion::new(1.0, DirichletValues::uniform(0.0));
    let err = constant
        .assemble_stiffness_matrix(&grid, DVectorView::from(&u))
        .unwrap_err();
    assert!(err.to_string().contains("3 entries"));
}

#[test]
fn constant_diffusion_stiffness_ignores_state() {
    let grid = UniformGrid::try_new(6, 1.0).unwrap();
    let model = ConstantDiffusion::new(0.25, DirichletValues::new(0.0, 1.0));
    let a = model
        .assemble_stiffness_matrix(&grid, DVectorView::from(&DVector::repeat(6, 1.0)))
        .unwrap();
    let b = model
        .assemble_stiffness_matrix(&grid, DVectorView::from(&DVector::from_fn(6, |i, _| i as f64)))
        .unwrap();
    assert_eq!(a, b);
    // h = 0.2
    assert_eq!(a[(2, 2)], 2.0 * 0.25 / 0.2);
    assert_eq!(a[(2, 3)], -0.25 / 0.2);
}

#[test]
fn models_can_be_used_by_reference() {
    fn assemble_with<M: DiffusionModel<f64>>(model: M, grid: &UniformGrid<f64>, u: &DVector<f64>) -> DMatrix<f64> {
        model
            .assemble_stiffness_matrix(grid, DVectorView::from(u))
            .unwrap()
    }

    let grid = UniformGrid::try_new(4, 1.0).unwrap();
    let u = DVector::repeat(4, 2.0);
    let model = NonlinearDiffusion::default();
    assert_eq!(assemble_with(&model, &grid, &u), assemble_with(model, &grid, &u));

    let dynamic: &dyn DiffusionModel<f64> = &ConstantDiffusion::new(1.0, DirichletValues::uniform(1.0));
    let mut candidate = DVector::repeat(4, 3.0);
    dynamic.apply_boundary_conditions(DVectorViewMut::from(&mut candidate));
    assert_eq!(candidate, dvector![1.0, 3.0, 3.0, 1.0]);
}
