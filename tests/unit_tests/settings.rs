use fenris_diffusion::error::SetupError;
use fenris_diffusion::settings::{SolverSettings, StepChecks};

fn reference_settings() -> SolverSettings<f64> {
    SolverSettings {
        node_count: 20,
        domain_length: 2.0,
        time_step: 0.001,
        num_steps: 100,
    }
}

#[test]
fn valid_settings_produce_grid() {
    let grid = reference_settings().validate().unwrap();
    assert_eq!(grid.num_nodes(), 20);
    assert_eq!(grid.spacing(), 2.0 / 19.0);
}

#[test]
fn zero_steps_are_valid() {
    let settings = SolverSettings {
        num_steps: 0,
        ..reference_settings()
    };
    assert!(settings.validate().is_ok());
}

#[test]
fn invalid_settings_are_rejected() {
    let too_few_nodes = SolverSettings {
        node_count: 1,
        ..reference_settings()
    };
    assert_eq!(
        too_few_nodes.validate().unwrap_err(),
        SetupError::TooFewNodes { node_count: 1 }
    );

    let bad_length = SolverSettings {
        domain_length: -2.0,
        ..reference_settings()
    };
    assert_eq!(bad_length.validate().unwrap_err(), SetupError::InvalidDomainLength);

    for time_step in [0.0, -0.001, f64::NAN, f64::INFINITY] {
        let bad_time_step = SolverSettings {
            time_step,
            ..reference_settings()
        };
        assert_eq!(bad_time_step.validate().unwrap_err(), SetupError::InvalidTimeStep);
    }
}

#[test]
fn setup_errors_have_readable_messages() {
    assert_eq!(
        SetupError::TooFewNodes { node_count: 1 }.to_string(),
        "Grid must have at least 2 nodes, but 1 were requested."
    );
    assert_eq!(
        SetupError::InitialStateMismatch { expected: 5, actual: 3 }.to_string(),
        "Initial state has 3 values, but the grid has 5 nodes."
    );
    assert_eq!(
        SetupError::UnrepresentableNodeCount { node_count: 70000 }.to_string(),
        "Node count 70000 cannot be represented by the scalar type."
    );
    assert_eq!(
        SetupError::AlreadyStarted { steps_taken: 2 }.to_string(),
        "Cannot replace the initial state after 2 steps have been taken."
    );
}

#[test]
fn settings_parse_from_json() {
    let json = r#"{ "node_count": 20, "domain_length": 2.0, "time_step": 0.001, "num_steps": 100 }"#;
    let settings: SolverSettings<f64> = serde_json::from_str(json).unwrap();
    assert_eq!(settings, reference_settings());
}

#[test]
fn settings_require_every_field() {
    let json = r#"{ "node_count": 20, "domain_length": 2.0, "time_step": 0.001 }"#;
    let result: Result<SolverSettings<f64>, _> = serde_json::from_str(json);
    let err = result.unwrap_err();
    assert!(err.to_string().contains("num_steps"));
}

#[test]
fn step_checks_fall_back_to_defaults() {
    let checks: StepChecks<f64> = serde_json::from_str("{}").unwrap();
    assert_eq!(checks, StepChecks::default());
    assert_eq!(checks.residual_tolerance, 1e-8);
    assert!(checks.check_finite);

    let checks: StepChecks<f64> = serde_json::from_str(r#"{ "check_finite": false }"#).unwrap();
    assert!(!checks.check_finite);
    assert_eq!(checks.residual_tolerance, 1e-8);
}
