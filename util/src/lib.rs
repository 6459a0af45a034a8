//! Test helpers shared by the tests and benchmarks of the workspace.
use nalgebra::{DMatrix, DVector};

/// Poor man's approx assertion for vectors, printing both vectors on failure.
#[macro_export]
macro_rules! assert_approx_vector_eq {
    ($x:expr, $y:expr, abstol = $tol:expr) => {{
        let diff = $crate::max_abs_diff(&$x, &$y);
        let approx_eq = diff <= $tol;

        if !approx_eq {
            println!("abstol: {:e}", $tol);
            println!("left: {}", $x);
            println!("right: {}", $y);
            println!("max abs diff: {:e}", diff);
        }
        assert!(approx_eq);
    }};
}

#[macro_export]
macro_rules! assert_panics {
    ($e:expr) => {{
        use std::panic::catch_unwind;
        use std::stringify;
        let expr_string = stringify!($e);
        let result = catch_unwind(|| $e);
        if result.is_ok() {
            panic!("assert_panics!({}) failed.", expr_string);
        }
    }};
}

/// The largest absolute entry-wise difference of two vectors of the same length.
pub fn max_abs_diff(x: &DVector<f64>, y: &DVector<f64>) -> f64 {
    assert_eq!(x.len(), y.len(), "Vectors must have the same length");
    x.iter()
        .zip(y.iter())
        .map(|(a, b)| (a - b).abs())
        .fold(0.0, f64::max)
}

/// A vector of ones where a single entry is replaced by the given value.
pub fn ones_with_bump(len: usize, index: usize, value: f64) -> DVector<f64> {
    let mut u = DVector::repeat(len, 1.0);
    u[index] = value;
    u
}

/// Number of strict local maxima among the interior entries.
pub fn count_interior_local_maxima(u: &DVector<f64>) -> usize {
    u.as_slice()
        .windows(3)
        .filter(|w| w[1] > w[0] && w[1] > w[2])
        .count()
}

/// The largest absolute difference between a matrix and its transpose, ignoring the given rows
/// and the corresponding columns.
pub fn max_asymmetry_excluding(matrix: &DMatrix<f64>, excluded: &[usize]) -> f64 {
    assert!(matrix.is_square(), "Matrix must be square");
    let n = matrix.nrows();
    let mut max_diff = 0.0;
    for i in (0..n).filter(|i| !excluded.contains(i)) {
        for j in (0..n).filter(|j| !excluded.contains(j)) {
            max_diff = f64::max(max_diff, (matrix[(i, j)] - matrix[(j, i)]).abs());
        }
    }
    max_diff
}
