//! FILENAME: core/solver/src/gaussian.rs
//! PURPOSE: Gaussian elimination with partial pivoting for small dense systems.
//! CONTEXT: Used by the interactive N-variable form and by the equation text
//! parser. Inputs are copied into a working augmented system; the caller's
//! matrix and constants are never touched.
//!
//! ALGORITHM (Gauss-Jordan form):
//! 1. For each pivot column, pick the row at or below the pivot index with the
//!    largest magnitude in that column.
//! 2. If that magnitude is below the pivot threshold, stop: singular.
//! 3. Swap it into place, scale the pivot row so the pivot is 1, and clear the
//!    column in every other row.
//! 4. After the last pivot the constant vector holds the solution.

use serde::{Deserialize, Serialize};

use crate::error::SolverError;

/// Numeric thresholds used during elimination.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tolerances {
    /// A best pivot below this magnitude means no unique solution.
    pub pivot: f64,
    /// Rows whose elimination factor is below this are skipped.
    pub elimination: f64,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            pivot: 1e-10,
            elimination: 1e-12,
        }
    }
}

impl Tolerances {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_params(pivot: f64, elimination: f64) -> Self {
        Self { pivot, elimination }
    }
}

/// A square coefficient matrix paired with its constant vector.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearSystem {
    matrix: Vec<Vec<f64>>,
    constants: Vec<f64>,
}

impl LinearSystem {
    /// Creates a system, checking that the matrix is n×n and the constants have length n.
    pub fn new(matrix: Vec<Vec<f64>>, constants: Vec<f64>) -> Result<Self, SolverError> {
        validate_square(&matrix)?;
        if constants.len() != matrix.len() {
            return Err(SolverError::InvalidDimensions(format!(
                "Matrix rows ({}) must match constant vector length ({})",
                matrix.len(),
                constants.len()
            )));
        }
        Ok(Self { matrix, constants })
    }

    /// Number of unknowns.
    pub fn size(&self) -> usize {
        self.matrix.len()
    }

    pub fn matrix(&self) -> &[Vec<f64>] {
        &self.matrix
    }

    pub fn constants(&self) -> &[f64] {
        &self.constants
    }

    pub fn solve(&self) -> Result<Vec<f64>, SolverError> {
        self.solve_with(&Tolerances::default())
    }

    pub fn solve_with(&self, tolerances: &Tolerances) -> Result<Vec<f64>, SolverError> {
        let mut a = self.matrix.clone();
        let mut b = self.constants.clone();
        eliminate(&mut a, &mut b, tolerances)?;
        Ok(b)
    }

    /// A·x − b for a candidate solution.
    pub fn residuals(&self, solution: &[f64]) -> Vec<f64> {
        self.matrix
            .iter()
            .zip(&self.constants)
            .map(|(row, constant)| {
                row.iter().zip(solution).map(|(a, x)| a * x).sum::<f64>() - constant
            })
            .collect()
    }
}

/// Solves `matrix · x = constants` with default tolerances.
pub fn solve(matrix: &[Vec<f64>], constants: &[f64]) -> Result<Vec<f64>, SolverError> {
    solve_with(matrix, constants, &Tolerances::default())
}

pub fn solve_with(
    matrix: &[Vec<f64>],
    constants: &[f64],
    tolerances: &Tolerances,
) -> Result<Vec<f64>, SolverError> {
    LinearSystem::new(matrix.to_vec(), constants.to_vec())?.solve_with(tolerances)
}

/// Determinant via the same pivoting. A singular matrix reports 0.
pub fn determinant(matrix: &[Vec<f64>]) -> Result<f64, SolverError> {
    determinant_with(matrix, &Tolerances::default())
}

/// Determinant under the given tolerances, so it agrees with `solve_with`
/// on which matrices count as singular.
pub fn determinant_with(matrix: &[Vec<f64>], tolerances: &Tolerances) -> Result<f64, SolverError> {
    validate_square(matrix)?;
    let mut a = matrix.to_vec();
    let mut b = vec![0.0; matrix.len()];
    match eliminate(&mut a, &mut b, tolerances) {
        Ok(det) => Ok(det),
        Err(SolverError::Singular { .. }) => Ok(0.0),
        Err(e) => Err(e),
    }
}

fn validate_square(matrix: &[Vec<f64>]) -> Result<(), SolverError> {
    let n = matrix.len();
    if n == 0 {
        return Err(SolverError::InvalidDimensions(
            "Matrix must have at least one row".to_string(),
        ));
    }
    if let Some((index, row)) = matrix.iter().enumerate().find(|(_, row)| row.len() != n) {
        return Err(SolverError::InvalidDimensions(format!(
            "Matrix must be square: row {} has {} entries, expected {}",
            index,
            row.len(),
            n
        )));
    }
    Ok(())
}

/// Reduces `a` to the identity in place, applying the same row operations to `b`.
/// Returns the determinant of the original matrix.
fn eliminate(
    a: &mut [Vec<f64>],
    b: &mut [f64],
    tolerances: &Tolerances,
) -> Result<f64, SolverError> {
    let n = a.len();
    let mut det = 1.0;

    for col in 0..n {
        // Partial pivoting: largest magnitude at or below the diagonal
        let mut pivot_row = col;
        let mut max_abs = 0.0;
        for (row, values) in a.iter().enumerate().skip(col) {
            let magnitude = values[col].abs();
            if magnitude > max_abs {
                max_abs = magnitude;
                pivot_row = row;
            }
        }

        if max_abs < tolerances.pivot {
            log::debug!("singular system: best pivot {:e} in column {}", max_abs, col);
            return Err(SolverError::Singular { column: col });
        }

        if pivot_row != col {
            a.swap(pivot_row, col);
            b.swap(pivot_row, col);
            det = -det;
        }

        let pivot = a[col][col];
        det *= pivot;
        for value in a[col].iter_mut() {
            *value /= pivot;
        }
        b[col] /= pivot;

        let pivot_values = a[col].clone();
        let pivot_constant = b[col];
        for row in 0..n {
            if row == col {
                continue;
            }
            let factor = a[row][col];
            if factor.abs() < tolerances.elimination {
                continue;
            }
            for (value, pivot_value) in a[row].iter_mut().zip(&pivot_values) {
                *value -= factor * pivot_value;
            }
            b[row] -= factor * pivot_constant;
        }
    }

    log::trace!("eliminated {}x{} system, det={}", n, n, det);
    Ok(det)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: &[f64], expected: &[f64]) {
        assert_eq!(actual.len(), expected.len());
        for (a, e) in actual.iter().zip(expected) {
            assert!((a - e).abs() < 1e-9, "expected {:?}, got {:?}", expected, actual);
        }
    }

    #[test]
    fn test_solve_2x2() {
        let x = solve(&[vec![1.0, 1.0], vec![1.0, -1.0]], &[3.0, 1.0]).unwrap();
        assert_close(&x, &[2.0, 1.0]);
    }

    #[test]
    fn test_solve_2x2_fractional() {
        let x = solve(&[vec![2.0, 3.0], vec![1.0, -1.0]], &[8.0, 1.0]).unwrap();
        assert_close(&x, &[2.2, 1.2]);
    }

    #[test]
    fn test_solve_3x3() {
        let matrix = vec![
            vec![2.0, 1.0, -1.0],
            vec![-3.0, -1.0, 2.0],
            vec![-2.0, 1.0, 2.0],
        ];
        let x = solve(&matrix, &[8.0, -11.0, -3.0]).unwrap();
        assert_close(&x, &[2.0, 3.0, -1.0]);
    }

    #[test]
    fn test_needs_pivoting() {
        // Zero in the first pivot position forces a row swap
        let x = solve(&[vec![0.0, 1.0], vec![1.0, 0.0]], &[5.0, 7.0]).unwrap();
        assert_close(&x, &[7.0, 5.0]);
    }

    #[test]
    fn test_one_by_one() {
        let x = solve(&[vec![4.0]], &[10.0]).unwrap();
        assert_close(&x, &[2.5]);
    }

    #[test]
    fn test_zero_row_is_singular() {
        let result = solve(&[vec![1.0, 2.0], vec![0.0, 0.0]], &[3.0, 0.0]);
        assert!(matches!(result, Err(SolverError::Singular { .. })));
    }

    #[test]
    fn test_dependent_rows_are_singular() {
        let matrix = vec![
            vec![1.0, 2.0, 3.0],
            vec![2.0, 4.0, 6.0],
            vec![1.0, 0.0, 1.0],
        ];
        let result = solve(&matrix, &[1.0, 2.0, 3.0]);
        assert!(matches!(result, Err(SolverError::Singular { .. })));
    }

    #[test]
    fn test_tiny_pivot_is_singular() {
        let result = solve(&[vec![1e-11, 0.0], vec![0.0, 1.0]], &[1.0, 1.0]);
        assert_eq!(result, Err(SolverError::Singular { column: 0 }));
    }

    #[test]
    fn test_row_permutation_gives_same_solution() {
        let matrix = vec![
            vec![3.0, 2.0, -4.0],
            vec![2.0, 3.0, 3.0],
            vec![5.0, -3.0, 1.0],
        ];
        let constants = vec![3.0, 15.0, 14.0];
        let expected = solve(&matrix, &constants).unwrap();

        let orders = [[0, 2, 1], [1, 0, 2], [1, 2, 0], [2, 0, 1], [2, 1, 0]];
        for order in orders {
            let permuted: Vec<Vec<f64>> = order.iter().map(|&i| matrix[i].clone()).collect();
            let permuted_b: Vec<f64> = order.iter().map(|&i| constants[i]).collect();
            assert_close(&solve(&permuted, &permuted_b).unwrap(), &expected);
        }
        assert_close(&expected, &[3.0, 1.0, 2.0]);
    }

    #[test]
    fn test_solution_satisfies_system() {
        let system = LinearSystem::new(
            vec![
                vec![4.0, -2.0, 1.0],
                vec![-2.0, 4.0, -2.0],
                vec![1.0, -2.0, 4.0],
            ],
            vec![11.0, -16.0, 17.0],
        )
        .unwrap();
        let x = system.solve().unwrap();
        for r in system.residuals(&x) {
            assert!(r.abs() < 1e-9);
        }
    }

    #[test]
    fn test_inputs_are_not_mutated() {
        let matrix = vec![vec![0.0, 2.0], vec![3.0, 1.0]];
        let constants = vec![4.0, 5.0];
        solve(&matrix, &constants).unwrap();
        assert_eq!(matrix, vec![vec![0.0, 2.0], vec![3.0, 1.0]]);
        assert_eq!(constants, vec![4.0, 5.0]);
    }

    #[test]
    fn test_dimension_checks() {
        assert!(matches!(
            LinearSystem::new(vec![vec![1.0, 2.0]], vec![1.0]),
            Err(SolverError::InvalidDimensions(_))
        ));
        assert!(matches!(
            LinearSystem::new(vec![vec![1.0]], vec![1.0, 2.0]),
            Err(SolverError::InvalidDimensions(_))
        ));
        assert!(matches!(
            LinearSystem::new(Vec::new(), Vec::new()),
            Err(SolverError::InvalidDimensions(_))
        ));
    }

    #[test]
    fn test_determinant() {
        assert!((determinant(&[vec![1.0, 1.0], vec![1.0, -1.0]]).unwrap() + 2.0).abs() < 1e-12);
        assert!((determinant(&[vec![0.0, 1.0], vec![1.0, 0.0]]).unwrap() + 1.0).abs() < 1e-12);
        assert_eq!(determinant(&[vec![1.0, 2.0], vec![2.0, 4.0]]).unwrap(), 0.0);
    }

    #[test]
    fn test_determinant_with_tolerances() {
        let matrix = [vec![1e-11, 0.0], vec![0.0, 2.0]];
        assert_eq!(determinant(&matrix).unwrap(), 0.0);

        let loose = Tolerances::with_params(1e-15, 1e-18);
        assert!((determinant_with(&matrix, &loose).unwrap() - 2e-11).abs() < 1e-20);
    }

    #[test]
    fn test_custom_tolerances() {
        let tolerances = Tolerances::with_params(1e-15, 1e-18);
        let x = solve_with(&[vec![1e-11, 0.0], vec![0.0, 1.0]], &[1e-11, 1.0], &tolerances)
            .unwrap();
        assert_close(&x, &[1.0, 1.0]);
    }
}
