//! FILENAME: core/solver/src/error.rs

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    #[error("Invalid matrix dimensions: {0}")]
    InvalidDimensions(String),

    /// No pivot above the threshold was found in `column`: the system has no unique solution.
    #[error("Matrix is singular (no usable pivot in column {column})")]
    Singular { column: usize },
}
