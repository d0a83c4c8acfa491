//! FILENAME: core/solver/src/lib.rs
//! PURPOSE: Library root for the dense linear system solver.
//! CONTEXT: Solves A·x = b for small square systems (the calculator's 2 and 3
//! variable forms, and systems extracted from equation text). A singular
//! system is an ordinary result (`SolverError::Singular`), not a failure of
//! the caller.

pub mod error;
pub mod gaussian;

pub use error::SolverError;
pub use gaussian::{
    determinant, determinant_with, solve, solve_with, LinearSystem, Tolerances,
};
