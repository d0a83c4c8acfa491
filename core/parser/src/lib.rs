//! FILENAME: core/parser/src/lib.rs
//! PURPOSE: Library root for the equation text parser.
//! CONTEXT: Turns loosely formatted equation text, typed or recognized from
//! a photo, into a classified equation with a worked, step-by-step solution.
//!
//! PIPELINE: Raw Text --> normalize --> classify --> extract terms --> solve --> steps
//!
//! SUPPORTED FAMILIES:
//! - Systems of 2 or 3 linear equations in x, y, z (one equation per line)
//! - Single linear equations in x
//! - Quadratic equations in x, standard or "(..)(..)=0" factored form

pub mod classify;
pub mod equation;
pub mod format;
pub mod linear;
pub mod normalize;
pub mod quadratic;
pub mod terms;


pub use classify::parse;
pub use equation::{
    Coefficients, EquationKind, ParseOutcome, ParsedEquation, QuadraticForm, QuadraticRoots,
    Solution, FALLBACK_MESSAGE,
};
pub use normalize::{normalize, normalize_line};
pub use terms::ExtractError;
