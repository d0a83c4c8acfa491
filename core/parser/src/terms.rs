//! FILENAME: core/parser/src/terms.rs
//! PURPOSE: Coefficient extraction from normalized equation sides.
//! CONTEXT: A side is split into signed terms by rewriting '-' as "+-" and
//! splitting on '+'. Each term either names one of the tracked variables
//! (with an optional numeric coefficient, bare or '-' meaning ±1) or is a
//! plain constant.
//!
//! KNOWN LIMITATION: a term is matched against the variables in declared
//! order and the first one it contains wins, so "xy" counts as 1·x. Callers
//! list longer names first ("x^2" before "x") to make that work for them.
//! Anything else trailing the variable ("x^3", "x5", "x*2") is rejected.

use linear_solver::SolverError;
use thiserror::Error;

/// Why a classification attempt could not use the text.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExtractError {
    #[error("Expected exactly one '=' in '{0}'")]
    EqualsCount(String),

    #[error("Empty side in '{0}'")]
    EmptySide(String),

    #[error("Unrecognized term '{0}'")]
    InvalidTerm(String),

    #[error("'{0}' is not linear in x")]
    NotLinear(String),

    #[error("Factor '{0}' is not linear in x")]
    InvalidFactor(String),

    #[error("Leading coefficient is zero")]
    DegenerateQuadratic,

    #[error("Solver rejected the system: {0}")]
    Solver(#[from] SolverError),
}

/// Coefficients collected from one side of an equation.
#[derive(Debug, Clone, PartialEq)]
pub struct SideCoefficients {
    /// One entry per tracked variable, in declared order.
    pub variables: Vec<f64>,
    pub constant: f64,
}

/// An equation rearranged as Σ coefficient·variable = constant.
#[derive(Debug, Clone, PartialEq)]
pub struct EquationCoefficients {
    pub variables: Vec<f64>,
    pub constant: f64,
}

/// Extracts the coefficients of one side.
pub fn extract_side(side: &str, variables: &[&str]) -> Result<SideCoefficients, ExtractError> {
    let mut result = SideCoefficients {
        variables: vec![0.0; variables.len()],
        constant: 0.0,
    };

    let expanded = side.replace('-', "+-");
    for term in expanded.split('+').filter(|t| !t.is_empty()) {
        match variables.iter().position(|var| term.contains(var)) {
            Some(index) => {
                let var = variables[index];
                let at = term.find(var).unwrap_or(0);
                if !is_variable_product(&term[at + var.len()..], variables) {
                    return Err(ExtractError::InvalidTerm(term.to_string()));
                }
                result.variables[index] += parse_coefficient(&term[..at], term)?;
            }
            None => result.constant += parse_number(term, term)?,
        }
    }
    Ok(result)
}

/// Extracts both sides of "left=right" and moves variables left, constants right.
pub fn extract_equation(
    equation: &str,
    variables: &[&str],
) -> Result<EquationCoefficients, ExtractError> {
    let (left, right) = split_sides(equation)?;
    let left = extract_side(left, variables)?;
    let right = extract_side(right, variables)?;

    Ok(EquationCoefficients {
        variables: left
            .variables
            .iter()
            .zip(&right.variables)
            .map(|(l, r)| l - r)
            .collect(),
        constant: right.constant - left.constant,
    })
}

/// Splits on the single '=' of an equation; both sides must be non-empty.
pub fn split_sides(equation: &str) -> Result<(&str, &str), ExtractError> {
    if equation.matches('=').count() != 1 {
        return Err(ExtractError::EqualsCount(equation.to_string()));
    }
    match equation.split_once('=') {
        Some((left, right)) if !left.is_empty() && !right.is_empty() => Ok((left, right)),
        _ => Err(ExtractError::EmptySide(equation.to_string())),
    }
}

/// Text after the matched variable may only name further single-letter variables.
fn is_variable_product(rest: &str, variables: &[&str]) -> bool {
    rest.chars()
        .all(|c| variables.iter().any(|var| var.len() == 1 && var.starts_with(c)))
}

/// Coefficient text in front of a variable: "" or "+" is 1, "-" is -1.
fn parse_coefficient(text: &str, term: &str) -> Result<f64, ExtractError> {
    match text {
        "" | "+" => Ok(1.0),
        "-" => Ok(-1.0),
        _ => parse_number(text, term),
    }
}

/// Plain decimal numbers only; words such as "inf" or "nan" are not numbers here.
fn parse_number(text: &str, term: &str) -> Result<f64, ExtractError> {
    let plain = text
        .chars()
        .all(|c| c.is_ascii_digit() || c == '.' || c == '-' || c == '+');
    if !plain {
        return Err(ExtractError::InvalidTerm(term.to_string()));
    }
    text.parse::<f64>()
        .map_err(|_| ExtractError::InvalidTerm(term.to_string()))
}
