//! FILENAME: core/parser/src/linear.rs
//! PURPOSE: Linear systems (2 or 3 unknowns) and single linear equations in x.
//! CONTEXT: Systems are handed to the Gaussian elimination solver; a singular
//! system becomes a "No unique solution" answer rather than an error.

use linear_solver::{determinant, solve, SolverError};

use crate::equation::{Coefficients, EquationKind, ParsedEquation, Solution};
use crate::format::{linear_combination, num};
use crate::terms::{extract_equation, ExtractError};

/// Unknowns of a system, in declared order.
pub const SYSTEM_VARIABLES: [&str; 3] = ["x", "y", "z"];

/// Below this magnitude a single-linear coefficient counts as zero.
const ZERO_COEFFICIENT: f64 = 1e-10;

/// Parses one equation per line over the first `lines.len()` system variables.
pub fn parse_linear_system(lines: &[&str]) -> Result<ParsedEquation, ExtractError> {
    let n = lines.len();
    let variables = &SYSTEM_VARIABLES[..n];

    let mut matrix = Vec::with_capacity(n);
    let mut constants = Vec::with_capacity(n);
    for line in lines {
        let eq = extract_equation(line, variables)?;
        matrix.push(eq.variables);
        constants.push(eq.constant);
    }

    let mut steps = vec![format!(
        "Recognized a system of {} linear equations in {}",
        n,
        variables.join(", ")
    )];
    for (i, (row, constant)) in matrix.iter().zip(&constants).enumerate() {
        steps.push(format!(
            "Equation {}: {} = {}",
            i + 1,
            linear_combination(row, variables),
            num(*constant)
        ));
    }
    steps.push(format!("Augmented matrix: {}", augmented_matrix(&matrix, &constants)));

    let det = determinant(&matrix).unwrap_or(0.0);
    steps.push(format!("Determinant of the coefficient matrix: {}", num(det)));

    let (solution, answer) = match solve(&matrix, &constants) {
        Ok(values) => {
            steps.push("Apply Gaussian elimination with partial pivoting".to_string());
            let assignments: Vec<String> = variables
                .iter()
                .zip(&values)
                .map(|(var, value)| format!("{} = {}", var, num(*value)))
                .collect();
            steps.extend(assignments.iter().cloned());
            (Solution::Unique(values), assignments.join(", "))
        }
        Err(SolverError::Singular { column }) => {
            log::debug!("linear system singular at column {}", column);
            steps.push(
                "The coefficient matrix is singular, so the system has no unique solution"
                    .to_string(),
            );
            (Solution::NoUniqueSolution, "No unique solution".to_string())
        }
        Err(e) => return Err(e.into()),
    };

    Ok(ParsedEquation {
        kind: EquationKind::LinearSystem(n),
        coefficients: Coefficients::Linear { matrix, constants },
        solution,
        steps,
        answer,
    })
}

/// Parses a single linear equation in x.
pub fn parse_single_linear(text: &str) -> Result<ParsedEquation, ExtractError> {
    // x^2 terms are tracked only so that ones cancelling out are allowed
    let eq = extract_equation(text, &["x^2", "x"])?;
    if eq.variables[0].abs() >= ZERO_COEFFICIENT {
        return Err(ExtractError::NotLinear(text.to_string()));
    }
    let a = eq.variables[1];
    let b = eq.constant;

    let mut steps = vec![
        "Recognized a linear equation in x".to_string(),
        format!("Equation: {}", text.replace('=', " = ")),
        format!(
            "Collect x terms on the left and constants on the right: {} = {}",
            linear_combination(&[a], &["x"]),
            num(b)
        ),
    ];

    let (solution, answer) = if a.abs() < ZERO_COEFFICIENT {
        steps.push(format!("The x terms cancel out, leaving 0 = {}", num(b)));
        if b.abs() < ZERO_COEFFICIENT {
            (Solution::InfinitelyMany, "Infinitely many solutions".to_string())
        } else {
            (Solution::NoSolution, "No solution".to_string())
        }
    } else {
        let x = b / a;
        if a != 1.0 {
            steps.push(format!("Divide both sides by {}", num(a)));
        }
        let answer = format!("x = {}", num(x));
        steps.push(answer.clone());
        (Solution::Unique(vec![x]), answer)
    };

    Ok(ParsedEquation {
        kind: EquationKind::SingleLinear,
        coefficients: Coefficients::Linear {
            matrix: vec![vec![a]],
            constants: vec![b],
        },
        solution,
        steps,
        answer,
    })
}

/// "[1, 1 | 3], [1, -1 | 1]"
fn augmented_matrix(matrix: &[Vec<f64>], constants: &[f64]) -> String {
    matrix
        .iter()
        .zip(constants)
        .map(|(row, constant)| {
            let cells: Vec<String> = row.iter().map(|v| num(*v)).collect();
            format!("[{} | {}]", cells.join(", "), num(*constant))
        })
        .collect::<Vec<_>>()
        .join(", ")
}
