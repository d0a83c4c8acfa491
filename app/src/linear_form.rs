//! FILENAME: app/src/linear_form.rs
// PURPOSE: N-variable linear form (2 or 3 unknowns) backed by Gaussian elimination.
// CONTEXT: Cells arrive as raw text. Every cell is validated before solving so
//          the user is told exactly which one is wrong.

use calc_engine::format_display;
use linear_solver::{determinant_with, LinearSystem, SolverError};

use crate::api_types::{LinearFormRequest, LinearFormResult, VariableValue};
use crate::{log_enter, log_exit, log_info, log_warn, AppState};

/// Unknown names by column.
pub const FORM_VARIABLES: [&str; 3] = ["x", "y", "z"];

/// Message shown when elimination finds no usable pivot.
pub const NO_UNIQUE_SOLUTION: &str = "The system has no unique solution";

pub fn solve_linear_form(
    state: &AppState,
    request: LinearFormRequest,
) -> Result<LinearFormResult, String> {
    log_enter!("LINEAR", "solve_linear_form", "size={}", request.size);

    let (matrix, constants) = read_cells(&request).map_err(|e| {
        log_warn!("LINEAR", "solve_linear_form rejected: {}", e);
        e
    })?;

    let tolerances = state.config.solver.tolerances();
    let det = determinant_with(&matrix, &tolerances).map_err(|e| e.to_string())?;
    let system = LinearSystem::new(matrix, constants).map_err(|e| e.to_string())?;
    let values = match system.solve_with(&tolerances) {
        Ok(values) => values,
        Err(SolverError::Singular { column }) => {
            log_info!("LINEAR", "singular system (column {})", column);
            log_exit!("LINEAR", "solve_linear_form", "no unique solution");
            return Err(NO_UNIQUE_SOLUTION.to_string());
        }
        Err(e) => return Err(e.to_string()),
    };

    let variables: Vec<VariableValue> = FORM_VARIABLES
        .iter()
        .zip(&values)
        .map(|(name, value)| VariableValue {
            name: name.to_string(),
            value: *value,
            display: format_display(*value),
        })
        .collect();

    log_exit!("LINEAR", "solve_linear_form", "solved {} unknowns", variables.len());
    Ok(LinearFormResult {
        variables,
        determinant: det,
    })
}

/// Checks the form shape and parses every cell into (matrix, constants).
fn read_cells(request: &LinearFormRequest) -> Result<(Vec<Vec<f64>>, Vec<f64>), String> {
    let n = request.size;
    if !(2..=3).contains(&n) {
        return Err(format!("Number of variables must be 2 or 3, got {}", n));
    }
    if request.rows.len() != n {
        return Err(format!("Expected {} rows, got {}", n, request.rows.len()));
    }

    let mut matrix = Vec::with_capacity(n);
    let mut constants = Vec::with_capacity(n);
    for (r, row) in request.rows.iter().enumerate() {
        if row.len() != n + 1 {
            return Err(format!(
                "Row {} must have {} cells, got {}",
                r + 1,
                n + 1,
                row.len()
            ));
        }
        let mut values = Vec::with_capacity(n + 1);
        for (c, cell) in row.iter().enumerate() {
            values.push(parse_cell(cell, r, c)?);
        }
        constants.push(values.pop().unwrap_or(0.0));
        matrix.push(values);
    }
    Ok((matrix, constants))
}

/// Trimmed cell text as a finite number; row and column are reported 1-based.
fn parse_cell(text: &str, row: usize, col: usize) -> Result<f64, String> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| {
            format!(
                "Invalid number in row {}, column {}: '{}'",
                row + 1,
                col + 1,
                text
            )
        })
}
