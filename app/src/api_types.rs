//! FILENAME: app/src/api_types.rs
// PURPOSE: Shared type definitions for the command layer.
// CONTEXT: All structs use camelCase serialization for JavaScript interoperability.

use calc_engine::Snapshot;
use equation_parser::ParseOutcome;
use serde::{Deserialize, Serialize};

/// Calculator display returned after every key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculatorDisplay {
    pub display: String,
    pub history: String,
    /// "C" while typing, "AC" otherwise.
    pub clear_label: String,
    /// Shows the "M" indicator.
    pub memory_active: bool,
    /// "Rad" or "Deg"
    pub angle_mode: String,
    pub inverse_mode: bool,
    pub is_entering_digit: bool,
}

impl From<Snapshot> for CalculatorDisplay {
    fn from(snapshot: Snapshot) -> Self {
        CalculatorDisplay {
            display: snapshot.display,
            history: snapshot.history,
            clear_label: snapshot.clear_label,
            memory_active: snapshot.memory_active,
            angle_mode: snapshot.angle_mode.label().to_string(),
            inverse_mode: snapshot.inverse_mode,
            is_entering_digit: snapshot.is_entering_digit,
        }
    }
}

/// Raw cell text from the N-variable form.
/// Each row holds N coefficients followed by the constant.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinearFormRequest {
    pub size: usize,
    pub rows: Vec<Vec<String>>,
}

/// One solved unknown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableValue {
    pub name: String,
    pub value: f64,
    /// Formatted like the calculator display.
    pub display: String,
}

/// Result of solving the N-variable form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinearFormResult {
    pub variables: Vec<VariableValue>,
    pub determinant: f64,
}

/// Result of solving free equation text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EquationSolutionData {
    /// The text after normalization, echoed back for the user to check.
    pub normalized: String,
    pub category: String,
    pub steps: Vec<String>,
    pub answer: String,
    pub recognized: bool,
}

impl From<&ParseOutcome> for EquationSolutionData {
    fn from(outcome: &ParseOutcome) -> Self {
        EquationSolutionData {
            normalized: outcome.normalized().to_string(),
            category: outcome.category_label(),
            steps: outcome.steps().to_vec(),
            answer: outcome.answer().to_string(),
            recognized: outcome.is_recognized(),
        }
    }
}
