//! FILENAME: app/src/equation.rs
// PURPOSE: Free-text equation solving for the typed input box and OCR output.

use equation_parser::parse;

use crate::api_types::EquationSolutionData;
use crate::{log_enter, log_exit};

/// Classifies and solves the text. Unrecognized text is a normal result.
pub fn solve_equation_text(text: &str) -> EquationSolutionData {
    log_enter!("EQUATION", "solve_equation_text", "len={}", text.len());

    let outcome = parse(text);
    let data = EquationSolutionData::from(&outcome);

    log_exit!(
        "EQUATION",
        "solve_equation_text",
        "category={} answer={}",
        data.category,
        data.answer
    );
    data
}
