//! FILENAME: tests/test_equation_text.rs
//! Integration tests for free-text equation solving.

use app_lib::solve_equation_text;
use equation_parser::FALLBACK_MESSAGE;

#[test]
fn test_linear_system_text() {
    let data = solve_equation_text("x + y = 3\nx - y = 1");
    assert!(data.recognized);
    assert_eq!(data.normalized, "x+y=3\nx-y=1");
    assert_eq!(data.category, "Linear system (2 variables)");
    assert_eq!(data.answer, "x = 2, y = 1");
    assert_eq!(
        data.steps.first().map(String::as_str),
        Some("Recognized a system of 2 linear equations in x, y")
    );
}

#[test]
fn test_quadratic_text() {
    let data = solve_equation_text("x² − 5x + 6 = 0");
    assert_eq!(data.category, "Quadratic equation");
    assert_eq!(data.answer, "x1 = 3, x2 = 2");
}

#[test]
fn test_factored_text() {
    let data = solve_equation_text("(x + 1)(x - 4) = 0");
    assert_eq!(data.category, "Quadratic equation (factored form)");
    assert_eq!(data.answer, "x1 = -1, x2 = 4");
}

#[test]
fn test_single_linear_text() {
    let data = solve_equation_text("3x=9");
    assert_eq!(data.category, "Linear equation");
    assert_eq!(data.answer, "x = 3");
}

#[test]
fn test_unrecognized_text() {
    let data = solve_equation_text("banana");
    assert!(!data.recognized);
    assert_eq!(data.category, "Unrecognized");
    assert!(data.steps.is_empty());
    assert_eq!(data.answer, FALLBACK_MESSAGE);
}

#[test]
fn test_solution_serializes_camel_case() {
    let value = serde_json::to_value(solve_equation_text("2x+1=5")).unwrap();
    assert_eq!(value["recognized"], true);
    assert_eq!(value["answer"], "x = 2");
    assert!(value["steps"].is_array());
}
