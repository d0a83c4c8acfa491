//! FILENAME: core/parser/src/format.rs
//! PURPOSE: Renders coefficients back into readable equation text for solution steps.

use calc_engine::format_display;

/// Formats a number the way the calculator display does.
pub fn num(value: f64) -> String {
    format_display(value)
}

/// Renders Σ coefficient·variable, e.g. "2x - y + 3z". Zero terms are omitted;
/// an all-zero sum renders as "0".
pub fn linear_combination(coefficients: &[f64], variables: &[&str]) -> String {
    let terms: Vec<(f64, &str)> = coefficients
        .iter()
        .zip(variables)
        .filter(|(c, _)| **c != 0.0)
        .map(|(c, v)| (*c, *v))
        .collect();
    join_terms(&terms)
}

/// Renders a·x^2 + b·x + c.
pub fn polynomial(a: f64, b: f64, c: f64) -> String {
    let terms: Vec<(f64, &str)> = [(a, "x^2"), (b, "x"), (c, "")]
        .into_iter()
        .filter(|(coef, _)| *coef != 0.0)
        .collect();
    join_terms(&terms)
}

/// Renders p·x + q as used inside a factor.
pub fn linear_factor(p: f64, q: f64) -> String {
    polynomial(0.0, p, q)
}

/// real ± imaginary·i
pub fn complex(real: f64, imaginary: f64) -> String {
    if imaginary < 0.0 {
        format!("{} - {}i", num(real), num(-imaginary))
    } else {
        format!("{} + {}i", num(real), num(imaginary))
    }
}

/// Wraps negative numbers in parentheses for substitution steps.
pub fn paren(value: f64) -> String {
    if value < 0.0 {
        format!("({})", num(value))
    } else {
        num(value)
    }
}

fn join_terms(terms: &[(f64, &str)]) -> String {
    if terms.is_empty() {
        return "0".to_string();
    }

    let mut out = String::new();
    for (i, (coef, var)) in terms.iter().enumerate() {
        let magnitude = single_term(coef.abs(), var);
        if i == 0 {
            if *coef < 0.0 {
                out.push('-');
            }
            out.push_str(&magnitude);
        } else {
            out.push_str(if *coef < 0.0 { " - " } else { " + " });
            out.push_str(&magnitude);
        }
    }
    out
}

fn single_term(magnitude: f64, var: &str) -> String {
    if var.is_empty() {
        num(magnitude)
    } else if magnitude == 1.0 {
        var.to_string()
    } else {
        format!("{}{}", num(magnitude), var)
    }
}
