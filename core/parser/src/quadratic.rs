//! FILENAME: core/parser/src/quadratic.rs
//! PURPOSE: Quadratic equations in x, in standard or factored form.
//! CONTEXT: The factored detector only accepts the literal shape
//! "(factor)(factor)=0"; anything else is read as standard form, where both
//! sides are collected into a·x^2 + b·x + c = 0.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::equation::{
    Coefficients, EquationKind, ParsedEquation, QuadraticForm, QuadraticRoots, Solution,
};
use crate::format::{complex, linear_factor, num, paren, polynomial};
use crate::terms::{extract_equation, extract_side, ExtractError};

/// Below this magnitude the discriminant (or the leading coefficient) is zero.
const EPSILON: f64 = 1e-10;

static FACTORED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\(([^()]+)\)\(([^()]+)\)=0$").expect("factored pattern is valid")
});

/// True when the normalized text is exactly "(..)(..)=0".
pub fn is_factored(text: &str) -> bool {
    FACTORED.is_match(text)
}

/// Parses a quadratic, trying the factored shape first.
pub fn parse_quadratic(text: &str) -> Result<ParsedEquation, ExtractError> {
    if let Some(captures) = FACTORED.captures(text) {
        return parse_factored(&captures[1], &captures[2]);
    }
    parse_standard(text)
}

fn parse_standard(text: &str) -> Result<ParsedEquation, ExtractError> {
    let eq = extract_equation(text, &["x^2", "x"])?;
    let a = eq.variables[0];
    let b = eq.variables[1];
    let c = -eq.constant;

    if a.abs() < EPSILON {
        return Err(ExtractError::DegenerateQuadratic);
    }

    let discriminant = b * b - 4.0 * a * c;
    let mut steps = vec![
        "Recognized a quadratic equation in x".to_string(),
        format!("Standard form: {} = 0", polynomial(a, b, c)),
        format!("Coefficients: a = {}, b = {}, c = {}", num(a), num(b), num(c)),
        format!(
            "Discriminant: Δ = b^2 - 4ac = {}^2 - 4{}{} = {}",
            paren(b),
            wrap(a),
            wrap(c),
            num(discriminant)
        ),
    ];

    let roots = if discriminant.abs() < EPSILON {
        steps.push("Δ = 0, so there is one repeated real root".to_string());
        QuadraticRoots::OneReal(-b / (2.0 * a))
    } else if discriminant > 0.0 {
        steps.push("Δ > 0, so there are two distinct real roots".to_string());
        let sqrt = discriminant.sqrt();
        QuadraticRoots::TwoReal((-b + sqrt) / (2.0 * a), (-b - sqrt) / (2.0 * a))
    } else {
        steps.push("Δ < 0, so the roots are a complex conjugate pair".to_string());
        QuadraticRoots::Complex {
            real: -b / (2.0 * a),
            imaginary: (-discriminant).sqrt() / (2.0 * a.abs()),
        }
    };
    steps.push("Quadratic formula: x = (-b ± √Δ) / (2a)".to_string());

    let answer = describe_roots(&roots);
    steps.extend(root_lines(&roots));

    Ok(ParsedEquation {
        kind: EquationKind::Quadratic(QuadraticForm::Standard),
        coefficients: Coefficients::Quadratic { a, b, c },
        solution: Solution::Quadratic(roots),
        steps,
        answer,
    })
}

fn parse_factored(first: &str, second: &str) -> Result<ParsedEquation, ExtractError> {
    let (p1, q1) = linear_in_x(first)?;
    let (p2, q2) = linear_in_x(second)?;

    let a = p1 * p2;
    let b = p1 * q2 + q1 * p2;
    let c = q1 * q2;

    let r1 = -q1 / p1;
    let r2 = -q2 / p2;
    let roots = if (r1 - r2).abs() < EPSILON {
        QuadraticRoots::OneReal(r1)
    } else {
        QuadraticRoots::TwoReal(r1, r2)
    };

    let f1 = linear_factor(p1, q1);
    let f2 = linear_factor(p2, q2);
    let mut steps = vec![
        "Recognized a quadratic equation in factored form".to_string(),
        format!("Factored form: ({})({}) = 0", f1, f2),
        format!("Expanded: {} = 0", polynomial(a, b, c)),
        format!("Zero-product property: {} = 0 or {} = 0", f1, f2),
    ];
    steps.extend(root_lines(&roots));

    Ok(ParsedEquation {
        kind: EquationKind::Quadratic(QuadraticForm::Factored),
        coefficients: Coefficients::Quadratic { a, b, c },
        solution: Solution::Quadratic(roots),
        steps,
        answer: describe_roots(&roots),
    })
}

/// p·x + q from a factor's text; p must be non-zero.
fn linear_in_x(factor: &str) -> Result<(f64, f64), ExtractError> {
    let side = extract_side(factor, &["x"])?;
    let p = side.variables[0];
    if p.abs() < EPSILON {
        return Err(ExtractError::InvalidFactor(factor.to_string()));
    }
    Ok((p, side.constant))
}

fn wrap(value: f64) -> String {
    format!("({})", num(value))
}

fn root_lines(roots: &QuadraticRoots) -> Vec<String> {
    match roots {
        QuadraticRoots::TwoReal(x1, x2) => {
            vec![format!("x1 = {}", num(*x1)), format!("x2 = {}", num(*x2))]
        }
        QuadraticRoots::OneReal(x) => vec![format!("x = {}", num(*x))],
        QuadraticRoots::Complex { real, imaginary } => vec![
            format!("x1 = {}", complex(*real, *imaginary)),
            format!("x2 = {}", complex(*real, -imaginary)),
        ],
    }
}

fn describe_roots(roots: &QuadraticRoots) -> String {
    root_lines(roots).join(", ")
}
