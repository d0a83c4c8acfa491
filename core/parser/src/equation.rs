//! FILENAME: core/parser/src/equation.rs
//! PURPOSE: Result types produced by the equation text parser.
//! CONTEXT: A parse either recognizes one equation family and carries its
//! coefficients, typed solution, human-readable steps and final answer, or
//! reports the text as unrecognized.

/// Shown as the answer when no equation family matched.
pub const FALLBACK_MESSAGE: &str = "Could not recognize an equation. Supported forms: \
    linear equations in x, systems of 2 or 3 linear equations, and quadratic equations in x.";

/// How a quadratic was written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuadraticForm {
    /// a·x² + b·x + c = 0 (terms on either side)
    Standard,
    /// (p₁x + q₁)(p₂x + q₂) = 0
    Factored,
}

/// The recognized equation family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EquationKind {
    /// System in 2 or 3 unknowns (x, y[, z])
    LinearSystem(usize),
    SingleLinear,
    Quadratic(QuadraticForm),
}

impl EquationKind {
    pub fn label(&self) -> String {
        match self {
            EquationKind::LinearSystem(n) => format!("Linear system ({} variables)", n),
            EquationKind::SingleLinear => "Linear equation".to_string(),
            EquationKind::Quadratic(QuadraticForm::Standard) => "Quadratic equation".to_string(),
            EquationKind::Quadratic(QuadraticForm::Factored) => {
                "Quadratic equation (factored form)".to_string()
            }
        }
    }
}

/// Extracted coefficients in canonical form.
#[derive(Debug, Clone, PartialEq)]
pub enum Coefficients {
    /// matrix · unknowns = constants. A single linear equation is the 1×1 case.
    Linear {
        matrix: Vec<Vec<f64>>,
        constants: Vec<f64>,
    },
    /// a·x² + b·x + c = 0
    Quadratic { a: f64, b: f64, c: f64 },
}

/// Roots of a quadratic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum QuadraticRoots {
    TwoReal(f64, f64),
    OneReal(f64),
    /// real ± imaginary·i, with `imaginary` > 0
    Complex { real: f64, imaginary: f64 },
}

/// Typed outcome of solving the recognized equation.
#[derive(Debug, Clone, PartialEq)]
pub enum Solution {
    /// One value per unknown, in declared variable order.
    Unique(Vec<f64>),
    /// Singular linear system.
    NoUniqueSolution,
    /// Contradiction such as 0 = 5.
    NoSolution,
    /// Identity such as 0 = 0.
    InfinitelyMany,
    Quadratic(QuadraticRoots),
}

/// A recognized equation with its worked solution.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedEquation {
    pub kind: EquationKind,
    pub coefficients: Coefficients,
    pub solution: Solution,
    pub steps: Vec<String>,
    pub answer: String,
}

/// Result of parsing one text blob.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseOutcome {
    Recognized {
        normalized: String,
        equation: ParsedEquation,
    },
    Unrecognized {
        normalized: String,
    },
}

impl ParseOutcome {
    /// The normalized text the classifier worked on.
    pub fn normalized(&self) -> &str {
        match self {
            ParseOutcome::Recognized { normalized, .. } => normalized,
            ParseOutcome::Unrecognized { normalized } => normalized,
        }
    }

    pub fn is_recognized(&self) -> bool {
        matches!(self, ParseOutcome::Recognized { .. })
    }

    pub fn equation(&self) -> Option<&ParsedEquation> {
        match self {
            ParseOutcome::Recognized { equation, .. } => Some(equation),
            ParseOutcome::Unrecognized { .. } => None,
        }
    }

    pub fn category_label(&self) -> String {
        match self {
            ParseOutcome::Recognized { equation, .. } => equation.kind.label(),
            ParseOutcome::Unrecognized { .. } => "Unrecognized".to_string(),
        }
    }

    /// Solution steps; empty when unrecognized.
    pub fn steps(&self) -> &[String] {
        match self {
            ParseOutcome::Recognized { equation, .. } => &equation.steps,
            ParseOutcome::Unrecognized { .. } => &[],
        }
    }

    pub fn answer(&self) -> &str {
        match self {
            ParseOutcome::Recognized { equation, .. } => &equation.answer,
            ParseOutcome::Unrecognized { .. } => FALLBACK_MESSAGE,
        }
    }
}
