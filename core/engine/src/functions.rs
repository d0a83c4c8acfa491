//! FILENAME: core/engine/src/functions.rs
//! PURPOSE: Numeric behavior and history annotation of the immediate function keys.
//! CONTEXT: Called by the state transition for every key that transforms the
//! displayed value in place. Domain violations produce NaN (shown as the error
//! sentinel) instead of failing, so the calculator never interrupts input.
//!
//! SUPPORTED FUNCTIONS:
//! - Powers and roots: x², x³, 1/x, √x, ∛x, eˣ, 10ˣ
//! - Logarithms: ln, log₁₀
//! - Percent, factorial, random
//! - Circular trig (angle-mode aware) and hyperbolic trig, plus their inverses

use crate::event::Function;
use crate::random::RandomSource;
use crate::state::AngleMode;

/// Largest integer whose factorial is computed; anything above saturates to infinity.
pub const FACTORIAL_LIMIT: u64 = 20;

/// Computes the result of an immediate function key.
pub fn evaluate_function(
    function: Function,
    x: f64,
    angle_mode: AngleMode,
    inverse: bool,
    random: &mut dyn RandomSource,
) -> f64 {
    match function {
        Function::Pi => std::f64::consts::PI,
        Function::Euler => std::f64::consts::E,
        Function::Square => x * x,
        Function::Cube => x * x * x,
        Function::Reciprocal => fn_reciprocal(x),
        Function::Percent => x / 100.0,
        Function::Exp => x.exp(),
        Function::Exp10 => 10f64.powf(x),
        Function::SquareRoot => x.sqrt(),
        Function::CubeRoot => x.cbrt(),
        Function::Random => random.next_unit(),
        Function::Factorial => fn_factorial(x),
        Function::Ln => x.ln(),
        Function::Log10 => x.log10(),
        Function::Negate => -x,
        f if f.is_trigonometric() => fn_trig(f, x, angle_mode, inverse),
        // Toggles and chained operators never reach here
        _ => x,
    }
}

/// 1/x with zero mapped to zero.
fn fn_reciprocal(x: f64) -> f64 {
    if x == 0.0 {
        0.0
    } else {
        1.0 / x
    }
}

/// n! for non-negative integers. Negative or fractional input is NaN,
/// anything above the limit is +infinity.
fn fn_factorial(x: f64) -> f64 {
    if x.is_nan() || x < 0.0 || x.fract() != 0.0 {
        return f64::NAN;
    }
    if x > FACTORIAL_LIMIT as f64 {
        return f64::INFINITY;
    }

    let n = x as u64;
    (1..=n).product::<u64>() as f64
}

fn fn_trig(function: Function, x: f64, angle_mode: AngleMode, inverse: bool) -> f64 {
    if inverse {
        let result = match function {
            Function::Sin if x.abs() > 1.0 => return f64::NAN,
            Function::Cos if x.abs() > 1.0 => return f64::NAN,
            Function::Cosh if x < 1.0 => return f64::NAN,
            Function::Tanh if x.abs() >= 1.0 => return f64::NAN,
            Function::Sin => x.asin(),
            Function::Cos => x.acos(),
            Function::Tan => x.atan(),
            Function::Sinh => x.asinh(),
            Function::Cosh => x.acosh(),
            Function::Tanh => x.atanh(),
            _ => return f64::NAN,
        };
        if function.uses_angle_mode() {
            angle_mode.from_radians(result)
        } else {
            result
        }
    } else {
        let arg = if function.uses_angle_mode() {
            angle_mode.to_radians(x)
        } else {
            x
        };
        match function {
            Function::Sin => arg.sin(),
            Function::Cos => arg.cos(),
            Function::Tan => arg.tan(),
            Function::Sinh => arg.sinh(),
            Function::Cosh => arg.cosh(),
            Function::Tanh => arg.tanh(),
            _ => f64::NAN,
        }
    }
}

/// Canonical history text for a function applied to `operand`.
pub fn annotate(function: Function, operand: &str, inverse: bool) -> String {
    match function {
        Function::Square => format!("({})²", operand),
        Function::Cube => format!("({})³", operand),
        Function::Reciprocal => format!("1/({})", operand),
        Function::Percent => format!("{}%", operand),
        Function::Exp => format!("e^({})", operand),
        Function::Exp10 => format!("10^({})", operand),
        Function::SquareRoot => format!("√({})", operand),
        Function::CubeRoot => format!("∛({})", operand),
        Function::Random => "Rand".to_string(),
        Function::Factorial => format!("({})!", operand),
        Function::Ln => format!("ln({})", operand),
        Function::Log10 => format!("log₁₀({})", operand),
        Function::Negate => format!("−({})", operand),
        f if f.is_trigonometric() => format!("{}({})", f.trig_name(inverse), operand),
        _ => operand.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::SequenceRandom;

    fn eval(function: Function, x: f64) -> f64 {
        let mut random = SequenceRandom::new(vec![0.5]);
        evaluate_function(function, x, AngleMode::Radians, false, &mut random)
    }

    fn eval_inverse(function: Function, x: f64, mode: AngleMode) -> f64 {
        let mut random = SequenceRandom::default();
        evaluate_function(function, x, mode, true, &mut random)
    }

    #[test]
    fn test_factorial() {
        assert_eq!(eval(Function::Factorial, 0.0), 1.0);
        assert_eq!(eval(Function::Factorial, 5.0), 120.0);
        assert_eq!(eval(Function::Factorial, 20.0), 2432902008176640000.0);
        assert_eq!(eval(Function::Factorial, 21.0), f64::INFINITY);
        assert!(eval(Function::Factorial, -1.0).is_nan());
        assert!(eval(Function::Factorial, 2.5).is_nan());
    }

    #[test]
    fn test_reciprocal_of_zero() {
        assert_eq!(eval(Function::Reciprocal, 0.0), 0.0);
        assert_eq!(eval(Function::Reciprocal, 4.0), 0.25);
    }

    #[test]
    fn test_random_uses_injected_source() {
        assert_eq!(eval(Function::Random, 99.0), 0.5);
    }

    #[test]
    fn test_degrees_conversion() {
        let mut random = SequenceRandom::default();
        let sin30 = evaluate_function(Function::Sin, 30.0, AngleMode::Degrees, false, &mut random);
        assert!((sin30 - 0.5).abs() < 1e-12);

        let asin_half = eval_inverse(Function::Sin, 0.5, AngleMode::Degrees);
        assert!((asin_half - 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_hyperbolic_ignores_angle_mode() {
        let mut random = SequenceRandom::default();
        let deg = evaluate_function(Function::Sinh, 1.0, AngleMode::Degrees, false, &mut random);
        assert!((deg - 1f64.sinh()).abs() < 1e-12);
    }

    #[test]
    fn test_inverse_domain_violations_are_nan() {
        assert!(eval_inverse(Function::Sin, 1.5, AngleMode::Radians).is_nan());
        assert!(eval_inverse(Function::Cos, -1.01, AngleMode::Radians).is_nan());
        assert!(eval_inverse(Function::Cosh, 0.5, AngleMode::Radians).is_nan());
        assert!(eval_inverse(Function::Tanh, 1.0, AngleMode::Radians).is_nan());
        assert!(!eval_inverse(Function::Tan, 1e6, AngleMode::Radians).is_nan());
    }

    #[test]
    fn test_annotations() {
        assert_eq!(annotate(Function::Square, "3", false), "(3)²");
        assert_eq!(annotate(Function::Sin, "30", false), "sin(30)");
        assert_eq!(annotate(Function::Sin, "0.5", true), "sin⁻¹(0.5)");
        assert_eq!(annotate(Function::Tanh, "0.2", true), "tanh⁻¹(0.2)");
    }
}
