//! FILENAME: core/engine/src/event.rs
//! PURPOSE: The closed vocabulary of key events the calculator consumes.
//! CONTEXT: The UI layer forwards one token per key press. `Event::from_token`
//! maps both the display glyphs ("×", "√x", "sin⁻¹") and plain ASCII
//! spellings ("*", "sqrt") onto the same variants.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while turning a UI token into an event.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EventError {
    #[error("Unknown key token: '{0}'")]
    UnknownToken(String),

    #[error("Not a digit key: '{0}'")]
    InvalidDigit(char),
}

/// Basic arithmetic operators. They chain left to right with no precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl BinaryOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Subtract => "−",
            BinaryOp::Multiply => "×",
            BinaryOp::Divide => "÷",
        }
    }

    /// Applies the operator. Division by zero yields 0, not infinity.
    pub fn apply(&self, left: f64, right: f64) -> f64 {
        match self {
            BinaryOp::Add => left + right,
            BinaryOp::Subtract => left - right,
            BinaryOp::Multiply => left * right,
            BinaryOp::Divide => {
                if right == 0.0 {
                    0.0
                } else {
                    left / right
                }
            }
        }
    }
}

/// Chained operators that take their second operand on a later key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdvancedOp {
    /// base ^ exponent
    Power,
    /// base ^ (1 / degree)
    Root,
}

impl AdvancedOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            AdvancedOp::Power => "^",
            AdvancedOp::Root => "ʸ√",
        }
    }

    /// A zero root degree is undefined and yields NaN.
    pub fn apply(&self, base: f64, operand: f64) -> f64 {
        match self {
            AdvancedOp::Power => base.powf(operand),
            AdvancedOp::Root => {
                if operand == 0.0 {
                    f64::NAN
                } else {
                    base.powf(1.0 / operand)
                }
            }
        }
    }
}

/// Function keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Function {
    // Constants
    Pi,
    Euler,

    // Immediate transforms
    Square,
    Cube,
    Reciprocal,
    Percent,
    Exp,
    Exp10,
    SquareRoot,
    CubeRoot,
    Random,
    Factorial,
    Ln,
    Log10,
    Sin,
    Cos,
    Tan,
    Sinh,
    Cosh,
    Tanh,
    Negate,

    // Mode toggles
    ToggleInverse,
    ToggleAngle,
    Exponent,

    // Chained power / root
    Power,
    Root,
}

impl Function {
    /// True for the circular and hyperbolic families that switch to their
    /// inverse while the 2nd latch is on.
    pub fn is_trigonometric(&self) -> bool {
        matches!(
            self,
            Function::Sin
                | Function::Cos
                | Function::Tan
                | Function::Sinh
                | Function::Cosh
                | Function::Tanh
        )
    }

    /// Circular functions depend on the angle mode; hyperbolic ones do not.
    pub fn uses_angle_mode(&self) -> bool {
        matches!(self, Function::Sin | Function::Cos | Function::Tan)
    }

    /// The function name shown in history, e.g. "sin" or "sinh⁻¹".
    pub fn trig_name(&self, inverse: bool) -> &'static str {
        match (self, inverse) {
            (Function::Sin, false) => "sin",
            (Function::Sin, true) => "sin⁻¹",
            (Function::Cos, false) => "cos",
            (Function::Cos, true) => "cos⁻¹",
            (Function::Tan, false) => "tan",
            (Function::Tan, true) => "tan⁻¹",
            (Function::Sinh, false) => "sinh",
            (Function::Sinh, true) => "sinh⁻¹",
            (Function::Cosh, false) => "cosh",
            (Function::Cosh, true) => "cosh⁻¹",
            (Function::Tanh, false) => "tanh",
            (Function::Tanh, true) => "tanh⁻¹",
            _ => "",
        }
    }
}

/// Memory keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MemoryOp {
    Add,
    Subtract,
    Clear,
    Recall,
}

/// Clear keys. Which one the shared clear button sends is decided by the
/// caller from `CalculatorState::clear_kind`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControlOp {
    AllClear,
    Clear,
}

impl ControlOp {
    pub fn label(&self) -> &'static str {
        match self {
            ControlOp::AllClear => "AC",
            ControlOp::Clear => "C",
        }
    }
}

/// One discrete key event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Event {
    /// '0'..='9' or '.'
    Digit(char),
    Binary(BinaryOp),
    Equals,
    Function(Function),
    Memory(MemoryOp),
    Control(ControlOp),
}

impl Event {
    /// Builds a digit event, rejecting anything but 0-9 and '.'.
    pub fn digit(ch: char) -> Result<Event, EventError> {
        if ch.is_ascii_digit() || ch == '.' {
            Ok(Event::Digit(ch))
        } else {
            Err(EventError::InvalidDigit(ch))
        }
    }

    /// Maps a key token to its event.
    pub fn from_token(token: &str) -> Result<Event, EventError> {
        let token = token.trim();

        let mut chars = token.chars();
        if let (Some(ch), None) = (chars.next(), chars.next()) {
            if ch.is_ascii_digit() || ch == '.' {
                return Ok(Event::Digit(ch));
            }
        }

        let event = match token {
            "+" => Event::Binary(BinaryOp::Add),
            "-" | "−" => Event::Binary(BinaryOp::Subtract),
            "*" | "×" | "x" => Event::Binary(BinaryOp::Multiply),
            "/" | "÷" => Event::Binary(BinaryOp::Divide),
            "=" => Event::Equals,

            "π" | "pi" => Event::Function(Function::Pi),
            "e" => Event::Function(Function::Euler),
            "x²" | "x^2" => Event::Function(Function::Square),
            "x³" | "x^3" => Event::Function(Function::Cube),
            "1/x" => Event::Function(Function::Reciprocal),
            "%" => Event::Function(Function::Percent),
            "eˣ" | "e^x" => Event::Function(Function::Exp),
            "10ˣ" | "10^x" => Event::Function(Function::Exp10),
            "√x" | "²√x" | "√" | "sqrt" => Event::Function(Function::SquareRoot),
            "∛x" | "³√x" | "∛" | "cbrt" => Event::Function(Function::CubeRoot),
            "Rand" | "rand" => Event::Function(Function::Random),
            "x!" | "!" => Event::Function(Function::Factorial),
            "ln" => Event::Function(Function::Ln),
            "log₁₀" | "log10" | "log" => Event::Function(Function::Log10),
            "sin" => Event::Function(Function::Sin),
            "cos" => Event::Function(Function::Cos),
            "tan" => Event::Function(Function::Tan),
            "sinh" => Event::Function(Function::Sinh),
            "cosh" => Event::Function(Function::Cosh),
            "tanh" => Event::Function(Function::Tanh),
            "±" | "+/-" | "neg" => Event::Function(Function::Negate),
            "2nd" | "inv" => Event::Function(Function::ToggleInverse),
            "Rad" | "Deg" | "rad" | "deg" => Event::Function(Function::ToggleAngle),
            "EE" | "ee" => Event::Function(Function::Exponent),
            "xʸ" | "x^y" => Event::Function(Function::Power),
            "ʸ√x" | "y√x" | "yroot" => Event::Function(Function::Root),

            "m+" | "M+" => Event::Memory(MemoryOp::Add),
            "m-" | "M-" | "m−" => Event::Memory(MemoryOp::Subtract),
            "mc" | "MC" => Event::Memory(MemoryOp::Clear),
            "mr" | "MR" => Event::Memory(MemoryOp::Recall),

            "AC" | "ac" => Event::Control(ControlOp::AllClear),
            "C" | "c" => Event::Control(ControlOp::Clear),

            other => return Err(EventError::UnknownToken(other.to_string())),
        };
        Ok(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digit_tokens() {
        assert_eq!(Event::from_token("7"), Ok(Event::Digit('7')));
        assert_eq!(Event::from_token("."), Ok(Event::Digit('.')));
        assert_eq!(Event::digit('a'), Err(EventError::InvalidDigit('a')));
    }

    #[test]
    fn test_glyph_and_ascii_spellings_agree() {
        assert_eq!(Event::from_token("×"), Event::from_token("*"));
        assert_eq!(Event::from_token("−"), Event::from_token("-"));
        assert_eq!(Event::from_token("xʸ"), Event::from_token("x^y"));
        assert_eq!(Event::from_token("√x"), Event::from_token("sqrt"));
    }

    #[test]
    fn test_unknown_token() {
        assert_eq!(
            Event::from_token("banana"),
            Err(EventError::UnknownToken("banana".to_string()))
        );
    }

    #[test]
    fn test_divide_by_zero_is_zero() {
        assert_eq!(BinaryOp::Divide.apply(5.0, 0.0), 0.0);
        assert_eq!(BinaryOp::Divide.apply(-3.0, 0.0), 0.0);
    }

    #[test]
    fn test_root_of_degree_zero_is_nan() {
        assert!(AdvancedOp::Root.apply(8.0, 0.0).is_nan());
        assert!((AdvancedOp::Root.apply(8.0, 3.0) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_clear_labels() {
        assert_eq!(ControlOp::AllClear.label(), "AC");
        assert_eq!(ControlOp::Clear.label(), "C");
    }
}
