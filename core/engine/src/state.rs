//! FILENAME: core/engine/src/state.rs
//! PURPOSE: The calculator state and its transition function.
//! CONTEXT: `transition(&state, &event, random)` returns the next state and
//! never mutates its input. The display buffer doubles as the current operand;
//! operands held in `Pending` keep full precision.
//!
//! KEY BEHAVIOR:
//! - Binary operators fold left to right with no precedence: 2 + 3 × 4 = 20
//! - Division by zero yields 0
//! - One pending slot: nothing, a basic operator, or a chained power/root
//! - Clear ("C") only resets the entry; All Clear ("AC") also drops
//!   pending work, history, memory and the 2nd latch

use serde::{Deserialize, Serialize};

use crate::event::{AdvancedOp, BinaryOp, ControlOp, Event, Function, MemoryOp};
use crate::functions::{annotate, evaluate_function};
use crate::number_format::{format_display, is_sentinel, parse_display};
use crate::random::RandomSource;

/// Maximum number of characters accepted in the entry buffer.
pub const MAX_INPUT_LEN: usize = 15;

/// Unit the circular trig functions read and produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AngleMode {
    #[default]
    Radians,
    Degrees,
}

impl AngleMode {
    pub fn to_radians(self, value: f64) -> f64 {
        match self {
            AngleMode::Radians => value,
            AngleMode::Degrees => value.to_radians(),
        }
    }

    pub fn from_radians(self, value: f64) -> f64 {
        match self {
            AngleMode::Radians => value,
            AngleMode::Degrees => value.to_degrees(),
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            AngleMode::Radians => AngleMode::Degrees,
            AngleMode::Degrees => AngleMode::Radians,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AngleMode::Radians => "Rad",
            AngleMode::Degrees => "Deg",
        }
    }
}

/// The operation waiting for its second operand, if any.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum Pending {
    #[default]
    None,
    Basic { op: BinaryOp, operand: f64 },
    Advanced { op: AdvancedOp, operand: f64 },
}

impl Pending {
    /// History prefix describing the pending work, e.g. "12 + ".
    fn prefix(&self) -> String {
        match self {
            Pending::None => String::new(),
            Pending::Basic { op, operand } => {
                format!("{} {} ", format_display(*operand), op.symbol())
            }
            Pending::Advanced { op, operand } => {
                format!("{} {} ", format_display(*operand), op.symbol())
            }
        }
    }
}

/// Complete state of one calculator session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculatorState {
    /// Entry buffer and display text. Never empty.
    pub current_input: String,
    pub pending: Pending,
    /// True while the user is composing `current_input` digit by digit.
    pub is_entering_digit: bool,
    /// Trace of the expression in progress, rebuilt on each event.
    pub history: String,
    pub memory: f64,
    pub angle_mode: AngleMode,
    /// The 2nd latch: trig keys evaluate their inverses while set.
    pub inverse_mode: bool,
}

impl Default for CalculatorState {
    fn default() -> Self {
        CalculatorState {
            current_input: "0".to_string(),
            pending: Pending::None,
            is_entering_digit: false,
            history: String::new(),
            memory: 0.0,
            angle_mode: AngleMode::Radians,
            inverse_mode: false,
        }
    }
}

impl CalculatorState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fresh state starting in the given angle mode.
    pub fn with_angle_mode(angle_mode: AngleMode) -> Self {
        CalculatorState {
            angle_mode,
            ..Default::default()
        }
    }

    /// Value currently shown on the display.
    pub fn current_value(&self) -> f64 {
        parse_display(&self.current_input)
    }

    /// Left operand of a pending basic operation.
    pub fn first_operand(&self) -> Option<f64> {
        match self.pending {
            Pending::Basic { operand, .. } => Some(operand),
            _ => None,
        }
    }

    pub fn pending_operation(&self) -> Option<BinaryOp> {
        match self.pending {
            Pending::Basic { op, .. } => Some(op),
            _ => None,
        }
    }

    pub fn pending_advanced(&self) -> Option<AdvancedOp> {
        match self.pending {
            Pending::Advanced { op, .. } => Some(op),
            _ => None,
        }
    }

    /// Which clear the shared clear key should send right now.
    pub fn clear_kind(&self) -> ControlOp {
        if self.is_entering_digit {
            ControlOp::Clear
        } else {
            ControlOp::AllClear
        }
    }

    /// Returns the state that follows `event`.
    pub fn apply(&self, event: &Event, random: &mut dyn RandomSource) -> CalculatorState {
        let mut next = self.clone();
        match *event {
            Event::Digit(ch) => next.on_digit(ch),
            Event::Binary(op) => next.on_binary(op),
            Event::Equals => next.on_equals(),
            Event::Function(function) => next.on_function(function, random),
            Event::Memory(op) => next.on_memory(op),
            Event::Control(op) => next.on_control(op),
        }
        next
    }

    fn on_digit(&mut self, ch: char) {
        if !self.is_entering_digit || is_sentinel(&self.current_input) {
            self.current_input = ch.to_string();
            self.is_entering_digit = true;
            return;
        }

        if self.current_input.chars().count() >= MAX_INPUT_LEN {
            return;
        }

        if ch == '.' {
            // One decimal point per number, and none inside the exponent
            if !self.current_input.contains(['.', 'e']) {
                self.current_input.push('.');
            }
            return;
        }

        match self.current_input.as_str() {
            "0" => self.current_input = ch.to_string(),
            "-0" => self.current_input = format!("-{}", ch),
            _ => self.current_input.push(ch),
        }
    }

    fn on_binary(&mut self, op: BinaryOp) {
        self.is_entering_digit = false;
        let current = self.current_value();

        // An armed power/root is dropped, a pending basic op is folded
        let first = match self.pending {
            Pending::Basic { op: previous, operand } => {
                let folded = previous.apply(operand, current);
                self.current_input = format_display(folded);
                folded
            }
            Pending::Advanced { .. } | Pending::None => current,
        };

        self.pending = Pending::Basic { op, operand: first };
        self.history = format!("{} {}", format_display(first), op.symbol());
    }

    fn on_equals(&mut self) {
        let current = self.current_value();
        let second = format_display(current);

        let result = match self.pending {
            Pending::Advanced { op, operand } => {
                let base = format_display(operand);
                self.history = match op {
                    AdvancedOp::Power => format!("{} ^ {} =", base, second),
                    AdvancedOp::Root => format!("{} ^ (1/{}) =", base, second),
                };
                op.apply(operand, current)
            }
            Pending::Basic { op, operand } => {
                self.history = format!("{} {} {} =", format_display(operand), op.symbol(), second);
                op.apply(operand, current)
            }
            Pending::None => {
                self.history = format!("{} =", second);
                current
            }
        };

        self.pending = Pending::None;
        self.current_input = format_display(result);
        self.is_entering_digit = false;
    }

    fn on_function(&mut self, function: Function, random: &mut dyn RandomSource) {
        match function {
            Function::Pi | Function::Euler => {
                let value = evaluate_function(function, 0.0, self.angle_mode, false, random);
                self.current_input = format_display(value);
                self.history.clear();
                self.is_entering_digit = true;
            }
            Function::ToggleInverse => {
                self.inverse_mode = !self.inverse_mode;
                let label = if self.inverse_mode { "2nd" } else { "" };
                self.history = format!("{}{}", self.pending.prefix(), label)
                    .trim_end()
                    .to_string();
            }
            Function::ToggleAngle => {
                self.angle_mode = self.angle_mode.toggled();
                self.history = format!("{}{}", self.pending.prefix(), self.angle_mode.label());
            }
            Function::Exponent => self.start_exponent(),
            Function::Power | Function::Root => {
                let op = if function == Function::Power {
                    AdvancedOp::Power
                } else {
                    AdvancedOp::Root
                };
                let operand = self.current_value();
                self.pending = Pending::Advanced { op, operand };
                self.history = format!("{} {}", format_display(operand), op.symbol());
                self.is_entering_digit = false;
            }
            Function::Negate if self.is_entering_digit => self.negate_entry(),
            _ => self.apply_transform(function, random),
        }
    }

    /// Immediate single-argument transform of the displayed value.
    fn apply_transform(&mut self, function: Function, random: &mut dyn RandomSource) {
        let x = self.current_value();
        let inverse = self.inverse_mode && function.is_trigonometric();
        let result = evaluate_function(function, x, self.angle_mode, inverse, random);

        self.history = format!(
            "{}{}",
            self.pending.prefix(),
            annotate(function, &format_display(x), inverse)
        );
        self.current_input = format_display(result);
        self.is_entering_digit = false;
    }

    /// EE: append the exponent marker once; entry continues in the exponent.
    fn start_exponent(&mut self) {
        if is_sentinel(&self.current_input) {
            return;
        }
        if !self.current_input.contains('e') && self.current_input.chars().count() < MAX_INPUT_LEN
        {
            self.current_input.push('e');
        }
        self.is_entering_digit = true;
        self.history = format!("{}{}", self.pending.prefix(), self.current_input);
    }

    /// ± while typing flips the sign of the entry itself.
    fn negate_entry(&mut self) {
        if let Some(rest) = self.current_input.strip_prefix('-') {
            self.current_input = rest.to_string();
        } else if self.current_input != "0" {
            self.current_input.insert(0, '-');
        }
    }

    fn on_memory(&mut self, op: MemoryOp) {
        match op {
            MemoryOp::Add | MemoryOp::Subtract => {
                let value = self.current_value();
                if value.is_finite() {
                    if op == MemoryOp::Add {
                        self.memory += value;
                    } else {
                        self.memory -= value;
                    }
                }
                self.is_entering_digit = false;
            }
            MemoryOp::Clear => self.memory = 0.0,
            MemoryOp::Recall => {
                self.current_input = format_display(self.memory);
                self.is_entering_digit = true;
            }
        }
    }

    fn on_control(&mut self, op: ControlOp) {
        match op {
            ControlOp::AllClear => {
                *self = CalculatorState::with_angle_mode(self.angle_mode);
            }
            ControlOp::Clear => {
                self.current_input = "0".to_string();
                self.is_entering_digit = true;
            }
        }
    }
}

/// Pure state transition: `(State, Event) -> State`.
pub fn transition(
    state: &CalculatorState,
    event: &Event,
    random: &mut dyn RandomSource,
) -> CalculatorState {
    state.apply(event, random)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::SequenceRandom;

    fn run(tokens: &[&str]) -> CalculatorState {
        run_from(CalculatorState::new(), tokens)
    }

    fn run_from(start: CalculatorState, tokens: &[&str]) -> CalculatorState {
        let mut random = SequenceRandom::new(vec![0.125]);
        tokens.iter().fold(start, |state, token| {
            let event = Event::from_token(token).unwrap();
            transition(&state, &event, &mut random)
        })
    }

    #[test]
    fn test_default_state() {
        let state = CalculatorState::new();
        assert_eq!(state.current_input, "0");
        assert_eq!(state.pending, Pending::None);
        assert!(!state.is_entering_digit);
        assert_eq!(state.clear_kind(), ControlOp::AllClear);
    }

    #[test]
    fn test_transition_does_not_mutate_input() {
        let state = CalculatorState::new();
        let mut random = SequenceRandom::default();
        let next = transition(&state, &Event::Digit('7'), &mut random);
        assert_eq!(state.current_input, "0");
        assert_eq!(next.current_input, "7");
    }

    #[test]
    fn test_digit_sequence_is_kept_verbatim() {
        let state = run(&["1", "2", "3", ".", "4", "5"]);
        assert_eq!(state.current_input, "123.45");
        assert!(state.is_entering_digit);
    }

    #[test]
    fn test_second_decimal_point_is_ignored() {
        let state = run(&["1", ".", "2", ".", "3"]);
        assert_eq!(state.current_input, "1.23");
    }

    #[test]
    fn test_leading_zero_is_replaced() {
        let state = run(&["0", "0", "7"]);
        assert_eq!(state.current_input, "7");
        let state = run(&["0", ".", "0", "7"]);
        assert_eq!(state.current_input, "0.07");
    }

    #[test]
    fn test_decimal_first_is_kept_verbatim() {
        let state = run(&[".", "5"]);
        assert_eq!(state.current_input, ".5");
        assert_eq!(state.current_value(), 0.5);

        let state = run(&["."]);
        assert_eq!(state.current_value(), 0.0);
    }

    #[test]
    fn test_decimal_first_uses_no_extra_cap_slot() {
        let tokens: Vec<String> = ".123456789012345".chars().map(|c| c.to_string()).collect();
        let tokens: Vec<&str> = tokens.iter().map(String::as_str).collect();
        let state = run(&tokens);
        assert_eq!(state.current_input, ".12345678901234");
    }

    #[test]
    fn test_input_is_capped_at_fifteen_chars() {
        let tokens: Vec<&str> = std::iter::repeat("9").take(20).collect();
        let state = run(&tokens);
        assert_eq!(state.current_input.len(), MAX_INPUT_LEN);
    }

    #[test]
    fn test_simple_addition() {
        let state = run(&["2", "+", "3", "="]);
        assert_eq!(state.current_input, "5");
        assert_eq!(state.history, "2 + 3 =");
        assert_eq!(state.pending, Pending::None);
    }

    #[test]
    fn test_chaining_has_no_precedence() {
        let state = run(&["2", "+", "3", "×"]);
        assert_eq!(state.current_input, "5");
        assert_eq!(state.history, "5 ×");
        assert_eq!(state.first_operand(), Some(5.0));

        let state = run_from(state, &["4", "="]);
        assert_eq!(state.current_input, "20");
    }

    #[test]
    fn test_division_by_zero_yields_zero() {
        let state = run(&["5", "÷", "0", "="]);
        assert_eq!(state.current_input, "0");
        assert_eq!(state.history, "5 ÷ 0 =");
    }

    #[test]
    fn test_power_chain() {
        let state = run(&["2", "xʸ"]);
        assert_eq!(state.pending_advanced(), Some(AdvancedOp::Power));
        assert_eq!(state.history, "2 ^");
        assert!(!state.is_entering_digit);

        let state = run_from(state, &["1", "0", "="]);
        assert_eq!(state.current_input, "1024");
        assert_eq!(state.history, "2 ^ 10 =");
        assert_eq!(state.pending, Pending::None);
    }

    #[test]
    fn test_root_chain() {
        let state = run(&["2", "7", "ʸ√x", "3", "="]);
        assert_eq!(state.current_input, "3");

        let state = run(&["8", "ʸ√x", "0", "="]);
        assert_eq!(state.current_input, "Error");
    }

    #[test]
    fn test_basic_operator_clears_armed_power() {
        let state = run(&["2", "xʸ", "3", "+"]);
        assert_eq!(state.pending_advanced(), None);
        assert_eq!(state.pending_operation(), Some(BinaryOp::Add));
        assert_eq!(state.first_operand(), Some(3.0));
    }

    #[test]
    fn test_power_replaces_pending_basic() {
        let state = run(&["2", "+", "3", "xʸ"]);
        assert_eq!(state.pending_operation(), None);
        assert_eq!(state.pending_advanced(), Some(AdvancedOp::Power));
    }

    #[test]
    fn test_constants_reenter_digit_mode() {
        let state = run(&["5", "+", "π"]);
        assert_eq!(state.current_input, "3.14159265");
        assert_eq!(state.history, "");
        assert!(state.is_entering_digit);
    }

    #[test]
    fn test_transforms_annotate_history() {
        let state = run(&["3", "x²"]);
        assert_eq!(state.current_input, "9");
        assert_eq!(state.history, "(3)²");
        assert!(!state.is_entering_digit);

        let state = run(&["1", "+", "4", "√x"]);
        assert_eq!(state.current_input, "2");
        assert_eq!(state.history, "1 + √(4)");
    }

    #[test]
    fn test_factorial_sentinels() {
        assert_eq!(run(&["5", "x!"]).current_input, "120");
        assert_eq!(run(&["2", "1", "x!"]).current_input, "Infinity");
        assert_eq!(run(&["1", "±", "x!"]).current_input, "Error");
        assert_eq!(run(&["2", ".", "5", "x!"]).current_input, "Error");
    }

    #[test]
    fn test_inverse_mode_annotation() {
        let state = run(&["2nd", "0", ".", "5", "sin"]);
        assert_eq!(state.history, "sin⁻¹(0.5)");
        assert!(state.inverse_mode);
    }

    #[test]
    fn test_trig_round_trip_in_both_modes() {
        for mode in [AngleMode::Radians, AngleMode::Degrees] {
            for x in ["0.3", "1", "0", "0.75"] {
                let mut tokens: Vec<&str> = x.split("").filter(|s| !s.is_empty()).collect();
                tokens.extend(["2nd", "sin", "2nd", "sin"]);
                let state = run_from(CalculatorState::with_angle_mode(mode), &tokens);
                let expected: f64 = x.parse().unwrap();
                assert!((state.current_value() - expected).abs() < 1e-7);
            }
        }
    }

    #[test]
    fn test_random_is_injected() {
        let state = run(&["Rand"]);
        assert_eq!(state.current_input, "0.125");
        assert_eq!(state.history, "Rand");
    }

    #[test]
    fn test_mode_toggles_keep_entry_going() {
        let state = run(&["1", "2", "Deg", "3"]);
        assert_eq!(state.current_input, "123");
        assert_eq!(state.angle_mode, AngleMode::Degrees);
        assert_eq!(state.history, "Deg");
    }

    #[test]
    fn test_exponent_entry() {
        let state = run(&["1", ".", "5", "EE", "3"]);
        assert_eq!(state.current_input, "1.5e3");
        assert_eq!(state.current_value(), 1500.0);

        let state = run(&["1", "EE", "EE", ".", "2"]);
        assert_eq!(state.current_input, "1e2");
    }

    #[test]
    fn test_memory_operations() {
        let state = run(&["4", "m+", "6", "m+", "3", "m-"]);
        assert_eq!(state.memory, 7.0);
        assert!(!state.is_entering_digit);

        let state = run_from(state, &["mr"]);
        assert_eq!(state.current_input, "7");
        assert!(state.is_entering_digit);

        let state = run_from(state, &["mc"]);
        assert_eq!(state.memory, 0.0);
    }

    #[test]
    fn test_memory_ignores_sentinels() {
        let state = run(&["8", "ʸ√x", "0", "=", "m+"]);
        assert_eq!(state.memory, 0.0);
    }

    #[test]
    fn test_single_clear_keeps_pending_and_memory() {
        let state = run(&["9", "m+", "2", "+", "5", "C"]);
        assert_eq!(state.current_input, "0");
        assert!(state.is_entering_digit);
        assert_eq!(state.memory, 9.0);
        assert_eq!(state.pending_operation(), Some(BinaryOp::Add));

        let state = run_from(state, &["3", "="]);
        assert_eq!(state.current_input, "5");
    }

    #[test]
    fn test_all_clear_resets_everything_but_angle_mode() {
        let state = run(&["Deg", "2nd", "9", "m+", "2", "+", "5", "AC"]);
        assert_eq!(state.current_input, "0");
        assert_eq!(state.pending, Pending::None);
        assert_eq!(state.history, "");
        assert_eq!(state.memory, 0.0);
        assert!(!state.inverse_mode);
        assert!(!state.is_entering_digit);
        assert_eq!(state.angle_mode, AngleMode::Degrees);
    }

    #[test]
    fn test_clear_kind_follows_entry_mode() {
        let state = run(&["4"]);
        assert_eq!(state.clear_kind(), ControlOp::Clear);
        let state = run_from(state, &["+"]);
        assert_eq!(state.clear_kind(), ControlOp::AllClear);
    }

    #[test]
    fn test_negate_while_entering() {
        let state = run(&["4", "±", "2"]);
        assert_eq!(state.current_input, "-42");
        let state = run_from(state, &["±"]);
        assert_eq!(state.current_input, "42");
    }

    #[test]
    fn test_digit_after_sentinel_starts_fresh() {
        let state = run(&["8", "ʸ√x", "0", "=", "3"]);
        assert_eq!(state.current_input, "3");
    }
}
