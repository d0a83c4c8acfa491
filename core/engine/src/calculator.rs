//! FILENAME: core/engine/src/calculator.rs
//! PURPOSE: Session wrapper pairing a calculator state with its random source.
//! CONTEXT: The UI layer owns one `Calculator` per interactive session, feeds it
//! events one at a time, and polls a `Snapshot` to render the display.

use serde::{Deserialize, Serialize};

use crate::event::{Event, EventError};
use crate::random::{FastRandom, RandomSource};
use crate::state::{transition, AngleMode, CalculatorState};

/// Everything the display needs after an event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub display: String,
    pub history: String,
    pub is_entering_digit: bool,
    /// "C" or "AC": the label the shared clear key should show.
    pub clear_label: String,
    /// True when memory holds a non-zero value (the "M" indicator).
    pub memory_active: bool,
    pub angle_mode: AngleMode,
    pub inverse_mode: bool,
}

impl From<&CalculatorState> for Snapshot {
    fn from(state: &CalculatorState) -> Self {
        Snapshot {
            display: state.current_input.clone(),
            history: state.history.clone(),
            is_entering_digit: state.is_entering_digit,
            clear_label: state.clear_kind().label().to_string(),
            memory_active: state.memory != 0.0,
            angle_mode: state.angle_mode,
            inverse_mode: state.inverse_mode,
        }
    }
}

/// One interactive calculator session.
pub struct Calculator {
    state: CalculatorState,
    random: Box<dyn RandomSource>,
}

impl Calculator {
    /// New session using the default random source.
    pub fn new() -> Self {
        Self::with_random(Box::new(FastRandom::new()))
    }

    pub fn with_random(random: Box<dyn RandomSource>) -> Self {
        Calculator {
            state: CalculatorState::new(),
            random,
        }
    }

    /// Sets the angle mode of the current state (used when applying configuration).
    pub fn set_angle_mode(&mut self, angle_mode: AngleMode) {
        self.state.angle_mode = angle_mode;
    }

    /// Applies one event and returns the resulting snapshot.
    pub fn apply(&mut self, event: &Event) -> Snapshot {
        self.state = transition(&self.state, event, self.random.as_mut());
        self.snapshot()
    }

    /// Parses a key token and applies it.
    pub fn press(&mut self, token: &str) -> Result<Snapshot, EventError> {
        let event = Event::from_token(token)?;
        Ok(self.apply(&event))
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::from(&self.state)
    }

    pub fn state(&self) -> &CalculatorState {
        &self.state
    }
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new()
    }
}
