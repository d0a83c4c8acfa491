//! FILENAME: core/engine/src/lib.rs
//! PURPOSE: Main library entry point for the calculator state engine.
//! CONTEXT: Re-exports public types and modules for use by other crates.
//!
//! PIPELINE: Key token --> Event --> transition(State, Event) --> State --> Snapshot

pub mod calculator;
pub mod event;
pub mod functions;
pub mod number_format;
pub mod random;
pub mod state;

// Re-export commonly used types at the crate root
pub use calculator::{Calculator, Snapshot};
pub use event::{AdvancedOp, BinaryOp, ControlOp, Event, EventError, Function, MemoryOp};
pub use number_format::{format_display, parse_display, ERROR_SENTINEL, INFINITY_SENTINEL};
pub use random::{FastRandom, RandomSource, SequenceRandom};
pub use state::{transition, AngleMode, CalculatorState, Pending, MAX_INPUT_LEN};
