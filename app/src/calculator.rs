//! FILENAME: app/src/calculator.rs
// PURPOSE: Calculator key commands.
// CONTEXT: The keypad sends one token per press; the session lives in AppState.

use calc_engine::{Calculator, Event};

use crate::api_types::CalculatorDisplay;
use crate::{log_enter, log_exit, log_warn, AppState};

fn lock(state: &AppState) -> Result<std::sync::MutexGuard<'_, Calculator>, String> {
    state
        .calculator
        .lock()
        .map_err(|e| format!("Calculator lock error: {}", e))
}

/// Applies one key token and returns the new display.
pub fn press_key(state: &AppState, token: &str) -> Result<CalculatorDisplay, String> {
    log_enter!("CALC", "press_key", "token={}", token);

    let event = Event::from_token(token).map_err(|e| {
        log_warn!("CALC", "press_key rejected: {}", e);
        e.to_string()
    })?;

    let snapshot = lock(state)?.apply(&event);

    log_exit!("CALC", "press_key", "display={} history={}", snapshot.display, snapshot.history);
    Ok(snapshot.into())
}

/// Applies a sequence of tokens; stops at the first unknown token.
pub fn press_keys<S: AsRef<str>>(
    state: &AppState,
    tokens: &[S],
) -> Result<CalculatorDisplay, String> {
    let mut display = get_calculator_display(state)?;
    for token in tokens {
        display = press_key(state, token.as_ref())?;
    }
    Ok(display)
}

pub fn get_calculator_display(state: &AppState) -> Result<CalculatorDisplay, String> {
    Ok(lock(state)?.snapshot().into())
}

/// "C" while digits are being entered, "AC" otherwise.
pub fn get_clear_label(state: &AppState) -> Result<String, String> {
    Ok(lock(state)?.state().clear_kind().label().to_string())
}
