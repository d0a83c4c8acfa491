//! FILENAME: tests/common/mod.rs
//! Test harness and fixtures for Calcula command integration tests.

#![allow(dead_code)]

use app_lib::{
    create_app_state_with_random, get_calculator_display, press_key, solve_linear_form,
    AppConfig, AppState, CalculatorDisplay, LinearFormRequest, LinearFormResult,
};
use calc_engine::{AngleMode, SequenceRandom};

/// Test harness for creating and managing test state.
pub struct TestHarness {
    pub state: AppState,
}

impl TestHarness {
    /// Default config; the Rand key yields 0.25, 0.5, 0.75 in turn.
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    pub fn with_config(config: AppConfig) -> Self {
        TestHarness {
            state: create_app_state_with_random(
                config,
                Box::new(SequenceRandom::new(vec![0.25, 0.5, 0.75])),
            ),
        }
    }

    /// A session that starts in degrees.
    pub fn in_degrees() -> Self {
        let mut config = AppConfig::default();
        config.calculator.angle_mode = AngleMode::Degrees;
        Self::with_config(config)
    }

    // ========================================================================
    // CALCULATOR HELPERS
    // ========================================================================

    /// Press space-separated key tokens and return the final display.
    pub fn keys(&self, keys: &str) -> CalculatorDisplay {
        let mut last = self.display();
        for key in keys.split_whitespace() {
            last = press_key(&self.state, key)
                .unwrap_or_else(|e| panic!("key '{}' rejected: {}", key, e));
        }
        last
    }

    pub fn display(&self) -> CalculatorDisplay {
        get_calculator_display(&self.state).expect("display")
    }

    // ========================================================================
    // LINEAR FORM HELPERS
    // ========================================================================

    /// Solve a form given as rows of cell text.
    pub fn linear(&self, rows: &[&[&str]]) -> Result<LinearFormResult, String> {
        solve_linear_form(&self.state, linear_request(rows))
    }
}

/// Build a form request from rows of cell text.
pub fn linear_request(rows: &[&[&str]]) -> LinearFormRequest {
    LinearFormRequest {
        size: rows.len(),
        rows: rows
            .iter()
            .map(|row| row.iter().map(|cell| cell.to_string()).collect())
            .collect(),
    }
}

/// Assert two floats agree to within 1e-9.
pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {}, got {}",
        expected,
        actual
    );
}
