//! FILENAME: app/src/lib.rs
// PURPOSE: Main library entry point (command layer).
// CONTEXT: Holds the calculator session and configuration, and exposes the
//          commands the UI and the command line call into.

use std::sync::Mutex;

use calc_engine::{Calculator, RandomSource};

pub mod analysis;
pub mod api_types;
pub mod calculator;
pub mod cli;
pub mod config;
pub mod equation;
pub mod linear_form;
pub mod logging;

pub use analysis::{
    analyze_photo, decode_analysis_response, lookup_credential, solve_photo_text,
    AnalysisError, PhotoAnalysis, PhotoAnalyzer, TextRecognizer,
};
pub use api_types::{
    CalculatorDisplay, EquationSolutionData, LinearFormRequest, LinearFormResult, VariableValue,
};
pub use calculator::{get_calculator_display, get_clear_label, press_key, press_keys};
pub use config::{load_config, load_config_from, AppConfig, ConfigError};
pub use equation::solve_equation_text;
pub use linear_form::{solve_linear_form, NO_UNIQUE_SOLUTION};
pub use logging::{get_log_path, init_log_file, init_logger, next_seq, write_log};

// ============================================================================
// APPLICATION STATE
// ============================================================================

pub struct AppState {
    /// The interactive calculator session.
    pub calculator: Mutex<Calculator>,
    pub config: AppConfig,
}

pub fn create_app_state() -> AppState {
    create_app_state_with(AppConfig::default())
}

pub fn create_app_state_with(config: AppConfig) -> AppState {
    create_app_state_with_calculator(config, Calculator::new())
}

/// State with an injected random source, for deterministic sessions.
pub fn create_app_state_with_random(
    config: AppConfig,
    random: Box<dyn RandomSource>,
) -> AppState {
    create_app_state_with_calculator(config, Calculator::with_random(random))
}

fn create_app_state_with_calculator(config: AppConfig, mut calculator: Calculator) -> AppState {
    log_info!(
        "SYS",
        "Creating AppState (angle mode {})",
        config.calculator.angle_mode.label()
    );
    calculator.set_angle_mode(config.calculator.angle_mode);
    AppState {
        calculator: Mutex::new(calculator),
        config,
    }
}

// ============================================================================
// ENTRY POINT
// ============================================================================

pub fn run() {
    use clap::Parser;

    let cli = cli::Cli::parse();
    match cli::execute(cli) {
        Ok(output) => println!("{}", output),
        Err(e) => {
            log_error!("SYS", "{}", e);
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    }
}
