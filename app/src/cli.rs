//! FILENAME: app/src/cli.rs
// PURPOSE: `calcula` command line: solve equation text, press calculator keys,
//          or solve the N-variable linear form.

use std::io::Read;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::api_types::{
    CalculatorDisplay, EquationSolutionData, LinearFormRequest, LinearFormResult,
};
use crate::calculator::press_keys;
use crate::config::{load_config, load_config_from, AppConfig};
use crate::equation::solve_equation_text;
use crate::linear_form::solve_linear_form;
use crate::logging::{init_log_file, init_logger, set_console_echo};
use crate::{create_app_state_with, log_info};

#[derive(Parser, Debug)]
#[command(
    name = "calcula",
    version,
    about = "Scientific calculator and step-by-step equation solver"
)]
pub struct Cli {
    /// Config file (overrides $CALCULA_CONFIG)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Solve equation text; reads stdin when TEXT is omitted
    Solve {
        text: Option<String>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Press calculator keys in order, e.g. `calc 2 + 3 × 4 =`
    Calc {
        #[arg(required = true, allow_hyphen_values = true)]
        tokens: Vec<String>,
    },

    /// Solve N equations in N unknowns from N*(N+1) cells, row by row
    Linear {
        /// Number of unknowns (2 or 3)
        #[arg(short, long)]
        size: usize,

        #[arg(required = true, allow_hyphen_values = true)]
        cells: Vec<String>,
    },
}

/// Runs one parsed command and returns what to print.
pub fn execute(cli: Cli) -> Result<String, String> {
    let config = match &cli.config {
        Some(path) => load_config_from(path),
        None => load_config(),
    }
    .map_err(|e| e.to_string())?;

    init_logging(&config);
    log_info!("SYS", "calcula starting: {:?}", cli.command);

    let state = create_app_state_with(config);
    match cli.command {
        Commands::Solve { text, json } => {
            let text = match text {
                Some(text) => text,
                None => read_stdin()?,
            };
            let data = solve_equation_text(&text);
            if json {
                serde_json::to_string_pretty(&data).map_err(|e| e.to_string())
            } else {
                Ok(render_solution(&data))
            }
        }
        Commands::Calc { tokens } => {
            let display = press_keys(&state, &tokens)?;
            Ok(render_display(&display))
        }
        Commands::Linear { size, cells } => {
            let request = linear_request(size, cells)?;
            let result = solve_linear_form(&state, request)?;
            Ok(render_linear(&result))
        }
    }
}

fn init_logging(config: &AppConfig) {
    set_console_echo(config.logging.echo);
    if let Some(path) = &config.logging.file {
        if let Err(e) = init_log_file(path) {
            eprintln!("[LOG_INIT] FAILED: {}", e);
        }
    }
    init_logger(config.logging.level_filter());
}

fn read_stdin() -> Result<String, String> {
    let mut text = String::new();
    std::io::stdin()
        .read_to_string(&mut text)
        .map_err(|e| format!("Failed to read stdin: {}", e))?;
    Ok(text)
}

/// Splits a flat cell list into rows of size + 1.
pub fn linear_request(size: usize, cells: Vec<String>) -> Result<LinearFormRequest, String> {
    let width = size + 1;
    if cells.len() != size * width {
        return Err(format!(
            "Expected {} cells for {} unknowns, got {}",
            size * width,
            size,
            cells.len()
        ));
    }
    let rows = cells.chunks(width).map(|row| row.to_vec()).collect();
    Ok(LinearFormRequest { size, rows })
}

pub fn render_solution(data: &EquationSolutionData) -> String {
    let mut out = format!(
        "Input: {}\nType: {}\n",
        data.normalized.replace('\n', "; "),
        data.category
    );
    for (i, step) in data.steps.iter().enumerate() {
        out.push_str(&format!("{:>2}. {}\n", i + 1, step));
    }
    out.push_str(&format!("Answer: {}", data.answer));
    out
}

pub fn render_display(display: &CalculatorDisplay) -> String {
    let mut flags = vec![display.angle_mode.clone()];
    if display.inverse_mode {
        flags.push("2nd".to_string());
    }
    if display.memory_active {
        flags.push("M".to_string());
    }
    format!("{}\n{}\n[{}]", display.history, display.display, flags.join(" "))
}

pub fn render_linear(result: &LinearFormResult) -> String {
    result
        .variables
        .iter()
        .map(|v| format!("{} = {}", v.name, v.display))
        .collect::<Vec<_>>()
        .join("\n")
}
