//! FILENAME: core/parser/src/classify.rs
//! PURPOSE: Entry point that picks an equation family for normalized text.
//! CONTEXT: Families are tried in a fixed order and the first successful
//! parse wins. A family whose gate matches but whose extraction fails does
//! not end the search; the next family gets its turn.
//!
//! ORDER:
//! 1. 2 or 3 lines, each with exactly one '='  -> linear system
//! 2. '=' and ("x^2" or "(..)(..)=0")           -> quadratic
//! 3. 'x' and '='                               -> single linear
//! 4. otherwise                                 -> unrecognized

use crate::equation::{ParseOutcome, ParsedEquation};
use crate::linear::{parse_linear_system, parse_single_linear};
use crate::normalize::normalize;
use crate::quadratic::{is_factored, parse_quadratic};

/// Normalizes, classifies and solves one text blob.
pub fn parse(raw: &str) -> ParseOutcome {
    let normalized = normalize(raw);
    match classify(&normalized) {
        Some(equation) => ParseOutcome::Recognized { normalized, equation },
        None => {
            log::debug!("no equation family matched '{}'", normalized);
            ParseOutcome::Unrecognized { normalized }
        }
    }
}

fn classify(normalized: &str) -> Option<ParsedEquation> {
    let lines: Vec<&str> = normalized.lines().collect();

    if (2..=3).contains(&lines.len()) && lines.iter().all(|l| l.matches('=').count() == 1) {
        match parse_linear_system(&lines) {
            Ok(equation) => return Some(equation),
            Err(e) => log::debug!("linear system attempt failed: {}", e),
        }
    }

    let flat = lines.concat();

    if flat.contains('=') && (flat.contains("x^2") || is_factored(&flat)) {
        match parse_quadratic(&flat) {
            Ok(equation) => return Some(equation),
            Err(e) => log::debug!("quadratic attempt failed: {}", e),
        }
    }

    if flat.contains('x') && flat.contains('=') {
        match parse_single_linear(&flat) {
            Ok(equation) => return Some(equation),
            Err(e) => log::debug!("single linear attempt failed: {}", e),
        }
    }

    None
}
