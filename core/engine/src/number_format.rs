//! FILENAME: core/engine/src/number_format.rs
//! PURPOSE: Conversion between calculator values and their display strings.
//! CONTEXT: The display buffer is the single source of truth for the current
//! operand, so every computed value passes through `format_display` and every
//! operand read passes through `parse_display`. The equation parser reuses
//! `format_display` for its answers so both surfaces print numbers alike.
//!
//! RULES:
//! - NaN displays as the error sentinel
//! - +/- infinity displays as a signed infinity sentinel
//! - Integral values print without a decimal point
//! - Everything else is rounded to at most 8 fractional digits, trailing zeros trimmed

/// Display text for a NaN result.
pub const ERROR_SENTINEL: &str = "Error";

/// Display text for a positive infinite result (negative gets a leading '-').
pub const INFINITY_SENTINEL: &str = "Infinity";

/// Maximum number of fractional digits shown for non-integral values.
pub const MAX_FRACTION_DIGITS: usize = 8;

/// Format a value for the calculator display.
pub fn format_display(value: f64) -> String {
    if value.is_nan() {
        return ERROR_SENTINEL.to_string();
    }

    if value.is_infinite() {
        return if value > 0.0 {
            INFINITY_SENTINEL.to_string()
        } else {
            format!("-{}", INFINITY_SENTINEL)
        };
    }

    // Covers -0.0 as well, which would otherwise print as "-0"
    if value == 0.0 {
        return "0".to_string();
    }

    if value.fract() == 0.0 {
        return format!("{:.0}", value);
    }

    let rounded = format!("{:.prec$}", value, prec = MAX_FRACTION_DIGITS);
    let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');

    // Tiny magnitudes round away to nothing
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Read a display string back into a value.
/// Sentinels map back to NaN / infinity; a dangling exponent marker
/// (e.g. "1.5e" while the user is still typing) counts as an exponent of zero.
pub fn parse_display(text: &str) -> f64 {
    match text {
        ERROR_SENTINEL => return f64::NAN,
        INFINITY_SENTINEL => return f64::INFINITY,
        _ => {}
    }
    if text.strip_prefix('-') == Some(INFINITY_SENTINEL) {
        return f64::NEG_INFINITY;
    }

    let cleaned = text.trim_end_matches(['e', '-']);
    match cleaned {
        "" | "." | "-" | "-." => 0.0,
        _ => cleaned.parse::<f64>().unwrap_or(f64::NAN),
    }
}

/// True when the text is one of the sentinel strings rather than a number.
pub fn is_sentinel(text: &str) -> bool {
    text == ERROR_SENTINEL
        || text == INFINITY_SENTINEL
        || text.strip_prefix('-') == Some(INFINITY_SENTINEL)
}
