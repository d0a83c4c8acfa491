//! FILENAME: app/src/logging.rs
// PURPOSE: Unified logging system for the application.
// CONTEXT: App code logs through the log_* macros below; the core crates log
//          through the `log` facade, which `init_logger` routes into the same
//          writer so every line shares one sequence counter.

use std::fs::File;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Mutex;

use log::{Level, LevelFilter, Log, Metadata, Record};
use once_cell::sync::Lazy;

// ============================================================================
// UNIFIED LOGGING SYSTEM
// ============================================================================

/// Global sequence counter
static LOG_SEQ: AtomicU64 = AtomicU64::new(0);

/// Global log file handle
pub static LOG_FILE: Lazy<Mutex<Option<File>>> = Lazy::new(|| Mutex::new(None));

/// Cached log path
static LOG_PATH: Lazy<Mutex<Option<PathBuf>>> = Lazy::new(|| Mutex::new(None));

/// Whether log lines are echoed to stderr
static LOG_ECHO: AtomicBool = AtomicBool::new(false);

/// Get next sequence number
pub fn next_seq() -> u64 {
    LOG_SEQ.fetch_add(1, Ordering::SeqCst) + 1
}

/// Path of the active log file, if one was initialized.
pub fn get_log_path() -> Option<PathBuf> {
    LOG_PATH.lock().ok().and_then(|guard| guard.clone())
}

/// Initialize the unified log file (truncated on open).
pub fn init_log_file(path: &Path) -> Result<PathBuf, String> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        if !dir.exists() {
            std::fs::create_dir_all(dir)
                .map_err(|e| format!("Failed to create log dir at {:?}: {}", dir, e))?;
        }
    }

    let file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
        .map_err(|e| format!("Failed to create log file {:?}: {}", path, e))?;

    let mut log_file = LOG_FILE.lock().map_err(|e| format!("Lock error: {}", e))?;
    *log_file = Some(file);

    if let Ok(mut guard) = LOG_PATH.lock() {
        *guard = Some(path.to_path_buf());
    }

    Ok(path.to_path_buf())
}

/// Turns stderr echo of log lines on or off.
pub fn set_console_echo(enabled: bool) {
    LOG_ECHO.store(enabled, Ordering::SeqCst);
}

/// True when a line at the given level letter passes the global max level.
pub fn level_enabled(level: &str) -> bool {
    match letter_level(level) {
        Some(level) => level <= log::max_level(),
        None => true,
    }
}

/// Write a log line in unified format
pub fn write_log(level: &str, category: &str, message: &str) {
    if !level_enabled(level) {
        return;
    }

    let seq = next_seq();
    let line = format!("{}|{}|{}|{}", seq, level, category, message);

    if let Ok(mut guard) = LOG_FILE.lock() {
        if let Some(ref mut file) = *guard {
            if let Err(e) = writeln!(file, "{}", line) {
                eprintln!("[LOG_ERROR] Failed to write: {}", e);
            }
            let _ = file.flush();
        }
    }

    if LOG_ECHO.load(Ordering::SeqCst) {
        eprintln!("{}", line);
    }
}

/// Write an ENTER log line for function entry
pub fn write_log_enter(level: &str, category: &str, func_name: &str, params: &str) {
    let message = if params.is_empty() {
        format!("ENTER {}", func_name)
    } else {
        format!("ENTER {} {}", func_name, params)
    };
    write_log(level, category, &message);
}

/// Write an EXIT log line for function exit
pub fn write_log_exit(level: &str, category: &str, func_name: &str, result: &str) {
    let message = if result.is_empty() {
        format!("EXIT {}", func_name)
    } else {
        format!("EXIT {} {}", func_name, result)
    };
    write_log(level, category, &message);
}

fn letter_level(letter: &str) -> Option<Level> {
    match letter {
        "E" => Some(Level::Error),
        "W" => Some(Level::Warn),
        "I" => Some(Level::Info),
        "D" => Some(Level::Debug),
        "T" => Some(Level::Trace),
        _ => None,
    }
}

fn level_letter(level: Level) -> &'static str {
    match level {
        Level::Error => "E",
        Level::Warn => "W",
        Level::Info => "I",
        Level::Debug => "D",
        Level::Trace => "T",
    }
}

// ============================================================================
// LOG FACADE BRIDGE
// ============================================================================

/// Routes `log` records from the core crates into the unified writer.
struct UnifiedLogger;

static LOGGER: UnifiedLogger = UnifiedLogger;

impl Log for UnifiedLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        write_log(
            level_letter(record.level()),
            &target_category(record.target()),
            &record.args().to_string(),
        );
    }

    fn flush(&self) {
        if let Ok(mut guard) = LOG_FILE.lock() {
            if let Some(ref mut file) = *guard {
                let _ = file.flush();
            }
        }
    }
}

/// "linear_solver::gaussian" -> "LINEAR_SOLVER"
pub fn target_category(target: &str) -> String {
    target
        .split("::")
        .next()
        .unwrap_or(target)
        .to_uppercase()
}

/// Installs the facade bridge and sets the global max level.
/// A second call only updates the level.
pub fn init_logger(level: LevelFilter) {
    if log::set_logger(&LOGGER).is_err() {
        write_log("D", "SYS", "Logger already installed");
    }
    log::set_max_level(level);
}

// ============================================================================
// MACRO DEFINITIONS & EXPORTS
// ============================================================================

#[macro_export]
macro_rules! log_debug {
    ($cat:expr, $($arg:tt)*) => {
        $crate::logging::write_log("D", $cat, &format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_info {
    ($cat:expr, $($arg:tt)*) => {
        $crate::logging::write_log("I", $cat, &format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_warn {
    ($cat:expr, $($arg:tt)*) => {
        $crate::logging::write_log("W", $cat, &format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_error {
    ($cat:expr, $($arg:tt)*) => {
        $crate::logging::write_log("E", $cat, &format!($($arg)*))
    };
}

// ENTER/EXIT macros for function tracing

#[macro_export]
macro_rules! log_enter {
    ($cat:expr, $func:expr) => {
        $crate::logging::write_log_enter("D", $cat, $func, "")
    };
    ($cat:expr, $func:expr, $($arg:tt)*) => {
        $crate::logging::write_log_enter("D", $cat, $func, &format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_exit {
    ($cat:expr, $func:expr) => {
        $crate::logging::write_log_exit("D", $cat, $func, "")
    };
    ($cat:expr, $func:expr, $($arg:tt)*) => {
        $crate::logging::write_log_exit("D", $cat, $func, &format!($($arg)*))
    };
}

pub use log_debug;
pub use log_enter;
pub use log_error;
pub use log_exit;
pub use log_info;
pub use log_warn;
