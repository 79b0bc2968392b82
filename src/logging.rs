// logging.rs
// Simple logging utility for the scratch game engine.
// Everything goes to stderr: stdout is reserved for the JSON result.

use std::sync::atomic::{AtomicU8, Ordering};

use chrono::Local;

/// Log level enum, ordered from most to least verbose
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Info = 0,
    Warning = 1,
    Error = 2,
    Off = 3,
}

static MAX_LEVEL: AtomicU8 = AtomicU8::new(LogLevel::Info as u8);

impl LogLevel {
    fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
            LogLevel::Off => "OFF",
        }
    }

    /// Parse a level name as written in the settings file
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "info" => Some(LogLevel::Info),
            "warning" | "warn" => Some(LogLevel::Warning),
            "error" => Some(LogLevel::Error),
            "off" | "none" => Some(LogLevel::Off),
            _ => None,
        }
    }
}

/// Set the lowest level that still gets printed
pub fn set_level(level: LogLevel) {
    MAX_LEVEL.store(level as u8, Ordering::Relaxed);
}

/// Currently applied threshold
pub fn level() -> LogLevel {
    match MAX_LEVEL.load(Ordering::Relaxed) {
        0 => LogLevel::Info,
        1 => LogLevel::Warning,
        2 => LogLevel::Error,
        _ => LogLevel::Off,
    }
}

fn enabled(level: LogLevel) -> bool {
    level != LogLevel::Off && level as u8 >= MAX_LEVEL.load(Ordering::Relaxed)
}

/// Format a log line with timestamp
fn format_line(level: LogLevel, message: &str) -> String {
    let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
    format!("{} - {} - {}", timestamp, level.as_str(), message)
}

/// Print a log message to stderr if its level is enabled
pub fn log_message(level: LogLevel, message: &str) {
    if enabled(level) {
        eprintln!("{}", format_line(level, message));
    }
}

/// Log an info message
pub fn log_info(message: &str) {
    log_message(LogLevel::Info, message);
}

/// Log a warning message
pub fn log_warning(message: &str) {
    log_message(LogLevel::Warning, message);
}

/// Log an error message
pub fn log_error(message: &str) {
    log_message(LogLevel::Error, message);
}
