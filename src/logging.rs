// logging.rs
// Timestamped console logging for the player client

use std::sync::atomic::{AtomicBool, Ordering};

use chrono::Local;

static VERBOSE: AtomicBool = AtomicBool::new(false);

/// Log level enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
}

impl LogLevel {
    fn as_str(self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
        }
    }
}

/// Enable or disable debug and info output
pub fn set_verbose(enabled: bool) {
    VERBOSE.store(enabled, Ordering::Relaxed);
}

#[must_use]
pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::Relaxed)
}

fn format_line(level: LogLevel, message: &str) -> String {
    let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
    format!("{} - {} - {}", timestamp, level.as_str(), message)
}

/// Format and print a log message with timestamp.
/// Debug and info lines only show up in verbose mode, warnings and errors go to stderr.
pub fn log_message(level: LogLevel, message: &str) {
    match level {
        LogLevel::Debug | LogLevel::Info => {
            if is_verbose() {
                println!("{}", format_line(level, message));
            }
        }
        LogLevel::Warning | LogLevel::Error => eprintln!("{}", format_line(level, message)),
    }
}

pub fn log_debug(message: &str) {
    log_message(LogLevel::Debug, message);
}

pub fn log_info(message: &str) {
    log_message(LogLevel::Info, message);
}

pub fn log_warning(message: &str) {
    log_message(LogLevel::Warning, message);
}

pub fn log_error(message: &str) {
    log_message(LogLevel::Error, message);
}
