//! Logger module
//!
//! Provides logging utilities for the router including:
//! - Startup and registration logging
//! - Dispatch logging with multiple formats
//! - Error and warning logging
//! - File-based logging support

mod format;
pub mod writer;

pub use format::{value_kind, DispatchLogEntry};

use crate::config::Config;
use std::path::{Path, PathBuf};

/// Log severity, lowest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Debug,
    Info,
    Warn,
    Error,
}

impl Level {
    /// Parse a level name; unknown names fall back to `Info`
    pub fn parse(level: &str) -> Self {
        match level.to_ascii_lowercase().as_str() {
            "debug" | "trace" => Self::Debug,
            "warn" | "warning" => Self::Warn,
            "error" => Self::Error,
            _ => Self::Info,
        }
    }
}

/// Initialize the logger with configuration
///
/// Should be called once at application startup.
pub fn init(config: &Config) -> std::io::Result<()> {
    writer::init(
        Level::parse(&config.logging.level),
        config.logging.log_file.as_deref(),
        config.logging.error_log_file.as_deref(),
    )
}

fn enabled(level: Level) -> bool {
    level >= writer::get().map_or(Level::Info, writer::LogWriter::level)
}

/// Write to info log
fn write_info(message: &str) {
    match writer::get() {
        Some(w) => w.write_info(message),
        None => println!("{message}"),
    }
}

/// Write to error log
fn write_error(message: &str) {
    match writer::get() {
        Some(w) => w.write_error(message),
        None => eprintln!("{message}"),
    }
}

pub fn log_debug(message: &str) {
    if enabled(Level::Debug) {
        write_info(&format!("[DEBUG] {message}"));
    }
}

pub fn log_info(message: &str) {
    if enabled(Level::Info) {
        write_info(message);
    }
}

pub fn log_warning(message: &str) {
    if enabled(Level::Warn) {
        write_error(&format!("[WARN] {message}"));
    }
}

pub fn log_error(message: &str) {
    write_error(&format!("[ERROR] {message}"));
}

fn log_at(level: Level, message: &str) {
    match level {
        Level::Debug => log_debug(message),
        Level::Info => log_info(message),
        Level::Warn => log_warning(message),
        Level::Error => log_error(message),
    }
}

pub fn log_startup(theme_dir: &Path, routes_file: &Path, config: &Config) {
    log_info("======================================");
    log_info("Template router starting");
    log_info(&format!("Theme directory: {}", theme_dir.display()));
    log_info(&format!("Routes file: {}", routes_file.display()));
    log_info(&format!("Dispatch mode: {}", config.dispatch.mode));
    log_info(&format!("Log level: {}", config.logging.level));
    if let Some(ref path) = config.logging.log_file {
        log_info(&format!("Log file: {path}"));
    }
    if let Some(ref path) = config.logging.error_log_file {
        log_info(&format!("Error log: {path}"));
    }
    log_info("======================================");
}

pub fn log_startup_skipped(flag: &str) {
    log_info(&format!(
        "[Startup] {flag} is set, skipping route registration"
    ));
}

pub fn log_startup_complete(routes: usize, handlers: usize) {
    log_info(&format!(
        "[Startup] Ready: {routes} route(s), {handlers} handler type(s)"
    ));
}

pub fn log_handler_sources(dir: &Path, files: &[PathBuf]) {
    log_info(&format!(
        "[Handlers] {} source file(s) in {}",
        files.len(),
        dir.display()
    ));
    for file in files {
        log_debug(&format!("[Handlers]   {}", file.display()));
    }
}

pub fn log_route_registered(slug: &str, handler: &str, method: &str, replaced: bool) {
    let (level, message) = route_registered(slug, handler, method, replaced);
    log_at(level, &message);
}

/// Level and line for a route registration; overwrites are not warnings
fn route_registered(slug: &str, handler: &str, method: &str, replaced: bool) -> (Level, String) {
    let message = if replaced {
        format!("[Route] {slug} re-registered, now {handler}@{method}")
    } else {
        format!("[Route] {slug} -> {handler}@{method}")
    };
    (Level::Debug, message)
}

pub fn log_route_ignored(slug: &str, reason: &impl std::fmt::Display) {
    log_debug(&format!("[Route] Ignored '{slug}': {reason}"));
}

pub fn log_routes_file_missing(path: &Path) {
    log_warning(&format!(
        "Routes file {} not found, no routes registered",
        path.display()
    ));
}

pub fn log_pass_through(template: &Path, reason: &str) {
    log_debug(&format!(
        "[Dispatch] Pass-through {}: {reason}",
        template.display()
    ));
}

/// Log formatted dispatch log entry
pub fn log_dispatch(entry: &DispatchLogEntry, format: &str) {
    log_info(&entry.format(format));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_parse() {
        assert_eq!(Level::parse("debug"), Level::Debug);
        assert_eq!(Level::parse("WARN"), Level::Warn);
        assert_eq!(Level::parse("error"), Level::Error);
        assert_eq!(Level::parse("info"), Level::Info);
        assert_eq!(Level::parse("verbose"), Level::Info);
    }

    #[test]
    fn test_route_overwrite_logged_at_debug() {
        let (level, message) = route_registered("index", "IndexHelper", "main", true);
        assert_eq!(level, Level::Debug);
        assert_eq!(message, "[Route] index re-registered, now IndexHelper@main");

        let (level, message) = route_registered("index", "IndexHelper", "main", false);
        assert_eq!(level, Level::Debug);
        assert_eq!(message, "[Route] index -> IndexHelper@main");
    }

    #[test]
    fn test_level_order() {
        assert!(Level::Debug < Level::Info);
        assert!(Level::Warn < Level::Error);
    }
}
