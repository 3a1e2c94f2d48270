#![deny(missing_docs)]
//! Shared logging utilities for the watcher workspace.
//!
//! This crate provides the `watch_*` logging macros used across the codebase,
//! the logger initialization used by the CLI and a minimal test initializer.
//!
//! Every macro accepts an optional `job = <id>;` prefix that tags the line
//! with the job being watched:
//!
//! ```ignore
//! watch_info!(job = request.job_id; "poll {} returned {:?}", n, status);
//! ```

use std::fs::File;
use std::path::Path;

#[doc(hidden)]
pub use log;
pub use log::LevelFilter;

use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};

/// Logs a trace-level message using the global logging facade.
#[macro_export]
macro_rules! watch_trace {
    (job = $job:expr; $($arg:tt)+) => {{
        $crate::log::trace!("[job {}] {}", $job, format_args!($($arg)+));
    }};
    ($($arg:tt)+) => {{
        $crate::log::trace!($($arg)+);
    }};
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! watch_debug {
    (job = $job:expr; $($arg:tt)+) => {{
        $crate::log::debug!("[job {}] {}", $job, format_args!($($arg)+));
    }};
    ($($arg:tt)+) => {{
        $crate::log::debug!($($arg)+);
    }};
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! watch_info {
    (job = $job:expr; $($arg:tt)+) => {{
        $crate::log::info!("[job {}] {}", $job, format_args!($($arg)+));
    }};
    ($($arg:tt)+) => {{
        $crate::log::info!($($arg)+);
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! watch_warn {
    (job = $job:expr; $($arg:tt)+) => {{
        $crate::log::warn!("[job {}] {}", $job, format_args!($($arg)+));
    }};
    ($($arg:tt)+) => {{
        $crate::log::warn!($($arg)+);
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! watch_error {
    (job = $job:expr; $($arg:tt)+) => {{
        $crate::log::error!("[job {}] {}", $job, format_args!($($arg)+));
    }};
    ($($arg:tt)+) => {{
        $crate::log::error!($($arg)+);
    }};
}

/// Destination for log output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogDestination {
    /// Write to the log file only.
    File,
    /// Write to the terminal (stderr for warnings and errors).
    Terminal,
    /// Write to both file and terminal.
    Both,
}

/// Initialize the global logger.
///
/// `log_path` is only used for `LogDestination::File` and `Both`. When the
/// file cannot be created the file logger is skipped with a warning on
/// stderr. Calling this twice is harmless; the second call is ignored.
pub fn initialize(destination: LogDestination, level: LevelFilter, log_path: &Path) {
    let config = build_config();

    let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::new();
    if matches!(destination, LogDestination::Terminal | LogDestination::Both) {
        loggers.push(TermLogger::new(
            level,
            config.clone(),
            TerminalMode::Mixed,
            ColorChoice::Auto,
        ));
    }
    if matches!(destination, LogDestination::File | LogDestination::Both) {
        if let Some(file_logger) = create_file_logger(level, config, log_path) {
            loggers.push(file_logger);
        }
    }
    if loggers.is_empty() {
        return;
    }

    let _ = CombinedLogger::init(loggers);
}

/// Initializes a simple terminal logger for use in unit tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    let level = if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}

fn build_config() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .build()
}

fn create_file_logger(
    level: LevelFilter,
    config: Config,
    log_path: &Path,
) -> Option<Box<WriteLogger<File>>> {
    match File::create(log_path) {
        Ok(file) => Some(WriteLogger::new(level, config, file)),
        Err(err) => {
            eprintln!("Warning: Could not create log file at {:?}: {}", log_path, err);
            None
        }
    }
}
