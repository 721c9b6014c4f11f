//! Process-wide defaults and free logging functions
//!
//! Holds the fallback configuration used when a [`Logger`] has no formatter
//! or output of its own, plus a shared default logger for the free
//! functions. Everything is initialized lazily on first use to a
//! `TextFormatter` writing to stdout and a `Logger::new()` default logger.
//!
//! # Thread Safety
//!
//! All functions here may be called from any thread at any time. Readers
//! take a short read lock to clone an `Arc` and release it before logging,
//! so a hook may itself replace a default without deadlocking. Loggers
//! already holding their own formatter or output are unaffected by changes.
//!
//! # Gating
//!
//! [`debug`], [`info`], [`warn`] and [`error`] forward to the default
//! logger's [`Logger::log`] and therefore ignore its level threshold. Use
//! [`default_logger`] and the leveled methods for threshold filtering.

use crate::core::{Formatter, Level, Logger, Sink, Value};
use crate::formatters::TextFormatter;
use parking_lot::RwLock;
use std::io;
use std::sync::{Arc, LazyLock};

struct Defaults {
    logger: Arc<Logger>,
    formatter: Arc<dyn Formatter>,
    output: Arc<dyn Sink>,
}

impl Defaults {
    fn new() -> Self {
        Self {
            logger: Arc::new(Logger::new()),
            formatter: Arc::new(TextFormatter::new()),
            output: Arc::new(io::stdout()),
        }
    }
}

static DEFAULTS: LazyLock<RwLock<Defaults>> = LazyLock::new(|| RwLock::new(Defaults::new()));

pub fn default_logger() -> Arc<Logger> {
    Arc::clone(&DEFAULTS.read().logger)
}

pub fn set_default_logger(logger: Logger) {
    DEFAULTS.write().logger = Arc::new(logger);
}

pub fn default_formatter() -> Arc<dyn Formatter> {
    Arc::clone(&DEFAULTS.read().formatter)
}

pub fn set_default_formatter<F: Formatter + 'static>(formatter: F) {
    DEFAULTS.write().formatter = Arc::new(formatter);
}

pub fn default_output() -> Arc<dyn Sink> {
    Arc::clone(&DEFAULTS.read().output)
}

pub fn set_default_output<S: Sink + 'static>(sink: S) {
    DEFAULTS.write().output = Arc::new(sink);
}

/// Restore the initial defaults
pub fn reset_defaults() {
    *DEFAULTS.write() = Defaults::new();
}

/// Log through the default logger without checking its threshold
///
/// The recorded frame carries `file:line` only, like [`Logger::log`].
#[track_caller]
pub fn debug<I: IntoIterator<Item = Value>>(message: &str, args: I) {
    default_logger().log(Level::DEBUG, message, args);
}

#[track_caller]
pub fn info<I: IntoIterator<Item = Value>>(message: &str, args: I) {
    default_logger().log(Level::INFO, message, args);
}

#[track_caller]
pub fn warn<I: IntoIterator<Item = Value>>(message: &str, args: I) {
    default_logger().log(Level::WARN, message, args);
}

#[track_caller]
pub fn error<I: IntoIterator<Item = Value>>(message: &str, args: I) {
    default_logger().log(Level::ERROR, message, args);
}
