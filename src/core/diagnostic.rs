//! Last-resort reporting of internal failures
//!
//! Hook errors, JSON encoding failures and formatting contract violations
//! never reach the code that issued the log call. They are reported here
//! instead. The default handler writes a single line to the raw stderr
//! stream and ignores any failure to do so.

use super::error::LoggerError;
use chrono::{DateTime, Datelike, Local, Timelike};
use parking_lot::RwLock;
use std::io::{self, Write};
use std::sync::{Arc, LazyLock};

/// Receives `(context, error)` for every internal failure
pub type DiagnosticHandler = Arc<dyn Fn(&str, &LoggerError) + Send + Sync>;

static HANDLER: LazyLock<RwLock<Option<DiagnosticHandler>>> = LazyLock::new(|| RwLock::new(None));

/// Report an internal failure on the diagnostic channel
pub fn report(context: &str, error: &LoggerError) {
    let handler = HANDLER.read().clone();
    match handler {
        Some(handler) => handler(context, error),
        None => write_stderr(context, error),
    }
}

/// Replace the diagnostic handler for the whole process
pub fn set_handler(handler: DiagnosticHandler) {
    *HANDLER.write() = Some(handler);
}

/// Restore the default stderr handler
pub fn reset_handler() {
    *HANDLER.write() = None;
}

fn write_stderr(context: &str, error: &LoggerError) {
    let _ = write_line(&mut io::stderr().lock(), &Local::now(), context, error);
}

/// `[LOGGER ERROR] <rfc3339 micros> <context>: <error>`, written in place
fn write_line<W: Write>(
    out: &mut W,
    now: &DateTime<Local>,
    context: &str,
    error: &LoggerError,
) -> io::Result<()> {
    let offset = now.offset().local_minus_utc();
    let sign = if offset < 0 { '-' } else { '+' };
    let offset = offset.unsigned_abs() / 60;
    writeln!(
        out,
        "[LOGGER ERROR] {:04}-{:02}-{:02}T{:02}:{:02}:{:02}.{:06}{}{:02}:{:02} {}: {}",
        now.year(),
        now.month(),
        now.day(),
        now.hour(),
        now.minute(),
        now.second(),
        // Leap seconds carry past 1e9
        now.nanosecond() % 1_000_000_000 / 1_000,
        sign,
        offset / 60,
        offset % 60,
        context,
        error
    )
}
