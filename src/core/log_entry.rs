//! Log entry structure

use super::log_level::Level;
use super::logger::Logger;
use super::value::Value;
use chrono::{DateTime, Local};
use std::panic::Location;

/// Call site of a log statement
///
/// Frames built by the logging macros name the enclosing function, e.g.
/// `app::handlers::login`. `#[track_caller]` methods only know the source
/// location, so their frames leave `function` empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    pub file: &'static str,
    pub line: u32,
    pub column: u32,
    /// Path of the enclosing function when known, empty otherwise
    pub function: &'static str,
}

impl Frame {
    pub const fn new(file: &'static str, line: u32, column: u32, function: &'static str) -> Self {
        Self {
            file,
            line,
            column,
            function,
        }
    }

    /// Frame of the nearest caller not marked `#[track_caller]`
    #[track_caller]
    pub fn caller() -> Self {
        Location::caller().into()
    }

    #[must_use]
    pub fn with_function(mut self, function: &'static str) -> Self {
        self.function = function;
        self
    }
}

/// Strip a marker item's type name down to the function that contains it.
///
/// `marker` is the `type_name` of a nested `fn` item, such as
/// `app::run::{{closure}}::__site`. The last segment and any closure
/// segments are removed, leaving `app::run`.
#[doc(hidden)]
pub fn enclosing_function(marker: &'static str) -> &'static str {
    let mut name = match marker.rfind("::") {
        Some(end) => &marker[..end],
        None => marker,
    };
    while let Some(outer) = name.strip_suffix("::{{closure}}") {
        name = outer;
    }
    name
}

impl From<&'static Location<'static>> for Frame {
    fn from(location: &'static Location<'static>) -> Self {
        Self::new(location.file(), location.line(), location.column(), "")
    }
}

/// One in-flight log event
///
/// Entries are built by [`Logger::log`] from pooled storage and lent to
/// hooks and formatters by reference. They cannot be kept past the call:
/// the message and argument allocations go back to the pool afterwards.
#[derive(Debug)]
pub struct Entry<'a> {
    pub(crate) logger: &'a Logger,
    pub level: Level,
    pub time: DateTime<Local>,
    /// Present only when the logger captures sources
    pub frame: Option<Frame>,
    pub message: String,
    /// Prefix args, then call args, then suffix args
    pub args: Vec<Value>,
}

impl<'a> Entry<'a> {
    pub(crate) fn new(
        logger: &'a Logger,
        level: Level,
        message: String,
        args: Vec<Value>,
    ) -> Self {
        Self {
            logger,
            level,
            time: Local::now(),
            frame: None,
            message,
            args,
        }
    }

    /// The logger that produced this entry
    pub fn logger(&self) -> &'a Logger {
        self.logger
    }

    /// Iterate the argument list as key/value pairs. An unpaired final key
    /// yields `None` as its value.
    pub fn pairs(&self) -> impl Iterator<Item = (&Value, Option<&Value>)> {
        self.args.chunks(2).map(|pair| (&pair[0], pair.get(1)))
    }
}
