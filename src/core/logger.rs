//! Main logger implementation
//!
//! Every call runs the whole pipeline on the caller's thread:
//!
//! ```text
//! gate -> acquire -> assemble -> capture frame -> entry hooks -> format
//!      -> before hooks -> write -> after hooks -> release
//! ```
//!
//! Nothing from the pipeline is returned to the caller. Hook and encoding
//! failures go to the [diagnostic](super::diagnostic) channel, sink write
//! errors are dropped.

use super::{
    diagnostic,
    error::Result,
    formatter::Formatter,
    log_entry::{Entry, Frame},
    log_level::Level,
    pool::{BUFFER_POOL, ENTRY_POOL},
    sink::Sink,
    value::Value,
};
use crate::global;
use std::fmt;
use std::sync::Arc;

/// Runs on a built entry before it is formatted; may modify it
pub type EntryHook = Box<dyn Fn(Level, &mut Entry<'_>) -> Result<()> + Send + Sync>;

/// Runs on the formatted bytes, before or after the sink write
pub type OutputHook = Box<dyn Fn(Level, &[u8]) -> Result<()> + Send + Sync>;

/// Logger configuration and entry points
///
/// Configuration methods take `&mut self`; set a logger up first, then share
/// it (for example behind an `Arc`). Fields are read, not copied, on each
/// call. Unset output and formatter fall back to the process-wide defaults
/// in [`crate::global`].
pub struct Logger {
    level: Level,
    add_source: bool,
    output: Option<Arc<dyn Sink>>,
    entry_hooks: Vec<EntryHook>,
    before_hooks: Vec<OutputHook>,
    after_hooks: Vec<OutputHook>,
    formatter: Option<Arc<dyn Formatter>>,
    prefix_args: Vec<Value>,
    suffix_args: Vec<Value>,
}

impl Logger {
    #[must_use]
    pub fn new() -> Self {
        Self {
            level: Level::DEBUG,
            add_source: false,
            output: None,
            entry_hooks: Vec::new(),
            before_hooks: Vec::new(),
            after_hooks: Vec::new(),
            formatter: None,
            prefix_args: Vec::new(),
            suffix_args: Vec::new(),
        }
    }

    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn set_level(&mut self, level: Level) {
        self.level = level;
    }

    pub fn add_source(&self) -> bool {
        self.add_source
    }

    pub fn set_add_source(&mut self, add_source: bool) {
        self.add_source = add_source;
    }

    pub fn set_output<S: Sink + 'static>(&mut self, sink: S) {
        self.output = Some(Arc::new(sink));
    }

    /// Fall back to the process-wide default sink
    pub fn clear_output(&mut self) {
        self.output = None;
    }

    pub fn set_formatter<F: Formatter + 'static>(&mut self, formatter: F) {
        self.formatter = Some(Arc::new(formatter));
    }

    /// Fall back to the process-wide default formatter
    pub fn clear_formatter(&mut self) {
        self.formatter = None;
    }

    pub fn add_entry_hook<F>(&mut self, hook: F)
    where
        F: Fn(Level, &mut Entry<'_>) -> Result<()> + Send + Sync + 'static,
    {
        self.entry_hooks.push(Box::new(hook));
    }

    pub fn add_before_hook<F>(&mut self, hook: F)
    where
        F: Fn(Level, &[u8]) -> Result<()> + Send + Sync + 'static,
    {
        self.before_hooks.push(Box::new(hook));
    }

    pub fn add_after_hook<F>(&mut self, hook: F)
    where
        F: Fn(Level, &[u8]) -> Result<()> + Send + Sync + 'static,
    {
        self.after_hooks.push(Box::new(hook));
    }

    pub fn prefix_args(&self) -> &[Value] {
        &self.prefix_args
    }

    pub fn suffix_args(&self) -> &[Value] {
        &self.suffix_args
    }

    pub fn set_prefix_args<I: IntoIterator<Item = Value>>(&mut self, args: I) {
        self.prefix_args = args.into_iter().map(Value::into_shared).collect();
    }

    pub fn set_suffix_args<I: IntoIterator<Item = Value>>(&mut self, args: I) {
        self.suffix_args = args.into_iter().map(Value::into_shared).collect();
    }

    pub fn push_prefix_arg(&mut self, arg: impl Into<Value>) {
        self.prefix_args.push(arg.into().into_shared());
    }

    pub fn push_suffix_arg(&mut self, arg: impl Into<Value>) {
        self.suffix_args.push(arg.into().into_shared());
    }

    /// Whether the leveled methods emit at `level`
    #[inline]
    pub fn enabled(&self, level: Level) -> bool {
        self.level.admits(level)
    }

    /// Log at debug level when the threshold admits it
    ///
    /// With source capture on, the leveled methods record `file:line` of the
    /// caller only. Use [`debug!`](crate::debug) and the other macros to also
    /// record the enclosing function.
    #[inline]
    #[track_caller]
    pub fn debug<I: IntoIterator<Item = Value>>(&self, message: &str, args: I) {
        if self.enabled(Level::DEBUG) {
            self.log(Level::DEBUG, message, args);
        }
    }

    #[inline]
    #[track_caller]
    pub fn info<I: IntoIterator<Item = Value>>(&self, message: &str, args: I) {
        if self.enabled(Level::INFO) {
            self.log(Level::INFO, message, args);
        }
    }

    #[inline]
    #[track_caller]
    pub fn warn<I: IntoIterator<Item = Value>>(&self, message: &str, args: I) {
        if self.enabled(Level::WARN) {
            self.log(Level::WARN, message, args);
        }
    }

    #[inline]
    #[track_caller]
    pub fn error<I: IntoIterator<Item = Value>>(&self, message: &str, args: I) {
        if self.enabled(Level::ERROR) {
            self.log(Level::ERROR, message, args);
        }
    }

    /// Log at `level` without checking the threshold
    ///
    /// Gating belongs to the leveled methods; this always runs the pipeline.
    /// The captured frame has no function name.
    #[track_caller]
    pub fn log<I: IntoIterator<Item = Value>>(&self, level: Level, message: &str, args: I) {
        let frame = if self.add_source {
            Some(Frame::caller())
        } else {
            None
        };
        self.emit(level, frame, message, args);
    }

    /// Log at `level` attributing the entry to `frame`, without checking the threshold
    ///
    /// The macros call this with a frame naming the enclosing function.
    pub fn log_at<I: IntoIterator<Item = Value>>(
        &self,
        level: Level,
        frame: Frame,
        message: &str,
        args: I,
    ) {
        let frame = self.add_source.then_some(frame);
        self.emit(level, frame, message, args);
    }

    /// Flush the sink this logger writes to
    pub fn flush(&self) -> Result<()> {
        match &self.output {
            Some(sink) => sink.flush()?,
            None => global::default_output().flush()?,
        }
        Ok(())
    }

    fn emit<I>(&self, level: Level, frame: Option<Frame>, message: &str, args: I)
    where
        I: IntoIterator<Item = Value>,
    {
        let mut slot = ENTRY_POOL.get();

        let mut text = std::mem::take(&mut slot.message);
        text.clear();
        text.push_str(message);

        let mut assembled = std::mem::take(&mut slot.args);
        assembled.clear();
        assembled.extend(self.prefix_args.iter().cloned());
        assembled.extend(args);
        assembled.extend(self.suffix_args.iter().cloned());

        let mut entry = Entry::new(self, level, text, assembled);
        entry.frame = frame;

        for hook in &self.entry_hooks {
            if let Err(err) = hook(level, &mut entry) {
                diagnostic::report("entry hook", &err);
            }
        }

        let mut buffer = BUFFER_POOL.get();
        buffer.clear();
        match &self.formatter {
            Some(formatter) => formatter.format(&mut *buffer, &entry),
            None => global::default_formatter().format(&mut *buffer, &entry),
        }
        let data: &[u8] = &buffer;

        for hook in &self.before_hooks {
            if let Err(err) = hook(level, data) {
                diagnostic::report("before hook", &err);
            }
        }

        // Sink write errors are dropped
        let _ = match &self.output {
            Some(sink) => sink.write(data),
            None => global::default_output().write(data),
        };

        for hook in &self.after_hooks {
            if let Err(err) = hook(level, data) {
                diagnostic::report("after hook", &err);
            }
        }

        slot.message = entry.message;
        slot.args = entry.args;
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("level", &self.level)
            .field("add_source", &self.add_source)
            .field("output", &self.output.is_some())
            .field("formatter", &self.formatter.is_some())
            .field("entry_hooks", &self.entry_hooks.len())
            .field("before_hooks", &self.before_hooks.len())
            .field("after_hooks", &self.after_hooks.len())
            .field("prefix_args", &self.prefix_args)
            .field("suffix_args", &self.suffix_args)
            .finish()
    }
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```
/// use rust_logx::prelude::*;
///
/// let sink = MemorySink::new();
/// let logger = Logger::builder()
///     .level(Level::INFO)
///     .add_source(true)
///     .formatter(TextFieldFormatter::new())
///     .output(sink.clone())
///     .prefix_arg("service")
///     .prefix_arg("api")
///     .build();
///
/// logger.debug("hidden", []);
/// logger.info("visible", []);
/// assert_eq!(sink.lines().len(), 1);
/// ```
pub struct LoggerBuilder {
    logger: Logger,
}

impl LoggerBuilder {
    pub fn new() -> Self {
        Self {
            logger: Logger::new(),
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn level(mut self, level: Level) -> Self {
        self.logger.level = level;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn add_source(mut self, add_source: bool) -> Self {
        self.logger.add_source = add_source;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn output<S: Sink + 'static>(mut self, sink: S) -> Self {
        self.logger.set_output(sink);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn formatter<F: Formatter + 'static>(mut self, formatter: F) -> Self {
        self.logger.set_formatter(formatter);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn entry_hook<F>(mut self, hook: F) -> Self
    where
        F: Fn(Level, &mut Entry<'_>) -> Result<()> + Send + Sync + 'static,
    {
        self.logger.add_entry_hook(hook);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn before_hook<F>(mut self, hook: F) -> Self
    where
        F: Fn(Level, &[u8]) -> Result<()> + Send + Sync + 'static,
    {
        self.logger.add_before_hook(hook);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn after_hook<F>(mut self, hook: F) -> Self
    where
        F: Fn(Level, &[u8]) -> Result<()> + Send + Sync + 'static,
    {
        self.logger.add_after_hook(hook);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn prefix_arg(mut self, arg: impl Into<Value>) -> Self {
        self.logger.push_prefix_arg(arg);
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn suffix_arg(mut self, arg: impl Into<Value>) -> Self {
        self.logger.push_suffix_arg(arg);
        self
    }

    pub fn build(self) -> Logger {
        self.logger
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
