//! # Rust Logx
//!
//! A small structured logging library with pooled entries and buffers,
//! pluggable formatters and hooks at every stage of a log call.
//!
//! ## Features
//!
//! - **Synchronous**: every call formats and writes on the caller's thread
//! - **Three Formatters**: plain text, `key="value"` fields and single-line JSON
//! - **Hooks**: modify the entry, then observe the bytes before and after the write
//! - **Low Allocation**: entries and output buffers are recycled through pools
//! - **Call Sites**: optional `file:line` capture via `#[track_caller]`
//!
//! ## Example
//!
//! ```
//! use rust_logx::prelude::*;
//!
//! let sink = MemorySink::new();
//! let logger = Logger::builder()
//!     .level(Level::INFO)
//!     .formatter(JsonFormatter::new().with_field_args())
//!     .output(sink.clone())
//!     .prefix_arg("service")
//!     .prefix_arg("billing")
//!     .build();
//!
//! logger.info("charged", args!["amount", 42]);
//! assert!(sink.contents().contains(r#""args":{"service":"billing","amount":42}"#));
//! ```

#[macro_use]
pub mod macros;

pub mod core;
pub mod formatters;
pub mod global;

pub mod prelude {
    pub use crate::args;
    pub use crate::core::{
        Entry, FileSink, Formatter, Frame, Level, Logger, LoggerBuilder, LoggerConfig,
        LoggerError, MemorySink, Result, Sink, Value, WriterSink,
    };
    pub use crate::formatters::{JsonFormatter, TextFieldFormatter, TextFormatter};
}

pub use crate::core::{
    format_caller, format_field_args, format_json_args, format_text_args, format_time,
    format_time_rfc3339, Entry, EntryHook, FileSink, Formatter, Frame, Level, Logger,
    LoggerBuilder, LoggerConfig, LoggerError, MemorySink, OutputHook, Result, Sink, Value,
    WriterSink,
};
pub use crate::formatters::{JsonFormatter, TextFieldFormatter, TextFormatter};
pub use crate::global::{
    default_formatter, default_logger, default_output, reset_defaults, set_default_formatter,
    set_default_logger, set_default_output,
};
