//! Core logger types and traits

pub mod config;
pub mod diagnostic;
pub mod error;
pub mod formatter;
pub mod log_entry;
pub mod log_level;
pub mod logger;
pub mod pool;
pub mod sink;
pub mod value;

pub use config::{FormatKind, LoggerConfig, OutputKind};
pub use diagnostic::DiagnosticHandler;
pub use error::{LoggerError, Result};
pub use formatter::{
    format_caller, format_field_args, format_json_args, format_text_args, format_time,
    format_time_rfc3339, FormatArgs, FormatCaller, FormatTime, Formatter,
};
pub use log_entry::{Entry, Frame};
pub use log_level::Level;
pub use logger::{EntryHook, Logger, LoggerBuilder, OutputHook};
pub use sink::{FileSink, MemorySink, Sink, WriterSink};
pub use value::Value;
