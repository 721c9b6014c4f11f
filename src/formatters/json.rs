//! Single-line JSON formatter
//!
//! Output has a fixed field order:
//!
//! ```text
//! {"level":"INFO","time":"2024-03-07T09:05:02.5+01:00","caller":"src/main.rs:9","message":"hi","args":["k","v"]}
//! ```
//!
//! `level`, `time`, `caller` and `message` are copied between literal quotes
//! without escaping, so they must not contain characters that need JSON
//! escaping. Only `args` is JSON encoded, which keeps that field parseable on
//! its own even when another field breaks the surrounding line.

use crate::core::formatter::{
    encode_json, format_time_rfc3339, FormatArgs, FormatCaller, FormatTime, Overrides,
};
use crate::core::{Entry, Formatter, Frame, Value};
use chrono::{DateTime, Local};
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct JsonFormatter {
    overrides: Overrides,
}

impl JsonFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render args as a key/value object instead of an array
    ///
    /// Shorthand for `with_args_format(format_json_args)`.
    #[must_use]
    pub fn with_field_args(self) -> Self {
        self.with_args_format(crate::core::formatter::format_json_args)
    }

    #[must_use]
    pub fn with_time_format<F>(mut self, render: F) -> Self
    where
        F: Fn(&mut Vec<u8>, &DateTime<Local>) + Send + Sync + 'static,
    {
        self.overrides.time = Some(Arc::new(render) as FormatTime);
        self
    }

    #[must_use]
    pub fn with_caller_format<F>(mut self, render: F) -> Self
    where
        F: Fn(&mut Vec<u8>, &Frame) + Send + Sync + 'static,
    {
        self.overrides.caller = Some(Arc::new(render) as FormatCaller);
        self
    }

    #[must_use]
    pub fn with_args_format<F>(mut self, render: F) -> Self
    where
        F: Fn(&mut Vec<u8>, &[Value]) + Send + Sync + 'static,
    {
        self.overrides.args = Some(Arc::new(render) as FormatArgs);
        self
    }
}

fn format_args_array(buffer: &mut Vec<u8>, args: &[Value]) {
    encode_json(buffer, args, "json format encode args");
}

impl Formatter for JsonFormatter {
    fn format(&self, buffer: &mut Vec<u8>, entry: &Entry<'_>) {
        buffer.extend_from_slice(br#"{"level":""#);
        entry.level.write_to(buffer);
        buffer.extend_from_slice(br#"","time":""#);
        self.overrides.time(buffer, &entry.time, format_time_rfc3339);
        buffer.extend_from_slice(br#"","caller":""#);
        if let Some(frame) = &entry.frame {
            self.overrides.caller(buffer, frame);
        }
        buffer.extend_from_slice(br#"","message":""#);
        buffer.extend_from_slice(entry.message.as_bytes());
        buffer.extend_from_slice(br#"","args":"#);
        self.overrides.args(buffer, &entry.args, format_args_array);
        buffer.extend_from_slice(b"}\n");
    }
}
