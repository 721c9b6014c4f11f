//! Field-style text formatter

use crate::core::formatter::{
    ensure_newline, format_field_args, format_time, FormatArgs, FormatCaller, FormatTime, Overrides,
};
use crate::core::{Entry, Formatter, Frame, Value};
use chrono::{DateTime, Local};
use std::sync::Arc;

/// `time="..." level="..." caller="..." message="..." key="value" ...`
///
/// Arguments are read as alternating key/value pairs. Keys are written bare
/// and are expected to be valid field names; values are quoted with their
/// display form. Nothing is escaped.
#[derive(Debug, Clone, Default)]
pub struct TextFieldFormatter {
    overrides: Overrides,
}

impl TextFieldFormatter {
    pub fn new() -> Self {
        Self::default()
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

impl Formatter for TextFieldFormatter {
    fn format(&self, buffer: &mut Vec<u8>, entry: &Entry<'_>) {
        buffer.extend_from_slice(b"time=\"");
        self.overrides.time(buffer, &entry.time, format_time);
        buffer.extend_from_slice(b"\" level=\"");
        entry.level.write_to(buffer);
        if let Some(frame) = &entry.frame {
            buffer.extend_from_slice(b"\" caller=\"");
            self.overrides.caller(buffer, frame);
        }
        buffer.extend_from_slice(b"\" message=\"");
        buffer.extend_from_slice(entry.message.as_bytes());
        buffer.push(b'"');

        if !entry.args.is_empty() {
            self.overrides.args(buffer, &entry.args, format_field_args);
        }

        ensure_newline(buffer);
    }
}
