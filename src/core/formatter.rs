//! Formatter trait and the default field renderers
//!
//! A [`Formatter`] appends the serialized form of an [`Entry`] to a byte
//! buffer. The stock formatters share three optional override points for the
//! time, caller and argument fields; when an override is absent the matching
//! function from this module is used.

use super::diagnostic;
use super::error::LoggerError;
use super::log_entry::{Entry, Frame};
use super::value::Value;
use chrono::{DateTime, Datelike, Local, Timelike};
use serde::Serialize;
use std::fmt;
use std::io::Write;
use std::sync::Arc;

pub trait Formatter: Send + Sync {
    /// Append `entry` to `buffer`. Must never clear existing content.
    fn format(&self, buffer: &mut Vec<u8>, entry: &Entry<'_>);
}

impl<F> Formatter for F
where
    F: Fn(&mut Vec<u8>, &Entry<'_>) + Send + Sync,
{
    fn format(&self, buffer: &mut Vec<u8>, entry: &Entry<'_>) {
        self(buffer, entry)
    }
}

pub type FormatTime = Arc<dyn Fn(&mut Vec<u8>, &DateTime<Local>) + Send + Sync>;
pub type FormatCaller = Arc<dyn Fn(&mut Vec<u8>, &Frame) + Send + Sync>;
pub type FormatArgs = Arc<dyn Fn(&mut Vec<u8>, &[Value]) + Send + Sync>;

/// Optional per-field renderers shared by the stock formatters
#[derive(Clone, Default)]
pub struct Overrides {
    pub(crate) time: Option<FormatTime>,
    pub(crate) caller: Option<FormatCaller>,
    pub(crate) args: Option<FormatArgs>,
}

impl Overrides {
    pub(crate) fn time(
        &self,
        buffer: &mut Vec<u8>,
        time: &DateTime<Local>,
        default: fn(&mut Vec<u8>, &DateTime<Local>),
    ) {
        match &self.time {
            Some(render) => render(buffer, time),
            None => default(buffer, time),
        }
    }

    pub(crate) fn caller(&self, buffer: &mut Vec<u8>, frame: &Frame) {
        match &self.caller {
            Some(render) => render(buffer, frame),
            None => format_caller(buffer, frame),
        }
    }

    pub(crate) fn args(
        &self,
        buffer: &mut Vec<u8>,
        args: &[Value],
        default: fn(&mut Vec<u8>, &[Value]),
    ) {
        match &self.args {
            Some(render) => render(buffer, args),
            None => default(buffer, args),
        }
    }
}

impl fmt::Debug for Overrides {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Overrides")
            .field("time", &self.time.is_some())
            .field("caller", &self.caller.is_some())
            .field("args", &self.args.is_some())
            .finish()
    }
}

/// Append `value` in decimal, left-padded with zeros to `width` digits
fn push_digits(buffer: &mut Vec<u8>, value: u64, width: usize) {
    let mut digits = [0u8; 20];
    let mut pos = digits.len();
    let mut rest = value;
    loop {
        pos -= 1;
        digits[pos] = b'0' + (rest % 10) as u8;
        rest /= 10;
        if rest == 0 && digits.len() - pos >= width {
            break;
        }
    }
    buffer.extend_from_slice(&digits[pos..]);
}

/// `YYYY-MM-DD HH:MM:SS`, with no timezone conversion
pub fn format_time(buffer: &mut Vec<u8>, time: &DateTime<Local>) {
    push_date_time(buffer, time, b' ');
}

/// RFC 3339 with as many fractional digits as the timestamp needs
pub fn format_time_rfc3339(buffer: &mut Vec<u8>, time: &DateTime<Local>) {
    push_date_time(buffer, time, b'T');

    let nanos = time.nanosecond() % 1_000_000_000;
    if nanos != 0 {
        buffer.push(b'.');
        if nanos % 1_000_000 == 0 {
            push_digits(buffer, u64::from(nanos / 1_000_000), 3);
        } else if nanos % 1_000 == 0 {
            push_digits(buffer, u64::from(nanos / 1_000), 6);
        } else {
            push_digits(buffer, u64::from(nanos), 9);
        }
    }

    let offset = time.offset().local_minus_utc();
    buffer.push(if offset < 0 { b'-' } else { b'+' });
    let minutes = offset.unsigned_abs() / 60;
    push_digits(buffer, u64::from(minutes / 60), 2);
    buffer.push(b':');
    push_digits(buffer, u64::from(minutes % 60), 2);
}

fn push_date_time(buffer: &mut Vec<u8>, time: &DateTime<Local>, separator: u8) {
    let year = time.year();
    if year < 0 {
        buffer.push(b'-');
    }
    push_digits(buffer, u64::from(year.unsigned_abs()), 4);
    buffer.push(b'-');
    push_digits(buffer, u64::from(time.month()), 2);
    buffer.push(b'-');
    push_digits(buffer, u64::from(time.day()), 2);
    buffer.push(separator);
    push_digits(buffer, u64::from(time.hour()), 2);
    buffer.push(b':');
    push_digits(buffer, u64::from(time.minute()), 2);
    buffer.push(b':');
    push_digits(buffer, u64::from(time.second()), 2);
}

/// `<file>:<line> <function>`; the function part is omitted when unknown
pub fn format_caller(buffer: &mut Vec<u8>, frame: &Frame) {
    buffer.extend_from_slice(frame.file.as_bytes());
    buffer.push(b':');
    push_digits(buffer, u64::from(frame.line), 1);
    if !frame.function.is_empty() {
        buffer.push(b' ');
        buffer.extend_from_slice(frame.function.as_bytes());
    }
}

/// Space-separated values followed by a newline
pub fn format_text_args(buffer: &mut Vec<u8>, args: &[Value]) {
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            buffer.push(b' ');
        }
        write_display(buffer, arg);
    }
    buffer.push(b'\n');
}

/// Alternating pairs as ` key="value"`. Keys are written bare.
pub fn format_field_args(buffer: &mut Vec<u8>, args: &[Value]) {
    for (i, arg) in args.iter().enumerate() {
        if i % 2 == 0 {
            buffer.push(b' ');
            write_key(buffer, arg, i, "text field format");
            buffer.push(b'=');
            continue;
        }
        buffer.push(b'"');
        write_display(buffer, arg);
        buffer.push(b'"');
    }
}

/// Alternating pairs as a JSON object, `{"k1":v1,"k2":v2}`
///
/// Values are JSON encoded, keys are inserted raw. An unpaired final key
/// renders as `"key":null`.
pub fn format_json_args(buffer: &mut Vec<u8>, args: &[Value]) {
    buffer.push(b'{');
    for (i, pair) in args.chunks(2).enumerate() {
        if i > 0 {
            buffer.push(b',');
        }
        buffer.push(b'"');
        write_key(buffer, &pair[0], i * 2, "json format");
        buffer.extend_from_slice(b"\":");
        match pair.get(1) {
            Some(value) => encode_json(buffer, value, "json encode args"),
            None => buffer.extend_from_slice(b"null"),
        }
    }
    buffer.push(b'}');
}

/// JSON-encode `value` into `buffer`, reporting and skipping past failures
pub(crate) fn encode_json<T: Serialize + ?Sized>(buffer: &mut Vec<u8>, value: &T, context: &str) {
    if let Err(err) = serde_json::to_writer(&mut *buffer, value) {
        diagnostic::report(context, &LoggerError::from(err));
    }
}

pub(crate) fn ensure_newline(buffer: &mut Vec<u8>) {
    if buffer.last() != Some(&b'\n') {
        buffer.push(b'\n');
    }
}

fn write_display(buffer: &mut Vec<u8>, value: &Value) {
    match value.as_str() {
        Some(s) => buffer.extend_from_slice(s.as_bytes()),
        None => {
            let _ = write!(buffer, "{}", value);
        }
    }
}

fn write_key(buffer: &mut Vec<u8>, key: &Value, index: usize, context: &str) {
    if !key.is_str() {
        diagnostic::report(
            context,
            &LoggerError::contract(format!("argument {} is used as a field key but is not a string", index)),
        );
    }
    write_display(buffer, key);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_time() -> DateTime<Local> {
        Local
            .with_ymd_and_hms(2024, 3, 7, 9, 5, 2)
            .single()
            .expect("unambiguous local time")
    }

    fn render(f: impl Fn(&mut Vec<u8>)) -> String {
        let mut buf = Vec::new();
        f(&mut buf);
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_format_time_zero_pads() {
        let out = render(|b| format_time(b, &fixed_time()));
        assert_eq!(out, "2024-03-07 09:05:02");
    }

    #[test]
    fn test_format_time_rfc3339() {
        let out = render(|b| format_time_rfc3339(b, &fixed_time()));
        assert!(out.starts_with("2024-03-07T09:05:02"));
        assert!(out.parse::<DateTime<chrono::FixedOffset>>().is_ok());
    }

    #[test]
    fn test_format_time_rfc3339_fraction_widths() {
        for nanos in [0, 120_000_000, 123_456_000, 123_456_789, 5] {
            let time = fixed_time().with_nanosecond(nanos).expect("valid nanosecond");
            let expected = time.format("%Y-%m-%dT%H:%M:%S%.f%:z").to_string();
            assert_eq!(render(|b| format_time_rfc3339(b, &time)), expected);
        }
    }

    #[test]
    fn test_push_digits() {
        assert_eq!(render(|b| push_digits(b, 0, 1)), "0");
        assert_eq!(render(|b| push_digits(b, 7, 4)), "0007");
        assert_eq!(render(|b| push_digits(b, 12345, 2)), "12345");
    }

    #[test]
    fn test_format_caller() {
        let frame = Frame::new("src/main.rs", 42, 5, "app::handlers");
        assert_eq!(render(|b| format_caller(b, &frame)), "src/main.rs:42 app::handlers");

        let frame = Frame::new("src/main.rs", 7, 1, "");
        assert_eq!(render(|b| format_caller(b, &frame)), "src/main.rs:7");
    }

    #[test]
    fn test_format_text_args() {
        let args = vec![Value::from("a"), Value::from(1), Value::from(true)];
        assert_eq!(render(|b| format_text_args(b, &args)), "a 1 true\n");
    }

    #[test]
    fn test_format_field_args() {
        let args = vec![Value::from("user"), Value::from("alice"), Value::from("n"), Value::from(3)];
        assert_eq!(render(|b| format_field_args(b, &args)), r#" user="alice" n="3""#);

        let odd = vec![Value::from("dangling")];
        assert_eq!(render(|b| format_field_args(b, &odd)), " dangling=");
    }

    #[test]
    fn test_format_json_args() {
        let args = vec![Value::from("name"), Value::from("张三"), Value::from("age"), Value::from(30)];
        let out = render(|b| format_json_args(b, &args));
        assert_eq!(out, r#"{"name":"张三","age":30}"#);
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed["name"], "张三");
    }

    #[test]
    fn test_format_json_args_odd_and_empty() {
        let args = vec![Value::from("k"), Value::from(1), Value::from("last")];
        assert_eq!(render(|b| format_json_args(b, &args)), r#"{"k":1,"last":null}"#);
        assert_eq!(render(|b| format_json_args(b, &[])), "{}");
    }

    #[test]
    fn test_ensure_newline_is_idempotent() {
        let mut buf = b"line".to_vec();
        ensure_newline(&mut buf);
        ensure_newline(&mut buf);
        assert_eq!(buf, b"line\n");
    }
}
