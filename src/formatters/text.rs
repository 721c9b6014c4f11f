//! Plain text formatter

use crate::core::formatter::{
    ensure_newline, format_text_args, format_time, FormatArgs, FormatCaller, FormatTime, Overrides,
};
use crate::core::{Entry, Formatter, Frame, Value};
use chrono::{DateTime, Local};
use std::sync::Arc;

/// `<time> <level> <caller> <message> <args>` on one line
///
/// With colors enabled the level comes first and is ANSI colored:
/// `<colored-level> <time> ...`. Caller, message and args are each omitted
/// when absent.
///
/// ```text
/// 2024-03-07 09:05:02 INFO src/main.rs:12 server started port 8080
/// ```
#[derive(Debug, Clone, Default)]
pub struct TextFormatter {
    color: bool,
    overrides: Overrides,
}

impl TextFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
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

    /// Enable colors when the terminal allows it
    ///
    /// Follows `colored`'s detection, which honors `NO_COLOR`, `CLICOLOR`,
    /// `CLICOLOR_FORCE` and whether stdout is a terminal.
    #[cfg(feature = "console")]
    pub fn auto_color() -> Self {
        Self::new().with_color(colored::control::SHOULD_COLORIZE.should_colorize())
    }

    pub fn color(&self) -> bool {
        self.color
    }
}

impl Formatter for TextFormatter {
    fn format(&self, buffer: &mut Vec<u8>, entry: &Entry<'_>) {
        if self.color {
            entry.level.write_color_to(buffer);
            buffer.push(b' ');
            self.overrides.time(buffer, &entry.time, format_time);
        } else {
            self.overrides.time(buffer, &entry.time, format_time);
            buffer.push(b' ');
            entry.level.write_to(buffer);
        }

        if let Some(frame) = &entry.frame {
            buffer.push(b' ');
            self.overrides.caller(buffer, frame);
        }

        if !entry.message.is_empty() {
            buffer.push(b' ');
            buffer.extend_from_slice(entry.message.as_bytes());
        }

        if !entry.args.is_empty() {
            buffer.push(b' ');
            self.overrides.args(buffer, &entry.args, format_text_args);
        }

        ensure_newline(buffer);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Level, Logger};
    use chrono::TimeZone;

    fn entry<'a>(logger: &'a Logger, message: &str, args: Vec<Value>) -> Entry<'a> {
        let mut entry = Entry::new(logger, Level::INFO, message.to_string(), args);
        entry.time = Local
            .with_ymd_and_hms(2024, 3, 7, 9, 5, 2)
            .single()
            .expect("unambiguous local time");
        entry
    }

    fn render(formatter: &TextFormatter, entry: &Entry<'_>) -> String {
        let mut buf = Vec::new();
        formatter.format(&mut buf, entry);
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_plain_layout() {
        let logger = Logger::new();
        let e = entry(&logger, "started", vec!["port".into(), 8080.into()]);
        assert_eq!(
            render(&TextFormatter::new(), &e),
            "2024-03-07 09:05:02 INFO started port 8080\n"
        );
    }

    #[test]
    fn test_color_puts_level_first() {
        let logger = Logger::new();
        let e = entry(&logger, "started", vec![]);
        assert_eq!(
            render(&TextFormatter::new().with_color(true), &e),
            "\x1b[36mINFO\x1b[0m 2024-03-07 09:05:02 started\n"
        );
    }

    #[cfg(feature = "console")]
    #[test]
    fn test_auto_color_follows_override() {
        colored::control::set_override(true);
        assert!(TextFormatter::auto_color().color());
        colored::control::set_override(false);
        assert!(!TextFormatter::auto_color().color());
        colored::control::unset_override();
    }

    #[test]
    fn test_caller_and_empty_message() {
        let logger = Logger::new();
        let mut e = entry(&logger, "", vec![]);
        e.frame = Some(Frame::new("src/lib.rs", 10, 1, "app"));
        assert_eq!(
            render(&TextFormatter::new(), &e),
            "2024-03-07 09:05:02 INFO src/lib.rs:10 app\n"
        );
    }

    #[test]
    fn test_single_trailing_newline() {
        let logger = Logger::new();
        let formatter = TextFormatter::new();
        for args in [vec![], vec![Value::from("x")]] {
            let out = render(&formatter, &entry(&logger, "m", args));
            assert!(out.ends_with('\n'));
            assert!(!out.ends_with("\n\n"));
        }
    }

    #[test]
    fn test_overrides() {
        let logger = Logger::new();
        let mut e = entry(&logger, "m", vec!["a".into(), "b".into()]);
        e.frame = Some(Frame::new("f.rs", 1, 1, ""));

        let formatter = TextFormatter::new()
            .with_time_format(|b, _| b.extend_from_slice(b"T"))
            .with_caller_format(|b, frame| b.extend_from_slice(frame.file.as_bytes()))
            .with_args_format(|b, args| {
                for arg in args {
                    b.extend_from_slice(arg.to_string().as_bytes());
                    b.push(b',');
                }
            });

        assert_eq!(render(&formatter, &e), "T INFO f.rs m a,b,\n");
    }

    #[test]
    fn test_appends_to_existing_buffer() {
        let logger = Logger::new();
        let e = entry(&logger, "m", vec![]);
        let mut buf = b"existing\n".to_vec();
        TextFormatter::new().format(&mut buf, &e);
        assert!(buf.starts_with(b"existing\n2024-03-07"));
    }
}
