//! Log level definitions
//!
//! Levels are small signed integers. The named levels use non-positive values
//! with `DEBUG = 0` and each more severe level one lower, so a threshold admits
//! a target level when `threshold.value() >= target.value()`. Ordering on
//! [`Level`] follows severity, not the raw number.

use super::error::LoggerError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Level(i32);

impl Level {
    pub const DEBUG: Level = Level(0);
    pub const INFO: Level = Level(-1);
    pub const WARN: Level = Level(-2);
    pub const ERROR: Level = Level(-3);

    /// Wrap an arbitrary integer; values outside the named set render as `UNKNOWN<n>`.
    pub const fn from_i32(value: i32) -> Self {
        Level(value)
    }

    pub const fn value(self) -> i32 {
        self.0
    }

    /// Whether a logger with threshold `self` emits entries at `target`.
    #[inline]
    pub const fn admits(self, target: Level) -> bool {
        self.0 >= target.0
    }

    /// Name of a known level, `None` for anything else.
    pub const fn name(self) -> Option<&'static str> {
        match self.0 {
            0 => Some("DEBUG"),
            -1 => Some("INFO"),
            -2 => Some("WARN"),
            -3 => Some("ERROR"),
            _ => None,
        }
    }

    /// ANSI-colored name of a known level, `None` for anything else.
    pub const fn colored_name(self) -> Option<&'static str> {
        match self.0 {
            0 => Some("\x1b[37mDEBUG\x1b[0m"),
            -1 => Some("\x1b[36mINFO\x1b[0m"),
            -2 => Some("\x1b[33mWARN\x1b[0m"),
            -3 => Some("\x1b[31mERROR\x1b[0m"),
            _ => None,
        }
    }

    /// Plain rendering, e.g. `INFO` or `UNKNOWN7`.
    pub fn as_str(self) -> std::borrow::Cow<'static, str> {
        match self.name() {
            Some(name) => name.into(),
            None => format!("UNKNOWN{}", self.0).into(),
        }
    }

    /// Colored rendering, e.g. `\x1b[36mINFO\x1b[0m`. Unknown levels are uncolored.
    pub fn color(self) -> std::borrow::Cow<'static, str> {
        match self.colored_name() {
            Some(name) => name.into(),
            None => format!("UNKNOWN{}", self.0).into(),
        }
    }

    /// Append the plain rendering without allocating.
    pub fn write_to(self, buffer: &mut Vec<u8>) {
        match self.name() {
            Some(name) => buffer.extend_from_slice(name.as_bytes()),
            None => self.write_unknown(buffer),
        }
    }

    /// Append the colored rendering without allocating.
    pub fn write_color_to(self, buffer: &mut Vec<u8>) {
        match self.colored_name() {
            Some(name) => buffer.extend_from_slice(name.as_bytes()),
            None => self.write_unknown(buffer),
        }
    }

    fn write_unknown(self, buffer: &mut Vec<u8>) {
        use std::io::Write;
        buffer.extend_from_slice(b"UNKNOWN");
        // Writing into a Vec cannot fail
        let _ = write!(buffer, "{}", self.0);
    }

    #[cfg(feature = "console")]
    pub fn color_code(self) -> Option<colored::Color> {
        use colored::Color::*;
        match self.0 {
            0 => Some(White),
            -1 => Some(Cyan),
            -2 => Some(Yellow),
            -3 => Some(Red),
            _ => None,
        }
    }
}

impl PartialOrd for Level {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Level {
    fn cmp(&self, other: &Self) -> Ordering {
        other.0.cmp(&self.0)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "UNKNOWN{}", self.0),
        }
    }
}

impl From<i32> for Level {
    fn from(value: i32) -> Self {
        Level(value)
    }
}

impl FromStr for Level {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_uppercase();
        match upper.as_str() {
            "DEBUG" => Ok(Level::DEBUG),
            "INFO" => Ok(Level::INFO),
            "WARN" | "WARNING" => Ok(Level::WARN),
            "ERROR" => Ok(Level::ERROR),
            other => other
                .strip_prefix("UNKNOWN")
                .unwrap_or(other)
                .parse::<i32>()
                .map(Level)
                .map_err(|_| LoggerError::InvalidLevel(s.to_string())),
        }
    }
}
