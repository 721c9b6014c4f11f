//! Logging macros with module-qualified source frames.
//!
//! The macros behave like the [`Logger`](crate::Logger) methods, but convert
//! each argument with [`Value::from`](crate::Value) and, when source capture
//! is enabled, record the path of the enclosing function in the frame. The
//! methods only record `file:line`, so prefer the macros when the caller
//! rendering should name the function.
//!
//! # Examples
//!
//! ```
//! use rust_logx::prelude::*;
//! use rust_logx::{error, info};
//!
//! let sink = MemorySink::new();
//! let logger = Logger::builder().output(sink.clone()).build();
//!
//! info!(logger, "server started");
//! info!(logger, "listening", "port", 8080, "tls", false);
//!
//! // Formatted messages are plain expressions
//! let attempts = 3;
//! error!(logger, format!("gave up after {} attempts", attempts));
//!
//! assert_eq!(sink.lines().len(), 3);
//! ```

#[doc(hidden)]
#[macro_export]
macro_rules! __frame {
    () => {{
        fn __site() {}
        $crate::Frame::new(
            ::core::file!(),
            ::core::line!(),
            ::core::column!(),
            $crate::core::log_entry::enclosing_function(::core::any::type_name_of_val(&__site)),
        )
    }};
}

/// Build an argument array, converting each element with `Value::from`.
///
/// ```
/// use rust_logx::{args, Logger, Value};
///
/// let logger = Logger::builder().output(std::io::sink()).build();
/// logger.info("user", args!["id", 42, "admin", true]);
/// assert_eq!(args!["k", 1.5], [Value::from("k"), Value::from(1.5)]);
/// ```
#[macro_export]
macro_rules! args {
    ($($arg:expr),* $(,)?) => {
        [$($crate::Value::from($arg)),*]
    };
}

/// Log at an explicit level without checking the threshold.
///
/// ```
/// # use rust_logx::prelude::*;
/// # let logger = Logger::builder().output(std::io::sink()).build();
/// use rust_logx::log;
/// log!(logger, Level::WARN, "always emitted");
/// log!(logger, Level::ERROR, "code", "status", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $msg:expr $(, $arg:expr)* $(,)?) => {
        match ::core::convert::AsRef::<str>::as_ref(&$msg) {
            message => {
                $logger.log_at($level, $crate::__frame!(), message, $crate::args![$($arg),*])
            }
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __log_enabled {
    ($logger:expr, $level:expr, $msg:expr $(, $arg:expr)*) => {{
        let logger = &$logger;
        if logger.enabled($level) {
            $crate::log!(logger, $level, $msg $(, $arg)*);
        }
    }};
}

/// Log a debug-level message.
///
/// ```
/// # use rust_logx::prelude::*;
/// # let logger = Logger::builder().output(std::io::sink()).build();
/// use rust_logx::debug;
/// debug!(logger, "cache miss", "key", "user:42");
/// ```
#[macro_export]
macro_rules! debug {
    ($logger:expr, $msg:expr $(, $arg:expr)* $(,)?) => {
        $crate::__log_enabled!($logger, $crate::Level::DEBUG, $msg $(, $arg)*)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $msg:expr $(, $arg:expr)* $(,)?) => {
        $crate::__log_enabled!($logger, $crate::Level::INFO, $msg $(, $arg)*)
    };
}

/// Log a warning-level message.
///
/// ```
/// # use rust_logx::prelude::*;
/// # let logger = Logger::builder().output(std::io::sink()).build();
/// use rust_logx::warn;
/// let free = 12;
/// warn!(logger, format!("disk space low: {}%", free));
/// ```
#[macro_export]
macro_rules! warn {
    ($logger:expr, $msg:expr $(, $arg:expr)* $(,)?) => {
        $crate::__log_enabled!($logger, $crate::Level::WARN, $msg $(, $arg)*)
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($logger:expr, $msg:expr $(, $arg:expr)* $(,)?) => {
        $crate::__log_enabled!($logger, $crate::Level::ERROR, $msg $(, $arg)*)
    };
}
