//! Basic logger usage example
//!
//! Demonstrates leveled logging to stdout with the default text formatter.
//!
//! Run with: cargo run --example basic_usage

use rust_logx::prelude::*;
use rust_logx::{global, info, warn};

fn main() -> Result<()> {
    println!("=== Rust Logx - Basic Usage Example ===\n");

    // Create a logger writing to stdout, colored when it is a terminal
    let mut logger = Logger::new();
    logger.set_output(std::io::stdout());
    logger.set_formatter(TextFormatter::auto_color());

    // Log messages at different levels
    println!("1. Logging at different levels:");
    logger.debug("This is a debug message", []);
    logger.info("This is an info message", args!["port", 8080]);
    logger.warn("This is a warning message", []);
    logger.error("This is an error message", args!["code", 500]);

    println!("\n2. Logging with a higher threshold:");
    logger.set_level(Level::WARN);
    println!("   Level set to WARN - debug and info won't show:");
    logger.debug("Debug message (hidden)", []);
    logger.info("Info message (hidden)", []);
    logger.warn("Warning message (visible)", []);
    logger.log(Level::DEBUG, "log() ignores the threshold", []);

    println!("\n3. Source locations and macros:");
    logger.set_level(Level::DEBUG);
    logger.set_add_source(true);
    info!(logger, "caller recorded with module path", "user", "alice");
    warn!(logger, format!("{} retries left", 2));

    println!("\n4. Free functions on the default logger:");
    global::info("from the default logger", args!["pid", std::process::id()]);

    logger.flush()?;
    println!("\n=== Example completed successfully! ===");

    Ok(())
}
