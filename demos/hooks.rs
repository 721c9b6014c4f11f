//! Pipeline hooks example
//!
//! Shows entry hooks editing entries, output hooks observing the formatted
//! bytes, and hook failures going to the diagnostic channel.
//!
//! Run with: cargo run --example hooks

use rust_logx::core::diagnostic;
use rust_logx::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn main() -> Result<()> {
    println!("=== Rust Logx - Hooks Example ===\n");

    let written = Arc::new(AtomicUsize::new(0));
    let bytes_seen = Arc::clone(&written);
    let audit = MemorySink::new();
    let audit_copy = audit.clone();

    let logger = Logger::builder()
        .formatter(JsonFormatter::new().with_field_args())
        .output(std::io::stdout())
        .entry_hook(|level, entry| {
            // Tag every error with an alert flag
            if level == Level::ERROR {
                entry.args.push(Value::from("alert"));
                entry.args.push(Value::from(true));
            }
            Ok(())
        })
        .entry_hook(|_, entry| {
            if entry.message.is_empty() {
                return Err(LoggerError::hook("entry", "empty message"));
            }
            Ok(())
        })
        .before_hook(move |level, data| {
            if level >= Level::WARN {
                audit_copy.write(data)?;
            }
            Ok(())
        })
        .after_hook(move |_, data| {
            bytes_seen.fetch_add(data.len(), Ordering::Relaxed);
            Ok(())
        })
        .build();

    println!("1. Entries written to stdout:");
    logger.info("cache warmed", args!["entries", 1024]);
    logger.warn("slow query", args!["ms", 812]);
    logger.error("disk full", args!["mount", "/var"]);

    println!("\n2. A failing hook is reported but the entry is still written:");
    diagnostic::set_handler(Arc::new(|context: &str, err: &LoggerError| {
        println!("   diagnostic [{}]: {}", context, err);
    }));
    logger.info("", []);
    diagnostic::reset_handler();

    println!("\n3. Warnings and errors captured by the audit hook:");
    for line in audit.lines() {
        println!("   {}", line);
    }

    println!("\n{} bytes written in total", written.load(Ordering::Relaxed));

    Ok(())
}
