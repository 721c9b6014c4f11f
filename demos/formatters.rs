//! Formatter showcase
//!
//! Renders the same entries through every built-in formatter, a customized
//! one and a plain function.
//!
//! Run with: cargo run --example formatters

use rust_logx::prelude::*;
use rust_logx::{format_caller, format_json_args};

fn short_time(buffer: &mut Vec<u8>, time: &chrono::DateTime<chrono::Local>) {
    buffer.extend_from_slice(time.format("%H:%M:%S").to_string().as_bytes());
}

fn message_only(buffer: &mut Vec<u8>, entry: &Entry<'_>) {
    buffer.extend_from_slice(b"> ");
    buffer.extend_from_slice(entry.message.as_bytes());
    buffer.push(b'\n');
}

fn emit(title: &str, formatter: impl Formatter + 'static) {
    println!("--- {} ---", title);
    let logger = Logger::builder()
        .add_source(true)
        .formatter(formatter)
        .output(std::io::stdout())
        .prefix_arg("service")
        .prefix_arg("demo")
        .build();

    logger.info("user signed in", args!["user", "张三", "attempt", 1]);
    logger.error("payment failed", args!["amount", 12.5, "retry", false]);
    println!();
}

fn main() {
    emit("text", TextFormatter::new());
    emit("text with color", TextFormatter::new().with_color(true));
    emit("text field", TextFieldFormatter::new());
    emit("json", JsonFormatter::new());
    emit("json with field args", JsonFormatter::new().with_args_format(format_json_args));
    emit(
        "text with short time and caller",
        TextFormatter::new()
            .with_time_format(short_time)
            .with_caller_format(|buffer: &mut Vec<u8>, frame: &Frame| {
                buffer.push(b'[');
                format_caller(buffer, frame);
                buffer.push(b']');
            }),
    );
    emit("plain function", message_only);
}
