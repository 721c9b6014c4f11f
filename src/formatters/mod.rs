//! Built-in formatters

pub mod json;
pub mod text;
pub mod text_field;

pub use json::JsonFormatter;
pub use text::TextFormatter;
pub use text_field::TextFieldFormatter;
