//! Output handling (formatting, diagnostics)

pub mod formatters;
pub mod terminal;
pub mod writer;

pub use formatters::{format_json, JsonFormatterOptions};
pub use writer::DiagnosticWriter;
