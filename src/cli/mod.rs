//! CLI argument parsing and command dispatch

pub mod args;
pub mod command;

pub use args::Args;
pub use command::{Command, RequestFlags};
