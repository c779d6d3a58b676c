//! Process execution context

pub mod environment;

pub use environment::Environment;
