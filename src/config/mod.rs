//! Configuration loading

#[allow(clippy::module_inception)]
pub mod config;

pub use config::{Config, Defaults, StoreKind, CONFIG_DIR_VAR};
