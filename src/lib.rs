//! httpcli library interface
//!
//! A command-line HTTP client that remembers a base URL and a set of headers
//! per shell session, so that `http get /widgets` works after a single
//! `http url https://api.example.com/v1`.
//!
//! # Module Organization
//!
//! - [`sessions`] - Session id, context model, header codec and stores
//! - [`request`] - URL combination and outbound request assembly
//! - [`client`] - Sending the request and writing the response
//! - [`cli`] - Argument parsing and command dispatch
//! - [`errors`] - Error types (HttpcliError, Result)
//! - [`status`] - Exit status codes (ExitStatus)
//! - [`core`] - Main execution logic

pub mod cli;
pub mod client;
pub mod config;
pub mod context;
pub mod core;
pub mod errors;
pub mod http;
pub mod mime;
pub mod output;
pub mod request;
pub mod sessions;
pub mod signals;
pub mod status;
pub mod strings;

pub use errors::{HttpcliError, Result};
pub use status::ExitStatus;
