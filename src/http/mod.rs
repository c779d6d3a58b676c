//! HTTP method handling

mod method;

pub use method::*;
