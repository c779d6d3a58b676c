//! Request building module
//!
//! Resolves the URL argument against the session and assembles the outbound
//! request.

mod builder;
pub mod url;

pub use builder::{OutboundRequest, DEFAULT_CONTENT_TYPE};
pub use self::url::combine;
