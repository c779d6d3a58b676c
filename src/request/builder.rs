//! Outbound request assembly
//!
//! Builds the single request of an HTTP invocation from the session context,
//! the URL argument and stdin.

use std::io::Read;

use reqwest::Method;
use url::Url;

use crate::errors::HttpcliError;
use crate::http;
use crate::request::url::combine;
use crate::sessions::headers::{self, HeaderSet};
use crate::sessions::Context;

/// Content type of a request body when neither the command line nor the
/// session sets one
pub const DEFAULT_CONTENT_TYPE: &str = "application/json";

const CONTENT_TYPE: &str = "Content-Type";

/// A request ready to be sent
#[derive(Debug, Clone)]
pub struct OutboundRequest {
    pub method: Method,
    pub url: Url,
    /// Session headers, before exclusions and content-type resolution
    pub headers: HeaderSet,
    /// Fully buffered body, present for POST/PUT or when a content type was given
    pub body: Option<Vec<u8>>,
    /// Content type given on the command line
    pub content_type: Option<String>,
}

impl OutboundRequest {
    /// Build the request for `method url_arg [content_type]` against `ctx`,
    /// reading the body from `stdin` when one is needed
    pub fn build<R: Read>(
        method: Method,
        url_arg: &str,
        content_type: Option<&str>,
        ctx: &Context,
        mut stdin: R,
    ) -> Result<Self, HttpcliError> {
        if let Some(ct) = content_type {
            headers::validate(CONTENT_TYPE, Some(ct))?;
        }

        let base = ctx.base_url()?;
        let url = combine(base.as_ref(), url_arg)?;

        let body = if http::body_required(&method) || content_type.is_some() {
            let mut buf = Vec::new();
            stdin.read_to_end(&mut buf).map_err(HttpcliError::Stdin)?;
            Some(buf)
        } else {
            None
        };

        Ok(Self {
            method,
            url,
            headers: ctx.headers().clone(),
            body,
            content_type: content_type.map(str::to_string),
        })
    }

    /// Headers as sent: `exclude` removed first, then Content-Type resolved
    /// (command line, then session header, then `application/json`) when a
    /// body is present
    pub fn outgoing_headers(&self, exclude: &[String]) -> HeaderSet {
        let mut headers = self.headers.clone();
        for name in exclude {
            headers.remove(name.trim());
        }

        if self.body.is_some() {
            let content_type = self
                .content_type
                .clone()
                .or_else(|| headers.first(CONTENT_TYPE).map(str::to_string))
                .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string());
            headers.set(CONTENT_TYPE, content_type);
        }

        headers
    }
}
