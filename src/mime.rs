//! MIME type utilities
//!
//! Functions for parsing and handling MIME types and Content-Type headers.

use mime::Mime;
use std::collections::HashMap;

/// Parse Content-Type header into MIME type and parameters
///
/// # Examples
/// ```
/// use httpcli::mime::parse_content_type_header;
/// let (mime, params) = parse_content_type_header("application/json; charset=utf-8");
/// assert_eq!(mime, "application/json");
/// assert_eq!(params.get("charset"), Some(&"utf-8".to_string()));
/// ```
pub fn parse_content_type_header(header: &str) -> (String, HashMap<String, String>) {
    match header.parse::<Mime>() {
        Ok(m) => {
            let mime_type = format!("{}/{}", m.type_(), m.subtype());
            let params: HashMap<_, _> = m.params()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect();
            (mime_type, params)
        }
        Err(_) => {
            let base = header.split(';').next().unwrap_or(header).trim();
            (base.to_ascii_lowercase(), HashMap::new())
        }
    }
}

/// Whether a response Content-Type names a JSON document
///
/// Only `application/json` itself qualifies; parameters such as `charset`
/// are ignored.
pub fn is_json(content_type: Option<&str>) -> bool {
    match content_type {
        Some(header) => {
            parse_content_type_header(header).0.eq_ignore_ascii_case("application/json")
        }
        None => false,
    }
}
