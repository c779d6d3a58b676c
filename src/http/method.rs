//! HTTP method constants and utilities

use reqwest::Method;

use crate::errors::HttpcliError;

/// HTTP POST method
pub const POST: &str = "POST";

/// HTTP PUT method
pub const PUT: &str = "PUT";

/// Methods that always carry a request body read from stdin
pub const BODY_METHODS: &[&str] = &[POST, PUT];

/// Whether `method` reads its body from stdin even without a content-type argument
pub fn body_required(method: &Method) -> bool {
    BODY_METHODS.iter().any(|m| *m == method.as_str())
}

/// Parse a verb from the command line as an HTTP method
///
/// Verbs are upper-cased, so `get` and `GET` are the same request. Anything
/// that is a valid token is accepted, which lets custom methods through.
pub fn parse(verb: &str) -> Result<Method, HttpcliError> {
    Method::from_bytes(verb.to_ascii_uppercase().as_bytes())
        .map_err(|_| HttpcliError::Usage(format!("Invalid HTTP method: {}", verb)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_uppercases() {
        assert_eq!(parse("get").unwrap(), Method::GET);
        assert_eq!(parse("Delete").unwrap(), Method::DELETE);
        assert_eq!(parse("purge").unwrap().as_str(), "PURGE");
    }

    #[test]
    fn test_parse_rejects_non_tokens() {
        assert!(parse("GE T").is_err());
        assert!(parse("").is_err());
        assert!(parse("a/b").is_err());
    }

    #[test]
    fn test_body_required() {
        assert!(body_required(&Method::POST));
        assert!(body_required(&Method::PUT));
        assert!(!body_required(&Method::GET));
        assert!(!body_required(&Method::DELETE));
        assert!(!body_required(&Method::PATCH));
    }
}
